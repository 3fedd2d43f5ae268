//! Per-row swipe state and the row view tree.
//!
//! A row's item view can wrap the swipeable container in any number of
//! decoration layers, so the container is located with a breadth-first walk
//! over [`ViewNode`]s, matching on the swipe capability rather than on a
//! node type.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::animation::OffsetAnimation;

/// Which side menu is (or should be) revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuDirection {
    #[default]
    None,
    /// The menu on the left edge, revealed by dragging right.
    Left,
    /// The menu on the right edge, revealed by dragging left.
    Right,
}

/// Menu widths a row is bound with. `None` means the row has no menu on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuSpec {
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl MenuSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn left(width: u32) -> Self {
        Self {
            left: Some(width),
            right: None,
        }
    }

    pub fn right(width: u32) -> Self {
        Self {
            left: None,
            right: Some(width),
        }
    }

    pub fn both(left: u32, right: u32) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }
}

/// Swipe state of one attached row container.
///
/// Offsets are in pixels: positive values slide the content left and reveal
/// the right menu, negative values reveal the left menu.
#[derive(Debug, Clone, Default)]
pub struct SwipeRow {
    menus: MenuSpec,
    direction: MenuDirection,
    offset: i32,
    animation: Option<OffsetAnimation>,
    binding: Option<u64>,
}

impl SwipeRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menus(menus: MenuSpec) -> Self {
        Self {
            menus,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Rebind the container to a new data item. Drops any open menu and
    /// running animation.
    pub fn rebind(&mut self, binding: u64, menus: MenuSpec) {
        self.binding = Some(binding);
        self.menus = menus;
        self.direction = MenuDirection::None;
        self.offset = 0;
        self.animation = None;
    }

    /// Identifier of the current binding, used as a weak reference by the
    /// open-row tracker.
    pub fn binding(&self) -> Option<u64> {
        self.binding
    }

    pub fn menus(&self) -> MenuSpec {
        self.menus
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn direction(&self) -> MenuDirection {
        self.direction
    }

    /// Logical offset the content is at, or heading to when animating.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Offset to draw at `now`.
    pub fn rendered_offset(&self, now: Instant) -> i32 {
        match &self.animation {
            Some(animation) if !animation.is_finished(now) => animation.value_at(now),
            _ => self.offset,
        }
    }

    pub fn animation(&self) -> Option<&OffsetAnimation> {
        self.animation.as_ref()
    }

    /// Drop a finished animation. Returns true while still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.animation.is_some_and(|a| a.is_finished(now)) {
            self.animation = None;
        }
        self.animation.is_some()
    }

    pub fn has_left_menu(&self) -> bool {
        self.menus.left.is_some_and(|w| w > 0)
    }

    pub fn has_right_menu(&self) -> bool {
        self.menus.right.is_some_and(|w| w > 0)
    }

    pub fn is_menu_open(&self) -> bool {
        self.direction != MenuDirection::None
    }

    pub fn is_left_complete_open(&self) -> bool {
        self.is_fully_open(MenuDirection::Left)
    }

    pub fn is_right_complete_open(&self) -> bool {
        self.is_fully_open(MenuDirection::Right)
    }

    /// The menu on `direction` is open and the content sits at its full width.
    pub fn is_fully_open(&self, direction: MenuDirection) -> bool {
        direction != MenuDirection::None
            && self.direction == direction
            && self.offset == self.open_offset(direction)
    }

    /// Offset at which the menu on `direction` is completely revealed.
    pub fn open_offset(&self, direction: MenuDirection) -> i32 {
        match direction {
            MenuDirection::None => 0,
            MenuDirection::Left => -(self.menus.left.unwrap_or(0) as i32),
            MenuDirection::Right => self.menus.right.unwrap_or(0) as i32,
        }
    }

    fn has_menu(&self, direction: MenuDirection) -> bool {
        match direction {
            MenuDirection::None => false,
            MenuDirection::Left => self.has_left_menu(),
            MenuDirection::Right => self.has_right_menu(),
        }
    }

    /// Whether a horizontal drag of `dis_x` (down x minus current x) would
    /// reveal a menu or close a fully open one.
    pub fn accepts_drag(&self, dis_x: i32) -> bool {
        if dis_x > 0 {
            self.has_right_menu() || self.is_left_complete_open()
        } else if dis_x < 0 {
            self.has_left_menu() || self.is_right_complete_open()
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Slide the content to fully reveal the menu on `direction`.
    ///
    /// Returns false if the row has no menu on that side.
    pub fn smooth_open(&mut self, direction: MenuDirection, duration: Duration) -> bool {
        if !self.has_menu(direction) {
            return false;
        }
        let target = self.open_offset(direction);
        self.animate_to(target, duration);
        self.direction = direction;
        true
    }

    /// Slide the content back to rest.
    pub fn smooth_close(&mut self, duration: Duration) {
        self.animate_to(0, duration);
        self.direction = MenuDirection::None;
    }

    /// Translate the content while the user drags it, clamped to the
    /// available menu widths.
    pub fn drag_by(&mut self, dx: i32) {
        let min = -(self.menus.left.unwrap_or(0) as i32);
        let max = self.menus.right.unwrap_or(0) as i32;
        self.animation = None;
        self.offset = (self.offset + dx).clamp(min, max);
    }

    /// Finish a drag: open the revealed menu if it is past `threshold` of its
    /// width, otherwise close. Returns the resulting direction.
    pub fn settle(&mut self, threshold: f32, duration: Duration) -> MenuDirection {
        let direction = if self.offset > 0 {
            MenuDirection::Right
        } else if self.offset < 0 {
            MenuDirection::Left
        } else {
            MenuDirection::None
        };

        let width = self.open_offset(direction).unsigned_abs() as f32;
        if direction != MenuDirection::None
            && width > 0.0
            && self.offset.unsigned_abs() as f32 >= width * threshold
        {
            self.smooth_open(direction, duration);
        } else {
            self.smooth_close(duration);
        }
        self.direction
    }

    fn animate_to(&mut self, target: i32, duration: Duration) {
        let from = self.offset;
        self.offset = target;
        self.animation = if duration.is_zero() || from == target {
            None
        } else {
            Some(OffsetAnimation::new(from, target, duration))
        };
    }
}

/// One node of a row's view tree.
#[derive(Debug, Clone, Default)]
pub struct ViewNode {
    pub id: String,
    pub children: Vec<ViewNode>,
    /// Present on the swipeable container.
    pub swipe: Option<SwipeRow>,
}

impl ViewNode {
    /// A plain wrapper node.
    pub fn container(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// A swipeable container node.
    pub fn swipeable(id: impl Into<String>, row: SwipeRow) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            swipe: Some(row),
        }
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_swipe(&self) -> bool {
        self.swipe.is_some()
    }

    /// The first swipeable container, searching breadth-first from `self`.
    pub fn find_swipe_row(&self) -> Option<&SwipeRow> {
        find_first(self, ViewNode::has_swipe).and_then(|node| node.swipe.as_ref())
    }

    /// Mutable variant of [`ViewNode::find_swipe_row`].
    pub fn find_swipe_row_mut(&mut self) -> Option<&mut SwipeRow> {
        find_first_mut(self, ViewNode::has_swipe).and_then(|node| node.swipe.as_mut())
    }
}

/// Breadth-first search for the first node matching `capable`.
pub fn find_first<'a>(root: &'a ViewNode, capable: impl Fn(&ViewNode) -> bool) -> Option<&'a ViewNode> {
    let mut unvisited = VecDeque::from([root]);
    while let Some(node) = unvisited.pop_front() {
        if capable(node) {
            return Some(node);
        }
        unvisited.extend(node.children.iter());
    }
    None
}

/// Breadth-first search for the first node matching `capable`, mutably.
pub fn find_first_mut<'a>(
    root: &'a mut ViewNode,
    capable: impl Fn(&ViewNode) -> bool,
) -> Option<&'a mut ViewNode> {
    let mut unvisited = VecDeque::from([root]);
    while let Some(node) = unvisited.pop_front() {
        if capable(node) {
            return Some(node);
        }
        unvisited.extend(node.children.iter_mut());
    }
    None
}
