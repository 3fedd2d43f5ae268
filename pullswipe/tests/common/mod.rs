#![allow(dead_code)]

use pullswipe::{ListHost, ListNotice, MenuSpec, SwipeRow, ViewNode};

/// Height of every row in the mock list, in pixels.
pub const ROW_HEIGHT: i32 = 10;

/// A list view with fixed-height rows laid out from y = 0.
#[derive(Debug, Default)]
pub struct MockHost {
    pub views: Vec<Option<ViewNode>>,
    pub item_count: usize,
    pub first_visible: Option<usize>,
    pub last_visible: Option<usize>,
    pub notices: Vec<ListNotice>,
}

impl MockHost {
    pub fn new(item_count: usize) -> Self {
        Self {
            views: vec![None; item_count],
            item_count,
            first_visible: (item_count > 0).then_some(0),
            last_visible: item_count.checked_sub(1),
            notices: Vec::new(),
        }
    }

    /// Attach a swipeable row view, wrapped in one decoration layer, at a
    /// global position.
    pub fn attach_row(&mut self, position: usize, binding: u64, menus: MenuSpec) {
        let mut row = SwipeRow::new();
        row.rebind(binding, menus);
        let view = ViewNode::container(format!("item-{}", position))
            .child(ViewNode::container("decor"))
            .child(ViewNode::swipeable("swipe", row));
        if self.views.len() <= position {
            self.views.resize(position + 1, None);
        }
        self.views[position] = Some(view);
    }

    pub fn row(&self, position: usize) -> &SwipeRow {
        self.views[position]
            .as_ref()
            .and_then(ViewNode::find_swipe_row)
            .expect("swipe row attached")
    }

    pub fn row_mut(&mut self, position: usize) -> &mut SwipeRow {
        self.views[position]
            .as_mut()
            .and_then(ViewNode::find_swipe_row_mut)
            .expect("swipe row attached")
    }

    /// Show the last `count` cells.
    pub fn scroll_to_end(&mut self, count: usize) {
        self.last_visible = self.item_count.checked_sub(1);
        self.first_visible = self.item_count.checked_sub(count.max(1));
    }

    /// y coordinate inside the row at `position`.
    pub fn row_y(position: usize) -> i32 {
        position as i32 * ROW_HEIGHT + ROW_HEIGHT / 2
    }

    pub fn take_notices(&mut self) -> Vec<ListNotice> {
        std::mem::take(&mut self.notices)
    }
}

impl ListHost for MockHost {
    fn first_visible(&self) -> Option<usize> {
        self.first_visible
    }

    fn last_visible(&self) -> Option<usize> {
        self.last_visible
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn row_at(&self, _x: i32, y: i32) -> Option<usize> {
        if y < 0 {
            return None;
        }
        let position = (y / ROW_HEIGHT) as usize;
        (position < self.item_count).then_some(position)
    }

    fn row_view(&self, position: usize) -> Option<&ViewNode> {
        self.views.get(position)?.as_ref()
    }

    fn row_view_mut(&mut self, position: usize) -> Option<&mut ViewNode> {
        self.views.get_mut(position)?.as_mut()
    }

    fn notify(&mut self, notice: ListNotice) {
        // Track cell count the way a real list view would.
        match &notice {
            ListNotice::DecorationInserted { .. } => self.item_count += 1,
            ListNotice::DecorationRemoved { .. } => {
                self.item_count = self.item_count.saturating_sub(1)
            }
            _ => {}
        }
        self.notices.push(notice);
    }
}
