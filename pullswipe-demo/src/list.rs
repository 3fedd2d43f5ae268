//! A terminal list view hosting the swipe/refresh/load-more core.

use std::io::{self, Write};
use std::time::Instant;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use pullswipe::{
    ContentChange, DecorationKind, EmptyState, FooterDisplay, ListHost, ListNotice, MenuDirection,
    MenuSpec, RefreshIndicator, SwipeList, SwipeRow, ViewNode,
};

pub const LEFT_MENU: &str = " Pin ";
pub const RIGHT_MENU: &str = " Delete ";

/// Menus for the item at a content index.
pub fn menus_for(index: usize) -> MenuSpec {
    if index % 3 == 2 {
        MenuSpec::right(RIGHT_MENU.len() as u32)
    } else {
        MenuSpec::both(LEFT_MENU.len() as u32, RIGHT_MENU.len() as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Header,
    Item,
    Footer,
    LoadMore,
}

/// One cell slot; `view` is present only while the cell is on screen.
#[derive(Debug)]
struct Slot {
    cell: Cell,
    view: Option<ViewNode>,
}

/// Virtualized list drawn from terminal row `top` downwards.
pub struct TerminalList {
    pub items: Vec<String>,
    slots: Vec<Slot>,
    top: u16,
    height: usize,
    width: usize,
    scroll: usize,
    footer: FooterDisplay,
    footer_visible: bool,
    refresh: RefreshIndicator,
    empty: bool,
}

impl TerminalList {
    pub fn new(top: u16, width: u16, height: u16) -> Self {
        Self {
            items: Vec::new(),
            slots: Vec::new(),
            top,
            height: height.saturating_sub(top + 1).max(1) as usize,
            width: width as usize,
            scroll: 0,
            footer: FooterDisplay::Hidden,
            footer_visible: true,
            refresh: RefreshIndicator::Idle,
            empty: true,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width as usize;
        self.height = height.saturating_sub(self.top + 1).max(1) as usize;
    }

    /// Scroll by `delta` rows. Returns true if the list moved.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let max = self.slots.len().saturating_sub(self.height);
        let next = (self.scroll as i64 + delta as i64).clamp(0, max as i64) as usize;
        let moved = next != self.scroll;
        self.scroll = next;
        moved
    }

    /// Terminal row to list-local y.
    pub fn local_y(&self, row: u16) -> i32 {
        row as i32 - self.top as i32
    }

    pub fn is_load_more(&self, position: usize) -> bool {
        self.slots
            .get(position)
            .is_some_and(|slot| slot.cell == Cell::LoadMore)
    }

    /// Which open menu, if any, column `x` of the row at `position` hits.
    pub fn menu_hit(&self, position: usize, x: i32) -> Option<MenuDirection> {
        let row = self.row_view(position)?.find_swipe_row()?;
        let offset = row.offset();
        match row.direction() {
            MenuDirection::Right if x >= self.width as i32 - offset => Some(MenuDirection::Right),
            MenuDirection::Left if x < -offset => Some(MenuDirection::Left),
            _ => None,
        }
    }

    /// Recycle views: detach those scrolled off and bind the ones scrolled in.
    pub fn layout(&mut self, list: &mut SwipeList) {
        let visible = self.scroll..self.scroll + self.height;
        for (position, slot) in self.slots.iter_mut().enumerate() {
            if !visible.contains(&position) {
                slot.view = None;
                continue;
            }
            if slot.view.is_some() || slot.cell != Cell::Item {
                continue;
            }
            let Some(index) = list.mapper().to_content(position) else {
                continue;
            };
            let mut view = ViewNode::container(format!("item-{}", index))
                .child(ViewNode::swipeable("content", SwipeRow::new()));
            list.bind_row(&mut view, index);
            slot.view = Some(view);
        }
    }

    /// Advance row animations. Returns true while any is running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for row in self
            .slots
            .iter_mut()
            .filter_map(|slot| slot.view.as_mut())
            .filter_map(ViewNode::find_swipe_row_mut)
        {
            animating |= row.tick(now);
        }
        animating
    }

    pub fn render(&self, out: &mut impl Write, list: &SwipeList, now: Instant) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        let status = match self.refresh {
            RefreshIndicator::Idle => "",
            RefreshIndicator::Refreshing => "  refreshing...",
            RefreshIndicator::Succeeded => "  refreshed",
            RefreshIndicator::Failed => "  refresh failed",
        };
        queue!(
            out,
            Print(
                format!(
                    "page {}  {:?}{}  (wheel: scroll, drag: swipe, r: refresh, q: quit)",
                    list.page(),
                    list.phase(),
                    status
                )
                .bold()
            )
        )?;

        if self.empty {
            queue!(out, MoveTo(0, self.top), Print("  nothing here yet".dim()))?;
        }

        let visible = self.slots.iter().enumerate().skip(self.scroll).take(self.height);
        for (line, (position, slot)) in visible.enumerate() {
            let text = match slot.cell {
                Cell::Header => "== pullswipe demo ==".to_string(),
                Cell::Footer => "-- end of demo list --".to_string(),
                Cell::LoadMore if !self.footer_visible => String::new(),
                Cell::LoadMore => footer_text(&self.footer),
                Cell::Item => self.item_line(list, position, slot, now),
            };
            let y = self.top + line as u16;
            queue!(out, MoveTo(0, y), Print(text))?;
        }
        out.flush()
    }

    fn item_line(&self, list: &SwipeList, position: usize, slot: &Slot, now: Instant) -> String {
        let text = list
            .mapper()
            .to_content(position)
            .and_then(|index| self.items.get(index))
            .map(String::as_str)
            .unwrap_or("");
        let content: String = format!("  {:<w$}", text, w = self.width).chars().take(self.width).collect();
        let offset = slot
            .view
            .as_ref()
            .and_then(ViewNode::find_swipe_row)
            .map_or(0, |row| row.rendered_offset(now));

        let shift = offset.unsigned_abs() as usize;
        if offset > 0 {
            let menu: String = RIGHT_MENU.chars().take(shift).collect();
            let kept: String = content.chars().skip(shift).collect();
            format!("{}{}", kept, menu.on_red())
        } else if offset < 0 {
            let menu: String = LEFT_MENU.chars().skip(LEFT_MENU.len() - shift.min(LEFT_MENU.len())).collect();
            let kept: String = content.chars().take(self.width.saturating_sub(shift)).collect();
            format!("{}{}", menu.on_blue(), kept)
        } else {
            content
        }
    }
}

fn footer_text(display: &FooterDisplay) -> String {
    match display {
        FooterDisplay::Hidden => String::new(),
        FooterDisplay::Loading => "  loading more...".to_string(),
        FooterDisplay::MoreAvailable => "  [ load more ]".to_string(),
        FooterDisplay::Exhausted => "  no more items".to_string(),
        FooterDisplay::Failed { code, message } => {
            format!("  load failed ({}): {}  [ retry ]", code, message)
        }
    }
}

impl ListHost for TerminalList {
    fn first_visible(&self) -> Option<usize> {
        (self.scroll < self.slots.len()).then_some(self.scroll)
    }

    fn last_visible(&self) -> Option<usize> {
        let end = (self.scroll + self.height).min(self.slots.len());
        end.checked_sub(1)
    }

    fn item_count(&self) -> usize {
        self.slots.len()
    }

    fn row_at(&self, _x: i32, y: i32) -> Option<usize> {
        if y < 0 || y as usize >= self.height {
            return None;
        }
        let position = self.scroll + y as usize;
        (position < self.slots.len()).then_some(position)
    }

    fn row_view(&self, position: usize) -> Option<&ViewNode> {
        self.slots.get(position)?.view.as_ref()
    }

    fn row_view_mut(&mut self, position: usize) -> Option<&mut ViewNode> {
        self.slots.get_mut(position)?.view.as_mut()
    }

    fn notify(&mut self, notice: ListNotice) {
        log::trace!("host: {:?}", notice);
        match notice {
            ListNotice::DecorationInserted { kind, position } => {
                let cell = match kind {
                    DecorationKind::Header => Cell::Header,
                    DecorationKind::Footer => Cell::Footer,
                    DecorationKind::LoadMoreFooter => Cell::LoadMore,
                };
                self.slots.insert(position, Slot { cell, view: None });
            }
            ListNotice::DecorationRemoved { position, .. } => {
                if position < self.slots.len() {
                    self.slots.remove(position);
                }
            }
            ListNotice::Content(change) => self.apply(change),
            ListNotice::Footer { display, visible } => {
                self.footer = display;
                self.footer_visible = visible;
            }
            ListNotice::Refresh { indicator, .. } => self.refresh = indicator,
            ListNotice::EmptyState(state) => {
                self.empty = state == EmptyState::Empty;
            }
        }
    }
}

impl TerminalList {
    fn apply(&mut self, change: ContentChange) {
        let item = || Slot {
            cell: Cell::Item,
            view: None,
        };
        match change {
            ContentChange::Reset => {
                let headers = self.slots.iter().take_while(|s| s.cell == Cell::Header).count();
                let decorations: Vec<Slot> = self
                    .slots
                    .drain(headers..)
                    .filter(|s| s.cell != Cell::Item)
                    .map(|s| Slot { cell: s.cell, view: None })
                    .collect();
                self.slots.extend((0..self.items.len()).map(|_| item()));
                self.slots.extend(decorations);
                for slot in &mut self.slots {
                    slot.view = None;
                }
            }
            ContentChange::RangeChanged { start, count } => {
                for slot in self.slots.iter_mut().skip(start).take(count) {
                    slot.view = None;
                }
            }
            ContentChange::RangeInserted { start, count } => {
                let at = start.min(self.slots.len());
                self.slots.splice(at..at, (0..count).map(|_| item()));
            }
            ContentChange::RangeRemoved { start, count } => {
                let end = (start + count).min(self.slots.len());
                self.slots.drain(start.min(end)..end);
            }
            ContentChange::Moved { from, to } => {
                if from < self.slots.len() && to < self.slots.len() {
                    let slot = self.slots.remove(from);
                    self.slots.insert(to, slot);
                }
            }
        }
        let max = self.slots.len().saturating_sub(self.height);
        self.scroll = self.scroll.min(max);
    }
}
