//! Open-row tracking for swipe menus.
//!
//! At most one row in the list has its menu open. The tracker remembers that
//! row by global position plus the binding id the row had when it opened; if
//! the container at that position has since been rebound, the reference is
//! stale and is dropped without touching the repurposed view.

use std::time::Duration;

use crate::host::ListHost;
use crate::position::{ContentChange, PositionMapper};
use crate::row::{MenuDirection, SwipeRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenRow {
    position: usize,
    binding: Option<u64>,
}

/// Tracks which row, if any, shows its menu.
#[derive(Debug, Default)]
pub struct SwipeMenuController {
    open: Option<OpenRow>,
}

impl SwipeMenuController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global position of the row with an open menu.
    pub fn open_position(&self) -> Option<usize> {
        self.open.map(|open| open.position)
    }

    // -------------------------------------------------------------------------
    // Content-index API
    // -------------------------------------------------------------------------

    /// Open the menu of the row at `content_index`, closing any other open
    /// row first with the same duration.
    ///
    /// Returns false if the row is not attached or has no menu on `direction`.
    pub fn open_menu(
        &mut self,
        host: &mut impl ListHost,
        mapper: &PositionMapper,
        content_index: usize,
        direction: MenuDirection,
        duration: Duration,
    ) -> bool {
        self.open_at(host, mapper.to_global(content_index), direction, duration)
    }

    pub fn is_menu_open(
        &self,
        host: &impl ListHost,
        mapper: &PositionMapper,
        content_index: usize,
    ) -> bool {
        swipe_row(host, mapper.to_global(content_index)).is_some_and(SwipeRow::is_menu_open)
    }

    pub fn is_fully_open(
        &self,
        host: &impl ListHost,
        mapper: &PositionMapper,
        content_index: usize,
        direction: MenuDirection,
    ) -> bool {
        swipe_row(host, mapper.to_global(content_index))
            .is_some_and(|row| row.is_fully_open(direction))
    }

    // -------------------------------------------------------------------------
    // Global-position API
    // -------------------------------------------------------------------------

    /// Open the menu of the row at global `position`.
    pub fn open_at(
        &mut self,
        host: &mut impl ListHost,
        position: usize,
        direction: MenuDirection,
        duration: Duration,
    ) -> bool {
        if direction == MenuDirection::None {
            return false;
        }
        if self.open_position().is_some_and(|open| open != position) {
            self.close_menu(host, duration);
        }

        let Some(row) = swipe_row_mut(host, position) else {
            log::debug!("[swipe] no swipeable row attached at {}", position);
            return false;
        };
        if !row.smooth_open(direction, duration) {
            log::debug!("[swipe] row {} has no {:?} menu", position, direction);
            return false;
        }

        log::debug!("[swipe] opened {:?} menu at {}", direction, position);
        self.open = Some(OpenRow {
            position,
            binding: row.binding(),
        });
        true
    }

    /// Close the open menu, if any. Returns true if a row was animated closed.
    pub fn close_menu(&mut self, host: &mut impl ListHost, duration: Duration) -> bool {
        let Some(open) = self.open.take() else {
            return false;
        };
        match resolve_mut(host, open) {
            Some(row) if row.is_menu_open() => {
                row.smooth_close(duration);
                log::debug!("[swipe] closed menu at {}", open.position);
                true
            }
            Some(_) => false,
            None => {
                log::debug!("[swipe] dropped stale open row at {}", open.position);
                false
            }
        }
    }

    /// Record a row the user dragged open. Any other open row is closed.
    pub fn adopt(&mut self, host: &mut impl ListHost, position: usize, duration: Duration) {
        if self.open_position().is_some_and(|open| open != position) {
            self.close_menu(host, duration);
        }
        let binding = swipe_row(&*host, position).and_then(SwipeRow::binding);
        self.open = Some(OpenRow { position, binding });
    }

    /// Forget the tracked row if it is the one at `position` (closed by the
    /// user dragging it back).
    pub fn release(&mut self, position: usize) {
        if self.open_position() == Some(position) {
            self.open = None;
        }
    }

    /// Drop the tracked row if it no longer matches what the host shows.
    /// Returns the position still tracked.
    pub fn validate(&mut self, host: &impl ListHost) -> Option<usize> {
        let open = self.open?;
        if resolve(host, open).is_some_and(SwipeRow::is_menu_open) {
            Some(open.position)
        } else {
            log::debug!("[swipe] dropped stale open row at {}", open.position);
            self.open = None;
            None
        }
    }

    /// Keep the tracked position in step with global changes in the list.
    pub fn on_global_change(&mut self, change: ContentChange) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        match change {
            ContentChange::Reset => self.open = None,
            ContentChange::RangeChanged { .. } => {}
            ContentChange::RangeInserted { start, count } => {
                if start <= open.position {
                    open.position += count;
                }
            }
            ContentChange::RangeRemoved { start, count } => {
                if open.position >= start + count {
                    open.position -= count;
                } else if open.position >= start {
                    self.open = None;
                }
            }
            ContentChange::Moved { from, to } => {
                if open.position == from {
                    open.position = to;
                } else if from < open.position && open.position <= to {
                    open.position -= 1;
                } else if to <= open.position && open.position < from {
                    open.position += 1;
                }
            }
        }
    }
}

fn swipe_row(host: &impl ListHost, position: usize) -> Option<&SwipeRow> {
    host.row_view(position)?.find_swipe_row()
}

fn swipe_row_mut(host: &mut impl ListHost, position: usize) -> Option<&mut SwipeRow> {
    host.row_view_mut(position)?.find_swipe_row_mut()
}

fn resolve(host: &impl ListHost, open: OpenRow) -> Option<&SwipeRow> {
    swipe_row(host, open.position).filter(|row| row.binding() == open.binding)
}

fn resolve_mut(host: &mut impl ListHost, open: OpenRow) -> Option<&mut SwipeRow> {
    swipe_row_mut(host, open.position).filter(|row| row.binding() == open.binding)
}
