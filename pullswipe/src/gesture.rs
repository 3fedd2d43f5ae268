//! Pointer gesture disambiguation.
//!
//! Decides, event by event, whether the list should intercept a gesture for
//! its own scrolling or let it through to the row under the pointer.

use std::time::Duration;

use crate::event::{PointerAction, PointerEvent};
use crate::host::ListHost;
use crate::swipe::SwipeMenuController;

/// How a pointer displacement reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Horizontal drag past slop: the row handles it.
    Swipe,
    /// Still inside the tap tolerance; not yet classified.
    Tap,
    /// Past slop without horizontal dominance.
    Scroll,
}

/// Classify a displacement measured as `down - current` on each axis.
///
/// Horizontal needs strict dominance; a tie past slop reads as scroll.
/// Anything still inside the slop box, edges included, is a tap.
pub fn classify(dis_x: i32, dis_y: i32, slop: i32) -> GestureKind {
    let (abs_x, abs_y) = (dis_x.abs(), dis_y.abs());
    if abs_x > slop && abs_x > abs_y {
        GestureKind::Swipe
    } else if abs_x.max(abs_y) > slop {
        GestureKind::Scroll
    } else {
        GestureKind::Tap
    }
}

/// Outcome of feeding one pointer event to the disambiguator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interception {
    /// The list takes this event (and the rest of the gesture).
    pub intercept: bool,
    /// Ask the parent to stop (`Some(true)`) or resume (`Some(false)`)
    /// intercepting; `None` leaves it alone.
    pub disallow_parent: Option<bool>,
    /// Row whose menu this event closed.
    pub closed_row: Option<usize>,
    /// Classification so far, once the pointer has moved.
    pub kind: Option<GestureKind>,
}

/// Per-gesture disambiguation state.
#[derive(Debug)]
pub struct GestureDisambiguator {
    slop: i32,
    close_duration: Duration,
    down: Option<(i32, i32)>,
    touched: Option<usize>,
    /// The list owns the rest of the gesture.
    scroll_locked: bool,
    /// The row owns the rest of the gesture.
    swiping: bool,
    intercepting: bool,
}

impl GestureDisambiguator {
    pub fn new(slop: u32, close_duration: Duration) -> Self {
        Self {
            slop: slop as i32,
            close_duration,
            down: None,
            touched: None,
            scroll_locked: false,
            swiping: false,
            intercepting: false,
        }
    }

    pub fn slop(&self) -> i32 {
        self.slop
    }

    /// Row the current gesture started on.
    pub fn touched_row(&self) -> Option<usize> {
        self.touched
    }

    pub fn down_point(&self) -> Option<(i32, i32)> {
        self.down
    }

    /// Whether the list owns the current gesture.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Whether the current gesture has been handed to the touched row.
    pub fn is_swiping(&self) -> bool {
        self.swiping
    }

    /// Feed one pointer event.
    pub fn on_pointer(
        &mut self,
        event: PointerEvent,
        host: &mut impl ListHost,
        swipe: &mut SwipeMenuController,
    ) -> Interception {
        if event.is_multi_touch() {
            log::trace!("[gesture] multi-touch, intercepting");
            self.scroll_locked = true;
            return Interception {
                intercept: true,
                ..Default::default()
            };
        }

        match event.action {
            PointerAction::Down { x, y } => self.on_down(x, y, host, swipe),
            PointerAction::Move { x, y } => {
                let mut result = self.settle_displacement(x, y);
                if result.kind == Some(GestureKind::Swipe) {
                    result.disallow_parent = self.disallow_parent(x, &*host);
                }
                result
            }
            PointerAction::Up { x, y } | PointerAction::Cancel { x, y } => {
                let result = self.settle_displacement(x, y);
                self.down = None;
                result
            }
        }
    }

    fn on_down(
        &mut self,
        x: i32,
        y: i32,
        host: &mut impl ListHost,
        swipe: &mut SwipeMenuController,
    ) -> Interception {
        self.down = Some((x, y));
        self.scroll_locked = false;
        self.swiping = false;
        self.intercepting = false;
        self.touched = host.row_at(x, y);

        let open = swipe.validate(&*host);
        if open.is_some() && open != self.touched {
            let closed = swipe.close_menu(host, self.close_duration);
            log::debug!(
                "[gesture] down on {:?} while {:?} open, closing",
                self.touched,
                open
            );
            self.scroll_locked = true;
            self.intercepting = true;
            return Interception {
                intercept: true,
                closed_row: if closed { open } else { None },
                ..Default::default()
            };
        }

        Interception::default()
    }

    /// Shared by move and up/cancel: classify the displacement since down
    /// and update the interception decision.
    fn settle_displacement(&mut self, x: i32, y: i32) -> Interception {
        if self.scroll_locked {
            return Interception {
                intercept: true,
                ..Default::default()
            };
        }
        let Some((down_x, down_y)) = self.down else {
            return Interception {
                intercept: self.intercepting,
                ..Default::default()
            };
        };

        // Once handed to the row, later drift does not take it back.
        let kind = if self.swiping {
            GestureKind::Swipe
        } else {
            classify(down_x - x, down_y - y, self.slop)
        };
        log::trace!("[gesture] ({}, {}) classified as {:?}", x, y, kind);
        match kind {
            GestureKind::Swipe => {
                self.intercepting = false;
                self.swiping = true;
            }
            GestureKind::Tap => {}
            GestureKind::Scroll => {
                self.intercepting = true;
                self.scroll_locked = true;
            }
        }
        Interception {
            intercept: self.intercepting,
            kind: Some(kind),
            ..Default::default()
        }
    }

    fn disallow_parent(&self, x: i32, host: &impl ListHost) -> Option<bool> {
        let (down_x, _) = self.down?;
        let row = self
            .touched
            .and_then(|position| host.row_view(position))
            .and_then(|view| view.find_swipe_row())?;
        Some(row.accepts_drag(down_x - x))
    }
}
