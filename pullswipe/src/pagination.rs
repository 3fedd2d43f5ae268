//! Load-more state machine and its footer.
//!
//! ```text
//! Idle --dispatch--> Loading --finish(more)--> Idle
//!                    Loading --finish(none)--> Exhausted
//!                    Loading --error--------> Error --retry--> Loading
//! ```

use crate::event::ScrollState;
use crate::host::{DecorationKind, FooterDisplay, ListHost, ListNotice};
use crate::position::PositionMapper;

/// Phase of the load-more state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Error,
    Exhausted,
}

/// What the host reports about the list when it scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSnapshot {
    pub last_visible: Option<usize>,
    /// Cell count, decorations included.
    pub item_count: usize,
    pub state: ScrollState,
}

impl ScrollSnapshot {
    pub fn of(host: &impl ListHost, state: ScrollState) -> Self {
        Self {
            last_visible: host.last_visible(),
            item_count: host.item_count(),
            state,
        }
    }

    /// The last cell is on screen.
    pub fn at_end(&self) -> bool {
        self.item_count > 0 && self.last_visible == Some(self.item_count - 1)
    }
}

/// Footer attachment and display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FooterState {
    pub attached: bool,
    pub visible: bool,
    pub display: FooterDisplay,
}

/// Load-more controller.
#[derive(Debug)]
pub struct PaginationController {
    enabled: bool,
    phase: LoadPhase,
    has_more: bool,
    footer: FooterState,
}

impl PaginationController {
    pub fn new(enabled: bool, has_more: bool) -> Self {
        Self {
            enabled,
            phase: LoadPhase::Idle,
            has_more,
            footer: FooterState {
                attached: false,
                visible: true,
                display: FooterDisplay::Hidden,
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn load-more on or off. Turning it off detaches the footer.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        host: &mut impl ListHost,
        mapper: &mut PositionMapper,
    ) {
        self.enabled = enabled;
        if !enabled {
            self.detach_footer(host, mapper);
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn footer(&self) -> &FooterState {
        &self.footer
    }

    /// Whether a scroll described by `snapshot` should dispatch a load.
    pub fn should_trigger(&self, snapshot: &ScrollSnapshot, is_refreshing: bool) -> bool {
        self.enabled
            && self.phase != LoadPhase::Loading
            && self.has_more
            && !is_refreshing
            && snapshot.at_end()
            && snapshot.state.is_user_driven()
    }

    /// Enter `Loading` and show the loading footer.
    ///
    /// Returns false, changing nothing, if already loading; the caller
    /// invokes the load-more callback only on true.
    pub fn dispatch(&mut self, host: &mut impl ListHost, mapper: &mut PositionMapper) -> bool {
        if self.phase == LoadPhase::Loading {
            log::debug!("[pagination] dispatch ignored, already loading");
            return false;
        }
        log::debug!("[pagination] {:?} -> Loading", self.phase);
        self.phase = LoadPhase::Loading;
        self.attach_footer(host, mapper);
        self.show(host, FooterDisplay::Loading);
        true
    }

    /// Complete the in-flight load. The footer is only shown while
    /// load-more is enabled.
    pub fn finish(
        &mut self,
        has_more: bool,
        show_exhausted: bool,
        host: &mut impl ListHost,
        mapper: &mut PositionMapper,
    ) {
        self.has_more = has_more;
        self.phase = if has_more {
            LoadPhase::Idle
        } else {
            LoadPhase::Exhausted
        };
        log::debug!(
            "[pagination] finished, has_more={} -> {:?}",
            has_more,
            self.phase
        );

        self.footer.visible = true;
        if !self.enabled {
            self.footer.display = FooterDisplay::Hidden;
            self.detach_footer(host, mapper);
        } else if has_more {
            self.attach_footer(host, mapper);
            self.show(host, FooterDisplay::MoreAvailable);
        } else if show_exhausted {
            self.attach_footer(host, mapper);
            self.show(host, FooterDisplay::Exhausted);
        } else {
            self.footer.display = FooterDisplay::Hidden;
            self.detach_footer(host, mapper);
        }
    }

    /// Fail the in-flight load; the footer becomes a retry button.
    pub fn error(&mut self, code: i32, message: impl Into<String>, host: &mut impl ListHost) {
        let message = message.into();
        log::debug!("[pagination] failed ({}): {}", code, message);
        self.phase = LoadPhase::Error;
        self.show(host, FooterDisplay::Failed { code, message });
    }

    /// A click on the footer. Returns true if it should dispatch a load.
    pub fn footer_clicked(&self) -> bool {
        self.enabled
            && self.footer.attached
            && self.footer.visible
            && self.phase != LoadPhase::Loading
            && self.footer.display.is_clickable()
    }

    // -------------------------------------------------------------------------
    // Footer visibility (used while refreshing)
    // -------------------------------------------------------------------------

    /// Hide the footer without detaching it. Returns the previous visibility.
    pub fn hide_footer(&mut self, host: &mut impl ListHost) -> bool {
        let was_visible = self.footer.visible;
        self.set_footer_visible(false, host);
        was_visible
    }

    pub fn set_footer_visible(&mut self, visible: bool, host: &mut impl ListHost) {
        if self.footer.visible == visible {
            return;
        }
        self.footer.visible = visible;
        if self.footer.attached {
            host.notify(ListNotice::Footer {
                display: self.footer.display.clone(),
                visible,
            });
        }
    }

    fn show(&mut self, host: &mut impl ListHost, display: FooterDisplay) {
        self.footer.display = display;
        if self.footer.attached {
            host.notify(ListNotice::Footer {
                display: self.footer.display.clone(),
                visible: self.footer.visible,
            });
        }
    }

    // -------------------------------------------------------------------------
    // Attach / detach (idempotent)
    // -------------------------------------------------------------------------

    fn attach_footer(&mut self, host: &mut impl ListHost, mapper: &mut PositionMapper) {
        if self.footer.attached {
            return;
        }
        let position = mapper.push_footer();
        self.footer.attached = true;
        host.notify(ListNotice::DecorationInserted {
            kind: DecorationKind::LoadMoreFooter,
            position,
        });
    }

    fn detach_footer(&mut self, host: &mut impl ListHost, mapper: &mut PositionMapper) {
        if !self.footer.attached {
            return;
        }
        self.footer.attached = false;
        if let Some(position) = mapper.pop_footer() {
            host.notify(ListNotice::DecorationRemoved {
                kind: DecorationKind::LoadMoreFooter,
                position,
            });
        }
    }
}
