//! Pull-to-refresh state and its arbitration with load-more.
//!
//! A refresh and a load-more are never in flight together: a refresh hides
//! the pagination footer and blocks its trigger, and a running load-more
//! makes the pull gesture non-interactable.

use crate::host::{ListHost, ListNotice, RefreshIndicator};
use crate::pagination::PaginationController;
use crate::position::PositionMapper;

/// Refresh state and page bookkeeping.
#[derive(Debug)]
pub struct RefreshCoordinator {
    enabled: bool,
    is_refreshing: bool,
    interactable: bool,
    indicator: RefreshIndicator,
    /// Next page a load-more should request.
    page: u32,
    /// Footer visibility before the current refresh hid it.
    footer_was_visible: Option<bool>,
}

impl RefreshCoordinator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            is_refreshing: false,
            interactable: enabled,
            indicator: RefreshIndicator::Idle,
            page: 1,
            footer_was_visible: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    /// Whether a pull gesture may currently start a refresh.
    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    pub fn indicator(&self) -> RefreshIndicator {
        self.indicator
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_enabled(&mut self, enabled: bool, pagination: &PaginationController, host: &mut impl ListHost) {
        self.enabled = enabled;
        self.sync_interactable(pagination, host);
    }

    /// Recompute whether the pull gesture is live: enabled, idle, and no
    /// load-more in flight.
    pub fn sync_interactable(&mut self, pagination: &PaginationController, host: &mut impl ListHost) {
        let interactable = self.enabled && !self.is_refreshing && !pagination.is_loading();
        if interactable != self.interactable {
            self.interactable = interactable;
            self.publish(host);
        }
    }

    /// Enter the refreshing state: hide the pagination footer and lock the
    /// pull gesture.
    pub fn start_refresh(&mut self, pagination: &mut PaginationController, host: &mut impl ListHost) {
        self.is_refreshing = true;
        self.footer_was_visible = Some(pagination.hide_footer(host));
        self.interactable = false;
        self.indicator = RefreshIndicator::Refreshing;
        self.publish(host);
    }

    /// The pull gesture crossed the threshold (or a refresh was triggered
    /// programmatically).
    ///
    /// Returns the page to request, or `None` if the refresh is rejected
    /// because refresh is disabled, one is already running, or a load-more
    /// is in flight.
    pub fn on_refresh_triggered(
        &mut self,
        pagination: &mut PaginationController,
        host: &mut impl ListHost,
    ) -> Option<u32> {
        if !self.enabled || self.is_refreshing || pagination.is_loading() {
            log::debug!(
                "[refresh] rejected (enabled={}, refreshing={}, loading={})",
                self.enabled,
                self.is_refreshing,
                pagination.is_loading()
            );
            return None;
        }
        log::debug!("[refresh] started");
        self.start_refresh(pagination, host);
        self.page = 1;
        Some(self.page)
    }

    /// The refresh completed.
    pub fn finish_refresh(
        &mut self,
        has_more: bool,
        pagination: &mut PaginationController,
        host: &mut impl ListHost,
        mapper: &mut PositionMapper,
    ) {
        if !self.is_refreshing {
            log::warn!("[refresh] finish without a refresh in flight, ignored");
            return;
        }
        self.is_refreshing = false;
        self.footer_was_visible = None;
        self.page = if has_more { 2 } else { 1 };
        self.indicator = RefreshIndicator::Succeeded;
        log::debug!("[refresh] finished, has_more={} page={}", has_more, self.page);

        if pagination.is_enabled() {
            pagination.finish(has_more, false, host, mapper);
        }
        self.interactable = self.enabled && !pagination.is_loading();
        self.publish(host);
    }

    /// The refresh failed.
    pub fn error_refresh(&mut self, pagination: &mut PaginationController, host: &mut impl ListHost) {
        if !self.is_refreshing {
            log::warn!("[refresh] error without a refresh in flight, ignored");
            return;
        }
        self.is_refreshing = false;
        self.indicator = RefreshIndicator::Failed;
        if let Some(visible) = self.footer_was_visible.take() {
            pagination.set_footer_visible(visible, host);
        }
        log::debug!("[refresh] failed");
        self.interactable = self.enabled && !pagination.is_loading();
        self.publish(host);
    }

    /// A load-more completed with more data available.
    pub fn advance_page(&mut self) {
        self.page += 1;
    }

    fn publish(&self, host: &mut impl ListHost) {
        host.notify(ListNotice::Refresh {
            indicator: self.indicator,
            interactable: self.interactable,
        });
    }
}
