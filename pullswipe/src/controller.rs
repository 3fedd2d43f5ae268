//! The list interaction controller.
//!
//! One [`SwipeList`] exists per list view. It owns the position mapper, the
//! open-row tracker, the gesture disambiguator and the refresh/pagination
//! state, and is driven by the host on its event thread:
//!
//! - pointer events go to [`SwipeList::handle_pointer`]
//! - scroll callbacks go to [`SwipeList::on_scroll_state_changed`] and
//!   [`SwipeList::on_scrolled`]
//! - content changes go to [`SwipeList::on_content_changed`]
//! - load completions come back through `load_more_finish`, `load_more_error`,
//!   `finish_refresh`, `error_refresh`, or `poll_loader` for channel loaders

use std::time::Duration;

use tokio::sync::oneshot;

use crate::config::SwipeListConfig;
use crate::error::{ConfigError, SetupError};
use crate::event::{PointerAction, PointerEvent, ScrollState};
use crate::gesture::{GestureDisambiguator, GestureKind, Interception};
use crate::host::{DecorationKind, EmptyState, ListHost, ListNotice, RefreshIndicator};
use crate::loader::{
    self, LoadKind, LoadListener, LoadOutcome, LoadReceiver, LoadRequest, LoadSender, Liveness,
};
use crate::pagination::{LoadPhase, PaginationController, ScrollSnapshot};
use crate::position::{ContentChange, PositionMapper};
use crate::refresh::RefreshCoordinator;
use crate::row::{MenuDirection, MenuSpec, ViewNode};
use crate::swipe::SwipeMenuController;

/// Decides which menus the row at a content index gets.
pub type MenuCreator = Box<dyn FnMut(usize) -> MenuSpec>;

/// Receives the content index of a clicked item.
pub type ItemClickListener = Box<dyn FnMut(usize)>;

/// Receives clicks on swipe menu items.
pub type MenuItemClickListener = Box<dyn FnMut(MenuClick)>;

/// Receives the empty/populated state whenever the content changes.
pub type EmptyStateObserver = Box<dyn FnMut(EmptyState)>;

/// A click on one item of a row's swipe menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuClick {
    /// Content index of the row.
    pub index: usize,
    pub direction: MenuDirection,
    /// Position of the clicked item within the menu.
    pub item: usize,
}

enum LoadSink {
    None,
    Listener(Box<dyn LoadListener>),
    Channel(LoadSender),
}

/// Interaction controller for one list view.
pub struct SwipeList {
    config: SwipeListConfig,
    mapper: PositionMapper,
    swipe: SwipeMenuController,
    gesture: GestureDisambiguator,
    pagination: PaginationController,
    refresh: RefreshCoordinator,
    scroll_state: ScrollState,

    adapter_attached: bool,
    menu_creator: Option<MenuCreator>,
    item_click: Option<ItemClickListener>,
    menu_item_click: Option<MenuItemClickListener>,
    empty_observer: Option<EmptyStateObserver>,

    sink: LoadSink,
    in_flight: Option<(LoadKind, oneshot::Receiver<LoadOutcome>)>,

    next_binding: u64,
    drag_x: Option<i32>,
    liveness: Liveness,
}

impl SwipeList {
    pub fn new(config: SwipeListConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mapper: PositionMapper::new(),
            swipe: SwipeMenuController::new(),
            gesture: GestureDisambiguator::new(config.touch_slop, config.foreign_touch_duration()),
            pagination: PaginationController::new(
                config.load_more_enabled,
                config.initial_has_more,
            ),
            refresh: RefreshCoordinator::new(config.refresh_enabled),
            scroll_state: ScrollState::Idle,
            adapter_attached: false,
            menu_creator: None,
            item_click: None,
            menu_item_click: None,
            empty_observer: None,
            sink: LoadSink::None,
            in_flight: None,
            next_binding: 0,
            drag_x: None,
            liveness: Liveness::new(),
            config,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &SwipeListConfig {
        &self.config
    }

    pub fn mapper(&self) -> &PositionMapper {
        &self.mapper
    }

    pub fn swipe(&self) -> &SwipeMenuController {
        &self.swipe
    }

    pub fn gesture(&self) -> &GestureDisambiguator {
        &self.gesture
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn refresh(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll_state
    }

    pub fn phase(&self) -> LoadPhase {
        self.pagination.phase()
    }

    pub fn is_more_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    /// Next page a load-more will request.
    pub fn page(&self) -> u32 {
        self.refresh.page()
    }

    /// Global position of the row with an open menu.
    pub fn open_row(&self) -> Option<usize> {
        self.swipe.open_position()
    }

    /// Flag cleared when this controller is dropped.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    fn check_adapter_absent(&self, what: &'static str) -> Result<(), SetupError> {
        if self.adapter_attached {
            log::error!("cannot set {}, the adapter has already been attached", what);
            return Err(SetupError::ConfiguredAfterAdapter { what });
        }
        Ok(())
    }

    pub fn set_menu_creator(
        &mut self,
        creator: impl FnMut(usize) -> MenuSpec + 'static,
    ) -> Result<(), SetupError> {
        self.check_adapter_absent("menu creator")?;
        self.menu_creator = Some(Box::new(creator));
        Ok(())
    }

    pub fn set_item_click_listener(
        &mut self,
        listener: impl FnMut(usize) + 'static,
    ) -> Result<(), SetupError> {
        self.check_adapter_absent("item click listener")?;
        self.item_click = Some(Box::new(listener));
        Ok(())
    }

    pub fn set_menu_item_click_listener(
        &mut self,
        listener: impl FnMut(MenuClick) + 'static,
    ) -> Result<(), SetupError> {
        self.check_adapter_absent("menu item click listener")?;
        self.menu_item_click = Some(Box::new(listener));
        Ok(())
    }

    pub fn set_empty_state_observer(&mut self, observer: impl FnMut(EmptyState) + 'static) {
        self.empty_observer = Some(Box::new(observer));
    }

    /// Receive load requests through a callback.
    pub fn set_load_listener(&mut self, listener: impl LoadListener + 'static) {
        self.sink = LoadSink::Listener(Box::new(listener));
    }

    /// Receive load requests through a channel. Replies are collected by
    /// [`SwipeList::poll_loader`].
    pub fn connect_loader(&mut self) -> LoadReceiver {
        let (tx, rx) = loader::channel();
        self.sink = LoadSink::Channel(tx);
        rx
    }

    /// Attach the content source.
    pub fn attach_adapter(
        &mut self,
        host: &mut impl ListHost,
        content_count: usize,
    ) -> Result<(), SetupError> {
        if self.adapter_attached {
            log::error!("an adapter is already attached to this list");
            return Err(SetupError::AdapterAlreadyAttached);
        }
        self.adapter_attached = true;
        self.mapper.set_content_count(content_count);
        host.notify(ListNotice::Content(ContentChange::Reset));
        self.report_empty_state(host);
        Ok(())
    }

    /// Detach the content source. Setup options may be changed again.
    pub fn detach_adapter(&mut self, host: &mut impl ListHost) {
        if !self.adapter_attached {
            return;
        }
        self.adapter_attached = false;
        self.swipe.on_global_change(ContentChange::Reset);
        self.mapper.set_content_count(0);
        host.notify(ListNotice::Content(ContentChange::Reset));
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter_attached
    }

    /// Turn pull-to-refresh and load-more on or off.
    pub fn set_pull_enable(&mut self, host: &mut impl ListHost, refresh: bool, load_more: bool) {
        self.config.refresh_enabled = refresh;
        self.config.load_more_enabled = load_more;
        self.pagination.set_enabled(load_more, host, &mut self.mapper);
        self.refresh.set_enabled(refresh, &self.pagination, host);
    }

    // -------------------------------------------------------------------------
    // Decorations and content
    // -------------------------------------------------------------------------

    /// Append a header. Returns its global position.
    pub fn add_header(&mut self, host: &mut impl ListHost) -> usize {
        let position = self.mapper.push_header();
        self.swipe.on_global_change(ContentChange::RangeInserted {
            start: position,
            count: 1,
        });
        host.notify(ListNotice::DecorationInserted {
            kind: DecorationKind::Header,
            position,
        });
        position
    }

    /// Remove the last header. Returns the position it occupied.
    pub fn remove_header(&mut self, host: &mut impl ListHost) -> Option<usize> {
        let position = self.mapper.pop_header()?;
        self.swipe.on_global_change(ContentChange::RangeRemoved {
            start: position,
            count: 1,
        });
        host.notify(ListNotice::DecorationRemoved {
            kind: DecorationKind::Header,
            position,
        });
        Some(position)
    }

    /// Append a footer. It stays above the pagination footer.
    pub fn add_footer(&mut self, host: &mut impl ListHost) -> usize {
        let last = self.mapper.push_footer();
        let position = if self.pagination.footer().attached {
            last - 1
        } else {
            last
        };
        host.notify(ListNotice::DecorationInserted {
            kind: DecorationKind::Footer,
            position,
        });
        position
    }

    /// Remove the last footer added with [`SwipeList::add_footer`].
    pub fn remove_footer(&mut self, host: &mut impl ListHost) -> Option<usize> {
        let pagination_footer = usize::from(self.pagination.footer().attached);
        let regular = self.mapper.footer_count() - pagination_footer;
        if regular == 0 {
            return None;
        }
        let position = self.mapper.header_count() + self.mapper.content_count() + regular - 1;
        self.mapper.pop_footer();
        host.notify(ListNotice::DecorationRemoved {
            kind: DecorationKind::Footer,
            position,
        });
        Some(position)
    }

    /// Forward a content change to the host, shifted past the headers.
    pub fn on_content_changed(
        &mut self,
        host: &mut impl ListHost,
        change: ContentChange,
        content_count: usize,
    ) -> Result<(), SetupError> {
        if !self.adapter_attached {
            return Err(SetupError::NoAdapter);
        }
        self.mapper.set_content_count(content_count);
        let global = change.to_global(&self.mapper);
        self.swipe.on_global_change(global);
        host.notify(ListNotice::Content(global));
        self.report_empty_state(host);
        Ok(())
    }

    fn report_empty_state(&mut self, host: &mut impl ListHost) {
        let state = EmptyState::from_count(self.mapper.content_count());
        if let Some(observer) = self.empty_observer.as_mut() {
            observer(state);
        }
        host.notify(ListNotice::EmptyState(state));
    }

    /// Bind a recycled item view to the item at `content_index`.
    ///
    /// Resets the row's swipe state and gives it a fresh binding, so any
    /// open-row reference to the previous item goes stale. Returns false if
    /// the view has no swipeable container.
    pub fn bind_row(&mut self, view: &mut ViewNode, content_index: usize) -> bool {
        let menus = self
            .menu_creator
            .as_mut()
            .map(|creator| creator(content_index))
            .unwrap_or_default();
        let Some(row) = view.find_swipe_row_mut() else {
            return false;
        };
        self.next_binding += 1;
        row.rebind(self.next_binding, menus);
        true
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Feed a pointer event. The result says whether the list intercepts it.
    ///
    /// Horizontal gestures are forwarded to the touched row's drag handling;
    /// a gesture the list takes for scrolling closes any open menu.
    pub fn handle_pointer(&mut self, host: &mut impl ListHost, event: PointerEvent) -> Interception {
        let result = self.gesture.on_pointer(event, host, &mut self.swipe);
        let duration = self.config.animation_duration();

        match event.action {
            PointerAction::Down { x, .. } => self.drag_x = Some(x),
            PointerAction::Move { x, .. } => {
                if result.kind == Some(GestureKind::Swipe) && !result.intercept {
                    self.drag_row(host, x);
                } else if result.kind == Some(GestureKind::Scroll)
                    && self.swipe.close_menu(host, duration)
                {
                    log::debug!("[gesture] list scrolling, closed open menu");
                }
            }
            PointerAction::Up { x, .. } | PointerAction::Cancel { x, .. } => {
                if self.gesture.is_swiping() && !result.intercept {
                    self.drag_row(host, x);
                    self.settle_row(host);
                }
                self.drag_x = None;
            }
        }
        result
    }

    fn drag_row(&mut self, host: &mut impl ListHost, x: i32) {
        let (Some(position), Some(last_x)) = (self.gesture.touched_row(), self.drag_x) else {
            return;
        };
        self.drag_x = Some(x);
        if self.swipe.open_position().is_some_and(|open| open != position) {
            self.swipe.close_menu(host, self.config.animation_duration());
        }
        if let Some(row) = host
            .row_view_mut(position)
            .and_then(ViewNode::find_swipe_row_mut)
        {
            row.drag_by(last_x - x);
        }
    }

    fn settle_row(&mut self, host: &mut impl ListHost) {
        let Some(position) = self.gesture.touched_row() else {
            return;
        };
        let duration = self.config.animation_duration();
        let threshold = self.config.settle_threshold;
        let Some(row) = host
            .row_view_mut(position)
            .and_then(ViewNode::find_swipe_row_mut)
        else {
            return;
        };
        match row.settle(threshold, duration) {
            MenuDirection::None => self.swipe.release(position),
            direction => {
                log::debug!("[swipe] row {} dragged open ({:?})", position, direction);
                self.swipe.adopt(host, position, duration);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Swipe menus
    // -------------------------------------------------------------------------

    /// Open the menu of the row at `content_index`.
    pub fn open_menu(
        &mut self,
        host: &mut impl ListHost,
        content_index: usize,
        direction: MenuDirection,
        duration: Duration,
    ) -> bool {
        self.swipe
            .open_menu(host, &self.mapper, content_index, direction, duration)
    }

    pub fn smooth_open_left_menu(&mut self, host: &mut impl ListHost, content_index: usize) -> bool {
        let duration = self.config.animation_duration();
        self.open_menu(host, content_index, MenuDirection::Left, duration)
    }

    pub fn smooth_open_right_menu(&mut self, host: &mut impl ListHost, content_index: usize) -> bool {
        let duration = self.config.animation_duration();
        self.open_menu(host, content_index, MenuDirection::Right, duration)
    }

    /// Close the open menu with the configured animation.
    pub fn close_menu(&mut self, host: &mut impl ListHost) -> bool {
        self.swipe.close_menu(host, self.config.animation_duration())
    }

    pub fn is_menu_open(&self, host: &impl ListHost, content_index: usize) -> bool {
        self.swipe.is_menu_open(host, &self.mapper, content_index)
    }

    pub fn is_fully_open(
        &self,
        host: &impl ListHost,
        content_index: usize,
        direction: MenuDirection,
    ) -> bool {
        self.swipe
            .is_fully_open(host, &self.mapper, content_index, direction)
    }

    // -------------------------------------------------------------------------
    // Clicks
    // -------------------------------------------------------------------------

    /// An item view was clicked. Returns the content index delivered to the
    /// listener; decorations are dropped.
    pub fn on_item_click(&mut self, position: usize) -> Option<usize> {
        let index = self.mapper.to_content(position)?;
        if let Some(listener) = self.item_click.as_mut() {
            listener(index);
        }
        Some(index)
    }

    /// A swipe menu item was clicked on the row at global `position`.
    pub fn on_menu_item_click(
        &mut self,
        position: usize,
        direction: MenuDirection,
        item: usize,
    ) -> Option<MenuClick> {
        let index = self.mapper.to_content(position)?;
        let click = MenuClick {
            index,
            direction,
            item,
        };
        if let Some(listener) = self.menu_item_click.as_mut() {
            listener(click);
        }
        Some(click)
    }

    /// The pagination footer was clicked. Returns true if a load was
    /// dispatched.
    pub fn on_footer_click(&mut self, host: &mut impl ListHost) -> bool {
        if !self.pagination.footer_clicked() {
            return false;
        }
        self.dispatch_load_more(host)
    }

    // -------------------------------------------------------------------------
    // Scrolling and load-more
    // -------------------------------------------------------------------------

    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        self.scroll_state = state;
    }

    /// The list scrolled. Returns true if a load-more was dispatched.
    pub fn on_scrolled(&mut self, host: &mut impl ListHost, _dx: i32, _dy: i32) -> bool {
        let snapshot = ScrollSnapshot::of(&*host, self.scroll_state);
        if !self
            .pagination
            .should_trigger(&snapshot, self.refresh.is_refreshing())
        {
            return false;
        }
        self.dispatch_load_more(host)
    }

    fn dispatch_load_more(&mut self, host: &mut impl ListHost) -> bool {
        if self.refresh.is_refreshing() {
            log::debug!("[pagination] dispatch blocked by refresh");
            return false;
        }
        if !self.pagination.dispatch(host, &mut self.mapper) {
            return false;
        }
        self.refresh.sync_interactable(&self.pagination, host);
        let request = LoadRequest {
            kind: LoadKind::LoadMore,
            page: self.refresh.page(),
        };
        self.request_load(request);
        true
    }

    /// Complete a load-more.
    pub fn load_more_finish(&mut self, host: &mut impl ListHost, has_more: bool, show_exhausted: bool) {
        if !self.pagination.is_loading() {
            log::warn!("[pagination] finish without a load in flight, ignored");
            return;
        }
        self.clear_in_flight(LoadKind::LoadMore);
        self.pagination
            .finish(has_more, show_exhausted, host, &mut self.mapper);
        if has_more {
            self.refresh.advance_page();
        }
        self.refresh.sync_interactable(&self.pagination, host);
    }

    /// Fail a load-more; the footer offers a retry.
    pub fn load_more_error(&mut self, host: &mut impl ListHost, code: i32, message: impl Into<String>) {
        if !self.pagination.is_loading() {
            log::warn!("[pagination] error without a load in flight, ignored");
            return;
        }
        self.clear_in_flight(LoadKind::LoadMore);
        self.pagination.error(code, message, host);
        self.refresh.sync_interactable(&self.pagination, host);
    }

    // -------------------------------------------------------------------------
    // Refresh
    // -------------------------------------------------------------------------

    /// The pull gesture crossed the refresh threshold. Returns false if the
    /// refresh was rejected.
    pub fn on_refresh_triggered(&mut self, host: &mut impl ListHost) -> bool {
        let Some(page) = self
            .refresh
            .on_refresh_triggered(&mut self.pagination, host)
        else {
            return false;
        };
        self.request_load(LoadRequest {
            kind: LoadKind::Refresh,
            page,
        });
        true
    }

    /// Start a refresh as if the user had pulled.
    pub fn trigger_refresh(&mut self, host: &mut impl ListHost) -> bool {
        if self.refresh.is_refreshing() {
            return false;
        }
        self.on_refresh_triggered(host)
    }

    pub fn finish_refresh(&mut self, host: &mut impl ListHost, has_more: bool) {
        self.clear_in_flight(LoadKind::Refresh);
        self.refresh
            .finish_refresh(has_more, &mut self.pagination, host, &mut self.mapper);
    }

    pub fn error_refresh(&mut self, host: &mut impl ListHost) {
        self.clear_in_flight(LoadKind::Refresh);
        self.refresh.error_refresh(&mut self.pagination, host);
    }

    pub fn refresh_indicator(&self) -> RefreshIndicator {
        self.refresh.indicator()
    }

    // -------------------------------------------------------------------------
    // Combined completion
    // -------------------------------------------------------------------------

    /// Complete whichever load `kind` names.
    pub fn load_finish(
        &mut self,
        host: &mut impl ListHost,
        kind: LoadKind,
        has_more: bool,
        show_exhausted: bool,
    ) {
        match kind {
            LoadKind::Refresh => self.finish_refresh(host, has_more),
            LoadKind::LoadMore => self.load_more_finish(host, has_more, show_exhausted),
        }
    }

    /// Fail whichever load `kind` names.
    pub fn load_error(&mut self, host: &mut impl ListHost, kind: LoadKind, code: i32, message: impl Into<String>) {
        match kind {
            LoadKind::Refresh => self.error_refresh(host),
            LoadKind::LoadMore => self.load_more_error(host, code, message),
        }
    }

    fn request_load(&mut self, request: LoadRequest) {
        log::debug!("[loader] requesting {:?} page {}", request.kind, request.page);
        match &mut self.sink {
            LoadSink::None => log::warn!("[loader] no load listener, {:?} dropped", request.kind),
            LoadSink::Listener(listener) => listener.on_load(request),
            LoadSink::Channel(tx) => match tx.send(request) {
                Some(reply) => self.in_flight = Some((request.kind, reply)),
                None => log::warn!("[loader] loader gone, {:?} dropped", request.kind),
            },
        }
    }

    fn clear_in_flight(&mut self, kind: LoadKind) {
        if self.in_flight.as_ref().is_some_and(|(k, _)| *k == kind) {
            self.in_flight = None;
        }
    }

    /// Apply a channel loader's reply if one has arrived. Returns the kind
    /// of load that completed.
    pub fn poll_loader(&mut self, host: &mut impl ListHost) -> Option<LoadKind> {
        let (kind, mut reply) = self.in_flight.take()?;
        let outcome = match reply.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => {
                self.in_flight = Some((kind, reply));
                return None;
            }
            Err(oneshot::error::TryRecvError::Closed) => {
                log::warn!("[loader] {:?} dropped without a reply", kind);
                LoadOutcome::Failed {
                    code: -1,
                    message: "loader dropped the request".to_string(),
                }
            }
        };

        match outcome {
            LoadOutcome::Loaded {
                has_more,
                show_exhausted,
            } => self.load_finish(host, kind, has_more, show_exhausted),
            LoadOutcome::Failed { code, message } => self.load_error(host, kind, code, message),
        }
        Some(kind)
    }
}

impl Drop for SwipeList {
    fn drop(&mut self) {
        self.liveness.kill();
    }
}

impl std::fmt::Debug for SwipeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeList")
            .field("mapper", &self.mapper)
            .field("swipe", &self.swipe)
            .field("pagination", &self.pagination)
            .field("refresh", &self.refresh)
            .field("scroll_state", &self.scroll_state)
            .field("adapter_attached", &self.adapter_attached)
            .finish_non_exhaustive()
    }
}
