//! Contract between the interaction core and the host list view.

use crate::position::ContentChange;
use crate::row::ViewNode;

/// Kind of decoration cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Header,
    /// The pagination footer.
    LoadMoreFooter,
    Footer,
}

/// What the pagination footer should display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FooterDisplay {
    #[default]
    Hidden,
    Loading,
    /// More pages are available; clicking loads the next one.
    MoreAvailable,
    /// End-of-list marker.
    Exhausted,
    /// Loading failed; clicking retries.
    Failed { code: i32, message: String },
}

impl FooterDisplay {
    /// Whether a click on the footer should dispatch a load.
    pub fn is_clickable(&self) -> bool {
        matches!(self, FooterDisplay::MoreAvailable | FooterDisplay::Failed { .. })
    }
}

/// What the pull-to-refresh indicator should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshIndicator {
    #[default]
    Idle,
    Refreshing,
    /// Settle back after a successful refresh.
    Succeeded,
    /// Settle back after a failed refresh.
    Failed,
}

/// Whether the content collection is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    Empty,
    Populated,
}

impl EmptyState {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            EmptyState::Empty
        } else {
            EmptyState::Populated
        }
    }
}

/// Notifications the core sends to the host list. All positions are global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListNotice {
    DecorationInserted { kind: DecorationKind, position: usize },
    DecorationRemoved { kind: DecorationKind, position: usize },
    /// A content change, already shifted past the headers.
    Content(ContentChange),
    /// Footer display changed. `visible` is false while a refresh hides it.
    Footer { display: FooterDisplay, visible: bool },
    Refresh {
        indicator: RefreshIndicator,
        /// Whether the pull gesture may start a refresh.
        interactable: bool,
    },
    EmptyState(EmptyState),
}

/// Services the host list view provides to the interaction core.
pub trait ListHost {
    /// First visible global position, if any cell is laid out.
    fn first_visible(&self) -> Option<usize>;

    /// Last visible global position, if any cell is laid out.
    fn last_visible(&self) -> Option<usize>;

    /// Number of cells, decorations included.
    fn item_count(&self) -> usize;

    /// Global position of the row under `(x, y)`.
    fn row_at(&self, x: i32, y: i32) -> Option<usize>;

    /// Item view currently attached at a global position.
    fn row_view(&self, position: usize) -> Option<&ViewNode>;

    /// Mutable variant of [`ListHost::row_view`].
    fn row_view_mut(&mut self, position: usize) -> Option<&mut ViewNode>;

    /// Receive a notification from the core.
    fn notify(&mut self, notice: ListNotice);
}
