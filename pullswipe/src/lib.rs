//! Interaction core for virtualized lists with swipe menus, pull-to-refresh
//! and load-more pagination.
//!
//! The host owns the views and the scrolling; [`SwipeList`] decides what the
//! pointer gestures mean, which row shows its menu, and when pages load.

pub mod animation;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod gesture;
pub mod host;
pub mod loader;
pub mod pagination;
pub mod position;
pub mod refresh;
pub mod row;
pub mod swipe;

pub use animation::{Easing, OffsetAnimation};
pub use config::{CloseStyle, SwipeListConfig};
pub use controller::{MenuClick, SwipeList};
pub use error::{ConfigError, SetupError};
pub use event::{PointerAction, PointerEvent, ScrollState};
pub use gesture::{classify, GestureDisambiguator, GestureKind, Interception};
pub use host::{DecorationKind, EmptyState, FooterDisplay, ListHost, ListNotice, RefreshIndicator};
pub use loader::{LoadJob, LoadKind, LoadListener, LoadOutcome, LoadReceiver, LoadRequest, Liveness};
pub use pagination::{FooterState, LoadPhase, PaginationController, ScrollSnapshot};
pub use position::{ContentChange, PositionMapper, Region};
pub use refresh::RefreshCoordinator;
pub use row::{MenuDirection, MenuSpec, SwipeRow, ViewNode};
pub use swipe::SwipeMenuController;
