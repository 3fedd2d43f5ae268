//! Load requests and their completion.
//!
//! Loads are started by the list and completed by the app. Two styles are
//! supported: a [`LoadListener`] callback, after which the app calls the
//! controller's completion methods directly, and a channel pair where each
//! [`LoadJob`] carries a one-shot reply that the controller collects with
//! `poll_loader`. In both styles a completion that arrives after the list is
//! gone goes nowhere.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};

/// What a load is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    /// Reload from the first page.
    Refresh,
    /// Fetch the next page.
    LoadMore,
}

/// A load the app should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub kind: LoadKind,
    /// 1-based page to fetch.
    pub page: u32,
}

impl LoadRequest {
    pub fn is_refresh(&self) -> bool {
        self.kind == LoadKind::Refresh
    }
}

/// How a load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        has_more: bool,
        /// Keep an end-of-list footer when there is nothing more.
        show_exhausted: bool,
    },
    Failed { code: i32, message: String },
}

/// Callback-style receiver of load requests.
pub trait LoadListener {
    fn on_load(&mut self, request: LoadRequest);
}

impl<F: FnMut(LoadRequest)> LoadListener for F {
    fn on_load(&mut self, request: LoadRequest) {
        self(request)
    }
}

// =============================================================================
// Channel style
// =============================================================================

/// A request plus the one-shot reply for it.
#[derive(Debug)]
pub struct LoadJob {
    pub request: LoadRequest,
    reply: oneshot::Sender<LoadOutcome>,
}

impl LoadJob {
    /// Report success. Returns false if the list is gone.
    pub fn finish(self, has_more: bool, show_exhausted: bool) -> bool {
        self.reply(LoadOutcome::Loaded {
            has_more,
            show_exhausted,
        })
    }

    /// Report failure. Returns false if the list is gone.
    pub fn fail(self, code: i32, message: impl Into<String>) -> bool {
        self.reply(LoadOutcome::Failed {
            code,
            message: message.into(),
        })
    }

    pub fn reply(self, outcome: LoadOutcome) -> bool {
        self.reply.send(outcome).is_ok()
    }
}

/// Sending half, owned by the list controller.
#[derive(Debug, Clone)]
pub struct LoadSender {
    tx: mpsc::UnboundedSender<LoadJob>,
}

impl LoadSender {
    /// Queue a job. Returns the receiver for its reply, or `None` if the
    /// worker side is gone.
    pub(crate) fn send(&self, request: LoadRequest) -> Option<oneshot::Receiver<LoadOutcome>> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(LoadJob { request, reply }).ok()?;
        Some(rx)
    }
}

/// Receiving half, owned by the app's loader task.
#[derive(Debug)]
pub struct LoadReceiver {
    rx: mpsc::UnboundedReceiver<LoadJob>,
}

impl LoadReceiver {
    /// Wait for the next job. `None` once the list is gone.
    pub async fn recv(&mut self) -> Option<LoadJob> {
        self.rx.recv().await
    }

    /// Take a queued job without waiting.
    pub fn try_recv(&mut self) -> Option<LoadJob> {
        self.rx.try_recv().ok()
    }
}

/// Create a load channel pair.
pub fn channel() -> (LoadSender, LoadReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LoadSender { tx }, LoadReceiver { rx })
}

// =============================================================================
// Liveness
// =============================================================================

/// Cleared when the list controller is dropped.
///
/// Callback-style apps check it before calling back into a list that may
/// have been torn down while a load was running.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub(crate) fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn kill(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
