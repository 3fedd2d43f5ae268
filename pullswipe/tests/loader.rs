mod common;

use common::MockHost;
use pullswipe::{
    FooterDisplay, LoadKind, LoadPhase, LoadReceiver, RefreshIndicator, ScrollState, SwipeList,
    SwipeListConfig,
};

fn list() -> (MockHost, SwipeList, LoadReceiver) {
    let mut host = MockHost::new(15);
    let mut list = SwipeList::new(SwipeListConfig::new().pull_enable(true, true)).expect("config");
    let rx = list.connect_loader();
    list.attach_adapter(&mut host, 15).expect("adapter");
    (host, list, rx)
}

// =============================================================================
// Channel Loader Tests
// =============================================================================

#[tokio::test]
async fn test_refresh_request_round_trip() {
    let (mut host, mut list, mut rx) = list();

    assert!(list.trigger_refresh(&mut host));
    let job = rx.recv().await.expect("job queued");
    assert_eq!(job.request.kind, LoadKind::Refresh);
    assert_eq!(job.request.page, 1);

    // Nothing to apply before the reply.
    assert_eq!(list.poll_loader(&mut host), None);
    assert!(list.is_refreshing());

    tokio::spawn(async move {
        job.finish(true, false);
    })
    .await
    .expect("loader task");

    assert_eq!(list.poll_loader(&mut host), Some(LoadKind::Refresh));
    assert!(!list.is_refreshing());
    assert_eq!(list.page(), 2);
    assert_eq!(list.refresh_indicator(), RefreshIndicator::Succeeded);
}

#[tokio::test]
async fn test_load_more_failure_reply() {
    let (mut host, mut list, mut rx) = list();

    host.scroll_to_end(5);
    list.on_scroll_state_changed(ScrollState::Dragging);
    assert!(list.on_scrolled(&mut host, 0, 12));

    let job = rx.recv().await.expect("job queued");
    assert_eq!(job.request.kind, LoadKind::LoadMore);
    assert_eq!(job.request.page, 1);
    assert!(job.fail(503, "unavailable"));

    assert_eq!(list.poll_loader(&mut host), Some(LoadKind::LoadMore));
    assert_eq!(list.phase(), LoadPhase::Error);
    assert_eq!(
        list.pagination().footer().display,
        FooterDisplay::Failed {
            code: 503,
            message: "unavailable".to_string(),
        }
    );
}

#[tokio::test]
async fn test_dropped_job_fails_load() {
    let (mut host, mut list, mut rx) = list();

    host.scroll_to_end(5);
    list.on_scroll_state_changed(ScrollState::Dragging);
    list.on_scrolled(&mut host, 0, 12);
    drop(rx.recv().await.expect("job queued"));

    assert_eq!(list.poll_loader(&mut host), Some(LoadKind::LoadMore));
    assert_eq!(list.phase(), LoadPhase::Error);
    assert!(list.pagination().footer_clicked());
}

#[tokio::test]
async fn test_reply_after_teardown_is_noop() {
    let (mut host, mut list, mut rx) = list();
    let liveness = list.liveness();
    list.trigger_refresh(&mut host);
    let job = rx.recv().await.expect("job queued");

    drop(list);
    assert!(!liveness.is_alive());
    assert!(!job.finish(false, false));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_worker_gone_drops_request() {
    let (mut host, mut list, rx) = list();
    drop(rx);

    // The request has nowhere to go; the list still enters its refreshing
    // state and can be completed directly.
    assert!(list.trigger_refresh(&mut host));
    assert_eq!(list.poll_loader(&mut host), None);
    list.finish_refresh(&mut host, false);
    assert!(!list.is_refreshing());
}

#[tokio::test]
async fn test_try_recv_without_waiting() {
    let (mut host, mut list, mut rx) = list();
    assert!(rx.try_recv().is_none());
    list.trigger_refresh(&mut host);
    let job = rx.try_recv().expect("job queued");
    assert!(job.request.is_refresh());
}
