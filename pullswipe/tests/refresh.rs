mod common;

use common::MockHost;
use pullswipe::{
    FooterDisplay, ListNotice, LoadPhase, PaginationController, PositionMapper,
    RefreshCoordinator, RefreshIndicator,
};

struct Fixture {
    host: MockHost,
    mapper: PositionMapper,
    pagination: PaginationController,
    refresh: RefreshCoordinator,
}

fn fixture() -> Fixture {
    let mut mapper = PositionMapper::new();
    mapper.set_content_count(10);
    Fixture {
        host: MockHost::new(10),
        mapper,
        pagination: PaginationController::new(true, true),
        refresh: RefreshCoordinator::new(true),
    }
}

// =============================================================================
// Trigger Tests
// =============================================================================

#[test]
fn test_refresh_starts_at_page_one() {
    let mut f = fixture();
    assert_eq!(f.refresh.page(), 1);
    assert_eq!(
        f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host),
        Some(1)
    );
    assert!(f.refresh.is_refreshing());
    assert!(!f.refresh.is_interactable());
    assert_eq!(f.refresh.indicator(), RefreshIndicator::Refreshing);
    assert_eq!(
        f.host.notices.last(),
        Some(&ListNotice::Refresh {
            indicator: RefreshIndicator::Refreshing,
            interactable: false,
        })
    );
}

#[test]
fn test_refresh_rejected_when_disabled() {
    let mut f = fixture();
    f.refresh = RefreshCoordinator::new(false);
    assert_eq!(
        f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host),
        None
    );
    assert!(!f.refresh.is_refreshing());
}

#[test]
fn test_refresh_rejected_while_refreshing() {
    let mut f = fixture();
    f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host);
    assert_eq!(
        f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host),
        None
    );
}

#[test]
fn test_refresh_rejected_while_loading_more() {
    let mut f = fixture();
    f.pagination.dispatch(&mut f.host, &mut f.mapper);
    f.refresh.sync_interactable(&f.pagination, &mut f.host);
    assert!(!f.refresh.is_interactable());

    assert_eq!(
        f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host),
        None
    );
    assert_eq!(f.pagination.phase(), LoadPhase::Loading);
}

// =============================================================================
// Completion Tests
// =============================================================================

#[test]
fn test_finish_with_more_sets_page_two() {
    let mut f = fixture();
    f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host);
    f.refresh
        .finish_refresh(true, &mut f.pagination, &mut f.host, &mut f.mapper);

    assert!(!f.refresh.is_refreshing());
    assert!(f.refresh.is_interactable());
    assert_eq!(f.refresh.page(), 2);
    assert_eq!(f.refresh.indicator(), RefreshIndicator::Succeeded);
    assert_eq!(f.pagination.footer().display, FooterDisplay::MoreAvailable);
    assert!(f.pagination.footer().visible);
}

#[test]
fn test_finish_without_more_keeps_page_one() {
    let mut f = fixture();
    f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host);
    f.refresh
        .finish_refresh(false, &mut f.pagination, &mut f.host, &mut f.mapper);

    assert_eq!(f.refresh.page(), 1);
    assert_eq!(f.pagination.phase(), LoadPhase::Exhausted);
    assert!(!f.pagination.footer().attached);
}

#[test]
fn test_finish_without_refresh_is_ignored() {
    let mut f = fixture();
    f.refresh.advance_page();
    f.refresh
        .finish_refresh(true, &mut f.pagination, &mut f.host, &mut f.mapper);
    assert_eq!(f.refresh.page(), 2);
    assert_eq!(f.refresh.indicator(), RefreshIndicator::Idle);
    assert!(f.host.notices.is_empty());
}

#[test]
fn test_error_restores_footer_visibility() {
    let mut f = fixture();
    f.pagination.dispatch(&mut f.host, &mut f.mapper);
    f.pagination.finish(true, false, &mut f.host, &mut f.mapper);

    f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host);
    assert!(!f.pagination.footer().visible);

    f.refresh.error_refresh(&mut f.pagination, &mut f.host);
    assert!(f.pagination.footer().visible);
    assert!(!f.refresh.is_refreshing());
    assert!(f.refresh.is_interactable());
    assert_eq!(f.refresh.indicator(), RefreshIndicator::Failed);
}

#[test]
fn test_refresh_disabled_load_more_untouched_on_finish() {
    let mut f = fixture();
    f.pagination = PaginationController::new(false, true);
    f.refresh.on_refresh_triggered(&mut f.pagination, &mut f.host);
    f.refresh
        .finish_refresh(true, &mut f.pagination, &mut f.host, &mut f.mapper);
    assert!(!f.pagination.footer().attached);
    assert_eq!(f.pagination.phase(), LoadPhase::Idle);
}
