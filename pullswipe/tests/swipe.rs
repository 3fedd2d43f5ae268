mod common;

use std::time::Duration;

use common::MockHost;
use pullswipe::{ContentChange, MenuDirection, MenuSpec, PositionMapper, SwipeMenuController};

const MS_200: Duration = Duration::from_millis(200);

fn setup(count: usize) -> (MockHost, SwipeMenuController) {
    let mut host = MockHost::new(count);
    for position in 0..count {
        host.attach_row(position, position as u64 + 1, MenuSpec::both(40, 80));
    }
    (host, SwipeMenuController::new())
}

// =============================================================================
// Open / Close Tests
// =============================================================================

#[test]
fn test_open_menu_tracks_row() {
    let (mut host, mut swipe) = setup(3);
    let mapper = PositionMapper::new();

    assert!(swipe.open_menu(&mut host, &mapper, 1, MenuDirection::Right, MS_200));
    assert_eq!(swipe.open_position(), Some(1));
    assert!(swipe.is_menu_open(&host, &mapper, 1));
    assert!(swipe.is_fully_open(&host, &mapper, 1, MenuDirection::Right));
    assert!(!swipe.is_fully_open(&host, &mapper, 1, MenuDirection::Left));
}

#[test]
fn test_open_menu_translates_through_headers() {
    let (mut host, mut swipe) = setup(4);
    let mut mapper = PositionMapper::new();
    mapper.push_header();
    mapper.set_content_count(3);

    assert!(swipe.open_menu(&mut host, &mapper, 0, MenuDirection::Left, MS_200));
    assert_eq!(swipe.open_position(), Some(1));
    assert!(host.row(1).is_left_complete_open());
    assert!(!host.row(0).is_menu_open());
}

#[test]
fn test_at_most_one_row_open() {
    let (mut host, mut swipe) = setup(3);

    swipe.open_at(&mut host, 0, MenuDirection::Right, MS_200);
    swipe.open_at(&mut host, 2, MenuDirection::Left, MS_200);

    assert!(!host.row(0).is_menu_open());
    assert!(host.row(2).is_menu_open());
    assert_eq!(swipe.open_position(), Some(2));
}

#[test]
fn test_open_detached_row_fails() {
    let (mut host, mut swipe) = setup(2);
    assert!(!swipe.open_at(&mut host, 5, MenuDirection::Right, MS_200));
    assert_eq!(swipe.open_position(), None);
}

#[test]
fn test_open_missing_direction_fails() {
    let mut host = MockHost::new(1);
    host.attach_row(0, 1, MenuSpec::left(40));
    let mut swipe = SwipeMenuController::new();

    assert!(!swipe.open_at(&mut host, 0, MenuDirection::Right, MS_200));
    assert!(!swipe.open_at(&mut host, 0, MenuDirection::None, MS_200));
    assert_eq!(swipe.open_position(), None);
}

#[test]
fn test_close_menu() {
    let (mut host, mut swipe) = setup(2);
    swipe.open_at(&mut host, 1, MenuDirection::Right, MS_200);

    assert!(swipe.close_menu(&mut host, MS_200));
    assert!(!host.row(1).is_menu_open());
    assert_eq!(swipe.open_position(), None);
    assert!(!swipe.close_menu(&mut host, MS_200));
}

#[test]
fn test_close_stale_row_leaves_recycled_view_alone() {
    let (mut host, mut swipe) = setup(2);
    swipe.open_at(&mut host, 0, MenuDirection::Right, Duration::ZERO);

    // The container is rebound and the new item opens its own menu.
    host.row_mut(0).rebind(50, MenuSpec::right(80));
    host.row_mut(0).smooth_open(MenuDirection::Right, Duration::ZERO);

    assert!(!swipe.close_menu(&mut host, MS_200));
    assert!(host.row(0).is_menu_open());
    assert_eq!(swipe.open_position(), None);
}

#[test]
fn test_validate_drops_closed_row() {
    let (mut host, mut swipe) = setup(2);
    swipe.open_at(&mut host, 0, MenuDirection::Right, Duration::ZERO);
    assert_eq!(swipe.validate(&host), Some(0));

    host.row_mut(0).smooth_close(Duration::ZERO);
    assert_eq!(swipe.validate(&host), None);
    assert_eq!(swipe.open_position(), None);
}

#[test]
fn test_adopt_and_release() {
    let (mut host, mut swipe) = setup(3);
    swipe.open_at(&mut host, 0, MenuDirection::Right, Duration::ZERO);

    host.row_mut(2).smooth_open(MenuDirection::Left, Duration::ZERO);
    swipe.adopt(&mut host, 2, MS_200);
    assert!(!host.row(0).is_menu_open());
    assert_eq!(swipe.open_position(), Some(2));

    swipe.release(1);
    assert_eq!(swipe.open_position(), Some(2));
    swipe.release(2);
    assert_eq!(swipe.open_position(), None);
}

// =============================================================================
// Position Shift Tests
// =============================================================================

fn tracked_at(position: usize) -> (MockHost, SwipeMenuController) {
    let (mut host, mut swipe) = setup(10);
    swipe.open_at(&mut host, position, MenuDirection::Right, Duration::ZERO);
    (host, swipe)
}

#[test]
fn test_insert_before_shifts_down() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::RangeInserted { start: 1, count: 2 });
    assert_eq!(swipe.open_position(), Some(6));
}

#[test]
fn test_insert_after_keeps_position() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::RangeInserted { start: 5, count: 2 });
    assert_eq!(swipe.open_position(), Some(4));
}

#[test]
fn test_remove_before_shifts_up() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::RangeRemoved { start: 0, count: 3 });
    assert_eq!(swipe.open_position(), Some(1));
}

#[test]
fn test_remove_covering_drops() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::RangeRemoved { start: 3, count: 2 });
    assert_eq!(swipe.open_position(), None);
}

#[test]
fn test_move_follows_row() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::Moved { from: 4, to: 8 });
    assert_eq!(swipe.open_position(), Some(8));
    swipe.on_global_change(ContentChange::Moved { from: 0, to: 9 });
    assert_eq!(swipe.open_position(), Some(7));
    swipe.on_global_change(ContentChange::Moved { from: 9, to: 2 });
    assert_eq!(swipe.open_position(), Some(8));
}

#[test]
fn test_reset_drops() {
    let (_host, mut swipe) = tracked_at(4);
    swipe.on_global_change(ContentChange::RangeChanged { start: 4, count: 1 });
    assert_eq!(swipe.open_position(), Some(4));
    swipe.on_global_change(ContentChange::Reset);
    assert_eq!(swipe.open_position(), None);
}
