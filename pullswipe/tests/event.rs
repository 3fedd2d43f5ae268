use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use pullswipe::{PointerAction, PointerEvent, ScrollState};

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// =============================================================================
// Crossterm Conversion Tests
// =============================================================================

#[test]
fn test_left_button_maps_to_gesture() {
    let down = PointerEvent::try_from(mouse(MouseEventKind::Down(MouseButton::Left), 3, 7));
    assert_eq!(down, Ok(PointerEvent::down(3, 7)));

    let drag = PointerEvent::from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 4, 7));
    assert_eq!(drag.map(|e| e.action), Some(PointerAction::Move { x: 4, y: 7 }));

    let up = PointerEvent::from_mouse(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 8));
    assert_eq!(up.map(|e| e.position()), Some((4, 8)));
}

#[test]
fn test_other_mouse_events_rejected() {
    let right = mouse(MouseEventKind::Down(MouseButton::Right), 0, 0);
    assert_eq!(PointerEvent::try_from(right), Err(right.kind));
    assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::ScrollDown, 0, 0)).is_none());
    assert!(PointerEvent::from_mouse(&mouse(MouseEventKind::Moved, 0, 0)).is_none());
}

#[test]
fn test_single_pointer_by_default() {
    let event = PointerEvent::cancel(1, 1);
    assert!(!event.is_multi_touch());
    assert!(event.with_pointers(2).is_multi_touch());
}

#[test]
fn test_scroll_state_user_driven() {
    assert!(!ScrollState::Idle.is_user_driven());
    assert!(ScrollState::Dragging.is_user_driven());
    assert!(ScrollState::Settling.is_user_driven());
    assert_eq!(ScrollState::default(), ScrollState::Idle);
}
