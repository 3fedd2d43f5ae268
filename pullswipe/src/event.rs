//! Pointer and scroll input from the host list.

/// Pointer action, in list-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    Cancel { x: i32, y: i32 },
}

/// One event of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub action: PointerAction,
    /// Number of pointers currently down.
    pub pointer_count: u8,
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self::single(PointerAction::Down { x, y })
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::single(PointerAction::Move { x, y })
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self::single(PointerAction::Up { x, y })
    }

    pub fn cancel(x: i32, y: i32) -> Self {
        Self::single(PointerAction::Cancel { x, y })
    }

    fn single(action: PointerAction) -> Self {
        Self {
            action,
            pointer_count: 1,
        }
    }

    /// Same event with a different pointer count.
    pub fn with_pointers(mut self, count: u8) -> Self {
        self.pointer_count = count;
        self
    }

    pub fn is_multi_touch(&self) -> bool {
        self.pointer_count > 1
    }

    pub fn position(&self) -> (i32, i32) {
        match self.action {
            PointerAction::Down { x, y }
            | PointerAction::Move { x, y }
            | PointerAction::Up { x, y }
            | PointerAction::Cancel { x, y } => (x, y),
        }
    }
}

/// Scroll state reported by the host list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    #[default]
    Idle,
    /// The user is dragging the list.
    Dragging,
    /// The list is flinging after the user let go.
    Settling,
}

impl ScrollState {
    /// Drag or fling, as opposed to a programmatic scroll.
    pub fn is_user_driven(self) -> bool {
        matches!(self, ScrollState::Dragging | ScrollState::Settling)
    }
}

// Conversion from crossterm types
impl PointerEvent {
    /// Convert a crossterm mouse event. Only the left button drives gestures;
    /// everything else returns `None`.
    pub fn from_mouse(event: &crossterm::event::MouseEvent) -> Option<Self> {
        use crossterm::event::{MouseButton, MouseEventKind};
        let x = event.column as i32;
        let y = event.row as i32;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::down(x, y)),
            MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::moved(x, y)),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::up(x, y)),
            _ => None,
        }
    }
}

impl TryFrom<crossterm::event::MouseEvent> for PointerEvent {
    type Error = crossterm::event::MouseEventKind;

    fn try_from(event: crossterm::event::MouseEvent) -> Result<Self, Self::Error> {
        PointerEvent::from_mouse(&event).ok_or(event.kind)
    }
}
