use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    StepUp,       // k/Up: move selection to the previous item
    StepDown,     // j/Down: move selection to the next item
    ToggleCyclic, // 'c': toggle wrap-around on the focused wheel
    CycleMode,    // 'm': cycle through picker field layouts
    SetToday,     // 't': jump the picker to the current date
    // Pointer gestures forwarded to the focused wheel
    PointerDown { x: u16, y: u16 },
    PointerMove { x: u16, y: u16 },
    PointerUp { x: u16, y: u16 },
    // Scroll wheel nudges the wheel under the cursor
    NudgeAt { x: u16, y: u16, steps: i64 },
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,

        // Navigation between wheels
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::FocusPrev,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::Left, KeyModifiers::NONE) => Action::FocusPrev,
        (KeyCode::Right, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::FocusPrev,

        // Stepping within the focused wheel
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::StepDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::StepUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::StepDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::StepUp,

        // Picker controls
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::ToggleCyclic,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::CycleMode,
        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::SetToday,

        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::PointerDown {
            x: mouse.column,
            y: mouse.row,
        },
        MouseEventKind::Drag(MouseButton::Left) => Action::PointerMove {
            x: mouse.column,
            y: mouse.row,
        },
        MouseEventKind::Up(MouseButton::Left) => Action::PointerUp {
            x: mouse.column,
            y: mouse.row,
        },
        MouseEventKind::ScrollUp => Action::NudgeAt {
            x: mouse.column,
            y: mouse.row,
            steps: -1,
        },
        MouseEventKind::ScrollDown => Action::NudgeAt {
            x: mouse.column,
            y: mouse.row,
            steps: 1,
        },
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_step_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::StepDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Up, KeyModifiers::NONE)),
            Action::StepUp
        );
    }

    #[test]
    fn test_plain_c_toggles_cyclic() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Action::ToggleCyclic
        );
    }

    #[test]
    fn test_unmapped_key_is_none() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE)),
            Action::None
        );
    }

    #[test]
    fn test_mouse_drag_and_scroll() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 4, 7)),
            Action::PointerDown { x: 4, y: 7 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 4, 5)),
            Action::PointerMove { x: 4, y: 5 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 10, 3)),
            Action::NudgeAt {
                x: 10,
                y: 3,
                steps: -1
            }
        );
    }
}
