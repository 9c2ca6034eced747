use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::settings::MAX_TREE_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    TreeEvent(TreeEvent),
    AppEvent(AppEvent),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeEvent {
    /// Throw the current tree away and start a new one
    NewTree,

    /// Write `value` under terminal cell `(col, row)` with the current brush
    Paint { col: u16, row: u16, value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    ToggleGrid,
    ToggleOnlyFull,
    ToggleBrush,
    GrowBrush,
    ShrinkBrush,

    /// Height used by the next tree
    SetHeight(u8),

    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}

/// Converts a crossterm event into an app event
pub fn convert_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            convert_key(key_event)
        }
        CtEvent::Mouse(mouse_event) => convert_mouse(mouse_event),
        CtEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::Resize { cols, rows })),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => AppEvent::Exit,
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => return Some(Event::TreeEvent(TreeEvent::NewTree)),
        KeyEvent {
            code: KeyCode::Char('g'),
            ..
        } => AppEvent::ToggleGrid,
        KeyEvent {
            code: KeyCode::Char('f'),
            ..
        } => AppEvent::ToggleOnlyFull,
        KeyEvent {
            code: KeyCode::Char('b'),
            ..
        } => AppEvent::ToggleBrush,
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => AppEvent::GrowBrush,
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => AppEvent::ShrinkBrush,
        KeyEvent {
            code: KeyCode::Char(c @ '0'..='9'),
            ..
        } => {
            let height = c as u8 - b'0';

            if height > MAX_TREE_HEIGHT {
                return None;
            }

            AppEvent::SetHeight(height)
        }
        _ => return None,
    };

    Some(Event::AppEvent(event))
}

/// Holding a mouse button paints every frame the cursor moves, like a brush. Left paints `1` and
/// right erases back to `0`.
fn convert_mouse(mouse_event: MouseEvent) -> Option<Event> {
    let value = match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => 1.0,
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => 0.0,
        _ => return None,
    };

    Some(Event::TreeEvent(TreeEvent::Paint {
        col: mouse_event.column,
        row: mouse_event.row,
        value,
    }))
}

#[cfg(test)]
mod test {
    use crossterm::event::Event as CtEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyModifiers;
    use crossterm::event::MouseButton;
    use crossterm::event::MouseEvent;
    use crossterm::event::MouseEventKind;

    use super::AppEvent;
    use super::Event;
    use super::TreeEvent;
    use super::convert_event;

    fn key(code: KeyCode) -> CtEvent {
        CtEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys() {
        assert_eq!(
            convert_event(key(KeyCode::Enter)),
            Some(Event::TreeEvent(TreeEvent::NewTree))
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('q'))),
            Some(Event::AppEvent(AppEvent::Exit))
        );
        assert_eq!(
            convert_event(CtEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Event::AppEvent(AppEvent::Exit))
        );
        assert_eq!(
            convert_event(key(KeyCode::Char('4'))),
            Some(Event::AppEvent(AppEvent::SetHeight(4)))
        );
        assert_eq!(convert_event(key(KeyCode::Char('7'))), None);
        assert_eq!(convert_event(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(convert_event(CtEvent::Key(release)), None);
    }

    #[test]
    fn mouse_paints_and_erases() {
        assert_eq!(
            convert_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(Event::TreeEvent(TreeEvent::Paint {
                col: 3,
                row: 7,
                value: 1.0
            }))
        );
        assert_eq!(
            convert_event(mouse(MouseEventKind::Down(MouseButton::Right))),
            Some(Event::TreeEvent(TreeEvent::Paint {
                col: 3,
                row: 7,
                value: 0.0
            }))
        );
        assert_eq!(convert_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn resize() {
        assert_eq!(
            convert_event(CtEvent::Resize(80, 24)),
            Some(Event::AppEvent(AppEvent::Resize { cols: 80, rows: 24 }))
        );
    }
}
