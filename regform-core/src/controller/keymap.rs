// regform-core/src/controller/keymap.rs
// Key bindings for the form

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::actions::Action;
use crate::model::form_record::FieldName;

/// Translates a key press into an action, given the focused field.
pub fn map_key(key: KeyEvent, focus: FieldName) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::NoOp;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Char('r') if ctrl => Action::Reset,
        KeyCode::Char('s') if ctrl => Action::Submit,
        KeyCode::F(2) => Action::Submit,
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::DismissNotification,

        KeyCode::Tab | KeyCode::Down => Action::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Action::FocusPrev,

        KeyCode::Left if !focus.is_text() => Action::CycleDepartment(false),
        KeyCode::Right | KeyCode::Char(' ') if !focus.is_text() => Action::CycleDepartment(true),

        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(ch) if !ctrl && focus.is_text() => Action::Input(ch),

        _ => Action::NoOp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_goes_to_text_fields() {
        assert_eq!(map_key(press(KeyCode::Char('q')), FieldName::Name), Action::Input('q'));
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), FieldName::Name),
            Action::Input(' ')
        );
        assert_eq!(
            map_key(press(KeyCode::Char('x')), FieldName::Department),
            Action::NoOp
        );
    }

    #[test]
    fn test_department_selector_keys() {
        assert_eq!(
            map_key(press(KeyCode::Right), FieldName::Department),
            Action::CycleDepartment(true)
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), FieldName::Department),
            Action::CycleDepartment(true)
        );
        assert_eq!(
            map_key(press(KeyCode::Left), FieldName::Department),
            Action::CycleDepartment(false)
        );
        assert_eq!(map_key(press(KeyCode::Left), FieldName::Phone), Action::NoOp);
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(map_key(ctrl('c'), FieldName::Name), Action::Quit);
        assert_eq!(map_key(ctrl('r'), FieldName::Email), Action::Reset);
        assert_eq!(map_key(ctrl('s'), FieldName::Email), Action::Submit);
        assert_eq!(map_key(press(KeyCode::Enter), FieldName::Role), Action::Submit);
        assert_eq!(map_key(press(KeyCode::BackTab), FieldName::Role), Action::FocusPrev);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut key = press(KeyCode::Char('a'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, FieldName::Name), Action::NoOp);
    }
}
