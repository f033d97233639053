use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{
    domain::Category,
    garden::{Control, Input, Screen, TextKey},
};

use super::App;

impl App {
    pub(super) fn translate_event(&self, event: Event) -> Option<Input> {
        let screen = self.garden.screen();
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => translate_key(screen, key),
            Event::Mouse(mouse) => self.translate_mouse(screen, mouse),
            _ => None,
        }
    }

    fn translate_mouse(&self, screen: Screen, mouse: MouseEvent) -> Option<Input> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .layout
                .hit_test(screen, mouse.column, mouse.row)
                .map(Input::Press),
            _ => None,
        }
    }
}

fn translate_key(screen: Screen, key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    match screen {
        Screen::Home => match key.code {
            KeyCode::Enter | KeyCode::Char('g') => Some(Input::Press(Control::EnterGarden)),
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            _ => None,
        },
        Screen::Garden { .. } => garden_key(key.code).map(Input::Press).or_else(|| {
            matches!(key.code, KeyCode::Char('q')).then_some(Input::Quit)
        }),
        Screen::NameInput => match key.code {
            KeyCode::Enter => Some(Input::Key(TextKey::Enter)),
            KeyCode::Backspace => Some(Input::Key(TextKey::Backspace)),
            KeyCode::Char(c) => Some(Input::Key(TextKey::Char(c))),
            _ => None,
        },
    }
}

fn garden_key(code: KeyCode) -> Option<Control> {
    let control = match code {
        KeyCode::Char('1') => Control::SelectCategory(Category::Leisure),
        KeyCode::Char('2') => Control::SelectCategory(Category::Work),
        KeyCode::Char('3') => Control::SelectCategory(Category::Commuting),
        KeyCode::Char(' ') | KeyCode::Enter => Control::StartStop,
        KeyCode::Left | KeyCode::Char('[') => Control::PrevPage,
        KeyCode::Right | KeyCode::Char(']') => Control::NextPage,
        KeyCode::Esc | KeyCode::Char('h') => Control::Home,
        KeyCode::Char('d') => Control::ToggleDevOverlay,
        KeyCode::Char('r') => Control::BackupAndReset,
        KeyCode::Char('t') => Control::AddFifteenMinutes,
        _ => return None,
    };
    Some(control)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_home_keys() {
        assert_eq!(
            translate_key(Screen::Home, key(KeyCode::Enter)),
            Some(Input::Press(Control::EnterGarden))
        );
        assert_eq!(
            translate_key(Screen::Home, key(KeyCode::Char('q'))),
            Some(Input::Quit)
        );
        assert_eq!(translate_key(Screen::Home, key(KeyCode::Char('1'))), None);
    }

    #[test]
    fn test_garden_shortcuts() {
        let garden = Screen::Garden { dev_overlay: false };
        assert_eq!(
            translate_key(garden, key(KeyCode::Char('3'))),
            Some(Input::Press(Control::SelectCategory(Category::Commuting)))
        );
        assert_eq!(
            translate_key(garden, key(KeyCode::Char(' '))),
            Some(Input::Press(Control::StartStop))
        );
        assert_eq!(
            translate_key(garden, key(KeyCode::Left)),
            Some(Input::Press(Control::PrevPage))
        );
        assert_eq!(
            translate_key(garden, key(KeyCode::Char('q'))),
            Some(Input::Quit)
        );
    }

    #[test]
    fn test_name_input_takes_text() {
        assert_eq!(
            translate_key(Screen::NameInput, key(KeyCode::Char('q'))),
            Some(Input::Key(TextKey::Char('q')))
        );
        assert_eq!(
            translate_key(Screen::NameInput, key(KeyCode::Backspace)),
            Some(Input::Key(TextKey::Backspace))
        );
        assert_eq!(
            translate_key(
                Screen::NameInput,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Input::Quit)
        );
    }
}
