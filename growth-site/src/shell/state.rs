use bevy::input::keyboard::Key;
use bevy::prelude::*;

use crate::strategy::model::RequestLifecycle;

/// Content panels reachable from the navbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShellSection {
    #[default]
    Home,
    Projects,
    AiLab,
    Contact,
}

impl ShellSection {
    pub const ALL: [ShellSection; 4] = [
        ShellSection::Home,
        ShellSection::Projects,
        ShellSection::AiLab,
        ShellSection::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShellSection::Home => "Inicio",
            ShellSection::Projects => "Proyectos",
            ShellSection::AiLab => "AI Lab",
            ShellSection::Contact => "Contacto",
        }
    }

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(ShellSection::Home),
            KeyCode::Digit2 | KeyCode::Numpad2 => Some(ShellSection::Projects),
            KeyCode::Digit3 | KeyCode::Numpad3 => Some(ShellSection::AiLab),
            KeyCode::Digit4 | KeyCode::Numpad4 => Some(ShellSection::Contact),
            _ => None,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ActiveSection(pub ShellSection);

/// Contents of the niche text field.
#[derive(Resource, Debug, Default)]
pub struct NicheInput {
    pub text: String,
    pub focused: bool,
}

/// Effect of one key press on the niche field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Changed,
    Submit,
    Blur,
    Ignored,
}

const MAX_NICHE_CHARS: usize = 120;

/// Apply a logical key to the field text.
pub fn apply_key(text: &mut String, key: &Key) -> InputEdit {
    match key {
        Key::Enter => InputEdit::Submit,
        Key::Escape => InputEdit::Blur,
        Key::Backspace => {
            if text.pop().is_some() {
                InputEdit::Changed
            } else {
                InputEdit::Ignored
            }
        }
        Key::Space => push_chars(text, " "),
        Key::Character(chars) => push_chars(text, chars),
        _ => InputEdit::Ignored,
    }
}

fn push_chars(text: &mut String, chars: &str) -> InputEdit {
    let printable: String = chars.chars().filter(|c| !c.is_control()).collect();
    if printable.is_empty() || text.chars().count() + printable.chars().count() > MAX_NICHE_CHARS {
        return InputEdit::Ignored;
    }
    text.push_str(&printable);
    InputEdit::Changed
}

/// The Generate button is usable only with non-blank input and no request in flight.
pub fn generate_enabled(state: &RequestLifecycle, niche: &str) -> bool {
    !state.is_loading() && !niche.trim().is_empty()
}

// Markers
#[derive(Component)]
pub struct ShellRoot;
#[derive(Component, Clone, Copy)]
pub struct SectionPanel(pub ShellSection);
#[derive(Component, Clone, Copy)]
pub struct NavLink(pub ShellSection);
#[derive(Component, Clone, Copy)]
pub struct NavbarLabel(pub ShellSection);
#[derive(Component)]
pub struct NicheField;
#[derive(Component)]
pub struct NicheFieldText;
#[derive(Component)]
pub struct GenerateButton;
#[derive(Component)]
pub struct GenerateLabel;
#[derive(Component)]
pub struct StrategyStatusText;
#[derive(Component)]
pub struct StrategyResultCards;
#[derive(Component)]
pub struct HeadlineText;
#[derive(Component, Clone, Copy)]
pub struct KeyPointText(pub usize);
#[derive(Component)]
pub struct CallToActionText;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::model::StrategyResult;

    #[test]
    fn digit_keys_map_to_sections_in_nav_order() {
        let keys = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
        ];
        for (key, section) in keys.into_iter().zip(ShellSection::ALL) {
            assert_eq!(ShellSection::from_key(key), Some(section));
        }
        assert_eq!(ShellSection::from_key(KeyCode::Digit5), None);
    }

    #[test]
    fn typing_editing_and_submitting() {
        let mut text = String::new();
        assert_eq!(apply_key(&mut text, &Key::Character("C".into())), InputEdit::Changed);
        assert_eq!(apply_key(&mut text, &Key::Character("af".into())), InputEdit::Changed);
        assert_eq!(apply_key(&mut text, &Key::Character("é".into())), InputEdit::Changed);
        assert_eq!(apply_key(&mut text, &Key::Space), InputEdit::Changed);
        assert_eq!(text, "Café ");

        assert_eq!(apply_key(&mut text, &Key::Backspace), InputEdit::Changed);
        assert_eq!(text, "Café");
        assert_eq!(apply_key(&mut text, &Key::Enter), InputEdit::Submit);
        assert_eq!(apply_key(&mut text, &Key::Escape), InputEdit::Blur);
        assert_eq!(apply_key(&mut text, &Key::Tab), InputEdit::Ignored);
        assert_eq!(text, "Café");

        let mut empty = String::new();
        assert_eq!(apply_key(&mut empty, &Key::Backspace), InputEdit::Ignored);
    }

    #[test]
    fn input_length_is_capped() {
        let mut text = "x".repeat(MAX_NICHE_CHARS);
        assert_eq!(apply_key(&mut text, &Key::Character("y".into())), InputEdit::Ignored);
        assert_eq!(text.len(), MAX_NICHE_CHARS);
    }

    #[test]
    fn generate_disabled_while_loading_or_blank() {
        assert!(generate_enabled(&RequestLifecycle::Idle, "café"));
        assert!(!generate_enabled(&RequestLifecycle::Idle, "   "));
        assert!(!generate_enabled(&RequestLifecycle::Loading, "café"));
        assert!(generate_enabled(&RequestLifecycle::Error, "café"));

        let done = RequestLifecycle::Success(StrategyResult {
            headline: "h".into(),
            key_points: ["a".into(), "b".into(), "c".into()],
            call_to_action: "c".into(),
        });
        assert!(generate_enabled(&done, "café"));
    }
}
