use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use constants::palette::{ACCENT, BORDER, ERROR, MUTED, TEXT};
use constants::strategy::{ERROR_MESSAGE, INPUT_PLACEHOLDER};

use super::state::*;
use crate::engine::orbital::selection::ActiveNode;
use crate::strategy::dispatch::StrategyRequestEvent;
use crate::strategy::lifecycle::StrategyPanel;
use crate::strategy::model::RequestLifecycle;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

fn submit_niche(
    input: &NicheInput,
    panel: &StrategyPanel,
    requests: &mut EventWriter<StrategyRequestEvent>,
) {
    if generate_enabled(panel.state(), &input.text) {
        requests.write(StrategyRequestEvent {
            niche: input.text.trim().to_string(),
        });
    }
}

// Navbar links and hero buttons switch the visible panel
pub fn nav_link_interaction(
    q: Query<(&Interaction, &NavLink), (Changed<Interaction>, With<Button>)>,
    mut section: ResMut<ActiveSection>,
) {
    for (interaction, link) in &q {
        if *interaction == Interaction::Pressed && section.0 != link.0 {
            section.0 = link.0;
        }
    }
}

// Clicking the field focuses it; clicking anywhere else blurs it
pub fn niche_field_focus(
    field: Query<&Interaction, With<NicheField>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<NicheInput>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let pressed = field
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);
    if input.focused != pressed {
        input.focused = pressed;
    }
}

// Typing goes to the focused field, otherwise digit keys pick a section
pub fn handle_keyboard_input(
    mut keys: EventReader<KeyboardInput>,
    mut input: ResMut<NicheInput>,
    mut section: ResMut<ActiveSection>,
    panel: Res<StrategyPanel>,
    mut requests: EventWriter<StrategyRequestEvent>,
) {
    for key in keys.read() {
        if key.state != ButtonState::Pressed {
            continue;
        }

        if !input.focused {
            if let Some(next) = ShellSection::from_key(key.key_code) {
                if section.0 != next {
                    section.0 = next;
                }
            }
            continue;
        }

        match apply_key(&mut input.bypass_change_detection().text, &key.logical_key) {
            InputEdit::Changed => input.set_changed(),
            InputEdit::Submit => submit_niche(&input, &panel, &mut requests),
            InputEdit::Blur => input.focused = false,
            InputEdit::Ignored => {}
        }
    }
}

// Generate button sends the request when enabled, accent colour on hover
pub fn generate_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<GenerateButton>),
    >,
    input: Res<NicheInput>,
    panel: Res<StrategyPanel>,
    mut requests: EventWriter<StrategyRequestEvent>,
) {
    let enabled = generate_enabled(panel.state(), &input.text);
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => submit_niche(&input, &panel, &mut requests),
            Interaction::Hovered if enabled => *bg = BackgroundColor(ACCENT),
            _ => *bg = generate_background(enabled),
        }
    }
}

fn generate_background(enabled: bool) -> BackgroundColor {
    BackgroundColor(Color::WHITE.with_alpha(if enabled { 1.0 } else { 0.5 }))
}

// Pointer cursor over clickable shell elements
pub fn shell_hover_cursor(
    buttons: Query<&Interaction, (With<Button>, Or<(With<NavLink>, With<GenerateButton>)>)>,
    field: Query<&Interaction, With<NicheField>>,
    active: Res<ActiveNode>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut last: Local<Option<SystemCursorIcon>>,
) {
    let icon = if field.iter().any(|i| *i != Interaction::None) {
        SystemCursorIcon::Text
    } else if buttons.iter().any(|i| *i != Interaction::None) || active.get().is_some() {
        SystemCursorIcon::Pointer
    } else {
        SystemCursorIcon::Default
    };
    if *last == Some(icon) {
        return;
    }
    *last = Some(icon);

    let Ok(window) = windows.single() else {
        return;
    };
    commands.entity(window).insert(CursorIcon::from(icon));
}

pub fn show_active_section(
    section: Res<ActiveSection>,
    mut panels: Query<(&SectionPanel, &mut Node)>,
    mut labels: Query<(&NavbarLabel, &mut TextColor)>,
) {
    if !section.is_changed() {
        return;
    }
    for (panel, mut node) in &mut panels {
        node.display = if panel.0 == section.0 {
            Display::Flex
        } else {
            Display::None
        };
    }
    for (label, mut color) in &mut labels {
        color.0 = if label.0 == section.0 { TEXT } else { MUTED };
    }
}

pub fn reflect_niche_input(
    input: Res<NicheInput>,
    mut text: Query<(&mut Text, &mut TextColor), With<NicheFieldText>>,
    mut field: Query<&mut BorderColor, With<NicheField>>,
) {
    if !input.is_changed() {
        return;
    }
    for (mut value, mut color) in &mut text {
        let shown = match (input.text.is_empty(), input.focused) {
            (true, false) => INPUT_PLACEHOLDER.to_string(),
            (true, true) => "|".to_string(),
            (false, true) => format!("{}|", input.text),
            (false, false) => input.text.clone(),
        };
        value.0 = shown;
        color.0 = if input.text.is_empty() {
            MUTED.with_alpha(0.5)
        } else {
            TEXT
        };
    }
    for mut border in &mut field {
        border.0 = if input.focused { ACCENT } else { BORDER };
    }
}

// Button look follows the enabled state; the label spins while a request is in flight
pub fn reflect_generate_button(
    input: Res<NicheInput>,
    panel: Res<StrategyPanel>,
    time: Res<Time>,
    mut button: Query<(&Interaction, &mut BackgroundColor), With<GenerateButton>>,
    mut label: Query<&mut Text, With<GenerateLabel>>,
) {
    let loading = panel.state().is_loading();
    if !loading && !input.is_changed() && !panel.is_changed() {
        return;
    }

    let enabled = generate_enabled(panel.state(), &input.text);
    for (interaction, mut bg) in &mut button {
        if !(enabled && *interaction == Interaction::Hovered) {
            *bg = generate_background(enabled);
        }
    }

    let caption = if loading {
        let frame = (time.elapsed_secs() * 8.0) as usize % SPINNER_FRAMES.len();
        SPINNER_FRAMES[frame].to_string()
    } else {
        "GENERAR  ➤".to_string()
    };
    for mut text in &mut label {
        if text.0 != caption {
            text.0 = caption.clone();
        }
    }
}

/// Status line text for a lifecycle state.
pub fn status_message(state: &RequestLifecycle) -> &'static str {
    match state {
        RequestLifecycle::Idle | RequestLifecycle::Success(_) => "",
        RequestLifecycle::Loading => "Analizando el nicho...",
        RequestLifecycle::Error => ERROR_MESSAGE,
    }
}

// Result cards exist only for a successful request
pub fn reflect_strategy_state(
    panel: Res<StrategyPanel>,
    mut status: Query<(&mut Text, &mut TextColor), With<StrategyStatusText>>,
    mut cards: Query<&mut Node, With<StrategyResultCards>>,
    mut headline: Query<&mut Text, (With<HeadlineText>, Without<StrategyStatusText>)>,
    mut points: Query<
        (&KeyPointText, &mut Text),
        (Without<HeadlineText>, Without<StrategyStatusText>),
    >,
    mut cta: Query<
        &mut Text,
        (
            With<CallToActionText>,
            Without<HeadlineText>,
            Without<KeyPointText>,
            Without<StrategyStatusText>,
        ),
    >,
) {
    if !panel.is_changed() {
        return;
    }
    let state = panel.state();

    for (mut text, mut color) in &mut status {
        text.0 = status_message(state).to_string();
        color.0 = if matches!(state, RequestLifecycle::Error) {
            ERROR
        } else {
            MUTED
        };
    }

    let result = state.result();
    for mut node in &mut cards {
        node.display = if result.is_some() {
            Display::Flex
        } else {
            Display::None
        };
    }
    let Some(result) = result else {
        return;
    };

    for mut text in &mut headline {
        text.0 = result.headline.clone();
    }
    for (point, mut text) in &mut points {
        if let Some(value) = result.key_points.get(point.0) {
            text.0 = format!("• {value}");
        }
    }
    for mut text in &mut cta {
        text.0 = format!("\"{}\"", result.call_to_action);
    }
}
