//! Presentation shell: navbar, the four content panels and the strategy form.
//!
//! Laid over the hero grid on the left of the window. The strategy form only sends
//! `StrategyRequestEvent`s and mirrors `StrategyPanel`; it never talks to the backend.

pub mod interactions;
pub mod state;
pub mod ui;

use bevy::prelude::*;

use crate::strategy::StrategyPlugin;
use interactions::*;
use state::{ActiveSection, NicheInput};
use ui::spawn_shell_ui;

pub struct ShellPlugin;

impl Plugin for ShellPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<StrategyPlugin>() {
            warn!("ShellPlugin added without StrategyPlugin; the strategy form will be inert");
        }

        app.init_resource::<ActiveSection>()
            .init_resource::<NicheInput>()
            .add_systems(Startup, spawn_shell_ui)
            .add_systems(
                Update,
                (
                    (
                        nav_link_interaction,
                        niche_field_focus,
                        handle_keyboard_input,
                        generate_button_interaction,
                    )
                        .chain(),
                    (
                        show_active_section,
                        reflect_niche_input,
                        reflect_generate_button,
                        reflect_strategy_state,
                        shell_hover_cursor,
                    ),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::state::*;
    use super::*;
    use crate::config::SupersedePolicy;
    use crate::engine::orbital::selection::ActiveNode;
    use crate::strategy::dispatch::StrategyRequestEvent;
    use crate::strategy::lifecycle::StrategyPanel;
    use crate::strategy::model::{StrategyError, StrategyResult};
    use bevy::input::ButtonState;
    use bevy::input::keyboard::{Key, KeyboardInput};
    use constants::strategy::ERROR_MESSAGE;

    fn shell_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ActiveNode>()
            .insert_resource(StrategyPanel::new(SupersedePolicy::LatestIssued))
            .add_event::<KeyboardInput>()
            .add_event::<StrategyRequestEvent>()
            .add_plugins(ShellPlugin);
        app.update();
        app
    }

    fn press(app: &mut App, key_code: KeyCode, logical_key: Key) {
        app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
        app.update();
    }

    fn sent_requests(app: &mut App) -> Vec<StrategyRequestEvent> {
        app.world_mut()
            .resource_mut::<Events<StrategyRequestEvent>>()
            .drain()
            .collect()
    }

    fn visible_panels(app: &mut App) -> Vec<ShellSection> {
        let mut query = app.world_mut().query::<(&SectionPanel, &Node)>();
        query
            .iter(app.world())
            .filter(|(_, node)| node.display != Display::None)
            .map(|(panel, _)| panel.0)
            .collect()
    }

    #[test]
    fn home_panel_is_the_only_one_shown_at_start() {
        let mut app = shell_app();
        assert_eq!(visible_panels(&mut app), vec![ShellSection::Home]);
    }

    #[test]
    fn digit_keys_switch_sections_when_field_is_not_focused() {
        let mut app = shell_app();
        press(&mut app, KeyCode::Digit3, Key::Character("3".into()));
        assert_eq!(app.world().resource::<ActiveSection>().0, ShellSection::AiLab);
        assert_eq!(visible_panels(&mut app), vec![ShellSection::AiLab]);

        app.world_mut().resource_mut::<NicheInput>().focused = true;
        press(&mut app, KeyCode::Digit4, Key::Character("4".into()));
        assert_eq!(app.world().resource::<ActiveSection>().0, ShellSection::AiLab);
        assert_eq!(app.world().resource::<NicheInput>().text, "4");
    }

    #[test]
    fn enter_submits_trimmed_niche_once() {
        let mut app = shell_app();
        app.world_mut().resource_mut::<NicheInput>().focused = true;
        for c in ["S", "a", "a", "S"] {
            press(&mut app, KeyCode::KeyA, Key::Character(c.into()));
        }
        press(&mut app, KeyCode::Space, Key::Space);
        sent_requests(&mut app);

        press(&mut app, KeyCode::Enter, Key::Enter);
        assert_eq!(
            sent_requests(&mut app),
            vec![StrategyRequestEvent {
                niche: "SaaS".into()
            }]
        );
    }

    #[test]
    fn submit_is_ignored_while_loading_or_blank() {
        let mut app = shell_app();
        app.world_mut().resource_mut::<NicheInput>().focused = true;
        press(&mut app, KeyCode::Enter, Key::Enter);
        assert!(sent_requests(&mut app).is_empty());

        app.world_mut().resource_mut::<NicheInput>().text = "cafe".into();
        app.world_mut()
            .resource_mut::<StrategyPanel>()
            .begin("other");
        press(&mut app, KeyCode::Enter, Key::Enter);
        assert!(sent_requests(&mut app).is_empty());
    }

    #[test]
    fn escape_blurs_the_field() {
        let mut app = shell_app();
        app.world_mut().resource_mut::<NicheInput>().focused = true;
        press(&mut app, KeyCode::Escape, Key::Escape);
        assert!(!app.world().resource::<NicheInput>().focused);
    }

    fn status_text(app: &mut App) -> String {
        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<StrategyStatusText>>();
        query
            .single(app.world())
            .map(|text| text.0.clone())
            .unwrap_or_default()
    }

    fn cards_shown(app: &mut App) -> bool {
        let mut query = app
            .world_mut()
            .query_filtered::<&Node, With<StrategyResultCards>>();
        query
            .single(app.world())
            .map(|node| node.display != Display::None)
            .unwrap_or(false)
    }

    #[test]
    fn lifecycle_is_mirrored_in_status_and_cards() {
        let mut app = shell_app();
        assert!(!cards_shown(&mut app));

        let ticket = app
            .world_mut()
            .resource_mut::<StrategyPanel>()
            .begin("cafe")
            .expect("ticket");
        app.update();
        assert_eq!(status_text(&mut app), "Analizando el nicho...");
        assert!(!cards_shown(&mut app));

        app.world_mut().resource_mut::<StrategyPanel>().settle(
            &ticket,
            Ok(StrategyResult {
                headline: "Sabor que vende".into(),
                key_points: ["a".into(), "b".into(), "c".into()],
                call_to_action: "Pide ya".into(),
            }),
        );
        app.update();
        assert_eq!(status_text(&mut app), "");
        assert!(cards_shown(&mut app));

        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<HeadlineText>>();
        let headline = query.single(app.world()).map(|t| t.0.clone());
        assert_eq!(headline.ok().as_deref(), Some("Sabor que vende"));

        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<CallToActionText>>();
        let cta = query.single(app.world()).map(|t| t.0.clone());
        assert_eq!(cta.ok().as_deref(), Some("\"Pide ya\""));

        let retry = app
            .world_mut()
            .resource_mut::<StrategyPanel>()
            .begin("cafe")
            .expect("ticket");
        app.world_mut()
            .resource_mut::<StrategyPanel>()
            .settle(&retry, Err(StrategyError::EmptyResponse));
        app.update();
        assert_eq!(status_text(&mut app), ERROR_MESSAGE);
        assert!(!cards_shown(&mut app));
    }
}
