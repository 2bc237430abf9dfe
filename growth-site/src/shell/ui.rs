use bevy::prelude::*;

use constants::palette::{ACCENT, BACKGROUND, BORDER, MUTED, SURFACE, TEXT};
use constants::projects::{BRAND_NAME, CONTACT_EMAIL, PROJECTS, Project};
use constants::render_settings::ECOSYSTEM_VIEWPORT_WIDTH_FRACTION;
use constants::strategy::{INPUT_PLACEHOLDER, KEY_POINT_COUNT};

use super::state::*;

const NAV_HEIGHT: f32 = 64.0;

fn text(value: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn button_node(padding_x: f32) -> Node {
    Node {
        padding: UiRect::axes(Val::Px(padding_x), Val::Px(12.0)),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

/// Navbar plus the four content panels, laid out over the hero background and
/// left of the ecosystem viewport.
pub fn spawn_shell_ui(mut commands: Commands, section: Res<ActiveSection>) {
    let content_width = (1.0 - ECOSYSTEM_VIEWPORT_WIDTH_FRACTION) * 100.0;

    commands
        .spawn((
            ShellRoot,
            Name::new("Shell"),
            Node {
                width: Val::Percent(content_width),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|root| {
            spawn_navbar(root);

            root.spawn(Node {
                flex_grow: 1.0,
                padding: UiRect::axes(Val::Px(48.0), Val::Px(32.0)),
                overflow: Overflow::clip(),
                ..default()
            })
            .with_children(|body| {
                for panel in ShellSection::ALL {
                    let display = if panel == section.0 {
                        Display::Flex
                    } else {
                        Display::None
                    };
                    body.spawn((
                        SectionPanel(panel),
                        Name::new(format!("{}Panel", panel.label())),
                        Node {
                            display,
                            width: Val::Percent(100.0),
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(20.0),
                            ..default()
                        },
                    ))
                    .with_children(|content| match panel {
                        ShellSection::Home => spawn_home(content),
                        ShellSection::Projects => spawn_projects(content),
                        ShellSection::AiLab => spawn_ai_lab(content),
                        ShellSection::Contact => spawn_contact(content),
                    });
                }
            });
        });
}

fn spawn_navbar(root: &mut ChildSpawnerCommands) {
    root.spawn((
        Name::new("Navbar"),
        BackgroundColor(BACKGROUND.with_alpha(0.8)),
        BorderColor(BORDER),
        Node {
            height: Val::Px(NAV_HEIGHT),
            padding: UiRect::horizontal(Val::Px(24.0)),
            border: UiRect::bottom(Val::Px(1.0)),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        },
    ))
    .with_children(|nav| {
        nav.spawn(text("PORTFOLIO 4.0", 12.0, MUTED));
        nav.spawn(text(BRAND_NAME, 24.0, TEXT));
        nav.spawn(Node {
            column_gap: Val::Px(20.0),
            ..default()
        })
        .with_children(|links| {
            for (index, section) in ShellSection::ALL.into_iter().enumerate() {
                links
                    .spawn((
                        NavLink(section),
                        Button,
                        BackgroundColor(Color::NONE),
                        Node {
                            padding: UiRect::axes(Val::Px(6.0), Val::Px(4.0)),
                            ..default()
                        },
                    ))
                    .with_children(|link| {
                        link.spawn((
                            NavbarLabel(section),
                            text(format!("{} {}", index + 1, section.label()), 14.0, MUTED),
                        ));
                    });
            }
        });
    });
}

fn spawn_home(content: &mut ChildSpawnerCommands) {
    content.spawn(text("GROWTH & DEVELOPMENT AGENCY", 16.0, ACCENT));
    content.spawn(text("Diseñamos el\nFuturo Digital.", 64.0, TEXT));
    content.spawn(text(
        "Especialistas en Landing Pages de alta conversión y Sitios Web corporativos. \
         Combinamos estética dark minimalista con estrategias de crecimiento agresivas.",
        20.0,
        MUTED,
    ));
    content
        .spawn(Node {
            column_gap: Val::Px(20.0),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                NavLink(ShellSection::Projects),
                Button,
                BackgroundColor(Color::WHITE),
                BorderColor(Color::WHITE),
                button_node(32.0),
            ))
            .with_children(|button| {
                button.spawn(text("VER PROYECTOS  →", 16.0, Color::BLACK));
            });
            row.spawn((
                NavLink(ShellSection::Contact),
                Button,
                BackgroundColor(Color::BLACK.with_alpha(0.3)),
                BorderColor(BORDER),
                button_node(32.0),
            ))
            .with_children(|button| {
                button.spawn(text("CONTACTAR", 16.0, TEXT));
            });
        });
}

fn spawn_projects(content: &mut ChildSpawnerCommands) {
    content
        .spawn((
            BorderColor(BORDER),
            Node {
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::FlexEnd,
                padding: UiRect::bottom(Val::Px(16.0)),
                border: UiRect::bottom(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|header| {
            header
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|titles| {
                    titles.spawn(text("Trabajos Seleccionados", 36.0, TEXT));
                    titles.spawn(text("Landing Pages y Sitios Web que convierten.", 16.0, MUTED));
                });
            header.spawn(text("// 2023 - 2024", 14.0, ACCENT));
        });

    content
        .spawn(Node {
            flex_wrap: FlexWrap::Wrap,
            column_gap: Val::Px(24.0),
            row_gap: Val::Px(24.0),
            ..default()
        })
        .with_children(|grid| {
            for project in PROJECTS {
                spawn_project_card(grid, project);
            }
        });
}

fn spawn_project_card(grid: &mut ChildSpawnerCommands, project: &Project) {
    grid.spawn((
        Name::new(format!("Project{}", project.id)),
        BackgroundColor(SURFACE),
        BorderColor(BORDER),
        Node {
            width: Val::Percent(47.0),
            padding: UiRect::all(Val::Px(20.0)),
            border: UiRect::all(Val::Px(1.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(10.0),
            ..default()
        },
    ))
    .with_children(|card| {
        card.spawn(text(project.category.label().to_uppercase(), 11.0, ACCENT));
        card.spawn(text(project.title, 22.0, TEXT));
        card.spawn(text(project.description, 14.0, MUTED));
        card.spawn(Node {
            column_gap: Val::Px(8.0),
            flex_wrap: FlexWrap::Wrap,
            ..default()
        })
        .with_children(|tags| {
            for tag in project.tags {
                tags.spawn((
                    BorderColor(BORDER),
                    Node {
                        padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|chip| {
                    chip.spawn(text(*tag, 11.0, MUTED));
                });
            }
        });
    });
}

fn spawn_ai_lab(content: &mut ChildSpawnerCommands) {
    content.spawn(text("✦ KN INTELLIGENCE 4.0", 12.0, ACCENT));
    content.spawn(text("Generador de Estructura Web", 40.0, TEXT));
    content.spawn(text(
        "Introduce el nicho de tu negocio. Nuestra IA diseñará la estructura de \
         conversión perfecta para tu Landing Page en segundos.",
        16.0,
        MUTED,
    ));

    content
        .spawn((
            BackgroundColor(SURFACE),
            BorderColor(BORDER),
            Node {
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|row| {
            row.spawn((
                NicheField,
                Button,
                BackgroundColor(Color::NONE),
                BorderColor(Color::NONE),
                Node {
                    flex_grow: 1.0,
                    padding: UiRect::axes(Val::Px(16.0), Val::Px(12.0)),
                    border: UiRect::bottom(Val::Px(1.0)),
                    ..default()
                },
            ))
            .with_children(|field| {
                field.spawn((
                    NicheFieldText,
                    text(INPUT_PLACEHOLDER, 16.0, MUTED.with_alpha(0.5)),
                ));
            });

            row.spawn((
                GenerateButton,
                Button,
                BackgroundColor(Color::WHITE.with_alpha(0.5)),
                BorderColor(Color::NONE),
                button_node(32.0),
            ))
            .with_children(|button| {
                button.spawn((GenerateLabel, text("GENERAR  ➤", 16.0, Color::BLACK)));
            });
        });

    content.spawn((StrategyStatusText, text("", 14.0, MUTED)));

    content
        .spawn((
            StrategyResultCards,
            Node {
                display: Display::None,
                column_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|cards| {
            result_card(cards, "01", "TITULAR PRINCIPAL", |body| {
                body.spawn((HeadlineText, text("", 18.0, TEXT)));
            });
            result_card(cards, "02", "ARGUMENTOS CLAVE", |body| {
                for index in 0..KEY_POINT_COUNT {
                    body.spawn((KeyPointText(index), text("", 13.0, TEXT)));
                }
            });
            result_card(cards, "03", "CALL TO ACTION", |body| {
                body.spawn((CallToActionText, text("", 20.0, TEXT)));
            });
        });
}

fn result_card(
    cards: &mut ChildSpawnerCommands,
    number: &str,
    title: &str,
    body: impl FnOnce(&mut ChildSpawnerCommands),
) {
    cards
        .spawn((
            BackgroundColor(SURFACE),
            BorderColor(BORDER),
            Node {
                flex_basis: Val::Percent(33.0),
                flex_grow: 1.0,
                padding: UiRect::all(Val::Px(20.0)),
                border: UiRect::all(Val::Px(1.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|card| {
            card.spawn(text(number, 14.0, ACCENT));
            card.spawn(text(title, 12.0, MUTED));
            body(card);
        });
}

fn spawn_contact(content: &mut ChildSpawnerCommands) {
    content.spawn(text("Let's Work\nTogether.", 56.0, TEXT));
    content.spawn(text(
        "¿Listo para escalar tu marca? Hablemos sobre cómo una landing page \
         estratégica puede cambiar tu negocio.",
        18.0,
        MUTED,
    ));
    content.spawn(text(CONTACT_EMAIL, 24.0, TEXT));
    content
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            margin: UiRect::top(Val::Px(24.0)),
            ..default()
        })
        .with_children(|footer| {
            footer.spawn(text("© KN Growth.", 13.0, MUTED));
            footer.spawn(text("Todos los derechos reservados.", 13.0, MUTED));
            footer.spawn(text(
                "Designed with Code & Intelligence.",
                11.0,
                MUTED.with_alpha(0.5),
            ));
        });
}
