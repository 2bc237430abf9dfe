use bevy::prelude::*;

use constants::orbital::{BENEFITS, LABEL_ACTIVE_OFFSET, LABEL_HIDDEN_SCALE, LABEL_TRANSITION_SECS};
use constants::palette::{ACCENT, MUTED, TEXT};

use super::scene::{BenefitNode, EcosystemCamera};
use super::selection::ActiveNode;

const LABEL_WIDTH: f32 = 288.0;

/// Floating info panel for one benefit node. `progress` runs 0 (hidden) to 1 (shown).
#[derive(Component, Debug, Clone, Copy)]
pub struct NodeLabel {
    pub id: u32,
    pub progress: f32,
}

/// UI element whose alpha follows its label's transition.
#[derive(Component, Debug, Clone, Copy)]
pub struct FadesWithLabel {
    pub id: u32,
    pub base_alpha: f32,
}

/// Presentation state of a label for an eased transition value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub opacity: f32,
    pub scale: f32,
    /// Offset along world x from the node origin.
    pub offset: f32,
}

/// Advance a label's transition linearly towards shown or hidden.
pub fn step_label_progress(progress: f32, active: bool, dt: f32) -> f32 {
    let step = dt / LABEL_TRANSITION_SECS;
    if active {
        (progress + step).min(1.0)
    } else {
        (progress - step).max(0.0)
    }
}

pub fn ease_out_cubic(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

pub fn label_style(progress: f32) -> LabelStyle {
    let eased = ease_out_cubic(progress);
    LabelStyle {
        opacity: eased,
        scale: LABEL_HIDDEN_SCALE + (1.0 - LABEL_HIDDEN_SCALE) * eased,
        offset: LABEL_ACTIVE_OFFSET * eased,
    }
}

/// Project a world point through `clip_from_world` into logical viewport pixels (y down).
/// Points behind the camera give `None`.
pub fn project_to_viewport(clip_from_world: Mat4, world: Vec3, viewport: Vec2) -> Option<Vec2> {
    let clip = clip_from_world * world.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}

pub fn spawn_node_labels(commands: &mut Commands, camera: Entity) {
    commands
        .spawn((
            Name::new("EcosystemOverlay"),
            UiTargetCamera(camera),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Px(32.0),
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(8.0),
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|header| {
                    header.spawn((
                        Text::new("SYSTEM CORE"),
                        TextFont {
                            font_size: 10.0,
                            ..default()
                        },
                        TextColor(ACCENT),
                        Pickable::IGNORE,
                    ));
                    header.spawn((
                        Text::new("The KN Ecosystem"),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(TEXT),
                        Pickable::IGNORE,
                    ));
                });

            overlay.spawn((
                Text::new("HOVER NODES TO EXPLORE"),
                TextFont {
                    font_size: 10.0,
                    ..default()
                },
                TextColor(TEXT.with_alpha(0.4)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(28.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                TextLayout::new_with_justify(JustifyText::Center),
                Pickable::IGNORE,
            ));

            for benefit in BENEFITS {
                let id = benefit.id;
                overlay
                    .spawn((
                        Name::new(format!("NodeLabel{id}")),
                        NodeLabel { id, progress: 0.0 },
                        FadesWithLabel {
                            id,
                            base_alpha: 0.9,
                        },
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Px(LABEL_WIDTH),
                            padding: UiRect::all(Val::Px(16.0)),
                            border: UiRect::left(Val::Px(2.0)),
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(10.0),
                            ..default()
                        },
                        BackgroundColor(Color::BLACK.with_alpha(0.0)),
                        BorderColor(ACCENT),
                        Visibility::Hidden,
                        Transform::from_scale(Vec3::splat(LABEL_HIDDEN_SCALE)),
                        // Labels sit over their node; hits must fall through to the mesh
                        Pickable::IGNORE,
                    ))
                    .with_children(|panel| {
                        panel
                            .spawn((
                                Node {
                                    flex_direction: FlexDirection::Row,
                                    align_items: AlignItems::Center,
                                    column_gap: Val::Px(10.0),
                                    ..default()
                                },
                                Pickable::IGNORE,
                            ))
                            .with_children(|title_row| {
                                title_row
                                    .spawn((
                                        Node {
                                            width: Val::Px(24.0),
                                            height: Val::Px(24.0),
                                            justify_content: JustifyContent::Center,
                                            align_items: AlignItems::Center,
                                            ..default()
                                        },
                                        BorderRadius::MAX,
                                        BackgroundColor(ACCENT.with_alpha(0.0)),
                                        FadesWithLabel { id, base_alpha: 1.0 },
                                        Pickable::IGNORE,
                                    ))
                                    .with_children(|badge| {
                                        badge.spawn(fading_text(
                                            format!("{id:02}"),
                                            10.0,
                                            Color::WHITE,
                                            id,
                                        ));
                                    });
                                title_row.spawn(fading_text(benefit.title, 18.0, TEXT, id));
                            });
                        panel.spawn(fading_text(benefit.description, 13.0, MUTED, id));
                    });
            }
        });
}

fn fading_text(text: impl Into<String>, size: f32, color: Color, id: u32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color.with_alpha(0.0)),
        FadesWithLabel {
            id,
            base_alpha: color.alpha(),
        },
        Pickable::IGNORE,
    )
}

pub fn ease_node_labels(
    time: Res<Time>,
    active: Res<ActiveNode>,
    mut labels: Query<(&mut NodeLabel, &mut Visibility, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut label, mut visibility, mut transform) in &mut labels {
        let next = step_label_progress(label.progress, active.is_active(label.id), dt);
        if next == label.progress {
            continue;
        }
        label.progress = next;

        let style = label_style(next);
        transform.scale = Vec3::splat(style.scale);
        *visibility = if next > 0.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn fade_label_contents(
    labels: Query<&NodeLabel, Changed<NodeLabel>>,
    mut texts: Query<(&FadesWithLabel, &mut TextColor)>,
    mut backgrounds: Query<(&FadesWithLabel, &mut BackgroundColor)>,
) {
    for label in &labels {
        let opacity = label_style(label.progress).opacity;
        for (fade, mut color) in &mut texts {
            if fade.id == label.id {
                color.0.set_alpha(fade.base_alpha * opacity);
            }
        }
        for (fade, mut color) in &mut backgrounds {
            if fade.id == label.id {
                color.0.set_alpha(fade.base_alpha * opacity);
            }
        }
    }
}

/// Pin each visible label next to its node's current world position.
/// Nodes and the camera are root entities, so their local transforms are world space
/// and the labels can be placed before UI layout runs.
pub fn position_node_labels(
    cameras: Query<(&Camera, &Transform), With<EcosystemCamera>>,
    nodes: Query<(&BenefitNode, &Transform)>,
    mut labels: Query<(&NodeLabel, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(viewport) = camera.logical_viewport_size() else {
        return;
    };
    let clip_from_world = camera.clip_from_view() * camera_transform.compute_matrix().inverse();

    for (node, node_transform) in &nodes {
        let Some((label, mut style)) = labels.iter_mut().find(|(label, _)| label.id == node.id)
        else {
            continue;
        };
        if label.progress <= 0.0 {
            continue;
        }

        let offset = label_style(label.progress).offset;
        let anchor = node_transform.translation + Vec3::X * offset;
        if let Some(screen) = project_to_viewport(clip_from_world, anchor, viewport) {
            style.left = Val::Px(screen.x);
            style.top = Val::Px(screen.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::ecs::world::CommandQueue;

    #[test]
    fn overlay_never_blocks_node_picking() {
        let mut world = World::new();
        let mut queue = CommandQueue::default();
        let mut commands = Commands::new(&mut queue, &world);
        spawn_node_labels(&mut commands, Entity::PLACEHOLDER);
        queue.apply(&mut world);

        let mut labels = world.query_filtered::<Entity, With<NodeLabel>>();
        assert_eq!(labels.iter(&world).count(), BENEFITS.len());

        let mut nodes = world.query_filtered::<(Entity, Option<&Pickable>), With<Node>>();
        let blocking: Vec<Entity> = nodes
            .iter(&world)
            .filter(|(_, pickable)| pickable.is_none_or(|p| p.should_block_lower || p.is_hoverable))
            .map(|(entity, _)| entity)
            .collect();
        assert!(blocking.is_empty(), "overlay entities block picking: {blocking:?}");

        let mut fades = world.query_filtered::<Option<&Pickable>, With<FadesWithLabel>>();
        assert!(fades.iter(&world).all(|p| p == Some(&Pickable::IGNORE)));
    }

    #[test]
    fn progress_reaches_full_after_transition_time() {
        let mut progress = 0.0;
        for _ in 0..5 {
            progress = step_label_progress(progress, true, 0.1);
        }
        assert_relative_eq!(progress, 1.0, epsilon = 1e-5);
        assert_eq!(step_label_progress(progress, true, 0.1), 1.0);

        let halfway = step_label_progress(1.0, false, 0.25);
        assert_relative_eq!(halfway, 0.5);
        assert_eq!(step_label_progress(0.1, false, 1.0), 0.0);
    }

    #[test]
    fn style_endpoints_match_hidden_and_shown() {
        let hidden = label_style(0.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_relative_eq!(hidden.scale, 0.9);
        assert_eq!(hidden.offset, 0.0);

        let shown = label_style(1.0);
        assert_eq!(shown.opacity, 1.0);
        assert_relative_eq!(shown.scale, 1.0);
        assert_relative_eq!(shown.offset, 0.5);
    }

    #[test]
    fn ease_out_front_loads_motion() {
        assert!(ease_out_cubic(0.5) > 0.5);
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn projection_maps_centre_and_rejects_points_behind() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 8.5), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_infinite_reverse_rh(45f32.to_radians(), 1.0, 0.1);
        let clip_from_world = proj * view;
        let viewport = Vec2::new(400.0, 400.0);

        let centre = project_to_viewport(clip_from_world, Vec3::ZERO, viewport).expect("visible");
        assert_relative_eq!(centre.x, 200.0, epsilon = 1e-3);
        assert_relative_eq!(centre.y, 200.0, epsilon = 1e-3);

        let upper_right =
            project_to_viewport(clip_from_world, Vec3::new(1.0, 1.0, 0.0), viewport).expect("visible");
        assert!(upper_right.x > 200.0 && upper_right.y < 200.0);

        assert!(project_to_viewport(clip_from_world, Vec3::new(0.0, 0.0, 20.0), viewport).is_none());
    }
}
