//! Character domain — player/bot pawn: input, loadout, view, death
//!
//! # Архитектура
//!
//! **Input → intents (GameplaySet::Input):**
//! - CharacterInput → MovementInput / ViewRotation / CrouchState / CameraView
//! - StartFire/StopFire → FireControl текущего оружия
//! - SwitchWeapon → SwitchWeaponIntent → process_weapon_switch
//!
//! **Lifecycle (GameplaySet::Lifecycle):**
//! - HealthChanged(health ≤ 0) → Dead → CharacterDied → DespawnAfter
//!
//! **View:** eye viewpoint и высота головы (после movement), FOV interpolation (конец кадра).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};

pub mod death;
pub mod input;
pub mod loadout;
pub mod view;


pub use death::{despawn_after_timeout, handle_health_changed, CharacterDied, DespawnAfter};
pub use input::{apply_character_input, sync_body_rotation, CharacterAction, CharacterInput};
pub use loadout::{
    equip_starting_weapons, process_weapon_switch, CurrentWeapon, LoadoutSlot, SwitchWeaponIntent,
    WeaponEquipped, WeaponLoadout,
};
pub use view::{interpolate_field_of_view, sync_hurtbox_heights, update_eye_viewpoints};

use crate::combat::{Hurtbox, PhysicalSurface, SurfaceKind};
use crate::components::{CameraView, Character, PlayerController};
use crate::config::CharacterTuning;
use crate::physics::{HitSphere, KinematicController};
use crate::GameplaySet;

/// Радиус тела (капсула / hit sphere)
pub const BODY_RADIUS: f32 = 0.4;
/// Полувысота цилиндрической части капсулы
pub const BODY_HALF_HEIGHT: f32 = 0.5;
/// Hit sphere торса для headless trace (центр над ногами, ниже головы)
pub const TORSO_RADIUS: f32 = 0.6;
pub const TORSO_CENTER_HEIGHT: f32 = 0.8;
/// Радиус головы (уязвимый hurtbox)
pub const HEAD_RADIUS: f32 = 0.2;

/// Character Plugin
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CharacterInput>()
            .add_event::<SwitchWeaponIntent>()
            .add_event::<WeaponEquipped>()
            .add_event::<CharacterDied>()
            .add_systems(
                Update,
                (
                    equip_starting_weapons,
                    apply_character_input,
                    process_weapon_switch,
                    sync_body_rotation,
                )
                    .chain()
                    .in_set(GameplaySet::Input),
            )
            .add_systems(
                Update,
                (update_eye_viewpoints, sync_hurtbox_heights)
                    .after(crate::physics::ground_detection)
                    .in_set(GameplaySet::Movement),
            )
            .add_systems(
                Update,
                (handle_health_changed, despawn_after_timeout)
                    .chain()
                    .in_set(GameplaySet::Lifecycle),
            )
            .add_systems(Update, interpolate_field_of_view.in_set(GameplaySet::View));
    }
}

/// Spawn персонажа: тело + голова (уязвимый hurtbox) + loadout
///
/// Стартовое оружие появляется в первом кадре (`equip_starting_weapons`).
pub fn spawn_character(
    commands: &mut Commands,
    position: Vec3,
    loadout: WeaponLoadout,
    tuning: &CharacterTuning,
    controller: Option<PlayerController>,
) -> Entity {
    let mut character = commands.spawn((
        Character,
        Transform::from_translation(position),
        KinematicController::from_tuning(tuning),
        CameraView::from_tuning(tuning),
        loadout,
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(BODY_HALF_HEIGHT, BODY_RADIUS),
        HitSphere::new(TORSO_RADIUS).with_offset(Vec3::Y * TORSO_CENTER_HEIGHT),
        PhysicalSurface(SurfaceKind::FleshDefault),
        Name::new("Character"),
    ));
    if let Some(controller) = controller {
        character.insert(controller);
    }
    let entity = character.id();

    commands.spawn((
        Transform::from_xyz(0.0, tuning.eye_height, 0.0),
        Collider::ball(HEAD_RADIUS),
        HitSphere::new(HEAD_RADIUS),
        PhysicalSurface(SurfaceKind::FleshVulnerable),
        Hurtbox { owner: entity },
        Name::new("Head"),
        ChildOf(entity),
    ));

    entity
}
