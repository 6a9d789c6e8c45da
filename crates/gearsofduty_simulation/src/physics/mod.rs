//! Physics simulation module
//!
//! Kinematic контроллер персонажей + line trace (scene query) для оружия.

use bevy::prelude::*;

pub mod movement;
pub mod trace;

pub use movement::{
    apply_gravity, apply_jump_intents, apply_movement_input, ground_detection,
    horizontal_velocity, integrate_velocity_to_transform, JumpIntent, KinematicController,
    MovementInput, PhysicsBody, FLOOR_HEIGHT,
};
pub use trace::{HitSphere, SceneQuery, TraceHit};

use crate::GameplaySet;

/// Plugin для kinematic контроллера
///
/// Порядок: jump → input → gravity → integrate → ground.
pub struct KinematicControllerPlugin;

impl Plugin for KinematicControllerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpIntent>().add_systems(
            Update,
            (
                apply_jump_intents,
                apply_movement_input,
                apply_gravity,
                integrate_velocity_to_transform,
                ground_detection,
            )
                .chain()
                .in_set(GameplaySet::Movement),
        );
    }
}
