//! Combat module: health/damage wiring
//!
//! ECS ответственность:
//! - Health state, point damage, surface multipliers
//! - Events: PointDamage (оружие → health), HealthChanged (health → подписчики)
//!
//! Кто стреляет и куда попал — crate::weapon.

use bevy::prelude::*;

pub mod damage;


pub use damage::{
    apply_point_damage, damage_for_surface, HealthChanged, Hurtbox, PhysicalSurface, PointDamage,
    SurfaceKind, VULNERABLE_DAMAGE_MULTIPLIER,
};

use crate::GameplaySet;

/// Combat Plugin
///
/// Регистрирует damage события и применение урона (GameplaySet::Damage).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointDamage>()
            .add_event::<HealthChanged>()
            .add_systems(Update, apply_point_damage.in_set(GameplaySet::Damage));
    }
}
