//! Weapon domain — fire cadence, hit-scan, projectile, cosmetic effects
//!
//! # Архитектура
//!
//! - `FireControl` (cadence) → `FireRequest` events (один на выстрел)
//! - `HitScanWeapon` → line trace → PointDamage + CosmeticEffect
//! - `ProjectileLauncher` → spawn Projectile из дула
//!
//! Все системы в GameplaySet::Weapons, строго по порядку:
//! tick_fire_controls → fire_hitscan_weapons → fire_projectile_weapons → advance_projectiles

use bevy::prelude::*;

pub mod components;
pub mod definitions;
pub mod effects;
pub mod hitscan;
pub mod projectile;

#[cfg(test)]
mod weapon_tests;

pub use components::{
    FireControl, FireRequest, HitScanWeapon, ProjectileLauncher, Weapon, WeaponCosmetics,
    WeaponOwner, WeaponStats,
};
pub use definitions::{
    EffectId, FireMode, ProjectileKind, WeaponDefinition, WeaponDefinitions, WeaponEffects,
    WeaponId, DEFAULT_MAX_RANGE, MUZZLE_SOCKET, TRACER_TARGET_PARAM,
};
pub use effects::{impact_rotation, CosmeticEffect, DEBUG_LINE_LIFETIME};
pub use hitscan::{fire_hitscan_weapons, resolve_shot, ResolvedHit, ShotFired, ShotOutcome};
pub use projectile::{advance_projectiles, fire_projectile_weapons, Projectile, ProjectileLaunched};

use crate::components::Attachment;
use crate::GameplaySet;

/// Weapon Plugin
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireRequest>()
            .add_event::<ShotFired>()
            .add_event::<CosmeticEffect>()
            .add_event::<ProjectileLaunched>()
            .add_systems(
                Update,
                (
                    tick_fire_controls,
                    fire_hitscan_weapons,
                    fire_projectile_weapons,
                    advance_projectiles,
                )
                    .chain()
                    .in_set(GameplaySet::Weapons),
            );
    }
}

/// Система: FireControl timers → FireRequest (по одному на выстрел)
pub fn tick_fire_controls(
    mut weapons: Query<(Entity, &mut FireControl)>,
    time: Res<Time>,
    mut requests: EventWriter<FireRequest>,
) {
    for (weapon, mut control) in weapons.iter_mut() {
        control.tick(time.delta());

        for _ in 0..control.take_queued() {
            requests.write(FireRequest { weapon });
        }
    }
}

/// Spawn оружия из definition как child владельца
///
/// Оружие крепится к сокету WeaponSocket; owner = non-owning back-reference.
pub fn spawn_weapon(
    commands: &mut Commands,
    owner: Entity,
    id: &WeaponId,
    definition: &WeaponDefinition,
) -> Entity {
    let mut weapon = commands.spawn((
        Weapon { id: id.clone() },
        FireControl::new(definition.fire_period),
        WeaponStats::from_definition(definition),
        WeaponCosmetics::from_definition(definition),
        WeaponOwner(owner),
        Attachment::weapon(),
        Name::new(definition.name.clone()),
        ChildOf(owner),
    ));
    definition.fire_mode.insert_into(&mut weapon);

    weapon.id()
}
