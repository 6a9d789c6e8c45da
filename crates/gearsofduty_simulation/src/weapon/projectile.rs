//! Projectile weapon: вместо trace'а спавнит projectile из дула
//!
//! Projectile летит по своему forward со скоростью kind'а и
//! despawn'ится по истечении lifespan. Взрыв/impact не моделируется.

use bevy::prelude::*;

use super::components::{FireRequest, ProjectileLauncher, WeaponOwner, WeaponStats};
use super::definitions::ProjectileKind;
use crate::components::EyeViewpoint;
use crate::logger::log;

/// Летящий projectile
#[derive(Component, Debug, Clone)]
#[require(Transform)]
pub struct Projectile {
    pub kind: String,
    pub instigator: Entity,
    pub velocity: Vec3,
    pub lifespan: Timer,
}

impl Projectile {
    pub fn new(kind: &ProjectileKind, instigator: Entity, rotation: Quat) -> Self {
        Self {
            kind: kind.name.clone(),
            instigator,
            velocity: rotation * Vec3::NEG_Z * kind.speed,
            lifespan: Timer::from_seconds(kind.lifespan.max(0.0), TimerMode::Once),
        }
    }
}

/// Event: projectile выпущен
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileLaunched {
    pub projectile: Entity,
    pub weapon: Entity,
    pub instigator: Entity,
    pub location: Vec3,
    pub rotation: Quat,
}

/// Система: FireRequest → spawn projectile в дуле, ориентация = eye rotation
pub fn fire_projectile_weapons(
    mut commands: Commands,
    mut requests: EventReader<FireRequest>,
    launchers: Query<(Option<&WeaponOwner>, &WeaponStats, &ProjectileLauncher)>,
    owners: Query<&EyeViewpoint>,
    mut launched_events: EventWriter<ProjectileLaunched>,
) {
    for request in requests.read() {
        let Ok((owner, stats, launcher)) = launchers.get(request.weapon) else {
            continue;
        };

        let Some(&WeaponOwner(instigator)) = owner else {
            log(&format!("Fire: launcher {:?} has no owner, skipped", request.weapon));
            continue;
        };

        let Some(kind) = &launcher.projectile else {
            log(&format!("Fire: launcher {:?} has no projectile kind, skipped", request.weapon));
            continue;
        };

        let Ok(eye) = owners.get(instigator) else {
            continue;
        };

        let location = eye.location + eye.rotation * stats.muzzle_offset;
        let projectile = commands
            .spawn((
                Projectile::new(kind, instigator, eye.rotation),
                Transform::from_translation(location).with_rotation(eye.rotation),
                Name::new(kind.name.clone()),
            ))
            .id();

        log(&format!(
            "🚀 {:?} launched {} ({:?}) at {:?}",
            instigator, kind.name, projectile, location
        ));

        launched_events.write(ProjectileLaunched {
            projectile,
            weapon: request.weapon,
            instigator,
            location,
            rotation: eye.rotation,
        });
    }
}

/// Система: полёт + despawn по lifespan
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    time: Res<Time>,
) {
    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        transform.translation += projectile.velocity * time.delta_secs();

        projectile.lifespan.tick(time.delta());
        if projectile.lifespan.finished() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_velocity_follows_rotation() {
        let kind = ProjectileKind {
            name: "Grenade".into(),
            speed: 20.0,
            lifespan: 1.0,
        };
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let projectile = Projectile::new(&kind, Entity::PLACEHOLDER, rotation);

        // yaw +90° → forward = -X
        assert!(projectile.velocity.abs_diff_eq(Vec3::new(-20.0, 0.0, 0.0), 1e-4));
    }
}
