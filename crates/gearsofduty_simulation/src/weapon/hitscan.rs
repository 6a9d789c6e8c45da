//! Hit-scan fire: один line trace на выстрел
//!
//! Flow (на каждый FireRequest):
//! 1. Eye viewpoint владельца → trace до max_range (игнорируя владельца и оружие)
//! 2. Hit → surface → урон (x4 по FleshVulnerable) → PointDamage
//! 3. Косметика: impact / muzzle flash / tracer / camera shake
//!
//! Нет владельца → выстрел no-op.

use bevy::prelude::*;

use super::components::{FireRequest, HitScanWeapon, WeaponCosmetics, WeaponOwner, WeaponStats};
use super::effects::{impact_rotation, CosmeticEffect, DEBUG_LINE_LIFETIME};
use crate::combat::{damage_for_surface, Hurtbox, PointDamage, SurfaceKind};
use crate::components::{EyeViewpoint, PlayerController};
use crate::config::GameplayConfig;
use crate::logger::log;
use crate::physics::{SceneQuery, TraceHit};

/// Попадание после резолва урона
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHit {
    /// Кто получает урон (владелец hurtbox'а, если попали в hurtbox)
    pub target: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub surface: SurfaceKind,
    pub damage: f32,
}

/// Результат одного выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotOutcome {
    /// Куда рисовать tracer (impact point или дальний конец луча)
    pub tracer_end: Vec3,
    pub hit: Option<ResolvedHit>,
}

/// Резолв выстрела по результату trace'а (без ECS)
pub fn resolve_shot(
    eye_location: Vec3,
    direction: Vec3,
    max_range: f32,
    base_damage: f32,
    trace: Option<TraceHit>,
) -> ShotOutcome {
    let Some(trace) = trace else {
        return ShotOutcome {
            tracer_end: eye_location + direction * max_range,
            hit: None,
        };
    };

    ShotOutcome {
        tracer_end: trace.point,
        hit: Some(ResolvedHit {
            target: trace.entity,
            point: trace.point,
            normal: trace.normal,
            surface: trace.surface,
            damage: damage_for_surface(base_damage, trace.surface),
        }),
    }
}

/// Event: оружие выстрелило (для статистики / звука / AI)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShotFired {
    pub weapon: Entity,
    pub shooter: Entity,
    pub tracer_end: Vec3,
    /// Кто получил урон (None = промах или неживая поверхность без Health)
    pub hit: Option<Entity>,
    pub damage: f32,
}

/// Система: FireRequest → trace → урон + косметика
pub fn fire_hitscan_weapons(
    mut requests: EventReader<FireRequest>,
    weapons: Query<(Option<&WeaponOwner>, &WeaponStats, Option<&WeaponCosmetics>), With<HitScanWeapon>>,
    owners: Query<(&EyeViewpoint, Option<&PlayerController>)>,
    hurtboxes: Query<&Hurtbox>,
    scene: SceneQuery,
    config: Res<GameplayConfig>,
    mut damage_events: EventWriter<PointDamage>,
    mut effect_events: EventWriter<CosmeticEffect>,
    mut shot_events: EventWriter<ShotFired>,
) {
    for request in requests.read() {
        let Ok((owner, stats, cosmetics)) = weapons.get(request.weapon) else {
            continue;
        };

        let Some(&WeaponOwner(shooter)) = owner else {
            log(&format!("Fire: weapon {:?} has no owner, skipped", request.weapon));
            continue;
        };

        let Ok((eye, controller)) = owners.get(shooter) else {
            log(&format!(
                "Fire: owner {:?} of weapon {:?} has no eye viewpoint, skipped",
                shooter, request.weapon
            ));
            continue;
        };

        let direction = eye.forward();
        let trace_end = eye.location + direction * stats.max_range;
        let trace = scene
            .line_trace(eye.location, trace_end, &[shooter, request.weapon])
            .map(|hit| TraceHit {
                entity: hurtboxes.get(hit.entity).map_or(hit.entity, |hurtbox| hurtbox.owner),
                ..hit
            });

        let outcome = resolve_shot(eye.location, direction, stats.max_range, stats.base_damage, trace);

        if config.weapon_debug.draw_traces {
            effect_events.write(CosmeticEffect::DebugLine {
                start: eye.location,
                end: trace_end,
                lifetime: DEBUG_LINE_LIFETIME,
            });
        }

        if let Some(hit) = outcome.hit {
            damage_events.write(PointDamage {
                target: hit.target,
                amount: hit.damage,
                direction,
                hit_point: hit.point,
                surface: hit.surface,
                instigator: Some(shooter),
                causer: request.weapon,
            });

            if let Some(effect) = cosmetics.and_then(|c| c.effects.impact_for(hit.surface)) {
                effect_events.write(CosmeticEffect::Impact {
                    effect: effect.clone(),
                    location: hit.point,
                    rotation: impact_rotation(hit.normal),
                });
            }
        }

        if let Some(cosmetics) = cosmetics {
            if let Some(effect) = &cosmetics.effects.muzzle_flash {
                effect_events.write(CosmeticEffect::MuzzleFlash {
                    weapon: request.weapon,
                    effect: effect.clone(),
                    socket: cosmetics.muzzle_socket.clone(),
                });
            }

            if let Some(effect) = &cosmetics.effects.tracer {
                effect_events.write(CosmeticEffect::Tracer {
                    effect: effect.clone(),
                    origin: eye.location + eye.rotation * stats.muzzle_offset,
                    target_param: cosmetics.tracer_target_param.clone(),
                    target: outcome.tracer_end,
                });
            }

            if let (Some(controller), Some(effect)) = (controller, &cosmetics.effects.camera_shake) {
                effect_events.write(CosmeticEffect::CameraShake {
                    player_id: controller.player_id,
                    effect: effect.clone(),
                });
            }
        }

        shot_events.write(ShotFired {
            weapon: request.weapon,
            shooter,
            tracer_end: outcome.tracer_end,
            hit: outcome.hit.map(|hit| hit.target),
            damage: outcome.hit.map_or(0.0, |hit| hit.damage),
        });
    }
}
