//! Death: Alive → Dead (ровно один раз) + отложенное удаление трупа
//!
//! На переходе:
//! - движение останавливается сразу (input + velocity = 0)
//! - collision выключается (ColliderDisabled на теле и hurtbox'ах)
//! - контроллер отсоединяется (PlayerController удаляется)
//! - оружие перестаёт стрелять
//! - труп удаляется через corpse_lifespan секунд

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use super::loadout::CurrentWeapon;
use crate::combat::{HealthChanged, Hurtbox};
use crate::components::{LifeState, PlayerController};
use crate::config::GameplayConfig;
use crate::logger::log;
use crate::physics::{MovementInput, PhysicsBody};
use crate::weapon::FireControl;

/// Event: персонаж умер
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CharacterDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub causer: Option<Entity>,
}

/// Запланированное удаление entity (lifespan)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Elapsed time (сек), после которого entity удаляется
    pub despawn_time: f32,
}

/// Система: HealthChanged(health ≤ 0) → Dead
///
/// Повторные уведомления для мёртвого персонажа ничего не делают.
pub fn handle_health_changed(
    mut commands: Commands,
    mut health_events: EventReader<HealthChanged>,
    mut characters: Query<(
        &mut LifeState,
        &mut MovementInput,
        &mut PhysicsBody,
        Option<&CurrentWeapon>,
        Option<&PlayerController>,
    )>,
    mut fire_controls: Query<&mut FireControl>,
    hurtboxes: Query<(Entity, &Hurtbox)>,
    config: Res<GameplayConfig>,
    time: Res<Time>,
    mut died_events: EventWriter<CharacterDied>,
) {
    for event in health_events.read() {
        if event.health > 0.0 {
            continue;
        }

        let Ok((mut life, mut movement, mut body, current_weapon, controller)) =
            characters.get_mut(event.entity)
        else {
            continue;
        };

        if life.is_dead() {
            continue;
        }

        *life = LifeState::Dead;

        movement.consume();
        body.velocity = Vec3::ZERO;

        if let Some(weapon) = current_weapon.and_then(|current| current.weapon) {
            if let Ok(mut control) = fire_controls.get_mut(weapon) {
                control.stop_fire();
                control.take_queued();
            }
        }

        let mut entity = commands.entity(event.entity);
        entity.insert((
            ColliderDisabled,
            DespawnAfter {
                despawn_time: time.elapsed_secs() + config.character.corpse_lifespan,
            },
        ));
        if controller.is_some() {
            entity.remove::<PlayerController>();
        }

        for (hurtbox_entity, hurtbox) in hurtboxes.iter() {
            if hurtbox.owner == event.entity {
                commands.entity(hurtbox_entity).insert(ColliderDisabled);
            }
        }

        log(&format!(
            "💀 {:?} died (killer: {:?}, causer: {:?})",
            event.entity, event.instigator, event.causer
        ));

        died_events.write(CharacterDied {
            entity: event.entity,
            killer: event.instigator,
            causer: event.causer,
        });
    }
}

/// Система: удаление entity по истечении lifespan
pub fn despawn_after_timeout(
    mut commands: Commands,
    pending: Query<(Entity, &DespawnAfter)>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();

    for (entity, despawn) in pending.iter() {
        if now >= despawn.despawn_time {
            log(&format!("🗑️ {:?} lifespan expired, despawning", entity));
            commands.entity(entity).despawn();
        }
    }
}
