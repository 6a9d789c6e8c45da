//! Damage: surface classification, point damage, health-changed notifications
//!
//! Flow:
//! 1. Оружие пишет PointDamage (target, amount, instigator, causer)
//! 2. apply_point_damage снимает Health (clamp [0, max])
//! 3. HealthChanged (health, delta, instigator, causer) → подписчики (Character death)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Health;
use crate::logger::{log, log_warning};

/// Множитель урона по уязвимой поверхности (голова)
pub const VULNERABLE_DAMAGE_MULTIPLIER: f32 = 4.0;

/// Классификация поверхности, в которую попал trace
///
/// Закрытый набор: влияет на урон и на impact-эффект.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Стены, пол, всё неживое
    #[default]
    Default,
    /// Тело
    FleshDefault,
    /// Уязвимая зона (голова) — x4 урона
    FleshVulnerable,
}

impl SurfaceKind {
    pub fn is_flesh(&self) -> bool {
        matches!(self, SurfaceKind::FleshDefault | SurfaceKind::FleshVulnerable)
    }
}

/// Физический материал collider'а (без компонента = SurfaceKind::Default)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicalSurface(pub SurfaceKind);

/// Hurtbox: collider-часть другого entity (голова персонажа)
///
/// Урон по hurtbox уходит владельцу.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub owner: Entity,
}

/// Фактический урон выстрела по поверхности
pub fn damage_for_surface(base_damage: f32, surface: SurfaceKind) -> f32 {
    match surface {
        SurfaceKind::FleshVulnerable => base_damage * VULNERABLE_DAMAGE_MULTIPLIER,
        SurfaceKind::Default | SurfaceKind::FleshDefault => base_damage,
    }
}

/// Event: point damage по конкретному entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PointDamage {
    /// Кому урон
    pub target: Entity,
    /// Сколько
    pub amount: f32,
    /// Направление выстрела
    pub direction: Vec3,
    /// Точка попадания
    pub hit_point: Vec3,
    /// Поверхность попадания
    pub surface: SurfaceKind,
    /// Кто виноват (стрелок)
    pub instigator: Option<Entity>,
    /// Чем нанесено (оружие)
    pub causer: Entity,
}

/// Event: здоровье изменилось
///
/// `delta` — запрошенный урон (положительный), как в health-компоненте движка.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub health: f32,
    pub delta: f32,
    pub instigator: Option<Entity>,
    pub causer: Option<Entity>,
}

/// Система: PointDamage → Health → HealthChanged
///
/// Target без Health урон игнорирует (стены, ящики).
/// Неположительный урон игнорируется.
pub fn apply_point_damage(
    mut damage_events: EventReader<PointDamage>,
    mut targets: Query<&mut Health>,
    mut changed_events: EventWriter<HealthChanged>,
) {
    for damage in damage_events.read() {
        if damage.amount <= 0.0 {
            continue;
        }

        let Ok(mut health) = targets.get_mut(damage.target) else {
            continue;
        };

        if !damage.amount.is_finite() {
            log_warning(&format!(
                "PointDamage: non-finite amount {} for {:?}, ignored",
                damage.amount, damage.target
            ));
            continue;
        }

        health.take_damage(damage.amount);

        log(&format!(
            "💥 {:?} took {} damage from {:?} via {:?} (HP: {}/{})",
            damage.target, damage.amount, damage.instigator, damage.causer, health.current, health.max
        ));

        changed_events.write(HealthChanged {
            entity: damage.target,
            health: health.current,
            delta: damage.amount,
            instigator: damage.instigator,
            causer: Some(damage.causer),
        });
    }
}
