//! Weapon components — runtime state оружия
//!
//! Weapon entity = child персонажа (ChildOf), owner back-reference через WeaponOwner.
//! Статические данные копируются из WeaponDefinition при spawn'е.

use bevy::prelude::*;
use std::time::Duration;

use super::definitions::{FireMode, ProjectileKind, WeaponDefinition, WeaponEffects, WeaponId};

/// Маркер оружия + id definition
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, FireControl)]
pub struct Weapon {
    pub id: WeaponId,
}

/// Числовые параметры выстрела
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponStats {
    pub base_damage: f32,
    pub max_range: f32,
    /// Дуло относительно глаз стрелка (view space)
    pub muzzle_offset: Vec3,
}

impl WeaponStats {
    pub fn from_definition(definition: &WeaponDefinition) -> Self {
        Self {
            base_damage: definition.base_damage,
            max_range: definition.max_range,
            muzzle_offset: definition.muzzle_offset(),
        }
    }
}

/// Косметика оружия (handles + имена сокетов/параметров)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponCosmetics {
    pub muzzle_socket: String,
    pub tracer_target_param: String,
    pub effects: WeaponEffects,
}

impl WeaponCosmetics {
    pub fn from_definition(definition: &WeaponDefinition) -> Self {
        Self {
            muzzle_socket: definition.muzzle_socket.clone(),
            tracer_target_param: definition.tracer_target_param.clone(),
            effects: definition.effects.clone(),
        }
    }
}

/// Владелец оружия (non-owning; владение = ChildOf иерархия)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct WeaponOwner(pub Entity);

/// Маркер: выстрел = line trace
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct HitScanWeapon;

/// Выстрел = spawn projectile (None → выстрел no-op)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProjectileLauncher {
    pub projectile: Option<ProjectileKind>,
}

impl FireMode {
    /// Вставляет marker-компонент режима в entity
    pub fn insert_into(&self, entity: &mut EntityCommands) {
        match self {
            FireMode::HitScan => {
                entity.insert(HitScanWeapon);
            }
            FireMode::Projectile { projectile } => {
                entity.insert(ProjectileLauncher {
                    projectile: projectile.clone(),
                });
            }
        }
    }
}

/// Fire cadence: StartFire → выстрел сразу + repeat каждые `period` до StopFire
///
/// Timer существует только между start_fire и stop_fire.
/// `queued` — выстрелы, которые ещё не превращены в FireRequest.
#[derive(Component, Debug, Clone, Default)]
pub struct FireControl {
    /// Время между выстрелами (сек); 0 = одиночный выстрел на нажатие
    pub period: f32,
    pub schedule: Option<Timer>,
    pub queued: u32,
    /// start_fire в этом кадре: первый tick пропускается
    just_started: bool,
}

impl FireControl {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            ..default()
        }
    }

    /// Немедленный выстрел + (пере)запуск repeating timer'а
    ///
    /// Повторный вызов заменяет расписание, не добавляет второе.
    pub fn start_fire(&mut self) {
        self.queued = self.queued.max(1);
        self.just_started = true;
        self.schedule = (self.period > 0.0)
            .then(|| Timer::from_seconds(self.period, TimerMode::Repeating));
    }

    /// Отменяет repeating timer; немедленный выстрел этого кадра всё равно происходит
    pub fn stop_fire(&mut self) {
        self.schedule = None;
        self.just_started = false;
    }

    pub fn is_firing(&self) -> bool {
        self.schedule.is_some()
    }

    pub fn tick(&mut self, delta: Duration) {
        if std::mem::take(&mut self.just_started) {
            return;
        }

        let Some(schedule) = self.schedule.as_mut() else {
            return;
        };

        schedule.tick(delta);
        self.queued += schedule.times_finished_this_tick();
    }

    /// Забирает накопленные выстрелы
    pub fn take_queued(&mut self) -> u32 {
        std::mem::take(&mut self.queued)
    }
}

/// Event: один выстрел оружия (Fire)
///
/// Пишется tick_fire_controls из FireControl; можно писать напрямую.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest {
    pub weapon: Entity,
}
