//! Weapon definitions — статические blueprint'ы оружия
//!
//! # Архитектура
//!
//! **WeaponDefinition** — immutable данные (урон, темп, эффекты, режим стрельбы):
//! - Хранится в `WeaponDefinitions` resource (HashMap lookup по `WeaponId`)
//! - Hardcoded defaults в `WeaponDefinitions::default()`, можно загрузить из JSON
//!
//! **Weapon entity** — runtime экземпляр, собирается из definition в `spawn_weapon`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Имя сокета дула на меше оружия
pub const MUZZLE_SOCKET: &str = "MuzzleSocket";

/// Имя параметра tracer-эффекта, куда пишется конечная точка
pub const TRACER_TARGET_PARAM: &str = "Target";

/// Дальность hit-scan trace'а по умолчанию (world units)
pub const DEFAULT_MAX_RANGE: f32 = 10_000.0;

/// Weapon identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct WeaponId(pub String);

impl From<&str> for WeaponId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Handle косметического ассета у host'а (particle system, camera shake)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct EffectId(pub String);

impl From<&str> for EffectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Косметика оружия; любой handle может отсутствовать
#[derive(Clone, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponEffects {
    pub muzzle_flash: Option<EffectId>,
    pub tracer: Option<EffectId>,
    /// Impact по неживым поверхностям
    pub impact_default: Option<EffectId>,
    /// Impact по телу (включая уязвимые зоны)
    pub impact_flesh: Option<EffectId>,
    /// Camera shake контроллеру стрелка
    pub camera_shake: Option<EffectId>,
}

impl WeaponEffects {
    pub fn impact_for(&self, surface: crate::combat::SurfaceKind) -> Option<&EffectId> {
        if surface.is_flesh() {
            self.impact_flesh.as_ref()
        } else {
            self.impact_default.as_ref()
        }
    }
}

/// Projectile, который спавнит projectile-оружие
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ProjectileKind {
    pub name: String,
    /// Начальная скорость (units/сек)
    pub speed: f32,
    /// Время жизни (сек)
    pub lifespan: f32,
}

/// Режим стрельбы
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub enum FireMode {
    /// Мгновенный line trace
    HitScan,
    /// Спавн projectile из дула (None = не настроено, выстрел no-op)
    Projectile { projectile: Option<ProjectileKind> },
}

/// Статический blueprint оружия
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub name: String,
    pub base_damage: f32,
    /// Время между выстрелами при зажатом fire (сек); 0 = один выстрел на нажатие
    pub fire_period: f32,
    #[serde(default = "default_max_range")]
    pub max_range: f32,
    #[serde(default = "default_muzzle_socket")]
    pub muzzle_socket: String,
    /// Смещение дула от глаз стрелка (view space)
    #[serde(default)]
    pub muzzle_offset: [f32; 3],
    #[serde(default = "default_tracer_param")]
    pub tracer_target_param: String,
    #[serde(default)]
    pub effects: WeaponEffects,
    pub fire_mode: FireMode,
}

fn default_max_range() -> f32 {
    DEFAULT_MAX_RANGE
}

fn default_muzzle_socket() -> String {
    MUZZLE_SOCKET.to_string()
}

fn default_tracer_param() -> String {
    TRACER_TARGET_PARAM.to_string()
}

impl WeaponDefinition {
    /// Автомат: hit-scan, 20 урона, 600 выстрелов/мин
    pub fn rifle() -> Self {
        Self {
            name: "Rifle".into(),
            base_damage: 20.0,
            fire_period: 0.1,
            max_range: DEFAULT_MAX_RANGE,
            muzzle_socket: MUZZLE_SOCKET.into(),
            muzzle_offset: [0.2, -0.15, -0.6],
            tracer_target_param: TRACER_TARGET_PARAM.into(),
            effects: WeaponEffects {
                muzzle_flash: Some("P_MuzzleFlash".into()),
                tracer: Some("P_SmokeBeam".into()),
                impact_default: Some("P_BulletImpact".into()),
                impact_flesh: Some("P_BloodImpact".into()),
                camera_shake: Some("CS_RifleFire".into()),
            },
            fire_mode: FireMode::HitScan,
        }
    }

    /// Гранатомёт: projectile, 1 выстрел/сек
    pub fn grenade_launcher() -> Self {
        Self {
            name: "Grenade Launcher".into(),
            base_damage: 0.0,
            fire_period: 1.0,
            max_range: DEFAULT_MAX_RANGE,
            muzzle_socket: MUZZLE_SOCKET.into(),
            muzzle_offset: [0.2, -0.15, -0.8],
            tracer_target_param: TRACER_TARGET_PARAM.into(),
            effects: WeaponEffects::default(),
            fire_mode: FireMode::Projectile {
                projectile: Some(ProjectileKind {
                    name: "Grenade".into(),
                    speed: 20.0,
                    lifespan: 1.0,
                }),
            },
        }
    }

    pub fn muzzle_offset(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }
}

/// Resource: все известные оружия
#[derive(Resource, Debug, Clone)]
pub struct WeaponDefinitions {
    definitions: HashMap<WeaponId, WeaponDefinition>,
}

impl Default for WeaponDefinitions {
    fn default() -> Self {
        let mut definitions = Self::empty();
        definitions.insert("rifle".into(), WeaponDefinition::rifle());
        definitions.insert("grenade_launcher".into(), WeaponDefinition::grenade_launcher());
        definitions
    }
}

impl WeaponDefinitions {
    pub fn empty() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: WeaponId, definition: WeaponDefinition) {
        self.definitions.insert(id, definition);
    }

    pub fn get(&self, id: &WeaponId) -> Option<&WeaponDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// JSON формат: `{ "<weapon id>": WeaponDefinition, ... }`
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, WeaponDefinition> = serde_json::from_str(json)?;
        Ok(Self {
            definitions: raw
                .into_iter()
                .map(|(id, definition)| (WeaponId(id), definition))
                .collect(),
        })
    }

    /// Добавляет/перезаписывает definitions из другого набора
    pub fn merge(&mut self, other: WeaponDefinitions) {
        self.definitions.extend(other.definitions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::SurfaceKind;

    #[test]
    fn test_default_definitions() {
        let definitions = WeaponDefinitions::default();
        assert_eq!(definitions.len(), 2);

        let rifle = definitions.get(&"rifle".into()).expect("rifle");
        assert_eq!(rifle.base_damage, 20.0);
        assert_eq!(rifle.max_range, DEFAULT_MAX_RANGE);
        assert_eq!(rifle.fire_mode, FireMode::HitScan);
    }

    #[test]
    fn test_impact_effect_by_surface() {
        let effects = WeaponDefinition::rifle().effects;
        assert_eq!(effects.impact_for(SurfaceKind::Default), effects.impact_default.as_ref());
        assert_eq!(effects.impact_for(SurfaceKind::FleshDefault), effects.impact_flesh.as_ref());
        assert_eq!(effects.impact_for(SurfaceKind::FleshVulnerable), effects.impact_flesh.as_ref());
    }

    #[test]
    fn test_definitions_from_json_with_defaults() {
        let json = r#"{
            "pistol": {
                "name": "Pistol",
                "base_damage": 35.0,
                "fire_period": 0.0,
                "fire_mode": "HitScan"
            }
        }"#;

        let definitions = WeaponDefinitions::from_json_str(json).expect("valid json");
        let pistol = definitions.get(&"pistol".into()).expect("pistol");

        assert_eq!(pistol.base_damage, 35.0);
        assert_eq!(pistol.max_range, DEFAULT_MAX_RANGE);
        assert_eq!(pistol.muzzle_socket, MUZZLE_SOCKET);
        assert_eq!(pistol.tracer_target_param, TRACER_TARGET_PARAM);
        assert!(pistol.effects.muzzle_flash.is_none());
    }

    #[test]
    fn test_merge_overrides() {
        let mut definitions = WeaponDefinitions::default();
        let mut custom = WeaponDefinitions::empty();
        let mut rifle = WeaponDefinition::rifle();
        rifle.base_damage = 5.0;
        custom.insert("rifle".into(), rifle);

        definitions.merge(custom);
        assert_eq!(definitions.get(&"rifle".into()).unwrap().base_damage, 5.0);
        assert_eq!(definitions.len(), 2);
    }
}
