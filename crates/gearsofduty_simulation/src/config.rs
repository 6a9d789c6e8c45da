//! Gameplay config (data-driven tuning)
//!
//! Defaults = значения из оригинальных blueprint'ов персонажа.
//! Headless binary может подгрузить JSON поверх defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Какой collaborator отвечает на line trace запросы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TraceBackend {
    /// Rapier ray cast (нужен RapierPhysicsPlugin + Collider'ы)
    Rapier,
    /// Аналитический ray vs HitSphere (headless тесты, без физики)
    #[default]
    Headless,
}

/// Weapon debug flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDebug {
    /// Рисовать debug line от глаз до конца trace на каждый выстрел
    pub draw_traces: bool,
}

/// Настройки персонажа (камера, движение, смерть)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTuning {
    /// FOV камеры без zoom (градусы)
    pub default_fov: f32,
    /// FOV при zoom (градусы)
    pub zoomed_fov: f32,
    /// Скорость интерполяции FOV (1/сек)
    pub zoom_interp_speed: f32,
    /// Скорость ходьбы (units/сек)
    pub walk_speed: f32,
    /// Скорость в приседе (units/сек)
    pub crouch_speed: f32,
    /// Высота глаз над origin персонажа
    pub eye_height: f32,
    /// Высота глаз в приседе
    pub crouched_eye_height: f32,
    /// Вертикальная скорость прыжка
    pub jump_velocity: f32,
    /// Градусов поворота камеры на единицу look-оси
    pub look_scale: f32,
    /// Через сколько секунд труп удаляется
    pub corpse_lifespan: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            zoomed_fov: 65.0,
            zoom_interp_speed: 20.0,
            walk_speed: 6.0,
            crouch_speed: 3.0,
            eye_height: 1.6,
            crouched_eye_height: 0.9,
            jump_velocity: 4.2,
            look_scale: 2.5,
            corpse_lifespan: 10.0,
        }
    }
}

/// Корневой config симуляции
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub trace_backend: TraceBackend,
    pub weapon_debug: WeaponDebug,
    pub character: CharacterTuning,
    pub log_level: Option<LogLevel>,
}

impl GameplayConfig {
    /// Парсит JSON; отсутствующие поля берутся из `Default`
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
