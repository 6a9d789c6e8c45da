//! Cosmetic effects — ECS → host engine (particles, camera shake, debug draw)
//!
//! Симуляция не проигрывает эффекты: только описывает что и где.
//! Host (renderer) читает `CosmeticEffect` events и спавнит визуал.

use bevy::prelude::*;

use super::definitions::EffectId;

/// Сколько живёт debug line (сек)
pub const DEBUG_LINE_LIFETIME: f32 = 1.0;

/// Event: косметика выстрела
#[derive(Event, Debug, Clone, PartialEq)]
pub enum CosmeticEffect {
    /// Вспышка, прикреплённая к сокету меша оружия
    MuzzleFlash {
        weapon: Entity,
        effect: EffectId,
        socket: String,
    },
    /// Tracer от дула; конечная точка пишется в параметр `target_param`
    Tracer {
        effect: EffectId,
        origin: Vec3,
        target_param: String,
        target: Vec3,
    },
    /// Impact в точке попадания, ориентирован по нормали
    Impact {
        effect: EffectId,
        location: Vec3,
        rotation: Quat,
    },
    /// Camera shake контроллеру игрока (PlayerController.player_id)
    CameraShake { player_id: u32, effect: EffectId },
    /// Debug линия trace'а (weapon_debug.draw_traces)
    DebugLine {
        start: Vec3,
        end: Vec3,
        lifetime: f32,
    },
}

/// Ориентация impact-эффекта: -Z эффекта смотрит вдоль нормали
pub fn impact_rotation(normal: Vec3) -> Quat {
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::NEG_Z, normal)
}
