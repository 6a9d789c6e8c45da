//! Базовые компоненты персонажей: Character, Health, LifeState, PlayerController

use bevy::prelude::*;

use crate::components::{CameraView, CrouchState, EyeViewpoint, ViewRotation};
use crate::physics::{KinematicController, MovementInput, PhysicsBody};

/// Персонаж (игрок или бот) — pawn с оружием, камерой и здоровьем
///
/// Автоматически добавляет movement/view/health компоненты через Required Components.
/// Оружие и loadout добавляются в `spawn_character`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    Health,
    LifeState,
    MovementInput,
    PhysicsBody,
    KinematicController,
    ViewRotation,
    EyeViewpoint,
    CrouchState,
    CameraView
)]
pub struct Character;

/// Здоровье
///
/// Инвариант: 0.0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Снимает `amount` HP (clamp в [0, max]), возвращает фактически снятое
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount).clamp(0.0, self.max);
        before - self.current
    }
}

/// Жизненный цикл персонажа: Alive → Dead (terminal)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

impl LifeState {
    pub fn is_dead(&self) -> bool {
        matches!(self, LifeState::Dead)
    }
}

/// Контроллер, который "владеет" pawn'ом (игрок)
///
/// Акторы БЕЗ этого компонента — боты/манекены (camera shake некому отправлять).
/// При смерти контроллер отсоединяется (компонент удаляется).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    pub player_id: u32,
}
