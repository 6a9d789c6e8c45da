//! Kinematic контроллер для персонажей
//!
//! Архитектура:
//! - Input накапливается в MovementInput (AddMovementInput-семантика), расходуется за тик
//! - Custom velocity integration (не используем Rapier forces)
//! - Gravity + плоский пол на y = 0 + прыжок через JumpIntent
//!
//! Rapier здесь только для коллизий (capsule), интеграция позиций — наша.

use bevy::prelude::*;

use crate::components::CrouchState;
use crate::config::CharacterTuning;

/// Высота пола для headless симуляции
pub const FLOOR_HEIGHT: f32 = 0.0;

/// Скорость тела (units/сек)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

/// Kinematic контроллер компонент
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct KinematicController {
    /// Скорость ходьбы
    pub walk_speed: f32,
    /// Скорость в приседе
    pub crouch_speed: f32,
    /// Вертикальная скорость прыжка
    pub jump_velocity: f32,
    /// Высота глаз стоя
    pub eye_height: f32,
    /// Высота глаз в приседе
    pub crouched_eye_height: f32,
    /// Гравитация (units/сек²)
    pub gravity: f32,
    /// На земле ли персонаж
    pub grounded: bool,
}

impl Default for KinematicController {
    fn default() -> Self {
        Self::from_tuning(&CharacterTuning::default())
    }
}

impl KinematicController {
    pub fn from_tuning(tuning: &CharacterTuning) -> Self {
        Self {
            walk_speed: tuning.walk_speed,
            crouch_speed: tuning.crouch_speed,
            jump_velocity: tuning.jump_velocity,
            eye_height: tuning.eye_height,
            crouched_eye_height: tuning.crouched_eye_height,
            gravity: -9.81,
            grounded: true,
        }
    }

    pub fn speed(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouch_speed
        } else {
            self.walk_speed
        }
    }

    pub fn eye_height(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouched_eye_height
        } else {
            self.eye_height
        }
    }
}

/// Накопленный за тик movement input (world space)
///
/// MoveForward/MoveRight добавляют сюда `axis * value`,
/// apply_movement_input расходует и обнуляет.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub direction: Vec3,
}

impl MovementInput {
    pub fn add(&mut self, world_direction: Vec3, scale: f32) {
        self.direction += world_direction * scale;
    }

    pub fn consume(&mut self) -> Vec3 {
        std::mem::take(&mut self.direction)
    }
}

/// Event: намерение прыгнуть
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Горизонтальная скорость из input: длина input'а clamp до 1, умножаем на speed
pub fn horizontal_velocity(input: Vec3, speed: f32) -> Vec3 {
    let flat = Vec3::new(input.x, 0.0, input.z);
    flat.clamp_length_max(1.0) * speed
}

/// Система: прыжок (только с земли и не в приседе)
pub fn apply_jump_intents(
    mut jumps: EventReader<JumpIntent>,
    mut bodies: Query<(&mut KinematicController, &mut PhysicsBody, &CrouchState)>,
) {
    for intent in jumps.read() {
        let Ok((mut controller, mut body, crouch)) = bodies.get_mut(intent.entity) else {
            continue;
        };

        if !controller.grounded || crouch.crouched {
            continue;
        }

        body.velocity.y = controller.jump_velocity;
        controller.grounded = false;
    }
}

/// Система: MovementInput → горизонтальная velocity
pub fn apply_movement_input(
    mut query: Query<(&KinematicController, &mut MovementInput, &mut PhysicsBody, &CrouchState)>,
) {
    for (controller, mut input, mut body, crouch) in query.iter_mut() {
        let horizontal = horizontal_velocity(input.consume(), controller.speed(crouch.crouched));

        // Y velocity остаётся (gravity/jump)
        body.velocity.x = horizontal.x;
        body.velocity.z = horizontal.z;
    }
}

/// Система: gravity для тел в воздухе
pub fn apply_gravity(mut query: Query<(&KinematicController, &mut PhysicsBody)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (controller, mut body) in query.iter_mut() {
        if !controller.grounded {
            body.velocity.y += controller.gravity * delta;
        }
    }
}

/// Система: velocity → Transform (headless, без Rapier character controller)
pub fn integrate_velocity_to_transform(
    mut query: Query<(&PhysicsBody, &mut Transform), With<KinematicController>>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        transform.translation += body.velocity * delta;
    }
}

/// Система: ground detection по плоскому полу
pub fn ground_detection(
    mut query: Query<(&mut Transform, &mut KinematicController, &mut PhysicsBody)>,
) {
    for (mut transform, mut controller, mut body) in query.iter_mut() {
        if transform.translation.y <= FLOOR_HEIGHT && body.velocity.y <= 0.0 {
            transform.translation.y = FLOOR_HEIGHT;
            body.velocity.y = 0.0;
            controller.grounded = true;
        } else {
            controller.grounded = transform.translation.y <= FLOOR_HEIGHT;
        }
    }
}
