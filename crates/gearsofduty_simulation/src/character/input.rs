//! Character input: host input bindings → ECS intents
//!
//! Host переводит устройства ввода в `CharacterInput` события (axis/action),
//! симуляция применяет их к pawn'у. Input мёртвых персонажей игнорируется.

use bevy::prelude::*;

use super::loadout::{CurrentWeapon, SwitchWeaponIntent};
use crate::components::{CameraView, CrouchState, LifeState, ViewRotation};
use crate::config::GameplayConfig;
use crate::physics::{JumpIntent, MovementInput};
use crate::weapon::FireControl;

/// Action/axis от host'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacterAction {
    /// Вперёд/назад по forward персонажа, масштаб = величина оси
    MoveForward(f32),
    /// Вправо/влево
    MoveRight(f32),
    /// Pitch камеры (> 0 = вверх)
    LookUp(f32),
    /// Yaw (> 0 = вправо)
    Turn(f32),
    BeginCrouch,
    EndCrouch,
    Jump,
    BeginZoom,
    EndZoom,
    StartFire,
    StopFire,
    SwitchWeapon,
}

/// Event: input для конкретного персонажа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CharacterInput {
    pub entity: Entity,
    pub action: CharacterAction,
}

impl CharacterInput {
    pub fn new(entity: Entity, action: CharacterAction) -> Self {
        Self { entity, action }
    }
}

/// Система: CharacterInput → movement/view/crouch/zoom/fire intents
pub fn apply_character_input(
    mut inputs: EventReader<CharacterInput>,
    mut characters: Query<(
        &LifeState,
        &mut MovementInput,
        &mut ViewRotation,
        &mut CrouchState,
        &mut CameraView,
        Option<&CurrentWeapon>,
    )>,
    mut fire_controls: Query<&mut FireControl>,
    config: Res<GameplayConfig>,
    mut jump_events: EventWriter<JumpIntent>,
    mut switch_events: EventWriter<SwitchWeaponIntent>,
) {
    let look_scale = config.character.look_scale.to_radians();

    for input in inputs.read() {
        let Ok((life, mut movement, mut view, mut crouch, mut camera, current_weapon)) =
            characters.get_mut(input.entity)
        else {
            continue;
        };

        if life.is_dead() {
            continue;
        }

        match input.action {
            CharacterAction::MoveForward(value) => {
                if value != 0.0 {
                    movement.add(view.body_quat() * Vec3::NEG_Z, value);
                }
            }
            CharacterAction::MoveRight(value) => {
                if value != 0.0 {
                    movement.add(view.body_quat() * Vec3::X, value);
                }
            }
            CharacterAction::LookUp(value) => view.add_pitch(value * look_scale),
            CharacterAction::Turn(value) => view.add_yaw(-value * look_scale),
            CharacterAction::BeginCrouch => crouch.crouched = true,
            CharacterAction::EndCrouch => crouch.crouched = false,
            CharacterAction::Jump => {
                jump_events.write(JumpIntent {
                    entity: input.entity,
                });
            }
            CharacterAction::BeginZoom => camera.wants_to_zoom = true,
            CharacterAction::EndZoom => camera.wants_to_zoom = false,
            CharacterAction::StartFire | CharacterAction::StopFire => {
                // Без оружия fire input — no-op
                let Some(weapon) = current_weapon.and_then(|current| current.weapon) else {
                    continue;
                };
                let Ok(mut control) = fire_controls.get_mut(weapon) else {
                    continue;
                };

                if input.action == CharacterAction::StartFire {
                    control.start_fire();
                } else {
                    control.stop_fire();
                }
            }
            CharacterAction::SwitchWeapon => {
                switch_events.write(SwitchWeaponIntent {
                    entity: input.entity,
                });
            }
        }
    }
}

/// Система: yaw контроллера → rotation тела
pub fn sync_body_rotation(mut characters: Query<(&ViewRotation, &mut Transform, &LifeState)>) {
    for (view, mut transform, life) in characters.iter_mut() {
        if life.is_dead() {
            continue;
        }
        transform.rotation = view.body_quat();
    }
}
