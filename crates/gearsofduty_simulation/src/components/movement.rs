//! View/movement state компоненты: ViewRotation, EyeViewpoint, CrouchState

use bevy::prelude::*;

/// Максимальный pitch камеры (градусы), чтобы не перевернуться через зенит
pub const MAX_PITCH_DEGREES: f32 = 89.0;

/// Controller rotation (куда смотрит игрок)
///
/// Yaw крутит и тело персонажа, pitch — только камеру/глаза.
/// Углы в радианах; yaw > 0 = поворот влево (Bevy: -Z forward, +Y up).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ViewRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ViewRotation {
    pub fn add_yaw(&mut self, radians: f32) {
        self.yaw = (self.yaw + radians).rem_euclid(std::f32::consts::TAU);
    }

    pub fn add_pitch(&mut self, radians: f32) {
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.pitch = (self.pitch + radians).clamp(-limit, limit);
    }

    /// Полная rotation глаз (yaw + pitch)
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Rotation тела (только yaw)
    pub fn body_quat(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

/// Точка обзора актора (откуда стреляет hit-scan оружие)
///
/// Для Character пересчитывается каждый frame из Transform + ViewRotation + crouch.
/// Турели/тестовые стрелки могут выставлять её напрямую.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EyeViewpoint {
    pub location: Vec3,
    pub rotation: Quat,
}

impl Default for EyeViewpoint {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl EyeViewpoint {
    pub fn new(location: Vec3, rotation: Quat) -> Self {
        Self { location, rotation }
    }

    /// Смотрит из `location` в сторону `target`
    pub fn looking_at(location: Vec3, target: Vec3) -> Self {
        let direction = (target - location).normalize_or_zero();
        let rotation = if direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::NEG_Z, direction)
        };
        Self { location, rotation }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Присед
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CrouchState {
    pub crouched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_rotation_forward_default() {
        let view = ViewRotation::default();
        let forward = view.quat() * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let mut view = ViewRotation::default();
        view.add_pitch(0.5);
        let forward = view.quat() * Vec3::NEG_Z;
        assert!(forward.y > 0.4, "forward = {:?}", forward);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut view = ViewRotation::default();
        view.add_pitch(10.0);
        assert!((view.pitch - MAX_PITCH_DEGREES.to_radians()).abs() < 1e-6);

        view.add_pitch(-20.0);
        assert!((view.pitch + MAX_PITCH_DEGREES.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_eye_looking_at() {
        let eye = EyeViewpoint::looking_at(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert!((eye.forward() - Vec3::X).length() < 1e-5);
    }
}
