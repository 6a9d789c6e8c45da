//! Camera state для персонажа (FOV + zoom)

use bevy::prelude::*;

use crate::config::CharacterTuning;

/// Field of view камеры персонажа
///
/// `wants_to_zoom` выставляется input'ом (BeginZoom/EndZoom),
/// `field_of_view` интерполируется к цели каждый frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraView {
    /// Текущий FOV (градусы)
    pub field_of_view: f32,
    /// FOV без zoom
    pub default_fov: f32,
    /// FOV в zoom
    pub zoomed_fov: f32,
    /// Скорость интерполяции (1/сек)
    pub zoom_interp_speed: f32,
    pub wants_to_zoom: bool,
}

impl Default for CameraView {
    fn default() -> Self {
        Self::from_tuning(&CharacterTuning::default())
    }
}

impl CameraView {
    pub fn from_tuning(tuning: &CharacterTuning) -> Self {
        Self {
            field_of_view: tuning.default_fov,
            default_fov: tuning.default_fov,
            zoomed_fov: tuning.zoomed_fov,
            zoom_interp_speed: tuning.zoom_interp_speed,
            wants_to_zoom: false,
        }
    }

    pub fn target_fov(&self) -> f32 {
        if self.wants_to_zoom {
            self.zoomed_fov
        } else {
            self.default_fov
        }
    }
}
