//! View: eye viewpoint + FOV zoom interpolation

use bevy::prelude::*;

use crate::combat::Hurtbox;
use crate::components::{CameraView, Character, CrouchState, EyeViewpoint, ViewRotation};
use crate::physics::KinematicController;
use crate::shared::interp_to;

/// Система: EyeViewpoint = позиция + высота глаз (с учётом приседа), rotation = view
pub fn update_eye_viewpoints(
    mut characters: Query<
        (
            &Transform,
            &ViewRotation,
            &CrouchState,
            &KinematicController,
            &mut EyeViewpoint,
        ),
        With<Character>,
    >,
) {
    for (transform, view, crouch, controller, mut eye) in characters.iter_mut() {
        eye.location = transform.translation + Vec3::Y * controller.eye_height(crouch.crouched);
        eye.rotation = view.quat();
    }
}

/// Система: hurtbox головы следует за высотой глаз владельца (присед)
pub fn sync_hurtbox_heights(
    mut hurtboxes: Query<(&Hurtbox, &mut Transform)>,
    owners: Query<(&CrouchState, &KinematicController)>,
) {
    for (hurtbox, mut transform) in hurtboxes.iter_mut() {
        let Ok((crouch, controller)) = owners.get(hurtbox.owner) else {
            continue;
        };
        transform.translation.y = controller.eye_height(crouch.crouched);
    }
}

/// Система: FOV → zoomed/default с постоянной скоростью interp_to (каждый frame)
pub fn interpolate_field_of_view(mut cameras: Query<&mut CameraView>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut camera in cameras.iter_mut() {
        let target = camera.target_fov();
        camera.field_of_view = interp_to(camera.field_of_view, target, delta, camera.zoom_interp_speed);
    }
}
