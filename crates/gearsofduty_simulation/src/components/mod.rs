//! ECS Components для персонажей
//!
//! Организация по доменам:
//! - actor: Character, Health, LifeState, PlayerController
//! - movement: ViewRotation, EyeViewpoint, CrouchState
//! - camera: CameraView (FOV + zoom)
//! - attachment: Attachment (сокет на меше родителя)

pub mod actor;
pub mod attachment;
pub mod camera;
pub mod movement;

pub use actor::*;
pub use attachment::*;
pub use camera::*;
pub use movement::*;
