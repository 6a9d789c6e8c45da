//! Shared — cross-cutting helpers без собственного домена
//!
//! - math: интерполяция (FOV zoom, сглаживание)

pub mod math;

pub use math::*;
