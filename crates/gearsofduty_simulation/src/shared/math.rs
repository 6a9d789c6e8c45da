//! Math helpers

/// Frame-rate независимая интерполяция к цели
///
/// Шаг = `(target - current) * clamp(delta_secs * speed, 0, 1)`.
/// `speed <= 0` → сразу target. Уже у цели → target (без дрожания).
pub fn interp_to(current: f32, target: f32, delta_secs: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < 1.0e-8 {
        return target;
    }

    let alpha = (delta_secs * speed).clamp(0.0, 1.0);
    current + distance * alpha
}
