//! Line trace (scene query) для hit-scan оружия
//!
//! Два backend'а за одним SystemParam:
//! - Rapier: `cast_ray_and_get_normal` по collider'ам (нужен RapierPhysicsPlugin)
//! - Headless: аналитический ray vs HitSphere (тесты, headless binary)
//!
//! Entity с `ColliderDisabled` (трупы) не ловят trace ни в одном backend'е.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, QueryFilter, ReadRapierContext};

use crate::combat::{PhysicalSurface, SurfaceKind};
use crate::config::{GameplayConfig, TraceBackend};
use crate::logger::log_warning;

/// Сферический collider для headless trace'а
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HitSphere {
    pub radius: f32,
    /// Смещение центра от Transform.translation
    pub offset: Vec3,
}

impl HitSphere {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Результат blocking hit'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHit {
    pub entity: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    /// Расстояние от начала trace
    pub distance: f32,
    pub surface: SurfaceKind,
}

/// Пересечение луча (`direction` нормализован) со сферой
///
/// Возвращает расстояние до первой точки входа в пределах `max_distance`.
/// Старт внутри сферы = попадание на расстоянии 0 (solid).
pub fn ray_sphere_distance(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let to_origin = origin - center;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;

    if c <= 0.0 {
        return Some(0.0);
    }

    // Сфера позади или луч проходит мимо
    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let distance = -b - discriminant.sqrt();
    (distance <= max_distance).then_some(distance)
}

/// Scene query — единая точка для line trace'ов
#[derive(SystemParam)]
pub struct SceneQuery<'w, 's> {
    config: Res<'w, GameplayConfig>,
    rapier: ReadRapierContext<'w, 's>,
    spheres: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static HitSphere, Option<&'static ChildOf>),
        Without<ColliderDisabled>,
    >,
    parents: Query<'w, 's, &'static Transform>,
    hierarchy: Query<'w, 's, &'static ChildOf>,
    surfaces: Query<'w, 's, &'static PhysicalSurface>,
}

impl SceneQuery<'_, '_> {
    /// Trace от `start` до `end`, игнорируя `ignored` entity
    ///
    /// Возвращает ближайший blocking hit или None.
    pub fn line_trace(&self, start: Vec3, end: Vec3, ignored: &[Entity]) -> Option<TraceHit> {
        let offset = end - start;
        let max_distance = offset.length();
        if max_distance <= f32::EPSILON {
            return None;
        }
        let direction = offset / max_distance;

        let hit = match self.config.trace_backend {
            TraceBackend::Headless => self.trace_spheres(start, direction, max_distance, ignored),
            TraceBackend::Rapier => self.trace_rapier(start, direction, max_distance, ignored),
        }?;

        Some(TraceHit {
            surface: self.surface_of(hit.entity),
            ..hit
        })
    }

    /// Игнорируется сам entity и его прямые дети (hurtbox'ы стрелка)
    fn is_ignored(&self, entity: Entity, ignored: &[Entity]) -> bool {
        ignored.contains(&entity)
            || self
                .hierarchy
                .get(entity)
                .is_ok_and(|child_of| ignored.contains(&child_of.parent()))
    }

    fn surface_of(&self, entity: Entity) -> SurfaceKind {
        self.surfaces
            .get(entity)
            .map(|surface| surface.0)
            .unwrap_or_default()
    }

    fn trace_spheres(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignored: &[Entity],
    ) -> Option<TraceHit> {
        let mut closest: Option<TraceHit> = None;

        for (entity, transform, sphere, child_of) in self.spheres.iter() {
            if self.is_ignored(entity, ignored) {
                continue;
            }

            // Child sphere (hurtbox головы): Transform локальный относительно родителя
            let local = transform.translation + sphere.offset;
            let center = match child_of.and_then(|child_of| self.parents.get(child_of.parent()).ok()) {
                Some(parent) => parent.transform_point(local),
                None => local,
            };
            let Some(distance) =
                ray_sphere_distance(start, direction, max_distance, center, sphere.radius)
            else {
                continue;
            };

            if closest.is_some_and(|best| best.distance <= distance) {
                continue;
            }

            let point = start + direction * distance;
            let normal = (point - center).normalize_or_zero();
            closest = Some(TraceHit {
                entity,
                point,
                normal: if normal == Vec3::ZERO { -direction } else { normal },
                distance,
                surface: SurfaceKind::Default,
            });
        }

        closest
    }

    fn trace_rapier(
        &self,
        start: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignored: &[Entity],
    ) -> Option<TraceHit> {
        let Ok(context) = self.rapier.single() else {
            log_warning("SceneQuery: Rapier backend selected but no RapierContext exists");
            return None;
        };

        let predicate = |entity: Entity| !self.is_ignored(entity, ignored);
        let filter = QueryFilter::default().predicate(&predicate);

        let (entity, intersection) =
            context.cast_ray_and_get_normal(start, direction, max_distance, true, filter)?;

        Some(TraceHit {
            entity,
            point: intersection.point,
            normal: intersection.normal,
            distance: start.distance(intersection.point),
            surface: SurfaceKind::Default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_sphere_in_front() {
        let distance =
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(0.0, 0.0, -10.0), 1.0);
        assert_eq!(distance, Some(9.0));
    }

    #[test]
    fn test_ray_misses_sphere_behind() {
        let distance =
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(0.0, 0.0, 10.0), 1.0);
        assert_eq!(distance, None);
    }

    #[test]
    fn test_ray_misses_sphere_to_the_side() {
        let distance =
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::new(5.0, 0.0, -10.0), 1.0);
        assert_eq!(distance, None);
    }

    #[test]
    fn test_ray_out_of_range() {
        let distance =
            ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, 5.0, Vec3::new(0.0, 0.0, -10.0), 1.0);
        assert_eq!(distance, None);
    }

    #[test]
    fn test_ray_starting_inside_sphere() {
        let distance = ray_sphere_distance(Vec3::ZERO, Vec3::NEG_Z, 100.0, Vec3::ZERO, 1.0);
        assert_eq!(distance, Some(0.0));
    }
}
