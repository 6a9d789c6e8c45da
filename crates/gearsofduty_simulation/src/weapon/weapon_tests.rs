//! Tests for weapon systems (headless trace backend).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    use crate::combat::{CombatPlugin, Hurtbox, PhysicalSurface, PointDamage, SurfaceKind};
    use crate::components::{EyeViewpoint, Health, PlayerController};
    use crate::config::GameplayConfig;
    use crate::physics::HitSphere;
    use crate::GameplaySet;
    use crate::weapon::{
        spawn_weapon, CosmeticEffect, FireControl, FireRequest, Projectile, ShotFired,
        WeaponDefinition, WeaponOwner, WeaponPlugin,
    };

    fn weapon_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .init_resource::<GameplayConfig>()
            .add_plugins((CombatPlugin, WeaponPlugin));
        GameplaySet::configure(&mut app);
        app
    }

    /// Стрелок в начале координат, смотрит в -Z
    fn spawn_shooter(app: &mut App, definition: &WeaponDefinition) -> (Entity, Entity) {
        let world = app.world_mut();
        let shooter = world
            .spawn((
                Transform::default(),
                EyeViewpoint::new(Vec3::ZERO, Quat::IDENTITY),
                HitSphere::new(0.5),
            ))
            .id();

        let weapon = {
            let mut commands = world.commands();
            spawn_weapon(&mut commands, shooter, &"test".into(), definition)
        };
        world.flush();

        (shooter, weapon)
    }

    fn spawn_target(app: &mut App, at: Vec3, surface: SurfaceKind) -> Entity {
        app.world_mut()
            .spawn((
                Transform::from_translation(at),
                HitSphere::new(0.5),
                PhysicalSurface(surface),
                Health::new(100.0),
            ))
            .id()
    }

    fn fire_once(app: &mut App, weapon: Entity) {
        app.world_mut().send_event(FireRequest { weapon });
        app.update();
    }

    fn read<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).cloned().collect()
    }

    /// Забирает события из обоих буферов (без двойного счёта между кадрами)
    fn drain<E: Event>(app: &mut App) -> Vec<E> {
        app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    #[test]
    fn test_headshot_deals_quadruple_damage() {
        let mut app = weapon_app();
        let (shooter, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());
        let target = spawn_target(&mut app, Vec3::new(0.0, 0.0, -10.0), SurfaceKind::FleshVulnerable);

        fire_once(&mut app, weapon);

        let damage = read::<PointDamage>(&app);
        assert_eq!(damage.len(), 1);
        assert_eq!(damage[0].target, target);
        assert_eq!(damage[0].amount, 80.0);
        assert_eq!(damage[0].instigator, Some(shooter));
        assert_eq!(damage[0].causer, weapon);
        assert_eq!(app.world().get::<Health>(target).unwrap().current, 20.0);
    }

    #[test]
    fn test_wall_hit_keeps_base_damage_and_default_impact() {
        let mut app = weapon_app();
        let (_, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());
        spawn_target(&mut app, Vec3::new(0.0, 0.0, -10.0), SurfaceKind::Default);

        fire_once(&mut app, weapon);

        assert_eq!(read::<PointDamage>(&app)[0].amount, 20.0);

        let rifle = WeaponDefinition::rifle();
        let impacts: Vec<_> = read::<CosmeticEffect>(&app)
            .into_iter()
            .filter_map(|effect| match effect {
                CosmeticEffect::Impact { effect, location, .. } => Some((effect, location)),
                _ => None,
            })
            .collect();
        assert_eq!(impacts.len(), 1);
        assert_eq!(Some(&impacts[0].0), rifle.effects.impact_default.as_ref());
        assert!(impacts[0].1.abs_diff_eq(Vec3::new(0.0, 0.0, -9.5), 1e-4));
    }

    #[test]
    fn test_miss_applies_no_damage_and_tracer_reaches_max_range() {
        let mut app = weapon_app();
        let (_, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());

        fire_once(&mut app, weapon);

        assert!(read::<PointDamage>(&app).is_empty());

        let tracer_end = read::<CosmeticEffect>(&app).into_iter().find_map(|effect| match effect {
            CosmeticEffect::Tracer { target, .. } => Some(target),
            _ => None,
        });
        assert_eq!(tracer_end, Some(Vec3::new(0.0, 0.0, -10_000.0)));
    }

    #[test]
    fn test_hurtbox_routes_damage_to_owner() {
        let mut app = weapon_app();
        let (_, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());
        let body = app.world_mut().spawn(Health::new(100.0)).id();
        app.world_mut().spawn((
            Transform::from_xyz(0.0, 0.0, -10.0),
            HitSphere::new(0.3),
            PhysicalSurface(SurfaceKind::FleshVulnerable),
            Hurtbox { owner: body },
        ));

        fire_once(&mut app, weapon);

        assert_eq!(app.world().get::<Health>(body).unwrap().current, 20.0);
    }

    #[test]
    fn test_weapon_without_owner_is_noop() {
        let mut app = weapon_app();
        let (_, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());
        spawn_target(&mut app, Vec3::new(0.0, 0.0, -10.0), SurfaceKind::FleshDefault);
        app.world_mut().entity_mut(weapon).remove::<WeaponOwner>();

        fire_once(&mut app, weapon);

        assert!(read::<PointDamage>(&app).is_empty());
        assert!(read::<CosmeticEffect>(&app).is_empty());
        assert!(read::<ShotFired>(&app).is_empty());
    }

    #[test]
    fn test_missing_cosmetics_are_skipped() {
        let mut app = weapon_app();
        let mut definition = WeaponDefinition::rifle();
        definition.effects = Default::default();
        let (_, weapon) = spawn_shooter(&mut app, &definition);
        spawn_target(&mut app, Vec3::new(0.0, 0.0, -10.0), SurfaceKind::FleshDefault);

        fire_once(&mut app, weapon);

        assert_eq!(read::<PointDamage>(&app).len(), 1);
        assert!(read::<CosmeticEffect>(&app).is_empty());
    }

    #[test]
    fn test_camera_shake_only_for_player_controller() {
        let mut app = weapon_app();
        let (shooter, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());

        fire_once(&mut app, weapon);
        assert!(!drain::<CosmeticEffect>(&mut app)
            .iter()
            .any(|effect| matches!(effect, CosmeticEffect::CameraShake { .. })));

        app.world_mut()
            .entity_mut(shooter)
            .insert(PlayerController { player_id: 3 });
        fire_once(&mut app, weapon);

        let shake = read::<CosmeticEffect>(&app).into_iter().find_map(|effect| match effect {
            CosmeticEffect::CameraShake { player_id, .. } => Some(player_id),
            _ => None,
        });
        assert_eq!(shake, Some(3));
    }

    #[test]
    fn test_debug_line_when_enabled() {
        let mut app = weapon_app();
        app.world_mut()
            .resource_mut::<GameplayConfig>()
            .weapon_debug
            .draw_traces = true;
        let (_, weapon) = spawn_shooter(&mut app, &WeaponDefinition::rifle());

        fire_once(&mut app, weapon);

        assert!(read::<CosmeticEffect>(&app)
            .iter()
            .any(|effect| matches!(effect, CosmeticEffect::DebugLine { .. })));
    }

    #[test]
    fn test_start_then_stop_fires_exactly_once() {
        let mut app = weapon_app();
        let mut definition = WeaponDefinition::rifle();
        definition.fire_period = 1.0;
        let (_, weapon) = spawn_shooter(&mut app, &definition);

        {
            let mut control = app.world_mut().get_mut::<FireControl>(weapon).unwrap();
            control.start_fire();
        }
        app.update();
        app.world_mut().get_mut::<FireControl>(weapon).unwrap().stop_fire();

        let mut shots = drain::<ShotFired>(&mut app).len();
        for _ in 0..40 {
            app.update();
            shots += drain::<ShotFired>(&mut app).len();
        }

        assert_eq!(shots, 1);
    }

    #[test]
    fn test_held_trigger_repeats_at_fire_period() {
        let mut app = weapon_app();
        let mut definition = WeaponDefinition::rifle();
        definition.fire_period = 0.1;
        let (_, weapon) = spawn_shooter(&mut app, &definition);

        // Первый update: delta = 0
        app.update();
        app.world_mut().get_mut::<FireControl>(weapon).unwrap().start_fire();

        let mut shots = 0;
        for _ in 0..12 {
            app.update();
            shots += drain::<ShotFired>(&mut app).len();
        }

        // немедленный + 11 кадров по 50ms = 0.55s → 5 по timer'у
        assert_eq!(shots, 6);
    }

    #[test]
    fn test_projectile_launcher_spawns_and_expires() {
        let mut app = weapon_app();
        let (shooter, weapon) = spawn_shooter(&mut app, &WeaponDefinition::grenade_launcher());

        fire_once(&mut app, weapon);

        let mut projectiles = app.world_mut().query::<(&Projectile, &Transform)>();
        let spawned: Vec<_> = projectiles
            .iter(app.world())
            .map(|(projectile, _)| projectile.instigator)
            .collect();
        assert_eq!(spawned, vec![shooter]);

        for _ in 0..30 {
            app.update();
        }
        assert_eq!(projectiles.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_projectile_launcher_without_kind_is_noop() {
        let mut app = weapon_app();
        let mut definition = WeaponDefinition::grenade_launcher();
        definition.fire_mode = crate::weapon::FireMode::Projectile { projectile: None };
        let (_, weapon) = spawn_shooter(&mut app, &definition);

        fire_once(&mut app, weapon);

        let mut projectiles = app.world_mut().query::<&Projectile>();
        assert_eq!(projectiles.iter(app.world()).count(), 0);
    }
}
