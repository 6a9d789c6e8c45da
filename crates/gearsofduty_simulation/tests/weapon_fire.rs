//! Weapon fire integration test
//!
//! Полный SimulationPlugin, headless trace backend:
//! - Игрок стреляет в голову/тело манекена через CharacterInput
//! - Урон по поверхностям, tracer при промахе, StartFire/StopFire cadence

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use gearsofduty_simulation::config::CharacterTuning;
use gearsofduty_simulation::weapon::{WeaponDefinition, DEFAULT_MAX_RANGE};
use gearsofduty_simulation::*;

const FRAME: Duration = Duration::from_millis(10);

/// Helper: headless App с фиксированным шагом времени
fn create_arena(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app
}

fn spawn(app: &mut App, position: Vec3, controller: Option<PlayerController>) -> Entity {
    let world = app.world_mut();
    let entity = {
        let mut commands = world.commands();
        spawn_character(
            &mut commands,
            position,
            WeaponLoadout::default(),
            &CharacterTuning::default(),
            controller,
        )
    };
    world.flush();
    entity
}

fn send(app: &mut App, entity: Entity, action: CharacterAction) {
    app.world_mut().send_event(CharacterInput::new(entity, action));
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// Одиночный выстрел: StartFire + StopFire в одном кадре
fn tap_fire(app: &mut App, shooter: Entity) {
    send(app, shooter, CharacterAction::StartFire);
    send(app, shooter, CharacterAction::StopFire);
    app.update();
}

#[test]
fn test_headshot_deals_80_damage() {
    let mut app = create_arena(42);
    let player = spawn(&mut app, Vec3::ZERO, Some(PlayerController { player_id: 0 }));
    let dummy = spawn(&mut app, Vec3::new(0.0, 0.0, -10.0), None);
    app.update();
    drain::<PointDamage>(&mut app);

    tap_fire(&mut app, player);

    let damage = drain::<PointDamage>(&mut app);
    assert_eq!(damage.len(), 1);
    assert_eq!(damage[0].target, dummy);
    assert_eq!(damage[0].surface, SurfaceKind::FleshVulnerable);
    assert_eq!(damage[0].amount, 80.0);
    assert_eq!(damage[0].instigator, Some(player));
    assert_eq!(app.world().get::<Health>(dummy).unwrap().current, 20.0);
}

#[test]
fn test_body_shot_deals_base_damage() {
    let mut app = create_arena(42);
    let player = spawn(&mut app, Vec3::ZERO, None);
    let dummy = spawn(&mut app, Vec3::new(0.0, 0.0, -10.0), None);
    app.update();

    // Присед: глаза на уровне торса манекена
    send(&mut app, player, CharacterAction::BeginCrouch);
    app.update();
    tap_fire(&mut app, player);

    let damage = drain::<PointDamage>(&mut app);
    assert_eq!(damage.len(), 1);
    assert_eq!(damage[0].surface, SurfaceKind::FleshDefault);
    assert_eq!(damage[0].amount, 20.0);
    assert_eq!(app.world().get::<Health>(dummy).unwrap().current, 80.0);
}

#[test]
fn test_miss_tracer_reaches_max_range() {
    let mut app = create_arena(7);
    let player = spawn(&mut app, Vec3::ZERO, None);
    app.update();

    tap_fire(&mut app, player);

    assert!(drain::<PointDamage>(&mut app).is_empty());

    let shots = drain::<ShotFired>(&mut app);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].hit, None);

    let eye = *app.world().get::<EyeViewpoint>(player).unwrap();
    let expected = eye.location + eye.forward() * DEFAULT_MAX_RANGE;
    assert!(shots[0].tracer_end.abs_diff_eq(expected, 1e-2));
}

#[test]
fn test_start_stop_before_period_fires_once() {
    let mut app = create_arena(1);
    let mut slow_rifle = WeaponDefinition::rifle();
    slow_rifle.fire_period = 1.0;
    app.world_mut()
        .resource_mut::<WeaponDefinitions>()
        .insert("rifle".into(), slow_rifle);

    let player = spawn(&mut app, Vec3::ZERO, None);
    app.update();

    send(&mut app, player, CharacterAction::StartFire);
    app.update();
    let mut shots = drain::<ShotFired>(&mut app).len();
    for _ in 0..50 {
        app.update();
        shots += drain::<ShotFired>(&mut app).len();
    }
    send(&mut app, player, CharacterAction::StopFire);
    for _ in 0..200 {
        app.update();
        shots += drain::<ShotFired>(&mut app).len();
    }

    // 0.5s < period → только немедленный выстрел
    assert_eq!(shots, 1);
}

#[test]
fn test_player_gets_camera_shake_and_effects() {
    let mut app = create_arena(3);
    let player = spawn(&mut app, Vec3::ZERO, Some(PlayerController { player_id: 9 }));
    spawn(&mut app, Vec3::new(0.0, 0.0, -10.0), None);
    app.update();
    drain::<CosmeticEffect>(&mut app);

    tap_fire(&mut app, player);

    let effects = drain::<CosmeticEffect>(&mut app);
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, CosmeticEffect::MuzzleFlash { .. })));
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, CosmeticEffect::Tracer { .. })));
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, CosmeticEffect::Impact { .. })));
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, CosmeticEffect::CameraShake { player_id: 9, .. })));
}
