//! Headless симуляция Gears of Duty
//!
//! Игрок с автоматом зажимает fire и поворачивается по арене с манекенами.
//! Usage: gearsofduty_simulation [config.json] [weapons.json]

use std::time::Duration;

use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;

use gearsofduty_simulation::{
    create_headless_app_with_config, log_info, spawn_character, CharacterAction, CharacterDied,
    CharacterInput, DeterministicRng, GameplayConfig, PlayerController, ShotFired,
    WeaponDefinitions, WeaponLoadout,
};

const SEED: u64 = 42;
const DUMMY_COUNT: usize = 6;
const TICKS: u32 = 600;
const FRAME: Duration = Duration::from_millis(16);

fn load_config(path: Option<&str>) -> anyhow::Result<GameplayConfig> {
    let Some(path) = path else {
        return Ok(GameplayConfig::default());
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path))?;
    GameplayConfig::from_json_str(&json).with_context(|| format!("invalid config {}", path))
}

fn load_weapons(path: Option<&str>) -> anyhow::Result<WeaponDefinitions> {
    let mut definitions = WeaponDefinitions::default();
    let Some(path) = path else {
        return Ok(definitions);
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read weapon definitions {}", path))?;
    let custom = WeaponDefinitions::from_json_str(&json)
        .with_context(|| format!("invalid weapon definitions {}", path))?;
    definitions.merge(custom);

    Ok(definitions)
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = load_config(args.get(1).map(String::as_str))?;
    let weapons = load_weapons(args.get(2).map(String::as_str))?;

    println!("Starting Gears of Duty headless simulation (seed: {})", SEED);

    let tuning = config.character;
    let mut app = create_headless_app_with_config(SEED, config);
    app.insert_resource(weapons)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    // Арена: игрок в центре, манекены по кругу на случайной дистанции
    let player = {
        let world = app.world_mut();
        let positions: Vec<Vec3> = {
            let mut rng = world.resource_mut::<DeterministicRng>();
            (0..DUMMY_COUNT)
                .map(|i| {
                    let angle = i as f32 / DUMMY_COUNT as f32 * std::f32::consts::TAU;
                    let distance = rng.rng.gen_range(8.0..20.0);
                    Vec3::new(angle.sin() * distance, 0.0, -angle.cos() * distance)
                })
                .collect()
        };

        let player = {
            let mut commands = world.commands();
            for position in positions {
                spawn_character(&mut commands, position, WeaponLoadout::default(), &tuning, None);
            }
            spawn_character(
                &mut commands,
                Vec3::ZERO,
                WeaponLoadout::default(),
                &tuning,
                Some(PlayerController { player_id: 0 }),
            )
        };
        world.flush();
        player
    };

    // Первый кадр: экипировка стартового оружия
    app.update();
    app.world_mut()
        .send_event(CharacterInput::new(player, CharacterAction::StartFire));

    let turn_per_tick = 360.0 / tuning.look_scale / TICKS as f32;
    let mut shots = 0;
    let mut hits = 0;
    let mut deaths = 0;

    for tick in 0..TICKS {
        app.world_mut()
            .send_event(CharacterInput::new(player, CharacterAction::Turn(turn_per_tick)));
        app.update();

        let world = app.world_mut();
        for shot in world.resource_mut::<Events<ShotFired>>().drain() {
            shots += 1;
            if shot.hit.is_some() {
                hits += 1;
            }
        }
        deaths += world.resource_mut::<Events<CharacterDied>>().drain().count();

        if tick % 100 == 0 {
            log_info(&format!(
                "Tick {}: {} entities, {} shots, {} hits, {} deaths",
                tick,
                world.entities().len(),
                shots,
                hits,
                deaths
            ));
        }
    }

    app.world_mut()
        .send_event(CharacterInput::new(player, CharacterAction::StopFire));
    app.update();

    println!(
        "Simulation complete: {} shots, {} hits, {} of {} dummies killed",
        shots, hits, deaths, DUMMY_COUNT
    );

    Ok(())
}
