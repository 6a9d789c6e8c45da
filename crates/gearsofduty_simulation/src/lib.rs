//! Gears of Duty Simulation Core
//!
//! ECS-симуляция геймплея шутера на Bevy 0.16 (headless)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (fire cadence, hit-scan, damage, character lifecycle)
//! - Host engine = rendering, particles, camera shake, input devices
//! - Связь через events: CharacterInput (host → ECS), CosmeticEffect (ECS → host)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod character;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod shared;
pub mod weapon;

// Re-export для удобства
pub use character::{
    spawn_character, CharacterAction, CharacterDied, CharacterInput, CharacterPlugin,
    CurrentWeapon, WeaponLoadout,
};
pub use combat::{CombatPlugin, HealthChanged, PointDamage, SurfaceKind};
pub use components::*;
pub use config::GameplayConfig;
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel};
pub use physics::KinematicControllerPlugin;
pub use weapon::{
    CosmeticEffect, FireControl, FireRequest, ShotFired, WeaponDefinitions, WeaponPlugin,
};

/// Порядок gameplay фаз внутри кадра (Update)
///
/// Input → Movement → Weapons → Damage → Lifecycle → View
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// CharacterInput → intents, weapon switch
    Input,
    /// Kinematic movement + eye viewpoints
    Movement,
    /// Fire cadence, hit-scan, projectiles
    Weapons,
    /// PointDamage → Health → HealthChanged
    Damage,
    /// Death transition, corpse despawn
    Lifecycle,
    /// FOV interpolation
    View,
}

impl GameplaySet {
    /// Выстраивает фазы цепочкой в Update
    pub fn configure(app: &mut App) {
        app.configure_sets(
            Update,
            (
                GameplaySet::Input,
                GameplaySet::Movement,
                GameplaySet::Weapons,
                GameplaySet::Damage,
                GameplaySet::Lifecycle,
                GameplaySet::View,
            )
                .chain(),
        );
    }
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        GameplaySet::configure(app);

        app.init_resource::<GameplayConfig>()
            .init_resource::<WeaponDefinitions>()
            .add_plugins((
                KinematicControllerPlugin,
                WeaponPlugin,
                CombatPlugin,
                CharacterPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// MinimalPlugins + SimulationPlugin, headless trace backend.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, GameplayConfig::default())
}

/// То же, но с явным config (JSON из binary, tuning в тестах)
pub fn create_headless_app_with_config(seed: u64, config: GameplayConfig) -> App {
    init_logger();
    if let Some(level) = config.log_level {
        logger::set_log_level(level);
    }

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug в порядке Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
