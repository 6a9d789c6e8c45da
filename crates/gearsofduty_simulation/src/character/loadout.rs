//! Loadout: primary/secondary оружие персонажа + текущее оружие в руках
//!
//! Персонаж владеет максимум одним weapon entity (child через ChildOf).
//! Switch = despawn текущего + spawn альтернативного + toggle slot.

use bevy::prelude::*;

use crate::logger::{log, log_warning};
use crate::weapon::{spawn_weapon, WeaponDefinitions, WeaponId};

/// Активный слот
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LoadoutSlot {
    #[default]
    Primary,
    Secondary,
}

impl LoadoutSlot {
    pub fn other(self) -> Self {
        match self {
            LoadoutSlot::Primary => LoadoutSlot::Secondary,
            LoadoutSlot::Secondary => LoadoutSlot::Primary,
        }
    }
}

/// Какие оружия персонаж носит
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(CurrentWeapon)]
pub struct WeaponLoadout {
    pub primary: Option<WeaponId>,
    pub secondary: Option<WeaponId>,
    pub active: LoadoutSlot,
}

impl WeaponLoadout {
    pub fn new(primary: impl Into<WeaponId>, secondary: impl Into<WeaponId>) -> Self {
        Self {
            primary: Some(primary.into()),
            secondary: Some(secondary.into()),
            active: LoadoutSlot::Primary,
        }
    }

    pub fn slot(&self, slot: LoadoutSlot) -> Option<&WeaponId> {
        match slot {
            LoadoutSlot::Primary => self.primary.as_ref(),
            LoadoutSlot::Secondary => self.secondary.as_ref(),
        }
    }
}

impl Default for WeaponLoadout {
    fn default() -> Self {
        Self::new("rifle", "grenade_launcher")
    }
}

/// Оружие в руках (None = безоружен)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CurrentWeapon {
    pub weapon: Option<Entity>,
}

/// Event: сменить оружие на альтернативный слот
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchWeaponIntent {
    pub entity: Entity,
}

/// Event: оружие в руках сменилось
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponEquipped {
    pub entity: Entity,
    pub weapon: Entity,
    pub id: WeaponId,
}

fn equip(
    commands: &mut Commands,
    definitions: &WeaponDefinitions,
    owner: Entity,
    id: &WeaponId,
) -> Option<Entity> {
    let Some(definition) = definitions.get(id) else {
        log_warning(&format!("Loadout: unknown weapon {:?} for {:?}", id, owner));
        return None;
    };

    Some(spawn_weapon(commands, owner, id, definition))
}

/// Система: стартовое оружие (BeginPlay) — spawn активного слота
pub fn equip_starting_weapons(
    mut commands: Commands,
    mut characters: Query<(Entity, &WeaponLoadout, &mut CurrentWeapon), Added<WeaponLoadout>>,
    definitions: Res<WeaponDefinitions>,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for (entity, loadout, mut current) in characters.iter_mut() {
        if current.weapon.is_some() {
            continue;
        }

        let Some(id) = loadout.slot(loadout.active) else {
            continue;
        };

        let Some(weapon) = equip(&mut commands, &definitions, entity, id) else {
            continue;
        };

        current.weapon = Some(weapon);
        log(&format!("🔫 {:?} equipped starting weapon {:?} ({:?})", entity, id, weapon));
        equipped_events.write(WeaponEquipped {
            entity,
            weapon,
            id: id.clone(),
        });
    }
}

/// Система: SwitchWeaponIntent → despawn текущего, spawn альтернативного
///
/// Альтернативный слот не настроен/неизвестен → switch no-op (текущее оружие остаётся).
pub fn process_weapon_switch(
    mut commands: Commands,
    mut intents: EventReader<SwitchWeaponIntent>,
    mut characters: Query<(&mut WeaponLoadout, &mut CurrentWeapon)>,
    definitions: Res<WeaponDefinitions>,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for intent in intents.read() {
        let Ok((mut loadout, mut current)) = characters.get_mut(intent.entity) else {
            continue;
        };

        let next_slot = loadout.active.other();
        let Some(id) = loadout.slot(next_slot).cloned() else {
            log(&format!("Loadout: {:?} has no weapon in {:?}", intent.entity, next_slot));
            continue;
        };

        if definitions.get(&id).is_none() {
            log_warning(&format!("Loadout: unknown weapon {:?} for {:?}", id, intent.entity));
            continue;
        }

        if let Some(old) = current.weapon.take() {
            commands.entity(old).despawn();
        }

        let Some(weapon) = equip(&mut commands, &definitions, intent.entity, &id) else {
            continue;
        };

        current.weapon = Some(weapon);
        loadout.active = next_slot;

        log(&format!("🔁 {:?} switched to {:?} ({:?})", intent.entity, id, weapon));
        equipped_events.write(WeaponEquipped {
            entity: intent.entity,
            weapon,
            id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_toggle() {
        assert_eq!(LoadoutSlot::Primary.other(), LoadoutSlot::Secondary);
        assert_eq!(LoadoutSlot::Secondary.other(), LoadoutSlot::Primary);
    }

    #[test]
    fn test_default_loadout() {
        let loadout = WeaponLoadout::default();
        assert_eq!(loadout.active, LoadoutSlot::Primary);
        assert_eq!(loadout.slot(LoadoutSlot::Primary), Some(&WeaponId::from("rifle")));
        assert_eq!(
            loadout.slot(LoadoutSlot::Secondary),
            Some(&WeaponId::from("grenade_launcher"))
        );
    }
}
