//! Attachment компоненты: к какому сокету host-меша привязан entity

use bevy::prelude::*;

/// Сокет на скелете персонажа, куда крепится оружие
pub const WEAPON_ATTACH_SOCKET: &str = "WeaponSocket";

/// Attachment — привязка entity к сокету родителя (`ChildOf`)
///
/// ECS хранит только имя сокета, реальную позицию сокета знает host.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Attachment {
    /// Имя сокета на меше родителя (например "WeaponSocket")
    pub socket: String,
}

impl Default for Attachment {
    fn default() -> Self {
        Self::weapon()
    }
}

impl Attachment {
    /// Attachment для оружия в руках персонажа
    pub fn weapon() -> Self {
        Self {
            socket: WEAPON_ATTACH_SOCKET.into(),
        }
    }
}
