//! Sound effect identifiers
//!
//! Playback belongs to the host; the simulation only names which effect fires.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    /// Racer destroyed
    PlayerDie,
    /// Racer fires holy water
    PlayerSpray,
    /// Racer scrapes a road edge, or a cab rams the racer
    VehicleCrash,
    /// Cab hit by spray but still running
    VehicleHurt,
    /// Cab destroyed
    VehicleDie,
    /// Pedestrian hit
    PedHurt,
    /// Pedestrian killed
    PedDie,
    /// Zombie lunges at the racer
    ZombieAttack,
    /// Generic pickup collected
    GotGoodie,
    /// Lost soul rescued
    GotSoul,
    /// Racer skids over an oil slick
    OilSlick,
}

impl SoundId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::PlayerDie => "player_die",
            SoundId::PlayerSpray => "player_spray",
            SoundId::VehicleCrash => "vehicle_crash",
            SoundId::VehicleHurt => "vehicle_hurt",
            SoundId::VehicleDie => "vehicle_die",
            SoundId::PedHurt => "ped_hurt",
            SoundId::PedDie => "ped_die",
            SoundId::ZombieAttack => "zombie_attack",
            SoundId::GotGoodie => "got_goodie",
            SoundId::GotSoul => "got_soul",
            SoundId::OilSlick => "oil_slick",
        }
    }
}
