use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryType {
    Ankle,
    Knee,
    Shoulder,
    Concussion,
    Hamstring,
}

impl InjuryType {
    pub fn describe(self) -> &'static str {
        match self {
            InjuryType::Ankle => "ankle",
            InjuryType::Knee => "knee",
            InjuryType::Shoulder => "shoulder",
            InjuryType::Concussion => "head",
            InjuryType::Hamstring => "hamstring",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InjurySeverity {
    Minor,
    Moderate,
    GameEnding,
}

impl InjurySeverity {
    /// Moderate and game-ending injuries take the player off the field immediately.
    pub fn requires_removal(self) -> bool {
        !matches!(self, InjurySeverity::Minor)
    }
}

/// Sentinel for injuries that last until the recovery tracker clears them.
pub const INDEFINITE_PLAYS: u32 = u32::MAX;

/// An injury sustained during a play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injury {
    pub injury_type: InjuryType,
    pub severity: InjurySeverity,
    pub injured_player: PlayerId,
    pub play_number: u32,
    pub removed_from_play: bool,
    pub plays_until_return: u32,
    /// Filled by the substitution collaborator
    pub replacement_player: Option<PlayerId>,
}

impl Injury {
    pub fn reference(&self) -> InjuryRef {
        InjuryRef {
            play_number: self.play_number,
            severity: self.severity,
        }
    }
}

/// Weak link from a player to the injury they are carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryRef {
    pub play_number: u32,
    pub severity: InjurySeverity,
}
