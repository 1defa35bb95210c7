use serde::{Deserialize, Serialize};

use crate::injury::InjuryRef;

/// Stable identity of a player across plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// On-field position. Drives role selection and injury tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    FB,
    WR,
    TE,
    C,
    G,
    T,
    DE,
    DT,
    LB,
    OLB,
    CB,
    S,
    FS,
    K,
    P,
    LS,
    H,
}

impl Position {
    /// Interior and edge blockers used for run blocking.
    pub fn is_run_blocker(self) -> bool {
        matches!(
            self,
            Position::C | Position::G | Position::T | Position::TE | Position::FB
        )
    }

    pub fn is_offensive_line(self) -> bool {
        matches!(self, Position::C | Position::G | Position::T)
    }

    pub fn is_front_seven(self) -> bool {
        matches!(
            self,
            Position::DE | Position::DT | Position::LB | Position::OLB
        )
    }

    pub fn is_defensive_back(self) -> bool {
        matches!(self, Position::CB | Position::S | Position::FS)
    }

    pub fn is_receiver(self) -> bool {
        matches!(self, Position::WR | Position::TE | Position::RB)
    }

    /// Players who field kicks and make open-field tackles on coverage units.
    pub fn is_return_unit(self) -> bool {
        matches!(
            self,
            Position::WR | Position::RB | Position::CB | Position::S | Position::FS
        )
    }

    pub fn is_coverage_unit(self) -> bool {
        matches!(
            self,
            Position::CB | Position::S | Position::FS | Position::LB | Position::WR
        )
    }
}

/// A rated player. Ratings are 0-100; the engine never mutates them mid-play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub speed: u8,
    pub strength: u8,
    pub agility: u8,
    pub awareness: u8,
    pub blocking: u8,
    pub tackling: u8,
    pub catching: u8,
    pub passing: u8,
    pub rushing: u8,
    pub coverage: u8,
    pub kicking: u8,
    pub route_running: u8,
    pub aggressiveness: u8,
    pub potential: u8,
    pub fragility: u8,
    /// Set by the injury-tracking collaborator between plays.
    #[serde(default)]
    pub current_injury: Option<InjuryRef>,
}

/// Neutral rating used for every attribute of a fresh player.
pub const DEFAULT_RATING: u8 = 50;

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position,
            speed: DEFAULT_RATING,
            strength: DEFAULT_RATING,
            agility: DEFAULT_RATING,
            awareness: DEFAULT_RATING,
            blocking: DEFAULT_RATING,
            tackling: DEFAULT_RATING,
            catching: DEFAULT_RATING,
            passing: DEFAULT_RATING,
            rushing: DEFAULT_RATING,
            coverage: DEFAULT_RATING,
            kicking: DEFAULT_RATING,
            route_running: DEFAULT_RATING,
            aggressiveness: DEFAULT_RATING,
            potential: DEFAULT_RATING,
            fragility: DEFAULT_RATING,
            current_injury: None,
        }
    }

    pub fn is_injured(&self) -> bool {
        self.current_injury.is_some()
    }
}

/// First player at `pos`, if any.
pub fn first_at(players: &[Player], pos: Position) -> Option<&Player> {
    players.iter().find(|p| p.position == pos)
}

/// First player matching the preference order, else the first player on the field.
pub fn with_fallback<'a>(players: &'a [Player], order: &[Position]) -> Option<&'a Player> {
    order
        .iter()
        .find_map(|pos| first_at(players, *pos))
        .or_else(|| players.first())
}

/// Mean of `rating` over the players selected by `filter`, or `default` when none match.
pub fn average_rating<F, R>(players: &[Player], filter: F, rating: R, default: f64) -> f64
where
    F: Fn(&Player) -> bool,
    R: Fn(&Player) -> f64,
{
    let (sum, n) = players
        .iter()
        .filter(|p| filter(p))
        .fold((0.0, 0usize), |(s, n), p| (s + rating(p), n + 1));
    if n == 0 {
        default
    } else {
        sum / n as f64
    }
}

/// Up to `n` players selected by `filter`, best `score` first. Ties keep roster order.
pub fn top_by<F, S>(players: &[Player], filter: F, score: S, n: usize) -> Vec<&Player>
where
    F: Fn(&Player) -> bool,
    S: Fn(&Player) -> u32,
{
    let mut picked: Vec<&Player> = players.iter().filter(|p| filter(p)).collect();
    picked.sort_by(|a, b| score(b).cmp(&score(a)));
    picked.truncate(n);
    picked
}
