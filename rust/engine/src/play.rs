//! Play records: the common header every play kind shares plus a closed
//! variant payload. Pipelines in [`crate::plays`] fill these in; the state
//! transition in [`crate::play_result`] consumes them.

use serde::{Deserialize, Serialize};

use crate::game::{Down, Game, Possession};
use crate::injury::Injury;
use crate::penalty::Penalty;
use crate::player::{Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayType {
    Run,
    Pass,
    Kickoff,
    Punt,
    FieldGoal,
}

impl PlayType {
    pub fn is_scrimmage(self) -> bool {
        matches!(self, PlayType::Run | PlayType::Pass)
    }

    pub fn is_kick(self) -> bool {
        !self.is_scrimmage()
    }
}

/// Loose ball on a segment: who lost it and who came up with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fumble {
    pub fumbled_by: PlayerId,
    /// `None` when the ball went out of bounds with the fumbling team
    pub recovered_by: Option<PlayerId>,
    pub recovering_team: Possession,
    pub out_of_bounds: bool,
}

/// One carry. Yards are measured in the direction of `team`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSegment {
    pub ball_carrier: PlayerId,
    pub team: Possession,
    pub yards_gained: i32,
    /// Set when the carrier took a lateral from this player
    pub lateral_from: Option<PlayerId>,
    pub fumble: Option<Fumble>,
}

impl RunSegment {
    pub fn ended_in_fumble(&self) -> bool {
        self.fumble.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassType {
    Screen,
    Short,
    Forward,
    Deep,
    Lateral,
}

/// One throw and what followed it. A lateral segment's passer is the previous
/// segment's receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSegment {
    pub passer: PlayerId,
    pub receiver: Option<PlayerId>,
    pub pass_type: PassType,
    pub air_yards: i32,
    pub yards_after_catch: i32,
    pub yards_gained: i32,
    pub is_complete: bool,
    pub fumble: Option<Fumble>,
}

impl PassSegment {
    pub fn ended_in_fumble(&self) -> bool {
        self.fumble.is_some()
    }
}

/// A return leg after a kick, interception, or change of possession on a fumble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnSegment {
    pub ball_carrier: PlayerId,
    pub team: Possession,
    pub yards_gained: i32,
    pub fumble: Option<Fumble>,
}

impl ReturnSegment {
    pub fn ended_in_fumble(&self) -> bool {
        self.fumble.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionDetails {
    pub intercepted_by: PlayerId,
    pub thrown_by: PlayerId,
    /// Catch spot in the intercepting team's frame
    pub interception_spot: i32,
    pub return_yards: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunDirection {
    LeftEnd,
    LeftTackle,
    LeftGuard,
    UpTheMiddle,
    RightGuard,
    RightTackle,
    RightEnd,
    Sweep,
    Cutback,
}

impl RunDirection {
    pub const ALL: [RunDirection; 9] = [
        RunDirection::LeftEnd,
        RunDirection::LeftTackle,
        RunDirection::LeftGuard,
        RunDirection::UpTheMiddle,
        RunDirection::RightGuard,
        RunDirection::RightTackle,
        RunDirection::RightEnd,
        RunDirection::Sweep,
        RunDirection::Cutback,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            RunDirection::LeftEnd => "around left end",
            RunDirection::LeftTackle => "off left tackle",
            RunDirection::LeftGuard => "behind the left guard",
            RunDirection::UpTheMiddle => "up the middle",
            RunDirection::RightGuard => "behind the right guard",
            RunDirection::RightTackle => "off right tackle",
            RunDirection::RightEnd => "around right end",
            RunDirection::Sweep => "on a sweep",
            RunDirection::Cutback => "on a cutback",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetails {
    pub direction: Option<RunDirection>,
    pub is_scramble: bool,
    pub blocking_succeeded: bool,
    pub segments: Vec<RunSegment>,
    /// Legs run by the other team after a fumble recovery
    pub return_segments: Vec<ReturnSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassDetails {
    pub is_sack: bool,
    pub pressured: bool,
    pub segments: Vec<PassSegment>,
    pub interception: Option<InterceptionDetails>,
    pub return_segments: Vec<ReturnSegment>,
}

/// Shared payload of kickoffs and punts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KickDetails {
    pub kicker: Option<PlayerId>,
    pub returner: Option<PlayerId>,
    pub kick_distance: i32,
    pub hang_time: Option<f64>,
    pub good_snap: bool,
    pub touchback: bool,
    pub fair_catch: bool,
    pub onside_kick: bool,
    pub onside_recovered: bool,
    pub muffed_catch: bool,
    pub out_of_bounds: bool,
    pub downed: bool,
    pub blocked_by: Option<PlayerId>,
    pub recovered_by: Option<PlayerId>,
    pub return_segments: Vec<ReturnSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGoalDetails {
    pub kicker: Option<PlayerId>,
    pub holder: Option<PlayerId>,
    pub attempt_distance: i32,
    pub is_good: bool,
    pub is_extra_point: bool,
    pub good_snap: bool,
    pub blocked_by: Option<PlayerId>,
    pub recovered_by: Option<PlayerId>,
    pub return_segments: Vec<ReturnSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayKind {
    Run(RunDetails),
    Pass(PassDetails),
    Kickoff(KickDetails),
    Punt(KickDetails),
    FieldGoal(FieldGoalDetails),
}

impl PlayKind {
    pub fn empty(play_type: PlayType) -> Self {
        match play_type {
            PlayType::Run => PlayKind::Run(RunDetails::default()),
            PlayType::Pass => PlayKind::Pass(PassDetails::default()),
            PlayType::Kickoff => PlayKind::Kickoff(KickDetails::default()),
            PlayType::Punt => PlayKind::Punt(KickDetails::default()),
            PlayType::FieldGoal => PlayKind::FieldGoal(FieldGoalDetails::default()),
        }
    }

    pub fn play_type(&self) -> PlayType {
        match self {
            PlayKind::Run(_) => PlayType::Run,
            PlayKind::Pass(_) => PlayType::Pass,
            PlayKind::Kickoff(_) => PlayType::Kickoff,
            PlayKind::Punt(_) => PlayType::Punt,
            PlayKind::FieldGoal(_) => PlayType::FieldGoal,
        }
    }
}

/// A single snap or kick.
///
/// `possession`, `down`, `yards_to_go` and `start_field_position` are the
/// situation before the play, in the frame of the team snapping or kicking.
/// `end_field_position` is in the frame of `end_possession`, the team holding
/// the ball when it became dead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub kind: PlayKind,
    pub possession: Possession,
    pub down: Down,
    pub yards_to_go: i32,
    pub start_field_position: i32,
    pub end_field_position: i32,
    pub end_possession: Possession,
    /// Net yards for the snapping team before any change of possession
    pub yards_gained: i32,
    /// Seconds the ball was live
    pub elapsed_time: f64,
    pub possession_change: bool,
    pub is_touchdown: bool,
    pub is_safety: bool,
    pub blocked: bool,
    /// Killed before the snap by a dead-ball foul
    pub no_play: bool,
    pub penalties: Vec<Penalty>,
    pub injuries: Vec<Injury>,
    pub offense_on_field: Vec<Player>,
    pub defense_on_field: Vec<Player>,
    /// Play-by-play narrative
    pub commentary: Vec<String>,
}

impl Play {
    pub fn new(
        play_type: PlayType,
        game: &Game,
        offense_on_field: Vec<Player>,
        defense_on_field: Vec<Player>,
    ) -> Self {
        Self {
            kind: PlayKind::empty(play_type),
            possession: game.possession,
            down: game.down,
            yards_to_go: game.yards_to_go,
            start_field_position: game.field_position,
            end_field_position: game.field_position,
            end_possession: game.possession,
            yards_gained: 0,
            elapsed_time: 0.0,
            possession_change: false,
            is_touchdown: false,
            is_safety: false,
            blocked: false,
            no_play: false,
            penalties: Vec::new(),
            injuries: Vec::new(),
            offense_on_field,
            defense_on_field,
            commentary: Vec::new(),
        }
    }

    /// Try after a touchdown, kicked from a fixed distance.
    pub fn extra_point(game: &Game, offense: Vec<Player>, defense: Vec<Player>) -> Self {
        let mut play = Self::new(PlayType::FieldGoal, game, offense, defense);
        play.kind = PlayKind::FieldGoal(FieldGoalDetails {
            is_extra_point: true,
            ..FieldGoalDetails::default()
        });
        play
    }

    pub fn play_type(&self) -> PlayType {
        self.kind.play_type()
    }

    pub fn is_extra_point(&self) -> bool {
        matches!(&self.kind, PlayKind::FieldGoal(fg) if fg.is_extra_point)
    }

    /// Team credited with a touchdown or conceding a safety.
    pub fn scoring_team(&self) -> Option<Possession> {
        if self.is_touchdown {
            Some(self.end_possession)
        } else if self.is_safety {
            Some(self.end_possession.opponent())
        } else {
            None
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.offense_on_field
            .iter()
            .chain(self.defense_on_field.iter())
            .find(|p| p.id == id)
    }

    /// One-line summary used by logs and the CLI.
    pub fn summary(&self) -> String {
        let kind = match self.play_type() {
            PlayType::Run => "run",
            PlayType::Pass => "pass",
            PlayType::Kickoff => "kickoff",
            PlayType::Punt => "punt",
            PlayType::FieldGoal if self.is_extra_point() => "extra point",
            PlayType::FieldGoal => "field goal",
        };
        let mut s = format!(
            "{} {}&{} at {}: {} yds",
            kind,
            self.down.ordinal(),
            self.yards_to_go,
            self.start_field_position,
            self.yards_gained
        );
        if self.is_touchdown {
            s.push_str(", touchdown");
        }
        if self.is_safety {
            s.push_str(", safety");
        }
        if self.possession_change {
            s.push_str(", change of possession");
        }
        if !self.penalties.is_empty() {
            s.push_str(&format!(", {} flag(s)", self.penalties.len()));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_play_copies_situation() {
        let mut g = Game::new(Possession::Away);
        g.field_position = 42;
        g.down = Down::Third;
        g.yards_to_go = 7;
        let p = Play::new(PlayType::Pass, &g, Vec::new(), Vec::new());
        assert_eq!(p.possession, Possession::Away);
        assert_eq!(p.start_field_position, 42);
        assert_eq!((p.down, p.yards_to_go), (Down::Third, 7));
        assert_eq!(p.play_type(), PlayType::Pass);
    }

    #[test]
    fn extra_point_is_flagged() {
        let g = Game::new(Possession::Home);
        let p = Play::extra_point(&g, Vec::new(), Vec::new());
        assert!(p.is_extra_point());
        assert_eq!(p.play_type(), PlayType::FieldGoal);
    }

    #[test]
    fn scoring_team_follows_end_possession() {
        let g = Game::new(Possession::Home);
        let mut p = Play::new(PlayType::Run, &g, Vec::new(), Vec::new());
        p.is_safety = true;
        assert_eq!(p.scoring_team(), Some(Possession::Away));
        p.is_safety = false;
        p.is_touchdown = true;
        p.end_possession = Possession::Away;
        assert_eq!(p.scoring_team(), Some(Possession::Away));
    }
}
