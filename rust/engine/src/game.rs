use serde::{Deserialize, Serialize};

/// Which team has the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Possession {
    Home,
    Away,
}

impl Possession {
    pub fn opponent(self) -> Self {
        match self {
            Possession::Home => Possession::Away,
            Possession::Away => Possession::Home,
        }
    }
}

/// Attempt number within a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Down {
    First,
    Second,
    Third,
    Fourth,
}

impl Down {
    /// The following down, or `None` after fourth down.
    pub fn next(self) -> Option<Down> {
        match self {
            Down::First => Some(Down::Second),
            Down::Second => Some(Down::Third),
            Down::Third => Some(Down::Fourth),
            Down::Fourth => None,
        }
    }

    pub fn ordinal(self) -> &'static str {
        match self {
            Down::First => "1st",
            Down::Second => "2nd",
            Down::Third => "3rd",
            Down::Fourth => "4th",
        }
    }
}

/// Goal line the offense defends.
pub const OWN_GOAL_LINE: i32 = 0;
/// Goal line the offense attacks.
pub const OPPONENT_GOAL_LINE: i32 = 100;
/// Distance needed for a fresh set of downs.
pub const FIRST_DOWN_DISTANCE: i32 = 10;
/// Spot after a ball dies in the end zone of the team that just gained it.
pub const TOUCHBACK_SPOT: i32 = 20;

/// Situational context threaded explicitly through every play resolution.
///
/// `field_position` is measured from the goal line of the team in `possession`,
/// which is the team that snaps or kicks next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub home_score: u32,
    pub away_score: u32,
    /// Team that puts the ball in play next
    pub possession: Possession,
    /// 0 = own goal line, 100 = opponent's goal line
    pub field_position: i32,
    pub down: Down,
    pub yards_to_go: i32,
    /// Plays resolved so far; stamps injuries with their play number
    pub plays_run: u32,
}

impl Game {
    pub fn new(possession: Possession) -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            possession,
            field_position: 25,
            down: Down::First,
            yards_to_go: FIRST_DOWN_DISTANCE,
            plays_run: 0,
        }
    }

    pub fn score_of(&self, team: Possession) -> u32 {
        match team {
            Possession::Home => self.home_score,
            Possession::Away => self.away_score,
        }
    }

    pub fn add_score(&mut self, team: Possession, points: u32) {
        match team {
            Possession::Home => self.home_score += points,
            Possession::Away => self.away_score += points,
        }
    }

    /// Points `team` trails by; negative when leading.
    pub fn deficit_of(&self, team: Possession) -> i64 {
        self.score_of(team.opponent()) as i64 - self.score_of(team) as i64
    }

    /// Hands the ball to `team` at `field_position` with a fresh series.
    pub fn start_series(&mut self, team: Possession, field_position: i32) {
        self.possession = team;
        self.field_position = field_position.clamp(OWN_GOAL_LINE, OPPONENT_GOAL_LINE);
        self.down = Down::First;
        self.yards_to_go = FIRST_DOWN_DISTANCE;
    }

    pub fn yards_to_goal(&self) -> i32 {
        OPPONENT_GOAL_LINE - self.field_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_progression_stops_after_fourth() {
        assert_eq!(Down::First.next(), Some(Down::Second));
        assert_eq!(Down::Third.next(), Some(Down::Fourth));
        assert_eq!(Down::Fourth.next(), None);
    }

    #[test]
    fn start_series_resets_down_and_distance() {
        let mut g = Game::new(Possession::Home);
        g.down = Down::Third;
        g.yards_to_go = 4;
        g.start_series(Possession::Away, 130);
        assert_eq!(g.possession, Possession::Away);
        assert_eq!(g.field_position, 100);
        assert_eq!((g.down, g.yards_to_go), (Down::First, 10));
    }

    #[test]
    fn deficit_is_signed() {
        let mut g = Game::new(Possession::Home);
        g.add_score(Possession::Away, 7);
        assert_eq!(g.deficit_of(Possession::Home), 7);
        assert_eq!(g.deficit_of(Possession::Away), -7);
    }
}
