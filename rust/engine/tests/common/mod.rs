#![allow(dead_code)]

use gridiron_engine::errors::SimError;
use gridiron_engine::game::{Down, Game, Possession};
use gridiron_engine::play::{Play, PlayType};
use gridiron_engine::play_result::{apply_play_result, next_snap, NextSnap};
use gridiron_engine::player::{Player, Position};
use gridiron_engine::plays;
use gridiron_engine::replay::{IntRangeEntry, ReplayLog, ReplayRandom};
use gridiron_engine::rng::RandomSource;
use gridiron_engine::tuning::Tuning;

/// Source that hands back exactly `doubles`, in order.
pub fn scripted(doubles: &[f64]) -> ReplayRandom {
    scripted_full(doubles, &[], &[])
}

/// Source with all three streams scripted. Ranges are `(min, max, value)`.
pub fn scripted_full(doubles: &[f64], ints: &[i32], ranges: &[(i32, i32, i32)]) -> ReplayRandom {
    let mut log = ReplayLog::new(0);
    log.doubles = doubles.to_vec();
    log.ints = ints.to_vec();
    log.int_ranges = ranges
        .iter()
        .map(|&(min, max, value)| IntRangeEntry { min, max, value })
        .collect();
    ReplayRandom::replay(log)
}

/// Tuning with flags and injuries switched off. Their checks still draw.
pub fn quiet_tuning() -> Tuning {
    let mut t = Tuning::default();
    t.penalties.frequency_scale = 0.0;
    let i = &mut t.injuries;
    i.run_base = 0.0;
    i.pass_base = 0.0;
    i.sack_base = 0.0;
    i.kickoff_base = 0.0;
    i.punt_base = 0.0;
    i.field_goal_base = 0.0;
    t
}

fn base(team: Possession) -> u32 {
    match team {
        Possession::Home => 0,
        Possession::Away => 100,
    }
}

fn unit(team: Possession, first_id: u32, positions: &[Position]) -> Vec<Player> {
    let side = match team {
        Possession::Home => "H",
        Possession::Away => "A",
    };
    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let id = base(team) + first_id + i as u32;
            Player::new(id, format!("{side}-{pos:?}-{id}"), pos)
        })
        .collect()
}

pub fn offense(team: Possession) -> Vec<Player> {
    use Position::*;
    unit(team, 1, &[QB, RB, WR, WR, WR, TE, C, G, G, T, T])
}

pub fn defense(team: Possession) -> Vec<Player> {
    use Position::*;
    unit(team, 21, &[DE, DE, DT, DT, LB, OLB, LB, CB, CB, S, FS])
}

/// Eleven on the field for a punt, kickoff or placekick.
pub fn kicking_unit(team: Possession) -> Vec<Player> {
    use Position::*;
    let mut players = unit(team, 41, &[K, P, LS, H, TE, G, G, T, LB, LB, CB]);
    players[0].kicking = 80;
    players[1].kicking = 75;
    players[2].blocking = 70;
    players
}

pub fn return_unit(team: Possession) -> Vec<Player> {
    use Position::*;
    let mut players = unit(team, 61, &[WR, RB, CB, CB, S, LB, LB, DE, DE, DT, TE]);
    players[0].speed = 85;
    players[0].agility = 80;
    players[0].catching = 75;
    players
}

/// Both sides for `play_type` with `team` snapping or kicking.
pub fn units_for(play_type: PlayType, team: Possession) -> (Vec<Player>, Vec<Player>) {
    if play_type.is_kick() {
        (kicking_unit(team), return_unit(team.opponent()))
    } else {
        (offense(team), defense(team.opponent()))
    }
}

pub fn situation(fp: i32, down: Down, ytg: i32) -> Game {
    let mut g = Game::new(Possession::Home);
    g.field_position = fp;
    g.down = down;
    g.yards_to_go = ytg;
    g
}

/// Snaps `next` from the current situation and applies the result.
///
/// Kicks on fourth down, throws on third and long, runs otherwise.
pub fn snap(
    game: &mut Game,
    next: &mut NextSnap,
    rng: &mut dyn RandomSource,
    tuning: &Tuning,
) -> Result<Play, SimError> {
    let play_type = match *next {
        NextSnap::Kickoff => PlayType::Kickoff,
        NextSnap::ExtraPoint => PlayType::FieldGoal,
        NextSnap::Scrimmage => match game.down {
            Down::Fourth if game.field_position >= 62 => PlayType::FieldGoal,
            Down::Fourth => PlayType::Punt,
            Down::Third => PlayType::Pass,
            _ if game.yards_to_go > 6 => PlayType::Pass,
            _ => PlayType::Run,
        },
    };
    let (off, def) = units_for(play_type, game.possession);
    let mut play = match *next {
        NextSnap::ExtraPoint => Play::extra_point(game, off, def),
        _ => Play::new(play_type, game, off, def),
    };
    plays::resolve(&mut play, game, rng, tuning)?;
    let enforcement = apply_play_result(game, &mut play, tuning);
    *next = next_snap(&play, enforcement, *next);
    Ok(play)
}

/// A game from the opening kickoff.
pub struct Driver {
    pub game: Game,
    pub next: NextSnap,
    pub tuning: Tuning,
}

impl Driver {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            game: Game::new(Possession::Home),
            next: NextSnap::Kickoff,
            tuning,
        }
    }

    pub fn step(&mut self, rng: &mut dyn RandomSource) -> Result<Play, SimError> {
        snap(&mut self.game, &mut self.next, rng, &self.tuning)
    }
}
