//! Built-in rosters for the two sides.
//!
//! Each team fields four fixed units: offense, defense, a kicking unit and a
//! return unit. Ids are stable across plays so injuries and logs can refer to
//! the same player; home ids start at 1, away ids at 101.

use gridiron_engine::game::Possession;
use gridiron_engine::play::PlayType;
use gridiron_engine::player::{Player, Position};

const OFFENSE: [Position; 11] = {
    use Position::*;
    [QB, RB, WR, WR, WR, TE, C, G, G, T, T]
};
const DEFENSE: [Position; 11] = {
    use Position::*;
    [DE, DE, DT, DT, LB, OLB, LB, CB, CB, S, FS]
};
const KICKING: [Position; 11] = {
    use Position::*;
    [K, P, LS, H, TE, G, G, T, LB, LB, CB]
};
const RETURN: [Position; 11] = {
    use Position::*;
    [WR, RB, CB, CB, S, LB, LB, DE, DE, DT, TE]
};

/// Ratings for a player at `pos`, nudged by `edge` so the two teams differ.
fn rate(player: &mut Player, edge: i16) {
    use Position::*;
    let r = |v: i16| (v + edge).clamp(0, 100) as u8;
    let (speed, strength, agility, awareness) = match player.position {
        QB => (62, 55, 60, 80),
        RB | FB => (86, 68, 84, 66),
        WR => (90, 50, 86, 68),
        TE => (72, 74, 66, 64),
        C | G | T => (48, 86, 50, 70),
        DE | DT => (66, 88, 60, 66),
        LB | OLB => (76, 78, 72, 70),
        CB | S | FS => (88, 56, 86, 70),
        K | P | LS | H => (55, 50, 55, 60),
    };
    player.speed = r(speed);
    player.strength = r(strength);
    player.agility = r(agility);
    player.awareness = r(awareness);
    match player.position {
        QB => {
            player.passing = r(82);
        }
        RB | FB => {
            player.rushing = r(84);
            player.catching = r(60);
        }
        WR => {
            player.catching = r(84);
            player.route_running = r(82);
        }
        TE => {
            player.catching = r(70);
            player.blocking = r(70);
            player.route_running = r(66);
        }
        C | G | T | LS => {
            player.blocking = r(80);
        }
        DE | DT => {
            player.tackling = r(78);
            player.aggressiveness = r(80);
        }
        LB | OLB => {
            player.tackling = r(82);
            player.coverage = r(62);
        }
        CB | S | FS => {
            player.coverage = r(80);
            player.tackling = r(64);
            player.catching = r(58);
        }
        K => player.kicking = r(84),
        P => player.kicking = r(78),
        H => player.catching = r(70),
    }
}

fn unit(team: Possession, first: u32, positions: &[Position]) -> Vec<Player> {
    let (base, tag, edge) = match team {
        Possession::Home => (0, "HOM", 2),
        Possession::Away => (100, "AWY", -2),
    };
    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let id = base + first + i as u32;
            let mut p = Player::new(id, format!("{tag} {pos:?} {id}"), pos);
            rate(&mut p, edge);
            p
        })
        .collect()
}

pub fn offense(team: Possession) -> Vec<Player> {
    unit(team, 1, &OFFENSE)
}

pub fn defense(team: Possession) -> Vec<Player> {
    unit(team, 21, &DEFENSE)
}

pub fn kicking_unit(team: Possession) -> Vec<Player> {
    unit(team, 41, &KICKING)
}

pub fn return_unit(team: Possession) -> Vec<Player> {
    unit(team, 61, &RETURN)
}

/// Both sides for a play of `play_type` where `team` snaps or kicks.
pub fn units_for(play_type: PlayType, team: Possession) -> (Vec<Player>, Vec<Player>) {
    if play_type.is_kick() {
        (kicking_unit(team), return_unit(team.opponent()))
    } else {
        (offense(team), defense(team.opponent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_unit_fields_eleven_distinct_players() {
        let mut ids = HashSet::new();
        for team in [Possession::Home, Possession::Away] {
            for unit in [
                offense(team),
                defense(team),
                kicking_unit(team),
                return_unit(team),
            ] {
                assert_eq!(unit.len(), 11);
                for p in unit {
                    assert!(ids.insert(p.id), "duplicate id {}", p.id);
                }
            }
        }
    }

    #[test]
    fn kicks_use_the_special_teams_units() {
        let (kick, ret) = units_for(PlayType::Punt, Possession::Away);
        assert_eq!(kick[1].position, Position::P);
        assert_eq!(ret[0].id.0, 61);
        assert_eq!(kick[1].kicking, 76);
    }
}
