//! Play pipelines. Each play kind chains checks and results in a fixed order
//! and records what happened on the [`Play`].
//!
//! Draw order is part of the contract: a replay log recorded by one build can
//! only be replayed by a build that asks for the same draws in the same order.
//! Every pipeline module lists its sequence at the top.

pub mod field_goal;
pub mod kickoff;
pub mod pass;
pub mod punt;
pub mod run;

use tracing::{debug, info};

use crate::checks::{FlatCheck, FumbleCheck, FumbleContext, InjuryCheck, PenaltyCheck, SkillsCheck};
use crate::enforcement::accept_on_play;
use crate::errors::SimError;
use crate::game::{Game, Possession, OPPONENT_GOAL_LINE, OWN_GOAL_LINE, TOUCHBACK_SPOT};
use crate::penalty::PenaltyName;
use crate::play::{Fumble, PassSegment, PassType, Play, PlayType, ReturnSegment, RunSegment};
use crate::player::{top_by, Player, PlayerId};
use crate::results::{
    BonusYardsResult, ElapsedTimeResult, FumbleRecoveryResult, InjuryEffectResult,
    PenaltyEffectResult, SkillsCheckResult,
};
use crate::rng::RandomSource;
use crate::tuning::Tuning;

/// Longest fumble/lateral chain a single play can produce.
pub const MAX_SEGMENTS: usize = 11;

/// Resolves one play in place.
///
/// Scrimmage plays first roll for a pre-snap flag; a dead-ball foul kills the
/// play before the snap. Afterwards each flag is marked accepted or declined.
pub fn resolve(
    play: &mut Play,
    game: &Game,
    rng: &mut dyn RandomSource,
    tuning: &Tuning,
) -> Result<(), SimError> {
    let ctx = PlayContext::new(play, game, tuning);
    let mut dead_before_snap = false;
    if play.play_type().is_scrimmage() {
        if let Some(name) = ctx.flag(play, PenaltyCheck::pre_snap(), 0, rng)? {
            dead_before_snap = name.is_dead_ball();
        }
    }

    if dead_before_snap {
        play.no_play = true;
        play.commentary.push("Whistle before the snap.".to_string());
    } else {
        match play.play_type() {
            PlayType::Run => run::resolve(play, &ctx, rng)?,
            PlayType::Pass => pass::resolve(play, &ctx, rng)?,
            PlayType::Kickoff => kickoff::resolve(play, game, &ctx, rng)?,
            PlayType::Punt => punt::resolve(play, &ctx, rng)?,
            PlayType::FieldGoal => field_goal::resolve(play, &ctx, rng)?,
        }
    }

    for i in 0..play.penalties.len() {
        let accepted = accept_on_play(game, play, &play.penalties[i]);
        play.penalties[i].accepted = accepted;
    }
    info!(
        play = play.summary().as_str(),
        elapsed = play.elapsed_time,
        "play resolved"
    );
    Ok(())
}

/// The ball while it is alive, tracked in the frame of whoever holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveBall {
    pub holder: Possession,
    pub position: i32,
    /// The holder put the ball where it is; decides safety versus touchback
    own_momentum: bool,
    pub touchdown: bool,
    pub safety: bool,
    pub touchback: bool,
    /// Spot, in the losing team's frame, where the ball first changed hands
    pub first_turnover_spot: Option<i32>,
}

impl LiveBall {
    /// Ball snapped by `holder` at `position`.
    pub fn snap(holder: Possession, position: i32) -> Self {
        Self {
            holder,
            position,
            own_momentum: true,
            touchdown: false,
            safety: false,
            touchback: false,
            first_turnover_spot: None,
        }
    }

    /// Kicked ball secured by `holder` at `position`.
    pub fn caught(holder: Possession, position: i32) -> Self {
        Self {
            own_momentum: false,
            ..Self::snap(holder, position)
        }
    }

    pub fn is_dead(&self) -> bool {
        self.touchdown || self.safety || self.touchback
    }

    /// Carries the ball toward the holder's goal and returns the yards covered.
    ///
    /// Reaching 100 is a touchdown. Reaching 0 is a safety when the holder
    /// drove it there, a touchback when it arrived from the other team.
    pub fn advance(&mut self, yards: i32) -> i32 {
        let from = self.position;
        let target = from + yards;
        if target >= OPPONENT_GOAL_LINE {
            self.position = OPPONENT_GOAL_LINE;
            self.touchdown = true;
        } else if target <= OWN_GOAL_LINE {
            self.position = OWN_GOAL_LINE;
            if self.own_momentum {
                self.safety = true;
            } else {
                self.touchback = true;
            }
        } else {
            self.position = target;
        }
        let moved = self.position - from;
        if self.touchback {
            self.position = TOUCHBACK_SPOT;
        }
        moved
    }

    /// The ball squirts loose `bounce` yards in the holder's direction.
    pub fn loose(&mut self, bounce: i32) {
        self.position = (self.position + bounce).clamp(OWN_GOAL_LINE, OPPONENT_GOAL_LINE);
    }

    /// `team` falls on the loose ball where it lies.
    pub fn recover(&mut self, team: Possession) {
        if team == self.holder {
            self.own_momentum = true;
        } else {
            self.first_turnover_spot.get_or_insert(self.position);
            self.holder = team;
            self.position = OPPONENT_GOAL_LINE - self.position;
            self.own_momentum = false;
        }
        if self.position >= OPPONENT_GOAL_LINE {
            self.touchdown = true;
        }
    }

    /// `team` catches the ball out of the air at `spot`, in its own frame.
    pub fn intercept(&mut self, team: Possession, spot: i32) {
        self.first_turnover_spot.get_or_insert(self.position);
        self.holder = team;
        self.position = spot.clamp(OWN_GOAL_LINE, OPPONENT_GOAL_LINE);
        self.own_momentum = false;
    }

    /// Net yards for the team that snapped, from `start`, before any change of hands.
    pub fn net_yards(&self, snapper: Possession, start: i32) -> i32 {
        match self.first_turnover_spot {
            Some(spot) => spot - start,
            None if self.holder == snapper => self.position - start,
            None => 0,
        }
    }
}

/// One carry inside a play, before it is stored as a segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub carrier: PlayerId,
    pub team: Possession,
    pub yards: i32,
    pub lateral_from: Option<PlayerId>,
    pub fumble: Option<Fumble>,
}

impl Leg {
    pub fn new(carrier: PlayerId, team: Possession, yards: i32) -> Self {
        Self {
            carrier,
            team,
            yards,
            lateral_from: None,
            fumble: None,
        }
    }

    pub fn into_run_segment(self) -> RunSegment {
        RunSegment {
            ball_carrier: self.carrier,
            team: self.team,
            yards_gained: self.yards,
            lateral_from: self.lateral_from,
            fumble: self.fumble,
        }
    }

    /// A pitch after the catch, or a teammate scooping up a loose ball.
    pub fn into_lateral_segment(self, previous: PlayerId) -> PassSegment {
        PassSegment {
            passer: self.lateral_from.unwrap_or(previous),
            receiver: Some(self.carrier),
            pass_type: PassType::Lateral,
            air_yards: 0,
            yards_after_catch: self.yards,
            yards_gained: self.yards,
            is_complete: true,
            fumble: self.fumble,
        }
    }

    pub fn into_return_segment(self) -> ReturnSegment {
        ReturnSegment {
            ball_carrier: self.carrier,
            team: self.team,
            yards_gained: self.yards,
            fumble: self.fumble,
        }
    }
}

/// Bodies around the ball at the end of a carry. Short gains end in pile-ups.
pub fn pile_size(yards: i32) -> u32 {
    match yards {
        i32::MIN..=2 => 3,
        3..=6 => 2,
        _ => 1,
    }
}

/// How the ball carrier went down, for the injury check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    pub sack: bool,
    pub defenders: u32,
    pub big_play: bool,
    pub out_of_bounds: bool,
}

impl Contact {
    pub fn after_gain(yards: i32, tuning: &Tuning) -> Self {
        Self {
            sack: false,
            defenders: pile_size(yards),
            big_play: yards >= tuning.injuries.big_play_yards,
            out_of_bounds: false,
        }
    }
}

/// Everything a pipeline reads but never changes while it runs.
#[derive(Debug, Clone)]
pub struct PlayContext<'a> {
    /// Team that snapped or kicked
    pub team: Possession,
    pub play_type: PlayType,
    /// Number stamped on injuries from this play
    pub play_number: u32,
    pub offense: Vec<Player>,
    pub defense: Vec<Player>,
    pub tuning: &'a Tuning,
}

impl<'a> PlayContext<'a> {
    pub fn new(play: &Play, game: &Game, tuning: &'a Tuning) -> Self {
        Self {
            team: play.possession,
            play_type: play.play_type(),
            play_number: game.plays_run + 1,
            offense: play.offense_on_field.clone(),
            defense: play.defense_on_field.clone(),
            tuning,
        }
    }

    pub fn players_of(&self, team: Possession) -> &[Player] {
        if team == self.team {
            &self.offense
        } else {
            &self.defense
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.offense
            .iter()
            .chain(self.defense.iter())
            .find(|p| p.id == id)
    }

    pub fn name(&self, id: PlayerId) -> &str {
        self.player(id).map(|p| p.name.as_str()).unwrap_or("someone")
    }

    /// Two healthy defenders closest to the ball, by pursuit.
    pub fn tacklers(&self, team: Possession) -> Vec<&Player> {
        top_by(
            self.players_of(team),
            |p| !p.is_injured(),
            |p| p.speed as u32 + p.tackling as u32,
            2,
        )
    }

    /// Two fastest, strongest pass rushers coming at the kicker.
    pub fn rushers(&self) -> Vec<&Player> {
        top_by(
            &self.defense,
            |p| p.position.is_front_seven() && !p.is_injured(),
            |p| p.speed as u32 + p.strength as u32,
            2,
        )
    }

    /// Rolls a penalty check and records the foul when it fires.
    pub fn flag(
        &self,
        play: &mut Play,
        check: PenaltyCheck,
        spot_yards: i32,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<PenaltyName>, SimError> {
        let rolled = check.resolve(rng, self.tuning)?;
        let Some(name) = rolled.penalty else {
            return Ok(None);
        };
        let penalty = PenaltyEffectResult {
            name,
            context: check.context,
            offense: self.team,
            offense_players: &self.offense,
            defense_players: &self.defense,
            spot_yards,
        }
        .execute(rng, self.tuning)?;
        let who = penalty
            .committed_by
            .map(|id| format!(", {}", self.name(id)))
            .unwrap_or_default();
        play.commentary.push(format!(
            "Flag: {} on {:?}{}.",
            name.label(),
            penalty.called_on,
            who
        ));
        play.penalties.push(penalty);
        Ok(Some(name))
    }

    /// Injury checks for the ball carrier and, behind a gate each, the tacklers.
    pub fn check_injuries(
        &self,
        play: &mut Play,
        carrier: Option<&Player>,
        tacklers: &[&Player],
        contact: Contact,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        if let Some(c) = carrier {
            self.injury_check(play, c, contact, rng)?;
        }
        let gate = FlatCheck::new("tackler_injury_gate", self.tuning.injuries.tackler_check_gate);
        for t in tacklers {
            if t.is_injured() || play.injuries.iter().any(|i| i.injured_player == t.id) {
                continue;
            }
            if gate.execute(rng, self.tuning)?.occurred {
                self.injury_check(play, t, contact, rng)?;
            }
        }
        Ok(())
    }

    fn injury_check(
        &self,
        play: &mut Play,
        player: &Player,
        contact: Contact,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        if player.is_injured() || play.injuries.iter().any(|i| i.injured_player == player.id) {
            return Ok(());
        }
        let hurt = InjuryCheck::new(player, self.play_type)
            .sack(contact.sack)
            .defenders(contact.defenders)
            .big_play(contact.big_play)
            .out_of_bounds(contact.out_of_bounds)
            .execute(rng, self.tuning)?;
        if !hurt.occurred {
            return Ok(());
        }
        let injury = InjuryEffectResult::new(player, self.play_number).execute(rng, self.tuning)?;
        play.commentary.push(format!(
            "{} is down with a {} injury.",
            player.name,
            injury.injury_type.describe()
        ));
        play.injuries.push(injury);
        Ok(())
    }

    /// Follows the ball through fumbles and laterals until it is dead.
    ///
    /// Per leg: one fumble check; on a fumble the recovery result, otherwise a
    /// lateral check when laterals are allowed and the leg went far enough,
    /// plus the lateral's yards.
    pub fn carry_on(
        &self,
        play: &mut Play,
        ball: &mut LiveBall,
        first: Leg,
        context: FumbleContext,
        lateral_rate: Option<f64>,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Leg>, SimError> {
        let t = self.tuning;
        let mut legs = vec![first];
        let mut context = context;
        while legs.len() < MAX_SEGMENTS && !ball.is_dead() {
            let last = legs.len() - 1;
            let (carrier_id, team, yards) = (legs[last].carrier, legs[last].team, legs[last].yards);
            let Some(carrier) = self.player(carrier_id) else {
                break;
            };

            let fumble = FumbleCheck::new(carrier, pile_size(yards), context).execute(rng, t)?;
            if fumble.occurred {
                let recovery = FumbleRecoveryResult {
                    fumbling_team: team,
                    fumbling_players: self.players_of(team),
                    opponents: self.players_of(team.opponent()),
                }
                .execute(rng, t)?;
                legs[last].fumble = Some(Fumble {
                    fumbled_by: carrier_id,
                    recovered_by: recovery.recovered_by,
                    recovering_team: recovery.recovering_team,
                    out_of_bounds: recovery.out_of_bounds,
                });
                if recovery.out_of_bounds {
                    play.commentary.push(format!("{} fumbles out of bounds.", carrier.name));
                    break;
                }
                ball.loose(recovery.bounce_yards);
                ball.recover(recovery.recovering_team);
                let Some(recoverer) = recovery.recovered_by else {
                    break;
                };
                play.commentary.push(format!(
                    "{} fumbles! Recovered by {}.",
                    carrier.name,
                    self.name(recoverer)
                ));
                let moved = if ball.is_dead() {
                    0
                } else {
                    ball.advance(recovery.return_yards)
                };
                context = if recovery.recovering_team == self.team {
                    FumbleContext::Normal
                } else {
                    FumbleContext::Return
                };
                legs.push(Leg::new(recoverer, recovery.recovering_team, moved));
                continue;
            }

            let Some(rate) = lateral_rate else {
                break;
            };
            if yards >= t.rushing.lateral_min_yards
                && FlatCheck::new("lateral", rate).execute(rng, t)?.occurred
            {
                let Some(trailer) = top_by(
                    self.players_of(team),
                    |p| !p.is_injured() && legs.iter().all(|l| l.carrier != p.id),
                    |p| p.speed as u32,
                    1,
                )
                .into_iter()
                .next() else {
                    break;
                };
                let gain = BonusYardsResult::Lateral.execute(rng, t)?;
                let moved = ball.advance(gain);
                play.commentary.push(format!("{} laterals to {}!", carrier.name, trailer.name));
                legs.push(Leg {
                    lateral_from: Some(carrier_id),
                    ..Leg::new(trailer.id, team, moved)
                });
                continue;
            }
            break;
        }
        debug!(legs = legs.len(), "ball dead");
        Ok(legs)
    }

    pub fn elapsed(
        &self,
        play: &mut Play,
        clock: impl Into<ElapsedTimeResult>,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        play.elapsed_time = clock.into().execute(rng, self.tuning)?;
        Ok(())
    }
}

/// Copies where the ball died onto the play.
pub fn finish(play: &mut Play, ball: &LiveBall) {
    play.end_field_position = ball.position;
    play.end_possession = ball.holder;
    play.possession_change = ball.holder != play.possession;
    play.is_touchdown = ball.touchdown;
    play.is_safety = ball.safety;
    if ball.touchdown {
        play.commentary.push("Touchdown!".to_string());
    } else if ball.safety {
        play.commentary.push("Safety!".to_string());
    } else if ball.touchback {
        play.commentary.push("Touchback.".to_string());
    }
}
