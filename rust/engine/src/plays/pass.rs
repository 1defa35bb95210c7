//! Drop-backs: sacks, completions, incompletions and interceptions.
//!
//! Draw order:
//! 1. protection; on a breakdown: sack yards (`next_range`), tackle flag,
//!    injuries, fumble chain, elapsed time, done
//! 2. pressure, blocking flag
//! 3. target (`next_double`), pass type, air yards (`next_range`), completion
//! 4. coverage flag
//! 5. complete: YAC opportunity, YAC, big play (+ bonus range), tackle flag,
//!    injuries, fumble/lateral chain
//! 6. incomplete: interception; on a pick: return, injuries, fumble/lateral chain
//! 7. elapsed time

use tracing::warn;

use crate::checks::passing::yac_potential;
use crate::checks::{
    BigPlayCheck, FumbleContext, InterceptionCheck, PassCompletionCheck, PassProtectionCheck,
    PenaltyCheck, QbPressureCheck, SkillsCheck, TackleContext, YacOpportunityCheck,
};
use crate::errors::SimError;
use crate::game::OPPONENT_GOAL_LINE;
use crate::play::{
    InterceptionDetails, PassDetails, PassSegment, PassType, Play, PlayKind, PlayType,
};
use crate::player::{first_at, with_fallback, Player, PlayerId, Position};
use crate::results::{
    likely_interceptor, AirYardsResult, BonusYardsResult, InterceptionReturnResult,
    PassTypeResult, SackYardsResult, SkillsCheckResult, YacResult,
};
use crate::rng::RandomSource;

use super::{finish, Contact, Leg, LiveBall, PlayContext};

/// Target chosen in proportion to catching ability. One `next_double` when
/// any healthy receiver is on the field, none otherwise.
fn pick_receiver<'a>(
    offense: &'a [Player],
    rng: &mut dyn RandomSource,
) -> Result<Option<&'a Player>, SimError> {
    let targets: Vec<&Player> = offense
        .iter()
        .filter(|p| p.position.is_receiver() && !p.is_injured())
        .collect();
    if targets.is_empty() {
        warn!("no eligible receiver on the field");
        return Ok(with_fallback(offense, &[Position::WR, Position::TE, Position::RB]));
    }
    let weight = |p: &Player| p.catching as f64 + 1.0;
    let total: f64 = targets.iter().map(|p| weight(*p)).sum();
    let target = rng.next_double()? * total;
    let mut cumulative = 0.0;
    for p in &targets {
        cumulative += weight(*p);
        if target < cumulative {
            return Ok(Some(*p));
        }
    }
    Ok(targets.last().copied())
}

pub fn resolve(
    play: &mut Play,
    ctx: &PlayContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<(), SimError> {
    if play.play_type() != PlayType::Pass {
        return Err(SimError::InvalidPlayState(format!(
            "pass pipeline given a {:?} play",
            play.play_type()
        )));
    }
    let t = ctx.tuning;
    let offense = &ctx.offense;
    let defense = &ctx.defense;
    let start = play.start_field_position;

    let qb = match first_at(offense, Position::QB) {
        Some(qb) => qb,
        None => {
            let fallback = offense
                .first()
                .ok_or(SimError::MissingPlayer { role: "quarterback" })?;
            warn!(passer = %fallback.id, "no quarterback on the field");
            fallback
        }
    };
    let mut ball = LiveBall::snap(ctx.team, start);
    let mut details = PassDetails::default();

    if !PassProtectionCheck::new(offense, defense).execute(rng, t)?.occurred {
        let loss = SackYardsResult { field_position: start }.execute(rng, t)?;
        let moved = ball.advance(loss);
        play.commentary.push(format!("{} is sacked for a loss of {}.", qb.name, -moved));
        details.is_sack = true;

        let tacklers = ctx.tacklers(ctx.team.opponent());
        ctx.flag(play, PenaltyCheck::tackle(TackleContext::PasserInPocket, &tacklers), 0, rng)?;
        let contact = Contact {
            sack: true,
            ..Contact::after_gain(moved, t)
        };
        ctx.check_injuries(play, Some(qb), &tacklers, contact, rng)?;

        let legs = ctx.carry_on(
            play,
            &mut ball,
            Leg::new(qb.id, ctx.team, moved),
            FumbleContext::Sack,
            None,
            rng,
        )?;
        ctx.elapsed(play, t.clock.sack, rng)?;
        record_legs(&mut details, ctx, qb.id, None, legs);
        return wrap_up(play, details, &ball, ctx);
    }

    let pressured = QbPressureCheck::new(offense, defense).execute(rng, t)?.occurred;
    details.pressured = pressured;
    ctx.flag(play, PenaltyCheck::blocking(offense, defense, true, false), 0, rng)?;

    let Some(receiver) = pick_receiver(offense, rng)? else {
        return Err(SimError::MissingPlayer { role: "receiver" });
    };
    let pass_type = PassTypeResult.execute(rng, t)?;
    let air = AirYardsResult {
        pass_type,
        yards_to_goal: OPPONENT_GOAL_LINE - start,
    }
    .execute(rng, t)?;
    let completed = PassCompletionCheck::new(qb, receiver, defense, pressured)
        .execute(rng, t)?
        .occurred;
    ctx.flag(
        play,
        PenaltyCheck::coverage(receiver, defense, air, completed),
        air,
        rng,
    )?;

    if completed {
        let opportunity = YacOpportunityCheck::new(receiver).execute(rng, t)?.occurred;
        let mut yac = YacResult {
            yac_potential: yac_potential(receiver),
            opportunity,
        }
        .execute(rng, t)?;
        let big_play = BigPlayCheck::new(receiver).execute(rng, t)?.occurred;
        if big_play {
            yac += BonusYardsResult::BigPlayAfterCatch.execute(rng, t)?;
        }
        let moved = ball.advance(air + yac);
        play.commentary.push(format!(
            "{} completes to {} for {} yards.",
            qb.name, receiver.name, moved
        ));
        if big_play {
            play.commentary.push(format!("{} turns on the jets after the catch!", receiver.name));
        }

        let tacklers = ctx.tacklers(ctx.team.opponent());
        ctx.flag(play, PenaltyCheck::tackle(TackleContext::Receiver, &tacklers), 0, rng)?;
        ctx.check_injuries(play, Some(receiver), &tacklers, Contact::after_gain(moved, t), rng)?;

        let legs = ctx.carry_on(
            play,
            &mut ball,
            Leg::new(receiver.id, ctx.team, moved),
            FumbleContext::Normal,
            Some(t.passing.lateral_probability),
            rng,
        )?;
        ctx.elapsed(play, t.clock.completion, rng)?;
        record_legs(&mut details, ctx, qb.id, Some((pass_type, air)), legs);
        return wrap_up(play, details, &ball, ctx);
    }

    let intercepted = InterceptionCheck::new(qb, defense, pressured)
        .execute(rng, t)?
        .occurred;
    let thrown = PassSegment {
        passer: qb.id,
        receiver: Some(receiver.id),
        pass_type,
        air_yards: air,
        yards_after_catch: 0,
        yards_gained: 0,
        is_complete: false,
        fumble: None,
    };
    let picker = if intercepted {
        likely_interceptor(defense)
    } else {
        None
    };
    let Some(picker) = picker else {
        play.commentary.push(format!(
            "{} throws incomplete, intended for {}.",
            qb.name, receiver.name
        ));
        details.segments.push(thrown);
        ctx.elapsed(play, t.clock.incompletion, rng)?;
        return wrap_up(play, details, &ball, ctx);
    };

    let defense_team = ctx.team.opponent();
    let spot = OPPONENT_GOAL_LINE - (start + air);
    ball.intercept(defense_team, spot);
    let return_yards = InterceptionReturnResult::new(picker, offense).execute(rng, t)?;
    let moved = ball.advance(return_yards);
    play.commentary.push(format!(
        "Intercepted by {}! Returned {} yards.",
        picker.name, moved
    ));
    details.segments.push(thrown);
    details.interception = Some(InterceptionDetails {
        intercepted_by: picker.id,
        thrown_by: qb.id,
        interception_spot: spot.clamp(0, OPPONENT_GOAL_LINE),
        return_yards: moved,
    });

    let tacklers = ctx.tacklers(ctx.team);
    ctx.check_injuries(play, Some(picker), &tacklers, Contact::after_gain(moved, t), rng)?;
    let legs = ctx.carry_on(
        play,
        &mut ball,
        Leg::new(picker.id, defense_team, moved),
        FumbleContext::Return,
        None,
        rng,
    )?;
    ctx.elapsed(play, t.clock.completion, rng)?;
    for leg in legs {
        details.return_segments.push(leg.into_return_segment());
    }
    wrap_up(play, details, &ball, ctx)
}

/// Stores the legs of a completed throw or a sack. The first leg belongs to
/// the throw itself; later offensive legs are laterals or recoveries.
fn record_legs(
    details: &mut PassDetails,
    ctx: &PlayContext<'_>,
    passer: PlayerId,
    throw: Option<(PassType, i32)>,
    legs: Vec<Leg>,
) {
    let mut previous = passer;
    for (i, leg) in legs.into_iter().enumerate() {
        if leg.team != ctx.team {
            details.return_segments.push(leg.into_return_segment());
            continue;
        }
        let carrier = leg.carrier;
        if i == 0 {
            // A sack is stored as a throw that never left the pocket.
            let (pass_type, air) = throw.unwrap_or((PassType::Forward, 0));
            details.segments.push(PassSegment {
                passer,
                receiver: throw.map(|_| carrier),
                pass_type,
                air_yards: air,
                yards_after_catch: if throw.is_some() { leg.yards - air } else { 0 },
                yards_gained: leg.yards,
                is_complete: throw.is_some(),
                fumble: leg.fumble,
            });
        } else {
            details.segments.push(leg.into_lateral_segment(previous));
        }
        previous = carrier;
    }
}

fn wrap_up(
    play: &mut Play,
    details: PassDetails,
    ball: &LiveBall,
    ctx: &PlayContext<'_>,
) -> Result<(), SimError> {
    play.kind = PlayKind::Pass(details);
    play.yards_gained = ball.net_yards(ctx.team, play.start_field_position);
    finish(play, ball);
    Ok(())
}
