//! Designed runs and quarterback scrambles.
//!
//! Draw order:
//! 1. scramble (`next_double`), then direction (`next_below(9)`)
//! 2. run blocking, blocking flag
//! 3. base yards, tackle break (+ bonus range), breakaway (+ bonus range)
//! 4. tackle flag, injuries
//! 5. fumble/lateral chain, elapsed time

use tracing::warn;

use crate::checks::{
    BreakawayCheck, FlatCheck, FumbleContext, PenaltyCheck, RunBlockingCheck, SkillsCheck,
    TackleBreakCheck, TackleContext,
};
use crate::errors::SimError;
use crate::play::{Play, PlayKind, PlayType, RunDetails, RunDirection};
use crate::player::{first_at, with_fallback, Position};
use crate::results::{BonusYardsResult, RunYardsResult, SkillsCheckResult};
use crate::rng::RandomSource;

use super::{finish, Contact, Leg, LiveBall, PlayContext};

pub fn resolve(
    play: &mut Play,
    ctx: &PlayContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<(), SimError> {
    if play.play_type() != PlayType::Run {
        return Err(SimError::InvalidPlayState(format!(
            "run pipeline given a {:?} play",
            play.play_type()
        )));
    }
    let t = ctx.tuning;
    let offense = &ctx.offense;
    let defense = &ctx.defense;

    let scramble = FlatCheck::new("qb_scramble", t.rushing.qb_scramble_probability)
        .execute(rng, t)?
        .occurred;
    let qb = first_at(offense, Position::QB);
    let (carrier, is_scramble) = match qb {
        Some(qb) if scramble => (qb, true),
        _ => {
            let runner = with_fallback(offense, &[Position::RB, Position::QB])
                .ok_or(SimError::MissingPlayer { role: "ball carrier" })?;
            if runner.position != Position::RB {
                warn!(runner = %runner.id, "no running back on the field");
            }
            (runner, runner.position == Position::QB)
        }
    };
    let pick = rng.next_below(RunDirection::ALL.len() as i32)?;
    let direction = usize::try_from(pick)
        .ok()
        .and_then(|i| RunDirection::ALL.get(i).copied())
        .ok_or(SimError::ReplayOutOfBounds {
            max: RunDirection::ALL.len() as i32,
            value: pick,
        })?;

    let blocking = RunBlockingCheck::new(offense, defense).execute(rng, t)?;
    ctx.flag(play, PenaltyCheck::blocking(offense, defense, false, false), 0, rng)?;

    let mut yards = RunYardsResult::new(carrier, offense, defense, blocking.occurred).execute(rng, t)?;
    if TackleBreakCheck::new(carrier, defense).execute(rng, t)?.occurred {
        yards += BonusYardsResult::TackleBreak.execute(rng, t)?;
        play.commentary.push(format!("{} breaks a tackle!", carrier.name));
    }
    if BreakawayCheck::new(carrier).execute(rng, t)?.occurred {
        yards += BonusYardsResult::Breakaway.execute(rng, t)?;
        play.commentary.push(format!("{} breaks into the open!", carrier.name));
    }

    let mut ball = LiveBall::snap(ctx.team, play.start_field_position);
    let moved = ball.advance(yards);
    play.commentary.push(format!(
        "{} runs {} for {} yards.",
        carrier.name,
        direction.describe(),
        moved
    ));

    let tacklers = ctx.tacklers(ctx.team.opponent());
    let tackle = if is_scramble {
        TackleContext::PasserScrambling
    } else {
        TackleContext::BallCarrier
    };
    ctx.flag(play, PenaltyCheck::tackle(tackle, &tacklers), 0, rng)?;
    ctx.check_injuries(play, Some(carrier), &tacklers, Contact::after_gain(moved, t), rng)?;

    let legs = ctx.carry_on(
        play,
        &mut ball,
        Leg::new(carrier.id, ctx.team, moved),
        FumbleContext::Normal,
        Some(t.rushing.lateral_probability),
        rng,
    )?;
    ctx.elapsed(play, t.clock.run, rng)?;

    let mut details = RunDetails {
        direction: Some(direction),
        is_scramble,
        blocking_succeeded: blocking.occurred,
        ..RunDetails::default()
    };
    for leg in legs {
        if leg.team == ctx.team {
            details.segments.push(leg.into_run_segment());
        } else {
            details.return_segments.push(leg.into_return_segment());
        }
    }
    play.kind = PlayKind::Run(details);
    play.yards_gained = ball.net_yards(ctx.team, play.start_field_position);
    finish(play, &ball);
    Ok(())
}
