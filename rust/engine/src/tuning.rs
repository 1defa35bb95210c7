//! Named probabilities, magnitudes and clock spans consumed by every check
//! and result.
//!
//! Every section deserializes with defaults, so a TOML override may name only
//! the values it changes.

use serde::{Deserialize, Serialize};

/// Inclusive bounds applied to a computed rate before the draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn apply(self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }
}

/// Rating-driven magnitude: `base + rating / 100 * rating_weight + draw * spread - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub base: f64,
    pub rating_weight: f64,
    pub spread: f64,
    pub offset: f64,
}

impl Curve {
    pub const fn new(base: f64, rating_weight: f64, spread: f64, offset: f64) -> Self {
        Self {
            base,
            rating_weight,
            spread,
            offset,
        }
    }

    pub fn at(self, rating: f64, draw: f64) -> f64 {
        self.base + rating / 100.0 * self.rating_weight + draw * self.spread - self.offset
    }
}

/// Seconds off the clock: `base` plus up to `spread` more.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub base: f64,
    pub spread: f64,
}

impl Span {
    pub const fn new(base: f64, spread: f64) -> Self {
        Self { base, spread }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Tuning {
    pub passing: PassingTuning,
    pub rushing: RushingTuning,
    pub turnovers: TurnoverTuning,
    pub field_goals: FieldGoalTuning,
    pub kickoffs: KickoffTuning,
    pub punts: PuntTuning,
    pub injuries: InjuryTuning,
    pub penalties: PenaltyTuning,
    pub clock: ClockTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassingTuning {
    /// Cumulative pass-type thresholds: screen, short, forward; the rest are deep
    pub screen_threshold: f64,
    pub short_threshold: f64,
    pub forward_threshold: f64,
    pub completion_base: f64,
    pub completion_pressure_penalty: f64,
    pub completion_skill_denominator: f64,
    pub completion: Band,
    pub interception_base: f64,
    pub interception_pressure_bonus: f64,
    pub interception_skill_denominator: f64,
    pub interception: Band,
    pub pressure_base: f64,
    pub pressure_skill_denominator: f64,
    pub pressure: Band,
    pub protection_base: f64,
    pub protection_skill_denominator: f64,
    pub protection: Band,
    pub yac_base: f64,
    pub yac_skill_threshold: f64,
    pub yac_skill_denominator: f64,
    pub yac: Band,
    /// Yards after an open catch: base, potential divisor, spread and offset
    pub yac_base_yards: f64,
    pub yac_potential_divisor: f64,
    pub yac_spread: f64,
    pub yac_offset: f64,
    /// A receiver without an opening gains `[0, yac_stopped_max)`
    pub yac_stopped_max: i32,
    /// Air-yard ranges per pass type; the upper bound shrinks to the goal line
    pub screen_air_min: i32,
    pub screen_air_max: i32,
    pub short_air_min: i32,
    pub short_air_max: i32,
    pub forward_air_min: i32,
    pub forward_air_max: i32,
    pub deep_air_min: i32,
    pub deep_air_max: i32,
    pub big_play_probability: f64,
    pub big_play_speed_threshold: f64,
    pub big_play_min_bonus: i32,
    pub big_play_max_bonus: i32,
    pub lateral_probability: f64,
    /// Sack loss is drawn from `[sack_min_loss, sack_max_loss)`
    pub sack_min_loss: i32,
    pub sack_max_loss: i32,
}

impl Default for PassingTuning {
    fn default() -> Self {
        Self {
            screen_threshold: 0.15,
            short_threshold: 0.50,
            forward_threshold: 0.85,
            completion_base: 0.60,
            completion_pressure_penalty: 0.20,
            completion_skill_denominator: 250.0,
            completion: Band::new(0.25, 0.85),
            interception_base: 0.035,
            interception_pressure_bonus: 0.02,
            interception_skill_denominator: 500.0,
            interception: Band::new(0.01, 0.15),
            pressure_base: 0.30,
            pressure_skill_denominator: 250.0,
            pressure: Band::new(0.10, 0.60),
            protection_base: 0.75,
            protection_skill_denominator: 200.0,
            protection: Band::new(0.40, 0.95),
            yac_base: 0.35,
            yac_skill_threshold: 70.0,
            yac_skill_denominator: 400.0,
            yac: Band::new(0.15, 0.55),
            yac_base_yards: 3.0,
            yac_potential_divisor: 20.0,
            yac_spread: 8.0,
            yac_offset: 2.0,
            yac_stopped_max: 3,
            screen_air_min: -3,
            screen_air_max: 3,
            short_air_min: 3,
            short_air_max: 12,
            forward_air_min: 8,
            forward_air_max: 20,
            deep_air_min: 18,
            deep_air_max: 45,
            big_play_probability: 0.05,
            big_play_speed_threshold: 85.0,
            big_play_min_bonus: 10,
            big_play_max_bonus: 30,
            lateral_probability: 0.02,
            sack_min_loss: 2,
            sack_max_loss: 11,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RushingTuning {
    pub qb_scramble_probability: f64,
    /// Carry: base plus power difference over the divisor, then spread less offset
    pub run_base_yards: f64,
    pub run_power_divisor: f64,
    pub run_spread: f64,
    pub run_offset: f64,
    pub tackle_break_base: f64,
    pub tackle_break_skill_denominator: f64,
    pub tackle_break: Band,
    pub tackle_break_min_yards: i32,
    pub tackle_break_max_yards: i32,
    pub big_run_base: f64,
    pub big_run_speed_threshold: f64,
    pub big_run_speed_denominator: f64,
    pub big_run: Band,
    pub breakaway_min_yards: i32,
    pub breakaway_max_yards: i32,
    pub blocking_base: f64,
    pub blocking_skill_denominator: f64,
    pub blocking: Band,
    /// Run-yard scalars after the blocking check
    pub blocking_success_scale: f64,
    pub blocking_failure_scale: f64,
    pub lateral_probability: f64,
    /// Runs at least this long open a lateral chance
    pub lateral_min_yards: i32,
    /// Range of the lateral leg, upper bound exclusive
    pub lateral_gain_min: i32,
    pub lateral_gain_max: i32,
}

impl Default for RushingTuning {
    fn default() -> Self {
        Self {
            qb_scramble_probability: 0.10,
            run_base_yards: 3.0,
            run_power_divisor: 20.0,
            run_spread: 11.0,
            run_offset: 3.0,
            tackle_break_base: 0.25,
            tackle_break_skill_denominator: 250.0,
            tackle_break: Band::new(0.05, 0.50),
            tackle_break_min_yards: 3,
            tackle_break_max_yards: 9,
            big_run_base: 0.08,
            big_run_speed_threshold: 70.0,
            big_run_speed_denominator: 500.0,
            big_run: Band::new(0.03, 0.15),
            breakaway_min_yards: 15,
            breakaway_max_yards: 45,
            blocking_base: 0.50,
            blocking_skill_denominator: 200.0,
            blocking: Band::new(0.20, 0.80),
            blocking_success_scale: 1.2,
            blocking_failure_scale: 0.8,
            lateral_probability: 0.02,
            lateral_min_yards: 10,
            lateral_gain_min: -3,
            lateral_gain_max: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverTuning {
    pub fumble_sack: f64,
    pub fumble_return: f64,
    pub fumble_normal: f64,
    pub fumble: Band,
    pub fumble_gang_tackle_multiplier: f64,
    pub fumble_two_defenders_multiplier: f64,
    pub fumble_out_of_bounds: f64,
    pub recovery_backward_base: f64,
    pub recovery_forward_base: f64,
    pub recovery_sideways_base: f64,
    pub recovery_backward_threshold: f64,
    pub recovery_forward_threshold: f64,
    pub recovery_awareness_factor: f64,
    pub recovery: Band,
    /// Farthest a fumble bounces forward or back; sideways bounces use half
    pub bounce_spread: f64,
    pub sideways_bounce_spread: f64,
    /// A fumbling team that keeps the ball moves within half this either way
    pub kept_advance_spread: f64,
    pub defense_return: Curve,
    pub interception_return_base: f64,
    pub interception_return_base_spread: f64,
    /// Skill gap between interceptor and pursuit is divided by this
    pub interception_return_skill_divisor: f64,
    pub interception_return_spread: f64,
    pub interception_return_offset: f64,
    /// A muffed kick settles in `[muff_scramble_min, muff_scramble_min + muff_scramble_spread)`
    pub muff_scramble_min: i32,
    pub muff_scramble_spread: f64,
}

impl Default for TurnoverTuning {
    fn default() -> Self {
        Self {
            fumble_sack: 0.12,
            fumble_return: 0.025,
            fumble_normal: 0.015,
            fumble: Band::new(0.003, 0.25),
            fumble_gang_tackle_multiplier: 1.3,
            fumble_two_defenders_multiplier: 1.15,
            fumble_out_of_bounds: 0.12,
            recovery_backward_base: 0.50,
            recovery_forward_base: 0.70,
            recovery_sideways_base: 0.60,
            recovery_backward_threshold: 0.4,
            recovery_forward_threshold: 0.7,
            recovery_awareness_factor: 0.15,
            recovery: Band::new(0.3, 0.8),
            bounce_spread: 8.0,
            sideways_bounce_spread: 4.0,
            kept_advance_spread: 6.0,
            defense_return: Curve::new(5.0, 15.0, 80.0, 30.0),
            interception_return_base: 8.0,
            interception_return_base_spread: 7.0,
            interception_return_skill_divisor: 2.0,
            interception_return_spread: 30.0,
            interception_return_offset: 5.0,
            muff_scramble_min: -5,
            muff_scramble_spread: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGoalTuning {
    pub make_very_short: f64,
    pub make_short_base: f64,
    pub make_medium_base: f64,
    pub make_long_base: f64,
    pub make_very_long_base: f64,
    pub make_short_decay: f64,
    pub make_medium_decay: f64,
    pub make_long_decay: f64,
    pub make_very_long_decay: f64,
    pub make_skill_denominator: f64,
    pub make: Band,
    pub block_very_short: f64,
    pub block_short: f64,
    pub block_medium: f64,
    pub block_long: f64,
    pub block_bad_snap_multiplier: f64,
    pub block_kicker_skill_denominator: f64,
    pub block_defender_skill_factor: f64,
    pub block: Band,
    pub blocked_defense_recovery: f64,
    pub bad_snap_base: f64,
    pub bad_snap_skill_factor: f64,
    /// Bad-snap loss: base plus up to spread, with a centred jitter
    pub bad_snap_loss_base: f64,
    pub bad_snap_loss_spread: f64,
    pub bad_snap_loss_jitter: f64,
    /// Kicking team falls on a block: loss of base plus up to spread
    pub blocked_own_loss_base: i32,
    pub blocked_own_loss_spread: f64,
    /// Rushing team scoops a block, driven by the recoverer's speed and agility
    pub blocked_return: Curve,
    pub blocked_return_limits: Band,
    /// Distance added to the line of scrimmage for the hold and the end zone
    pub snap_to_kick_distance: i32,
    pub extra_point_distance: i32,
    /// Yards behind the line of scrimmage where the ball is held
    pub hold_depth: i32,
    /// A miss inside this distance of the goal line returns the ball at the 20
    pub miss_touchback_zone: i32,
}

impl Default for FieldGoalTuning {
    fn default() -> Self {
        Self {
            make_very_short: 0.98,
            make_short_base: 0.90,
            make_medium_base: 0.80,
            make_long_base: 0.65,
            make_very_long_base: 0.40,
            make_short_decay: 0.01,
            make_medium_decay: 0.015,
            make_long_decay: 0.025,
            make_very_long_decay: 0.03,
            make_skill_denominator: 200.0,
            make: Band::new(0.05, 0.99),
            block_very_short: 0.015,
            block_short: 0.025,
            block_medium: 0.040,
            block_long: 0.065,
            block_bad_snap_multiplier: 10.0,
            block_kicker_skill_denominator: 300.0,
            block_defender_skill_factor: 0.003,
            block: Band::new(0.005, 0.25),
            blocked_defense_recovery: 0.5,
            bad_snap_base: 0.05,
            bad_snap_skill_factor: 0.04,
            bad_snap_loss_base: 5.0,
            bad_snap_loss_spread: 10.0,
            bad_snap_loss_jitter: 5.0,
            blocked_own_loss_base: 5,
            blocked_own_loss_spread: 10.0,
            blocked_return: Curve::new(5.0, 20.0, 100.0, 50.0),
            blocked_return_limits: Band::new(-5.0, 100.0),
            snap_to_kick_distance: 17,
            extra_point_distance: 20,
            hold_depth: 7,
            miss_touchback_zone: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KickoffTuning {
    /// Spot of the kick in the kicking team's frame
    pub kickoff_spot: i32,
    /// Free kick after a safety
    pub safety_kick_spot: i32,
    pub touchback_spot: i32,
    pub out_of_bounds_spot: i32,
    pub onside_attempt: f64,
    pub onside_deficit: i64,
    pub onside_recovery_base: f64,
    pub onside_recovery_skill_bonus: f64,
    pub onside_min_travel: i32,
    pub onside_max_travel: i32,
    pub out_of_bounds_normal: f64,
    pub out_of_bounds_danger_zone: f64,
    pub danger_zone_min: f64,
    pub danger_zone_max: f64,
    pub muff_base: f64,
    pub muff_short_kick: f64,
    pub muff_short_threshold: f64,
    pub muff_skill_denominator: f64,
    pub muff_receiving_team_recovery: f64,
    /// Carry off the tee, driven by the kicker's rating
    pub distance: Curve,
    pub distance_limits: Band,
    pub return_yards: Curve,
    pub return_limits: Band,
    /// Hang time is `hang_time_base + distance / hang_time_yards_per_second`
    pub hang_time_base: f64,
    pub hang_time_yards_per_second: f64,
}

impl Default for KickoffTuning {
    fn default() -> Self {
        Self {
            kickoff_spot: 35,
            safety_kick_spot: 20,
            touchback_spot: 25,
            out_of_bounds_spot: 40,
            onside_attempt: 0.05,
            onside_deficit: 7,
            onside_recovery_base: 0.20,
            onside_recovery_skill_bonus: 0.10,
            onside_min_travel: 10,
            onside_max_travel: 16,
            out_of_bounds_normal: 0.03,
            out_of_bounds_danger_zone: 0.10,
            danger_zone_min: 65.0,
            danger_zone_max: 95.0,
            muff_base: 0.015,
            muff_short_kick: 0.04,
            muff_short_threshold: 50.0,
            muff_skill_denominator: 150.0,
            muff_receiving_team_recovery: 0.6,
            distance: Curve::new(40.0, 30.0, 20.0, 10.0),
            distance_limits: Band::new(30.0, 80.0),
            return_yards: Curve::new(10.0, 20.0, 30.0, 15.0),
            return_limits: Band::new(-5.0, 50.0),
            hang_time_base: 3.5,
            hang_time_yards_per_second: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuntTuning {
    pub touchback_spot: i32,
    pub bad_snap_base: f64,
    pub bad_snap_skill_factor: f64,
    /// Punters stand deeper than holders, so the chase can cost more
    pub bad_snap_loss_base: f64,
    pub bad_snap_loss_spread: f64,
    pub bad_snap_loss_jitter: f64,
    pub block_good_snap: f64,
    pub block_bad_snap: f64,
    pub block_punter_skill_denominator: f64,
    pub block_defender_skill_factor: f64,
    pub block: Band,
    pub blocked_offense_recovery: f64,
    pub blocked_own_loss_base: i32,
    pub blocked_own_loss_spread: f64,
    /// Where a blocked punt picked up by the rush settles, from the line
    pub blocked_bounce_base: f64,
    pub blocked_bounce_spread: f64,
    pub blocked_bounce_jitter: f64,
    pub distance: Curve,
    pub min_distance: f64,
    pub hang_time_per_yard: f64,
    pub hang_time_jitter: f64,
    pub min_hang_time: f64,
    /// Return: base plus the returner-coverage gap over the divisor, then spread less offset
    pub return_base_yards: f64,
    pub return_skill_divisor: f64,
    pub return_spread: f64,
    pub return_offset: f64,
    pub min_return: f64,
    /// Coverage gains up to `coverage_hang_bonus` as hang time nears `coverage_full_hang_time`
    pub coverage_full_hang_time: f64,
    pub coverage_hang_bonus: f64,
    pub muff_base: f64,
    pub muff_skill_factor: f64,
    pub muff_high_hang_bonus: f64,
    pub muff_medium_hang_bonus: f64,
    pub muff_defense_recovery: f64,
    pub high_hang_threshold: f64,
    pub medium_hang_threshold: f64,
    pub fair_catch_base: f64,
    pub fair_catch_high_hang_bonus: f64,
    pub fair_catch_medium_hang_bonus: f64,
    pub fair_catch_own_10_bonus: f64,
    pub fair_catch_own_20_bonus: f64,
    pub out_of_bounds_base: f64,
    pub out_of_bounds_inside_10_bonus: f64,
    pub out_of_bounds_inside_15_bonus: f64,
    pub downed_base: f64,
    pub downed_inside_5_bonus: f64,
    pub downed_inside_10_bonus: f64,
    pub downed_inside_15_bonus: f64,
    pub downed_high_hang_bonus: f64,
    pub downed_medium_hang_bonus: f64,
}

impl Default for PuntTuning {
    fn default() -> Self {
        Self {
            touchback_spot: 20,
            bad_snap_base: 0.05,
            bad_snap_skill_factor: 0.04,
            bad_snap_loss_base: 5.0,
            bad_snap_loss_spread: 15.0,
            bad_snap_loss_jitter: 5.0,
            block_good_snap: 0.01,
            block_bad_snap: 0.20,
            block_punter_skill_denominator: 200.0,
            block_defender_skill_factor: 0.005,
            block: Band::new(0.002, 0.30),
            blocked_offense_recovery: 0.5,
            blocked_own_loss_base: 5,
            blocked_own_loss_spread: 5.0,
            blocked_bounce_base: -10.0,
            blocked_bounce_spread: 25.0,
            blocked_bounce_jitter: 10.0,
            distance: Curve::new(30.0, 25.0, 25.0, 10.0),
            min_distance: 10.0,
            hang_time_per_yard: 0.08,
            hang_time_jitter: 1.0,
            min_hang_time: 2.0,
            return_base_yards: 5.0,
            return_skill_divisor: 10.0,
            return_spread: 20.0,
            return_offset: 5.0,
            min_return: -3.0,
            coverage_full_hang_time: 5.0,
            coverage_hang_bonus: 20.0,
            muff_base: 0.05,
            muff_skill_factor: 0.04,
            muff_high_hang_bonus: 0.02,
            muff_medium_hang_bonus: 0.01,
            muff_defense_recovery: 0.6,
            high_hang_threshold: 4.5,
            medium_hang_threshold: 4.0,
            fair_catch_base: 0.25,
            fair_catch_high_hang_bonus: 0.15,
            fair_catch_medium_hang_bonus: 0.10,
            fair_catch_own_10_bonus: 0.20,
            fair_catch_own_20_bonus: 0.10,
            out_of_bounds_base: 0.12,
            out_of_bounds_inside_10_bonus: 0.08,
            out_of_bounds_inside_15_bonus: 0.05,
            downed_base: 0.15,
            downed_inside_5_bonus: 0.40,
            downed_inside_10_bonus: 0.25,
            downed_inside_15_bonus: 0.15,
            downed_high_hang_bonus: 0.10,
            downed_medium_hang_bonus: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjuryTuning {
    pub run_base: f64,
    pub pass_base: f64,
    pub sack_base: f64,
    pub kickoff_base: f64,
    pub punt_base: f64,
    pub field_goal_base: f64,
    pub gang_tackle_multiplier: f64,
    pub big_play_multiplier: f64,
    /// Plays of at least this many yards count as big plays
    pub big_play_yards: i32,
    pub out_of_bounds_multiplier: f64,
    pub high_contact_multiplier: f64,
    pub qb_multiplier: f64,
    pub qb_sack_multiplier: f64,
    pub kicker_multiplier: f64,
    /// Severity cumulative bounds: below minor is Minor, below minor+moderate is Moderate
    pub minor_probability: f64,
    pub moderate_probability: f64,
    pub minor_min_plays: i32,
    /// Exclusive upper bound of the minor recovery draw
    pub minor_max_plays: i32,
    /// Chance each tackler is checked for an injury
    pub tackler_check_gate: f64,
}

impl Default for InjuryTuning {
    fn default() -> Self {
        Self {
            run_base: 0.03,
            pass_base: 0.03,
            sack_base: 0.06,
            kickoff_base: 0.05,
            punt_base: 0.04,
            field_goal_base: 0.001,
            gang_tackle_multiplier: 1.4,
            big_play_multiplier: 1.2,
            big_play_yards: 20,
            out_of_bounds_multiplier: 0.5,
            high_contact_multiplier: 1.2,
            qb_multiplier: 0.7,
            qb_sack_multiplier: 2.0,
            kicker_multiplier: 0.3,
            minor_probability: 0.60,
            moderate_probability: 0.30,
            minor_min_plays: 1,
            minor_max_plays: 3,
            tackler_check_gate: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyTuning {
    /// Scales every catalogue frequency; 0 disables flags entirely
    pub frequency_scale: f64,
    pub pass_blocking_multiplier: f64,
    pub run_blocking_multiplier: f64,
    pub passer_in_pocket_multiplier: f64,
    pub passer_scrambling_multiplier: f64,
    pub kicker_multiplier: f64,
    pub receiver_multiplier: f64,
    /// Chance an either-side foul is on the offense
    pub either_side_offense_share: f64,
    /// Added to aggressiveness when picking the offender, so calm players still draw flags
    pub offender_weight_floor: f64,
}

impl Default for PenaltyTuning {
    fn default() -> Self {
        Self {
            frequency_scale: 1.0,
            pass_blocking_multiplier: 1.2,
            run_blocking_multiplier: 1.1,
            passer_in_pocket_multiplier: 1.5,
            passer_scrambling_multiplier: 1.2,
            kicker_multiplier: 3.0,
            receiver_multiplier: 1.3,
            either_side_offense_share: 0.5,
            offender_weight_floor: 20.0,
        }
    }
}

/// Seconds each kind of play takes. Punt entries are added to the hang time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockTuning {
    pub run: Span,
    pub completion: Span,
    pub incompletion: Span,
    pub sack: Span,
    pub kick_return: Span,
    pub onside: Span,
    pub bad_snap: Span,
    pub blocked_kick: Span,
    pub place_kick: Span,
    pub punt_dead_ball: Span,
    pub punt_downed: Span,
    pub punt_muff: Span,
    pub punt_return: Span,
}

impl Default for ClockTuning {
    fn default() -> Self {
        Self {
            run: Span::new(5.0, 3.0),
            completion: Span::new(4.0, 3.0),
            incompletion: Span::new(3.0, 2.0),
            sack: Span::new(2.0, 2.0),
            kick_return: Span::new(4.0, 4.0),
            onside: Span::new(2.0, 2.0),
            bad_snap: Span::new(4.0, 4.0),
            blocked_kick: Span::new(3.0, 3.0),
            place_kick: Span::new(2.0, 1.0),
            punt_dead_ball: Span::new(0.5, 0.5),
            punt_downed: Span::new(1.0, 0.5),
            punt_muff: Span::new(2.0, 2.0),
            punt_return: Span::new(2.0, 4.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let t: Tuning =
            serde_json::from_str(r#"{"punts":{"touchback_spot":25},"passing":{}}"#).unwrap();
        assert_eq!(t.punts.touchback_spot, 25);
        assert_eq!(t.punts.fair_catch_base, 0.25);
        assert_eq!(t.passing, PassingTuning::default());
        assert_eq!(t.kickoffs.touchback_spot, 25);
    }

    #[test]
    fn curve_reads_left_to_right() {
        let c = Curve::new(40.0, 30.0, 20.0, 10.0);
        assert_eq!(c.at(100.0, 0.5), 70.0);
        assert_eq!(c.at(0.0, 0.0), 30.0);
    }

    #[test]
    fn clock_overrides_are_partial() {
        let t: Tuning = serde_json::from_str(r#"{"clock":{"run":{"base":9.0,"spread":0.0}}}"#)
            .unwrap();
        assert_eq!(t.clock.run, Span::new(9.0, 0.0));
        assert_eq!(t.clock.sack, Span::new(2.0, 2.0));
    }

    #[test]
    fn band_clamps_both_sides() {
        let b = Band::new(0.1, 0.6);
        assert_eq!(b.apply(-3.0), 0.1);
        assert_eq!(b.apply(0.4), 0.4);
        assert_eq!(b.apply(2.0), 0.6);
    }
}
