//! Penalty catalogue and the per-play penalty record.
//!
//! The catalogue is static lookup data: base odds per snap, enforcement yards,
//! which side can commit the foul, and the enforcement categories consulted by
//! [`crate::enforcement`].

use serde::{Deserialize, Serialize};

use crate::game::Possession;
use crate::player::PlayerId;

/// Side of the ball that can commit a foul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoulSide {
    Offense,
    Defense,
    Either,
}

/// When the foul happened relative to the live ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyTiming {
    Before,
    During,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenaltyName {
    OffensiveHolding,
    FalseStart,
    DefensivePassInterference,
    UnnecessaryRoughness,
    DefensiveHolding,
    DefensiveOffside,
    NeutralZoneInfraction,
    DelayOfGame,
    IllegalBlockAboveTheWaist,
    IllegalUseOfHands,
    OffensivePassInterference,
    FaceMask,
    RoughingThePasser,
    UnsportsmanlikeConduct,
    IllegalContact,
    IllegalFormation,
    Defensive12OnField,
    Encroachment,
    IntentionalGrounding,
    IllegalShift,
    Taunting,
    IneligibleDownfieldPass,
    OffsideOnFreeKick,
    ChopBlock,
    PlayerOutOfBoundsOnPunt,
    RunningIntoTheKicker,
    HorseCollarTackle,
    IllegalMotion,
    Tripping,
    Offensive12OnField,
    IllegalSubstitution,
    PersonalFoul,
    IneligibleDownfieldKick,
    IllegalForwardPass,
    Clipping,
    IllegalBlindsideBlock,
    DefensiveDelayOfGame,
    IllegalTouchPass,
    FairCatchInterference,
    OffensiveOffside,
    IllegalTouchKick,
    LowBlock,
    IllegalPeelback,
    Leaping,
    RoughingTheKicker,
    IllegalCrackback,
    InvalidFairCatchSignal,
    Disqualification,
    InterferenceWithOpportunityToCatch,
    Leverage,
}

/// Catalogue row for one foul.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyRule {
    /// Enforcement distance; zero for spot fouls
    pub yards: i32,
    pub side: FoulSide,
    /// League-wide frequency per snap
    pub odds: f64,
}

const fn rule(yards: i32, side: FoulSide, odds: f64) -> PenaltyRule {
    PenaltyRule { yards, side, odds }
}

impl PenaltyName {
    pub const ALL: [PenaltyName; 50] = [
        PenaltyName::OffensiveHolding,
        PenaltyName::FalseStart,
        PenaltyName::DefensivePassInterference,
        PenaltyName::UnnecessaryRoughness,
        PenaltyName::DefensiveHolding,
        PenaltyName::DefensiveOffside,
        PenaltyName::NeutralZoneInfraction,
        PenaltyName::DelayOfGame,
        PenaltyName::IllegalBlockAboveTheWaist,
        PenaltyName::IllegalUseOfHands,
        PenaltyName::OffensivePassInterference,
        PenaltyName::FaceMask,
        PenaltyName::RoughingThePasser,
        PenaltyName::UnsportsmanlikeConduct,
        PenaltyName::IllegalContact,
        PenaltyName::IllegalFormation,
        PenaltyName::Defensive12OnField,
        PenaltyName::Encroachment,
        PenaltyName::IntentionalGrounding,
        PenaltyName::IllegalShift,
        PenaltyName::Taunting,
        PenaltyName::IneligibleDownfieldPass,
        PenaltyName::OffsideOnFreeKick,
        PenaltyName::ChopBlock,
        PenaltyName::PlayerOutOfBoundsOnPunt,
        PenaltyName::RunningIntoTheKicker,
        PenaltyName::HorseCollarTackle,
        PenaltyName::IllegalMotion,
        PenaltyName::Tripping,
        PenaltyName::Offensive12OnField,
        PenaltyName::IllegalSubstitution,
        PenaltyName::PersonalFoul,
        PenaltyName::IneligibleDownfieldKick,
        PenaltyName::IllegalForwardPass,
        PenaltyName::Clipping,
        PenaltyName::IllegalBlindsideBlock,
        PenaltyName::DefensiveDelayOfGame,
        PenaltyName::IllegalTouchPass,
        PenaltyName::FairCatchInterference,
        PenaltyName::OffensiveOffside,
        PenaltyName::IllegalTouchKick,
        PenaltyName::LowBlock,
        PenaltyName::IllegalPeelback,
        PenaltyName::Leaping,
        PenaltyName::RoughingTheKicker,
        PenaltyName::IllegalCrackback,
        PenaltyName::InvalidFairCatchSignal,
        PenaltyName::Disqualification,
        PenaltyName::InterferenceWithOpportunityToCatch,
        PenaltyName::Leverage,
    ];

    pub fn rule(self) -> PenaltyRule {
        use FoulSide::*;
        use PenaltyName::*;
        match self {
            OffensiveHolding => rule(10, Offense, 0.019_000_18),
            FalseStart => rule(5, Offense, 0.015_548),
            DefensivePassInterference => rule(0, Defense, 0.006_403_67),
            UnnecessaryRoughness => rule(15, Either, 0.006_219_2),
            DefensiveHolding => rule(5, Defense, 0.006_008_38),
            DefensiveOffside => rule(5, Defense, 0.004_690_75),
            NeutralZoneInfraction => rule(5, Defense, 0.004_190_05),
            DelayOfGame => rule(5, Offense, 0.004_005_59),
            IllegalBlockAboveTheWaist => rule(10, Either, 0.003_399_48),
            IllegalUseOfHands => rule(10, Either, 0.003_135_95),
            OffensivePassInterference => rule(10, Offense, 0.002_740_66),
            FaceMask => rule(15, Either, 0.002_661_61),
            RoughingThePasser => rule(15, Defense, 0.002_687_96),
            UnsportsmanlikeConduct => rule(15, Either, 0.002_292_67),
            IllegalContact => rule(5, Defense, 0.001_633_86),
            IllegalFormation => rule(5, Offense, 0.001_633_86),
            Defensive12OnField => rule(5, Defense, 0.001_370_33),
            Encroachment => rule(5, Defense, 0.001_159_51),
            IntentionalGrounding => rule(10, Offense, 0.000_895_99),
            IllegalShift => rule(5, Offense, 0.000_843_28),
            Taunting => rule(15, Either, 0.000_500_7),
            IneligibleDownfieldPass => rule(5, Offense, 0.000_447_99),
            OffsideOnFreeKick => rule(5, Offense, 0.000_421_64),
            ChopBlock => rule(15, Offense, 0.000_421_64),
            PlayerOutOfBoundsOnPunt => rule(5, Offense, 0.000_342_58),
            RunningIntoTheKicker => rule(5, Defense, 0.000_342_58),
            HorseCollarTackle => rule(15, Defense, 0.000_368_94),
            IllegalMotion => rule(5, Offense, 0.000_316_23),
            Tripping => rule(10, Either, 0.000_289_88),
            Offensive12OnField => rule(5, Offense, 0.000_184_47),
            IllegalSubstitution => rule(5, Defense, 0.000_210_82),
            PersonalFoul => rule(15, Either, 0.000_237_17),
            IneligibleDownfieldKick => rule(5, Offense, 0.000_237_17),
            IllegalForwardPass => rule(5, Offense, 0.000_237_17),
            Clipping => rule(15, Either, 0.000_210_82),
            IllegalBlindsideBlock => rule(15, Either, 0.000_210_82),
            DefensiveDelayOfGame => rule(5, Defense, 0.000_158_12),
            IllegalTouchPass => rule(5, Offense, 0.000_158_12),
            FairCatchInterference => rule(15, Offense, 0.000_158_12),
            OffensiveOffside => rule(5, Offense, 0.000_105_41),
            IllegalTouchKick => rule(5, Offense, 0.000_052_71),
            LowBlock => rule(15, Either, 0.000_079_06),
            IllegalPeelback => rule(15, Offense, 0.000_052_71),
            Leaping => rule(15, Defense, 0.000_079_06),
            RoughingTheKicker => rule(15, Defense, 0.000_052_71),
            IllegalCrackback => rule(15, Offense, 0.000_105_41),
            InvalidFairCatchSignal => rule(5, Defense, 0.000_052_71),
            Disqualification => rule(15, Either, 0.000_079_06),
            InterferenceWithOpportunityToCatch => rule(15, Offense, 0.000_079_06),
            Leverage => rule(15, Defense, 0.000_026_35),
        }
    }

    pub fn yards(self) -> i32 {
        self.rule().yards
    }

    pub fn side(self) -> FoulSide {
        self.rule().side
    }

    pub fn odds(self) -> f64 {
        self.rule().odds
    }

    /// Enforced from the spot of the foul rather than a fixed distance.
    pub fn is_spot_foul(self) -> bool {
        matches!(self, PenaltyName::DefensivePassInterference)
    }

    /// The down counts even though the foul is enforced.
    pub fn is_loss_of_down(self) -> bool {
        matches!(
            self,
            PenaltyName::IntentionalGrounding | PenaltyName::IllegalForwardPass
        )
    }

    /// Fouls that kill the play before the snap; the play's yardage never happened.
    pub fn is_dead_ball(self) -> bool {
        matches!(
            self,
            PenaltyName::FalseStart
                | PenaltyName::Encroachment
                | PenaltyName::DelayOfGame
                | PenaltyName::DefensiveDelayOfGame
                | PenaltyName::Offensive12OnField
                | PenaltyName::Defensive12OnField
                | PenaltyName::IllegalSubstitution
        )
    }

    /// Defensive fouls that do not carry an automatic first down.
    pub fn is_automatic_first_down_exception(self) -> bool {
        matches!(
            self,
            PenaltyName::DefensiveOffside
                | PenaltyName::Encroachment
                | PenaltyName::NeutralZoneInfraction
                | PenaltyName::DefensiveDelayOfGame
                | PenaltyName::IllegalSubstitution
                | PenaltyName::Defensive12OnField
                | PenaltyName::RunningIntoTheKicker
        )
    }

    /// True when this foul, called on the defense, hands the offense a first down.
    pub fn grants_automatic_first_down(self, called_on_defense: bool) -> bool {
        called_on_defense && !self.is_automatic_first_down_exception()
    }

    /// Personal fouls and other 15-yard infractions.
    pub fn is_major(self) -> bool {
        self.yards() >= 15
    }

    pub fn label(self) -> &'static str {
        use PenaltyName::*;
        match self {
            OffensiveHolding => "offensive holding",
            FalseStart => "false start",
            DefensivePassInterference => "defensive pass interference",
            UnnecessaryRoughness => "unnecessary roughness",
            DefensiveHolding => "defensive holding",
            DefensiveOffside => "defensive offside",
            NeutralZoneInfraction => "neutral zone infraction",
            DelayOfGame => "delay of game",
            IllegalBlockAboveTheWaist => "illegal block above the waist",
            IllegalUseOfHands => "illegal use of hands",
            OffensivePassInterference => "offensive pass interference",
            FaceMask => "face mask",
            RoughingThePasser => "roughing the passer",
            UnsportsmanlikeConduct => "unsportsmanlike conduct",
            IllegalContact => "illegal contact",
            IllegalFormation => "illegal formation",
            Defensive12OnField => "12 men on the field, defense",
            Encroachment => "encroachment",
            IntentionalGrounding => "intentional grounding",
            IllegalShift => "illegal shift",
            Taunting => "taunting",
            IneligibleDownfieldPass => "ineligible man downfield",
            OffsideOnFreeKick => "offside on the free kick",
            ChopBlock => "chop block",
            PlayerOutOfBoundsOnPunt => "player out of bounds on punt",
            RunningIntoTheKicker => "running into the kicker",
            HorseCollarTackle => "horse collar tackle",
            IllegalMotion => "illegal motion",
            Tripping => "tripping",
            Offensive12OnField => "12 men on the field, offense",
            IllegalSubstitution => "illegal substitution",
            PersonalFoul => "personal foul",
            IneligibleDownfieldKick => "ineligible man downfield on kick",
            IllegalForwardPass => "illegal forward pass",
            Clipping => "clipping",
            IllegalBlindsideBlock => "illegal blindside block",
            DefensiveDelayOfGame => "delay of game, defense",
            IllegalTouchPass => "illegal touch of a pass",
            FairCatchInterference => "fair catch interference",
            OffensiveOffside => "offensive offside",
            IllegalTouchKick => "illegal touch of a kick",
            LowBlock => "low block",
            IllegalPeelback => "illegal peelback block",
            Leaping => "leaping",
            RoughingTheKicker => "roughing the kicker",
            IllegalCrackback => "illegal crackback block",
            InvalidFairCatchSignal => "invalid fair catch signal",
            Disqualification => "disqualification",
            InterferenceWithOpportunityToCatch => "kick catch interference",
            Leverage => "leverage",
        }
    }
}

/// A foul flagged during play resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub name: PenaltyName,
    /// Yards before the half-distance rule; spot fouls carry the distance to the spot
    pub yards: i32,
    pub called_on: Possession,
    pub committed_by: Option<PlayerId>,
    pub occurred_when: PenaltyTiming,
    pub accepted: bool,
}

impl Penalty {
    pub fn is_on(&self, team: Possession) -> bool {
        self.called_on == team
    }
}
