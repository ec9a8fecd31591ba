//! Scoring engine
//!
//! Pure computation: a finished run's base score and mistakes go in, the tier,
//! speed bonus and final score come out. Nothing here touches storage.

use serde::Serialize;

use crate::consts::SPEED_BONUS_PCT;
use crate::levels::LevelPoints;
use crate::tiers::{TierRule, TierTable, saturate};

/// Format seconds as `m:ss` (minutes unpadded, no hour rollover)
pub fn format_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn speed_bonus_pct(elapsed_secs: u64, time_limit_secs: u64) -> u32 {
    if elapsed_secs <= time_limit_secs {
        SPEED_BONUS_PCT
    } else {
        0
    }
}

/// Bonus fraction for finishing within the time limit (inclusive)
pub fn speed_bonus(elapsed_secs: u64, time_limit_secs: u64) -> f64 {
    f64::from(speed_bonus_pct(elapsed_secs, time_limit_secs)) / 100.0
}

/// `floor(base_score * tier multiplier)`
pub fn compute_final_score(base_score: i64, tier: &TierRule) -> i64 {
    tier.apply(base_score)
}

/// Add the speed bonus on top of a score. Non-positive scores gain nothing.
pub fn apply_speed_bonus(score: i64, elapsed_secs: u64, time_limit_secs: u64) -> i64 {
    if score <= 0 {
        return score;
    }
    let pct = i128::from(speed_bonus_pct(elapsed_secs, time_limit_secs));
    let score = i128::from(score);
    saturate(score + score * pct / 100)
}

/// Running score of one game, fed by quiz and timeline events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTally {
    points: LevelPoints,
    base_score: i64,
    mistakes: u32,
    redemptions: u32,
}

impl RunTally {
    pub fn new(points: LevelPoints) -> Self {
        Self {
            points,
            base_score: 0,
            mistakes: 0,
            redemptions: 0,
        }
    }

    /// Correct quiz answer on the given attempt (1-based). Returns points gained.
    pub fn record_correct_answer(&mut self, attempt: u32) -> i64 {
        let gained = self.points.answer_points(attempt);
        self.base_score += gained;
        gained
    }

    /// Wrong quiz pick. Returns the (negative) penalty applied.
    pub fn record_wrong_answer(&mut self) -> i64 {
        self.mistakes += 1;
        self.base_score += self.points.wrong_penalty;
        self.points.wrong_penalty
    }

    /// A previously missed card answered correctly. Refunds one penalty and
    /// forgives one mistake; does nothing when no mistake is outstanding.
    pub fn record_redemption(&mut self) -> i64 {
        if self.net_mistakes() == 0 {
            return 0;
        }
        self.redemptions += 1;
        self.base_score += self.points.redemption_refund;
        self.points.redemption_refund
    }

    /// Card dropped into its correct timeline slot
    pub fn record_placement(&mut self) -> i64 {
        let gained = self.points.placement_bonus();
        self.base_score += gained;
        gained
    }

    pub fn base_score(&self) -> i64 {
        self.base_score
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Mistakes that count toward the tier
    pub fn net_mistakes(&self) -> u32 {
        self.mistakes.saturating_sub(self.redemptions)
    }

    /// Snapshot as engine input
    pub fn to_input(&self, elapsed_secs: u64, time_limit_secs: u64) -> RunInput {
        RunInput {
            base_score: self.base_score,
            net_mistakes: self.net_mistakes(),
            elapsed_secs,
            time_limit_secs,
        }
    }
}

/// Raw numbers the UI hands over when a level is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunInput {
    pub base_score: i64,
    pub net_mistakes: u32,
    pub elapsed_secs: u64,
    pub time_limit_secs: u64,
}

/// Everything the win screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub tier_label: &'static str,
    pub multiplier: f64,
    pub time: String,
    pub speed_bonus: f64,
    pub base_score: i64,
    /// Base score after the tier multiplier
    pub multiplied_score: i64,
    /// Multiplied score plus the speed bonus
    pub final_score: i64,
}

/// Scoring rules for a game session
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    tiers: TierTable,
}

impl ScoringEngine {
    pub fn new(tiers: TierTable) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Tier for a net mistake count (always matches)
    pub fn tier_for(&self, net_mistakes: u32) -> &TierRule {
        self.tiers.tier_for(net_mistakes)
    }

    /// Score a finished run
    pub fn score_run(&self, input: &RunInput) -> ScoreReport {
        let tier = self.tier_for(input.net_mistakes);
        let multiplied_score = compute_final_score(input.base_score, tier);
        let final_score =
            apply_speed_bonus(multiplied_score, input.elapsed_secs, input.time_limit_secs);

        log::debug!(
            "Run scored: base={} mistakes={} tier={} final={}",
            input.base_score,
            input.net_mistakes,
            tier.label,
            final_score
        );

        ScoreReport {
            tier_label: tier.label,
            multiplier: tier.multiplier(),
            time: format_time(input.elapsed_secs),
            speed_bonus: speed_bonus(input.elapsed_secs, input.time_limit_secs),
            base_score: input.base_score,
            multiplied_score,
            final_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::level_points;
    use crate::tiers::STANDARD_TIERS;
    use proptest::prelude::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(30), "0:30");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(60), "1:00");
        assert_eq!(format_time(180), "3:00");
        assert_eq!(format_time(95), "1:35");
        assert_eq!(format_time(305), "5:05");
    }

    #[test]
    fn test_format_time_no_hour_rollover() {
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(7261), "121:01");
    }

    #[test]
    fn test_speed_bonus() {
        assert_eq!(speed_bonus(100, 180), 0.2);
        assert_eq!(speed_bonus(180, 180), 0.2);
        assert_eq!(speed_bonus(181, 180), 0.0);
    }

    #[test]
    fn test_compute_final_score() {
        let excellent = TierTable::standard().tier_for(3).clone();
        assert_eq!(compute_final_score(500, &excellent), 650);
        assert_eq!(compute_final_score(500, &STANDARD_TIERS[3]), 500);
    }

    #[test]
    fn test_apply_speed_bonus() {
        assert_eq!(apply_speed_bonus(650, 100, 180), 780);
        assert_eq!(apply_speed_bonus(650, 200, 180), 650);
        // 20% of 7 floors to 1
        assert_eq!(apply_speed_bonus(7, 0, 180), 8);
        assert_eq!(apply_speed_bonus(-40, 0, 180), -40);
        assert_eq!(apply_speed_bonus(0, 0, 180), 0);
        assert_eq!(apply_speed_bonus(i64::MAX, 0, 180), i64::MAX);
    }

    #[test]
    fn test_tally_quiz_flow() {
        let mut tally = RunTally::new(*level_points(1).unwrap());
        assert_eq!(tally.record_correct_answer(1), 50);
        assert_eq!(tally.record_wrong_answer(), -20);
        assert_eq!(tally.record_correct_answer(2), 25);
        assert_eq!(tally.record_placement(), 25);
        assert_eq!(tally.base_score(), 80);
        assert_eq!(tally.mistakes(), 1);
        assert_eq!(tally.net_mistakes(), 1);
    }

    #[test]
    fn test_tally_redemption() {
        let mut tally = RunTally::new(*level_points(2).unwrap());
        // Nothing to redeem yet
        assert_eq!(tally.record_redemption(), 0);

        tally.record_wrong_answer();
        tally.record_wrong_answer();
        assert_eq!(tally.base_score(), -80);
        assert_eq!(tally.record_redemption(), 40);
        assert_eq!(tally.net_mistakes(), 1);
        assert_eq!(tally.mistakes(), 2);
        assert_eq!(tally.record_redemption(), 40);
        assert_eq!(tally.record_redemption(), 0);
        assert_eq!(tally.net_mistakes(), 0);
        assert_eq!(tally.base_score(), 0);
    }

    #[test]
    fn test_score_run() {
        let engine = ScoringEngine::default();
        let report = engine.score_run(&RunInput {
            base_score: 500,
            net_mistakes: 3,
            elapsed_secs: 95,
            time_limit_secs: 180,
        });
        assert_eq!(report.tier_label, "EXCELLENT!");
        assert_eq!(report.multiplier, 1.3);
        assert_eq!(report.time, "1:35");
        assert_eq!(report.speed_bonus, 0.2);
        assert_eq!(report.multiplied_score, 650);
        assert_eq!(report.final_score, 780);
    }

    #[test]
    fn test_score_run_slow_and_sloppy() {
        let engine = ScoringEngine::default();
        let report = engine.score_run(&RunInput {
            base_score: 300,
            net_mistakes: 12,
            elapsed_secs: 500,
            time_limit_secs: 480,
        });
        assert_eq!(report.tier_label, "COMPLETED");
        assert_eq!(report.speed_bonus, 0.0);
        assert_eq!(report.final_score, 300);
    }

    #[test]
    fn test_tally_to_input() {
        let mut tally = RunTally::new(*level_points(1).unwrap());
        tally.record_correct_answer(1);
        tally.record_wrong_answer();
        let input = tally.to_input(61, 180);
        assert_eq!(input.base_score, 30);
        assert_eq!(input.net_mistakes, 1);
        assert_eq!(input.time_limit_secs, 180);
    }

    proptest! {
        #[test]
        fn prop_format_time_parses_back(secs in 0u64..1_000_000) {
            let formatted = format_time(secs);
            let (mins, rest) = formatted.split_once(':').unwrap();
            prop_assert_eq!(rest.len(), 2);
            let total = mins.parse::<u64>().unwrap() * 60 + rest.parse::<u64>().unwrap();
            prop_assert_eq!(total, secs);
        }

        #[test]
        fn prop_speed_bonus_is_a_step(elapsed in 0u64..10_000, limit in 0u64..10_000) {
            let bonus = speed_bonus(elapsed, limit);
            prop_assert_eq!(bonus > 0.0, elapsed <= limit);
        }
    }
}
