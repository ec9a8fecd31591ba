//! Mistake tiers
//!
//! A run's net mistake count selects a tier, which scales the base score.
//! Rules are scanned in ascending order and the first bound that covers the
//! count wins, so boundary values land in the stricter tier.

use serde::Serialize;

use crate::error::{ScoringError, ScoringResult};

/// Upper bound of a tier (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MistakeBound {
    AtMost(u32),
    Unbounded,
}

impl MistakeBound {
    pub fn covers(&self, mistakes: u32) -> bool {
        match self {
            MistakeBound::AtMost(max) => mistakes <= *max,
            MistakeBound::Unbounded => true,
        }
    }
}

/// A single tier rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierRule {
    pub max_mistakes: MistakeBound,
    /// Score multiplier in hundredths (150 = 1.5x)
    pub multiplier_pct: u32,
    pub label: &'static str,
}

impl TierRule {
    pub const fn new(max_mistakes: MistakeBound, multiplier_pct: u32, label: &'static str) -> Self {
        Self {
            max_mistakes,
            multiplier_pct,
            label,
        }
    }

    /// Multiplier as a display value
    pub fn multiplier(&self) -> f64 {
        f64::from(self.multiplier_pct) / 100.0
    }

    /// `floor(base * multiplier)`, computed exactly and saturating at the
    /// `i64` limits
    pub fn apply(&self, base_score: i64) -> i64 {
        let scaled = (i128::from(base_score) * i128::from(self.multiplier_pct)).div_euclid(100);
        saturate(scaled)
    }
}

/// Tiers used by every level
pub static STANDARD_TIERS: [TierRule; 4] = [
    TierRule::new(MistakeBound::AtMost(1), 150, "PERFECT!"),
    TierRule::new(MistakeBound::AtMost(4), 130, "EXCELLENT!"),
    TierRule::new(MistakeBound::AtMost(8), 115, "GOOD!"),
    TierRule::new(MistakeBound::Unbounded, 100, "COMPLETED"),
];

/// Validated, ordered tier rules ending in a catch-all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    rules: Vec<TierRule>,
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TierTable {
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_TIERS.to_vec(),
        }
    }

    /// Build a table, checking ordering and the trailing catch-all
    pub fn new(rules: Vec<TierRule>) -> ScoringResult<Self> {
        let Some((last, bounded)) = rules.split_last() else {
            return Err(invalid("no tiers"));
        };
        if last.max_mistakes != MistakeBound::Unbounded {
            return Err(invalid("last tier must be unbounded"));
        }
        if rules.iter().any(|r| r.multiplier_pct == 0) {
            return Err(invalid("multipliers must be positive"));
        }

        let mut prev: Option<u32> = None;
        for rule in bounded {
            let MistakeBound::AtMost(max) = rule.max_mistakes else {
                return Err(invalid("only the last tier may be unbounded"));
            };
            if prev.is_some_and(|p| p >= max) {
                return Err(invalid("bounds must be strictly ascending"));
            }
            prev = Some(max);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    /// Tier for a net mistake count
    pub fn tier_for(&self, net_mistakes: u32) -> &TierRule {
        self.rules
            .iter()
            .find(|r| r.max_mistakes.covers(net_mistakes))
            // Tables are never empty, and the last rule is the catch-all
            .unwrap_or(&self.rules[self.rules.len() - 1])
    }
}

pub(crate) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

fn invalid(msg: &str) -> ScoringError {
    ScoringError::InvalidTierTable(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_perfect_tier() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(0).label, "PERFECT!");
        assert_eq!(tiers.tier_for(1).label, "PERFECT!");
        assert_eq!(tiers.tier_for(1).multiplier(), 1.5);
    }

    #[test]
    fn test_excellent_tier() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(2).label, "EXCELLENT!");
        assert_eq!(tiers.tier_for(4).label, "EXCELLENT!");
        assert_eq!(tiers.tier_for(4).multiplier(), 1.3);
    }

    #[test]
    fn test_good_tier() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(5).label, "GOOD!");
        assert_eq!(tiers.tier_for(8).label, "GOOD!");
        assert_eq!(tiers.tier_for(8).multiplier(), 1.15);
    }

    #[test]
    fn test_completed_tier() {
        let tiers = TierTable::standard();
        assert_eq!(tiers.tier_for(9).label, "COMPLETED");
        assert_eq!(tiers.tier_for(100).multiplier(), 1.0);
        assert_eq!(tiers.tier_for(u32::MAX).label, "COMPLETED");
    }

    #[test]
    fn test_apply_multiplier() {
        let excellent = &STANDARD_TIERS[1];
        assert_eq!(excellent.apply(500), 650);
        // 100 * 1.15 is exactly 115 in hundredths
        assert_eq!(STANDARD_TIERS[2].apply(100), 115);
        assert_eq!(STANDARD_TIERS[0].apply(33), 49);
        // Floors toward negative infinity
        assert_eq!(STANDARD_TIERS[0].apply(-15), -23);
    }

    #[test]
    fn test_apply_saturates_on_huge_scores() {
        assert_eq!(STANDARD_TIERS[0].apply(i64::MAX / 100), i64::MAX / 100 * 3 / 2);
        assert_eq!(STANDARD_TIERS[0].apply(i64::MAX), i64::MAX);
        assert_eq!(STANDARD_TIERS[0].apply(i64::MIN), i64::MIN);
        assert_eq!(STANDARD_TIERS[3].apply(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_rejects_missing_catch_all() {
        let rules = vec![TierRule::new(MistakeBound::AtMost(3), 120, "OK")];
        assert!(matches!(
            TierTable::new(rules),
            Err(ScoringError::InvalidTierTable(_))
        ));
        assert!(TierTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_unordered_bounds() {
        let rules = vec![
            TierRule::new(MistakeBound::AtMost(4), 130, "A"),
            TierRule::new(MistakeBound::AtMost(2), 120, "B"),
            TierRule::new(MistakeBound::Unbounded, 100, "C"),
        ];
        assert!(TierTable::new(rules).is_err());

        let rules = vec![
            TierRule::new(MistakeBound::Unbounded, 130, "A"),
            TierRule::new(MistakeBound::Unbounded, 100, "B"),
        ];
        assert!(TierTable::new(rules).is_err());
    }

    #[test]
    fn test_rejects_zero_multiplier() {
        let rules = vec![TierRule::new(MistakeBound::Unbounded, 0, "NONE")];
        assert!(TierTable::new(rules).is_err());
    }

    #[test]
    fn test_custom_table() {
        let rules = vec![
            TierRule::new(MistakeBound::AtMost(0), 200, "FLAWLESS"),
            TierRule::new(MistakeBound::Unbounded, 110, "DONE"),
        ];
        let table = TierTable::new(rules).unwrap();
        assert_eq!(table.tier_for(0).label, "FLAWLESS");
        assert_eq!(table.tier_for(1).label, "DONE");
        // The table's own catch-all, never the standard one
        assert_eq!(table.tier_for(u32::MAX).label, "DONE");
        assert_eq!(table.tier_for(u32::MAX).multiplier_pct, 110);
        assert_eq!(table.rules().len(), 2);
    }

    proptest! {
        #[test]
        fn prop_multiplier_never_increases(a in 0u32..1000, b in 0u32..1000) {
            let tiers = TierTable::standard();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tiers.tier_for(lo).multiplier_pct >= tiers.tier_for(hi).multiplier_pct);
        }

        #[test]
        fn prop_apply_is_exact_on_multiples_of_twenty(base in 0i64..100_000) {
            // Multiples of 20 keep every standard multiplier integral
            let base = base * 20;
            for tier in &STANDARD_TIERS {
                let expected = base * i64::from(tier.multiplier_pct) / 100;
                prop_assert_eq!(tier.apply(base), expected);
            }
        }
    }
}
