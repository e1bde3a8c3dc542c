use super::config::TierThresholds;
use super::domain::Tier;

/// Map a score onto a tier. Boundaries are lower-inclusive; anything below `C`,
/// including a NaN score, lands in `D`.
pub fn classify(score: f64, thresholds: &TierThresholds) -> Tier {
    if score >= thresholds.a {
        Tier::A
    } else if score >= thresholds.b {
        Tier::B
    } else if score >= thresholds.c {
        Tier::C
    } else {
        Tier::D
    }
}

/// Highest integer score that still stays strictly below the `A` threshold.
pub(crate) fn top_tier_ceiling(thresholds: &TierThresholds) -> u8 {
    (thresholds.a.ceil() - 1.0).clamp(0.0, 100.0) as u8
}
