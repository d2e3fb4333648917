//! Closed-form metric primitives.
//!
//! Every ratio guards against a zero follower count and returns `0.0`
//! instead of `NaN` or infinity.

use informint_core::{FollowerTier, PerformanceTier};

/// `(likes + comments) / followers * 100`, or `0.0` when `followers` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(likes: u64, comments: u64, followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    (likes.saturating_add(comments)) as f64 / followers as f64 * 100.0
}

/// `video_views / followers`, or `0.0` when `followers` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reach_multiplier(video_views: u64, followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    video_views as f64 / followers as f64
}

/// Product of engagement rate and reach multiplier. Unbounded.
#[must_use]
pub fn viral_coefficient(engagement_rate: f64, reach_multiplier: f64) -> f64 {
    engagement_rate * reach_multiplier
}

/// Band a follower count into a tier.
///
/// Accounts under 1,000 followers land in `Micro`, not `Nano`. This mirrors
/// the published dashboard numbers and is kept as-is until product decides
/// on a dedicated lowest tier.
#[must_use]
pub fn follower_tier(followers: u64) -> FollowerTier {
    match followers {
        1_000_000.. => FollowerTier::Mega,
        100_000..=999_999 => FollowerTier::Macro,
        10_000..=99_999 => FollowerTier::Micro,
        1_000..=9_999 => FollowerTier::Nano,
        _ => FollowerTier::Micro,
    }
}

/// Classify an engagement rate (percent).
#[must_use]
pub fn performance_tier(engagement_rate: f64) -> PerformanceTier {
    if engagement_rate >= 6.0 {
        PerformanceTier::Excellent
    } else if engagement_rate >= 3.0 {
        PerformanceTier::Good
    } else if engagement_rate >= 1.0 {
        PerformanceTier::Average
    } else {
        PerformanceTier::Poor
    }
}

/// Partnership ROI potential in `[0, 100]`.
///
/// Smaller audiences score higher: `max(0, 10 - log10(followers))` plus the
/// engagement rate, scaled by 5. A zero follower count is scored as 1,000.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn roi_potential(engagement_rate: f64, followers: u64) -> u8 {
    let base = if followers == 0 { 1_000 } else { followers };
    let follower_score = (10.0 - (base as f64).log10()).max(0.0);
    clamp_score((follower_score + engagement_rate) * 5.0)
}

/// Round once and clamp into `[0, 100]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn clamp_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Round to two decimal places for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place for display.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_followers_yields_zero_rates() {
        assert_eq!(engagement_rate(5_000, 300, 0), 0.0);
        assert_eq!(reach_multiplier(90_000, 0), 0.0);
        assert_eq!(viral_coefficient(0.0, 0.0), 0.0);
    }

    #[test]
    fn engagement_rate_matches_formula() {
        let er = engagement_rate(1_500, 45, 25_000);
        assert!((er - 6.18).abs() < 1e-9, "got {er}");
    }

    #[test]
    fn reach_multiplier_matches_formula() {
        assert!((reach_multiplier(8_000, 25_000) - 0.32).abs() < 1e-12);
    }

    #[test]
    fn viral_coefficient_is_product() {
        assert!((viral_coefficient(6.18, 0.32) - 1.9776).abs() < 1e-12);
    }

    #[test]
    fn follower_tier_boundaries() {
        let cases = [
            (0, FollowerTier::Micro),
            (999, FollowerTier::Micro),
            (1_000, FollowerTier::Nano),
            (9_999, FollowerTier::Nano),
            (10_000, FollowerTier::Micro),
            (99_999, FollowerTier::Micro),
            (100_000, FollowerTier::Macro),
            (999_999, FollowerTier::Macro),
            (1_000_000, FollowerTier::Mega),
            (u64::MAX, FollowerTier::Mega),
        ];
        for (followers, expected) in cases {
            assert_eq!(follower_tier(followers), expected, "followers={followers}");
        }
    }

    #[test]
    fn performance_tier_boundaries() {
        let cases = [
            (6.0, PerformanceTier::Excellent),
            (5.999, PerformanceTier::Good),
            (3.0, PerformanceTier::Good),
            (2.999, PerformanceTier::Average),
            (1.0, PerformanceTier::Average),
            (0.999, PerformanceTier::Poor),
            (0.0, PerformanceTier::Poor),
        ];
        for (rate, expected) in cases {
            assert_eq!(performance_tier(rate), expected, "rate={rate}");
        }
    }

    #[test]
    fn roi_potential_rewards_small_engaged_accounts() {
        // 10 - log10(25_000) = 5.602; (5.602 + 6.18) * 5 = 58.9
        assert_eq!(roi_potential(6.18, 25_000), 59);
        assert!(roi_potential(8.0, 2_000) > roi_potential(8.0, 2_000_000));
    }

    #[test]
    fn roi_potential_treats_zero_followers_as_one_thousand() {
        assert_eq!(roi_potential(0.0, 0), roi_potential(0.0, 1_000));
        assert_eq!(roi_potential(0.0, 0), 35);
    }

    #[test]
    fn roi_potential_is_clamped() {
        assert_eq!(roi_potential(500.0, 10), 100);
        assert_eq!(roi_potential(0.0, u64::MAX), 0);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(6.184_999), 6.18);
        assert_eq!(round2(5.546_666), 5.55);
        assert_eq!(round1(33.333), 33.3);
    }
}
