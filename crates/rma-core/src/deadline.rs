//! # Return-Window Arithmetic
//!
//! Pure functions over a delivery timestamp and the policy window. These
//! gate whether a customer may apply for a return at all, and drive the
//! remaining-days figure shown on the customer's progress view.
//!
//! Both functions take `now` explicitly — callers obtain it from an
//! injected [`crate::Clock`] — so results are deterministic given the same
//! inputs. An absent delivery timestamp always means "outside the window":
//! without a delivery record there is no window to be inside of.

use chrono::{DateTime, Duration, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whether a return application is still within the policy window.
///
/// `false` when `delivered_at` is absent; otherwise `true` iff
/// `now <= delivered_at + window_days`. The boundary instant itself is
/// inside the window; the instant after is not.
pub fn is_within_deadline(
    delivered_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window_days: u32,
) -> bool {
    match delivered_at {
        None => false,
        Some(delivered) => now <= delivered + Duration::days(i64::from(window_days)),
    }
}

/// Whole days remaining until the window closes, clamped at zero.
///
/// `0` when `delivered_at` is absent. Otherwise
/// `max(0, ceil((deadline - now) / 1 day))`: a window closing in one
/// second still reports one remaining day, and an expired window reports
/// zero rather than going negative.
pub fn remaining_days(
    delivered_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window_days: u32,
) -> u32 {
    let Some(delivered) = delivered_at else {
        return 0;
    };
    let deadline = delivered + Duration::days(i64::from(window_days));
    let seconds_left = (deadline - now).num_seconds();
    if seconds_left <= 0 {
        0
    } else {
        (seconds_left as u64).div_ceil(SECONDS_PER_DAY as u64) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn absent_delivery_is_never_within_window() {
        assert!(!is_within_deadline(None, base(), 7));
        assert_eq!(remaining_days(None, base(), 7), 0);
    }

    #[test]
    fn boundary_instant_is_inside_the_instant_after_is_not() {
        let delivered = base();
        let deadline = delivered + Duration::days(7);
        assert!(is_within_deadline(Some(delivered), deadline, 7));
        assert!(!is_within_deadline(
            Some(delivered),
            deadline + Duration::seconds(1),
            7
        ));
    }

    #[test]
    fn five_days_ago_with_seven_day_window() {
        let now = base();
        let delivered = now - Duration::days(5);
        assert!(is_within_deadline(Some(delivered), now, 7));
        assert_eq!(remaining_days(Some(delivered), now, 7), 2);
    }

    #[test]
    fn remaining_days_rounds_partial_days_up() {
        let delivered = base();
        // 6 days and one second left → 7 remaining days.
        let now = delivered + Duration::days(1) - Duration::seconds(1);
        assert_eq!(remaining_days(Some(delivered), now, 7), 7);
        // Exactly 6 days left → 6.
        let now = delivered + Duration::days(1);
        assert_eq!(remaining_days(Some(delivered), now, 7), 6);
    }

    #[test]
    fn expired_window_clamps_to_zero() {
        let delivered = base();
        let now = delivered + Duration::days(30);
        assert_eq!(remaining_days(Some(delivered), now, 7), 0);
        assert!(!is_within_deadline(Some(delivered), now, 7));
    }

    #[test]
    fn zero_day_window_expires_immediately_after_delivery() {
        let delivered = base();
        assert!(is_within_deadline(Some(delivered), delivered, 0));
        assert!(!is_within_deadline(
            Some(delivered),
            delivered + Duration::seconds(1),
            0
        ));
    }

    proptest! {
        /// Remaining days never increases as `now` advances, and is never
        /// negative (the return type makes the latter structural; the clamp
        /// keeps the boundary exact).
        #[test]
        fn remaining_days_monotone_non_increasing(
            offset_a in 0i64..40 * 86_400,
            step in 0i64..10 * 86_400,
            window in 0u32..60,
        ) {
            let delivered = base();
            let earlier = delivered + Duration::seconds(offset_a);
            let later = earlier + Duration::seconds(step);
            let at_earlier = remaining_days(Some(delivered), earlier, window);
            let at_later = remaining_days(Some(delivered), later, window);
            prop_assert!(at_later <= at_earlier);
        }

        /// Within the window, the remaining-days figure never exceeds the
        /// window itself.
        #[test]
        fn remaining_days_bounded_by_window(
            offset in 0i64..40 * 86_400,
            window in 0u32..60,
        ) {
            let delivered = base();
            let now = delivered + Duration::seconds(offset);
            prop_assert!(remaining_days(Some(delivered), now, window) <= window);
        }
    }
}
