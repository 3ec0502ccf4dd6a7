/*!
 * Circular Window Predicate
 * Membership test for a window of half-width `range` around `degree`
 * on the 360-degree circle
 */

use crate::core::limits::DEGREES_PER_TURN;
use crate::core::types::Degrees;

/// Non-negative modulo onto `[0, 360)`
///
/// Sign-independent: `wrap_degrees(-1) == 359`, `wrap_degrees(-1000) == 80`.
#[inline(always)]
pub const fn wrap_degrees(x: i64) -> Degrees {
    // rem_euclid is always in [0, 360), so the narrowing is lossless
    x.rem_euclid(DEGREES_PER_TURN) as Degrees
}

/// Boundary angles `(a, b)` of the window, each normalized into `[0, 360)`
///
/// `a` is the upper edge `degree + range`, `b` the lower edge
/// `degree - range`. Computed in 64 bits so no i32 input overflows.
#[inline(always)]
pub const fn window_bounds(degree: Degrees, range: Degrees) -> (Degrees, Degrees) {
    let degree = degree as i64;
    let range = range as i64;
    (wrap_degrees(degree + range), wrap_degrees(degree - range))
}

/// Test whether `now` lies strictly between the window's two boundaries
///
/// The boundaries are normalized onto the circle but `now` is taken as-is and
/// compared on the number line: the result is `(a - now) * (b - now) < 0`.
/// This means:
///
/// - `now` equal to either boundary is outside.
/// - A window that straddles 0/360 reports the *complement* arc, e.g.
///   `in_window(10, 0, 20)` is `false` because the bounds are 20 and 340.
/// - With `range >= 180` the boundaries coincide or swap and the result is
///   whatever the arithmetic gives; callers needing true circular containment
///   must not rely on those ranges.
/// - `now` outside `[0, 360)` is never folded back onto the circle.
///
/// Total over all inputs and side-effect free.
#[inline]
pub const fn in_window(now: Degrees, degree: Degrees, range: Degrees) -> bool {
    let (a, b) = window_bounds(degree, range);
    let now = now as i64;
    // |a - now| and |b - now| are below 2^32, so the product fits in i64
    (a as i64 - now) * (b as i64 - now) < 0
}
