//! The two domain pricing formulas.
//!
//! Both functions are total: every degenerate input (zero reserves, zero
//! length, out-of-range candle) produces `ZERO` rather than an error or a
//! panic. Intermediate arithmetic saturates through the fixed-point layer,
//! with divide-before-multiply fallbacks where the naive product could
//! overflow.

use crate::domain::{BasisPoints, FixedPoint};

/// Evaluates the bonded curve `y = 4·H·x·(L − x) / L²` at candle `x`.
///
/// `height` is scaled; `candle` and `length` are regular integers. The
/// result is scaled. Returns `ZERO` when `length == 0` or `candle >
/// length` — and naturally at the endpoints `x = 0` and `x = L`, where the
/// parabola touches zero.
///
/// # Examples
///
/// ```
/// use curvebound::domain::FixedPoint;
/// use curvebound::math::curve_value;
///
/// let h = FixedPoint::from_regular(1);
/// // Apex of the parabola: y(L/2) = H
/// assert_eq!(curve_value(144, h, 288), h);
/// ```
#[must_use]
pub const fn curve_value(candle: u64, height: FixedPoint, length: u64) -> FixedPoint {
    if length == 0 || candle > length {
        return FixedPoint::ZERO;
    }
    let x = candle as u128;
    let l = length as u128;

    // 4·x·(L−x) peaks at L², so for protocol lengths this never overflows;
    // saturation covers hostile lengths.
    let span = 4u128.saturating_mul(x).saturating_mul(l - x);
    let denom = l.saturating_mul(l);

    match height.get().checked_mul(span) {
        Some(numerator) => FixedPoint::new(numerator / denom),
        None => FixedPoint::new((height.get() / denom).saturating_mul(span)),
    }
}

/// Computes the constant-product output
/// `y_out = y_r − (x_r · y_r) / (x_r + x_in)`.
///
/// All operands are scaled. Returns `ZERO` when any of the input or
/// reserves is zero — the "no liquidity" degenerate case is a defined
/// result.
#[must_use]
pub const fn amm_output(
    x_in: FixedPoint,
    x_reserve: FixedPoint,
    y_reserve: FixedPoint,
) -> FixedPoint {
    if x_in.is_zero() || x_reserve.is_zero() || y_reserve.is_zero() {
        return FixedPoint::ZERO;
    }

    let denom = x_reserve.saturating_add(x_in).get();
    let out = match x_reserve.get().checked_mul(y_reserve.get()) {
        // k / denom ≤ y_reserve because denom ≥ x_reserve.
        Some(k) => y_reserve.get() - k / denom,
        None => y_reserve
            .get()
            .saturating_sub((y_reserve.get() / denom).saturating_mul(x_reserve.get())),
    };
    FixedPoint::new(out)
}

/// Expresses the distance between an AMM fill and the curve expectation in
/// basis points: `|actual − expected| × 10_000 / expected`.
///
/// A zero expectation yields zero deviation by definition.
#[must_use]
pub const fn deviation_bps(actual: FixedPoint, expected: FixedPoint) -> BasisPoints {
    BasisPoints::from_ratio(actual.abs_diff(expected), expected)
}
