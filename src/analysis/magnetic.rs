use crate::data::model::{MagneticProperties, Series};

// ---------------------------------------------------------------------------
// Hysteresis loop properties
// ---------------------------------------------------------------------------

/// Saturation (peak |moment|), remanence (|moment| at zero field) and
/// coercivity (|field| at zero moment).
///
/// Remanence is only interpolated when the field actually changes sign,
/// coercivity only when the moment does; otherwise they are 0.
pub fn estimate_magnetic_properties(series: &Series) -> MagneticProperties {
    let x = series.xs();
    let y = series.ys();

    let ms = y.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    let mr = if has_sign_change(&x) {
        interpolate(&x, &y, 0.0).map_or(0.0, f64::abs)
    } else {
        0.0
    };

    let hc = if has_sign_change(&y) {
        interpolate(&y, &x, 0.0).map_or(0.0, f64::abs)
    } else {
        0.0
    };

    MagneticProperties { ms, mr, hc }
}

/// True when the values contain both a strictly negative and a strictly
/// positive entry. Zeros count as neither.
pub fn has_sign_change(values: &[f64]) -> bool {
    values.iter().any(|&v| v < 0.0) && values.iter().any(|&v| v > 0.0)
}

/// Piecewise-linear value of `fp` at `target` along the axis `xp`.
///
/// `xp` need not be sorted; the lookup follows input order:
/// 1. the first sample whose axis value equals `target` exactly wins;
/// 2. otherwise the first adjacent pair whose axis values bracket `target`
///    is interpolated linearly;
/// 3. otherwise (target outside every segment) the sample with the closest
///    axis value is returned, first one on ties.
///
/// `None` only for empty input.
pub fn interpolate(xp: &[f64], fp: &[f64], target: f64) -> Option<f64> {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return None;
    }
    let (xp, fp) = (&xp[..n], &fp[..n]);

    if let Some(i) = xp.iter().position(|&v| v == target) {
        return Some(fp[i]);
    }

    for i in 0..n - 1 {
        let (x0, x1) = (xp[i], xp[i + 1]);
        if x0.min(x1) < target && target < x0.max(x1) {
            let t = (target - x0) / (x1 - x0);
            return Some(fp[i] + t * (fp[i + 1] - fp[i]));
        }
    }

    let mut nearest = 0;
    for i in 1..n {
        if (xp[i] - target).abs() < (xp[nearest] - target).abs() {
            nearest = i;
        }
    }
    Some(fp[nearest])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_linear_through_origin() {
        let series = Series::from_pairs([(-2.0, -4.0), (-1.0, -2.0), (0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]);
        let props = estimate_magnetic_properties(&series);
        assert_eq!(props.ms, 4.0);
        assert_eq!(props.mr, 0.0);
        assert_eq!(props.hc, 0.0);
    }

    #[test]
    fn test_field_never_crosses_zero() {
        let series = Series::from_pairs([(1.0, -5.0), (2.0, 3.0), (3.0, 7.0), (4.0, 9.0), (5.0, 10.0)]);
        let props = estimate_magnetic_properties(&series);
        assert_eq!(props.mr, 0.0);
        assert_eq!(props.ms, 10.0);
        // moment does cross zero between x=1 and x=2
        assert!(approx(props.hc, 1.625));
    }

    #[test]
    fn test_offset_loop_branch() {
        // Descending branch shifted so that M(0) = 3 and H(M=0) = -1.5.
        let series = Series::from_pairs([
            (10.0, 10.0),
            (5.0, 8.0),
            (0.0, 3.0),
            (-1.0, 1.0),
            (-2.0, -1.0),
            (-10.0, -10.0),
        ]);
        let props = estimate_magnetic_properties(&series);
        assert_eq!(props.ms, 10.0);
        assert_eq!(props.mr, 3.0);
        assert!(approx(props.hc, 1.5));
    }

    #[test]
    fn test_saturation_uses_absolute_moment() {
        let series = Series::from_pairs([(1.0, -12.0), (2.0, 3.0), (3.0, 4.0), (4.0, 5.0), (5.0, 6.0)]);
        assert_eq!(estimate_magnetic_properties(&series).ms, 12.0);
    }

    #[test]
    fn test_zero_is_not_a_sign() {
        assert!(!has_sign_change(&[0.0, 1.0, 2.0]));
        assert!(!has_sign_change(&[-1.0, 0.0, -2.0]));
        assert!(has_sign_change(&[-1.0, 0.0, 0.0, 3.0]));
        // non-adjacent opposite signs still count
        assert!(has_sign_change(&[2.0, 0.0, -1.0]));
    }

    #[test]
    fn test_empty_series() {
        let props = estimate_magnetic_properties(&Series::new());
        assert_eq!(props, MagneticProperties::default());
        assert_eq!(interpolate(&[], &[], 0.0), None);
    }

    #[test]
    fn test_interpolate_exact_match_takes_first() {
        let xp = [1.0, 0.0, -1.0, 0.0];
        let fp = [5.0, 7.0, 9.0, 11.0];
        assert_eq!(interpolate(&xp, &fp, 0.0), Some(7.0));
    }

    #[test]
    fn test_interpolate_first_bracketing_pair_wins() {
        // A full loop: the descending branch brackets 0 first.
        let xp = [2.0, -2.0, 2.0];
        let fp = [4.0, 0.0, 8.0];
        assert_eq!(interpolate(&xp, &fp, 0.0), Some(2.0));
        let reversed = [8.0, 0.0, 4.0];
        assert_eq!(interpolate(&xp, &reversed, 0.0), Some(4.0));
    }

    #[test]
    fn test_interpolate_outside_range_clamps_to_nearest() {
        let xp = [1.0, 2.0, 3.0];
        let fp = [10.0, 20.0, 30.0];
        assert_eq!(interpolate(&xp, &fp, 0.0), Some(10.0));
        assert_eq!(interpolate(&xp, &fp, 9.0), Some(30.0));
    }

    #[test]
    fn test_repeated_calls_agree() {
        let series = Series::from_pairs([(-3.0, -1.0), (3.0, 2.0), (-1.0, 4.0), (1.0, -2.0), (0.5, 0.5)]);
        assert_eq!(
            estimate_magnetic_properties(&series),
            estimate_magnetic_properties(&series)
        );
    }
}
