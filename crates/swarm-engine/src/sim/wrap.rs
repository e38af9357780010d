/// Half the side of the toroidal play field; offsets live in `[-1.5, 1.5)`.
pub const FIELD_HALF_EXTENT: f32 = 1.5;

const FIELD_EXTENT: f32 = FIELD_HALF_EXTENT * 2.0;

/// Wraps `x` into `[-FIELD_HALF_EXTENT, FIELD_HALF_EXTENT)`.
///
/// In-range values come back untouched, which keeps `wrap(wrap(x)) == wrap(x)`
/// exact under float rounding. Non-finite input maps to `0.0`.
#[inline]
pub fn wrap_toroidal(x: f32) -> f32 {
    if (-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT).contains(&x) {
        return x;
    }
    if !x.is_finite() {
        return 0.0;
    }

    let mut r = (x + FIELD_HALF_EXTENT).rem_euclid(FIELD_EXTENT);
    // rem_euclid may round up to the modulus itself for tiny negative inputs.
    if r >= FIELD_EXTENT {
        r -= FIELD_EXTENT;
    }
    r - FIELD_HALF_EXTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inside_values_are_unchanged() {
        for x in [-1.5, -0.3, 0.0, 1.4, 1.499_999_9] {
            assert_eq!(wrap_toroidal(x), x);
        }
    }

    #[test]
    fn upper_bound_wraps_to_lower() {
        assert_eq!(wrap_toroidal(1.5), -1.5);
    }

    #[test]
    fn crossing_right_edge_reappears_left() {
        assert!((wrap_toroidal(1.6) - -1.4).abs() < 1e-5);
    }

    #[test]
    fn crossing_left_edge_reappears_right() {
        assert!((wrap_toroidal(-1.6) - 1.4).abs() < 1e-5);
    }

    #[test]
    fn several_laps_are_removed() {
        assert!((wrap_toroidal(7.0) - 1.0).abs() < 1e-5);
        assert!((wrap_toroidal(-7.0) - -1.0).abs() < 1e-5);
    }

    #[test]
    fn non_finite_maps_to_origin() {
        assert_eq!(wrap_toroidal(f32::NAN), 0.0);
        assert_eq!(wrap_toroidal(f32::INFINITY), 0.0);
        assert_eq!(wrap_toroidal(f32::NEG_INFINITY), 0.0);
    }

    proptest! {
        #[test]
        fn result_is_always_in_field(o in -1.5f32..1.5, d in -1.0e6f32..1.0e6) {
            let w = wrap_toroidal(o + d);
            prop_assert!((-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT).contains(&w), "{w}");
        }

        #[test]
        fn wrap_is_idempotent(x in proptest::num::f32::ANY) {
            let once = wrap_toroidal(x);
            prop_assert_eq!(wrap_toroidal(once).to_bits(), once.to_bits());
        }
    }
}
