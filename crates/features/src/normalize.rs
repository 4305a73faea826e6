/// Rescale `values` so the finite minimum maps to 0 and the finite maximum
/// to 1.
///
/// A zero range (all finite values equal) maps every finite value to 0.
/// Non-finite entries are carried through unchanged; the inference engine
/// treats them as outside every label.
pub fn normalize_min_max(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    let range = max - min;
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                v
            } else if range > 0.0 {
                (v - min) / range
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_min_max;
    use proptest::prelude::*;

    #[test]
    fn maps_extremes_to_unit_interval() {
        assert_eq!(normalize_min_max(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn constant_input_maps_to_zero() {
        assert_eq!(normalize_min_max(&[7.0, 7.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn empty_input() {
        assert!(normalize_min_max(&[]).is_empty());
    }

    #[test]
    fn non_finite_values_pass_through() {
        let out = normalize_min_max(&[1.0, f64::INFINITY, 3.0, f64::NAN]);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], f64::INFINITY);
        assert_eq!(out[2], 1.0);
        assert!(out[3].is_nan());
    }

    proptest! {
        #[test]
        fn output_is_within_unit_interval(values in prop::collection::vec(-1e6f64..1e6, 1..200)) {
            let out = normalize_min_max(&values);
            prop_assert_eq!(out.len(), values.len());
            for v in out {
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }

        #[test]
        fn preserves_order(values in prop::collection::vec(-1e6f64..1e6, 2..200)) {
            let out = normalize_min_max(&values);
            for i in 1..values.len() {
                if values[i - 1] <= values[i] {
                    prop_assert!(out[i - 1] <= out[i]);
                }
            }
        }
    }
}
