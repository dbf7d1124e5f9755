//! Reduce blocks of audio samples into a single magnitude value.

// -------------------------------------------------------------------------------------------------

/// Reduces a block of normalized audio samples into a single, non-negative magnitude value.
///
/// Reducers must accept empty blocks: they then should return `f32::NAN` to signal "no data".
/// Any `Fn(&[f32]) -> f32` closure or function, such as [`rms`] or [`peak`], is a reducer.
pub trait SampleReducer: Send + Sync {
    fn reduce(&self, samples: &[f32]) -> f32;
}

impl<F> SampleReducer for F
where
    F: Fn(&[f32]) -> f32 + Send + Sync,
{
    fn reduce(&self, samples: &[f32]) -> f32 {
        self(samples)
    }
}

// -------------------------------------------------------------------------------------------------

/// Calculates the root mean square of the given samples, measuring the magnitude over the
/// entire set of samples. This is the default reducer.
///
/// Returns `NaN` for an empty sample slice.
pub fn rms(samples: &[f32]) -> f32 {
    // sum up in f64 to keep precision for long blocks
    let sum_square = samples
        .iter()
        .fold(0.0f64, |accum, sample| accum + (*sample as f64).powi(2));
    (sum_square / samples.len() as f64).sqrt() as f32
}

/// Calculates the absolute peak value of the given samples.
///
/// Returns `NaN` for an empty sample slice.
pub fn peak(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return f32::NAN;
    }
    samples
        .iter()
        .fold(0.0f32, |accum, sample| accum.max(sample.abs()))
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn rms_values() {
        let tests: [(&[f32], f32); 9] = [
            // negative
            (&[-0.10], 0.10),
            (&[-0.10, -0.20], 0.158_113_88),
            (&[-0.10, -0.20, -0.30, -0.40, -0.50], 0.331_662_48),
            // positive
            (&[0.10], 0.10),
            (&[0.10, 0.20], 0.158_113_88),
            (&[0.10, 0.20, 0.30, 0.40, 0.50], 0.331_662_48),
            // mixed
            (&[0.10, -0.20], 0.158_113_88),
            (&[0.10, -0.20, 0.30, -0.40, 0.50], 0.331_662_48),
            (&[-0.5, 0.5, -0.5, 0.5], 0.5),
        ];
        for (index, (samples, expected)) in tests.into_iter().enumerate() {
            let result = rms(samples);
            assert!(
                (result - expected).abs() < EPSILON,
                "[{index:02}] unexpected result: {result} != {expected}"
            );
        }
    }

    #[test]
    fn rms_is_sign_invariant() {
        let negative = rms(&[-0.10, -0.20, -0.30, -0.40, -0.50]);
        let positive = rms(&[0.10, 0.20, 0.30, 0.40, 0.50]);
        assert_eq!(negative, positive);
        for value in [-1.0, -0.25, 0.0, 0.25, 1.0] {
            assert!((rms(&[value; 16]) - f32::abs(value)).abs() < EPSILON);
        }
    }

    #[test]
    fn empty_blocks() {
        assert!(rms(&[]).is_nan());
        assert!(peak(&[]).is_nan());
    }

    #[test]
    fn peak_values() {
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
        assert_eq!(peak(&[0.0, 0.0]), 0.0);
        assert_eq!(peak(&[0.25; 8]), 0.25);
    }

    #[test]
    fn closures_as_reducers() {
        let mean_abs = |samples: &[f32]| {
            samples.iter().map(|s| s.abs()).sum::<f32>() / samples.len() as f32
        };
        let reducers: [&dyn SampleReducer; 3] = [&rms, &peak, &mean_abs];
        for reducer in reducers {
            assert!((reducer.reduce(&[-0.5, 0.5]) - 0.5).abs() < EPSILON);
        }
    }
}
