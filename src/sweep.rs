use crate::constants::{DEFAULT_HALF_SPAN, DEFAULT_SWEEP_POINTS};
use crate::error::{LineError, Result};

/// Span and point count of the sweep around the center frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepConfig {
    /// Half width of the band (Hz), the sweep covers fc ± half_span.
    pub half_span: f64,
    /// Number of samples, endpoints included.
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            half_span: DEFAULT_HALF_SPAN,
            points: DEFAULT_SWEEP_POINTS,
        }
    }
}

/// Linearly spaced frequencies (Hz) around a center frequency.
///
/// Samples are strictly increasing and the sample at
/// [`FrequencySweep::center_index`] is always the center frequency. An odd
/// point count is symmetric about fc, an even one drops the top sample.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencySweep {
    frequencies: Vec<f64>,
    center_frequency: f64,
}

impl FrequencySweep {
    /// Build fc ± half_span with `points` samples, anchored on fc.
    ///
    /// A half span reaching down to 0 Hz is narrowed so every sample stays
    /// positive.
    pub fn around(center_frequency: f64, config: &SweepConfig) -> Result<FrequencySweep> {
        if !(center_frequency.is_finite() && center_frequency > 0.0) {
            return Err(LineError::InvalidSweep(format!(
                "center frequency must be > 0 Hz, got {center_frequency}"
            )));
        }
        if config.points < 2 {
            return Err(LineError::InvalidSweep(format!(
                "at least 2 points required, got {}",
                config.points
            )));
        }
        if !(config.half_span.is_finite() && config.half_span > 0.0) {
            return Err(LineError::InvalidSweep(format!(
                "half span must be > 0 Hz, got {}",
                config.half_span
            )));
        }

        let half_span = if config.half_span >= center_frequency {
            let narrowed = center_frequency * (1.0 - 1.0 / config.points as f64);
            tracing::warn!(
                requested = config.half_span,
                narrowed,
                "sweep would reach 0 Hz, narrowing half span"
            );
            narrowed
        } else {
            config.half_span
        };

        let center = config.points / 2;
        let step = half_span / center as f64;
        let frequencies: Vec<f64> = (0..config.points)
            .map(|i| {
                if i < center {
                    center_frequency - step * (center - i) as f64
                } else {
                    center_frequency + step * (i - center) as f64
                }
            })
            .collect();

        tracing::debug!(
            start = frequencies[0],
            stop = frequencies[config.points - 1],
            points = config.points,
            "built frequency sweep"
        );

        Ok(FrequencySweep {
            frequencies,
            center_frequency,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn center_frequency(&self) -> f64 {
        self.center_frequency
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Index used for the center frequency snapshot (len / 2).
    pub fn center_index(&self) -> usize {
        self.frequencies.len() / 2
    }

    pub fn start(&self) -> f64 {
        self.frequencies[0]
    }

    pub fn stop(&self) -> f64 {
        self.frequencies[self.frequencies.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_matches_reference_configuration() {
        let sweep = FrequencySweep::around(2.4e9, &SweepConfig::default()).unwrap();
        assert_eq!(sweep.len(), 501);
        assert_eq!(sweep.start(), 1.4e9);
        assert_eq!(sweep.stop(), 3.4e9);
        assert_eq!(sweep.center_index(), 250);
        assert_eq!(sweep.frequencies()[250], 2.4e9);
    }

    #[test]
    fn samples_strictly_increase() {
        let sweep = FrequencySweep::around(2.4e9, &SweepConfig::default()).unwrap();
        for pair in sweep.frequencies().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn low_center_frequency_narrows_span() {
        let sweep = FrequencySweep::around(0.1e9, &SweepConfig::default()).unwrap();
        assert!(sweep.start() > 0.0, "start = {}", sweep.start());
        let midpoint = (sweep.start() + sweep.stop()) / 2.0;
        assert!((midpoint - 0.1e9).abs() < 1.0, "midpoint = {midpoint}");
    }

    #[test]
    fn even_point_count_keeps_center_sample() {
        let config = SweepConfig {
            half_span: 1.0e9,
            points: 500,
        };
        let sweep = FrequencySweep::around(2.4e9, &config).unwrap();
        assert_eq!(sweep.len(), 500);
        assert_eq!(sweep.center_index(), 250);
        assert_eq!(sweep.frequencies()[250], 2.4e9);
        assert_eq!(sweep.start(), 1.4e9);
        assert!(sweep.stop() < 3.4e9);
        for pair in sweep.frequencies().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn two_points_span_down_to_center() {
        let config = SweepConfig {
            half_span: 0.5e9,
            points: 2,
        };
        let sweep = FrequencySweep::around(2.4e9, &config).unwrap();
        assert_eq!(sweep.frequencies(), &[1.9e9, 2.4e9]);
    }

    #[test]
    fn single_point_is_rejected() {
        let config = SweepConfig {
            half_span: 1.0e9,
            points: 1,
        };
        assert!(FrequencySweep::around(2.4e9, &config).is_err());
    }

    #[test]
    fn zero_span_is_rejected() {
        let config = SweepConfig {
            half_span: 0.0,
            points: 11,
        };
        assert!(FrequencySweep::around(2.4e9, &config).is_err());
    }
}
