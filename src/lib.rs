pub mod cli;
mod constants;
mod error;
mod file;
mod input;
mod line;
#[cfg(feature = "plot")]
mod plot;
mod reflection;
mod response;
mod sweep;
mod transfer_matrix;
mod transformer;
mod wave;

use num_complex::Complex64;

pub use constants::{
    DEFAULT_HALF_SPAN, DEFAULT_RETURN_LOSS_THRESHOLD_DB, DEFAULT_SWEEP_POINTS, SPEED_OF_LIGHT,
};
pub use error::{LineError, Result};
pub use file::{check_input_ranges, load_config};
pub use input::{LineLength, LineParameters, LoadImpedance};
pub use line::{rotate_reflection, TransmissionLine};
#[cfg(feature = "plot")]
pub use plot::generate_html_report;
pub use reflection::{
    gamma_limit_for_return_loss, impedance_from_reflection, load_reflection_coefficient,
    mismatch_loss_db, return_loss_db, vswr,
};
pub use response::{MatchedBand, NetworkResponse, ResponsePoint};
pub use sweep::{FrequencySweep, SweepConfig};
pub use transfer_matrix::TransferMatrix;
pub use transformer::{transformer_impedance, QuarterWaveTransformer};
pub use wave::{phase_constant, phase_velocity, wavelength};

/// Everything one run of the model needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    pub line: LineParameters,
    pub load: LoadImpedance,
    pub length: LineLength,
    pub sweep: SweepConfig,
    /// Return loss (dB) a frequency must meet to count toward the matched band.
    pub return_loss_threshold_db: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            line: LineParameters::default(),
            load: LoadImpedance::default(),
            length: LineLength::default(),
            sweep: SweepConfig::default(),
            return_loss_threshold_db: DEFAULT_RETURN_LOSS_THRESHOLD_DB,
        }
    }
}

/// Results of a run, consumed by the CLI summary and the HTML report.
#[derive(Clone, Debug, PartialEq)]
pub struct SimResult {
    pub sweep: FrequencySweep,
    pub phase_velocity: f64, // m/s
    pub wavelength: f64,     // m, at the center frequency
    pub line_length: f64,    // m, the line carrying the load
    pub load_reflection: Complex64,
    pub transformer: QuarterWaveTransformer,
    /// Load behind the unmatched line.
    pub before: NetworkResponse,
    /// Load behind the quarter-wave transformer.
    pub after: NetworkResponse,
    pub center_before: ResponsePoint,
    pub center_after: ResponsePoint,
    pub matched_band_before: Option<MatchedBand>,
    pub matched_band_after: Option<MatchedBand>,
}

impl SimResult {
    pub fn frequencies(&self) -> &[f64] {
        self.sweep.frequencies()
    }

    /// Length of the line carrying the load in wavelengths at the center frequency.
    pub fn line_length_wavelengths(&self) -> f64 {
        self.line_length / self.wavelength
    }
}

/// Run the model: sweep the line + load network, design the quarter-wave
/// transformer and sweep the transformer + load network.
pub fn compute(params: &SimParams) -> Result<SimResult> {
    params.line.validate()?;
    params.load.validate()?;
    params.length.validate()?;
    error::ensure(
        "return_loss_threshold_db",
        params.return_loss_threshold_db,
        ">= 0 dB",
        |v| v >= 0.0,
    )?;

    let line_params = &params.line;
    let z_reference = line_params.characteristic_impedance;
    let z_load = params.load.impedance();

    let vp = line_params.phase_velocity();
    let lambda = line_params.wavelength();
    tracing::debug!(vp, lambda, "derived phase velocity and wavelength");

    let sweep = FrequencySweep::around(line_params.center_frequency, &params.sweep)?;
    let load_reflection = load_reflection_coefficient(z_load, z_reference)?;

    let line_length = params.length.to_meters(lambda);
    let line = TransmissionLine::new(line_params.line_impedance, vp, line_length)?;
    let before = NetworkResponse::evaluate(&line, z_load, z_reference, &sweep)?;

    let transformer = QuarterWaveTransformer::design(line_params, &params.load)?;
    let after = NetworkResponse::evaluate(&transformer.line()?, z_load, z_reference, &sweep)?;

    let center = sweep.center_index();
    let (center_before, center_after) =
        match (before.point(&sweep, center), after.point(&sweep, center)) {
            (Some(b), Some(a)) => (b, a),
            _ => {
                return Err(LineError::InvalidSweep(format!(
                    "center index {center} outside sweep of {} points",
                    sweep.len()
                )))
            }
        };

    let gamma_limit = gamma_limit_for_return_loss(params.return_loss_threshold_db);
    let matched_band_before = before.matched_band(&sweep, gamma_limit);
    let matched_band_after = after.matched_band(&sweep, gamma_limit);

    tracing::debug!(
        before = center_before.magnitude,
        after = center_after.magnitude,
        "|Γ| at center frequency"
    );

    Ok(SimResult {
        sweep,
        phase_velocity: vp,
        wavelength: lambda,
        line_length,
        load_reflection,
        transformer,
        before,
        after,
        center_before,
        center_after,
        matched_band_before,
        matched_band_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(resistance: f64, reactance: f64, length: LineLength) -> SimParams {
        SimParams {
            line: LineParameters::default(),
            load: LoadImpedance::new(resistance, reactance).unwrap(),
            length,
            sweep: SweepConfig::default(),
            return_loss_threshold_db: DEFAULT_RETURN_LOSS_THRESHOLD_DB,
        }
    }

    #[test]
    fn seventy_five_ohm_quarter_wave() {
        let result = compute(&params(75.0, 0.0, LineLength::Wavelengths(0.25))).unwrap();

        assert_eq!(result.frequencies().len(), 501);
        assert!((result.center_before.magnitude - 0.2).abs() < 1e-12);
        assert!((result.center_before.vswr - 1.5).abs() < 1e-12);

        assert!((result.transformer.impedance - 61.237243569579455).abs() < 1e-9);
        assert!(result.center_after.magnitude < 1e-12);
        assert!((result.center_after.vswr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn before_matching_is_flat_for_resistive_load() {
        let result = compute(&params(75.0, 0.0, LineLength::Meters(0.4321))).unwrap();
        for magnitude in result.before.magnitudes() {
            assert!((magnitude - 0.2).abs() < 1e-12);
        }
        // the transformer only matches near fc
        let edge = result.after.gamma[0].norm();
        assert!(edge > result.center_after.magnitude);
    }

    #[test]
    fn after_matching_improves_resistive_loads() {
        for resistance in [10.0, 25.0, 49.0, 51.0, 100.0, 400.0] {
            let result = compute(&params(resistance, 0.0, LineLength::Wavelengths(0.37))).unwrap();
            assert!(
                result.center_after.magnitude < result.center_before.magnitude,
                "RL = {resistance}"
            );
        }
    }

    #[test]
    fn reactive_load_keeps_residual_mismatch() {
        let result = compute(&params(75.0, 50.0, LineLength::Wavelengths(0.25))).unwrap();
        assert!(result.center_after.magnitude > 0.05);
    }

    #[test]
    fn line_length_in_wavelengths_is_reported() {
        let result = compute(&params(75.0, 0.0, LineLength::Meters(0.0625))).unwrap();
        assert!((result.line_length_wavelengths() - 0.5).abs() < 1e-12);
        assert!((result.wavelength - 0.125).abs() < 1e-15);
    }

    #[test]
    fn matched_band_appears_only_after_matching() {
        // RL = 200 Ω gives |Γ| = 0.6 everywhere on the unmatched line
        let result = compute(&params(200.0, 0.0, LineLength::Wavelengths(0.25))).unwrap();
        assert!(result.matched_band_before.is_none());
        let band = result.matched_band_after.unwrap();
        assert!(band.width() > 0.0);
    }

    #[test]
    fn invalid_load_is_rejected_before_computation() {
        let mut p = params(75.0, 0.0, LineLength::Wavelengths(0.25));
        p.load.resistance = 0.0;
        assert!(matches!(
            compute(&p),
            Err(LineError::InvalidParameter {
                parameter: "load resistance",
                ..
            })
        ));
    }

    #[test]
    fn explicit_line_impedance_changes_before_response() {
        let mut p = params(50.0, 0.0, LineLength::Wavelengths(0.25));
        p.line = p.line.with_line_impedance(75.0).unwrap();
        let result = compute(&p).unwrap();
        // 50 Ω load behind a 75 Ω λ/4 line: Zin = 112.5 Ω
        let expected = (112.5 - 50.0) / (112.5 + 50.0);
        assert!((result.center_before.magnitude - expected).abs() < 1e-9);
        // the load already matches Z0, so the transformer is a plain 50 Ω line
        assert!(result.center_after.magnitude < 1e-12);
    }
}
