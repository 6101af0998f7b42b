use std::fmt;

use crate::error::Result;
use crate::input::{LineParameters, LoadImpedance};
use crate::line::TransmissionLine;

/// Single-section quarter-wave transformer designed at the center frequency.
///
/// Zt = √(Z₀·|ZL|) and ℓ = λc / 4. The design is exact for a resistive load.
/// A load with reactance keeps a residual mismatch, since only |ZL| enters the
/// formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuarterWaveTransformer {
    /// Transformer characteristic impedance Zt (Ω).
    pub impedance: f64,
    /// Physical length (m), a quarter wavelength at the design frequency.
    pub length: f64,
    /// Frequency the section is a quarter wave long at (Hz).
    pub design_frequency: f64,
    phase_velocity: f64,
}

impl fmt::Display for QuarterWaveTransformer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "QuarterWaveTransformer {{ zt: {:.2} Ω, length: {:.4e} m, at: {} Hz }}",
            self.impedance, self.length, self.design_frequency
        )
    }
}

impl QuarterWaveTransformer {
    pub fn design(params: &LineParameters, load: &LoadImpedance) -> Result<Self> {
        params.validate()?;
        load.validate()?;

        let impedance = transformer_impedance(params.characteristic_impedance, load.magnitude());
        let length = params.wavelength() / 4.0;

        tracing::debug!(
            zt = impedance,
            length,
            load = %load,
            "designed quarter-wave transformer"
        );

        Ok(Self {
            impedance,
            length,
            design_frequency: params.center_frequency,
            phase_velocity: params.phase_velocity(),
        })
    }

    /// The transformer as a line section.
    pub fn line(&self) -> Result<TransmissionLine> {
        TransmissionLine::new(self.impedance, self.phase_velocity, self.length)
    }
}

/// Zt = √(Z₀·|ZL|).
pub fn transformer_impedance(z_reference: f64, load_magnitude: f64) -> f64 {
    (z_reference * load_magnitude).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn fifty_to_seventy_five_ohm() {
        let params = LineParameters::default();
        let load = LoadImpedance::resistive(75.0).unwrap();
        let transformer = QuarterWaveTransformer::design(&params, &load).unwrap();

        assert!((transformer.impedance - 61.237243569579455).abs() < 1e-9);
        assert!((transformer.length - 0.03125).abs() < 1e-15);
        assert_eq!(transformer.design_frequency, 2.4e9);
    }

    #[test]
    fn matches_resistive_load_at_design_frequency() {
        let params = LineParameters::new(50.0, 2.1, 5.8e9).unwrap();
        let load = LoadImpedance::resistive(200.0).unwrap();
        let transformer = QuarterWaveTransformer::design(&params, &load).unwrap();
        let gamma = transformer
            .line()
            .unwrap()
            .input_reflection(5.8e9, load.impedance(), 50.0)
            .unwrap();
        assert!(gamma.norm() < 1e-9, "|gamma| = {}", gamma.norm());
    }

    #[test]
    fn reactive_load_uses_magnitude() {
        let params = LineParameters::default();
        let load = LoadImpedance::new(30.0, 40.0).unwrap();
        let transformer = QuarterWaveTransformer::design(&params, &load).unwrap();
        assert!((transformer.impedance - 50.0).abs() < 1e-12);

        // Zin = Zt² / ZL is not 50 Ω for a complex load
        let zin = transformer
            .line()
            .unwrap()
            .input_impedance(2.4e9, load.impedance())
            .unwrap();
        let expected = Complex64::new(2500.0, 0.0) / load.impedance();
        assert!((zin - expected).norm() < 1e-9, "zin = {zin}");
    }

    #[test]
    fn length_scales_with_permittivity() {
        let load = LoadImpedance::resistive(100.0).unwrap();
        let air = QuarterWaveTransformer::design(&LineParameters::default(), &load).unwrap();
        let fr4 = QuarterWaveTransformer::design(
            &LineParameters::new(50.0, 4.0, 2.4e9).unwrap(),
            &load,
        )
        .unwrap();
        assert!((air.length / fr4.length - 2.0).abs() < 1e-12);
    }
}
