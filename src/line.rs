use num_complex::Complex64;

use crate::error::{ensure, Result};
use crate::transfer_matrix::TransferMatrix;
use crate::wave;

// a uniform lossless line section, either the line carrying the load
// or the quarter-wave transformer that replaces it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransmissionLine {
    pub characteristic_impedance: f64, // Ω
    pub phase_velocity: f64,           // m/s
    pub length: f64,                   // m
}

impl TransmissionLine {
    pub fn new(characteristic_impedance: f64, phase_velocity: f64, length: f64) -> Result<Self> {
        ensure(
            "line characteristic impedance",
            characteristic_impedance,
            "> 0 Ω",
            |v| v > 0.0,
        )?;
        ensure("phase velocity", phase_velocity, "> 0 m/s", |v| v > 0.0)?;
        ensure("line length", length, ">= 0 m", |v| v >= 0.0)?;
        Ok(Self {
            characteristic_impedance,
            phase_velocity,
            length,
        })
    }

    /// Propagation constant γ = jβ (1/m), lossless.
    pub fn propagation_constant(&self, frequency: f64) -> Complex64 {
        Complex64::new(0.0, wave::phase_constant(frequency, self.phase_velocity))
    }

    /// Electrical length θ = βℓ (rad).
    pub fn electrical_length(&self, frequency: f64) -> f64 {
        self.propagation_constant(frequency).im * self.length
    }

    /// Length as a fraction of the wavelength at `frequency`.
    pub fn length_in_wavelengths(&self, frequency: f64) -> f64 {
        self.length / wave::wavelength(self.phase_velocity, frequency)
    }

    pub fn transfer_matrix(&self, frequency: f64) -> TransferMatrix {
        TransferMatrix::lossless_line(
            self.characteristic_impedance,
            self.electrical_length(frequency),
        )
    }

    /// Input reflection coefficient with `z_load` at the far end, referred to `z_reference`.
    pub fn input_reflection(
        &self,
        frequency: f64,
        z_load: Complex64,
        z_reference: f64,
    ) -> Result<Complex64> {
        self.transfer_matrix(frequency)
            .input_reflection(z_load, z_reference)
    }

    /// Input impedance with `z_load` at the far end, `None` if it is an open circuit.
    pub fn input_impedance(&self, frequency: f64, z_load: Complex64) -> Option<Complex64> {
        self.transfer_matrix(frequency).input_impedance(z_load)
    }
}

/// Rotate a load reflection coefficient through a line matched to the reference,
/// Γ_in = Γ_L · e^(−2jθ).
pub fn rotate_reflection(gamma_load: Complex64, electrical_length: f64) -> Complex64 {
    gamma_load * Complex64::from_polar(1.0, -2.0 * electrical_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::load_reflection_coefficient;
    use std::f64::consts::PI;

    #[test]
    fn quarter_wave_electrical_length() {
        // 3.125 cm at 2.4 GHz in air
        let line = TransmissionLine::new(50.0, 3.0e8, 0.03125).unwrap();
        assert!((line.electrical_length(2.4e9) - PI / 2.0).abs() < 1e-12);
        assert!((line.length_in_wavelengths(2.4e9) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn propagation_constant_is_purely_imaginary() {
        let line = TransmissionLine::new(50.0, 2.0e8, 0.1).unwrap();
        let gamma = line.propagation_constant(1.0e9);
        assert_eq!(gamma.re, 0.0);
        assert!((gamma.im - 2.0 * PI * 5.0).abs() < 1e-12);
    }

    #[test]
    fn matched_line_rotates_load_reflection() {
        let zl = Complex64::new(75.0, 50.0);
        let gamma_load = load_reflection_coefficient(zl, 50.0).unwrap();
        let line = TransmissionLine::new(50.0, 3.0e8, 0.0421).unwrap();
        for frequency in [1.4e9, 2.4e9, 3.4e9] {
            let cascaded = line.input_reflection(frequency, zl, 50.0).unwrap();
            let rotated = rotate_reflection(gamma_load, line.electrical_length(frequency));
            assert!(
                (cascaded - rotated).norm() < 1e-12,
                "{cascaded} != {rotated} at {frequency} Hz"
            );
        }
    }

    #[test]
    fn half_wave_line_is_transparent() {
        let zl = Complex64::new(20.0, -35.0);
        let line = TransmissionLine::new(93.0, 3.0e8, 0.0625).unwrap();
        let zin = line.input_impedance(2.4e9, zl).unwrap();
        assert!((zin - zl).norm() < 1e-9, "zin = {zin}");
    }

    #[test]
    fn zero_length_line_passes_load_reflection() {
        let zl = Complex64::new(75.0, 0.0);
        let line = TransmissionLine::new(50.0, 3.0e8, 0.0).unwrap();
        let gamma = line.input_reflection(2.4e9, zl, 50.0).unwrap();
        assert!((gamma - Complex64::new(0.2, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn negative_length_is_rejected() {
        assert!(TransmissionLine::new(50.0, 3.0e8, -0.01).is_err());
    }
}
