use num_complex::Complex64;

use crate::error::{LineError, Result};

/// Load reflection coefficient Γ_L = (ZL − Z₀) / (ZL + Z₀), frequency independent.
pub fn load_reflection_coefficient(z_load: Complex64, z_reference: f64) -> Result<Complex64> {
    let z0 = Complex64::new(z_reference, 0.0);
    let denominator = z_load + z0;
    if denominator.norm() == 0.0 {
        return Err(LineError::SingularTermination {
            resistance: z_load.re,
            reactance: z_load.im,
            reference: z_reference,
        });
    }
    Ok((z_load - z0) / denominator)
}

/// Impedance seen through a reflection coefficient, Z = Z₀·(1 + Γ) / (1 − Γ).
///
/// `None` for Γ = 1 (open circuit).
pub fn impedance_from_reflection(gamma: Complex64, z_reference: f64) -> Option<Complex64> {
    let one = Complex64::new(1.0, 0.0);
    let denominator = one - gamma;
    if denominator.norm() == 0.0 {
        None
    } else {
        Some((one + gamma) / denominator * z_reference)
    }
}

/// VSWR = (1 + |Γ|) / (1 − |Γ|), +∞ once |Γ| reaches 1.
pub fn vswr(gamma_magnitude: f64) -> f64 {
    if gamma_magnitude >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 + gamma_magnitude) / (1.0 - gamma_magnitude)
    }
}

/// Return loss in dB, positive for a passive load, +∞ for a perfect match.
pub fn return_loss_db(gamma_magnitude: f64) -> f64 {
    -20.0 * gamma_magnitude.log10()
}

/// Mismatch loss in dB, −10·log₁₀(1 − |Γ|²), +∞ for total reflection.
pub fn mismatch_loss_db(gamma_magnitude: f64) -> f64 {
    let delivered = 1.0 - gamma_magnitude * gamma_magnitude;
    if delivered <= 0.0 {
        f64::INFINITY
    } else {
        -10.0 * delivered.log10()
    }
}

/// Largest |Γ| that still meets `return_loss_db`.
pub fn gamma_limit_for_return_loss(return_loss_db: f64) -> f64 {
    // |Γ|² is a power ratio
    rfconversions::power::db_to_linear(-return_loss_db).sqrt()
}
