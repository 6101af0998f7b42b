use crate::constants::SPEED_OF_LIGHT;

/// Phase velocity (m/s) in a non-dispersive dielectric: vp = c / √εr.
pub fn phase_velocity(relative_permittivity: f64) -> f64 {
    SPEED_OF_LIGHT / relative_permittivity.sqrt()
}

/// Guided wavelength (m) at `frequency` (Hz) for phase velocity `vp`.
pub fn wavelength(vp: f64, frequency: f64) -> f64 {
    vp / frequency
}

/// Phase constant β = 2πf / vp (rad/m) of a lossless line.
pub fn phase_constant(frequency: f64, vp: f64) -> f64 {
    2.0 * std::f64::consts::PI * frequency / vp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_space_velocity_is_speed_of_light() {
        assert_eq!(phase_velocity(1.0), 3.0e8);
    }

    #[test]
    fn ptfe_velocity() {
        let vp = phase_velocity(2.1);
        assert!((vp - 3.0e8 / 2.1_f64.sqrt()).abs() < 1e-6, "vp = {vp}");
    }

    #[test]
    fn wavelength_at_2_4_ghz() {
        let lambda = wavelength(phase_velocity(1.0), 2.4e9);
        assert!((lambda - 0.125).abs() < 1e-15, "lambda = {lambda}");
    }

    #[test]
    fn fr4_shortens_wavelength() {
        let air = wavelength(phase_velocity(1.0), 1.0e9);
        let fr4 = wavelength(phase_velocity(4.5), 1.0e9);
        assert!((air / fr4 - 4.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn one_wavelength_is_two_pi_radians() {
        let vp = phase_velocity(1.0);
        let beta = phase_constant(2.4e9, vp);
        let lambda = wavelength(vp, 2.4e9);
        assert!((beta * lambda - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
