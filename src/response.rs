use std::fmt;

use num_complex::Complex64;

use crate::error::Result;
use crate::line::TransmissionLine;
use crate::reflection;
use crate::sweep::FrequencySweep;

/// Reflection coefficient and VSWR of a line + load network across a sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkResponse {
    /// Γ(f) at the network input, one entry per sweep sample.
    pub gamma: Vec<Complex64>,
    /// VSWR(f), +∞ where |Γ| reaches 1.
    pub vswr: Vec<f64>,
    /// Real impedance Γ is referred to (Ω).
    pub z_reference: f64,
}

/// One frequency sample of a [`NetworkResponse`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponsePoint {
    pub frequency: f64,        // Hz
    pub gamma: Complex64,      // Γ
    pub magnitude: f64,        // |Γ|
    pub vswr: f64,             // linear
    pub return_loss_db: f64,   // dB
    pub mismatch_loss_db: f64, // dB
    /// Zin, `None` when the input is an open circuit.
    pub input_impedance: Option<Complex64>,
}

impl fmt::Display for ResponsePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ResponsePoint {{ frequency: {}, |Γ|: {:.4}, VSWR: {:.4}, RL: {:.2} dB, ML: {:.4} dB }}",
            self.frequency, self.magnitude, self.vswr, self.return_loss_db, self.mismatch_loss_db
        )
    }
}

/// Contiguous band around the center frequency meeting a return loss threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchedBand {
    pub lower: f64, // Hz
    pub upper: f64, // Hz
}

impl MatchedBand {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl NetworkResponse {
    /// Cascade `line` with `z_load` and evaluate Γ and VSWR at every sweep sample.
    pub fn evaluate(
        line: &TransmissionLine,
        z_load: Complex64,
        z_reference: f64,
        sweep: &FrequencySweep,
    ) -> Result<NetworkResponse> {
        let gamma = sweep
            .frequencies()
            .iter()
            .map(|&frequency| line.input_reflection(frequency, z_load, z_reference))
            .collect::<Result<Vec<Complex64>>>()?;

        Ok(NetworkResponse::from_reflection(gamma, z_reference))
    }

    pub fn from_reflection(gamma: Vec<Complex64>, z_reference: f64) -> NetworkResponse {
        let vswr = gamma.iter().map(|g| reflection::vswr(g.norm())).collect();
        NetworkResponse {
            gamma,
            vswr,
            z_reference,
        }
    }

    pub fn len(&self) -> usize {
        self.gamma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gamma.is_empty()
    }

    /// |Γ(f)|.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.gamma.iter().map(|g| g.norm()).collect()
    }

    pub fn return_loss_db(&self) -> Vec<f64> {
        self.gamma
            .iter()
            .map(|g| reflection::return_loss_db(g.norm()))
            .collect()
    }

    pub fn mismatch_loss_db(&self) -> Vec<f64> {
        self.gamma
            .iter()
            .map(|g| reflection::mismatch_loss_db(g.norm()))
            .collect()
    }

    /// Input impedance seen at each sample, `None` where the input is an open circuit.
    pub fn input_impedance(&self) -> Vec<Option<Complex64>> {
        self.gamma
            .iter()
            .map(|&g| reflection::impedance_from_reflection(g, self.z_reference))
            .collect()
    }

    pub fn point(&self, sweep: &FrequencySweep, index: usize) -> Option<ResponsePoint> {
        let gamma = *self.gamma.get(index)?;
        let frequency = *sweep.frequencies().get(index)?;
        let magnitude = gamma.norm();
        Some(ResponsePoint {
            frequency,
            gamma,
            magnitude,
            vswr: *self.vswr.get(index)?,
            return_loss_db: reflection::return_loss_db(magnitude),
            mismatch_loss_db: reflection::mismatch_loss_db(magnitude),
            input_impedance: reflection::impedance_from_reflection(gamma, self.z_reference),
        })
    }

    /// Largest |Γ| over the sweep.
    pub fn worst_magnitude(&self) -> f64 {
        self.gamma.iter().map(|g| g.norm()).fold(0.0, f64::max)
    }

    /// Band around the center sample where |Γ| stays at or below `gamma_limit`.
    ///
    /// Edges are the last samples that still meet the limit. `None` when the
    /// center sample itself misses it or `sweep` is not the sweep this
    /// response was evaluated on.
    pub fn matched_band(&self, sweep: &FrequencySweep, gamma_limit: f64) -> Option<MatchedBand> {
        if sweep.len() != self.len() {
            return None;
        }
        let center = sweep.center_index();
        let meets = |i: usize| self.gamma[i].norm() <= gamma_limit;
        if center >= self.len() || !meets(center) {
            return None;
        }

        let mut low = center;
        while low > 0 && meets(low - 1) {
            low -= 1;
        }
        let mut high = center;
        while high + 1 < self.len() && meets(high + 1) {
            high += 1;
        }

        let frequencies = sweep.frequencies();
        Some(MatchedBand {
            lower: frequencies[low],
            upper: frequencies[high],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::SweepConfig;

    fn sweep() -> FrequencySweep {
        FrequencySweep::around(2.4e9, &SweepConfig::default()).unwrap()
    }

    #[test]
    fn matched_load_is_flat_and_zero() {
        let line = TransmissionLine::new(50.0, 3.0e8, 0.37).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(50.0, 0.0), 50.0, &sweep()).unwrap();
        assert_eq!(response.len(), 501);
        for (g, v) in response.gamma.iter().zip(response.vswr.iter()) {
            assert!(g.norm() < 1e-12);
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn center_point() {
        let sweep = sweep();
        let line = TransmissionLine::new(50.0, 3.0e8, 0.03125).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(75.0, 0.0), 50.0, &sweep).unwrap();
        let point = response.point(&sweep, sweep.center_index()).unwrap();
        assert_eq!(point.frequency, 2.4e9);
        assert!((point.magnitude - 0.2).abs() < 1e-12);
        assert!((point.vswr - 1.5).abs() < 1e-12);
        // λ/4 turns Γ = +0.2 into −0.2
        assert!((point.gamma - Complex64::new(-0.2, 0.0)).norm() < 1e-12);
        // 50² / 75
        let zin = point.input_impedance.unwrap();
        assert!((zin - Complex64::new(2500.0 / 75.0, 0.0)).norm() < 1e-9, "zin = {zin}");
        // −10·log10(1 − 0.04)
        assert!((point.mismatch_loss_db - 0.177287669604).abs() < 1e-9);
        assert!(response.point(&sweep, 501).is_none());
    }

    #[test]
    fn matched_band_needs_the_evaluated_sweep() {
        let line = TransmissionLine::new(50.0, 3.0e8, 0.03125).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(50.0, 0.0), 50.0, &sweep()).unwrap();
        assert!(response.matched_band(&sweep(), 0.3).is_some());

        let short = FrequencySweep::around(
            2.4e9,
            &SweepConfig {
                half_span: 1.0e9,
                points: 21,
            },
        )
        .unwrap();
        assert!(response.matched_band(&short, 0.3).is_none());
    }

    #[test]
    fn total_reflection_reports_infinite_vswr() {
        let response = NetworkResponse::from_reflection(
            vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, -1.0)],
            50.0,
        );
        assert!(response.vswr.iter().all(|v| *v == f64::INFINITY));
        assert!(response.vswr.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn matched_band_is_symmetric_for_transformer() {
        let sweep = sweep();
        let zt = (50.0_f64 * 100.0).sqrt();
        let line = TransmissionLine::new(zt, 3.0e8, 0.03125).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(100.0, 0.0), 50.0, &sweep).unwrap();
        let band = response.matched_band(&sweep, 0.1).unwrap();
        assert!(band.lower < 2.4e9 && band.upper > 2.4e9);
        let below = 2.4e9 - band.lower;
        let above = band.upper - 2.4e9;
        assert!((below - above).abs() <= 4.0e6 + 1.0, "{below} vs {above}");
    }

    #[test]
    fn no_band_when_center_misses_limit() {
        let sweep = sweep();
        let line = TransmissionLine::new(50.0, 3.0e8, 0.03125).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(75.0, 0.0), 50.0, &sweep).unwrap();
        assert!(response.matched_band(&sweep, 0.1).is_none());
        assert!((response.worst_magnitude() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn derived_series_have_sweep_length() {
        let sweep = sweep();
        let line = TransmissionLine::new(50.0, 3.0e8, 0.05).unwrap();
        let response =
            NetworkResponse::evaluate(&line, Complex64::new(25.0, 10.0), 50.0, &sweep).unwrap();
        assert_eq!(response.magnitudes().len(), sweep.len());
        assert_eq!(response.return_loss_db().len(), sweep.len());
        assert_eq!(response.mismatch_loss_db().len(), sweep.len());
        assert_eq!(response.input_impedance().len(), sweep.len());
    }
}
