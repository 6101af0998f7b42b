use num_complex::Complex64;

use crate::error::{LineError, Result};

/// A 2×2 complex ABCD matrix of a two-port.
///
/// ```text
/// [V_in]   [a  b] [V_out]
/// [I_in] = [c  d] [I_out]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransferMatrix {
    pub a: Complex64,
    pub b: Complex64,
    pub c: Complex64,
    pub d: Complex64,
}

impl TransferMatrix {
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { a, b, c, d }
    }

    /// Lossless line of characteristic impedance `z_line` and electrical length `theta` (rad).
    ///
    /// ```text
    /// [cos θ        j·Zc·sin θ]
    /// [j·sin θ/Zc   cos θ     ]
    /// ```
    pub fn lossless_line(z_line: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            a: Complex64::new(cos, 0.0),
            b: Complex64::new(0.0, z_line * sin),
            c: Complex64::new(0.0, sin / z_line),
            d: Complex64::new(cos, 0.0),
        }
    }

    /// Input impedance with `z_load` on the output port.
    ///
    /// Zin = (a·ZL + b) / (c·ZL + d), `None` when the input looks like an open circuit.
    pub fn input_impedance(&self, z_load: Complex64) -> Option<Complex64> {
        let denominator = self.c * z_load + self.d;
        if denominator.norm() == 0.0 {
            None
        } else {
            Some((self.a * z_load + self.b) / denominator)
        }
    }

    /// Reflection coefficient at the input port, referred to the real `z_reference`.
    ///
    /// Γ = (a·ZL + b − Z₀·(c·ZL + d)) / (a·ZL + b + Z₀·(c·ZL + d))
    ///
    /// Written without forming Zin so an open-circuit input still gives Γ = 1.
    pub fn input_reflection(&self, z_load: Complex64, z_reference: f64) -> Result<Complex64> {
        let voltage = self.a * z_load + self.b;
        let current = (self.c * z_load + self.d) * z_reference;
        let denominator = voltage + current;
        if denominator.norm() == 0.0 {
            return Err(LineError::SingularTermination {
                resistance: z_load.re,
                reactance: z_load.im,
                reference: z_reference,
            });
        }
        Ok((voltage - current) / denominator)
    }
}
