use std::default::Default;
use std::fmt;

use num_complex::Complex64;

use crate::error::{ensure, Result};
use crate::wave;

// the line and reference system that the load hangs off of,
// see transformer.rs for the matching section that replaces the line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineParameters {
    pub characteristic_impedance: f64, // Ω, system reference impedance Z0
    pub relative_permittivity: f64,    // εr of the line dielectric
    pub center_frequency: f64,         // Hz, operating frequency fc
    pub line_impedance: f64,           // Ω, impedance of the line carrying the load, usually Z0
}

impl fmt::Display for LineParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "LineParameters {{ z0: {} Ω, er: {}, fc: {} Hz, line z0: {} Ω }}",
            self.characteristic_impedance,
            self.relative_permittivity,
            self.center_frequency,
            self.line_impedance
        )
    }
}

impl Default for LineParameters {
    fn default() -> Self {
        Self {
            characteristic_impedance: 50.0,
            relative_permittivity: 1.0, // air
            center_frequency: 2.4e9,
            line_impedance: 50.0,
        }
    }
}

impl LineParameters {
    /// Line with the same impedance as the reference system.
    pub fn new(
        characteristic_impedance: f64,
        relative_permittivity: f64,
        center_frequency: f64,
    ) -> Result<LineParameters> {
        let params = LineParameters {
            characteristic_impedance,
            relative_permittivity,
            center_frequency,
            line_impedance: characteristic_impedance,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace the impedance of the line that carries the load.
    pub fn with_line_impedance(self, line_impedance: f64) -> Result<LineParameters> {
        let params = LineParameters {
            line_impedance,
            ..self
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        ensure(
            "characteristic_impedance",
            self.characteristic_impedance,
            "> 0 Ω",
            |v| v > 0.0,
        )?;
        ensure(
            "relative_permittivity",
            self.relative_permittivity,
            ">= 1",
            |v| v >= 1.0,
        )?;
        ensure("center_frequency", self.center_frequency, "> 0 Hz", |v| {
            v > 0.0
        })?;
        ensure("line_impedance", self.line_impedance, "> 0 Ω", |v| v > 0.0)?;
        Ok(())
    }

    pub fn phase_velocity(&self) -> f64 {
        wave::phase_velocity(self.relative_permittivity)
    }

    /// Wavelength on the line at the center frequency.
    pub fn wavelength(&self) -> f64 {
        wave::wavelength(self.phase_velocity(), self.center_frequency)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadImpedance {
    pub resistance: f64, // Ω, RL
    pub reactance: f64,  // Ω, XL, +ve inductive, -ve capacitive
}

impl fmt::Display for LoadImpedance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+.1} {:+.1}j Ω", self.resistance, self.reactance)
    }
}

impl Default for LoadImpedance {
    fn default() -> Self {
        Self {
            resistance: 75.0,
            reactance: 0.0,
        }
    }
}

impl LoadImpedance {
    pub fn new(resistance: f64, reactance: f64) -> Result<LoadImpedance> {
        let load = LoadImpedance {
            resistance,
            reactance,
        };
        load.validate()?;
        Ok(load)
    }

    pub fn resistive(resistance: f64) -> Result<LoadImpedance> {
        LoadImpedance::new(resistance, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        ensure("load resistance", self.resistance, "> 0 Ω", |v| v > 0.0)?;
        ensure("load reactance", self.reactance, "finite", |_| true)?;
        Ok(())
    }

    pub fn impedance(&self) -> Complex64 {
        Complex64::new(self.resistance, self.reactance)
    }

    /// |ZL| in Ω.
    pub fn magnitude(&self) -> f64 {
        self.impedance().norm()
    }

    pub fn is_resistive(&self) -> bool {
        self.reactance == 0.0
    }
}

/// How the user specified the length of the line carrying the load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineLength {
    Meters(f64),
    Wavelengths(f64), // fraction of the wavelength at the center frequency
}

impl LineLength {
    pub fn validate(&self) -> Result<()> {
        match *self {
            LineLength::Meters(m) => ensure("line length", m, "> 0 m", |v| v > 0.0)?,
            LineLength::Wavelengths(w) => ensure("line length", w, "> 0 λ", |v| v > 0.0)?,
        };
        Ok(())
    }

    /// Physical length in meters given the wavelength at the center frequency.
    pub fn to_meters(&self, wavelength: f64) -> f64 {
        match *self {
            LineLength::Meters(m) => m,
            LineLength::Wavelengths(w) => w * wavelength,
        }
    }

    /// Electrical length as a fraction of the wavelength at the center frequency.
    pub fn to_wavelengths(&self, wavelength: f64) -> f64 {
        match *self {
            LineLength::Meters(m) => m / wavelength,
            LineLength::Wavelengths(w) => w,
        }
    }
}

impl Default for LineLength {
    fn default() -> Self {
        LineLength::Wavelengths(0.25)
    }
}
