use std::fs;

use serde::Deserialize;

use crate::constants::{DEFAULT_HALF_SPAN, DEFAULT_RETURN_LOSS_THRESHOLD_DB, DEFAULT_SWEEP_POINTS};
use crate::error::{ensure, ensure_range};
use crate::{LineLength, LineParameters, LoadImpedance, SimParams, SweepConfig};

#[derive(Deserialize, Debug)]
struct Config {
    center_frequency: f64,         // Hz
    characteristic_impedance: f64, // Ω
    relative_permittivity: Option<f64>,
    line_impedance: Option<f64>, // Ω, defaults to characteristic_impedance
    load: LoadConfig,
    line_length: LineLengthConfig,
    sweep: Option<SweepSection>,
}

#[derive(Deserialize, Debug)]
struct LoadConfig {
    resistance: f64,
    reactance: Option<f64>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LineLengthConfig {
    Meters { value: f64 },
    Wavelengths { value: f64 },
}

#[derive(Deserialize, Debug)]
struct SweepSection {
    half_span: Option<f64>,
    points: Option<usize>,
    return_loss_threshold_db: Option<f64>,
}

pub fn load_config(path: &str) -> Result<SimParams, Box<dyn std::error::Error>> {
    tracing::info!(path, "loading config");
    let config_content = fs::read_to_string(path)?;
    let params = parse_config(&config_content)?;
    tracing::debug!(?params, "parsed config");
    Ok(params)
}

pub(crate) fn parse_config(content: &str) -> Result<SimParams, Box<dyn std::error::Error>> {
    let config: Config = toml::from_str(content)?;

    let line = LineParameters {
        characteristic_impedance: config.characteristic_impedance,
        relative_permittivity: config.relative_permittivity.unwrap_or(1.0),
        center_frequency: config.center_frequency,
        line_impedance: config
            .line_impedance
            .unwrap_or(config.characteristic_impedance),
    };
    let load = LoadImpedance {
        resistance: config.load.resistance,
        reactance: config.load.reactance.unwrap_or(0.0),
    };
    let length = match config.line_length {
        LineLengthConfig::Meters { value } => LineLength::Meters(value),
        LineLengthConfig::Wavelengths { value } => LineLength::Wavelengths(value),
    };

    let (sweep, return_loss_threshold_db) = match config.sweep {
        Some(section) => (
            SweepConfig {
                half_span: section.half_span.unwrap_or(DEFAULT_HALF_SPAN),
                points: section.points.unwrap_or(DEFAULT_SWEEP_POINTS),
            },
            section
                .return_loss_threshold_db
                .unwrap_or(DEFAULT_RETURN_LOSS_THRESHOLD_DB),
        ),
        None => (SweepConfig::default(), DEFAULT_RETURN_LOSS_THRESHOLD_DB),
    };

    let params = SimParams {
        line,
        load,
        length,
        sweep,
        return_loss_threshold_db,
    };
    check_input_ranges(&params)?;
    Ok(params)
}

/// Ranges accepted from a config file, tighter than the physical limits
/// enforced by the model itself.
pub fn check_input_ranges(params: &SimParams) -> crate::Result<()> {
    let line = &params.line;
    ensure("center_frequency", line.center_frequency, "> 0 Hz", |v| {
        v > 0.0
    })?;
    ensure_range("center_frequency", line.center_frequency, 0.0, 100.0e9)?;
    ensure_range(
        "characteristic_impedance",
        line.characteristic_impedance,
        1.0,
        500.0,
    )?;
    ensure_range("line_impedance", line.line_impedance, 1.0, 500.0)?;
    ensure_range("relative_permittivity", line.relative_permittivity, 1.0, 20.0)?;
    ensure_range("load resistance", params.load.resistance, 0.1, 1000.0)?;
    ensure_range("load reactance", params.load.reactance, -500.0, 500.0)?;
    match params.length {
        LineLength::Meters(m) => ensure_range("line length (m)", m, 1.0e-4, 10.0)?,
        LineLength::Wavelengths(w) => ensure_range("line length (λ)", w, 0.01, 10.0)?,
    };
    Ok(())
}
