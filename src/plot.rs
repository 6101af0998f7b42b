use std::fs::File;
use std::io::Write;
use std::path::Path;

use num_complex::Complex64;

use crate::{SimParams, SimResult};

const BEFORE_COLOR: &str = "#d62728";
const AFTER_COLOR: &str = "#2ca02c";

const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 45.0;

// VSWR axis tops out here so a near-open load doesn't flatten the plot
const VSWR_AXIS_LIMIT: f64 = 20.0;

const SMITH_SIZE: f64 = 600.0;
const SMITH_RADIUS: f64 = 270.0;

struct Series<'a> {
    label: &'a str,
    color: &'a str,
    dashed: bool,
    values: &'a [f64],
}

pub fn generate_html_report(
    params: &SimParams,
    result: &SimResult,
    output_path_str: &str,
) -> Result<(), std::io::Error> {
    let path = Path::new(output_path_str);
    let mut file = File::create(path)?;

    writeln!(file, "<!DOCTYPE html>")?;
    writeln!(file, "<html>")?;
    writeln!(file, "<head>")?;
    writeln!(file, "<meta charset=\"utf-8\">")?;
    writeln!(file, "<title>Quarter-Wave Matching</title>")?;
    writeln!(file, "<style>")?;
    writeln!(file, "table {{ border-collapse: collapse; }}")?;
    writeln!(file, ".parameters {{ width: auto; }}")?;
    writeln!(file, ".parameters td:nth-child(2) {{ text-align: right; }}")?;
    writeln!(
        file,
        "th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}"
    )?;
    writeln!(file, "th {{ background-color: #f2f2f2; }}")?;
    writeln!(file, "tr:nth-child(even) {{ background-color: #f9f9f9; }}")?;
    writeln!(file, "svg text {{ font-family: sans-serif; font-size: 12px; }}")?;
    writeln!(file, "</style>")?;
    writeln!(file, "</head>")?;
    writeln!(file, "<body>")?;
    writeln!(file, "<h1>Transmission Line Reflection with λ/4 Matching</h1>")?;

    writeln!(file, "<h2>Input Parameters</h2>")?;
    writeln!(file, "<table class=\"parameters\">")?;
    write_header_row(&mut file, &["Parameter", "Value", "Unit"])?;
    let (freq_val, freq_unit) = scale_frequency(params.line.center_frequency);
    write_row(&mut file, "Center Frequency", &format!("{:.3}", freq_val), freq_unit)?;
    write_row(
        &mut file,
        "Characteristic Impedance Z0",
        &format!("{:.2}", params.line.characteristic_impedance),
        "Ω",
    )?;
    write_row(
        &mut file,
        "Line Impedance",
        &format!("{:.2}", params.line.line_impedance),
        "Ω",
    )?;
    write_row(
        &mut file,
        "Relative Permittivity εr",
        &format!("{:.2}", params.line.relative_permittivity),
        "",
    )?;
    write_row(&mut file, "Load Impedance ZL", &params.load.to_string(), "")?;
    write_row(
        &mut file,
        "Line Length",
        &format!(
            "{:.4e} ({:.2} λ)",
            result.line_length,
            result.line_length_wavelengths()
        ),
        "m",
    )?;
    writeln!(file, "</table>")?;

    writeln!(file, "<h2>Results</h2>")?;
    writeln!(file, "<table class=\"parameters\">")?;
    write_header_row(&mut file, &["Quantity", "Value", "Unit"])?;
    write_row(
        &mut file,
        "Phase Velocity",
        &format!("{:.3e}", result.phase_velocity),
        "m/s",
    )?;
    write_row(
        &mut file,
        "Wavelength λ",
        &format!("{:.4e}", result.wavelength),
        "m",
    )?;
    write_row(
        &mut file,
        "λ/4 Transformer Z",
        &format!("{:.2}", result.transformer.impedance),
        "Ω",
    )?;
    write_row(
        &mut file,
        "λ/4 Length",
        &format!("{:.4e}", result.transformer.length),
        "m",
    )?;
    writeln!(file, "</table>")?;

    writeln!(file, "<h2>Performance at Center Frequency</h2>")?;
    writeln!(file, "<table>")?;
    write_header_row(
        &mut file,
        &[
            "",
            "|Γ|",
            "VSWR",
            "Return Loss (dB)",
            "Mismatch Loss (dB)",
            "Zin",
            "Matched Band",
        ],
    )?;
    let threshold = params.return_loss_threshold_db;
    for (label, point, band) in [
        (
            "Before Matching",
            &result.center_before,
            result.matched_band_before,
        ),
        (
            "After λ/4 Matching",
            &result.center_after,
            result.matched_band_after,
        ),
    ] {
        writeln!(file, "<tr>")?;
        writeln!(file, "<td>{}</td>", label)?;
        writeln!(file, "<td>{:.4}</td>", point.magnitude)?;
        writeln!(file, "<td>{:.4}</td>", point.vswr)?;
        writeln!(file, "<td>{:.2}</td>", point.return_loss_db)?;
        writeln!(file, "<td>{:.4}</td>", point.mismatch_loss_db)?;
        writeln!(file, "<td>{}</td>", format_impedance(point.input_impedance))?;
        match band {
            Some(band) => {
                let (width, unit) = scale_frequency(band.width());
                writeln!(
                    file,
                    "<td>{:.3} {} at RL ≥ {:.1} dB</td>",
                    width, unit, threshold
                )?;
            }
            None => writeln!(file, "<td>-</td>")?,
        }
        writeln!(file, "</tr>")?;
    }
    writeln!(file, "</table>")?;

    let frequencies_ghz: Vec<f64> = result.frequencies().iter().map(|f| f / 1e9).collect();

    writeln!(file, "<h2>1. Reflection Coefficient Magnitude vs Frequency</h2>")?;
    let before_mag = result.before.magnitudes();
    let after_mag = result.after.magnitudes();
    let gamma_max = before_mag
        .iter()
        .chain(after_mag.iter())
        .cloned()
        .fold(0.0, f64::max);
    write_line_chart(
        &mut file,
        "|Γ|",
        &frequencies_ghz,
        &[
            Series {
                label: "Before Matching",
                color: BEFORE_COLOR,
                dashed: false,
                values: &before_mag,
            },
            Series {
                label: "After λ/4 Matching",
                color: AFTER_COLOR,
                dashed: true,
                values: &after_mag,
            },
        ],
        (0.0, axis_ceiling(gamma_max.min(1.0))),
    )?;

    writeln!(file, "<h2>2. VSWR vs Frequency</h2>")?;
    let vswr_max = result
        .before
        .vswr
        .iter()
        .chain(result.after.vswr.iter())
        .cloned()
        .fold(1.0, f64::max)
        .min(VSWR_AXIS_LIMIT);
    write_line_chart(
        &mut file,
        "VSWR",
        &frequencies_ghz,
        &[
            Series {
                label: "Before Matching",
                color: BEFORE_COLOR,
                dashed: false,
                values: &result.before.vswr,
            },
            Series {
                label: "After λ/4 Matching",
                color: AFTER_COLOR,
                dashed: true,
                values: &result.after.vswr,
            },
        ],
        (1.0, axis_ceiling(vswr_max)),
    )?;

    writeln!(file, "<h2>3. Smith Chart: Before vs After λ/4 Matching</h2>")?;
    write_smith_chart(
        &mut file,
        &[
            ("Before Matching", BEFORE_COLOR, &result.before.gamma),
            ("After λ/4 Matching", AFTER_COLOR, &result.after.gamma),
        ],
    )?;

    writeln!(file, "</body>")?;
    writeln!(file, "</html>")?;

    tracing::info!(path = output_path_str, "wrote html report");
    Ok(())
}

fn format_impedance(impedance: Option<Complex64>) -> String {
    match impedance {
        Some(z) => format!("{:+.1} {:+.1}j Ω", z.re, z.im),
        None => "open".to_string(),
    }
}

fn write_header_row(file: &mut File, headers: &[&str]) -> Result<(), std::io::Error> {
    writeln!(file, "<tr>")?;
    for header in headers {
        writeln!(file, "<th>{}</th>", header)?;
    }
    writeln!(file, "</tr>")?;
    Ok(())
}

fn write_row(file: &mut File, name: &str, value: &str, unit: &str) -> Result<(), std::io::Error> {
    writeln!(file, "<tr>")?;
    writeln!(file, "<td>{}</td>", name)?;
    writeln!(file, "<td>{}</td>", value)?;
    writeln!(file, "<td>{}</td>", unit)?;
    writeln!(file, "</tr>")?;
    Ok(())
}

pub(crate) fn scale_frequency(frequency: f64) -> (f64, &'static str) {
    if frequency >= 1e12 {
        (frequency / 1e12, "THz")
    } else if frequency >= 1e9 {
        (frequency / 1e9, "GHz")
    } else if frequency >= 1e6 {
        (frequency / 1e6, "MHz")
    } else if frequency >= 1e3 {
        (frequency / 1e3, "kHz")
    } else {
        (frequency, "Hz")
    }
}

// round the top of an axis up to a tidy value, never below 0.1
fn axis_ceiling(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.1 {
        return 0.1;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    let steps = (max / magnitude * 2.0).ceil() / 2.0;
    steps * magnitude
}

fn write_line_chart(
    file: &mut File,
    y_label: &str,
    x_values: &[f64],
    series: &[Series],
    (y_min, y_max): (f64, f64),
) -> Result<(), std::io::Error> {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let x_min = x_values.first().copied().unwrap_or(0.0);
    let x_max = x_values.last().copied().unwrap_or(1.0);
    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };
    let y_span = if y_max > y_min { y_max - y_min } else { 1.0 };

    let to_x = |x: f64| MARGIN_LEFT + (x - x_min) / x_span * plot_width;
    let to_y = |y: f64| {
        let clamped = y.max(y_min).min(y_max);
        MARGIN_TOP + plot_height - (clamped - y_min) / y_span * plot_height
    };

    writeln!(
        file,
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">",
        w = CHART_WIDTH,
        h = CHART_HEIGHT
    )?;
    writeln!(
        file,
        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"white\" stroke=\"#888\"/>",
        MARGIN_LEFT, MARGIN_TOP, plot_width, plot_height
    )?;

    // five divisions on each axis
    for i in 0..=5 {
        let fraction = i as f64 / 5.0;
        let x = x_min + fraction * x_span;
        let y = y_min + fraction * y_span;
        let px = to_x(x);
        let py = to_y(y);
        writeln!(
            file,
            "<line x1=\"{px:.1}\" y1=\"{:.1}\" x2=\"{px:.1}\" y2=\"{:.1}\" stroke=\"#ddd\"/>",
            MARGIN_TOP,
            MARGIN_TOP + plot_height
        )?;
        writeln!(
            file,
            "<line x1=\"{:.1}\" y1=\"{py:.1}\" x2=\"{:.1}\" y2=\"{py:.1}\" stroke=\"#ddd\"/>",
            MARGIN_LEFT,
            MARGIN_LEFT + plot_width
        )?;
        writeln!(
            file,
            "<text x=\"{px:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{:.2}</text>",
            MARGIN_TOP + plot_height + 16.0,
            x
        )?;
        writeln!(
            file,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{:.3}</text>",
            MARGIN_LEFT - 6.0,
            py + 4.0,
            y
        )?;
    }
    writeln!(
        file,
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Frequency (GHz)</text>",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT - 8.0
    )?;
    writeln!(
        file,
        "<text x=\"14\" y=\"{:.1}\" text-anchor=\"middle\" transform=\"rotate(-90 14 {:.1})\">{}</text>",
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0,
        y_label
    )?;

    for (index, s) in series.iter().enumerate() {
        let points: Vec<String> = x_values
            .iter()
            .zip(s.values.iter())
            .map(|(&x, &y)| format!("{:.2},{:.2}", to_x(x), to_y(y)))
            .collect();
        let dash = if s.dashed {
            " stroke-dasharray=\"8 4\""
        } else {
            ""
        };
        writeln!(
            file,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\"{} points=\"{}\"/>",
            s.color,
            dash,
            points.join(" ")
        )?;

        let legend_y = MARGIN_TOP + 16.0 + 18.0 * index as f64;
        let legend_x = MARGIN_LEFT + plot_width - 170.0;
        writeln!(
            file,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"{}/>",
            legend_x,
            legend_y - 4.0,
            legend_x + 24.0,
            legend_y - 4.0,
            s.color,
            dash
        )?;
        writeln!(
            file,
            "<text x=\"{:.1}\" y=\"{:.1}\">{}</text>",
            legend_x + 30.0,
            legend_y,
            s.label
        )?;
    }

    writeln!(file, "</svg>")?;
    Ok(())
}

fn smith_point(gamma: Complex64) -> (f64, f64) {
    let center = SMITH_SIZE / 2.0;
    (
        center + SMITH_RADIUS * gamma.re,
        center - SMITH_RADIUS * gamma.im,
    )
}

const SMITH_GRID_VALUES: [f64; 5] = [0.2, 0.5, 1.0, 2.0, 5.0];

// r labels sit where each circle crosses the real axis, x labels on the rim
fn smith_grid_labels() -> Vec<(String, Complex64)> {
    let one = Complex64::new(1.0, 0.0);
    let to_gamma = |z: Complex64| (z - one) / (z + one);
    let mut labels = Vec::new();
    for r in SMITH_GRID_VALUES {
        labels.push((format!("{}", r), to_gamma(Complex64::new(r, 0.0))));
    }
    for x in SMITH_GRID_VALUES {
        for sign in [1.0, -1.0] {
            let reactance = sign * x;
            labels.push((
                format!("{:+}j", reactance),
                to_gamma(Complex64::new(0.0, reactance)),
            ));
        }
    }
    labels
}

fn write_smith_chart(
    file: &mut File,
    traces: &[(&str, &str, &Vec<Complex64>)],
) -> Result<(), std::io::Error> {
    let center = SMITH_SIZE / 2.0;

    writeln!(
        file,
        "<svg width=\"{s}\" height=\"{s}\" viewBox=\"0 0 {s} {s}\" xmlns=\"http://www.w3.org/2000/svg\">",
        s = SMITH_SIZE
    )?;
    writeln!(file, "<defs><clipPath id=\"unit-circle\">")?;
    writeln!(
        file,
        "<circle cx=\"{c:.1}\" cy=\"{c:.1}\" r=\"{r:.1}\"/>",
        c = center,
        r = SMITH_RADIUS
    )?;
    writeln!(file, "</clipPath></defs>")?;
    writeln!(
        file,
        "<circle cx=\"{c:.1}\" cy=\"{c:.1}\" r=\"{r:.1}\" fill=\"white\" stroke=\"#444\"/>",
        c = center,
        r = SMITH_RADIUS
    )?;

    writeln!(file, "<g clip-path=\"url(#unit-circle)\" fill=\"none\" stroke=\"#ccc\">")?;
    for r in SMITH_GRID_VALUES {
        // constant resistance: center (r/(1+r), 0), radius 1/(1+r)
        let (cx, cy) = smith_point(Complex64::new(r / (1.0 + r), 0.0));
        writeln!(
            file,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>",
            cx,
            cy,
            SMITH_RADIUS / (1.0 + r)
        )?;
    }
    for x in SMITH_GRID_VALUES {
        // constant reactance: center (1, ±1/x), radius 1/x
        for sign in [1.0, -1.0] {
            let (cx, cy) = smith_point(Complex64::new(1.0, sign / x));
            writeln!(
                file,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>",
                cx,
                cy,
                SMITH_RADIUS / x
            )?;
        }
    }
    writeln!(
        file,
        "<line x1=\"{:.1}\" y1=\"{c:.1}\" x2=\"{:.1}\" y2=\"{c:.1}\"/>",
        center - SMITH_RADIUS,
        center + SMITH_RADIUS,
        c = center
    )?;
    writeln!(file, "</g>")?;

    writeln!(file, "<g font-size=\"10\" fill=\"#666\" text-anchor=\"middle\">")?;
    for (text, gamma) in smith_grid_labels() {
        let (x, y) = smith_point(gamma);
        writeln!(
            file,
            "<text x=\"{:.2}\" y=\"{:.2}\">{}</text>",
            x,
            y - 3.0,
            text
        )?;
    }
    writeln!(file, "</g>")?;

    for (index, (label, color, gamma)) in traces.iter().enumerate() {
        let points: Vec<String> = gamma
            .iter()
            .map(|&g| {
                let (x, y) = smith_point(g);
                format!("{:.2},{:.2}", x, y)
            })
            .collect();
        writeln!(
            file,
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>",
            color,
            points.join(" ")
        )?;
        if let Some(&first) = gamma.first() {
            let (x, y) = smith_point(first);
            writeln!(
                file,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"3\" fill=\"{}\"/>",
                x, y, color
            )?;
        }
        writeln!(
            file,
            "<text x=\"10\" y=\"{:.1}\" fill=\"{}\">{}</text>",
            20.0 + 18.0 * index as f64,
            color,
            label
        )?;
    }

    writeln!(file, "</svg>")?;
    Ok(())
}
