use std::path::Path;
use std::process;

use crate::compute;
use crate::load_config;
use crate::MatchedBand;
use crate::ResponsePoint;
use crate::SimParams;
use crate::SimResult;

pub struct Config {}

impl Config {
    pub fn run(args: &[String]) -> Result<Config, Box<dyn std::error::Error>> {
        if args.len() < 2 {
            return Err("not enough arguments".into());
        }

        if args.len() > 2 {
            return Err(
                "too many arguments, expecting only 2, such as `quarterwave filepath`".into(),
            );
        }

        // Check for special flags
        match args[1].as_str() {
            "--version" | "-v" => {
                print_version();
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }

        let cwd = std::env::current_dir()?;
        // cargo run arg[1], such as cargo run files/wifi_75_ohm.toml
        // quarterwave arg[1], such as quarterwave files/wifi_75_ohm.toml
        let file_path = args[1].clone();
        println!("Config Path: {}", file_path);
        let full_path_to_config = cwd.join(&file_path);
        println!("Full Path: {}", full_path_to_config.display());

        let params = load_config(&full_path_to_config.display().to_string())?;
        let result = compute(&params)?;
        print_summary(&params, &result);

        let output_html_path = html_path_for(&full_path_to_config);
        write_report(&params, &result, &output_html_path);

        Ok(Config {})
    }
}

// files/config.toml -> files/config.html, anything else gets .html appended
fn html_path_for(config_path: &Path) -> String {
    let html = if config_path.extension().is_some_and(|ext| ext == "toml") {
        config_path.with_extension("html")
    } else {
        let mut appended = config_path.as_os_str().to_owned();
        appended.push(".html");
        appended.into()
    };
    let mut html = html.display().to_string();
    // Remove the UNC prefix on Windows if present
    if cfg!(target_os = "windows") && html.starts_with(r"\\?\") {
        html = html[4..].to_string();
    }
    html
}

#[cfg(feature = "plot")]
fn write_report(params: &SimParams, result: &SimResult, output_html_path: &str) {
    println!("Generating HTML report at: {}", output_html_path);
    if let Err(e) = crate::generate_html_report(params, result, output_html_path) {
        eprintln!("Error generating HTML report: {}", e);
    }
}

#[cfg(not(feature = "plot"))]
fn write_report(_params: &SimParams, _result: &SimResult, _output_html_path: &str) {}

pub fn print_version() {
    println!("quarterwave {}", env!("CARGO_PKG_VERSION"));
}

pub fn print_error(error: &str) {
    const RED: &str = "\x1b[31m";
    const RESET: &str = "\x1b[0m";
    println!("{}Problem running quarterwave: {error}{}", RED, RESET);
}

pub fn print_help() {
    // ANSI color codes
    const BOLD: &str = "\x1b[1m";
    const CYAN: &str = "\x1b[36m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RESET: &str = "\x1b[0m";

    println!(
        "🔌 Transmission line reflection calculator with λ/4 matching{}",
        RESET
    );
    println!();
    println!("{}{}VERSION:{}", BOLD, YELLOW, RESET);
    println!("    {}{}{}", GREEN, env!("CARGO_PKG_VERSION"), RESET);
    println!();
    println!("{}{}USAGE:{}", BOLD, YELLOW, RESET);
    println!("    {} quarterwave <FILE_PATH>{}", GREEN, RESET);
    println!();
    println!("     FILE_PATH: path to a toml config file");
    println!();
    println!("     The toml file is parsed, the line is swept before and after");
    println!("     quarter-wave matching, and an html report with |Γ|, VSWR and");
    println!("     Smith chart plots is written next to the source file.");
    println!();
    println!("{}{}OPTIONS:{}", BOLD, YELLOW, RESET);
    println!(
        "    {}  -v, --version{}{}    Print version information",
        GREEN, RESET, RESET
    );
    println!(
        "    {}  -h, --help{}{}       Print help information",
        GREEN, RESET, RESET
    );
    println!();
    println!("{}{}EXAMPLES:{}", BOLD, YELLOW, RESET);
    println!("    {} # Single file (Relative path){}", CYAN, RESET);
    println!("    {} quarterwave files/wifi_75_ohm.toml{}", GREEN, RESET);
    println!();
}

pub fn print_summary(params: &SimParams, result: &SimResult) {
    let line = &params.line;
    println!();
    // the formatting `{:>10.4}` aligns values on the decimal
    println!("Center Frequency:\t{:>10.4} GHz", line.center_frequency / 1e9);
    println!("Z0:\t\t\t{:>10.2} Ω", line.characteristic_impedance);
    println!("Line Z0:\t\t{:>10.2} Ω", line.line_impedance);
    println!("εr:\t\t\t{:>10.2}", line.relative_permittivity);
    println!("Load ZL:\t\t{}", params.load);
    println!("Phase Velocity:\t\t{:>10.3e} m/s", result.phase_velocity);
    println!("Wavelength λ:\t\t{:>10.4e} m", result.wavelength);
    println!(
        "Line Length:\t\t{:>10.4e} m ({:.2} λ)",
        result.line_length,
        result.line_length_wavelengths()
    );
    println!();
    println!("λ/4 Transformer Z:\t{:>10.2} Ω", result.transformer.impedance);
    println!("λ/4 Length:\t\t{:>10.4e} m", result.transformer.length);
    println!();
    println!("Performance at Center Frequency:");
    println!("--------------------------------");
    print_point("Before Matching", &result.center_before, result.matched_band_before);
    print_point("After λ/4 Matching", &result.center_after, result.matched_band_after);
    println!();
}

fn print_point(label: &str, point: &ResponsePoint, band: Option<MatchedBand>) {
    println!("{}:", label);
    println!("  |Γ|\t\t{:>10.4}", point.magnitude);
    println!("  VSWR\t\t{:>10.4}", point.vswr);
    println!("  Return Loss\t{:>10.2} dB", point.return_loss_db);
    println!("  Mismatch Loss\t{:>10.4} dB", point.mismatch_loss_db);
    match point.input_impedance {
        Some(z) => println!("  Zin\t\t{:>+10.2} {:+.2}j Ω", z.re, z.im),
        None => println!("  Zin\t\t{:>10}", "open"),
    }
    match band {
        Some(band) => println!(
            "  Matched Band\t{:>10.4} GHz to {:.4} GHz",
            band.lower / 1e9,
            band.upper / 1e9
        ),
        None => println!("  Matched Band\t{:>10}", "-"),
    }
}
