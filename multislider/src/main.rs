use std::path::PathBuf;
use std::process;

use clap::Parser;
use multislider_core::{SliderOptions, Spacing};
use multislider_gui::{run_gui, GuiConfig, SliderApp};

#[derive(Parser)]
#[command(name = "multislider", version, about = "Multi-handle range slider demo")]
struct Cli {
    #[arg(long, default_value_t = 0.0)]
    floor: f64,
    #[arg(long, default_value_t = 100.0)]
    ceiling: f64,
    /// Decimal places kept after normalization
    #[arg(long, default_value_t = 0)]
    precision: u32,
    /// Minimum gap between adjacent knobs
    #[arg(long, default_value_t = 0.0)]
    buffer: f64,
    /// Step count, stepping kicks in above 1
    #[arg(long, default_value_t = 0)]
    steps: u32,
    /// Discrete values, comma separated; overrides floor and ceiling
    #[arg(long, value_delimiter = ',')]
    values: Vec<f64>,
    /// "equal" or "relative"
    #[arg(long, default_value = "relative")]
    spacing: String,
    /// Allow knobs to cross each other
    #[arg(long)]
    continuous: bool,
    #[arg(long)]
    vertical: bool,
    /// JSON file with slider options, overrides the individual flags
    #[arg(long)]
    options_file: Option<PathBuf>,
}

fn options_from_cli(cli: &Cli) -> Result<SliderOptions, String> {
    if let Some(path) = &cli.options_file {
        let data =
            std::fs::read(path).map_err(|e| format!("Failed to read options file: {e}"))?;
        return serde_json::from_slice(&data)
            .map_err(|e| format!("Failed to parse options file: {e}"));
    }

    let spacing = match cli.spacing.as_str() {
        "equal" => Spacing::Equal,
        "relative" => Spacing::Relative,
        other => {
            return Err(format!(
                "Unknown spacing \"{other}\", expected \"equal\" or \"relative\""
            ))
        }
    };

    Ok(SliderOptions {
        precision: cli.precision,
        buffer: cli.buffer,
        steps: cli.steps,
        values: cli.values.clone(),
        spacing,
        continuous: cli.continuous,
        vertical: cli.vertical,
    })
}

fn main() {
    let cli = Cli::parse();

    let options = match options_from_cli(&cli) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    let app = match SliderApp::demo(cli.floor, cli.ceiling, options) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Invalid slider configuration: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = run_gui(GuiConfig::default(), app) {
        eprintln!("Failed to start GUI: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_options() {
        let cli = Cli::parse_from([
            "multislider",
            "--floor",
            "0",
            "--ceiling",
            "10",
            "--steps",
            "5",
            "--precision",
            "1",
            "--spacing",
            "equal",
            "--continuous",
        ]);
        let options = options_from_cli(&cli).unwrap();
        assert_eq!(options.steps, 5);
        assert_eq!(options.precision, 1);
        assert_eq!(options.spacing, Spacing::Equal);
        assert!(options.continuous);
        assert!(!options.vertical);
    }

    #[test]
    fn values_flag_is_comma_separated() {
        let cli = Cli::parse_from(["multislider", "--values", "0,5,10"]);
        let options = options_from_cli(&cli).unwrap();
        assert_eq!(options.values, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn unknown_spacing_is_rejected() {
        let cli = Cli::parse_from(["multislider", "--spacing", "diagonal"]);
        assert!(options_from_cli(&cli).is_err());
    }
}
