//! instafilter: apply a photo filter from the command line.
//!
//! Picks an image file, applies one filter at the given intensity, and
//! saves the result into an album directory under a unique name.
//!
//! # Usage
//!
//! ```text
//! instafilter [OPTIONS] <INPUT>
//! instafilter --list-filters
//! ```
//!
//! Set `RUST_LOG=debug` to trace pipeline state changes.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use instafilter_io::{AlbumSaver, FilePicker, Notification, SaveError, Session};
use instafilter_pipeline::{Filter, FilterKind, PipelineConfig, PipelineState};

/// Apply a photo filter with an adjustable intensity.
///
/// The intensity slider drives every parameter the chosen filter
/// understands, so one number is enough to tune any filter.
#[derive(Parser)]
#[command(name = "instafilter", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    #[arg(required_unless_present = "list_filters")]
    input: Option<PathBuf>,

    /// Filter to apply (see --list-filters).
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_FILTER)]
    filter: FilterKind,

    /// Intensity in [0, 1].
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_INTENSITY)]
    intensity: f32,

    /// Album directory the filtered image is saved into.
    #[arg(long, default_value = "album")]
    album: PathBuf,

    /// Also write the filtered image to this path as PNG.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, --filter and --intensity are ignored. The JSON must
    /// be a valid `PipelineConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Print the available filters and exit.
    #[arg(long)]
    list_filters: bool,
}

fn config_from_cli(cli: &Cli) -> Result<PipelineConfig, String> {
    let config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"))?
    } else {
        PipelineConfig {
            filter: cli.filter,
            intensity: cli.intensity,
        }
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_filters() {
    for kind in FilterKind::ALL {
        let keys: Vec<String> = kind
            .recognized_keys()
            .iter()
            .map(ToString::to_string)
            .collect();
        let keys = if keys.is_empty() {
            "-".to_string()
        } else {
            keys.join(", ")
        };
        println!("{:<14} {:<16} {keys}", kind.id(), kind.label());
    }
}

fn write_preview(session: &Session, path: &std::path::Path) -> Result<(), String> {
    let Some(output) = session.preview() else {
        return Err("no preview to write".to_string());
    };
    let png = instafilter_pipeline::encode_png(output).map_err(|e| e.to_string())?;
    std::fs::write(path, png).map_err(|e| format!("Error writing {}: {e}", path.display()))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_filters {
        print_filters();
        return ExitCode::SUCCESS;
    }
    let Some(input) = cli.input.as_deref() else {
        eprintln!("No input image given");
        return ExitCode::FAILURE;
    };

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("config: {config:?}");

    let mut session = match Session::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let _ = session.pick_image(&FilePicker::new(input)).await;
    if session.pipeline().state() == PipelineState::Empty {
        eprintln!("Could not load {} as an image", input.display());
        return ExitCode::FAILURE;
    }
    if session.preview().is_none() {
        eprintln!("Filter {} produced no output", config.filter);
        return ExitCode::FAILURE;
    }

    let params: Vec<String> = session
        .pipeline()
        .parameters()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    eprintln!(
        "Applied {} at intensity {:.2} ({})",
        config.filter.label(),
        config.intensity,
        params.join(", "),
    );

    if let Some(ref path) = cli.preview {
        if let Err(msg) = write_preview(&session, path) {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
        eprintln!("Preview written to {}", path.display());
    }

    match session.save(&AlbumSaver::new(&cli.album)).await {
        Ok(notification @ Notification::Saved(_)) => {
            println!("{notification}");
            ExitCode::SUCCESS
        }
        Ok(notification @ Notification::SaveFailed(_)) => {
            eprintln!("{notification}");
            ExitCode::FAILURE
        }
        Err(SaveError::NoSourceImage) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_build_config() {
        let cli = Cli::parse_from([
            "instafilter",
            "in.png",
            "--filter",
            "gaussian_blur",
            "--intensity",
            "0.25",
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.filter, FilterKind::GaussianBlur);
        assert!((config.intensity - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn defaults_match_pipeline_config() {
        let cli = Cli::parse_from(["instafilter", "in.png"]);
        assert_eq!(config_from_cli(&cli).unwrap(), PipelineConfig::default());
        assert_eq!(cli.album, PathBuf::from("album"));
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = Cli::parse_from([
            "instafilter",
            "in.png",
            "--filter",
            "edges",
            "--config-json",
            r#"{"filter":"vignette","intensity":0.9}"#,
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.filter, FilterKind::Vignette);
    }

    #[test]
    fn out_of_range_intensity_rejected() {
        let cli = Cli::parse_from(["instafilter", "in.png", "--intensity", "1.5"]);
        assert!(config_from_cli(&cli).is_err());
    }

    #[test]
    fn bad_json_rejected() {
        let cli = Cli::parse_from(["instafilter", "in.png", "--config-json", "{"]);
        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.starts_with("Error parsing --config-json"));
    }

    #[test]
    fn unknown_filter_is_a_parse_error() {
        let parsed = Cli::try_parse_from(["instafilter", "in.png", "--filter", "posterize"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn list_filters_needs_no_input() {
        let cli = Cli::try_parse_from(["instafilter", "--list-filters"]).unwrap();
        assert!(cli.list_filters);
        assert!(Cli::try_parse_from(["instafilter"]).is_err());
    }
}
