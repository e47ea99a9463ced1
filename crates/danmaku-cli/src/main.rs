//! danmaku2ass
//!
//! Converts a bilibili danmaku XML file into an ASS subtitle script.
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use danmaku_core::{convert_xml, ConversionConfig};
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "danmaku2ass")]
#[command(about = "Convert bilibili danmaku XML into an ASS subtitle script")]
#[command(version)]
struct Cli {
    /// Input danmaku XML file
    input: PathBuf,

    /// Output ASS file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with conversion settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Video width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Video height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Font family for the default style
    #[arg(long)]
    font_name: Option<String>,

    /// Base font size
    #[arg(long)]
    font_size: Option<i32>,

    /// Number of scroll lines before wrapping back to the top
    #[arg(long)]
    line_capacity: Option<usize>,

    /// Distance of the lowest bottom slot from the bottom edge
    #[arg(long)]
    bottom_margin: Option<i32>,

    /// Seconds added to every scrolling comment's duration
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Resolve the conversion settings: defaults, config file, then flags
    fn conversion_config(&self) -> Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ConversionConfig::default(),
        };

        if let Some(width) = self.width {
            config.video_width = width;
        }
        if let Some(height) = self.height {
            config.video_height = height;
        }
        if let Some(font_name) = &self.font_name {
            config.font_name.clone_from(font_name);
        }
        if let Some(font_size) = self.font_size {
            config.base_font_size = font_size;
        }
        if let Some(line_capacity) = self.line_capacity {
            config.line_capacity = line_capacity;
        }
        if let Some(bottom_margin) = self.bottom_margin {
            config.bottom_margin = bottom_margin;
        }
        if let Some(offset) = self.offset {
            config.duration_offset = offset;
        }

        config.validate().context("Invalid conversion settings")?;
        Ok(config)
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn load_config(path: &Path) -> Result<ConversionConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    debug!("loaded settings from {}", path.display());
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.conversion_config()?;

    let xml = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let script = convert_xml(&xml, &config)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    match &cli.output {
        Some(output) => {
            fs::write(output, &script)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("wrote {}", output.display());
        }
        None => io::stdout()
            .lock()
            .write_all(script.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<i>
  <d p="1.0,1,25,16777215">hello</d>
  <d p="2.0,5,25,0">top</d>
</i>"#;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "danmaku2ass",
            "in.xml",
            "--width",
            "1280",
            "--height",
            "720",
            "--offset",
            "-1.5",
        ])
        .unwrap();
        let config = cli.conversion_config().unwrap();
        assert_eq!(config.video_width, 1280);
        assert_eq!(config.video_height, 720);
        assert!((config.duration_offset + 1.5).abs() < f64::EPSILON);
        assert_eq!(config.base_font_size, 64);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "video_width = 640\nfont_name = \"SimHei\"\nbase_font_size = 32\n").unwrap();

        let cli = Cli::try_parse_from([
            "danmaku2ass",
            "in.xml",
            "--config",
            path.to_str().unwrap(),
            "--font-size",
            "40",
        ])
        .unwrap();
        let config = cli.conversion_config().unwrap();
        assert_eq!(config.video_width, 640);
        assert_eq!(config.video_height, 1080);
        assert_eq!(config.font_name, "SimHei");
        assert_eq!(config.base_font_size, 40);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let cli = Cli::try_parse_from(["danmaku2ass", "in.xml", "--line-capacity", "0"]).unwrap();
        assert!(cli.conversion_config().is_err());
    }

    #[test]
    fn verbosity_maps_to_level() {
        let quiet = Cli::try_parse_from(["danmaku2ass", "in.xml"]).unwrap();
        let loud = Cli::try_parse_from(["danmaku2ass", "in.xml", "-vv"]).unwrap();
        assert_eq!(quiet.log_level(), "warn");
        assert_eq!(loud.log_level(), "debug");
    }

    #[test]
    fn run_writes_script() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("video.xml");
        fs::write(&input, SAMPLE).unwrap();

        let output = dir.path().join("video.ass");
        let cli = Cli::try_parse_from([
            "danmaku2ass",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run(&cli).unwrap();

        let script = fs::read_to_string(&output).unwrap();
        assert!(script.starts_with("[Script Info]"));
        assert_eq!(script.lines().filter(|l| l.starts_with("Dialogue:")).count(), 2);
        assert!(script.contains("}hello"));
        assert!(script.contains("\\pos(960,1)"));
    }

    #[test]
    fn missing_input_reports_path() {
        let cli = Cli::try_parse_from(["danmaku2ass", "/nonexistent/danmaku.xml"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/danmaku.xml"));
    }
}
