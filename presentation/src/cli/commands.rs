//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every iteration with its routing decision and agent results
    Full,
    /// Only the summary line and final likelihood
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for realism-enhancer
#[derive(Parser, Debug)]
#[command(name = "realism-enhancer")]
#[command(author, version, about = "Make AI-generated images look less generated")]
#[command(long_about = r#"
Realism Enhancer runs an analyze -> route -> fix loop over one image.

Each iteration:
1. Analyze: a vision model scores how AI-generated the image looks and lists artifacts
2. Route: a reasoning model (or keyword rules) picks expert agents and writes their instructions
3. Fix: each agent's edit is sent to the image-editing service, in priority order

The loop stops when the image looks realistic enough, stops improving, or after
the iteration budget.

Configuration files are loaded from (in priority order):
1. REALISM_* environment variables (e.g. REALISM_EDITOR__ENDPOINT)
2. --config <path>     Explicit config file
3. ./realism.toml      Project-level config
4. ~/.config/realism-enhancer/config.toml   Global config

Example:
  realism-enhancer portrait.jpg -o portrait.real.jpg
  realism-enhancer --analyze-only --output json street.png
"#)]
pub struct Cli {
    /// Image to enhance
    #[arg(value_name = "IMAGE", required_unless_present = "show_config")]
    pub image: Option<PathBuf>,

    /// Where to write the enhanced image (default: <IMAGE stem>.enhanced.<ext>)
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Only analyze the image; do not edit it
    #[arg(long)]
    pub analyze_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Route with keyword rules only, without the reasoning model
    #[arg(long)]
    pub heuristic: bool,

    /// Override the iteration budget
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Directory for daily-rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write run events (routing, agent results, iterations) as JSONL here
    #[arg(long, value_name = "PATH")]
    pub run_log: Option<PathBuf>,
}

impl Cli {
    /// Output path: `--out`, or the input path with `.enhanced` before the extension.
    pub fn output_path(&self) -> Option<PathBuf> {
        if let Some(out) = &self.out {
            return Some(out.clone());
        }
        let image = self.image.as_ref()?;
        let stem = image.file_stem()?.to_string_lossy();
        let name = match image.extension() {
            Some(ext) => format!("{}.enhanced.{}", stem, ext.to_string_lossy()),
            None => format!("{}.enhanced", stem),
        };
        Some(image.with_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags() {
        let cli = Cli::parse_from([
            "realism-enhancer",
            "face.jpg",
            "-o",
            "out.jpg",
            "--output",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.image, Some(PathBuf::from("face.jpg")));
        assert_eq!(cli.out, Some(PathBuf::from("out.jpg")));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.analyze_only);
    }

    #[test]
    fn test_default_output_path() {
        let cli = Cli::parse_from(["realism-enhancer", "shots/face.jpg"]);
        assert_eq!(cli.output, OutputFormat::Full);
        assert_eq!(
            cli.output_path(),
            Some(PathBuf::from("shots/face.enhanced.jpg"))
        );
    }

    #[test]
    fn test_image_required_unless_showing_config() {
        assert!(Cli::try_parse_from(["realism-enhancer"]).is_err());
        assert!(Cli::try_parse_from(["realism-enhancer", "--show-config"]).is_ok());
    }
}
