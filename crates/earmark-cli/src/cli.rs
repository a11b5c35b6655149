use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use earmark_core::models::ear::Ear;

#[derive(Parser, Debug)]
#[command(name = "earmark", version, about = "Audiogram editing and chart export")]
pub struct Cli {
    #[arg(
        long = "config",
        global = true,
        help = "Config file (defaults to the platform config dir)"
    )]
    pub config_file: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a hearing report's audiogram as SVG.
    Render {
        report: PathBuf,
        #[arg(short, long, help = "Output file (stdout if omitted)")]
        out: Option<PathBuf>,
    },
    /// Apply one chart click to a hearing report and save it.
    Click {
        report: PathBuf,
        #[arg(long, value_enum)]
        ear: EarArg,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Write the default config.
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EarArg {
    Left,
    Right,
}

impl From<EarArg> for Ear {
    fn from(ear: EarArg) -> Self {
        match ear {
            EarArg::Left => Ear::Left,
            EarArg::Right => Ear::Right,
        }
    }
}
