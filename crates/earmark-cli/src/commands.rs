use std::path::Path;

use earmark_audiogram::{AudiogramEditor, EditorEvent};
use earmark_core::models::audiogram::ThresholdChange;
use earmark_core::models::ear::Ear;
use earmark_core::models::report::HearingReport;
use earmark_export::export_audiogram;

use crate::cli::{Cli, Commands, ConfigAction};
use crate::config::{self, EarmarkConfig};

pub fn run(cli: Cli) -> eyre::Result<()> {
    let config_path = config::config_path(cli.config_file.as_deref())?;

    match cli.command {
        Commands::Render { report, out } => {
            let config = config::load_config(&config_path)?;
            let svg = render(&config, &report)?;
            match out {
                Some(out) => {
                    std::fs::write(&out, svg)?;
                    tracing::info!(path = %out.display(), "chart written");
                }
                None => println!("{svg}"),
            }
        }
        Commands::Click { report, ear, x, y } => {
            let config = config::load_config(&config_path)?;
            match click(&config, &report, ear.into(), x, y)? {
                Some(change) => println!("{}", describe(&change)),
                None => println!("click outside chart, nothing changed"),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = config::load_config(&config_path)?;
                println!("# {}", config_path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "{} already exists (use --force to overwrite)",
                        config_path.display()
                    ));
                }
                config::save_config(&config_path, &EarmarkConfig::default())?;
                println!("wrote {}", config_path.display());
            }
        },
    }
    Ok(())
}

pub fn read_report(path: &Path) -> eyre::Result<HearingReport> {
    let bytes = std::fs::read(path)
        .map_err(|e| eyre::eyre!("failed to read report at {}: {e}", path.display()))?;
    Ok(HearingReport::from_json(&bytes)?)
}

/// Render the report's audiogram to SVG using the configured layout.
pub fn render(config: &EarmarkConfig, report_path: &Path) -> eyre::Result<String> {
    let report = read_report(report_path)?;
    let area = config.chart.area()?;
    Ok(export_audiogram(&report, &config.scale, area, &config.styles)?)
}

/// Feed one click at `(x, y)` through the editor for `ear` and persist the
/// resulting change into the report file.
pub fn click(
    config: &EarmarkConfig,
    report_path: &Path,
    ear: Ear,
    x: f64,
    y: f64,
) -> eyre::Result<Option<ThresholdChange>> {
    let mut report = read_report(report_path)?;
    let area = config.chart.area()?;
    let mut editor = AudiogramEditor::new(config.scale.clone())?.with_active_ear(ear);

    let mut changes = Vec::new();
    editor.dispatch(
        area,
        &report.audiogram,
        EditorEvent::PointerClick { x, y },
        &mut |change: ThresholdChange| changes.push(change),
    );

    let Some(change) = changes.pop() else {
        return Ok(None);
    };

    report.apply(&change, jiff::Timestamp::now());
    config::write_atomic(report_path, report.to_json()?.as_bytes())?;
    tracing::info!(
        report = %report.id,
        ear = %change.ear,
        hz = change.frequency.hz(),
        "report updated"
    );
    Ok(Some(change))
}

fn describe(change: &ThresholdChange) -> String {
    match change.level {
        Some(level) => format!("{} ear {}: set to {}", change.ear, change.frequency, level),
        None => format!("{} ear {}: cleared", change.ear, change.frequency),
    }
}
