use std::path::{Path, PathBuf};

use earmark_audiogram::ChartTransform;
use earmark_cli::commands;
use earmark_cli::config::EarmarkConfig;
use earmark_core::models::ear::Ear;
use earmark_core::models::report::HearingReport;
use earmark_core::models::threshold::{Frequency, HearingLevel};

fn write_report(dir: &Path) -> PathBuf {
    let created: jiff::Timestamp = "2020-01-06T09:00:00Z".parse().unwrap();
    let mut report = HearingReport::new(uuid::Uuid::new_v4(), jiff::civil::date(2020, 1, 6), created);
    report
        .audiogram
        .left
        .set(Frequency(500), HearingLevel(25));

    let path = dir.join("report.json");
    std::fs::write(&path, report.to_json().unwrap()).unwrap();
    path
}

fn pixel(config: &EarmarkConfig, hz: u32, db: i32) -> (f64, f64) {
    let transform = ChartTransform::new(&config.scale, config.chart.area().unwrap()).unwrap();
    (
        transform.frequency_to_x(Frequency(hz)),
        transform.level_to_y(HearingLevel(db)),
    )
}

#[test]
fn click_sets_then_clears_in_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(dir.path());
    let config = EarmarkConfig::default();
    let (x, y) = pixel(&config, 1000, 20);

    let first = commands::click(&config, &path, Ear::Right, x, y).unwrap().unwrap();
    assert_eq!(first.level, Some(HearingLevel(20)));
    let saved = commands::read_report(&path).unwrap();
    assert_eq!(
        saved.audiogram.right.get(Frequency(1000)),
        Some(HearingLevel(20))
    );
    assert!(saved.updated_at > saved.created_at);

    let second = commands::click(&config, &path, Ear::Right, x, y).unwrap().unwrap();
    assert!(second.is_clear());
    let saved = commands::read_report(&path).unwrap();
    assert!(saved.audiogram.right.is_empty());
    assert_eq!(
        saved.audiogram.left.get(Frequency(500)),
        Some(HearingLevel(25))
    );
}

#[test]
fn click_outside_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(dir.path());
    let before = std::fs::read_to_string(&path).unwrap();

    let change = commands::click(&EarmarkConfig::default(), &path, Ear::Left, 1.0, 1.0).unwrap();

    assert_eq!(change, None);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn render_produces_svg_for_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(dir.path());

    let svg = commands::render(&EarmarkConfig::default(), &path).unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("class=\"marker left\""));
}

#[test]
fn unreadable_report_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let err = commands::render(&EarmarkConfig::default(), &missing).unwrap_err();
    assert!(err.to_string().contains("failed to read report"));
}

#[test]
fn click_arguments_parse() {
    use clap::Parser;
    use earmark_cli::cli::{Cli, Commands, EarArg};

    let cli = Cli::try_parse_from([
        "earmark", "--config", "/tmp/earmark.json", "click", "report.json", "--ear", "left",
        "--x", "120.5", "--y", "-3",
    ])
    .unwrap();

    assert_eq!(cli.config_file, Some(PathBuf::from("/tmp/earmark.json")));
    match cli.command {
        Commands::Click { ear, x, y, .. } => {
            assert_eq!(ear, EarArg::Left);
            assert_eq!(Ear::from(ear), Ear::Left);
            assert_eq!((x, y), (120.5, -3.0));
        }
        other => panic!("unexpected command {other:?}"),
    }
}
