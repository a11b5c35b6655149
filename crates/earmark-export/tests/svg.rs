use earmark_audiogram::{AudiogramEditor, AudiogramScale, ChartArea};
use earmark_core::models::audiogram::Audiogram;
use earmark_core::models::report::HearingReport;
use earmark_core::models::threshold::{Frequency, HearingLevel};
use earmark_export::styles::ChartStyles;
use earmark_export::{export_audiogram, render_svg};

fn area() -> ChartArea {
    ChartArea::new(60.0, 60.0, 600.0, 520.0).unwrap()
}

fn report() -> HearingReport {
    let now: jiff::Timestamp = "2026-03-14T09:00:00Z".parse().unwrap();
    let mut report = HearingReport::new(uuid::Uuid::new_v4(), jiff::civil::date(2026, 3, 14), now);
    let audiogram = &mut report.audiogram;
    audiogram.right.set(Frequency(500), HearingLevel(15));
    audiogram.right.set(Frequency(1000), HearingLevel(20));
    audiogram.right.set(Frequency(2000), HearingLevel(35));
    audiogram.left.set(Frequency(1000), HearingLevel(40));
    report
}

#[test]
fn export_draws_one_shape_per_marker() {
    let svg = export_audiogram(
        &report(),
        &AudiogramScale::default(),
        area(),
        &ChartStyles::default(),
    )
    .unwrap();

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"marker right\"").count(), 3);
    assert_eq!(svg.matches("class=\"marker left\"").count(), 1);
    assert_eq!(svg.matches("<circle").count(), 3);
    assert_eq!(svg.matches("<polyline").count(), 1);
    assert!(svg.contains("Audiogram 2026-03-14"));
}

#[test]
fn ear_colors_come_from_styles() {
    let styles = ChartStyles {
        right_ear_color: "#ff0000".to_string(),
        left_ear_color: "#0000ff".to_string(),
        ..ChartStyles::default()
    };

    let svg = export_audiogram(&report(), &AudiogramScale::default(), area(), &styles).unwrap();

    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(svg.contains("stroke=\"#0000ff\""));
}

#[test]
fn grid_labels_are_rendered() {
    let editor = AudiogramEditor::new(AudiogramScale::default()).unwrap();
    let plan = editor.render(area(), &Audiogram::default()).unwrap();

    let svg = render_svg(&plan, &ChartStyles::default(), "Blank").unwrap();

    for label in ["125", "1k", "8k", ">-10<", ">120<"] {
        assert!(svg.contains(label), "missing {label}");
    }
    assert_eq!(svg.matches("<line").count(), 9 + 27);
    assert!(!svg.contains("class=\"marker"));
}

#[test]
fn title_is_escaped() {
    let editor = AudiogramEditor::new(AudiogramScale::default()).unwrap();
    let plan = editor.render(area(), &Audiogram::default()).unwrap();

    let svg = render_svg(&plan, &ChartStyles::default(), "Smith & <Jones>").unwrap();

    assert!(svg.contains("Smith &amp; &lt;Jones&gt;"));
    assert!(!svg.contains("<Jones>"));
}

#[test]
fn invalid_scale_is_an_error() {
    let scale = AudiogramScale {
        frequencies: vec![Frequency(1000)],
        ..AudiogramScale::default()
    };

    let result = export_audiogram(&report(), &scale, area(), &ChartStyles::default());

    assert!(result.is_err());
}

#[test]
fn style_colors_are_escaped_in_attributes() {
    let styles = ChartStyles {
        axis_color: "red\" onload=\"alert(1)".to_string(),
        left_ear_color: "<blue>".to_string(),
        ..ChartStyles::default()
    };

    let svg = export_audiogram(&report(), &AudiogramScale::default(), area(), &styles).unwrap();

    assert!(!svg.contains("onload=\""));
    assert!(svg.contains("red&quot; onload=&quot;alert(1)"));
    assert!(svg.contains("stroke=\"&lt;blue&gt;\""));
}
