use earmark_audiogram::render::{GridLine, MarkerSymbol, Rect, RenderPlan};
use earmark_audiogram::{AudiogramEditor, AudiogramScale, ChartArea};
use earmark_core::models::ear::Ear;
use earmark_core::models::report::HearingReport;
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::styles::ChartStyles;

const TEMPLATE_NAME: &str = "audiogram.svg";
const TEMPLATE: &str = include_str!("../templates/audiogram.svg.tera");

#[derive(Serialize)]
struct SvgContext<'a> {
    title: &'a str,
    width: f64,
    height: f64,
    title_y: f64,
    area: SvgArea,
    band: Rect,
    frequency_lines: Vec<SvgLine<'a>>,
    level_lines: Vec<SvgLine<'a>>,
    traces: Vec<SvgTrace<'a>>,
    markers: Vec<SvgMarker<'a>>,
    styles: &'a ChartStyles,
}

#[derive(Serialize)]
struct SvgArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    right: f64,
    bottom: f64,
    label_x: f64,
    label_y: f64,
}

#[derive(Serialize)]
struct SvgLine<'a> {
    position: f64,
    label: &'a str,
}

#[derive(Serialize)]
struct SvgTrace<'a> {
    color: &'a str,
    points: String,
}

#[derive(Serialize)]
struct SvgMarker<'a> {
    ear: Ear,
    symbol: &'static str,
    color: &'a str,
    x: f64,
    y: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

/// Render a plan as a standalone SVG document.
pub fn render_svg(
    plan: &RenderPlan,
    styles: &ChartStyles,
    title: &str,
) -> Result<String, ExportError> {
    let context = svg_context(plan, styles, title);

    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(&context)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    let rendered = tera.render(TEMPLATE_NAME, &context)?;

    tracing::debug!(
        markers = plan.markers.len(),
        bytes = rendered.len(),
        "rendered audiogram svg"
    );
    Ok(rendered)
}

/// Build the chart for a hearing report and render it as SVG.
pub fn export_audiogram(
    report: &HearingReport,
    scale: &AudiogramScale,
    area: ChartArea,
    styles: &ChartStyles,
) -> Result<String, ExportError> {
    let editor = AudiogramEditor::new(scale.clone())?;
    let plan = editor.render(area, &report.audiogram)?;
    let title = format!("Audiogram {}", report.test_date);
    render_svg(&plan, styles, &title)
}

fn svg_context<'a>(plan: &'a RenderPlan, styles: &'a ChartStyles, title: &'a str) -> SvgContext<'a> {
    let area = plan.area;
    let r = styles.marker_radius;

    let traces = plan
        .traces
        .iter()
        .map(|trace| SvgTrace {
            color: styles.ear_color(trace.ear),
            points: trace
                .points
                .iter()
                .map(|[x, y]| format!("{},{}", px(*x), px(*y)))
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();

    let markers = plan
        .markers
        .iter()
        .map(|m| SvgMarker {
            ear: m.ear,
            symbol: match m.symbol {
                MarkerSymbol::Circle => "circle",
                MarkerSymbol::Cross => "cross",
            },
            color: styles.ear_color(m.ear),
            x: px(m.x),
            y: px(m.y),
            x0: px(m.x - r),
            y0: px(m.y - r),
            x1: px(m.x + r),
            y1: px(m.y + r),
        })
        .collect();

    SvgContext {
        title,
        width: px(area.right() + styles.margin),
        height: px(area.bottom() + styles.margin),
        title_y: px((area.top - styles.font_size * 2.0).max(styles.font_size)),
        area: SvgArea {
            left: px(area.left),
            top: px(area.top),
            width: px(area.width),
            height: px(area.height),
            right: px(area.right()),
            bottom: px(area.bottom()),
            label_x: px(area.left - 6.0),
            label_y: px(area.top - 6.0),
        },
        band: Rect {
            x: px(plan.normal_band.x),
            y: px(plan.normal_band.y),
            width: px(plan.normal_band.width),
            height: px(plan.normal_band.height),
        },
        frequency_lines: grid_lines(&plan.frequency_lines),
        level_lines: grid_lines(&plan.level_lines),
        traces,
        markers,
        styles,
    }
}

fn grid_lines(lines: &[GridLine]) -> Vec<SvgLine<'_>> {
    lines
        .iter()
        .map(|line| SvgLine {
            position: px(line.position),
            label: &line.label,
        })
        .collect()
}

fn px(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
