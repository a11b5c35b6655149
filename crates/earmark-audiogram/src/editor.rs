use earmark_core::models::audiogram::{Audiogram, ThresholdChange};
use earmark_core::models::ear::Ear;
use earmark_core::models::threshold::{Frequency, HearingLevel};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AudiogramError;
use crate::render::{self, RenderPlan};
use crate::scale::AudiogramScale;
use crate::transform::{ChartArea, ChartTransform};

/// The grid point under the pointer, for tooltips and highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HoverPoint {
    pub ear: Ear,
    pub frequency: Frequency,
    pub level: HearingLevel,
}

/// UI-only editor state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EditorState {
    pub active_ear: Ear,
    pub hover: Option<HoverPoint>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            active_ear: Ear::Right,
            hover: None,
        }
    }
}

/// Input events, in pixel coordinates of the chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum EditorEvent {
    PointerClick { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    SetActiveEar { ear: Ear },
}

/// What an event produced for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum EditorEffect {
    ThresholdChanged { change: ThresholdChange },
    ActiveEarChanged { ear: Ear },
}

/// Receives the editor's outputs. The caller owns the threshold data and is
/// responsible for persisting every change it is handed.
pub trait EditorListener {
    fn on_threshold_change(&mut self, change: ThresholdChange);

    fn on_active_ear_change(&mut self, _ear: Ear) {}
}

impl<F: FnMut(ThresholdChange)> EditorListener for F {
    fn on_threshold_change(&mut self, change: ThresholdChange) {
        self(change)
    }
}

/// Translates pointer input into threshold set/clear requests.
///
/// Holds only the scale and [`EditorState`]. Each call takes the current
/// chart area and the caller's [`Audiogram`], so resizes and upstream edits
/// are picked up without any cached pixel state.
#[derive(Debug, Clone)]
pub struct AudiogramEditor {
    scale: AudiogramScale,
    state: EditorState,
}

impl AudiogramEditor {
    pub fn new(scale: AudiogramScale) -> Result<Self, AudiogramError> {
        scale.validate()?;
        Ok(Self {
            scale,
            state: EditorState::default(),
        })
    }

    pub fn with_active_ear(mut self, ear: Ear) -> Self {
        self.state.active_ear = ear;
        self
    }

    pub fn scale(&self) -> &AudiogramScale {
        &self.scale
    }

    pub fn active_ear(&self) -> Ear {
        self.state.active_ear
    }

    pub fn hover(&self) -> Option<HoverPoint> {
        self.state.hover
    }

    /// Transform for the current chart size. Fails if `area` is degenerate.
    pub fn transform(&self, area: ChartArea) -> Result<ChartTransform<'_>, AudiogramError> {
        area.validate()?;
        Ok(ChartTransform::from_validated(&self.scale, area))
    }

    /// Switch the ear that later clicks edit. Returns the new ear if it
    /// differs from the previous one.
    pub fn set_active_ear(&mut self, ear: Ear) -> Option<Ear> {
        if self.state.active_ear == ear {
            return None;
        }
        self.state.active_ear = ear;
        if let Some(hover) = self.state.hover.as_mut() {
            hover.ear = ear;
        }
        tracing::debug!(%ear, "active ear changed");
        Some(ear)
    }

    /// Interpret a click. Returns the change for the caller to persist, or
    /// `None` when the click landed outside the plotted area.
    ///
    /// Clicking the level already stored for the active ear clears it;
    /// anything else sets the snapped level at the nearest frequency.
    pub fn on_pointer_click(
        &mut self,
        area: ChartArea,
        audiogram: &Audiogram,
        x: f64,
        y: f64,
    ) -> Option<ThresholdChange> {
        let (frequency, level) = self.locate(area, x, y)?;
        let ear = self.state.active_ear;

        let change = if audiogram.ear(ear).get(frequency) == Some(level) {
            ThresholdChange::clear(ear, frequency)
        } else {
            ThresholdChange::set(ear, frequency, level)
        };
        tracing::debug!(
            %ear,
            hz = frequency.hz(),
            db = level.db(),
            cleared = change.is_clear(),
            "threshold change"
        );
        Some(change)
    }

    /// Update hover. Returns whether it changed, i.e. whether a repaint is
    /// needed.
    pub fn on_pointer_move(&mut self, area: ChartArea, x: f64, y: f64) -> bool {
        let hover = self
            .locate(area, x, y)
            .map(|(frequency, level)| HoverPoint {
                ear: self.state.active_ear,
                frequency,
                level,
            });
        let changed = hover != self.state.hover;
        self.state.hover = hover;
        changed
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        self.state.hover.take().is_some()
    }

    pub fn handle(
        &mut self,
        area: ChartArea,
        audiogram: &Audiogram,
        event: EditorEvent,
    ) -> Option<EditorEffect> {
        match event {
            EditorEvent::PointerClick { x, y } => self
                .on_pointer_click(area, audiogram, x, y)
                .map(|change| EditorEffect::ThresholdChanged { change }),
            EditorEvent::PointerMove { x, y } => {
                self.on_pointer_move(area, x, y);
                None
            }
            EditorEvent::PointerLeave => {
                self.on_pointer_leave();
                None
            }
            EditorEvent::SetActiveEar { ear } => self
                .set_active_ear(ear)
                .map(|ear| EditorEffect::ActiveEarChanged { ear }),
        }
    }

    /// [`handle`](Self::handle), delivering the effect to `listener`.
    pub fn dispatch<L: EditorListener>(
        &mut self,
        area: ChartArea,
        audiogram: &Audiogram,
        event: EditorEvent,
        listener: &mut L,
    ) {
        match self.handle(area, audiogram, event) {
            Some(EditorEffect::ThresholdChanged { change }) => listener.on_threshold_change(change),
            Some(EditorEffect::ActiveEarChanged { ear }) => listener.on_active_ear_change(ear),
            None => {}
        }
    }

    pub fn render(
        &self,
        area: ChartArea,
        audiogram: &Audiogram,
    ) -> Result<RenderPlan, AudiogramError> {
        let transform = self.transform(area)?;
        Ok(render::plan(&transform, audiogram, &self.state))
    }

    /// Grid point under `(x, y)`. `None` for points outside the area and for
    /// a degenerate area, which has no inside.
    fn locate(&self, area: ChartArea, x: f64, y: f64) -> Option<(Frequency, HearingLevel)> {
        let transform = match self.transform(area) {
            Ok(transform) => transform,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring pointer on invalid chart area");
                return None;
            }
        };
        if !area.contains(x, y) {
            tracing::trace!(x, y, "pointer outside chart area");
            return None;
        }
        let level = transform.snapped_level(y)?;
        Some((transform.nearest_frequency(x), level))
    }
}
