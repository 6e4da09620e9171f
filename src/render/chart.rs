//! Chart capability used by the statistics page.
//!
//! The shell only describes charts; drawing is up to whichever
//! [`ChartBackend`] the front-end installs. Without one, charts are skipped.

use std::fmt;
use std::sync::{Arc, Mutex};

use log::{debug, error};

use crate::data::TimeStats;
use crate::dom::{Document, Selector};

pub const HOURLY_CHART_TARGET: &str = "#hourlyChart";

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub color: String,
    pub fill: bool,
    pub tension: f32,
}

impl LineChart {
    /// Online players per hour of day.
    pub fn hourly(time: &TimeStats) -> Self {
        Self {
            label: "在线人数".to_string(),
            labels: time.hourly.iter().map(|p| p.hour.clone()).collect(),
            values: time.hourly.iter().map(|p| p.players).collect(),
            color: "#1976D2".to_string(),
            fill: true,
            tension: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartError(pub String);

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart error: {}", self.0)
    }
}

impl std::error::Error for ChartError {}

pub trait ChartBackend: Send + Sync {
    /// Draws `chart` onto the canvas identified by `target`.
    fn line_chart(&self, target: &str, chart: LineChart) -> Result<(), ChartError>;

    /// Forgets every chart drawn so far. Called whenever the content region
    /// is replaced, since the old canvases are gone with it.
    fn clear(&self) {}
}

/// Draws the hourly chart if both the canvas and a backend are present.
/// Returns whether a chart was drawn. Backend failures are logged, never
/// propagated.
pub fn init_hourly_chart(
    doc: &Document,
    charts: Option<&dyn ChartBackend>,
    time: &TimeStats,
) -> bool {
    let Some(backend) = charts else {
        debug!("No chart backend installed, skipping hourly chart");
        return false;
    };
    if !doc.exists(&Selector::fixed(HOURLY_CHART_TARGET)) {
        debug!("No {} canvas in fragment, skipping", HOURLY_CHART_TARGET);
        backend.clear();
        return false;
    }
    match backend.line_chart(HOURLY_CHART_TARGET, LineChart::hourly(time)) {
        Ok(()) => true,
        Err(e) => {
            error!("Error initializing chart: {}", e);
            false
        }
    }
}

/// Backend that keeps the most recent chart so a front-end can draw it.
#[derive(Debug, Clone, Default)]
pub struct ChartSlot {
    latest: Arc<Mutex<Option<(String, LineChart)>>>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<(String, LineChart)> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }
}

impl ChartBackend for ChartSlot {
    fn line_chart(&self, target: &str, chart: LineChart) -> Result<(), ChartError> {
        let mut slot = self
            .latest
            .lock()
            .map_err(|_| ChartError("chart slot poisoned".to_string()))?;
        *slot = Some((target.to_string(), chart));
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.latest.lock() {
            *slot = None;
        }
    }
}
