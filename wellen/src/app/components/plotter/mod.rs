mod logic;
mod ui;

pub use logic::PlotSettings;

use std::collections::BTreeMap;

/// Curves are keyed by a small integer id and drawn in ascending id order.
pub type CurveId = usize;

/// Interactive 2D chart widget: multi-curve point buffers, a zoom stack of
/// view windows, rubber-band zoom selection and keyboard/wheel navigation.
/// Grid and curve shapes are cached and only rebuilt when the data, the
/// widget size or the view changes.
pub struct Plotter {
    curves: BTreeMap<CurveId, Vec<[f64; 2]>>,
    /// Previously visited view windows; `cur_zoom` points at the active one.
    zoom_stack: Vec<PlotSettings>,
    cur_zoom: usize,
    /// Screen-space corners of the selection being dragged, if any.
    rubber_band: Option<(egui::Pos2, egui::Pos2)>,
    /// Scroll input left over after converting to whole ticks.
    wheel_residual: egui::Vec2,
    shape_cache: Option<ui::ShapeCache>,
    /// Bumped on every data or view mutation, invalidates the shape cache.
    revision: u64,
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            curves: BTreeMap::new(),
            zoom_stack: vec![PlotSettings::default()],
            cur_zoom: 0,
            rubber_band: None,
            wheel_residual: egui::Vec2::ZERO,
            shape_cache: None,
            revision: 0,
        }
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}
