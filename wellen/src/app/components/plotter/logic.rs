use super::{CurveId, Plotter};

/// Lower bound on the number of ticks `normalize` may settle on.
const MIN_TICKS: usize = 4;

/// One view window of the plot: axis bounds plus tick counts.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSettings {
    pub min_x: f64,
    pub max_x: f64,
    pub num_x_ticks: usize,
    pub min_y: f64,
    pub max_y: f64,
    pub num_y_ticks: usize,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 10.0,
            num_x_ticks: 5,
            min_y: 0.0,
            max_y: 10.0,
            num_y_ticks: 5,
        }
    }
}

impl PlotSettings {
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn in_range_x(&self, x: f64) -> bool {
        x > self.min_x && x < self.max_x
    }

    pub fn in_range_y(&self, y: f64) -> bool {
        y > self.min_y && y < self.max_y
    }

    /// Move the viewport by a given amount of ticks.
    pub fn scroll_ticks(&mut self, dx: i32, dy: i32) {
        let step_x = self.span_x() / self.num_x_ticks as f64;
        let step_y = self.span_y() / self.num_y_ticks as f64;
        self.scroll_units(dx as f64 * step_x, dy as f64 * step_y);
    }

    /// Move the viewport by a given amount of plot units.
    pub fn scroll_units(&mut self, dx: f64, dy: f64) {
        self.min_x += dx;
        self.max_x += dx;
        self.min_y += dy;
        self.max_y += dy;
    }

    /// Remap the viewport to the sub-rectangle given in pixel coordinates of
    /// a plot area of size `width` x `height` (pixel y grows downwards).
    pub fn adjust_window(
        &mut self,
        width: f64,
        height: f64,
        w_min_x: f64,
        w_max_x: f64,
        w_min_y: f64,
        w_max_y: f64,
    ) {
        let scale_x = self.span_x() / width;
        let (min_x, max_x) = (
            self.min_x + scale_x * w_min_x,
            self.min_x + scale_x * w_max_x,
        );
        self.min_x = min_x;
        self.max_x = max_x;

        let scale_y = self.span_y() / height;
        let (min_y, max_y) = (
            self.max_y - scale_y * w_max_y,
            self.max_y - scale_y * w_min_y,
        );
        self.min_y = min_y;
        self.max_y = max_y;
    }

    /// Round both axes to "nice" bounds and tick counts.
    pub fn normalize(&mut self) {
        Self::normalize_axis(&mut self.min_x, &mut self.max_x, &mut self.num_x_ticks);
        Self::normalize_axis(&mut self.min_y, &mut self.max_y, &mut self.num_y_ticks);
    }

    /// Widen `min`/`max` to multiples of a step of the form 1/2/5 * 10^n,
    /// the largest such step that still yields at least `MIN_TICKS` ticks.
    fn normalize_axis(min: &mut f64, max: &mut f64, num_ticks: &mut usize) {
        let gross_step = (*max - *min) / MIN_TICKS as f64;
        if gross_step.is_nan() || gross_step <= 0.0 {
            // degenerate window, leave it alone
            return;
        }
        let mut step = 10.0_f64.powf(gross_step.log10().floor());
        if 5.0 * step < gross_step {
            step *= 5.0;
        } else if 2.0 * step < gross_step {
            step *= 2.0;
        }
        *num_ticks = ((*max / step).ceil() - (*min / step).floor()) as usize;
        if *num_ticks < MIN_TICKS {
            *num_ticks = MIN_TICKS;
        }
        *min = (*min / step).floor() * step;
        *max = (*max / step).ceil() * step;
    }
}

impl Plotter {
    /// Replace the zoom stack with a single base view.
    pub fn set_plot_settings(&mut self, settings: PlotSettings) {
        self.zoom_stack.clear();
        self.zoom_stack.push(settings);
        self.cur_zoom = 0;
        self.touch();
    }

    pub fn current_settings(&self) -> &PlotSettings {
        &self.zoom_stack[self.cur_zoom]
    }

    pub fn settings_mut(&mut self) -> &mut PlotSettings {
        self.touch();
        &mut self.zoom_stack[self.cur_zoom]
    }

    pub fn can_zoom_in(&self) -> bool {
        self.cur_zoom + 1 < self.zoom_stack.len()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.cur_zoom > 0
    }

    pub fn zoom_in(&mut self) {
        if self.can_zoom_in() {
            self.cur_zoom += 1;
            self.touch();
        }
    }

    pub fn zoom_out(&mut self) {
        if self.can_zoom_out() {
            self.cur_zoom -= 1;
            self.touch();
        }
    }

    /// Discard the redo tail of the stack, push the new window and step
    /// into it.
    pub fn zoom_to(&mut self, settings: PlotSettings) {
        self.zoom_stack.truncate(self.cur_zoom + 1);
        self.zoom_stack.push(settings);
        self.cur_zoom += 1;
        self.touch();
    }

    /// Map a selection rectangle (pixel coordinates relative to the plot
    /// area) into a normalized zoom window and enter it.
    pub fn zoom_to_pixel_window(
        &mut self,
        plot_size: (f64, f64),
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) {
        let mut settings = self.current_settings().clone();
        settings.adjust_window(plot_size.0, plot_size.1, left, right, top, bottom);
        settings.normalize();
        self.zoom_to(settings);
    }

    /// Replace a curve wholesale.
    pub fn set_curve_data(&mut self, id: CurveId, points: Vec<[f64; 2]>) {
        self.curves.insert(id, points);
        self.touch();
    }

    /// Append one point, keeping a curve that walks off the right edge in
    /// view.
    pub fn add_curve_point(&mut self, id: CurveId, point: [f64; 2]) {
        let curve = self.curves.entry(id).or_default();
        curve.push(point);
        if curve.len() >= 2 {
            let old_x = curve[curve.len() - 2][0];
            let new_x = curve[curve.len() - 1][0];
            self.follow_appended_point(old_x, new_x);
        }
        self.touch();
    }

    pub fn clear_curve(&mut self, id: CurveId) {
        self.curves.remove(&id);
        self.touch();
    }

    pub fn clear_all_curves(&mut self) {
        self.curves.clear();
        self.touch();
    }

    pub fn point_count(&self) -> usize {
        self.curves.values().map(|curve| curve.len()).sum()
    }

    /// Scroll every zoom level whose x-range contained the previous last
    /// point but lost the appended one.
    fn follow_appended_point(&mut self, old_x: f64, new_x: f64) {
        let dx = new_x - old_x;
        for settings in self.zoom_stack.iter_mut() {
            // a point outside this level is outside all deeper levels too
            if !settings.in_range_x(old_x) {
                break;
            }
            if !settings.in_range_x(new_x) {
                let tick_step = settings.span_x() / settings.num_x_ticks as f64;
                settings.scroll_ticks((dx / tick_step).ceil() as i32, 0);
            }
        }
    }

    pub(super) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_close(left: f64, right: f64) {
        assert!(
            (left - right).abs() < TOL,
            "{} is not close to {}",
            left,
            right
        );
    }

    #[test]
    fn test_normalize_keeps_already_nice_window() {
        let mut settings = PlotSettings::default();
        settings.normalize();
        assert_eq!(settings, PlotSettings::default());
    }

    #[test]
    fn test_normalize_rounds_to_nice_step() {
        let mut settings = PlotSettings {
            min_x: 0.0,
            max_x: 96.5,
            ..Default::default()
        };
        settings.normalize();
        // gross step 24.125 snaps to 20, so the axis widens to [0, 100]
        assert_close(settings.min_x, 0.0);
        assert_close(settings.max_x, 100.0);
        assert_eq!(settings.num_x_ticks, 5);
    }

    #[test]
    fn test_normalize_widens_across_zero() {
        let mut settings = PlotSettings {
            min_y: -3.2,
            max_y: 3.7,
            ..Default::default()
        };
        settings.normalize();
        assert_close(settings.min_y, -4.0);
        assert_close(settings.max_y, 4.0);
        assert_eq!(settings.num_y_ticks, 8);
    }

    #[test]
    fn test_normalize_handles_tiny_spans() {
        let mut settings = PlotSettings {
            min_x: 0.0017,
            max_x: 0.0053,
            ..Default::default()
        };
        settings.normalize();
        assert_close(settings.min_x, 0.0015);
        assert_close(settings.max_x, 0.0055);
        assert_eq!(settings.num_x_ticks, 8);
    }

    #[test]
    fn test_normalize_ignores_degenerate_window() {
        let mut settings = PlotSettings {
            min_x: 1.0,
            max_x: 1.0,
            ..Default::default()
        };
        let before = settings.clone();
        settings.normalize();
        assert_eq!(settings, before);
    }

    #[test]
    fn test_scroll_ticks_moves_by_tick_steps() {
        let mut settings = PlotSettings::default();
        // default window spans 10 units over 5 ticks, so one tick is 2 units
        settings.scroll_ticks(1, -1);
        assert_close(settings.min_x, 2.0);
        assert_close(settings.max_x, 12.0);
        assert_close(settings.min_y, -2.0);
        assert_close(settings.max_y, 8.0);
    }

    #[test]
    fn test_adjust_window_maps_pixel_selection() {
        let mut settings = PlotSettings::default();
        settings.adjust_window(100.0, 100.0, 25.0, 75.0, 25.0, 75.0);
        assert_close(settings.min_x, 2.5);
        assert_close(settings.max_x, 7.5);
        // pixel y is flipped: the upper selection edge is the larger y
        assert_close(settings.min_y, 2.5);
        assert_close(settings.max_y, 7.5);
    }

    #[test]
    fn test_zoom_stack_navigation() {
        let mut plotter = Plotter::new();
        assert!(!plotter.can_zoom_in());
        assert!(!plotter.can_zoom_out());

        plotter.zoom_to_pixel_window((100.0, 100.0), 25.0, 75.0, 25.0, 75.0);
        assert!(plotter.can_zoom_out());
        assert!(!plotter.can_zoom_in());
        // [2.5, 7.5] normalizes to [2, 8] with 6 ticks
        assert_close(plotter.current_settings().min_x, 2.0);
        assert_close(plotter.current_settings().max_x, 8.0);
        assert_eq!(plotter.current_settings().num_x_ticks, 6);

        plotter.zoom_out();
        assert_eq!(plotter.current_settings(), &PlotSettings::default());
        assert!(plotter.can_zoom_in());

        plotter.zoom_in();
        assert_close(plotter.current_settings().min_x, 2.0);
    }

    #[test]
    fn test_zoom_to_discards_redo_tail() {
        let mut plotter = Plotter::new();
        plotter.zoom_to_pixel_window((100.0, 100.0), 25.0, 75.0, 25.0, 75.0);
        plotter.zoom_out();
        // zooming somewhere else must drop the old deeper window
        plotter.zoom_to_pixel_window((100.0, 100.0), 0.0, 50.0, 0.0, 50.0);
        assert!(!plotter.can_zoom_in());
        assert_close(plotter.current_settings().min_x, 0.0);
        assert_close(plotter.current_settings().max_x, 5.0);
    }

    #[test]
    fn test_set_plot_settings_resets_the_stack() {
        let mut plotter = Plotter::new();
        plotter.zoom_to_pixel_window((100.0, 100.0), 25.0, 75.0, 25.0, 75.0);
        plotter.set_plot_settings(PlotSettings::default());
        assert!(!plotter.can_zoom_in());
        assert!(!plotter.can_zoom_out());
        assert_eq!(plotter.current_settings(), &PlotSettings::default());
    }

    #[test]
    fn test_append_inside_window_does_not_scroll() {
        let mut plotter = Plotter::new();
        plotter.add_curve_point(0, [1.0, 5.0]);
        plotter.add_curve_point(0, [2.0, 5.0]);
        assert_eq!(plotter.current_settings(), &PlotSettings::default());
    }

    #[test]
    fn test_append_past_right_edge_scrolls_all_containing_levels() {
        let mut plotter = Plotter::new();
        plotter.zoom_to(PlotSettings {
            min_x: 8.0,
            max_x: 10.0,
            num_x_ticks: 4,
            ..Default::default()
        });

        plotter.add_curve_point(0, [9.5, 5.0]);
        plotter.add_curve_point(0, [10.5, 5.0]);

        // base window: tick step 2, scrolled by one tick
        assert_close(plotter.zoom_stack[0].min_x, 2.0);
        assert_close(plotter.zoom_stack[0].max_x, 12.0);
        // zoomed window: tick step 0.5, scrolled by two ticks
        assert_close(plotter.zoom_stack[1].min_x, 9.0);
        assert_close(plotter.zoom_stack[1].max_x, 11.0);
    }

    #[test]
    fn test_append_outside_outermost_level_scrolls_nothing() {
        let mut plotter = Plotter::new();
        plotter.add_curve_point(0, [15.0, 5.0]);
        plotter.add_curve_point(0, [16.0, 5.0]);
        assert_eq!(plotter.current_settings(), &PlotSettings::default());
    }

    #[test]
    fn test_point_bookkeeping() {
        let mut plotter = Plotter::new();
        plotter.set_curve_data(0, vec![[0.0, 0.0], [1.0, 1.0]]);
        plotter.add_curve_point(1, [0.0, 0.0]);
        assert_eq!(plotter.point_count(), 3);
        plotter.clear_curve(0);
        assert_eq!(plotter.point_count(), 1);
        plotter.clear_all_curves();
        assert_eq!(plotter.point_count(), 0);
    }
}
