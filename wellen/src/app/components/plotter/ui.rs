use egui::{vec2, Color32, CursorIcon, FontId, Key, PointerButton, Pos2, Rect, Sense, Shape, Vec2};

use super::Plotter;

/// Free space around the plot area, shared with the tick labels.
const MARGIN: f32 = 50.0;
/// Selections smaller than this in either dimension are discarded.
const MIN_RUBBER_BAND: f32 = 4.0;
/// Scroll points that make up one tick of wheel scrolling.
const WHEEL_TICK: f32 = 50.0;
const TICK_MARK_LEN: f32 = 5.0;
const LABEL_GAP: f32 = 5.0;
const ZOOM_BUTTON_SIZE: f32 = 22.0;

/// Grid and curve shapes of the last repaint, valid for one widget
/// rectangle and data/view revision.
pub(super) struct ShapeCache {
    rect: Rect,
    revision: u64,
    grid: Vec<Shape>,
    curves: Vec<Shape>,
}

impl Plotter {
    pub fn render(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let size = ui
            .available_size()
            .max(vec2(6.0 * MARGIN, 4.0 * MARGIN));
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let widget_rect = response.rect;
        let plot_rect = widget_rect.shrink(MARGIN);
        if plot_rect.width() < 1.0 || plot_rect.height() < 1.0 {
            return;
        }

        if response.clicked() {
            response.request_focus();
        }
        self.handle_keys(ui, &response);
        self.handle_wheel(ui, &response);
        self.handle_rubber_band(ctx, &response, plot_rect);

        painter.rect_filled(widget_rect, 0.0, ui.visuals().extreme_bg_color);
        self.refresh_shapes(&painter, widget_rect, plot_rect, ui.visuals());
        if let Some(cache) = &self.shape_cache {
            painter.extend(cache.grid.iter().cloned());
            painter
                .with_clip_rect(plot_rect.shrink(1.0))
                .extend(cache.curves.iter().cloned());
        }

        if let Some((origin, current)) = self.rubber_band {
            let band = Rect::from_two_pos(origin, current);
            painter.rect_stroke(band, 0.0, ui.visuals().widgets.active.fg_stroke);
        }
        if response.has_focus() {
            painter.rect_stroke(widget_rect.shrink(1.0), 0.0, ui.visuals().selection.stroke);
        }

        self.zoom_buttons(ui, widget_rect);
    }

    fn handle_keys(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if !response.has_focus() {
            return;
        }
        // arrow keys scroll the plot and must not move egui focus away
        ui.memory_mut(|mem| {
            mem.set_focus_lock_filter(
                response.id,
                egui::EventFilter {
                    horizontal_arrows: true,
                    vertical_arrows: true,
                    ..Default::default()
                },
            )
        });
        let (mut dx, mut dy, mut zoom) = (0, 0, 0);
        ui.input(|i| {
            if i.key_pressed(Key::ArrowLeft) {
                dx -= 1;
            }
            if i.key_pressed(Key::ArrowRight) {
                dx += 1;
            }
            if i.key_pressed(Key::ArrowDown) {
                dy -= 1;
            }
            if i.key_pressed(Key::ArrowUp) {
                dy += 1;
            }
            if i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals) {
                zoom += 1;
            }
            if i.key_pressed(Key::Minus) {
                zoom -= 1;
            }
        });
        if dx != 0 || dy != 0 {
            self.settings_mut().scroll_ticks(dx, dy);
        }
        if zoom > 0 {
            self.zoom_in();
        }
        if zoom < 0 {
            self.zoom_out();
        }
    }

    fn handle_wheel(&mut self, ui: &egui::Ui, response: &egui::Response) {
        if !response.hovered() {
            self.wheel_residual = Vec2::ZERO;
            return;
        }
        let delta = ui.input(|i| i.raw_scroll_delta);
        if delta == Vec2::ZERO {
            return;
        }
        // accumulate smooth scroll input until it amounts to whole ticks
        self.wheel_residual += delta;
        let ticks_x = (self.wheel_residual.x / WHEEL_TICK).trunc() as i32;
        let ticks_y = (self.wheel_residual.y / WHEEL_TICK).trunc() as i32;
        if ticks_x != 0 || ticks_y != 0 {
            self.wheel_residual -= vec2(ticks_x as f32, ticks_y as f32) * WHEEL_TICK;
            self.settings_mut().scroll_ticks(ticks_x, ticks_y);
        }
    }

    fn handle_rubber_band(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        plot_rect: Rect,
    ) {
        if response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                if plot_rect.contains(pos) {
                    self.rubber_band = Some((pos, pos));
                }
            }
        }
        if self.rubber_band.is_some() {
            ctx.set_cursor_icon(CursorIcon::Crosshair);
        }
        if response.dragged_by(PointerButton::Primary) {
            if let (Some((_, current)), Some(pos)) =
                (self.rubber_band.as_mut(), response.interact_pointer_pos())
            {
                *current = pos;
            }
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            if let Some((origin, current)) = self.rubber_band.take() {
                let band = Rect::from_two_pos(origin, current);
                if band.width() < MIN_RUBBER_BAND || band.height() < MIN_RUBBER_BAND {
                    return;
                }
                self.zoom_to_pixel_window(
                    (plot_rect.width() as f64, plot_rect.height() as f64),
                    (band.left() - plot_rect.left()) as f64,
                    (band.right() - plot_rect.left()) as f64,
                    (band.top() - plot_rect.top()) as f64,
                    (band.bottom() - plot_rect.top()) as f64,
                );
            }
        }
    }

    fn refresh_shapes(
        &mut self,
        painter: &egui::Painter,
        widget_rect: Rect,
        plot_rect: Rect,
        visuals: &egui::Visuals,
    ) {
        let up_to_date = self
            .shape_cache
            .as_ref()
            .is_some_and(|cache| cache.rect == widget_rect && cache.revision == self.revision);
        if up_to_date {
            return;
        }
        log::trace!("rebuilding plot shapes");
        let mut cache = ShapeCache {
            rect: widget_rect,
            revision: self.revision,
            grid: Vec::new(),
            curves: Vec::new(),
        };
        self.build_grid(&mut cache, painter, plot_rect, visuals);
        self.build_curves(&mut cache, plot_rect);
        self.shape_cache = Some(cache);
    }

    fn build_grid(
        &self,
        cache: &mut ShapeCache,
        painter: &egui::Painter,
        plot_rect: Rect,
        visuals: &egui::Visuals,
    ) {
        let settings = self.current_settings();
        if settings.span_x() <= 0.0 || settings.span_y() <= 0.0 {
            return;
        }

        let quiet = visuals.widgets.noninteractive.bg_stroke;
        let strong = egui::Stroke::new(1.0, visuals.text_color());
        let font = FontId::proportional(10.0);

        for i in 0..=settings.num_x_ticks {
            let frac = i as f32 / settings.num_x_ticks as f32;
            let x = egui::lerp(plot_rect.left()..=plot_rect.right(), frac);
            let label = settings.min_x + i as f64 * settings.span_x() / settings.num_x_ticks as f64;

            cache.grid.push(Shape::line_segment(
                [
                    Pos2::new(x, plot_rect.top()),
                    Pos2::new(x, plot_rect.bottom()),
                ],
                quiet,
            ));
            cache.grid.push(Shape::line_segment(
                [
                    Pos2::new(x, plot_rect.bottom()),
                    Pos2::new(x, plot_rect.bottom() + TICK_MARK_LEN),
                ],
                strong,
            ));
            let galley = painter.layout_no_wrap(format_tick(label), font.clone(), strong.color);
            let pos = Pos2::new(
                x - galley.size().x / 2.0,
                plot_rect.bottom() + TICK_MARK_LEN + LABEL_GAP,
            );
            cache.grid.push(Shape::galley(pos, galley, strong.color));
        }

        for j in 0..=settings.num_y_ticks {
            let frac = j as f32 / settings.num_y_ticks as f32;
            let y = egui::lerp(plot_rect.bottom()..=plot_rect.top(), frac);
            let label = settings.min_y + j as f64 * settings.span_y() / settings.num_y_ticks as f64;

            cache.grid.push(Shape::line_segment(
                [
                    Pos2::new(plot_rect.left(), y),
                    Pos2::new(plot_rect.right(), y),
                ],
                quiet,
            ));
            cache.grid.push(Shape::line_segment(
                [
                    Pos2::new(plot_rect.left() - TICK_MARK_LEN, y),
                    Pos2::new(plot_rect.left(), y),
                ],
                strong,
            ));
            let galley = painter.layout_no_wrap(format_tick(label), font.clone(), strong.color);
            let pos = Pos2::new(
                plot_rect.left() - TICK_MARK_LEN - LABEL_GAP - galley.size().x,
                y - galley.size().y / 2.0,
            );
            cache.grid.push(Shape::galley(pos, galley, strong.color));
        }

        cache.grid.push(Shape::rect_stroke(plot_rect, 0.0, strong));
    }

    fn build_curves(&self, cache: &mut ShapeCache, plot_rect: Rect) {
        let settings = self.current_settings();
        if settings.span_x() <= 0.0 || settings.span_y() <= 0.0 {
            return;
        }

        for (id, points) in &self.curves {
            let stroke = egui::Stroke::new(1.0, auto_color(*id as i32));
            let polyline: Vec<Pos2> = points
                .iter()
                .map(|&[x, y]| {
                    let frac_x = ((x - settings.min_x) / settings.span_x()) as f32;
                    let frac_y = ((y - settings.min_y) / settings.span_y()) as f32;
                    Pos2::new(
                        plot_rect.left() + frac_x * (plot_rect.width() - 1.0),
                        plot_rect.bottom() - frac_y * (plot_rect.height() - 1.0),
                    )
                })
                .collect();
            if polyline.len() >= 2 {
                cache.curves.push(Shape::line(polyline, stroke));
            } else if let Some(&pos) = polyline.first() {
                // a single point has no line to show yet
                cache.curves.push(Shape::circle_filled(pos, 1.5, stroke.color));
            }
        }
    }

    fn zoom_buttons(&mut self, ui: &mut egui::Ui, widget_rect: Rect) {
        let size = vec2(ZOOM_BUTTON_SIZE, ZOOM_BUTTON_SIZE);
        let out_corner = widget_rect.right_top() + vec2(-(size.x + 5.0), 5.0);
        let in_corner = out_corner - vec2(size.x + 5.0, 0.0);
        if self.can_zoom_in()
            && ui
                .put(Rect::from_min_size(in_corner, size), egui::Button::new("+"))
                .clicked()
        {
            self.zoom_in();
        }
        if self.can_zoom_out()
            && ui
                .put(Rect::from_min_size(out_corner, size), egui::Button::new("−"))
                .clicked()
        {
            self.zoom_out();
        }
    }
}

fn format_tick(value: f64) -> String {
    // shortest f64 formatting, with float dust and negative zero flattened
    let rounded = (value * 1e9).round() / 1e9;
    format!("{}", if rounded == 0.0 { 0.0 } else { rounded })
}

fn auto_color(color_idx: i32) -> Color32 {
    // analog to egui_plot
    let golden_ratio = (5.0_f32.sqrt() - 1.0) / 2.0; // 0.61803398875
    let h = color_idx as f32 * golden_ratio;
    egui::epaint::Hsva::new(h, 0.85, 0.5, 1.0).into()
}

#[cfg(test)]
mod tests {
    use super::format_tick;

    #[test]
    fn test_format_tick_is_short() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.1 + 0.2), "0.3");
    }
}
