use crate::app::{
    components::Plotter,
    events::{BurstRequested, ClearCurves, EventQueue},
    EguiApp,
};

impl super::Feed {
    pub fn render(
        &mut self,
        plotter: &Plotter,
        event_queue: &mut EventQueue<EguiApp>,
        ui: &mut egui::Ui,
    ) {
        ui.horizontal(|ui| {
            if ui
                .button("Burst")
                .on_hover_text("replace the burst curve with freshly generated points")
                .clicked()
            {
                event_queue.queue_event(Box::new(BurstRequested::new()));
            }
            ui.toggle_value(&mut self.live_enabled, "Live")
                .on_hover_text("append one point per interval (F2)");
            if ui.button("Clear").clicked() {
                event_queue.queue_event(Box::new(ClearCurves::new()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{} points", plotter.point_count()));
            });
        });
    }
}
