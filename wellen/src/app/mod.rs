mod components;
pub mod config;
mod events;

pub use self::components::{PlotSettings, Plotter};

use self::components::Feed;
use crate::app::events::{BurstRequested, ClearCurves, EventQueue};
use crate::BackendAppState;
use app_core::backend::BackendRequest;
use config::Config;

use std::{sync::mpsc::Sender, thread::JoinHandle};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    feed: Feed,
    plotter: Plotter,
    request_tx: DynRequestSender,
    shortcuts_modal_open: bool,
    event_queue: EventQueue<Self>,
    request_redraw: Option<()>,
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: DynRequestSender,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let feed = Feed::new(&config);
        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            feed,
            plotter: Plotter::new(),
            request_tx,
            shortcuts_modal_open: false,
            event_queue: EventQueue::<Self>::new(),
            request_redraw: None,
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    fn update_state(&mut self, ctx: &egui::Context) {
        self.run_events();
        if self.feed.try_update(&mut self.plotter) {
            self.request_redraw();
        }
        if self.feed.live_enabled {
            if self.feed.tick_due() {
                self.feed.request_live_point(&mut self.request_tx);
            }
            // keep frames coming while the live feed runs
            ctx.request_repaint_after(self.feed.interval());
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }

        self.update_state(ctx);

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Toggle live feed.
            if i.key_pressed(egui::Key::F2) {
                self.feed.toggle_live();
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                // Quitting cannot be requested from within here, the UI stops,
                // but not the backend thread.
                should_quit = true;
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui, ctx);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        self.feed.render(&self.plotter, &mut self.event_queue, ui);
        self.plotter.render(ui, ctx);
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Curve", |ui| {
                if ui.button("Generate Burst").clicked() {
                    log::debug!("burst requested from menu");
                    self.event_queue.queue_event(Box::new(BurstRequested::new()));
                }
                ui.checkbox(&mut self.feed.live_enabled, "Live Feed");
                if ui.button("Clear Curves").clicked() {
                    self.event_queue.queue_event(Box::new(ClearCurves::new()));
                }
                if ui.button("Reset View").clicked() {
                    self.plotter.set_plot_settings(PlotSettings::default());
                }
            });

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F2 = Toggle Live Feed");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("Click Plot = Give It Keyboard Focus");
                    ui.separator();
                    ui.label("Arrow Keys = Scroll Plot By One Tick");
                    ui.separator();
                    ui.label("+ / - = Zoom In / Out");
                    ui.separator();
                    ui.label("Left Drag = Rubber-Band Zoom");
                    ui.separator();
                    ui.label("Mouse Wheel = Scroll Plot");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}
