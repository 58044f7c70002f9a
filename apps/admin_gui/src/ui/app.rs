use std::time::Duration;

use client_core::{AdminPanel, NoticeSeverity};
use eframe::egui;
use tokio::runtime::Runtime;

use super::{forms, project_list};

pub struct AdminConsoleApp {
    panel: AdminPanel,
    // Owns the worker threads the panel spawns its requests onto.
    _runtime: Runtime,
    api_base_url: String,
}

impl AdminConsoleApp {
    pub fn new(panel: AdminPanel, runtime: Runtime, api_base_url: String) -> Self {
        Self {
            panel,
            _runtime: runtime,
            api_base_url,
        }
    }

    fn show_top_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("admin_top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Admin Panel");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(&self.api_base_url);
                        if !self.panel.is_idle() {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.panel.current_notice() else {
            return;
        };
        let message = notice.message;
        let color = match notice.severity {
            NoticeSeverity::Success => egui::Color32::from_rgb(76, 175, 80),
            NoticeSeverity::Failure => egui::Color32::from_rgb(229, 57, 53),
        };

        let mut acknowledged = false;
        egui::Modal::new(egui::Id::new("admin_notice")).show(ctx, |ui| {
            ui.set_min_width(260.0);
            ui.label(egui::RichText::new(message).color(color));
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });
        if acknowledged {
            self.panel.acknowledge_notice();
        }
    }

    fn show_forms(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("admin_forms_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    forms::show_project_form(ui, &mut self.panel);
                    ui.add_space(12.0);
                    ui.separator();
                    forms::show_task_form(ui, &mut self.panel);
                });
            });
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(self.panel.search_term_mut())
                    .hint_text("Search tasks...")
                    .desired_width(280.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Search").clicked() || submitted {
                self.panel.submit_search();
            }
            if self.panel.is_searching() && ui.button("Show All Tasks").clicked() {
                self.panel.show_all_tasks();
            }
        });
    }

    fn show_projects(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_search_bar(ui);
            ui.separator();
            ui.heading("Projects");

            let action = egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    project_list::show_project_list(ui, &self.panel.project_list())
                })
                .inner;
            if let Some(action) = action {
                self.panel.dispatch(action);
            }
        });
    }
}

impl eframe::App for AdminConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.panel.process_pending_events();

        self.show_top_bar(ctx);
        self.show_forms(ctx);
        self.show_projects(ctx);
        self.show_notice(ctx);

        if self.panel.is_idle() {
            ctx.request_repaint_after(Duration::from_millis(250));
        } else {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}
