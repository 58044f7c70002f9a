use client_core::{ListAction, ProjectCard, ProjectListView, TaskRow};
use eframe::egui;

/// Draws the nested project list. The pressed button, if any, is returned so
/// the caller can dispatch it once the view no longer borrows the panel.
pub fn show_project_list(ui: &mut egui::Ui, view: &ProjectListView<'_>) -> Option<ListAction> {
    let cards = match view {
        ProjectListView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
            return None;
        }
        ProjectListView::Ready(cards) => cards,
    };

    let mut action = None;
    for card in cards {
        if let Some(pressed) = show_card(ui, card) {
            action = Some(pressed);
        }
        ui.add_space(8.0);
    }
    action
}

fn show_card(ui: &mut egui::Ui, card: &ProjectCard<'_>) -> Option<ListAction> {
    let project = card.project;
    let mut action = None;

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.strong(&project.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Delete").clicked() {
                    action = Some(ListAction::DeleteProject(project.id));
                }
                if ui.button("Edit").clicked() {
                    action = Some(ListAction::EditProject(project.clone()));
                }
            });
        });
        ui.label(&project.description);
        ui.label(format!("Start Date: {}", project.start_date));
        ui.label(format!("End Date: {}", project.end_date));
        ui.label(format!("Owner: {}", card.owner_label()));

        ui.separator();
        ui.label(egui::RichText::new("Tasks").strong());
        if card.tasks.is_empty() {
            ui.weak("No tasks for this project");
        }
        for row in &card.tasks {
            if let Some(pressed) = show_task_row(ui, row) {
                action = Some(pressed);
            }
        }
    });
    action
}

fn show_task_row(ui: &mut egui::Ui, row: &TaskRow<'_>) -> Option<ListAction> {
    let task = row.task;
    let mut action = None;

    ui.indent(("task", task.id.0), |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&task.title).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Delete").clicked() {
                    action = Some(ListAction::DeleteTask(task.id));
                }
                if ui.small_button("Edit").clicked() {
                    action = Some(ListAction::EditTask(task.clone()));
                }
            });
        });
        ui.label(&task.description);
        ui.label(format!("Due Date: {}", task.due_date));
        ui.label(format!("Priority: {}", task.priority));
        ui.label(format!("Assigned To: {}", row.assignee));
        ui.label(format!("Status: {}", task.task_status));
    });
    action
}
