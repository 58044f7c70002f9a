//! Project and task editors bound directly to the panel drafts.

use client_core::AdminPanel;
use eframe::egui;
use shared::domain::{Priority, TaskStatus};

/// `(value, label)` pairs for a select box; the value is what the draft stores.
pub type SelectOptions = Vec<(String, String)>;

/// Label shown for the draft's current value, or the placeholder when the
/// value matches no option.
pub fn selected_label<'a>(
    options: &'a [(String, String)],
    value: &str,
    placeholder: &'a str,
) -> &'a str {
    options
        .iter()
        .find(|(option, _)| option == value)
        .map(|(_, label)| label.as_str())
        .unwrap_or(placeholder)
}

fn user_options(panel: &AdminPanel) -> SelectOptions {
    panel
        .users()
        .iter()
        .map(|user| (user.id.to_string(), user.name.clone()))
        .collect()
}

fn project_options(panel: &AdminPanel) -> SelectOptions {
    panel
        .projects()
        .iter()
        .map(|project| (project.id.to_string(), project.title.clone()))
        .collect()
}

fn select(
    ui: &mut egui::Ui,
    id: &'static str,
    value: &mut String,
    options: &[(String, String)],
    placeholder: &str,
) {
    let selected = selected_label(options, value, placeholder).to_string();
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), placeholder);
            for (option, label) in options {
                ui.selectable_value(value, option.clone(), label);
            }
        });
}

fn text_field(ui: &mut egui::Ui, value: &mut String, hint: &str) {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
}

fn text_area(ui: &mut egui::Ui, value: &mut String, hint: &str) {
    ui.add(
        egui::TextEdit::multiline(value)
            .hint_text(hint)
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
}

fn submit_button(ui: &mut egui::Ui, label: &str, missing: &[&'static str]) -> bool {
    let response = ui.add_enabled(missing.is_empty(), egui::Button::new(label));
    response
        .on_disabled_hover_text(format!("Required: {}", missing.join(", ")))
        .clicked()
}

pub fn show_project_form(ui: &mut egui::Ui, panel: &mut AdminPanel) {
    ui.heading(panel.project_form_heading());
    let owners = user_options(panel);
    let submit_label = panel.project_submit_label();
    let editing = panel.editing_project_id().is_some();

    let draft = panel.project_draft_mut();
    text_field(ui, &mut draft.title, "Project Title");
    text_area(ui, &mut draft.description, "Project Description");
    text_field(ui, &mut draft.start_date, "Start Date (YYYY-MM-DD)");
    text_field(ui, &mut draft.end_date, "End Date (YYYY-MM-DD)");
    select(ui, "project_owner", &mut draft.owner, &owners, "Select Owner");
    let missing = draft.missing_required();

    ui.horizontal(|ui| {
        if submit_button(ui, submit_label, &missing) {
            panel.submit_project();
        }
        if editing && ui.button("Cancel").clicked() {
            panel.cancel_project_edit();
        }
    });
}

pub fn show_task_form(ui: &mut egui::Ui, panel: &mut AdminPanel) {
    ui.heading(panel.task_form_heading());
    let employees = user_options(panel);
    let projects = project_options(panel);
    let submit_label = panel.task_submit_label();
    let editing = panel.editing_task_id().is_some();

    let draft = panel.task_draft_mut();
    text_field(ui, &mut draft.title, "Task Title");
    text_area(ui, &mut draft.description, "Task Description");
    text_field(ui, &mut draft.due_date, "Due Date (YYYY-MM-DD)");
    egui::ComboBox::from_id_salt("task_priority")
        .selected_text(draft.priority.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for priority in Priority::ALL {
                ui.selectable_value(&mut draft.priority, priority, priority.label());
            }
        });
    select(
        ui,
        "task_employee",
        &mut draft.employee_id,
        &employees,
        "Assign to Employee",
    );
    egui::ComboBox::from_id_salt("task_status")
        .selected_text(draft.task_status.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for status in TaskStatus::ALL {
                ui.selectable_value(&mut draft.task_status, status, status.label());
            }
        });
    select(
        ui,
        "task_project",
        &mut draft.project_id,
        &projects,
        "Select Project",
    );
    let missing = draft.missing_required();

    ui.horizontal(|ui| {
        if submit_button(ui, submit_label, &missing) {
            panel.submit_task();
        }
        if editing && ui.button("Cancel").clicked() {
            panel.cancel_task_edit();
        }
    });
}
