// src/ui/panel.rs
//! Overlay panels
//!
//! The parameter table mirrors [`ParameterSnapshot`]: one row per
//! [`BodyField`], one column per sphere. Clicking the visibility row flips it;
//! clicking any other cell turns it into a text field committed with Enter.

use imgui::{Condition, TableFlags, WindowFlags};

use crate::edit::{BodyField, EditSurface, ParameterSnapshot};

/// One sphere column of the table
#[derive(Debug, Clone, Copy)]
pub struct PanelColumn<'a> {
    pub body_index: usize,
    pub name: &'a str,
    pub hidden: bool,
}

const OVERLAY_FLAGS: WindowFlags = WindowFlags::NO_DECORATION
    .union(WindowFlags::ALWAYS_AUTO_RESIZE)
    .union(WindowFlags::NO_MOVE)
    .union(WindowFlags::NO_SAVED_SETTINGS)
    .union(WindowFlags::NO_FOCUS_ON_APPEARING)
    .union(WindowFlags::NO_NAV);

/// "Press [P] to pause" in the bottom-left corner
pub fn hint_overlay(ui: &imgui::Ui) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("##hint")
        .position([20.0, display_size[1] - 50.0], Condition::Always)
        .bg_alpha(0.35)
        .flags(OVERLAY_FLAGS | WindowFlags::NO_INPUTS)
        .build(|| {
            ui.text("Press [P] to pause");
        });
}

/// Key bindings shown while paused
pub fn instructions(ui: &imgui::Ui) {
    ui.window("##instructions")
        .position([20.0, 20.0], Condition::Always)
        .bg_alpha(0.35)
        .flags(OVERLAY_FLAGS | WindowFlags::NO_INPUTS)
        .build(|| {
            ui.text("Press [P] to unpause");
            ui.text("Use [W][A][S][D] to move");
            ui.text("Use the mouse to look around while running");
            ui.text("Press [Esc] to quit");
            ui.text("Click on the chart to edit values");
        });
}

/// The editable 6 x 11 parameter table
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `snapshot` - Formatted values of the current frame
/// * `columns` - Spheres in snapshot column order
/// * `surface` - Selection, text buffer and pending edit
pub fn parameter_table(
    ui: &imgui::Ui,
    snapshot: &ParameterSnapshot,
    columns: &[PanelColumn<'_>],
    surface: &mut EditSurface,
) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Parameters")
        .position([20.0, 180.0], Condition::FirstUseEver)
        .always_auto_resize(true)
        .collapsible(false)
        .build(|| {
            let Some(_table) = ui.begin_table_with_flags(
                "parameter_table",
                columns.len() + 1,
                TableFlags::BORDERS | TableFlags::ROW_BG | TableFlags::SIZING_FIXED_FIT,
            ) else {
                return;
            };

            ui.table_setup_column("");
            for column in columns {
                ui.table_setup_column(column.name);
            }
            ui.table_headers_row();

            for field in BodyField::ALL {
                ui.table_next_row();
                ui.table_next_column();
                ui.text(field.label());

                for (column_index, column) in columns.iter().enumerate() {
                    ui.table_next_column();
                    let text = snapshot.cell(field, column_index).unwrap_or("-");
                    render_cell(ui, field, column_index, column, text, surface);
                }
            }
        });
}

fn render_cell(
    ui: &imgui::Ui,
    field: BodyField,
    column_index: usize,
    column: &PanelColumn<'_>,
    text: &str,
    surface: &mut EditSurface,
) {
    let selected = surface.is_selected(column.body_index, field);

    if selected && !field.is_toggle() {
        if surface.take_focus_request() {
            ui.set_keyboard_focus_here();
        }
        ui.set_next_item_width(90.0);

        let label = format!("##edit_{}_{}", field.row(), column_index);
        if ui
            .input_text(&label, surface.buffer_mut())
            .enter_returns_true(true)
            .build()
        {
            if let Err(err) = surface.commit() {
                log::warn!("edit discarded: {}", err);
            }
        }
        return;
    }

    let label = format!("{}##cell_{}_{}", text, field.row(), column_index);
    if ui
        .selectable_config(&label)
        .selected(selected)
        .allow_double_click(false)
        .size([90.0, 0.0])
        .build()
    {
        if field.is_toggle() {
            surface.toggle_hidden(column.body_index, column.hidden);
        } else {
            surface.select(column.body_index, field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SimulationConfig, physics::SimulationState};

    // ImGui allows a single live context per process, so every panel is
    // exercised from this one test.
    #[test]
    fn test_panels_build_headless() {
        let state = SimulationState::from_config(&SimulationConfig::default()).unwrap();
        let snapshot = ParameterSnapshot::capture(&state);
        let columns: Vec<PanelColumn<'_>> = state
            .bodies()
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_sphere())
            .map(|(body_index, body)| PanelColumn {
                body_index,
                name: &body.name,
                hidden: body.hidden,
            })
            .collect();

        let mut surface = EditSurface::new();
        surface.select(1, BodyField::Radius);

        let mut context = imgui::Context::create();
        context.set_ini_filename(None);
        context.io_mut().display_size = [1000.0, 800.0];
        context.fonts().build_rgba32_texture();

        for _ in 0..2 {
            let ui = context.new_frame();
            hint_overlay(ui);
            instructions(ui);
            parameter_table(ui, &snapshot, &columns, &mut surface);
            context.render();
        }

        assert!(surface.pending().is_none());
        assert_eq!(surface.selected_field(), Some(BodyField::Radius));
    }
}
