use eframe::egui::{self, RichText, ScrollArea, Ui};

use eco_impact::data::model::Dimension;
use eco_impact::state::{DashboardState, FilterEvent, Page};

// ---------------------------------------------------------------------------
// Left side panel – menu and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel. Filter changes are returned, not applied, so the
/// caller can recompute once per frame.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) -> Vec<FilterEvent> {
    let mut events = Vec::new();

    ui.heading("Menu");
    for page in Page::ALL {
        if ui
            .selectable_label(state.page == page, page.title())
            .clicked()
        {
            state.page = page;
        }
    }
    ui.separator();

    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                filter_section(ui, state, dim, &mut events);
            }
        });

    events
}

fn filter_section(
    ui: &mut Ui,
    state: &DashboardState,
    dim: Dimension,
    events: &mut Vec<FilterEvent>,
) {
    let all_values = state.dataset.distinct(dim);

    // Show count of selected / total in the header
    let header_text = format!(
        "{}  ({}/{})",
        dim.label(),
        state.filters.selected_count(dim),
        all_values.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dim.column())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    events.push(FilterEvent::SelectAll(dim));
                }
                if ui.small_button("None").clicked() {
                    events.push(FilterEvent::SelectNone(dim));
                }
            });

            for val in all_values {
                let mut checked = state.filters.is_selected(dim, &val);
                let mut text = RichText::new(state.display_value(dim, &val));
                if dim == Dimension::Company {
                    text = text.color(state.company_colors.color_for(&val));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    events.push(FilterEvent::Toggle(dim, val));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: source, record counts and the label toggle.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("🌱 Environmental Impact").strong());
        ui.separator();

        ui.label(format!(
            "{}: {} records loaded, {} visible",
            state.source,
            state.dataset.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.translate_labels, "Portuguese product labels")
            .clicked()
        {
            state.translate_labels = !state.translate_labels;
        }
    });
}
