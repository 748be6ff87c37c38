pub mod charts;
pub mod metrics;
pub mod panels;

use eframe::egui::{ScrollArea, Ui};

use eco_impact::data::model::Metric;
use eco_impact::state::{DashboardState, Page};

/// Render the selected page in the central panel.
pub fn page(ui: &mut Ui, state: &DashboardState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.page {
            Page::Home => home(ui, state),
            Page::Charts => charts_page(ui, state),
        });
}

fn home(ui: &mut Ui, state: &DashboardState) {
    ui.heading("🌍 Environmental impact overview");
    metrics::kpi_cards(ui, &state.snapshot.kpis);
    ui.separator();

    ui.heading("📊 Charts");
    if empty_notice(ui, state) {
        return;
    }
    product_bar_pair(ui, state);

    ui.columns(3, |cols| {
        charts::emissions_over_time(&mut cols[0], &state.snapshot.emissions_by_year);
        charts::product_donut(&mut cols[1], state);
        charts::company_scatter(&mut cols[2], state);
    });
    ui.separator();
    metrics::company_table(ui, state);
}

fn charts_page(ui: &mut Ui, state: &DashboardState) {
    ui.heading("📊 Charts");
    if empty_notice(ui, state) {
        return;
    }
    product_bar_pair(ui, state);
    charts::emissions_over_time(ui, &state.snapshot.emissions_by_year);
}

fn product_bar_pair(ui: &mut Ui, state: &DashboardState) {
    ui.columns(2, |cols| {
        charts::product_bars(
            &mut cols[0],
            state,
            "emissions_by_product",
            "CO₂ emissions by product type",
            Metric::GreenhouseGasEmissions,
            &state.snapshot.emissions_by_product,
        );
        charts::product_bars(
            &mut cols[1],
            state,
            "water_by_product",
            "Water consumption by product type",
            Metric::WaterConsumption,
            &state.snapshot.water_by_product,
        );
    });
}

/// Charts over zero records are replaced by a notice.
fn empty_notice(ui: &mut Ui, state: &DashboardState) -> bool {
    if state.snapshot.is_empty() {
        ui.label("No records match the current filters.");
        true
    } else {
        false
    }
}
