use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use eco_impact::data::snapshot::Kpis;
use eco_impact::format;
use eco_impact::state::DashboardState;

/// Three metric cards side by side.
pub fn kpi_cards(ui: &mut Ui, kpis: &Kpis) {
    let cards = [
        ("🌫 Total emissions (CO₂)", format::emissions(kpis.total_emissions)),
        ("💧 Mean water consumption", format::water(kpis.mean_water)),
        ("💵 Total revenue", format::revenue(kpis.total_revenue)),
    ];
    ui.columns(cards.len(), |cols| {
        for (col, (title, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(title);
                ui.label(RichText::new(value).heading().strong());
            });
        }
    });
}

/// Per-company emissions and revenue of the visible records.
pub fn company_table(ui: &mut Ui, state: &DashboardState) {
    ui.label(RichText::new("Per company").strong());

    ui.push_id("company_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(120.0))
            .columns(Column::remainder(), 3)
            .header(20.0, |mut header| {
                for title in ["Company", "Emissions (kg)", "Revenue (US$)", "kg per US$ 1,000"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for totals in &state.snapshot.companies {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(&totals.company);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format::thousands(totals.emissions, 0));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format::thousands(totals.revenue, 2));
                        });
                        row.col(|ui: &mut Ui| {
                            let intensity = (totals.revenue > 0.0)
                                .then(|| totals.emissions / totals.revenue * 1000.0);
                            ui.label(match intensity {
                                Some(v) => format::thousands(v, 2),
                                None => format::NO_DATA.to_string(),
                            });
                        });
                    });
                }
            });
    });
}
