use eframe::egui;

use eco_impact::state::DashboardState;

use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EcoImpactApp {
    pub state: DashboardState,
}

impl EcoImpactApp {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl eframe::App for EcoImpactApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: menu + filters ----
        let events = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &mut self.state))
            .inner;

        // Recompute before the central panel reads the snapshot.
        self.state.apply(events);

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            crate::ui::page(ui, &self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Startup failure window
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the dataset cannot be loaded.
pub struct LoadErrorApp {
    lines: Vec<String>,
}

impl LoadErrorApp {
    pub fn new(err: &anyhow::Error) -> Self {
        Self {
            lines: error_lines(err),
        }
    }
}

impl eframe::App for LoadErrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Could not load the production data");
            ui.add_space(8.0);
            for line in &self.lines {
                ui.monospace(line);
            }
            ui.add_space(12.0);
            if ui.button("Close").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }
}

/// Outermost context first, root cause last.
fn error_lines(err: &anyhow::Error) -> Vec<String> {
    err.chain().map(|cause| cause.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use eco_impact::data::error::DataError;

    #[test]
    fn error_window_lists_whole_chain() {
        let err = anyhow::Error::new(DataError::MissingColumn("Company".into()))
            .context("loading dataBase.csv");
        let lines = error_lines(&err);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "loading dataBase.csv");
        assert!(lines[1].contains("Company"));
    }
}
