use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotItem, PlotPoints, Points};

use eco_impact::color::ColorMap;
use eco_impact::data::model::{Dimension, DimensionValue, Metric};
use eco_impact::state::DashboardState;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Stacked bars: metric per product type, one segment per company
// ---------------------------------------------------------------------------

/// Bar chart with product types on the x axis and companies stacked.
pub fn product_bars(
    ui: &mut Ui,
    state: &DashboardState,
    id: &str,
    title: &str,
    metric: Metric,
    data: &BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>>,
) {
    ui.label(RichText::new(title).strong());

    let products: Vec<&DimensionValue> = data.keys().collect();
    let axis_labels: Vec<String> = products
        .iter()
        .map(|p| state.display_value(Dimension::ProductType, p))
        .collect();

    let companies = state.dataset.distinct(Dimension::Company);
    let charts = stacked_charts(&products, &axis_labels, &companies, data, &state.company_colors);

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label(metric.label())
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&axis_labels, mark.value))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// One chart per company stacked in order. Every chart carries a bar at
/// every product position, zero where the company has no value, since
/// `stack_on` pairs segments by index rather than by x.
fn stacked_charts(
    products: &[&DimensionValue],
    axis_labels: &[String],
    companies: &[DimensionValue],
    data: &BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>>,
    colors: &ColorMap,
) -> Vec<BarChart> {
    let mut charts: Vec<BarChart> = Vec::new();
    for company in companies {
        let values: Vec<Option<f64>> = products
            .iter()
            .map(|product| data.get(*product)?.get(company).copied())
            .collect();
        if values.iter().all(Option::is_none) {
            continue;
        }
        let bars: Vec<Bar> = values
            .iter()
            .enumerate()
            .map(|(x, value)| Bar::new(x as f64, value.unwrap_or(0.0)).name(&axis_labels[x]))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(company.to_string())
            .color(colors.color_for(company))
            .width(0.6)
            .stack_on(&below);
        charts.push(chart);
    }
    charts
}

/// Label for an integral x position, blank between categories.
fn category_label(labels: &[String], x: f64) -> String {
    if x < 0.0 || x.fract() != 0.0 {
        return String::new();
    }
    labels.get(x as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Line: emissions over the years
// ---------------------------------------------------------------------------

pub fn emissions_over_time(ui: &mut Ui, series: &[(i32, f64)]) {
    ui.label(RichText::new("Emissions over the years").strong());

    let points: Vec<[f64; 2]> = series.iter().map(|&(y, v)| [y as f64, v]).collect();

    Plot::new("emissions_by_year")
        .height(CHART_HEIGHT)
        .x_axis_label("Production year")
        .y_axis_label(Metric::GreenhouseGasEmissions.label())
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(|mark: GridMark, _range| {
            if mark.value.fract() == 0.0 {
                format!("{}", mark.value as i64)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Emissions")
                    .color(Color32::from_rgb(46, 139, 87))
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(Color32::from_rgb(46, 139, 87)),
            );
        });
}

// ---------------------------------------------------------------------------
// Scatter: emissions vs revenue per company
// ---------------------------------------------------------------------------

pub fn company_scatter(ui: &mut Ui, state: &DashboardState) {
    ui.label(RichText::new("Emissions vs. revenue per company").strong());

    Plot::new("company_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(Metric::SalesRevenue.label())
        .y_axis_label(Metric::GreenhouseGasEmissions.label())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for totals in &state.snapshot.companies {
                let key = DimensionValue::from(totals.company.as_str());
                plot_ui.points(
                    Points::new(vec![[totals.revenue, totals.emissions]])
                        .name(&totals.company)
                        .color(state.company_colors.color_for(&key))
                        .radius(6.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Donut: record count per product type
// ---------------------------------------------------------------------------

/// Radians covered by one polygon of a slice.
const SEGMENT_STEP: f32 = 0.05;

pub fn product_donut(ui: &mut Ui, state: &DashboardState) {
    ui.label(RichText::new("Products").strong());

    let counts = &state.snapshot.product_counts;
    let total: usize = counts.values().sum();
    if total == 0 {
        ui.label("No products to show.");
        return;
    }

    let side = ui.available_width().min(CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = side * 0.45;
    let inner = outer * 0.5;

    let mut start = -FRAC_PI_2;
    for (product, &count) in counts {
        let sweep = count as f32 / total as f32 * TAU;
        let color = state.product_colors.color_for(product);
        for shape in annulus_sector(center, inner, outer, start, start + sweep, color) {
            painter.add(shape);
        }
        start += sweep;
    }

    painter.text(
        center,
        Align2::CENTER_CENTER,
        total.to_string(),
        FontId::proportional(20.0),
        ui.visuals().text_color(),
    );

    for (product, &count) in counts {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(state.product_colors.color_for(product)));
            ui.label(format!(
                "{}: {} ({:.1}%)",
                state.display_value(Dimension::ProductType, product),
                count,
                count as f64 / total as f64 * 100.0
            ));
        });
    }
}

/// Convex quads approximating the ring segment between two angles.
fn annulus_sector(
    center: Pos2,
    inner: f32,
    outer: f32,
    from: f32,
    to: f32,
    color: Color32,
) -> Vec<Shape> {
    let steps = (((to - from) / SEGMENT_STEP).ceil() as usize).max(1);
    let at = |radius: f32, angle: f32| {
        center + egui::vec2(angle.cos(), angle.sin()) * radius
    };
    (0..steps)
        .map(|i| {
            let a0 = from + (to - from) * i as f32 / steps as f32;
            let a1 = from + (to - from) * (i + 1) as f32 / steps as f32;
            Shape::convex_polygon(
                vec![at(outer, a0), at(outer, a1), at(inner, a1), at(inner, a0)],
                color,
                Stroke::NONE,
            )
        })
        .collect()
}
