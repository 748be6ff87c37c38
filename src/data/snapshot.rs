use std::collections::BTreeMap;

use super::aggregate::{self, AggregateOp, View};
use super::model::{Dimension, DimensionValue, Metric};

// ---------------------------------------------------------------------------
// Snapshot – everything one render of the dashboard needs
// ---------------------------------------------------------------------------

/// Headline numbers shown in the metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    pub total_emissions: f64,
    /// `None` when no record is visible.
    pub mean_water: Option<f64>,
    pub total_revenue: f64,
    pub record_count: usize,
}

/// Emissions and revenue summed for one company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyTotals {
    pub company: String,
    pub emissions: f64,
    pub revenue: f64,
}

/// Derived values for one filtered view. Rebuilt whenever the filters
/// change and thrown away on the next change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub kpis: Kpis,
    /// product type → company → Σ emissions
    pub emissions_by_product: BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>>,
    /// product type → company → Σ water
    pub water_by_product: BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>>,
    /// (year, Σ emissions), years ascending
    pub emissions_by_year: Vec<(i32, f64)>,
    /// product type → record count
    pub product_counts: BTreeMap<DimensionValue, usize>,
    pub companies: Vec<CompanyTotals>,
}

impl Snapshot {
    pub fn compute(view: &View<'_>) -> Self {
        let kpis = Kpis {
            total_emissions: aggregate::total(view, Metric::GreenhouseGasEmissions),
            mean_water: aggregate::mean(view, Metric::WaterConsumption),
            total_revenue: aggregate::total(view, Metric::SalesRevenue),
            record_count: view.len(),
        };

        let emissions_by_year = aggregate::group_sum(
            view,
            Dimension::ProductionYear,
            Metric::GreenhouseGasEmissions,
        )
        .into_iter()
        .filter_map(|(year, sum)| Some((year.as_year()?, sum)))
        .collect();

        let companies = aggregate::group_sum_multi(
            view,
            Dimension::Company,
            &[
                (Metric::GreenhouseGasEmissions, AggregateOp::Sum),
                (Metric::SalesRevenue, AggregateOp::Sum),
            ],
        )
        .into_iter()
        .map(|(company, row)| CompanyTotals {
            company: company.to_string(),
            emissions: row.get(&Metric::GreenhouseGasEmissions).copied().unwrap_or(0.0),
            revenue: row.get(&Metric::SalesRevenue).copied().unwrap_or(0.0),
        })
        .collect();

        Snapshot {
            kpis,
            emissions_by_product: aggregate::cross_sum(
                view,
                Dimension::ProductType,
                Dimension::Company,
                Metric::GreenhouseGasEmissions,
            ),
            water_by_product: aggregate::cross_sum(
                view,
                Dimension::ProductType,
                Dimension::Company,
                Metric::WaterConsumption,
            ),
            emissions_by_year,
            product_counts: aggregate::group_count(view, Dimension::ProductType),
            companies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.record_count == 0
    }
}
