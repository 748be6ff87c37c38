use std::io::Write;

use tempfile::Builder;

use eco_impact::config::AppConfig;
use eco_impact::data::aggregate::{group_sum, total};
use eco_impact::data::filter::{FilterSet, apply};
use eco_impact::data::loader::load_file;
use eco_impact::data::model::{Dimension, DimensionValue, Metric};
use eco_impact::format;
use eco_impact::state::{DashboardState, FilterEvent};

const CSV: &str = "\
Company,Product_Type,Production_Year,Greenhouse_Gas_Emissions,Water_Consumption,Sales_Revenue
Acme,Cotton,2020,100,50,1000
Acme,Nylon,2021,200,80,1500
Zeta,Cotton,2020,50,20,500
";

fn load_state() -> DashboardState {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "{}", CSV).unwrap();
    let config = AppConfig {
        data_path: tmp.path().to_path_buf(),
        ..AppConfig::default()
    };
    let dataset = load_file(&config.data_path).unwrap();
    DashboardState::new(dataset, &config)
}

#[test]
fn test_acme_scenario() {
    let state = load_state();
    let ds = &state.dataset;

    let filters = FilterSet {
        companies: ["Acme".to_string()].into(),
        product_types: ["Cotton".to_string(), "Nylon".to_string()].into(),
        years: [2020, 2021].into(),
    };
    let view = apply(&ds.records, &filters);
    assert_eq!(view.len(), 2);
    assert_eq!(view[0], &ds.records[0]);
    assert_eq!(view[1], &ds.records[1]);

    assert_eq!(total(&view, Metric::GreenhouseGasEmissions), 300.0);
    let by_product = group_sum(&view, Dimension::ProductType, Metric::GreenhouseGasEmissions);
    let expected: Vec<(DimensionValue, f64)> = vec![
        (DimensionValue::from("Cotton"), 100.0),
        (DimensionValue::from("Nylon"), 200.0),
    ];
    assert_eq!(by_product.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_sidebar_events_drive_snapshot() {
    let mut state = load_state();
    assert_eq!(format::emissions(state.snapshot.kpis.total_emissions), "350 kg");

    state.apply([FilterEvent::Toggle(Dimension::Company, "Zeta".into())]);
    let kpis = state.snapshot.kpis;
    assert_eq!(format::emissions(kpis.total_emissions), "300 kg");
    assert_eq!(format::water(kpis.mean_water), "65 L");
    assert_eq!(format::revenue(kpis.total_revenue), "US$ 2,500.00");
    assert_eq!(state.snapshot.emissions_by_year, vec![(2020, 100.0), (2021, 200.0)]);
}

#[test]
fn test_empty_selection_shows_no_data() {
    let mut state = load_state();
    state.apply([
        FilterEvent::SelectNone(Dimension::ProductType),
        // Unobserved values are never added back.
        FilterEvent::Toggle(Dimension::ProductType, "Kevlar".into()),
    ]);

    assert!(state.snapshot.is_empty());
    assert_eq!(state.snapshot.kpis.total_revenue, 0.0);
    assert_eq!(format::water(state.snapshot.kpis.mean_water), format::NO_DATA);
    assert!(state.snapshot.product_counts.is_empty());
    assert!(state.snapshot.companies.is_empty());
}

#[test]
fn test_redundant_events_keep_selection() {
    let mut state = load_state();
    let before = state.filters.clone();
    state.apply([
        FilterEvent::SelectAll(Dimension::Company),
        FilterEvent::Toggle(Dimension::ProductionYear, 2020.into()),
        FilterEvent::Toggle(Dimension::ProductionYear, 2020.into()),
    ]);
    assert_eq!(state.filters, before);
    assert_eq!(state.visible_indices, vec![0, 1, 2]);
}
