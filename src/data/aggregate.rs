//! Reductions over a filtered view.
//!
//! Grouped results are `BTreeMap`s keyed by [`DimensionValue`], so text keys
//! come out lexicographically and years ascending.

use std::collections::BTreeMap;

use super::model::{Dimension, DimensionValue, Metric, Record};

/// A filtered view: borrowed records in original order.
pub type View<'a> = [&'a Record];

/// Per-field reduction requested from [`group_sum_multi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Sum of all values
    Sum,
    /// Number of records in the group
    Count,
    /// Arithmetic mean
    Mean,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

/// Sum of `metric` across the view; 0 when empty.
pub fn total(view: &View<'_>, metric: Metric) -> f64 {
    view.iter().map(|rec| rec.metric(metric)).sum()
}

/// Mean of `metric`, or `None` when the view is empty.
pub fn mean(view: &View<'_>, metric: Metric) -> Option<f64> {
    if view.is_empty() {
        None
    } else {
        Some(total(view, metric) / view.len() as f64)
    }
}

/// Sum of `metric` per distinct value of `group`.
pub fn group_sum(
    view: &View<'_>,
    group: Dimension,
    metric: Metric,
) -> BTreeMap<DimensionValue, f64> {
    let mut out = BTreeMap::new();
    for rec in view {
        *out.entry(rec.dimension(group)).or_insert(0.0) += rec.metric(metric);
    }
    out
}

/// Number of records per distinct value of `group`.
pub fn group_count(view: &View<'_>, group: Dimension) -> BTreeMap<DimensionValue, usize> {
    let mut out = BTreeMap::new();
    for rec in view {
        *out.entry(rec.dimension(group)).or_insert(0) += 1;
    }
    out
}

/// One aggregate per requested metric, per distinct value of `group`.
pub fn group_sum_multi(
    view: &View<'_>,
    group: Dimension,
    requests: &[(Metric, AggregateOp)],
) -> BTreeMap<DimensionValue, BTreeMap<Metric, f64>> {
    // (sum, count, min, max) per group and metric
    let mut acc: BTreeMap<DimensionValue, BTreeMap<Metric, (f64, usize, f64, f64)>> =
        BTreeMap::new();

    for rec in view {
        let slots = acc.entry(rec.dimension(group)).or_default();
        for &(metric, _) in requests {
            let v = rec.metric(metric);
            let entry = slots.entry(metric).or_insert((0.0, 0, v, v));
            entry.0 += v;
            entry.1 += 1;
            entry.2 = entry.2.min(v);
            entry.3 = entry.3.max(v);
        }
    }

    acc.into_iter()
        .map(|(key, slots)| {
            let row = requests
                .iter()
                .filter_map(|&(metric, op)| {
                    let &(sum, count, min, max) = slots.get(&metric)?;
                    let value = match op {
                        AggregateOp::Sum => sum,
                        AggregateOp::Count => count as f64,
                        AggregateOp::Mean => sum / count as f64,
                        AggregateOp::Min => min,
                        AggregateOp::Max => max,
                    };
                    Some((metric, value))
                })
                .collect();
            (key, row)
        })
        .collect()
}

/// Two-level group sum: `outer → inner → Σ metric`.
///
/// Feeds the stacked bar charts (product type on the axis, one stack segment
/// per company).
pub fn cross_sum(
    view: &View<'_>,
    outer: Dimension,
    inner: Dimension,
    metric: Metric,
) -> BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>> {
    let mut out: BTreeMap<DimensionValue, BTreeMap<DimensionValue, f64>> = BTreeMap::new();
    for rec in view {
        *out.entry(rec.dimension(outer))
            .or_default()
            .entry(rec.dimension(inner))
            .or_insert(0.0) += rec.metric(metric);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterSet, apply};
    use crate::data::model::tests::{rec, sample};

    #[test]
    fn example_view_totals() {
        let ds = sample();
        let mut filters = FilterSet::all(&ds);
        filters.select_none(Dimension::Company);
        filters.companies.insert("Acme".to_string());
        let view = apply(&ds.records, &filters);

        assert_eq!(total(&view, Metric::GreenhouseGasEmissions), 300.0);
        let by_product = group_sum(&view, Dimension::ProductType, Metric::GreenhouseGasEmissions);
        assert_eq!(by_product.len(), 2);
        assert_eq!(by_product[&DimensionValue::from("Cotton")], 100.0);
        assert_eq!(by_product[&DimensionValue::from("Nylon")], 200.0);
    }

    #[test]
    fn empty_view_degrades_gracefully() {
        let view: Vec<&Record> = Vec::new();
        assert_eq!(total(&view, Metric::SalesRevenue), 0.0);
        assert_eq!(mean(&view, Metric::WaterConsumption), None);
        assert!(group_sum(&view, Dimension::ProductionYear, Metric::SalesRevenue).is_empty());
        assert!(group_count(&view, Dimension::ProductType).is_empty());
        let ops = [(Metric::SalesRevenue, AggregateOp::Sum)];
        assert!(group_sum_multi(&view, Dimension::Company, &ops).is_empty());
    }

    #[test]
    fn mean_of_water() {
        let ds = sample();
        let view: Vec<&Record> = ds.records.iter().collect();
        assert_eq!(mean(&view, Metric::WaterConsumption), Some(50.0));
    }

    #[test]
    fn years_group_ascending_regardless_of_input_order() {
        let records = vec![
            rec("A", "Cotton", 2022, 3.0, 0.0, 0.0),
            rec("A", "Cotton", 2019, 1.0, 0.0, 0.0),
            rec("A", "Cotton", 2020, 2.0, 0.0, 0.0),
            rec("B", "Cotton", 2019, 4.0, 0.0, 0.0),
        ];
        let view: Vec<&Record> = records.iter().collect();
        let by_year = group_sum(&view, Dimension::ProductionYear, Metric::GreenhouseGasEmissions);
        let years: Vec<i32> = by_year.keys().filter_map(DimensionValue::as_year).collect();
        assert_eq!(years, vec![2019, 2020, 2022]);
        assert_eq!(by_year[&DimensionValue::from(2019)], 5.0);
    }

    #[test]
    fn group_count_sums_to_view_len() {
        let ds = sample();
        let view: Vec<&Record> = ds.records.iter().collect();
        let counts = group_count(&view, Dimension::ProductType);
        assert_eq!(counts[&DimensionValue::from("Cotton")], 2);
        assert_eq!(counts.values().sum::<usize>(), view.len());
    }

    #[test]
    fn multi_aggregation_per_company() {
        let ds = sample();
        let view: Vec<&Record> = ds.records.iter().collect();
        let table = group_sum_multi(
            &view,
            Dimension::Company,
            &[
                (Metric::GreenhouseGasEmissions, AggregateOp::Sum),
                (Metric::SalesRevenue, AggregateOp::Sum),
                (Metric::WaterConsumption, AggregateOp::Max),
            ],
        );
        let acme = &table[&DimensionValue::from("Acme")];
        assert_eq!(acme[&Metric::GreenhouseGasEmissions], 300.0);
        assert_eq!(acme[&Metric::SalesRevenue], 2500.0);
        assert_eq!(acme[&Metric::WaterConsumption], 80.0);
        assert_eq!(table[&DimensionValue::from("Zeta")][&Metric::SalesRevenue], 500.0);
    }

    #[test]
    fn multi_aggregation_mean_count_min() {
        let ds = sample();
        let view: Vec<&Record> = ds.records.iter().collect();
        let table = group_sum_multi(
            &view,
            Dimension::ProductType,
            &[(Metric::WaterConsumption, AggregateOp::Mean)],
        );
        assert_eq!(table[&DimensionValue::from("Cotton")][&Metric::WaterConsumption], 35.0);

        let counts = group_sum_multi(
            &view,
            Dimension::ProductType,
            &[(Metric::SalesRevenue, AggregateOp::Count)],
        );
        assert_eq!(counts[&DimensionValue::from("Cotton")][&Metric::SalesRevenue], 2.0);

        let mins = group_sum_multi(
            &view,
            Dimension::ProductionYear,
            &[(Metric::SalesRevenue, AggregateOp::Min)],
        );
        assert_eq!(mins[&DimensionValue::from(2020)][&Metric::SalesRevenue], 500.0);
    }

    #[test]
    fn cross_sum_stacks_companies_per_product() {
        let ds = sample();
        let view: Vec<&Record> = ds.records.iter().collect();
        let stacked = cross_sum(
            &view,
            Dimension::ProductType,
            Dimension::Company,
            Metric::GreenhouseGasEmissions,
        );
        let cotton = &stacked[&DimensionValue::from("Cotton")];
        assert_eq!(cotton[&DimensionValue::from("Acme")], 100.0);
        assert_eq!(cotton[&DimensionValue::from("Zeta")], 50.0);
        let nylon = &stacked[&DimensionValue::from("Nylon")];
        assert!(!nylon.contains_key(&DimensionValue::from("Zeta")));
    }
}
