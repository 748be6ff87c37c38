use std::collections::BTreeSet;

use quickcheck_macros::quickcheck;

use eco_impact::data::aggregate::{group_count, group_sum, total};
use eco_impact::data::filter::{FilterSet, apply};
use eco_impact::data::model::{Dataset, Dimension, Metric, Record};

/// Small alphabets so generated filters hit and miss often.
fn build(rows: &[(u8, u8, u8, u16)]) -> Dataset {
    Dataset::from_records(
        rows.iter()
            .map(|&(c, p, y, v)| Record {
                company: format!("C{}", c % 4),
                product_type: format!("P{}", p % 3),
                production_year: 2015 + (y % 6) as i32,
                greenhouse_gas_emissions: v as f64,
                water_consumption: (v / 2) as f64,
                sales_revenue: v as f64 * 1.5,
            })
            .collect(),
    )
}

/// Keep the observed values whose position bit is set in `mask`.
fn pick<T: Ord + Clone>(values: &[T], mask: u8) -> BTreeSet<T> {
    values
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << (i % 8)) != 0)
        .map(|(_, v)| v.clone())
        .collect()
}

fn filters(ds: &Dataset, masks: (u8, u8, u8)) -> FilterSet {
    FilterSet {
        companies: pick(&ds.companies, masks.0),
        product_types: pick(&ds.product_types, masks.1),
        years: pick(&ds.years, masks.2),
    }
}

#[quickcheck]
fn filter_is_sound_and_complete(rows: Vec<(u8, u8, u8, u16)>, masks: (u8, u8, u8)) -> bool {
    let ds = build(&rows);
    let f = filters(&ds, masks);
    let view = apply(&ds.records, &f);

    let sound = view.iter().all(|r| {
        f.companies.contains(&r.company)
            && f.product_types.contains(&r.product_type)
            && f.years.contains(&r.production_year)
    });

    // Every matching record appears once, in original order.
    let expected: Vec<&Record> = ds.records.iter().filter(|r| f.contains(r)).collect();
    let complete = view.len() == expected.len()
        && view.iter().zip(&expected).all(|(a, b)| std::ptr::eq(*a, *b));

    sound && complete
}

#[quickcheck]
fn full_selection_returns_everything(rows: Vec<(u8, u8, u8, u16)>) -> bool {
    let ds = build(&rows);
    let view = apply(&ds.records, &FilterSet::all(&ds));
    view.len() == ds.len() && view.iter().zip(&ds.records).all(|(a, b)| std::ptr::eq(*a, b))
}

#[quickcheck]
fn any_empty_dimension_gives_empty_view(rows: Vec<(u8, u8, u8, u16)>, which: u8) -> bool {
    let ds = build(&rows);
    let mut f = FilterSet::all(&ds);
    f.select_none(Dimension::ALL[which as usize % 3]);
    apply(&ds.records, &f).is_empty()
}

#[quickcheck]
fn total_is_additive_over_disjoint_views(rows: Vec<(u8, u8, u8, u16)>, mask: u8) -> bool {
    let ds = build(&rows);
    let all = apply(&ds.records, &FilterSet::all(&ds));

    let mut left = FilterSet::all(&ds);
    left.companies = pick(&ds.companies, mask);
    let mut right = FilterSet::all(&ds);
    right.companies = pick(&ds.companies, !mask);

    let a = apply(&ds.records, &left);
    let b = apply(&ds.records, &right);
    let sum = total(&a, Metric::GreenhouseGasEmissions) + total(&b, Metric::GreenhouseGasEmissions);
    // Integral inputs below 2^53, so the sums are exact.
    sum == total(&all, Metric::GreenhouseGasEmissions)
}

#[quickcheck]
fn group_count_sums_to_view_len(rows: Vec<(u8, u8, u8, u16)>, masks: (u8, u8, u8)) -> bool {
    let ds = build(&rows);
    let view = apply(&ds.records, &filters(&ds, masks));
    Dimension::ALL
        .iter()
        .all(|&dim| group_count(&view, dim).values().sum::<usize>() == view.len())
}

#[quickcheck]
fn group_sums_add_up_to_total(rows: Vec<(u8, u8, u8, u16)>, masks: (u8, u8, u8)) -> bool {
    let ds = build(&rows);
    let view = apply(&ds.records, &filters(&ds, masks));
    let grouped: f64 = group_sum(&view, Dimension::ProductionYear, Metric::SalesRevenue)
        .values()
        .sum();
    (grouped - total(&view, Metric::SalesRevenue)).abs() < 1e-6
}
