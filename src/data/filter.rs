use std::collections::BTreeSet;

use super::model::{Dataset, Dimension, DimensionValue, Record};

// ---------------------------------------------------------------------------
// FilterSet – the three inclusion sets chosen in the sidebar
// ---------------------------------------------------------------------------

/// Selected values per dimension.
///
/// Unlike a "no constraint" filter, an empty set here means nothing is
/// selected, so no record passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSet {
    pub companies: BTreeSet<String>,
    pub product_types: BTreeSet<String>,
    pub years: BTreeSet<i32>,
}

impl FilterSet {
    /// Every observed value selected (the sidebar default).
    pub fn all(dataset: &Dataset) -> Self {
        FilterSet {
            companies: dataset.companies.iter().cloned().collect(),
            product_types: dataset.product_types.iter().cloned().collect(),
            years: dataset.years.iter().copied().collect(),
        }
    }

    /// Whether a record passes all three memberships.
    pub fn contains(&self, record: &Record) -> bool {
        self.companies.contains(&record.company)
            && self.product_types.contains(&record.product_type)
            && self.years.contains(&record.production_year)
    }

    /// Whether a single value is selected.
    pub fn is_selected(&self, dimension: Dimension, value: &DimensionValue) -> bool {
        match (dimension, value) {
            (Dimension::Company, DimensionValue::Text(s)) => self.companies.contains(s),
            (Dimension::ProductType, DimensionValue::Text(s)) => self.product_types.contains(s),
            (Dimension::ProductionYear, DimensionValue::Year(y)) => self.years.contains(y),
            _ => false,
        }
    }

    pub fn selected_count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Company => self.companies.len(),
            Dimension::ProductType => self.product_types.len(),
            Dimension::ProductionYear => self.years.len(),
        }
    }

    /// Flip one value. Values the dataset never contained are ignored so the
    /// selection can never grow past what was observed.
    pub fn toggle(&mut self, dataset: &Dataset, dimension: Dimension, value: &DimensionValue) {
        if self.is_selected(dimension, value) {
            self.remove(dimension, value);
        } else if dataset.has_value(dimension, value) {
            self.insert(dimension, value);
        }
    }

    /// Re-select every observed value of one dimension.
    pub fn select_all(&mut self, dataset: &Dataset, dimension: Dimension) {
        let full = FilterSet::all(dataset);
        match dimension {
            Dimension::Company => self.companies = full.companies,
            Dimension::ProductType => self.product_types = full.product_types,
            Dimension::ProductionYear => self.years = full.years,
        }
    }

    /// Clear one dimension (which empties the filtered view).
    pub fn select_none(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Company => self.companies.clear(),
            Dimension::ProductType => self.product_types.clear(),
            Dimension::ProductionYear => self.years.clear(),
        }
    }

    fn insert(&mut self, dimension: Dimension, value: &DimensionValue) {
        match (dimension, value) {
            (Dimension::Company, DimensionValue::Text(s)) => {
                self.companies.insert(s.clone());
            }
            (Dimension::ProductType, DimensionValue::Text(s)) => {
                self.product_types.insert(s.clone());
            }
            (Dimension::ProductionYear, DimensionValue::Year(y)) => {
                self.years.insert(*y);
            }
            _ => {}
        }
    }

    fn remove(&mut self, dimension: Dimension, value: &DimensionValue) {
        match (dimension, value) {
            (Dimension::Company, DimensionValue::Text(s)) => {
                self.companies.remove(s);
            }
            (Dimension::ProductType, DimensionValue::Text(s)) => {
                self.product_types.remove(s);
            }
            (Dimension::ProductionYear, DimensionValue::Year(y)) => {
                self.years.remove(y);
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// The records passing `filters`, in their original order.
pub fn apply<'a>(records: &'a [Record], filters: &FilterSet) -> Vec<&'a Record> {
    records.iter().filter(|rec| filters.contains(rec)).collect()
}

/// Same as [`apply`] but returns row indices into `records`.
pub fn filtered_indices(records: &[Record], filters: &FilterSet) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.contains(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample;

    #[test]
    fn full_selection_keeps_everything_in_order() {
        let ds = sample();
        let view = apply(&ds.records, &FilterSet::all(&ds));
        let expected: Vec<&Record> = ds.records.iter().collect();
        assert_eq!(view, expected);
    }

    #[test]
    fn company_filter_matches_example() {
        let ds = sample();
        let mut filters = FilterSet::all(&ds);
        filters.toggle(&ds, Dimension::Company, &"Zeta".into());

        let view = apply(&ds.records, &filters);
        assert_eq!(view.len(), 2);
        assert_eq!(view[0], &ds.records[0]);
        assert_eq!(view[1], &ds.records[1]);
        assert_eq!(filtered_indices(&ds.records, &filters), vec![0, 1]);
    }

    #[test]
    fn any_empty_dimension_empties_the_view() {
        let ds = sample();
        for dim in Dimension::ALL {
            let mut filters = FilterSet::all(&ds);
            filters.select_none(dim);
            assert!(apply(&ds.records, &filters).is_empty(), "{dim:?}");
        }
    }

    #[test]
    fn toggle_cannot_add_unobserved_values() {
        let ds = sample();
        let mut filters = FilterSet::all(&ds);
        filters.toggle(&ds, Dimension::ProductionYear, &1999.into());
        assert!(!filters.years.contains(&1999));
        assert_eq!(filters, FilterSet::all(&ds));
    }

    #[test]
    fn select_all_restores_one_dimension_only() {
        let ds = sample();
        let mut filters = FilterSet::all(&ds);
        filters.select_none(Dimension::Company);
        filters.select_none(Dimension::ProductionYear);
        filters.select_all(&ds, Dimension::Company);

        assert_eq!(filters.selected_count(Dimension::Company), 2);
        assert_eq!(filters.selected_count(Dimension::ProductionYear), 0);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let ds = sample();
        let mut filters = FilterSet::all(&ds);
        let value = DimensionValue::from("Nylon");
        filters.toggle(&ds, Dimension::ProductType, &value);
        assert!(!filters.is_selected(Dimension::ProductType, &value));
        filters.toggle(&ds, Dimension::ProductType, &value);
        assert_eq!(filters, FilterSet::all(&ds));
    }
}
