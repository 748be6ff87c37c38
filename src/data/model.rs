use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the source spreadsheet
// ---------------------------------------------------------------------------

pub const COL_COMPANY: &str = "Company";
pub const COL_PRODUCT_TYPE: &str = "Product_Type";
pub const COL_PRODUCTION_YEAR: &str = "Production_Year";
pub const COL_EMISSIONS: &str = "Greenhouse_Gas_Emissions";
pub const COL_WATER: &str = "Water_Consumption";
pub const COL_REVENUE: &str = "Sales_Revenue";

/// Every column the loader insists on, in spreadsheet order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COMPANY,
    COL_PRODUCT_TYPE,
    COL_PRODUCTION_YEAR,
    COL_EMISSIONS,
    COL_WATER,
    COL_REVENUE,
];

// ---------------------------------------------------------------------------
// Record – one row of the spreadsheet
// ---------------------------------------------------------------------------

/// A single production record. Immutable once loaded.
///
/// Serializes with the spreadsheet's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Product_Type")]
    pub product_type: String,
    #[serde(rename = "Production_Year")]
    pub production_year: i32,
    #[serde(rename = "Greenhouse_Gas_Emissions")]
    pub greenhouse_gas_emissions: f64,
    #[serde(rename = "Water_Consumption")]
    pub water_consumption: f64,
    #[serde(rename = "Sales_Revenue")]
    pub sales_revenue: f64,
}

impl Record {
    /// Read one of the numeric columns.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::GreenhouseGasEmissions => self.greenhouse_gas_emissions,
            Metric::WaterConsumption => self.water_consumption,
            Metric::SalesRevenue => self.sales_revenue,
        }
    }

    /// Read one of the categorical columns as a group key.
    pub fn dimension(&self, dimension: Dimension) -> DimensionValue {
        match dimension {
            Dimension::Company => DimensionValue::Text(self.company.clone()),
            Dimension::ProductType => DimensionValue::Text(self.product_type.clone()),
            Dimension::ProductionYear => DimensionValue::Year(self.production_year),
        }
    }
}

// ---------------------------------------------------------------------------
// Metric / Dimension – typed column selectors
// ---------------------------------------------------------------------------

/// Numeric columns that can be summed or averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    GreenhouseGasEmissions,
    WaterConsumption,
    SalesRevenue,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::GreenhouseGasEmissions,
        Metric::WaterConsumption,
        Metric::SalesRevenue,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::GreenhouseGasEmissions => COL_EMISSIONS,
            Metric::WaterConsumption => COL_WATER,
            Metric::SalesRevenue => COL_REVENUE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::GreenhouseGasEmissions => "CO₂ emissions (kg)",
            Metric::WaterConsumption => "Water consumption (L)",
            Metric::SalesRevenue => "Sales revenue (US$)",
        }
    }
}

/// Categorical columns the user can filter and group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Company,
    ProductType,
    ProductionYear,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Company,
        Dimension::ProductType,
        Dimension::ProductionYear,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Dimension::Company => COL_COMPANY,
            Dimension::ProductType => COL_PRODUCT_TYPE,
            Dimension::ProductionYear => COL_PRODUCTION_YEAR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Company => "Companies",
            Dimension::ProductType => "Product types",
            Dimension::ProductionYear => "Production year",
        }
    }
}

// ---------------------------------------------------------------------------
// DimensionValue – a group key
// ---------------------------------------------------------------------------

/// A value of a categorical column.
///
/// Ordering is lexicographic for text and numeric for years, which is what
/// every grouped result in [`super::aggregate`] is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DimensionValue {
    Year(i32),
    Text(String),
}

impl DimensionValue {
    pub fn as_year(&self) -> Option<i32> {
        match self {
            DimensionValue::Year(y) => Some(*y),
            DimensionValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DimensionValue::Text(s) => Some(s),
            DimensionValue::Year(_) => None,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionValue::Year(y) => write!(f, "{y}"),
            DimensionValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for DimensionValue {
    fn from(year: i32) -> Self {
        DimensionValue::Year(year)
    }
}

impl From<&str> for DimensionValue {
    fn from(s: &str) -> Self {
        DimensionValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the record store
// ---------------------------------------------------------------------------

/// The loaded spreadsheet plus the distinct values of each dimension.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Distinct companies, first-seen order.
    pub companies: Vec<String>,
    /// Distinct product types, first-seen order.
    pub product_types: Vec<String>,
    /// Distinct production years, ascending.
    pub years: Vec<i32>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut companies = Vec::new();
        let mut product_types = Vec::new();
        let mut seen_companies: BTreeSet<String> = BTreeSet::new();
        let mut seen_products: BTreeSet<String> = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            if seen_companies.insert(rec.company.clone()) {
                companies.push(rec.company.clone());
            }
            if seen_products.insert(rec.product_type.clone()) {
                product_types.push(rec.product_type.clone());
            }
            years.insert(rec.production_year);
        }

        Dataset {
            companies,
            product_types,
            years: years.into_iter().collect(),
            records,
        }
    }

    /// Distinct observed values of a dimension, in option order.
    pub fn distinct(&self, dimension: Dimension) -> Vec<DimensionValue> {
        match dimension {
            Dimension::Company => self.companies.iter().map(|c| c.as_str().into()).collect(),
            Dimension::ProductType => self
                .product_types
                .iter()
                .map(|p| p.as_str().into())
                .collect(),
            Dimension::ProductionYear => self.years.iter().map(|&y| y.into()).collect(),
        }
    }

    /// Whether `value` was observed in this dataset for `dimension`.
    pub fn has_value(&self, dimension: Dimension, value: &DimensionValue) -> bool {
        match (dimension, value) {
            (Dimension::Company, DimensionValue::Text(s)) => self.companies.contains(s),
            (Dimension::ProductType, DimensionValue::Text(s)) => self.product_types.contains(s),
            (Dimension::ProductionYear, DimensionValue::Year(y)) => {
                self.years.binary_search(y).is_ok()
            }
            _ => false,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
