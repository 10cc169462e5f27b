//! Chart-ready view of a single product.
//!
//! A [`ProductStat`] is a two-slice doughnut: the stock held versus the space
//! left before [`CAPACITY`]. It is derived from a [`Product`] and never
//! mutated; a changed product yields a new stat.

use serde::{Deserialize, Serialize};

use super::Product;

/// Fixed maximum displayable quantity per product.
pub const CAPACITY: u32 = 1000;

/// Second label of [`ProductStat::product_name`].
pub const REMAINING_NAME: &str = "Remaining space";

/// Second label of the chart slices.
pub const REMAINING_LABEL: &str = "Remaining Space";

/// One series of chart values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub data: Vec<u32>,
}

/// Declarative doughnut chart data, serialised as
/// `{"labels": [...], "datasets": [{"data": [...]}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub product_name: [String; 2],
    pub product_data: ChartData,
}

impl ProductStat {
    /// Derives the stat for `product`.
    ///
    /// Remaining space is clamped at zero when the quantity exceeds
    /// [`CAPACITY`], so the chart never receives a negative slice.
    pub fn from_product(product: &Product) -> Self {
        let remaining = CAPACITY.saturating_sub(product.quantity);
        Self {
            product_name: [product.name.clone(), REMAINING_NAME.to_string()],
            product_data: ChartData {
                labels: vec![product.name.clone(), REMAINING_LABEL.to_string()],
                datasets: vec![ChartDataset {
                    data: vec![product.quantity, remaining],
                }],
            },
        }
    }

    /// The display label (the product name).
    pub fn name(&self) -> &str {
        &self.product_name[0]
    }

    /// `[used, remaining]`.
    pub fn data_points(&self) -> &[u32] {
        self.product_data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }
}

impl From<&Product> for ProductStat {
    fn from(product: &Product) -> Self {
        Self::from_product(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_points_sum_to_capacity() {
        for q in [0, 1, 200, 999, CAPACITY] {
            let stat = ProductStat::from_product(&Product::new("id", "Widget", "", q));
            assert_eq!(stat.data_points(), &[q, CAPACITY - q]);
            assert_eq!(stat.data_points().iter().sum::<u32>(), CAPACITY);
        }
    }

    #[test]
    fn test_over_capacity_clamps_remaining() {
        let stat = ProductStat::from_product(&Product::new("id", "Bulk", "", 1500));
        assert_eq!(stat.data_points(), &[1500, 0]);
    }

    #[test]
    fn test_labels() {
        let stat = ProductStat::from_product(&Product::new("id", "Widget", "", 200));
        assert_eq!(stat.name(), "Widget");
        assert_eq!(stat.product_name[1], "Remaining space");
        assert_eq!(stat.product_data.labels, vec!["Widget", "Remaining Space"]);
    }

    #[test]
    fn test_serialises_to_chart_json() {
        let stat = ProductStat::from_product(&Product::new("id", "Widget", "", 200));
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "productName": ["Widget", "Remaining space"],
                "productData": {
                    "labels": ["Widget", "Remaining Space"],
                    "datasets": [{"data": [200, 800]}]
                }
            })
        );
    }
}
