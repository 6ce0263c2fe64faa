use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::safe_f64;

/// Aggregated trade-history report for one wallet, as returned by the
/// analytics API. Rows are kept raw; only `summary.total_usd` feeds the
/// percentile banding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletReport {
    pub summary: Option<Value>,
    pub buyer_seller: Vec<Value>,
    pub collections: Vec<Value>,
    pub fetched_at: DateTime<Utc>,
}

impl WalletReport {
    /// Partition raw result rows by their `section` tag. The first summary
    /// row wins; rows with an unknown section are dropped.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        let mut summary = None;
        let mut buyer_seller = Vec::new();
        let mut collections = Vec::new();

        for row in rows {
            match row.get("section").and_then(Value::as_str) {
                Some("summary") if summary.is_none() => summary = Some(row),
                Some("buyer_seller") => buyer_seller.push(row),
                Some("collection") => collections.push(row),
                _ => {}
            }
        }

        Self {
            summary,
            buyer_seller,
            collections,
            fetched_at: Utc::now(),
        }
    }

    /// Lifetime USD volume from the summary section, 0 when absent.
    pub fn total_usd(&self) -> f64 {
        self.summary
            .as_ref()
            .map(|summary| safe_f64(summary.get("total_usd")))
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.buyer_seller.is_empty() && self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_partitioned_by_section() {
        let report = WalletReport::from_rows(vec![
            json!({"section": "collection", "name": "a"}),
            json!({"section": "summary", "total_usd": 1234.5}),
            json!({"section": "buyer_seller", "counterparty": "b"}),
            json!({"section": "summary", "total_usd": 9999.0}),
            json!({"section": "mystery"}),
        ]);

        assert_eq!(report.total_usd(), 1234.5);
        assert_eq!(report.buyer_seller.len(), 1);
        assert_eq!(report.collections.len(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_empty_report_has_zero_volume() {
        let report = WalletReport::from_rows(vec![]);

        assert!(report.is_empty());
        assert_eq!(report.total_usd(), 0.0);
    }

    #[test]
    fn test_string_total_usd_coerces() {
        let report = WalletReport::from_rows(vec![json!({
            "section": "summary",
            "total_usd": "250.75",
        })]);

        assert_eq!(report.total_usd(), 250.75);
    }
}
