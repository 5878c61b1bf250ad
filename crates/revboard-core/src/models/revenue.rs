//! Revenue tracking query-result models
//!
//! Mirrors the JSON shape produced by the upstream query layer:
//! `financial.revenueTracking.summaries` with per-group collections.
//! All numeric fields default to zero so partially populated rows decode
//! cleanly; fee breakdowns are optional and absent fees count as 0.

use serde::{Deserialize, Serialize};

use crate::summary::SortKey;

/// Top-level persisted query result for revenue tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    #[serde(default)]
    pub financial: FinancialSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSection {
    #[serde(default)]
    pub revenue_tracking: RevenueTracking,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTracking {
    #[serde(default)]
    pub summaries: RevenueSummaries,
}

/// Grouped revenue rows, one collection per grouping dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummaries {
    #[serde(default)]
    pub by_kind: Vec<RevenueItem>,
    #[serde(default)]
    pub by_account_manager: Vec<RevenueItem>,
    #[serde(default)]
    pub by_client: Vec<RevenueItem>,
    #[serde(default)]
    pub by_sponsor: Vec<RevenueItem>,
}

impl RevenueSummaries {
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
            && self.by_account_manager.is_empty()
            && self.by_client.is_empty()
            && self.by_sponsor.is_empty()
    }
}

/// One revenue row per group (account manager, client, sponsor, or kind)
///
/// Invariant from the upstream contract: `total` approximately equals the
/// sum of the four fee components; `regular`/`preContracted` may diverge
/// from the fee breakdown, so the fields are carried separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub regular: f64,
    #[serde(default)]
    pub pre_contracted: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consulting_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consulting_pre_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hands_on_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad_fee: Option<f64>,
}

impl RevenueItem {
    /// Value of a sortable metric, 0 when the field is absent
    pub fn metric(&self, key: SortKey) -> f64 {
        match key {
            // Name is not numeric; worth 0 on every row, so a stable sort
            // by it leaves the input order untouched
            SortKey::Name => 0.0,
            SortKey::Regular => self.regular,
            SortKey::PreContracted => self.pre_contracted,
            SortKey::Total => self.total,
            SortKey::ConsultingFee => self.consulting_fee.unwrap_or(0.0),
            SortKey::ConsultingPreFee => self.consulting_pre_fee.unwrap_or(0.0),
            SortKey::HandsOnFee => self.hands_on_fee.unwrap_or(0.0),
            SortKey::SquadFee => self.squad_fee.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_format() {
        let json = r#"{
            "financial": {
                "revenueTracking": {
                    "summaries": {
                        "byAccountManager": [
                            {
                                "name": "Alice Moreira",
                                "slug": "alice-moreira",
                                "regular": 42000.0,
                                "preContracted": 8000.0,
                                "total": 50000.0,
                                "consultingFee": 30000.0,
                                "handsOnFee": 20000.0
                            }
                        ],
                        "byKind": [
                            {"name": "Consulting", "total": 30000.0},
                            {"name": "Hands On", "total": 20000.0}
                        ]
                    }
                }
            }
        }"#;

        let report: RevenueReport = serde_json::from_str(json).unwrap();
        let summaries = &report.financial.revenue_tracking.summaries;
        assert_eq!(summaries.by_account_manager.len(), 1);
        assert_eq!(summaries.by_kind.len(), 2);
        assert!(summaries.by_client.is_empty());

        let alice = &summaries.by_account_manager[0];
        assert_eq!(alice.slug.as_deref(), Some("alice-moreira"));
        assert_eq!(alice.metric(SortKey::ConsultingFee), 30000.0);
        assert_eq!(alice.metric(SortKey::SquadFee), 0.0);
    }

    #[test]
    fn test_missing_fee_fields_default() {
        let item: RevenueItem = serde_json::from_str(r#"{"name": "B", "total": 50.0}"#).unwrap();
        assert_eq!(item.regular, 0.0);
        assert!(item.consulting_fee.is_none());
        assert_eq!(item.metric(SortKey::HandsOnFee), 0.0);
        assert_eq!(item.metric(SortKey::Total), 50.0);
    }

    #[test]
    fn test_summaries_is_empty() {
        assert!(RevenueSummaries::default().is_empty());
    }
}
