//! Revenue summary aggregation
//!
//! Sorts grouped revenue rows by a selectable metric, computes grand totals
//! and each row's cumulative contribution to the sorted metric, and derives
//! the top-contributors highlight band used by the tables.

use serde::{Deserialize, Serialize};

use crate::models::RevenueItem;

/// Sortable table column. Direction is fixed descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Regular,
    PreContracted,
    #[default]
    Total,
    ConsultingFee,
    ConsultingPreFee,
    HandsOnFee,
    SquadFee,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Total,
            SortKey::Regular,
            SortKey::PreContracted,
            SortKey::ConsultingFee,
            SortKey::ConsultingPreFee,
            SortKey::HandsOnFee,
            SortKey::SquadFee,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Regular => "Regular",
            SortKey::PreContracted => "Pre-Contracted",
            SortKey::Total => "Total",
            SortKey::ConsultingFee => "Consulting",
            SortKey::ConsultingPreFee => "Consulting Pre",
            SortKey::HandsOnFee => "Hands-On",
            SortKey::SquadFee => "Squad",
        }
    }

    /// Metric used for cumulative contribution. `Name` is not numeric,
    /// so Total stands in as the effective metric; the sort itself still
    /// uses the raw key.
    pub fn effective(&self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Total,
            other => *other,
        }
    }
}

/// Which summary table a row set belongs to. Determines link resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableKind {
    Kinds,
    AccountManagers,
    Clients,
    Sponsors,
}

impl TableKind {
    pub fn all() -> &'static [TableKind] {
        &[
            TableKind::Kinds,
            TableKind::AccountManagers,
            TableKind::Clients,
            TableKind::Sponsors,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableKind::Kinds => "By Type",
            TableKind::AccountManagers => "By Account Manager",
            TableKind::Clients => "By Client",
            TableKind::Sponsors => "By Sponsor",
        }
    }

    fn link_base(&self) -> Option<&'static str> {
        match self {
            // Kind rows are categories, not entities; they never link
            TableKind::Kinds => None,
            TableKind::AccountManagers => Some("/team/account-managers"),
            TableKind::Clients => Some("/about-us/clients"),
            TableKind::Sponsors => Some("/about-us/sponsors"),
        }
    }

    /// Deep-link path for a row, if the table links and the row has a slug
    pub fn link_for(&self, item: &RevenueItem) -> Option<String> {
        let base = self.link_base()?;
        let slug = item.slug.as_deref()?;
        Some(format!("{}/{}", base, slug))
    }
}

/// Grand totals across all rows of a table, absent fee fields as 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub regular: f64,
    pub pre_contracted: f64,
    pub total: f64,
    pub consulting_fee: f64,
    pub consulting_pre_fee: f64,
    pub hands_on_fee: f64,
    pub squad_fee: f64,
}

impl SummaryTotals {
    pub fn metric(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Name => 0.0,
            SortKey::Regular => self.regular,
            SortKey::PreContracted => self.pre_contracted,
            SortKey::Total => self.total,
            SortKey::ConsultingFee => self.consulting_fee,
            SortKey::ConsultingPreFee => self.consulting_pre_fee,
            SortKey::HandsOnFee => self.hands_on_fee,
            SortKey::SquadFee => self.squad_fee,
        }
    }
}

/// One sorted, annotated table row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub item: RevenueItem,
    /// This row's share of the sorted metric (0 when the metric totals 0)
    pub contribution: f64,
    /// Running share up to and including this row
    pub cumulative: f64,
}

/// Aggregated view of one summary table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTable {
    pub kind: TableKind,
    pub sort_key: SortKey,
    pub rows: Vec<SummaryRow>,
    pub totals: SummaryTotals,
}

/// Cumulative highlighting kicks in only for tables larger than this
const HIGHLIGHT_MIN_ROWS: usize = 10;

/// Rows stay in the top-contributors band while their cumulative share
/// does not exceed this fraction
const HIGHLIGHT_CUMULATIVE_CAP: f64 = 0.8;

impl SummaryTable {
    /// Build a sorted, annotated table from raw query rows.
    ///
    /// Stable sort, descending by the sort key's value (0 for absent
    /// fields), so equal values keep their input order. `Name` is worth 0
    /// on every row, which leaves the whole table in input order; only the
    /// contributions switch to the Total metric.
    pub fn build(kind: TableKind, items: &[RevenueItem], sort_key: SortKey) -> Self {
        let mut sorted: Vec<RevenueItem> = items.to_vec();
        sorted.sort_by(|a, b| {
            b.metric(sort_key)
                .partial_cmp(&a.metric(sort_key))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let metric_key = sort_key.effective();

        let totals = compute_totals(items);
        let metric_total = totals.metric(metric_key);

        let mut running = 0.0;
        let rows = sorted
            .into_iter()
            .map(|item| {
                let contribution = if metric_total > 0.0 {
                    item.metric(metric_key) / metric_total
                } else {
                    0.0
                };
                running += contribution;
                SummaryRow {
                    item,
                    contribution,
                    cumulative: running,
                }
            })
            .collect();

        Self {
            kind,
            sort_key,
            rows,
            totals,
        }
    }

    /// Whether the cumulative-contribution highlight policy applies
    pub fn highlight_active(&self) -> bool {
        self.rows.len() > HIGHLIGHT_MIN_ROWS
    }

    /// Highlight shade for a row, if any.
    ///
    /// Background intensity is linear in the row's marginal contribution:
    /// `230 - contribution * 100`, clamped to a valid channel value since a
    /// dominant row could otherwise drive it out of range.
    pub fn highlight_shade(&self, row_index: usize) -> Option<u8> {
        if !self.highlight_active() {
            return None;
        }
        let row = self.rows.get(row_index)?;
        if row.cumulative > HIGHLIGHT_CUMULATIVE_CAP {
            return None;
        }
        Some((230.0 - row.contribution * 100.0).clamp(0.0, 255.0) as u8)
    }
}

fn compute_totals(items: &[RevenueItem]) -> SummaryTotals {
    let mut totals = SummaryTotals::default();
    for item in items {
        totals.regular += item.regular;
        totals.pre_contracted += item.pre_contracted;
        totals.total += item.total;
        totals.consulting_fee += item.consulting_fee.unwrap_or(0.0);
        totals.consulting_pre_fee += item.consulting_pre_fee.unwrap_or(0.0);
        totals.hands_on_fee += item.hands_on_fee.unwrap_or(0.0);
        totals.squad_fee += item.squad_fee.unwrap_or(0.0);
    }
    totals
}

/// `value/total` as a one-decimal percentage; None when the denominator is
/// zero (the caller renders nothing)
pub fn format_percent(value: f64, total: f64) -> Option<String> {
    if total == 0.0 {
        return None;
    }
    Some(format!("{:.1}%", value / total * 100.0))
}
