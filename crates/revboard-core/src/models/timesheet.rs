//! Timesheet query-result models
//!
//! The upstream layer delivers hours already aggregated per calendar date,
//! one entry per date that has any appointments, plus the business calendar
//! (holidays and working days) for the displayed period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Engagement category by which hours are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Consulting,
    HandsOn,
    Squad,
    Internal,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Consulting,
            Category::HandsOn,
            Category::Squad,
            Category::Internal,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Consulting => "Consulting",
            Category::HandsOn => "Hands-On",
            Category::Squad => "Squad",
            Category::Internal => "Internal",
        }
    }
}

/// Hours for one calendar day, split by engagement category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    #[serde(default)]
    pub consulting: f64,
    #[serde(default)]
    pub hands_on: f64,
    #[serde(default)]
    pub squad: f64,
    #[serde(default)]
    pub internal: f64,
}

impl DayHours {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Consulting => self.consulting,
            Category::HandsOn => self.hands_on,
            Category::Squad => self.squad,
            Category::Internal => self.internal,
        }
    }

    pub fn total(&self) -> f64 {
        self.consulting + self.hands_on + self.squad + self.internal
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }

    pub fn add(&mut self, other: &DayHours) {
        self.consulting += other.consulting;
        self.hands_on += other.hands_on;
        self.squad += other.squad;
        self.internal += other.internal;
    }
}

/// Timesheet half of the persisted query result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timesheet {
    #[serde(default)]
    pub by_date: Vec<DateTotals>,
    #[serde(default)]
    pub business_calendar: BusinessCalendar,
}

/// Per-date hour totals as delivered by the query layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTotals {
    /// Calendar date in `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub total_consulting_hours: f64,
    #[serde(default)]
    pub total_hands_on_hours: f64,
    #[serde(default)]
    pub total_squad_hours: f64,
    #[serde(default)]
    pub total_internal_hours: f64,
}

impl DateTotals {
    pub fn hours(&self) -> DayHours {
        DayHours {
            consulting: self.total_consulting_hours,
            hands_on: self.total_hands_on_hours,
            squad: self.total_squad_hours,
            internal: self.total_internal_hours,
        }
    }

    /// Parsed calendar date; None for malformed entries (skipped upstream)
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCalendar {
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub working_days: Vec<String>,
}

/// A stored holiday. Dates may carry a time component
/// (`2024-03-28T00:00:00Z`); only the calendar date portion matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Holiday {
    /// Calendar date as stored, before any shift is applied
    pub fn stored_date(&self) -> Option<NaiveDate> {
        let date_part = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_format() {
        let json = r#"{
            "byDate": [
                {"date": "2024-03-15", "totalConsultingHours": 8},
                {"date": "2024-03-18", "totalHandsOnHours": 4, "totalSquadHours": 2}
            ],
            "businessCalendar": {
                "holidays": [{"date": "2024-03-28T00:00:00Z", "reason": "Good Friday"}],
                "workingDays": ["2024-03-15", "2024-03-18"]
            }
        }"#;

        let sheet: Timesheet = serde_json::from_str(json).unwrap();
        assert_eq!(sheet.by_date.len(), 2);
        assert_eq!(sheet.by_date[0].hours().consulting, 8.0);
        assert_eq!(sheet.by_date[0].hours().internal, 0.0);
        assert_eq!(sheet.by_date[1].hours().total(), 6.0);
        assert_eq!(sheet.business_calendar.holidays.len(), 1);
    }

    #[test]
    fn test_holiday_stored_date_strips_time() {
        let holiday = Holiday {
            date: "2024-03-28T00:00:00Z".to_string(),
            reason: None,
        };
        assert_eq!(
            holiday.stored_date(),
            NaiveDate::from_ymd_opt(2024, 3, 28)
        );
    }

    #[test]
    fn test_holiday_malformed_date() {
        let holiday = Holiday {
            date: "not-a-date".to_string(),
            reason: None,
        };
        assert!(holiday.stored_date().is_none());
    }

    #[test]
    fn test_day_hours_accessors() {
        let hours = DayHours {
            consulting: 3.0,
            hands_on: 2.0,
            squad: 1.0,
            internal: 0.5,
        };
        assert_eq!(hours.get(Category::Consulting), 3.0);
        assert_eq!(hours.get(Category::Internal), 0.5);
        assert_eq!(hours.total(), 6.5);
        assert!(!hours.is_zero());
        assert!(DayHours::default().is_zero());
    }
}
