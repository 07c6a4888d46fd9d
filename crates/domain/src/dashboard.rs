//! The dashboard record: one aggregated snapshot per `/api/data` response.

use serde::{Deserialize, Serialize};

use crate::counts::Counts;

/// Aggregated case statistics for one filter combination.
///
/// Produced by the server, consumed once by the browser and then discarded.
/// The browser trusts the shape as given; mappings keep their key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub total_cases: u64,
    pub total_deaths: u64,
    #[serde(default)]
    pub cases_by_status: Counts,
    #[serde(default)]
    pub top_cities: Counts,
    #[serde(default)]
    pub age_distribution: Counts,
    #[serde(default)]
    pub gender_distribution: Counts,
    /// Deaths per calendar day, chronological.
    #[serde(default)]
    pub deaths_over_time: Counts,
    /// Department names for the filter dropdown, sorted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_departments: Option<Vec<String>>,
    /// City names within the selected department, sorted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_cities: Option<Vec<String>>,
}

impl DashboardData {
    /// Department options, or an empty slice when the server sent none.
    #[must_use]
    pub fn departments(&self) -> &[String] {
        self.available_departments.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_response_without_available_departments() {
        let json = r#"{
            "total_cases": 12,
            "total_deaths": 1,
            "cases_by_status": {"recuperado": 11, "fallecido": 1},
            "top_cities": {"Lima": 12},
            "age_distribution": {"0-10": 2, "11-20": 10},
            "gender_distribution": {"F": 5, "M": 7},
            "deaths_over_time": {"2020-04-01": 1}
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();

        assert_eq!(data.total_cases, 12);
        assert!(data.available_departments.is_none());
        assert!(data.departments().is_empty());
        assert_eq!(data.gender_distribution.get("M"), Some(7));
    }

    #[test]
    fn should_omit_missing_lists_when_serializing() {
        let json = serde_json::to_value(DashboardData::default()).unwrap();
        assert!(json.get("available_departments").is_none());
        assert_eq!(json["total_cases"], 0);
        assert!(json["cases_by_status"].as_object().unwrap().is_empty());
    }

    #[test]
    fn should_expose_department_options_in_order() {
        let data = DashboardData {
            available_departments: Some(vec!["ANTIOQUIA".into(), "BOGOTA".into()]),
            ..DashboardData::default()
        };
        assert_eq!(data.departments(), ["ANTIOQUIA", "BOGOTA"]);
    }
}
