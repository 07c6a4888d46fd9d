//! Filters narrowing a dashboard query.

use serde::{Deserialize, Deserializer, Serialize};

/// User-selected constraints on the case rows feeding the dashboard.
///
/// Empty or whitespace-only values are treated as absent, both when built
/// through the setters and when deserialised from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFilter {
    #[serde(default, deserialize_with = "non_blank")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub city: Option<String>,
}

impl CaseFilter {
    /// A filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = normalize(gender.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = normalize(department.into());
        self
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = normalize(city.into());
        self
    }

    /// `true` when no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.department.is_none() && self.city.is_none()
    }

    /// Percent-encoded query string without the leading `?`.
    ///
    /// Parameters appear in the order `gender`, `department`, `city`;
    /// absent ones are omitted. An empty filter yields an empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        [
            ("gender", &self.gender),
            ("department", &self.department),
            ("city", &self.city),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn non_blank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(normalize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_query_with_both_dashboard_filters() {
        let filter = CaseFilter::new().gender("F").department("Lima");
        assert_eq!(filter.to_query_string(), "gender=F&department=Lima");
    }

    #[test]
    fn should_omit_empty_filters() {
        let filter = CaseFilter::new().gender("").department("ANTIOQUIA");
        assert_eq!(filter.to_query_string(), "department=ANTIOQUIA");
        assert!(CaseFilter::new().gender("  ").is_empty());
        assert_eq!(CaseFilter::new().to_query_string(), "");
    }

    #[test]
    fn should_percent_encode_values() {
        let filter = CaseFilter::new().department("VALLE DEL CAUCA").city("A&B");
        assert_eq!(
            filter.to_query_string(),
            "department=VALLE%20DEL%20CAUCA&city=A%26B"
        );
    }

    #[test]
    fn should_treat_blank_json_values_as_absent() {
        let filter: CaseFilter =
            serde_json::from_str(r#"{"gender": "", "department": "BOGOTA"}"#).unwrap();
        assert_eq!(filter.gender, None);
        assert_eq!(filter.department.as_deref(), Some("BOGOTA"));
        assert_eq!(filter.city, None);
    }

    #[test]
    fn should_trim_surrounding_whitespace() {
        let filter: CaseFilter =
            serde_json::from_str(r#"{"department": " LIMA ", "gender": "f\t"}"#).unwrap();
        assert_eq!(filter.department.as_deref(), Some("LIMA"));
        assert_eq!(filter.gender.as_deref(), Some("f"));
        assert_eq!(
            CaseFilter::new().city("  CALI").to_query_string(),
            "city=CALI"
        );
    }
}
