//! Case rows as published by the open-data portal.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::age::AgeBracket;

/// Status label (lower-cased) marking a deceased case.
pub const DECEASED: &str = "fallecido";

/// One reported case. Every field is optional: upstream rows are sparse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default, alias = "DEPARTAMENTO_NOM")]
    pub departamento_nom: Option<String>,
    #[serde(default, alias = "CIUDAD_MUNICIPIO_NOM")]
    pub ciudad_municipio_nom: Option<String>,
    #[serde(default, alias = "SEXO")]
    pub sexo: Option<String>,
    /// Age in years; the portal sends it as a string, some exports as a number.
    #[serde(default, alias = "EDAD", deserialize_with = "number_or_string")]
    pub edad: Option<f64>,
    #[serde(default, alias = "ESTADO")]
    pub estado: Option<String>,
    #[serde(default, alias = "FECHA_MUERTE")]
    pub fecha_muerte: Option<String>,
}

impl CaseRecord {
    /// Department name, if present and non-empty.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        non_empty(self.departamento_nom.as_deref())
    }

    /// City name, if present and non-empty.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        non_empty(self.ciudad_municipio_nom.as_deref())
    }

    /// Upper-cased gender label.
    #[must_use]
    pub fn gender(&self) -> Option<String> {
        non_empty(self.sexo.as_deref()).map(str::to_uppercase)
    }

    /// Lower-cased status label.
    #[must_use]
    pub fn status(&self) -> Option<String> {
        non_empty(self.estado.as_deref()).map(str::to_lowercase)
    }

    /// `true` when the status reads `fallecido` in any case.
    #[must_use]
    pub fn is_deceased(&self) -> bool {
        self.status().is_some_and(|s| s == DECEASED)
    }

    /// Age bracket, when the age is known and in range.
    #[must_use]
    pub fn age_bracket(&self) -> Option<AgeBracket> {
        self.edad.and_then(AgeBracket::from_years)
    }

    /// Calendar day of death, when present and parseable.
    #[must_use]
    pub fn death_date(&self) -> Option<NaiveDate> {
        non_empty(self.fecha_muerte.as_deref()).and_then(parse_date)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parse the date formats seen in portal exports. Day-first for slashed dates.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
