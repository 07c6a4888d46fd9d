//! Age brackets used by the age distribution chart.

use std::fmt;

/// A half-open age range in years.
///
/// Brackets are ten years wide from 0 to 100, with a final `100+` bracket
/// covering `[100, 120)`. Labels follow the dashboard's historical naming,
/// so `[10, 20)` reads `11-20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    UpTo10,
    From11To20,
    From21To30,
    From31To40,
    From41To50,
    From51To60,
    From61To70,
    From71To80,
    From81To90,
    From91To100,
    Over100,
}

impl AgeBracket {
    /// Every bracket in ascending order.
    pub const ALL: [Self; 11] = [
        Self::UpTo10,
        Self::From11To20,
        Self::From21To30,
        Self::From31To40,
        Self::From41To50,
        Self::From51To60,
        Self::From61To70,
        Self::From71To80,
        Self::From81To90,
        Self::From91To100,
        Self::Over100,
    ];

    /// Upper bound (exclusive) of the last bracket.
    pub const MAX_AGE: f64 = 120.0;

    /// Classify an age in years.
    ///
    /// Returns `None` for negative, non-finite, or `>= 120` values.
    #[must_use]
    pub fn from_years(years: f64) -> Option<Self> {
        if !years.is_finite() || years < 0.0 || years >= Self::MAX_AGE {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let decade = (years / 10.0).floor() as usize;
        Some(Self::ALL[decade.min(Self::ALL.len() - 1)])
    }

    /// Display label (`"0-10"`, `"11-20"`, …, `"100+"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::UpTo10 => "0-10",
            Self::From11To20 => "11-20",
            Self::From21To30 => "21-30",
            Self::From31To40 => "31-40",
            Self::From41To50 => "41-50",
            Self::From51To60 => "51-60",
            Self::From61To70 => "61-70",
            Self::From71To80 => "71-80",
            Self::From81To90 => "81-90",
            Self::From91To100 => "91-100",
            Self::Over100 => "100+",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
