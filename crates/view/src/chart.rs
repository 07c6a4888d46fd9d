//! Chart slots and the per-slot chart description.
//!
//! A [`ChartSpec`] carries everything a canvas backend needs to draw one
//! chart: kind, labels, values and colors. It is rebuilt from the
//! dashboard record on every refresh.

use std::f64::consts::{FRAC_PI_2, TAU};

use casestats_domain::counts::Counts;
use casestats_domain::dashboard::DashboardData;

use crate::color::Color;

const BLUE: Color = Color::rgb(0x3B, 0x82, 0xF6);
const RED: Color = Color::rgb(0xEF, 0x44, 0x44);
const GREEN: Color = Color::rgb(0x10, 0xB9, 0x81);
const AMBER: Color = Color::rgb(0xF5, 0x9E, 0x0B);
const INDIGO: Color = Color::rgb(0x63, 0x66, 0xF1);
const VIOLET: Color = Color::rgb(0x8B, 0x5C, 0xF6);
const PINK: Color = Color::rgb(0xEC, 0x48, 0x99);
const GRAY: Color = Color::rgb(0x9C, 0xA3, 0xAF);

const STATUS_COLORS: [Color; 6] = [BLUE, RED, GREEN, AMBER, INDIGO, VIOLET];
const GENDER_COLORS: [Color; 3] = [PINK, BLUE, GRAY];
const DEATHS_FILL: Color = Color::rgba(239, 68, 68, 0.2);

/// Fraction of the radius left empty in the middle of a doughnut.
pub const DOUGHNUT_CUTOUT: f64 = 0.5;

/// One of the five visualization targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartSlot {
    Status,
    Cities,
    Gender,
    Age,
    Deaths,
}

impl ChartSlot {
    /// Every slot, in render order.
    pub const ALL: [Self; 5] = [
        Self::Status,
        Self::Cities,
        Self::Gender,
        Self::Age,
        Self::Deaths,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Cities => "cities",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::Deaths => "deaths",
        }
    }

    /// DOM id of the `<canvas>` bound to this slot.
    #[must_use]
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Status => "statusChart",
            Self::Cities => "citiesChart",
            Self::Gender => "genderChart",
            Self::Age => "ageChart",
            Self::Deaths => "deathsChart",
        }
    }

    /// Heading shown above the canvas.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Status => "Casos por estado",
            Self::Cities => "Top 10 ciudades",
            Self::Gender => "Distribución por sexo",
            Self::Age => "Distribución por edad",
            Self::Deaths => "Fallecidos en el tiempo",
        }
    }

    fn counts(self, data: &DashboardData) -> &Counts {
        match self {
            Self::Status => &data.cases_by_status,
            Self::Cities => &data.top_cities,
            Self::Gender => &data.gender_distribution,
            Self::Age => &data.age_distribution,
            Self::Deaths => &data.deaths_over_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    Pie,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legend {
    Hidden,
    Right,
    Bottom,
}

/// Area fill and curve smoothing for line charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub fill: Color,
    pub tension: f64,
}

/// Complete description of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Series colors, cycled per data point for pie and doughnut charts.
    pub colors: Vec<Color>,
    pub series_label: Option<&'static str>,
    pub legend: Legend,
    pub line: Option<LineStyle>,
    /// Upper bound on x-axis tick labels.
    pub max_x_ticks: Option<usize>,
}

/// One pie or doughnut sector, angles in radians.
///
/// Angles start at 12 o'clock and grow clockwise in screen coordinates
/// (y pointing down).
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    pub label: &'a str,
    pub value: u64,
    pub color: Color,
    pub start: f64,
    pub sweep: f64,
}

impl ChartSpec {
    /// Build the spec for `slot` from a dashboard record.
    #[must_use]
    pub fn for_slot(slot: ChartSlot, data: &DashboardData) -> Self {
        let counts = slot.counts(data);
        let mut spec = Self {
            slot,
            kind: ChartKind::Bar,
            labels: counts.labels().map(str::to_string).collect(),
            values: counts.values().collect(),
            colors: Vec::new(),
            series_label: None,
            legend: Legend::Hidden,
            line: None,
            max_x_ticks: None,
        };
        match slot {
            ChartSlot::Status => {
                spec.kind = ChartKind::Doughnut;
                spec.colors = STATUS_COLORS.to_vec();
                spec.legend = Legend::Right;
            }
            ChartSlot::Cities => {
                spec.colors = vec![BLUE];
                spec.series_label = Some("Casos");
            }
            ChartSlot::Gender => {
                spec.kind = ChartKind::Pie;
                spec.colors = GENDER_COLORS.to_vec();
                spec.legend = Legend::Bottom;
            }
            ChartSlot::Age => {
                spec.colors = vec![GREEN];
                spec.series_label = Some("Casos");
            }
            ChartSlot::Deaths => {
                spec.kind = ChartKind::Line;
                spec.colors = vec![RED];
                spec.series_label = Some("Fallecidos");
                spec.line = Some(LineStyle {
                    fill: DEATHS_FILL,
                    tension: 0.4,
                });
                spec.max_x_ticks = Some(10);
            }
        }
        spec
    }

    /// Color for the data point at `index`, cycling through [`colors`](Self::colors).
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return GRAY;
        }
        self.colors[index % self.colors.len()]
    }

    /// Largest value, or zero for an empty chart.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Sectors for pie and doughnut charts. Empty when all values are zero.
    #[must_use]
    pub fn slices(&self) -> Vec<Slice<'_>> {
        let total: u64 = self.values.iter().sum();
        if total == 0 {
            return Vec::new();
        }
        #[allow(clippy::cast_precision_loss)]
        let total = total as f64;
        let mut start = -FRAC_PI_2;
        self.labels
            .iter()
            .zip(&self.values)
            .enumerate()
            .map(|(i, (label, &value))| {
                #[allow(clippy::cast_precision_loss)]
                let sweep = TAU * value as f64 / total;
                let slice = Slice {
                    label,
                    value,
                    color: self.color_at(i),
                    start,
                    sweep,
                };
                start += sweep;
                slice
            })
            .collect()
    }

    /// Polyline for a line chart, point `i` at `x = i`.
    ///
    /// With a non-zero [`LineStyle::tension`] each segment is replaced by
    /// `steps` samples of a cardinal spline through the data points. The
    /// curve passes through every data point and never dips below zero.
    #[must_use]
    pub fn line_points(&self, steps: usize) -> Vec<(f64, f64)> {
        #[allow(clippy::cast_precision_loss)]
        let raw: Vec<(f64, f64)> = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v as f64))
            .collect();
        let tension = self.line.map_or(0.0, |line| line.tension);
        if raw.len() < 3 || tension <= 0.0 || steps < 2 {
            return raw;
        }

        let last = raw.len() - 1;
        let tangent = |i: usize| {
            let (x0, y0) = raw[i.saturating_sub(1)];
            let (x1, y1) = raw[(i + 1).min(last)];
            (tension * (x1 - x0), tension * (y1 - y0))
        };

        let mut points = Vec::with_capacity(last * steps + 1);
        for i in 0..last {
            let (x0, y0) = raw[i];
            let (x1, y1) = raw[i + 1];
            let (mx0, my0) = tangent(i);
            let (mx1, my1) = tangent(i + 1);
            for step in 0..steps {
                #[allow(clippy::cast_precision_loss)]
                let t = step as f64 / steps as f64;
                let (t2, t3) = (t * t, t * t * t);
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + t;
                let h01 = 3.0 * t2 - 2.0 * t3;
                let h11 = t3 - t2;
                let x = h00 * x0 + h10 * mx0 + h01 * x1 + h11 * mx1;
                let y = h00 * y0 + h10 * my0 + h01 * y1 + h11 * my1;
                points.push((x, y.max(0.0)));
            }
        }
        points.push(raw[last]);
        points
    }

    /// Indices of the x labels to print, at most `max_x_ticks`, evenly spaced.
    #[must_use]
    pub fn x_tick_indices(&self) -> Vec<usize> {
        let len = self.labels.len();
        let limit = self.max_x_ticks.unwrap_or(len).max(1);
        if len <= limit {
            return (0..len).collect();
        }
        let step = len.div_ceil(limit);
        (0..len).step_by(step).collect()
    }
}
