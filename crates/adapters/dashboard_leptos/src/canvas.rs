//! [`ChartCanvas`] backed by plotters drawing on an HTML `<canvas>`.

use std::error::Error;
use std::f64::consts::TAU;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_canvas::CanvasBackend;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use casestats_view::chart::{ChartKind, ChartSpec, DOUGHNUT_CUTOUT, Legend};
use casestats_view::color::Color;
use casestats_view::format::format_count;
use casestats_view::registry::ChartCanvas;
use casestats_view::theme::Palette;

const FONT: &str = "sans-serif";
/// Spline samples between two data points.
const LINE_STEPS: usize = 12;
const MAX_LABEL_CHARS: usize = 12;

type Area = DrawingArea<CanvasBackend, Shift>;
type Chart<'a> = ChartContext<'a, CanvasBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type DrawResult = Result<(), Box<dyn Error>>;

/// A `<canvas>` element the registry draws one chart on.
pub struct PlottersCanvas {
    element: HtmlCanvasElement,
}

impl PlottersCanvas {
    /// Canvas element with the given DOM id, if present.
    pub fn find(id: &str) -> Option<Self> {
        let element = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Some(Self { element })
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    }
}

impl ChartCanvas for PlottersCanvas {
    type Error = String;

    fn clear(&self) {
        if let Some(ctx) = self.context() {
            ctx.clear_rect(
                0.0,
                0.0,
                f64::from(self.element.width()),
                f64::from(self.element.height()),
            );
        }
    }

    fn draw(&self, spec: &ChartSpec, palette: &Palette) -> Result<(), String> {
        let backend = CanvasBackend::with_canvas_object(self.element.clone())
            .ok_or_else(|| format!("{} canvas has no 2d context", spec.slot.name()))?;
        let root = backend.into_drawing_area();
        match spec.kind {
            ChartKind::Doughnut | ChartKind::Pie => draw_circular(&root, spec, palette),
            ChartKind::Bar => draw_bars(&root, spec, palette),
            ChartKind::Line => draw_line(&root, spec, palette),
        }
        .map_err(|err| err.to_string())?;
        root.present().map_err(|err| err.to_string())
    }
}

fn rgba(color: Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.alpha)
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('…');
    short
}

fn y_upper_bound(max: u64) -> f64 {
    if max == 0 { 1.0 } else { max as f64 * 1.1 }
}

/// Outline of a ring sector in pixel coordinates, y pointing down.
fn sector(center: (i32, i32), outer: f64, inner: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(2.0) as usize;
    let at = |radius: f64, angle: f64| {
        (
            center.0 + (radius * angle.cos()).round() as i32,
            center.1 + (radius * angle.sin()).round() as i32,
        )
    };
    let angle = |step: usize| start + sweep * step as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps).map(|s| at(outer, angle(s))).collect();
    if inner > 0.0 {
        points.extend((0..=steps).rev().map(|s| at(inner, angle(s))));
    } else {
        points.push(center);
    }
    points
}

fn draw_circular(root: &Area, spec: &ChartSpec, palette: &Palette) -> DrawResult {
    let (width, height) = root.dim_in_pixel();
    let (plot, legend) = match spec.legend {
        Legend::Right => {
            let (left, right) = root.split_horizontally((width * 3 / 5) as i32);
            (left, Some((right, false)))
        }
        Legend::Bottom => {
            let (top, bottom) = root.split_vertically((height * 4 / 5) as i32);
            (top, Some((bottom, true)))
        }
        Legend::Hidden => (root.clone(), None),
    };

    let (w, h) = plot.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let outer = f64::from(w.min(h)) / 2.0 - 8.0;
    let inner = if spec.kind == ChartKind::Doughnut {
        outer * DOUGHNUT_CUTOUT
    } else {
        0.0
    };

    for slice in spec.slices() {
        if slice.value == 0 {
            continue;
        }
        let outline = sector(center, outer, inner, slice.start, slice.sweep);
        plot.draw(&Polygon::new(outline, rgba(slice.color).filled()))?;
    }

    if let Some((area, horizontal)) = legend {
        let entries: Vec<(&str, Color)> = spec
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), spec.color_at(i)))
            .collect();
        draw_legend(&area, &entries, palette, horizontal)?;
    }
    Ok(())
}

fn draw_legend(area: &Area, entries: &[(&str, Color)], palette: &Palette, horizontal: bool) -> DrawResult {
    let font = (FONT, 12).into_font().color(&rgba(palette.text));
    let (width, _) = area.dim_in_pixel();
    let (mut x, mut y) = (12_i32, 12_i32);
    for (label, color) in entries {
        let text = short_label(label);
        area.draw(&Rectangle::new([(x, y), (x + 12, y + 12)], rgba(*color).filled()))?;
        area.draw(&Text::new(text.clone(), (x + 18, y), font.clone()))?;
        if horizontal {
            x += 36 + 7 * text.chars().count() as i32;
            if x > width as i32 - 60 {
                x = 12;
                y += 20;
            }
        } else {
            y += 20;
        }
    }
    Ok(())
}

fn cartesian<'a>(root: &'a Area, spec: &ChartSpec, x_range: std::ops::Range<f64>) -> Result<Chart<'a>, Box<dyn Error>> {
    let chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(32)
        .y_label_area_size(56)
        .build_cartesian_2d(x_range, 0.0..y_upper_bound(spec.max_value()))?;
    Ok(chart)
}

fn draw_mesh(chart: &mut Chart<'_>, spec: &ChartSpec, palette: &Palette) -> DrawResult {
    let text = rgba(palette.text);
    let grid = rgba(palette.grid);
    let no_label = |_: &f64| String::new();
    let count_label = |y: &f64| format_count(y.round() as u64);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .y_max_light_lines(0)
        .bold_line_style(grid.stroke_width(1))
        .axis_style(grid.stroke_width(1))
        .label_style((FONT, 12).into_font().color(&text))
        .x_label_formatter(&no_label)
        .y_label_formatter(&count_label);
    if let Some(description) = spec.series_label {
        mesh.y_desc(description);
    }
    mesh.draw()?;
    Ok(())
}

/// Category labels under the x axis, at most `spec.max_x_ticks` of them.
fn draw_x_labels(root: &Area, chart: &Chart<'_>, spec: &ChartSpec, palette: &Palette) -> DrawResult {
    let style = (FONT, 11)
        .into_font()
        .color(&rgba(palette.text))
        .pos(Pos::new(HPos::Center, VPos::Top));
    for i in spec.x_tick_indices() {
        let (x, y) = chart.backend_coord(&(i as f64, 0.0));
        root.draw(&Text::new(short_label(&spec.labels[i]), (x, y + 6), style.clone()))?;
    }
    Ok(())
}

fn draw_bars(root: &Area, spec: &ChartSpec, palette: &Palette) -> DrawResult {
    let slots = spec.values.len().max(1) as f64;
    let mut chart = cartesian(root, spec, -0.5..slots - 0.5)?;
    draw_mesh(&mut chart, spec, palette)?;

    let fill = rgba(spec.color_at(0)).filled();
    chart.draw_series(spec.values.iter().enumerate().map(|(i, value)| {
        let x = i as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *value as f64)], fill)
    }))?;

    draw_x_labels(root, &chart, spec, palette)
}

fn draw_line(root: &Area, spec: &ChartSpec, palette: &Palette) -> DrawResult {
    let last = spec.values.len().max(2) - 1;
    let mut chart = cartesian(root, spec, 0.0..last as f64)?;
    draw_mesh(&mut chart, spec, palette)?;

    let points = spec.line_points(LINE_STEPS);
    if let Some(style) = spec.line {
        chart.draw_series(AreaSeries::new(points.iter().copied(), 0.0, rgba(style.fill)))?;
    }
    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        rgba(spec.color_at(0)).stroke_width(2),
    ))?;

    draw_x_labels(root, &chart, spec, palette)
}
