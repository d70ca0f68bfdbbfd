//! Layout and drawing for each chart kind.

use super::canvas::{palette, Canvas, AXIS, GRID, HEADER_FILL, INK};
use super::font::{fit_text, text_width};
use super::scale::{LinearScale, Ticks};
use super::spec::{CategorySeries, ChartBody, ChartSpec, PointSeries, TableData};
use super::ChartError;

pub const WIDTH: u32 = 640;
pub const HEIGHT: u32 = 420;

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;
const MARGIN_LEFT: i64 = 80;
const MARGIN_RIGHT: i64 = 24;
const MARGIN_TOP: i64 = 48;
const MARGIN_BOTTOM: i64 = 64;
const Y_TICK_TARGET: u32 = 5;

/// Plot area in pixels.
#[derive(Debug, Clone, Copy)]
struct Plot {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Plot {
    fn for_canvas(canvas: &Canvas) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: i64::from(canvas.width()) - MARGIN_RIGHT,
            bottom: i64::from(canvas.height()) - MARGIN_BOTTOM,
        }
    }

    fn width(&self) -> i64 {
        self.right - self.left
    }
}

/// Draw the full chart for `spec`, using `fallback_title` when the spec has
/// no title of its own.
pub fn draw(spec: &ChartSpec, fallback_title: &str) -> Result<Canvas, ChartError> {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);

    let title = spec
        .title
        .clone()
        .unwrap_or_else(|| fallback_title.trim().to_string());
    draw_title(&mut canvas, &title);

    match &spec.body {
        ChartBody::Bar(series) => {
            let plot = Plot::for_canvas(&canvas);
            let y = value_axis(&mut canvas, plot, &series.values)?;
            draw_bars(&mut canvas, plot, &y, series);
            category_labels(&mut canvas, plot, &series.labels);
            axis_titles(&mut canvas, plot, spec);
        }
        ChartBody::Line(series) => {
            let plot = Plot::for_canvas(&canvas);
            let y = value_axis(&mut canvas, plot, &series.values)?;
            draw_line_series(&mut canvas, plot, &y, series);
            category_labels(&mut canvas, plot, &series.labels);
            axis_titles(&mut canvas, plot, spec);
        }
        ChartBody::Scatter(points) => {
            let plot = Plot::for_canvas(&canvas);
            draw_scatter(&mut canvas, plot, points)?;
            axis_titles(&mut canvas, plot, spec);
        }
        ChartBody::Pie(series) => draw_pie(&mut canvas, series),
        ChartBody::Table(table) => draw_table(&mut canvas, table),
    }

    Ok(canvas)
}

fn draw_title(canvas: &mut Canvas, title: &str) {
    if title.is_empty() {
        return;
    }
    let max_width = canvas.width() - 16;
    let fitted = fit_text(title, max_width, TITLE_SCALE);
    let x = (i64::from(canvas.width()) - i64::from(text_width(&fitted, TITLE_SCALE))) / 2;
    canvas.text(x, 14, &fitted, TITLE_SCALE, INK);
}

struct ValueAxis {
    scale: LinearScale,
    zero: f64,
}

/// Horizontal gridlines, y tick labels and the two axis lines.
fn value_axis(canvas: &mut Canvas, plot: Plot, values: &[f64]) -> Result<ValueAxis, ChartError> {
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let ticks = Ticks::nice(min, max, Y_TICK_TARGET)?;
    let scale = LinearScale::new((ticks.start, ticks.end), (plot.bottom as f64, plot.top as f64))?;

    draw_y_ticks(canvas, plot, &ticks, scale);

    let zero = scale.project(0.0);
    canvas.line(plot.left, plot.top, plot.left, plot.bottom, AXIS);
    canvas.line(plot.left, zero.round() as i64, plot.right, zero.round() as i64, AXIS);

    Ok(ValueAxis { scale, zero })
}

fn draw_y_ticks(canvas: &mut Canvas, plot: Plot, ticks: &Ticks, scale: LinearScale) {
    let label_height = i64::from(Canvas::text_height(LABEL_SCALE));
    for value in ticks.values() {
        let y = scale.project(value).round() as i64;
        canvas.line(plot.left + 1, y, plot.right, y, GRID);
        canvas.line(plot.left - 4, y, plot.left, y, AXIS);
        let label = fit_text(&ticks.label(value), (MARGIN_LEFT - 12) as u32, LABEL_SCALE);
        let width = i64::from(text_width(&label, LABEL_SCALE));
        canvas.text(plot.left - 8 - width, y - label_height / 2, &label, LABEL_SCALE, INK);
    }
}

fn slot_center(plot: Plot, count: usize, index: usize) -> i64 {
    let slot = plot.width() as f64 / count as f64;
    plot.left + (slot * (index as f64 + 0.5)).round() as i64
}

fn draw_bars(canvas: &mut Canvas, plot: Plot, axis: &ValueAxis, series: &CategorySeries) {
    let count = series.values.len();
    let slot = plot.width() as f64 / count as f64;
    let bar_width = (slot * 0.7).max(1.0).round() as i64;

    for (index, value) in series.values.iter().enumerate() {
        let center = slot_center(plot, count, index);
        let y = axis.scale.project(*value);
        let top = y.min(axis.zero).round() as i64;
        let bottom = y.max(axis.zero).round() as i64;
        canvas.fill_rect(
            center - bar_width / 2,
            top,
            bar_width,
            (bottom - top).max(1),
            palette(index),
        );
    }
}

fn draw_line_series(canvas: &mut Canvas, plot: Plot, axis: &ValueAxis, series: &CategorySeries) {
    let count = series.values.len();
    let points: Vec<(i64, i64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            (
                slot_center(plot, count, index),
                axis.scale.project(*value).round() as i64,
            )
        })
        .collect();

    let color = palette(0);
    for pair in points.windows(2) {
        canvas.thick_line(pair[0].0, pair[0].1, pair[1].0, pair[1].1, 3, color);
    }
    for (x, y) in points {
        canvas.fill_circle(x, y, 4, color);
    }
}

/// Category names under the x axis, shortened to their slot width.
fn category_labels(canvas: &mut Canvas, plot: Plot, labels: &[String]) {
    let count = labels.len();
    let slot = (plot.width() as f64 / count as f64).floor() as u32;
    let max_width = slot.saturating_sub(4);
    for (index, label) in labels.iter().enumerate() {
        let fitted = fit_text(label, max_width, LABEL_SCALE);
        let width = i64::from(text_width(&fitted, LABEL_SCALE));
        let center = slot_center(plot, count, index);
        canvas.text(center - width / 2, plot.bottom + 8, &fitted, LABEL_SCALE, INK);
    }
}

fn axis_titles(canvas: &mut Canvas, plot: Plot, spec: &ChartSpec) {
    if let Some(x_label) = &spec.x_label {
        let fitted = fit_text(x_label, plot.width() as u32, LABEL_SCALE);
        let width = i64::from(text_width(&fitted, LABEL_SCALE));
        let x = plot.left + (plot.width() - width) / 2;
        let y = i64::from(canvas.height()) - 8 - i64::from(Canvas::text_height(LABEL_SCALE));
        canvas.text(x, y, &fitted, LABEL_SCALE, AXIS);
    }

    if let Some(y_label) = &spec.y_label {
        let height = (plot.bottom - plot.top) as u32;
        let fitted = fit_text(y_label, height, LABEL_SCALE);
        let width = i64::from(text_width(&fitted, LABEL_SCALE));
        let y = plot.bottom - (i64::from(height) - width) / 2;
        canvas.text_vertical(6, y, &fitted, LABEL_SCALE, AXIS);
    }
}

fn draw_scatter(canvas: &mut Canvas, plot: Plot, points: &PointSeries) -> Result<(), ChartError> {
    let y_axis = value_axis(canvas, plot, &points.ys)?;

    let x_min = points.xs.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = points.xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let x_ticks = Ticks::nice(x_min, x_max, 6)?;
    let x_scale = LinearScale::new(
        (x_ticks.start, x_ticks.end),
        (plot.left as f64, plot.right as f64),
    )?;

    for value in x_ticks.values() {
        let x = x_scale.project(value).round() as i64;
        canvas.line(x, plot.top, x, plot.bottom - 1, GRID);
        canvas.line(x, plot.bottom, x, plot.bottom + 4, AXIS);
        let label = x_ticks.label(value);
        let width = i64::from(text_width(&label, LABEL_SCALE));
        canvas.text(x - width / 2, plot.bottom + 8, &label, LABEL_SCALE, INK);
    }
    canvas.line(plot.left, plot.bottom, plot.right, plot.bottom, AXIS);

    let color = palette(0);
    for (x, y) in points.xs.iter().zip(&points.ys) {
        canvas.fill_circle(
            x_scale.project(*x).round() as i64,
            y_axis.scale.project(*y).round() as i64,
            5,
            color,
        );
    }
    Ok(())
}

fn draw_pie(canvas: &mut Canvas, series: &CategorySeries) {
    let total: f64 = series.values.iter().sum();
    let height = i64::from(canvas.height());
    let radius = ((height - MARGIN_TOP - 24) / 2).max(10);
    let cx = 24 + radius;
    let cy = MARGIN_TOP + 8 + radius;

    let mut start = 0.0;
    for (index, value) in series.values.iter().enumerate() {
        let sweep = value / total * std::f64::consts::TAU;
        let end = if index + 1 == series.values.len() {
            std::f64::consts::TAU + f64::EPSILON
        } else {
            start + sweep
        };
        canvas.fill_wedge(cx, cy, radius, start, end, palette(index));
        start = end;
    }

    // Legend
    let legend_x = cx + radius + 32;
    let row_height = i64::from(Canvas::text_height(LABEL_SCALE)) + 10;
    let max_width = (i64::from(canvas.width()) - legend_x - 24).max(0) as u32;
    for (index, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
        let y = MARGIN_TOP + 8 + index as i64 * row_height;
        if y + row_height > height {
            break;
        }
        canvas.fill_rect(legend_x, y, 10, 10, palette(index));
        let text = format!("{} {:.1}%", label, value / total * 100.0);
        let fitted = fit_text(&text, max_width, LABEL_SCALE);
        canvas.text(legend_x + 16, y, &fitted, LABEL_SCALE, INK);
    }
}

fn draw_table(canvas: &mut Canvas, table: &TableData) {
    let column_count = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.columns.len()))
        .max()
        .unwrap_or(1)
        .max(1);

    let left = 16;
    let top = MARGIN_TOP;
    let width = i64::from(canvas.width()) - 32;
    let column_width = width / column_count as i64;
    let row_height = i64::from(Canvas::text_height(LABEL_SCALE)) + 14;
    let has_header = !table.columns.is_empty();
    let max_rows = ((i64::from(canvas.height()) - top - 8) / row_height) as usize;

    let mut rows: Vec<&[String]> = Vec::new();
    if has_header {
        rows.push(&table.columns);
    }
    rows.extend(table.rows.iter().map(Vec::as_slice));
    rows.truncate(max_rows);

    for (row_index, cells) in rows.iter().enumerate() {
        let y = top + row_index as i64 * row_height;
        if has_header && row_index == 0 {
            canvas.fill_rect(left, y, column_width * column_count as i64, row_height, HEADER_FILL);
        }
        for column in 0..column_count {
            let x = left + column as i64 * column_width;
            canvas.stroke_rect(x, y, column_width + 1, row_height + 1, AXIS);
            if let Some(cell) = cells.get(column) {
                let fitted = fit_text(cell, (column_width - 12).max(0) as u32, LABEL_SCALE);
                canvas.text(x + 6, y + 7, &fitted, LABEL_SCALE, INK);
            }
        }
    }
}
