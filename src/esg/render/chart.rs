use serde::Serialize;

use crate::esg::data::models::ReturnPoint;

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 280.0;
const PADDING: f64 = 32.0;

/// Geometry of the daily-return line chart, ready for an SVG `<polyline>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
  pub width: f64,
  pub height: f64,
  pub points: String,
  pub zero_y: f64,
  pub label_y: f64,
  pub last_label_x: f64,
  pub top_label: String,
  pub bottom_label: String,
  pub first_date: String,
  pub last_date: String,
}

pub fn percent(value: f64) -> String {
  format!("{:.2}%", value * 100.0)
}

pub fn line_chart(returns: &[ReturnPoint]) -> Option<LineChart> {
  let first = returns.first()?;
  let last = returns.last()?;

  // The y range always includes the zero baseline.
  let hi: f64 = returns.iter().map(|r| r.value).filter(|v| v.is_finite()).fold(0.0, f64::max);
  let lo: f64 = returns.iter().map(|r| r.value).filter(|v| v.is_finite()).fold(0.0, f64::min);
  let span: f64 = if hi - lo > f64::EPSILON { hi - lo } else { 1.0 };

  let plot_w: f64 = CHART_WIDTH - 2.0 * PADDING;
  let plot_h: f64 = CHART_HEIGHT - 2.0 * PADDING;
  let step: f64 = if returns.len() > 1 { plot_w / (returns.len() - 1) as f64 } else { 0.0 };
  let y_of = |v: f64| PADDING + (hi - v.clamp(lo, hi)) / span * plot_h;

  let points: String = returns.iter().enumerate()
    .map(|(i, r)| {
      let x: f64 = if returns.len() > 1 { PADDING + i as f64 * step } else { CHART_WIDTH / 2.0 };
      format!("{:.1},{:.1}", x, y_of(r.value))
    })
    .collect::<Vec<String>>()
    .join(" ");

  Some(LineChart {
    width: CHART_WIDTH,
    height: CHART_HEIGHT,
    points,
    zero_y: y_of(0.0),
    label_y: CHART_HEIGHT - 4.0,
    last_label_x: CHART_WIDTH - 100.0,
    top_label: percent(hi),
    bottom_label: percent(lo),
    first_date: first.date.format("%Y-%m-%d").to_string(),
    last_date: last.date.format("%Y-%m-%d").to_string(),
  })
}
