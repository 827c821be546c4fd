use chrono::NaiveDate;
use polars::prelude::{col, lit, DataFrame, IntoLazy, NamedFrom, Series};

use crate::esg::data::models::{PricePoint, ReturnPoint};

pub fn prices_to_df(prices: &[PricePoint]) -> anyhow::Result<DataFrame> {
  let dates: Vec<String> = prices.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect();
  let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();

  let df: DataFrame = DataFrame::new(vec![
    Series::new("date",  &dates),
    Series::new("close", &closes),
  ])?;
  return Ok(df);
}

/// Adds a `return` column: close over previous close minus one, with the
/// first row fixed at 0. No smoothing or outlier handling.
pub fn with_daily_returns(df: DataFrame) -> anyhow::Result<DataFrame> {
  let previous_close = col("close").shift(lit(1));
  let out: DataFrame = df
    .lazy()
    .with_column(((col("close") / previous_close) - lit(1.0)).fill_null(lit(0.0)).alias("return"))
    .collect()?;
  return Ok(out);
}

pub fn daily_returns(prices: &[PricePoint]) -> anyhow::Result<Vec<ReturnPoint>> {
  if prices.is_empty() {
    return Ok(Vec::new());
  }

  let df: DataFrame = with_daily_returns(prices_to_df(prices)?)?;
  let returns = df.column("return")?.f64()?;

  let points: Vec<ReturnPoint> = prices.iter().zip(returns.into_iter()).map(|(price, value)| {
    ReturnPoint { date: price.date, value: value.unwrap_or(0.0) }
  }).collect();

  log::debug!("Computed {} daily returns", points.len());
  Ok(points)
}

pub fn price_point(date: NaiveDate, close: f64) -> PricePoint {
  PricePoint { date, close }
}
