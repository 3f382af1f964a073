// =============================================================================
// TWSE market data — monthly daily-trading report (STOCK_DAY)
// =============================================================================
//
// Each STOCK_DAY response covers one calendar month. Rows are string arrays:
//
//   [date, volume, turnover, open, high, low, close, change, transactions]
//
// Numbers use thousands separators ("1,085.00"); suspended sessions show
// "--". The title reads like "113年10月 2330 台積電   各日成交資訊".

pub mod client;

pub use client::TwseClient;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::types::StockCode;

/// Column holding the closing price.
const CLOSE_COLUMN: usize = 6;

/// Raw STOCK_DAY payload. Fields absent on error responses default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockDayResponse {
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Vec<Value>>>,
}

/// One month of parsed closes, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthReport {
    pub name: Option<String>,
    pub closes: Vec<f64>,
}

/// Closing prices gathered across one or more months, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct StockHistory {
    pub code: StockCode,
    pub name: Option<String>,
    pub closes: Vec<f64>,
}

impl StockHistory {
    /// "name (code)", using `fallback` when TWSE did not report a name.
    pub fn display_name(&self, fallback: &str) -> String {
        let name = self.name.as_deref().unwrap_or(fallback);
        format!("{name} ({})", self.code)
    }
}

/// Turn a STOCK_DAY payload into a month of closes.
///
/// Any `stat` other than "OK" yields an empty month.
pub fn parse_month(resp: &StockDayResponse, code: &StockCode) -> MonthReport {
    if resp.stat != "OK" {
        return MonthReport::default();
    }

    let closes = resp
        .data
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|row| row.get(CLOSE_COLUMN).and_then(parse_number))
        .collect();

    MonthReport {
        name: resp.title.as_deref().and_then(|t| name_from_title(t, code)),
        closes,
    }
}

/// Parse a TWSE numeric cell. Returns `None` for placeholders and
/// non-positive values.
pub fn parse_number(cell: &Value) -> Option<f64> {
    let value = match cell {
        Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// The token that follows the stock code in the report title.
pub fn name_from_title(title: &str, code: &StockCode) -> Option<String> {
    let mut tokens = title.split_whitespace();
    tokens.find(|t| *t == code.as_str())?;
    tokens.next().map(str::to_string)
}

/// First day of the month `back` months before `date`'s month.
pub fn month_start(date: NaiveDate, back: u32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 - back as i32;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}
