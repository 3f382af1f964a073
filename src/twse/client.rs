// =============================================================================
// TWSE REST client
// =============================================================================
//
// Public endpoint, no authentication. One month per request; the history
// fetch walks backwards month by month until it has enough sessions or runs
// out of its month budget.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use tracing::{debug, info, instrument};

use super::{month_start, parse_month, MonthReport, StockDayResponse, StockHistory};
use crate::types::StockCode;

/// Taiwan is UTC+8 all year.
const TAIPEI_OFFSET_SECS: i32 = 8 * 3600;

/// Today's date on the exchange's calendar.
pub fn taipei_today() -> NaiveDate {
    match FixedOffset::east_opt(TAIPEI_OFFSET_SECS) {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Utc::now().date_naive(),
    }
}

#[derive(Clone)]
pub struct TwseClient {
    base_url: String,
    history_months: u32,
    client: reqwest::Client,
}

impl TwseClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        history_months: u32,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build TWSE http client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, history_months, "TwseClient initialised");

        Ok(Self {
            base_url,
            history_months: history_months.max(1),
            client,
        })
    }

    /// GET /exchangeReport/STOCK_DAY for the month containing `month`.
    #[instrument(skip(self, code), fields(code = %code), name = "twse::fetch_month")]
    pub async fn fetch_month(&self, code: &StockCode, month: NaiveDate) -> Result<MonthReport> {
        let url = format!("{}/exchangeReport/STOCK_DAY", self.base_url);
        let date = month.format("%Y%m%d").to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("response", "json"),
                ("date", date.as_str()),
                ("stockNo", code.as_str()),
            ])
            .send()
            .await
            .context("GET STOCK_DAY request failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("TWSE STOCK_DAY returned {status} for {code} ({date})");
        }

        let body: StockDayResponse = resp
            .json()
            .await
            .context("failed to parse STOCK_DAY response")?;

        let report = parse_month(&body, code);
        debug!(stat = %body.stat, closes = report.closes.len(), "STOCK_DAY month parsed");
        Ok(report)
    }

    /// Collect at least `min_closes` closes ending at `today`'s month, walking
    /// back at most `history_months` months. Fewer closes are returned when
    /// the budget runs out; the caller decides whether that is enough.
    #[instrument(skip(self, code), fields(code = %code), name = "twse::fetch_history")]
    pub async fn fetch_history(
        &self,
        code: &StockCode,
        today: NaiveDate,
        min_closes: usize,
    ) -> Result<StockHistory> {
        let mut closes: Vec<f64> = Vec::new();
        let mut name: Option<String> = None;

        for back in 0..self.history_months {
            let Some(month) = month_start(today, back) else {
                break;
            };
            let report = self.fetch_month(code, month).await?;

            let mut merged = report.closes;
            merged.extend_from_slice(&closes);
            closes = merged;
            if name.is_none() {
                name = report.name;
            }

            if closes.len() >= min_closes {
                break;
            }
        }

        info!(closes = closes.len(), name = ?name, "price history collected");

        Ok(StockHistory {
            code: code.clone(),
            name,
            closes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Local STOCK_DAY stand-in: October holds 8 sessions from 300, September
    /// 9 from 200, August 22 from 100. Other months report no data.
    async fn stock_day(
        State(calls): State<Arc<AtomicUsize>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        calls.fetch_add(1, Ordering::SeqCst);
        let month = params
            .get("date")
            .and_then(|d| d.get(4..6))
            .unwrap_or_default()
            .to_string();
        let (name, base, sessions) = match month.as_str() {
            "10" => ("台積電", 300.0, 8),
            "09" => ("TSMC", 200.0, 9),
            "08" => ("TSMC", 100.0, 22),
            _ => return Json(json!({ "stat": "很抱歉，沒有符合條件的資料!" })),
        };
        let data: Vec<Value> = (0..sessions)
            .map(|i| {
                let close = format!("{:.2}", base + i as f64);
                json!(["113/10/01", "1,000", "1,000", "--", "--", "--", close, "+0.00", "10"])
            })
            .collect();
        Json(json!({
            "stat": "OK",
            "title": format!("113年{month}月 2330 {name}           各日成交資訊"),
            "data": data,
        }))
    }

    async fn stub_exchange() -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/exchangeReport/STOCK_DAY", get(stock_day))
            .with_state(calls.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), calls)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 15).unwrap()
    }

    fn tsmc() -> StockCode {
        StockCode::parse("2330").unwrap()
    }

    #[tokio::test]
    async fn history_merges_older_months_first() {
        let (base, calls) = stub_exchange().await;
        let client = TwseClient::new(base, Duration::from_secs(5), 3).unwrap();

        let history = client.fetch_history(&tsmc(), today(), 20).await.unwrap();
        assert_eq!(history.closes.len(), 39);
        assert_eq!(history.closes.first(), Some(&100.0));
        assert_eq!(history.closes[22], 200.0);
        assert_eq!(history.closes[31], 300.0);
        assert_eq!(history.closes.last(), Some(&307.0));
        assert_eq!(history.name.as_deref(), Some("台積電"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn history_stops_once_enough_closes() {
        let (base, calls) = stub_exchange().await;
        let client = TwseClient::new(base, Duration::from_secs(5), 6).unwrap();

        let history = client.fetch_history(&tsmc(), today(), 10).await.unwrap();
        assert_eq!(history.closes.len(), 17);
        assert_eq!(history.closes.first(), Some(&200.0));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn history_respects_month_budget() {
        let (base, calls) = stub_exchange().await;
        let client = TwseClient::new(base, Duration::from_secs(5), 2).unwrap();

        let history = client.fetch_history(&tsmc(), today(), 20).await.unwrap();
        assert_eq!(history.closes.len(), 17);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(history.display_name("2330"), "台積電 (2330)");
    }

    #[tokio::test]
    async fn history_of_empty_months_is_empty() {
        let (base, calls) = stub_exchange().await;
        let client = TwseClient::new(base, Duration::from_secs(5), 2).unwrap();
        let march = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let history = client.fetch_history(&tsmc(), march, 20).await.unwrap();
        assert!(history.closes.is_empty());
        assert_eq!(history.name, None);
        assert_eq!(history.display_name("台積電"), "台積電 (2330)");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn client_trims_base_url_and_floors_budget() {
        let client = TwseClient::new("https://example.test/", Duration::from_secs(1), 0).unwrap();
        assert_eq!(client.base_url, "https://example.test");
        assert_eq!(client.history_months, 1);
    }

    #[test]
    fn taipei_today_is_close_to_utc() {
        let utc = Utc::now().date_naive();
        let diff = (taipei_today() - utc).num_days();
        assert!((0..=1).contains(&diff));
    }
}
