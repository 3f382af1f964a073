// =============================================================================
// Query pipeline — text -> symbol -> price history -> indicators -> report
// =============================================================================
//
// Shared by the chat webhook and the admin REST endpoint. Each query is
// independent; nothing here is cached between calls.

use anyhow::Result;
use tracing::{info, warn};

use crate::advisory::{classify_localized, AdvisoryReport};
use crate::app_state::AppState;
use crate::indicators::engine::WINDOW;
use crate::indicators::{compute_indicators, IndicatorError, PriceSeries};
use crate::twse::client::taipei_today;
use crate::twse::StockHistory;
use crate::types::{Locale, Quote};

/// Non-error results of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Report(Box<AdvisoryReport>),
    UnknownSymbol,
    InsufficientData { actual: usize },
}

/// Compute the report for an already-fetched history.
///
/// `fallback_name` is shown when the exchange did not report a name.
pub fn build_report(
    history: &StockHistory,
    fallback_name: &str,
    locale: Locale,
) -> Result<AdvisoryReport, IndicatorError> {
    let series = PriceSeries::from_closes(history.closes.clone());
    let indicators = compute_indicators(&series)?;
    let Some(latest_close) = series.latest() else {
        return Err(IndicatorError::InsufficientData {
            required: WINDOW,
            actual: 0,
        });
    };

    let quote = Quote {
        latest_close,
        display_name: history.display_name(fallback_name),
        symbol: history.code.clone(),
    };
    Ok(classify_localized(&quote, &indicators, locale))
}

/// Run one query end to end. Network and payload failures are returned as
/// errors; the caller turns them into a retry-later reply.
pub async fn analyze(state: &AppState, query: &str, locale: Locale) -> Result<Outcome> {
    let Some(resolved) = state.resolver.resolve(query) else {
        info!(query, "query did not resolve to a stock code");
        return Ok(Outcome::UnknownSymbol);
    };

    let history = match state
        .twse
        .fetch_history(&resolved.code, taipei_today(), WINDOW)
        .await
    {
        Ok(history) => history,
        Err(e) => {
            state.record_failed();
            return Err(e);
        }
    };

    match build_report(&history, &resolved.query, locale) {
        Ok(report) => {
            state.record_served();
            info!(
                symbol = %resolved.code,
                trend = ?report.trend_label,
                volatility = ?report.volatility_label,
                "analysis complete"
            );
            Ok(Outcome::Report(Box::new(report)))
        }
        Err(IndicatorError::InsufficientData { actual, .. }) => {
            warn!(
                symbol = %resolved.code,
                actual,
                required = WINDOW,
                "not enough closes for analysis"
            );
            Ok(Outcome::InsufficientData { actual })
        }
    }
}
