// =============================================================================
// Advisory Classifier
// =============================================================================
//
// Maps an `IndicatorSet` plus the latest quote onto qualitative labels and
// canned advice. Classification is locale-independent; only the text fields
// of the report change with the requested locale. The classifier never fails:
// NaN inputs flow through as NaN percentages and fall into the last branch of
// each rule.

pub mod labels;
pub mod narrative;

use serde::Serialize;
use tracing::debug;

use crate::indicators::IndicatorSet;
use crate::types::{Locale, Quote};

pub use labels::{
    BandPosition, Continuity, RsiZone, StructureLabel, TrendLabel, VolatilityLabel,
};

/// Everything a presentation layer needs to render one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryReport {
    pub quote: Quote,
    pub indicators: IndicatorSet,
    pub trend_label: TrendLabel,
    pub trend_strength_pct: f64,
    pub continuity: Continuity,
    pub volatility_label: VolatilityLabel,
    pub volatility_pct: f64,
    pub structure_label: StructureLabel,
    pub rsi_zone: RsiZone,
    pub band_position: BandPosition,
    pub interpretation_text: String,
    pub advice_text: String,
    pub disclaimer: &'static str,
    pub locale: Locale,
}

/// Classify with English phrasing.
pub fn classify(quote: &Quote, ind: &IndicatorSet) -> AdvisoryReport {
    classify_localized(quote, ind, Locale::En)
}

pub fn classify_localized(quote: &Quote, ind: &IndicatorSet, locale: Locale) -> AdvisoryReport {
    let strength = labels::trend_strength_pct(ind.ma5, ind.ma20);
    let volatility = labels::volatility_pct(ind.boll_upper, ind.boll_lower, ind.ma20);

    let trend_label = labels::classify_trend(ind.ma5, ind.ma20, strength);
    let continuity = labels::classify_continuity(strength);
    let volatility_label = labels::classify_volatility(volatility);
    let structure_label = labels::classify_structure(strength, volatility);
    let rsi_zone = labels::classify_rsi(ind.rsi14);
    let band_position =
        labels::classify_band_position(quote.latest_close, ind.boll_upper, ind.boll_lower);

    let interpretation_text = narrative::interpretation(
        ind.ma5 > ind.ma20,
        ind.rsi14,
        rsi_zone,
        band_position,
        locale,
    );
    let advice_text =
        narrative::advice(trend_label, rsi_zone, volatility_label, structure_label, locale);

    debug!(
        symbol = %quote.symbol,
        trend = ?trend_label,
        strength = format!("{strength:.2}"),
        volatility = format!("{volatility:.2}"),
        structure = ?structure_label,
        "advisory classification complete"
    );

    AdvisoryReport {
        quote: quote.clone(),
        indicators: *ind,
        trend_label,
        trend_strength_pct: strength,
        continuity,
        volatility_label,
        volatility_pct: volatility,
        structure_label,
        rsi_zone,
        band_position,
        interpretation_text,
        advice_text,
        disclaimer: narrative::disclaimer(locale),
        locale,
    }
}
