// =============================================================================
// Classification labels and the rule table that selects them
// =============================================================================
//
// Trend      (strength = |ma5 - ma20| / ma20 · 100)
//   > 3.0        strong up/down
//   > 1.5        up/down
//   otherwise    mild up/down          (ma5 == ma20 counts as down)
//
// Continuity   > 2 high, > 1 medium, else low
// Volatility   (upper - lower) / ma20 · 100:  > 5 high, > 3 medium, else low
// Structure    first match of:
//   strength < 1 && volatility < 3   range-bound
//   strength < 2 && volatility < 4   sideways consolidation
//   otherwise                        trending market
// =============================================================================

use serde::Serialize;

use crate::indicators::rsi::{OVERBOUGHT, OVERSOLD};
use crate::types::Locale;

const STRONG_TREND_PCT: f64 = 3.0;
const TREND_PCT: f64 = 1.5;

const HIGH_CONTINUITY_PCT: f64 = 2.0;
const MEDIUM_CONTINUITY_PCT: f64 = 1.0;

const HIGH_VOLATILITY_PCT: f64 = 5.0;
const MEDIUM_VOLATILITY_PCT: f64 = 3.0;

const RANGE_BOUND_DIVERGENCE_PCT: f64 = 1.0;
const RANGE_BOUND_VOLATILITY_PCT: f64 = 3.0;
const SIDEWAYS_DIVERGENCE_PCT: f64 = 2.0;
const SIDEWAYS_VOLATILITY_PCT: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendLabel {
    #[serde(rename = "strong uptrend")]
    StrongUptrend,
    #[serde(rename = "uptrend")]
    Uptrend,
    #[serde(rename = "mild uptrend")]
    MildUptrend,
    #[serde(rename = "strong downtrend")]
    StrongDowntrend,
    #[serde(rename = "downtrend")]
    Downtrend,
    #[serde(rename = "mild downtrend")]
    MildDowntrend,
}

impl TrendLabel {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::StrongUptrend, Locale::En) => "strong uptrend",
            (Self::Uptrend, Locale::En) => "uptrend",
            (Self::MildUptrend, Locale::En) => "mild uptrend",
            (Self::StrongDowntrend, Locale::En) => "strong downtrend",
            (Self::Downtrend, Locale::En) => "downtrend",
            (Self::MildDowntrend, Locale::En) => "mild downtrend",
            (Self::StrongUptrend, Locale::ZhTw) => "強勢上漲",
            (Self::Uptrend, Locale::ZhTw) => "穩健上漲",
            (Self::MildUptrend, Locale::ZhTw) => "緩步上漲",
            (Self::StrongDowntrend, Locale::ZhTw) => "強勢下跌",
            (Self::Downtrend, Locale::ZhTw) => "持續下跌",
            (Self::MildDowntrend, Locale::ZhTw) => "緩步下跌",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Continuity {
    #[serde(rename = "high continuity")]
    High,
    #[serde(rename = "medium continuity")]
    Medium,
    #[serde(rename = "low continuity")]
    Low,
}

impl Continuity {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::En) => "high continuity",
            (Self::Medium, Locale::En) => "medium continuity",
            (Self::Low, Locale::En) => "low continuity",
            (Self::High, Locale::ZhTw) => "延續性高",
            (Self::Medium, Locale::ZhTw) => "延續性中",
            (Self::Low, Locale::ZhTw) => "延續性低",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VolatilityLabel {
    #[serde(rename = "high volatility")]
    High,
    #[serde(rename = "medium volatility")]
    Medium,
    #[serde(rename = "low volatility")]
    Low,
}

impl VolatilityLabel {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::High, Locale::En) => "high volatility",
            (Self::Medium, Locale::En) => "medium volatility",
            (Self::Low, Locale::En) => "low volatility",
            (Self::High, Locale::ZhTw) => "高波動",
            (Self::Medium, Locale::ZhTw) => "中波動",
            (Self::Low, Locale::ZhTw) => "低波動",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StructureLabel {
    #[serde(rename = "range-bound")]
    RangeBound,
    #[serde(rename = "sideways consolidation")]
    Sideways,
    #[serde(rename = "trending market")]
    Trending,
}

impl StructureLabel {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::RangeBound, Locale::En) => "range-bound",
            (Self::Sideways, Locale::En) => "sideways consolidation",
            (Self::Trending, Locale::En) => "trending market",
            (Self::RangeBound, Locale::ZhTw) => "盤整格局",
            (Self::Sideways, Locale::ZhTw) => "區間整理",
            (Self::Trending, Locale::ZhTw) => "趨勢行情",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BandPosition {
    Upper,
    Lower,
    Middle,
}

/// Percentage divergence between the short and long averages.
pub fn trend_strength_pct(ma5: f64, ma20: f64) -> f64 {
    (ma5 - ma20).abs() * 100.0 / ma20
}

/// Bollinger channel width relative to the long average, in percent.
pub fn volatility_pct(upper: f64, lower: f64, ma20: f64) -> f64 {
    (upper - lower) * 100.0 / ma20
}

pub fn classify_trend(ma5: f64, ma20: f64, strength_pct: f64) -> TrendLabel {
    let up = ma5 > ma20;
    match (up, strength_pct) {
        (true, s) if s > STRONG_TREND_PCT => TrendLabel::StrongUptrend,
        (true, s) if s > TREND_PCT => TrendLabel::Uptrend,
        (true, _) => TrendLabel::MildUptrend,
        (false, s) if s > STRONG_TREND_PCT => TrendLabel::StrongDowntrend,
        (false, s) if s > TREND_PCT => TrendLabel::Downtrend,
        (false, _) => TrendLabel::MildDowntrend,
    }
}

pub fn classify_continuity(strength_pct: f64) -> Continuity {
    if strength_pct > HIGH_CONTINUITY_PCT {
        Continuity::High
    } else if strength_pct > MEDIUM_CONTINUITY_PCT {
        Continuity::Medium
    } else {
        Continuity::Low
    }
}

pub fn classify_volatility(volatility_pct: f64) -> VolatilityLabel {
    if volatility_pct > HIGH_VOLATILITY_PCT {
        VolatilityLabel::High
    } else if volatility_pct > MEDIUM_VOLATILITY_PCT {
        VolatilityLabel::Medium
    } else {
        VolatilityLabel::Low
    }
}

pub fn classify_structure(strength_pct: f64, volatility_pct: f64) -> StructureLabel {
    if strength_pct < RANGE_BOUND_DIVERGENCE_PCT && volatility_pct < RANGE_BOUND_VOLATILITY_PCT {
        StructureLabel::RangeBound
    } else if strength_pct < SIDEWAYS_DIVERGENCE_PCT && volatility_pct < SIDEWAYS_VOLATILITY_PCT
    {
        StructureLabel::Sideways
    } else {
        StructureLabel::Trending
    }
}

pub fn classify_rsi(rsi: f64) -> RsiZone {
    if rsi > OVERBOUGHT {
        RsiZone::Overbought
    } else if rsi < OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

pub fn classify_band_position(close: f64, upper: f64, lower: f64) -> BandPosition {
    if close >= upper {
        BandPosition::Upper
    } else if close <= lower {
        BandPosition::Lower
    } else {
        BandPosition::Middle
    }
}
