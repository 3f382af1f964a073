// =============================================================================
// Canned phrases: interpretation lines and advice fragments
// =============================================================================
//
// Interpretation is four lines (MA bias, RSI zone, band position, suggestion)
// joined with '\n'. Advice is a concatenation of fragments in fixed order:
// trend -> RSI -> volatility -> structure. Every fragment after the trend
// fragment carries its own leading space; nothing else separates them.

use super::labels::{BandPosition, RsiZone, StructureLabel, TrendLabel, VolatilityLabel};
use crate::indicators::sma::format_price;
use crate::types::Locale;

pub fn ma_bias_line(above: bool, locale: Locale) -> &'static str {
    match (above, locale) {
        (true, Locale::En) => "MA5 is above MA20: the short-term bias is bullish.",
        (false, Locale::En) => "MA5 is below MA20: short-term momentum is weakening.",
        (true, Locale::ZhTw) => "MA5 高於 MA20，短線趨勢偏多。",
        (false, Locale::ZhTw) => "MA5 低於 MA20，短線轉弱。",
    }
}

pub fn rsi_line(rsi: f64, zone: RsiZone, locale: Locale) -> String {
    let value = format_price(rsi);
    match locale {
        Locale::En => {
            let tail = match zone {
                RsiZone::Overbought => "in overbought territory",
                RsiZone::Oversold => "in oversold territory",
                RsiZone::Neutral => "still neutral",
            };
            format!("RSI14 is {value}, {tail}.")
        }
        Locale::ZhTw => {
            let tail = match zone {
                RsiZone::Overbought => "已進入超買區",
                RsiZone::Oversold => "進入超賣區",
                RsiZone::Neutral => "尚屬中性",
            };
            format!("RSI14 為 {value}，{tail}。")
        }
    }
}

pub fn band_line(position: BandPosition, locale: Locale) -> &'static str {
    match (position, locale) {
        (BandPosition::Upper, Locale::En) => "The close is near the upper Bollinger band.",
        (BandPosition::Lower, Locale::En) => "The close is near the lower Bollinger band.",
        (BandPosition::Middle, Locale::En) => {
            "The close sits around the middle of the Bollinger channel."
        }
        (BandPosition::Upper, Locale::ZhTw) => "收盤價接近布林上軌。",
        (BandPosition::Lower, Locale::ZhTw) => "收盤價接近布林下軌。",
        (BandPosition::Middle, Locale::ZhTw) => "收盤價接近布林中軌附近。",
    }
}

pub fn suggestion_line(zone: RsiZone, locale: Locale) -> &'static str {
    match (zone, locale) {
        (RsiZone::Overbought, Locale::En) => {
            "Suggestion: the short-term run is stretched; consider waiting or trimming into strength."
        }
        (RsiZone::Oversold, Locale::En) => "Suggestion: oversold; watch for a rebound opportunity.",
        (RsiZone::Neutral, Locale::En) => {
            "Suggestion: stay on the sidelines until the breakout direction is clear."
        }
        (RsiZone::Overbought, Locale::ZhTw) => "建議：短線漲多，可考慮觀望或逢高減碼。",
        (RsiZone::Oversold, Locale::ZhTw) => "建議：超賣區，可留意反彈契機。",
        (RsiZone::Neutral, Locale::ZhTw) => "建議：維持觀望，待突破方向明朗。",
    }
}

/// Build the multi-line interpretation text.
pub fn interpretation(
    ma_above: bool,
    rsi: f64,
    zone: RsiZone,
    position: BandPosition,
    locale: Locale,
) -> String {
    [
        ma_bias_line(ma_above, locale).to_string(),
        rsi_line(rsi, zone, locale),
        band_line(position, locale).to_string(),
        suggestion_line(zone, locale).to_string(),
    ]
    .join("\n")
}

pub fn trend_fragment(trend: TrendLabel, locale: Locale) -> &'static str {
    match (trend, locale) {
        (TrendLabel::StrongUptrend, Locale::En) => {
            "The uptrend is well established; trading with the trend is reasonable."
        }
        (TrendLabel::Uptrend, Locale::En) => {
            "The uptrend is steady; consider building positions in stages."
        }
        (TrendLabel::MildUptrend, Locale::En) => {
            "The uptrend is gentle; scale in gradually and wait for confirmation."
        }
        (TrendLabel::StrongDowntrend, Locale::En) => {
            "The downtrend is well established; avoid buying against it."
        }
        (TrendLabel::Downtrend, Locale::En) => {
            "The downtrend is steady; stay defensive and reduce exposure on bounces."
        }
        (TrendLabel::MildDowntrend, Locale::En) => {
            "The trend is softening; keep positions light until direction is confirmed."
        }
        (TrendLabel::StrongUptrend, Locale::ZhTw) => "趨勢明確，可順勢操作。",
        (TrendLabel::Uptrend, Locale::ZhTw) => "多方格局穩健，可分批布局。",
        (TrendLabel::MildUptrend, Locale::ZhTw) => "趨勢溫和，建議分批布局。",
        (TrendLabel::StrongDowntrend, Locale::ZhTw) => "空方趨勢明確，避免逆勢承接。",
        (TrendLabel::Downtrend, Locale::ZhTw) => "走勢偏弱，反彈宜減碼。",
        (TrendLabel::MildDowntrend, Locale::ZhTw) => "趨勢溫和偏弱，建議保守觀望。",
    }
}

pub fn rsi_fragment(zone: RsiZone, locale: Locale) -> Option<&'static str> {
    match (zone, locale) {
        (RsiZone::Overbought, Locale::En) => Some(" RSI is overheated; beware of a pullback."),
        (RsiZone::Oversold, Locale::En) => Some(" RSI is oversold; watch for a rebound."),
        (RsiZone::Overbought, Locale::ZhTw) => Some(" RSI 過熱，注意回檔風險。"),
        (RsiZone::Oversold, Locale::ZhTw) => Some(" RSI 超賣，可留意反彈機會。"),
        (RsiZone::Neutral, _) => None,
    }
}

pub fn volatility_fragment(volatility: VolatilityLabel, locale: Locale) -> Option<&'static str> {
    match (volatility, locale) {
        (VolatilityLabel::High, Locale::En) => {
            Some(" Volatility is high; keep position sizes under control.")
        }
        (VolatilityLabel::High, Locale::ZhTw) => Some(" 波動較大，建議控制部位。"),
        _ => None,
    }
}

pub fn structure_fragment(structure: StructureLabel, locale: Locale) -> Option<&'static str> {
    match (structure, locale) {
        (StructureLabel::RangeBound, Locale::En) => {
            Some(" The market is range-bound; consider trading the range.")
        }
        (StructureLabel::Sideways, Locale::En) => {
            Some(" Price is consolidating sideways; wait for a breakout.")
        }
        (StructureLabel::RangeBound, Locale::ZhTw) => Some(" 盤整格局，可採區間操作。"),
        (StructureLabel::Sideways, Locale::ZhTw) => Some(" 區間整理，建議觀望等待突破。"),
        (StructureLabel::Trending, _) => None,
    }
}

/// Assemble the advice sentence from its fragments.
pub fn advice(
    trend: TrendLabel,
    zone: RsiZone,
    volatility: VolatilityLabel,
    structure: StructureLabel,
    locale: Locale,
) -> String {
    let mut text = String::from(trend_fragment(trend, locale));
    for fragment in [
        rsi_fragment(zone, locale),
        volatility_fragment(volatility, locale),
        structure_fragment(structure, locale),
    ]
    .into_iter()
    .flatten()
    {
        text.push_str(fragment);
    }
    text
}

pub fn disclaimer(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "Disclaimer: for reference only. Investors should judge independently and invest at their own risk."
        }
        Locale::ZhTw => "警語說明：僅供參考，投資人應獨立判斷。\n審慎投資，自負風險",
    }
}
