// =============================================================================
// Outgoing messages — the flex report card and canned text replies
// =============================================================================
//
// Card section order is fixed:
//   header (name) -> latest price -> indicator block -> separator ->
//   interpretation -> classification summary -> separator -> advice ->
//   disclaimer

use serde_json::{json, Value};

use crate::advisory::AdvisoryReport;
use crate::indicators::sma::format_price;
use crate::types::Locale;

/// Plain text message.
pub fn text_message(text: &str) -> Value {
    json!({ "type": "text", "text": text })
}

/// Reply for a query that is neither a code nor a known name.
pub fn usage_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "Please send a TWSE stock name or a four-digit stock code (e.g. 台積電 or 2330)."
        }
        Locale::ZhTw => "請輸入有效的台股股票名稱或四碼股票代號（例如：台積電 或 2330）",
    }
}

/// Reply when the market data holds fewer closes than the engine needs.
pub fn insufficient_data_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => {
            "Not enough price history for a technical analysis yet, please try again later."
        }
        Locale::ZhTw => "目前無法取得足夠的技術分析資料，請稍後再試～",
    }
}

/// Reply when fetching market data failed.
pub fn fetch_failed_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Failed to fetch market data, please try again later.",
        Locale::ZhTw => "資料擷取失敗，請稍後再試～",
    }
}

struct Headings {
    alt_suffix: &'static str,
    price: &'static str,
    currency: &'static str,
    indicators: &'static str,
    interpretation: &'static str,
    trend: &'static str,
    volatility: &'static str,
    structure: &'static str,
    advice: &'static str,
    upper: &'static str,
    lower: &'static str,
    bollinger: &'static str,
    colon: &'static str,
    bar: &'static str,
}

fn headings(locale: Locale) -> Headings {
    match locale {
        Locale::En => Headings {
            alt_suffix: "technical analysis report",
            price: "Latest close",
            currency: "TWD",
            indicators: "▶ Indicators",
            interpretation: "📊 Interpretation",
            trend: "Trend",
            volatility: "Volatility",
            structure: "Structure",
            advice: "💡 Advice",
            upper: "upper",
            lower: "lower",
            bollinger: "Bollinger",
            colon: ": ",
            bar: " | ",
        },
        Locale::ZhTw => Headings {
            alt_suffix: "技術分析報告",
            price: "最新價格",
            currency: "元",
            indicators: "▶ 技術指標",
            interpretation: "📊 解讀與建議",
            trend: "趨勢判斷",
            volatility: "波動程度",
            structure: "行情型態",
            advice: "💡 操作建議",
            upper: "上軌",
            lower: "下軌",
            bollinger: "布林通道",
            colon: "：",
            bar: "｜",
        },
    }
}

fn bullets(text: &str) -> String {
    text.lines()
        .map(|line| format!("📌 {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a report as a flex "bubble" message.
pub fn flex_report(report: &AdvisoryReport) -> Value {
    let locale = report.locale;
    let h = headings(locale);
    let ind = &report.indicators;
    let name = &report.quote.display_name;
    let (c, bar) = (h.colon, h.bar);

    let summary = format!(
        "📌 {trend_h}{c}{trend} ({continuity}, {strength}%)\n📌 {vol_h}{c}{vol} ({vol_pct}%)\n📌 {structure_h}{c}{structure}",
        trend_h = h.trend,
        trend = report.trend_label.text(locale),
        continuity = report.continuity.text(locale),
        strength = format_price(report.trend_strength_pct),
        vol_h = h.volatility,
        vol = report.volatility_label.text(locale),
        vol_pct = format_price(report.volatility_pct),
        structure_h = h.structure,
        structure = report.structure_label.text(locale),
    );

    json!({
        "type": "flex",
        "altText": format!("{name} {}", h.alt_suffix),
        "contents": {
            "type": "bubble",
            "size": "mega",
            "body": {
                "type": "box",
                "layout": "vertical",
                "spacing": "md",
                "contents": [
                    { "type": "text", "text": format!("📈 {name}"), "weight": "bold", "size": "xl" },
                    {
                        "type": "text",
                        "text": format!("{}{c}{} {}", h.price, format_price(report.quote.latest_close), h.currency),
                        "size": "sm",
                        "color": "#888888"
                    },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "spacing": "sm",
                        "margin": "md",
                        "contents": [
                            { "type": "text", "text": h.indicators, "weight": "bold", "size": "md" },
                            {
                                "type": "text",
                                "text": format!("MA5{c}{}{bar}MA20{c}{}", format_price(ind.ma5), format_price(ind.ma20)),
                                "size": "sm"
                            },
                            { "type": "text", "text": format!("RSI14{c}{}", format_price(ind.rsi14)), "size": "sm" },
                            {
                                "type": "text",
                                "text": format!(
                                    "{}{c}{} {}{bar}{} {}",
                                    h.bollinger,
                                    h.upper,
                                    format_price(ind.boll_upper),
                                    h.lower,
                                    format_price(ind.boll_lower)
                                ),
                                "size": "sm"
                            }
                        ]
                    },
                    { "type": "separator", "margin": "md" },
                    { "type": "text", "text": h.interpretation, "weight": "bold", "margin": "md", "size": "md" },
                    {
                        "type": "text",
                        "text": bullets(&report.interpretation_text),
                        "size": "sm",
                        "wrap": true,
                        "margin": "sm"
                    },
                    { "type": "text", "text": summary, "size": "sm", "wrap": true, "margin": "sm" },
                    { "type": "separator", "margin": "md" },
                    { "type": "text", "text": h.advice, "weight": "bold", "margin": "md", "size": "md" },
                    { "type": "text", "text": report.advice_text, "size": "sm", "wrap": true, "margin": "sm" },
                    {
                        "type": "text",
                        "text": report.disclaimer,
                        "weight": "bold",
                        "wrap": true,
                        "margin": "md",
                        "size": "md"
                    }
                ]
            }
        }
    })
}
