// =============================================================================
// Shared types used across the TWSE technical-analysis bot
// =============================================================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A validated Taiwan Stock Exchange ticker: exactly four ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockCode(String);

impl StockCode {
    /// Length of every TWSE common-stock code.
    pub const LEN: usize = 4;

    /// Parse `raw` as a ticker. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == Self::LEN && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StockCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StockCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StockCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid stock code '{raw}'")))
    }
}

/// The entity a report is written about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub latest_close: f64,
    pub display_name: String,
    pub symbol: StockCode,
}

/// Language used for canned phrases and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Default for Locale {
    fn default() -> Self {
        Self::En
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::En => write!(f, "en"),
            Self::ZhTw => write!(f, "zh-TW"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_code_accepts_four_digits() {
        let code = StockCode::parse(" 2330 ").unwrap();
        assert_eq!(code.as_str(), "2330");
        assert_eq!(code.to_string(), "2330");
    }

    #[test]
    fn stock_code_rejects_other_shapes() {
        assert!(StockCode::parse("233").is_none());
        assert!(StockCode::parse("23301").is_none());
        assert!(StockCode::parse("23a0").is_none());
        assert!(StockCode::parse("台積電").is_none());
        assert!(StockCode::parse("").is_none());
    }

    #[test]
    fn stock_code_serde_as_string() {
        let code: StockCode = serde_json::from_str("\"2454\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"2454\"");
        assert!(serde_json::from_str::<StockCode>("\"24x4\"").is_err());
    }

    #[test]
    fn locale_serde_names() {
        assert_eq!(serde_json::to_string(&Locale::ZhTw).unwrap(), "\"zh-TW\"");
        let l: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(l, Locale::En);
    }
}
