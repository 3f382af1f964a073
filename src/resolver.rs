// =============================================================================
// Symbol Resolver — chat text -> stock code
// =============================================================================
//
// A query that is exactly four ASCII digits is taken as the code itself;
// anything else is looked up in the alias table built once at startup.

use std::collections::HashMap;

use tracing::warn;

use crate::types::StockCode;

/// Outcome of resolving one chat query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub code: StockCode,
    /// The text the user typed, used as a display-name fallback.
    pub query: String,
}

/// Immutable name -> code table.
#[derive(Debug, Clone, Default)]
pub struct SymbolResolver {
    aliases: HashMap<String, StockCode>,
}

impl SymbolResolver {
    /// Build from raw config entries. Entries whose code is not a valid
    /// ticker are dropped with a warning.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut aliases = HashMap::new();
        for (name, code) in entries {
            match StockCode::parse(code) {
                Some(code) => {
                    aliases.insert(name.trim().to_string(), code);
                }
                None => warn!(name = %name, code = %code, "ignoring alias with invalid stock code"),
            }
        }
        Self { aliases }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn resolve(&self, query: &str) -> Option<Resolved> {
        let query = query.trim();
        let code = StockCode::parse(query).or_else(|| self.aliases.get(query).cloned())?;
        Some(Resolved {
            code,
            query: query.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BotConfig;

    fn resolver() -> SymbolResolver {
        let cfg = BotConfig::default();
        SymbolResolver::new(&cfg.aliases)
    }

    #[test]
    fn digits_resolve_directly() {
        let r = resolver().resolve("2603").unwrap();
        assert_eq!(r.code.as_str(), "2603");
        assert_eq!(r.query, "2603");
    }

    #[test]
    fn aliases_resolve() {
        let r = resolver().resolve("  台積電 ").unwrap();
        assert_eq!(r.code.as_str(), "2330");
        assert_eq!(r.query, "台積電");
    }

    #[test]
    fn unknown_queries_fail() {
        let r = resolver();
        assert!(r.resolve("hello").is_none());
        assert!(r.resolve("23301").is_none());
        assert!(r.resolve("").is_none());
    }

    #[test]
    fn invalid_alias_codes_dropped() {
        let name = "bad".to_string();
        let code = "12x4".to_string();
        let good_name = "ok".to_string();
        let good_code = "1101".to_string();
        let r = SymbolResolver::new([(&name, &code), (&good_name, &good_code)]);
        assert_eq!(r.len(), 1);
        assert!(r.resolve("bad").is_none());
        assert_eq!(r.resolve("ok").unwrap().code.as_str(), "1101");
    }
}
