//! Bundled translation tables
//!
//! Each locale ships as a nested JSON document that is flattened into dotted
//! keys (`settings.addDirectory`). Lookups fall back to English, then to the
//! key itself.

use super::locale::Language;
use crate::{ParleyError, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

const EN_JSON: &str = include_str!("locales/en.json");
const HE_JSON: &str = include_str!("locales/he.json");

type Table = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    tables: HashMap<Language, Table>,
}

impl Catalog {
    /// Load the bundled English and Hebrew tables
    pub fn bundled(language: Language) -> Result<Self> {
        let mut tables = HashMap::new();
        tables.insert(Language::English, parse_table(EN_JSON)?);
        tables.insert(Language::Hebrew, parse_table(HE_JSON)?);
        Ok(Self { language, tables })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Translate `key` in the active language
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(self.language, key)
            .or_else(|| self.lookup(Language::English, key))
            .unwrap_or_else(|| {
                warn!(key, language = %self.language, "Missing translation");
                key
            })
    }

    /// Translate `key` and substitute `{name}` placeholders
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.t(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    fn lookup(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

fn parse_table(json: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ParleyError::ConfigError(format!("Invalid translation table: {}", e)))?;
    let mut table = Table::new();
    flatten(&value, String::new(), &mut table);
    Ok(table)
}

fn flatten(value: &Value, prefix: String, table: &mut Table) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(child, path, table);
            }
        }
        Value::String(text) => {
            table.insert(prefix, text.clone());
        }
        other => {
            table.insert(prefix, other.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_share_keys() {
        let en = parse_table(EN_JSON).unwrap();
        let he = parse_table(HE_JSON).unwrap();
        let mut en_keys: Vec<&String> = en.keys().collect();
        let mut he_keys: Vec<&String> = he.keys().collect();
        en_keys.sort();
        he_keys.sort();
        assert_eq!(en_keys, he_keys);
    }

    #[test]
    fn test_translate_per_language() {
        let mut catalog = Catalog::bundled(Language::English).unwrap();
        assert_eq!(catalog.t("settings.workDirectories"), "Work Directories");

        catalog.set_language(Language::Hebrew);
        assert_eq!(catalog.t("settings.title"), "הגדרות");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let catalog = Catalog::bundled(Language::Hebrew).unwrap();
        assert_eq!(catalog.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_placeholder_substitution() {
        let catalog = Catalog::bundled(Language::English).unwrap();
        assert_eq!(
            catalog.t_with("chat.messageCount", &[("count", "3")]),
            "3 messages"
        );
    }

    #[test]
    fn test_flatten_nested_objects() {
        let table = parse_table(r#"{"a": {"b": {"c": "deep"}}, "n": 1}"#).unwrap();
        assert_eq!(table.get("a.b.c").map(String::as_str), Some("deep"));
        assert_eq!(table.get("n").map(String::as_str), Some("1"));
    }
}
