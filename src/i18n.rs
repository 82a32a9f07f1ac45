//! Translation table loading and text resolution.
//!
//! The table maps a language code to a map of text keys to localized strings.
//! It is read from a JSON file once at startup; a missing or malformed file
//! falls back to a small built-in table so the site always renders. Lookups
//! never fail: an unknown language resolves against an empty map and an
//! unknown key resolves to the key itself.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Language code -> text key -> localized string.
pub type TranslationTable = HashMap<String, HashMap<String, String>>;

/// Languages the site can be switched to. The enum doubles as the
/// allow-list for the language-switch route: codes that do not parse
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ms,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ms];

    /// The BCP 47-style code used in URLs, cookies, and the table file.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ms => "ms",
        }
    }

    /// Parse a code from the switch route. Returns `None` for anything
    /// outside the allow-list.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "ms" => Some(Language::Ms),
            _ => None,
        }
    }

    /// Name of the language in that language, for the switcher links.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ms => "Bahasa Melayu",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationsError {
    #[error("Failed to read translations file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse translations file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read and parse the translation table, falling back to the built-in
/// defaults on any failure. Never errors.
pub fn load_translations(path: &Path) -> TranslationTable {
    match read_table(path) {
        Ok(table) => table,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "Could not load translations, using built-in defaults"
            );
            builtin_defaults()
        }
    }
}

fn read_table(path: &Path) -> Result<TranslationTable, TranslationsError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Minimal table used when the translations file is unavailable.
fn builtin_defaults() -> TranslationTable {
    let mut en = HashMap::new();
    en.insert("hello".to_string(), "Hello".to_string());
    en.insert("welcome".to_string(), "Welcome".to_string());

    let mut ms = HashMap::new();
    ms.insert("hello".to_string(), "Helo".to_string());
    ms.insert("welcome".to_string(), "Selamat datang".to_string());

    let mut table = HashMap::new();
    table.insert("en".to_string(), en);
    table.insert("ms".to_string(), ms);
    table
}

/// Every key is expected in every language. Gaps render as raw keys, so
/// report them at load time instead of letting them surface silently.
fn log_missing_keys(table: &TranslationTable) {
    let all_keys: BTreeSet<&String> = table.values().flat_map(|texts| texts.keys()).collect();

    for (language, texts) in table {
        let missing: Vec<&str> = all_keys
            .iter()
            .filter(|key| !texts.contains_key(key.as_str()))
            .map(|key| key.as_str())
            .collect();

        if missing.is_empty() {
            tracing::debug!(language = %language, keys = texts.len(), "Loaded translations");
        } else {
            tracing::warn!(
                language = %language,
                keys = texts.len(),
                missing = ?missing,
                "Translation table has gaps; missing keys render verbatim"
            );
        }
    }
}

/// In-memory translation table, loaded once at startup.
///
/// The lock exists only so an explicit [`reload`](Self::reload) (wired to
/// SIGHUP) can swap the table without restarting; request handlers take
/// short read locks.
pub struct TranslationStore {
    path: PathBuf,
    table: RwLock<TranslationTable>,
}

impl TranslationStore {
    /// Load the table from `path`, falling back to built-in defaults if the
    /// file is missing or malformed.
    pub fn load<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let table = load_translations(&path);
        log_missing_keys(&table);
        Self {
            path,
            table: RwLock::new(table),
        }
    }

    /// Build a store from an already-constructed table. Used by tests.
    pub fn from_table(table: TranslationTable) -> Self {
        Self {
            path: PathBuf::new(),
            table: RwLock::new(table),
        }
    }

    /// Resolve `key` in `language`.
    ///
    /// An unknown language resolves against an empty map; an unknown key
    /// resolves to the key itself. Never errors.
    pub fn translate(&self, key: &str, language: &str) -> String {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        match table.get(language).and_then(|texts| texts.get(key)) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, language, "No translation, returning key verbatim");
                key.to_string()
            }
        }
    }

    /// Codes of the languages present in the current table, sorted.
    pub fn language_codes(&self) -> Vec<String> {
        let table = self.table.read().unwrap_or_else(|e| e.into_inner());
        let mut codes: Vec<String> = table.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Re-read the table from disk and swap it in.
    ///
    /// Unlike the startup load this does NOT fall back to built-in defaults:
    /// a failed reload keeps the table that was already serving traffic.
    pub fn reload(&self) -> Result<(), TranslationsError> {
        let table = read_table(&self.path)?;
        log_missing_keys(&table);
        *self.table.write().unwrap_or_else(|e| e.into_inner()) = table;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn sample_table() -> TranslationTable {
        serde_json::from_str(
            r#"{
                "en": {"site_name": "Jom Sihat", "welcome": "Welcome to Jom Sihat"},
                "ms": {"site_name": "Jom Sihat", "welcome": "Selamat datang ke Jom Sihat"}
            }"#,
        )
        .expect("sample table parses")
    }

    #[test]
    fn translates_known_keys_in_both_languages() {
        let store = TranslationStore::from_table(sample_table());
        assert_eq!(store.translate("site_name", "en"), "Jom Sihat");
        assert_eq!(store.translate("site_name", "ms"), "Jom Sihat");
        assert_eq!(store.translate("welcome", "en"), "Welcome to Jom Sihat");
        assert_eq!(store.translate("welcome", "ms"), "Selamat datang ke Jom Sihat");
    }

    #[test]
    fn unknown_key_resolves_to_itself() {
        let store = TranslationStore::from_table(sample_table());
        assert_eq!(store.translate("nonexistent_key", "en"), "nonexistent_key");
    }

    #[test]
    fn unknown_language_resolves_to_key() {
        let store = TranslationStore::from_table(sample_table());
        assert_eq!(store.translate("welcome", "fr"), "welcome");
    }

    #[test]
    fn missing_file_falls_back_to_builtin_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let table = load_translations(&dir.path().join("does-not-exist.json"));

        assert_eq!(table["en"]["hello"], "Hello");
        assert_eq!(table["en"]["welcome"], "Welcome");
        assert_eq!(table["ms"]["hello"], "Helo");
        assert_eq!(table["ms"]["welcome"], "Selamat datang");
    }

    #[test]
    fn malformed_file_falls_back_to_builtin_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write");

        let table = load_translations(file.path());
        assert!(table.contains_key("en"));
        assert!(table.contains_key("ms"));
        assert_eq!(table["ms"]["welcome"], "Selamat datang");
    }

    #[test]
    fn reload_picks_up_new_texts() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"en": {{"hello": "Hello"}}, "ms": {{"hello": "Helo"}}}}"#)
            .expect("write");
        file.flush().expect("flush");

        let store = TranslationStore::load(file.path());
        assert_eq!(store.translate("hello", "en"), "Hello");
        assert_eq!(store.translate("goodbye", "en"), "goodbye");

        std::fs::write(
            file.path(),
            r#"{"en": {"hello": "Hi", "goodbye": "Goodbye"}, "ms": {"hello": "Helo"}}"#,
        )
        .expect("rewrite");

        store.reload().expect("reload succeeds");
        assert_eq!(store.translate("hello", "en"), "Hi");
        assert_eq!(store.translate("goodbye", "en"), "Goodbye");
    }

    #[test]
    fn failed_reload_keeps_current_table() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"en": {{"hello": "Hello"}}, "ms": {{"hello": "Helo"}}}}"#)
            .expect("write");
        file.flush().expect("flush");

        let store = TranslationStore::load(file.path());
        std::fs::write(file.path(), "{ broken").expect("rewrite");

        store.reload().expect_err("malformed file must fail reload");
        assert_eq!(store.translate("hello", "en"), "Hello");
    }

    #[test]
    fn language_codes_are_sorted() {
        let store = TranslationStore::from_table(sample_table());
        assert_eq!(store.language_codes(), vec!["en", "ms"]);
    }

    #[test]
    fn language_allow_list_round_trip() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("ms"), Some(Language::Ms));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code("EN"), None);
        assert_eq!(Language::from_code(""), None);

        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Ms).unwrap(), "\"ms\"");
        let parsed: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Language::En);
    }
}
