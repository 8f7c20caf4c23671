use std::collections::HashMap;
use std::path::Path;

use crate::error::MetricError;

const ASIAN_LANGUAGES: [&str; 5] = ["Chinese", "Korean", "Japanese", "Thai", "Vietnamese"];

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("de_at", "German"),
    ("de_ch", "German"),
    ("de_de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("en_au", "English"),
    ("en_ca", "English"),
    ("en_gb", "English"),
    ("en_us", "English"),
    ("es", "Spanish"),
    ("es_es", "Spanish"),
    ("es_mx", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr_ca", "French"),
    ("fr_fr", "French"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ja_jp", "Japanese"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("ko_kr", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ms", "Malay"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("ps", "Pashto"),
    ("pt", "Portuguese"),
    ("pt_br", "Portuguese"),
    ("pt_pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("th_th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("vi_vn", "Vietnamese"),
    ("zh", "Chinese"),
    ("zh_cn", "Chinese"),
    ("zh_hk", "Chinese"),
    ("zh_sg", "Chinese"),
    ("zh_tw", "Chinese"),
];

/// Language codes and locale tags mapped to English display names.
///
/// Lookups are case-insensitive and accept either a code (`"zh"`,
/// `"zh_TW"`) or a display name (`"Chinese"`).
#[derive(Debug, Clone, Default)]
pub struct LanguageTable {
    by_code: HashMap<String, String>,
}

impl LanguageTable {
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_LANGUAGES.iter().copied())
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let by_code = entries
            .into_iter()
            .filter(|(code, _)| !code.as_ref().trim().is_empty())
            .map(|(code, display)| (code.as_ref().to_lowercase(), display.into()))
            .collect();
        Self { by_code }
    }

    /// Loads a `{"code": "Display name"}` JSON object.
    pub fn load(path: &Path) -> Result<Self, MetricError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| MetricError::io("read language table", e))?;
        let raw: HashMap<String, String> = serde_json::from_str(&data)
            .map_err(|e| MetricError::json("parse language table", e))?;
        Ok(Self::from_entries(raw))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn check(&self, language: &str) -> Result<(), MetricError> {
        self.display_language(language).map(|_| ())
    }

    pub fn display_language(&self, language: &str) -> Result<String, MetricError> {
        let key = language.trim().to_lowercase();
        if let Some(display) = self.by_code.get(&key) {
            return Ok(display.clone());
        }
        self.by_code
            .values()
            .find(|display| display.to_lowercase() == key)
            .cloned()
            .ok_or_else(|| MetricError::invalid_config(format!("unknown language: {language}")))
    }

    pub fn is_asian(display_name: &str) -> bool {
        ASIAN_LANGUAGES.contains(&display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_codes_tags_and_names() {
        let table = LanguageTable::builtin();
        assert!(!table.is_empty());
        assert_eq!(table.display_language("zh").unwrap(), "Chinese");
        assert_eq!(table.display_language("ZH_tw").unwrap(), "Chinese");
        assert_eq!(table.display_language("english").unwrap(), "English");
        assert_eq!(table.display_language(" de ").unwrap(), "German");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let table = LanguageTable::builtin();
        let err = table.check("xx").unwrap_err();
        assert!(err.to_string().contains("unknown language: xx"));
    }

    #[test]
    fn is_asian_matches_display_names() {
        assert!(LanguageTable::is_asian("Chinese"));
        assert!(LanguageTable::is_asian("Vietnamese"));
        assert!(!LanguageTable::is_asian("German"));
        assert!(!LanguageTable::is_asian("zh"));
    }

    #[test]
    fn custom_table_is_independent_of_builtin() {
        let table = LanguageTable::from_entries([("yue", "Cantonese"), ("", "Nothing")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.display_language("YUE").unwrap(), "Cantonese");
        assert!(table.check("zh").is_err());
    }

    #[test]
    fn load_reads_json_object() {
        let path = std::env::temp_dir().join("ter_rs_language_table.json");
        std::fs::write(&path, r#"{"mn": "Mongolian", "mn_MN": "Mongolian"}"#)
            .expect("write table");
        let table = LanguageTable::load(&path).expect("load should succeed");
        assert_eq!(table.len(), 2);
        assert_eq!(table.display_language("mn_mn").unwrap(), "Mongolian");
        let _ = std::fs::remove_file(&path);
    }
}
