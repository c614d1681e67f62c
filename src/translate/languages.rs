use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label shown for the source-language option that asks the model to work
/// out the input language on its own.
pub const AUTO_DETECT_LABEL: &str = "Auto Detect";

/// Languages offered as translation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Chinese,
    Japanese,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Russian,
        Language::Chinese,
        Language::Japanese,
        Language::Hindi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Hindi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.label() == s)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// Source-language selection: either a concrete language or "Auto Detect".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceLanguage {
    AutoDetect,
    Known(Language),
}

impl SourceLanguage {
    pub fn all() -> Vec<SourceLanguage> {
        std::iter::once(SourceLanguage::AutoDetect)
            .chain(Language::ALL.into_iter().map(SourceLanguage::Known))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceLanguage::AutoDetect => AUTO_DETECT_LABEL,
            SourceLanguage::Known(lang) => lang.label(),
        }
    }

    /// Language named in the prompt. No detection is performed: "Auto Detect"
    /// falls back to English.
    pub fn resolve(self) -> Language {
        match self {
            SourceLanguage::AutoDetect => Language::English,
            SourceLanguage::Known(lang) => lang,
        }
    }
}

impl Default for SourceLanguage {
    fn default() -> Self {
        SourceLanguage::AutoDetect
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AUTO_DETECT_LABEL {
            return Ok(SourceLanguage::AutoDetect);
        }
        s.parse::<Language>().map(SourceLanguage::Known)
    }
}

impl TryFrom<String> for SourceLanguage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceLanguage> for String {
    fn from(value: SourceLanguage) -> Self {
        value.label().to_string()
    }
}

/// Label stored with each history record, e.g. `Auto Detect → Spanish`.
pub fn language_pair_label(source: SourceLanguage, target: Language) -> String {
    format!("{} → {}", source.label(), target.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_options_start_with_auto_detect() {
        let all = SourceLanguage::all();
        assert_eq!(all.len(), 11);
        assert_eq!(all[0], SourceLanguage::AutoDetect);
        assert_eq!(Language::ALL.len(), 10);
    }

    #[test]
    fn auto_detect_resolves_to_english() {
        assert_eq!(SourceLanguage::AutoDetect.resolve(), Language::English);
        assert_eq!(
            SourceLanguage::Known(Language::French).resolve(),
            Language::French
        );
    }

    #[test]
    fn labels_deserialize_from_json() {
        let src: SourceLanguage = serde_json::from_str("\"Auto Detect\"").unwrap();
        assert_eq!(src, SourceLanguage::AutoDetect);
        let src: SourceLanguage = serde_json::from_str("\"Japanese\"").unwrap();
        assert_eq!(src, SourceLanguage::Known(Language::Japanese));
        assert!(serde_json::from_str::<SourceLanguage>("\"Klingon\"").is_err());
        assert!(serde_json::from_str::<Language>("\"Auto Detect\"").is_err());
    }

    #[test]
    fn pair_label_keeps_selected_source() {
        assert_eq!(
            language_pair_label(SourceLanguage::AutoDetect, Language::Spanish),
            "Auto Detect → Spanish"
        );
    }
}
