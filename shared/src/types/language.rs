//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language preference for localized rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "id")]
    Indonesian,
}

impl Default for Language {
    fn default() -> Self {
        Language::Indonesian
    }
}

impl Language {
    /// Extract language from Accept-Language header
    pub fn from_accept_language(header: &str) -> Self {
        let header_lower = header.to_lowercase();
        if header_lower.contains("en") {
            Language::English
        } else {
            Language::Indonesian
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Indonesian => "id",
        }
    }

    /// Get language name in English
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Indonesian => "Indonesian",
        }
    }

    /// Get native language name
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Indonesian => "Bahasa Indonesia",
        }
    }

    /// Get locale code
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Indonesian => "id-ID",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "id" | "ind" | "indonesian" => Ok(Language::Indonesian),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_header() {
        assert_eq!(Language::from_accept_language("en-US,en;q=0.9"), Language::English);
        assert_eq!(Language::from_accept_language("id-ID,id;q=0.9"), Language::Indonesian);
        assert_eq!(Language::from_accept_language("fr-FR"), Language::Indonesian);
    }

    #[test]
    fn test_language_properties() {
        let en = Language::English;
        assert_eq!(en.code(), "en");
        assert_eq!(en.name(), "English");
        assert_eq!(en.locale(), "en-US");

        let id = Language::Indonesian;
        assert_eq!(id.code(), "id");
        assert_eq!(id.native_name(), "Bahasa Indonesia");
        assert_eq!(id.locale(), "id-ID");
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("id".parse::<Language>().unwrap(), Language::Indonesian);
        assert_eq!("indonesian".parse::<Language>().unwrap(), Language::Indonesian);
        assert!("invalid".parse::<Language>().is_err());
    }
}
