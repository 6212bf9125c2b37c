//! Reply-language resolution.
//!
//! Maps a BCP-47-ish code from the request to the display name inserted in
//! the system instructions.  Resolution never fails: absent or unrecognized
//! codes fall back to French, the venue's default.

/// A resolved reply language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub code: &'static str,
    pub display_name: &'static str,
}

/// Supported languages: canonical primary subtag → display name.
const SUPPORTED: &[(&str, &str)] = &[
    ("fr", "français"),
    ("en", "English"),
    ("es", "español"),
    ("de", "Deutsch"),
    ("it", "italiano"),
    ("pt", "português"),
];

const DEFAULT: ResolvedLanguage = ResolvedLanguage {
    code: "fr",
    display_name: "français",
};

/// Resolve a requested language code.
///
/// Only the primary subtag counts: `"en-US"` and `"en_GB"` both resolve to
/// English.
pub fn resolve(code: Option<&str>) -> ResolvedLanguage {
    let Some(raw) = code else {
        return DEFAULT;
    };
    let primary = raw
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    SUPPORTED
        .iter()
        .find(|(c, _)| *c == primary)
        .map(|(c, name)| ResolvedLanguage { code: c, display_name: name })
        .unwrap_or(DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_code_resolves_to_french() {
        let lang = resolve(None);
        assert_eq!(lang.code, "fr");
        assert_eq!(lang.display_name, "français");
    }

    #[test]
    fn unrecognized_code_resolves_to_french() {
        assert_eq!(resolve(Some("tlh")).code, "fr");
        assert_eq!(resolve(Some("")).code, "fr");
    }

    #[test]
    fn region_subtag_is_ignored() {
        assert_eq!(resolve(Some("en-US")).display_name, "English");
        assert_eq!(resolve(Some("pt_BR")).display_name, "português");
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(resolve(Some("FR")).code, "fr");
        assert_eq!(resolve(Some("De")).display_name, "Deutsch");
    }
}
