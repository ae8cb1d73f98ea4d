//! Translation call shapes and the sensitive-key filter.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// A recognized translation call shape. Capture group 1 is the key literal.
pub struct CallPattern {
    pub name: &'static str,
    pub regex: Regex,
}

fn hook_call(hook: &str) -> String {
    format!(r#"{}\(\)\.t\(\s*['"`]([^'"`]+)['"`]\s*\)"#, hook)
}

pub static CALL_PATTERNS: LazyLock<Vec<CallPattern>> = LazyLock::new(|| {
    [
        (
            "t_function",
            r#"\bt\(\s*['"`]([^'"`]+)['"`]\s*\)"#.to_string(),
        ),
        (
            "trans_component",
            r#"<Trans[^>]*i18nKey\s*=\s*['"`]([^'"`]+)['"`]"#.to_string(),
        ),
        ("use_translation_hook", hook_call("useTranslation")),
        ("api_translations_hook", hook_call("useAPITranslations")),
        ("governed_translations_hook", hook_call("useGovernedTranslations")),
    ]
    .into_iter()
    .map(|(name, pattern)| CallPattern {
        name,
        regex: Regex::new(&pattern).unwrap(),
    })
    .collect()
});

/// Keys that look like credentials or personal data.
///
/// Matched against the key identifier, not the translated text, so a key like
/// `user.password.label` is dropped even though it holds no secret.
static SECURITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        (r"password", true),
        (r"secret", true),
        (r"token", true),
        (r"api[_-]?key", true),
        // credit card
        (r"\b\d{4}\s?\d{4}\s?\d{4}\s?\d{4}\b", false),
        // phone
        (r"\b\d{10,11}\b", false),
        // email
        (r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b", true),
    ]
    .into_iter()
    .map(|(pattern, case_insensitive)| {
        RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .unwrap()
    })
    .collect()
});

pub fn is_sensitive_key(key: &str) -> bool {
    SECURITY_PATTERNS.iter().any(|p| p.is_match(key))
}
