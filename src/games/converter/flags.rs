/// Flag emoji shown next to currency codes in pickers.
const FLAGS: &[(&str, &str)] = &[
    ("AUD", "🇦🇺"),
    ("CAD", "🇨🇦"),
    ("CHF", "🇨🇭"),
    ("CNY", "🇨🇳"),
    ("EUR", "🇪🇺"),
    ("GBP", "🇬🇧"),
    ("INR", "🇮🇳"),
    ("JPY", "🇯🇵"),
    ("USD", "🇺🇸"),
];

pub fn flag(code: &str) -> Option<&'static str> {
    FLAGS.iter().find(|(c, _)| *c == code).map(|(_, f)| *f)
}

/// `"🇺🇸 USD"`, or just the code when no flag is known.
pub fn label(code: &str) -> String {
    match flag(code) {
        Some(f) => format!("{f} {code}"),
        None => code.to_string(),
    }
}

/// Inverse of [`label`]: the last whitespace-separated token.
pub fn code_from_label(label: &str) -> &str {
    label.split_whitespace().last().unwrap_or("")
}

/// Offline fallback list, sorted.
pub fn known_codes() -> Vec<String> {
    // FLAGS is kept in alphabetical order
    FLAGS.iter().map(|(c, _)| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_flags() {
        assert_eq!(label("USD"), "🇺🇸 USD");
        assert_eq!(label("XAU"), "XAU");
        assert_eq!(code_from_label(&label("INR")), "INR");
        assert_eq!(code_from_label("XAU"), "XAU");
        assert_eq!(code_from_label("   "), "");
    }

    #[test]
    fn fallback_codes_are_sorted() {
        let codes = known_codes();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
        assert!(codes.contains(&"EUR".to_string()));
    }
}
