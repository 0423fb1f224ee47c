//! Small helpers for assembling natural-sounding utterances

/// Indefinite article for a label, by first-letter vowel test.
pub fn article_for(label: &str) -> &'static str {
    match label.trim().to_lowercase().chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Turn an internal label into something speakable.
///
/// Ownership-prefixed labels like "my_wallet" become "your wallet";
/// remaining underscores become spaces.
pub fn clean_label(label: &str) -> String {
    let label = label.trim();
    let replaced = if let Some(rest) = label.strip_prefix("my_") {
        format!("your {}", rest)
    } else {
        label.to_string()
    };
    replaced.replace('_', " ")
}

/// Naive plural used for overflow counts ("3 more objects").
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else if word.ends_with('s') {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Uppercase the first character, leave the rest alone.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
