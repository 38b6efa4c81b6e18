//! Utility functions and helpers

/// Lowercase a prompt and replace everything but letters, digits, `&` and `'`
/// with single spaces
pub fn normalize_text(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' || c == '&' {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into tokens, dropping possessive suffixes
pub fn tokenize(text: &str) -> Vec<String> {
    normalize_text(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_end_matches("'s").trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Convert arbitrary text into a kebab-case slug (max 50 chars)
pub fn slugify(text: &str) -> String {
    let safe_name = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>();

    let safe_name = safe_name
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if safe_name.len() > 50 {
        safe_name[..50].trim_end_matches('-').to_string()
    } else {
        safe_name
    }
}

/// Capitalize the first letter of every word
pub fn title_case(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep at most `max_words` words, appending an ellipsis when truncated
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}…", words[..max_words].join(" "))
}

/// Escape text for safe interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("  Build a WEBSITE, for my shoe-store!! "),
            "build a website for my shoe store"
        );
        assert_eq!(normalize_text("?!..."), "");
    }

    #[test]
    fn test_tokenize_strips_possessives() {
        assert_eq!(
            tokenize("Maria's Bakery & Cafe"),
            vec!["maria", "bakery", "&", "cafe"]
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Stride & Co. Running"), "stride-co-running");
        assert_eq!(slugify("---"), "");
        assert!(slugify(&"a".repeat(80)).len() <= 50);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("real-estate agency"), "Real Estate Agency");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three", 5), "one two three");
        assert_eq!(truncate_words("one two three", 2), "one two…");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & Jerry's</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; Jerry&#39;s&lt;/b&gt;"
        );
    }
}
