//! TEXT value escaping (RFC 5545 section 3.3.11).

/// Escape a free-text property value.
///
/// Backslashes go first so the escapes added afterwards are not doubled.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', r"\\")
        .replace(';', r"\;")
        .replace(',', r"\,")
        .replace('\n', r"\n")
}

/// Reverse [`escape_text`].
///
/// `\N` is accepted as a newline too. Unknown escapes keep their backslash.
pub fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some(';') => result.push(';'),
            Some(',') => result.push(','),
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_special_characters() {
        assert_eq!(
            escape_text("Mac & Cheese; Veggies, Fruit\nJuice"),
            r"Mac & Cheese\; Veggies\, Fruit\nJuice"
        );
        assert_eq!(escape_text(r"C:\lunch"), r"C:\\lunch");
    }

    #[test]
    fn test_escape_text_backslash_before_other_escapes() {
        // A literal backslash followed by a semicolon must not collapse into "\;"
        assert_eq!(escape_text(r"a\;b"), r"a\\\;b");
        assert_eq!(escape_text(r"\n"), r"\\n");
    }

    #[test]
    fn test_escape_text_plain_text_untouched() {
        assert_eq!(escape_text("Chicken Nuggets"), "Chicken Nuggets");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        let samples = [
            "Mac & Cheese; Veggies, Fruit\nJuice\\",
            "\\;;,,\n\n",
            r"\n is not a newline",
            "Full menu:\nPizza\nApple, sliced",
        ];
        for sample in samples {
            assert_eq!(unescape_text(&escape_text(sample)), sample, "sample: {sample:?}");
        }
    }

    #[test]
    fn test_unescape_keeps_unknown_escapes() {
        assert_eq!(unescape_text(r"a\tb"), r"a\tb");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
        assert_eq!(unescape_text(r"line\Nbreak"), "line\nbreak");
    }
}
