// src/utils/html.rs

use ammonia::Builder;

/// Longest round or wind label that is stored.
pub const MAX_LABEL_CHARS: usize = 20;

/// Strips every tag from a free-text label such as a round or seat wind.
///
/// Labels are plain text, not HTML: ammonia drops the markup, then the entity
/// escapes its serializer adds to text are undone, so `A & B` is stored as is.
pub fn clean_label(input: &str) -> String {
    let stripped = Builder::empty().clean(input.trim()).to_string();
    unescape_text(&stripped).trim().to_string()
}

/// Reverses the escapes html5ever applies to text nodes. `&amp;` goes last so
/// a literal `&lt;` in the input does not turn into `<`.
fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersands_survive() {
        assert_eq!(clean_label("A & B"), "A & B");
        assert_eq!(clean_label(&"&".repeat(20)), "&".repeat(20));
    }

    #[test]
    fn tags_are_removed_text_kept() {
        assert_eq!(clean_label("<b>南2</b>"), "南2");
        assert_eq!(clean_label("<script>alert(1)</script>東1"), "東1");
        assert_eq!(clean_label("<i></i>"), "");
    }

    #[test]
    fn bare_angle_brackets_are_text() {
        assert_eq!(clean_label("1 < 2"), "1 < 2");
    }
}
