/// Represents an open markup document in the LSP server
pub struct Document {
    /// Lines of the document (cached for position calculations)
    lines: Vec<String>,
}

impl Document {
    pub fn new(text: String) -> Self {
        let lines = text.lines().map(|s| s.to_string()).collect();
        Self { lines }
    }

    pub fn update_text(&mut self, new_text: String) {
        self.lines = new_text.lines().map(|s| s.to_string()).collect();
    }

    /// Text of `line` before the cursor at UTF-16 offset `character`
    pub fn line_prefix(&self, line: u32, character: u32) -> Option<String> {
        let line_text = self.lines.get(line as usize)?;
        let count = char_index(line_text, character);
        Some(line_text.chars().take(count).collect())
    }

    /// Get the element name under the cursor, if the cursor is on a tag name
    /// (`<name` or `</name`)
    pub fn tag_name_at_position(&self, line: u32, character: u32) -> Option<String> {
        let line_text = self.lines.get(line as usize)?;
        let chars: Vec<char> = line_text.chars().collect();
        let char_idx = char_index(line_text, character);

        if char_idx >= chars.len() {
            return None;
        }

        // Find start of name
        let mut start = char_idx;
        while start > 0 && is_tag_name_char(chars[start - 1]) {
            start -= 1;
        }

        // Find end of name
        let mut end = char_idx;
        while end < chars.len() && is_tag_name_char(chars[end]) {
            end += 1;
        }

        if start == end {
            return None;
        }

        let opens_tag = match start {
            0 => false,
            1 => chars[0] == '<',
            _ => chars[start - 1] == '<' || (chars[start - 1] == '/' && chars[start - 2] == '<'),
        };

        if opens_tag {
            Some(chars[start..end].iter().collect())
        } else {
            None
        }
    }
}

/// Number of chars covered by the first `utf16_offset` UTF-16 code units of
/// `text`. An offset inside a surrogate pair counts the whole char.
fn char_index(text: &str, utf16_offset: u32) -> usize {
    let mut units = 0usize;
    let mut count = 0usize;
    for c in text.chars() {
        if units >= utf16_offset as usize {
            break;
        }
        units += c.len_utf16();
        count += 1;
    }
    count
}

pub fn is_tag_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || c == ':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_text_refreshes_lines() {
        let mut doc = Document::new("<a>".to_string());
        doc.update_text("<div>\n<span>".to_string());
        assert_eq!(doc.line_prefix(1, 5).as_deref(), Some("<span"));
        assert_eq!(doc.line_prefix(2, 0), None);
    }

    #[test]
    fn test_line_prefix() {
        let doc = Document::new("<input asp-for".to_string());
        assert_eq!(doc.line_prefix(0, 6).as_deref(), Some("<input"));
        assert_eq!(doc.line_prefix(3, 0), None);
    }

    #[test]
    fn test_tag_name_at_position() {
        let doc = Document::new("  <my-button type=\"x\"></my-button>".to_string());
        assert_eq!(doc.tag_name_at_position(0, 5).as_deref(), Some("my-button"));
        assert_eq!(doc.tag_name_at_position(0, 26).as_deref(), Some("my-button"));
    }

    #[test]
    fn test_positions_count_utf16_units() {
        // U+1F600 takes two UTF-16 code units
        let doc = Document::new("<p>\u{1F600}</p><my-tag".to_string());
        assert_eq!(doc.line_prefix(0, 5).as_deref(), Some("<p>\u{1F600}"));
        assert_eq!(doc.line_prefix(0, 10).as_deref(), Some("<p>\u{1F600}</p><"));
        assert_eq!(doc.tag_name_at_position(0, 12).as_deref(), Some("my-tag"));
        assert_eq!(doc.tag_name_at_position(0, 8).as_deref(), Some("p"));
    }

    #[test]
    fn test_attribute_name_is_not_a_tag_name() {
        let doc = Document::new("<input type=\"text\">".to_string());
        assert_eq!(doc.tag_name_at_position(0, 8), None);
    }
}
