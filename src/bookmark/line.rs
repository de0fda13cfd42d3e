use super::attributes::tokenize_attributes;
use super::tree::Attributes;

pub const HEADING_MARKER: &str = "<DT><H3";
pub const HEADING_CLOSE: &str = "</H3>";
pub const ANCHOR_MARKER: &str = "<DT><A";
pub const ANCHOR_CLOSE: &str = "</A>";
pub const GROUP_OPEN: &str = "<DL><p>";
pub const GROUP_CLOSE: &str = "</DL><p>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Heading { attributes: Attributes, text: String },
    Anchor { attributes: Attributes, text: String },
    GroupOpen,
    GroupClose,
    Unknown,
}

/// Classifies one trimmed line by its leading marker; the first match wins.
pub fn classify_line(line: &str) -> Line {
    if line.starts_with(HEADING_MARKER) {
        let (attributes, text) = split_tag(line, HEADING_MARKER, HEADING_CLOSE);
        return Line::Heading { attributes, text };
    }

    if line.starts_with(ANCHOR_MARKER) {
        let (attributes, text) = split_tag(line, ANCHOR_MARKER, ANCHOR_CLOSE);
        return Line::Anchor { attributes, text };
    }

    if line.starts_with(GROUP_OPEN) {
        return Line::GroupOpen;
    }

    if line.starts_with(GROUP_CLOSE) {
        return Line::GroupClose;
    }

    Line::Unknown
}

// The last '>' separates the tag from its inner text, so inner text that
// itself contains '>' is cut short.
fn split_tag(line: &str, marker: &str, close: &str) -> (Attributes, String) {
    let body = line.strip_suffix(close).unwrap_or(line);

    let Some(boundary) = body.rfind('>') else {
        return (Attributes::new(), String::new());
    };

    let text = body[boundary + 1..].to_string();
    let attribute_start = marker.len() + 1;
    let attributes = body
        .get(attribute_start..boundary)
        .map(tokenize_attributes)
        .unwrap_or_default();

    (attributes, text)
}
