use std::sync::LazyLock;

use regex::Regex;

use super::line::{Line, classify_line};
use super::tree::{Anchor, Group, Heading, Item};

/// Character count of the conventional export preamble (doctype, comment,
/// meta, title and `<H1>` lines, LF line endings).
pub const PREAMBLE_LEN: usize = 254;

static PREAMBLE_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*<H1[^>]*>.*</H1>[ \t]*$\n?").expect("preamble regex is valid")
});

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PreambleMode {
    /// Skip exactly [`PREAMBLE_LEN`] characters.
    #[default]
    Fixed,
    /// Skip through the `<H1>` line, or nothing when it is absent.
    Detect,
}

/// Parses one exported document into its root folder.
///
/// Returns `None` when the body contains no group-open line.
pub fn parse_document(raw: &str, mode: PreambleMode) -> Option<Group> {
    let normalized = raw.replace("\r\n", "\n");
    let body = strip_preamble(&normalized, mode);
    build_tree(body.split('\n').map(|line| classify_line(line.trim())))
}

fn strip_preamble(document: &str, mode: PreambleMode) -> &str {
    match mode {
        PreambleMode::Fixed => match document.char_indices().nth(PREAMBLE_LEN) {
            Some((offset, _)) => &document[offset..],
            None => "",
        },
        PreambleMode::Detect => match PREAMBLE_END_RE.find(document) {
            Some(found) => &document[found.end()..],
            None => document,
        },
    }
}

/// Rebuilds the folder tree from classified lines using an explicit stack of
/// open folders.
///
/// A heading names only the folder opened immediately after it; a link in
/// between discards it. Unbalanced closes and links outside any folder are
/// ignored.
pub fn build_tree(lines: impl IntoIterator<Item = Line>) -> Option<Group> {
    let mut pending: Option<Heading> = None;
    let mut stack: Vec<Group> = Vec::new();
    let mut root: Option<Group> = None;

    for line in lines {
        match line {
            Line::Heading { attributes, text } => {
                pending = Some(Heading::new(attributes, text));
            }
            Line::GroupOpen => {
                stack.push(Group::new(pending.take()));
            }
            Line::GroupClose => {
                let Some(closed) = stack.pop() else {
                    continue;
                };
                match stack.last_mut() {
                    Some(parent) => parent.items.push(Item::Group(closed)),
                    None if root.is_none() => root = Some(closed),
                    None => {}
                }
            }
            Line::Anchor { attributes, text } => {
                pending = None;
                if let Some(parent) = stack.last_mut() {
                    parent.items.push(Item::Anchor(Anchor::new(attributes, text)));
                }
            }
            Line::Unknown => {}
        }
    }

    // Folders still open at end of input stay attached to their parents.
    while let Some(open) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.items.push(Item::Group(open)),
            None if root.is_none() => root = Some(open),
            None => {}
        }
    }

    root
}
