use super::line::{
    ANCHOR_CLOSE, ANCHOR_MARKER, GROUP_CLOSE, GROUP_OPEN, HEADING_CLOSE, HEADING_MARKER,
};
use super::tree::{
    ADD_DATE, Anchor, Attributes, Group, HREF, Heading, ICON, Item, LAST_MODIFIED,
    PERSONAL_TOOLBAR_FOLDER,
};

pub const PREAMBLE: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
<!-- This is an automatically generated file.\n     \
It will be read and overwritten.\n     \
DO NOT EDIT! -->\n\
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
<TITLE>Bookmarks</TITLE>\n\
<H1>Bookmarks</H1>\n";

const INDENT: &str = "    ";
const HEADING_ORDER: &[&str] = &[ADD_DATE, LAST_MODIFIED, PERSONAL_TOOLBAR_FOLDER];
const ANCHOR_ORDER: &[&str] = &[HREF, ADD_DATE, ICON];

/// Renders a tree as a complete export document, preamble included.
pub fn render_document(root: &Group) -> String {
    let mut out = String::from(PREAMBLE);
    render_group(&mut out, root, 0);
    out
}

fn render_group(out: &mut String, group: &Group, depth: usize) {
    let indent = INDENT.repeat(depth);

    if let Some(heading) = &group.header {
        render_heading(out, &indent, heading);
    }

    out.push_str(&indent);
    out.push_str(GROUP_OPEN);
    out.push('\n');

    for item in &group.items {
        match item {
            Item::Group(nested) => render_group(out, nested, depth + 1),
            Item::Anchor(anchor) => render_anchor(out, &INDENT.repeat(depth + 1), anchor),
        }
    }

    out.push_str(&indent);
    out.push_str(GROUP_CLOSE);
    out.push('\n');
}

fn render_heading(out: &mut String, indent: &str, heading: &Heading) {
    out.push_str(indent);
    out.push_str(HEADING_MARKER);
    push_attributes(out, &heading.attributes, HEADING_ORDER);
    out.push('>');
    out.push_str(&heading.text);
    out.push_str(HEADING_CLOSE);
    out.push('\n');
}

fn render_anchor(out: &mut String, indent: &str, anchor: &Anchor) {
    out.push_str(indent);
    out.push_str(ANCHOR_MARKER);
    push_attributes(out, &anchor.attributes, ANCHOR_ORDER);
    out.push('>');
    out.push_str(&anchor.text);
    out.push_str(ANCHOR_CLOSE);
    out.push('\n');
}

// Known keys first in their fixed order, then anything else as it appeared.
fn push_attributes(out: &mut String, attributes: &Attributes, order: &[&str]) {
    if attributes.is_empty() {
        return;
    }

    let known = order
        .iter()
        .filter_map(|key| attributes.get(key).map(|value| (*key, value)));
    let rest = attributes.iter().filter(|(key, _)| !order.contains(key));

    for (key, value) in known.chain(rest) {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
