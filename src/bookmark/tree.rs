use indexmap::IndexMap;
use serde::Serialize;

pub const HREF: &str = "HREF";
pub const ADD_DATE: &str = "ADD_DATE";
pub const LAST_MODIFIED: &str = "LAST_MODIFIED";
pub const ICON: &str = "ICON";
pub const PERSONAL_TOOLBAR_FOLDER: &str = "PERSONAL_TOOLBAR_FOLDER";

/// Attribute name/value pairs of one tag, kept in first-appearance order.
///
/// Equality ignores order: two maps are equal when they hold the same keys
/// with the same values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets `key`; an existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// A link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "anchor")]
pub struct Anchor {
    #[serde(rename = "$attr")]
    pub attributes: Attributes,
    #[serde(rename = "$text")]
    pub text: String,
}

impl Anchor {
    pub fn new(attributes: Attributes, text: impl Into<String>) -> Self {
        Self {
            attributes,
            text: text.into(),
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.attributes.get(HREF)
    }
}

/// Name and metadata of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "heading")]
pub struct Heading {
    #[serde(rename = "$attr")]
    pub attributes: Attributes,
    #[serde(rename = "$text")]
    pub text: String,
}

impl Heading {
    pub fn new(attributes: Attributes, text: impl Into<String>) -> Self {
        Self {
            attributes,
            text: text.into(),
        }
    }
}

/// A folder. Roots of parsed documents and of merged trees carry no header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "group")]
pub struct Group {
    pub header: Option<Heading>,
    #[serde(rename = "item")]
    pub items: Vec<Item>,
}

impl Group {
    pub fn new(header: Option<Heading>) -> Self {
        Self {
            header,
            items: Vec::new(),
        }
    }

    pub fn with_items(header: Option<Heading>, items: Vec<Item>) -> Self {
        Self { header, items }
    }

    pub fn name(&self) -> Option<&str> {
        self.header.as_ref().map(|heading| heading.text.as_str())
    }

    /// Counts nested folders (excluding `self`) and links in the subtree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut pending = vec![self];
        while let Some(group) = pending.pop() {
            for item in &group.items {
                match item {
                    Item::Group(nested) => {
                        stats.groups += 1;
                        pending.push(nested);
                    }
                    Item::Anchor(_) => stats.anchors += 1,
                }
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Group(Group),
    Anchor(Anchor),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub groups: usize,
    pub anchors: usize,
}

/// Collects every link below `group` in pre-order, descending into nested folders.
pub fn collect_anchors(group: Group, out: &mut Vec<Anchor>) {
    let mut stack = vec![group.items.into_iter()];
    while let Some(items) = stack.last_mut() {
        match items.next() {
            Some(Item::Group(nested)) => stack.push(nested.items.into_iter()),
            Some(Item::Anchor(anchor)) => out.push(anchor),
            None => {
                stack.pop();
            }
        }
    }
}
