use super::tree::{
    ADD_DATE, Attributes, Group, Heading, Item, LAST_MODIFIED, collect_anchors,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Protocol {
    Http,
    Https,
    Other,
}

impl Protocol {
    /// Output order of the synthetic sub-folders.
    pub const ALL: [Protocol; 3] = [Protocol::Http, Protocol::Https, Protocol::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Other => "none",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Http => 0,
            Self::Https => 1,
            Self::Other => 2,
        }
    }

    // `https` must be tested first: every https URL also starts with `http`.
    pub fn of(href: &str) -> Self {
        if href.starts_with("https") {
            Self::Https
        } else if href.starts_with("http") {
            Self::Http
        } else {
            Self::Other
        }
    }
}

/// Splits every top-level folder's links into exactly three sub-folders named
/// `http`, `https` and `none`, each stamped with `timestamp` as both
/// `ADD_DATE` and `LAST_MODIFIED`.
///
/// Expects flattened input; any nested folders are walked in pre-order so no
/// link is lost. Links directly under the root stay where they are.
pub fn partition_by_protocol(root: Group, timestamp: &str) -> Group {
    let items = root
        .items
        .into_iter()
        .map(|item| match item {
            Item::Group(folder) => Item::Group(partition_folder(folder, timestamp)),
            anchor @ Item::Anchor(_) => anchor,
        })
        .collect();

    Group::with_items(root.header, items)
}

fn partition_folder(mut folder: Group, timestamp: &str) -> Group {
    let header = folder.header.take();
    let mut anchors = Vec::new();
    collect_anchors(folder, &mut anchors);

    let mut buckets: [Vec<Item>; 3] = Default::default();
    for anchor in anchors {
        let protocol = Protocol::of(anchor.href().unwrap_or_default());
        buckets[protocol.slot()].push(Item::Anchor(anchor));
    }

    let items = Protocol::ALL
        .into_iter()
        .zip(buckets)
        .map(|(protocol, links)| {
            let attributes: Attributes = [(ADD_DATE, timestamp), (LAST_MODIFIED, timestamp)]
                .into_iter()
                .collect();
            Item::Group(Group::with_items(
                Some(Heading::new(attributes, protocol.as_str())),
                links,
            ))
        })
        .collect();

    Group::with_items(header, items)
}
