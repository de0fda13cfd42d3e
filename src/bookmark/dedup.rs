use std::collections::HashSet;
use std::mem;
use std::vec;

use super::tree::{Group, Heading, Item};

/// A folder being rebuilt: items still to visit and the ones kept so far.
struct Frame {
    header: Option<Heading>,
    pending: vec::IntoIter<Item>,
    kept: Vec<Item>,
}

impl Frame {
    fn open(group: Group) -> Self {
        Self {
            header: group.header,
            pending: group.items.into_iter(),
            kept: Vec::new(),
        }
    }

    fn close(self) -> Group {
        Group::with_items(self.header, self.kept)
    }
}

/// Drops every link whose `HREF` was already seen earlier in a pre-order,
/// left-to-right walk of the whole tree. Folders are always kept, even when
/// they end up empty. Links without an `HREF` are never treated as duplicates.
pub fn dedup_links(root: Group) -> Group {
    let mut seen: HashSet<String> = HashSet::new();
    let mut parents: Vec<Frame> = Vec::new();
    let mut current = Frame::open(root);

    loop {
        match current.pending.next() {
            Some(Item::Group(nested)) => {
                parents.push(mem::replace(&mut current, Frame::open(nested)));
            }
            Some(Item::Anchor(anchor)) => {
                let duplicate = anchor
                    .href()
                    .is_some_and(|href| !seen.insert(href.to_owned()));
                if !duplicate {
                    current.kept.push(Item::Anchor(anchor));
                }
            }
            None => {
                let finished = current.close();
                match parents.pop() {
                    Some(mut parent) => {
                        parent.kept.push(Item::Group(finished));
                        current = parent;
                    }
                    None => return finished,
                }
            }
        }
    }
}
