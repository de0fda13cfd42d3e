use super::tree::{Group, Item, collect_anchors};

/// Replaces the contents of every top-level folder with all links found
/// beneath it, in pre-order, dropping the intermediate folders.
///
/// Folder set, order and headers are unchanged. Links directly under the root
/// stay where they are.
pub fn flatten_folders(root: Group) -> Group {
    let items = root
        .items
        .into_iter()
        .map(|item| match item {
            Item::Group(folder) => Item::Group(flatten_folder(folder)),
            anchor @ Item::Anchor(_) => anchor,
        })
        .collect();

    Group::with_items(root.header, items)
}

fn flatten_folder(mut folder: Group) -> Group {
    let header = folder.header.take();
    let mut anchors = Vec::new();
    collect_anchors(folder, &mut anchors);
    Group::with_items(header, anchors.into_iter().map(Item::Anchor).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::tree::{Anchor, Attributes, HREF, Heading};

    fn link(href: &str) -> Item {
        Item::Anchor(Anchor::new([(HREF, href)].into_iter().collect(), href))
    }

    fn folder(name: &str, items: Vec<Item>) -> Item {
        Item::Group(Group::with_items(
            Some(Heading::new(Attributes::new(), name)),
            items,
        ))
    }

    #[test]
    fn collects_nested_links_in_pre_order() {
        let root = Group::with_items(
            None,
            vec![
                folder(
                    "Top",
                    vec![
                        link("1"),
                        folder("mid", vec![link("2"), folder("deep", vec![link("3")])]),
                        link("4"),
                    ],
                ),
                folder("Empty", vec![folder("hollow", vec![])]),
            ],
        );

        let flat = flatten_folders(root);
        assert_eq!(flat.items.len(), 2);

        let Item::Group(top) = &flat.items[0] else {
            panic!("expected folder");
        };
        assert_eq!(top.name(), Some("Top"));
        let order: Vec<_> = top
            .items
            .iter()
            .map(|item| match item {
                Item::Anchor(anchor) => anchor.href().unwrap_or_default(),
                Item::Group(_) => panic!("flattened folder holds only links"),
            })
            .collect();
        assert_eq!(order, vec!["1", "2", "3", "4"]);

        let Item::Group(empty) = &flat.items[1] else {
            panic!("expected folder");
        };
        assert!(empty.items.is_empty());
    }

    #[test]
    fn keeps_links_under_root_in_place() {
        let root = Group::with_items(None, vec![link("r"), folder("F", vec![link("f")])]);
        let flat = flatten_folders(root.clone());
        assert_eq!(flat, root);
    }
}
