use indexmap::IndexMap;
use indexmap::map::Entry;

use super::tree::{
    ADD_DATE, Attributes, Group, Heading, Item, LAST_MODIFIED, PERSONAL_TOOLBAR_FOLDER,
};

#[derive(Debug)]
struct Bucket {
    attributes: Attributes,
    items: Vec<Item>,
}

impl Bucket {
    fn new(mut attributes: Attributes, items: Vec<Item>) -> Self {
        let toolbar = is_toolbar(&attributes);
        set_toolbar(&mut attributes, toolbar);
        Self { attributes, items }
    }

    fn absorb(&mut self, incoming: Attributes, items: Vec<Item>) {
        self.items.extend(items);
        merge_numeric(&mut self.attributes, &incoming, ADD_DATE, i64::min);
        merge_numeric(&mut self.attributes, &incoming, LAST_MODIFIED, i64::max);

        let toolbar = is_toolbar(&self.attributes) || is_toolbar(&incoming);
        set_toolbar(&mut self.attributes, toolbar);
    }

    fn into_item(self, name: String) -> Item {
        Item::Group(Group::with_items(
            Some(Heading::new(self.attributes, name)),
            self.items,
        ))
    }
}

/// Folds the top-level folders of several document roots into one headerless
/// root, combining folders that share a name.
///
/// Output folders appear in first-seen order. Repeated names concatenate
/// their items (earlier first), keep the earliest `ADD_DATE`, the latest
/// `LAST_MODIFIED`, and stay on the toolbar if any contributor was. Links and
/// unnamed folders sitting directly under a document root are carried over in
/// place without merging.
pub fn merge_documents(roots: impl IntoIterator<Item = Group>) -> Group {
    let mut folders: IndexMap<String, Bucket> = IndexMap::new();
    // Loose items, tagged with how many distinct folders preceded them.
    let mut loose: Vec<(usize, Item)> = Vec::new();

    for item in roots.into_iter().flat_map(|root| root.items) {
        let (heading, items) = match item {
            Item::Group(Group {
                header: Some(heading),
                items,
            }) => (heading, items),
            other => {
                loose.push((folders.len(), other));
                continue;
            }
        };

        let Heading { attributes, text } = heading;
        match folders.entry(text) {
            Entry::Occupied(mut entry) => entry.get_mut().absorb(attributes, items),
            Entry::Vacant(entry) => {
                entry.insert(Bucket::new(attributes, items));
            }
        }
    }

    let mut loose = loose.into_iter().peekable();
    let mut items = Vec::new();
    for (index, (name, bucket)) in folders.into_iter().enumerate() {
        while let Some((_, item)) = loose.next_if(|(preceding, _)| *preceding <= index) {
            items.push(item);
        }
        items.push(bucket.into_item(name));
    }
    items.extend(loose.map(|(_, item)| item));

    Group::with_items(None, items)
}

// Numeric values win over unparseable ones; with none parseable the existing
// value is kept.
fn merge_numeric(
    target: &mut Attributes,
    incoming: &Attributes,
    key: &str,
    pick: fn(i64, i64) -> i64,
) {
    let current = target.get(key).map(str::to_owned);
    let other = incoming.get(key);

    let parse = |value: Option<&str>| value.and_then(|raw| raw.trim().parse::<i64>().ok());

    let merged = match (parse(current.as_deref()), parse(other)) {
        (Some(left), Some(right)) => Some(pick(left, right).to_string()),
        (Some(_), None) => current,
        (None, Some(_)) => other.map(str::to_owned),
        (None, None) => current.or_else(|| other.map(str::to_owned)),
    };

    if let Some(value) = merged {
        target.insert(key, value);
    }
}

fn is_toolbar(attributes: &Attributes) -> bool {
    attributes.get(PERSONAL_TOOLBAR_FOLDER) == Some("true")
}

fn set_toolbar(attributes: &mut Attributes, toolbar: bool) {
    if toolbar {
        attributes.insert(PERSONAL_TOOLBAR_FOLDER, "true");
    } else {
        attributes.remove(PERSONAL_TOOLBAR_FOLDER);
    }
}
