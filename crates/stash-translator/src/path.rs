//! Nested path operations over a bag
//!
//! A segment addresses a map entry by key, or a list element by decimal
//! index. An empty segment list addresses nothing.

use crate::value::{Map, Value};

/// Decimal index without sign or leading zeros
fn parse_index(segment: &str) -> Option<usize> {
    let index = segment.parse::<usize>().ok()?;
    (index.to_string() == segment).then_some(index)
}

fn list_index(segment: &str, len: usize) -> Option<usize> {
    parse_index(segment).filter(|i| *i < len)
}

fn is_empty_map(value: &Value) -> bool {
    matches!(value, Value::Map(map) if map.is_empty())
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Map(map) => map.get(segment),
        Value::List(items) => list_index(segment, items.len()).map(|i| &items[i]),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Map(map) => map.get_mut(segment),
        Value::List(items) => {
            let i = list_index(segment, items.len())?;
            items.get_mut(i)
        }
        _ => None,
    }
}

pub(crate) fn lookup<'a>(root: &'a Map, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    rest.iter()
        .try_fold(root.get(first)?, |current, segment| child(current, segment))
}

pub(crate) fn lookup_mut<'a>(root: &'a mut Map, segments: &[String]) -> Option<&'a mut Value> {
    let (first, rest) = segments.split_first()?;
    rest.iter()
        .try_fold(root.get_mut(first)?, |current, segment| {
            child_mut(current, segment)
        })
}

/// Write `value` at the path, creating intermediate maps. Existing
/// siblings are never discarded.
///
/// Returns false when the path is empty and nothing was written.
pub(crate) fn insert(root: &mut Map, segments: &[String], value: Value) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };

    let slot = root.entry(first.clone()).or_insert(Value::Null);
    insert_into(slot, rest, value);
    true
}

fn insert_into(slot: &mut Value, segments: &[String], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        *slot = value;
        return;
    };

    // Lists take in-range indices and appends at their length. Any other
    // segment turns the list into a map keyed by position.
    let spilled = match slot {
        Value::List(items) => match parse_index(segment) {
            Some(i) if i < items.len() => {
                insert_into(&mut items[i], rest, value);
                return;
            }
            Some(i) if i == items.len() => {
                items.push(Value::Null);
                insert_into(&mut items[i], rest, value);
                return;
            }
            _ => Some(std::mem::take(items)),
        },
        _ => None,
    };
    if let Some(items) = spilled {
        *slot = Value::Map(indexed(items));
    }

    if !matches!(slot, Value::Map(_)) {
        *slot = Value::Map(Map::new());
    }
    if let Value::Map(map) = slot {
        let next = map.entry(segment.clone()).or_insert(Value::Null);
        insert_into(next, rest, value);
    }
}

fn indexed(items: Vec<Value>) -> Map {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| (i.to_string(), item))
        .collect()
}

/// Remove the value at the path and prune maps the removal left empty.
/// The root itself is never pruned.
pub(crate) fn remove(root: &mut Map, segments: &[String]) -> Option<Value> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return root.remove(first);
    }

    let removed = remove_from(root.get_mut(first)?, rest)?;
    if root.get(first).is_some_and(is_empty_map) {
        root.remove(first);
    }
    Some(removed)
}

fn remove_from(slot: &mut Value, segments: &[String]) -> Option<Value> {
    let (segment, rest) = segments.split_first()?;

    if rest.is_empty() {
        return match slot {
            Value::Map(map) => map.remove(segment),
            Value::List(items) => list_index(segment, items.len()).map(|i| items.remove(i)),
            _ => None,
        };
    }

    let removed = remove_from(child_mut(slot, segment)?, rest)?;
    // Only map entries are pruned; list elements keep their positions.
    if let Value::Map(map) = slot {
        if map.get(segment).is_some_and(is_empty_map) {
            map.remove(segment);
        }
    }
    Some(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(key: &str) -> Vec<String> {
        key.split('.').map(String::from).collect()
    }

    #[test]
    fn test_insert_creates_intermediate_maps() {
        let mut root = Map::new();
        assert!(insert(&mut root, &path("user.profile.name"), Value::from("ada")));

        assert_eq!(
            lookup(&root, &path("user.profile.name")),
            Some(&Value::from("ada"))
        );
        assert!(lookup(&root, &path("user.profile")).unwrap().as_map().is_some());
    }

    #[test]
    fn test_insert_replaces_scalar_intermediate() {
        let mut root = Map::new();
        insert(&mut root, &path("user"), Value::from("guest"));
        insert(&mut root, &path("user.id"), Value::from(3));

        assert_eq!(lookup(&root, &path("user.id")), Some(&Value::from(3)));
    }

    #[test]
    fn test_list_indices() {
        let mut root = Map::new();
        insert(&mut root, &path("tags"), Value::from(vec!["a", "b"]));

        assert_eq!(lookup(&root, &path("tags.1")), Some(&Value::from("b")));
        assert_eq!(lookup(&root, &path("tags.2")), None);

        insert(&mut root, &path("tags.0"), Value::from("z"));
        assert_eq!(lookup(&root, &path("tags")), Some(&Value::from(vec!["z", "b"])));

        assert_eq!(remove(&mut root, &path("tags.0")), Some(Value::from("z")));
        assert_eq!(lookup(&root, &path("tags")), Some(&Value::from(vec!["b"])));
    }

    #[test]
    fn test_empty_path_addresses_nothing() {
        let mut root = Map::new();
        assert!(!insert(&mut root, &[], Value::from(1)));
        assert!(root.is_empty());
        assert_eq!(lookup(&root, &[]), None);
        assert_eq!(remove(&mut root, &[]), None);
    }

    #[test]
    fn test_remove_prunes_empty_parents() {
        let mut root = Map::new();
        insert(&mut root, &path("a.b.c"), Value::from(1));
        insert(&mut root, &path("x.y"), Value::from(2));
        insert(&mut root, &path("x.z"), Value::from(3));

        assert_eq!(remove(&mut root, &path("a.b.c")), Some(Value::from(1)));
        assert!(!root.contains_key("a"));

        remove(&mut root, &path("x.y"));
        assert_eq!(lookup(&root, &path("x.z")), Some(&Value::from(3)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut root = Map::new();
        insert(&mut root, &path("a.b"), Value::from(1));

        assert_eq!(remove(&mut root, &path("a.c")), None);
        assert_eq!(remove(&mut root, &path("a.b.c")), None);
        assert_eq!(lookup(&root, &path("a.b")), Some(&Value::from(1)));
    }

    #[test]
    fn test_insert_appends_at_list_length() {
        let mut root = Map::new();
        insert(&mut root, &path("tags"), Value::from(vec!["a", "b"]));

        insert(&mut root, &path("tags.2"), Value::from("c"));
        assert_eq!(
            lookup(&root, &path("tags")),
            Some(&Value::from(vec!["a", "b", "c"]))
        );

        insert(&mut root, &path("tags.3.label"), Value::from("d"));
        let tags = lookup(&root, &path("tags")).unwrap().as_list().unwrap();
        assert_eq!(tags.len(), 4);
        assert_eq!(lookup(&root, &path("tags.3.label")), Some(&Value::from("d")));
    }

    #[test]
    fn test_insert_past_list_end_keeps_elements() {
        let mut root = Map::new();
        insert(&mut root, &path("tags"), Value::from(vec!["a", "b"]));

        insert(&mut root, &path("tags.9"), Value::from("z"));

        let tags = lookup(&root, &path("tags")).unwrap().as_map().unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(lookup(&root, &path("tags.0")), Some(&Value::from("a")));
        assert_eq!(lookup(&root, &path("tags.1")), Some(&Value::from("b")));
        assert_eq!(lookup(&root, &path("tags.9")), Some(&Value::from("z")));
    }

    #[test]
    fn test_insert_named_key_into_list_keeps_elements() {
        let mut root = Map::new();
        insert(&mut root, &path("tags"), Value::from(vec!["a"]));

        insert(&mut root, &path("tags.label"), Value::from("x"));
        insert(&mut root, &path("tags.01"), Value::from("y"));

        assert_eq!(lookup(&root, &path("tags.0")), Some(&Value::from("a")));
        assert_eq!(lookup(&root, &path("tags.label")), Some(&Value::from("x")));
        assert_eq!(lookup(&root, &path("tags.01")), Some(&Value::from("y")));
    }
}
