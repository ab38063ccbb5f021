//! Generic decoding for documents no typed rule recognises.

use std::collections::btree_map::Entry;

use roxmltree::Node;

use super::xml::text_content;
use crate::types::{GenericMap, GenericValue};

/// Decode the root's direct element children, skipping status elements.
/// A tag repeated at this level keeps its last occurrence.
pub(crate) fn decode_root(root: Node<'_, '_>) -> GenericMap {
    let mut map = GenericMap::new();
    for child in root.children().filter(Node::is_element) {
        let name = child.tag_name().name();
        if name.to_ascii_lowercase().contains("status") {
            continue;
        }
        let value = if child.children().count() > 1 {
            decode_element(child)
        } else {
            GenericValue::Text(text_content(child))
        };
        map.insert(name.to_string(), value);
    }
    map
}

fn decode_element(element: Node<'_, '_>) -> GenericValue {
    if !element.children().any(|c| c.is_element()) {
        return GenericValue::Text(text_content(element));
    }
    let mut map = GenericMap::new();
    for child in element.children().filter(Node::is_element) {
        insert_collapsing(&mut map, child.tag_name().name(), decode_element(child));
    }
    GenericValue::Map(map)
}

/// Repeated tags become a list in document order. Decoded values are never
/// lists themselves, so an existing `List` always marks a collapsed tag.
fn insert_collapsing(map: &mut GenericMap, name: &str, value: GenericValue) {
    match map.entry(name.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            GenericValue::List(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, GenericValue::List(Vec::new()));
                *existing = GenericValue::List(vec![first, value]);
            }
        },
    }
}
