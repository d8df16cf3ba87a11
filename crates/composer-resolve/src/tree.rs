//! Recursive helpers over element trees.
//!
//! Deep-cloning is `Element::clone` — the derive already performs an
//! explicit recursive structural copy, so a resolved tree never aliases
//! the definition it came from.

use std::collections::BTreeSet;

use composer_model::Element;
use uuid::Uuid;

/// Visit `root` and every descendant in pre-order.
pub fn walk<F>(root: &Element, visit: &mut F)
where
    F: FnMut(&Element),
{
    visit(root);
    for child in &root.children {
        walk(child, visit);
    }
}

/// Visit `root` and every descendant in pre-order, mutably.
pub fn walk_mut<F>(root: &mut Element, visit: &mut F)
where
    F: FnMut(&mut Element),
{
    visit(root);
    for child in &mut root.children {
        walk_mut(child, visit);
    }
}

/// Find the element with `id` anywhere in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }
    root.children
        .iter()
        .find_map(|child| find_element(child, id))
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }
    root.children
        .iter_mut()
        .find_map(|child| find_element_mut(child, id))
}

/// Every identifier in the tree, in sorted order.
pub fn collect_ids(root: &Element) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    walk(root, &mut |element| {
        ids.insert(element.id.clone());
    });
    ids
}

/// Replace every identifier in the tree with a fresh one, pre-order.
///
/// Nested instance ids are regenerated too; `componentId` references are
/// left alone because they are library-scoped and must keep resolving.
pub fn regenerate_ids(root: &mut Element) {
    walk_mut(root, &mut |element| {
        element.id = fresh_element_id();
        if let Some(data) = element.instance_data_mut() {
            data.instance_id = fresh_instance_id();
        }
    });
}

pub fn fresh_element_id() -> String {
    format!("el_{}", Uuid::new_v4())
}

pub fn fresh_instance_id() -> String {
    format!("inst_{}", Uuid::new_v4())
}
