use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use composer_import::deduplicate;
use composer_model::{ComponentDefinition, Element, ElementKind, InstanceData};
use proptest::prelude::*;

fn batch_strategy() -> impl Strategy<Value = (Vec<String>, BTreeSet<String>)> {
    let id = prop::sample::select(vec![
        "a".to_string(),
        "b".to_string(),
        "c".to_string(),
        "d".to_string(),
    ]);
    (
        prop::collection::vec(id.clone(), 1..8),
        prop::collection::btree_set(id, 0..4),
    )
}

proptest! {
    // Whatever mix of in-batch duplicates and library collisions the
    // batch carries, the merged id space stays collision-free and every
    // in-batch reference resolves to exactly one imported definition.
    #[test]
    fn merged_ids_stay_unique_and_references_resolve((ids, existing) in batch_strategy()) {
        let imported_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();

        let batch: Vec<ComponentDefinition> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let mut root = Element::new(format!("root-{index}"), "container");
                // Each definition references another batch member.
                let target = &ids[(index + 1) % ids.len()];
                let mut reference = Element::new(format!("ref-{index}"), "componentInstance");
                reference.kind = ElementKind::Instance {
                    instance_data: InstanceData::new(
                        target.clone(),
                        format!("inst-{index}"),
                        None,
                    ),
                };
                root.children.push(reference);
                ComponentDefinition::new(id.clone(), "Widget", root)
            })
            .collect();

        let result = deduplicate(batch, &existing, imported_at);

        let mut merged = existing.clone();
        for definition in &result {
            prop_assert!(
                merged.insert(definition.id.clone()),
                "duplicate id {} after dedup",
                definition.id
            );
        }

        let result_ids: BTreeSet<&str> = result.iter().map(|d| d.id.as_str()).collect();
        for definition in &result {
            let reference = definition.element.children[0]
                .instance_data()
                .expect("instance data");
            prop_assert!(
                result_ids.contains(reference.component_id.as_str()),
                "reference {} does not resolve within the imported set",
                reference.component_id
            );
        }
    }
}
