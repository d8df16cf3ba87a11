use std::collections::BTreeMap;

use composer_model::{
    Breakpoint, ComponentDefinition, DefinitionLibrary, Element, ElementKind, ElementOverrides,
    InstanceData, InteractionState, Overridable, PropBinding, PropDefinition, SlotContent,
    SlotDefinition, Variant,
};
use composer_resolve::{Diagnostic, ResolveError, resolve};
use serde_json::json;

fn text_element(id: &str, content: &str) -> Element {
    let mut element = Element::new(id, "text");
    element.props.insert("content".to_string(), json!(content));
    element
}

fn instance_of(component_id: &str) -> (Element, InstanceData) {
    let data = InstanceData::new(component_id, "inst-1", None);
    let mut element = Element::new("placement-1", "componentInstance");
    element.kind = ElementKind::Instance {
        instance_data: data.clone(),
    };
    (element, data)
}

fn with_data(mut element: Element, data: InstanceData) -> Element {
    element.kind = ElementKind::Instance {
        instance_data: data,
    };
    element
}

fn library_of(definitions: Vec<ComponentDefinition>) -> DefinitionLibrary {
    DefinitionLibrary::from_definitions(definitions)
}

#[test]
fn content_override_resolves_without_touching_the_definition() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            content: Some(Overridable::set(json!("Bye"))),
            ..ElementOverrides::default()
        },
    );
    let element = with_data(element, data);

    let first = resolve(&element, &library).expect("resolve");
    assert_eq!(first.element.props["content"], json!("Bye"));
    assert_eq!(
        library.get("d1").expect("definition").element.props["content"],
        json!("Hi")
    );

    // Mutating one resolution must not leak into another or the base.
    let mut second = resolve(&element, &library).expect("resolve again");
    second
        .element
        .props
        .insert("content".to_string(), json!("Mutated"));
    let third = resolve(&element, &library).expect("resolve a third time");
    assert_eq!(third.element.props["content"], json!("Bye"));
    assert_eq!(
        library.get("d1").expect("definition").element.props["content"],
        json!("Hi")
    );
}

#[test]
fn unflagged_override_behaves_like_no_override() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let plain = with_data(element.clone(), data.clone());

    let inactive = |value: serde_json::Value| Overridable {
        value,
        is_overridden: false,
    };
    let mut flagged_off = data;
    flagged_off.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            content: Some(inactive(json!("Bye"))),
            styles: BTreeMap::from([(
                Breakpoint::Desktop,
                BTreeMap::from([("color".to_string(), inactive(json!("#f00")))]),
            )]),
            states: BTreeMap::from([(
                InteractionState::Hover,
                BTreeMap::from([("opacity".to_string(), inactive(json!("0.5")))]),
            )]),
            ..ElementOverrides::default()
        },
    );
    let gated = with_data(element, flagged_off);

    let baseline = resolve(&plain, &library).expect("resolve baseline");
    let resolved = resolve(&gated, &library).expect("resolve gated");
    assert_eq!(resolved.element, baseline.element);
    // Not even an empty breakpoint or state map may appear.
    assert!(resolved.element.styles.is_empty());
    assert!(resolved.element.states.is_empty());
}

#[test]
fn missing_component_is_a_recoverable_signal() {
    let library = DefinitionLibrary::new();
    let (element, data) = instance_of("ghost");
    let element = with_data(element, data);
    match resolve(&element, &library) {
        Err(ResolveError::ComponentNotFound { component_id }) => {
            assert_eq!(component_id, "ghost");
        }
        other => panic!("expected ComponentNotFound, got {other:?}"),
    }
}

#[test]
fn non_instance_elements_are_rejected() {
    let library = DefinitionLibrary::new();
    let element = Element::new("plain", "text");
    assert!(matches!(
        resolve(&element, &library),
        Err(ResolveError::NotAnInstance { .. })
    ));
}

#[test]
fn matching_variant_replaces_the_base_tree() {
    let mut definition = ComponentDefinition::new("d1", "Button", text_element("base", "Base"));
    definition.variants.push(Variant {
        when: BTreeMap::from([("size".to_string(), json!("large"))]),
        element: text_element("large", "Large"),
    });
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.selected_variant
        .insert("size".to_string(), json!("large"));
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.id, "large");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn unmatched_variant_falls_back_to_base_with_diagnostic() {
    let mut definition = ComponentDefinition::new("d1", "Button", text_element("base", "Base"));
    definition.variants.push(Variant {
        when: BTreeMap::from([("size".to_string(), json!("large"))]),
        element: text_element("large", "Large"),
    });
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.selected_variant
        .insert("size".to_string(), json!("medium"));
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.id, "base");
    assert!(matches!(
        resolved.diagnostics.as_slice(),
        [Diagnostic::VariantFallback { .. }]
    ));
}

fn slotted_definition(default_content: Vec<Element>) -> ComponentDefinition {
    let mut root = Element::new("root", "container");
    root.children.push(Element::slot("slot-body", "body"));
    let mut definition = ComponentDefinition::new("d1", "Section", root);
    definition.slots.push(SlotDefinition {
        name: "body".to_string(),
        default_content,
    });
    definition
}

#[test]
fn instance_slot_content_wins_over_the_default() {
    let definition = slotted_definition(vec![text_element("default-body", "Default")]);
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.slot_contents.push(SlotContent {
        slot_name: "body".to_string(),
        content: vec![text_element("supplied-body", "Supplied")],
    });
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.children.len(), 1);
    assert_eq!(resolved.element.children[0].id, "supplied-body");
}

#[test]
fn definition_default_fills_an_unsupplied_slot() {
    let definition = slotted_definition(vec![text_element("default-body", "Default")]);
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.children.len(), 1);
    assert_eq!(resolved.element.children[0].id, "default-body");
}

#[test]
fn slot_with_no_content_collapses_to_empty() {
    let definition = slotted_definition(Vec::new());
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert!(resolved.element.children.is_empty());
    assert!(matches!(
        resolved.diagnostics.as_slice(),
        [Diagnostic::EmptySlot { name }] if name == "body"
    ));
}

#[test]
fn nested_slots_resolve_inside_kept_children() {
    let mut inner = Element::new("inner", "container");
    inner.children.push(Element::slot("slot-footer", "footer"));
    let mut root = Element::new("root", "container");
    root.children.push(inner);
    let mut definition = ComponentDefinition::new("d1", "Section", root);
    definition.slots.push(SlotDefinition {
        name: "footer".to_string(),
        default_content: vec![text_element("footer-text", "Footer")],
    });
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.children[0].children[0].id, "footer-text");
}

#[test]
fn prop_binding_prefers_instance_values_over_defaults() {
    let mut definition = ComponentDefinition::new("d1", "Hero", text_element("e1", "Hi"));
    definition.props.push(PropDefinition {
        key: "title".to_string(),
        default: Some(json!("Welcome")),
        bind_to: Some(PropBinding {
            element_id: "e1".to_string(),
            path: "content".to_string(),
        }),
    });
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let resolved = resolve(&with_data(element.clone(), data.clone()), &library).expect("resolve");
    assert_eq!(resolved.element.props["content"], json!("Welcome"));

    let mut with_value = data;
    with_value
        .prop_values
        .insert("title".to_string(), json!("Custom"));
    let resolved = resolve(&with_data(element, with_value), &library).expect("resolve");
    assert_eq!(resolved.element.props["content"], json!("Custom"));
}

#[test]
fn prop_binding_to_a_missing_element_degrades_to_a_diagnostic() {
    let mut definition = ComponentDefinition::new("d1", "Hero", text_element("e1", "Hi"));
    definition.props.push(PropDefinition {
        key: "title".to_string(),
        default: Some(json!("Welcome")),
        bind_to: Some(PropBinding {
            element_id: "ghost".to_string(),
            path: "content".to_string(),
        }),
    });
    let library = library_of(vec![definition]);

    let (element, data) = instance_of("d1");
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert!(matches!(
        resolved.diagnostics.as_slice(),
        [Diagnostic::DanglingPropBinding { prop, element_id }]
            if prop == "title" && element_id == "ghost"
    ));
}

#[test]
fn content_override_wins_over_a_props_content_override() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            props: BTreeMap::from([(
                "content".to_string(),
                Overridable::set(json!("From props")),
            )]),
            content: Some(Overridable::set(json!("From content"))),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.props["content"], json!("From content"));
}

#[test]
fn style_and_state_overrides_create_missing_maps() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            styles: BTreeMap::from([(
                Breakpoint::Mobile,
                BTreeMap::from([("color".to_string(), Overridable::set(json!("#f00")))]),
            )]),
            states: BTreeMap::from([(
                InteractionState::Hover,
                BTreeMap::from([("opacity".to_string(), Overridable::set(json!("0.8")))]),
            )]),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(
        resolved.element.styles[&Breakpoint::Mobile]["color"],
        json!("#f00")
    );
    assert_eq!(
        resolved.element.states[&InteractionState::Hover]["opacity"],
        json!("0.8")
    );
    // Untouched breakpoints stay absent.
    assert!(!resolved.element.styles.contains_key(&Breakpoint::Desktop));
}

#[test]
fn visibility_override_writes_settings_and_rejects_non_booleans() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            visible: Some(Overridable::set(json!(false))),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element.clone(), data), &library).expect("resolve");
    assert_eq!(resolved.element.settings.visible, Some(false));

    let (_, mut bad) = instance_of("d1");
    bad.overrides.insert(
        "e1".to_string(),
        ElementOverrides {
            visible: Some(Overridable::set(json!("nope"))),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element, bad), &library).expect("resolve");
    assert_eq!(resolved.element.settings.visible, None);
    assert!(matches!(
        resolved.diagnostics.as_slice(),
        [Diagnostic::MalformedOverride { .. }]
    ));
}

#[test]
fn dangling_overrides_are_inert_and_reported() {
    let definition = ComponentDefinition::new("d1", "Text", text_element("e1", "Hi"));
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "ghost".to_string(),
        ElementOverrides {
            content: Some(Overridable::set(json!("Bye"))),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");
    assert_eq!(resolved.element.props["content"], json!("Hi"));
    assert!(matches!(
        resolved.diagnostics.as_slice(),
        [Diagnostic::DanglingOverride { element_id }] if element_id == "ghost"
    ));
}

#[test]
fn resolved_tree_serializes_to_the_expected_document() {
    let mut root = Element::new("root", "container");
    root.children.push(text_element("headline", "Hi"));
    root.children.push(Element::slot("slot-body", "body"));
    let mut definition = ComponentDefinition::new("d1", "Section", root);
    definition.slots.push(SlotDefinition {
        name: "body".to_string(),
        default_content: vec![text_element("body-text", "Body")],
    });
    let library = library_of(vec![definition]);

    let (element, mut data) = instance_of("d1");
    data.overrides.insert(
        "headline".to_string(),
        ElementOverrides {
            content: Some(Overridable::set(json!("Bye"))),
            styles: BTreeMap::from([(
                Breakpoint::Desktop,
                BTreeMap::from([("fontWeight".to_string(), Overridable::set(json!("700")))]),
            )]),
            ..ElementOverrides::default()
        },
    );
    let resolved = resolve(&with_data(element, data), &library).expect("resolve");

    assert_eq!(
        serde_json::to_value(&resolved.element).expect("serialize"),
        json!({
            "id": "root",
            "type": "container",
            "children": [
                {
                    "id": "headline",
                    "type": "text",
                    "props": {"content": "Bye"},
                    "styles": {"desktop": {"fontWeight": "700"}}
                },
                {
                    "id": "body-text",
                    "type": "text",
                    "props": {"content": "Body"}
                }
            ]
        })
    );
}
