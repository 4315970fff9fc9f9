//! Integration tests for the property table and the property editor.

use stylekit_rs::vds::{GrammarContext, OptionKind, VdsError, standard_context};
use stylekit_rs::{PropertyEditor, StyleKitError, properties};

fn editor(name: &str) -> PropertyEditor<'static> {
    PropertyEditor::new(standard_context(), name).unwrap()
}

// ============================================================================
// PROPERTY TABLE
// ============================================================================

#[test]
fn test_every_property_is_structured() {
    for definition in properties() {
        let editor = PropertyEditor::for_definition(standard_context(), definition);
        assert!(editor.is_structured().unwrap(), "{}", definition.name);
    }
}

#[test]
fn test_every_property_has_a_valid_default() {
    for definition in properties() {
        let editor = PropertyEditor::for_definition(standard_context(), definition);
        let table = editor.slot_options("").unwrap();
        assert!(!table.value.is_empty(), "{}", definition.name);

        let reparsed = editor.slot_options(&table.value).unwrap();
        assert!(reparsed.complete, "{}: {}", definition.name, table.value);
    }
}

#[test]
fn test_no_property_grammar_is_truncated() {
    for definition in properties() {
        let editor = PropertyEditor::for_definition(standard_context(), definition);
        assert!(!editor.expansion().unwrap().truncated, "{}", definition.name);
    }
}

#[test]
fn test_unknown_property() {
    let err = PropertyEditor::new(standard_context(), "colour").unwrap_err();
    assert!(matches!(err, StyleKitError::UnknownProperty(name) if name == "colour"));
}

// ============================================================================
// EDITING
// ============================================================================

#[test]
fn test_width_editing() {
    let width = editor("width");
    assert_eq!(width.apply("auto", 0, "10px").unwrap(), "10px");
    assert_eq!(width.apply("10px", 0, "fit-content(50%)").unwrap(), "fit-content(50%)");

    let table = width.slot_options("10px").unwrap();
    assert_eq!(width.default_category(&table.slots[0]), Some("length"));
}

#[test]
fn test_margin_editing() {
    let margin = editor("margin");
    assert_eq!(margin.apply("10px", 1, "auto").unwrap(), "10px auto");
    assert_eq!(margin.apply("10px auto", 1, "").unwrap(), "10px");
    assert_eq!(margin.apply("10px auto", 0, "").unwrap(), "");
}

#[test]
fn test_opacity_range() {
    let opacity = editor("opacity");
    assert_eq!(opacity.apply("1", 0, "0.5").unwrap(), "0.5");
    let err = opacity.apply("1", 0, "2").unwrap_err();
    assert!(matches!(
        err,
        StyleKitError::Grammar(VdsError::NoMatchingVariant(_))
    ));
}

#[test]
fn test_display_options_are_keywords() {
    let table = editor("display").slot_options("flex").unwrap();
    assert!(table.complete);
    assert_eq!(table.slots[0].len(), 9);
    assert!(table.slots[0].iter().all(|o| o.kind == OptionKind::Keyword));
}

#[test]
fn test_color_fallback_to_text() {
    let err = editor("color").slot_options("var(--accent)").unwrap_err();
    assert!(matches!(
        err,
        StyleKitError::Grammar(VdsError::UnclassifiableValue(_))
    ));
}

#[test]
fn test_editor_with_own_context() {
    let ctx = GrammarContext::standard();
    let editor = PropertyEditor::new(&ctx, "z-index").unwrap();
    assert_eq!(editor.apply("auto", 0, "10").unwrap(), "10");
    assert_eq!(editor.expansion().unwrap().variants_canonical(), vec!["auto", "<integer>"]);
}
