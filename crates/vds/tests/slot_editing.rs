//! Integration tests for value classification, slot tables and edits.
//!
//! Uses grammars of real CSS properties: width, aspect-ratio, border and
//! font-family.

use vds::{
    OptionKind, Separator, VdsError, apply_slot_edit, build_slot_options, join,
    pick_default_category, separators_of, split, standard_context,
};

const WIDTH: &str =
    "auto | <length-percentage [0,∞]> | min-content | max-content | fit-content(<length-percentage [0,∞]>)";
const ASPECT_RATIO: &str = "auto || <ratio>";
const BORDER: &str = "<line-width> || <line-style> || <color>";
const FONT_FAMILY: &str = "[ <family-name> | <generic-family> ]#";

fn edit(syntax: &str, value: &str, slot: usize, fragment: &str) -> Result<String, VdsError> {
    apply_slot_edit(standard_context(), syntax, &split(value), slot, fragment)
}

fn assert_round_trip(value: &str) {
    assert_eq!(join(&split(value), &separators_of(value)), value);
}

// ============================================================================
// SLOT TABLES
// ============================================================================

#[test]
fn test_width_slot_options() {
    let ctx = standard_context();
    let table = build_slot_options(ctx, WIDTH, "10px").unwrap();
    assert!(table.complete);
    assert_eq!(table.len(), 1);

    let values: Vec<&str> = table.slots[0].iter().map(|o| o.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["auto", "min-content", "max-content", "0px", "fit-content(0px)"]
    );
    assert_eq!(pick_default_category(ctx, &table.slots[0]), Some("length"));
}

#[test]
fn test_width_rejects_negative_length() {
    let err = build_slot_options(standard_context(), WIDTH, "-10px").unwrap_err();
    assert!(matches!(err, VdsError::NoMatchingVariant(_)));
}

#[test]
fn test_width_accepts_function_value() {
    let table = build_slot_options(standard_context(), WIDTH, "fit-content(20rem)").unwrap();
    assert_eq!(table.variant.canonical, vec!["fit-content()"]);
}

#[test]
fn test_aspect_ratio_slash_value() {
    let table = build_slot_options(standard_context(), ASPECT_RATIO, "16 / 9").unwrap();
    assert!(table.complete);
    assert_eq!(table.separators, vec![Separator::Slash]);
    assert_eq!(table.value, "16 / 9");
    // "auto" may still follow the ratio.
    assert_eq!(table.len(), 3);
    assert_eq!(table.slots[2][0].value, "auto");
}

#[test]
fn test_border_next_slot_options() {
    let table = build_slot_options(standard_context(), BORDER, "1px").unwrap();
    let next = &table.slots[1];
    assert!(next.iter().any(|o| o.value == "solid" && o.kind == OptionKind::Keyword));
    assert!(next.iter().any(|o| o.category == "color"));
    assert!(!next.iter().any(|o| o.value == "thin"));
}

#[test]
fn test_border_any_order() {
    let table = build_slot_options(standard_context(), BORDER, "red 1px dashed").unwrap();
    assert!(table.complete);
    assert_eq!(
        table.variant.canonical,
        vec!["<color>", "<length>", "dashed"]
    );
}

#[test]
fn test_aspect_ratio_requires_slash() {
    let err = build_slot_options(standard_context(), ASPECT_RATIO, "16, 9").unwrap_err();
    assert!(matches!(err, VdsError::NoMatchingVariant(ref value) if value == "16, 9"));
}

#[test]
fn test_separator_mismatch_in_both_directions() {
    let ctx = standard_context();
    for (syntax, value) in [
        ("<length> <length>", "1px, 2px"),
        ("<length>#", "1px 2px"),
        ("<length> / <length>", "1px 2px"),
    ] {
        assert!(
            matches!(
                build_slot_options(ctx, syntax, value),
                Err(VdsError::NoMatchingVariant(_))
            ),
            "{} accepted `{}`",
            syntax,
            value
        );
    }
}

#[test]
fn test_font_family_accepts_any_order() {
    let ctx = standard_context();
    assert!(!ctx.expand(FONT_FAMILY).unwrap().truncated);
    for value in [
        "\"Inter\", serif, serif, sans-serif",
        "sans-serif, serif, serif, serif",
        "monospace, \"Fira Code\", cursive, system-ui",
    ] {
        let table = build_slot_options(ctx, FONT_FAMILY, value).unwrap();
        assert!(table.complete, "{}", value);
        assert_eq!(table.value, value);
    }
}

#[test]
fn test_empty_value_backfills_shortest_variant() {
    let table = build_slot_options(standard_context(), "<length> <color>", "").unwrap();
    assert!(!table.complete);
    assert_eq!(table.value, "0px #ffffff");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_unclassifiable_value() {
    assert_eq!(
        build_slot_options(standard_context(), WIDTH, "10parsecs").unwrap_err(),
        VdsError::UnclassifiableValue("10parsecs".to_string())
    );
}

// ============================================================================
// EDITS
// ============================================================================

#[test]
fn test_prefix_completion() {
    let value = edit("<length> <length> <color>", "", 0, "10px").unwrap();
    assert_eq!(value, "10px 0px #ffffff");
    assert_eq!(split(&value).len(), 3);
    assert_round_trip(&value);
}

#[test]
fn test_edit_rejected_without_match() {
    assert!(matches!(
        edit("auto | <color>", "red", 0, "10px"),
        Err(VdsError::NoMatchingVariant(_))
    ));
}

#[test]
fn test_edit_switches_variant() {
    assert_eq!(edit(ASPECT_RATIO, "16 / 9", 0, "auto").unwrap(), "auto 9");
    assert_eq!(edit(WIDTH, "10px", 0, "min-content").unwrap(), "min-content");
}

#[test]
fn test_edit_appends() {
    let value = edit(BORDER, "1px", 1, "solid").unwrap();
    assert_eq!(value, "1px solid");
    let value = edit(BORDER, &value, 2, "#000").unwrap();
    assert_eq!(value, "1px solid #000");
}

#[test]
fn test_font_family_list() {
    let value = edit(FONT_FAMILY, "\"Inter\"", 1, "sans-serif").unwrap();
    assert_eq!(value, "\"Inter\", sans-serif");
    assert_eq!(separators_of(&value), vec![Separator::Comma]);
    assert_round_trip(&value);
}

#[test]
fn test_unknown_grammar_edit() {
    assert_eq!(
        edit("foo || <bar>", "foo", 0, "foo").unwrap_err(),
        VdsError::UnknownToken("<bar>".to_string())
    );
}

#[test]
fn test_round_trip_of_edits() {
    for (syntax, value, slot, fragment) in [
        (ASPECT_RATIO, "16 / 9", 1, "10"),
        (BORDER, "1px solid", 2, "rgb(0, 0, 0)"),
        (WIDTH, "auto", 0, "50%"),
        ("<length>#", "1px, 2px", 2, "3px"),
    ] {
        let edited = edit(syntax, value, slot, fragment).unwrap();
        assert_round_trip(&edited);
    }
}
