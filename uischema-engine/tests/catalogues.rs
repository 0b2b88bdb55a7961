//! The bundled widget catalogues, end to end.
//!
//! Both catalogues describe the same widgets. The Std variant parameterizes
//! decorators and layouts and lets the server grab focus; the Oma variant is
//! non-generic and retracts `focus` with `none`.

use pretty_assertions::assert_eq;
use uischema_catalogue::Catalogue;
use uischema_engine::{Engine, EngineConfig, Severity, ValidationResult};
use uischema_ir::{DataFlow, DelayPolicy, EventDirection, Value};

const STD_UI: &str = include_str!("../../catalogues/std_ui.toml");
const OMA_UI: &str = include_str!("../../catalogues/oma_ui.toml");

fn load(content: &str, filename: &str) -> Engine {
    let catalogue =
        Catalogue::from_str_with_filename(content, filename).expect("Failed to parse catalogue");
    Engine::load(&[catalogue], EngineConfig::default()).expect("Failed to build engine")
}

fn std_ui() -> Engine {
    load(STD_UI, "std_ui.toml")
}

fn oma_ui() -> Engine {
    load(OMA_UI, "oma_ui.toml")
}

fn json(value: serde_json::Value) -> Value {
    Value::from(value)
}

fn render(result: &ValidationResult) -> String {
    result
        .failures()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_catalogues_are_complete() {
    for engine in [std_ui(), oma_ui()] {
        engine.check_all().expect("every definition resolves");
    }
}

#[test]
fn test_frame_fields() {
    for engine in [std_ui(), oma_ui()] {
        let frame = engine.resolve_struct("UI.Frame", &[]).expect("UI.Frame");
        assert_eq!(
            frame.field_names().collect::<Vec<_>>(),
            vec!["hidden", "status", "index", "subject", "height", "width"]
        );
    }
}

#[test]
fn test_magnet_fields_agree_across_variants() {
    let std_magnet = std_ui().resolve_struct("UI.Magnet", &[]).expect("std");
    let oma_magnet = oma_ui().resolve_struct("UI.Magnet", &[]).expect("oma");

    let names: Vec<_> = std_magnet.field_names().collect();
    assert_eq!(names, oma_magnet.field_names().collect::<Vec<_>>());
    assert_eq!(
        names,
        vec![
            "hidden",
            "status",
            "index",
            "subject",
            "height",
            "width",
            "widgets",
            "left",
            "top",
            "translationX",
            "translationY",
        ]
    );
    assert_eq!(std_magnet.fields["widgets"].ty.to_string(), "Maybe([UI.Magnet]|<UI.Magnet>)");
}

#[test]
fn test_std_metal_takes_both_arguments() {
    let engine = std_ui();
    let metal = engine
        .resolve_struct("UI.Metal", &[uischema_catalogue::parse("UI.Text").expect("expr")])
        .expect("UI.Metal");
    assert_eq!(metal.name, "UI.Metal(UI.Text,UI.Magnet)");
    assert_eq!(metal.fields["subject"].ty.to_string(), "UI.Text?");
}

#[test]
fn test_choice_retracts_unchained() {
    // Std inputs must state whether they grab focus; Oma inputs never do
    let cases = [
        (std_ui(), serde_json::json!({ "focused": false, "pressed": {}, "focus": false, "unchained": true })),
        (oma_ui(), serde_json::json!({ "focused": false, "pressed": {}, "unchained": true })),
    ];

    for (engine, value) in cases {
        let choice = engine.resolve_struct("UI.Choice", &[]).expect("UI.Choice");
        assert_eq!(choice.fields["unchained"].ty.to_string(), "none");
        assert_eq!(choice.fields["unchained"].origin, "UI.Choice");

        let result = engine.validate(&json(value), &choice).expect("validate");
        assert_eq!(render(&result), "unchained: expected no value, found true");
    }
}

#[test]
fn test_focus_differs_between_variants() {
    let value = json(serde_json::json!({ "focused": true, "pressed": {}, "focus": true }));

    let engine = std_ui();
    let input = engine.resolve_struct("UI.Input", &[]).expect("std input");
    assert!(engine.validate(&value, &input).expect("validate").is_valid());

    let engine = oma_ui();
    let input = engine.resolve_struct("UI.Input", &[]).expect("oma input");
    let result = engine.validate(&value, &input).expect("validate");
    assert_eq!(render(&result), "focus: expected no value, found true");
}

#[test]
fn test_field_annotations() {
    let engine = std_ui();

    let scroll = engine.resolve_struct("UI.Scroll", &[]).expect("UI.Scroll");
    let tags = engine.field_annotations(&scroll, "scrollX").expect("scrollX");
    assert_eq!(tags.data(), Some(DataFlow::Both));
    assert_eq!(tags.delay(), Some(DelayPolicy::Flush));
    assert!(tags.is_synchronized());

    let focused = engine.field_annotations(&scroll, "focused").expect("focused");
    assert_eq!(focused.event(), Some(EventDirection::Client));
    assert_eq!(focused.delay(), Some(DelayPolicy::Forever));

    // pure data
    let hidden = engine.field_annotations(&scroll, "hidden").expect("hidden");
    assert!(hidden.is_empty());
}

#[test]
fn test_enum_exactness() {
    let engine = std_ui();
    let length = engine.resolve_struct("UI.Length", &[]).expect("UI.Length");

    for unit in ["ch", "em", "ex", "px", "rem"] {
        let value = json(serde_json::json!({ "n": 12, "u": unit }));
        assert!(engine.validate(&value, &length).expect("validate").is_valid());
    }

    for unit in ["pt", "PX", "px ", "", "r"] {
        let value = json(serde_json::json!({ "n": 12, "u": unit }));
        let result = engine.validate(&value, &length).expect("validate");
        assert_eq!(
            render(&result),
            format!(r#"u: {:?} is not one of "ch"_"em"_"ex"_"px"_"rem""#, unit)
        );
    }
}

#[test]
fn test_list_with_items() {
    let engine = std_ui();
    let list = engine.resolve_struct("UI.List", &[]).expect("UI.List");

    let value = json(serde_json::json!({
        "widgets": [
            { "basis": 1, "subject": { "hidden": true } },
            { "basis": 2, "alignment": "stretch", "subject": { "status": "busy" } },
        ],
        "direction": "column",
        "width": { "n": 20, "u": "rem" },
        "height": 0.5,
        "unknown": "ignored",
    }));
    assert!(engine.validate(&value, &list).expect("validate").is_valid());

    let keyed = json(serde_json::json!({ "widgets": { "main": { "basis": 1 } } }));
    assert!(engine.validate(&keyed, &list).expect("validate").is_valid());
}

#[test]
fn test_item_failures_are_collected() {
    let engine = std_ui();
    let item = engine.resolve_struct("UI.Item", &[]).expect("UI.Item");

    let value = json(serde_json::json!({
        "subject": { "hidden": "yes", "index": "2" },
        "grows": true,
        "alignment": "left",
    }));
    let result = engine.validate(&value, &item).expect("validate");

    insta::assert_snapshot!(render(&result), @r###"
    subject.hidden: expected boolean, found string
    subject.index: expected number, found string
    grows: expected number, found boolean
    basis: missing required value of type number
    alignment: "left" matches none of: "stretch", UI.Flow.ItemAlignment
    "###);
}

#[test]
fn test_lints() {
    let std_diagnostics = std_ui().lint();
    assert_eq!(std_diagnostics.len(), 1);
    assert_eq!(std_diagnostics[0].severity, Severity::Info);
    assert_eq!(std_diagnostics[0].location.as_deref(), Some("UI.Choice.unchained"));

    let rendered = oma_ui()
        .lint()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r###"
    warning[field-retraction]: field 'focus' is typed none but 'UI.Input' inherits no such field (at UI.Input.focus)
    info[field-retraction]: 'UI.Choice' retracts field 'unchained' inherited from 'UI.Input' (at UI.Choice.unchained)
    "###);
}

#[test]
fn test_catalogue_metadata() {
    let catalogue = Catalogue::from_str_with_filename(OMA_UI, "oma_ui.toml").expect("parse");
    assert_eq!(catalogue.meta.name, "Pub.Oma.UI.Types");

    let engine = oma_ui();
    assert_eq!(engine.registry().catalogue_of("UI.Widget"), Some("Pub.Oma.UI.Types"));
    assert_eq!(engine.registry().catalogue_of("Flag"), Some("Std.Prelude"));
}
