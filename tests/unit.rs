//! Unit tests for literal values, text helpers, dialect rendering and the
//! node registry.
mod common;
use codeck::compiler::{indent_block, pin_var_name, PrepareList};
use codeck::prelude::*;
use codeck::graph::{Variable, VariableType};
use std::collections::BTreeMap;

#[test]
fn test_value_display_drops_trailing_zero() {
    assert_eq!(Value::Number(5.0).to_string(), "5");
    assert_eq!(Value::Number(2.5).to_string(), "2.5");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Unset.to_string(), "");
}

#[test]
fn test_value_coercion_to_declared_type() {
    assert_eq!(Value::from("42").coerce(Some(DataType::Number)), Value::Number(42.0));
    assert_eq!(Value::from("abc").coerce(Some(DataType::Number)), Value::Number(0.0));
    assert_eq!(Value::Bool(true).coerce(Some(DataType::Number)), Value::Number(1.0));
    assert_eq!(Value::Unset.coerce(Some(DataType::Boolean)), Value::Bool(false));
    assert_eq!(Value::from("yes").coerce(Some(DataType::Boolean)), Value::Bool(true));
    assert_eq!(Value::Number(0.0).coerce(Some(DataType::Boolean)), Value::Bool(false));
    assert_eq!(Value::Number(3.0).coerce(Some(DataType::Text)), Value::from("3"));
    assert_eq!(Value::Unset.coerce(Some(DataType::Text)), Value::from(""));
}

#[test]
fn test_non_finite_text_on_number_pin_becomes_zero() {
    for text in ["NaN", "inf", "-infinity", "1e400"] {
        let coerced = Value::from(text).coerce(Some(DataType::Number));
        assert_eq!(coerced, Value::Number(0.0), "{text}");
        assert_eq!(Dialect::default().render_literal(&coerced), "0");
        assert_eq!(Dialect::hoi4().render_literal(&coerced), "0");
    }
}

#[test]
fn test_value_coercion_keeps_raw_conditions_and_untyped_values() {
    let raw = Value::from("x > 1");
    assert_eq!(raw.coerce(Some(DataType::Boolean)), raw);
    assert_eq!(Value::Unset.coerce(None), Value::Unset);
    assert_eq!(Value::Number(7.0).coerce(None), Value::Number(7.0));
}

#[test]
fn test_value_from_json() {
    let value: Value = serde_json::from_str(r#"{"a": [1, true, "x"], "b": null}"#).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(
        "a".to_string(),
        Value::Array(vec![Value::Number(1.0), Value::Bool(true), Value::from("x")]),
    );
    expected.insert("b".to_string(), Value::Unset);
    assert_eq!(value, Value::Object(expected));

    let back = serde_json::to_string(&Value::Number(0.0)).unwrap();
    assert_eq!(back, "0");
}

#[test]
fn test_indent_block_reindents_common_prefix() {
    assert_eq!(indent_block("\n  a\n    b\n\n", 2), "  a\n    b");
    assert_eq!(indent_block("x\n\ny", 4), "    x\n\n    y");
    assert_eq!(indent_block("", 4), "");
    assert_eq!(indent_block("\n\n", 2), "");
}

#[test]
fn test_indent_block_keeps_non_ascii_whitespace() {
    assert_eq!(indent_block("\u{a0}x\n y", 2), "  \u{a0}x\n   y");
    assert_eq!(indent_block("\t\u{a0}x\n\ty", 0), "\u{a0}x\ny");
}

#[test]
fn test_pin_var_name_is_a_valid_identifier() {
    assert_eq!(pin_var_name("ab12cd34", "index"), "_ab12cd34_index");
    assert_eq!(pin_var_name("a-b", "$pin x"), "_a_00002db___000024pin_000020x");
}

#[test]
fn test_pin_var_name_is_unique_per_pair() {
    let pairs = [
        ("a-b", "c"),
        ("a_b", "c"),
        ("a", "b_c"),
        ("a", "b"),
        ("", "ab"),
        ("ab", ""),
    ];
    let names: std::collections::HashSet<String> =
        pairs.iter().map(|(node, pin)| pin_var_name(node, pin)).collect();
    assert_eq!(names.len(), pairs.len());
}

#[test]
fn test_javascript_literals() {
    let dialect = Dialect::default();
    assert_eq!(dialect.render_literal(&Value::Unset), "undefined");
    assert_eq!(dialect.render_literal(&Value::from("hi")), "\"hi\"");
    assert_eq!(dialect.render_literal(&Value::Number(0.0)), "0");
    assert_eq!(dialect.render_literal(&Value::Bool(true)), "true");
    assert_eq!(dialect.comment("note"), "// note\n");
}

#[test]
fn test_hoi4_literals() {
    let dialect = Dialect::hoi4();
    let mut object = BTreeMap::new();
    object.insert("a".to_string(), Value::Number(1.0));

    assert_eq!(dialect.render_literal(&Value::Bool(true)), "yes");
    assert_eq!(dialect.render_literal(&Value::Bool(false)), "no");
    assert_eq!(dialect.render_literal(&Value::from("hi")), "\"hi\"");
    assert_eq!(
        dialect.render_literal(&Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])),
        "{ 1 2 }"
    );
    assert_eq!(dialect.render_literal(&Value::Object(object)), "{ a = 1 }");
    assert_eq!(dialect.render_literal(&Value::Unset), "\"\"");
    assert_eq!(dialect.comment("note"), "# note\n");
}

#[test]
fn test_javascript_variable_section() {
    let variables = vec![
        Variable {
            name: "counter".to_string(),
            var_type: VariableType::Number,
            default_value: Value::Number(0.0),
        },
        Variable {
            name: "label".to_string(),
            var_type: VariableType::String,
            default_value: Value::Unset,
        },
    ];
    assert_eq!(
        Dialect::default().variable_section(&variables),
        "let counter = 0;\nlet label;\n\n"
    );
    assert_eq!(Dialect::default().variable_section(&[]), "");
}

#[test]
fn test_hoi4_variable_section() {
    let variables = vec![
        Variable {
            name: "counter".to_string(),
            var_type: VariableType::Number,
            default_value: Value::Number(3.0),
        },
        Variable {
            name: "title".to_string(),
            var_type: VariableType::String,
            default_value: Value::from("Hi"),
        },
        Variable {
            name: "empty".to_string(),
            var_type: VariableType::Boolean,
            default_value: Value::Unset,
        },
    ];
    assert_eq!(
        Dialect::hoi4().variable_section(&variables),
        "# Variable Definitions\n\
         set_variable = { var = counter value = 3 }\n\
         # title = Hi\n\
         # empty = undefined\n\n"
    );
}

fn sample_prepares() -> PrepareList {
    let mut prepares = PrepareList::new();
    prepares.push(PrepareItem::import("lodash", Some(ImportMember::new("uniq"))));
    prepares.push(PrepareItem::import("lodash", Some(ImportMember::aliased("clamp", "c"))));
    prepares.push(PrepareItem::import("lodash", Some(ImportMember::namespace("_"))));
    prepares.push(PrepareItem::import("polyfill", None));
    prepares.push(PrepareItem::function("twice", &["x"], "return x * 2;"));
    prepares
}

#[test]
fn test_prepare_list_dedups_structurally() {
    let mut prepares = sample_prepares();
    assert_eq!(prepares.len(), 5);
    assert!(!prepares.push(PrepareItem::import("lodash", Some(ImportMember::new("uniq")))));
    assert!(prepares.push(PrepareItem::import("lodash", Some(ImportMember::new("map")))));
    assert_eq!(prepares.len(), 6);
}

#[test]
fn test_es_module_prelude() {
    let prelude = Dialect::default().prelude(&sample_prepares());
    assert_eq!(
        prelude,
        "import * as _ from 'lodash';\n\
         import { uniq, clamp as c } from 'lodash';\n\
         import 'polyfill';\n\
         \n\
         function twice(x) {\n  return x * 2;\n}\n\n"
    );
}

#[test]
fn test_skypack_prefix_applies_to_es_modules() {
    let mut prepares = PrepareList::new();
    prepares.push(PrepareItem::import("lodash", Some(ImportMember::new("uniq"))));
    let dialect = Dialect::JavaScript {
        module_type: ModuleType::EsModule,
        use_skypack: true,
    };
    assert_eq!(
        dialect.prelude(&prepares),
        "import { uniq } from 'https://cdn.skypack.dev/lodash';\n\n"
    );
}

#[test]
fn test_pinned_version_only_reaches_skypack_sources() {
    let mut prepares = PrepareList::new();
    prepares.push(PrepareItem::versioned_import(
        "lodash",
        "4.17.21",
        Some(ImportMember::new("uniq")),
    ));
    prepares.push(PrepareItem::import("lodash", Some(ImportMember::new("clamp"))));

    let skypack = Dialect::JavaScript {
        module_type: ModuleType::EsModule,
        use_skypack: true,
    };
    assert_eq!(
        skypack.prelude(&prepares),
        "import { uniq, clamp } from 'https://cdn.skypack.dev/lodash@4.17.21';\n\n"
    );
    assert_eq!(
        Dialect::default().prelude(&prepares),
        "import { uniq, clamp } from 'lodash';\n\n"
    );
}

#[test]
fn test_commonjs_prelude() {
    let dialect = Dialect::JavaScript {
        module_type: ModuleType::CommonJs,
        use_skypack: true,
    };
    let prelude = dialect.prelude(&sample_prepares());
    assert!(prelude.starts_with(
        "const uniq = require('lodash').uniq;\n\
         const c = require('lodash').clamp;\n\
         const _ = require('lodash');\n\
         require('polyfill');\n\n"
    ));
    assert!(!prelude.contains("skypack"));
}

#[test]
fn test_hoi4_prelude_header() {
    let event = Dialect::hoi4().prelude(&PrepareList::new());
    assert_eq!(
        event,
        "# HOI4 MOD Script\n\
         # Generated by Codeck Visual Blueprint Editor\n\
         # Namespace: my_mod\n\
         # Type: event\n\
         \n\
         add_namespace = my_mod\n\n"
    );

    let decision = Dialect::Hoi4 {
        namespace: "foo".to_string(),
        script_type: ScriptType::Decision,
    }
    .prelude(&sample_prepares());
    assert!(decision.contains("# Namespace: foo\n# Type: decision\n"));
    assert!(!decision.contains("add_namespace"));
    assert!(decision.contains("# requires: lodash\n# requires: polyfill\n"));
    assert!(decision.contains("twice = {\n    return x * 2;\n}\n"));
}

#[test]
fn test_compiler_options_from_json() {
    let options =
        CompilerOptions::from_json(r#"{"dialect": {"target": "hoi4", "namespace": "x"}, "print_comment": false}"#)
            .unwrap();
    assert_eq!(
        options.dialect,
        Dialect::Hoi4 {
            namespace: "x".to_string(),
            script_type: ScriptType::Event,
        }
    );
    assert!(!options.print_comment);

    let defaults = CompilerOptions::from_json("{}").unwrap();
    assert_eq!(defaults, CompilerOptions::default());
    assert!(defaults.print_comment);
}

#[test]
fn test_registry_first_registration_wins() {
    let mut registry = NodeRegistry::new();
    assert!(registry.register(
        NodeDefinition::new("shout", "Shout", NodeKind::Function)
            .input(PinDefinition::data("first"))
    ));
    assert!(!registry.register(
        NodeDefinition::new("shout", "Shout Again", NodeKind::Function)
            .input(PinDefinition::data("second"))
    ));

    let definition = registry.lookup("shout").unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(definition.label, "Shout");
    assert!(definition.input_pin("first").is_some());
    assert!(definition.input_pin("second").is_none());
}

#[test]
fn test_registry_hides_hidden_types_from_palette() {
    let blueprint = Blueprint::with_builtin_nodes();
    let registry = blueprint.registry();
    let visible: Vec<&str> = registry
        .all_visible()
        .iter()
        .map(|d| d.name.as_str())
        .collect();

    assert!(registry.contains("begin"));
    assert!(registry.contains("varget"));
    assert!(!visible.contains(&"begin"));
    assert!(!visible.contains(&"varget"));
    assert!(!visible.contains(&"varset"));
    assert_eq!(&visible[..3], &["log", "alert", "if"]);
    assert!(visible.contains(&"uniq"));
}
