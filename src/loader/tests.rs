#![cfg(test)]

use crate::{data::ast::NodeKind, error::FatalError};

use super::{load, load_str};

#[test]
fn test_loads_a_program_document() {
    let loaded = load_str(
        r#"{
            "type": "Program",
            "body": {
                "type": "Block",
                "statements": [{"type": "Return", "expression": {"type": "Int", "value": 42}}]
            }
        }"#,
    )
    .unwrap();

    assert_eq!(loaded.ast.len(), 4);
    assert!(matches!(
        loaded.ast.node(loaded.root).kind,
        NodeKind::Program { body: Some(_) }
    ));
}

#[test]
fn test_load_reads_from_a_reader() {
    let document = r#"{"type": "This"}"#;
    let loaded = load(document.as_bytes()).unwrap();

    assert_eq!(loaded.ast.len(), 1);
    assert_eq!(loaded.ast.node(loaded.root).kind, NodeKind::This);
}

#[test]
fn test_unrecognized_kind_is_rejected() {
    let result = load_str(r#"{"type": "Foo"}"#);

    assert_eq!(
        result.unwrap_err(),
        FatalError::UnrecognizedNodeKind("Foo".to_string())
    );
}

#[test]
fn test_unrecognized_kind_below_the_root_is_rejected() {
    let result = load_str(
        r#"{
            "type": "Block",
            "statements": [{"type": "Int", "value": 1}, {"type": "Bar"}]
        }"#,
    );

    assert_eq!(
        result.unwrap_err(),
        FatalError::UnrecognizedNodeKind("Bar".to_string())
    );
}

#[test]
fn test_malformed_document_is_rejected() {
    let result = load_str("{not json");

    assert!(matches!(result, Err(FatalError::MalformedInput(_))));
}

#[test]
fn test_missing_kind_tag_is_rejected() {
    let result = load_str(r#"{"name": "a"}"#);

    assert!(matches!(result, Err(FatalError::MalformedInput(_))));
}

#[test]
fn test_literal_payloads_survive_loading() {
    let loaded = load_str(
        r#"{
            "type": "MemberAccessOp",
            "expression": {"type": "Identifier", "name": "greeting"},
            "memberName": "length"
        }"#,
    )
    .unwrap();

    let root = loaded.ast.node(loaded.root);
    match &root.kind {
        NodeKind::MemberAccessOp {
            expression,
            member_name,
        } => {
            assert_eq!(member_name, "length");
            let inner = &loaded.ast.node(expression.unwrap()).kind;
            assert_eq!(
                *inner,
                NodeKind::Identifier {
                    name: "greeting".to_string()
                }
            );
        }
        other => panic!("expected a MemberAccessOp, got {}", other),
    }
}

#[test]
fn test_int_bool_and_string_payloads() {
    let loaded = load_str(
        r#"{
            "type": "ArrayInitialiser",
            "members": [
                {"type": "Int", "value": -7},
                {"type": "Bool", "value": true},
                {"type": "String", "value": "hey"}
            ]
        }"#,
    )
    .unwrap();

    let kinds: Vec<_> = loaded.ast.iter().map(|(_, node)| &node.kind).collect();
    assert!(kinds.contains(&&NodeKind::Int { value: -7 }));
    assert!(kinds.contains(&&NodeKind::Bool { value: true }));
    assert!(kinds.contains(&&NodeKind::String {
        value: "hey".to_string()
    }));
}

#[test]
fn test_camel_case_child_fields() {
    let loaded = load_str(
        r#"{
            "type": "ForIn",
            "keyAssignee": {"type": "Identifier", "name": "k"},
            "valAssignee": {"type": "Identifier", "name": "v"},
            "target": {"type": "Identifier", "name": "xs"},
            "step": {"type": "Int", "value": 2},
            "filter": {"type": "Bool", "value": true},
            "body": {"type": "Block", "statements": []}
        }"#,
    )
    .unwrap();

    match &loaded.ast.node(loaded.root).kind {
        NodeKind::ForIn {
            key_assignee,
            val_assignee,
            target,
            step,
            filter,
            body,
        } => {
            assert!(key_assignee.is_some());
            assert!(val_assignee.is_some());
            assert!(target.is_some());
            assert!(step.is_some());
            assert!(filter.is_some());
            assert!(body.is_some());
        }
        other => panic!("expected a ForIn, got {}", other),
    }
}

#[test]
fn test_null_children_lower_to_empty_slots() {
    let loaded = load_str(
        r#"{
            "type": "Block",
            "statements": [null, {"type": "Int", "value": 1}, null]
        }"#,
    )
    .unwrap();

    match &loaded.ast.node(loaded.root).kind {
        NodeKind::Block { statements } => {
            assert_eq!(statements.len(), 3);
            assert!(statements[0].is_none());
            assert!(statements[1].is_some());
            assert!(statements[2].is_none());
        }
        other => panic!("expected a Block, got {}", other),
    }
}

#[test]
fn test_missing_children_lower_to_empty_slots() {
    let loaded = load_str(r#"{"type": "Return"}"#).unwrap();

    assert_eq!(
        loaded.ast.node(loaded.root).kind,
        NodeKind::Return { expression: None }
    );
}

#[test]
fn test_loaded_nodes_start_without_parents() {
    let loaded = load_str(
        r#"{
            "type": "Program",
            "body": {"type": "Block", "statements": [{"type": "This"}]}
        }"#,
    )
    .unwrap();

    assert!(loaded.ast.iter().all(|(_, node)| node.parent.is_none()));
}
