//! The loader module, which rebuilds the node arena from the serialized
//! form the front end emits.
//!
//! A front end hands over one JSON document: a tree of node objects, each
//! tagged with a `"type"` field and pointing at its children through
//! camelCase fields. Absent children are `null` or simply missing, and
//! child sequences may contain `null` holes; both are kept as empty slots
//! rather than rejected, since the traverser tolerates them.

mod tests;

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    data::ast::{Ast, NodeId, NodeKind},
    error::FatalError,
};

/// One node as the front end serializes it. Every child field is
/// optional; the kind tag stays a plain string here so that rejecting an
/// unknown one can report exactly what the front end sent.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    #[serde(rename = "type")]
    kind: String,

    // Literal payloads
    name: Option<String>,
    value: Option<Value>,
    member_name: Option<String>,

    // Single-child slots
    function: Option<Box<RawNode>>,
    body: Option<Box<RawNode>>,
    expression: Option<Box<RawNode>>,
    indexing_expr: Option<Box<RawNode>>,
    key: Option<Box<RawNode>>,
    left: Option<Box<RawNode>>,
    right: Option<Box<RawNode>>,
    key_assignee: Option<Box<RawNode>>,
    val_assignee: Option<Box<RawNode>>,
    target: Option<Box<RawNode>>,
    filter: Option<Box<RawNode>>,
    step: Option<Box<RawNode>>,
    ctor: Option<Box<RawNode>>,
    assignee: Option<Box<RawNode>>,

    // Child sequences
    arguments: Option<Vec<Option<RawNode>>>,
    parameters: Option<Vec<Option<RawNode>>>,
    members: Option<Vec<Option<RawNode>>>,
    statements: Option<Vec<Option<RawNode>>>,
}

/// A fully lowered tree: the arena plus the id of its root.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedAst {
    pub ast: Ast,
    pub root: NodeId,
}

/// Reads one serialized AST document and lowers it into an arena.
pub fn load(reader: impl Read) -> Result<LoadedAst, FatalError> {
    let raw: RawNode = serde_json::from_reader(reader).map_err(read_error)?;
    lower_root(&raw)
}

/// As [`load`], for in-memory text.
pub fn load_str(text: &str) -> Result<LoadedAst, FatalError> {
    let raw: RawNode = serde_json::from_str(text).map_err(read_error)?;
    lower_root(&raw)
}

fn read_error(err: serde_json::Error) -> FatalError {
    if err.is_io() {
        FatalError::IoError(err.to_string())
    } else {
        FatalError::MalformedInput(err.to_string())
    }
}

fn lower_root(raw: &RawNode) -> Result<LoadedAst, FatalError> {
    let mut ast = Ast::new();
    let root = lower(&mut ast, raw)?;
    Ok(LoadedAst { ast, root })
}

/// Lowers `raw` and everything below it into the arena, rejecting the
/// whole document on the first kind tag outside the recognized set.
///
/// Recursion depth here is already bounded: the document made it through
/// serde_json's own recursion limit to exist as a `RawNode` at all.
fn lower(ast: &mut Ast, raw: &RawNode) -> Result<NodeId, FatalError> {
    let kind = match raw.kind.as_str() {
        "Identifier" => NodeKind::Identifier {
            name: raw.name.clone().unwrap_or_default(),
        },
        "String" => NodeKind::String {
            value: string_payload(&raw.value),
        },
        "Bool" => NodeKind::Bool {
            value: raw.value.as_ref().and_then(Value::as_bool).unwrap_or(false),
        },
        "This" => NodeKind::This,
        "Int" => NodeKind::Int {
            value: raw.value.as_ref().and_then(Value::as_i64).unwrap_or(0),
        },
        "FunctionApplication" => NodeKind::FunctionApplication {
            function: child(ast, &raw.function)?,
            arguments: child_seq(ast, &raw.arguments)?,
        },
        "Function" => NodeKind::Function {
            parameters: child_seq(ast, &raw.parameters)?,
            body: child(ast, &raw.body)?,
        },
        "BoundFunction" => NodeKind::BoundFunction {
            parameters: child_seq(ast, &raw.parameters)?,
            body: child(ast, &raw.body)?,
        },
        "NewOp" => NodeKind::NewOp {
            ctor: child(ast, &raw.ctor)?,
            arguments: child_seq(ast, &raw.arguments)?,
        },
        "MemberAccessOp" => NodeKind::MemberAccessOp {
            expression: child(ast, &raw.expression)?,
            member_name: raw.member_name.clone().unwrap_or_default(),
        },
        "DynamicMemberAccessOp" => NodeKind::DynamicMemberAccessOp {
            expression: child(ast, &raw.expression)?,
            indexing_expr: child(ast, &raw.indexing_expr)?,
        },
        "ProtoMemberAccessOp" => NodeKind::ProtoMemberAccessOp {
            expression: child(ast, &raw.expression)?,
            member_name: raw.member_name.clone().unwrap_or_default(),
        },
        "ObjectInitialiser" => NodeKind::ObjectInitialiser {
            members: child_seq(ast, &raw.members)?,
        },
        "ObjectInitialiserMember" => NodeKind::ObjectInitialiserMember {
            key: child(ast, &raw.key)?,
            expression: child(ast, &raw.expression)?,
        },
        "ArrayInitialiser" => NodeKind::ArrayInitialiser {
            members: child_seq(ast, &raw.members)?,
        },
        "LogicalAndOp" => NodeKind::LogicalAndOp {
            left: child(ast, &raw.left)?,
            right: child(ast, &raw.right)?,
        },
        "LogicalOrOp" => NodeKind::LogicalOrOp {
            left: child(ast, &raw.left)?,
            right: child(ast, &raw.right)?,
        },
        "LogicalNotOp" => NodeKind::LogicalNotOp {
            expression: child(ast, &raw.expression)?,
        },
        "ConcatOp" => NodeKind::ConcatOp {
            left: child(ast, &raw.left)?,
            right: child(ast, &raw.right)?,
        },
        "SeqOp" => NodeKind::SeqOp {
            left: child(ast, &raw.left)?,
            right: child(ast, &raw.right)?,
        },
        "AssignOp" => NodeKind::AssignOp {
            assignee: child(ast, &raw.assignee)?,
            expression: child(ast, &raw.expression)?,
        },
        "Program" => NodeKind::Program {
            body: child(ast, &raw.body)?,
        },
        "Block" => NodeKind::Block {
            statements: child_seq(ast, &raw.statements)?,
        },
        "Return" => NodeKind::Return {
            expression: child(ast, &raw.expression)?,
        },
        "ForOf" => NodeKind::ForOf {
            key_assignee: child(ast, &raw.key_assignee)?,
            val_assignee: child(ast, &raw.val_assignee)?,
            target: child(ast, &raw.target)?,
            filter: child(ast, &raw.filter)?,
            body: child(ast, &raw.body)?,
        },
        "ForIn" => NodeKind::ForIn {
            key_assignee: child(ast, &raw.key_assignee)?,
            val_assignee: child(ast, &raw.val_assignee)?,
            target: child(ast, &raw.target)?,
            step: child(ast, &raw.step)?,
            filter: child(ast, &raw.filter)?,
            body: child(ast, &raw.body)?,
        },
        other => return Err(FatalError::UnrecognizedNodeKind(other.to_string())),
    };

    Ok(ast.alloc(kind))
}

fn child(ast: &mut Ast, slot: &Option<Box<RawNode>>) -> Result<Option<NodeId>, FatalError> {
    match slot {
        Some(raw) => Ok(Some(lower(ast, raw)?)),
        None => Ok(None),
    }
}

fn child_seq(
    ast: &mut Ast,
    slots: &Option<Vec<Option<RawNode>>>,
) -> Result<Vec<Option<NodeId>>, FatalError> {
    let mut out = Vec::new();
    if let Some(slots) = slots {
        for slot in slots {
            out.push(match slot {
                Some(raw) => Some(lower(ast, raw)?),
                None => None,
            });
        }
    }
    Ok(out)
}

fn string_payload(value: &Option<Value>) -> String {
    value
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
