//! The traverser module, which drives a visitor callback over every node
//! reachable from a root.
//!
//! Some technical remarks:
//! - the visit loop runs over an explicit stack rather than the call
//!   stack, so traversal depth is bounded by memory alone. Front ends
//!   routinely emit trees (nested expressions, long member chains) far
//!   deeper than the native stack tolerates.
//! - the child layout of every kind lives in one exhaustive match; adding
//!   a kind will not compile until its children are declared there.


use std::convert::Infallible;

use crate::data::ast::{Ast, NodeId, NodeKind};

/// Visits every node reachable from `root` exactly once, each node before
/// its children and sibling sequences left to right, invoking `callback`
/// per node. Each child's parent back-reference is set to the node whose
/// child enumeration produced it, at the moment the child is discovered;
/// the root's own parent is never written.
///
/// The first error returned by `callback` aborts the traversal and passes
/// through unchanged. Parent annotations already written stay written.
pub fn traverse<E, F>(ast: &mut Ast, root: NodeId, mut callback: F) -> Result<(), E>
where
    F: FnMut(&Ast, NodeId) -> Result<(), E>,
{
    let mut stack = vec![root];
    let mut children = Vec::new();

    while let Some(id) = stack.pop() {
        callback(ast, id)?;

        children.clear();
        gather_children(&ast.node(id).kind, &mut children);

        // The scratch buffer holds the children in visit order; pushing
        // them in reverse leaves the first child on top of the stack.
        for &child in children.iter().rev() {
            ast.node_mut(child).parent = Some(id);
            stack.push(child);
        }
    }

    Ok(())
}

/// Infallible variant of [`traverse`].
pub fn walk<F>(ast: &mut Ast, root: NodeId, mut callback: F)
where
    F: FnMut(&Ast, NodeId),
{
    let result: Result<(), Infallible> = traverse(ast, root, |ast, id| {
        callback(ast, id);
        Ok(())
    });
    if let Err(never) = result {
        match never {}
    }
}

/// Appends the children of `kind` to `out` in visit order. Empty slots
/// are skipped here, so the worklist only ever holds live nodes.
fn gather_children(kind: &NodeKind, out: &mut Vec<NodeId>) {
    match kind {
        NodeKind::Identifier { .. }
        | NodeKind::String { .. }
        | NodeKind::Bool { .. }
        | NodeKind::This
        | NodeKind::Int { .. } => {}

        NodeKind::FunctionApplication {
            function,
            arguments,
        } => {
            gather(*function, out);
            gather_seq(arguments, out);
        }

        NodeKind::Function { parameters, body }
        | NodeKind::BoundFunction { parameters, body } => {
            gather_seq(parameters, out);
            gather(*body, out);
        }

        NodeKind::NewOp { ctor, arguments } => {
            gather(*ctor, out);
            gather_seq(arguments, out);
        }

        NodeKind::MemberAccessOp { expression, .. }
        | NodeKind::ProtoMemberAccessOp { expression, .. }
        | NodeKind::LogicalNotOp { expression }
        | NodeKind::Return { expression } => gather(*expression, out),

        NodeKind::DynamicMemberAccessOp {
            expression,
            indexing_expr,
        } => {
            gather(*expression, out);
            gather(*indexing_expr, out);
        }

        NodeKind::ObjectInitialiser { members } | NodeKind::ArrayInitialiser { members } => {
            gather_seq(members, out);
        }

        NodeKind::ObjectInitialiserMember { key, expression } => {
            gather(*key, out);
            gather(*expression, out);
        }

        NodeKind::LogicalAndOp { left, right }
        | NodeKind::LogicalOrOp { left, right }
        | NodeKind::ConcatOp { left, right }
        | NodeKind::SeqOp { left, right } => {
            gather(*left, out);
            gather(*right, out);
        }

        NodeKind::AssignOp {
            assignee,
            expression,
        } => {
            gather(*assignee, out);
            gather(*expression, out);
        }

        NodeKind::Program { body } => gather(*body, out),

        NodeKind::Block { statements } => gather_seq(statements, out),

        NodeKind::ForOf {
            key_assignee,
            val_assignee,
            target,
            filter,
            body,
        } => {
            gather(*key_assignee, out);
            gather(*val_assignee, out);
            gather(*target, out);
            gather(*filter, out);
            gather(*body, out);
        }

        NodeKind::ForIn {
            key_assignee,
            val_assignee,
            target,
            step,
            filter,
            body,
        } => {
            gather(*key_assignee, out);
            gather(*val_assignee, out);
            gather(*target, out);
            gather(*step, out);
            gather(*filter, out);
            gather(*body, out);
        }
    }
}

fn gather(slot: Option<NodeId>, out: &mut Vec<NodeId>) {
    if let Some(id) = slot {
        out.push(id);
    }
}

fn gather_seq(slots: &[Option<NodeId>], out: &mut Vec<NodeId>) {
    for &slot in slots {
        gather(slot, out);
    }
}
