//! Node definitions and the arena that owns them

use std::fmt::Display;

// ========== Node identity ==========

/// Stable identifier of a node within a single arena.
///
/// Ids are plain indices: cheap to copy, impossible to own anything
/// through. The parent back-links below are ids, so upward navigation
/// never creates a second owner of a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

// ========== Nodes ==========

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,

    /// Structural parent, written by the traverser when this node is
    /// discovered as a child. A node has no parent until then; the root
    /// of a traversal is never written.
    pub parent: Option<NodeId>,
}

/// Every recognized node kind, with its child slots.
///
/// Single children are `Option<NodeId>`: the front end may leave any slot
/// empty. Sequences are `Vec<Option<NodeId>>`: holes are legal (array
/// elisions in the source language produce them) and traversal skips them.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // Leaves
    Identifier {
        name: String,
    },
    String {
        value: String,
    },
    Bool {
        value: bool,
    },
    This,
    Int {
        value: i64,
    },

    // Functions and application
    FunctionApplication {
        function: Option<NodeId>,
        arguments: Vec<Option<NodeId>>,
    },
    Function {
        parameters: Vec<Option<NodeId>>,
        body: Option<NodeId>,
    },
    BoundFunction {
        parameters: Vec<Option<NodeId>>,
        body: Option<NodeId>,
    },
    NewOp {
        ctor: Option<NodeId>,
        arguments: Vec<Option<NodeId>>,
    },

    // Member access
    MemberAccessOp {
        expression: Option<NodeId>,
        member_name: String,
    },
    DynamicMemberAccessOp {
        expression: Option<NodeId>,
        indexing_expr: Option<NodeId>,
    },
    ProtoMemberAccessOp {
        expression: Option<NodeId>,
        member_name: String,
    },

    // Initialisers
    ObjectInitialiser {
        members: Vec<Option<NodeId>>,
    },
    ObjectInitialiserMember {
        key: Option<NodeId>,
        expression: Option<NodeId>,
    },
    ArrayInitialiser {
        members: Vec<Option<NodeId>>,
    },

    // Operators
    LogicalAndOp {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    LogicalOrOp {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    LogicalNotOp {
        expression: Option<NodeId>,
    },
    ConcatOp {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    SeqOp {
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    AssignOp {
        assignee: Option<NodeId>,
        expression: Option<NodeId>,
    },

    // Statements and structure
    Program {
        body: Option<NodeId>,
    },
    Block {
        statements: Vec<Option<NodeId>>,
    },
    Return {
        expression: Option<NodeId>,
    },
    ForOf {
        key_assignee: Option<NodeId>,
        val_assignee: Option<NodeId>,
        target: Option<NodeId>,
        filter: Option<NodeId>,
        body: Option<NodeId>,
    },
    ForIn {
        key_assignee: Option<NodeId>,
        val_assignee: Option<NodeId>,
        target: Option<NodeId>,
        step: Option<NodeId>,
        filter: Option<NodeId>,
        body: Option<NodeId>,
    },
}

impl NodeKind {
    /// The kind tag as the front end spells it.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::String { .. } => "String",
            NodeKind::Bool { .. } => "Bool",
            NodeKind::This => "This",
            NodeKind::Int { .. } => "Int",
            NodeKind::FunctionApplication { .. } => "FunctionApplication",
            NodeKind::Function { .. } => "Function",
            NodeKind::BoundFunction { .. } => "BoundFunction",
            NodeKind::NewOp { .. } => "NewOp",
            NodeKind::MemberAccessOp { .. } => "MemberAccessOp",
            NodeKind::DynamicMemberAccessOp { .. } => "DynamicMemberAccessOp",
            NodeKind::ProtoMemberAccessOp { .. } => "ProtoMemberAccessOp",
            NodeKind::ObjectInitialiser { .. } => "ObjectInitialiser",
            NodeKind::ObjectInitialiserMember { .. } => "ObjectInitialiserMember",
            NodeKind::ArrayInitialiser { .. } => "ArrayInitialiser",
            NodeKind::LogicalAndOp { .. } => "LogicalAndOp",
            NodeKind::LogicalOrOp { .. } => "LogicalOrOp",
            NodeKind::LogicalNotOp { .. } => "LogicalNotOp",
            NodeKind::ConcatOp { .. } => "ConcatOp",
            NodeKind::SeqOp { .. } => "SeqOp",
            NodeKind::AssignOp { .. } => "AssignOp",
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::Return { .. } => "Return",
            NodeKind::ForOf { .. } => "ForOf",
            NodeKind::ForIn { .. } => "ForIn",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ========== Arena ==========

/// Owner of every node in one tree.
///
/// Child fields reference other nodes by id, so ownership runs strictly
/// root-to-leaves no matter how the parent annotations point back up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Ast {
        Ast::default()
    }

    /// Adds a node to the arena. Its parent starts unset; the traverser
    /// fills it in once the node is discovered as a child.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, parent: None });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Follows the parent links from `id` towards the root, nearest first.
    /// Yields nothing for a node whose parent has not been assigned.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let id = current?;
            current = self.parent(id);
            Some(id)
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }
}
