use std::fmt::{self, Write};

use super::error::ExprError;

/// Index of a node inside a [`Tree`]. Children always point at nodes created
/// before their parent, so a tree can never contain a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
    Xor,
    Equiv,
    Implies,
    Provided,
}

impl Connective {
    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Self::And => lhs && rhs,
            Self::Or => lhs || rhs,
            Self::Xor => lhs != rhs,
            Self::Equiv => lhs == rhs,
            Self::Implies => !lhs || rhs,
            Self::Provided => lhs || !rhs,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::And => "∧",
            Self::Or => "∨",
            Self::Xor => "⊻",
            Self::Equiv => "≡",
            Self::Implies => "⇒",
            Self::Provided => "⇐",
        }
    }

    /// Or and Xor bind weaker than the rest.
    pub fn is_or_level(self) -> bool {
        matches!(self, Self::Or | Self::Xor)
    }

    fn precedence(self) -> u8 {
        if self.is_or_level() {
            1
        } else {
            2
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Value(bool),
    Variable { label: String, value: Option<bool> },
    Not(NodeId),
    Binary {
        op: Connective,
        lhs: NodeId,
        rhs: NodeId,
    },
}

impl Node {
    pub fn is_binary(&self) -> bool {
        matches!(self, Node::Binary { .. })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Value(_) | Node::Variable { .. })
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Binary { op, .. } => op.precedence(),
            _ => 3,
        }
    }
}

/// Arena owning every node of one parsed expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        if let Node::Not(child) | Node::Binary { lhs: child, .. } = &node {
            debug_assert!(child.0 < self.nodes.len());
        }
        if let Node::Binary { rhs, .. } = &node {
            debug_assert!(rhs.0 < self.nodes.len());
        }

        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Assign a variable node. Panics if `id` is not a variable.
    pub fn set_value(&mut self, id: NodeId, new_value: Option<bool>) {
        match &mut self.nodes[id.0] {
            Node::Variable { value, .. } => *value = new_value,
            other => panic!("node {:?} is not a variable: {:?}", id, other),
        }
    }

    pub fn evaluate(&self, id: NodeId) -> Result<bool, ExprError> {
        let result = match self.get(id) {
            Node::Value(value) => *value,
            Node::Variable { label, value } => match value {
                Some(value) => *value,
                None => {
                    return Err(ExprError::eval(format!(
                        "variable {} has no assigned value",
                        label
                    )))
                }
            },
            Node::Not(child) => !self.evaluate(*child)?,
            Node::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate(*lhs)?;
                let rhs = self.evaluate(*rhs)?;
                op.apply(lhs, rhs)
            }
        };

        Ok(result)
    }

    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id)
            .expect("writing to a String cannot fail");
        out
    }

    // Binary nodes hold the source-left operand in `rhs`, so text comes out
    // as `rhs op lhs`.
    fn write_node(&self, out: &mut String, id: NodeId) -> fmt::Result {
        match self.get(id) {
            Node::Value(value) => out.write_str(if *value { "1" } else { "0" }),
            Node::Variable { label, .. } => out.write_str(label),
            Node::Not(child) => {
                out.write_char('~')?;
                let wrap = !self.get(*child).is_leaf();
                self.write_operand(out, *child, wrap)
            }
            Node::Binary { op, lhs, rhs } => {
                let level = op.precedence();
                let left_wrap = self.get(*rhs).precedence() <= level;
                let right_wrap = self.get(*lhs).precedence() < level;

                self.write_operand(out, *rhs, left_wrap)?;
                write!(out, " {} ", op)?;
                self.write_operand(out, *lhs, right_wrap)
            }
        }
    }

    fn write_operand(&self, out: &mut String, id: NodeId, wrap: bool) -> fmt::Result {
        if wrap {
            out.write_char('(')?;
            self.write_node(out, id)?;
            out.write_char(')')
        } else {
            self.write_node(out, id)
        }
    }
}
