use super::ast::{Connective, Node, NodeId, Tree};
use super::error::ExprError;
use super::lex::{lex, Symbol, Token};

pub const MAX_RECURSION: u16 = 4096;

/// Recursive-descent parser over a lexed symbol stream.
///
/// ```text
/// or  ::= and ( ("∨"|"⊻") or )?
/// and ::= "~"? exp ( ("∧"|"≡"|"⇒"|"⇐") and )?
/// exp ::= VAR | CONST_TRUE | CONST_FALSE | "(" or ")"
/// ```
///
/// Binary tails recurse to the right. The recursive result becomes the
/// connective's `lhs` and the term parsed before the operator its `rhs`, so
/// chains are grouped and evaluated right to left.
///
/// Descent is bounded by [`MAX_RECURSION`]: every chained operator costs one
/// level and every parenthesis three, so a flat chain of a few thousand terms
/// or roughly 1300 nested parentheses is the limit.
pub struct Parser {
    symbols: Vec<Symbol>,
    current: usize,
    tree: Tree,
    vars: Vec<NodeId>,
}

impl Parser {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols,
            current: 0,
            tree: Tree::new(),
            vars: vec![],
        }
    }

    pub fn from_string(s: &str) -> Result<Self, ExprError> {
        let symbols = lex(s)?;
        debug!(
            "symbols: [{}]",
            symbols
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self::new(symbols))
    }

    fn end(&self) -> bool {
        self.current == self.symbols.len()
    }

    fn peek(&self) -> Option<Token> {
        self.symbols.get(self.current).map(|s| s.token)
    }

    fn next(&mut self) {
        if !self.end() {
            self.current += 1;
        }
    }

    /// Resolve a label to its variable node, creating it on first sight.
    fn create_var(&mut self, label: &str) -> NodeId {
        for &id in &self.vars {
            if let Node::Variable { label: known, .. } = self.tree.get(id) {
                if known == label {
                    return id;
                }
            }
        }

        let id = self.tree.push(Node::Variable {
            label: label.to_string(),
            value: None,
        });
        self.vars.push(id);
        id
    }

    fn parse_exp(&mut self, depth: u16) -> Result<NodeId, ExprError> {
        let depth = descend(depth)?;

        match self.peek() {
            Some(Token::OpenBracket) => {
                self.next();
                let node = self.parse_or(depth)?;

                if self.peek() != Some(Token::CloseBracket) {
                    return Err(ExprError::syntax("closing parenthesis not found"));
                }
                self.next();

                Ok(node)
            }
            Some(Token::Var) => {
                let label = self.symbols[self.current].lexeme.clone();
                self.next();
                Ok(self.create_var(&label))
            }
            Some(Token::True) => {
                self.next();
                Ok(self.tree.push(Node::Value(true)))
            }
            Some(Token::False) => {
                self.next();
                Ok(self.tree.push(Node::Value(false)))
            }
            Some(token) => Err(ExprError::syntax(format!(
                "expected operand, found {} ({:?})",
                token, self.symbols[self.current].lexeme
            ))),
            None => Err(ExprError::syntax("expected operand, got end of expression")),
        }
    }

    fn parse_and(&mut self, depth: u16) -> Result<NodeId, ExprError> {
        let depth = descend(depth)?;

        let mut node = if self.peek() == Some(Token::Not) {
            self.next();
            let child = self.parse_exp(depth)?;
            self.tree.push(Node::Not(child))
        } else {
            self.parse_exp(depth)?
        };

        let op = match self.peek() {
            Some(Token::And) => Some(Connective::And),
            Some(Token::Equiv) => Some(Connective::Equiv),
            Some(Token::Implies) => Some(Connective::Implies),
            Some(Token::Provided) => Some(Connective::Provided),
            _ => None,
        };

        if let Some(op) = op {
            self.next();
            let term = self.parse_and(depth)?;
            node = self.tree.push(Node::Binary {
                op,
                lhs: term,
                rhs: node,
            });
        }

        Ok(node)
    }

    fn parse_or(&mut self, depth: u16) -> Result<NodeId, ExprError> {
        let depth = descend(depth)?;

        let mut node = self.parse_and(depth)?;

        let op = match self.peek() {
            Some(Token::Or) => Some(Connective::Or),
            Some(Token::Xor) => Some(Connective::Xor),
            _ => None,
        };

        if let Some(op) = op {
            self.next();
            let term = self.parse_or(depth)?;
            node = self.tree.push(Node::Binary {
                op,
                lhs: term,
                rhs: node,
            });
        }

        Ok(node)
    }

    pub fn parse(mut self) -> Result<Expr, ExprError> {
        if self.symbols.is_empty() {
            return Err(ExprError::input("expression is empty"));
        }

        let root = self.parse_or(MAX_RECURSION)?;
        if !self.end() {
            return Err(ExprError::syntax(format!(
                "extra content found at end of input: {:?}",
                self.symbols[self.current].lexeme
            )));
        }

        let expr = Expr {
            tree: self.tree,
            root,
            vars: self.vars,
        };
        debug!("parsed: {}", expr.render());

        Ok(expr)
    }
}

fn descend(depth: u16) -> Result<u16, ExprError> {
    if depth == 0 {
        return Err(ExprError::syntax("expression too deep"));
    }
    Ok(depth - 1)
}

/// A parsed expression: the node arena, its root and the variables in order of
/// first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    tree: Tree,
    root: NodeId,
    vars: Vec<NodeId>,
}

impl Expr {
    pub fn from_string(s: &str) -> Result<Self, ExprError> {
        Parser::from_string(s)?.parse()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.get(id)
    }

    pub fn variables(&self) -> &[NodeId] {
        &self.vars
    }

    pub fn get_vars(&self) -> Vec<&str> {
        self.vars
            .iter()
            .filter_map(|&id| match self.tree.get(id) {
                Node::Variable { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn find_var(&self, label: &str) -> Option<NodeId> {
        self.vars.iter().copied().find(|&id| {
            matches!(self.tree.get(id), Node::Variable { label: known, .. } if known == label)
        })
    }

    pub fn set(&mut self, id: NodeId, value: bool) {
        self.tree.set_value(id, Some(value));
    }

    /// Assign a variable by label. Returns false if the label does not occur.
    pub fn assign(&mut self, label: &str, value: bool) -> bool {
        match self.find_var(label) {
            Some(id) => {
                self.set(id, value);
                true
            }
            None => false,
        }
    }

    /// Unset every variable.
    pub fn clear(&mut self) {
        for &id in &self.vars {
            self.tree.set_value(id, None);
        }
    }

    /// Every Not and binary node in creation order. Children are created
    /// before their parents, so the root comes last.
    pub fn subexpressions(&self) -> Vec<NodeId> {
        self.tree
            .ids()
            .filter(|&id| !self.tree.get(id).is_leaf())
            .collect()
    }

    pub fn evaluate(&self) -> Result<bool, ExprError> {
        self.tree.evaluate(self.root)
    }

    pub fn evaluate_node(&self, id: NodeId) -> Result<bool, ExprError> {
        self.tree.evaluate(id)
    }

    pub fn render(&self) -> String {
        self.tree.render(self.root)
    }

    pub fn render_node(&self, id: NodeId) -> String {
        self.tree.render(id)
    }
}
