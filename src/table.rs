use std::fmt;

use crate::parser::{Expr, ExprError, Node, NodeId};

/// Default cap on free variables. A table has 2^n rows.
pub const MAX_VARIABLES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<char>>,
}

impl TruthTable {
    pub fn to_tsv(&self) -> String {
        let mut lines = vec![self.header.join("\t")];
        for row in &self.rows {
            lines.push(
                row.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join("\t"),
            );
        }
        lines.join("\n")
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();

        let header: Vec<&str> = self.header.iter().map(|h| h.as_str()).collect();
        writeln!(f, "{}", header.join(" | "))?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write!(f, "{}", rule.join("-+-"))?;

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:^width$}", c, width = *w))
                .collect();
            write!(f, "\n{}", cells.join(" | "))?;
        }

        Ok(())
    }
}

/// Streams the rows of a truth table, assigning the variables in place.
///
/// Row `r` gives variable `i` the value of bit `n - 1 - i` of `r`, so the
/// first variable is the most significant. After the last row the variables
/// keep that row's assignment.
pub struct Rows<'a> {
    expr: &'a mut Expr,
    vars: Vec<NodeId>,
    nodes: Vec<NodeId>,
    next: usize,
    count: usize,
}

impl<'a> Rows<'a> {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn header(&self) -> Vec<String> {
        self.vars
            .iter()
            .chain(&self.nodes)
            .map(|&id| self.expr.render_node(id))
            .collect()
    }

    fn row(&mut self, r: usize) -> Result<Vec<char>, ExprError> {
        let n = self.vars.len();
        let mut row = Vec::with_capacity(n + self.nodes.len());

        for (i, &var) in self.vars.iter().enumerate() {
            let bit = (r >> (n - 1 - i)) & 1 == 1;
            self.expr.set(var, bit);
            row.push(if bit { '1' } else { '0' });
        }

        for &node in &self.nodes {
            let value = self.expr.evaluate_node(node)?;
            row.push(if value { '1' } else { '0' });
        }

        trace!("row {}: {}", r, row.iter().collect::<String>());
        Ok(row)
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Result<Vec<char>, ExprError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.count {
            return None;
        }

        let r = self.next;
        self.next += 1;
        Some(self.row(r))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

#[must_use]
pub struct TruthTableBuilder<'a> {
    expr: &'a mut Expr,
    vars: Vec<NodeId>,
    nodes: Vec<NodeId>,
    max_vars: usize,
}

impl<'a> TruthTableBuilder<'a> {
    /// Defaults to every variable in order of first occurrence and every
    /// compound subexpression, root last.
    pub fn new(expr: &'a mut Expr) -> Self {
        let vars = expr.variables().to_vec();
        let nodes = expr.subexpressions();
        Self {
            expr,
            vars,
            nodes,
            max_vars: MAX_VARIABLES,
        }
    }

    pub fn with_vars(mut self, vars: &[NodeId]) -> Self {
        self.vars = vars.to_vec();
        self
    }

    pub fn with_nodes(mut self, nodes: &[NodeId]) -> Self {
        self.nodes = nodes.to_vec();
        self
    }

    pub fn with_root_only(mut self) -> Self {
        self.nodes = vec![self.expr.root()];
        self
    }

    pub fn with_max_vars(mut self, max_vars: usize) -> Self {
        self.max_vars = max_vars;
        self
    }

    pub fn rows(self) -> Result<Rows<'a>, ExprError> {
        let n = self.vars.len();
        let limit = self.max_vars.min(usize::BITS as usize - 1);
        if n > limit {
            warn!("refusing to tabulate {} variables", n);
            return Err(ExprError::TooManyVariables { count: n, limit });
        }

        let tree = self.expr.tree();
        for &id in &self.vars {
            if !tree.contains(id) || !matches!(tree.get(id), Node::Variable { .. }) {
                return Err(ExprError::input(format!(
                    "node {} is not a variable of this expression",
                    id.index()
                )));
            }
        }
        for &id in &self.nodes {
            if !tree.contains(id) {
                return Err(ExprError::input(format!(
                    "node {} does not belong to this expression",
                    id.index()
                )));
            }
        }

        debug!("tabulating {} rows over {} columns", 1usize << n, n + self.nodes.len());
        Ok(Rows {
            expr: self.expr,
            vars: self.vars,
            nodes: self.nodes,
            next: 0,
            count: 1 << n,
        })
    }

    /// Fails with `InputError` if `vars` holds a node that is not a variable
    /// of this expression, or `nodes` holds an id from another expression.
    pub fn finish(self) -> Result<TruthTable, ExprError> {
        let rows = self.rows()?;
        let header = rows.header();
        let rows = rows.collect::<Result<Vec<_>, _>>()?;

        Ok(TruthTable { header, rows })
    }
}

pub fn generate_truth_table(
    expr: &mut Expr,
    vars: &[NodeId],
    nodes: &[NodeId],
) -> Result<TruthTable, ExprError> {
    TruthTableBuilder::new(expr)
        .with_vars(vars)
        .with_nodes(nodes)
        .finish()
}

#[cfg(test)]
mod test_table {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn and_table() {
        let mut expr = Expr::from_string("A ∧ B").unwrap();
        let vars = expr.variables().to_vec();
        let root = expr.root();

        let table = generate_truth_table(&mut expr, &vars, &[root]).unwrap();
        assert_eq!(table.header, vec!["A", "B", "A ∧ B"]);
        assert_eq!(
            table.rows,
            vec![chars("000"), chars("010"), chars("100"), chars("111")]
        );
    }

    #[test]
    fn first_variable_is_most_significant() {
        let mut expr = Expr::from_string("C ∨ A ∨ B").unwrap();
        let table = TruthTableBuilder::new(&mut expr)
            .with_root_only()
            .finish()
            .unwrap();

        assert_eq!(table.header[..3], ["C", "A", "B"]);
        assert_eq!(table.rows.len(), 8);
        assert_eq!(table.rows[1], chars("0011"));
        assert_eq!(table.rows[4], chars("1001"));
        assert_eq!(table.rows[0], chars("0000"));
    }

    #[test]
    fn constant_expression_has_one_row() {
        let mut expr = Expr::from_string("1 ∧ ~0").unwrap();
        let table = TruthTableBuilder::new(&mut expr).finish().unwrap();

        assert_eq!(table.header, vec!["~0", "1 ∧ ~0"]);
        assert_eq!(table.rows, vec![chars("11")]);
    }

    #[test]
    fn subexpression_columns() {
        let mut expr = Expr::from_string("~A ∨ B").unwrap();
        let table = TruthTableBuilder::new(&mut expr).finish().unwrap();

        assert_eq!(table.header, vec!["A", "B", "~A", "~A ∨ B"]);
        assert_eq!(
            table.rows,
            vec![chars("0011"), chars("0111"), chars("1000"), chars("1101")]
        );
    }

    #[test]
    fn variables_keep_last_assignment() {
        let mut expr = Expr::from_string("A ⊻ B").unwrap();
        TruthTableBuilder::new(&mut expr).finish().unwrap();

        assert!(!expr.evaluate().unwrap());
        let a = expr.find_var("A").unwrap();
        assert!(expr.evaluate_node(a).unwrap());
    }

    #[test]
    fn rows_stream_lazily() {
        let mut expr = Expr::from_string("A ∧ B ∧ C").unwrap();
        let mut rows = TruthTableBuilder::new(&mut expr)
            .with_root_only()
            .rows()
            .unwrap();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows.next().unwrap().unwrap(), chars("0000"));
        assert_eq!(rows.size_hint(), (7, Some(7)));
        assert_eq!(rows.last().unwrap().unwrap(), chars("1111"));
    }

    #[test]
    fn unlisted_variable_fails_evaluation() {
        let mut expr = Expr::from_string("A ∧ B").unwrap();
        let a = expr.find_var("A").unwrap();
        let root = expr.root();

        let result = generate_truth_table(&mut expr, &[a], &[root]);
        assert!(matches!(result, Err(ExprError::Eval(_))));
    }

    #[test]
    fn foreign_or_non_variable_ids_are_rejected() {
        let mut expr = Expr::from_string("A ∧ B").unwrap();
        let root = expr.root();

        let result = generate_truth_table(&mut expr, &[root], &[root]);
        assert!(matches!(result, Err(ExprError::Input(_))));

        let bigger = Expr::from_string("(C ∨ D) ∧ (E ∨ G)").unwrap();
        let foreign = bigger.root();
        let vars = expr.variables().to_vec();
        let result = generate_truth_table(&mut expr, &vars, &[foreign]);
        assert!(matches!(result, Err(ExprError::Input(_))));

        let foreign_var = bigger.find_var("G").unwrap();
        let result = generate_truth_table(&mut expr, &[foreign_var], &[root]);
        assert!(matches!(result, Err(ExprError::Input(_))));
    }

    #[test]
    fn variable_cap() {
        let mut expr = Expr::from_string("a ∧ b ∧ c ∧ d").unwrap();
        let result = TruthTableBuilder::new(&mut expr).with_max_vars(3).finish();

        assert_eq!(
            result,
            Err(ExprError::TooManyVariables { count: 4, limit: 3 })
        );
    }

    #[test]
    fn formatting() {
        let mut expr = Expr::from_string("A ∨ B").unwrap();
        let table = TruthTableBuilder::new(&mut expr).finish().unwrap();

        assert_eq!(
            table.to_string(),
            "A | B | A ∨ B\n--+---+------\n0 | 0 |   0  \n0 | 1 |   1  \n1 | 0 |   1  \n1 | 1 |   1  "
        );
        assert_eq!(table.to_tsv(), "A\tB\tA ∨ B\n0\t0\t0\n0\t1\t1\n1\t0\t1\n1\t1\t1");
    }
}
