//! Instance declaration types: plain data, no converter dependencies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed instance: declarations in file order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Instance name, if the source carried one.
    #[serde(default)]
    pub name: Option<String>,
    /// Declarations in the order the parser encountered them.
    pub events: Vec<Event>,
}

/// One declaration emitted by the parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Variable(VariableDecl),
    Constraint(ConstraintDecl),
}

impl Event {
    /// The declared id of the variable or constraint.
    pub fn id(&self) -> &str {
        match self {
            Event::Variable(v) => &v.id,
            Event::Constraint(c) => &c.id,
        }
    }
}

/// An integer variable declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableDecl {
    pub id: String,
    pub domain: Domain,
}

/// Domain of a declared variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    /// Contiguous range `min..=max`.
    Range { min: i64, max: i64 },
    /// Explicit value set, in declaration order.
    Values { values: Vec<i64> },
}

/// A constraint declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintDecl {
    pub id: String,
    pub constraint: Constraint,
}

/// Constraint payloads, one variant per supported constraint kind.
///
/// Variables are referenced by declared id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// Boolean expression tree.
    Intension { tree: Node },
    /// `list[0] op list[1] op ...`.
    Ordered { list: Vec<String>, order: Order },
    AllDifferent { list: Vec<String> },
    /// All-different over integer expressions.
    AllDifferentExprs { list: Vec<Node> },
    /// All-different over every row and every column.
    AllDifferentMatrix { matrix: Vec<Vec<String>> },
    /// Weighted sum compared against a bound. Missing coefficients mean 1.
    Sum {
        list: Vec<String>,
        #[serde(default)]
        coeffs: Option<Vec<i64>>,
        condition: Condition,
    },
    /// Table constraint: `tuples` are allowed (`support`) or forbidden.
    Extension {
        list: Vec<String>,
        tuples: Vec<Vec<TupleValue>>,
        support: bool,
    },
    /// Table constraint over a single variable.
    ExtensionUnary {
        variable: String,
        values: Vec<i64>,
        support: bool,
    },
    Instantiation { list: Vec<String>, values: Vec<i64> },
    /// `list[index - start_index] == value`.
    Element {
        list: Vec<String>,
        #[serde(default)]
        start_index: i64,
        index: String,
        #[serde(default)]
        rank: Rank,
        value: Operand,
    },
    /// `matrix[row_index - start_row_index][col_index - start_col_index] == value`.
    ElementMatrix {
        matrix: Vec<Vec<String>>,
        #[serde(default)]
        start_row_index: i64,
        row_index: String,
        #[serde(default)]
        start_col_index: i64,
        col_index: String,
        value: Operand,
    },
    /// Number of occurrences of `values[i]` in `list` is `occurs[i]`.
    Cardinality {
        list: Vec<String>,
        values: Vec<i64>,
        occurs: Occurs,
        #[serde(default)]
        closed: bool,
    },
    /// Exactly `k` elements of `list` equal `value`.
    ExactlyK { list: Vec<String>, value: i64, k: i64 },
    /// `list` is a word accepted by the automaton.
    Regular {
        list: Vec<String>,
        start: String,
        finals: Vec<String>,
        transitions: Vec<Transition>,
    },
}

impl Constraint {
    /// Short kind tag, matching the serialized `kind` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constraint::Intension { .. } => "intension",
            Constraint::Ordered { .. } => "ordered",
            Constraint::AllDifferent { .. } => "all_different",
            Constraint::AllDifferentExprs { .. } => "all_different_exprs",
            Constraint::AllDifferentMatrix { .. } => "all_different_matrix",
            Constraint::Sum { .. } => "sum",
            Constraint::Extension { .. } => "extension",
            Constraint::ExtensionUnary { .. } => "extension_unary",
            Constraint::Instantiation { .. } => "instantiation",
            Constraint::Element { .. } => "element",
            Constraint::ElementMatrix { .. } => "element_matrix",
            Constraint::Cardinality { .. } => "cardinality",
            Constraint::ExactlyK { .. } => "exactly_k",
            Constraint::Regular { .. } => "regular",
        }
    }
}

/// Expression tree node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Constant { value: i64 },
    Variable { id: String },
    Operator { op: OperatorKind, args: Vec<Node> },
}

impl Node {
    pub fn constant(value: i64) -> Self {
        Node::Constant { value }
    }

    pub fn var(id: impl Into<String>) -> Self {
        Node::Variable { id: id.into() }
    }

    pub fn op(op: OperatorKind, args: Vec<Node>) -> Self {
        Node::Operator { op, args }
    }
}

/// Operators of the intension tree language.
///
/// The converter lowers a subset of these; the rest are rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OperatorKind {
    // Arithmetic
    Neg,
    Abs,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Sqr,
    Pow,
    Min,
    Max,
    Dist,
    If,
    // Logical
    Not,
    And,
    Or,
    Xor,
    Iff,
    Imp,
    // Relational
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Set
    In,
    NotIn,
    Set,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::Neg => "neg",
            OperatorKind::Abs => "abs",
            OperatorKind::Add => "add",
            OperatorKind::Sub => "sub",
            OperatorKind::Mul => "mul",
            OperatorKind::Div => "div",
            OperatorKind::Mod => "mod",
            OperatorKind::Sqr => "sqr",
            OperatorKind::Pow => "pow",
            OperatorKind::Min => "min",
            OperatorKind::Max => "max",
            OperatorKind::Dist => "dist",
            OperatorKind::If => "if",
            OperatorKind::Not => "not",
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Xor => "xor",
            OperatorKind::Iff => "iff",
            OperatorKind::Imp => "imp",
            OperatorKind::Eq => "eq",
            OperatorKind::Ne => "ne",
            OperatorKind::Lt => "lt",
            OperatorKind::Le => "le",
            OperatorKind::Gt => "gt",
            OperatorKind::Ge => "ge",
            OperatorKind::In => "in",
            OperatorKind::NotIn => "notin",
            OperatorKind::Set => "set",
        };
        f.write_str(name)
    }
}

/// Ordering relation for `Constraint::Ordered`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Lt,
    Le,
    Gt,
    Ge,
}

/// Comparison relation of a condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `<relation> <operand>`, e.g. the right-hand side of a sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Condition {
    pub relation: Relation,
    pub operand: Operand,
}

/// Right-hand operand of a condition or element value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operand {
    Integer { value: i64 },
    Variable { id: String },
    Interval { min: i64, max: i64 },
    Set { values: Vec<i64> },
}

impl Operand {
    /// Short name of the operand form, for diagnostics.
    pub fn form(&self) -> &'static str {
        match self {
            Operand::Integer { .. } => "integer",
            Operand::Variable { .. } => "variable",
            Operand::Interval { .. } => "interval",
            Operand::Set { .. } => "set",
        }
    }
}

/// Position semantics of an element index.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    #[default]
    Any,
    First,
    Last,
}

/// Occurrence targets of a cardinality constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occurs {
    Integers { values: Vec<i64> },
    Variables { ids: Vec<String> },
    Intervals { intervals: Vec<Interval> },
}

impl Occurs {
    pub fn len(&self) -> usize {
        match self {
            Occurs::Integers { values } => values.len(),
            Occurs::Variables { ids } => ids.len(),
            Occurs::Intervals { intervals } => intervals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Closed integer interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interval {
    pub min: i64,
    pub max: i64,
}

/// Automaton transition `from --value--> to`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub value: i64,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>, value: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            value,
        }
    }
}

/// Wildcard marker, serialized as `"*"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Star {
    #[serde(rename = "*")]
    Star,
}

/// One cell of a tuple table: a value, or `*` for any value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TupleValue {
    Value(i64),
    Any(Star),
}

impl TupleValue {
    pub const STAR: TupleValue = TupleValue::Any(Star::Star);

    pub fn is_star(&self) -> bool {
        matches!(self, TupleValue::Any(_))
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            TupleValue::Value(v) => Some(*v),
            TupleValue::Any(_) => None,
        }
    }
}

impl From<i64> for TupleValue {
    fn from(v: i64) -> Self {
        TupleValue::Value(v)
    }
}
