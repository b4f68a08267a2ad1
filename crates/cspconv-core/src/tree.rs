//! Expression tree converter: lowers intension trees to typed prefix text.

use crate::error::{ConvertError, ConvertResult};
use crate::registry::VariableRegistry;
use crate::types::{Type, TypedExpr};
use cspconv_model::{Node, OperatorKind};
use std::fmt;

/// Argument count accepted by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    fn admits(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "exactly {k}"),
            Arity::AtLeast(k) => write!(f, "at least {k}"),
        }
    }
}

/// Required argument types of an operator.
#[derive(Debug, Clone, Copy)]
enum Inputs {
    /// Every argument has the same type.
    Uniform(Type),
    /// One type per position.
    Positional(&'static [Type]),
}

/// Lowering signature of a supported operator.
#[derive(Debug, Clone, Copy)]
struct Signature {
    symbol: &'static str,
    arity: Arity,
    inputs: Inputs,
    output: Type,
}

impl Signature {
    fn input(&self, position: usize) -> Type {
        match self.inputs {
            Inputs::Uniform(ty) => ty,
            Inputs::Positional(types) => types[position],
        }
    }
}

const IF_INPUTS: &[Type] = &[Type::Bool, Type::Int, Type::Int];

fn signature(op: OperatorKind) -> ConvertResult<Signature> {
    use Type::{Bool, Int};

    let (symbol, arity, inputs, output) = match op {
        OperatorKind::Neg => ("-", Arity::Exactly(1), Inputs::Uniform(Int), Int),
        OperatorKind::Add => ("+", Arity::AtLeast(0), Inputs::Uniform(Int), Int),
        OperatorKind::Mul => ("*", Arity::AtLeast(0), Inputs::Uniform(Int), Int),
        OperatorKind::Sub => ("-", Arity::Exactly(2), Inputs::Uniform(Int), Int),
        OperatorKind::If => ("if", Arity::Exactly(3), Inputs::Positional(IF_INPUTS), Int),
        OperatorKind::And => ("and", Arity::AtLeast(0), Inputs::Uniform(Bool), Bool),
        OperatorKind::Or => ("or", Arity::AtLeast(0), Inputs::Uniform(Bool), Bool),
        OperatorKind::Xor => ("xor", Arity::AtLeast(0), Inputs::Uniform(Bool), Bool),
        OperatorKind::Eq => ("==", Arity::AtLeast(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Ne => ("!=", Arity::Exactly(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Le => ("<=", Arity::Exactly(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Lt => ("<", Arity::Exactly(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Ge => (">=", Arity::Exactly(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Gt => (">", Arity::Exactly(2), Inputs::Uniform(Int), Bool),
        OperatorKind::Abs
        | OperatorKind::Div
        | OperatorKind::Mod
        | OperatorKind::Sqr
        | OperatorKind::Pow
        | OperatorKind::Min
        | OperatorKind::Max
        | OperatorKind::Dist
        | OperatorKind::Not
        | OperatorKind::Iff
        | OperatorKind::Imp
        | OperatorKind::In
        | OperatorKind::NotIn
        | OperatorKind::Set => return Err(ConvertError::UnsupportedOperator { op }),
    };

    Ok(Signature {
        symbol,
        arity,
        inputs,
        output,
    })
}

/// Convert an expression tree to typed text.
///
/// Each argument is coerced to the type its operator position requires; the
/// result carries the operator's output type.
pub fn convert_tree(node: &Node, registry: &VariableRegistry) -> ConvertResult<TypedExpr> {
    match node {
        Node::Constant { value } => Ok(TypedExpr::int(*value)),
        Node::Variable { id } => registry.expr(id),
        Node::Operator { op, args } => {
            let sig = signature(*op)?;
            if !sig.arity.admits(args.len()) {
                return Err(ConvertError::MalformedExpression {
                    op: *op,
                    expected: sig.arity,
                    found: args.len(),
                });
            }

            let mut text = format!("({}", sig.symbol);
            for (i, arg) in args.iter().enumerate() {
                let converted = convert_tree(arg, registry)?.as_type(sig.input(i));
                text.push(' ');
                text.push_str(&converted.text);
            }
            text.push(')');
            Ok(TypedExpr::new(text, sig.output))
        }
    }
}
