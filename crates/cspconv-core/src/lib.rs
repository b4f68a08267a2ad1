//! Typed translation of constraint instances into a prefix constraint language.
//!
//! The converter consumes declaration events (see `cspconv_model`) in file
//! order and emits one statement per line:
//!
//! ```text
//! (int x 0 9)
//! (bool b)
//! (alldifferent x y z)
//! (== (+ x (- y)) 0)
//! ```
//!
//! Every emitted expression is either `Bool` or `Int`; operands are coerced at
//! each operator boundary (`(> e 0)` for int-to-bool, `(if e 1 0)` for
//! bool-to-int).

pub mod config;
pub mod encode;
pub mod error;
pub mod registry;
pub mod session;
pub mod sink;
pub mod tree;
pub mod types;

pub use config::{ConvertConfig, DuplicatePolicy, DEFAULT_AUX_PREFIX};
pub use encode::{StateTable, TransitionIds};
pub use error::{ConvertError, ConvertResult};
pub use registry::{VarEntry, VariableRegistry};
pub use session::{convert_instance, Converter};
pub use sink::{OutputSink, Program};
pub use tree::{convert_tree, Arity};
pub use types::{Type, TypedExpr};
