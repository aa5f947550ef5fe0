use serde::{Deserialize, Serialize};

/// A literal value as it appears in source text, distinct from the runtime
/// `Value` the evaluator produces (which additionally carries `Callable`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Nil,
}
