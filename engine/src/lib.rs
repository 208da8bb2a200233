//! An ECMAScript evaluator: a syntax-directed interpreter over
//! [`ecma_ast`] implementing the operational semantics of completion
//! records, the value/object/reference data model, environment records,
//! the execution-context stack, and a realm of intrinsics (ECMA-262).
//!
//! Grammar coverage, REPL ergonomics, exhaustive built-in method bodies,
//! ECMA-402 internationalization, the module system, and any form of
//! bytecode compilation or JIT are out of scope — see `DESIGN.md`.

pub mod bigint;
pub mod binding;
pub mod builtins;
pub mod completion;
pub mod context;
pub mod declaration_instantiation;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod function;
pub mod iteration;
pub mod object;
pub mod promise;
pub mod property;
pub mod realm;
pub mod reference;
pub mod string;
pub mod symbol;
pub mod value;

pub use builtins::BuiltinPlugin;
pub use completion::Completion;
pub use context::{Context, ContextBuilder, Job, JobQueue, SimpleJobQueue};
pub use error::{EngineError, EngineResult, JsError, JsNativeError, JsNativeErrorKind, JsResult};
pub use object::JsObject;
pub use property::PropertyKey;
pub use string::JsString;
pub use symbol::JsSymbol;
pub use value::JsValue;

#[cfg(test)]
mod tests;
