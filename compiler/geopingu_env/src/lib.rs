// Formula environment: the fixed function/operator registry and the
// per-formula variable store.
pub mod registry;
pub mod store;

pub use registry::{registry, FunctionError, FunctionKind, FunctionSpec, Registry};
pub use store::{NotExistingVariableError, Variable, VariableStore};
