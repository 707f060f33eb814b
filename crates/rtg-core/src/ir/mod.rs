pub mod interfaces;
pub mod types;

pub use interfaces::{FieldDescriptor, InterfaceDefinition};
pub use types::{Primitive, TypeExpr};
