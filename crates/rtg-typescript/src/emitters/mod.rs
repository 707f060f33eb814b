pub mod interfaces;

pub use interfaces::emit_interfaces;
