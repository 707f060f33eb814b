pub mod emitters;
pub mod error;
pub mod generator;
pub mod highlight;
pub mod service;
pub mod type_mapper;

pub use error::GeneratorError;
pub use generator::{
    TypeScriptGenerator, generate_types, generate_types_with, process_json_input, try_generate,
};
pub use service::{GenerationOptions, TypeGenerationService, format_json};
