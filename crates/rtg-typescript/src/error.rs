use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template render failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("unsupported root value: expected an object or an array of objects, got {0}")]
    UnsupportedRoot(&'static str),
}
