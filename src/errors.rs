use thiserror::Error;

// Errors raised while compiling a header's formatter pipeline. They surface
// at question-processing time, never during per-row rendering.
#[derive(Debug, Error)]
pub enum CompileError {
    // A modifier name with no registry entry.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    // A token that names a known modifier but violates its parameter contract.
    #[error("malformed modifier `{0}`: {1}")]
    MalformedModifier(String, String),
}

// Type alias for results that use `CompileError` as the error type
pub type Result<T> = std::result::Result<T, CompileError>;
