pub mod annotation;
pub mod descriptor;
pub mod errors;
pub mod modifiers;
pub mod numfmt;
pub mod pipeline;
pub mod row;

pub use descriptor::{Descriptor, DescriptorKind, Indicator, Question, ReportMeta, SimpleTemplates};
pub use errors::{CompileError, Result};
pub use modifiers::{Modifier, Registry};
pub use pipeline::{CompiledFormatter, FormatterFn};
pub use row::Row;

/// Convenience: compile a single annotated header against the builtin
/// modifiers, returning the bare field name and its formatter.
pub fn compile_header(header: &str, theme: Option<&str>) -> Result<(String, CompiledFormatter)> {
    let registry = Registry::with_builtins();
    let (field, tokens) = annotation::split_annotations(header);
    let formatter = pipeline::compile(&field, &tokens, &registry, theme)?;
    Ok((field, formatter))
}
