use serde_json::Value;

use crate::errors::Result;
use crate::modifiers::Registry;
use crate::row::Row;

/// One pipeline stage: `(current value, row) -> rendered value`. Every stage
/// sees the full row so parametrized modifiers can read sibling fields.
pub type FormatterFn = Box<dyn Fn(&Value, &Row) -> Value + Send + Sync>;

/// A fully compiled per-column formatter, invoked once per data row.
pub type CompiledFormatter = Box<dyn Fn(&Row) -> Value + Send + Sync>;

/// `compose(f, g)` applies `f` first, then `g` to its result.
pub fn compose(f: FormatterFn, g: FormatterFn) -> FormatterFn {
    Box::new(move |x, row| g(&f(x, row), row))
}

/// The innermost stage: ignore the running value, read the field off the row.
/// A missing field reads as null.
pub fn field_accessor(field: &str) -> FormatterFn {
    let field = field.to_string();
    Box::new(move |_seed, row| row.lookup(&field).cloned().unwrap_or(Value::Null))
}

/// Build one column's formatter from its bare field name and modifier tokens.
///
/// `tokens` arrive rightmost-suffix-first from the tokenizer, so the *last*
/// token is the modifier written closest to the field name and must be
/// applied first; folding the list in reverse on top of the field accessor
/// restores the left-to-right application order of the annotation as written.
pub fn compile(
    field: &str,
    tokens: &[String],
    registry: &Registry,
    theme: Option<&str>,
) -> Result<CompiledFormatter> {
    let mut func = field_accessor(field);
    for token in tokens.iter().rev() {
        func = compose(func, registry.resolve(token, theme)?);
    }
    // Seed the chain with an empty string; the accessor ignores it.
    Ok(Box::new(move |row| func(&Value::String(String::new()), row)))
}
