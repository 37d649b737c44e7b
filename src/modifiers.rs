use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{CompileError, Result};
use crate::pipeline::FormatterFn;

/// Trait for pluggable header modifiers. `compile` is a factory: it receives
/// the optional parenthesized parameter and the theme context once, at
/// question-processing time, and returns the per-row transformation.
pub trait Modifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn compile(&self, param: Option<&str>, theme: Option<&str>) -> Result<FormatterFn>;
}

/// Thread-safe modifier registry, read-only after construction.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<&'static str, Arc<dyn Modifier>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut map: HashMap<&'static str, Arc<dyn Modifier>> = HashMap::new();
        map.insert("number", Arc::new(builtins::Number));
        map.insert("budget_code", Arc::new(builtins::BudgetCode));
        map.insert("yesno", Arc::new(builtins::YesNo));
        map.insert("item_link", Arc::new(builtins::ItemLink));
        map.insert("search_term", Arc::new(builtins::SearchTerm));
        Self { inner: Arc::new(map) }
    }

    pub fn register<M: Modifier + 'static>(&mut self, m: M) {
        let mut_map = Arc::make_mut(&mut self.inner);
        mut_map.insert(m.name(), Arc::new(m));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Modifier>> {
        self.inner.get(name).cloned()
    }

    /// Resolve one modifier token (`name` or `name(param)`) into its
    /// transformation. Unrecognized names fail immediately, before any row
    /// is rendered.
    pub fn resolve(&self, token: &str, theme: Option<&str>) -> Result<FormatterFn> {
        let (name, param) = split_token(token)?;
        let modifier = self
            .get(name)
            .ok_or_else(|| CompileError::UnknownModifier(name.to_string()))?;
        modifier.compile(param, theme)
    }
}

fn split_token(token: &str) -> Result<(&str, Option<&str>)> {
    match token.split_once('(') {
        None => Ok((token, None)),
        Some((name, rest)) => {
            let param = rest
                .strip_suffix(')')
                .filter(|p| !p.is_empty())
                .ok_or_else(|| {
                    CompileError::MalformedModifier(
                        token.to_string(),
                        "expected `name(param)`".to_string(),
                    )
                })?;
            Ok((name, Some(param)))
        }
    }
}

fn require_no_param(name: &'static str, param: Option<&str>) -> Result<()> {
    match param {
        None => Ok(()),
        Some(_) => Err(CompileError::MalformedModifier(
            name.to_string(),
            "takes no parameter".to_string(),
        )),
    }
}

fn require_param(name: &'static str, param: Option<&str>) -> Result<String> {
    param.map(str::to_string).ok_or_else(|| {
        CompileError::MalformedModifier(name.to_string(), "requires a row-field parameter".to_string())
    })
}

pub mod builtins {
    use super::*;
    use crate::numfmt::format_number;
    use crate::row::{as_float, display_text, truthy};
    use itertools::Itertools;
    use serde_json::Value;

    const YES: &str = "כן";
    const NO: &str = "לא";

    /// `amount:number` — render finite numeric input through the shared
    /// number formatter, anything else as a placeholder dash.
    pub struct Number;
    impl Modifier for Number {
        fn name(&self) -> &'static str {
            "number"
        }
        fn compile(&self, param: Option<&str>, _theme: Option<&str>) -> Result<FormatterFn> {
            require_no_param(self.name(), param)?;
            Ok(Box::new(|x, _row| match as_float(x) {
                Some(n) => Value::String(format_number(n)),
                None => Value::String("-".to_string()),
            }))
        }
    }

    /// `code:budget_code` — drop the two-character category prefix and dot
    /// the rest into two-character groups: `"0012345678"` → `"12.34.56.78"`.
    pub struct BudgetCode;
    impl Modifier for BudgetCode {
        fn name(&self) -> &'static str {
            "budget_code"
        }
        fn compile(&self, param: Option<&str>, _theme: Option<&str>) -> Result<FormatterFn> {
            require_no_param(self.name(), param)?;
            Ok(Box::new(|x, _row| {
                if !truthy(x) {
                    return Value::String(String::new());
                }
                let digits = display_text(x);
                let groups = digits.chars().skip(2).chunks(2);
                let code = groups
                    .into_iter()
                    .map(|pair| pair.collect::<String>())
                    .join(".");
                Value::String(code)
            }))
        }
    }

    pub struct YesNo;
    impl Modifier for YesNo {
        fn name(&self) -> &'static str {
            "yesno"
        }
        fn compile(&self, param: Option<&str>, _theme: Option<&str>) -> Result<FormatterFn> {
            require_no_param(self.name(), param)?;
            Ok(Box::new(|x, _row| {
                Value::String(if truthy(x) { YES } else { NO }.to_string())
            }))
        }
    }

    /// `dept:item_link(dept_id)` — wrap the current value in a link to the
    /// item page keyed by a sibling field, carrying the theme as a query
    /// parameter when one was supplied. Missing key passes through.
    pub struct ItemLink;
    impl Modifier for ItemLink {
        fn name(&self) -> &'static str {
            "item_link"
        }
        fn compile(&self, param: Option<&str>, theme: Option<&str>) -> Result<FormatterFn> {
            let param = require_param(self.name(), param)?;
            let theme = theme.filter(|t| !t.is_empty()).map(str::to_string);
            Ok(Box::new(move |x, row| {
                match row.lookup(&param).filter(|v| truthy(v)) {
                    Some(id) => {
                        let id = display_text(id);
                        let text = display_text(x);
                        let href = match &theme {
                            Some(t) => format!("/i/{id}?theme={t}"),
                            None => format!("/i/{id}"),
                        };
                        Value::String(format!("<a href=\"{href}\">{text}</a>"))
                    }
                    None => x.clone(),
                }
            }))
        }
    }

    /// `name:search_term(code)` — link to a budget-key search for a sibling
    /// field's value. The theme context is deliberately not appended here.
    pub struct SearchTerm;
    impl Modifier for SearchTerm {
        fn name(&self) -> &'static str {
            "search_term"
        }
        fn compile(&self, param: Option<&str>, _theme: Option<&str>) -> Result<FormatterFn> {
            let param = require_param(self.name(), param)?;
            Ok(Box::new(move |x, row| {
                match row.lookup(&param).filter(|v| truthy(v)) {
                    Some(term) => {
                        let term = display_text(term);
                        let text = display_text(x);
                        Value::String(format!(
                            "<a href=\"/s/?q={}\" title=\"חיפוש התקנה {} במפתח התקציב\">{}</a>",
                            urlencoding::encode(&term),
                            text,
                            text
                        ))
                    }
                    None => x.clone(),
                }
            }))
        }
    }
}
