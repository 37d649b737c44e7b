use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::annotation::split_annotations;
use crate::errors::Result;
use crate::modifiers::Registry;
use crate::pipeline::{self, CompiledFormatter};
use crate::row::Row;

/// One report question: a query plus the headers its results are rendered
/// under. Headers start out annotated (`amount:number`); processing rewrites
/// them to bare field names and compiles one formatter per column.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    #[serde(deserialize_with = "one_or_many")]
    pub query: Vec<String>,
    pub parameters: Map<String, Value>,
    pub defaults: Option<Map<String, Value>>,
    pub headers: Vec<String>,
    #[serde(skip)]
    pub formatters: Vec<CompiledFormatter>,
    #[serde(skip)]
    pub original_headers: Option<Vec<String>>,
}

// `query` accepts a single identifier or a list of them.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(q) => vec![q],
        OneOrMany::Many(qs) => qs,
    })
}

impl Question {
    /// Compile this question's headers into bare names + formatters.
    ///
    /// Runs at most once: a question whose `original_headers` is already set
    /// is left untouched. The rewrite is all-or-nothing — every header must
    /// compile before any field is replaced, so a failed compilation leaves
    /// the question unprocessed.
    pub fn process(&mut self, registry: &Registry, theme: Option<&str>) -> Result<()> {
        if self.original_headers.is_some() {
            return Ok(());
        }

        let mut headers = Vec::with_capacity(self.headers.len());
        let mut formatters = Vec::with_capacity(self.headers.len());
        for header in &self.headers {
            let (field, tokens) = split_annotations(header);
            let formatter = pipeline::compile(&field, &tokens, registry, theme)?;
            if field.is_empty() {
                // An annotation-only header produces no column.
                continue;
            }
            headers.push(field);
            formatters.push(formatter);
        }
        debug!(columns = headers.len(), "compiled question formatters");

        self.original_headers = Some(std::mem::take(&mut self.headers));
        self.headers = headers;
        self.formatters = formatters;
        Ok(())
    }

    pub fn is_processed(&self) -> bool {
        self.original_headers.is_some()
    }

    /// Render one data row: one value per bare header, in header order.
    pub fn render_row(&self, row: &Row) -> Vec<Value> {
        self.formatters.iter().map(|f| f(row)).collect()
    }
}

/// A titled asset shown alongside a report.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Indicator {
    pub asset: String,
    pub template: String,
}

/// Presentation templates of a simple descriptor.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleTemplates {
    pub pre_title_template: String,
    pub title_template: String,
    pub subtitle_template: String,
    pub text_template: String,
    pub amount_template: String,
}

/// Report-specific titling data.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportMeta {
    pub indicators: Vec<Indicator>,
    pub title_prefix: String,
    pub title_suffix: String,
    pub title_field: String,
    pub title_other_url_prefix: String,
    pub suffix_template: String,
}

pub enum DescriptorKind {
    Simple(SimpleTemplates),
    Report(ReportMeta),
    Procure,
    People,
}

/// A page descriptor: the questions rendered on it plus presentation data.
/// The descriptor variants are plain data holders; the only behavior is
/// `init`, which compiles every question's formatters for a theme.
pub struct Descriptor {
    pub path_prefix: String,
    pub style: String,
    pub questions: Vec<Question>,
    pub visualization_templates: Map<String, Value>,
    pub kind: DescriptorKind,
}

impl Descriptor {
    pub fn simple(
        path_prefix: impl Into<String>,
        questions: Vec<Question>,
        visualization_templates: Option<Map<String, Value>>,
        templates: SimpleTemplates,
        style: Option<&str>,
    ) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            style: style.unwrap_or("simple").to_string(),
            questions,
            visualization_templates: visualization_templates.unwrap_or_default(),
            kind: DescriptorKind::Simple(templates),
        }
    }

    pub fn report(
        path_prefix: impl Into<String>,
        questions: Vec<Question>,
        meta: ReportMeta,
    ) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            style: "report".to_string(),
            questions,
            visualization_templates: Map::new(),
            kind: DescriptorKind::Report(meta),
        }
    }

    pub fn procure(path_prefix: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            style: "procure".to_string(),
            questions,
            visualization_templates: Map::new(),
            kind: DescriptorKind::Procure,
        }
    }

    pub fn people(path_prefix: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            style: "people".to_string(),
            questions,
            visualization_templates: Map::new(),
            kind: DescriptorKind::People,
        }
    }

    /// Process every question with the builtin modifiers.
    pub fn init(&mut self, theme: Option<&str>) -> Result<()> {
        self.init_with_registry(&Registry::with_builtins(), theme)
    }

    /// Process every question with a caller-supplied registry.
    pub fn init_with_registry(&mut self, registry: &Registry, theme: Option<&str>) -> Result<()> {
        for question in &mut self.questions {
            question.process(registry, theme)?;
        }
        Ok(())
    }
}
