//! Field descriptors.

use crate::value::Value;

/// Intended parse type for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Str,
    Bool,
    Int,
    Float,
    /// One-or-more string tokens on the command line.
    List,
}

/// Declarative description of one resolvable field.
///
/// Inert data: the resolver consumes it during a run, nothing here executes
/// on its own.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) default: Option<Value>,
    pub(crate) required: bool,
    pub(crate) config_key: Option<String>,
    pub(crate) help: Option<String>,
    pub(crate) choices: Vec<String>,
    pub(crate) value_name: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Str,
            default: None,
            required: false,
            config_key: None,
            help: None,
            choices: Vec::new(),
            value_name: None,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Resolution fails when no source supplies a value for this field.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Key looked up in the config store, consulted after CLI and overrides.
    pub fn config_key(mut self, key: impl Into<String>) -> Self {
        self.config_key = Some(key.into());
        self
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Restrict accepted CLI tokens; only meaningful for string fields.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
