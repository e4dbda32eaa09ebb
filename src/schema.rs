//! Schema declaration and flag naming.

use crate::error::SchemaError;
use crate::field::Field;
use crate::value::Value;
use clap::Command;
use std::sync::Arc;

pub(crate) type AugmentFn = Arc<dyn Fn(Command) -> Command + Send + Sync>;

/// Ordered field declarations plus ambient values and parser hooks.
///
/// Immutable once built; a [`crate::Resolver`] borrows it for each run.
#[derive(Clone)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) prefix: Option<String>,
    pub(crate) fields: Vec<Field>,
    pub(crate) ambient: Vec<(String, Value)>,
    pub(crate) augments: Vec<AugmentFn>,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            prefix: None,
            fields: Vec::new(),
            ambient: Vec::new(),
            augments: Vec::new(),
        }
    }

    /// Seed a builder from this schema. Later declarations override earlier
    /// ones, modeling a derived schema layered over its base.
    pub fn extend(&self, name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            prefix: self.prefix.clone(),
            fields: self.fields.clone(),
            ambient: self.ambient.clone(),
            augments: self.augments.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub(crate) fn flag_name(&self, field: &str) -> String {
        flag_name(self.prefix.as_deref(), field)
    }
}

/// `{prefix}_{field}` when a prefix is set, the bare field name otherwise.
pub fn flag_name(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}_{field}"),
        None => field.to_string(),
    }
}

pub struct SchemaBuilder {
    name: String,
    prefix: Option<String>,
    fields: Vec<Field>,
    ambient: Vec<(String, Value)>,
    augments: Vec<AugmentFn>,
}

impl SchemaBuilder {
    /// Namespace generated flags as `--{prefix}_{field}`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Declare a field. Redeclaring a name replaces the earlier declaration
    /// in place, keeping its position in resolution order.
    pub fn field(mut self, field: Field) -> Self {
        match self.fields.iter().position(|f| f.name == field.name) {
            Some(idx) => self.fields[idx] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// A plain value carried onto the result unchanged, with the same
    /// replace-on-redeclare rule as [`Self::field`].
    pub fn ambient(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.ambient.iter().position(|(n, _)| *n == name) {
            Some(idx) => self.ambient[idx] = (name, value),
            None => self.ambient.push((name, value)),
        }
        self
    }

    /// Hook that may register extra flags; hooks run in declaration order
    /// before the declared fields are registered.
    pub fn augment<F>(mut self, f: F) -> Self
    where
        F: Fn(Command) -> Command + Send + Sync + 'static,
    {
        self.augments.push(Arc::new(f));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if let Some(prefix) = &self.prefix {
            if !flag_safe(prefix) {
                return Err(SchemaError::InvalidPrefix { prefix: prefix.clone() });
            }
        }
        for field in &self.fields {
            if !flag_safe(&field.name) {
                return Err(SchemaError::InvalidFieldName { name: field.name.clone() });
            }
        }
        Ok(Schema {
            name: self.name,
            prefix: self.prefix,
            fields: self.fields,
            ambient: self.ambient,
            augments: self.augments,
        })
    }
}

fn flag_safe(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
