//! Priority resolution over a declared schema.
//!
//! Each run builds a fresh parser from scratch; nothing is shared across
//! runs or threads.

use crate::config::ConfigStore;
use crate::error::ResolveError;
use crate::field::{Field, FieldKind};
use crate::resolved::ResolvedValues;
use crate::schema::Schema;
use crate::template::interpolate;
use crate::value::Value;
use clap::builder::PossibleValuesParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::collections::HashSet;
use std::ffi::OsString;

/// One resolution pass over a [`Schema`].
///
/// Sources, highest priority first: command line, caller overrides, the
/// config store, declared defaults. Unknown command-line arguments are
/// tolerated, never fatal; later flags still take effect.
pub struct Resolver<'a> {
    schema: &'a Schema,
    argv: Option<Vec<OsString>>,
    overrides: Vec<(String, Value)>,
    config: Option<&'a dyn ConfigStore>,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema, argv: None, overrides: Vec::new(), config: None }
    }

    /// Resolve against an explicit argument vector instead of the process
    /// arguments. No binary name expected.
    pub fn args<I, T>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.argv = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    /// Caller-supplied value keyed by the bare field name. Beats the config
    /// store and defaults, loses to the command line.
    pub fn override_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.push((name.into(), value.into()));
        self
    }

    pub fn config(mut self, store: &'a dyn ConfigStore) -> Self {
        self.config = Some(store);
        self
    }

    pub fn resolve(self) -> Result<ResolvedValues, ResolveError> {
        let mut cmd = self.build_command();
        let argv = self
            .argv
            .clone()
            .unwrap_or_else(|| std::env::args_os().skip(1).collect());
        let matches = parse_known_args(&cmd, argv)?;

        let mut values = ResolvedValues::new(self.schema.name());

        for (name, value) in &self.schema.ambient {
            values.insert(name.clone(), value.clone());
        }
        self.collect_augmented(&cmd, &matches, &mut values);

        for field in &self.schema.fields {
            let flag = self.schema.flag_name(&field.name);
            let resolved = cli_value(&matches, &flag, field)
                .or_else(|| self.override_for(&field.name))
                .or_else(|| self.config_value(field))
                .or_else(|| field.default.clone());

            let Some(mut value) = resolved else {
                if field.required {
                    eprintln!("{}", cmd.render_usage());
                    return Err(ResolveError::MissingRequired { flag });
                }
                continue;
            };

            if let Value::Str(text) = &value {
                value = Value::Str(interpolate(text, &values));
            }
            // stored under the bare field name, never the prefixed flag
            values.insert(field.name.clone(), value);
        }

        Ok(values)
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(self.schema.name().to_string()).no_binary_name(true);

        for augment in &self.schema.augments {
            cmd = augment(cmd);
        }

        for field in &self.schema.fields {
            let flag = self.schema.flag_name(&field.name);
            tracing::debug!(flag = %flag, "registering flag");

            let collides = cmd.get_arguments().any(|a| a.get_id().as_str() == flag);
            if collides {
                // last registration wins: rebuild the colliding arg in place
                cmd = cmd.mut_arg(flag.clone(), |_| build_arg(&flag, field));
            } else {
                cmd = cmd.arg(build_arg(&flag, field));
            }
        }

        cmd
    }

    /// Values and defaults of augment-hook flags that are shadowed by
    /// neither an ambient value nor a declared field. A declared field
    /// shadows both its flag name and its bare name.
    fn collect_augmented(&self, cmd: &Command, matches: &ArgMatches, values: &mut ResolvedValues) {
        let declared: HashSet<String> = self
            .schema
            .fields
            .iter()
            .flat_map(|f| [self.schema.flag_name(&f.name), f.name.clone()])
            .collect();

        for arg in cmd.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" || declared.contains(id) || values.contains(id) {
                continue;
            }
            if let Some(value) = augmented_value(arg, matches) {
                values.insert(id.to_string(), value);
            }
        }
    }

    fn override_for(&self, name: &str) -> Option<Value> {
        self.overrides.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.clone())
    }

    fn config_value(&self, field: &Field) -> Option<Value> {
        let store = self.config?;
        store.get(field.config_key.as_deref()?)
    }
}

/// Parse, dropping the offending token and retrying on every unknown
/// argument, so flags after an unknown token still take effect. Every other
/// parse error, malformed typed values included, surfaces verbatim.
fn parse_known_args(cmd: &Command, mut argv: Vec<OsString>) -> Result<ArgMatches, clap::Error> {
    loop {
        match cmd.clone().try_get_matches_from(argv.iter()) {
            Ok(matches) => return Ok(matches),
            Err(err) if err.kind() == ErrorKind::UnknownArgument => {
                if !remove_unknown_token(&mut argv, &err) {
                    return Err(err);
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// Drop the token the error names, matching both `--flag` and `--flag=value`
/// spellings. Returns false when the token cannot be located, which stops
/// the retry loop.
fn remove_unknown_token(argv: &mut Vec<OsString>, err: &clap::Error) -> bool {
    let Some(ContextValue::String(unknown)) = err.get(ContextKind::InvalidArg) else {
        return false;
    };
    let position = argv.iter().position(|token| {
        token.to_str().is_some_and(|t| {
            t == unknown || t.strip_prefix(unknown.as_str()).is_some_and(|rest| rest.starts_with('='))
        })
    });
    match position {
        Some(idx) => {
            argv.remove(idx);
            true
        }
        None => false,
    }
}

fn build_arg(flag: &str, field: &Field) -> Arg {
    let mut arg = Arg::new(flag.to_string()).long(flag.to_string());
    if let Some(help) = &field.help {
        arg = arg.help(help.clone());
    }
    if let Some(value_name) = &field.value_name {
        arg = arg.value_name(value_name.clone());
    }
    match field.kind {
        FieldKind::Bool => {
            // a default of true means the switch turns the value off
            let action = if field.default == Some(Value::Bool(true)) {
                ArgAction::SetFalse
            } else {
                ArgAction::SetTrue
            };
            arg = arg.action(action);
        }
        FieldKind::List => {
            arg = arg.num_args(1..).action(ArgAction::Set);
        }
        FieldKind::Int => {
            arg = arg.value_parser(clap::value_parser!(i64));
        }
        FieldKind::Float => {
            arg = arg.value_parser(clap::value_parser!(f64));
        }
        FieldKind::Str => {
            if !field.choices.is_empty() {
                arg = arg.value_parser(PossibleValuesParser::new(field.choices.clone()));
            }
        }
    }
    arg
}

/// Typed read-back of a declared field, only when the command line actually
/// supplied it; parser-filled defaults fall through to lower sources.
fn cli_value(matches: &ArgMatches, flag: &str, field: &Field) -> Option<Value> {
    if matches.value_source(flag) != Some(ValueSource::CommandLine) {
        return None;
    }
    match field.kind {
        FieldKind::Bool => Some(Value::Bool(matches.get_flag(flag))),
        FieldKind::List => {
            matches.get_many::<String>(flag).map(|vals| Value::List(vals.cloned().collect()))
        }
        FieldKind::Int => matches.get_one::<i64>(flag).copied().map(Value::Int),
        FieldKind::Float => matches.get_one::<f64>(flag).copied().map(Value::Float),
        FieldKind::Str => matches.get_one::<String>(flag).cloned().map(Value::Str),
    }
}

/// Best-effort read-back of an augment-hook flag, whose value parser the
/// schema never saw.
fn augmented_value(arg: &Arg, matches: &ArgMatches) -> Option<Value> {
    let id = arg.get_id().as_str();
    match arg.get_action() {
        ArgAction::SetTrue | ArgAction::SetFalse => Some(Value::Bool(matches.get_flag(id))),
        ArgAction::Count => Some(Value::Int(i64::from(matches.get_count(id)))),
        _ => {
            if let Ok(Some(vals)) = matches.try_get_many::<String>(id) {
                let mut vals: Vec<String> = vals.cloned().collect();
                if vals.len() == 1 {
                    vals.pop().map(Value::Str)
                } else {
                    Some(Value::List(vals))
                }
            } else if let Ok(Some(v)) = matches.try_get_one::<i64>(id) {
                Some(Value::Int(*v))
            } else if let Ok(Some(v)) = matches.try_get_one::<f64>(id) {
                Some(Value::Float(*v))
            } else if let Ok(Some(v)) = matches.try_get_one::<bool>(id) {
                Some(Value::Bool(*v))
            } else {
                None
            }
        }
    }
}
