//! `{name}` placeholder interpolation.

use crate::resolved::ResolvedValues;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

/// Substitute `{field}` placeholders with already-resolved values.
///
/// Placeholders naming unknown fields are left intact; a template miss is
/// never an error.
pub(crate) fn interpolate(text: &str, values: &ResolvedValues) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::interpolate;
    use crate::resolved::ResolvedValues;
    use crate::value::Value;

    fn sample() -> ResolvedValues {
        let mut values = ResolvedValues::new("T");
        values.insert("host", Value::Str("db.local".into()));
        values.insert("port", Value::Int(5432));
        values
    }

    #[test]
    fn substitutes_resolved_fields() {
        assert_eq!(interpolate("{host}:{port}/app", &sample()), "db.local:5432/app");
    }

    #[test]
    fn unknown_placeholder_left_intact() {
        assert_eq!(interpolate("{host}/{missing}", &sample()), "db.local/{missing}");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(interpolate("no templates here", &sample()), "no templates here");
    }
}
