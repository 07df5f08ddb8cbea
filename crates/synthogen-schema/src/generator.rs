use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generator families for `string` nodes.
///
/// The variant tags are the wire tokens the engine dispatches on; the closed
/// set mirrors the engine's own schema document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StringGenerator {
    Uuid,
    Email,
    FirstName,
    LastName,
    FullName,
    Username,
    City,
    Country,
    CountryCode,
    Street,
    State,
    ZipCode,
    Latitude,
    Longitude,
    Phone,
    /// Composes a template string with named argument substitutions.
    #[serde(rename_all = "camelCase")]
    Format {
        format: String,
        args: BTreeMap<String, FormatArg>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        serialize_non_strings: Option<bool>,
    },
    /// A random date/time, optionally bounded and formatted. Bounds are
    /// RFC 3339 strings; the default output format is RFC 3339.
    #[serde(rename_all = "camelCase")]
    DateTime {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
}

impl StringGenerator {
    /// Convenience constructor for the `format` family.
    pub fn format(
        format: impl Into<String>,
        args: impl IntoIterator<Item = (String, FormatArg)>,
    ) -> Self {
        StringGenerator::Format {
            format: format.into(),
            args: args.into_iter().collect(),
            serialize_non_strings: None,
        }
    }

    /// An unbounded `dateTime` generator.
    pub fn date_time() -> Self {
        StringGenerator::DateTime {
            format: None,
            from: None,
            to: None,
        }
    }
}

/// A named substitution fed into a `format` generator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FormatArg {
    String(String),
    Integer(i64),
    Number(f64),
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::String(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::String(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Integer(value)
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Number(value)
    }
}
