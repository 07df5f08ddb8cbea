use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Post-processing applied to a node's generated output, in declaration
/// order. Transforms are pure data here; the behavior lives in the engine.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Transform {
    Filter(FilterTransform),
    RegexFilter(RegexFilter),
    /// Drops null entries from the generated array or object.
    FilterNonNull,
    ToString(ToStringTransform),
    ToUpperCase(StringCaseTransform),
    ToLowerCase(StringCaseTransform),
    Sort(SortTransform),
    Plugin(PluginTransform),
}

impl Transform {
    pub fn filter(operator: FilterOperator, other: Value) -> Self {
        Transform::Filter(FilterTransform { operator, other })
    }

    pub fn filter_non_null() -> Self {
        Transform::FilterNonNull
    }

    pub fn regex_filter(pattern: impl Into<String>) -> Self {
        Transform::RegexFilter(RegexFilter {
            pattern: pattern.into(),
            serialize_non_strings: None,
        })
    }

    /// Sorts by natural order of the values themselves.
    pub fn sort() -> Self {
        Transform::Sort(SortTransform {
            by: None,
            reverse: None,
        })
    }

    /// Sorts object entries by the named key.
    pub fn sort_by(by: impl Into<String>) -> Self {
        Transform::Sort(SortTransform {
            by: Some(by.into()),
            reverse: None,
        })
    }

    pub fn to_upper_case() -> Self {
        Transform::ToUpperCase(StringCaseTransform::default())
    }

    pub fn to_lower_case() -> Self {
        Transform::ToLowerCase(StringCaseTransform::default())
    }

    /// Default rendering via JSON serialization.
    pub fn to_string_default() -> Self {
        Transform::ToString(ToStringTransform::Default)
    }

    /// Rendering through a named-argument template.
    pub fn to_string_format(format: impl Into<String>) -> Self {
        Transform::ToString(ToStringTransform::Format {
            format: format.into(),
            serialize_non_strings: None,
        })
    }

    pub fn plugin(name: impl Into<String>, args: Option<Value>) -> Self {
        Transform::Plugin(PluginTransform {
            name: name.into(),
            args,
        })
    }
}

/// Keeps values matching a comparison; non-matching values become null.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterTransform {
    pub operator: FilterOperator,
    /// The value compared against.
    pub other: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegexFilter {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialize_non_strings: Option<bool>,
}

/// Shared payload of `toUpperCase` and `toLowerCase`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringCaseTransform {
    /// Whether non-string values are stringified first instead of failing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialize_non_strings: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "subType", rename_all = "camelCase")]
pub enum ToStringTransform {
    Default,
    #[serde(rename_all = "camelCase")]
    Format {
        format: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        serialize_non_strings: Option<bool>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl SortTransform {
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginTransform {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
}
