use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::StringGenerator;
use crate::transform::Transform;

/// One node in a generation request.
///
/// The `type` field on the wire is the variant tag; fields that are not
/// meaningful for a variant are never emitted, so the engine's strict parser
/// accepts every document this model produces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Schema {
    Object(ObjectSchema),
    Array(Box<ArraySchema>),
    Integer(IntegerSchema),
    Number(NumberSchema),
    String(StringSchema),
    Bool(BoolSchema),
    Counter(CounterSchema),
    AnyOf(AnyOfSchema),
    Flatten(FlattenSchema),
    Plugin(PluginSchema),
    File(FileSchema),
    Null(NullSchema),
}

impl Schema {
    /// A node that always generates the wire `null` value.
    pub fn null() -> Self {
        Schema::Null(NullSchema::default())
    }

    /// Appends a transform to whatever node this is, preserving order.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms_mut().push(transform);
        self
    }

    fn transforms_mut(&mut self) -> &mut Vec<Transform> {
        match self {
            Schema::Object(node) => &mut node.transform,
            Schema::Array(node) => &mut node.transform,
            Schema::Integer(node) => node.transforms_mut(),
            Schema::Number(node) => node.transforms_mut(),
            Schema::String(node) => node.transforms_mut(),
            Schema::Bool(node) => node.transforms_mut(),
            Schema::Counter(node) => &mut node.transform,
            Schema::AnyOf(node) => &mut node.transform,
            Schema::Flatten(node) => &mut node.transform,
            Schema::Plugin(node) => &mut node.transform,
            Schema::File(node) => &mut node.transform,
            Schema::Null(node) => &mut node.transform,
        }
    }
}

/// Mapping from property name to nested node, in declaration order.
///
/// A property mapped to `None` deliberately serializes as wire `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, Option<Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property. Insertion order is kept on the wire.
    pub fn property(mut self, name: impl Into<String>, node: impl Into<Schema>) -> Self {
        self.properties.insert(name.into(), Some(node.into()));
        self
    }

    /// Adds a property whose value is the wire `null` literal.
    pub fn null_property(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), None);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Element count of a generated array: a fixed count or an inclusive range.
///
/// The two forms are separate variants, so a node can never carry both; the
/// array setters replace the whole value, making the most recent call win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ArrayLength {
    Fixed { value: u32 },
    Range { min: u32, max: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArraySchema {
    pub length: ArrayLength,
    pub items: Schema,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl ArraySchema {
    /// A single-element array; follow up with `fixed_length` or
    /// `random_length` to size it.
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            length: ArrayLength::Fixed { value: 1 },
            items: items.into(),
            transform: Vec::new(),
        }
    }

    pub fn fixed_length(mut self, value: u32) -> Self {
        self.length = ArrayLength::Fixed { value };
        self
    }

    pub fn random_length(mut self, min: u32, max: u32) -> Self {
        self.length = ArrayLength::Range { min, max };
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// A literal integer or a uniformly random one within optional bounds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IntegerSchema {
    Constant {
        value: i64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
}

impl IntegerSchema {
    pub fn constant(value: i64) -> Self {
        IntegerSchema::Constant {
            value,
            transform: Vec::new(),
        }
    }

    pub fn range(min: i64, max: i64) -> Self {
        IntegerSchema::Range {
            min: Some(min),
            max: Some(max),
            transform: Vec::new(),
        }
    }

    /// Switches to a literal value, discarding any range bounds.
    pub fn value(mut self, value: i64) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        IntegerSchema::Constant { value, transform }
    }

    /// Sets the lower bound, discarding a literal value if one was set.
    pub fn min(self, min: i64) -> Self {
        let (max, transform) = match self {
            IntegerSchema::Range { max, transform, .. } => (max, transform),
            IntegerSchema::Constant { transform, .. } => (None, transform),
        };
        IntegerSchema::Range {
            min: Some(min),
            max,
            transform,
        }
    }

    /// Sets the upper bound, discarding a literal value if one was set.
    pub fn max(self, max: i64) -> Self {
        let (min, transform) = match self {
            IntegerSchema::Range { min, transform, .. } => (min, transform),
            IntegerSchema::Constant { transform, .. } => (None, transform),
        };
        IntegerSchema::Range {
            min,
            max: Some(max),
            transform,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms_mut().push(transform);
        self
    }

    fn into_bounds(self) -> (Option<i64>, Vec<Transform>) {
        match self {
            IntegerSchema::Range { max, transform, .. } => (max, transform),
            IntegerSchema::Constant { transform, .. } => (None, transform),
        }
    }

    fn transforms_mut(&mut self) -> &mut Vec<Transform> {
        match self {
            IntegerSchema::Constant { transform, .. } => transform,
            IntegerSchema::Range { transform, .. } => transform,
        }
    }
}

/// A literal float or a uniformly random one within optional bounds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumberSchema {
    Constant {
        value: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
}

impl NumberSchema {
    pub fn constant(value: f64) -> Self {
        NumberSchema::Constant {
            value,
            transform: Vec::new(),
        }
    }

    pub fn range(min: f64, max: f64) -> Self {
        NumberSchema::Range {
            min: Some(min),
            max: Some(max),
            transform: Vec::new(),
        }
    }

    pub fn value(mut self, value: f64) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        NumberSchema::Constant { value, transform }
    }

    pub fn min(self, min: f64) -> Self {
        let (max, transform) = match self {
            NumberSchema::Range { max, transform, .. } => (max, transform),
            NumberSchema::Constant { transform, .. } => (None, transform),
        };
        NumberSchema::Range {
            min: Some(min),
            max,
            transform,
        }
    }

    pub fn max(self, max: f64) -> Self {
        let (min, transform) = match self {
            NumberSchema::Range { min, transform, .. } => (min, transform),
            NumberSchema::Constant { transform, .. } => (None, transform),
        };
        NumberSchema::Range {
            min,
            max: Some(max),
            transform,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms_mut().push(transform);
        self
    }

    fn transforms_mut(&mut self) -> &mut Vec<Transform> {
        match self {
            NumberSchema::Constant { transform, .. } => transform,
            NumberSchema::Range { transform, .. } => transform,
        }
    }
}

/// A literal string or one produced by a named generator family.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum StringSchema {
    Constant {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
    Generated {
        generator: StringGenerator,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
}

impl StringSchema {
    pub fn constant(value: impl Into<String>) -> Self {
        StringSchema::Constant {
            value: value.into(),
            transform: Vec::new(),
        }
    }

    pub fn generated(generator: StringGenerator) -> Self {
        StringSchema::Generated {
            generator,
            transform: Vec::new(),
        }
    }

    /// Switches to a literal value, discarding a generator if one was set.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        StringSchema::Constant {
            value: value.into(),
            transform,
        }
    }

    /// Switches to a generator, discarding a literal value if one was set.
    pub fn generator(mut self, generator: StringGenerator) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        StringSchema::Generated {
            generator,
            transform,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms_mut().push(transform);
        self
    }

    fn transforms_mut(&mut self) -> &mut Vec<Transform> {
        match self {
            StringSchema::Constant { transform, .. } => transform,
            StringSchema::Generated { transform, .. } => transform,
        }
    }
}

/// A literal boolean or a weighted coin flip.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BoolSchema {
    Constant {
        value: bool,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
    Random {
        /// Chance of generating `true`, between 0.0 and 1.0. The engine
        /// defaults to 0.5 when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        probability: Option<f64>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        transform: Vec<Transform>,
    },
}

impl BoolSchema {
    pub fn constant(value: bool) -> Self {
        BoolSchema::Constant {
            value,
            transform: Vec::new(),
        }
    }

    pub fn random() -> Self {
        BoolSchema::Random {
            probability: None,
            transform: Vec::new(),
        }
    }

    pub fn value(mut self, value: bool) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        BoolSchema::Constant { value, transform }
    }

    pub fn probability(mut self, probability: f64) -> Self {
        let transform = std::mem::take(self.transforms_mut());
        BoolSchema::Random {
            probability: Some(probability),
            transform,
        }
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transforms_mut().push(transform);
        self
    }

    fn transforms_mut(&mut self) -> &mut Vec<Transform> {
        match self {
            BoolSchema::Constant { transform, .. } => transform,
            BoolSchema::Random { transform, .. } => transform,
        }
    }
}

/// A monotonically increasing integer sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CounterSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
    /// When true, each structural path gets an independent counter instead
    /// of the document-wide one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_specific: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl CounterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn stop(mut self, stop: i64) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn path_specific(mut self, path_specific: bool) -> Self {
        self.path_specific = Some(path_specific);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Chooses among candidate nodes per generation; selection policy belongs
/// to the engine. `values` must not be empty, which the engine enforces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnyOfSchema {
    pub values: Vec<Schema>,
    /// How many candidates to pick; more than one yields an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_null: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl AnyOfSchema {
    pub fn new(values: Vec<Schema>) -> Self {
        Self {
            values,
            num: None,
            allow_null: None,
            transform: Vec::new(),
        }
    }

    pub fn value(mut self, node: impl Into<Schema>) -> Self {
        self.values.push(node.into());
        self
    }

    pub fn num(mut self, num: i64) -> Self {
        self.num = Some(num);
        self
    }

    pub fn allow_null(mut self, allow_null: bool) -> Self {
        self.allow_null = Some(allow_null);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Generates each value in order and merges the results into a single
/// collection at the enclosing position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlattenSchema {
    pub values: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_null: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl FlattenSchema {
    pub fn new(values: Vec<Schema>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn value(mut self, node: impl Into<Schema>) -> Self {
        self.values.push(node.into());
        self
    }

    pub fn remove_null(mut self, remove_null: bool) -> Self {
        self.remove_null = Some(remove_null);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Delegates generation to an engine-side extension.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PluginSchema {
    pub plugin_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl PluginSchema {
    pub fn new(plugin_name: impl Into<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            args: None,
            transform: Vec::new(),
        }
    }

    pub fn args(mut self, args: Value) -> Self {
        self.args = Some(args);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Sources values from a JSON file on the engine host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSchema {
    pub path: String,
    /// Engine default is sequential when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FileMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FileMode {
    #[default]
    Sequential,
    Random,
}

impl FileSchema {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: None,
            transform: Vec::new(),
        }
    }

    pub fn mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform.push(transform);
        self
    }
}

/// Always generates the wire `null` value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NullSchema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transform: Vec<Transform>,
}

impl From<ObjectSchema> for Schema {
    fn from(node: ObjectSchema) -> Self {
        Schema::Object(node)
    }
}

impl From<ArraySchema> for Schema {
    fn from(node: ArraySchema) -> Self {
        Schema::Array(Box::new(node))
    }
}

impl From<IntegerSchema> for Schema {
    fn from(node: IntegerSchema) -> Self {
        Schema::Integer(node)
    }
}

impl From<NumberSchema> for Schema {
    fn from(node: NumberSchema) -> Self {
        Schema::Number(node)
    }
}

impl From<StringSchema> for Schema {
    fn from(node: StringSchema) -> Self {
        Schema::String(node)
    }
}

impl From<BoolSchema> for Schema {
    fn from(node: BoolSchema) -> Self {
        Schema::Bool(node)
    }
}

impl From<CounterSchema> for Schema {
    fn from(node: CounterSchema) -> Self {
        Schema::Counter(node)
    }
}

impl From<AnyOfSchema> for Schema {
    fn from(node: AnyOfSchema) -> Self {
        Schema::AnyOf(node)
    }
}

impl From<FlattenSchema> for Schema {
    fn from(node: FlattenSchema) -> Self {
        Schema::Flatten(node)
    }
}

impl From<PluginSchema> for Schema {
    fn from(node: PluginSchema) -> Self {
        Schema::Plugin(node)
    }
}

impl From<FileSchema> for Schema {
    fn from(node: FileSchema) -> Self {
        Schema::File(node)
    }
}

impl From<NullSchema> for Schema {
    fn from(node: NullSchema) -> Self {
        Schema::Null(node)
    }
}
