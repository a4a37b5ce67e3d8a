use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{AttributeValues, ToolKind};

/// One selectable option of an enumerable attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeOption {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub is_default: bool,
}

/// An inner attribute definition of a label: free text or an enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum AttributeDef {
    #[serde(rename = "string", rename_all = "camelCase")]
    String {
        key: String,
        value: String,
        #[serde(default)]
        default_value: String,
    },

    #[serde(rename = "enum")]
    Enum {
        key: String,
        value: String,
        options: Vec<AttributeOption>,
    },
}

impl AttributeDef {
    pub fn value(&self) -> &str {
        match self {
            AttributeDef::String { value, .. } | AttributeDef::Enum { value, .. } => value,
        }
    }
}

/// A labeling schema entry: the label itself plus the attribute form the
/// annotator fills in once an annotation carries this label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelConfig {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

impl LabelConfig {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            color: None,
            attributes: Vec::new(),
        }
    }
}

/// Per-tool configuration: the labels this tool can assign.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    #[serde(default)]
    pub attributes: Vec<LabelConfig>,
}

/// Editor-wide tool configuration, one optional section per tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(default)]
    pub tag: Option<ToolConfig>,
    #[serde(default)]
    pub text: Option<ToolConfig>,
    #[serde(default)]
    pub frame: Option<ToolConfig>,
    #[serde(default)]
    pub segment: Option<ToolConfig>,
}

/// tool -> label value -> label config, precomputed for O(1) lookup when an
/// annotation is selected.
pub type LabelMapping = HashMap<ToolKind, HashMap<String, LabelConfig>>;

impl EditorConfig {
    pub fn tool(&self, kind: ToolKind) -> Option<&ToolConfig> {
        match kind {
            ToolKind::Tag => self.tag.as_ref(),
            ToolKind::Text => self.text.as_ref(),
            ToolKind::Frame => self.frame.as_ref(),
            ToolKind::Segment => self.segment.as_ref(),
        }
    }

    /// Labels configured for a tool, in configuration order.
    pub fn labels_for(&self, kind: ToolKind) -> &[LabelConfig] {
        self.tool(kind).map(|t| t.attributes.as_slice()).unwrap_or(&[])
    }

    pub fn label_mapping(&self) -> LabelMapping {
        let mut mapping = LabelMapping::new();
        for kind in [ToolKind::Tag, ToolKind::Text, ToolKind::Frame, ToolKind::Segment] {
            let by_value = self
                .labels_for(kind)
                .iter()
                .map(|label| (label.value.clone(), label.clone()))
                .collect();
            mapping.insert(kind, by_value);
        }
        mapping
    }
}

/// Fill an attribute-value map from the schema defaults: text attributes get
/// their default string, enumerations the values of options flagged default.
pub fn default_attribute_values(attributes: &[AttributeDef]) -> AttributeValues {
    let mut values = AttributeValues::new();
    for def in attributes {
        match def {
            AttributeDef::String {
                value,
                default_value,
                ..
            } => {
                values.insert(
                    value.clone(),
                    serde_json::Value::String(default_value.clone()),
                );
            }
            AttributeDef::Enum { value, options, .. } => {
                let defaults: Vec<serde_json::Value> = options
                    .iter()
                    .filter(|o| o.is_default)
                    .map(|o| serde_json::Value::String(o.value.clone()))
                    .collect();
                values.insert(value.clone(), serde_json::Value::Array(defaults));
            }
        }
    }
    values
}
