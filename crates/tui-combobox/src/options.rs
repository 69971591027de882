// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Canonical option set for the selector widget and the views derived from it.
//!
//! The model owns the declared options (direct leaves and named groups) and
//! produces the filtered view shown while the menu is open. Filtered views
//! are ephemeral: they are recomputed on every query change and never stored
//! back into the model.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// A single selectable value/label pair. `value` is the canonical identifier
/// surfaced to the surrounding form; `label` is what the user sees and types
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboOption {
    pub value: String,
    pub label: String,
}

impl ComboOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Substring test against the label or the value, ignoring case.
    /// `needle` must already be lowercased; an empty needle matches
    /// everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(needle) || self.value.to_lowercase().contains(needle)
    }
}

/// A named cluster of options shown together under a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<ComboOption>,
}

/// One top-level item of the canonical model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionNode {
    Option(ComboOption),
    Group(OptionGroup),
}

/// Replacement input for [`OptionsModel::replace`]: either an already
/// structured sequence or a JSON-encoded string of the same shape.
#[derive(Debug, Clone)]
pub enum OptionsSource {
    Nodes(Vec<OptionNode>),
    Json(String),
}

impl From<Vec<OptionNode>> for OptionsSource {
    fn from(nodes: Vec<OptionNode>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&str> for OptionsSource {
    fn from(json: &str) -> Self {
        Self::Json(json.to_string())
    }
}

impl From<String> for OptionsSource {
    fn from(json: String) -> Self {
        Self::Json(json)
    }
}

/// Errors while parsing a JSON-encoded option sequence.
#[derive(Debug, Error)]
pub enum OptionsParseError {
    #[error("options JSON is not valid: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("options JSON must be a sequence of option and group objects")]
    NotASequence,
}

// Wire shape accepted by the options setter. `isGroup` is part of the
// external JSON contract; internally the tagged enum is the discriminator.
#[derive(Debug, Deserialize)]
struct EntryDe {
    value: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct GroupDe {
    label: String,
    #[serde(rename = "isGroup")]
    #[allow(dead_code)]
    is_group: bool,
    options: Vec<EntryDe>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeDe {
    Group(GroupDe),
    Entry(EntryDe),
}

impl From<EntryDe> for ComboOption {
    fn from(entry: EntryDe) -> Self {
        Self {
            value: entry.value,
            label: entry.label,
        }
    }
}

impl From<NodeDe> for OptionNode {
    fn from(node: NodeDe) -> Self {
        match node {
            NodeDe::Entry(entry) => OptionNode::Option(entry.into()),
            NodeDe::Group(group) => OptionNode::Group(OptionGroup {
                label: group.label,
                options: group.options.into_iter().map(ComboOption::from).collect(),
            }),
        }
    }
}

/// Parse a JSON-encoded option sequence into model nodes. The top-level
/// JSON value must be an array; each element must be an option object or a
/// group object.
pub fn parse_options_json(json: &str) -> Result<Vec<OptionNode>, OptionsParseError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(OptionsParseError::NotASequence);
    }
    let nodes: Vec<NodeDe> = serde_json::from_value(value)?;
    Ok(nodes.into_iter().map(OptionNode::from).collect())
}

/// The canonical, persistent option sequence.
///
/// Mutated only by the declarative load, a wholesale [`replace`], or a
/// single-entry [`append_value`]. Everything derived from it (flattening,
/// filtered views) is recomputed from the current nodes on demand.
///
/// [`replace`]: OptionsModel::replace
/// [`append_value`]: OptionsModel::append_value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsModel {
    nodes: Vec<OptionNode>,
}

impl OptionsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarative construction; see [`OptionsModelBuilder`].
    pub fn builder() -> OptionsModelBuilder {
        OptionsModelBuilder::default()
    }

    pub fn from_nodes(nodes: Vec<OptionNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[OptionNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replace the whole sequence. A JSON source that fails to parse leaves
    /// the model untouched; the failure is logged and swallowed so bad
    /// external input cannot break the widget. Returns whether the model
    /// was replaced.
    pub fn replace(&mut self, source: impl Into<OptionsSource>) -> bool {
        match source.into() {
            OptionsSource::Nodes(nodes) => {
                self.nodes = nodes;
                true
            }
            OptionsSource::Json(json) => match parse_options_json(&json) {
                Ok(nodes) => {
                    self.nodes = nodes;
                    true
                }
                Err(err) => {
                    warn!("ignoring options replacement: {err}");
                    false
                }
            },
        }
    }

    /// Append `{value, label: value}` as a top-level leaf at the end of the
    /// sequence and return the new entry.
    pub fn append_value(&mut self, value: &str) -> ComboOption {
        let entry = ComboOption::new(value, value);
        self.nodes.push(OptionNode::Option(entry.clone()));
        entry
    }

    /// The ordered leaf entries with group boundaries ignored. Group labels
    /// are not emitted. Recomputed fresh on every call.
    pub fn flatten(&self) -> Vec<&ComboOption> {
        let mut flat = Vec::new();
        for node in &self.nodes {
            match node {
                OptionNode::Option(option) => flat.push(option),
                OptionNode::Group(group) => flat.extend(group.options.iter()),
            }
        }
        flat
    }

    /// Case-sensitive exact label lookup over the flattened sequence.
    pub fn find_by_label(&self, label: &str) -> Option<&ComboOption> {
        self.flatten().into_iter().find(|option| option.label == label)
    }

    /// Exact value lookup over the flattened sequence.
    pub fn find_by_value(&self, value: &str) -> Option<&ComboOption> {
        self.flatten().into_iter().find(|option| option.value == value)
    }

    /// Whether any leaf label equals `query` ignoring case.
    pub fn has_label_ignore_case(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.flatten().into_iter().any(|option| option.label.to_lowercase() == query)
    }

    /// Derive the view for `query`.
    ///
    /// Leaves match on a case-insensitive substring of label or value.
    /// Groups keep only their matching leaves and are dropped entirely when
    /// none match. Model order is preserved. An empty query returns the
    /// model unchanged and no create proposal. A non-empty query with no
    /// case-insensitive exact label match gets a create proposal carrying
    /// the literal query text, provided the trimmed query is non-empty.
    pub fn filter(&self, query: &str) -> FilteredView {
        if query.is_empty() {
            return FilteredView {
                nodes: self.nodes.clone(),
                create: None,
            };
        }

        let needle = query.to_lowercase();
        let mut nodes = Vec::new();
        for node in &self.nodes {
            match node {
                OptionNode::Option(option) => {
                    if option.matches(&needle) {
                        nodes.push(OptionNode::Option(option.clone()));
                    }
                }
                OptionNode::Group(group) => {
                    let matching: Vec<ComboOption> = group
                        .options
                        .iter()
                        .filter(|option| option.matches(&needle))
                        .cloned()
                        .collect();
                    if !matching.is_empty() {
                        nodes.push(OptionNode::Group(OptionGroup {
                            label: group.label.clone(),
                            options: matching,
                        }));
                    }
                }
            }
        }

        let create = if !self.has_label_ignore_case(query) && !query.trim().is_empty() {
            Some(query.to_string())
        } else {
            None
        };

        FilteredView { nodes, create }
    }
}

/// Collects declared options; [`build`] orders direct leaves before groups
/// no matter how the declarations were interleaved.
///
/// [`build`]: OptionsModelBuilder::build
#[derive(Debug, Default)]
pub struct OptionsModelBuilder {
    options: Vec<ComboOption>,
    groups: Vec<OptionGroup>,
}

impl OptionsModelBuilder {
    /// Declare a direct leaf option.
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(ComboOption::new(value, label));
        self
    }

    /// Declare a group pre-populated with its own leaf options.
    pub fn group<V, L>(
        mut self,
        label: impl Into<String>,
        options: impl IntoIterator<Item = (V, L)>,
    ) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.groups.push(OptionGroup {
            label: label.into(),
            options: options
                .into_iter()
                .map(|(value, label)| ComboOption::new(value, label))
                .collect(),
        });
        self
    }

    pub fn build(self) -> OptionsModel {
        let mut nodes: Vec<OptionNode> = self.options.into_iter().map(OptionNode::Option).collect();
        nodes.extend(self.groups.into_iter().map(OptionNode::Group));
        OptionsModel { nodes }
    }
}

/// The ephemeral result of filtering: the structure-preserving subset of
/// the model plus the optional create proposal (the literal query text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    pub nodes: Vec<OptionNode>,
    pub create: Option<String>,
}

impl FilteredView {
    /// Lower the view to display rows: one per group header, leaf, and
    /// create proposal, in order. The create row always comes last.
    pub fn rows(&self) -> Vec<ComboRow> {
        let mut rows = Vec::new();
        for node in &self.nodes {
            match node {
                OptionNode::Option(option) => rows.push(ComboRow::Option(option.clone())),
                OptionNode::Group(group) => {
                    rows.push(ComboRow::GroupLabel(group.label.clone()));
                    for option in &group.options {
                        rows.push(ComboRow::Option(option.clone()));
                    }
                }
            }
        }
        if let Some(text) = &self.create {
            rows.push(ComboRow::Create(text.clone()));
        }
        rows
    }
}

/// One rendered menu row. Group labels are headers only and never resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboRow {
    Option(ComboOption),
    GroupLabel(String),
    Create(String),
}

impl ComboRow {
    /// Whether the row can carry the highlight and resolve on activation.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, ComboRow::GroupLabel(_))
    }
}
