//! Icon configuration loading.
//!
//! The configuration is a hierarchical JSON object. Keys starting with `__`
//! are grouping namespaces: purely organizational, recursed into and joined
//! onto the group path used for sort order. All other keys are icon
//! identifiers:
//!
//! ```json
//! {
//!   "tree": { "name": "Tree", "unicode": ["🌳"] },
//!   "__nature": {
//!     "bush": { "name": "Bush", "keywords": ["shrub"] },
//!     "forest": {
//!       "name": "Forest",
//!       "shapes": [
//!         { "id": "tree", "offset": [-4.0, 0.0] },
//!         { "id": "tree", "offset": [4.0, 0.0], "flip_horizontally": true }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! An entry without a `shapes` list stands for a single shape with the
//! icon's own identifier. Parsing first splits the tree into explicit group
//! and icon nodes, then flattens, so the `__` convention is handled in exactly
//! one place.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::icon::{IconSpecification, ShapeSpecification, parse_color};

/// Group path assigned to icons at the top level of the configuration.
const ROOT_GROUP: &str = "root";

// ============================================================================
// Entry types
// ============================================================================

/// Canonical direction of a directed icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

/// One shape reference inside an icon entry or a combination.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeReference {
    pub id: String,

    pub version: Option<String>,

    #[serde(default)]
    pub offset: DVec2,

    #[serde(default)]
    pub flip_horizontally: bool,

    #[serde(default)]
    pub flip_vertically: bool,

    #[serde(default = "default_true")]
    pub use_outline: bool,

    /// Fill color as `#rrggbb`.
    pub color: Option<String>,
}

impl ShapeReference {
    fn of(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: None,
            offset: DVec2::ZERO,
            flip_horizontally: false,
            flip_vertically: false,
            use_outline: true,
            color: None,
        }
    }

    fn into_specification(self) -> Result<ShapeSpecification> {
        let mut specification = ShapeSpecification::new(self.id);
        if let Some(version) = self.version {
            specification.version = version;
        }
        specification.offset = self.offset;
        specification.flip_horizontally = self.flip_horizontally;
        specification.flip_vertically = self.flip_vertically;
        specification.use_outline = self.use_outline;
        specification.color = self.color.map(|color| parse_color(&color)).transpose()?;
        Ok(specification)
    }
}

/// Either a single string or a list; the configuration allows both for
/// emoji sets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(BTreeSet<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(BTreeSet::new())
    }
}

impl From<OneOrMany> for BTreeSet<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(single) => BTreeSet::from([single]),
            OneOrMany::Many(many) => many,
        }
    }
}

/// One icon entry as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct IconEntry {
    pub name: String,

    /// Shapes composing the icon; absent means one shape with the icon's
    /// own identifier.
    pub shapes: Option<Vec<ShapeReference>>,

    #[serde(default)]
    pub sketch: bool,

    #[serde(default)]
    pub is_part: bool,

    #[serde(default)]
    pub unicode: OneOrMany,

    #[serde(default)]
    pub keywords: BTreeSet<String>,

    #[serde(default)]
    pub categories: BTreeSet<String>,

    pub directed: Option<Direction>,
}

// ============================================================================
// Tree parsing
// ============================================================================

/// A parsed configuration node: grouping namespace or icon entry.
#[derive(Debug)]
enum ConfigNode {
    Group(Vec<(String, ConfigNode)>),
    Icon(Box<IconEntry>),
}

fn parse_node(key: &str, value: &Value) -> Result<ConfigNode> {
    if key.starts_with("__") {
        let Value::Object(members) = value else {
            return Err(Error::Config {
                message: format!("group `{key}` must be an object"),
            });
        };
        let children = members
            .iter()
            .map(|(child_key, child_value)| {
                Ok((child_key.clone(), parse_node(child_key, child_value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ConfigNode::Group(children))
    } else {
        let entry: IconEntry = serde_json::from_value(value.clone()).map_err(|error| {
            Error::Config {
                message: format!("icon `{key}`: {error}"),
            }
        })?;
        Ok(ConfigNode::Icon(Box::new(entry)))
    }
}

fn flatten(
    nodes: Vec<(String, ConfigNode)>,
    group: &str,
    out: &mut Vec<IconSpecification>,
) -> Result<()> {
    for (key, node) in nodes {
        match node {
            ConfigNode::Group(children) => {
                let subgroup = format!("{group}_{}", key.trim_start_matches('_'));
                flatten(children, &subgroup, out)?;
            }
            ConfigNode::Icon(entry) => out.push(build_icon(&key, group, *entry)?),
        }
    }
    Ok(())
}

fn build_icon(icon_id: &str, group: &str, entry: IconEntry) -> Result<IconSpecification> {
    let mut icon = IconSpecification::new(icon_id, entry.name);
    icon.group = group.to_string();
    icon.sketch = entry.sketch;
    icon.is_part = entry.is_part;
    icon.unicode = entry.unicode.into();
    icon.keywords = entry.keywords;
    icon.categories = entry.categories;
    icon.is_right_directed = entry
        .directed
        .map(|direction| direction == Direction::Right);

    let references = entry
        .shapes
        .unwrap_or_else(|| vec![ShapeReference::of(icon_id)]);
    for reference in references {
        icon.shape_specifications
            .push(reference.into_specification()?);
    }
    Ok(icon)
}

// ============================================================================
// Entry points
// ============================================================================

/// Parses icon specifications from configuration text.
///
/// Icons appear in file order; sorting is the collection's concern.
pub fn icon_specifications_from_str(text: &str) -> Result<Vec<IconSpecification>> {
    let root: Value = serde_json::from_str(text)?;
    let Value::Object(members) = &root else {
        return Err(Error::Config {
            message: "configuration root must be an object".to_string(),
        });
    };
    let nodes = members
        .iter()
        .map(|(key, value)| Ok((key.clone(), parse_node(key, value)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut icons = Vec::new();
    flatten(nodes, ROOT_GROUP, &mut icons)?;
    Ok(icons)
}

/// Loads icon specifications from a configuration file.
pub fn load_icon_specifications(path: &Path) -> Result<Vec<IconSpecification>> {
    icon_specifications_from_str(&fs::read_to_string(path)?)
}

/// Parses the combinations file: a list of shape-overlay lists, each
/// producing one synthetic icon.
pub fn combinations_from_str(text: &str) -> Result<Vec<Vec<ShapeSpecification>>> {
    let combinations: Vec<Vec<ShapeReference>> = serde_json::from_str(text)?;
    combinations
        .into_iter()
        .map(|references| {
            references
                .into_iter()
                .map(ShapeReference::into_specification)
                .collect()
        })
        .collect()
}

/// Loads the combinations file.
pub fn load_combinations(path: &Path) -> Result<Vec<Vec<ShapeSpecification>>> {
    combinations_from_str(&fs::read_to_string(path)?)
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Tests
// ============================================================================
