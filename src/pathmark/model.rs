//! # Domain Model
//!
//! Two record kinds live in the store, both addressed by opaque string ids:
//!
//! - [`Node`]: a named category. Owns an ordered list of child node ids and an
//!   ordered list of item ids. Every node except the root has exactly one parent.
//! - [`Item`]: a leaf record pointing at a file, directory, URL, FTP location or
//!   UNC share, with an optional free-text comment. Owned by exactly one node.
//!
//! Records reference each other only through ids. Callers never hold on to a
//! record; they keep ids and resolve them through the store on every access,
//! so an id that was removed simply stops resolving.
//!
//! ## Wire Shape
//!
//! The field names below are the persisted JSON names. Absent name, path and
//! comment values are written as `null`, never omitted:
//!
//! ```text
//! node: {"name": str|null, "parent_id": str|null, "items": [..], "sub_nodes": [..]}
//! item: {"name": str|null, "path": str|null, "comment": str|null, "parent_id": str}
//! ```
//!
//! Node and item ids are independent namespaces: a node and an item may share
//! an id, two nodes (or two items) never do.

use crate::error::{PathmarkError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Fixed id of the single root node.
pub const ROOT_ID: &str = "root";

/// Returns a fresh random id for which `is_taken` is false.
///
/// Ids are 32-char lowercase hex strings (a v4 UUID without dashes).
pub fn generate_id<F>(is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let candidate = Uuid::new_v4().simple().to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}

/// Accepts `null` but not a missing key, which plain `Option` fields allow.
fn present_or_null<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(deserialize_with = "present_or_null")]
    pub(crate) parent_id: Option<String>,
    #[serde(rename = "items")]
    pub(crate) item_ids: Vec<String>,
    #[serde(rename = "sub_nodes")]
    pub(crate) child_node_ids: Vec<String>,
}

impl Node {
    pub(crate) fn new(name: Option<String>, parent_id: Option<String>) -> Self {
        Self {
            name,
            parent_id,
            item_ids: Vec::new(),
            child_node_ids: Vec::new(),
        }
    }

    pub(crate) fn root() -> Self {
        Self::new(None, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn child_node_ids(&self) -> &[String] {
        &self.child_node_ids
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) path: Option<String>,
    #[serde(default)]
    pub(crate) comment: Option<String>,
    pub(crate) parent_id: String,
}

impl Item {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn kind(&self) -> PathKind {
        PathKind::classify(self.path())
    }
}

/// Input for creating an item. The name is required, path and comment are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub name: String,
    pub path: Option<String>,
    pub comment: Option<String>,
}

impl ItemRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            comment: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// The item fields that may be updated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Path,
    Comment,
}

impl FromStr for ItemField {
    type Err = PathmarkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(ItemField::Name),
            "path" => Ok(ItemField::Path),
            "comment" => Ok(ItemField::Comment),
            other => Err(PathmarkError::UnknownField(other.to_string())),
        }
    }
}

/// A partial item update. Each field is `None` when untouched and
/// `Some(value)` when provided, where `value` itself may be `None` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub name: Option<Option<String>>,
    pub path: Option<Option<String>>,
    pub comment: Option<Option<String>>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an update from string-keyed pairs.
    ///
    /// Every key is validated before the update is returned, so a single
    /// unknown key rejects the whole set.
    pub fn from_fields<I, K>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let mut update = Self::new();
        for (key, value) in fields {
            let field: ItemField = key.as_ref().parse()?;
            update.set(field, value);
        }
        Ok(update)
    }

    pub fn set(&mut self, field: ItemField, value: Option<String>) {
        match field {
            ItemField::Name => self.name = Some(value),
            ItemField::Path => self.path = Some(value),
            ItemField::Comment => self.comment = Some(value),
        }
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(Some(value.into()));
        self
    }

    pub fn path(mut self, value: impl Into<String>) -> Self {
        self.path = Some(Some(value.into()));
        self
    }

    pub fn comment(mut self, value: impl Into<String>) -> Self {
        self.comment = Some(Some(value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.path.is_none() && self.comment.is_none()
    }

    pub(crate) fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(path) = self.path {
            item.path = path;
        }
        if let Some(comment) = self.comment {
            item.comment = comment;
        }
    }
}

/// What an item's path points at, judged from its text alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathKind {
    Empty,
    Url,
    Ftp,
    Unc,
    Local,
}

impl PathKind {
    pub fn classify(path: Option<&str>) -> Self {
        match path.map(str::trim) {
            None | Some("") => PathKind::Empty,
            Some(p) if p.starts_with("http") => PathKind::Url,
            Some(p) if p.starts_with("ftp") => PathKind::Ftp,
            Some(p) if p.starts_with(r"\\") => PathKind::Unc,
            Some(_) => PathKind::Local,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PathKind::Empty => "none",
            PathKind::Url => "url",
            PathKind::Ftp => "ftp",
            PathKind::Unc => "unc",
            PathKind::Local => "local",
        }
    }
}
