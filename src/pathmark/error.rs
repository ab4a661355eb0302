use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathmarkError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Parent node not found: {0}")]
    ParentNotFound(String),

    #[error("Item {item} belongs to missing node {parent}")]
    ItemParentNotFound { item: String, parent: String },

    #[error("The root node cannot be removed")]
    CannotRemoveRoot,

    #[error("The root node cannot be moved")]
    CannotMoveRoot,

    #[error("Cannot move node {node} under {target}: target is the node itself or one of its descendants")]
    CyclicMove { node: String, target: String },

    #[error("Unknown item field: {0} (expected name, path or comment)")]
    UnknownField(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PathmarkError>;
