use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw document I/O.
///
/// The backend only moves bytes. Parsing, integrity and repair belong to
/// [`HierarchicalStore`](super::HierarchicalStore); deciding when to load
/// and save belongs to the API facade.
pub trait DocumentBackend {
    /// Read the persisted document.
    /// Returns Ok(None) when nothing has been saved yet.
    fn read_document(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the persisted document.
    /// MUST be atomic (e.g. write to tmp then rename): the previous document
    /// stays valid until the new one is completely written.
    fn write_document(&self, bytes: &[u8]) -> Result<()>;

    /// Move an unreadable document out of the way so the next save does not
    /// overwrite it. Returns where it went, or None if there was nothing to move.
    fn quarantine(&self) -> Result<Option<PathBuf>>;

    /// Where the document lives. Virtual for in-memory backends.
    fn location(&self) -> PathBuf;
}
