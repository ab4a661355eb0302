use super::backend::DocumentBackend;
use crate::error::{PathmarkError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory document backend for testing.
///
/// Uses `RefCell` for interior mutability since pathmark is single-threaded,
/// which lets [`DocumentBackend`] take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<Vec<u8>>>,
    quarantined: RefCell<Vec<Vec<u8>>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `bytes`, as if saved by an earlier run.
    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        let backend = Self::new();
        *backend.document.borrow_mut() = Some(bytes.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The currently stored document, if any.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.document.borrow().clone()
    }

    /// Documents set aside by [`DocumentBackend::quarantine`], oldest first.
    pub fn quarantined(&self) -> Vec<Vec<u8>> {
        self.quarantined.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl DocumentBackend for MemBackend {
    fn read_document(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.document.borrow().clone())
    }

    fn write_document(&self, bytes: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PathmarkError::Io(std::io::Error::other(
                "Simulated write error",
            )));
        }
        *self.document.borrow_mut() = Some(bytes.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>> {
        match self.document.borrow_mut().take() {
            Some(bytes) => {
                let mut quarantined = self.quarantined.borrow_mut();
                quarantined.push(bytes);
                Ok(Some(PathBuf::from(format!(
                    "memory://data.json.corrupt-{}",
                    quarantined.len()
                ))))
            }
            None => Ok(None),
        }
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://data.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let backend = MemBackend::new();
        assert_eq!(backend.read_document().unwrap(), None);
        backend.write_document(b"{}").unwrap();
        assert_eq!(backend.read_document().unwrap(), Some(b"{}".to_vec()));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn simulated_write_error_keeps_previous_document() {
        let backend = MemBackend::with_document("old");
        backend.set_simulate_write_error(true);
        assert!(backend.write_document(b"new").is_err());
        assert_eq!(backend.document(), Some(b"old".to_vec()));
    }

    #[test]
    fn quarantine_moves_document_aside() {
        let backend = MemBackend::with_document("garbage");
        let moved = backend.quarantine().unwrap();
        assert!(moved.is_some());
        assert_eq!(backend.document(), None);
        assert_eq!(backend.quarantined(), vec![b"garbage".to_vec()]);
        assert_eq!(backend.quarantine().unwrap(), None);
    }
}
