//! # API Facade
//!
//! [`PathmarkApi`] owns the loaded [`HierarchicalStore`], the backend it came
//! from and the active [`PathmarkConfig`]. Front-ends call one method per
//! user action and get a [`CmdResult`] back.
//!
//! ## Opening
//!
//! [`PathmarkApi::open`] turns whatever the backend holds into a usable store:
//!
//! - no document: the starter categories are created and saved right away
//! - unreadable document: it is moved aside and an empty store takes its place
//! - inconsistent document: repaired when `auto_repair` is on
//!
//! Anything the user should hear about is collected in
//! [`PathmarkApi::startup_messages`].
//!
//! ## Saving
//!
//! Mutating methods mark the store dirty; nothing is written until
//! [`PathmarkApi::save`] is called.

use crate::commands::{self, CmdMessage, CmdResult};
use crate::config::PathmarkConfig;
use crate::error::{PathmarkError, Result};
use crate::model::ItemRecord;
use crate::store::backend::DocumentBackend;
use crate::store::HierarchicalStore;
use tracing::{debug, info, warn};

pub struct PathmarkApi<B: DocumentBackend> {
    store: HierarchicalStore,
    backend: B,
    config: PathmarkConfig,
    dirty: bool,
    startup: Vec<CmdMessage>,
}

impl<B: DocumentBackend> PathmarkApi<B> {
    pub fn open(backend: B, config: PathmarkConfig) -> Result<Self> {
        let location = backend.location();
        let mut startup = Vec::new();
        let mut seeded = false;

        let store = match backend.read_document()? {
            None => {
                info!(path = %location.display(), "no document found, seeding defaults");
                seeded = true;
                commands::init::default_store()?
            }
            Some(bytes) => match HierarchicalStore::load(&bytes) {
                Ok(store) => store,
                Err(PathmarkError::MalformedDocument(reason)) => {
                    warn!(path = %location.display(), %reason, "document is unreadable");
                    let moved = backend.quarantine()?;
                    let moved = moved
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "nowhere".to_string());
                    startup.push(CmdMessage::warning(format!(
                        "Could not read {} ({}). Moved it to {} and started with an empty store.",
                        location.display(),
                        reason,
                        moved
                    )));
                    HierarchicalStore::new_empty()
                }
                Err(e) => return Err(e),
            },
        };

        let mut api = Self {
            store,
            backend,
            config,
            dirty: false,
            startup,
        };

        if api.config.auto_repair && !api.store.check_integrity() {
            let report = api.store.repair();
            for line in report.lines() {
                info!(action = %line, "repaired document");
            }
            api.startup.push(CmdMessage::warning(format!(
                "Repaired {} problem(s) in {}:",
                report.len(),
                location.display()
            )));
            api.startup
                .extend(report.lines().into_iter().map(|l| CmdMessage::info(format!("  - {}", l))));
            api.dirty = true;
        }

        if seeded {
            api.save()?;
        }
        debug!(
            nodes = api.store.node_count(),
            items = api.store.item_count(),
            "store ready"
        );
        Ok(api)
    }

    pub fn store(&self) -> &HierarchicalStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &PathmarkConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Messages produced while opening (quarantine, auto-repair).
    pub fn startup_messages(&self) -> &[CmdMessage] {
        &self.startup
    }

    pub fn save(&mut self) -> Result<()> {
        let bytes = self.store.save_with_indent(self.config.indent)?;
        self.backend.write_document(&bytes)?;
        self.dirty = false;
        debug!(path = %self.backend.location().display(), "saved document");
        Ok(())
    }

    fn mutate<F>(&mut self, op: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut HierarchicalStore) -> Result<CmdResult>,
    {
        let result = op(&mut self.store)?;
        self.dirty = true;
        Ok(result)
    }

    pub fn init(&mut self) -> Result<CmdResult> {
        let result = commands::init::run(&mut self.store)?;
        if !result.created_ids.is_empty() {
            self.dirty = true;
        }
        Ok(result)
    }

    pub fn tree(&self) -> Result<CmdResult> {
        commands::list::tree(&self.store)
    }

    pub fn list_items(&self, node: &str) -> Result<CmdResult> {
        commands::list::items(&self.store, node)
    }

    pub fn show_item(&self, item: &str) -> Result<CmdResult> {
        commands::item::show(&self.store, item)
    }

    pub fn search(&self, term: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, term)
    }

    pub fn add_node(&mut self, name: &str, parent: &str) -> Result<CmdResult> {
        self.mutate(|store| commands::node::add(store, name, parent))
    }

    pub fn rename_node(&mut self, node: &str, new_name: &str) -> Result<CmdResult> {
        self.mutate(|store| commands::node::rename(store, node, new_name))
    }

    pub fn remove_node(&mut self, node: &str) -> Result<CmdResult> {
        self.mutate(|store| commands::node::remove(store, node))
    }

    pub fn reorder_node(&mut self, node: &str, index: isize) -> Result<CmdResult> {
        self.mutate(|store| commands::node::reorder(store, node, index))
    }

    pub fn move_node(
        &mut self,
        node: &str,
        new_parent: &str,
        index: Option<isize>,
    ) -> Result<CmdResult> {
        self.mutate(|store| commands::node::move_to(store, node, new_parent, index))
    }

    pub fn add_item(&mut self, node: &str, record: ItemRecord) -> Result<CmdResult> {
        self.mutate(|store| commands::item::add(store, node, record))
    }

    pub fn add_paths<S: AsRef<str>>(&mut self, node: &str, paths: &[S]) -> Result<CmdResult> {
        self.mutate(|store| commands::item::add_paths(store, node, paths))
    }

    pub fn update_item<S: AsRef<str>>(
        &mut self,
        item: &str,
        assignments: &[S],
    ) -> Result<CmdResult> {
        self.mutate(|store| commands::item::update(store, item, assignments))
    }

    pub fn remove_item(&mut self, item: &str) -> Result<CmdResult> {
        self.mutate(|store| commands::item::remove(store, item))
    }

    pub fn reorder_item(&mut self, item: &str, index: isize) -> Result<CmdResult> {
        self.mutate(|store| commands::item::reorder(store, item, index))
    }

    pub fn move_item(&mut self, item: &str, node: &str, index: Option<isize>) -> Result<CmdResult> {
        self.mutate(|store| commands::item::move_to(store, item, node, index))
    }

    pub fn doctor(&mut self, check_only: bool) -> Result<CmdResult> {
        let result = commands::doctor::run(&mut self.store, check_only)?;
        if result.repair.as_ref().is_some_and(|r| !r.is_clean()) {
            self.dirty = true;
        }
        Ok(result)
    }
}
