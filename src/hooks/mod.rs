//! Idempotent install/remove of our hook groups in an agent's settings file.
//!
//! A [`HookTarget`] bundles one agent's catalog with the file it lives in.
//! Every operation is a single load, transform, save cycle.
pub mod catalog;
pub mod detect;
pub mod merge;

use crate::core::error::Result;
use crate::core::settings::SettingsStore;
use catalog::HookCatalog;
use detect::EventState;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The settings file was written. `added` lists events that gained our
    /// group; the rest already had it.
    Installed {
        added: Vec<&'static str>,
        already_present: Vec<&'static str>,
    },
    /// The agent's config directory does not exist; nothing was written.
    AgentNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    NoSettingsFile,
    NoHooksSection,
    /// `removed` lists events that lost a group. The file is rewritten only
    /// when pruning changed something.
    Removed { removed: Vec<&'static str> },
}

#[derive(Debug, Clone)]
pub struct HookTarget {
    name: &'static str,
    catalog: HookCatalog,
    store: SettingsStore,
    require_agent_dir: bool,
}

impl HookTarget {
    pub fn new(name: &'static str, catalog: HookCatalog, store: SettingsStore) -> Self {
        HookTarget {
            name,
            catalog,
            store,
            require_agent_dir: false,
        }
    }

    /// Only install when the settings directory already exists, i.e. the
    /// agent is actually present on this machine.
    pub fn require_agent_dir(mut self) -> Self {
        self.require_agent_dir = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn catalog(&self) -> &HookCatalog {
        &self.catalog
    }

    pub fn settings_path(&self) -> &Path {
        self.store.path()
    }

    fn agent_present(&self) -> bool {
        !self.require_agent_dir || self.store.path().parent().is_some_and(|p| p.is_dir())
    }

    pub fn setup(&self) -> Result<SetupOutcome> {
        if !self.agent_present() {
            tracing::debug!("{}: {} missing, skipping", self.name, self.store.path().display());
            return Ok(SetupOutcome::AgentNotFound);
        }

        self.store.ensure_directory()?;
        let doc = self.store.load();

        let signature = self.catalog.signature();
        let (already_present, added): (Vec<&'static str>, Vec<&'static str>) = self
            .catalog
            .events()
            .partition(|event| doc.event(event).is_some_and(|v| detect::has_ours(v, signature)));

        let merged = merge::merge(doc, &self.catalog);
        self.store.save(&merged)?;

        tracing::debug!(
            "{}: added {} event(s), {} already present",
            self.name,
            added.len(),
            already_present.len()
        );
        Ok(SetupOutcome::Installed {
            added,
            already_present,
        })
    }

    /// Remove our groups. Fails (without writing) if the file exists but
    /// cannot be parsed, and leaves the file untouched when there is nothing
    /// to remove.
    pub fn remove(&self) -> Result<RemoveOutcome> {
        let Some(doc) = self.store.load_existing()? else {
            return Ok(RemoveOutcome::NoSettingsFile);
        };
        if doc.hooks.is_none() {
            return Ok(RemoveOutcome::NoHooksSection);
        }

        let signature = self.catalog.signature();
        let removed: Vec<&'static str> = self
            .catalog
            .events()
            .filter(|event| {
                doc.event(event)
                    .and_then(|v| v.as_array())
                    .is_some_and(|groups| groups.iter().any(|g| detect::is_ours(g, signature)))
            })
            .collect();

        let pruned = merge::prune(doc.clone(), &self.catalog);
        if pruned == doc {
            tracing::debug!("{}: nothing to remove", self.name);
        } else {
            self.store.save(&pruned)?;
        }
        Ok(RemoveOutcome::Removed { removed })
    }

    /// True when any catalog event has a key in the hooks section. Whose
    /// entry it is doesn't matter here; this only gates the first-run prompt.
    pub fn is_configured(&self) -> bool {
        match self.store.load_existing() {
            Ok(Some(doc)) => doc
                .hooks
                .as_ref()
                .is_some_and(|hooks| self.catalog.events().any(|e| hooks.contains_event(e))),
            Ok(None) => false,
            Err(e) => {
                tracing::debug!("{}: {}", self.name, e);
                false
            }
        }
    }

    /// Per-event view of the settings file. `None` when the file is absent.
    /// Every event reads as malformed when `hooks` is not an object.
    pub fn status(&self) -> Result<Option<Vec<(&'static str, EventState)>>> {
        let Some(doc) = self.store.load_existing()? else {
            return Ok(None);
        };
        if doc.raw_hooks().is_some() {
            return Ok(Some(
                self.catalog
                    .events()
                    .map(|event| (event, EventState::Malformed))
                    .collect(),
            ));
        }
        let signature = self.catalog.signature();
        Ok(Some(
            self.catalog
                .events()
                .map(|event| (event, detect::classify(doc.event(event), signature)))
                .collect(),
        ))
    }
}
