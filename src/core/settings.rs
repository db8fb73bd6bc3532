//! The agent's JSON settings file: a typed envelope around a user-owned document.
//!
//! Only the `hooks` key is modelled, and only when it holds an object. Every
//! other top-level key lands in [`SettingsDocument::extra`] and is written
//! back untouched, in its original relative order (serde_json is built with
//! `preserve_order`). `hooks` itself is written back at the position it was
//! read from. A `hooks` value that is not an object is kept verbatim: it
//! counts as "no hooks" for every check, prune leaves it alone, and only
//! merge replaces it.
//!
//! Loading is deliberately forgiving on the setup path: a file that cannot be
//! read or parsed as a JSON object is replaced by an empty document and its
//! previous content is lost on the next save. The removal and status paths
//! use [`SettingsStore::load_existing`] instead, which reports the failure.
use crate::core::error::{HookwireError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const HOOKS_KEY: &str = "hooks";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct SettingsDocument {
    pub hooks: Option<HooksSection>,
    pub extra: Map<String, Value>,
    /// A `hooks` value that is present but not an object.
    raw_hooks: Option<Value>,
    /// Index of `hooks` among the top-level keys when it was read.
    hooks_position: Option<usize>,
}

/// Event name → ordered list of hook groups. Values are kept as raw JSON so
/// that groups, matchers and fields we don't understand survive verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HooksSection {
    pub events: Map<String, Value>,
}

impl HooksSection {
    pub fn get(&self, event: &str) -> Option<&Value> {
        self.events.get(event)
    }

    pub fn contains_event(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Map<String, Value>> for SettingsDocument {
    fn from(map: Map<String, Value>) -> Self {
        let mut doc = SettingsDocument::default();
        // Rebuild rather than `remove`: with preserve_order, Map::remove
        // swaps the last key into the hole.
        for (index, (key, value)) in map.into_iter().enumerate() {
            if key == HOOKS_KEY {
                doc.hooks_position = Some(index);
                match value {
                    Value::Object(events) => doc.hooks = Some(HooksSection { events }),
                    other => doc.raw_hooks = Some(other),
                }
            } else {
                doc.extra.insert(key, value);
            }
        }
        doc
    }
}

impl From<SettingsDocument> for Map<String, Value> {
    fn from(doc: SettingsDocument) -> Self {
        let hooks = match (doc.hooks, doc.raw_hooks) {
            (Some(section), _) => Some(Value::Object(section.events)),
            (None, raw) => raw,
        };
        let Some(hooks) = hooks else {
            return doc.extra;
        };

        let at = doc.hooks_position.unwrap_or(doc.extra.len());
        let mut map = Map::new();
        let mut hooks = Some(hooks);
        for (index, (key, value)) in doc.extra.into_iter().enumerate() {
            if index == at {
                if let Some(h) = hooks.take() {
                    map.insert(HOOKS_KEY.to_string(), h);
                }
            }
            map.insert(key, value);
        }
        if let Some(h) = hooks {
            map.insert(HOOKS_KEY.to_string(), h);
        }
        map
    }
}

impl SettingsDocument {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Pretty-printed (2-space indent) with a trailing newline.
    pub fn to_pretty_string(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// The raw value stored for `event`, if the hooks section has one.
    pub fn event(&self, event: &str) -> Option<&Value> {
        self.hooks.as_ref().and_then(|h| h.get(event))
    }

    /// The `hooks` value when it is present but not an object.
    pub fn raw_hooks(&self) -> Option<&Value> {
        self.raw_hooks.as_ref()
    }

    /// The hooks section, created if absent. A non-object `hooks` value is
    /// replaced, in place.
    pub fn hooks_or_insert(&mut self) -> &mut HooksSection {
        if let Some(raw) = self.raw_hooks.take() {
            tracing::warn!("Replacing non-object `hooks` value: {}", raw);
        }
        self.hooks.get_or_insert_with(HooksSection::default)
    }

    /// Drop the hooks section entirely.
    pub fn clear_hooks(&mut self) {
        self.hooks = None;
        if self.raw_hooks.is_none() {
            self.hooks_position = None;
        }
    }
}

/// Reads and writes one settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load for mutation. Never fails: a missing file is an empty document,
    /// and an unreadable or malformed one is logged and treated as empty.
    pub fn load(&self) -> SettingsDocument {
        match self.load_existing() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!("{} not found, starting from empty settings", self.path.display());
                SettingsDocument::default()
            }
            Err(e) => {
                tracing::warn!("{}; its previous content will be replaced", e);
                SettingsDocument::default()
            }
        }
    }

    /// Strict load: `None` when the file does not exist, an error when it
    /// cannot be read or parsed.
    pub fn load_existing(&self) -> Result<Option<SettingsDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| HookwireError::Read {
            path: self.path.clone(),
            source,
        })?;
        let doc = SettingsDocument::from_json_str(&content).map_err(|source| {
            HookwireError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!("Loaded {}", self.path.display());
        Ok(Some(doc))
    }

    /// Create the parent directory if it doesn't exist yet.
    pub fn ensure_directory(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if parent.as_os_str().is_empty() {
                return Ok(());
            }
            std::fs::create_dir_all(parent).map_err(|source| HookwireError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Full-file rewrite through a sibling temp file and a rename, so a
    /// crash mid-write never leaves a truncated settings file behind.
    /// Not a lock: a concurrent writer can still win the race.
    pub fn save(&self, doc: &SettingsDocument) -> Result<()> {
        let json_str = doc.to_pretty_string()?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "settings.json".to_string());
        let temp_path = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let write_err = |source| HookwireError::Write {
            path: self.path.clone(),
            source,
        };

        let result = std::fs::File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(json_str.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| std::fs::rename(&temp_path, &self.path));

        if let Err(e) = result {
            let _ = std::fs::remove_file(&temp_path);
            return Err(write_err(e));
        }

        tracing::debug!("Wrote {}", self.path.display());
        Ok(())
    }
}
