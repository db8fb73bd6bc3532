/// Google Gemini CLI integration.
///
/// Gemini CLI reads hooks from ~/.gemini/settings.json using the same
/// event → [{ matcher, hooks: [{ type, command }] }] layout as Claude Code,
/// only with its own event names. Hooks are only installed when ~/.gemini/
/// already exists; we never create it on the user's behalf.
use crate::core::error::{HookwireError, Result};
use crate::core::settings::SettingsStore;
use crate::hooks::catalog::{CatalogEntry, HookCatalog};
use crate::hooks::HookTarget;
use std::path::{Path, PathBuf};

pub const EVENTS: &[CatalogEntry] = &[
    CatalogEntry::new("BeforeAgent"),
    CatalogEntry::with_matcher("BeforeTool", "*"),
    CatalogEntry::new("AfterAgent"),
    CatalogEntry::new("SessionStart"),
    CatalogEntry::new("SessionEnd"),
    CatalogEntry::with_matcher("Notification", "ToolPermission"),
];

pub fn settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(HookwireError::HomeDirNotFound)?;
    Ok(home.join(".gemini").join("settings.json"))
}

pub fn target(port: u16) -> Result<HookTarget> {
    Ok(target_at(settings_path()?, port))
}

pub fn target_at(path: impl AsRef<Path>, port: u16) -> HookTarget {
    HookTarget::new(
        "Gemini CLI",
        HookCatalog::for_listener(EVENTS, port),
        SettingsStore::new(path.as_ref()),
    )
    .require_agent_dir()
}
