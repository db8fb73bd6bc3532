use crate::core::error::{HookwireError, Result};
use crate::core::settings::SettingsStore;
use crate::hooks::catalog::{CatalogEntry, HookCatalog};
use crate::hooks::HookTarget;
use std::path::{Path, PathBuf};

/// Lifecycle events forwarded to the listener, with their matchers.
pub const EVENTS: &[CatalogEntry] = &[
    CatalogEntry::new("UserPromptSubmit"),
    CatalogEntry::with_matcher("PreToolUse", "*"),
    CatalogEntry::new("Stop"),
    CatalogEntry::new("SessionStart"),
    CatalogEntry::new("SessionEnd"),
    CatalogEntry::with_matcher("Notification", "permission_prompt"),
];

pub fn settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(HookwireError::HomeDirNotFound)?;
    Ok(home.join(".claude").join("settings.json"))
}

/// Claude Code target for `~/.claude/settings.json`. The directory is created
/// on demand, so setup always proceeds.
pub fn target(port: u16) -> Result<HookTarget> {
    Ok(target_at(settings_path()?, port))
}

pub fn target_at(path: impl AsRef<Path>, port: u16) -> HookTarget {
    HookTarget::new(
        "Claude Code",
        HookCatalog::for_listener(EVENTS, port),
        SettingsStore::new(path.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::detect::is_ours;
    use crate::hooks::{RemoveOutcome, SetupOutcome};
    use serde_json::{json, Value};

    fn setup_dir() -> (tempfile::TempDir, HookTarget) {
        let dir = tempfile::tempdir().unwrap();
        let target = target_at(dir.path().join(".claude").join("settings.json"), 7337);
        (dir, target)
    }

    fn read(target: &HookTarget) -> Value {
        serde_json::from_str(&std::fs::read_to_string(target.settings_path()).unwrap()).unwrap()
    }

    fn write(target: &HookTarget, content: &str) {
        std::fs::create_dir_all(target.settings_path().parent().unwrap()).unwrap();
        std::fs::write(target.settings_path(), content).unwrap();
    }

    fn user_stop_group() -> Value {
        json!({"hooks": [{"type": "command", "command": "afplay /System/Library/Sounds/Glass.aiff"}]})
    }

    #[test]
    fn test_fresh_setup_writes_six_events() {
        let (_dir, target) = setup_dir();
        target.setup().unwrap();

        let settings = read(&target);
        let hooks = settings["hooks"].as_object().unwrap();
        assert_eq!(
            hooks.keys().collect::<Vec<_>>(),
            vec![
                "UserPromptSubmit",
                "PreToolUse",
                "Stop",
                "SessionStart",
                "SessionEnd",
                "Notification"
            ]
        );
        for (_, groups) in hooks {
            let groups = groups.as_array().unwrap();
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0]["hooks"].as_array().unwrap().len(), 1);
            assert!(is_ours(&groups[0], target.catalog().signature()));
        }
        assert_eq!(hooks["PreToolUse"][0]["matcher"], "*");
        assert_eq!(hooks["Notification"][0]["matcher"], "permission_prompt");
        assert!(hooks["Stop"][0].get("matcher").is_none());
    }

    #[test]
    fn test_setup_appends_after_user_stop_hook() {
        let (_dir, target) = setup_dir();
        write(
            &target,
            &json!({"hooks": {"Stop": [user_stop_group()]}}).to_string(),
        );
        target.setup().unwrap();

        let settings = read(&target);
        let stop = settings["hooks"]["Stop"].as_array().unwrap();
        assert_eq!(stop.len(), 2);
        assert_eq!(stop[0], user_stop_group());
        assert!(is_ours(&stop[1], target.catalog().signature()));
    }

    #[test]
    fn test_remove_restores_user_stop_hook() {
        let (_dir, target) = setup_dir();
        write(
            &target,
            &json!({"hooks": {"Stop": [user_stop_group()]}}).to_string(),
        );
        target.setup().unwrap();
        target.remove().unwrap();

        assert_eq!(read(&target), json!({"hooks": {"Stop": [user_stop_group()]}}));
    }

    #[test]
    fn test_remove_deletes_sole_ours_event_and_section() {
        let (_dir, target) = setup_dir();
        let ours = target.catalog().canonical_sequence(&EVENTS[3]);
        write(
            &target,
            &json!({"hooks": {"SessionStart": ours}, "model": "opus"}).to_string(),
        );
        assert_eq!(
            target.remove().unwrap(),
            RemoveOutcome::Removed {
                removed: vec!["SessionStart"]
            }
        );
        assert_eq!(read(&target), json!({"model": "opus"}));
    }

    #[test]
    fn test_remove_keeps_other_events() {
        let (_dir, target) = setup_dir();
        let ours = target.catalog().canonical_sequence(&EVENTS[3]);
        write(
            &target,
            &json!({"hooks": {"SessionStart": ours, "PostToolUse": [user_stop_group()]}})
                .to_string(),
        );
        target.remove().unwrap();
        assert_eq!(
            read(&target),
            json!({"hooks": {"PostToolUse": [user_stop_group()]}})
        );
    }

    #[test]
    fn test_invalid_json_not_configured_and_overwritten_by_setup() {
        let (_dir, target) = setup_dir();
        write(&target, "{\"hooks\": {\"Stop\": [");
        assert!(!target.is_configured());

        let outcome = target.setup().unwrap();
        assert!(matches!(outcome, SetupOutcome::Installed { ref added, .. } if added.len() == 6));

        let settings = read(&target);
        assert_eq!(settings.as_object().unwrap().len(), 1);
        assert_eq!(settings["hooks"].as_object().unwrap().len(), 6);
        assert!(target.is_configured());
    }

    #[test]
    fn test_setup_preserves_unrelated_settings() {
        let (_dir, target) = setup_dir();
        let original = json!({
            "permissions": {"allow": ["Bash(git status)"], "deny": []},
            "statusLine": {"type": "command", "command": "~/.claude/statusline.sh"},
            "hooks": {"PostToolUse": [{"matcher": "Write", "hooks": [{"type": "command", "command": "prettier"}]}]},
            "enabledPlugins": {"x@y": true}
        });
        write(&target, &serde_json::to_string_pretty(&original).unwrap());
        target.setup().unwrap();

        let settings = read(&target);
        assert_eq!(settings["permissions"], original["permissions"]);
        assert_eq!(settings["statusLine"], original["statusLine"]);
        assert_eq!(settings["enabledPlugins"], original["enabledPlugins"]);
        assert_eq!(settings["hooks"]["PostToolUse"], original["hooks"]["PostToolUse"]);

        target.remove().unwrap();
        assert_eq!(read(&target), original);
    }

    #[test]
    fn test_different_port_is_a_different_owner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".claude").join("settings.json");
        target_at(&path, 7337).setup().unwrap();
        target_at(&path, 8000).setup().unwrap();

        let settings: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(settings["hooks"]["Stop"].as_array().unwrap().len(), 2);

        target_at(&path, 8000).remove().unwrap();
        let settings: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let stop = settings["hooks"]["Stop"].as_array().unwrap();
        assert_eq!(stop.len(), 1);
        assert!(stop[0]["hooks"][0]["command"]
            .as_str()
            .unwrap()
            .contains("127.0.0.1:7337"));
    }

    #[test]
    fn test_setup_keeps_user_keys_when_hooks_is_not_an_object() {
        let (_dir, target) = setup_dir();
        write(
            &target,
            r#"{"permissions":{"allow":["Bash(ls)"]},"model":"opus","hooks":[]}"#,
        );
        target.setup().unwrap();

        let settings = read(&target);
        assert_eq!(settings["permissions"], json!({"allow": ["Bash(ls)"]}));
        assert_eq!(settings["model"], "opus");
        assert_eq!(settings["hooks"].as_object().unwrap().len(), 6);
        assert_eq!(
            settings.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["permissions", "model", "hooks"]
        );

        target.remove().unwrap();
        assert_eq!(
            read(&target),
            json!({"permissions": {"allow": ["Bash(ls)"]}, "model": "opus"})
        );
    }
}
