use serde_json::{json, Value};

/// One event this tool hooks, with the matcher its canonical group carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub event: &'static str,
    pub matcher: Option<&'static str>,
}

impl CatalogEntry {
    pub const fn new(event: &'static str) -> Self {
        CatalogEntry {
            event,
            matcher: None,
        }
    }

    pub const fn with_matcher(event: &'static str, matcher: &'static str) -> Self {
        CatalogEntry {
            event,
            matcher: Some(matcher),
        }
    }
}

/// Loopback endpoint the hook commands post to. Also serves as the ownership
/// signature: any action whose command contains it is ours.
pub fn listener_url(port: u16) -> String {
    format!("http://127.0.0.1:{}/hook", port)
}

/// Shell command that forwards the hook payload (stdin) to `url`.
///
/// stdin is captured before backgrounding: a non-interactive shell points an
/// async list's stdin at /dev/null. The subshell detaches curl so the agent
/// never waits on the listener, and all output is discarded.
pub fn forward_command(url: &str) -> String {
    format!(
        "body=$(cat); (printf '%s' \"$body\" | curl -s -m 5 -X POST \
         -H 'Content-Type: application/json' --data-binary @- {} >/dev/null 2>&1 &)",
        url
    )
}

/// The fixed set of hook groups one agent gets, plus the command and
/// signature they share.
#[derive(Debug, Clone)]
pub struct HookCatalog {
    entries: &'static [CatalogEntry],
    command: String,
    signature: String,
}

impl HookCatalog {
    pub fn new(
        entries: &'static [CatalogEntry],
        command: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        HookCatalog {
            entries,
            command: command.into(),
            signature: signature.into(),
        }
    }

    /// Catalog whose command forwards to the local listener on `port`.
    pub fn for_listener(entries: &'static [CatalogEntry], port: u16) -> Self {
        let url = listener_url(port);
        HookCatalog::new(entries, forward_command(&url), url)
    }

    pub fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    pub fn events(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|e| e.event)
    }

    pub fn contains_event(&self, event: &str) -> bool {
        self.entries.iter().any(|e| e.event == event)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// `{ "matcher"?: ..., "hooks": [{ "type": "command", "command": ... }] }`
    pub fn canonical_group(&self, entry: &CatalogEntry) -> Value {
        let actions = json!([{
            "type": "command",
            "command": self.command
        }]);
        match entry.matcher {
            Some(m) => json!({
                "matcher": m,
                "hooks": actions
            }),
            None => json!({
                "hooks": actions
            }),
        }
    }

    pub fn canonical_sequence(&self, entry: &CatalogEntry) -> Value {
        Value::Array(vec![self.canonical_group(entry)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: &[CatalogEntry] = &[
        CatalogEntry::new("Stop"),
        CatalogEntry::with_matcher("PreToolUse", "*"),
    ];

    #[test]
    fn test_command_embeds_signature() {
        let catalog = HookCatalog::for_listener(ENTRIES, 9001);
        assert_eq!(catalog.signature(), "http://127.0.0.1:9001/hook");
        assert!(catalog.command().contains(catalog.signature()));
        assert!(catalog.command().contains("--data-binary @-"));
        assert!(catalog.command().ends_with("&)"));
    }

    #[test]
    fn test_canonical_group_shape() {
        let catalog = HookCatalog::for_listener(ENTRIES, 7337);
        let stop = catalog.canonical_group(&ENTRIES[0]);
        assert!(stop.get("matcher").is_none());
        let actions = stop["hooks"].as_array().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["type"], "command");
        assert_eq!(actions[0]["command"], catalog.command());

        let pre = catalog.canonical_group(&ENTRIES[1]);
        assert_eq!(pre["matcher"], "*");
    }

    #[test]
    fn test_events_in_catalog_order() {
        let catalog = HookCatalog::for_listener(ENTRIES, 7337);
        assert_eq!(catalog.events().collect::<Vec<_>>(), vec!["Stop", "PreToolUse"]);
        assert!(catalog.contains_event("Stop"));
        assert!(!catalog.contains_event("PostToolUse"));
    }
}
