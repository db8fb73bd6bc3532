use crate::core::settings::SettingsDocument;
use crate::hooks::catalog::HookCatalog;
use crate::hooks::detect::{has_ours, is_ours};
use serde_json::Value;

/// Add the catalog's canonical group to every catalog event that doesn't
/// already carry one of our commands. Existing groups keep their order and
/// content; ours is appended. Events outside the catalog and all non-hook
/// keys pass through.
///
/// A catalog event whose value is not a list is replaced outright, as is a
/// `hooks` value that is not an object.
pub fn merge(mut doc: SettingsDocument, catalog: &HookCatalog) -> SettingsDocument {
    let hooks = doc.hooks_or_insert();
    let signature = catalog.signature();

    for entry in catalog.entries() {
        if hooks
            .get(entry.event)
            .is_some_and(|seq| has_ours(seq, signature))
        {
            continue;
        }
        match hooks.events.get_mut(entry.event) {
            Some(Value::Array(groups)) => groups.push(catalog.canonical_group(entry)),
            _ => {
                hooks
                    .events
                    .insert(entry.event.to_string(), catalog.canonical_sequence(entry));
            }
        }
    }

    doc
}

/// Remove every group that is entirely ours from the catalog events. Event
/// lists left empty are dropped, and so is the hooks section if nothing
/// remains. Mixed groups and non-list values are left alone.
pub fn prune(mut doc: SettingsDocument, catalog: &HookCatalog) -> SettingsDocument {
    let Some(hooks) = doc.hooks.as_mut() else {
        return doc;
    };
    let signature = catalog.signature();

    for event in catalog.events() {
        if let Some(Value::Array(groups)) = hooks.events.get_mut(event) {
            groups.retain(|group| !is_ours(group, signature));
        }
    }

    // retain keeps the relative order of the surviving events
    hooks.events.retain(|event, value| {
        !(catalog.contains_event(event) && value.as_array().is_some_and(|a| a.is_empty()))
    });

    if hooks.is_empty() {
        doc.clear_hooks();
    }
    doc
}
