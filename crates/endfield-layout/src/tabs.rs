use endfield_core::{Tab, TabGroupNode};

/// Append `tab` and make it active. A tab whose id is already in the group is
/// only re-activated, never inserted twice.
pub fn add_tab_to_group(group: &mut TabGroupNode, tab: Tab) {
    group.active_tab_id = Some(tab.id.clone());
    if !group.contains_tab(&tab.id) {
        group.tabs.push(tab);
    }
}

/// Remove a tab and return it. When the active tab goes, the tab that slides
/// into its index becomes active (or the new last tab, or none).
pub fn remove_tab_from_group(group: &mut TabGroupNode, tab_id: &str) -> Option<Tab> {
    let index = group.tabs.iter().position(|t| t.id == tab_id)?;
    let removed = group.tabs.remove(index);

    if group.active_tab_id.as_deref() == Some(tab_id) {
        group.active_tab_id = if group.tabs.is_empty() {
            None
        } else {
            let next = index.min(group.tabs.len() - 1);
            Some(group.tabs[next].id.clone())
        };
    }
    Some(removed)
}
