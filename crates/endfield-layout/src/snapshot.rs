// Persisted layout: validation on restore and the built-in default arrangement.

use std::collections::HashSet;

use endfield_core::{DockArea, DockSlot, LayoutNode, NodeId, Tab, TabGroupNode, TabId, WorkspaceLayout};
use thiserror::Error;

use crate::node;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RestoreError {
    #[error("unsupported layout version: {0} (expected {expected})", expected = WorkspaceLayout::VERSION)]
    UnsupportedVersion(u32),

    #[error("layout has no {} area", .0.name())]
    MissingArea(DockSlot),

    #[error("layout lists the {} area more than once", .0.name())]
    DuplicateArea(DockSlot),

    #[error("group {group} has active tab {tab} which it does not contain")]
    DanglingActiveTab { group: NodeId, tab: TabId },

    #[error("split {split} has ratio {ratio} outside [0, 1]")]
    RatioOutOfRange { split: NodeId, ratio: f32 },

    #[error("id {0} appears more than once")]
    DuplicateId(String),

    #[error("id {0} is beyond the range of ids this layout can mint")]
    IdOutOfRange(NodeId),
}

// ──────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────

/// Check a persisted layout and return its areas in slot order.
/// Nothing is partially accepted: any problem rejects the whole layout.
pub(crate) fn validate(layout: &WorkspaceLayout) -> Result<[DockArea; 4], RestoreError> {
    if layout.version != WorkspaceLayout::VERSION {
        return Err(RestoreError::UnsupportedVersion(layout.version));
    }

    let mut slots: [Option<DockArea>; 4] = Default::default();
    for area in &layout.areas {
        let entry = &mut slots[area.slot.index()];
        if entry.is_some() {
            return Err(RestoreError::DuplicateArea(area.slot));
        }
        *entry = Some(area.clone());
    }

    {
        let mut node_ids = HashSet::new();
        let mut tab_ids = HashSet::new();
        for area in slots.iter().flatten() {
            if let Some(root) = &area.root {
                check_tree(root, &mut node_ids, &mut tab_ids)?;
            }
        }
    }

    let [left, center, right, bottom] = slots;
    Ok([
        left.ok_or(RestoreError::MissingArea(DockSlot::Left))?,
        center.ok_or(RestoreError::MissingArea(DockSlot::Center))?,
        right.ok_or(RestoreError::MissingArea(DockSlot::Right))?,
        bottom.ok_or(RestoreError::MissingArea(DockSlot::Bottom))?,
    ])
}

fn check_tree<'a>(
    root: &'a LayoutNode,
    node_ids: &mut HashSet<&'a str>,
    tab_ids: &mut HashSet<&'a str>,
) -> Result<(), RestoreError> {
    let mut result = Ok(());
    node::for_each_node(root, &mut |node| {
        if result.is_err() {
            return;
        }
        result = check_node(node, node_ids, tab_ids);
    });
    result
}

fn check_node<'a>(
    node: &'a LayoutNode,
    node_ids: &mut HashSet<&'a str>,
    tab_ids: &mut HashSet<&'a str>,
) -> Result<(), RestoreError> {
    if !node_ids.insert(node.id()) {
        return Err(RestoreError::DuplicateId(node.id().to_string()));
    }
    match node {
        LayoutNode::Split(split) => {
            if !(0.0..=1.0).contains(&split.split_ratio) {
                return Err(RestoreError::RatioOutOfRange {
                    split: split.id.clone(),
                    ratio: split.split_ratio,
                });
            }
        }
        LayoutNode::TabGroup(group) => {
            for tab in &group.tabs {
                if !tab_ids.insert(tab.id.as_str()) {
                    return Err(RestoreError::DuplicateId(tab.id.clone()));
                }
            }
            if let Some(active) = &group.active_tab_id {
                if !group.contains_tab(active) {
                    return Err(RestoreError::DanglingActiveTab {
                        group: group.id.clone(),
                        tab: active.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Largest numeric suffix accepted on a restored `group-<n>` / `split-<n>` id.
/// Keeps the `u64` counter clear of overflow for any realistic session.
const MAX_RESTORED_ID: u64 = u32::MAX as u64;

/// Smallest counter value that cannot collide with any minted id
/// (`group-<n>` / `split-<n>`) already present in `areas`.
pub(crate) fn next_free_id(areas: &[DockArea]) -> Result<u64, RestoreError> {
    let mut next = 1;
    let mut result = Ok(());
    for root in areas.iter().filter_map(|area| area.root.as_ref()) {
        node::for_each_node(root, &mut |node| {
            let n = node
                .id()
                .strip_prefix("group-")
                .or_else(|| node.id().strip_prefix("split-"))
                .and_then(|suffix| suffix.parse::<u64>().ok());
            match n {
                Some(n) if n > MAX_RESTORED_ID => {
                    if result.is_ok() {
                        result = Err(RestoreError::IdOutOfRange(node.id().to_string()));
                    }
                }
                Some(n) => next = next.max(n + 1),
                None => {}
            }
        });
    }
    result.map(|()| next)
}

// ──────────────────────────────────────────────
// Built-in arrangements
// ──────────────────────────────────────────────

const LEFT_SIZE: f32 = 260.0;
const RIGHT_SIZE: f32 = 320.0;
const BOTTOM_SIZE: f32 = 220.0;

/// Explorer left, graph center, inspector right, logs bottom (hidden).
pub(crate) fn default_areas() -> [DockArea; 4] {
    let seeded = |slot: DockSlot, size: f32, visible: bool, tab: Tab| DockArea {
        root: Some(LayoutNode::TabGroup(TabGroupNode::with_tab(format!("group-{}", slot.name()), tab))),
        ..DockArea::empty(slot, size, visible)
    };
    [
        seeded(DockSlot::Left, LEFT_SIZE, true, Tab::new("explorer", "Explorer", "explorer")),
        seeded(DockSlot::Center, 0.0, true, Tab::new("graph", "Graph", "graph")),
        seeded(DockSlot::Right, RIGHT_SIZE, true, Tab::new("inspector", "Inspector", "inspector")),
        seeded(DockSlot::Bottom, BOTTOM_SIZE, false, Tab::new("logs", "Logs", "logs")),
    ]
}

pub(crate) fn empty_areas() -> [DockArea; 4] {
    [
        DockArea::empty(DockSlot::Left, LEFT_SIZE, true),
        DockArea::empty(DockSlot::Center, 0.0, true),
        DockArea::empty(DockSlot::Right, RIGHT_SIZE, true),
        DockArea::empty(DockSlot::Bottom, BOTTOM_SIZE, false),
    ]
}
