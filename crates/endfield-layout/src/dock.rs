use endfield_core::{DropZone, LayoutNode, NodeId, Rect, SplitDirection, SplitNode, Tab, TabGroupNode, Vec2};

/// Fraction of a group's extent, from each edge, that counts as a directional
/// drop zone.
const EDGE_ZONE: f32 = 0.25;

/// Map a directional drop to `(direction, new_group_first)`.
/// `Center` is a merge into the target group, not a split, so it maps to `None`.
pub fn drop_zone_to_split(zone: DropZone) -> Option<(SplitDirection, bool)> {
    match zone {
        DropZone::Top => Some((SplitDirection::Vertical, true)),
        DropZone::Bottom => Some((SplitDirection::Vertical, false)),
        DropZone::Left => Some((SplitDirection::Horizontal, true)),
        DropZone::Right => Some((SplitDirection::Horizontal, false)),
        DropZone::Center => None,
    }
}

/// Wrap `existing` and a fresh group in a 50/50 split. The fresh group holds
/// `new_tab` (active) or is empty. `existing` keeps its id.
pub fn split_group_node(
    existing: TabGroupNode,
    direction: SplitDirection,
    new_group_first: bool,
    new_tab: Option<Tab>,
    split_id: NodeId,
    new_group_id: NodeId,
) -> SplitNode {
    let new_group = match new_tab {
        Some(tab) => TabGroupNode::with_tab(new_group_id, tab),
        None => TabGroupNode::new(new_group_id),
    };
    let existing = LayoutNode::TabGroup(existing);
    let new_group = LayoutNode::TabGroup(new_group);
    let (first, second) = if new_group_first {
        (new_group, existing)
    } else {
        (existing, new_group)
    };

    SplitNode {
        id: split_id,
        direction,
        split_ratio: 0.5,
        first: Box::new(first),
        second: Box::new(second),
    }
}

/// Drop zone for a pointer over a group occupying `rect`. Top and bottom bands
/// win over left and right in the corners.
pub fn drop_zone_at(rect: Rect, position: Vec2) -> DropZone {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return DropZone::Center;
    }
    let rel_x = (position.x - rect.x) / rect.width;
    let rel_y = (position.y - rect.y) / rect.height;

    if rel_y < EDGE_ZONE {
        DropZone::Top
    } else if rel_y > 1.0 - EDGE_ZONE {
        DropZone::Bottom
    } else if rel_x < EDGE_ZONE {
        DropZone::Left
    } else if rel_x > 1.0 - EDGE_ZONE {
        DropZone::Right
    } else {
        DropZone::Center
    }
}
