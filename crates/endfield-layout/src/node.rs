use endfield_core::{LayoutNode, NodeId, Rect, SplitDirection, SplitNode, TabGroupNode, Vec2};

// ──────────────────────────────────────────────
// Lookup
// ──────────────────────────────────────────────

/// Depth-first search for the tab group with the given id.
pub fn find_group<'a>(root: &'a LayoutNode, group_id: &str) -> Option<&'a TabGroupNode> {
    match root {
        LayoutNode::TabGroup(group) if group.id == group_id => Some(group),
        LayoutNode::TabGroup(_) => None,
        LayoutNode::Split(split) => {
            find_group(&split.first, group_id).or_else(|| find_group(&split.second, group_id))
        }
    }
}

pub fn find_group_mut<'a>(root: &'a mut LayoutNode, group_id: &str) -> Option<&'a mut TabGroupNode> {
    match root {
        LayoutNode::TabGroup(group) if group.id == group_id => Some(group),
        LayoutNode::TabGroup(_) => None,
        LayoutNode::Split(split) => match find_group_mut(&mut split.first, group_id) {
            Some(group) => Some(group),
            None => find_group_mut(&mut split.second, group_id),
        },
    }
}

/// The group holding the tab with the given id.
pub fn find_tab_group<'a>(root: &'a LayoutNode, tab_id: &str) -> Option<&'a TabGroupNode> {
    match root {
        LayoutNode::TabGroup(group) if group.contains_tab(tab_id) => Some(group),
        LayoutNode::TabGroup(_) => None,
        LayoutNode::Split(split) => {
            find_tab_group(&split.first, tab_id).or_else(|| find_tab_group(&split.second, tab_id))
        }
    }
}

pub fn find_split_mut<'a>(root: &'a mut LayoutNode, split_id: &str) -> Option<&'a mut SplitNode> {
    match root {
        LayoutNode::TabGroup(_) => None,
        LayoutNode::Split(split) => {
            if split.id == split_id {
                return Some(split);
            }
            match find_split_mut(&mut split.first, split_id) {
                Some(found) => Some(found),
                None => find_split_mut(&mut split.second, split_id),
            }
        }
    }
}

/// Left-to-right, depth-first enumeration of all tab groups.
pub fn collect_groups(root: &LayoutNode) -> Vec<&TabGroupNode> {
    let mut out = Vec::new();
    collect_groups_into(root, &mut out);
    out
}

fn collect_groups_into<'a>(node: &'a LayoutNode, out: &mut Vec<&'a TabGroupNode>) {
    match node {
        LayoutNode::TabGroup(group) => out.push(group),
        LayoutNode::Split(split) => {
            collect_groups_into(&split.first, out);
            collect_groups_into(&split.second, out);
        }
    }
}

/// The first group in `collect_groups` order, without allocating.
pub fn first_group(root: &LayoutNode) -> Option<&TabGroupNode> {
    match root {
        LayoutNode::TabGroup(group) => Some(group),
        LayoutNode::Split(split) => first_group(&split.first),
    }
}

/// Visit every node, parents before children.
pub fn for_each_node<'a>(root: &'a LayoutNode, f: &mut impl FnMut(&'a LayoutNode)) {
    f(root);
    if let LayoutNode::Split(split) = root {
        for_each_node(&split.first, f);
        for_each_node(&split.second, f);
    }
}

// ──────────────────────────────────────────────
// Rewrites
// ──────────────────────────────────────────────

/// Substitute the node whose id equals `target_id`. Untouched subtrees are
/// moved, not copied. If the id is not in the tree, `root` comes back as is.
pub fn replace_node(mut root: LayoutNode, target_id: &str, replacement: LayoutNode) -> LayoutNode {
    let mut replacement = Some(replacement);
    replace_in_place(&mut root, target_id, &mut replacement);
    root
}

fn replace_in_place(node: &mut LayoutNode, target_id: &str, replacement: &mut Option<LayoutNode>) {
    if node.id() == target_id {
        if let Some(new_node) = replacement.take() {
            *node = new_node;
        }
        return;
    }
    if let LayoutNode::Split(split) = node {
        replace_in_place(&mut split.first, target_id, replacement);
        if replacement.is_some() {
            replace_in_place(&mut split.second, target_id, replacement);
        }
    }
}

/// Remove a tab group leaf. A split left with one child collapses to that
/// child; a split left with none disappears. Returns `None` when nothing of
/// the tree survives.
pub fn remove_group(root: LayoutNode, group_id: &str) -> Option<LayoutNode> {
    match root {
        LayoutNode::TabGroup(group) if group.id == group_id => None,
        LayoutNode::TabGroup(group) => Some(LayoutNode::TabGroup(group)),
        LayoutNode::Split(split) => {
            let SplitNode {
                id,
                direction,
                split_ratio,
                first,
                second,
            } = split;
            match (remove_group(*first, group_id), remove_group(*second, group_id)) {
                (Some(first), Some(second)) => Some(LayoutNode::Split(SplitNode {
                    id,
                    direction,
                    split_ratio,
                    first: Box::new(first),
                    second: Box::new(second),
                })),
                (Some(survivor), None) | (None, Some(survivor)) => {
                    log::debug!("collapsed split {} into {}", id, survivor.id());
                    Some(survivor)
                }
                (None, None) => None,
            }
        }
    }
}

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

/// Compute the rect of every tab group in this subtree.
pub(crate) fn compute_rects(node: &LayoutNode, rect: Rect, out: &mut Vec<(NodeId, Rect)>) {
    match node {
        LayoutNode::TabGroup(group) => out.push((group.id.clone(), rect)),
        LayoutNode::Split(split) => {
            let (first_rect, second_rect) = split_rect(rect, split.direction, split.split_ratio);
            compute_rects(&split.first, first_rect, out);
            compute_rects(&split.second, second_rect, out);
        }
    }
}

/// Find the split whose border is closest to `position`. Only borders whose
/// perpendicular extent contains the position are considered.
pub(crate) fn find_border_at(node: &LayoutNode, rect: Rect, position: Vec2, best: &mut Option<(f32, NodeId)>) {
    let LayoutNode::Split(split) = node else {
        return;
    };

    let (dist, in_range) = match split.direction {
        SplitDirection::Horizontal => {
            let border_x = rect.x + rect.width * split.split_ratio;
            (
                (position.x - border_x).abs(),
                position.y >= rect.y && position.y <= rect.y + rect.height,
            )
        }
        SplitDirection::Vertical => {
            let border_y = rect.y + rect.height * split.split_ratio;
            (
                (position.y - border_y).abs(),
                position.x >= rect.x && position.x <= rect.x + rect.width,
            )
        }
    };

    if in_range {
        let closer = match best {
            Some((best_dist, _)) => dist < *best_dist,
            None => true,
        };
        if closer {
            *best = Some((dist, split.id.clone()));
        }
    }

    let (first_rect, second_rect) = split_rect(rect, split.direction, split.split_ratio);
    find_border_at(&split.first, first_rect, position, best);
    find_border_at(&split.second, second_rect, position, best);
}

/// The rect occupied by the split with the given id, and its direction.
pub(crate) fn split_bounds(node: &LayoutNode, rect: Rect, split_id: &str) -> Option<(Rect, SplitDirection)> {
    let LayoutNode::Split(split) = node else {
        return None;
    };
    if split.id == split_id {
        return Some((rect, split.direction));
    }
    let (first_rect, second_rect) = split_rect(rect, split.direction, split.split_ratio);
    split_bounds(&split.first, first_rect, split_id)
        .or_else(|| split_bounds(&split.second, second_rect, split_id))
}

/// Split a rect into two sub-rects based on direction and ratio.
pub fn split_rect(rect: Rect, direction: SplitDirection, ratio: f32) -> (Rect, Rect) {
    match direction {
        SplitDirection::Horizontal => {
            let left_width = rect.width * ratio;
            let right_width = rect.width - left_width;
            (
                Rect::new(rect.x, rect.y, left_width, rect.height),
                Rect::new(rect.x + left_width, rect.y, right_width, rect.height),
            )
        }
        SplitDirection::Vertical => {
            let top_height = rect.height * ratio;
            let bottom_height = rect.height - top_height;
            (
                Rect::new(rect.x, rect.y, rect.width, top_height),
                Rect::new(rect.x, rect.y + top_height, rect.width, bottom_height),
            )
        }
    }
}
