// Dock layout engine
// Four dock areas, each holding a binary tree of splits and tab groups.
// Implements endfield_core::LayoutEngine.

pub mod dock;
pub mod node;
mod snapshot;
pub mod tabs;

use endfield_core::{
    DockArea, DockSlot, DragState, DropZone, LayoutEngine, LayoutNode, NodeId, Rect, SplitDirection, Tab, TabGroupNode,
    Vec2, WorkspaceLayout,
};

pub use snapshot::RestoreError;

// ──────────────────────────────────────────────
// DockLayout
// ──────────────────────────────────────────────

/// Minimum split ratio when resizing by dragging a border.
pub const MIN_RATIO: f32 = 0.1;

/// Border hit-test threshold in pixels.
const BORDER_HIT_THRESHOLD: f32 = 8.0;

/// Session layout state. The shell owns one instance and is its only writer.
#[derive(Debug, Clone)]
pub struct DockLayout {
    areas: [DockArea; 4],
    drag: DragState,
    next_id: u64,
    revision: u64,
}

impl DockLayout {
    /// A layout with the built-in default arrangement.
    pub fn new() -> Self {
        Self {
            areas: snapshot::default_areas(),
            drag: DragState::Idle,
            next_id: 1,
            revision: 0,
        }
    }

    /// A layout with four empty areas.
    pub fn empty() -> Self {
        Self {
            areas: snapshot::empty_areas(),
            ..Self::new()
        }
    }

    fn alloc_id(&mut self, prefix: &str) -> NodeId {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ── Queries ──

    pub fn area(&self, slot: DockSlot) -> &DockArea {
        &self.areas[slot.index()]
    }

    pub fn areas(&self) -> &[DockArea] {
        &self.areas
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// The area and group that own the given tab.
    pub fn find_tab_location(&self, tab_id: &str) -> Option<(DockSlot, &TabGroupNode)> {
        self.areas.iter().find_map(|area| {
            let root = area.root.as_ref()?;
            node::find_tab_group(root, tab_id).map(|group| (area.slot, group))
        })
    }

    pub fn find_group_location(&self, group_id: &str) -> Option<(DockSlot, &TabGroupNode)> {
        self.areas.iter().find_map(|area| {
            let root = area.root.as_ref()?;
            node::find_group(root, group_id).map(|group| (area.slot, group))
        })
    }

    pub fn active_tab(&self, group_id: &str) -> Option<&Tab> {
        self.find_group_location(group_id)
            .and_then(|(_, group)| group.active_tab())
    }

    /// Total number of tabs across all areas.
    pub fn tab_count(&self) -> usize {
        self.areas
            .iter()
            .filter_map(|area| area.root.as_ref())
            .flat_map(node::collect_groups)
            .map(|group| group.tabs.len())
            .sum()
    }

    /// Increases by one for every operation that changed persisted state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn group_mut(&mut self, slot: DockSlot, group_id: &str) -> Option<&mut TabGroupNode> {
        let root = self.areas[slot.index()].root.as_mut()?;
        node::find_group_mut(root, group_id)
    }

    // ── Tabs ──

    /// Focus the tab if it is open anywhere; otherwise place it in the first
    /// group of `prefer_slot`, creating a group (and showing the area) if the
    /// area is empty.
    pub fn open_tab(&mut self, tab: Tab, prefer_slot: DockSlot) {
        if let Some((slot, group_id)) = self
            .find_tab_location(&tab.id)
            .map(|(slot, group)| (slot, group.id.clone()))
        {
            if let Some(group) = self.group_mut(slot, &group_id) {
                if group.active_tab_id.as_deref() != Some(tab.id.as_str()) {
                    group.active_tab_id = Some(tab.id);
                    self.touch();
                }
            }
            return;
        }

        let first_group_id = self.areas[prefer_slot.index()]
            .root
            .as_ref()
            .and_then(node::first_group)
            .map(|group| group.id.clone());

        match first_group_id {
            Some(group_id) => {
                if let Some(group) = self.group_mut(prefer_slot, &group_id) {
                    tabs::add_tab_to_group(group, tab);
                }
            }
            None => {
                let group_id = self.alloc_id("group");
                log::debug!("new group {} in {} area", group_id, prefer_slot.name());
                let area = &mut self.areas[prefer_slot.index()];
                area.root = Some(LayoutNode::TabGroup(TabGroupNode::with_tab(group_id, tab)));
                area.visible = true;
            }
        }
        self.touch();
    }

    /// Remove a tab from its group, collapsing the group if it empties.
    /// Returns false if no such tab is open.
    pub fn close_tab(&mut self, tab_id: &str) -> bool {
        if self.take_tab(tab_id).is_none() {
            return false;
        }
        self.touch();
        true
    }

    /// Detach a tab from its group. An emptied group is removed from its tree.
    fn take_tab(&mut self, tab_id: &str) -> Option<(DockSlot, Tab)> {
        let (slot, group_id) = self
            .find_tab_location(tab_id)
            .map(|(slot, group)| (slot, group.id.clone()))?;

        let area = &mut self.areas[slot.index()];
        let group = node::find_group_mut(area.root.as_mut()?, &group_id)?;
        let tab = tabs::remove_tab_from_group(group, tab_id)?;

        if group.is_empty() {
            log::debug!("removing empty group {} from {} area", group_id, slot.name());
            area.root = area.root.take().and_then(|root| node::remove_group(root, &group_id));
        }
        Some((slot, tab))
    }

    pub fn set_active_tab(&mut self, group_id: &str, tab_id: &str) -> bool {
        let Some(slot) = self.find_group_location(group_id).map(|(slot, _)| slot) else {
            return false;
        };
        let Some(group) = self.group_mut(slot, group_id) else {
            return false;
        };
        if !group.contains_tab(tab_id) || group.active_tab_id.as_deref() == Some(tab_id) {
            return false;
        }
        group.active_tab_id = Some(tab_id.to_string());
        self.touch();
        true
    }

    pub fn mark_tab_dirty(&mut self, tab_id: &str, dirty: bool) -> bool {
        let Some((slot, group_id)) = self
            .find_tab_location(tab_id)
            .map(|(slot, group)| (slot, group.id.clone()))
        else {
            return false;
        };
        let Some(tab) = self
            .group_mut(slot, &group_id)
            .and_then(|group| group.tabs.iter_mut().find(|t| t.id == tab_id))
        else {
            return false;
        };
        if tab.is_dirty == dirty {
            return false;
        }
        tab.is_dirty = dirty;
        self.touch();
        true
    }

    /// Move a tab into another group and activate it there.
    /// No-op if the tab is already in the target group or the target is gone.
    pub fn move_tab(&mut self, tab_id: &str, target_group_id: &str) -> bool {
        let Some((_, source)) = self.find_tab_location(tab_id) else {
            return false;
        };
        if source.id == target_group_id {
            return false;
        }
        let Some((target_slot, _)) = self.find_group_location(target_group_id) else {
            log::warn!("move of tab {} aborted: group {} not found", tab_id, target_group_id);
            return false;
        };
        let Some((source_slot, tab)) = self.take_tab(tab_id) else {
            return false;
        };

        // Only the source group can have collapsed, so the target is still there.
        match self.group_mut(target_slot, target_group_id) {
            Some(group) => tabs::add_tab_to_group(group, tab),
            None => {
                // open_tab records its own change
                self.open_tab(tab, source_slot);
                return true;
            }
        }
        self.touch();
        true
    }

    /// Drop a dragged tab onto a group. `Center` merges into the group;
    /// directional zones split the group and seed the new half with the tab.
    pub fn drop_tab(&mut self, tab_id: &str, target_group_id: &str, zone: DropZone) -> bool {
        let Some((direction, new_group_first)) = dock::drop_zone_to_split(zone) else {
            return self.move_tab(tab_id, target_group_id);
        };

        let Some((_, source)) = self.find_tab_location(tab_id) else {
            return false;
        };
        if source.id == target_group_id && source.tabs.len() == 1 {
            return false;
        }
        let Some((target_slot, _)) = self.find_group_location(target_group_id) else {
            log::warn!("drop of tab {} aborted: group {} not found", tab_id, target_group_id);
            return false;
        };
        let Some((_, tab)) = self.take_tab(tab_id) else {
            return false;
        };

        let split_id = self.alloc_id("split");
        let new_group_id = self.alloc_id("group");
        let area = &mut self.areas[target_slot.index()];
        let Some(root) = area.root.take() else {
            return false;
        };
        let Some(existing) = node::find_group(&root, target_group_id).cloned() else {
            area.root = Some(root);
            return false;
        };

        log::debug!(
            "splitting group {} ({:?}) with new group {}",
            target_group_id,
            direction,
            new_group_id
        );
        let split = dock::split_group_node(existing, direction, new_group_first, Some(tab), split_id, new_group_id);
        area.root = Some(node::replace_node(root, target_group_id, LayoutNode::Split(split)));
        self.touch();
        true
    }

    // ── Areas & splits ──

    pub fn set_area_size(&mut self, slot: DockSlot, size: f32) {
        if !size.is_finite() {
            return;
        }
        let size = size.max(0.0);
        let area = &mut self.areas[slot.index()];
        if area.size != size {
            area.size = size;
            self.touch();
        }
    }

    pub fn set_area_visible(&mut self, slot: DockSlot, visible: bool) {
        let area = &mut self.areas[slot.index()];
        if area.visible != visible {
            area.visible = visible;
            self.touch();
        }
    }

    /// Set the ratio of the split with the given id, in whichever area it lives.
    pub fn set_split_ratio(&mut self, split_id: &str, ratio: f32) -> bool {
        if !ratio.is_finite() {
            return false;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        let Some(split) = self
            .areas
            .iter_mut()
            .filter_map(|area| area.root.as_mut())
            .find_map(|root| node::find_split_mut(root, split_id))
        else {
            return false;
        };
        if split.split_ratio == ratio {
            return false;
        }
        split.split_ratio = ratio;
        self.touch();
        true
    }

    // ── Drag ──

    pub fn start_drag(&mut self, tab: Tab, source_group_id: impl Into<NodeId>) {
        self.drag = DragState::Dragging {
            tab,
            source_group_id: source_group_id.into(),
            position: Vec2::default(),
        };
    }

    /// Track the pointer. Ignored unless a drag is in progress.
    pub fn update_drag_pos(&mut self, x: f32, y: f32) {
        if let DragState::Dragging { position, .. } = &mut self.drag {
            *position = Vec2::new(x, y);
        }
    }

    /// Return to idle, whether or not the drag ended in a drop.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    // ── Geometry ──

    /// Rects of every group of an area laid out inside `rect`.
    pub fn compute(&self, slot: DockSlot, rect: Rect) -> Vec<(NodeId, Rect)> {
        let mut result = Vec::new();
        if let Some(root) = &self.area(slot).root {
            node::compute_rects(root, rect, &mut result);
        }
        result
    }

    /// The group under the pointer.
    pub fn group_at(&self, slot: DockSlot, rect: Rect, position: Vec2) -> Option<NodeId> {
        self.compute(slot, rect)
            .into_iter()
            .find(|(_, group_rect)| group_rect.contains(position))
            .map(|(id, _)| id)
    }

    /// The split whose border is within reach of the pointer.
    pub fn split_border_at(&self, slot: DockSlot, rect: Rect, position: Vec2) -> Option<NodeId> {
        let root = self.area(slot).root.as_ref()?;
        let mut best = None;
        node::find_border_at(root, rect, position, &mut best);
        best.filter(|(dist, _)| *dist <= BORDER_HIT_THRESHOLD)
            .map(|(_, id)| id)
    }

    /// Move a split border to follow the pointer, keeping both sides at least
    /// `MIN_RATIO` of the split.
    pub fn drag_split_border(&mut self, slot: DockSlot, rect: Rect, split_id: &str, position: Vec2) -> bool {
        let Some((bounds, direction)) = self
            .area(slot)
            .root
            .as_ref()
            .and_then(|root| node::split_bounds(root, rect, split_id))
        else {
            return false;
        };
        let ratio = match direction {
            SplitDirection::Horizontal => (position.x - bounds.x) / bounds.width,
            SplitDirection::Vertical => (position.y - bounds.y) / bounds.height,
        };
        self.set_split_ratio(split_id, ratio.clamp(MIN_RATIO, 1.0 - MIN_RATIO))
    }

    // ── Persistence ──

    pub fn serialize_layout(&self) -> WorkspaceLayout {
        WorkspaceLayout {
            version: WorkspaceLayout::VERSION,
            areas: self.areas.to_vec(),
        }
    }

    /// Replace all areas with a persisted layout. Rejected layouts leave the
    /// current areas untouched.
    pub fn restore_layout(&mut self, layout: &WorkspaceLayout) -> Result<(), RestoreError> {
        let checked = snapshot::validate(layout)
            .and_then(|areas| snapshot::next_free_id(&areas).map(|next_free| (areas, next_free)));
        let (areas, next_free) = match checked {
            Ok(checked) => checked,
            Err(e) => {
                log::warn!("layout restore rejected: {}", e);
                return Err(e);
            }
        };
        self.next_id = self.next_id.max(next_free);
        self.areas = areas;
        self.drag = DragState::Idle;
        self.touch();
        log::debug!("layout restored ({} tabs)", self.tab_count());
        Ok(())
    }

    pub fn reset_layout(&mut self) {
        self.areas = snapshot::default_areas();
        self.drag = DragState::Idle;
        self.touch();
    }
}

impl Default for DockLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for DockLayout {
    fn open_tab(&mut self, tab: Tab, prefer_slot: DockSlot) {
        DockLayout::open_tab(self, tab, prefer_slot);
    }

    fn close_tab(&mut self, tab_id: &str) {
        DockLayout::close_tab(self, tab_id);
    }

    fn set_area_visible(&mut self, slot: DockSlot, visible: bool) {
        DockLayout::set_area_visible(self, slot, visible);
    }

    fn area(&self, slot: DockSlot) -> &DockArea {
        DockLayout::area(self, slot)
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn serialize_layout(&self) -> WorkspaceLayout {
        DockLayout::serialize_layout(self)
    }
}
