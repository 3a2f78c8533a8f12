use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

/// Id of a split or tab group node. Minted once by the layout engine.
pub type NodeId = String;

/// Id of a tab. Chosen by the caller and stable for the same logical document.
pub type TabId = String;

// ──────────────────────────────────────────────
// Tabs
// ──────────────────────────────────────────────

/// A leaf content reference. `content_type` is opaque to the engine; the host
/// uses it to pick a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_dirty: bool,
}

impl Tab {
    pub fn new(id: impl Into<TabId>, title: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content_type: content_type.into(),
            file_path: None,
            icon: None,
            is_dirty: false,
        }
    }

    /// A file tab. The id is derived from the path so reopening the same file
    /// focuses the existing tab instead of duplicating it.
    pub fn file(path: &str) -> Self {
        let title = path
            .rsplit(|c| c == '/' || c == '\\')
            .find(|segment| !segment.is_empty())
            .unwrap_or(path);
        Self {
            file_path: Some(path.to_string()),
            ..Self::new(format!("file-{path}"), title, "file")
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

// ──────────────────────────────────────────────
// Layout tree
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children side by side; the ratio divides width.
    Horizontal,
    /// Children stacked; the ratio divides height.
    Vertical,
}

/// Leaf of the layout tree: an ordered tab strip with an optional active tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroupNode {
    pub id: NodeId,
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<TabId>,
}

impl TabGroupNode {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    pub fn with_tab(id: impl Into<NodeId>, tab: Tab) -> Self {
        Self {
            id: id.into(),
            active_tab_id: Some(tab.id.clone()),
            tabs: vec![tab],
        }
    }

    pub fn contains_tab(&self, tab_id: &str) -> bool {
        self.tabs.iter().any(|t| t.id == tab_id)
    }

    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_deref().and_then(|id| self.tab(id))
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Internal node dividing space between exactly two children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitNode {
    pub id: NodeId,
    pub direction: SplitDirection,
    /// Fraction of the space given to `first`, in `[0, 1]`.
    pub split_ratio: f32,
    pub first: Box<LayoutNode>,
    pub second: Box<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutNode {
    Split(SplitNode),
    TabGroup(TabGroupNode),
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        match self {
            LayoutNode::Split(split) => &split.id,
            LayoutNode::TabGroup(group) => &group.id,
        }
    }
}

// ──────────────────────────────────────────────
// Dock areas
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSlot {
    Left,
    Center,
    Right,
    Bottom,
}

impl DockSlot {
    /// Fixed slot order, also the order areas are persisted in.
    pub const ALL: [DockSlot; 4] = [DockSlot::Left, DockSlot::Center, DockSlot::Right, DockSlot::Bottom];

    pub fn index(self) -> usize {
        match self {
            DockSlot::Left => 0,
            DockSlot::Center => 1,
            DockSlot::Right => 2,
            DockSlot::Bottom => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DockSlot::Left => "left",
            DockSlot::Center => "center",
            DockSlot::Right => "right",
            DockSlot::Bottom => "bottom",
        }
    }

    pub fn from_name(name: &str) -> Option<DockSlot> {
        DockSlot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockArea {
    pub slot: DockSlot,
    /// Extent along the area's resize axis. Ignored while hidden.
    pub size: f32,
    pub visible: bool,
    pub root: Option<LayoutNode>,
}

impl DockArea {
    pub fn empty(slot: DockSlot, size: f32, visible: bool) -> Self {
        Self {
            slot,
            size,
            visible,
            root: None,
        }
    }
}

/// Persisted snapshot of all four dock areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceLayout {
    pub version: u32,
    pub areas: Vec<DockArea>,
}

impl WorkspaceLayout {
    pub const VERSION: u32 = 1;
}

// ──────────────────────────────────────────────
// Drag & drop
// ──────────────────────────────────────────────

/// Directional gesture of a tab drop onto a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Tab drag state machine: `Idle -> Dragging -> Idle`. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        tab: Tab,
        source_group_id: NodeId,
        position: Vec2,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn tab(&self) -> Option<&Tab> {
        match self {
            DragState::Dragging { tab, .. } => Some(tab),
            DragState::Idle => None,
        }
    }

    pub fn source_group_id(&self) -> Option<&str> {
        match self {
            DragState::Dragging { source_group_id, .. } => Some(source_group_id),
            DragState::Idle => None,
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            DragState::Dragging { position, .. } => Some(*position),
            DragState::Idle => None,
        }
    }
}

// ──────────────────────────────────────────────
// Trait: LayoutEngine
// ──────────────────────────────────────────────

/// The dock layout engine as seen by the application shell.
/// It never interprets tab contents; it only places tabs in groups and areas.
pub trait LayoutEngine {
    fn open_tab(&mut self, tab: Tab, prefer_slot: DockSlot);
    fn close_tab(&mut self, tab_id: &str);
    fn set_area_visible(&mut self, slot: DockSlot, visible: bool);
    fn area(&self, slot: DockSlot) -> &DockArea;
    /// Increases whenever persisted state changed.
    fn revision(&self) -> u64;
    fn serialize_layout(&self) -> WorkspaceLayout;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_tab_id_is_deterministic() {
        let a = Tab::file("/project/k8s/api.yaml");
        let b = Tab::file("/project/k8s/api.yaml");
        assert_eq!(a.id, b.id);
        assert_eq!(a.id, "file-/project/k8s/api.yaml");
        assert_eq!(a.title, "api.yaml");
        assert_eq!(a.content_type, "file");
        assert_eq!(a.file_path.as_deref(), Some("/project/k8s/api.yaml"));
    }

    #[test]
    fn test_node_json_shape() {
        let node = LayoutNode::Split(SplitNode {
            id: "split-1".into(),
            direction: SplitDirection::Horizontal,
            split_ratio: 0.5,
            first: Box::new(LayoutNode::TabGroup(TabGroupNode::with_tab(
                "group-1",
                Tab::new("a", "A", "file"),
            ))),
            second: Box::new(LayoutNode::TabGroup(TabGroupNode::new("group-2"))),
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "split");
        assert_eq!(json["direction"], "horizontal");
        assert_eq!(json["splitRatio"], 0.5);
        assert_eq!(json["first"]["type"], "tabGroup");
        assert_eq!(json["first"]["activeTabId"], "a");
        assert_eq!(json["first"]["tabs"][0]["contentType"], "file");
        assert_eq!(json["first"]["tabs"][0]["isDirty"], false);
        assert!(json["second"]["activeTabId"].is_null());
    }

    #[test]
    fn test_tab_optional_fields_default() {
        let tab: Tab = serde_json::from_str(r#"{"id":"x","title":"X","contentType":"graph"}"#).unwrap();
        assert_eq!(tab.file_path, None);
        assert_eq!(tab.icon, None);
        assert!(!tab.is_dirty);
    }

    #[test]
    fn test_slot_names_round_trip() {
        for slot in DockSlot::ALL {
            assert_eq!(DockSlot::from_name(slot.name()), Some(slot));
            assert_eq!(DockSlot::ALL[slot.index()], slot);
        }
        assert_eq!(DockSlot::from_name("top"), None);
    }

    #[test]
    fn test_drag_state_accessors() {
        let idle = DragState::default();
        assert!(!idle.is_dragging());
        assert!(idle.tab().is_none());

        let dragging = DragState::Dragging {
            tab: Tab::new("a", "A", "file"),
            source_group_id: "group-1".into(),
            position: Vec2::new(3.0, 4.0),
        };
        assert!(dragging.is_dragging());
        assert_eq!(dragging.source_group_id(), Some("group-1"));
        assert_eq!(dragging.position(), Some(Vec2::new(3.0, 4.0)));
    }
}
