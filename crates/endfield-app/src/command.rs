// Command layer: host-level commands expressed through the engine's public
// operations. Tab ids are deterministic per logical document so that
// re-running a command focuses the existing tab.

use std::path::PathBuf;

use endfield_core::{DockSlot, Tab};
use endfield_layout::DockLayout;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    OpenFile(PathBuf),
    OpenProperties { resource_id: String, label: String },
    ShowLogs { resource_id: String, label: String },
    ShowDiff { resource_id: String, label: String },
    ToggleArea(DockSlot),
    ResetLayout,
}

impl Command {
    /// Parse `"<verb> [arg]"`, e.g. `"logs api"` or `"toggle bottom"`.
    pub fn parse(input: &str) -> Option<Command> {
        let input = input.trim();
        let (verb, arg) = match input.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (input, ""),
        };
        let resource = || (!arg.is_empty()).then(|| (arg.to_string(), arg.to_string()));

        match verb {
            "open-file" if !arg.is_empty() => Some(Command::OpenFile(PathBuf::from(arg))),
            "properties" => resource().map(|(resource_id, label)| Command::OpenProperties { resource_id, label }),
            "logs" => resource().map(|(resource_id, label)| Command::ShowLogs { resource_id, label }),
            "diff" => resource().map(|(resource_id, label)| Command::ShowDiff { resource_id, label }),
            "toggle" => DockSlot::from_name(arg).map(Command::ToggleArea),
            "reset" => Some(Command::ResetLayout),
            _ => None,
        }
    }

    pub fn apply(&self, layout: &mut DockLayout, default_slot: DockSlot) {
        match self {
            Command::OpenFile(path) => {
                layout.open_tab(Tab::file(&path.to_string_lossy()), default_slot);
            }
            Command::OpenProperties { resource_id, label } => {
                let tab = Tab::new(format!("inspector-{resource_id}"), label.clone(), "inspector")
                    .with_icon("inspector");
                layout.open_tab(tab, DockSlot::Right);
                layout.set_area_visible(DockSlot::Right, true);
            }
            Command::ShowLogs { resource_id, label } => {
                let tab = Tab::new(format!("logs-{resource_id}"), format!("Logs: {label}"), "logs")
                    .with_icon("terminal");
                layout.open_tab(tab, DockSlot::Bottom);
                layout.set_area_visible(DockSlot::Bottom, true);
            }
            Command::ShowDiff { resource_id, label } => {
                let tab = Tab::new(format!("diff-{resource_id}"), format!("Diff: {label}"), "diff")
                    .with_icon("diff");
                layout.open_tab(tab, DockSlot::Center);
            }
            Command::ToggleArea(slot) => {
                let visible = layout.area(*slot).visible;
                layout.set_area_visible(*slot, !visible);
            }
            Command::ResetLayout => layout.reset_layout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("open-file /srv/k8s/api.yaml"),
            Some(Command::OpenFile(PathBuf::from("/srv/k8s/api.yaml")))
        );
        assert_eq!(
            Command::parse("logs api"),
            Some(Command::ShowLogs {
                resource_id: "api".into(),
                label: "api".into()
            })
        );
        assert_eq!(Command::parse("toggle bottom"), Some(Command::ToggleArea(DockSlot::Bottom)));
        assert_eq!(Command::parse("reset"), Some(Command::ResetLayout));
        assert_eq!(Command::parse("toggle top"), None);
        assert_eq!(Command::parse("logs"), None);
        assert_eq!(Command::parse("explode"), None);
    }

    #[test]
    fn test_show_logs_reveals_bottom_once() {
        let mut layout = DockLayout::new();
        assert!(!layout.area(DockSlot::Bottom).visible);

        let cmd = Command::parse("logs api").unwrap();
        cmd.apply(&mut layout, DockSlot::Center);
        cmd.apply(&mut layout, DockSlot::Center);

        assert!(layout.area(DockSlot::Bottom).visible);
        let (slot, group) = layout.find_tab_location("logs-api").unwrap();
        assert_eq!(slot, DockSlot::Bottom);
        assert_eq!(group.tabs.iter().filter(|t| t.id == "logs-api").count(), 1);
        assert_eq!(group.active_tab_id.as_deref(), Some("logs-api"));
        assert_eq!(group.active_tab().unwrap().icon.as_deref(), Some("terminal"));
    }

    #[test]
    fn test_open_file_uses_default_slot() {
        let mut layout = DockLayout::empty();
        Command::OpenFile(PathBuf::from("/srv/k8s/api.yaml")).apply(&mut layout, DockSlot::Left);
        let (slot, group) = layout.find_tab_location("file-/srv/k8s/api.yaml").unwrap();
        assert_eq!(slot, DockSlot::Left);
        assert_eq!(group.active_tab().unwrap().title, "api.yaml");
    }

    #[test]
    fn test_properties_go_right() {
        let mut layout = DockLayout::new();
        layout.set_area_visible(DockSlot::Right, false);
        Command::parse("properties redis").unwrap().apply(&mut layout, DockSlot::Center);
        assert!(layout.area(DockSlot::Right).visible);
        assert_eq!(layout.find_tab_location("inspector-redis").unwrap().0, DockSlot::Right);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut layout = DockLayout::new();
        Command::ToggleArea(DockSlot::Left).apply(&mut layout, DockSlot::Center);
        assert!(!layout.area(DockSlot::Left).visible);
        Command::ShowDiff {
            resource_id: "api".into(),
            label: "api".into(),
        }
        .apply(&mut layout, DockSlot::Center);
        assert!(layout.find_tab_location("diff-api").is_some());

        Command::ResetLayout.apply(&mut layout, DockSlot::Center);
        assert_eq!(layout.areas(), DockLayout::new().areas());
    }
}
