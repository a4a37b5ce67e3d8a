//! Selection and active-tool state. Transient UI state, never persisted.

use annotation::{LabelConfig, ToolKind};

#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: Option<String>,
    active_tool: ToolKind,
    active_label: Option<LabelConfig>,
}

impl SelectionState {
    pub fn new(initial_tool: ToolKind) -> Self {
        Self {
            selected: None,
            active_tool: initial_tool,
            active_label: None,
        }
    }

    /// Id of the selected annotation, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn active_label(&self) -> Option<&LabelConfig> {
        self.active_label.as_ref()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Clear selection and forget the active label as well; undo does this
    /// so the label section reflects the restored state.
    pub fn clear_all(&mut self) {
        self.selected = None;
        self.active_label = None;
    }

    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.active_tool = tool;
    }

    pub fn set_active_label(&mut self, label: Option<LabelConfig>) {
        self.active_label = label;
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(ToolKind::Segment)
    }
}
