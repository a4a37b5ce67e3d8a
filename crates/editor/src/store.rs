//! The editor: exclusive owner of the active sample, routing every
//! mutation through the history manager and recomputing the derived views
//! (id lookup map, order-sorted timed sequence) on each change.

use std::collections::HashMap;
use std::time::Duration;

use annotation::{
    default_attribute_values, Annotation, AnnotationError, EditorConfig, LabelMapping, MediaKind,
    Sample, ToolKind,
};

use crate::error::EditorError;
use crate::events::{EditorEvent, EventBus};
use crate::history::History;
use crate::keyboard::{Debouncer, KeyCommand};
use crate::player::PlayerBridge;
use crate::selection::SelectionState;

#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub max_history: usize,
    pub key_debounce: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            max_history: 20,
            key_debounce: Debouncer::DEFAULT_DELAY,
        }
    }
}

pub struct Editor {
    config: EditorConfig,
    media: MediaKind,
    duration: Option<f64>,
    label_mapping: LabelMapping,
    history: History,
    selection: SelectionState,
    player: PlayerBridge,
    events: EventBus,
    key_debounce: Duration,
    debouncers: HashMap<KeyCommand, Debouncer>,
    // Derived views, rebuilt after every change to the sample.
    index: HashMap<String, usize>,
    timed: Vec<Annotation>,
}

impl Editor {
    pub fn new(config: EditorConfig, media: MediaKind) -> Self {
        Self::with_options(config, media, EditorOptions::default())
    }

    pub fn with_options(config: EditorConfig, media: MediaKind, options: EditorOptions) -> Self {
        let label_mapping = config.label_mapping();
        let initial_tool = ToolKind::Segment;
        let mut selection = SelectionState::new(initial_tool);
        selection.set_active_label(config.labels_for(initial_tool).first().cloned());
        Self {
            config,
            media,
            duration: None,
            label_mapping,
            history: History::new(options.max_history),
            selection,
            player: PlayerBridge::new(),
            events: EventBus::new(),
            key_debounce: options.key_debounce,
            debouncers: HashMap::new(),
            index: HashMap::new(),
            timed: Vec::new(),
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn media(&self) -> MediaKind {
        self.media
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.history.present()
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.sample().map(|s| s.annotations.as_slice()).unwrap_or(&[])
    }

    /// Timed (frame/segment) annotations sorted ascending by `order`,
    /// ties keeping insertion order.
    pub fn timed_annotations(&self) -> &[Annotation] {
        &self.timed
    }

    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        let position = *self.index.get(id)?;
        self.sample().and_then(|s| s.annotations.get(position))
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_annotation(&self) -> Option<&Annotation> {
        self.selection.selected_id().and_then(|id| self.annotation(id))
    }

    pub fn player(&mut self) -> &mut PlayerBridge {
        &mut self.player
    }

    pub fn subscribe(&mut self) -> crossbeam_channel::Receiver<EditorEvent> {
        self.events.subscribe()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---- sample lifecycle ------------------------------------------------

    /// Replace the active sample wholesale. Resets history and selection;
    /// no cross-sample undo.
    pub fn load_sample(&mut self, sample: Option<Sample>) {
        self.history.reset(sample);
        self.selection.clear_all();
        self.rebuild_views();
        self.player.seek(0.0);
    }

    /// Media metadata became known; used for temporal validation.
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = Some(duration);
    }

    // ---- mutations (each commits a history snapshot) ---------------------

    pub fn add_annotation(&mut self, annotation: Annotation) -> Result<(), EditorError> {
        annotation.validate(self.duration)?;
        if self.index.contains_key(annotation.id()) {
            return Err(AnnotationError::DuplicateId(annotation.id().to_string()).into());
        }
        let id = annotation.id().to_string();
        self.commit_with(|sample| sample.annotations.push(annotation))?;
        self.selection.select(id);
        Ok(())
    }

    /// Replace an existing annotation by id.
    pub fn update_annotation(&mut self, annotation: Annotation) -> Result<(), EditorError> {
        annotation.validate(self.duration)?;
        if !self.index.contains_key(annotation.id()) {
            return Err(EditorError::UnknownAnnotation(annotation.id().to_string()));
        }
        self.replace_in_place(annotation)
    }

    /// Replace by id when present, append otherwise. The attribute panel
    /// edits through this: the annotation it holds may not have landed in
    /// the store yet.
    pub fn upsert_annotation(&mut self, annotation: Annotation) -> Result<(), EditorError> {
        annotation.validate(self.duration)?;
        if self.index.contains_key(annotation.id()) {
            self.replace_in_place(annotation)
        } else {
            self.commit_with(|sample| sample.annotations.push(annotation))
        }
    }

    fn replace_in_place(&mut self, annotation: Annotation) -> Result<(), EditorError> {
        self.commit_with(|sample| {
            if let Some(slot) = sample
                .annotations
                .iter_mut()
                .find(|a| a.id() == annotation.id())
            {
                *slot = annotation;
            }
        })
    }

    /// Remove one annotation. Removing the selected one clears selection.
    /// Unknown ids are a silent no-op.
    pub fn remove_annotation(&mut self, id: &str) -> Result<bool, EditorError> {
        if !self.index.contains_key(id) {
            return Ok(false);
        }
        let id = id.to_string();
        self.commit_with(|sample| sample.annotations.retain(|a| a.id() != id))?;
        self.selection.clear();
        Ok(true)
    }

    /// Batch removal by id set.
    pub fn remove_annotations(&mut self, ids: &[String]) -> Result<usize, EditorError> {
        let to_remove: std::collections::HashSet<&str> =
            ids.iter().map(String::as_str).collect();
        let before = self.annotations().len();
        self.commit_with(|sample| {
            sample
                .annotations
                .retain(|a| !to_remove.contains(a.id()))
        })?;
        self.selection.clear();
        Ok(before - self.annotations().len())
    }

    pub fn replace_all(&mut self, annotations: Vec<Annotation>) -> Result<(), EditorError> {
        for annotation in &annotations {
            annotation.validate(self.duration)?;
        }
        self.commit_with(|sample| sample.annotations = annotations)
    }

    // ---- selection & tool state ------------------------------------------

    /// Select an annotation: activates its tool and label, seeks the player
    /// to its anchor time and scrolls it into view. Unknown ids degrade to
    /// no selection.
    pub fn select_annotation(&mut self, id: &str) -> Result<(), EditorError> {
        let Some(annotation) = self.annotation(id).cloned() else {
            self.selection.clear();
            return Err(EditorError::UnknownAnnotation(id.to_string()));
        };
        self.selection.select(id);
        self.selection.set_active_tool(annotation.kind());
        let label = annotation.label().and_then(|value| {
            self.label_mapping
                .get(&annotation.kind())
                .and_then(|labels| labels.get(value))
                .cloned()
        });
        self.selection.set_active_label(label);
        self.player.sync_selection(&annotation);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Switch the active tool: clears selection and resets the active label
    /// to the tool's first configured label.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        self.selection.clear();
        self.selection.set_active_tool(tool);
        self.selection
            .set_active_label(self.config.labels_for(tool).first().cloned());
    }

    /// Activate a label of the active tool by value; a selected annotation
    /// is re-labeled (its stale attribute values dropped).
    pub fn set_active_label(&mut self, value: &str) -> Result<(), EditorError> {
        let tool = self.selection.active_tool();
        let Some(label) = self
            .config
            .labels_for(tool)
            .iter()
            .find(|l| l.value == value)
            .cloned()
        else {
            return Ok(());
        };
        self.selection.set_active_label(Some(label));

        if let Some(id) = self.selection.selected_id().map(str::to_string) {
            let new_value = value.to_string();
            self.commit_with(|sample| {
                if let Some(slot) = sample.annotations.iter_mut().find(|a| a.id() == id) {
                    slot.set_label(&new_value);
                }
            })?;
            self.selection.select(id);
        }
        Ok(())
    }

    /// A drawing gesture finished: fill schema default attribute values,
    /// store the annotation, select it, and signal `AnnotateEnd`.
    pub fn finish_annotation(
        &mut self,
        mut annotation: Annotation,
        pointer: Option<(f32, f32)>,
    ) -> Result<(), EditorError> {
        if let Some(label) = annotation.label() {
            let defaults = self
                .label_mapping
                .get(&annotation.kind())
                .and_then(|labels| labels.get(label))
                .map(|config| default_attribute_values(&config.attributes))
                .unwrap_or_default();
            annotation.set_attribute_values(defaults);
        }
        self.add_annotation(annotation.clone())?;
        self.events.emit(EditorEvent::AnnotateEnd {
            annotation,
            pointer,
        });
        Ok(())
    }

    // ---- undo/redo -------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.selection.clear_all();
        self.rebuild_views();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.rebuild_views();
        true
    }

    // ---- keyboard --------------------------------------------------------

    /// Dispatch a keyboard command. Repeats within the configured debounce
    /// window coalesce into one logical action. Returns whether the command
    /// had any effect.
    pub fn handle_key(&mut self, command: KeyCommand) -> Result<bool, EditorError> {
        let delay = self.key_debounce;
        let accepted = self
            .debouncers
            .entry(command)
            .or_insert_with(|| Debouncer::new(delay))
            .accept();
        if !accepted {
            return Ok(false);
        }

        match command {
            KeyCommand::ArrowUp | KeyCommand::ArrowDown => {
                if self.timed.is_empty() {
                    return Ok(false);
                }
                let current = self
                    .selection
                    .selected_id()
                    .and_then(|id| self.timed.iter().position(|a| a.id() == id));
                let target = match (command, current) {
                    (KeyCommand::ArrowUp, Some(i)) => i.saturating_sub(1),
                    (KeyCommand::ArrowDown, Some(i)) => (i + 1).min(self.timed.len() - 1),
                    _ => 0,
                };
                if current == Some(target) {
                    return Ok(false);
                }
                let id = self.timed[target].id().to_string();
                self.select_annotation(&id)?;
                Ok(true)
            }
            KeyCommand::Digit(n) => {
                let labels = self.config.labels_for(self.selection.active_tool());
                match labels.get(n.saturating_sub(1) as usize) {
                    Some(label) if (1..=9).contains(&n) => {
                        let value = label.value.clone();
                        self.set_active_label(&value)?;
                        Ok(true)
                    }
                    _ => Ok(false),
                }
            }
            KeyCommand::Delete => match self.selection.selected_id().map(str::to_string) {
                Some(id) => self.remove_annotation(&id),
                None => Ok(false),
            },
            KeyCommand::Escape => {
                self.selection.clear();
                Ok(true)
            }
        }
    }

    // ---- internals -------------------------------------------------------

    fn commit_with(&mut self, mutate: impl FnOnce(&mut Sample)) -> Result<(), EditorError> {
        let mut next = self.history.present().cloned().ok_or(EditorError::NoSample)?;
        mutate(&mut next);
        self.history.commit(next);
        self.rebuild_views();
        Ok(())
    }

    fn rebuild_views(&mut self) {
        self.index.clear();
        self.timed.clear();
        if let Some(sample) = self.history.present() {
            for (position, annotation) in sample.annotations.iter().enumerate() {
                self.index.insert(annotation.id().to_string(), position);
            }
            self.timed = sample
                .annotations
                .iter()
                .filter(|a| a.is_timed())
                .cloned()
                .collect();
            self.timed.sort_by_key(Annotation::order);
        }
        // The selected annotation may have disappeared under us.
        if let Some(id) = self.selection.selected_id() {
            if !self.index.contains_key(id) {
                self.selection.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotation::{AttributeDef, AttributeValues, LabelConfig, ToolConfig};

    fn config() -> EditorConfig {
        EditorConfig {
            segment: Some(ToolConfig {
                attributes: vec![
                    LabelConfig {
                        key: "Speech".to_string(),
                        value: "speech".to_string(),
                        color: None,
                        attributes: vec![AttributeDef::String {
                            key: "Note".to_string(),
                            value: "note".to_string(),
                            default_value: "n/a".to_string(),
                        }],
                    },
                    LabelConfig::new("Noise", "noise"),
                ],
            }),
            frame: Some(ToolConfig {
                attributes: vec![LabelConfig::new("Beep", "beep")],
            }),
            ..Default::default()
        }
    }

    fn segment(id: &str, start: f64, order: u32) -> Annotation {
        Annotation::Segment {
            id: id.to_string(),
            start,
            end: start + 1.0,
            label: "speech".to_string(),
            attributes: AttributeValues::new(),
            order,
            visible: true,
        }
    }

    fn editor_with(annotations: Vec<Annotation>) -> Editor {
        let mut editor = Editor::with_options(
            config(),
            MediaKind::Audio,
            EditorOptions {
                max_history: 20,
                key_debounce: Duration::ZERO,
            },
        );
        let mut sample = Sample::new(1, "a.mp3");
        sample.annotations = annotations;
        editor.load_sample(Some(sample));
        editor
    }

    #[test]
    fn mutations_route_through_history() {
        let mut editor = editor_with(vec![]);
        editor.add_annotation(segment("s1", 0.0, 1)).unwrap();
        editor.add_annotation(segment("s2", 5.0, 2)).unwrap();
        assert_eq!(editor.annotations().len(), 2);

        assert!(editor.undo());
        assert_eq!(editor.annotations().len(), 1);
        assert!(editor.undo());
        assert!(editor.annotations().is_empty());
        assert!(!editor.undo());
    }

    #[test]
    fn add_selects_the_new_annotation() {
        let mut editor = editor_with(vec![]);
        editor.add_annotation(segment("s1", 0.0, 1)).unwrap();
        assert_eq!(editor.selection().selected_id(), Some("s1"));
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        assert!(matches!(
            editor.add_annotation(segment("s1", 3.0, 2)),
            Err(EditorError::Invalid(AnnotationError::DuplicateId(_)))
        ));
    }

    #[test]
    fn timed_view_sorts_by_order_stably() {
        let mut editor = editor_with(vec![
            segment("b", 5.0, 2),
            segment("a", 9.0, 1),
            segment("tie1", 1.0, 3),
            segment("tie2", 2.0, 3),
        ]);
        editor
            .add_annotation(Annotation::Tag {
                id: "t1".to_string(),
                values: AttributeValues::new(),
                order: 0,
            })
            .unwrap();

        let ids: Vec<&str> = editor.timed_annotations().iter().map(|a| a.id()).collect();
        // Tag excluded; equal orders keep insertion order.
        assert_eq!(ids, vec!["a", "b", "tie1", "tie2"]);
    }

    #[test]
    fn removing_selected_clears_selection() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor.select_annotation("s1").unwrap();
        assert!(editor.remove_annotation("s1").unwrap());
        assert!(editor.selection().selected_id().is_none());
    }

    #[test]
    fn remove_unknown_is_silent_noop() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        let history_before = editor.can_undo();
        assert!(!editor.remove_annotation("ghost").unwrap());
        assert_eq!(editor.can_undo(), history_before);
    }

    #[test]
    fn batch_remove_by_id_set() {
        let mut editor = editor_with(vec![
            segment("s1", 0.0, 1),
            segment("s2", 2.0, 2),
            segment("s3", 4.0, 3),
        ]);
        let removed = editor
            .remove_annotations(&["s1".to_string(), "s3".to_string(), "ghost".to_string()])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(editor.annotations()[0].id(), "s2");
    }

    #[test]
    fn select_activates_tool_and_label() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor.set_active_tool(ToolKind::Frame);
        editor.select_annotation("s1").unwrap();
        assert_eq!(editor.selection().active_tool(), ToolKind::Segment);
        assert_eq!(
            editor.selection().active_label().map(|l| l.value.as_str()),
            Some("speech")
        );
    }

    #[test]
    fn select_unknown_falls_back_to_no_selection() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor.select_annotation("s1").unwrap();
        assert!(editor.select_annotation("ghost").is_err());
        assert!(editor.selection().selected_id().is_none());
    }

    #[test]
    fn tool_switch_resets_label_to_first_configured() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor.select_annotation("s1").unwrap();
        editor.set_active_tool(ToolKind::Frame);
        assert!(editor.selection().selected_id().is_none());
        assert_eq!(
            editor.selection().active_label().map(|l| l.value.as_str()),
            Some("beep")
        );
    }

    #[test]
    fn relabeling_selected_drops_old_attributes() {
        let mut annotation = segment("s1", 0.0, 1);
        let mut values = AttributeValues::new();
        values.insert("note".to_string(), serde_json::json!("important"));
        annotation.set_attribute_values(values);

        let mut editor = editor_with(vec![annotation]);
        editor.select_annotation("s1").unwrap();
        editor.set_active_label("noise").unwrap();

        let updated = editor.annotation("s1").unwrap();
        assert_eq!(updated.label(), Some("noise"));
        assert!(updated.attribute_values().is_empty());
        assert_eq!(editor.selection().selected_id(), Some("s1"));
    }

    #[test]
    fn undo_clears_selection() {
        let mut editor = editor_with(vec![]);
        editor.add_annotation(segment("s1", 0.0, 1)).unwrap();
        assert_eq!(editor.selection().selected_id(), Some("s1"));
        editor.undo();
        assert!(editor.selection().selected_id().is_none());
        assert!(editor.selection().active_label().is_none());
    }

    #[test]
    fn redo_restores_the_undone_edit() {
        let mut editor = editor_with(vec![]);
        editor.add_annotation(segment("s1", 0.0, 1)).unwrap();
        editor.undo();
        assert!(editor.annotations().is_empty());
        assert!(editor.redo());
        assert_eq!(editor.annotations().len(), 1);
    }

    #[test]
    fn load_sample_resets_history() {
        let mut editor = editor_with(vec![]);
        editor.add_annotation(segment("s1", 0.0, 1)).unwrap();
        editor.add_annotation(segment("s2", 1.0, 2)).unwrap();
        editor.add_annotation(segment("s3", 2.0, 3)).unwrap();
        assert!(editor.can_undo());

        editor.load_sample(Some(Sample::new(2, "b.mp3")));
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
    }

    #[test]
    fn arrow_down_clamps_at_last_item() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1), segment("s2", 2.0, 2)]);
        editor.handle_key(KeyCommand::ArrowDown).unwrap();
        assert_eq!(editor.selection().selected_id(), Some("s1"));
        editor.handle_key(KeyCommand::ArrowDown).unwrap();
        assert_eq!(editor.selection().selected_id(), Some("s2"));
        // At the end: no wraparound, selection unchanged.
        assert!(!editor.handle_key(KeyCommand::ArrowDown).unwrap());
        assert_eq!(editor.selection().selected_id(), Some("s2"));
    }

    #[test]
    fn arrow_up_clamps_at_first_item() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1), segment("s2", 2.0, 2)]);
        editor.select_annotation("s1").unwrap();
        assert!(!editor.handle_key(KeyCommand::ArrowUp).unwrap());
        assert_eq!(editor.selection().selected_id(), Some("s1"));
    }

    #[test]
    fn digit_selects_nth_label() {
        let mut editor = editor_with(vec![]);
        editor.handle_key(KeyCommand::Digit(2)).unwrap();
        assert_eq!(
            editor.selection().active_label().map(|l| l.value.as_str()),
            Some("noise")
        );
        // Past the configured labels: no-op.
        assert!(!editor.handle_key(KeyCommand::Digit(9)).unwrap());
        assert_eq!(
            editor.selection().active_label().map(|l| l.value.as_str()),
            Some("noise")
        );
    }

    #[test]
    fn delete_removes_selected_and_escape_clears() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor.select_annotation("s1").unwrap();
        editor.handle_key(KeyCommand::Delete).unwrap();
        assert!(editor.annotations().is_empty());

        editor.add_annotation(segment("s2", 0.0, 1)).unwrap();
        editor.handle_key(KeyCommand::Escape).unwrap();
        assert!(editor.selection().selected_id().is_none());
    }

    #[test]
    fn key_repeats_are_debounced() {
        let mut editor = Editor::with_options(
            config(),
            MediaKind::Audio,
            EditorOptions {
                max_history: 20,
                key_debounce: Duration::from_secs(60),
            },
        );
        let mut sample = Sample::new(1, "a.mp3");
        sample.annotations = vec![segment("s1", 0.0, 1), segment("s2", 2.0, 2)];
        editor.load_sample(Some(sample));

        assert!(editor.handle_key(KeyCommand::ArrowDown).unwrap());
        // Immediate repeat coalesces into the first action.
        assert!(!editor.handle_key(KeyCommand::ArrowDown).unwrap());
        assert_eq!(editor.selection().selected_id(), Some("s1"));
    }

    #[test]
    fn finish_annotation_fills_defaults_and_signals() {
        let mut editor = editor_with(vec![]);
        let events = editor.subscribe();

        editor
            .finish_annotation(segment("s1", 0.0, 1), Some((10.0, 20.0)))
            .unwrap();

        let stored = editor.annotation("s1").unwrap();
        assert_eq!(stored.attribute_values()["note"], serde_json::json!("n/a"));

        match events.recv_timeout(Duration::from_secs(1)).unwrap() {
            EditorEvent::AnnotateEnd { annotation, pointer } => {
                assert_eq!(annotation.id(), "s1");
                assert_eq!(pointer, Some((10.0, 20.0)));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn upsert_appends_then_replaces() {
        let mut editor = editor_with(vec![]);
        editor.upsert_annotation(segment("s1", 0.0, 1)).unwrap();
        assert_eq!(editor.annotations().len(), 1);

        let mut edited = segment("s1", 0.0, 1);
        let mut values = AttributeValues::new();
        values.insert("note".to_string(), serde_json::json!("redone"));
        edited.set_attribute_values(values);
        editor.upsert_annotation(edited).unwrap();
        assert_eq!(editor.annotations().len(), 1);
        assert_eq!(
            editor.annotation("s1").unwrap().attribute_values()["note"],
            serde_json::json!("redone")
        );
    }

    #[test]
    fn update_unknown_annotation_errors() {
        let mut editor = editor_with(vec![]);
        assert!(matches!(
            editor.update_annotation(segment("ghost", 0.0, 1)),
            Err(EditorError::UnknownAnnotation(_))
        ));
    }

    #[test]
    fn out_of_duration_annotation_is_rejected() {
        let mut editor = editor_with(vec![]);
        editor.set_duration(10.0);
        assert!(editor.add_annotation(segment("s1", 9.5, 1)).is_err());
        assert!(editor.add_annotation(segment("s2", 3.0, 1)).is_ok());
    }

    #[test]
    fn replace_all_swaps_the_collection() {
        let mut editor = editor_with(vec![segment("s1", 0.0, 1)]);
        editor
            .replace_all(vec![segment("n1", 1.0, 1), segment("n2", 2.0, 2)])
            .unwrap();
        assert_eq!(editor.annotations().len(), 2);
        assert!(editor.annotation("s1").is_none());
        // One undo restores the previous collection.
        editor.undo();
        assert_eq!(editor.annotations().len(), 1);
    }
}
