//! Pass-through bridge to the media player and the timeline widget.
//!
//! Both may be unmounted when the editor calls in (the player element is
//! created lazily by the host); every call on an unmounted target is
//! silently absorbed instead of raised.

use annotation::Annotation;

/// The playback surface: an `<audio>`/`<video>`-like element.
pub trait MediaPlayer {
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    fn seek(&mut self, time: f64);
    fn play(&mut self);
    fn pause(&mut self);
}

/// The visual annotation timeline next to the player.
pub trait TimelineView {
    /// Bring an annotation into view in the timeline/sidebar.
    fn scroll_to(&mut self, annotation: &Annotation);
    /// Move the timeline cursor.
    fn update_time(&mut self, time: f64);
}

#[derive(Default)]
pub struct PlayerBridge {
    player: Option<Box<dyn MediaPlayer>>,
    view: Option<Box<dyn TimelineView>>,
}

impl PlayerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount_player(&mut self, player: Box<dyn MediaPlayer>) {
        self.player = Some(player);
    }

    pub fn mount_view(&mut self, view: Box<dyn TimelineView>) {
        self.view = Some(view);
    }

    pub fn unmount(&mut self) {
        self.player = None;
        self.view = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.player.is_some()
    }

    pub fn current_time(&self) -> Option<f64> {
        self.player.as_ref().map(|p| p.current_time())
    }

    pub fn duration(&self) -> Option<f64> {
        self.player.as_ref().map(|p| p.duration())
    }

    pub fn seek(&mut self, time: f64) {
        if let Some(player) = self.player.as_mut() {
            player.seek(time);
        }
    }

    pub fn play(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.play();
        }
    }

    pub fn pause(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.pause();
        }
    }

    /// Selection changed: seek playback to the annotation's anchor time and
    /// scroll it into view.
    pub fn sync_selection(&mut self, annotation: &Annotation) {
        let Some(anchor) = annotation.anchor_time() else {
            return;
        };
        if let Some(player) = self.player.as_mut() {
            player.seek(anchor);
        }
        if let Some(view) = self.view.as_mut() {
            view.scroll_to(annotation);
            view.update_time(anchor);
        }
    }
}
