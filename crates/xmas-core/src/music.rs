use crate::state::TreeState;

/// A looping background track the director can start and stop.
pub trait AudioTrack {
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64 {
        0.0
    }
    fn duration(&self) -> f64 {
        0.0
    }
    fn seek(&mut self, _seconds: f64) {}
}

/// Two tracks, one per tree state. Only the track for the current state
/// ever plays.
pub struct MusicDirector<T: AudioTrack> {
    chaos: T,
    formed: T,
    state: TreeState,
    playing: bool,
}

impl<T: AudioTrack> MusicDirector<T> {
    pub fn new(chaos: T, formed: T, state: TreeState) -> Self {
        Self {
            chaos,
            formed,
            state,
            playing: true,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn track(&self, state: TreeState) -> &T {
        match state {
            TreeState::Chaos => &self.chaos,
            TreeState::Formed => &self.formed,
        }
    }

    fn track_mut(&mut self, state: TreeState) -> &mut T {
        match state {
            TreeState::Chaos => &mut self.chaos,
            TreeState::Formed => &mut self.formed,
        }
    }

    pub fn current(&self) -> &T {
        self.track(self.state)
    }

    /// Start the current track if playback is enabled. Called once at startup.
    pub fn start(&mut self) {
        if self.playing {
            self.track_mut(self.state).play();
        }
    }

    /// Follow a tree-state transition: silence the other slot, start this one.
    pub fn on_state(&mut self, state: TreeState) {
        self.state = state;
        let other = match state {
            TreeState::Chaos => TreeState::Formed,
            TreeState::Formed => TreeState::Chaos,
        };
        self.track_mut(other).pause();
        if self.playing {
            self.track_mut(state).play();
        }
        log::info!("[audio] switched to {} track", state.label());
    }

    /// Swap the track in one slot. The new track starts at once if its slot
    /// is the audible one.
    pub fn replace(&mut self, state: TreeState, track: T) {
        let slot = self.track_mut(state);
        slot.pause();
        *slot = track;
        if state == self.state && self.playing {
            self.track_mut(state).play();
        }
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        let state = self.state;
        let track = self.track_mut(state);
        if playing {
            track.play();
        } else {
            track.pause();
        }
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.set_playing(!self.playing);
        self.playing
    }

    pub fn seek(&mut self, seconds: f64) {
        let state = self.state;
        self.track_mut(state).seek(seconds);
    }

    /// Playback progress of the current track in \[0, 1\].
    pub fn progress(&self) -> f32 {
        let t = self.current();
        let duration = t.duration();
        if duration.is_finite() && duration > 0.0 {
            (t.current_time() / duration).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// `m:ss` clock label. Non-finite input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
