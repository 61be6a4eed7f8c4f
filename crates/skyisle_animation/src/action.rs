use std::sync::Arc;

use crate::binding::{PropertyBinding, TrackValue};
use crate::clip::{AnimationClip, TrackData};
use crate::tracks::KeyframeCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// Playback state of one clip.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,

    pub(crate) track_cursors: Vec<KeyframeCursor>,

    /// PingPong only: `time` is currently running from the end back to zero.
    reversed: bool,
}

impl AnimationAction {
    /// Creates a playing, looping action at time zero.
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            paused: false,
            enabled: true,
            bindings: Vec::new(),
            track_cursors: vec![KeyframeCursor::default(); track_count],
            reversed: false,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.enabled && !self.paused
    }

    /// Advances local time by `dt * time_scale`, then folds it into the clip
    /// range according to the loop mode.
    ///
    /// PingPong keeps its direction between calls, so splitting `dt` across
    /// several updates lands on the same time as one update.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        let step = dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                self.time += step;
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time = (self.time + step).rem_euclid(duration);
            }
            LoopMode::PingPong => {
                // Position on the unfolded forward-then-back cycle.
                let double_duration = duration * 2.0;
                let phase = if self.reversed {
                    double_duration - self.time
                } else {
                    self.time
                };
                let t = (phase + step).rem_euclid(double_duration);
                self.reversed = t > duration;
                self.time = if self.reversed { double_duration - t } else { t };
            }
        }
    }

    /// Samples track `track_index` at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => {
                t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion)
            }
        }
    }
}
