//! Skyisle Animation
//!
//! Keyframe animation for loaded models:
//!
//! - [`KeyframeTrack`]: linear / step / cubic-spline sampling with a cursor cache
//! - [`AnimationClip`]: named set of tracks targeting nodes by name
//! - [`AnimationAction`]: playback state (time, time scale, loop mode)
//! - [`AnimationMixer`]: advances actions and writes into an [`AnimationTarget`]
//! - [`Binder`]: resolves track node names to scene handles

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode};
pub use binder::Binder;
pub use binding::{AnimationTarget, PropertyBinding, TargetPath, TrackValue};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::AnimationMixer;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
