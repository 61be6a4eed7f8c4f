use crate::action::AnimationAction;
use crate::binding::AnimationTarget;

/// Plays the actions bound to one model.
///
/// A mixer with no actions is valid: [`update`](Self::update) is then a no-op.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Adds an action and returns its index.
    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    #[must_use]
    pub fn action(&self, index: usize) -> Option<&AnimationAction> {
        self.actions.get(index)
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut AnimationAction> {
        self.actions.get_mut(index)
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// True if at least one action is enabled and not paused.
    #[must_use]
    pub fn has_active_clip(&self) -> bool {
        self.actions.iter().any(AnimationAction::is_playing)
    }

    /// Advances every action by `dt` and writes the sampled values to `target`.
    pub fn update<T>(&mut self, dt: f32, target: &mut T)
    where
        T: AnimationTarget + ?Sized,
    {
        for action in &mut self.actions {
            action.update(dt);
        }

        for action in &mut self.actions {
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                if let Some(value) = action.sample_track(binding.track_index) {
                    target.apply_track_value(binding.node, binding.target, value);
                }
            }
        }
    }
}
