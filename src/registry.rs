use std::fmt;

use skyisle_animation::AnimationMixer;
use skyisle_core::{Error, NodeHandle, Result};
use skyisle_scene::ShadowFlags;

/// The fixed set of models the scene is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityName {
    Island,
    Bird,
}

impl EntityName {
    pub const ALL: [EntityName; 2] = [EntityName::Island, EntityName::Bird];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityName::Island => "island",
            EntityName::Bird => "bird",
        }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded model instance.
///
/// Position, rotation and scale live on the scene node `root`; the entity
/// only records which subgraph it owns.
#[derive(Debug, Clone)]
pub struct Entity {
    pub root: NodeHandle,
    /// Shadow flags applied to every mesh under `root`.
    pub shadows: ShadowFlags,
    /// Player for the model's clips. `None` when the model has none.
    pub mixer: Option<AnimationMixer>,
}

impl Entity {
    #[must_use]
    pub fn new(root: NodeHandle) -> Self {
        Self {
            root,
            shadows: ShadowFlags::NONE,
            mixer: None,
        }
    }

    #[must_use]
    pub fn with_shadows(mut self, shadows: ShadowFlags) -> Self {
        self.shadows = shadows;
        self
    }

    #[must_use]
    pub fn with_mixer(mut self, mixer: AnimationMixer) -> Self {
        self.mixer = Some(mixer);
        self
    }
}

/// Lifecycle of one registry entry.
///
/// `Ready` is terminal: nothing moves a slot out of it. `Failed` is terminal
/// too unless the owner explicitly writes an entity with
/// [`SceneRegistry::set`].
#[derive(Debug, Clone, Default)]
pub enum Slot {
    #[default]
    Empty,
    Loading,
    Failed,
    Ready(Entity),
}

impl Slot {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready(_))
    }

    #[must_use]
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Slot::Ready(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Named slots for the entities the per-frame update reads.
///
/// Slots fill in whatever order their loads complete; readers must treat an
/// absent entity as the normal state before that.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    island: Slot,
    bird: Slot,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slot(&self, name: EntityName) -> &Slot {
        match name {
            EntityName::Island => &self.island,
            EntityName::Bird => &self.bird,
        }
    }

    fn slot_mut(&mut self, name: EntityName) -> &mut Slot {
        match name {
            EntityName::Island => &mut self.island,
            EntityName::Bird => &mut self.bird,
        }
    }

    /// Stores `entity` under `name`. Fails if the slot is already populated.
    pub fn set(&mut self, name: EntityName, entity: Entity) -> Result<()> {
        let slot = self.slot_mut(name);
        if slot.is_ready() {
            return Err(Error::SlotOccupied(name.as_str()));
        }
        *slot = Slot::Ready(entity);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: EntityName) -> Option<&Entity> {
        self.slot(name).entity()
    }

    pub fn get_mut(&mut self, name: EntityName) -> Option<&mut Entity> {
        match self.slot_mut(name) {
            Slot::Ready(entity) => Some(entity),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_present(&self, name: EntityName) -> bool {
        self.slot(name).is_ready()
    }

    /// Records an in-flight load. Only an `Empty` slot accepts one; returns
    /// whether the slot changed.
    pub fn mark_loading(&mut self, name: EntityName) -> bool {
        let slot = self.slot_mut(name);
        if matches!(slot, Slot::Empty) {
            *slot = Slot::Loading;
            true
        } else {
            false
        }
    }

    /// Records a failed load. A populated slot is left untouched.
    pub fn mark_failed(&mut self, name: EntityName) {
        let slot = self.slot_mut(name);
        if !slot.is_ready() {
            *slot = Slot::Failed;
        }
    }

    /// Number of populated slots.
    #[must_use]
    pub fn present_count(&self) -> usize {
        EntityName::ALL.iter().filter(|&&name| self.is_present(name)).count()
    }
}
