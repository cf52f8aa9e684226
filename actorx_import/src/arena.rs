use actorx_ids::InstanceID;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("actor index {index} is outside the arena of {capacity} slots")]
    OutOfRange { index: usize, capacity: usize },

    #[error("actor index {index} was already instantiated")]
    AlreadyWritten { index: usize },
}

/// Actor index -> instance handle, sized once to the actor count.
///
/// Every slot is written at most once. Handle index is `actor + 1` so slot 0
/// never produces the nil handle; the generation is the import session.
pub struct InstanceArena {
    slots: Vec<Option<InstanceID>>,
    generation: u32,
    filled: usize,
}

impl InstanceArena {
    pub fn with_capacity(capacity: usize, generation: u32) -> Self {
        Self {
            slots: vec![None; capacity],
            generation,
            filled: 0,
        }
    }

    pub fn insert(&mut self, actor: usize) -> Result<InstanceID, ArenaError> {
        let capacity = self.slots.len();
        let slot = self.slots.get_mut(actor).ok_or(ArenaError::OutOfRange {
            index: actor,
            capacity,
        })?;
        if slot.is_some() {
            return Err(ArenaError::AlreadyWritten { index: actor });
        }

        let id = InstanceID::from_parts(actor as u32 + 1, self.generation);
        *slot = Some(id);
        self.filled += 1;
        Ok(id)
    }

    /// `None` until the actor has been instantiated.
    pub fn get(&self, actor: usize) -> Option<InstanceID> {
        self.slots.get(actor).copied().flatten()
    }

    /// Inverse of [`InstanceArena::get`]; rejects handles from other sessions.
    pub fn actor_of(&self, id: InstanceID) -> Option<usize> {
        if !id.is_from_session(self.generation) {
            return None;
        }
        let actor = id.index() as usize - 1;
        (self.get(actor) == Some(id)).then_some(actor)
    }

    pub fn contains(&self, id: InstanceID) -> bool {
        self.actor_of(id).is_some()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Iterator over instantiated actors.
    pub fn iter(&self) -> impl Iterator<Item = (usize, InstanceID)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(actor, slot)| slot.map(|id| (actor, id)))
    }
}
