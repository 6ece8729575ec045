//! Backing Instances.
//!
//! The engine allocates one Backing Instance per committed tree position and
//! keeps it alive across render passes while the same component stays there.
//! Ids are generational: once released, a slot's next instance gets a new
//! generation, so an `InstanceId` never refers to two different instances.
//! Each arena also carries a process-unique id, so instances of two engines
//! never compare equal either.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::component::ComponentInstance;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InstanceId {
    arena: u32,
    index: u32,
    generation: u32,
}

impl InstanceId {
    /// Id of the arena that allocated this instance.
    pub fn arena(self) -> u32 {
        self.arena
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

struct Slot {
    generation: u32,
    live: bool,
    /// Constructed state for class components
    state: Option<Box<dyn ComponentInstance>>,
}

/// Engine-owned storage for Backing Instances.
pub struct InstanceArena {
    id: u32,
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    live_count: usize,
}

impl InstanceArena {
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            free_indices: Vec::new(),
            live_count: 0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn allocate(&mut self, state: Option<Box<dyn ComponentInstance>>) -> InstanceId {
        self.live_count += 1;

        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.live = true;
            slot.state = state;
            return InstanceId {
                arena: self.id,
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            live: true,
            state,
        });
        InstanceId {
            arena: self.id,
            index,
            generation: 0,
        }
    }

    /// Tear down an instance. Stale ids are ignored.
    pub fn release(&mut self, id: InstanceId) {
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.live = false;
        slot.state = None;
        self.free_indices.push(id.index);
        self.live_count -= 1;
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        if id.arena != self.id {
            return false;
        }
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.live && slot.generation == id.generation)
    }

    /// Mutable access to a class instance's state.
    pub fn with_state_mut<R>(
        &mut self,
        id: InstanceId,
        f: impl FnOnce(&mut dyn ComponentInstance) -> R,
    ) -> Option<R> {
        let state = self.slot_mut(id)?.state.as_mut()?;
        Some(f(state.as_mut()))
    }

    pub fn live_count(&self) -> usize {
        self.live_count
    }

    fn slot_mut(&mut self, id: InstanceId) -> Option<&mut Slot> {
        if id.arena != self.id {
            return None;
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.live && slot.generation == id.generation)
    }
}

impl Default for InstanceArena {
    fn default() -> Self {
        Self::new()
    }
}
