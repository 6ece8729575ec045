//! Instance registry: stable handles for Backing Instances.
//!
//! Descriptors are replaced on every render pass, so the devtools consumer
//! cannot use them as identities. The registry maps the engine's Backing
//! Instance (which survives re-renders) to an opaque [`InstanceHandle`],
//! allocating handles lazily on first lookup.
//!
//! Entries are only ever inserted; the whole map is dropped by
//! [`InstanceRegistry::reset`]. Keys are generational [`InstanceId`]s tagged
//! with their arena, so the registry never keeps an instance alive, never
//! confuses a torn-down instance with the one that later reuses its slot, and
//! never merges instances of two engines.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroU64;

use crate::devtools::kind::display_name;
use crate::error::{DevtoolsError, Result};
use crate::instance::InstanceId;
use crate::vnode::VNode;

/// Opaque identity handed to the devtools consumer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct InstanceHandle(NonZeroU64);

impl InstanceHandle {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

pub struct InstanceRegistry {
    handles: HashMap<InstanceId, InstanceHandle>,
    /// Survives `reset`, so a handle value is never handed out twice.
    /// `None` once every `u64` handle has been used.
    next_handle: Option<NonZeroU64>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            next_handle: Some(NonZeroU64::MIN),
        }
    }

    /// Resolve a descriptor to the handle of its Backing Instance.
    ///
    /// Descriptors that were never committed have no Backing Instance and
    /// fail with [`DevtoolsError::Unresolvable`].
    pub fn resolve(&mut self, vnode: &VNode) -> Result<InstanceHandle> {
        let Some(instance) = vnode.instance() else {
            let name = display_name(vnode.component());
            if vnode.id().is_placeholder() {
                log::warn!("Cannot resolve detached descriptor ({})", name);
            } else {
                log::warn!("Cannot resolve uncommitted descriptor {:?} ({})", vnode.id(), name);
            }
            return Err(DevtoolsError::Unresolvable {
                node: vnode.id(),
                name,
            });
        };

        if let Some(&handle) = self.handles.get(&instance) {
            log::trace!("Instance {:?} -> existing handle {}", instance, handle.get());
            return Ok(handle);
        }

        let next = self.next_handle.ok_or(DevtoolsError::HandlesExhausted)?;
        let handle = InstanceHandle(next);
        self.next_handle = next.checked_add(1);
        self.handles.insert(instance, handle);
        log::debug!("Instance {:?} -> new handle {}", instance, handle.get());
        Ok(handle)
    }

    /// Handle already assigned to the descriptor's Backing Instance, without
    /// allocating one.
    pub fn lookup(&self, vnode: &VNode) -> Option<InstanceHandle> {
        vnode
            .instance()
            .and_then(|instance| self.handles.get(&instance).copied())
    }

    /// Forget every assigned handle.
    pub fn reset(&mut self) {
        log::info!("Clearing instance registry ({} entries)", self.handles.len());
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Thread-local default registry
// ---------------------------------------------------------------------------

thread_local! {
    static REGISTRY: RefCell<InstanceRegistry> = RefCell::new(InstanceRegistry::new());
}

/// Resolve a descriptor using the thread's default registry.
pub fn resolve_instance(vnode: &VNode) -> Result<InstanceHandle> {
    REGISTRY.with(|reg| reg.borrow_mut().resolve(vnode))
}

/// Clear the thread's default registry.
pub fn clear_state() {
    REGISTRY.with(|reg| reg.borrow_mut().reset());
}

/// Handle already assigned by the thread's default registry, if any.
pub fn lookup_instance(vnode: &VNode) -> Option<InstanceHandle> {
    with_registry(|reg| reg.lookup(vnode))
}

fn with_registry<R>(f: impl FnOnce(&InstanceRegistry) -> R) -> R {
    REGISTRY.with(|reg| f(&reg.borrow()))
}
