// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! The pack registry: every pack the host knows about, which one is current, and who
//! needs to hear about it when that changes.

mod cycle;
mod events;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::audio::{clone_sample, scratch_for, Sample};
use crate::pack::{qualify, ResourcePack, NOTE_COUNT};

pub use cycle::PackCycler;
pub use events::{PackChanged, SubscriptionId};

use events::Listeners;

/// The registry of resource packs. Packs are kept in the order they were added and
/// qualified names are not required to be unique; lookups return the first match.
pub struct PackRegistry {
    packs: Vec<Arc<ResourcePack>>,
    current: Arc<ResourcePack>,
    listeners: Listeners,
}

impl Default for PackRegistry {
    fn default() -> Self {
        PackRegistry::new()
    }
}

impl fmt::Debug for PackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackRegistry")
            .field("packs", &self.packs)
            .field("current", &self.current.qualified_name())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PackRegistry {
    /// Creates an empty registry. The current pack starts out as an empty placeholder
    /// that is not itself registered.
    pub fn new() -> PackRegistry {
        PackRegistry {
            packs: Vec::new(),
            current: Arc::new(ResourcePack::placeholder()),
            listeners: Listeners::default(),
        }
    }

    /// Appends a pack.
    pub fn add(&mut self, pack: Arc<ResourcePack>) {
        debug!(pack = %pack, position = self.packs.len(), "Registering pack");
        self.packs.push(pack);
    }

    /// Removes the first pack with the given qualified name. The current pack can't be
    /// removed; swap to another pack first.
    pub fn remove(&mut self, qualified_name: &str) -> Option<Arc<ResourcePack>> {
        let position = self
            .packs
            .iter()
            .position(|pack| pack.has_qualified_name(qualified_name))?;

        if Arc::ptr_eq(&self.packs[position], &self.current) {
            warn!(
                pack = qualified_name,
                "Refusing to remove the current pack"
            );
            return None;
        }

        debug!(pack = qualified_name, "Removing pack");
        Some(self.packs.remove(position))
    }

    /// Returns the first pack with the given qualified name.
    pub fn find(&self, qualified_name: &str) -> Option<Arc<ResourcePack>> {
        self.packs
            .iter()
            .find(|pack| pack.has_qualified_name(qualified_name))
            .map(Arc::clone)
    }

    /// Returns the first pack with the given namespace and name.
    pub fn find_parts(&self, namespace: &str, name: &str) -> Option<Arc<ResourcePack>> {
        self.find(&qualify(namespace, name))
    }

    /// Returns the current pack.
    pub fn current(&self) -> Arc<ResourcePack> {
        Arc::clone(&self.current)
    }

    /// Makes the given pack current and notifies every subscriber, in the order they
    /// subscribed. Setting the pack that is already current does nothing.
    ///
    /// The pack doesn't have to be registered.
    pub fn set_current(&mut self, pack: Arc<ResourcePack>) {
        if Arc::ptr_eq(&pack, &self.current) {
            return;
        }

        let old = std::mem::replace(&mut self.current, Arc::clone(&pack));
        info!(
            old = %old,
            new = %pack,
            volume = pack.volume_modifier(),
            "Current pack changed"
        );

        let event = PackChanged { new: pack, old };
        self.listeners.dispatch(&event);
    }

    /// Makes an independent copy of a pack. Every note is copied into a fresh buffer;
    /// the copy is not registered.
    pub fn clone_pack(&self, pack: &ResourcePack) -> ResourcePack {
        let mut scratch = scratch_for(pack.notes().map(|(_, sample)| sample));

        let mut copy = ResourcePack::new(
            pack.name(),
            pack.namespace(),
            pack.volume_modifier(),
            pack.source_directory().map(|dir| dir.to_path_buf()),
        );
        for (pitch, sample) in pack.notes() {
            copy.set_note(pitch, clone_sample(sample, Some(&mut scratch)));
        }
        copy
    }

    /// Registers a callback for current pack changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PackChanged) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Returns the packs in the order they were added.
    pub fn packs(&self) -> impl Iterator<Item = &Arc<ResourcePack>> {
        self.packs.iter()
    }

    /// Returns the built-in packs in the order they were added.
    pub fn built_in_packs(&self) -> impl Iterator<Item = &Arc<ResourcePack>> {
        self.packs.iter().filter(|pack| pack.is_built_in())
    }

    /// Returns the custom packs in the order they were added.
    pub fn custom_packs(&self) -> impl Iterator<Item = &Arc<ResourcePack>> {
        self.packs.iter().filter(|pack| !pack.is_built_in())
    }

    /// Returns the position of this exact pack instance.
    pub fn position_of(&self, pack: &Arc<ResourcePack>) -> Option<usize> {
        self.packs.iter().position(|p| Arc::ptr_eq(p, pack))
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

/// Copies a set of host samples into fresh buffers, sharing one scratch buffer.
pub(crate) fn copy_notes(notes: &[Sample; NOTE_COUNT]) -> [Sample; NOTE_COUNT] {
    let mut scratch = scratch_for(notes.iter());
    std::array::from_fn(|i| clone_sample(&notes[i], Some(&mut scratch)))
}
