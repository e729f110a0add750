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
use std::fmt;
use std::sync::Arc;

use crate::pack::ResourcePack;

/// Dispatched once for every actual change of the current pack.
#[derive(Clone)]
pub struct PackChanged {
    /// The pack that just became current.
    pub new: Arc<ResourcePack>,
    /// The pack that was current before.
    pub old: Arc<ResourcePack>,
}

impl fmt::Debug for PackChanged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackChanged({} -> {})", self.old, self.new)
    }
}

/// Identifies a subscription so that it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PackChanged)>;

/// Subscribers in the order they subscribed.
#[derive(Default)]
pub(super) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(super) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(super) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(super) fn dispatch(&mut self, event: &PackChanged) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
