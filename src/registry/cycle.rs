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
use std::sync::Arc;

use tracing::{info, span, Level, Span};

use super::PackRegistry;
use crate::pack::ResourcePack;

/// PackCycler steps the current pack through the registry in insertion order,
/// wrapping around at either end.
pub struct PackCycler {
    /// The position of the current pack within the registry.
    position: usize,
    /// The logging span.
    span: Span,
}

impl Default for PackCycler {
    fn default() -> Self {
        PackCycler::new()
    }
}

impl PackCycler {
    /// Creates a new cycler positioned at the start of the registry.
    pub fn new() -> PackCycler {
        PackCycler {
            position: 0,
            span: span!(Level::INFO, "pack cycler"),
        }
    }

    /// Creates a cycler positioned at the registry's current pack.
    pub fn synced(registry: &PackRegistry) -> PackCycler {
        let mut cycler = PackCycler::new();
        cycler.sync(registry);
        cycler
    }

    /// Moves the position to the registry's current pack. If the current pack isn't
    /// registered (the startup placeholder, for instance), the position is reset to
    /// the start.
    pub fn sync(&mut self, registry: &PackRegistry) {
        self.position = registry.position_of(&registry.current()).unwrap_or(0);
    }

    /// The position of the current pack.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Makes the next pack current, wrapping to the first pack after the last one.
    /// Returns None if the registry is empty.
    pub fn forward(&mut self, registry: &mut PackRegistry) -> Option<Arc<ResourcePack>> {
        let _enter = self.span.enter();

        let len = registry.len();
        if len == 0 {
            return None;
        }
        self.position = (self.position + 1) % len;

        let pack = self.select(registry)?;
        info!(
            position = self.position,
            pack = %pack,
            "Moving to next pack."
        );
        Some(pack)
    }

    /// Makes the previous pack current, wrapping to the last pack before the first one.
    /// Returns None if the registry is empty.
    pub fn backward(&mut self, registry: &mut PackRegistry) -> Option<Arc<ResourcePack>> {
        let _enter = self.span.enter();

        let len = registry.len();
        if len == 0 {
            return None;
        }
        self.position = (self.position.min(len) + len - 1) % len;

        let pack = self.select(registry)?;
        info!(
            position = self.position,
            pack = %pack,
            "Moving to previous pack."
        );
        Some(pack)
    }

    fn select(&self, registry: &mut PackRegistry) -> Option<Arc<ResourcePack>> {
        let pack = registry.packs().nth(self.position).map(Arc::clone)?;
        registry.set_current(Arc::clone(&pack));
        Some(pack)
    }
}
