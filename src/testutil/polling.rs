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
use std::{
    thread,
    time::{Duration, SystemTime},
};

use crate::audio::{DecodeResult, DecodeTicket, Decoder};
use crate::loader::PackLoader;
use crate::registry::PackRegistry;

const TIMEOUT: Duration = Duration::from_secs(10);

/// Wait for the given predicate to return true or fail.
#[inline]
pub fn eventually<F>(mut predicate: F, error_msg: &str)
where
    F: FnMut() -> bool,
{
    let start = SystemTime::now();
    let mut tick = Duration::from_millis(5);
    let max_tick = Duration::from_millis(100);

    loop {
        let elapsed = start.elapsed();
        if elapsed.is_err() {
            panic!("System time error");
        }
        let elapsed = elapsed.unwrap();

        if elapsed > TIMEOUT {
            panic!("{}", error_msg);
        }
        if predicate() {
            return;
        }

        thread::sleep(tick);
        tick = std::cmp::min(tick * 2, max_tick);
    }
}

/// Polls the ticket until its decode resolves.
pub fn eventually_resolved(mut ticket: DecodeTicket) -> DecodeResult {
    let mut result = None;
    eventually(
        || {
            result = ticket.poll();
            result.is_some()
        },
        "Decode never resolved",
    );
    result.expect("result was just observed")
}

/// Ticks the loader into the registry until every load has finished.
pub fn drive_until_idle<D: Decoder>(loader: &mut PackLoader<D>, registry: &mut PackRegistry) {
    eventually(
        || {
            loader.tick_into(registry);
            loader.is_idle()
        },
        "Loader never went idle",
    );
}
