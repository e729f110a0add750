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

/// The number of note slots in every pack.
pub const NOTE_COUNT: usize = 15;

/// One of the fifteen fixed note slots of a pack, in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pitch {
    C1,
    D1,
    E1,
    F1,
    G1,
    A1,
    B1,
    C2,
    D2,
    E2,
    F2,
    G2,
    A2,
    B2,
    C3,
}

impl Pitch {
    /// All pitches in slot order.
    pub const ALL: [Pitch; NOTE_COUNT] = [
        Pitch::C1,
        Pitch::D1,
        Pitch::E1,
        Pitch::F1,
        Pitch::G1,
        Pitch::A1,
        Pitch::B1,
        Pitch::C2,
        Pitch::D2,
        Pitch::E2,
        Pitch::F2,
        Pitch::G2,
        Pitch::A2,
        Pitch::B2,
        Pitch::C3,
    ];

    /// The slot index of this pitch.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The token a note file's name must end with.
    pub fn token(self) -> &'static str {
        match self {
            Pitch::C1 => "C1",
            Pitch::D1 => "D1",
            Pitch::E1 => "E1",
            Pitch::F1 => "F1",
            Pitch::G1 => "G1",
            Pitch::A1 => "A1",
            Pitch::B1 => "B1",
            Pitch::C2 => "C2",
            Pitch::D2 => "D2",
            Pitch::E2 => "E2",
            Pitch::F2 => "F2",
            Pitch::G2 => "G2",
            Pitch::A2 => "A2",
            Pitch::B2 => "B2",
            Pitch::C3 => "C3",
        }
    }

    /// The pitch in the following slot, if any.
    pub fn next(self) -> Option<Pitch> {
        Pitch::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
