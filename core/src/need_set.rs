// Copyright 2024 The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The 4-bit "which messages are still missing" set: bit *i* means message
//! *(i+1)* of the 4-way handshake is still needed. Bit 0 ("need #1") is
//! tested on its own at several call sites, so it gets a named accessor
//! rather than being buried in raw bit arithmetic.

/// Index of message #1..#4 within a [`NeedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Message1 = 0,
    Message2 = 1,
    Message3 = 2,
    Message4 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedSet(u8);

impl NeedSet {
    /// A freshly created client: all four messages still needed.
    pub const FULL: NeedSet = NeedSet(0b1111);

    /// Bit 0 ("need #1") clear, bits 1..3 set: the state immediately after
    /// message #1 is observed.
    pub const AFTER_MESSAGE_1: NeedSet = NeedSet(0b1110);

    pub fn needs_message_1(&self) -> bool {
        self.0 & (1 << Sequence::Message1 as u8) != 0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == 0
    }

    /// Clears the bit for `sequence`, returning the new set.
    pub fn clear(&mut self, sequence: Sequence) {
        self.0 &= !(1 << sequence as u8);
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}
