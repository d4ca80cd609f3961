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

//! Per-client handshake state, owned exclusively by its target's client
//! table for the lifetime of the process.

use std::time::SystemTime;

use crate::need_set::NeedSet;

#[derive(Debug, Clone)]
pub struct Client {
    pub need_set: NeedSet,
    /// Meaningful only once `need_set.needs_message_1()` is false.
    pub start_counter: u64,
    /// Meaningful only once `need_set.is_complete()` has been true at
    /// least once.
    pub handshake_timestamp: Option<SystemTime>,
}

impl Client {
    pub fn new() -> Self {
        Client { need_set: NeedSet::FULL, start_counter: 0, handshake_timestamp: None }
    }

    /// Resets to a fresh round, as happens on message #1 or on a
    /// reconnection-grace reset.
    pub fn reset(&mut self, need_set: NeedSet) {
        self.need_set = need_set;
        self.handshake_timestamp = None;
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
