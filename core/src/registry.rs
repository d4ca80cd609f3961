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

//! Target (BSSID) and per-target client registries. Keyed by [`MacAddr`]
//! in a `BTreeMap` for deterministic iteration order in logs and tests —
//! hash stability across runs is not a requirement this recognizer has.

use std::collections::BTreeMap;

use fourway_common::MacAddr;

use crate::client::Client;

#[derive(Debug, Default)]
pub struct ClientTable(BTreeMap<MacAddr, Client>);

impl ClientTable {
    pub fn get(&self, client: &MacAddr) -> Option<&Client> {
        self.0.get(client)
    }

    pub fn get_mut(&mut self, client: &MacAddr) -> Option<&mut Client> {
        self.0.get_mut(client)
    }

    pub fn contains(&self, client: &MacAddr) -> bool {
        self.0.contains_key(client)
    }

    pub fn insert(&mut self, client: MacAddr, state: Client) {
        self.0.insert(client, state);
    }
}

#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: BTreeMap<MacAddr, ClientTable>,
    auto_add: bool,
}

impl TargetRegistry {
    pub fn new(auto_add: bool) -> Self {
        TargetRegistry { targets: BTreeMap::new(), auto_add }
    }

    /// Idempotent: ensures an (initially empty) client table exists for
    /// `bssid`.
    pub fn add_target(&mut self, bssid: MacAddr) {
        self.targets.entry(bssid).or_default();
    }

    pub fn lookup_target(&self, bssid: &MacAddr) -> Option<&ClientTable> {
        self.targets.get(bssid)
    }

    pub fn lookup_target_mut(&mut self, bssid: &MacAddr) -> Option<&mut ClientTable> {
        self.targets.get_mut(bssid)
    }

    /// If `auto_add` is enabled and `bssid` is unknown, creates it (empty)
    /// and returns the fresh table; otherwise behaves like
    /// [`TargetRegistry::lookup_target_mut`].
    pub fn lookup_or_auto_add(&mut self, bssid: MacAddr) -> Option<&mut ClientTable> {
        if self.auto_add {
            self.targets.entry(bssid).or_default();
        }
        self.targets.get_mut(&bssid)
    }

    pub fn contains_target(&self, bssid: &MacAddr) -> bool {
        self.targets.contains_key(bssid)
    }
}
