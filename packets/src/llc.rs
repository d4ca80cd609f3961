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

//! IEEE 802.2 LLC/SNAP header detection, restricted to the one signature
//! this recognizer cares about: SNAP-encapsulated EAPOL.

/// DSAP, SSAP, control, OUI (3 bytes, zero for SNAP-over-Ethernet), and a
/// 2-byte ethertype: 8 bytes total.
pub const LLC_SNAP_LEN: usize = 8;

const DSAP: u8 = 0xAA;
const SSAP: u8 = 0xAA;
const CONTROL: u8 = 0x03;
const ETHERTYPE_OFFSET: usize = 6;
pub const EAPOL_ETHERTYPE: u16 = 0x888E;

/// `true` when `header` (at least [`LLC_SNAP_LEN`] bytes) is a SNAP header
/// wrapping an EAPOL (802.1X) ethertype.
pub fn is_eapol(header: &[u8]) -> bool {
    debug_assert!(header.len() >= LLC_SNAP_LEN);
    header[0] == DSAP
        && header[1] == SSAP
        && header[2] == CONTROL
        && u16::from_be_bytes([header[ETHERTYPE_OFFSET], header[ETHERTYPE_OFFSET + 1]])
            == EAPOL_ETHERTYPE
}
