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

//! EAPOL-Key header decode: just the two fields the 4-way handshake
//! classifier needs, `key_information` ("flags") and `replay_counter`.
//!
//! Layout, counted from the first byte past the LLC/SNAP header:
//! 802.1X header (version, type, body length: 4 bytes), then the EAPOL-Key
//! body (descriptor_type: 1 byte, key_information: 2 bytes, key_length: 2
//! bytes, replay_counter: 8 bytes, ...). All multi-byte fields are
//! big-endian on the wire.

const DOT1X_HEADER_LEN: usize = 4;
const DESCRIPTOR_TYPE_LEN: usize = 1;
const KEY_INFO_LEN: usize = 2;
const KEY_LENGTH_LEN: usize = 2;
const REPLAY_COUNTER_LEN: usize = 8;

const KEY_INFO_OFFSET: usize = DOT1X_HEADER_LEN + DESCRIPTOR_TYPE_LEN;
const REPLAY_COUNTER_OFFSET: usize = KEY_INFO_OFFSET + KEY_INFO_LEN + KEY_LENGTH_LEN;

/// Minimum number of bytes, past the LLC/SNAP header, needed to decode
/// both fields.
pub const MIN_LEN: usize = REPLAY_COUNTER_OFFSET + REPLAY_COUNTER_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EapolKeyView {
    pub replay_counter: u64,
    pub flags: u16,
}

/// Decodes the key-information flags and replay counter from the bytes
/// immediately following the LLC/SNAP header. Returns `None` if `body` is
/// too short.
pub fn decode(body: &[u8]) -> Option<EapolKeyView> {
    if body.len() < MIN_LEN {
        return None;
    }
    let flags = u16::from_be_bytes([body[KEY_INFO_OFFSET], body[KEY_INFO_OFFSET + 1]]);
    let replay_counter = u64::from_be_bytes(
        body[REPLAY_COUNTER_OFFSET..REPLAY_COUNTER_OFFSET + REPLAY_COUNTER_LEN]
            .try_into()
            .expect("slice length checked above"),
    );
    Some(EapolKeyView { replay_counter, flags })
}
