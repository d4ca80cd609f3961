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

//! Radiotap header skipping.
//!
//! See <https://www.radiotap.org/>. Only the fixed `version`/`pad`/`len`
//! prefix is read; everything past it (present bitmasks, vendor fields) is
//! opaque to this crate and skipped as a single block whose length is
//! trusted verbatim from the header.

/// Offset of the little-endian `len` field within the radiotap header.
const LEN_FIELD_OFFSET: usize = 2;
const LEN_FIELD_SIZE: usize = 2;

/// Returns the total byte length of the radiotap header (including its
/// fixed prefix), or `None` if `buf` is too short to contain even the
/// fixed prefix or the declared length runs past `buf`'s end.
pub fn header_len(buf: &[u8]) -> Option<usize> {
    let end = LEN_FIELD_OFFSET + LEN_FIELD_SIZE;
    if buf.len() < end {
        return None;
    }
    let len = u16::from_le_bytes([buf[LEN_FIELD_OFFSET], buf[LEN_FIELD_OFFSET + 1]]) as usize;
    if len == 0 || len > buf.len() {
        return None;
    }
    Some(len)
}
