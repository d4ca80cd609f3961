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

//! The fixed-size IEEE 802.11 MAC header: frame control, duration, three
//! addresses, and sequence control.

use fourway_common::MacAddr;

/// Length of the fixed MAC header (frame control, duration, addr1-3, seq
/// control) this parser relies on, before any QoS control field.
pub const MAC_HEADER_LEN: usize = 24;

/// Length of the QoS control field appended to QoS-data subtype frames.
pub const QOS_CONTROL_LEN: usize = 2;

const ADDR1_OFFSET: usize = 4;
const ADDR2_OFFSET: usize = 10;
const ADDR3_OFFSET: usize = 16;

/// Direction bits live in the frame control field's first byte: bit 0 is
/// `to_ds`, bit 1 is `from_ds` (IEEE 802.11-2020 §9.2.4.1.3).
const TO_DS_MASK: u8 = 0b0000_0001;
const FROM_DS_MASK: u8 = 0b0000_0010;

/// First byte that marks a QoS data subtype frame, observed as a literal
/// byte value rather than a full frame-control decode (see the crate-level
/// docs for why this heuristic is used instead of decoding type/subtype).
const QOS_DATA_FIRST_BYTE: u8 = 0x88;

pub struct Addresses {
    pub bssid: MacAddr,
    pub source: MacAddr,
    pub destination: MacAddr,
    pub client_addr: MacAddr,
}

/// Reads `to_ds`/`from_ds` and resolves `{bssid, source, destination,
/// client_addr}` per the station→AP / AP→station address-field mapping.
/// Returns `None` when `to_ds == from_ds` (the frame is neither of the two
/// simple infrastructure directions this recognizer understands).
pub fn resolve_addresses(header: &[u8]) -> Option<Addresses> {
    debug_assert!(header.len() >= MAC_HEADER_LEN);
    let fc0 = header[0];
    let to_ds = fc0 & TO_DS_MASK != 0;
    let from_ds = fc0 & FROM_DS_MASK != 0;
    if to_ds == from_ds {
        return None;
    }

    let addr1 = MacAddr::try_from(&header[ADDR1_OFFSET..ADDR1_OFFSET + 6]).ok()?;
    let addr2 = MacAddr::try_from(&header[ADDR2_OFFSET..ADDR2_OFFSET + 6]).ok()?;
    let addr3 = MacAddr::try_from(&header[ADDR3_OFFSET..ADDR3_OFFSET + 6]).ok()?;

    Some(if to_ds {
        // station -> access point
        Addresses { bssid: addr1, source: addr2, destination: addr3, client_addr: addr2 }
    } else {
        // access point -> station
        Addresses { bssid: addr2, source: addr3, destination: addr1, client_addr: addr1 }
    })
}

/// Byte-heuristic QoS detection: the spec's documented simplification,
/// checking only the raw first octet rather than decoding the frame
/// control type/subtype fields.
pub fn is_qos_data(first_byte: u8) -> bool {
    first_byte == QOS_DATA_FIRST_BYTE
}
