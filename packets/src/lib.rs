// Copyright 2024 The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # fourway-packets crate
//!
//! Parses a captured radiotap-prefixed IEEE 802.11 frame into the fields
//! the handshake recognizer needs: the resolved `{bssid, source,
//! destination, client_addr}` address set and, when present, an
//! EAPOL-Key view. Every slice access is bounds-checked; a frame that
//! would otherwise run past the end of the buffer is dropped with a
//! [`DropReason`] rather than panicking.

pub mod eapol;
pub mod llc;
pub mod mac_header;
pub mod radiotap;

use fourway_common::MacAddr;
pub use eapol::EapolKeyView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The radiotap header's own length prefix was truncated, or its
    /// declared length runs past the end of the buffer.
    RadiotapTruncated,
    /// The 802.11 MAC header chain (fixed header, QoS control, LLC/SNAP,
    /// or EAPOL-Key body) ran past the end of the buffer.
    MacHeaderTruncated,
    /// `to_ds == from_ds`: not a simple infrastructure frame in either
    /// direction this recognizer understands.
    SymmetricDs,
    /// The resolved destination address is the broadcast address or a
    /// multicast address.
    BroadcastOrMulticastDestination,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            DropReason::RadiotapTruncated => "radiotap header truncated",
            DropReason::MacHeaderTruncated => "802.11 header chain truncated",
            DropReason::SymmetricDs => "to_ds == from_ds",
            DropReason::BroadcastOrMulticastDestination => {
                "destination is broadcast or multicast"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DropReason {}

/// A frame successfully decoded far enough to resolve addresses, with an
/// optional EAPOL-Key view when the frame carries one.
pub struct ParsedFrame<'a> {
    pub bssid: MacAddr,
    pub source: MacAddr,
    pub destination: MacAddr,
    pub client_addr: MacAddr,
    pub eapol: Option<EapolKeyView>,
    /// The whole original captured frame, radiotap header included, kept
    /// around for the dump policy to persist verbatim.
    pub raw: &'a [u8],
}

/// Parses one captured frame. See the module docs for the bounds-checking
/// contract.
pub fn parse(frame: &[u8]) -> Result<ParsedFrame<'_>, DropReason> {
    let radiotap_len = radiotap::header_len(frame).ok_or(DropReason::RadiotapTruncated)?;
    let mac_header = frame.get(radiotap_len..).ok_or(DropReason::RadiotapTruncated)?;

    if mac_header.len() < mac_header::MAC_HEADER_LEN {
        return Err(DropReason::MacHeaderTruncated);
    }
    let addrs = mac_header::resolve_addresses(mac_header).ok_or(DropReason::SymmetricDs)?;

    if addrs.destination.is_broadcast() || addrs.destination.is_multicast() {
        return Err(DropReason::BroadcastOrMulticastDestination);
    }

    let mut offset = mac_header::MAC_HEADER_LEN;
    if mac_header::is_qos_data(mac_header[0]) {
        offset += mac_header::QOS_CONTROL_LEN;
    }

    let eapol = match mac_header.get(offset..) {
        Some(rest) if rest.len() >= llc::LLC_SNAP_LEN && llc::is_eapol(rest) => {
            let body = &rest[llc::LLC_SNAP_LEN..];
            eapol::decode(body)
        }
        _ => None,
    };

    Ok(ParsedFrame {
        bssid: addrs.bssid,
        source: addrs.source,
        destination: addrs.destination,
        client_addr: addrs.client_addr,
        eapol,
        raw: frame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_frame(to_ds: bool, from_ds: bool, dest: [u8; 6], eapol: Option<(u16, u64)>) -> Vec<u8> {
        let mut frame = Vec::new();
        // minimal 8-byte radiotap header: version, pad, len (LE), present (4 bytes)
        frame.extend_from_slice(&[0, 0, 8, 0, 0, 0, 0, 0]);

        let mut mac = vec![0u8; mac_header::MAC_HEADER_LEN];
        mac[0] = (to_ds as u8) | ((from_ds as u8) << 1);
        mac[4..10].copy_from_slice(&[0xAA; 6]); // addr1
        mac[10..16].copy_from_slice(&[0xBB; 6]); // addr2
        mac[16..22].copy_from_slice(&dest); // addr3
        if to_ds {
            mac[16..22].copy_from_slice(&dest);
        } else {
            mac[4..10].copy_from_slice(&dest);
        }
        frame.extend_from_slice(&mac);

        if let Some((flags, replay_counter)) = eapol {
            frame.extend_from_slice(&[0xAA, 0xAA, 0x03, 0, 0, 0, 0x88, 0x8E]);
            frame.extend_from_slice(&[1, 3, 0, 0]); // 802.1x header
            frame.push(2); // descriptor_type
            frame.extend_from_slice(&flags.to_be_bytes());
            frame.extend_from_slice(&[0, 16]); // key_length
            frame.extend_from_slice(&replay_counter.to_be_bytes());
        }
        frame
    }

    #[test]
    fn drops_symmetric_ds() {
        let frame = build_frame(true, true, [1, 2, 3, 4, 5, 6], None);
        assert_eq!(parse(&frame).unwrap_err(), DropReason::SymmetricDs);
    }

    #[test]
    fn drops_broadcast_destination() {
        let frame = build_frame(false, true, [0xff; 6], None);
        assert_eq!(parse(&frame).unwrap_err(), DropReason::BroadcastOrMulticastDestination);
    }

    #[test]
    fn drops_truncated_radiotap() {
        let frame = [0u8, 0, 200, 0];
        assert_eq!(parse(&frame).unwrap_err(), DropReason::RadiotapTruncated);
    }

    #[test]
    fn drops_truncated_mac_header() {
        let mut frame = vec![0u8, 0, 8, 0, 0, 0, 0, 0];
        frame.extend_from_slice(&[0u8; 10]);
        assert_eq!(parse(&frame).unwrap_err(), DropReason::MacHeaderTruncated);
    }

    #[test]
    fn parses_eapol_station_to_ap() {
        let frame = build_frame(true, false, [1, 2, 3, 4, 5, 6], Some((0x0088, 17)));
        let parsed = parse(&frame).unwrap();
        assert_eq!(parsed.bssid, MacAddr::new([0xAA; 6]));
        assert_eq!(parsed.source, MacAddr::new([0xBB; 6]));
        assert_eq!(parsed.client_addr, parsed.source);
        let eapol = parsed.eapol.unwrap();
        assert_eq!(eapol.flags, 0x0088);
        assert_eq!(eapol.replay_counter, 17);
    }

    #[test]
    fn non_eapol_frame_has_no_eapol_view() {
        let frame = build_frame(false, true, [1, 2, 3, 4, 5, 6], None);
        assert!(parse(&frame).unwrap().eapol.is_none());
    }
}
