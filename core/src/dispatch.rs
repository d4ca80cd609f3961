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

//! The dispatcher channel: a one-way pipe carrying fixed-layout action
//! records to an auxiliary process that may transmit deauthentication
//! frames. The wire record mirrors this codebase's other zerocopy-backed
//! wire structs (`fourway_pcap::{FileHeader, PacketHeader}`).

use fourway_common::MacAddr;
use zerocopy::AsBytes;
use zerocopy_derive::{AsBytes, FromBytes, FromZeroes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DispatchAction {
    NewClient = 0,
    Handshake = 1,
}

impl From<DispatchAction> for u8 {
    fn from(action: DispatchAction) -> Self {
        action as u8
    }
}

/// The fixed-layout record written to the dispatcher pipe:
/// `{action: u8, client: [6]u8, bssid: [6]u8}`, 13 bytes total — well
/// under the smallest `PIPE_BUF` guarantee, so a single `write` of the
/// whole record is atomic on the reading end.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes)]
pub struct DispatchRecord {
    pub action: u8,
    pub client: [u8; 6],
    pub bssid: [u8; 6],
}

impl DispatchRecord {
    pub fn new(action: DispatchAction, client: MacAddr, bssid: MacAddr) -> Self {
        DispatchRecord { action: action.into(), client: client.into(), bssid: bssid.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        AsBytes::as_bytes(self)
    }
}

/// Implemented by whatever transport carries [`DispatchRecord`]s to the
/// auxiliary dispatcher process.
pub trait Dispatcher {
    fn send(&mut self, action: DispatchAction, client: MacAddr, bssid: MacAddr) -> std::io::Result<()>;
}

/// The dispatcher used in `passive` mode: every send is a no-op, so no
/// dispatcher messages are ever emitted regardless of observed traffic.
#[derive(Debug, Default)]
pub struct NullDispatcher;

impl Dispatcher for NullDispatcher {
    fn send(&mut self, _action: DispatchAction, _client: MacAddr, _bssid: MacAddr) -> std::io::Result<()> {
        Ok(())
    }
}

/// A human-readable wrapper around a dispatcher write failure, for
/// logging at the binary boundary. The dispatcher transport itself
/// reports failures as a plain `std::io::Result` (see [`Dispatcher`]);
/// this type exists so callers can format/log them uniformly the way
/// this codebase's per-domain error enums do.
#[derive(Debug)]
pub struct DispatchError(String);

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError(format!("cannot communicate with the dispatcher: {err}"))
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for DispatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_thirteen_bytes() {
        let record = DispatchRecord::new(
            DispatchAction::Handshake,
            MacAddr::new([1; 6]),
            MacAddr::new([2; 6]),
        );
        assert_eq!(record.as_bytes().len(), 13);
        assert_eq!(record.as_bytes()[0], 1);
        assert_eq!(&record.as_bytes()[1..7], &[1; 6]);
        assert_eq!(&record.as_bytes()[7..13], &[2; 6]);
    }

    #[test]
    fn null_dispatcher_always_succeeds() {
        let mut dispatcher = NullDispatcher;
        assert!(dispatcher
            .send(DispatchAction::NewClient, MacAddr::BROADCAST, MacAddr::BROADCAST)
            .is_ok());
    }
}
