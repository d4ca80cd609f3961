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

//! The recognizer: owns the target/client registries and is the single
//! per-frame entry point, wiring together the parser, classifier,
//! registries, and dump policy.

use std::time::{Duration, SystemTime};

use fourway_common::MacAddr;
use fourway_packets::parse;
use log::{debug, info, warn};

use crate::classify::{classify, SkipReason};
use crate::client::Client;
use crate::dispatch::DispatchAction;
use crate::dump_policy;
use crate::need_set::{NeedSet, Sequence};
use crate::registry::TargetRegistry;

/// Number of seconds after a completed handshake during which a fresh
/// EAPOL frame for the same client is *not* treated as a reconnection.
/// Strict `>`: a frame at exactly this many seconds does not trigger.
const RECONNECTION_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    NewClient { bssid: MacAddr, client: MacAddr },
    HandshakeComplete { bssid: MacAddr, client: MacAddr },
}

/// A lifecycle event paired with the dispatch-failure policy the original
/// implementation applies to it: ordinary new-client/handshake enqueues
/// are fatal on write failure, but the dispatcher message emitted for a
/// reconnection-triggered reset has its result ignored — preserved here
/// verbatim rather than unified, per the design note recorded in
/// DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchHint {
    pub lifecycle: Lifecycle,
    pub dispatch_failure_fatal: bool,
}

impl DispatchHint {
    pub fn action(&self) -> DispatchAction {
        match self.lifecycle {
            Lifecycle::NewClient { .. } => DispatchAction::NewClient,
            Lifecycle::HandshakeComplete { .. } => DispatchAction::Handshake,
        }
    }

    pub fn addresses(&self) -> (MacAddr, MacAddr) {
        match self.lifecycle {
            Lifecycle::NewClient { bssid, client } => (client, bssid),
            Lifecycle::HandshakeComplete { bssid, client } => (client, bssid),
        }
    }
}

/// The result of processing one frame: whether to hand it to the
/// capture-file writer, and any lifecycle events for the caller to hand
/// to the dispatcher transport, in emission order.
#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub dump: bool,
    pub events: Vec<DispatchHint>,
}

impl ProcessOutcome {
    fn ignored() -> Self {
        ProcessOutcome::default()
    }
}

pub struct RecognizerConfig {
    pub auto_add_targets: bool,
    pub verbose: bool,
    pub have_dumper: bool,
    pub on_new_client: Option<Box<dyn FnMut(MacAddr, MacAddr)>>,
    pub on_handshake: Option<Box<dyn FnMut(MacAddr, MacAddr)>>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig {
            auto_add_targets: false,
            verbose: false,
            have_dumper: false,
            on_new_client: None,
            on_handshake: None,
        }
    }
}

pub struct Recognizer {
    registry: TargetRegistry,
    config: RecognizerConfig,
}

impl Recognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        Recognizer { registry: TargetRegistry::new(config.auto_add_targets), config }
    }

    pub fn add_target(&mut self, bssid: MacAddr) {
        self.registry.add_target(bssid);
    }

    /// The single per-frame entry point. `now` is the capture timestamp
    /// used for the reconnection-grace comparison.
    pub fn process(&mut self, frame: &[u8], now: SystemTime) -> ProcessOutcome {
        let parsed = match parse(frame) {
            Ok(parsed) => parsed,
            Err(reason) => {
                debug!("frame ignored: {reason}");
                return ProcessOutcome::ignored();
            }
        };

        let Some(clients) = self.registry.lookup_or_auto_add(parsed.bssid) else {
            debug!("skipping target {}", parsed.bssid);
            return ProcessOutcome::ignored();
        };
        if self.config.verbose {
            info!(
                "frame bssid={} source={} destination={} client={}",
                parsed.bssid, parsed.source, parsed.destination, parsed.client_addr
            );
        }

        let mut events = Vec::new();

        if !clients.contains(&parsed.client_addr) {
            debug!("adding new client {}", parsed.client_addr);
            if let Some(cb) = self.config.on_new_client.as_mut() {
                cb(parsed.bssid, parsed.client_addr);
            }
            events.push(DispatchHint {
                lifecycle: Lifecycle::NewClient { bssid: parsed.bssid, client: parsed.client_addr },
                dispatch_failure_fatal: true,
            });
            clients.insert(parsed.client_addr, Client::new());
        }
        let client = clients.get_mut(&parsed.client_addr).expect("just inserted or present");

        let client_complete_before = client.need_set.is_complete();
        let dump = dump_policy::decision(
            parsed.eapol.is_some(),
            client_complete_before,
            self.config.have_dumper,
        );

        let Some(eapol) = parsed.eapol else {
            return ProcessOutcome { dump, events };
        };

        if client_complete_before {
            let elapsed = client
                .handshake_timestamp
                .and_then(|ts| now.duration_since(ts).ok())
                .unwrap_or(Duration::ZERO);
            if elapsed > RECONNECTION_GRACE {
                info!("possible reconnection of client {}", parsed.client_addr);
                if let Some(cb) = self.config.on_new_client.as_mut() {
                    cb(parsed.bssid, parsed.client_addr);
                }
                events.push(DispatchHint {
                    lifecycle: Lifecycle::NewClient {
                        bssid: parsed.bssid,
                        client: parsed.client_addr,
                    },
                    dispatch_failure_fatal: false,
                });
                client.reset(NeedSet::FULL);
            }
        }

        match classify(eapol.flags, eapol.replay_counter, client.need_set, client.start_counter) {
            Ok(Sequence::Message1) => {
                client.start_counter = eapol.replay_counter;
                client.reset(NeedSet::AFTER_MESSAGE_1);
            }
            Ok(sequence) if !client.need_set.needs_message_1() => {
                client.need_set.clear(sequence);
                if client.need_set.is_complete() {
                    info!("got full handshake for client {}", parsed.client_addr);
                    client.handshake_timestamp = Some(now);
                    if let Some(cb) = self.config.on_handshake.as_mut() {
                        cb(parsed.bssid, parsed.client_addr);
                    }
                    events.push(DispatchHint {
                        lifecycle: Lifecycle::HandshakeComplete {
                            bssid: parsed.bssid,
                            client: parsed.client_addr,
                        },
                        dispatch_failure_fatal: true,
                    });
                }
            }
            Ok(_) => {
                // message #1 hasn't been seen this round; dropped without state change.
            }
            Err(reason @ SkipReason::UnrecognizedFlags) => {
                warn!(
                    "{reason} 0x{:04x} of {} @ {}",
                    eapol.flags, parsed.source, parsed.bssid
                );
            }
            Err(reason) => debug!("{reason}"),
        }

        ProcessOutcome { dump, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const BSSID: MacAddr = MacAddr([0xAA; 6]);
    const CLIENT: MacAddr = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);

    fn build_eapol_frame(to_ds: bool, dest: MacAddr, flags: u16, replay_counter: u64) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(&[0, 0, 8, 0, 0, 0, 0, 0]);
        let mut mac = vec![0u8; 24];
        mac[0] = if to_ds { 0b01 } else { 0b10 };
        if to_ds {
            mac[4..10].copy_from_slice(BSSID.as_bytes());
            mac[10..16].copy_from_slice(CLIENT.as_bytes());
            mac[16..22].copy_from_slice(dest.as_bytes());
        } else {
            mac[4..10].copy_from_slice(dest.as_bytes());
            mac[10..16].copy_from_slice(BSSID.as_bytes());
            mac[16..22].copy_from_slice(CLIENT.as_bytes());
        }
        frame.extend_from_slice(&mac);
        frame.extend_from_slice(&[0xAA, 0xAA, 0x03, 0, 0, 0, 0x88, 0x8E]);
        frame.extend_from_slice(&[1, 3, 0, 0]);
        frame.push(2);
        frame.extend_from_slice(&flags.to_be_bytes());
        frame.extend_from_slice(&[0, 16]);
        frame.extend_from_slice(&replay_counter.to_be_bytes());
        frame
    }

    fn station_to_ap(flags: u16, replay_counter: u64) -> Vec<u8> {
        build_eapol_frame(true, CLIENT, flags, replay_counter)
    }

    fn recognizer_with_counters() -> (Recognizer, Rc<RefCell<u32>>, Rc<RefCell<u32>>) {
        let new_client_count = Rc::new(RefCell::new(0));
        let handshake_count = Rc::new(RefCell::new(0));
        let nc = new_client_count.clone();
        let hc = handshake_count.clone();
        let mut config = RecognizerConfig { have_dumper: true, ..Default::default() };
        config.on_new_client = Some(Box::new(move |_, _| *nc.borrow_mut() += 1));
        config.on_handshake = Some(Box::new(move |_, _| *hc.borrow_mut() += 1));
        let mut recognizer = Recognizer::new(config);
        recognizer.add_target(BSSID);
        (recognizer, new_client_count, handshake_count)
    }

    #[test]
    fn scenario_a_clean_handshake() {
        let (mut r, new_client_count, handshake_count) = recognizer_with_counters();
        let now = SystemTime::UNIX_EPOCH;

        let out1 = r.process(&station_to_ap(0x0088, 17), now);
        assert_eq!(out1.events.len(), 1);
        assert!(matches!(out1.events[0].lifecycle, Lifecycle::NewClient { .. }));

        let out2 = r.process(&station_to_ap(0x0108, 17), now);
        assert!(out2.events.is_empty());

        let out3 = r.process(&station_to_ap(0x01C8, 18), now);
        assert!(out3.events.is_empty());

        let out4 = r.process(&station_to_ap(0x0108, 18), now);
        assert_eq!(out4.events.len(), 1);
        assert!(matches!(out4.events[0].lifecycle, Lifecycle::HandshakeComplete { .. }));

        assert_eq!(*new_client_count.borrow(), 1);
        assert_eq!(*handshake_count.borrow(), 1);
    }

    #[test]
    fn scenario_b_ambiguous_without_message_1() {
        let (mut r, new_client_count, handshake_count) = recognizer_with_counters();
        let out = r.process(&station_to_ap(0x0108, 99), SystemTime::UNIX_EPOCH);
        assert_eq!(out.events.len(), 1);
        assert!(matches!(out.events[0].lifecycle, Lifecycle::NewClient { .. }));
        assert_eq!(*new_client_count.borrow(), 1);
        assert_eq!(*handshake_count.borrow(), 0);
    }

    #[test]
    fn scenario_c_interleaved_foreign_replay() {
        let (mut r, _, _) = recognizer_with_counters();
        let now = SystemTime::UNIX_EPOCH;
        r.process(&station_to_ap(0x0088, 5), now);
        let out = r.process(&station_to_ap(0x0108, 7), now);
        assert!(out.events.is_empty());
    }

    #[test]
    fn scenario_d_reconnection_boundary() {
        let (mut r, new_client_count, _) = recognizer_with_counters();
        let t0 = SystemTime::UNIX_EPOCH;
        r.process(&station_to_ap(0x0088, 1), t0);
        r.process(&station_to_ap(0x0108, 1), t0);
        r.process(&station_to_ap(0x01C8, 2), t0);
        r.process(&station_to_ap(0x0108, 2), t0);
        assert_eq!(*new_client_count.borrow(), 1);

        // exactly +5s: strict `>`, no reset.
        let out_at_5 = r.process(&station_to_ap(0x0088, 10), t0 + Duration::from_secs(5));
        assert!(out_at_5.events.iter().all(|e| e.dispatch_failure_fatal));

        // +6s: reset triggers, non-fatal reconnection NewClient event.
        let out_at_6 = r.process(&station_to_ap(0x0088, 10), t0 + Duration::from_secs(6));
        assert!(out_at_6
            .events
            .iter()
            .any(|e| matches!(e.lifecycle, Lifecycle::NewClient { .. }) && !e.dispatch_failure_fatal));
        assert_eq!(*new_client_count.borrow(), 2);
    }

    #[test]
    fn scenario_e_passive_mode_still_emits_events_for_caller_to_suppress() {
        // "passive" is enforced by the caller choosing a NullDispatcher;
        // the recognizer itself always reports events.
        let (mut r, _, _) = recognizer_with_counters();
        let out = r.process(&station_to_ap(0x0088, 1), SystemTime::UNIX_EPOCH);
        assert_eq!(out.events.len(), 1);
    }

    #[test]
    fn scenario_f_auto_add_target() {
        let mut config = RecognizerConfig { auto_add_targets: true, ..Default::default() };
        config.have_dumper = false;
        let mut r = Recognizer::new(config);
        let frame = build_eapol_frame(false, MacAddr([0xBB; 6]), 0x0088, 1);
        let out = r.process(&frame, SystemTime::UNIX_EPOCH);
        assert_eq!(out.events.len(), 1);
    }

    #[test]
    fn unknown_target_without_auto_add_is_ignored() {
        let mut r = Recognizer::new(RecognizerConfig::default());
        let out = r.process(&station_to_ap(0x0088, 1), SystemTime::UNIX_EPOCH);
        assert!(out.events.is_empty());
        assert!(!out.dump);
    }

    #[test]
    fn broadcast_destination_never_changes_state() {
        let (mut r, new_client_count, _) = recognizer_with_counters();
        let frame = build_eapol_frame(true, MacAddr::BROADCAST, 0x0088, 1);
        let out = r.process(&frame, SystemTime::UNIX_EPOCH);
        assert!(out.events.is_empty());
        assert!(!out.dump);
        assert_eq!(*new_client_count.borrow(), 0);
    }

    #[test]
    fn symmetric_ds_is_ignored() {
        let (mut r, _, _) = recognizer_with_counters();
        let frame = build_eapol_frame(true, CLIENT, 0x0088, 1);
        // Force to_ds == from_ds by corrupting the frame control byte.
        let mut frame = frame;
        frame[8] = 0b11;
        let out = r.process(&frame, SystemTime::UNIX_EPOCH);
        assert!(out.events.is_empty());
    }

    #[test]
    fn replaying_message_2_is_idempotent() {
        let (mut r, _, handshake_count) = recognizer_with_counters();
        let now = SystemTime::UNIX_EPOCH;
        r.process(&station_to_ap(0x0088, 1), now);
        r.process(&station_to_ap(0x0108, 1), now);
        let before = *handshake_count.borrow();
        r.process(&station_to_ap(0x0108, 1), now);
        assert_eq!(*handshake_count.borrow(), before);
    }
}
