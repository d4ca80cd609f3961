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

//! Wires the recognizer to a frame source, a dumper, and a dispatcher,
//! and drives the single-threaded frame-processing loop. All registry
//! mutations, callbacks, and dumper writes happen on this one thread; no
//! internal locking is needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use log::{error, info};

use fourway_core::{Dispatcher, Recognizer, RecognizerConfig};

use crate::config::Config;
use crate::dumper::Dumper;
use crate::frame_source::FrameSource;

/// Registers SIGINT/SIGTERM handlers that set the returned flag, mirroring
/// the process-wide `stop` flag the spec's concurrency model describes:
/// checked by the outer capture loop, settable by a signal handler or by a
/// fatal dispatcher-write failure.
pub fn install_signal_handlers() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))
        .context("registering SIGINT handler")?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&stop))
        .context("registering SIGTERM handler")?;
    Ok(stop)
}

/// Drives frames from `source` through `recognizer` until the source is
/// exhausted or `stop` is set. Returns an error only on a fatal dispatcher
/// write failure (§4.5/§7); I/O errors reading the source are logged and
/// end the loop without propagating, matching the spec's "drop and
/// continue" policy for malformed input.
pub fn drive(
    recognizer: &mut Recognizer,
    source: &mut dyn FrameSource,
    dumper: &mut Option<Dumper>,
    dispatcher: &mut dyn Dispatcher,
    stop: &Arc<AtomicBool>,
) -> Result<()> {
    while !stop.load(Ordering::Relaxed) {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(err) => {
                error!("frame source error: {err}");
                break;
            }
        };

        let now = SystemTime::UNIX_EPOCH + frame.timestamp;
        let outcome = recognizer.process(&frame.bytes, now);

        if outcome.dump {
            if let Some(dumper) = dumper.as_mut() {
                if let Err(err) = dumper.dump(frame.timestamp, &frame.bytes) {
                    // Dumper failures are reported by the dumper itself;
                    // the recognizer does not intervene (§4.6, §7).
                    error!("dumper write failed: {err}");
                }
            }
        }

        for hint in &outcome.events {
            let (client, bssid) = hint.addresses();
            match dispatcher.send(hint.action(), client, bssid) {
                Ok(()) => {}
                Err(err) if hint.dispatch_failure_fatal => {
                    error!("dispatcher write failed: {err}");
                    stop.store(true, Ordering::Relaxed);
                    return Err(err).context("fatal dispatcher write failure");
                }
                Err(err) => {
                    // The reconnection-reset enqueue's failure is logged
                    // but not fatal; see the open question recorded in
                    // DESIGN.md.
                    info!("non-fatal dispatcher write failure on reconnection reset: {err}");
                }
            }
        }
    }
    Ok(())
}

pub fn recognizer_config(config: &Config) -> RecognizerConfig {
    RecognizerConfig {
        auto_add_targets: config.auto_add_targets,
        verbose: config.verbose,
        have_dumper: config.pcap_out.is_some(),
        on_new_client: None,
        on_handshake: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_source::CapturedFrame;
    use fourway_common::MacAddr;
    use fourway_core::DispatchAction;

    struct VecSource(std::vec::IntoIter<Vec<u8>>);

    impl FrameSource for VecSource {
        fn next_frame(&mut self) -> std::io::Result<Option<CapturedFrame>> {
            Ok(self.0.next().map(|bytes| CapturedFrame { timestamp: Duration::ZERO, bytes }))
        }
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        sent: Vec<DispatchAction>,
    }

    impl Dispatcher for RecordingDispatcher {
        fn send(
            &mut self,
            action: DispatchAction,
            _client: MacAddr,
            _bssid: MacAddr,
        ) -> std::io::Result<()> {
            self.sent.push(action);
            Ok(())
        }
    }

    struct FailingDispatcher;

    impl Dispatcher for FailingDispatcher {
        fn send(
            &mut self,
            _action: DispatchAction,
            _client: MacAddr,
            _bssid: MacAddr,
        ) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    fn eapol_message_1(bssid: MacAddr, client: MacAddr, replay_counter: u64) -> Vec<u8> {
        let mut frame = vec![0, 0, 8, 0, 0, 0, 0, 0];
        let mut mac = vec![0u8; 24];
        mac[0] = 0b01;
        mac[4..10].copy_from_slice(bssid.as_bytes());
        mac[10..16].copy_from_slice(client.as_bytes());
        mac[16..22].copy_from_slice(&[9; 6]);
        frame.extend_from_slice(&mac);
        frame.extend_from_slice(&[0xAA, 0xAA, 0x03, 0, 0, 0, 0x88, 0x8E]);
        frame.extend_from_slice(&[1, 3, 0, 0]);
        frame.push(2);
        frame.extend_from_slice(&0x0088u16.to_be_bytes());
        frame.extend_from_slice(&[0, 16]);
        frame.extend_from_slice(&replay_counter.to_be_bytes());
        frame
    }

    #[test]
    fn drains_source_and_forwards_events_to_dispatcher() {
        let bssid = MacAddr::new([0xAA; 6]);
        let client = MacAddr::new([0x11; 6]);
        let mut recognizer = Recognizer::new(RecognizerConfig::default());
        recognizer.add_target(bssid);

        let mut source = VecSource(vec![eapol_message_1(bssid, client, 1)].into_iter());
        let mut dumper = None;
        let mut dispatcher = RecordingDispatcher::default();
        let stop = Arc::new(AtomicBool::new(false));

        drive(&mut recognizer, &mut source, &mut dumper, &mut dispatcher, &stop).unwrap();

        assert_eq!(dispatcher.sent, vec![DispatchAction::NewClient]);
        assert!(!stop.load(Ordering::Relaxed));
    }

    #[test]
    fn fatal_dispatch_failure_sets_stop_and_returns_error() {
        let bssid = MacAddr::new([0xAA; 6]);
        let client = MacAddr::new([0x11; 6]);
        let mut recognizer = Recognizer::new(RecognizerConfig::default());
        recognizer.add_target(bssid);

        let mut source = VecSource(vec![eapol_message_1(bssid, client, 1)].into_iter());
        let mut dumper = None;
        let mut dispatcher = FailingDispatcher;
        let stop = Arc::new(AtomicBool::new(false));

        let result = drive(&mut recognizer, &mut source, &mut dumper, &mut dispatcher, &stop);

        assert!(result.is_err());
        assert!(stop.load(Ordering::Relaxed));
    }

    #[test]
    fn empty_source_returns_immediately() {
        let mut recognizer = Recognizer::new(RecognizerConfig::default());
        let mut source = VecSource(vec![].into_iter());
        let mut dumper = None;
        let mut dispatcher = RecordingDispatcher::default();
        let stop = Arc::new(AtomicBool::new(false));
        assert!(drive(&mut recognizer, &mut source, &mut dumper, &mut dispatcher, &stop).is_ok());
    }
}
