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

//! Decides, per frame, whether it should be handed to the capture-file
//! writer. Kept as a pure function so it's testable independently of both
//! the state machine and the actual writer.

/// `true` when the frame should be dumped, for a frame that already
/// passed the direction/broadcast filters and whose target is known.
///
/// - An EAPOL-Key frame is always dumped (before the state-machine
///   update that may complete the handshake).
/// - A non-EAPOL frame is dumped only if the client is already complete
///   and a dumper is configured.
pub fn decision(is_eapol: bool, client_complete: bool, have_dumper: bool) -> bool {
    if !have_dumper {
        return false;
    }
    is_eapol || client_complete
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_dumper_configured_is_always_a_no_op() {
        assert!(!decision(true, true, false));
        assert!(!decision(false, true, false));
    }

    #[test]
    fn eapol_frames_always_dump_when_dumper_present() {
        assert!(decision(true, false, true));
        assert!(decision(true, true, true));
    }

    #[test]
    fn non_eapol_dumps_only_when_complete() {
        assert!(!decision(false, false, true));
        assert!(decision(false, true, true));
    }
}
