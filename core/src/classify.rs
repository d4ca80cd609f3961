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

//! Classifies an EAPOL-Key flags field into a handshake message sequence
//! number, disambiguating messages #2 and #4 via the replay counter.

use crate::need_set::{NeedSet, Sequence};

/// Key-information flags bits this recognizer cares about.
pub const FLAGS_MASK: u16 = 0x0DC8;
const FLAGS_MESSAGE_1: u16 = 0x0088;
const FLAGS_MESSAGE_2_OR_4: u16 = 0x0108;
const FLAGS_MESSAGE_3: u16 = 0x01C8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Masked flags matched none of the three known patterns.
    UnrecognizedFlags,
    /// Masked flags were the #2/#4 pattern, but message #1 hasn't been
    /// observed this round, so the replay counter can't disambiguate.
    AmbiguousWithoutMessage1,
    /// Masked flags were the #2/#4 pattern, message #1 was observed, but
    /// the replay counter matches neither `start_counter` nor `+1`: this
    /// frame belongs to some other handshake round.
    ForeignReplay,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            SkipReason::UnrecognizedFlags => "unrecognizable EAPOL flags",
            SkipReason::AmbiguousWithoutMessage1 => {
                "waiting for handshake #1, cannot distinguish between #2 and #4"
            }
            SkipReason::ForeignReplay => "replay counter belongs to another handshake round",
        };
        f.write_str(msg)
    }
}

/// Classifies `flags` (and, for the ambiguous #2/#4 case, `replay_counter`
/// against `need_set`/`start_counter`) into a handshake [`Sequence`].
pub fn classify(
    flags: u16,
    replay_counter: u64,
    need_set: NeedSet,
    start_counter: u64,
) -> Result<Sequence, SkipReason> {
    match flags & FLAGS_MASK {
        FLAGS_MESSAGE_1 => Ok(Sequence::Message1),
        FLAGS_MESSAGE_2_OR_4 => {
            if need_set.needs_message_1() {
                return Err(SkipReason::AmbiguousWithoutMessage1);
            }
            if replay_counter == start_counter {
                Ok(Sequence::Message2)
            } else if replay_counter == start_counter.wrapping_add(1) {
                Ok(Sequence::Message4)
            } else {
                Err(SkipReason::ForeignReplay)
            }
        }
        FLAGS_MESSAGE_3 => Ok(Sequence::Message3),
        _ => Err(SkipReason::UnrecognizedFlags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_1_classifies_regardless_of_need_set() {
        assert_eq!(classify(0x0088, 0, NeedSet::FULL, 0), Ok(Sequence::Message1));
    }

    #[test]
    fn message_3_classifies_directly() {
        assert_eq!(classify(0x01C8, 0, NeedSet::AFTER_MESSAGE_1, 0), Ok(Sequence::Message3));
    }

    #[test]
    fn ambiguous_without_message_1_is_skipped() {
        assert_eq!(
            classify(0x0108, 99, NeedSet::FULL, 0),
            Err(SkipReason::AmbiguousWithoutMessage1)
        );
    }

    #[test]
    fn replay_counter_equal_to_start_is_message_2() {
        assert_eq!(classify(0x0108, 5, NeedSet::AFTER_MESSAGE_1, 5), Ok(Sequence::Message2));
    }

    #[test]
    fn replay_counter_one_past_start_is_message_4() {
        assert_eq!(classify(0x0108, 6, NeedSet::AFTER_MESSAGE_1, 5), Ok(Sequence::Message4));
    }

    #[test]
    fn foreign_replay_counter_is_skipped() {
        assert_eq!(
            classify(0x0108, 7, NeedSet::AFTER_MESSAGE_1, 5),
            Err(SkipReason::ForeignReplay)
        );
    }

    #[test]
    fn unrecognized_flags_are_skipped() {
        assert_eq!(classify(0x0000, 0, NeedSet::FULL, 0), Err(SkipReason::UnrecognizedFlags));
    }
}
