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

//! # fourway-core crate
//!
//! The handshake recognizer: target/client registries, the bit-packed
//! per-client state machine, the dispatcher wire format, and the dump
//! policy. Owns no I/O — frames come in as byte slices, capture-file
//! writes and dispatcher sends are driven by the caller from the
//! [`recognizer::ProcessOutcome`] this crate returns.

pub mod classify;
pub mod client;
pub mod dispatch;
pub mod dump_policy;
pub mod need_set;
pub mod recognizer;
pub mod registry;

pub use dispatch::{DispatchAction, DispatchError, DispatchRecord, Dispatcher, NullDispatcher};
pub use need_set::{NeedSet, Sequence};
pub use recognizer::{DispatchHint, Lifecycle, ProcessOutcome, Recognizer, RecognizerConfig};
pub use registry::{ClientTable, TargetRegistry};
