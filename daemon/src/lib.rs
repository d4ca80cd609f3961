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

//! `fourwayd`: CLI, configuration, dispatcher pipe, and frame-source
//! wiring around the `fourway-core` recognizer. The core crate never
//! parses CLI or env vars itself; this binary owns that boundary.

pub mod args;
pub mod config;
pub mod dispatcher;
pub mod dumper;
pub mod frame_source;
pub mod run;
