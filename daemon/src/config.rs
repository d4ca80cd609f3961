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

//! Plain configuration assembled once from [`crate::args::FourwaydArgs`].
//! Unlike the reference daemon's global `RwLock<Config>` (appropriate for
//! a long-lived process whose facades set options independently at
//! various points in startup), this recognizer has a single wiring point
//! in `main`, so the config is an ordinary owned value threaded through by
//! reference.

use fourway_common::MacAddr;

use crate::args::FourwaydArgs;

#[derive(Debug, Clone)]
pub struct Config {
    pub passive: bool,
    pub auto_add_targets: bool,
    pub verbose: bool,
    pub targets: Vec<MacAddr>,
    pub replay: Option<String>,
    pub interface: Option<String>,
    pub pcap_out: Option<String>,
    pub dispatcher_pipe: Option<String>,
}

impl From<FourwaydArgs> for Config {
    fn from(args: FourwaydArgs) -> Self {
        // No dispatcher pipe means there is nowhere to send dispatch
        // messages, so passive is forced regardless of the flag.
        let passive = args.passive || args.dispatcher_pipe.is_none();
        Config {
            passive,
            auto_add_targets: args.auto_add_targets,
            verbose: args.verbose,
            targets: args.targets,
            replay: args.replay,
            interface: args.interface,
            pcap_out: args.pcap_out,
            dispatcher_pipe: args.dispatcher_pipe,
        }
    }
}
