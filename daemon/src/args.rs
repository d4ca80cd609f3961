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

use clap::Parser;
use fourway_common::MacAddr;

#[derive(Debug, Parser)]
#[command(name = "fourwayd", about = "WPA/WPA2 4-way handshake recognizer")]
pub struct FourwaydArgs {
    /// Read frames from an existing pcap file instead of a live monitor-mode
    /// radio. Always available; the live source requires the `live-capture`
    /// feature.
    #[arg(short = 'r', long)]
    pub replay: Option<String>,

    /// Monitor-mode interface to capture from, when not replaying.
    #[arg(short = 'i', long)]
    pub interface: Option<String>,

    /// Write a pcap capture of observed handshake traffic to this path.
    #[arg(short = 'w', long = "pcap-out")]
    pub pcap_out: Option<String>,

    /// Path to the FIFO the dispatcher process reads. Omitting this forces
    /// passive mode, since there is nowhere to send dispatch messages.
    #[arg(long = "dispatcher-pipe")]
    pub dispatcher_pipe: Option<String>,

    /// Never signal the dispatcher, even if a pipe path is given.
    #[arg(short, long)]
    pub passive: bool,

    /// Auto-create a target entry on first observation of any BSSID.
    #[arg(long = "auto-add-targets")]
    pub auto_add_targets: bool,

    /// Pre-add a target BSSID. May be repeated.
    #[arg(short, long = "target")]
    pub targets: Vec<MacAddr>,

    /// Produce human-readable address strings for diagnostic output.
    #[arg(short, long)]
    pub verbose: bool,
}
