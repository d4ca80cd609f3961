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

//! A library for reading and writing pcap (packet capture) files in Rust.
//!
//! This crate provides a synchronous API for working with pcap files: the
//! recognizer's frame-processing loop is synchronous, so the capture-file
//! writer it drives is too.
//!
//! # Features
//!
//! * **Synchronous API:** built on `std::io::{Read, Write}`.
//! * **Zero-copy:** uses the `zerocopy` crate for zero-cost conversions
//!   between structs and byte slices.
//! * **Standard pcap format:** compatible with other pcap tools.

/// This module contains the core functionality for reading and writing pcap files.
pub mod pcap;

pub use pcap::{read_global_header, read_record, write_global_header, write_record};
pub use pcap::{FileHeader, LinkType, PacketHeader};
