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

//! Opens and appends to the capture file the recognizer dumps frames to,
//! built on `fourway_pcap`'s synchronous reader/writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Duration;

use fourway_pcap::{write_global_header, write_record, LinkType};

pub struct Dumper {
    writer: BufWriter<File>,
}

impl Dumper {
    /// Creates `path`, writing the pcap global header for
    /// `LinkType::Ieee80211RadioTap` immediately.
    pub fn create(path: &str) -> std::io::Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_global_header(LinkType::Ieee80211RadioTap, &mut writer)?;
        Ok(Dumper { writer })
    }

    /// Appends one record with the original captured bytes and timestamp.
    /// Dumper write failures are reported to the caller and are not
    /// treated as fatal by the recognizer itself (see `fourway_core`).
    pub fn dump(&mut self, timestamp: Duration, frame: &[u8]) -> std::io::Result<()> {
        write_record(timestamp, &mut self.writer, frame)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn writes_global_header_then_records() {
        let path = std::env::temp_dir()
            .join(format!("fourwayd-dumper-test-{}.pcap", std::process::id()));
        let path_str = path.to_str().unwrap().to_string();

        {
            let mut dumper = Dumper::create(&path_str).unwrap();
            dumper.dump(Duration::from_secs(1), &[1, 2, 3]).unwrap();
        }

        let mut contents = Vec::new();
        File::open(&path_str).unwrap().read_to_end(&mut contents).unwrap();
        assert!(contents.len() > 16);
        assert_eq!(&contents[0..4], &0xa1b2c3d4u32.to_le_bytes());

        std::fs::remove_file(&path_str).ok();
    }
}
