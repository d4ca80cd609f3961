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

//! The dispatcher transport: a POSIX FIFO opened for writing, mirroring
//! the raw-fd-based transport this codebase otherwise speaks
//! (`transport::fd`), but point-to-point rather than multiplexed over a
//! chip/device registry.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use fourway_common::MacAddr;
use fourway_core::{DispatchAction, DispatchRecord, Dispatcher};

/// Creates the FIFO at `path` if it doesn't already exist, then opens it
/// for writing. Opening a FIFO for writing blocks until a reader is
/// present; the co-resident dispatcher process is expected to have
/// opened its read end already.
pub fn open(path: &str) -> std::io::Result<PipeDispatcher> {
    if !Path::new(path).exists() {
        nix::unistd::mkfifo(path, nix::sys::stat::Mode::from_bits_truncate(0o600))
            .map_err(|errno| std::io::Error::from_raw_os_error(errno as i32))?;
    }
    let file = OpenOptions::new().write(true).open(path)?;
    Ok(PipeDispatcher { file })
}

pub struct PipeDispatcher {
    file: File,
}

impl Dispatcher for PipeDispatcher {
    fn send(
        &mut self,
        action: DispatchAction,
        client: MacAddr,
        bssid: MacAddr,
    ) -> std::io::Result<()> {
        let record = DispatchRecord::new(action, client, bssid);
        // DispatchRecord is 13 bytes, well under PIPE_BUF, so this single
        // write is atomic on the reading end.
        self.file.write_all(record.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::thread;

    #[test]
    fn writes_whole_record_to_the_fifo() {
        let dir = std::env::temp_dir().join(format!("fourwayd-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dispatch.pipe");
        let path_str = path.to_str().unwrap().to_string();

        let reader_path = path_str.clone();
        let reader = thread::spawn(move || {
            // Block until the writer's mkfifo + open(write) has happened,
            // then read exactly one record.
            loop {
                if Path::new(&reader_path).exists() {
                    break;
                }
                thread::yield_now();
            }
            let mut file = File::open(&reader_path).unwrap();
            let mut buf = [0u8; 13];
            file.read_exact(&mut buf).unwrap();
            buf
        });

        let mut dispatcher = open(&path_str).unwrap();
        dispatcher
            .send(DispatchAction::Handshake, MacAddr::new([1; 6]), MacAddr::new([2; 6]))
            .unwrap();

        let received = reader.join().unwrap();
        assert_eq!(received[0], 1);
        assert_eq!(&received[1..7], &[1; 6]);
        assert_eq!(&received[7..13], &[2; 6]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
