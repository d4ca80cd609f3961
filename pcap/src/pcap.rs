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

use std::io::{Read, Write};
use std::mem::size_of;
use std::time::Duration;
use zerocopy::{AsBytes, FromBytes};
use zerocopy_derive::{AsBytes, FromBytes, FromZeroes};

type Result<A> = std::result::Result<A, std::io::Error>;

/// Represents the global header of a pcap capture file.
///
/// This struct defines the global header that appears at the beginning of a
/// pcap capture file. It contains metadata about the capture, such as the
/// file format version, the data link type, and the maximum snapshot length.
///
/// # File Header format
/// ```text
///                         1                   2                   3
///     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  0 |                          Magic Number                         |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  4 |          Major Version        |         Minor Version         |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  8 |                           Reserved1                           |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// 12 |                           Reserved2                           |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// 16 |                            SnapLen                            |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// 20 | FCS |f|0 0 0 0 0 0 0 0 0 0 0 0|         LinkType              |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes)]
pub struct FileHeader {
    /// Magic number identifying the file format.
    pub magic: u32,
    /// Major version of the pcap format.
    pub version_major: u16,
    /// Minor version of the pcap format.
    pub version_minor: u16,
    /// Time zone offset.
    pub thiszone: i32,
    /// Timestamp accuracy.
    pub sigfigs: u32,
    /// Maximum packet length in bytes.
    pub snaplen: u32,
    /// Data link type of packets.
    pub linktype: u32,
}

impl FileHeader {
    const MAGIC: u32 = 0xa1b2c3d4;
    const VERSION_MAJOR: u16 = 2u16;
    const VERSION_MINOR: u16 = 4u16;
    const RESERVED_1: i32 = 0;
    const RESERVED_2: u32 = 0;
    const SNAP_LEN: u32 = u32::MAX;
}

impl Default for FileHeader {
    fn default() -> Self {
        FileHeader {
            magic: FileHeader::MAGIC,
            version_major: FileHeader::VERSION_MAJOR,
            version_minor: FileHeader::VERSION_MINOR,
            thiszone: FileHeader::RESERVED_1,
            sigfigs: FileHeader::RESERVED_2,
            snaplen: FileHeader::SNAP_LEN,
            linktype: LinkType::Null as u32,
        }
    }
}

/// Represents the link layer header type of a pcap capture.
///
/// For a complete list of supported link types and their descriptions,
/// refer to the tcpdump documentation: https://www.tcpdump.org/linktypes.html
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// Null link type (BSD loopback)
    Null = 0,
    /// Ethernet
    Ethernet = 1,
    /// Radiotap link-layer information followed by an 802.11 header. This
    /// is the link type used for the handshake recognizer's capture file.
    Ieee80211RadioTap = 127,
}

impl From<LinkType> for u32 {
    fn from(val: LinkType) -> Self {
        val as u32
    }
}

/// Represents the header prepended to each packet in a pcap capture file.
///
/// # Fields
/// ```text
///                        1                   2                   3
///    0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  0 |                      Timestamp (Seconds)                      |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  4 |            Timestamp (Microseconds or nanoseconds)            |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  8 |                    Captured Packet Length                     |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// 12 |                    Original Packet Length                     |
///    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// 16 /                          Packet Data                          /
///    +---------------------------------------------------------------+
/// ```
#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes)]
pub struct PacketHeader {
    /// Timestamp of the captured packet (seconds).
    pub tv_sec: u32,
    /// Timestamp of the captured packet (microseconds).
    pub tv_usec: u32,
    /// Number of bytes captured from the packet.
    pub caplen: u32,
    /// Original length of the packet on the network.
    pub len: u32,
}

/// Reads a pcap file's global header from the given reader.
pub fn read_global_header(mut reader: impl Read) -> Result<FileHeader> {
    let mut header_bytes = [0u8; size_of::<FileHeader>()];
    reader.read_exact(&mut header_bytes)?;
    let header = FileHeader::read_from(&header_bytes[..]).ok_or(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        "failed to parse pcap file header",
    ))?;
    if header.magic != FileHeader::MAGIC {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid magic in pcap file 0x{:x}", header.magic),
        ));
    }
    Ok(header)
}

/// Reads one pcap record (header plus packet bytes) from the given reader.
pub fn read_record(mut reader: impl Read) -> Result<(PacketHeader, Vec<u8>)> {
    let mut pkt_hdr_bytes = [0u8; size_of::<PacketHeader>()];
    reader.read_exact(&mut pkt_hdr_bytes)?;
    let pkt_hdr = PacketHeader::read_from(&pkt_hdr_bytes[..]).ok_or(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        "failed to parse pcap record header",
    ))?;
    let mut packet_data = vec![0u8; pkt_hdr.caplen as usize];
    reader.read_exact(&mut packet_data)?;
    Ok((pkt_hdr, packet_data))
}

/// Writes a pcap file's global header to the output writer. Returns the
/// number of bytes written.
pub fn write_global_header(link_type: LinkType, mut output: impl Write) -> Result<usize> {
    // https://tools.ietf.org/id/draft-gharris-opsawg-pcap-00.html#name-file-header
    let header = FileHeader { linktype: link_type.into(), ..Default::default() };
    output.write_all(header.as_bytes())?;
    Ok(size_of::<FileHeader>())
}

/// Appends a single packet record to the output writer. Returns the total
/// number of bytes written.
pub fn write_record(timestamp: Duration, mut output: impl Write, packet: &[u8]) -> Result<usize> {
    // https://tools.ietf.org/id/draft-gharris-opsawg-pcap-00.html#name-packet-record
    let pkt_len = packet.len();
    let pkt_hdr_len = size_of::<PacketHeader>();
    let header = PacketHeader {
        tv_sec: timestamp.as_secs() as u32,
        tv_usec: timestamp.subsec_micros(),
        caplen: pkt_len as u32,
        len: pkt_len as u32,
    };
    let mut bytes = Vec::<u8>::with_capacity(pkt_hdr_len + pkt_len);
    bytes.extend(header.as_bytes());
    bytes.extend(packet);
    output.write_all(&bytes)?;
    Ok(pkt_hdr_len + pkt_len)
}
