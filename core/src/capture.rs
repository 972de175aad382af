//! # Offline Capture Reading
//!
//! Wraps `pcap-parser`'s legacy reader into a frame-at-a-time source. Only
//! the constructor reports failures to the caller; every mid-stream reader
//! failure is logged and ends the stream, so partial captures still yield
//! the frames read up to that point.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;
use pcap_parser::traits::PcapReaderIterator;
use pcap_parser::{LegacyPcapReader, Linktype, PcapBlockOwned, PcapError};
use tracing::warn;

const READER_BUFFER_SIZE: usize = 65536;

/// Yields raw link-layer frames from a legacy pcap capture, in file order.
pub struct FrameSource<R: Read> {
    reader: LegacyPcapReader<R>,
    linktype: Linktype,
    awaiting_refill: bool,
    done: bool,
}

impl FrameSource<BufReader<File>> {
    /// Opens a capture file.
    ///
    /// Fails on a missing or unreadable path, and on a stream that does not
    /// start with a legacy pcap header (pcapng included).
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening capture {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read> FrameSource<R> {
    pub fn from_reader(reader: R) -> anyhow::Result<Self> {
        let reader = LegacyPcapReader::new(READER_BUFFER_SIZE, reader)
            .context("not a legacy pcap capture")?;
        Ok(Self {
            reader,
            linktype: Linktype::ETHERNET,
            awaiting_refill: false,
            done: false,
        })
    }

    /// Link-layer type declared by the capture header.
    ///
    /// Defaults to Ethernet until the header block has been consumed, which
    /// happens on the first [`Self::next_frame`] call.
    pub fn linktype(&self) -> Linktype {
        self.linktype
    }

    /// Pulls the next captured frame.
    ///
    /// `None` is terminal: a clean end of file, a truncated tail and native
    /// parse errors all land here (the latter two after a log line).
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        if self.done {
            return None;
        }

        loop {
            match self.reader.next() {
                Ok((offset, block)) => {
                    self.awaiting_refill = false;
                    let frame = match block {
                        PcapBlockOwned::LegacyHeader(ref header) => {
                            self.linktype = header.network;
                            None
                        }
                        PcapBlockOwned::Legacy(ref packet) => Some(packet.data.to_vec()),
                        PcapBlockOwned::NG(_) => {
                            warn!("skipping pcapng block in legacy capture");
                            None
                        }
                    };
                    // The block borrows the reader's buffer; release it
                    // before consuming.
                    drop(block);
                    self.reader.consume(offset);
                    if let Some(frame) = frame {
                        return Some(frame);
                    }
                }
                Err(PcapError::Eof) => {
                    self.done = true;
                    return None;
                }
                Err(PcapError::Incomplete(_)) => {
                    // A refill that makes no progress means the file stops
                    // inside a record.
                    if self.awaiting_refill {
                        warn!("capture ends mid-frame");
                        self.done = true;
                        return None;
                    }
                    self.awaiting_refill = true;
                    if let Err(e) = self.reader.refill() {
                        warn!("capture ends mid-frame: {e:?}");
                        self.done = true;
                        return None;
                    }
                }
                Err(e) => {
                    warn!("capture read failed: {e:?}");
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
