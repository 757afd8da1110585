/// WAV container reader
///
/// Locates the format and data chunks of a RIFF/WAVE source and reads the
/// raw sample bytes of the data chunk in bounded pieces. Samples are never
/// decoded: the bytes go to the sound device untouched.

use std::io::{Cursor, Read, Seek, SeekFrom, Take};
use crate::error::{Error, Result};
use super::resource_desc::{ResourceDesc, SourceReader};

/// Sample encoding of a wave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Int,
    Float,
}

/// PCM layout of a wave's data chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
}

impl WaveFormat {
    /// Bytes per sample for a single channel
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Bytes per frame (one sample for every channel)
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes consumed by one second of playback
    pub fn bytes_per_second(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

impl From<hound::WavSpec> for WaveFormat {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: match spec.sample_format {
                hound::SampleFormat::Int => SampleFormat::Int,
                hound::SampleFormat::Float => SampleFormat::Float,
            },
        }
    }
}

/// Open WAV source positioned inside its data chunk
///
/// Dropping the container closes the source.
pub struct WaveContainer {
    format: WaveFormat,
    data_len: u64,
    data: Take<SourceReader>,
}

impl WaveContainer {
    /// Open `desc` and walk its RIFF chunks up to the start of the data chunk
    ///
    /// The data chunk length is taken from its header as is: it does not
    /// have to hold a whole number of samples.
    ///
    /// # Errors
    ///
    /// `InvalidSource` when the source is missing or is not a valid WAV file.
    pub fn open(desc: &ResourceDesc) -> Result<Self> {
        let invalid = |reason: &dyn std::fmt::Display| Error::InvalidSource(format!("{}: {}", desc, reason));
        let mut source = desc.open()?;

        let mut riff = [0u8; 12];
        source.read_exact(&mut riff).map_err(|_| invalid(&"truncated RIFF header"))?;
        if &riff[0..4] != b"RIFF" || &riff[8..12] != b"WAVE" {
            return Err(invalid(&"not a RIFF/WAVE file"));
        }

        let mut fmt_chunk: Option<Vec<u8>> = None;
        loop {
            let mut header = [0u8; 8];
            source.read_exact(&mut header).map_err(|_| invalid(&"no data chunk"))?;
            let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

            match &header[0..4] {
                b"fmt " => {
                    let mut body = vec![0u8; len as usize];
                    source.read_exact(&mut body).map_err(|_| invalid(&"truncated fmt chunk"))?;
                    skip_padding(&mut source, len)?;
                    fmt_chunk = Some(body);
                }
                b"data" => {
                    let fmt_chunk = fmt_chunk.ok_or_else(|| invalid(&"data chunk before fmt chunk"))?;
                    let format = parse_format(&fmt_chunk).map_err(|err| invalid(&err))?;
                    let data_len = len as u64;
                    return Ok(Self { format, data_len, data: source.take(data_len) });
                }
                _ => {
                    source.seek(SeekFrom::Current(len as i64))?;
                    skip_padding(&mut source, len)?;
                }
            }
        }
    }

    /// Format of the data chunk
    pub fn format(&self) -> WaveFormat {
        self.format
    }

    /// Size of the data chunk in bytes
    pub fn data_len(&self) -> u64 {
        self.data_len
    }

    /// Bytes of the data chunk not read yet
    pub fn remaining(&self) -> u64 {
        self.data.limit()
    }

    /// Read the next piece of the data chunk into `buf`
    ///
    /// Fills `buf` completely unless the data chunk ends first.
    /// Returns 0 once the data chunk is exhausted.
    pub fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.data.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(filled)
    }

    /// Read everything left in the data chunk
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.remaining() as usize);
        self.data.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Chunks are word aligned: an odd sized chunk is followed by a pad byte
fn skip_padding(source: &mut SourceReader, len: u32) -> Result<()> {
    if len % 2 == 1 {
        source.seek(SeekFrom::Current(1))?;
    }
    Ok(())
}

/// Decode a raw `fmt ` chunk body with hound
///
/// hound only parses complete files, so the body is wrapped in a minimal
/// RIFF header followed by an empty data chunk.
fn parse_format(fmt_chunk: &[u8]) -> std::result::Result<WaveFormat, hound::Error> {
    let padded_len = fmt_chunk.len() + fmt_chunk.len() % 2;
    let mut header = Vec::with_capacity(padded_len + 28);
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&(padded_len as u32 + 20).to_le_bytes());
    header.extend_from_slice(b"WAVEfmt ");
    header.extend_from_slice(&(fmt_chunk.len() as u32).to_le_bytes());
    header.extend_from_slice(fmt_chunk);
    header.resize(padded_len + 20, 0);
    header.extend_from_slice(b"data");
    header.extend_from_slice(&0u32.to_le_bytes());

    let reader = hound::WavReader::new(Cursor::new(header))?;
    Ok(WaveFormat::from(reader.spec()))
}

#[cfg(test)]
#[path = "wave_container_tests.rs"]
mod tests;
