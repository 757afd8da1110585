//! In-memory WAV sources for unit tests

use std::io::Cursor;
use crate::resource::ResourceDesc;

/// 16-bit stereo at 22050 Hz
pub fn stereo_16bit_spec() -> hound::WavSpec {
    hound::WavSpec {
        channels: 2,
        sample_rate: 22050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode `frames` frames of a ramp signal as a complete WAV file
///
/// Sample `i` holds `i as i16`, so data bytes are predictable.
pub fn wav_bytes(spec: hound::WavSpec, frames: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..frames * spec.channels as u32 {
            writer.write_sample(i as i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    bytes
}

/// Descriptor for a 16-bit stereo WAV holding exactly `data_len` data bytes
///
/// `data_len` must be a multiple of 4.
pub fn wav_desc(data_len: u32) -> ResourceDesc {
    ResourceDesc::from_bytes(wav_bytes(stereo_16bit_spec(), data_len / 4))
}

/// Hand-assembled 16-bit stereo WAV holding `data` verbatim in its data chunk
///
/// `extra` chunks go between the RIFF header and `fmt `. Odd sized chunks
/// get their pad byte, and `trailing` is appended after the data chunk.
pub fn raw_wav_bytes(extra: &[(&[u8; 4], &[u8])], data: &[u8], trailing: &[u8]) -> Vec<u8> {
    fn push_chunk(bytes: &mut Vec<u8>, id: &[u8; 4], body: &[u8]) {
        bytes.extend_from_slice(id);
        bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
        bytes.extend_from_slice(body);
        if body.len() % 2 == 1 {
            bytes.push(0);
        }
    }

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&22050u32.to_le_bytes());
    fmt.extend_from_slice(&88200u32.to_le_bytes());
    fmt.extend_from_slice(&4u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());

    let mut body = b"WAVE".to_vec();
    for (id, chunk) in extra {
        push_chunk(&mut body, id, chunk);
    }
    push_chunk(&mut body, b"fmt ", &fmt);
    push_chunk(&mut body, b"data", data);
    body.extend_from_slice(trailing);

    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&body);
    bytes
}
