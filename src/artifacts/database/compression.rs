//! Zlib framing of stored objects
//!
//! An empty buffer passes through both directions untouched: it is never
//! given a zlib header, and an empty input is read back as empty.

use crate::artifacts::core::error::{ObjectError, ObjectResult};
use bytes::Bytes;
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

const MIN_GROWTH: usize = 64;

pub fn compress(data: &[u8]) -> ObjectResult<Bytes> {
    if data.is_empty() {
        return Ok(Bytes::new());
    }

    let mut encoder = flate2::write::ZlibEncoder::new(
        Vec::with_capacity(data.len() / 2),
        flate2::Compression::default(),
    );
    encoder
        .write_all(data)
        .map_err(|e| ObjectError::CorruptStream(format!("unable to compress: {e}")))?;

    encoder
        .finish()
        .map(Bytes::from)
        .map_err(|e| ObjectError::CorruptStream(format!("unable to finish compressing: {e}")))
}

/// Inflate a complete zlib stream
///
/// Fails with `CorruptStream` on a bad header, bad data, or a stream that
/// ends before its trailer.
pub fn decompress(data: &[u8]) -> ObjectResult<Bytes> {
    if data.is_empty() {
        return Ok(Bytes::new());
    }

    let mut inflater = Decompress::new(true);
    let mut decompressed = Vec::with_capacity(data.len() * 2);

    loop {
        if decompressed.len() == decompressed.capacity() {
            decompressed.reserve(decompressed.capacity().max(MIN_GROWTH));
        }

        let total_in = inflater.total_in();
        let total_out = inflater.total_out();
        let status = inflater
            .decompress_vec(
                &data[total_in as usize..],
                &mut decompressed,
                FlushDecompress::None,
            )
            .map_err(|e| ObjectError::CorruptStream(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(Bytes::from(decompressed)),
            // there was room to write, so no progress means the input ran out
            _ if inflater.total_in() == total_in && inflater.total_out() == total_out => {
                return Err(ObjectError::CorruptStream(format!(
                    "stream ended after {} of {} bytes without a trailer",
                    total_in,
                    data.len()
                )));
            }
            _ => continue,
        }
    }
}
