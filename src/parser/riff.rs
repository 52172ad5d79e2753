// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::internal_utils::stream::*;
use crate::internal_utils::*;
use crate::parser::*;
use crate::*;

use std::ops::Range;

pub const RIFF_HEADER_SIZE: usize = 12;
pub const CHUNK_HEADER_SIZE: usize = 8;
pub const ANMF_HEADER_SIZE: usize = 16;

const VP8X_FLAG_ANIMATION: u8 = 0x02;
pub(crate) const VP8X_FLAG_ALPHA: u8 = 0x10;
const ANMF_FLAG_DISPOSE_BACKGROUND: u8 = 0x01;
const ANMF_FLAG_NO_BLEND: u8 = 0x02;
const VP8L_SIGNATURE: u8 = 0x2f;
const VP8_START_CODE: [u8; 3] = [0x9d, 0x01, 0x2a];

#[derive(Debug, Clone)]
struct Chunk {
    fourcc: [u8; 4],
    // Absolute offset of the chunk header within the container.
    header_start: usize,
    // Absolute byte range of the chunk payload (padding excluded).
    payload: Range<usize>,
}

fn parse_chunks(data: &[u8], area: Range<usize>) -> WebpResult<Vec<Chunk>> {
    let Some(bytes) = data.get(area.clone()) else {
        return WebpError::parse_failed("chunk area outside the buffer");
    };
    let mut stream = IStream::create(bytes);
    let mut chunks = Vec::new();
    // Trailing bytes too short to hold a chunk header are ignored.
    while stream.bytes_left()? >= CHUNK_HEADER_SIZE {
        let header_start = checked_add!(area.start, stream.offset)?;
        let fourcc = stream.read_fourcc()?;
        let size = usize_from_u32(stream.read_u32()?)?;
        let payload_start = checked_add!(area.start, stream.offset)?;
        stream.skip(size)?;
        if size % 2 == 1 && stream.has_bytes_left()? {
            stream.skip(1)?;
        }
        chunks.push(Chunk {
            fourcc,
            header_start,
            payload: payload_start..payload_start + size,
        });
    }
    Ok(chunks)
}

// Returns (width, height, alpha_is_used).
fn vp8l_features(payload: &[u8]) -> WebpResult<(u32, u32, bool)> {
    let mut stream = IStream::create(payload);
    if stream.read_u8()? != VP8L_SIGNATURE {
        return WebpError::parse_failed("invalid VP8L signature");
    }
    let bits = stream.read_u32()?;
    let width = (bits & 0x3fff) + 1;
    let height = ((bits >> 14) & 0x3fff) + 1;
    let alpha_is_used = (bits >> 28) & 1 == 1;
    Ok((width, height, alpha_is_used))
}

fn vp8_features(payload: &[u8]) -> WebpResult<(u32, u32)> {
    let mut stream = IStream::create(payload);
    let frame_tag = stream.read_u24()?;
    if frame_tag & 1 != 0 {
        return WebpError::parse_failed("VP8 payload is not a key frame");
    }
    if stream.get_slice(3)? != VP8_START_CODE {
        return WebpError::parse_failed("invalid VP8 start code");
    }
    let width = u32::from(stream.read_u16()? & 0x3fff);
    let height = u32::from(stream.read_u16()? & 0x3fff);
    Ok((width, height))
}

#[derive(Debug, Default, Clone)]
struct FrameRecord {
    header: FrameHeader,
    // Area that holds the frame's image chunks.
    chunks: Range<usize>,
}

/// Chunk-level parser for WebP containers.
///
/// Only byte ranges are recorded, so the demuxer does not borrow the buffer it
/// was created from. The same buffer must be handed back to [`Self::frame`].
#[derive(Debug, Default)]
pub struct RiffDemuxer {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// 0 means infinite.
    pub loop_count: u32,
    /// As stored in the ANIM chunk: [Blue, Green, Red, Alpha].
    pub background_color: [u8; 4],
    pub has_alpha: bool,
    pub is_animated: bool,
    frames: Vec<FrameRecord>,
}

impl RiffDemuxer {
    pub fn parse(data: &[u8]) -> WebpResult<Self> {
        let mut stream = IStream::create(data);
        if stream.read_fourcc()? != *b"RIFF" {
            return WebpError::parse_failed("missing RIFF signature");
        }
        let riff_size = usize_from_u32(stream.read_u32()?)?;
        if stream.read_fourcc()? != *b"WEBP" {
            return WebpError::parse_failed("missing WEBP signature");
        }
        if riff_size < 4 {
            return WebpError::parse_failed("invalid RIFF size");
        }
        // Anything after the declared RIFF size is not part of the image.
        let body_size = std::cmp::min(riff_size - 4, stream.bytes_left()?);
        let chunks = parse_chunks(data, RIFF_HEADER_SIZE..RIFF_HEADER_SIZE + body_size)?;
        let Some(first) = chunks.first() else {
            return WebpError::parse_failed("no chunks in container");
        };
        let demuxer = match &first.fourcc {
            b"VP8 " => {
                let (width, height) = vp8_features(&data[first.payload.clone()])?;
                Self::create_still(width, height, false, first.header_start..first.payload.end)
            }
            b"VP8L" => {
                let (width, height, has_alpha) = vp8l_features(&data[first.payload.clone()])?;
                Self::create_still(width, height, has_alpha, first.header_start..first.payload.end)
            }
            b"VP8X" => Self::parse_extended(data, &chunks)?,
            _ => return WebpError::parse_failed("unknown first chunk"),
        };
        if demuxer.canvas_width == 0 || demuxer.canvas_height == 0 {
            return WebpError::parse_failed("empty canvas");
        }
        tracing::trace!(
            canvas_width = demuxer.canvas_width,
            canvas_height = demuxer.canvas_height,
            frames = demuxer.frames.len(),
            animated = demuxer.is_animated,
            "parsed RIFF container"
        );
        Ok(demuxer)
    }

    fn create_still(width: u32, height: u32, has_alpha: bool, chunks: Range<usize>) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            has_alpha,
            frames: vec![FrameRecord {
                header: FrameHeader {
                    width,
                    height,
                    // There is nothing underneath a still image to blend with.
                    blend: BlendMethod::NoBlend,
                    ..Default::default()
                },
                chunks,
            }],
            ..Default::default()
        }
    }

    fn parse_extended(data: &[u8], chunks: &[Chunk]) -> WebpResult<Self> {
        let vp8x = &data[chunks[0].payload.clone()];
        if vp8x.len() < 10 {
            return WebpError::parse_failed("VP8X chunk too small");
        }
        let mut stream = IStream::create(vp8x);
        let flags = stream.read_u8()?;
        stream.skip_u24()?; // reserved
        let mut demuxer = Self {
            canvas_width: stream.read_u24()? + 1,
            canvas_height: stream.read_u24()? + 1,
            has_alpha: flags & VP8X_FLAG_ALPHA != 0,
            is_animated: flags & VP8X_FLAG_ANIMATION != 0,
            ..Default::default()
        };
        if demuxer.is_animated {
            for chunk in &chunks[1..] {
                match &chunk.fourcc {
                    b"ANIM" => {
                        let mut stream = IStream::create(&data[chunk.payload.clone()]);
                        demuxer.background_color = stream.read_fourcc()?;
                        demuxer.loop_count = u32::from(stream.read_u16()?);
                    }
                    b"ANMF" => demuxer.frames.push(Self::parse_anmf(data, chunk)?),
                    _ => {}
                }
            }
        } else {
            let image_chunks: Vec<&Chunk> = chunks[1..]
                .iter()
                .filter(|x| matches!(&x.fourcc, b"ALPH" | b"VP8 " | b"VP8L"))
                .collect();
            let (Some(first), Some(last)) = (image_chunks.first(), image_chunks.last()) else {
                return WebpError::parse_failed("no image data in still image");
            };
            demuxer.frames.push(FrameRecord {
                header: FrameHeader {
                    width: demuxer.canvas_width,
                    height: demuxer.canvas_height,
                    blend: BlendMethod::NoBlend,
                    ..Default::default()
                },
                chunks: first.header_start..last.payload.end,
            });
        }
        Ok(demuxer)
    }

    fn parse_anmf(data: &[u8], chunk: &Chunk) -> WebpResult<FrameRecord> {
        if chunk.payload.len() < ANMF_HEADER_SIZE {
            return WebpError::parse_failed("ANMF chunk too small");
        }
        let mut stream = IStream::create(&data[chunk.payload.clone()]);
        let x_offset = checked_mul!(stream.read_u24()?, 2)?;
        let y_offset = checked_mul!(stream.read_u24()?, 2)?;
        let width = stream.read_u24()? + 1;
        let height = stream.read_u24()? + 1;
        let duration_ms = stream.read_u24()?;
        let flags = stream.read_u8()?;
        Ok(FrameRecord {
            header: FrameHeader {
                x_offset,
                y_offset,
                width,
                height,
                duration_ms,
                dispose: if flags & ANMF_FLAG_DISPOSE_BACKGROUND != 0 {
                    DisposeMethod::Background
                } else {
                    DisposeMethod::None
                },
                blend: if flags & ANMF_FLAG_NO_BLEND != 0 {
                    BlendMethod::NoBlend
                } else {
                    BlendMethod::Blend
                },
            },
            chunks: chunk.payload.start + ANMF_HEADER_SIZE..chunk.payload.end,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn frame_headers(&self) -> impl Iterator<Item = &FrameHeader> {
        self.frames.iter().map(|x| &x.header)
    }

    /// Header of the frame with the 1-based number `frame_num`, without
    /// looking at its image data.
    pub fn frame_header(&self, frame_num: u32) -> Option<&FrameHeader> {
        let index = usize::try_from(frame_num.checked_sub(1)?).ok()?;
        self.frames.get(index).map(|x| &x.header)
    }

    /// Returns the frame with the 1-based number `frame_num`. `data` must be
    /// the buffer this demuxer was parsed from.
    pub fn frame(&self, data: &[u8], frame_num: u32) -> WebpResult<FrameInfo> {
        if frame_num == 0 || frame_num > self.frame_count() {
            return WebpError::out_of_range();
        }
        let record = &self.frames[usize_from_u32(frame_num - 1)?];
        let header = record.header;
        if !header.rect().fits_in(self.canvas_width, self.canvas_height) {
            return WebpError::parse_failed(format!(
                "frame {frame_num} does not fit in the canvas"
            ));
        }
        let chunks = parse_chunks(data, record.chunks.clone())?;
        let mut image_chunks = chunks
            .iter()
            .skip_while(|x| !matches!(&x.fourcc, b"ALPH" | b"VP8 " | b"VP8L"));
        let (payload, has_alpha, size) = match image_chunks.next() {
            Some(chunk) if &chunk.fourcc == b"VP8L" => {
                let (width, height, alpha) = vp8l_features(&data[chunk.payload.clone()])?;
                (chunk.header_start..chunk.payload.end, alpha, (width, height))
            }
            Some(chunk) if &chunk.fourcc == b"VP8 " => {
                let size = vp8_features(&data[chunk.payload.clone()])?;
                (chunk.header_start..chunk.payload.end, false, size)
            }
            Some(alph) => match image_chunks.next() {
                Some(vp8) if &vp8.fourcc == b"VP8 " => {
                    let size = vp8_features(&data[vp8.payload.clone()])?;
                    (alph.header_start..vp8.payload.end, true, size)
                }
                _ => return WebpError::parse_failed("ALPH chunk without VP8 chunk"),
            },
            None => {
                return WebpError::parse_failed(format!("frame {frame_num} has no image data"))
            }
        };
        if size != (header.width, header.height) {
            return WebpError::parse_failed(format!(
                "frame {frame_num} bitstream size does not match its header"
            ));
        }
        Ok(FrameInfo {
            frame_num,
            header,
            has_alpha,
            payload,
        })
    }
}
