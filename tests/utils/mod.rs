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

// Not all functions are used from all test targets. So allow dead code in this module.
#![allow(dead_code)]

use crabby_webp::codecs::*;
use crabby_webp::decoder::*;
use crabby_webp::*;

use std::sync::Arc;
use std::sync::Mutex;

pub const ANMF_DISPOSE_BACKGROUND: u8 = 0x01;
pub const ANMF_NO_BLEND: u8 = 0x02;

pub fn chunk(fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = fourcc.to_vec();
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        bytes.push(0);
    }
    bytes
}

pub fn riff(body: &[u8]) -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    bytes.extend_from_slice(b"WEBP");
    bytes.extend_from_slice(body);
    bytes
}

fn u24(value: u32) -> [u8; 3] {
    let bytes = value.to_le_bytes();
    [bytes[0], bytes[1], bytes[2]]
}

/// A VP8L chunk whose header announces `width` x `height`. The pixel data is
/// replaced by `color`, which only [`ColorCodec`] understands.
pub fn fake_vp8l(width: u32, height: u32, alpha: bool, color: [u8; 4]) -> Vec<u8> {
    let bits = (width - 1) | ((height - 1) << 14) | (u32::from(alpha) << 28);
    let mut payload = vec![0x2f];
    payload.extend_from_slice(&bits.to_le_bytes());
    payload.extend_from_slice(&color);
    chunk(b"VP8L", &payload)
}

/// A real lossless bitstream for tightly packed RGBA `pixels`.
pub fn encode_vp8l(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    image_webp::WebPEncoder::new(&mut output)
        .encode(pixels, width, height, image_webp::ColorType::Rgba8)
        .expect("encoding failed");
    let start = output
        .windows(4)
        .position(|x| x == b"VP8L")
        .expect("no VP8L chunk");
    let size = u32::from_le_bytes(output[start + 4..start + 8].try_into().unwrap()) as usize;
    output[start..start + 8 + size].to_vec()
}

#[derive(Clone, Debug)]
pub struct TestFrame {
    pub rect: Rect,
    pub duration_ms: u32,
    pub flags: u8,
    pub image: Vec<u8>,
}

impl TestFrame {
    /// A frame decoded by [`ColorCodec`] to a single color.
    pub fn solid(rect: Rect, alpha: bool, flags: u8, color: [u8; 4]) -> Self {
        Self {
            rect,
            duration_ms: 100,
            flags,
            image: fake_vp8l(rect.width, rect.height, alpha, color),
        }
    }
}

pub fn rect(x: u32, y: u32, width: u32, height: u32) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Builds an animated container. `background` is in the container's BGRA
/// order.
pub fn animation(
    width: u32,
    height: u32,
    background: [u8; 4],
    loop_count: u16,
    frames: &[TestFrame],
) -> Vec<u8> {
    let mut vp8x = vec![0x12, 0, 0, 0];
    vp8x.extend_from_slice(&u24(width - 1));
    vp8x.extend_from_slice(&u24(height - 1));
    let mut body = chunk(b"VP8X", &vp8x);
    let mut anim = background.to_vec();
    anim.extend_from_slice(&loop_count.to_le_bytes());
    body.extend(chunk(b"ANIM", &anim));
    for frame in frames {
        let mut anmf = Vec::new();
        anmf.extend_from_slice(&u24(frame.rect.x / 2));
        anmf.extend_from_slice(&u24(frame.rect.y / 2));
        anmf.extend_from_slice(&u24(frame.rect.width - 1));
        anmf.extend_from_slice(&u24(frame.rect.height - 1));
        anmf.extend_from_slice(&u24(frame.duration_ms));
        anmf.push(frame.flags);
        anmf.extend_from_slice(&frame.image);
        body.extend(chunk(b"ANMF", &anmf));
    }
    riff(&body)
}

/// Fills the output region with the color stored after the VP8L header of
/// payloads built by [`fake_vp8l`]. Records every configuration it was
/// called with.
#[derive(Default)]
pub struct ColorCodec {
    pub calls: Mutex<Vec<DecoderConfig>>,
}

impl Codec for ColorCodec {
    fn decode(
        &self,
        payload: &[u8],
        config: &DecoderConfig,
        output: &mut Canvas,
        region: &Rect,
    ) -> WebpResult<()> {
        self.calls.lock().unwrap().push(*config);
        if payload.len() < 17 {
            return Err(WebpError::DecodeFailed("not a test payload".into()));
        }
        let color = &payload[13..17];
        for y in region.y..region.y + region.height {
            for pixel in output
                .row_segment_mut(region.x, y, region.width)?
                .chunks_exact_mut(4)
            {
                pixel.copy_from_slice(color);
            }
        }
        Ok(())
    }
}

/// Always fails.
pub struct FailingCodec;

impl Codec for FailingCodec {
    fn decode(
        &self,
        _payload: &[u8],
        _config: &DecoderConfig,
        _output: &mut Canvas,
        _region: &Rect,
    ) -> WebpResult<()> {
        Err(WebpError::DecodeFailed("corrupt".into()))
    }
}

pub fn open_with_codec(data: Vec<u8>, settings: Settings, codec: Arc<dyn Codec>) -> Decoder {
    let mut decoder = Decoder::open_with_settings(data, settings).expect("open failed");
    decoder.set_codec(codec);
    decoder
}

pub fn pixel(pixels: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let offset = y * stride + x * 4;
    pixels[offset..offset + 4].try_into().unwrap()
}
