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

use crate::codecs::*;
use crate::compositor::canvas::*;
use crate::internal_utils::*;
use crate::parser::riff::*;
use crate::*;

use image_webp::WebPDecoder;
use std::io::Cursor;

const VP8X_PAYLOAD_SIZE: usize = 10;

/// Decodes frames with the pure Rust `image-webp` crate.
#[derive(Debug, Default)]
pub struct ImageWebp;

fn push_u24(data: &mut Vec<u8>, value: u32) {
    data.extend_from_slice(&value.to_le_bytes()[..3]);
}

// Wraps the image chunks of a frame into a standalone still image. A VP8X
// header is needed for the ALPH chunk to be picked up.
fn wrap_payload(payload: &[u8], width: u32, height: u32) -> WebpResult<Vec<u8>> {
    let needs_vp8x = payload.starts_with(b"ALPH");
    let vp8x_size = if needs_vp8x {
        CHUNK_HEADER_SIZE + VP8X_PAYLOAD_SIZE
    } else {
        0
    };
    let padding = payload.len() % 2;
    let body_size = checked_add!(checked_add!(vp8x_size, payload.len())?, padding)?;
    let riff_size = u32_from_usize(checked_add!(body_size, 4)?)?;
    let mut data: Vec<u8> = Vec::new();
    if data.try_reserve_exact(RIFF_HEADER_SIZE + body_size).is_err() {
        return WebpError::out_of_memory();
    }
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&riff_size.to_le_bytes());
    data.extend_from_slice(b"WEBP");
    if needs_vp8x {
        data.extend_from_slice(b"VP8X");
        data.extend_from_slice(&(VP8X_PAYLOAD_SIZE as u32).to_le_bytes());
        data.extend_from_slice(&[VP8X_FLAG_ALPHA, 0, 0, 0]);
        push_u24(&mut data, width - 1);
        push_u24(&mut data, height - 1);
    }
    data.extend_from_slice(payload);
    if padding != 0 {
        data.push(0);
    }
    Ok(data)
}

impl Codec for ImageWebp {
    fn decode(
        &self,
        payload: &[u8],
        config: &DecoderConfig,
        output: &mut Canvas,
        region: &Rect,
    ) -> WebpResult<()> {
        if config.width == 0 || config.height == 0 {
            return WebpError::invalid_argument();
        }
        if config.output_size() != (region.width, region.height) {
            return WebpError::invalid_argument();
        }
        let data = wrap_payload(payload, config.width, config.height)?;
        let mut decoder =
            WebPDecoder::new(Cursor::new(&data[..])).map_err(WebpError::map_decode_failed)?;
        if decoder.dimensions() != (config.width, config.height) {
            return WebpError::decode_failed(format!(
                "bitstream is {:?}, expected {}x{}",
                decoder.dimensions(),
                config.width,
                config.height
            ));
        }
        let channels = if decoder.has_alpha() { 4 } else { 3 };
        let Some(size) = decoder.output_buffer_size() else {
            return WebpError::decode_failed("frame too large");
        };
        let mut pixels = create_zeroed_buffer(size)?;
        decoder
            .read_image(&mut pixels)
            .map_err(WebpError::map_decode_failed)?;

        let width = config.width as usize;
        let height = config.height as usize;
        let src_row_bytes = width * channels;
        let (out_width, out_height) = (region.width as usize, region.height as usize);
        for y in 0..out_height {
            // Nearest neighbor sampling when resampling.
            let src_y = if config.use_scaling { y * height / out_height } else { y };
            let src_row = &pixels[src_y * src_row_bytes..(src_y + 1) * src_row_bytes];
            let dst_row = output.row_segment_mut(region.x, region.y + y as u32, region.width)?;
            for (x, dst) in dst_row.chunks_exact_mut(CHANNEL_COUNT).enumerate() {
                let src_x = if config.use_scaling { x * width / out_width } else { x };
                let src = &src_row[src_x * channels..(src_x + 1) * channels];
                dst[..3].copy_from_slice(&src[..3]);
                dst[3] = if channels == 4 { src[3] } else { 255 };
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_lossless() {
        let payload = b"VP8L\x05\x00\x00\x00\x2f\x00\x00\x00\x00";
        let data = wrap_payload(payload, 1, 1).unwrap();
        assert_eq!(&data[..4], b"RIFF");
        assert_eq!(&data[8..16], b"WEBPVP8L");
        // Odd sized chunks get a padding byte.
        assert_eq!(data.len(), RIFF_HEADER_SIZE + payload.len() + 1);
        assert_eq!(
            u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize,
            data.len() - 8
        );
    }

    #[test]
    fn wrap_with_alpha() {
        let payload = b"ALPH\x00\x00\x00\x00VP8 \x00\x00\x00\x00";
        let data = wrap_payload(payload, 300, 2).unwrap();
        assert_eq!(&data[12..16], b"VP8X");
        assert_eq!(data[20], VP8X_FLAG_ALPHA);
        assert_eq!(&data[24..27], &[0x2b, 0x01, 0x00]);
        assert_eq!(&data[27..30], &[0x01, 0x00, 0x00]);
        assert_eq!(&data[30..34], b"ALPH");
    }

    #[test]
    fn garbage_fails_to_decode() {
        let payload = b"VP8L\x04\x00\x00\x00\x00\x00\x00\x00";
        let config = DecoderConfig {
            width: 1,
            height: 1,
            ..Default::default()
        };
        let mut pixels = [0u8; 4];
        let mut canvas = Canvas::create_packed(&mut pixels, 1, 1).unwrap();
        let result = ImageWebp.decode(payload, &config, &mut canvas, &Rect::full(1, 1));
        assert!(matches!(result, Err(WebpError::DecodeFailed(_))));
    }
}
