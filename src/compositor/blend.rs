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

use super::canvas::*;

use crate::*;

fn blend_channel(dst: u8, src: u8, src_alpha: u32) -> u8 {
    // The numerator is at most 255 * 255, so the quotient fits in a u8.
    ((dst as u32 * (255 - src_alpha) + src as u32 * src_alpha) / 255) as u8
}

/// Blends the straight-alpha RGBA pixel `src` over `dst` in place.
///
/// Color channels are a weighted average with the source alpha as weight and
/// the destination alpha moves towards opaque. All divisions truncate.
pub fn blend_pixel(dst: &mut [u8], src: &[u8]) {
    let alpha = src[3] as u32;
    for channel in 0..3 {
        dst[channel] = blend_channel(dst[channel], src[channel], alpha);
    }
    dst[3] = blend_channel(dst[3], 255, alpha);
}

/// Blends the tightly packed RGBA pixels in `src` onto the `rect` area of
/// `canvas`.
pub(crate) fn blend_rect(canvas: &mut Canvas, rect: &Rect, src: &[u8]) -> WebpResult<()> {
    let row_bytes = rect.width as usize * CHANNEL_COUNT;
    if src.len() < row_bytes * rect.height as usize {
        return WebpError::invalid_argument();
    }
    if row_bytes == 0 {
        return Ok(());
    }
    for (y, src_row) in (rect.y..rect.y + rect.height).zip(src.chunks_exact(row_bytes)) {
        let dst_row = canvas.row_segment_mut(rect.x, y, rect.width)?;
        for (dst, src) in dst_row
            .chunks_exact_mut(CHANNEL_COUNT)
            .zip(src_row.chunks_exact(CHANNEL_COUNT))
        {
            blend_pixel(dst, src);
        }
    }
    Ok(())
}
