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

pub mod blend;
pub mod canvas;
pub mod scale;

use crate::codecs::*;
use crate::decoder::FrameDescriptor;
use crate::internal_utils::*;
use crate::*;

use canvas::*;

/// Composites `frame` onto `pixels`, which must hold the previously rendered
/// frame of the same animation at the same target size.
///
/// The previous frame's area is disposed first, then this frame is decoded
/// (resampled when the target size differs from the canvas size) and either
/// blended over or copied into its rectangle. With `force_clear_all` the whole
/// buffer is zeroed instead of disposing.
pub fn render(
    frame: &FrameDescriptor,
    codec: &dyn Codec,
    target_width: i32,
    target_height: i32,
    stride: i32,
    pixels: &mut [u8],
    force_clear_all: bool,
) -> WebpResult<()> {
    let width = u32_from_i32(target_width)?;
    let height = u32_from_i32(target_height)?;
    let mut canvas = Canvas::create(pixels, width, height, stride)?;

    let use_scaling = scale::is_scaling(frame.canvas_width, frame.canvas_height, width, height);
    let render_rect = scale::scale_rect(
        &frame.rect(),
        frame.canvas_width,
        frame.canvas_height,
        target_width,
        target_height,
    )?;
    let dispose_rect = scale::scale_rect(
        &frame.dispose_rect(),
        frame.canvas_width,
        frame.canvas_height,
        target_width,
        target_height,
    )?;
    if !render_rect.fits_in(width, height) || !dispose_rect.fits_in(width, height) {
        return WebpError::invalid_argument();
    }
    tracing::trace!(
        frame = frame.index(),
        ?render_rect,
        ?dispose_rect,
        use_scaling,
        force_clear_all,
        "rendering frame"
    );

    if force_clear_all {
        canvas.clear_all();
    } else if frame.dispose_to_background {
        if frame.background_color[3] != 0 {
            canvas.fill_rect(&dispose_rect, frame.background_color)?;
        } else if dispose_rect != Rect::full(width, height) {
            canvas.clear_rect(&dispose_rect)?;
        } else {
            canvas.clear_all();
        }
    }

    if render_rect.is_empty() {
        // The frame collapsed to nothing at this target size.
        return Ok(());
    }
    let config = DecoderConfig {
        width: frame.width,
        height: frame.height,
        scaled_width: render_rect.width,
        scaled_height: render_rect.height,
        use_scaling,
    };
    if frame.blend_with_previous {
        let size = checked_mul!(
            checked_mul!(render_rect.width as usize, render_rect.height as usize)?,
            CHANNEL_COUNT
        )?;
        let mut scratch = create_zeroed_buffer(size)?;
        let region = Rect::full(render_rect.width, render_rect.height);
        {
            let mut scratch_canvas =
                Canvas::create_packed(&mut scratch, render_rect.width, render_rect.height)?;
            decode(frame, codec, &config, &mut scratch_canvas, &region)?;
        }
        blend::blend_rect(&mut canvas, &render_rect, &scratch)
    } else {
        decode(frame, codec, &config, &mut canvas, &render_rect)
    }
}

fn decode(
    frame: &FrameDescriptor,
    codec: &dyn Codec,
    config: &DecoderConfig,
    output: &mut Canvas,
    region: &Rect,
) -> WebpResult<()> {
    codec
        .decode(frame.payload(), config, output, region)
        .inspect_err(|err| tracing::debug!(frame = frame.index(), %err, "frame decode failed"))
}
