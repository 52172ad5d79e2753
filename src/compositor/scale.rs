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

use crate::internal_utils::*;
use crate::*;

pub fn is_scaling(canvas_width: u32, canvas_height: u32, target_width: u32, target_height: u32) -> bool {
    canvas_width != target_width || canvas_height != target_height
}

fn scale_value(value: u32, target: u32, canvas: u32) -> WebpResult<u32> {
    // Truncating division. |value| never exceeds |canvas| for rects that fit
    // in the canvas, so the result fits in a u32.
    u32::try_from(value as u64 * target as u64 / canvas as u64).or(Err(WebpError::InvalidArgument))
}

/// Maps `rect` from canvas coordinates to a `target_width` x `target_height`
/// render target. Each coordinate is scaled independently with truncating
/// division. The rect is returned unchanged when the sizes match.
pub fn scale_rect(
    rect: &Rect,
    canvas_width: u32,
    canvas_height: u32,
    target_width: i32,
    target_height: i32,
) -> WebpResult<Rect> {
    let target_width = u32_from_i32(target_width)?;
    let target_height = u32_from_i32(target_height)?;
    if !is_scaling(canvas_width, canvas_height, target_width, target_height) {
        return Ok(*rect);
    }
    if canvas_width == 0 || canvas_height == 0 {
        return WebpError::invalid_argument();
    }
    Ok(Rect {
        x: scale_value(rect.x, target_width, canvas_width)?,
        y: scale_value(rect.y, target_height, canvas_height)?,
        width: scale_value(rect.width, target_width, canvas_width)?,
        height: scale_value(rect.height, target_height, canvas_height)?,
    })
}
