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

use super::types::*;

use crate::codecs::Codec;
use crate::compositor;
use crate::decoder::FrameDescriptor;
use crate::*;

use libc::c_int;
use std::sync::Arc;

/// Opaque handle to one frame. It keeps the container bytes alive, so it may
/// outlive the image it came from.
pub struct webpFrame {
    pub(crate) descriptor: FrameDescriptor,
    pub(crate) codec: Arc<dyn Codec>,
}

/// # Safety
///
/// `frame` must be null or a handle returned by `webpImageGetFrame` that was
/// not released yet.
#[no_mangle]
pub unsafe extern "C" fn webpFrameRelease(frame: *mut webpFrame) {
    if !frame.is_null() {
        // SAFETY: Pre-conditions are met to call this function.
        let _ = unsafe { Box::from_raw(frame) };
    }
}

/// Composites the frame onto `pixels`, which must hold the previous frame
/// rendered at the same size.
///
/// # Safety
///
/// `frame` must be a valid handle. `pixels` must address `target_height` rows
/// that are `stride` bytes apart. For a negative stride `pixels` points at the
/// first (topmost) row.
#[no_mangle]
pub unsafe extern "C" fn webpFrameRender(
    frame: *const webpFrame,
    target_width: c_int,
    target_height: c_int,
    stride: c_int,
    pixels: *mut u8,
    force_clear_all: webpBool,
) -> webpResult {
    check_pointer!(frame);
    // SAFETY: Pre-conditions are met to call this function.
    let pixels = match unsafe { pixels_from_raw(pixels, target_height, stride) } {
        Ok(pixels) => pixels,
        Err(err) => return (&err).into(),
    };
    let frame = deref_const!(frame);
    compositor::render(
        &frame.descriptor,
        frame.codec.as_ref(),
        target_width,
        target_height,
        stride,
        pixels,
        force_clear_all != WEBP_FALSE,
    )
    .into()
}

macro_rules! frame_getter {
    ($name:ident, $type:ty, $value:expr) => {
        /// # Safety
        ///
        /// `frame` must be a valid handle.
        #[no_mangle]
        pub unsafe extern "C" fn $name(frame: *const webpFrame) -> $type {
            let descriptor: &FrameDescriptor = &deref_const!(frame).descriptor;
            $value(descriptor)
        }
    };
}

frame_getter!(webpFrameGetDurationMs, u32, |x: &FrameDescriptor| x.duration_ms);
frame_getter!(webpFrameGetWidth, u32, |x: &FrameDescriptor| x.width);
frame_getter!(webpFrameGetHeight, u32, |x: &FrameDescriptor| x.height);
frame_getter!(webpFrameGetXOffset, u32, |x: &FrameDescriptor| x.x_offset);
frame_getter!(webpFrameGetYOffset, u32, |x: &FrameDescriptor| x.y_offset);
frame_getter!(webpFrameGetHasAlpha, webpBool, |x: &FrameDescriptor| {
    to_webpBool(x.has_alpha)
});
frame_getter!(
    webpFrameGetShouldDisposeToBackgroundColor,
    webpBool,
    |x: &FrameDescriptor| to_webpBool(x.dispose_to_background)
);
frame_getter!(
    webpFrameGetShouldBlendWithPreviousFrame,
    webpBool,
    |x: &FrameDescriptor| to_webpBool(x.blend_with_previous)
);
frame_getter!(webpFrameIsKeyFrame, webpBool, |x: &FrameDescriptor| {
    to_webpBool(x.is_key_frame())
});
