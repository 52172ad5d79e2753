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

use super::frame::*;
use super::types::*;

use crate::decoder::*;
use crate::*;

use libc::c_int;
use libc::size_t;

/// Opaque handle to an opened animation.
pub struct webpImage {
    pub(crate) decoder: Decoder,
}

/// Copies `size` bytes at `data` and parses them. On success `*image` owns
/// the new handle and must be released with [`webpImageRelease`].
///
/// # Safety
///
/// `data` must point to `size` readable bytes and `image` must be writable.
#[no_mangle]
pub unsafe extern "C" fn webpImageCreateFromMemory(
    data: *const u8,
    size: size_t,
    image: *mut *mut webpImage,
) -> webpResult {
    check_pointer!(data);
    check_pointer!(image);
    // SAFETY: Pre-conditions are met to call this function.
    let input = unsafe { std::slice::from_raw_parts(data, size) };
    match Decoder::open_from_slice(input, Settings::default()) {
        Ok(decoder) => {
            // SAFETY: |image| was checked to be non-null.
            unsafe { *image = Box::into_raw(Box::new(webpImage { decoder })) };
            webpResult::Ok
        }
        Err(err) => (&err).into(),
    }
}

/// # Safety
///
/// `image` must be null or a handle returned by [`webpImageCreateFromMemory`]
/// that was not released yet. Frames obtained from it stay valid.
#[no_mangle]
pub unsafe extern "C" fn webpImageRelease(image: *mut webpImage) {
    if !image.is_null() {
        // SAFETY: Pre-conditions are met to call this function.
        let _ = unsafe { Box::from_raw(image) };
    }
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetWidth(image: *const webpImage) -> u32 {
    deref_const!(image).decoder.image().canvas_width
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetHeight(image: *const webpImage) -> u32 {
    deref_const!(image).decoder.image().canvas_height
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetFrameCount(image: *const webpImage) -> u32 {
    deref_const!(image).decoder.image().frame_count
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetDurationMs(image: *const webpImage) -> u64 {
    deref_const!(image).decoder.image().total_duration_ms
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetLoopCount(image: *const webpImage) -> u32 {
    deref_const!(image).decoder.image().loop_count
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetSizeInBytes(image: *const webpImage) -> size_t {
    deref_const!(image).decoder.image().size_in_bytes
}

/// Writes the duration of the first `count` frames (at most the frame count)
/// into `durations`.
///
/// # Safety
///
/// `image` must be a valid handle and `durations` must have room for `count`
/// values.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetFrameDurations(
    image: *const webpImage,
    durations: *mut u32,
    count: u32,
) -> webpResult {
    check_pointer!(image);
    check_pointer!(durations);
    let frame_durations = &deref_const!(image).decoder.image().frame_durations_ms;
    let count = std::cmp::min(count as usize, frame_durations.len());
    // SAFETY: Pre-conditions are met to call this function.
    let output = unsafe { std::slice::from_raw_parts_mut(durations, count) };
    output.copy_from_slice(&frame_durations[..count]);
    webpResult::Ok
}

/// Builds the frame at the 0-based `index`. On success `*frame` owns the new
/// handle and must be released with [`webpFrameRelease`].
///
/// # Safety
///
/// `image` must be a valid handle and `frame` must be writable.
#[no_mangle]
pub unsafe extern "C" fn webpImageGetFrame(
    image: *const webpImage,
    index: u32,
    frame: *mut *mut webpFrame,
) -> webpResult {
    check_pointer!(image);
    check_pointer!(frame);
    let decoder = &deref_const!(image).decoder;
    match decoder.frame(index) {
        Ok(descriptor) => {
            let handle = webpFrame {
                descriptor,
                codec: decoder.codec().clone(),
            };
            // SAFETY: |frame| was checked to be non-null.
            unsafe { *frame = Box::into_raw(Box::new(handle)) };
            webpResult::Ok
        }
        Err(err) => (&err).into(),
    }
}

/// # Safety
///
/// `image` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn webpImageLastKeyFrameInRange(
    image: *const webpImage,
    start: c_int,
    end: c_int,
) -> c_int {
    deref_const!(image)
        .decoder
        .last_key_frame_in_range(start, end)
}

/// Brings `pixels` to the fully composited frame `index`. `current` is the
/// frame the buffer holds already, or -1.
///
/// # Safety
///
/// `image` must be a valid handle. `pixels` must address `target_height`
/// rows that are `stride` bytes apart. For a negative stride `pixels` points
/// at the first (topmost) row.
#[no_mangle]
pub unsafe extern "C" fn webpImageRenderFrame(
    image: *const webpImage,
    index: u32,
    current: c_int,
    target_width: c_int,
    target_height: c_int,
    stride: c_int,
    pixels: *mut u8,
) -> webpResult {
    check_pointer!(image);
    // SAFETY: Pre-conditions are met to call this function.
    let pixels = match unsafe { pixels_from_raw(pixels, target_height, stride) } {
        Ok(pixels) => pixels,
        Err(err) => return (&err).into(),
    };
    let current = u32::try_from(current).ok();
    deref_const!(image)
        .decoder
        .render_nth(index, current, target_width, target_height, stride, pixels)
        .into()
}
