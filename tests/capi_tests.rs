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

#![cfg(feature = "capi")]

use crabby_webp::capi::frame::*;
use crabby_webp::capi::image::*;
use crabby_webp::capi::types::*;
use crabby_webp::*;

use std::ptr;

mod utils;
use utils::*;

fn create(data: &[u8]) -> *mut webpImage {
    let mut image: *mut webpImage = ptr::null_mut();
    let res = unsafe { webpImageCreateFromMemory(data.as_ptr(), data.len(), &mut image) };
    assert_eq!(res, webpResult::Ok);
    assert!(!image.is_null());
    image
}

fn opaque_animation() -> Vec<u8> {
    let red = encode_vp8l(4, 4, &[255, 0, 0, 255].repeat(16));
    let green = encode_vp8l(2, 2, &[0, 255, 0, 255].repeat(4));
    animation(
        4,
        4,
        [0; 4],
        7,
        &[
            TestFrame {
                rect: rect(0, 0, 4, 4),
                duration_ms: 30,
                flags: ANMF_NO_BLEND,
                image: red,
            },
            TestFrame {
                rect: rect(2, 2, 2, 2),
                duration_ms: 60,
                flags: ANMF_DISPOSE_BACKGROUND,
                image: green,
            },
        ],
    )
}

#[test]
fn image_properties() {
    let data = opaque_animation();
    let image = create(&data);
    unsafe {
        assert_eq!(webpImageGetWidth(image), 4);
        assert_eq!(webpImageGetHeight(image), 4);
        assert_eq!(webpImageGetFrameCount(image), 2);
        assert_eq!(webpImageGetDurationMs(image), 90);
        assert_eq!(webpImageGetLoopCount(image), 7);
        assert_eq!(webpImageGetSizeInBytes(image), data.len());
        let mut durations = [0u32; 3];
        assert_eq!(
            webpImageGetFrameDurations(image, durations.as_mut_ptr(), 3),
            webpResult::Ok
        );
        assert_eq!(durations, [30, 60, 0]);
        assert_eq!(webpImageLastKeyFrameInRange(image, 0, 1), 0);
        assert_eq!(webpImageLastKeyFrameInRange(image, 1, 1), -1);
        webpImageRelease(image);
    }
}

#[test]
fn frame_properties_and_render() {
    let data = opaque_animation();
    let image = create(&data);
    let mut frame: *mut webpFrame = ptr::null_mut();
    unsafe {
        assert_eq!(webpImageGetFrame(image, 2, &mut frame), webpResult::OutOfRange);
        assert_eq!(webpImageGetFrame(image, 1, &mut frame), webpResult::Ok);
        // Frames keep the container alive.
        webpImageRelease(image);
        assert_eq!(webpFrameGetDurationMs(frame), 60);
        assert_eq!(webpFrameGetWidth(frame), 2);
        assert_eq!(webpFrameGetHeight(frame), 2);
        assert_eq!(webpFrameGetXOffset(frame), 2);
        assert_eq!(webpFrameGetYOffset(frame), 2);
        assert_eq!(webpFrameGetShouldDisposeToBackgroundColor(frame), WEBP_FALSE);
        assert_eq!(webpFrameGetShouldBlendWithPreviousFrame(frame), WEBP_TRUE);
        assert_eq!(webpFrameIsKeyFrame(frame), WEBP_FALSE);

        // Bottom-up buffer: the pointer addresses the topmost row, which is
        // the last one in memory.
        let mut pixels = vec![0u8; 4 * 16];
        let top_row = pixels.as_mut_ptr().add(3 * 16);
        assert_eq!(
            webpFrameRender(frame, 4, 4, -16, top_row, WEBP_FALSE),
            webpResult::Ok
        );
        assert_eq!(&pixels[8..12], &[0, 255, 0, 255]);
        assert_eq!(&pixels[56..60], &[0, 0, 0, 0]);

        assert_eq!(
            webpFrameRender(frame, -4, 4, 16, pixels.as_mut_ptr(), WEBP_FALSE),
            webpResult::InvalidArgument
        );
        webpFrameRelease(frame);
    }
}

#[test]
fn render_frame() {
    let data = opaque_animation();
    let image = create(&data);
    let mut pixels = vec![0u8; 4 * 16];
    unsafe {
        assert_eq!(
            webpImageRenderFrame(image, 1, -1, 4, 4, 16, pixels.as_mut_ptr()),
            webpResult::Ok
        );
        assert_eq!(
            webpImageRenderFrame(image, 5, -1, 4, 4, 16, pixels.as_mut_ptr()),
            webpResult::OutOfRange
        );
        webpImageRelease(image);
    }
    assert_eq!(&pixels[..4], &[255, 0, 0, 255]);
    assert_eq!(&pixels[60..64], &[0, 255, 0, 255]);
}

#[test]
fn invalid_input() {
    let data = b"not a webp file";
    let mut image: *mut webpImage = ptr::null_mut();
    let res = unsafe { webpImageCreateFromMemory(data.as_ptr(), data.len(), &mut image) };
    assert_eq!(res, webpResult::ParseFailed);
    assert!(image.is_null());
    let res = unsafe { webpImageCreateFromMemory(ptr::null(), 0, &mut image) };
    assert_eq!(res, webpResult::InvalidArgument);
    assert_eq!(webpResult::from(&WebpError::OutOfMemory), webpResult::OutOfMemory);
}
