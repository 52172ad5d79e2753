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

use crate::*;

use libc::c_int;
use libc::size_t;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum webpResult {
    Ok = 0,
    OutOfMemory = 1,
    ParseFailed = 2,
    OutOfRange = 3,
    InvalidArgument = 4,
    DecodeFailed = 5,
    NoCodecAvailable = 6,
    IoError = 7,
}

impl From<&WebpError> for webpResult {
    fn from(err: &WebpError) -> Self {
        match err {
            WebpError::OutOfMemory => webpResult::OutOfMemory,
            WebpError::ParseFailed(_) => webpResult::ParseFailed,
            WebpError::OutOfRange => webpResult::OutOfRange,
            WebpError::InvalidArgument => webpResult::InvalidArgument,
            WebpError::DecodeFailed(_) => webpResult::DecodeFailed,
            WebpError::NoCodecAvailable => webpResult::NoCodecAvailable,
            WebpError::IoError(_) => webpResult::IoError,
        }
    }
}

impl<T> From<WebpResult<T>> for webpResult {
    fn from(res: WebpResult<T>) -> Self {
        match res {
            Ok(_) => webpResult::Ok,
            Err(err) => (&err).into(),
        }
    }
}

pub type webpBool = c_int;
pub const WEBP_TRUE: c_int = 1;
pub const WEBP_FALSE: c_int = 0;

pub(crate) fn to_webpBool(val: bool) -> webpBool {
    if val {
        WEBP_TRUE
    } else {
        WEBP_FALSE
    }
}

// Builds the pixel slice described by a C caller. For a negative stride,
// |pixels| points at the first row, which is the last one in memory.
pub(crate) unsafe fn pixels_from_raw<'a>(
    pixels: *mut u8,
    height: c_int,
    stride: c_int,
) -> WebpResult<&'a mut [u8]> {
    if pixels.is_null() || height < 0 {
        return Err(WebpError::InvalidArgument);
    }
    if height == 0 {
        return Ok(&mut []);
    }
    let abs_stride: size_t = stride.unsigned_abs() as size_t;
    let size = abs_stride
        .checked_mul(height as size_t)
        .ok_or(WebpError::InvalidArgument)?;
    let base = if stride < 0 {
        // SAFETY: The caller guarantees that all |height| rows are addressable
        // from |pixels| with |stride|.
        unsafe { pixels.offset((height as isize - 1) * stride as isize) }
    } else {
        pixels
    };
    // SAFETY: Same as above. The rows span |size| bytes starting at |base|.
    Ok(unsafe { std::slice::from_raw_parts_mut(base, size) })
}
