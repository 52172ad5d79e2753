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

macro_rules! checked_add {
    ($a:expr, $b:expr) => {
        $a.checked_add($b)
            .ok_or($crate::WebpError::ParseFailed("integer overflow".into()))
    };
}

macro_rules! checked_mul {
    ($a:expr, $b:expr) => {
        $a.checked_mul($b)
            .ok_or($crate::WebpError::ParseFailed("integer overflow".into()))
    };
}

macro_rules! checked_incr {
    ($a:expr, $b:expr) => {
        $a = checked_add!($a, $b)?
    };
}

pub(crate) mod stream;

use crate::*;

pub(crate) fn usize_from_u32(value: u32) -> WebpResult<usize> {
    usize::try_from(value).or(Err(WebpError::ParseFailed("value does not fit usize".into())))
}

pub(crate) fn u32_from_usize(value: usize) -> WebpResult<u32> {
    u32::try_from(value).or(Err(WebpError::ParseFailed("value does not fit u32".into())))
}

pub(crate) fn u32_from_i32(value: i32) -> WebpResult<u32> {
    u32::try_from(value).or(Err(WebpError::InvalidArgument))
}

// Allocates a zero-initialized buffer, reporting allocation failure instead
// of aborting.
pub(crate) fn create_zeroed_buffer(size: usize) -> WebpResult<Vec<u8>> {
    let mut buffer: Vec<u8> = Vec::new();
    if buffer.try_reserve_exact(size).is_err() {
        return WebpError::out_of_memory();
    }
    buffer.resize(size, 0);
    Ok(buffer)
}

pub(crate) fn check_limits(width: u32, height: u32, size_limit: u32) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    width <= size_limit / height
}
