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

// To be used instead of direct WebpError enum variants in order to debug
// unexpected Err propagations as early as possible in the call stack.
#[allow(dead_code)]
impl WebpError {
    fn on_error() {
        // Use std::intrinsics::breakpoint() or manually add a breakpoint here.
        // Alternatively, uncomment the following to print the stack trace.
        // println!("{}", std::backtrace::Backtrace::force_capture());
    }

    pub(crate) fn out_of_memory<T>() -> WebpResult<T> {
        WebpError::on_error();
        Err(WebpError::OutOfMemory)
    }
    pub(crate) fn out_of_range<T>() -> WebpResult<T> {
        WebpError::on_error();
        Err(WebpError::OutOfRange)
    }
    pub(crate) fn invalid_argument<T>() -> WebpResult<T> {
        WebpError::on_error();
        Err(WebpError::InvalidArgument)
    }
    pub(crate) fn no_codec_available<T>() -> WebpResult<T> {
        WebpError::on_error();
        Err(WebpError::NoCodecAvailable)
    }

    pub(crate) fn parse_failed<T, O>(object: O) -> WebpResult<T>
    where
        O: std::fmt::Display,
    {
        WebpError::on_error();
        Err(WebpError::ParseFailed(object.to_string()))
    }
    pub(crate) fn decode_failed<T, O>(object: O) -> WebpResult<T>
    where
        O: std::fmt::Display,
    {
        WebpError::on_error();
        Err(WebpError::DecodeFailed(object.to_string()))
    }

    pub(crate) fn map_decode_failed<O>(object: O) -> WebpError
    where
        O: std::fmt::Display,
    {
        WebpError::on_error();
        WebpError::DecodeFailed(object.to_string())
    }
    pub(crate) fn map_io_error(err: std::io::Error) -> WebpError {
        WebpError::on_error();
        WebpError::IoError(err.to_string())
    }
}
