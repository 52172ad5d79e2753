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

pub mod riff;

use crate::*;

use std::ops::Range;

/// Per-frame fields that are known as soon as the container is parsed.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct FrameHeader {
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
    pub duration_ms: u32,
    pub dispose: DisposeMethod,
    pub blend: BlendMethod,
}

impl FrameHeader {
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x_offset,
            y: self.y_offset,
            width: self.width,
            height: self.height,
        }
    }
}

/// Everything the demuxer knows about one frame, including where its encoded
/// image data lives within the container buffer.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct FrameInfo {
    /// 1-based, as in the container.
    pub frame_num: u32,
    pub header: FrameHeader,
    pub has_alpha: bool,
    /// Byte range of the frame's image chunks (an optional ALPH chunk followed
    /// by a VP8 chunk, or a single VP8L chunk), chunk headers included.
    pub payload: Range<usize>,
}
