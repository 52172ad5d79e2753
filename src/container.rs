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

use crate::parser::riff::RiffDemuxer;
use crate::parser::FrameInfo;
use crate::*;

use std::ops::Range;

/// The encoded container bytes together with their parsed chunk layout.
///
/// A container is immutable once created. It is shared through an
/// [`std::sync::Arc`] by the decoder and by every frame descriptor, so it can
/// be queried from several threads at once.
#[derive(Debug)]
pub struct Container {
    data: Vec<u8>,
    demuxer: RiffDemuxer,
}

impl Container {
    pub fn create(data: Vec<u8>) -> WebpResult<Self> {
        let demuxer = RiffDemuxer::parse(&data)?;
        Ok(Self { data, demuxer })
    }

    pub fn demuxer(&self) -> &RiffDemuxer {
        &self.demuxer
    }

    pub fn size_in_bytes(&self) -> usize {
        self.data.len()
    }

    /// Looks up the frame with the 1-based number `frame_num`.
    pub fn frame(&self, frame_num: u32) -> WebpResult<FrameInfo> {
        self.demuxer.frame(&self.data, frame_num)
    }

    pub(crate) fn bytes(&self, range: &Range<usize>) -> &[u8] {
        // Ranges handed out by the demuxer always lie within the buffer.
        self.data.get(range.clone()).unwrap_or_default()
    }
}
