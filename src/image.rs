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

use crate::container::Container;
use crate::utils::*;
use crate::*;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FrameTiming {
    /// Presentation time of the frame, relative to the first frame.
    pub timestamp_ms: u64,
    pub duration_ms: u32,
}

/// Container-level properties of an animation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub frame_count: u32,
    /// Number of times the animation plays. 0 means infinite.
    pub loop_count: u32,
    pub total_duration_ms: u64,
    pub frame_durations_ms: Vec<u32>,
    /// The background color declared by the container, as straight RGBA.
    pub background_color: Rgba,
    pub has_alpha: bool,
    pub is_animated: bool,
    pub size_in_bytes: usize,
}

impl ImageDescriptor {
    pub(crate) fn create(container: &Container) -> Self {
        let demuxer = container.demuxer();
        let frame_durations_ms: Vec<u32> = demuxer.frame_headers().map(|x| x.duration_ms).collect();
        Self {
            canvas_width: demuxer.canvas_width,
            canvas_height: demuxer.canvas_height,
            frame_count: demuxer.frame_count(),
            loop_count: demuxer.loop_count,
            total_duration_ms: frame_durations_ms.iter().map(|x| *x as u64).sum(),
            frame_durations_ms,
            background_color: rgba_from_bgra(demuxer.background_color),
            has_alpha: demuxer.has_alpha,
            is_animated: demuxer.is_animated,
            size_in_bytes: container.size_in_bytes(),
        }
    }

    pub fn nth_frame_timing(&self, n: u32) -> WebpResult<FrameTiming> {
        let n = n as usize;
        if n >= self.frame_durations_ms.len() {
            return WebpError::out_of_range();
        }
        Ok(FrameTiming {
            timestamp_ms: self.frame_durations_ms[..n].iter().map(|x| *x as u64).sum(),
            duration_ms: self.frame_durations_ms[n],
        })
    }
}
