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
use crate::utils::Rgba;
use crate::*;

use std::ops::Range;
use std::sync::Arc;

/// Everything needed to composite one frame onto a canvas holding the
/// previous frame.
///
/// The disposal fields describe what has to happen to the previous frame's
/// area before this frame is drawn. For the first frame they cover the whole
/// canvas and request a background fill.
#[derive(Debug, Clone)]
pub struct FrameDescriptor {
    container: Arc<Container>,
    frame_num: u32,
    payload: Range<usize>,

    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
    pub dispose_x: u32,
    pub dispose_y: u32,
    pub dispose_width: u32,
    pub dispose_height: u32,
    pub duration_ms: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background_color: Rgba,
    pub dispose_to_background: bool,
    pub blend_with_previous: bool,
    pub has_alpha: bool,
}

impl FrameDescriptor {
    /// Builds the descriptor of the frame with the 1-based number
    /// `frame_num`.
    pub(crate) fn create(
        container: &Arc<Container>,
        frame_num: u32,
        background_color: Rgba,
    ) -> WebpResult<Self> {
        let current = container.frame(frame_num)?;
        let demuxer = container.demuxer();
        let (canvas_width, canvas_height) = (demuxer.canvas_width, demuxer.canvas_height);
        let (dispose_rect, dispose_to_background) = match demuxer.frame_header(frame_num - 1) {
            Some(previous) => {
                if !previous.rect().fits_in(canvas_width, canvas_height) {
                    return WebpError::parse_failed(format!(
                        "frame {} does not fit in the canvas",
                        frame_num - 1
                    ));
                }
                (previous.rect(), previous.dispose == DisposeMethod::Background)
            }
            None => (Rect::full(canvas_width, canvas_height), true),
        };
        let header = current.header;
        Ok(Self {
            container: container.clone(),
            frame_num,
            payload: current.payload,
            x_offset: header.x_offset,
            y_offset: header.y_offset,
            width: header.width,
            height: header.height,
            dispose_x: dispose_rect.x,
            dispose_y: dispose_rect.y,
            dispose_width: dispose_rect.width,
            dispose_height: dispose_rect.height,
            duration_ms: header.duration_ms,
            canvas_width,
            canvas_height,
            background_color,
            dispose_to_background,
            blend_with_previous: header.blend == BlendMethod::Blend,
            has_alpha: current.has_alpha,
        })
    }

    /// 1-based, as in the container.
    pub fn frame_number(&self) -> u32 {
        self.frame_num
    }

    /// 0-based position of the frame in the animation.
    pub fn index(&self) -> u32 {
        self.frame_num - 1
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x_offset,
            y: self.y_offset,
            width: self.width,
            height: self.height,
        }
    }

    pub fn dispose_rect(&self) -> Rect {
        Rect {
            x: self.dispose_x,
            y: self.dispose_y,
            width: self.dispose_width,
            height: self.dispose_height,
        }
    }

    pub fn has_offsets(&self) -> bool {
        self.x_offset != 0
            || self.y_offset != 0
            || self.width != self.canvas_width
            || self.height != self.canvas_height
    }

    /// A key frame can be rendered without knowing what any earlier frame
    /// looked like.
    pub fn is_key_frame(&self) -> bool {
        (!self.has_alpha || !self.blend_with_previous) && !self.has_offsets()
    }

    /// The encoded image chunks of this frame.
    pub fn payload(&self) -> &[u8] {
        self.container.bytes(&self.payload)
    }
}
