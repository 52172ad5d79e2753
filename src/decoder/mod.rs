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

pub mod frame;

pub use frame::FrameDescriptor;

use crate::codecs::*;
use crate::compositor;
use crate::container::Container;
use crate::image::*;
use crate::internal_utils::*;
use crate::utils::*;
use crate::*;

use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_CANVAS_SIZE_LIMIT: u32 = 16384 * 16384;
pub const DEFAULT_FRAME_COUNT_LIMIT: u32 = 12 * 3600 * 60;

/// The color used where a frame asks for its area to be disposed to the
/// background.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Background {
    #[default]
    Transparent,
    // The color stored in the container's ANIM chunk.
    Container,
    Color(Rgba),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub codec_choice: CodecChoice,
    pub background: Background,
    pub canvas_size_limit: u32,
    pub frame_count_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            codec_choice: Default::default(),
            background: Default::default(),
            canvas_size_limit: DEFAULT_CANVAS_SIZE_LIMIT,
            frame_count_limit: DEFAULT_FRAME_COUNT_LIMIT,
        }
    }
}

/// Owns an animated WebP container and renders its frames.
///
/// All methods take `&self`, so one decoder can serve several threads as long
/// as each of them renders into its own buffer.
pub struct Decoder {
    settings: Settings,
    container: Arc<Container>,
    image: ImageDescriptor,
    background_color: Rgba,
    codec: Arc<dyn Codec>,
}

impl Decoder {
    pub fn open(data: Vec<u8>) -> WebpResult<Self> {
        Self::open_with_settings(data, Settings::default())
    }

    /// Copies `data` into a buffer owned by the decoder.
    pub fn open_from_slice(data: &[u8], settings: Settings) -> WebpResult<Self> {
        let mut buffer: Vec<u8> = Vec::new();
        if buffer.try_reserve_exact(data.len()).is_err() {
            return WebpError::out_of_memory();
        }
        buffer.extend_from_slice(data);
        Self::open_with_settings(buffer, settings)
    }

    pub fn open_file<P: AsRef<Path>>(path: P, settings: Settings) -> WebpResult<Self> {
        let data = std::fs::read(path).map_err(WebpError::map_io_error)?;
        Self::open_with_settings(data, settings)
    }

    pub fn open_with_settings(data: Vec<u8>, settings: Settings) -> WebpResult<Self> {
        let size = data.len();
        let container = Container::create(data)
            .inspect_err(|err| tracing::debug!(size, %err, "failed to open container"))?;
        let image = ImageDescriptor::create(&container);
        if !check_limits(image.canvas_width, image.canvas_height, settings.canvas_size_limit) {
            return WebpError::parse_failed("canvas exceeds the size limit");
        }
        if image.frame_count > settings.frame_count_limit {
            return WebpError::parse_failed("too many frames");
        }
        let codec = settings.codec_choice.get_codec()?;
        let background_color = match settings.background {
            Background::Transparent => TRANSPARENT,
            Background::Container => image.background_color,
            Background::Color(color) => color,
        };
        tracing::debug!(
            canvas_width = image.canvas_width,
            canvas_height = image.canvas_height,
            frame_count = image.frame_count,
            loop_count = image.loop_count,
            total_duration_ms = image.total_duration_ms,
            "opened container"
        );
        Ok(Self {
            settings,
            container: Arc::new(container),
            image,
            background_color,
            codec,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn image(&self) -> &ImageDescriptor {
        &self.image
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    /// Replaces the codec chosen from the settings.
    pub fn set_codec(&mut self, codec: Arc<dyn Codec>) {
        self.codec = codec;
    }

    /// Frames can always be rendered at a size other than the canvas size.
    pub fn does_render_support_scaling(&self) -> bool {
        true
    }

    /// Builds the descriptor of the frame at the 0-based `index`.
    pub fn frame(&self, index: u32) -> WebpResult<FrameDescriptor> {
        if index >= self.image.frame_count {
            return WebpError::out_of_range();
        }
        FrameDescriptor::create(&self.container, index + 1, self.background_color)
    }

    /// Renders `frame` onto `pixels`, a `target_width` x `target_height` RGBA
    /// buffer with rows `stride` bytes apart, which holds the previous frame.
    /// See [`compositor::render`].
    pub fn render(
        &self,
        frame: &FrameDescriptor,
        target_width: i32,
        target_height: i32,
        stride: i32,
        pixels: &mut [u8],
        force_clear_all: bool,
    ) -> WebpResult<()> {
        compositor::render(
            frame,
            self.codec.as_ref(),
            target_width,
            target_height,
            stride,
            pixels,
            force_clear_all,
        )
    }

    /// Returns the last key frame in `start..=end`, 0 if the scan reaches the
    /// first frame, or -1 if there is none or a frame could not be read.
    pub fn last_key_frame_in_range(&self, start: i32, end: i32) -> i32 {
        for index in (start..=end).rev() {
            if index == 0 {
                return 0;
            }
            let frame = match u32::try_from(index) {
                Ok(index) => self.frame(index),
                Err(_) => WebpError::out_of_range(),
            };
            match frame {
                Ok(frame) if frame.is_key_frame() => return index,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(index, %err, "stopping key frame search");
                    return -1;
                }
            }
        }
        -1
    }

    /// Brings `pixels` to the fully composited frame `index`.
    ///
    /// `current` is the frame the buffer holds already, if any. Rendering
    /// resumes after it when possible and restarts from the closest key frame
    /// otherwise.
    pub fn render_nth(
        &self,
        index: u32,
        current: Option<u32>,
        target_width: i32,
        target_height: i32,
        stride: i32,
        pixels: &mut [u8],
    ) -> WebpResult<()> {
        if index >= self.image.frame_count {
            return WebpError::out_of_range();
        }
        if current == Some(index) {
            // Current frame which is already fully rendered has been requested. Do nothing.
            return Ok(());
        }
        let start = match current {
            Some(current) if current < index => current + 1,
            _ => 0,
        };
        let key_frame = self.last_key_frame_in_range(
            i32::try_from(start).or(Err(WebpError::InvalidArgument))?,
            i32::try_from(index).or(Err(WebpError::InvalidArgument))?,
        );
        let first = if key_frame >= 0 { key_frame as u32 } else { start };
        tracing::trace!(index, ?current, first, "rendering frames");
        for frame_index in first..=index {
            let frame = self.frame(frame_index)?;
            let force_clear_all = key_frame >= 0 && frame_index == first;
            self.render(
                &frame,
                target_width,
                target_height,
                stride,
                pixels,
                force_clear_all,
            )?;
        }
        Ok(())
    }
}
