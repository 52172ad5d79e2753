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

#[cfg(feature = "image-webp")]
pub mod imagewebp;

use crate::compositor::canvas::Canvas;
use crate::*;

use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    // Size of the encoded frame.
    pub width: u32,
    pub height: u32,
    // Size the frame has to be resampled to when |use_scaling| is true.
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub use_scaling: bool,
}

impl DecoderConfig {
    pub fn output_size(&self) -> (u32, u32) {
        if self.use_scaling {
            (self.scaled_width, self.scaled_height)
        } else {
            (self.width, self.height)
        }
    }
}

pub trait Codec: Send + Sync {
    // Decode the frame bitstream |payload| (its image chunks, headers
    // included) and write straight-alpha RGBA pixels into the |region| of
    // |output|. The size of |region| is config.output_size(). Pixels outside
    // of |region| must not be touched.
    fn decode(
        &self,
        payload: &[u8],
        config: &DecoderConfig,
        output: &mut Canvas,
        region: &Rect,
    ) -> WebpResult<()>;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CodecChoice {
    #[default]
    Auto,
    ImageWebp,
}

impl CodecChoice {
    pub(crate) fn get_codec(&self) -> WebpResult<Arc<dyn Codec>> {
        match self {
            CodecChoice::Auto | CodecChoice::ImageWebp => image_webp_codec(),
        }
    }
}

#[cfg(feature = "image-webp")]
fn image_webp_codec() -> WebpResult<Arc<dyn Codec>> {
    Ok(Arc::new(imagewebp::ImageWebp))
}

#[cfg(not(feature = "image-webp"))]
fn image_webp_codec() -> WebpResult<Arc<dyn Codec>> {
    WebpError::no_codec_available()
}
