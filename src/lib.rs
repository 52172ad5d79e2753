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

//! Animated WebP frame compositing.
//!
//! A [`decoder::Decoder`] owns the encoded container. Frames are described by
//! [`decoder::FrameDescriptor`]s which can be rendered onto any caller-owned
//! RGBA canvas, at the canvas resolution or scaled to an arbitrary size.

#![deny(unsafe_op_in_unsafe_fn)]

#[macro_use]
mod internal_utils;

pub mod codecs;
pub mod compositor;
pub mod container;
pub mod decoder;
pub mod image;
pub mod parser;
pub mod utils;

#[cfg(feature = "capi")]
pub mod capi;

pub use compositor::canvas::Canvas;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebpError {
    #[error("out of memory")]
    OutOfMemory,
    #[error("failed to parse container: {0}")]
    ParseFailed(String),
    #[error("frame index out of range")]
    OutOfRange,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("failed to decode frame: {0}")]
    DecodeFailed(String),
    #[error("no codec available")]
    NoCodecAvailable,
    #[error("i/o error: {0}")]
    IoError(String),
}

pub type WebpResult<T> = Result<T, WebpError>;

/// What happens to the area of a frame once the next frame is displayed.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum DisposeMethod {
    #[default]
    None,
    Background,
}

/// How a frame is combined with the canvas content underneath it.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum BlendMethod {
    #[default]
    Blend,
    NoBlend,
}

/// A rectangle in pixel units. Depending on context it is relative to the
/// logical canvas or to a render target.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
#[repr(C)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    pub(crate) fn fits_in(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}
