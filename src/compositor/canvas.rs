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

use crate::internal_utils::*;
use crate::utils::Rgba;
use crate::*;

pub const CHANNEL_COUNT: usize = 4;

/// A caller-owned RGBA8 pixel buffer with an explicit row stride.
///
/// A positive stride means row 0 is at the start of `pixels`. A negative
/// stride describes a bottom-up buffer: the slice starts at the last row and
/// row `y` lives at `(height - 1 - y) * |stride|`.
#[derive(Debug)]
pub struct Canvas<'a> {
    pixels: &'a mut [u8],
    width: u32,
    height: u32,
    stride: i32,
}

impl<'a> Canvas<'a> {
    pub fn create(pixels: &'a mut [u8], width: u32, height: u32, stride: i32) -> WebpResult<Self> {
        let row_bytes = checked_mul!(usize_from_u32(width)?, CHANNEL_COUNT)?;
        let abs_stride = stride.unsigned_abs() as usize;
        if height > 0 && abs_stride < row_bytes {
            return WebpError::invalid_argument();
        }
        let required = checked_mul!(abs_stride, usize_from_u32(height)?)?;
        if pixels.len() < required {
            return WebpError::invalid_argument();
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    /// Creates a canvas whose rows are tightly packed.
    pub fn create_packed(pixels: &'a mut [u8], width: u32, height: u32) -> WebpResult<Self> {
        let stride = checked_mul!(width, CHANNEL_COUNT as u32)?;
        let stride = i32::try_from(stride).or(Err(WebpError::InvalidArgument))?;
        Self::create(pixels, width, height, stride)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }

    fn abs_stride(&self) -> usize {
        self.stride.unsigned_abs() as usize
    }

    // |y| must be less than the height.
    fn row_offset(&self, y: u32) -> usize {
        let row = if self.stride < 0 {
            self.height - 1 - y
        } else {
            y
        };
        row as usize * self.abs_stride()
    }

    fn check_rect(&self, rect: &Rect) -> WebpResult<()> {
        if rect.fits_in(self.width, self.height) {
            Ok(())
        } else {
            WebpError::invalid_argument()
        }
    }

    pub fn row(&self, y: u32) -> WebpResult<&[u8]> {
        if y >= self.height {
            return WebpError::invalid_argument();
        }
        let offset = self.row_offset(y);
        Ok(&self.pixels[offset..offset + self.width as usize * CHANNEL_COUNT])
    }

    /// The `width` pixels of row `y` starting at column `x`.
    pub fn row_segment_mut(&mut self, x: u32, y: u32, width: u32) -> WebpResult<&mut [u8]> {
        self.check_rect(&Rect {
            x,
            y,
            width,
            height: 1,
        })?;
        let start = self.row_offset(y) + x as usize * CHANNEL_COUNT;
        Ok(&mut self.pixels[start..start + width as usize * CHANNEL_COUNT])
    }

    /// Zeroes every row of the buffer, including any padding past the last
    /// pixel of a row.
    pub fn clear_all(&mut self) {
        let size = self.abs_stride() * self.height as usize;
        self.pixels[..size].fill(0);
    }

    pub fn clear_rect(&mut self, rect: &Rect) -> WebpResult<()> {
        self.check_rect(rect)?;
        for y in rect.y..rect.y + rect.height {
            self.row_segment_mut(rect.x, y, rect.width)?.fill(0);
        }
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Rgba) -> WebpResult<()> {
        self.check_rect(rect)?;
        if rect.is_empty() {
            return Ok(());
        }
        for pixel in self
            .row_segment_mut(rect.x, rect.y, rect.width)?
            .chunks_exact_mut(CHANNEL_COUNT)
        {
            pixel.copy_from_slice(&color);
        }
        // Replicate the first row into the remaining ones.
        let x_offset = rect.x as usize * CHANNEL_COUNT;
        let first = self.row_offset(rect.y) + x_offset;
        let len = rect.width as usize * CHANNEL_COUNT;
        for y in rect.y + 1..rect.y + rect.height {
            let dst = self.row_offset(y) + x_offset;
            self.pixels.copy_within(first..first + len, dst);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(8, 2, 8 ; "packed")]
    #[test_case(12, 2, 12 ; "padded")]
    #[test_case(-8, 2, 8 ; "bottom up")]
    fn valid_strides(stride: i32, height: u32, min_len: usize) {
        let mut pixels = vec![0u8; min_len * height as usize];
        assert!(Canvas::create(&mut pixels, 2, height, stride).is_ok());
    }

    #[test_case(4, 16 ; "stride too small")]
    #[test_case(-4, 16 ; "negative stride too small")]
    #[test_case(8, 15 ; "buffer too small")]
    fn invalid_layouts(stride: i32, len: usize) {
        let mut pixels = vec![0u8; len];
        assert!(matches!(
            Canvas::create(&mut pixels, 2, 2, stride),
            Err(WebpError::InvalidArgument)
        ));
    }

    #[test]
    fn bottom_up_rows() {
        let mut pixels = vec![0u8; 24];
        let mut canvas = Canvas::create(&mut pixels, 2, 3, -8).unwrap();
        canvas.row_segment_mut(0, 0, 1).unwrap().fill(7);
        canvas.row_segment_mut(1, 2, 1).unwrap().fill(9);
        assert_eq!(canvas.row(0).unwrap(), &[7, 7, 7, 7, 0, 0, 0, 0]);
        // Row 0 of a bottom-up canvas is the last row in memory.
        assert_eq!(&pixels[16..20], &[7, 7, 7, 7]);
        assert_eq!(&pixels[4..8], &[9, 9, 9, 9]);
    }

    #[test]
    fn fill_and_clear_rect() {
        let mut pixels = vec![0u8; 3 * 3 * 4];
        let mut canvas = Canvas::create_packed(&mut pixels, 3, 3).unwrap();
        let rect = Rect {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        canvas.fill_rect(&rect, [1, 2, 3, 4]).unwrap();
        assert_eq!(canvas.row(0).unwrap(), &[0; 12]);
        assert_eq!(canvas.row(1).unwrap(), &[0, 0, 0, 0, 1, 2, 3, 4, 1, 2, 3, 4]);
        assert_eq!(canvas.row(2).unwrap(), &[0, 0, 0, 0, 1, 2, 3, 4, 1, 2, 3, 4]);
        canvas
            .clear_rect(&Rect {
                x: 2,
                y: 1,
                width: 1,
                height: 2,
            })
            .unwrap();
        assert_eq!(canvas.row(2).unwrap(), &[0, 0, 0, 0, 1, 2, 3, 4, 0, 0, 0, 0]);
        assert!(canvas.fill_rect(&Rect::full(4, 1), [0; 4]).is_err());
    }

    #[test]
    fn clear_all_includes_padding() {
        let mut pixels = vec![0xffu8; 2 * 12];
        let mut canvas = Canvas::create(&mut pixels, 2, 2, 12).unwrap();
        canvas.clear_all();
        assert!(pixels.iter().all(|x| *x == 0));
    }
}
