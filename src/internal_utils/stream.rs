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

// All multi-byte values in a RIFF container are little endian.
#[derive(Debug)]
pub(crate) struct IStream<'a> {
    // The bytes to parse.
    pub data: &'a [u8],
    // The number of bytes read so far within self.data.
    pub offset: usize,
}

impl IStream<'_> {
    pub(crate) fn create(data: &[u8]) -> IStream<'_> {
        IStream { data, offset: 0 }
    }

    fn check(&self, size: usize) -> WebpResult<()> {
        if self.bytes_left()? < size {
            return WebpError::parse_failed("truncated data");
        }
        Ok(())
    }

    pub(crate) fn bytes_left(&self) -> WebpResult<usize> {
        if self.data.len() < self.offset {
            return WebpError::parse_failed("stream offset past the end");
        }
        Ok(self.data.len() - self.offset)
    }

    pub(crate) fn has_bytes_left(&self) -> WebpResult<bool> {
        Ok(self.bytes_left()? > 0)
    }

    pub(crate) fn get_slice(&mut self, size: usize) -> WebpResult<&[u8]> {
        self.check(size)?;
        let offset_start = self.offset;
        checked_incr!(self.offset, size);
        Ok(&self.data[offset_start..offset_start + size])
    }

    fn get_array<const N: usize>(&mut self) -> WebpResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.get_slice(N)?);
        Ok(array)
    }

    pub(crate) fn read_u8(&mut self) -> WebpResult<u8> {
        self.check(1)?;
        let value = self.data[self.offset];
        checked_incr!(self.offset, 1);
        Ok(value)
    }

    pub(crate) fn read_u16(&mut self) -> WebpResult<u16> {
        Ok(u16::from_le_bytes(self.get_array()?))
    }

    pub(crate) fn read_u24(&mut self) -> WebpResult<u32> {
        let bytes: [u8; 3] = self.get_array()?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]))
    }

    pub(crate) fn read_u32(&mut self) -> WebpResult<u32> {
        Ok(u32::from_le_bytes(self.get_array()?))
    }

    pub(crate) fn read_fourcc(&mut self) -> WebpResult<[u8; 4]> {
        self.get_array()
    }

    pub(crate) fn skip(&mut self, size: usize) -> WebpResult<()> {
        self.check(size)?;
        checked_incr!(self.offset, size);
        Ok(())
    }

    pub(crate) fn skip_u24(&mut self) -> WebpResult<()> {
        self.skip(3)
    }
}
