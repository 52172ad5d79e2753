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

pub mod error;

/// A straight (not premultiplied) RGBA pixel value.
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

// The ANIM chunk stores the background color in [Blue, Green, Red, Alpha]
// byte order.
pub fn rgba_from_bgra(bgra: [u8; 4]) -> Rgba {
    [bgra[2], bgra[1], bgra[0], bgra[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_order() {
        assert_eq!(rgba_from_bgra([1, 2, 3, 4]), [3, 2, 1, 4]);
    }
}
