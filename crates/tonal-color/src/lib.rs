// SPDX-License-Identifier: MIT
//
// tonal-color — the color primitives every other tonal crate builds on.
//
// One type, `Color`, stored in OKLCH. Scales are generated in OKLCH, contrast
// is measured on the sRGB projection, and hex strings are the interchange
// format at the edges. Malformed hex never fails the caller: it degrades to
// white with a logged warning.

pub mod color;

pub use color::Color;
