// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette and color helpers.

use peniko::Color;

/// The categorical palette for entity colors (ten-category scheme).
///
/// Assignment order is first-seen over the dataset, handled by
/// [`aevum_charts::ScaleOrdinal`].
pub fn entity_palette() -> [Color; 10] {
    [
        Color::from_rgb8(0x1f, 0x77, 0xb4),
        Color::from_rgb8(0xff, 0x7f, 0x0e),
        Color::from_rgb8(0x2c, 0xa0, 0x2c),
        Color::from_rgb8(0xd6, 0x27, 0x28),
        Color::from_rgb8(0x94, 0x67, 0xbd),
        Color::from_rgb8(0x8c, 0x56, 0x4b),
        Color::from_rgb8(0xe3, 0x77, 0xc2),
        Color::from_rgb8(0x7f, 0x7f, 0x7f),
        Color::from_rgb8(0xbc, 0xbd, 0x22),
        Color::from_rgb8(0x17, 0xbe, 0xcf),
    ]
}

/// Panel background fill.
pub(crate) fn panel_background() -> Color {
    Color::from_rgb8(0xf5, 0xf5, 0xf5)
}

/// Panel border stroke.
pub(crate) fn panel_border() -> Color {
    Color::from_rgb8(0xcc, 0xcc, 0xcc)
}

/// "Show All" button fill.
pub(crate) fn show_all_fill() -> Color {
    Color::from_rgb8(0x4c, 0xaf, 0x50)
}

/// "Hide All" button fill.
pub(crate) fn hide_all_fill() -> Color {
    Color::from_rgb8(0xf4, 0x43, 0x36)
}

/// Moves a color toward white by `amount` in `[0, 1]`.
///
/// Used for the washed-out look of hidden entity toggles.
pub fn lighten(color: Color, amount: f64) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    let rgba = color.to_rgba8();
    let channel = |c: u8| -> u8 {
        let c = c as f64;
        (c + (255.0 - c) * amount).round().clamp(0.0, 255.0) as u8
    };
    Color::from_rgb8(channel(rgba.r), channel(rgba.g), channel(rgba.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_toward_white() {
        let c = Color::from_rgb8(100, 50, 0);
        let l = lighten(c, 0.5).to_rgba8();
        assert_eq!(l.r, 178);
        assert_eq!(l.g, 153);
        assert_eq!(l.b, 128);
        let full = lighten(c, 1.0).to_rgba8();
        assert_eq!((full.r, full.g, full.b), (255, 255, 255));
    }

    #[test]
    fn palette_has_ten_distinct_colors() {
        let palette = entity_palette();
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i + 1) {
                assert_ne!(a.to_rgba8(), b.to_rgba8());
            }
        }
    }
}
