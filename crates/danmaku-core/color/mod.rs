//! Color conversions used to pick an outline color
//!
//! Comments are drawn with a black outline by default. Dark colors that
//! would vanish against that outline get a white one instead; the decision
//! is made in HLS space by [`needs_white_outline`].
//!
//! # Example
//!
//! ```rust
//! use danmaku_core::color::{needs_white_outline, packed_to_rgb, Rgb};
//!
//! assert_eq!(packed_to_rgb(0x12_34_56), Rgb { r: 0x12, g: 0x34, b: 0x56 });
//! assert!(needs_white_outline(0x000000));
//! assert!(!needs_white_outline(0xFFFFFF));
//! ```

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, lightness and saturation in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

/// Split a packed `0xRRGGBB` integer into channels
#[must_use]
pub const fn packed_to_rgb(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Convert RGB to hue, lightness and saturation
///
/// Achromatic colors report hue and saturation 0. The hue fraction is
/// shifted by one turn before wrapping so negative sector results land in
/// range: `((h / 6) + 1) mod 1`.
#[must_use]
pub fn rgb_to_hls(rgb: Rgb) -> Hls {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let l = (minc + maxc) / 2.0;

    if rgb.r == rgb.g && rgb.g == rgb.b {
        return Hls {
            h: 0.0,
            l: l * 100.0,
            s: 0.0,
        };
    }

    let delta = maxc - minc;
    let s = if l <= 0.5 {
        delta / (maxc + minc)
    } else {
        delta / (2.0 - maxc - minc)
    };

    let rc = (maxc - r) / delta;
    let gc = (maxc - g) / delta;
    let bc = (maxc - b) / delta;

    let sector = if r >= maxc {
        bc - gc
    } else if g >= maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    let h = (sector / 6.0 + 1.0) % 1.0;

    Hls {
        h: h * 360.0,
        l: l * 100.0,
        s: s * 100.0,
    }
}

/// Whether a packed color needs a white outline to stay readable
///
/// Pure black always does. Otherwise dark cyan-to-green hues
/// (`30 < h < 210`) qualify below lightness 33, and very dark or
/// blue-to-red hues qualify below lightness 66.
#[must_use]
pub fn needs_white_outline(color: u32) -> bool {
    if color == 0 {
        return true;
    }
    hls_needs_white_outline(rgb_to_hls(packed_to_rgb(color)))
}

/// Outline rule on an already converted color; all bounds are exclusive
#[must_use]
pub fn hls_needs_white_outline(hls: Hls) -> bool {
    if hls.h > 30.0 && hls.h < 210.0 && hls.l < 33.0 {
        return true;
    }
    (hls.l < 30.0 || hls.h > 210.0) && hls.l < 66.0
}
