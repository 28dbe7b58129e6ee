//! RGB565 color helpers

pub const BLACK: u16 = 0x0000;
pub const WHITE: u16 = 0xFFFF;
pub const RED: u16 = 0xF800;
pub const GREEN: u16 = 0x07E0;
pub const BLUE: u16 = 0x001F;
pub const YELLOW: u16 = 0xFFE0;
pub const CYAN: u16 = 0x07FF;

/// Pack 8-bit channels into RGB565, truncating the low bits
pub const fn rgb888_to_565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Blend `fg` over `bg` with weight `alpha` (255 = all foreground)
///
/// Channels are widened to 6 bits with a rounding offset before mixing, so
/// `alpha = 0` yields exactly `bg` for a black background.
pub const fn alpha_blend(alpha: u8, fg: u16, bg: u16) -> u16 {
    let a = alpha as u32;
    let inv = 255 - a;
    let (fg, bg) = (fg as u32, bg as u32);

    let fg_r = ((fg >> 10) & 0x3E) + 1;
    let fg_g = ((fg >> 4) & 0x7E) + 1;
    let fg_b = ((fg << 1) & 0x3E) + 1;
    let bg_r = ((bg >> 10) & 0x3E) + 1;
    let bg_g = ((bg >> 4) & 0x7E) + 1;
    let bg_b = ((bg << 1) & 0x3E) + 1;

    let r = (fg_r * a + bg_r * inv) >> 9;
    let g = (fg_g * a + bg_g * inv) >> 9;
    let b = (fg_b * a + bg_b * inv) >> 9;

    ((r << 11) | (g << 5) | b) as u16
}

/// Apply a dimming level to one pixel; level 255 leaves it untouched
pub const fn dim(color: u16, level: u8) -> u16 {
    if level == u8::MAX {
        color
    } else {
        alpha_blend(level, color, BLACK)
    }
}
