//! Host-supplied content: text labels, long text, spectrum bars and
//! base64 images
//!
//! These draw paths are driven by the serial and broker commands and are
//! not part of the clock refresh.

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError as Base64Error, DecodeSliceError, Engine as _};

use crate::config::PANEL_COUNT;
use crate::image::color::{dim, BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
use crate::image::{DecodeError, ImageInfo, MemorySource};
use crate::traits::{
    AssetStore, DrawSurface, FontSize, PanelPower, PanelSelect, SurfaceError, TextStyle,
};

use super::renderer::{log_draw, DigitRenderer};

const LABEL_STRIP: u16 = 27;
const LABEL_INSET: u16 = 5;
const BARS_PER_PANEL: u16 = 2;
/// Full scale of a bar is this many height units
const BAR_HEIGHT_DIVISOR: u16 = 20;

/// Errors from [`DigitRenderer::show_custom_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomImageError {
    /// Payload is not valid base64
    InvalidPayload,
    /// Decoded payload does not fit the scratch buffer
    PayloadTooLarge,
    /// Payload is not a displayable image
    Decode(DecodeError),
    /// Transfer to the panels failed
    Surface(SurfaceError),
}

impl From<DecodeError> for CustomImageError {
    fn from(e: DecodeError) -> Self {
        CustomImageError::Decode(e)
    }
}

impl From<SurfaceError> for CustomImageError {
    fn from(e: SurfaceError) -> Self {
        CustomImageError::Surface(e)
    }
}

impl From<Base64Error> for CustomImageError {
    fn from(_: Base64Error) -> Self {
        CustomImageError::InvalidPayload
    }
}

/// Color of a spectrum bar at `level`
fn bar_color(level: u8) -> u16 {
    match level {
        0 => BLACK,
        7..=u8::MAX => RED,
        5..=6 => YELLOW,
        3..=4 => GREEN,
        _ => BLUE,
    }
}

impl<'b, S, P, W, D> DigitRenderer<'b, S, P, W, D>
where
    S: AssetStore,
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    fn text_color(&self) -> u16 {
        dim(WHITE, self.cache.dimming())
    }

    /// Print `text` in the bottom strip of the panel at `position`
    ///
    /// # Arguments
    ///
    /// * `text` - Label, drawn red on black
    /// * `position` - Panel position counted from the left, 0 to 5
    ///
    /// # Panics
    ///
    /// Panics if `position` is not a panel position.
    pub fn show_text_label(&mut self, text: &str, position: usize) {
        let y = self.bank.geometry().height.saturating_sub(LABEL_STRIP);
        self.bank.select_position(position);
        log_draw(self.bank.surface_mut().draw_text(
            LABEL_INSET,
            y,
            text,
            TextStyle {
                color: RED,
                background: Some(BLACK),
                size: FontSize::Large,
            },
        ));
        self.bank.finish_draw();
    }

    /// Repeat `text` at the top of every panel
    pub fn show_long_text(&mut self, text: &str) {
        let geometry = self.bank.geometry();
        let style = TextStyle {
            color: self.text_color(),
            background: None,
            size: FontSize::Large,
        };
        for position in 0..PANEL_COUNT {
            self.bank.select_position(position);
            let surface = self.bank.surface_mut();
            log_draw(surface.fill_rect(0, 0, geometry.width, geometry.height / 2, BLACK));
            log_draw(surface.draw_text(0, 0, text, style));
            self.bank.finish_draw();
        }
    }

    /// Spread `text` over the panels, left to right
    ///
    /// Each panel gets `len / 6` characters (at least one) and the last
    /// panel also takes whatever is left over.
    pub fn show_long_text_split(&mut self, text: &str) {
        let chars = text.chars().count();
        if chars == 0 {
            return;
        }
        let per_panel = (chars / PANEL_COUNT).max(1);
        let style = TextStyle {
            color: self.text_color(),
            background: None,
            size: FontSize::Large,
        };

        let mut rest = text;
        for position in 0..PANEL_COUNT {
            if rest.is_empty() {
                break;
            }
            let chunk = if position == PANEL_COUNT - 1 {
                rest
            } else {
                let end = rest
                    .char_indices()
                    .nth(per_panel)
                    .map_or(rest.len(), |(i, _)| i);
                &rest[..end]
            };
            rest = &rest[chunk.len()..];

            self.bank.select_position(position);
            log_draw(self.bank.surface_mut().draw_text(0, 0, chunk, style));
            self.bank.finish_draw();
        }
    }

    /// Draw spectrum bars in the bottom half of the panels
    ///
    /// Each digit `0`-`9` in `bands` is one bar, two bars per panel from
    /// left to right. Other characters are skipped.
    pub fn show_spectrogram(&mut self, bands: &str) {
        let geometry = self.bank.geometry();
        let half = geometry.height / 2;
        let bar_width = geometry.width / BARS_PER_PANEL;
        let unit = geometry.height / BAR_HEIGHT_DIVISOR;
        let dimming = self.cache.dimming();

        let mut position = 0;
        let mut bars_on_panel = 0;
        self.bank.select_position(position);
        log_draw(self.bank.surface_mut().fill_rect(0, half, geometry.width, half, BLACK));

        for level in bands.bytes().filter(u8::is_ascii_digit).map(|c| c - b'0') {
            let height = unit * u16::from(level);
            log_draw(self.bank.surface_mut().fill_rect(
                bars_on_panel * bar_width,
                geometry.height - height,
                bar_width,
                height,
                dim(bar_color(level), dimming),
            ));

            bars_on_panel += 1;
            if bars_on_panel >= BARS_PER_PANEL {
                self.bank.finish_draw();
                position += 1;
                if position >= PANEL_COUNT {
                    return;
                }
                self.bank.select_position(position);
                log_draw(self.bank.surface_mut().fill_rect(0, half, geometry.width, half, BLACK));
                bars_on_panel = 0;
            }
        }
        self.bank.finish_draw();
    }

    /// Decode a base64 image and show it on every panel
    ///
    /// # Arguments
    ///
    /// * `payload` - Base64 text of a BMP or CLK image
    /// * `scratch` - Space for the decoded bytes
    ///
    /// Invalid payloads are rejected before anything is drawn.
    pub fn show_custom_image(
        &mut self,
        payload: &str,
        scratch: &mut [u8],
    ) -> Result<ImageInfo, CustomImageError> {
        let len = STANDARD
            .decode_slice(payload.trim(), scratch)
            .map_err(|e| match e {
                DecodeSliceError::OutputSliceTooSmall => CustomImageError::PayloadTooLarge,
                DecodeSliceError::DecodeError(e) => e.into(),
            })?;

        let mut source = MemorySource::new(&scratch[..len]);
        let info = self.cache.load_from_source(&mut source)?;

        self.bank.select_all();
        let pushed = self.bank.surface_mut().push_buffer(self.cache.buffer());
        self.bank.finish_draw();
        pushed?;

        debug!("Custom image {}x{} shown", info.width, info.height);
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FrameCache;
    use crate::config::ClockConfig;
    use crate::image::PixelBuffer;
    use crate::render::PanelBank;
    use crate::testing::{
        op_log, solid_bmp, MockPower, MockSelect, MockStore, MockSurface, Op, OpLog,
    };

    type TestRenderer<'b> = DigitRenderer<'b, MockStore, MockSelect, MockPower, MockSurface>;

    const W: u16 = 40;
    const H: u16 = 60;

    fn renderer<'b>(pixels: &'b mut [u16], log: &OpLog) -> TestRenderer<'b> {
        let mut config = ClockConfig::elekstube();
        config.panel.width = W;
        config.panel.height = H;
        let bank = PanelBank::new(
            &config,
            MockSelect::new(log),
            MockPower::new(log),
            MockSurface::new(log),
        );
        let buffer = PixelBuffer::new(pixels, W, H).unwrap();
        DigitRenderer::new(bank, FrameCache::new(MockStore::new(), buffer, config.asset_format))
    }

    fn encode(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn texts(log: &OpLog) -> Vec<String> {
        log.borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bar_colors() {
        assert_eq!(bar_color(0), BLACK);
        assert_eq!(bar_color(1), BLUE);
        assert_eq!(bar_color(2), BLUE);
        assert_eq!(bar_color(3), GREEN);
        assert_eq!(bar_color(6), YELLOW);
        assert_eq!(bar_color(7), RED);
        assert_eq!(bar_color(9), RED);
    }

    #[test]
    fn test_text_label_position() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_text_label("Temp", 0);
        assert_eq!(
            *log.borrow(),
            [
                // Leftmost position is the hours-tens panel
                Op::Select(5),
                Op::Text { x: 5, y: 33, text: "Temp".into(), color: RED },
            ]
        );
    }

    #[test]
    fn test_long_text_on_every_panel() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_long_text("hello");

        let ops = log.borrow();
        assert_eq!(ops.iter().filter(|op| matches!(op, Op::Select(_))).count(), 6);
        assert!(ops.contains(&Op::FillRect { x: 0, y: 0, w: W, h: H / 2, color: BLACK }));
        drop(ops);
        assert_eq!(texts(&log), vec!["hello"; 6]);
    }

    #[test]
    fn test_long_text_dimmed() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.set_dimming(20);
        r.show_long_text("x");
        let color = log.borrow().iter().find_map(|op| match op {
            Op::Text { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(color, Some(dim(WHITE, 20)));
    }

    #[test]
    fn test_split_text_chunks() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_long_text_split("abcdefghijklmn");
        assert_eq!(texts(&log), ["ab", "cd", "ef", "gh", "ij", "klmn"]);
    }

    #[test]
    fn test_split_short_text() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_long_text_split("héy");
        assert_eq!(texts(&log), ["h", "é", "y"]);

        log.borrow_mut().clear();
        r.show_long_text_split("");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_spectrogram_bars() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_spectrogram("90");

        assert_eq!(
            *log.borrow(),
            [
                Op::Select(5),
                Op::FillRect { x: 0, y: 30, w: 40, h: 30, color: BLACK },
                Op::FillRect { x: 0, y: 33, w: 20, h: 27, color: RED },
                Op::FillRect { x: 20, y: 60, w: 20, h: 0, color: BLACK },
                Op::Select(4),
                Op::FillRect { x: 0, y: 30, w: 40, h: 30, color: BLACK },
            ]
        );
    }

    #[test]
    fn test_spectrogram_stops_after_last_panel() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        r.show_spectrogram("1234567891234");
        let selects = log
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Select(_)))
            .count();
        assert_eq!(selects, 6);
    }

    #[test]
    fn test_custom_image_broadcast() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        let payload = encode(&solid_bmp(24, 4, 4, 0x00FF00));
        let mut scratch = [0u8; 512];

        let info = r.show_custom_image(&payload, &mut scratch).unwrap();
        assert_eq!((info.width, info.height), (4, 4));
        assert_eq!(*log.borrow(), [Op::SelectAll, Op::Push { center: GREEN }]);
        assert_eq!(r.cache().resident(), None);
    }

    #[test]
    fn test_custom_image_invalid_base64() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        let mut scratch = [0u8; 64];
        assert_eq!(
            r.show_custom_image("not*base64!!", &mut scratch),
            Err(CustomImageError::InvalidPayload)
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_custom_image_too_large() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        let payload = encode(&solid_bmp(24, 8, 8, 0xFF0000));
        let mut scratch = [0u8; 32];
        assert_eq!(
            r.show_custom_image(&payload, &mut scratch),
            Err(CustomImageError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_custom_image_not_an_image() {
        let log = op_log();
        let mut pixels = [0u16; (W * H) as usize];
        let mut r = renderer(&mut pixels, &log);
        let payload = encode(b"just some text, definitely no bitmap");
        let mut scratch = [0u8; 64];
        assert!(matches!(
            r.show_custom_image(&payload, &mut scratch),
            Err(CustomImageError::Decode(DecodeError::BadSignature(_)))
        ));
        assert!(log.borrow().is_empty());
    }
}
