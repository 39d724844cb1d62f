//! ESC/POS command builder
//!
//! Assembles the binary command stream for the target thermal printers.
//! Text is pushed through the printer codec at write time, so the
//! finished buffer is ready for the transport as-is.

use crate::encoding::encode_printer_text;
use crate::settings::Align;

#[cfg(feature = "image")]
use crate::raster::MonoBitmap;

/// ESC/POS byte stream builder
///
/// `new` emits the printer reset, so a fresh builder always starts a
/// job from a known state. Every call appends; `build` hands over the
/// finished buffer.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a builder for a paper `width` in character cells
    ///
    /// Common widths: 32 (58mm paper), 48 (80mm paper).
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // ESC @ - initialize printer
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self { buf, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text without a trailing line feed
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_printer_text(s));
        self
    }

    /// Write text followed by a line feed
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(0x0A);
        self
    }

    /// Write an empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(0x0A);
        self
    }

    /// Feed `lines` blank lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        for _ in 0..lines {
            self.buf.push(0x0A);
        }
        self
    }

    // === Alignment ===

    /// ESC a n - select justification
    pub fn align(&mut self, align: Align) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, align.escpos_mode()]);
        self
    }

    // === Text Style ===

    /// ESC E 1 - emphasis on
    pub fn bold_on(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// ESC E 0 - emphasis off
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// ESC ! 0x30 - double height and width
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x21, 0x30]);
        self
    }

    /// ESC ! 0x00 - normal size
    pub fn normal_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x21, 0x00]);
        self
    }

    // === Raster Image ===

    /// GS v 0 - print a raster bit image
    ///
    /// An empty bitmap emits nothing; some firmwares stall on a
    /// zero-height raster header.
    #[cfg(feature = "image")]
    pub fn raster(&mut self, bmp: &MonoBitmap) -> &mut Self {
        if bmp.is_empty() {
            return self;
        }
        // GS v 0 m xL xH yL yH
        self.buf.extend_from_slice(&[0x1D, 0x76, 0x30, 0x00]);
        self.buf.push((bmp.row_bytes & 0xFF) as u8);
        self.buf.push((bmp.row_bytes >> 8) as u8);
        self.buf.push((bmp.height & 0xFF) as u8);
        self.buf.push((bmp.height >> 8) as u8);
        self.buf.extend_from_slice(&bmp.data);
        self.buf.push(0x0A);
        self
    }

    // === Paper Control ===

    /// GS V 0 - full cut
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    // === Build ===

    /// Finalize and return the command stream
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
