//! Framebuffer of styled glyphs, and the palette grid cells are drawn with.

use crate::types::{Cell, Color};

/// Dot shown in empty grid cells.
const EMPTY_DOT: Rgb = Rgb::new(90, 90, 100);

/// How much darker settled blocks are than the falling piece (percent).
const SETTLED_SHADE: u8 = 30;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mix toward black by `percent` (clamped to 100).
    pub const fn shaded(self, percent: u8) -> Self {
        let percent = if percent > 100 { 100 } else { percent };
        let keep = (100 - percent) as u16;
        Self {
            r: (self.r as u16 * keep / 100) as u8,
            g: (self.g as u16 * keep / 100) as u8,
            b: (self.b as u16 * keep / 100) as u8,
        }
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

/// Text weight of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
    Dim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub weight: Weight,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            weight: Weight::Normal,
        }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: Weight::Bold,
            ..self
        }
    }

    pub fn dim(self) -> Self {
        Self {
            weight: Weight::Dim,
            ..self
        }
    }
}

/// One terminal cell: a character and its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

impl Glyph {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// How a grid cell looks on background `bg`.
    ///
    /// The falling piece is drawn bold in its own color; settled blocks are
    /// shaded so the piece stands out from the stack.
    pub fn block(cell: Cell, bg: Rgb) -> Self {
        match cell {
            Cell::Empty => Self::new('·', CellStyle::new(EMPTY_DOT, bg).dim()),
            Cell::Falling(color) => Self::new('█', CellStyle::new(color.into(), bg).bold()),
            Cell::Settled(color) => {
                Self::new('█', CellStyle::new(Rgb::from(color).shaded(SETTLED_SHADE), bg))
            }
        }
    }
}

/// Screen-sized grid of glyphs, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize, keeping the allocation when the size is unchanged.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.glyphs
                .resize(width as usize * height as usize, Glyph::default());
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.offset(x, y).map(|i| self.glyphs[i])
    }

    /// Write one glyph. Off-screen writes are dropped.
    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.offset(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.put(x, y, Glyph::new(ch, style));
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let room = self.width.saturating_sub(x) as usize;
        for (dx, ch) in s.chars().take(room).enumerate() {
            self.put_char(x + dx as u16, y, ch, style);
        }
    }

    /// Draw grid cell `cell` as a block `w` columns wide.
    pub fn put_block(&mut self, x: u16, y: u16, w: u16, cell: Cell, bg: Rgb) {
        let glyph = Glyph::block(cell, bg);
        for dx in 0..w {
            self.put(x.saturating_add(dx), y, glyph);
        }
    }

    /// Row `y` as plain text, for assertions.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|glyph| glyph.ch)
            .collect()
    }
}
