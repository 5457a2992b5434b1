//! Variable-width bitmap font.
//!
//! A font strip is a single-row atlas: every glyph sits side by side, and the
//! top pixel row marks the boundaries. The colour of the top-left pixel is the
//! delimiter; every column with that colour starts a new glyph. Glyphs are
//! assigned in [`CHAR_ORDER`].

use std::collections::HashMap;

use glam::Vec2;

use crate::components::sprite::AtlasId;
use crate::core::rect::Rect;
use crate::error::EngineError;
use crate::renderer::instance::RenderBuffer;

/// Printable ASCII, space through `~`, in strip order.
pub const CHAR_ORDER: &str =
    " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

#[derive(Debug, Clone)]
pub struct Font {
    atlas: AtlasId,
    height: f32,
    glyphs: HashMap<char, Rect>,
}

impl Font {
    /// Build a font from the top pixel row of a strip `height` pixels tall.
    ///
    /// `top_row` holds one packed colour per column.
    pub fn from_strip(atlas: AtlasId, top_row: &[u32], height: f32) -> Result<Self, EngineError> {
        let Some(&delimiter) = top_row.first() else {
            return Err(EngineError::EmptyFont);
        };

        let mut marks: Vec<usize> = top_row
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == delimiter)
            .map(|(x, _)| x)
            .collect();
        marks.push(top_row.len());

        let found = marks.len() - 1;
        let expected = CHAR_ORDER.chars().count();
        if found != expected {
            return Err(EngineError::GlyphCount { found, expected });
        }

        let glyphs = CHAR_ORDER
            .chars()
            .zip(marks.windows(2))
            .map(|(c, w)| {
                let x = (w[0] + 1) as f32;
                let width = (w[1] - w[0] - 1) as f32;
                (c, Rect::new(x, 0.0, width, height))
            })
            .collect();

        log::debug!("font: {} glyphs, {}px tall", found, height);
        Ok(Self { atlas, height, glyphs })
    }

    /// Line height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Advance of `c`; characters the font lacks take no space.
    pub fn char_width(&self, c: char) -> f32 {
        self.glyphs.get(&c).map_or(0.0, |g| g.w)
    }

    /// Width of `text` set on a single line.
    pub fn line_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum()
    }

    /// Blit `text` with the top-left of the first glyph at `pos`.
    pub fn render(&self, text: &str, pos: Vec2, buffer: &mut RenderBuffer) {
        let mut cursor = pos;
        for c in text.chars() {
            if let Some(glyph) = self.glyphs.get(&c) {
                buffer.blit(self.atlas, *glyph, cursor);
                cursor.x += glyph.w;
            }
        }
    }

    /// Break `text` into lines no wider than `width`, at spaces where possible.
    /// A word that cannot fit on a line by itself is split between characters.
    pub fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();

        for word in text.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if self.line_width(&candidate) <= width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if self.line_width(word) <= width {
                line = word.to_string();
                continue;
            }

            let mut line_width = 0.0;
            for c in word.chars() {
                let w = self.char_width(c);
                if !line.is_empty() && line_width + w > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(c);
                line_width += w;
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    /// Wrap `text` to `width` and render it one line per font height.
    /// Returns the number of lines drawn.
    pub fn render_block(&self, text: &str, width: f32, pos: Vec2, buffer: &mut RenderBuffer) -> usize {
        let lines = self.wrap(text, width);
        for (i, line) in lines.iter().enumerate() {
            self.render(line, pos + Vec2::new(0.0, self.height * i as f32), buffer);
        }
        lines.len()
    }
}
