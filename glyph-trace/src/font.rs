//! Loading fonts and drawing letters as paths.

use std::path::{Path as FsPath, PathBuf};

use skrifa::{
    outline::DrawSettings,
    prelude::{LocationRef, Size},
    raw::{FileRef, FontRef, TableProvider},
    MetadataProvider,
};
use trace_path::{compose, GlyphPosition, Path, PenPosition};

use crate::{error::FontError, pen::PathPen};

/// A memory mapped font file, pinned to one face of a collection.
pub struct Font {
    path: PathBuf,
    data: memmap2::Mmap,
    index: u32,
    count: u32,
}

impl Font {
    /// Maps the file at `path` and selects face `index`.
    ///
    /// Plain font files have a single face at index 0.
    pub fn open(path: impl AsRef<FsPath>, index: u32) -> Result<Self, FontError> {
        let path = path.as_ref().to_owned();
        let io_error = |source: std::io::Error| FontError::Io {
            path: path.clone(),
            source,
        };
        let file = std::fs::File::open(&path).map_err(io_error)?;
        let data = unsafe { memmap2::Mmap::map(&file) }.map_err(io_error)?;
        let count = match FileRef::new(data.as_ref()).map_err(FontError::ReadError)? {
            FileRef::Font(_) => 1,
            FileRef::Collection(collection) => collection.len(),
        };
        if index >= count {
            return Err(FontError::InvalidIndex { index, count });
        }
        Ok(Self {
            path,
            data,
            index,
            count,
        })
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    /// Number of faces in the file.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    fn font_ref(&self) -> Result<FontRef<'_>, FontError> {
        FontRef::from_index(self.data.as_ref(), self.index).map_err(FontError::ReadError)
    }

    pub fn units_per_em(&self) -> Result<u16, FontError> {
        let head = self.font_ref()?.head().map_err(FontError::ReadError)?;
        Ok(head.units_per_em())
    }

    /// Returns the unhinted outline of the nominal glyph for `ch`, in font
    /// units.
    pub fn glyph_path(&self, ch: char) -> Result<Path, FontError> {
        let glyph = draw_glyph(&self.font_ref()?, ch)?;
        if glyph.path.is_empty() {
            return Err(FontError::EmptyOutline(ch.to_string()));
        }
        Ok(glyph.path)
    }

    /// Returns the outlines of every character of `text` laid out side by
    /// side on the baseline.
    ///
    /// Glyphs are placed using their advance widths only. Characters with
    /// empty outlines, such as a virama the font does not draw on its own,
    /// are skipped and do not advance the pen.
    pub fn text_path(&self, text: &str) -> Result<Path, FontError> {
        let font = self.font_ref()?;
        let glyphs = text
            .chars()
            .map(|ch| draw_glyph(&font, ch))
            .collect::<Result<Vec<_>, _>>()?;
        let path = lay_out(glyphs);
        if path.is_empty() {
            return Err(FontError::EmptyOutline(text.to_owned()));
        }
        Ok(path)
    }
}

#[derive(Clone, Debug)]
struct DrawnGlyph {
    ch: char,
    path: Path,
    advance: f32,
}

fn draw_glyph(font: &FontRef, ch: char) -> Result<DrawnGlyph, FontError> {
    let glyph_id = font.charmap().map(ch).ok_or(FontError::MissingGlyph(ch))?;
    let outline = font
        .outline_glyphs()
        .get(glyph_id)
        .ok_or(FontError::MissingGlyph(ch))?;
    let mut pen = PathPen::new();
    outline
        .draw(
            DrawSettings::unhinted(Size::unscaled(), LocationRef::default()),
            &mut pen,
        )
        .map_err(|error| FontError::Draw { ch, error })?;
    let advance = font
        .glyph_metrics(Size::unscaled(), LocationRef::default())
        .advance_width(glyph_id)
        .unwrap_or_default();
    log::debug!("{ch:?} is {glyph_id:?} with advance {advance}");
    Ok(DrawnGlyph {
        ch,
        path: pen.into_path(),
        advance,
    })
}

fn lay_out(glyphs: Vec<DrawnGlyph>) -> Path {
    let mut pen = PenPosition::default();
    let placements: Vec<_> = glyphs
        .into_iter()
        .filter_map(|glyph| {
            if glyph.path.is_empty() {
                log::warn!("skipping {:?}, its outline is empty", glyph.ch);
                return None;
            }
            Some(pen.place(glyph.path, GlyphPosition::advance(glyph.advance.into())))
        })
        .collect();
    compose(&placements)
}
