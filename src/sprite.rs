use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{GenericImageView, ImageFormat};
use serde::{Deserialize, Serialize};

const KITTY_CHUNK: usize = 4096;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// A decoded sprite, kept as base64 PNG ready for the kitty graphics protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub payload: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("could not decode sprite: {0}")]
    Decode(#[from] image::ImageError),
    #[error("sprite has no pixels")]
    Empty,
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, SpriteError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SpriteError::Empty);
    }
    // re-encode so the payload is always PNG (kitty format 100)
    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(SpriteData {
        payload: general_purpose::STANDARD.encode(&png),
        width,
        height,
    })
}

/// Kitty graphics escape sequence that transmits and places `sprite` in a `cols` x `rows` cell box.
pub fn kitty_sequence(sprite: &SpriteData, cols: u16, rows: u16, id: u32) -> String {
    let payload = sprite.payload.as_bytes();
    let total_chunks = payload.len().div_ceil(KITTY_CHUNK).max(1);
    let mut sequences = String::new();

    for (index, chunk) in payload.chunks(KITTY_CHUNK).enumerate() {
        let more = u8::from(index + 1 < total_chunks);
        let chunk = String::from_utf8_lossy(chunk);
        if index == 0 {
            let mut params = format!("f=100,a=T,t=d,i={id},q=2");
            if cols > 0 {
                params.push_str(&format!(",c={cols}"));
            }
            if rows > 0 {
                params.push_str(&format!(",r={rows}"));
            }
            sequences.push_str(&format!("\x1b_G{params},m={more};{chunk}\x1b\\"));
        } else {
            sequences.push_str(&format!("\x1b_Gm={more};{chunk}\x1b\\"));
        }
    }
    sequences
}

/// Largest cell box inside `max_cols` x `max_rows` that keeps the sprite's aspect ratio.
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.height == 0 {
        return (max_cols, max_rows);
    }
    let image_ratio = sprite.width as f32 / sprite.height as f32;
    let cols_for_max_rows = image_ratio * max_rows as f32 * CELL_ASPECT;
    if cols_for_max_rows <= max_cols as f32 {
        let cols = cols_for_max_rows.max(1.0).round() as u16;
        return (cols.max(1), max_rows);
    }
    let rows_for_max_cols = max_cols as f32 / (image_ratio * CELL_ASPECT);
    let rows = rows_for_max_cols.max(1.0).round() as u16;
    (max_cols, rows.min(max_rows).max(1))
}
