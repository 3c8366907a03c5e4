use glium::texture::{RawImage2d, SrgbTexture2d, TextureCreationError};
use glium::uniforms::{MagnifySamplerFilter, MinifySamplerFilter, Sampler};
use image::{Rgba, RgbaImage};
use std::path::Path;

use crate::game::Tile;

/// Width and height of one sprite in the atlas, in pixels.
pub const SPRITE_SIZE: u32 = 32;
/// Number of sprite columns in the atlas.
pub const ATLAS_COLS: u32 = 8;
/// Number of sprites drawn by the game.
const SPRITE_COUNT: u32 = 14;

/// Texture containing every tile sprite in a grid.
pub struct Atlas {
    texture: SrgbTexture2d,
    cols: u32,
    rows: u32,
}
impl Atlas {
    /// Loads the atlas from a PNG file, falling back to a generated one if the
    /// file cannot be read.
    pub fn load(display: &glium::Display, path: &Path) -> Result<Self, TextureCreationError> {
        let image = match image::open(path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!(
                    "Failed to load texture atlas {}: {}; using generated sprites",
                    path.display(),
                    e,
                );
                generated_atlas()
            }
        };
        let (width, height) = image.dimensions();
        let cols = (width / SPRITE_SIZE).max(1);
        let rows = (height / SPRITE_SIZE).max(1);
        if cols * rows < SPRITE_COUNT {
            log::warn!(
                "Texture atlas is {}x{} sprites but {} are needed",
                cols,
                rows,
                SPRITE_COUNT,
            );
        }

        let raw = RawImage2d::from_raw_rgba_reversed(&image.into_raw(), (width, height));
        let texture = SrgbTexture2d::new(display, raw)?;
        Ok(Self {
            texture,
            cols,
            rows,
        })
    }

    /// Returns the number of sprite columns and rows.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    /// Returns a pixel-exact sampler for the atlas.
    pub fn sampled(&self) -> Sampler<'_, SrgbTexture2d> {
        self.texture
            .sampled()
            .minify_filter(MinifySamplerFilter::Nearest)
            .magnify_filter(MagnifySamplerFilter::Nearest)
    }
}

/// Returns the column and row of a tile's sprite in an atlas with `cols`
/// columns.
pub fn sprite_coords(tile: Tile, cols: u32) -> [u32; 2] {
    let i = tile.atlas_index();
    [i % cols, i / cols]
}

/// Draws a plain atlas in the standard layout, for when no atlas image is
/// available.
pub fn generated_atlas() -> RgbaImage {
    const COVERED: Rgba<u8> = Rgba([160, 160, 160, 255]);
    const UNCOVERED: Rgba<u8> = Rgba([210, 210, 210, 255]);
    const BORDER: Rgba<u8> = Rgba([120, 120, 120, 255]);
    const EXPLODED: Rgba<u8> = Rgba([228, 32, 21, 255]);
    const MARK: Rgba<u8> = Rgba([20, 20, 20, 255]);
    const FLAG: Rgba<u8> = Rgba([200, 0, 0, 255]);
    const NUMBER_COLORS: [Rgba<u8>; 8] = [
        Rgba([0, 0, 255, 255]),
        Rgba([0, 128, 0, 255]),
        Rgba([255, 0, 0, 255]),
        Rgba([0, 0, 128, 255]),
        Rgba([128, 0, 0, 255]),
        Rgba([0, 128, 128, 255]),
        Rgba([0, 0, 0, 255]),
        Rgba([128, 128, 128, 255]),
    ];

    let rows = (SPRITE_COUNT + ATLAS_COLS - 1) / ATLAS_COLS;
    RgbaImage::from_fn(ATLAS_COLS * SPRITE_SIZE, rows * SPRITE_SIZE, |x, y| {
        let index = (y / SPRITE_SIZE) * ATLAS_COLS + x / SPRITE_SIZE;
        let (sx, sy) = (x % SPRITE_SIZE, y % SPRITE_SIZE);
        let edge = sx == 0 || sy == 0 || sx == SPRITE_SIZE - 1 || sy == SPRITE_SIZE - 1;
        let dist_from_center = |c: u32| (c as i32 - SPRITE_SIZE as i32 / 2).abs() as u32;
        let in_center = |radius: u32| dist_from_center(sx) < radius && dist_from_center(sy) < radius;

        let tile = match Tile::from_atlas_index(index) {
            Some(t) => t,
            None => return Rgba([0, 0, 0, 0]),
        };
        if edge {
            return BORDER;
        }
        match tile {
            Tile::Hidden => COVERED,
            Tile::Flagged if in_center(8) => FLAG,
            Tile::Flagged => COVERED,
            Tile::Number(0) => UNCOVERED,
            Tile::Number(n) => {
                // One pip per adjacent mine, in two rows of four.
                let in_pips = (2..30).contains(&sx) && (9..23).contains(&sy);
                if in_pips && (sx - 2) % 7 >= 2 && (sy - 9) % 7 >= 2 {
                    let pip = (sy - 9) / 7 * 4 + (sx - 2) / 7;
                    if pip < n as u32 {
                        return NUMBER_COLORS[(n - 1) as usize];
                    }
                }
                UNCOVERED
            }
            Tile::Mine if in_center(7) => MARK,
            Tile::Mine => UNCOVERED,
            Tile::ExplodedMine if in_center(7) => MARK,
            Tile::ExplodedMine => EXPLODED,
            Tile::WrongFlag if sx == sy || sx + sy == SPRITE_SIZE - 1 => MARK,
            Tile::WrongFlag if in_center(8) => FLAG,
            Tile::WrongFlag => COVERED,
        }
    })
}
