use glium::index::{NoIndices, PrimitiveType};
use glium::{Frame, Surface, VertexBuffer};
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;
use thiserror::Error;

mod shaders;
mod textures;

pub use textures::Atlas;

use crate::game::{CellPos, CellSink, Game, Outcome, Tile};
use crate::layout::Layout;

/// Background while playing.
const COLOR_GRAY: (f32, f32, f32) = (193.0 / 255.0, 193.0 / 255.0, 193.0 / 255.0);
/// Background after a loss.
const COLOR_RED: (f32, f32, f32) = (228.0 / 255.0, 32.0 / 255.0, 21.0 / 255.0);
/// Background after a win.
const COLOR_GREEN: (f32, f32, f32) = (0.0, 146.0 / 255.0, 103.0 / 255.0);

/// Errors from drawing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The per-cell instance buffer could not be created.
    #[error("failed to create vertex buffer: {0}")]
    Buffer(#[from] glium::vertex::BufferCreationError),
    /// The backend cannot draw instanced geometry.
    #[error("instanced drawing is not supported")]
    Instancing,
    /// The draw call was rejected.
    #[error("failed to draw sprites: {0}")]
    Draw(#[from] glium::DrawError),
}

#[derive(Debug, Copy, Clone)]
struct Vertex2D {
    pos: [f32; 2],
}
glium::implement_vertex!(Vertex2D, pos);

#[derive(Debug, Copy, Clone, PartialEq)]
struct SpriteAttr {
    cell_coords: [f32; 2],
    sprite_coords: [f32; 2],
}
glium::implement_vertex!(SpriteAttr, cell_coords, sprite_coords);

lazy_static! {
    static ref SQUARE_VBO: SendWrapper<VertexBuffer<Vertex2D>> = SendWrapper::new(
        VertexBuffer::immutable(
            &**crate::gui::DISPLAY,
            &[
                Vertex2D { pos: [0.0, 0.0] },
                Vertex2D { pos: [1.0, 0.0] },
                Vertex2D { pos: [0.0, 1.0] },
                Vertex2D { pos: [1.0, 1.0] },
            ]
        )
        .expect("Failed to create vertex buffer")
    );
}

/// Collects one sprite instance per cell.
#[derive(Debug, Clone)]
struct SpriteBatch {
    atlas_cols: u32,
    sprites: Vec<SpriteAttr>,
}
impl SpriteBatch {
    fn new(atlas_cols: u32) -> Self {
        Self {
            atlas_cols,
            sprites: vec![],
        }
    }
}
impl CellSink for SpriteBatch {
    fn draw_cell(&mut self, CellPos(x, y): CellPos, tile: Tile) {
        let [sx, sy] = textures::sprite_coords(tile, self.atlas_cols);
        self.sprites.push(SpriteAttr {
            cell_coords: [x as f32, y as f32],
            sprite_coords: [sx as f32, sy as f32],
        });
    }
}

/// Returns the background color for the state of a game.
fn background_color(game: &Game) -> (f32, f32, f32) {
    match game.outcome() {
        None => COLOR_GRAY,
        Some(Outcome::Lost) => COLOR_RED,
        Some(Outcome::Won) => COLOR_GREEN,
    }
}

/// Draws the whole board.
pub fn draw_game(
    target: &mut Frame,
    game: &Game,
    atlas: &Atlas,
    layout: Layout,
) -> Result<(), RenderError> {
    let (r, g, b) = background_color(game);
    target.clear_color_srgb(r, g, b, 1.0);

    let (atlas_cols, atlas_rows) = atlas.dimensions();
    let mut batch = SpriteBatch::new(atlas_cols);
    game.draw_cells(&mut batch);
    if batch.sprites.is_empty() {
        return Ok(());
    }

    let instances = VertexBuffer::new(&**crate::gui::DISPLAY, &batch.sprites)?;
    let per_instance = instances
        .per_instance()
        .map_err(|_| RenderError::Instancing)?;
    let transform: [[f32; 4]; 4] = layout.projection(target.get_dimensions()).into();

    let draw_params = glium::DrawParameters {
        blend: glium::Blend::alpha_blending(),
        ..glium::DrawParameters::default()
    };

    target.draw(
        (&**SQUARE_VBO, per_instance),
        &NoIndices(PrimitiveType::TriangleStrip),
        &shaders::SPRITE_PROGRAM,
        &glium::uniform! {
            atlas: atlas.sampled(),
            atlas_size: [atlas_cols as f32, atlas_rows as f32],
            cell_px: layout.scaled_cell_size() as f32,
            padding: layout.padding as f32,
            transform: transform,
        },
        &draw_params,
    )?;
    Ok(())
}
