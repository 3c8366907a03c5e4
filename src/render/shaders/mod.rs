use glium::{program, Program};
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;

lazy_static! {
    /// Draws instanced cell sprites from the atlas.
    pub static ref SPRITE_PROGRAM: SendWrapper<Program> = SendWrapper::new(
        glium::program!(
            &**crate::gui::DISPLAY,
            140 => {
                vertex: include_str!("sprite.vert"),
                fragment: include_str!("sprite.frag"),
                outputs_srgb: false,
            },
        )
        .expect("Failed to compile shader")
    );
}
