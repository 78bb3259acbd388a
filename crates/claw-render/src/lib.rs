//! # Claw Render
//!
//! Stands in for the GPU: every glyph is a screen-space quad, every covered framebuffer pixel
//! runs the `claw-shader` pipeline once, and surviving fragments are alpha-blended into a
//! [`Framebuffer`]. Rows of a quad are shaded independently through an [`Executor`].

mod color;
mod executor;
mod framebuffer;
mod quad;
mod text;

pub use color::*;
pub use executor::*;
pub use framebuffer::*;
pub use quad::*;
pub use text::*;
