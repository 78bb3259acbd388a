//! # Claw Shader
//!
//! CPU implementation of the stylized glyph pixel shader.
//!
//! A glyph is represented only by its coverage field (see [`CoverageSource`]). For every
//! output pixel the [`Shader`] evaluates a fixed pipeline:
//!
//! 1. edge classification from the coverage gradient ([`Shader::edge`])
//! 2. procedural interior texture ([`noise::texture_noise`])
//! 3. intensity, optional bevel and three-band palette quantization ([`Shader::colorize`])
//! 4. rank-order filter over synthesized colors ([`Shader::median_blur`])
//! 5. edge-aware compositing ([`Shader::composite`]) and block pixelization
//!    ([`Shader::pixelize`])
//!
//! Every stage is a pure function of `uv` plus the immutable per-draw [`ShadingParams`];
//! nothing is cached between pixels, so pixels may be shaded in any order on any thread.

pub mod composite;
pub mod coverage;
pub mod edge;
pub mod math;
pub mod median;
pub mod noise;
pub mod palette;
pub mod params;
pub mod pixelize;
pub mod shader;

pub use coverage::*;
pub use edge::Gradient;
pub use median::{RankSample, MAX_SAMPLES};
pub use palette::*;
pub use params::*;
pub use shader::*;
