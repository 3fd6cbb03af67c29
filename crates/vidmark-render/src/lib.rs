//! Vidmark Render Library
//!
//! Renderer abstraction for the vidmark annotation overlay. Scene building
//! converts committed and in-progress shapes from source coordinates into a
//! display-space visual description; backends supplied by the embedding
//! layer paint it.

mod renderer;

pub use renderer::{
    build_scene, RenderContext, RenderResult, Renderer, RendererError, Scene, SceneNode,
};
