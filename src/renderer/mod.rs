//! Terminal renderer.
//!
//! - [`FrameBuffer`] - 2D cell grid the views draw into
//! - [`DiffRenderer`] - writes only the cells that changed since last frame

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
