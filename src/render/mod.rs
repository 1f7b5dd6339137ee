//! Rendering: CPU framebuffer, textures, ray casting and billboards.
//!
//! Re-exports:
//! - `framebuffer`: CPU color buffer uploaded to the window each frame
//! - `textures`: Decoded wall/enemy pixmaps
//! - `casters`: Constant-step ray marching and texture offsets
//! - `render3d`: Column renderer for walls and sprites
//! - `sprites`: Billboard projection and blitting

pub mod casters;
pub mod framebuffer;
pub mod render3d;
pub mod sprites;
pub mod textures;
