//! Rendering primitives: depth buffer, render target, lines and triangle fills.

pub mod depth;
pub mod rasterizer;
pub mod renderer;
pub mod target;

pub use depth::{DepthBuffer, DEPTH_CLEAR};
pub use rasterizer::{
    EdgeFunctionRasterizer, Rasterizer, RasterizerType, ScanlineRasterizer, Triangle,
};
pub use target::RenderTarget;
