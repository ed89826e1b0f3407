//! A CPU-only reference rasterizer.
//!
//! Loads a triangle mesh, projects it orthographically onto an image, fills
//! it as wireframe, flat-shaded or depth-tested triangles and writes the
//! result as a (optionally run-length encoded) TGA file.
//!
//! # Quick Start
//!
//! ```no_run
//! use tinyraster::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig::new(800, 800)?;
//! let mesh = Mesh::from_obj("head.obj")?;
//! let frame = Engine::new(config).render(&mesh, RenderMode::ZBuffered);
//! tinyraster::codec::save(&frame.image, "output-zbuffer.tga", true)?;
//! # Ok(())
//! # }
//! ```

// Public API - exposed to library consumers
pub mod cli;
pub mod codec;
pub mod colors;
pub mod config;
pub mod engine;
pub mod framebuffer;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;

// Internal modules - used within the crate only
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use codec::CodecError;
pub use config::{ConfigError, RenderConfig};
pub use engine::{Engine, Frame, RenderMode};
pub use framebuffer::Framebuffer;
pub use mesh::{LoadError, Mesh};
pub use render::{DepthBuffer, RasterizerType, DEPTH_CLEAR};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use tinyraster::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, Frame, RenderMode};

    // Configuration
    pub use crate::config::RenderConfig;

    // Geometry
    pub use crate::math::{Vec2, Vec2f, Vec2i, Vec3, Vec3f, Vec3i};
    pub use crate::mesh::{Face, Mesh};

    // Images
    pub use crate::colors::{Color, ColorMode};
    pub use crate::framebuffer::Framebuffer;

    // Lighting
    pub use crate::light::DirectionalLight;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        DepthBuffer, EdgeFunctionRasterizer, Rasterizer, RenderTarget, ScanlineRasterizer,
        Triangle,
    };
}
