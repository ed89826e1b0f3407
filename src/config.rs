//! Render configuration and its defaulting rules.

use thiserror::Error;

/// Square resolution used when neither width nor height is given.
pub const DEFAULT_RESOLUTION: u32 = 3200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// Output size and optional Y rotation for one render invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Rotation about the Y axis in radians, applied to the mesh before rendering.
    pub rotation: Option<f32>,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            rotation: None,
        })
    }

    pub fn with_rotation(mut self, rotation: Option<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Resolves possibly-missing dimensions.
    ///
    /// A single given dimension is used for both; with neither, the image is
    /// [`DEFAULT_RESOLUTION`] square.
    pub fn from_dimensions(
        width: Option<u32>,
        height: Option<u32>,
        rotation: Option<f32>,
    ) -> Result<Self, ConfigError> {
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (None, Some(h)) => {
                log::info!("assuming width = {h}");
                (h, h)
            }
            (Some(w), None) => {
                log::info!("assuming height = {w}");
                (w, w)
            }
            (None, None) => {
                log::info!(
                    "height and width not set, assuming {DEFAULT_RESOLUTION} x {DEFAULT_RESOLUTION}"
                );
                (DEFAULT_RESOLUTION, DEFAULT_RESOLUTION)
            }
        };
        Ok(Self::new(width, height)?.with_rotation(rotation))
    }
}
