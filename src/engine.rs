//! Core rendering engine.
//!
//! The [`Engine`] turns a [`Mesh`] into an image. Each call renders one
//! [`RenderMode`] into a freshly allocated [`Frame`]; nothing is shared
//! between passes, so the same engine can render the same mesh several ways.
//!
//! # Lighting
//!
//! Faces are lit by a single [`DirectionalLight`] pointing along -Z. The two
//! shaded modes treat faces that turn away from the light differently:
//!
//! - [`RenderMode::FlatShaded`] skips them, leaving whatever was behind.
//! - [`RenderMode::ZBuffered`] draws them in black, so they still occlude.
//!
//! The difference is kept on purpose; the z-buffered image of a closed mesh
//! shows back-lit silhouettes that the flat image does not.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::colors::{Color, ColorMode, WHITE};
use crate::config::RenderConfig;
use crate::framebuffer::Framebuffer;
use crate::light::DirectionalLight;
use crate::math::Vec3f;
use crate::mesh::Mesh;
use crate::projection::{world_to_pixel, world_to_screen};
use crate::render::{
    DepthBuffer, EdgeFunctionRasterizer, Rasterizer, RasterizerType, RenderTarget,
    ScanlineRasterizer, Triangle,
};

/// Rendering mode presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// White outlines of every face
    Wireframe,
    /// Lit faces filled scanline by scanline, no depth test
    FlatShaded,
    /// Lit faces filled with barycentric coverage and a depth test
    #[default]
    ZBuffered,
    /// Every face in a random color, with a depth test
    RandomColors,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Wireframe,
        RenderMode::FlatShaded,
        RenderMode::ZBuffered,
        RenderMode::RandomColors,
    ];

    /// Short name used on the command line and in output file names.
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Wireframe => "wireframe",
            RenderMode::FlatShaded => "flat",
            RenderMode::ZBuffered => "zbuffer",
            RenderMode::RandomColors => "random",
        }
    }

    /// Which fill algorithm the mode uses, if it fills at all.
    pub fn rasterizer(self) -> Option<RasterizerType> {
        match self {
            RenderMode::Wireframe => None,
            RenderMode::FlatShaded => Some(RasterizerType::Scanline),
            RenderMode::ZBuffered | RenderMode::RandomColors => {
                Some(RasterizerType::EdgeFunction)
            }
        }
    }

    pub fn uses_depth(self) -> bool {
        self.rasterizer() == Some(RasterizerType::EdgeFunction)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RenderMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = RenderMode::ALL.iter().map(|m| m.name()).collect();
                format!("unknown render mode '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Result of one render pass.
///
/// `depth` is present only for modes that depth test, and is returned so the
/// caller can inspect coverage.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: Framebuffer,
    pub depth: Option<DepthBuffer>,
}

pub struct Engine {
    config: RenderConfig,
    light: DirectionalLight,
    seed: u64,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            light: DirectionalLight::default(),
            seed: 0,
        }
    }

    /// Seed for [`RenderMode::RandomColors`]. The same seed gives the same image.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Applies the configured rotation to `mesh`, if any.
    ///
    /// Call once before rendering; every pass then sees the rotated vertices.
    pub fn prepare(&self, mesh: &mut Mesh) {
        if let Some(theta) = self.config.rotation {
            log::debug!("rotating mesh by {theta} rad about Y");
            mesh.rotate(theta);
        }
    }

    fn new_image(&self) -> Framebuffer {
        Framebuffer::new(self.config.width, self.config.height, ColorMode::Rgb)
    }

    fn new_depth(&self) -> DepthBuffer {
        DepthBuffer::new(self.config.width, self.config.height)
    }

    pub fn render(&self, mesh: &Mesh, mode: RenderMode) -> Frame {
        log::debug!(
            "rendering {} pass: {} faces at {}x{}",
            mode,
            mesh.face_count(),
            self.config.width,
            self.config.height
        );
        match mode {
            RenderMode::Wireframe => Frame {
                image: self.draw_wireframe(mesh, WHITE),
                depth: None,
            },
            RenderMode::FlatShaded => Frame {
                image: self.shade_flat(mesh),
                depth: None,
            },
            RenderMode::ZBuffered => self.shade_z_buffered(mesh),
            RenderMode::RandomColors => self.fill_random_colors(mesh),
        }
    }

    /// Outlines every face with Bresenham lines.
    pub fn draw_wireframe(&self, mesh: &Mesh, color: Color) -> Framebuffer {
        let mut image = self.new_image();
        let mut target = RenderTarget::new(&mut image, None);
        for face in mesh.faces() {
            let points = mesh
                .face_vertices(face)
                .map(|v| world_to_pixel(v, &self.config));
            target.draw_triangle_wireframe(points, color);
        }
        image
    }

    /// Fills lit faces in mesh order. Faces with no light are not drawn.
    pub fn shade_flat(&self, mesh: &Mesh) -> Framebuffer {
        let mut image = self.new_image();
        let mut target = RenderTarget::new(&mut image, None);
        let rasterizer = ScanlineRasterizer::new();
        let mut skipped = 0usize;

        for face in mesh.faces() {
            let corners = mesh.face_vertices(face);
            let intensity = self.light.face_intensity(corners);
            if intensity <= 0.0 {
                skipped += 1;
                continue;
            }
            let [a, b, c] = corners.map(|v| world_to_pixel(v, &self.config));
            rasterizer.fill_points(a, b, c, &mut target, Color::intensity(intensity));
        }

        log::debug!("flat pass skipped {skipped} back-lit faces");
        image
    }

    /// Fills every face with its light intensity, nearest surface winning.
    pub fn shade_z_buffered(&self, mesh: &Mesh) -> Frame {
        self.fill_depth_tested(mesh, |corners| {
            Color::intensity(self.light.face_intensity(corners))
        })
    }

    /// Fills every face with a random opaque color, nearest surface winning.
    pub fn fill_random_colors(&self, mesh: &Mesh) -> Frame {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.fill_depth_tested(mesh, |_| {
            Color::rgba(
                rng.gen_range(0..255),
                rng.gen_range(0..255),
                rng.gen_range(0..255),
                255,
            )
        })
    }

    fn fill_depth_tested<F>(&self, mesh: &Mesh, mut color_of: F) -> Frame
    where
        F: FnMut([Vec3f; 3]) -> Color,
    {
        let mut image = self.new_image();
        let mut depth = self.new_depth();
        {
            let mut target = RenderTarget::new(&mut image, Some(&mut depth));
            let rasterizer = EdgeFunctionRasterizer::new();
            for face in mesh.faces() {
                let corners = mesh.face_vertices(face);
                let color = color_of(corners);
                let triangle = Triangle::new(corners.map(|v| world_to_screen(v, &self.config)));
                rasterizer.fill_triangle(&triangle, &mut target, color);
            }
        }
        Frame {
            image,
            depth: Some(depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use crate::render::DEPTH_CLEAR;

    fn engine(size: u32) -> Engine {
        Engine::new(RenderConfig::new(size, size).unwrap())
    }

    fn lit_pixels(fb: &Framebuffer) -> usize {
        fb.as_bytes().chunks(3).filter(|px| px.iter().any(|&b| b != 0)).count()
    }

    /// One triangle facing the viewer and one facing away, side by side.
    fn two_faces() -> Mesh {
        Mesh::new(
            vec![
                Vec3f::new(-0.9, -0.9, 0.0),
                Vec3f::new(-0.1, -0.9, 0.0),
                Vec3f::new(-0.9, -0.1, 0.0),
                Vec3f::new(0.1, 0.1, 0.0),
                Vec3f::new(0.9, 0.1, 0.0),
                Vec3f::new(0.1, 0.9, 0.0),
            ],
            vec![Face::new(0, 1, 2), Face::new(3, 5, 4)],
        )
        .unwrap()
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in RenderMode::ALL {
            assert_eq!(mode.name().parse::<RenderMode>(), Ok(mode));
        }
        assert_eq!("ZBUFFER".parse::<RenderMode>(), Ok(RenderMode::ZBuffered));
        assert!("phong".parse::<RenderMode>().is_err());
    }

    #[test]
    fn only_depth_tested_modes_return_depth() {
        let mesh = Mesh::unit_cube();
        let engine = engine(40);
        for mode in RenderMode::ALL {
            let frame = engine.render(&mesh, mode);
            assert_eq!(frame.depth.is_some(), mode.uses_depth(), "{mode}");
            assert_eq!(frame.image.mode(), ColorMode::Rgb);
        }
    }

    #[test]
    fn cube_z_buffered_shows_lit_face() {
        let frame = engine(100).render(&Mesh::unit_cube(), RenderMode::ZBuffered);
        let depth = frame.depth.unwrap();
        // the z = +0.5 face is closest and faces the light
        assert_eq!(frame.image.get(50, 50), Color::rgb(255, 255, 255));
        approx::assert_relative_eq!(depth.get(50, 50).unwrap(), 0.5, epsilon = 1e-5);
        for y in 25..=75 {
            for x in 25..=75 {
                assert_ne!(depth.get(x, y), Some(DEPTH_CLEAR), "({x}, {y})");
            }
        }
        assert_eq!(depth.get(10, 10), Some(DEPTH_CLEAR));
    }

    #[test]
    fn flat_skips_back_lit_faces_but_z_buffer_draws_them_black() {
        let mesh = two_faces();
        let engine = engine(50);

        let flat = engine.shade_flat(&mesh);
        // lower-left face is lit, upper-right faces away
        assert_eq!(flat.get(5, 5), Color::rgb(255, 255, 255));
        assert_eq!(flat.get(30, 30), Color::rgb(0, 0, 0));

        let frame = engine.shade_z_buffered(&mesh);
        let depth = frame.depth.unwrap();
        assert_eq!(frame.image.get(30, 30), Color::rgb(0, 0, 0));
        approx::assert_relative_eq!(depth.get(30, 30).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn wireframe_outlines_without_filling() {
        let mesh = two_faces();
        let image = engine(50).draw_wireframe(&mesh, WHITE);
        // corner of the first face
        assert_eq!(image.get(2, 2), Color::rgb(255, 255, 255));
        // interior stays empty
        assert_eq!(image.get(8, 8), Color::rgb(0, 0, 0));
        assert!(lit_pixels(&image) > 0);
    }

    #[test]
    fn random_colors_depend_only_on_seed() {
        let mesh = Mesh::unit_cube();
        let config = RenderConfig::new(32, 32).unwrap();
        let a = Engine::new(config).with_seed(7).fill_random_colors(&mesh);
        let b = Engine::new(config).with_seed(7).fill_random_colors(&mesh);
        assert_eq!(a.image, b.image);
        assert!(lit_pixels(&a.image) > 0);
    }

    #[test]
    fn prepare_applies_configured_rotation_once() {
        let config = RenderConfig::new(10, 10)
            .unwrap()
            .with_rotation(Some(std::f32::consts::FRAC_PI_2));
        let mut mesh = Mesh::new(vec![Vec3f::new(1.0, 0.0, 0.0)], vec![]).unwrap();
        Engine::new(config).prepare(&mut mesh);
        let v = mesh.vertices()[0];
        approx::assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        approx::assert_relative_eq!(v.z, 1.0, epsilon = 1e-6);
    }
}
