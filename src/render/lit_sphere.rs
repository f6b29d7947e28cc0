//! CPU lit-sphere shading for the orb
//!
//! Produces an RGBA image of a shaded disc: Lambertian diffuse and a tight
//! specular highlight, both dimmed by the orb's light map so snake shadows
//! show up on its surface.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::color::Rgb;
use crate::sim::orb::{CentralOrb, OcclusionMap};

/// Darkest a lit pixel gets
const AMBIENT: f32 = 0.2;
/// Specular exponent
const SHININESS: i32 = 8;

/// One RGBA pixel, laid out for direct texture upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Row-major RGBA image; pixels outside the disc are fully transparent
#[derive(Debug, Clone, Serialize)]
pub struct SphereImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgba>,
}

impl SphereImage {
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Raw bytes, four per pixel
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Shade a sphere of `radius` centred in a `4R x 4R` image
///
/// The light sits at `light_offset` from the sphere center, raised `2R`
/// toward the viewer.
pub fn shade_lit_sphere(base: Rgb, radius: f32, light_offset: Vec2, occlusion: &OcclusionMap, alpha: u8) -> SphereImage {
    if radius <= 0.0 || !radius.is_finite() {
        return SphereImage {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
    }

    let side = (radius * 4.0).ceil() as usize;
    let center = Vec2::splat(radius * 2.0);
    let light = center + light_offset;
    let base = Vec3::new(base.r as f32, base.g as f32, base.b as f32);
    let mut pixels = vec![Rgba::default(); side * side];

    for y in 0..side {
        for x in 0..side {
            let p = Vec2::new(x as f32, y as f32);
            let d = p - center;
            if d.length_squared() > radius * radius {
                continue;
            }

            let lit = occlusion.light_at_angle(d.y.atan2(d.x));
            let n2 = d / radius;
            let normal = n2.extend((1.0 - n2.length_squared()).max(0.0).sqrt());
            let to_light = (light - p).extend(radius * 2.0).normalize_or_zero();

            let diffuse = (normal.dot(to_light) * lit).clamp(AMBIENT, 1.0);
            let reflected = 2.0 * diffuse * normal - to_light;
            let specular = (reflected.z.max(0.0) * lit).powi(SHININESS);

            let c = (base * diffuse + Vec3::splat(255.0 * specular)).min(Vec3::splat(255.0));
            pixels[y * side + x] = Rgba {
                r: c.x as u8,
                g: c.y as u8,
                b: c.z as u8,
                a: alpha,
            };
        }
    }

    SphereImage {
        width: side,
        height: side,
        pixels,
    }
}

/// Shade the orb as it should look this frame
pub fn orb_sphere(orb: &CentralOrb, color: Rgb) -> SphereImage {
    shade_lit_sphere(
        color,
        orb.display_radius(),
        orb.light_offset(),
        orb.occlusion(),
        orb.display_alpha(),
    )
}
