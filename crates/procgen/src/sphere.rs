//! UV sphere generation: latitude/longitude sampling into an indexed,
//! interleaved mesh ready for GPU upload.
//!
//! Vertices are emitted ring by ring from the north pole (`+Z`) to the south
//! pole (`-Z`), `sector_count + 1` samples per ring. The first and last sample
//! of a ring share a position but carry `s = 0` and `s = 1`, so textures wrap
//! without a visible seam. Pole rings are kept at full width instead of being
//! collapsed to one vertex, which keeps the index arithmetic uniform.
//!
//! ```text
//!   k1--k1+1        k1 = i * (sector_count + 1) + j
//!   |  / |          k2 = k1 + sector_count + 1
//!   | /  |
//!   k2--k2+1
//! ```

use crate::error::{GeometryError, Result};
use crate::interleave::interleave;
use bytemuck::cast_slice;
use engine_core::{Coordinate, Transform, WORLD_ORIGIN};
use std::f32::consts::{FRAC_PI_2, PI};

/// Resolution and size of a UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    /// Sphere radius in model units.
    pub radius: f32,
    /// Longitude subdivisions (samples per ring minus the seam duplicate).
    pub sector_count: u32,
    /// Latitude subdivisions (rings minus one).
    pub stack_count: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sector_count: 36,
            stack_count: 18,
        }
    }
}

impl SphereParams {
    /// Fewest sectors that still enclose a volume.
    pub const MIN_SECTORS: u32 = 3;
    /// Fewest stacks that produce any triangles (one per pole cap).
    pub const MIN_STACKS: u32 = 2;

    pub fn new(radius: f32, sector_count: u32, stack_count: u32) -> Self {
        Self {
            radius,
            sector_count,
            stack_count,
        }
    }

    /// Reject parameters that would give degenerate, empty or unindexable geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GeometryError::invalid(
                "radius",
                format!("must be a finite value > 0, got {}", self.radius),
            ));
        }
        if self.sector_count < Self::MIN_SECTORS {
            return Err(GeometryError::invalid(
                "sector_count",
                format!("must be >= {}, got {}", Self::MIN_SECTORS, self.sector_count),
            ));
        }
        if self.stack_count < Self::MIN_STACKS {
            return Err(GeometryError::invalid(
                "stack_count",
                format!("must be >= {}, got {}", Self::MIN_STACKS, self.stack_count),
            ));
        }

        let vertices = (u64::from(self.stack_count) + 1) * (u64::from(self.sector_count) + 1);
        if vertices > u64::from(u32::MAX) {
            return Err(GeometryError::invalid(
                "sector_count",
                format!(
                    "{} x {} produces {} vertices, more than a u32 index can address",
                    self.sector_count, self.stack_count, vertices
                ),
            ));
        }
        Ok(())
    }

    /// `(stack_count + 1) * (sector_count + 1)`
    pub fn vertex_count(&self) -> usize {
        (self.stack_count as usize + 1) * (self.sector_count as usize + 1)
    }

    /// Two triangles per cell, one per cell in each pole cap:
    /// `2 * sectors * (stacks - 2) + 2 * sectors`.
    pub fn triangle_count(&self) -> usize {
        let sectors = self.sector_count as usize;
        let stacks = self.stack_count as usize;
        2 * sectors * stacks.saturating_sub(2) + 2 * sectors
    }

    /// Entries in the triangle index list.
    pub fn index_count(&self) -> usize {
        self.triangle_count() * 3
    }

    /// Entries in the wireframe line index list: one meridian segment per
    /// cell plus one parallel segment per cell below the first stack.
    pub fn line_index_count(&self) -> usize {
        let sectors = self.sector_count as usize;
        let stacks = self.stack_count as usize;
        2 * sectors * stacks + 2 * sectors * stacks.saturating_sub(1)
    }
}

/// A UV sphere with every buffer built at construction.
///
/// The mesh is immutable: re-parameterizing goes through the `with_*`
/// methods, which build a fresh sphere and leave this one untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    origin: Coordinate,
    params: SphereParams,
    positions: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
    line_indices: Vec<u32>,
    interleaved: Vec<f32>,
}

impl Sphere {
    /// Build a sphere. `origin` is recorded but the mesh is always generated
    /// around the world origin.
    pub fn new(origin: Coordinate, radius: f32, sector_count: u32, stack_count: u32) -> Result<Self> {
        Self::from_params(origin, SphereParams::new(radius, sector_count, stack_count))
    }

    /// Build a sphere from a parameter set.
    pub fn from_params(origin: Coordinate, params: SphereParams) -> Result<Self> {
        params.validate()?;

        if origin != WORLD_ORIGIN {
            log::debug!(
                "sphere origin {:?} recorded; mesh is generated around the world origin",
                origin
            );
        }

        let (positions, normals, tex_coords) = build_vertices(&params);
        let (indices, line_indices) = build_indices(&params);
        let interleaved = interleave(&positions, &normals, &tex_coords)?;

        log::debug!(
            "built sphere r={} sectors={} stacks={}: {} vertices, {} triangles, {} line segments",
            params.radius,
            params.sector_count,
            params.stack_count,
            positions.len() / 3,
            indices.len() / 3,
            line_indices.len() / 2,
        );

        Ok(Self {
            origin,
            params,
            positions,
            normals,
            tex_coords,
            indices,
            line_indices,
            interleaved,
        })
    }

    /// A new sphere at the same origin with different parameters.
    pub fn with_parameters(&self, params: SphereParams) -> Result<Self> {
        Self::from_params(self.origin, params)
    }

    /// A new sphere with a different radius.
    pub fn with_radius(&self, radius: f32) -> Result<Self> {
        self.with_parameters(SphereParams {
            radius,
            ..self.params
        })
    }

    /// A new sphere with a different number of sectors.
    pub fn with_sector_count(&self, sector_count: u32) -> Result<Self> {
        self.with_parameters(SphereParams {
            sector_count,
            ..self.params
        })
    }

    /// A new sphere with a different number of stacks.
    pub fn with_stack_count(&self, stack_count: u32) -> Result<Self> {
        self.with_parameters(SphereParams {
            stack_count,
            ..self.params
        })
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn params(&self) -> SphereParams {
        self.params
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    pub fn sector_count(&self) -> u32 {
        self.params.sector_count
    }

    pub fn stack_count(&self) -> u32 {
        self.params.stack_count
    }

    /// Placement of the mesh in the world. Always the identity, since the
    /// mesh is centered on the world origin regardless of `origin()`.
    pub fn model_transform(&self) -> Transform {
        Transform::IDENTITY
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `[x, y, z, ...]` in generation order.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Unit normals, `[nx, ny, nz, ...]`.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// `[s, t, ...]`, each in `[0, 1]`.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// CCW triangle list.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Line list for the wireframe overlay.
    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }

    /// Upload-ready vertex data, 8 floats per vertex.
    pub fn interleaved_vertices(&self) -> &[f32] {
        &self.interleaved
    }

    /// Interleaved vertex data as raw bytes.
    pub fn interleaved_vertices_bytes(&self) -> &[u8] {
        cast_slice(&self.interleaved)
    }

    /// Byte length of the interleaved buffer (`vertex_count * 8 * 4`).
    pub fn interleaved_vertices_size(&self) -> usize {
        std::mem::size_of_val(self.interleaved.as_slice())
    }

    pub fn indices_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }

    /// Byte length of the triangle index buffer (`index_count * 4`).
    pub fn indices_size(&self) -> usize {
        std::mem::size_of_val(self.indices.as_slice())
    }

    pub fn line_indices_bytes(&self) -> &[u8] {
        cast_slice(&self.line_indices)
    }

    pub fn line_indices_size(&self) -> usize {
        std::mem::size_of_val(self.line_indices.as_slice())
    }
}

/// Positions, normals and tex coords, ring by ring from the north pole.
fn build_vertices(params: &SphereParams) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let count = params.vertex_count();
    let mut positions = Vec::with_capacity(count * 3);
    let mut normals = Vec::with_capacity(count * 3);
    let mut tex_coords = Vec::with_capacity(count * 2);

    let radius = params.radius;
    let length_inv = 1.0 / radius;
    let sector_step = 2.0 * PI / params.sector_count as f32;
    let stack_step = PI / params.stack_count as f32;

    for i in 0..=params.stack_count {
        // pi/2 at the north pole down to -pi/2 at the south pole
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let xy = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();
        let t = i as f32 / params.stack_count as f32;

        for j in 0..=params.sector_count {
            let sector_angle = j as f32 * sector_step;
            let x = xy * sector_angle.cos();
            let y = xy * sector_angle.sin();

            positions.extend_from_slice(&[x, y, z]);
            normals.extend_from_slice(&[x * length_inv, y * length_inv, z * length_inv]);
            tex_coords.extend_from_slice(&[j as f32 / params.sector_count as f32, t]);
        }
    }

    (positions, normals, tex_coords)
}

/// Triangle and line index lists over the vertex order of `build_vertices`.
fn build_indices(params: &SphereParams) -> (Vec<u32>, Vec<u32>) {
    let sectors = params.sector_count;
    let stacks = params.stack_count;
    let mut indices = Vec::with_capacity(params.index_count());
    let mut line_indices = Vec::with_capacity(params.line_index_count());

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            // The north cap has no k1 => k2 => k1+1 triangle: k1 and k1+1 share the pole.
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            // Likewise the south cap skips k1+1 => k2 => k2+1.
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }

            line_indices.extend_from_slice(&[k1, k2]);
            if i != 0 {
                line_indices.extend_from_slice(&[k1, k1 + 1]);
            }

            k1 += 1;
            k2 += 1;
        }
    }

    (indices, line_indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interleave::deinterleave;
    use engine_core::Vec3;

    fn sphere(radius: f32, sectors: u32, stacks: u32) -> Sphere {
        Sphere::new(WORLD_ORIGIN, radius, sectors, stacks).unwrap()
    }

    fn position(s: &Sphere, v: u32) -> Vec3 {
        let p = &s.positions()[v as usize * 3..v as usize * 3 + 3];
        Vec3::new(p[0], p[1], p[2])
    }

    const CASES: [(f32, u32, u32); 6] = [
        (1.0, 3, 2),
        (1.0, 4, 2),
        (0.5, 8, 3),
        (2.5, 36, 18),
        (100.0, 17, 9),
        (0.01, 64, 32),
    ];

    #[test]
    fn small_sphere_counts() {
        let s = sphere(1.0, 4, 2);
        assert_eq!(s.vertex_count(), 15);
        assert_eq!(s.triangle_count(), 8);
        assert_eq!(s.indices().len(), 24);
        assert_eq!(s.line_indices().len(), 2 * 4 * 2 + 2 * 4);
    }

    #[test]
    fn small_sphere_poles_get_one_triangle_per_sector() {
        let s = sphere(1.0, 4, 2);
        let ring = s.sector_count() + 1;
        let last_ring_start = s.stack_count() * ring;

        let triangles: Vec<&[u32]> = s.indices().chunks_exact(3).collect();
        let north = triangles.iter().filter(|t| t.iter().any(|&v| v < ring)).count();
        let south = triangles
            .iter()
            .filter(|t| t.iter().any(|&v| v >= last_ring_start))
            .count();
        assert_eq!(north, 4);
        assert_eq!(south, 4);
    }

    #[test]
    fn counts_match_closed_forms() {
        for (radius, sectors, stacks) in CASES {
            let s = sphere(radius, sectors, stacks);
            let n = sectors as usize;
            let m = stacks as usize;
            assert_eq!(s.vertex_count(), (m + 1) * (n + 1));
            assert_eq!(s.indices().len(), 3 * (2 * n * (m - 2) + 2 * n));
            assert_eq!(s.line_indices().len(), 2 * n * m + 2 * n * (m - 1));
            assert_eq!(s.normals().len(), s.positions().len());
            assert_eq!(s.tex_coords().len() / 2, s.positions().len() / 3);
            assert_eq!(s.params().index_count(), s.indices().len());
            assert_eq!(s.params().line_index_count(), s.line_indices().len());
        }
    }

    #[test]
    fn normals_are_unit_length() {
        for (radius, sectors, stacks) in CASES {
            let s = sphere(radius, sectors, stacks);
            for (i, n) in s.normals().chunks_exact(3).enumerate() {
                let len = Vec3::new(n[0], n[1], n[2]).length();
                assert!((len - 1.0).abs() < 1e-4, "normal {} has length {}", i, len);
            }
        }
    }

    #[test]
    fn positions_lie_on_the_sphere() {
        let s = sphere(3.0, 12, 7);
        for p in s.positions().chunks_exact(3) {
            let len = Vec3::new(p[0], p[1], p[2]).length();
            assert!((len - 3.0).abs() < 1e-4 * 3.0);
        }
    }

    #[test]
    fn tex_coords_in_unit_range() {
        for (radius, sectors, stacks) in CASES {
            let s = sphere(radius, sectors, stacks);
            assert!(s.tex_coords().iter().all(|&c| (0.0..=1.0).contains(&c)));
        }
    }

    #[test]
    fn every_index_is_in_range() {
        for (radius, sectors, stacks) in CASES {
            let s = sphere(radius, sectors, stacks);
            let count = s.vertex_count() as u32;
            assert!(s.indices().iter().all(|&i| i < count));
            assert!(s.line_indices().iter().all(|&i| i < count));
        }
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let s = sphere(1.0, 16, 8);
        for t in s.indices().chunks_exact(3) {
            let (a, b, c) = (position(&s, t[0]), position(&s, t[1]), position(&s, t[2]));
            let face = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(centroid) > 0.0, "triangle {:?} faces inward", t);
        }
    }

    #[test]
    fn first_ring_is_north_pole_and_last_is_south() {
        let s = sphere(2.0, 6, 4);
        let ring = s.sector_count() + 1;
        for j in 0..ring {
            assert!((position(&s, j) - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
            let south = position(&s, s.stack_count() * ring + j);
            assert!((south - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        }
    }

    #[test]
    fn seam_vertices_share_position_not_tex_coord() {
        let s = sphere(1.0, 8, 4);
        let ring = s.sector_count() + 1;
        for i in 0..=s.stack_count() {
            let first = i * ring;
            let last = first + s.sector_count();
            assert!((position(&s, first) - position(&s, last)).length() < 1e-5);
            assert_eq!(s.tex_coords()[first as usize * 2], 0.0);
            assert_eq!(s.tex_coords()[last as usize * 2], 1.0);
            assert_eq!(
                s.tex_coords()[first as usize * 2 + 1],
                s.tex_coords()[last as usize * 2 + 1]
            );
        }
    }

    #[test]
    fn interleaved_round_trips_to_attributes() {
        let s = sphere(1.5, 10, 5);
        let attrs = deinterleave(s.interleaved_vertices()).unwrap();
        assert_eq!(attrs.positions, s.positions());
        assert_eq!(attrs.normals, s.normals());
        assert_eq!(attrs.tex_coords, s.tex_coords());
    }

    #[test]
    fn byte_views_have_expected_sizes() {
        let s = sphere(1.0, 4, 2);
        assert_eq!(s.interleaved_vertices_size(), 15 * 8 * 4);
        assert_eq!(s.interleaved_vertices_bytes().len(), s.interleaved_vertices_size());
        assert_eq!(s.indices_size(), 24 * 4);
        assert_eq!(s.indices_bytes().len(), s.indices_size());
        assert_eq!(s.line_indices_bytes().len(), s.line_indices_size());
    }

    #[test]
    fn non_positive_radius_rejected() {
        for radius in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let err = Sphere::new(WORLD_ORIGIN, radius, 8, 4).unwrap_err();
            assert!(
                matches!(err, GeometryError::InvalidParameter { name: "radius", .. }),
                "radius {} gave {:?}",
                radius,
                err
            );
        }
    }

    #[test]
    fn too_few_sectors_or_stacks_rejected() {
        let err = Sphere::new(WORLD_ORIGIN, 1.0, 2, 4).unwrap_err();
        assert!(matches!(err, GeometryError::InvalidParameter { name: "sector_count", .. }));

        for stacks in [0, 1] {
            let err = Sphere::new(WORLD_ORIGIN, 1.0, 8, stacks).unwrap_err();
            assert!(matches!(err, GeometryError::InvalidParameter { name: "stack_count", .. }));
        }
    }

    #[test]
    fn oversized_mesh_rejected_before_allocation() {
        let params = SphereParams::new(1.0, u32::MAX - 1, u32::MAX - 1);
        assert!(matches!(
            params.validate(),
            Err(GeometryError::InvalidParameter { name: "sector_count", .. })
        ));
    }

    #[test]
    fn identical_parameters_give_bit_identical_buffers() {
        let a = sphere(1.25, 24, 12);
        let b = sphere(1.25, 24, 12);
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.interleaved_vertices()), bits(b.interleaved_vertices()));
        assert_eq!(a.indices(), b.indices());
        assert_eq!(a.line_indices(), b.line_indices());
    }

    #[test]
    fn origin_is_recorded_but_mesh_stays_centered() {
        let offset = Vec3::new(10.0, 0.0, -4.0);
        let moved = Sphere::new(offset, 1.0, 8, 4).unwrap();
        let centered = sphere(1.0, 8, 4);
        assert_eq!(moved.origin(), offset);
        assert_eq!(moved.positions(), centered.positions());
        assert!(moved.model_transform().is_identity());
    }

    #[test]
    fn with_parameters_rebuilds_and_leaves_self_untouched() {
        let s = sphere(1.0, 8, 4);
        let bigger = s.with_radius(2.0).unwrap();
        assert_eq!(s.radius(), 1.0);
        assert_eq!(bigger.radius(), 2.0);
        assert_eq!(bigger.vertex_count(), s.vertex_count());
        assert!((position(&bigger, 0).z - 2.0).abs() < 1e-6);

        let finer = s.with_sector_count(16).unwrap().with_stack_count(6).unwrap();
        assert_eq!(finer.vertex_count(), 7 * 17);
        assert_eq!(finer.indices().len(), finer.params().index_count());

        assert!(s.with_stack_count(1).is_err());
        assert!(s.with_parameters(SphereParams::new(-1.0, 8, 4)).is_err());
    }

    #[test]
    fn default_params_are_valid() {
        let params = SphereParams::default();
        assert!(params.validate().is_ok());
        let s = Sphere::from_params(WORLD_ORIGIN, params).unwrap();
        assert_eq!(s.vertex_count(), 19 * 37);
    }
}
