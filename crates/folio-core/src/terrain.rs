//! Static height-and-color mesh for the project world.
//!
//! The grid lies in the XZ plane, `world_size` wide and centred on the path.
//! Along the path it runs from a little behind the camera to well past the
//! last marker, so the ground stays in view over the whole travel range.
//! Plane coordinates `(x, y)` map to world `(x, height, -y)`, matching a flat
//! plane laid down by a -90° rotation about X.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::constants::{
    GRASS_COLOR, PROJECT_SPACING, SAND_COLOR, TERRAIN_DIVISIONS_PER_SPACING, TERRAIN_HEIGHT_SCALE,
    TERRAIN_LOOKAHEAD, TERRAIN_NOISE_SCALE, TERRAIN_TRAILING, WATER_COLOR, WATER_LEVEL,
};
use crate::error::{CoreError, Result};
use crate::noise_source::NoiseSource;

/// GPU vertex layout shared by the terrain and the water plane.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Sand,
    Grass,
}

impl Surface {
    /// Strict threshold: a vertex exactly at the water level is grass.
    #[inline]
    pub fn classify(height: f32, water_level: f32) -> Self {
        if height < water_level {
            Surface::Sand
        } else {
            Surface::Grass
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Surface::Sand => SAND_COLOR,
            Surface::Grass => GRASS_COLOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainVertex {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub surface: Surface,
}

impl TerrainVertex {
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.x, self.height, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    /// Width across the path.
    pub world_size: f32,
    /// Cells across the path.
    pub divisions: u32,
    /// Plane-y extent along the path; negative values lie behind the start.
    pub path_start: f32,
    pub path_end: f32,
    pub noise_scale: f32,
    pub height_scale: f32,
    pub water_level: f32,
}

impl TerrainParams {
    /// Standard parameters for a world of the given size.
    pub fn for_world(world_size: f32) -> Self {
        Self {
            world_size,
            divisions: divisions_for(world_size),
            path_start: -TERRAIN_TRAILING,
            path_end: world_size + TERRAIN_LOOKAHEAD,
            noise_scale: TERRAIN_NOISE_SCALE,
            height_scale: TERRAIN_HEIGHT_SCALE,
            water_level: WATER_LEVEL,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.world_size.is_finite() && self.world_size > 0.0) {
            return Err(CoreError::InvalidTerrain("world size must be positive"));
        }
        if self.divisions == 0 {
            return Err(CoreError::InvalidTerrain("divisions must be at least 1"));
        }
        if !(self.path_start.is_finite() && self.path_end.is_finite())
            || self.path_end <= self.path_start
        {
            return Err(CoreError::InvalidTerrain("path extent must be non-empty"));
        }
        if !self.noise_scale.is_finite() || !self.height_scale.is_finite() {
            return Err(CoreError::InvalidTerrain("scales must be finite"));
        }
        Ok(())
    }

    /// Cell rows along the path, sized to keep cells close to square.
    pub fn rows(&self) -> u32 {
        let cell = self.world_size / self.divisions.max(1) as f32;
        ((self.path_end - self.path_start) / cell).round().max(1.0) as u32
    }
}

/// Grid resolution tied to the project spacing so cell size stays constant.
#[inline]
pub fn divisions_for(world_size: f32) -> u32 {
    ((world_size / PROJECT_SPACING) * TERRAIN_DIVISIONS_PER_SPACING)
        .round()
        .max(1.0) as u32
}

/// Immutable terrain mesh: per-vertex records plus GPU-ready arrays.
pub struct TerrainMesh {
    pub params: TerrainParams,
    pub vertices: Vec<TerrainVertex>,
    pub mesh: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn generate(params: TerrainParams, noise: &impl NoiseSource) -> Result<Self> {
        params.validate()?;
        let cols = params.divisions as usize;
        let rows = params.rows() as usize;
        let row_len = cols + 1;
        let half = params.world_size / 2.0;
        let cell = params.world_size / cols as f32;
        let row_step = (params.path_end - params.path_start) / rows as f32;

        // row 0 is the far edge
        let mut vertices = Vec::with_capacity(row_len * (rows + 1));
        for row in 0..=rows {
            for col in 0..=cols {
                let x = -half + col as f32 * cell;
                let y = params.path_end - row as f32 * row_step;
                let height = noise.sample(x * params.noise_scale, y * params.noise_scale)
                    * params.height_scale;
                vertices.push(TerrainVertex {
                    x,
                    y,
                    height,
                    surface: Surface::classify(height, params.water_level),
                });
            }
        }

        let mut indices = Vec::with_capacity(cols * rows * 6);
        for row in 0..rows {
            for col in 0..cols {
                let top_left = (row * row_len + col) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((row + 1) * row_len + col) as u32;
                let bottom_right = bottom_left + 1;
                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        let positions: Vec<Vec3> = vertices.iter().map(TerrainVertex::world_position).collect();
        let normals = vertex_normals(&positions, &indices);
        let mesh = vertices
            .iter()
            .zip(positions.iter().zip(normals.iter()))
            .map(|(v, (p, n))| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: v.surface.color(),
            })
            .collect();

        log::debug!(
            "[terrain] world={} grid={}x{} vertices={}",
            params.world_size,
            cols,
            rows,
            vertices.len()
        );
        Ok(Self {
            params,
            vertices,
            mesh,
            indices,
        })
    }

    pub fn row_len(&self) -> usize {
        self.params.divisions as usize + 1
    }
}

/// Area-weighted vertex normals: the unnormalized face cross product is summed
/// into each corner, then normalized. Isolated vertices point up.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        acc[i0] += face;
        acc[i1] += face;
        acc[i2] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

/// Flat translucent quad at the water level under the terrain footprint.
pub fn water_plane(params: &TerrainParams) -> (Vec<MeshVertex>, Vec<u32>) {
    let h = params.world_size / 2.0;
    let (far, near) = (-params.path_end, -params.path_start);
    let corner = |x: f32, z: f32| MeshVertex {
        position: [x, params.water_level, z],
        normal: [0.0, 1.0, 0.0],
        color: WATER_COLOR,
    };
    let vertices = vec![
        corner(-h, far),
        corner(h, far),
        corner(-h, near),
        corner(h, near),
    ];
    (vertices, vec![0, 2, 1, 1, 2, 3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_source::SimplexNoise;

    #[test]
    fn flat_field_has_up_normals_and_grass() {
        let params = TerrainParams::for_world(100.0);
        let mesh = TerrainMesh::generate(params, &|_: f32, _: f32| 0.0_f32).unwrap();
        for (v, m) in mesh.vertices.iter().zip(&mesh.mesh) {
            assert_eq!(v.surface, Surface::Grass);
            assert!((Vec3::from_array(m.normal) - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn grid_shape_matches_divisions() {
        let params = TerrainParams::for_world(130.0);
        assert_eq!(params.divisions, 52);
        // 240 units along the path at 2.5 per cell
        assert_eq!(params.rows(), 96);
        let mesh = TerrainMesh::generate(params, &SimplexNoise::new(3)).unwrap();
        assert_eq!(mesh.vertices.len(), 53 * 97);
        assert_eq!(mesh.indices.len(), 52 * 96 * 6);
        let first = mesh.vertices[0];
        let last = mesh.vertices[mesh.vertices.len() - 1];
        assert!((first.x + 65.0).abs() < 1e-4 && (first.y - 230.0).abs() < 1e-3);
        assert!((last.x - 65.0).abs() < 1e-4 && (last.y + 10.0).abs() < 1e-3);
    }

    #[test]
    fn height_is_scaled_noise() {
        let params = TerrainParams::for_world(100.0);
        let noise = SimplexNoise::new(11);
        let mesh = TerrainMesh::generate(params, &noise).unwrap();
        for v in mesh.vertices.iter().step_by(37) {
            let expected = noise.sample(v.x * params.noise_scale, v.y * params.noise_scale)
                * params.height_scale;
            assert_eq!(v.height, expected);
        }
    }

    #[test]
    fn threshold_boundary_is_grass() {
        assert_eq!(Surface::classify(WATER_LEVEL, WATER_LEVEL), Surface::Grass);
        assert_eq!(
            Surface::classify(WATER_LEVEL - f32::EPSILON * 4.0, WATER_LEVEL),
            Surface::Sand
        );
    }

    #[test]
    fn sloped_plane_normal_tilts_against_slope() {
        // height rises with x, so normals lean toward -x
        let params = TerrainParams {
            world_size: 10.0,
            divisions: 4,
            path_start: -5.0,
            path_end: 5.0,
            noise_scale: 1.0,
            height_scale: 1.0,
            water_level: WATER_LEVEL,
        };
        let mesh = TerrainMesh::generate(params, &|x: f32, _: f32| x * 0.5).unwrap();
        let centre = mesh.row_len() * 2 + 2;
        let n = Vec3::from_array(mesh.mesh[centre].normal);
        assert!(n.x < 0.0 && n.y > 0.0 && n.z.abs() < 1e-5);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = TerrainParams::for_world(100.0);
        params.divisions = 0;
        assert!(TerrainMesh::generate(params, &|_: f32, _: f32| 0.0_f32).is_err());
        let params = TerrainParams::for_world(-5.0);
        assert!(params.validate().is_err());
        let mut params = TerrainParams::for_world(100.0);
        params.path_end = params.path_start;
        assert!(params.validate().is_err());
    }

    #[test]
    fn water_plane_matches_terrain_footprint() {
        let (v, i) = water_plane(&TerrainParams::for_world(130.0));
        assert_eq!(v.len(), 4);
        assert_eq!(i.len(), 6);
        assert!(v.iter().all(|m| m.position[1] == WATER_LEVEL));
        assert!(v.iter().all(|m| m.position[0].abs() == 65.0));
        let z: Vec<f32> = v.iter().map(|m| m.position[2]).collect();
        assert_eq!(z, vec![-230.0, -230.0, 10.0, 10.0]);
    }
}
