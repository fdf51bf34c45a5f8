//! Project world: static geometry assembled once per activation plus the small
//! per-tick state that moves the dynamic group and the camera.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::{ray_sphere, Camera};
use crate::constants::{
    CAMERA_ROTATION_SCALE, MARKER_PICK_RADIUS, MAX_CAMERA_ROTATION, SUN_BASE_POSITION,
    WORLD_CAMERA_EYE, WORLD_FOV_DEG, WORLD_ZFAR, WORLD_ZNEAR,
};
use crate::error::Result;
use crate::input::{InputEvent, InputTracker, Viewport};
use crate::navigation::NavigationController;
use crate::noise_source::NoiseSource;
use crate::projects::{layout_markers, world_size, Project, ProjectMarker};
use crate::terrain::{water_plane, MeshVertex, TerrainMesh, TerrainParams};

/// Pointer-driven camera orientation, hard-clamped to the rotation ceiling.
///
/// Pointer up pitches up; pointer right yaws right.
#[inline]
pub fn clamped_camera_rotation(pointer: Vec2) -> Vec2 {
    Vec2::new(
        (pointer.y * CAMERA_ROTATION_SCALE).clamp(-MAX_CAMERA_ROTATION, MAX_CAMERA_ROTATION),
        (-pointer.x * CAMERA_ROTATION_SCALE).clamp(-MAX_CAMERA_ROTATION, MAX_CAMERA_ROTATION),
    )
}

/// Geometry that never changes after activation.
pub struct WorldGeometry {
    pub world_size: f32,
    pub terrain: TerrainMesh,
    pub water_vertices: Vec<MeshVertex>,
    pub water_indices: Vec<u32>,
    pub markers: Vec<ProjectMarker>,
}

impl WorldGeometry {
    pub fn build(projects: &[Project], noise: &impl NoiseSource) -> Result<Self> {
        let world_size = world_size(projects.len());
        let params = TerrainParams::for_world(world_size);
        let terrain = TerrainMesh::generate(params, noise)?;
        let (water_vertices, water_indices) = water_plane(&params);
        let markers = layout_markers(projects);
        log::info!(
            "[world] size={} markers={} terrain_vertices={}",
            world_size,
            markers.len(),
            terrain.vertices.len()
        );
        Ok(Self {
            world_size,
            terrain,
            water_vertices,
            water_indices,
            markers,
        })
    }
}

/// Per-tick world state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldState {
    pub navigation: NavigationController,
    pub camera_rotation: Vec2,
}

impl WorldState {
    pub fn new(world_size: f32) -> Result<Self> {
        Ok(Self {
            navigation: NavigationController::new(world_size)?,
            camera_rotation: Vec2::ZERO,
        })
    }

    pub fn tick(self, input: &InputTracker) -> Self {
        let mut navigation = self.navigation;
        navigation.tick();
        Self {
            navigation,
            camera_rotation: clamped_camera_rotation(input.pointer()),
        }
    }
}

/// Everything the renderer needs for one world frame.
#[derive(Clone, Debug)]
pub struct WorldFrame {
    pub group: Mat4,
    pub camera: Camera,
    pub sun_position: Vec3,
    pub hovered: Option<usize>,
}

/// Boundary effects requested by input handling.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldAction {
    OpenLink(String),
}

pub struct WorldScene {
    geometry: WorldGeometry,
    state: WorldState,
    input: InputTracker,
    hovered: Option<usize>,
}

impl WorldScene {
    pub fn new(geometry: WorldGeometry, viewport: Viewport) -> Result<Self> {
        let state = WorldState::new(geometry.world_size)?;
        Ok(Self {
            geometry,
            state,
            input: InputTracker::new(viewport),
            hovered: None,
        })
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<WorldAction> {
        self.input.record(event);
        match event {
            InputEvent::Wheel { delta_y } => {
                self.state.navigation.on_wheel(delta_y);
                None
            }
            InputEvent::PointerMove { client_x, client_y } => {
                self.hovered = self.pick_marker(client_x, client_y);
                None
            }
            InputEvent::Click { client_x, client_y } => self
                .pick_marker(client_x, client_y)
                .map(|i| WorldAction::OpenLink(self.geometry.markers[i].link.clone())),
        }
    }

    /// Advance one frame. Travel or camera movement under a still pointer
    /// changes what it points at, so hover is picked again from the last
    /// pointer sample.
    pub fn tick(&mut self) {
        let next = self.state.tick(&self.input);
        let moved = next != self.state;
        self.state = next;
        if moved {
            self.hovered = self
                .input
                .client_position()
                .and_then(|p| self.pick_marker(p.x, p.y));
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            WORLD_CAMERA_EYE,
            self.state.camera_rotation,
            self.input.viewport().aspect(),
            WORLD_FOV_DEG.to_radians(),
            WORLD_ZNEAR,
            WORLD_ZFAR,
        )
    }

    pub fn frame(&self) -> WorldFrame {
        WorldFrame {
            group: Mat4::from_translation(self.state.navigation.group_translation()),
            camera: self.camera(),
            sun_position: SUN_BASE_POSITION + self.state.navigation.sun_offset(),
            hovered: self.hovered,
        }
    }

    /// Marker position after the group translation.
    #[inline]
    pub fn marker_world_position(&self, index: usize) -> Option<Vec3> {
        self.geometry
            .markers
            .get(index)
            .map(|m| m.world_position + self.state.navigation.group_translation())
    }

    /// Nearest marker under a client-space point.
    pub fn pick_marker(&self, client_x: f32, client_y: f32) -> Option<usize> {
        let viewport = self.input.viewport();
        let (ro, rd) =
            self.camera()
                .screen_to_world_ray(client_x, client_y, viewport.width, viewport.height);
        let mut best = None::<(usize, f32)>;
        for i in 0..self.geometry.markers.len() {
            let Some(center) = self.marker_world_position(i) else {
                continue;
            };
            if let Some(t) = ray_sphere(ro, rd, center, MARKER_PICK_RADIUS) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    #[inline]
    pub fn geometry(&self) -> &WorldGeometry {
        &self.geometry
    }

    #[inline]
    pub fn state(&self) -> WorldState {
        self.state
    }

    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.input.viewport()
    }
}
