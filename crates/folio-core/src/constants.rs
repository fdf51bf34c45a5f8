use glam::Vec3;

// Shared scene tuning constants used by the web frontend and host tests.

// Particle field
pub const PARTICLE_COUNT: usize = 1000;
pub const PARTICLE_EXTENT: f32 = 400.0; // each coordinate in [-extent, extent]
pub const PARTICLE_SIZE: f32 = 2.0; // world-space quad edge
pub const PARTICLE_COLOR: [f32; 4] = [0.85, 0.88, 1.0, 0.9];
pub const PARTICLE_CAMERA_Z: f32 = 500.0; // initial camera depth
pub const PARTICLE_SMOOTHING: f32 = 0.05;
pub const PARTICLE_POINTER_ROTATION: f32 = 0.5; // rad at the viewport edge
pub const PARTICLE_AUTO_ROTATION_STEP: f32 = 0.002; // rad per tick on narrow viewports
pub const PARTICLE_SCROLL_DEPTH: f32 = 0.1; // depth units per wheel delta unit
pub const PARTICLE_FOV_DEG: f32 = 75.0;
pub const PARTICLE_ZNEAR: f32 = 1.0;
pub const PARTICLE_ZFAR: f32 = 2000.0;

// Viewports narrower than this auto-rotate instead of following the pointer
pub const NARROW_VIEWPORT_WIDTH: f32 = 640.0;

// World layout
pub const PROJECT_SPACING: f32 = 10.0;
pub const WORLD_MARGIN: f32 = 100.0;
pub const WATER_LEVEL: f32 = -1.0;
pub const WATER_COLOR: [f32; 4] = [0.16, 0.42, 0.66, 0.6];

// Terrain
pub const TERRAIN_DIVISIONS_PER_SPACING: f32 = 4.0;
pub const TERRAIN_NOISE_SCALE: f32 = 0.05;
pub const TERRAIN_HEIGHT_SCALE: f32 = 4.0;
pub const TERRAIN_TRAILING: f32 = 10.0; // land behind the camera before any travel
pub const TERRAIN_LOOKAHEAD: f32 = 100.0; // land ahead of the camera at full travel
pub const SAND_COLOR: [f32; 4] = [0.86, 0.78, 0.55, 1.0];
pub const GRASS_COLOR: [f32; 4] = [0.33, 0.58, 0.28, 1.0];

// World navigation
pub const WORLD_SMOOTHING: f32 = 0.1;
pub const WHEEL_OFFSET_SCALE: f32 = 0.01; // world units per wheel delta unit
pub const CAMERA_ROTATION_SCALE: f32 = 0.1; // rad per unit of normalized pointer
pub const MAX_CAMERA_ROTATION: f32 = 0.05; // hard ceiling, rad

// World camera
pub const WORLD_CAMERA_EYE: Vec3 = Vec3::new(0.0, 3.0, 5.0);
pub const WORLD_FOV_DEG: f32 = 60.0;
pub const WORLD_ZNEAR: f32 = 0.1;
pub const WORLD_ZFAR: f32 = 500.0;

// Sun and lighting
pub const SUN_BASE_POSITION: Vec3 = Vec3::new(-30.0, 25.0, -60.0);
pub const SUN_SIZE: f32 = 6.0;
pub const SUN_COLOR: [f32; 4] = [1.0, 0.86, 0.45, 1.0];
pub const LIGHT_INTENSITY: f32 = 1.2;
pub const AMBIENT_LIGHT: f32 = 0.35;

// Project markers
pub const MARKER_HEIGHT: f32 = 2.0; // beacon height above the path
pub const MARKER_SIZE: f32 = 0.8;
pub const MARKER_PICK_RADIUS: f32 = 1.2; // ray-sphere radius for picking
pub const MARKER_COLOR: [f32; 4] = [0.95, 0.45, 0.3, 1.0];
pub const HOVER_BRIGHTEN: f32 = 1.4;
