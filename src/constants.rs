// Host-side presentation constants. Scene tuning lives in `folio_core`.

// Clear colors (linear RGB)
pub const PARTICLE_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.004,
    g: 0.005,
    b: 0.012,
    a: 1.0,
};
pub const WORLD_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.52,
    g: 0.72,
    b: 0.92,
    a: 1.0,
};

// Light color for the world's point light
pub const SUN_LIGHT_COLOR: [f32; 3] = [1.0, 0.95, 0.85];

// Marker label overlay
pub const LABEL_CLASS: &str = "folio-marker-label";
pub const LABEL_STYLE: &str = "position:absolute;left:0;top:0;pointer-events:none;\
     white-space:nowrap;font:600 13px system-ui,sans-serif;color:#fff;\
     text-shadow:0 1px 3px rgba(0,0,0,.6);display:none";
pub const LABEL_LIFT: f32 = 0.9; // world units above the beacon centre
