// Runtime parameters
pub const NUM_THREADS: usize = 1;
pub const CANVAS_WIDTH: usize = 1920;
pub const CANVAS_HEIGHT: usize = 1080;
pub const OUT_FILE: &str = "image.png";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Offset along the surface normal for secondary rays, so a surface does not
// shadow or reflect itself.
pub const SHADOW_BIAS: f64 = 1e-5;

// Maximum recursion depths
pub const REFLECTION_RECURSION_DEPTH: usize = 3;
