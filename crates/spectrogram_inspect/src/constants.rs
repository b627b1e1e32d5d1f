// Default render parameters. All of them are overridable from the cli.
pub const DEFAULT_WINDOW_LENGTHS: [usize; 5] = [256, 512, 1024, 2048, 4096];
pub const DEFAULT_OVERLAP_RATIO: f64 = 0.5;
pub const DEFAULT_EPSILON: f64 = 1e-10;

// Output raster dimensions. A 12x6 inch figure at 200 dots per inch.
pub const RASTER_WIDTH: u32 = 2400;
pub const RASTER_HEIGHT: u32 = 1200;
