/// Arguments for the command line interface.
pub mod args;

/// Default render parameters and raster dimensions.
pub mod constants;

/// Simple helper functions for reading and writing files.
pub mod file_io;

/// Plotting functionality.
pub mod plotting;
