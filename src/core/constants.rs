/// Directory inside the packaged application archive that gets repackaged.
pub const RESOURCE_DIR: &str = "resources/app";
pub const DEFAULT_TARGET_EXTENSION: &str = "sb3";
/// Name prefix of the per-conversion scratch directory created in the output directory.
pub const SCRATCH_PREFIX: &str = ".sb3_scratch-";
