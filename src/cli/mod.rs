//! CLI entrypoint module structure.

pub mod args;
pub mod profile;

pub use args::LaunchProfileArgs;
pub use profile::{
    build_launch_args, resolve_config_path, resolve_mode, LaunchProfile, OperatingMode,
    TransportMode,
};
