// Operating system access

pub mod host;
pub mod procfs;
pub mod sessions;

pub use host::HostSource;
