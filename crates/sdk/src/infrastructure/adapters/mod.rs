//! Platform adapters.

pub mod debug;
pub mod descriptor;
pub mod hosted;
pub mod registry;

pub use debug::DebugAdapter;
pub use descriptor::{descriptor, PlatformDescriptor};
pub use hosted::HostedAdapter;
pub use registry::{create_adapter, AdapterDeps};
