//! GPU device and surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates and configures the Surface (swapchain)
//! - acquires frames and hands out an encoder + view for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
