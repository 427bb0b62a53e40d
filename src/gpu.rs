use once_cell::sync::OnceCell;

use crate::error::{MirrorError, MirrorResult};

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter: wgpu::Adapter,
}

static CTX: OnceCell<GpuContext> = OnceCell::new();

pub fn ctx() -> &'static GpuContext {
    CTX.get_or_init(|| GpuContext::try_new().expect("No suitable GPU adapter"))
}

impl GpuContext {
    /// Fallible context creation for embedders that propagate errors.
    pub fn try_new() -> MirrorResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| MirrorError::device("no suitable GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                label: Some("mirror3d-device"),
            },
            None,
        ))
        .map_err(MirrorError::device)?;

        Ok(GpuContext {
            device,
            queue,
            adapter,
        })
    }
}
