/// Initialization parameters for the GPU layer.
///
/// This is the rendering-context "version requirement": the limits and
/// features here are the minimum the adapter must provide, or startup fails.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO waits for vblank.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference; falls back to a supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Minimum limits the adapter must meet. Resolution limits are raised to
    /// the adapter's own at device creation, see [`GpuInit::device_limits`].
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            // Downlevel limits keep GL-class adapters usable.
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Limits to request from `adapter`: `required_limits` with texture
    /// dimension limits raised to what the adapter supports, so large
    /// windows can still be configured.
    pub fn device_limits(&self, adapter: wgpu::Limits) -> wgpu::Limits {
        self.required_limits.clone().using_resolution(adapter)
    }
}
