//! Render pass setup and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes the single pass the viewer needs and
//! [`FrameEncoder`] owns the encoder and surface texture for one frame.

/// Dark grey background.
pub const DEFAULT_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

#[derive(Debug)]
struct DepthAttachment {
    view: wgpu::TextureView,
    clear_value: f32,
}

/// Fluent description of a render pass that clears color and, optionally, depth.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth: Option<DepthAttachment>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    pub fn new() -> Self {
        Self {
            clear_color: DEFAULT_CLEAR_COLOR,
            depth: None,
            label: None,
        }
    }

    /// Set the clear color from an RGB triple.
    pub fn clear_rgb(mut self, rgb: [f32; 3]) -> Self {
        self.clear_color = wgpu::Color {
            r: f64::from(rgb[0]),
            g: f64::from(rgb[1]),
            b: f64::from(rgb[2]),
            a: 1.0,
        };
        self
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer cleared to `clear_value` each frame.
    pub fn depth(mut self, view: wgpu::TextureView, clear_value: f32) -> Self {
        self.depth = Some(DepthAttachment { view, clear_value });
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &'encoder self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Command encoder plus surface texture for one frame.
///
/// Call [`submit`](Self::submit) to finish and present. Dropping an
/// unsubmitted encoder submits it with a warning.
pub struct FrameEncoder<'q> {
    encoder: Option<wgpu::CommandEncoder>,
    queue: &'q wgpu::Queue,
    surface_texture: Option<wgpu::SurfaceTexture>,
    surface_view: wgpu::TextureView,
}

impl<'q> FrameEncoder<'q> {
    pub fn new(
        device: &wgpu::Device,
        queue: &'q wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            queue,
            surface_texture: Some(surface_texture),
            surface_view,
        }
    }

    /// Begin a render pass into the surface texture. `None` once submitted.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> Option<wgpu::RenderPass<'a>> {
        let encoder = self.encoder.as_mut()?;
        Some(builder.create_render_pass(encoder, &self.surface_view))
    }

    /// Submit the command buffer and present the surface texture.
    pub fn submit(mut self) {
        self.finish();
    }

    fn finish(&mut self) -> bool {
        let (Some(encoder), Some(surface_texture)) =
            (self.encoder.take(), self.surface_texture.take())
        else {
            return false;
        };
        self.queue.submit([encoder.finish()]);
        surface_texture.present();
        true
    }
}

impl Drop for FrameEncoder<'_> {
    fn drop(&mut self) {
        if self.encoder.is_some() {
            log::warn!("FrameEncoder dropped without explicit submit(), auto-submitting");
            self.finish();
        }
    }
}
