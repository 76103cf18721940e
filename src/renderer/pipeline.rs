//! WebGPU render pipeline setup
//!
//! Consumes a frame's draw commands, tessellates them, maps window pixels to
//! normalized device coordinates on the CPU, and draws one triangle list.

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::draw::DrawCommand;
use super::shapes::tessellate;
use super::vertex::{Vertex, colors};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Map a window-pixel point (origin top-left, Y down) to NDC for a surface
/// of the given size, letterboxing to keep the window's aspect ratio.
pub fn window_to_ndc(p: Vec2, surface: (u32, u32)) -> Vec2 {
    let (w, h) = (surface.0.max(1) as f32, surface.1.max(1) as f32);
    let scale = (w / WINDOW_WIDTH).min(h / WINDOW_HEIGHT);

    let centered = p - Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT) / 2.0;
    Vec2::new(centered.x * scale * 2.0 / w, -centered.y * scale * 2.0 / h)
}

/// Inverse of the letterbox in `window_to_ndc`: map a point on a surface of
/// the given size (origin top-left, Y down) back to window pixels.
pub fn surface_to_window(p: Vec2, surface: (u32, u32)) -> Vec2 {
    let size = Vec2::new(surface.0.max(1) as f32, surface.1.max(1) as f32);
    let scale = (size.x / WINDOW_WIDTH).min(size.y / WINDOW_HEIGHT);

    (p - size / 2.0) / scale + Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT) / 2.0
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("arkanoid-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface config: {}x{}, present mode: {:?}",
            width,
            height,
            config.present_mode
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    // Flat opaque colors only
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Replaced every frame
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, colors::BACKGROUND)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
        })
    }

    /// Reconfigure for a new surface size; zero-sized surfaces are ignored
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            log::debug!("Surface resized to {}x{}", new_width, new_height);
        }
    }

    /// Reconfigure the surface at its current size (after `Lost`/`Outdated`)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Tessellate, upload, and draw one frame
    pub fn render(&mut self, commands: &[DrawCommand]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = tessellate(commands)
            .iter()
            .map(|v| {
                let p = window_to_ndc(Vec2::from(v.position), self.size);
                Vertex::new(p.x, p.y, v.color)
            })
            .collect();

        self.vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vertex_buffer"),
                contents: bytemuck::cast_slice(&ndc_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_window_corners_fill_matching_surface() {
        let size = (1280, 720);
        assert!(close(window_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0)));
        assert!(close(window_to_ndc(Vec2::new(1280.0, 720.0), size), Vec2::new(1.0, -1.0)));
        assert!(close(window_to_ndc(Vec2::new(640.0, 360.0), size), Vec2::ZERO));
    }

    #[test]
    fn test_wide_surface_letterboxes() {
        // Twice as wide: height fills, width uses the middle half
        let size = (2560, 720);
        assert!(close(window_to_ndc(Vec2::ZERO, size), Vec2::new(-0.5, 1.0)));
        assert!(close(window_to_ndc(Vec2::new(1280.0, 720.0), size), Vec2::new(0.5, -1.0)));
    }

    #[test]
    fn test_scaled_surface() {
        let size = (640, 360);
        assert!(close(window_to_ndc(Vec2::new(1280.0, 0.0), size), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_surface_to_window_undoes_letterbox() {
        // Pillarboxed: the middle half of a 2560 wide surface is the window
        let size = (2560, 720);
        assert!(close(surface_to_window(Vec2::new(640.0, 0.0), size), Vec2::ZERO));
        assert!(close(
            surface_to_window(Vec2::new(1280.0, 360.0), size),
            Vec2::new(640.0, 360.0)
        ));
        // Left of the playfield maps to negative window X
        assert!(surface_to_window(Vec2::ZERO, size).x < 0.0);

        let size = (640, 360);
        assert!(close(
            surface_to_window(Vec2::new(320.0, 90.0), size),
            Vec2::new(640.0, 180.0)
        ));
    }

    #[test]
    fn test_surface_to_window_inverts_window_to_ndc() {
        let size = (1000, 1000);
        let p = Vec2::new(300.0, 500.0);
        let ndc = window_to_ndc(p, size);
        let on_surface = Vec2::new((ndc.x + 1.0) * 500.0, (1.0 - ndc.y) * 500.0);
        assert!((surface_to_window(on_surface, size) - p).length() < 1e-3);
    }
}
