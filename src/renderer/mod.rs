pub mod pipeline;

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use pipeline::{ScenePipelines, SceneVertex, create_scene_pipelines, orthographic_projection};

use crate::backend::{Color, DrawBackend, ImageSource, Rect, TextureHandle};

// ── Draw batching ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq)]
enum BatchKind {
    Solid,
    Lines,
    Textured(TextureHandle),
}

/// One run of consecutive draw calls sharing a pipeline (and texture).
/// Batches are flushed strictly in submission order, which is what makes the
/// compositor's layering (terrain under overlay under unit) come out right.
struct Batch {
    kind: BatchKind,
    vertices: Vec<SceneVertex>,
}

/// A decoded image living on the GPU, keyed by its public handle.
struct LoadedTexture {
    bind_group: wgpu::BindGroup,
    // Texture kept alive for the bind group's lifetime.
    _texture: wgpu::Texture,
}

// ── Renderer ──────────────────────────────────────────────────────────────────

/// wgpu-backed implementation of the draw capability set.  Draw calls
/// accumulate into ordered batches; `present_frame` flushes them in one
/// render pass and presents the surface.
pub struct WgpuRenderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipelines: ScenePipelines,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    textures: HashMap<TextureHandle, LoadedTexture>,
    next_handle: u32,
    clear_color: wgpu::Color,
    batches: Vec<Batch>,
}

impl WgpuRenderer {
    pub async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window)).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .expect("no suitable GPU adapter found");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .expect("failed to create device");

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipelines = create_scene_pipelines(&device, format);

        let proj = orthographic_projection(config.width as f32, config.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipelines.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            window,
            surface,
            device,
            queue,
            config,
            pipelines,
            projection_buffer,
            projection_bind_group,
            sampler,
            textures: HashMap::new(),
            next_handle: 1,
            clear_color: wgpu::Color::BLACK,
            batches: Vec::new(),
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let proj = orthographic_projection(new_size.width as f32, new_size.height as f32);
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Append vertices to the trailing batch when the kind matches, otherwise
    /// open a new batch — order across kinds is preserved.
    fn push_vertices(&mut self, kind: BatchKind, vertices: &[SceneVertex]) {
        match self.batches.last_mut() {
            Some(last) if last.kind == kind => last.vertices.extend_from_slice(vertices),
            _ => self.batches.push(Batch { kind, vertices: vertices.to_vec() }),
        }
    }

    /// Flush all batches into one render pass and present.
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_bind_group(0, &self.projection_bind_group, &[]);

            for batch in &self.batches {
                if batch.vertices.is_empty() {
                    continue;
                }
                let vbuf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("scene_vertex_buffer"),
                    contents: bytemuck::cast_slice(&batch.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                match batch.kind {
                    BatchKind::Solid => pass.set_pipeline(&self.pipelines.solid),
                    BatchKind::Lines => pass.set_pipeline(&self.pipelines.lines),
                    BatchKind::Textured(handle) => {
                        let Some(tex) = self.textures.get(&handle) else { continue };
                        pass.set_pipeline(&self.pipelines.textured);
                        pass.set_bind_group(1, &tex.bind_group, &[]);
                    }
                }
                pass.set_vertex_buffer(0, vbuf.slice(..));
                pass.draw(0..batch.vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

// ── DrawBackend impl ──────────────────────────────────────────────────────────

impl DrawBackend for WgpuRenderer {
    fn decode_image(&mut self, source: ImageSource<'_>) -> Option<(TextureHandle, u32, u32)> {
        let decoded = match source {
            ImageSource::Path(path) => image::open(path),
            ImageSource::Bytes(bytes) => image::load_from_memory(bytes),
        };
        let img = match decoded {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                eprintln!("[texture] decode failed: {e}");
                return None;
            }
        };
        let (width, height) = img.dimensions();

        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some("scene_texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &img,
        );

        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_texture_bg"),
            layout: &self.pipelines.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.textures.insert(handle, LoadedTexture { bind_group, _texture: texture });
        Some((handle, width, height))
    }

    fn release_image(&mut self, handle: TextureHandle) {
        self.textures.remove(&handle);
    }

    fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.to_f32();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
        self.batches.clear();
    }

    fn draw_filled_polygon(&mut self, points: &[Vec2], fill: Color) {
        if points.len() < 3 {
            return;
        }
        let color = fill.to_f32();
        let uv = [0.0, 0.0];
        // Triangle fan around the first point.
        let mut verts = Vec::with_capacity((points.len() - 2) * 3);
        for i in 1..points.len() - 1 {
            for p in [points[0], points[i], points[i + 1]] {
                verts.push(SceneVertex { position: [p.x, p.y], uv, color });
            }
        }
        self.push_vertices(BatchKind::Solid, &verts);
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Color) {
        let color = color.to_f32();
        let uv = [0.0, 0.0];
        let verts = [
            SceneVertex { position: [p0.x, p0.y], uv, color },
            SceneVertex { position: [p1.x, p1.y], uv, color },
        ];
        self.push_vertices(BatchKind::Lines, &verts);
    }

    fn draw_textured_rect(&mut self, texture: TextureHandle, dest: Rect) {
        let color = Color::WHITE.to_f32();
        let (x0, y0) = (dest.x, dest.y);
        let (x1, y1) = (dest.x + dest.w, dest.y + dest.h);
        let tl = SceneVertex { position: [x0, y0], uv: [0.0, 0.0], color };
        let tr = SceneVertex { position: [x1, y0], uv: [1.0, 0.0], color };
        let bl = SceneVertex { position: [x0, y1], uv: [0.0, 1.0], color };
        let br = SceneVertex { position: [x1, y1], uv: [1.0, 1.0], color };
        self.push_vertices(BatchKind::Textured(texture), &[tl, bl, tr, tr, bl, br]);
    }

    fn present_frame(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let size = self.window.inner_size();
                self.resize(size);
            }
            Err(e) => eprintln!("render error: {e}"),
        }
        self.batches.clear();
    }
}
