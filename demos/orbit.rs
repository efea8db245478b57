//! Windowed demo: a plane, a cube and a sphere under a slowly orbiting
//! camera. Run with `cargo run --example orbit`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use cgmath::{Point3, Vector3};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use bothy::gfx::backend::{FrameEncoder, GpuMesh, GpuTechnique, TechniqueConfig};
use bothy::gfx::{geometry, Model, OrbitCamera, Renderer};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        window: None,
        gpu: None,
        start: Instant::now(),
    };
    event_loop.run_app(&mut app).context("event loop failed")?;
    Ok(())
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    start: Instant,
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    renderer: Renderer<FrameEncoder>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title("bothy orbit demo")
                    .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
            )
            .expect("failed to create window");
        let window = Arc::new(window);

        let gpu = pollster::block_on(Gpu::new(window.clone())).expect("failed to set up GPU");
        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => gpu.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let elapsed = self.start.elapsed().as_secs_f32();
                if let Err(err) = gpu.render(elapsed) {
                    log::error!("frame failed: {err}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self> {
        let (width, height) = window.inner_size().into();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("no suitable GPU adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .context("failed to create device")?;

        let config = surface
            .get_default_config(&adapter, width, height)
            .context("surface is not supported by the adapter")?;
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let camera = OrbitCamera::new(
            12.0,
            0.5,
            0.0,
            Point3::new(0.0, 0.0, 0.5),
            width as f32 / height.max(1) as f32,
        );
        let mut renderer = Renderer::new(camera);
        build_scene(&mut renderer, &device, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
        self.renderer.camera.set_aspect(width, height);
    }

    fn render(&mut self, elapsed: f32) -> Result<()> {
        self.renderer.camera.yaw = elapsed * 0.3;

        let frame = self
            .surface
            .get_current_texture()
            .context("failed to acquire frame")?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });
        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.08,
                            g: 0.09,
                            b: 0.11,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut sink = FrameEncoder::new(pass, &self.queue);
            self.renderer.render_frame(elapsed, &mut sink);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn build_scene(
    renderer: &mut Renderer<FrameEncoder>,
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) {
    let technique = GpuTechnique::new(
        device,
        &TechniqueConfig::default()
            .with_label("forward")
            .with_color_format(surface_format)
            .with_depth_format(Some(DEPTH_FORMAT)),
    );
    let assets = renderer.assets_mut();
    let effect = assets.insert_technique(technique);

    let ground = assets.insert_mesh(GpuMesh::new(device, &geometry::plane(16.0, 16.0, 8), "plane"));
    let cube = assets.insert_mesh(GpuMesh::new(device, &geometry::cube(1.6), "cube"));
    let sphere = assets.insert_mesh(GpuMesh::new(device, &geometry::uv_sphere(1.0, 32, 16), "sphere"));
    let gizmo = assets.insert_mesh(GpuMesh::new(device, &geometry::axes(2.5, 0.06), "axes"));

    let mut floor = Model::new();
    floor.set_mesh(Some(ground));
    floor.set_effect(Some(effect));
    renderer.add_drawable(floor);

    let mut axis_marker = Model::new();
    axis_marker.set_mesh(Some(gizmo));
    axis_marker.set_effect(Some(effect));
    renderer.add_drawable(axis_marker);

    let mut box_model = Model::new();
    box_model.set_mesh(Some(cube));
    box_model.set_effect(Some(effect));
    box_model.set_position(Vector3::new(-2.0, 0.0, 0.8));
    box_model.set_rotation(Vector3::new(0.0, 0.0, 30.0));
    renderer.add_drawable(box_model);

    let mut ball = Model::new();
    ball.set_mesh(Some(sphere));
    ball.set_effect(Some(effect));
    ball.set_position(Vector3::new(2.0, 0.0, 1.0));
    renderer.add_drawable(ball);
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
