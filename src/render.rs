use crate::constants::{CLEAR_COLOR, MAX_INSTANCES, STAR_DENSITY};
use glam::Vec3;
use glim_core::camera::Camera;
use glim_core::scene::SceneInstance;
use web_sys as web;

mod helpers;
mod instances;
mod stars;

use instances::{create_instance_resources, InstanceData, InstanceResources, SceneUniforms};
use stars::{create_stars_resources, StarsResources, StarsUniforms};

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");

const AMBIENT: f32 = 0.2;
// Key light from the upper right, roughly where the scene's point light sits
const LIGHT_DIR: Vec3 = Vec3::new(0.5, 0.6, 0.62);

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: InstanceResources,
    stars: StarsResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
    packed: Vec<InstanceData>,
    order: Vec<usize>,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene = create_instance_resources(&device, format, MAX_INSTANCES);
        let stars = create_stars_resources(&device, format);
        log::info!("[gpu] ready {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            stars,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            time_accum: 0.0,
            packed: Vec::with_capacity(MAX_INSTANCES),
            order: Vec::with_capacity(MAX_INSTANCES),
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw the starfield, then every instance back to front.
    pub fn render(
        &mut self,
        dt_sec: f32,
        camera: &Camera,
        instances: &[SceneInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_uniforms(camera);
        let count = self.pack_instances(camera.eye, instances);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.stars.pipeline);
            rpass.set_bind_group(0, &self.stars.bind_group, &[]);
            rpass.draw(0..3, 0..1);

            if count > 0 {
                rpass.set_pipeline(&self.scene.pipeline);
                rpass.set_bind_group(0, &self.scene.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.scene.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.scene.instance_vb.slice(..));
                rpass.draw(0..6, 0..count as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn write_uniforms(&self, camera: &Camera) {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        // Rows of the view rotation are the camera axes in world space
        let right = view.row(0).truncate().normalize_or_zero();
        let up = view.row(1).truncate().normalize_or_zero();
        let light = LIGHT_DIR.normalize();
        // Light is given in camera space so impostor normals can use it directly
        let light_cam = Vec3::new(
            light.dot(right),
            light.dot(up),
            light.dot(view.row(2).truncate().normalize_or_zero()),
        );
        let u = SceneUniforms {
            view_proj: (proj * view).to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            light_dir: light_cam.extend(0.0).to_array(),
            params: [self.time_accum, AMBIENT, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.scene.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut rot = view;
        rot.w_axis = glam::Vec4::W;
        let s = StarsUniforms {
            inv_view_proj: (proj * rot).inverse().to_cols_array_2d(),
            resolution: [self.width as f32, self.height as f32],
            time: self.time_accum,
            density: STAR_DENSITY,
        };
        self.queue
            .write_buffer(&self.stars.uniform_buffer, 0, bytemuck::bytes_of(&s));
    }

    /// Sort far-to-near for alpha blending and upload. Returns the count drawn.
    fn pack_instances(&mut self, eye: Vec3, instances: &[SceneInstance]) -> usize {
        let n = instances.len().min(self.scene.capacity);
        if instances.len() > n {
            log::warn!("[gpu] dropping {} instances over capacity", instances.len() - n);
        }
        self.order.clear();
        self.order.extend(0..n);
        self.order.sort_by(|&a, &b| {
            let da = instances[a].position.distance_squared(eye);
            let db = instances[b].position.distance_squared(eye);
            db.total_cmp(&da)
        });
        self.packed.clear();
        self.packed
            .extend(self.order.iter().map(|&i| InstanceData::from(&instances[i])));
        if n > 0 {
            self.queue.write_buffer(
                &self.scene.instance_vb,
                0,
                bytemuck::cast_slice(&self.packed),
            );
        }
        n
    }
}
