//! Drawing the obamoid.
//!
//! [`Renderer`] owns every GPU resource that outlives a frame: the mesh
//! buffers, the shader program, the scene texture and the uniform buffer the
//! three matrices are written to. A frame is one render pass that clears
//! colour and depth, uploads the current [`Transforms`] and issues a single
//! indexed draw.

use std::iter;

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{geometry::Geometry, texture::SceneTexture},
    error::ShaderError,
    pipelines::shader::{ShaderProgram, TEXTURE_GROUP, TRANSFORM_GROUP},
    resources::texture::{MaybeSend, TextureLoader, TextureResult},
    scene::Scene,
    transform::Transforms,
};

#[derive(Debug)]
pub struct Renderer {
    pub geometry: Geometry,
    pub program: ShaderProgram,
    pub texture: SceneTexture,
    uniform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        color_format: wgpu::TextureFormat,
        transforms: &Transforms,
    ) -> Result<Self, ShaderError> {
        let program = ShaderProgram::obamoid(device, color_format)?;
        let geometry = Geometry::obamoid(device);
        let texture = SceneTexture::blank(device, queue, &program.texture_layout);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Buffer"),
            contents: bytemuck::cast_slice(&[transforms.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &program.transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });

        Ok(Self {
            geometry,
            program,
            texture,
            uniform_buffer,
            transform_bind_group,
        })
    }

    /// Swap in a blank texture and start fetching `url` into it.
    pub fn load_texture<F>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        loader: &TextureLoader,
        url: &str,
        on_done: F,
    ) where
        F: FnOnce(TextureResult) + MaybeSend + 'static,
    {
        self.texture = loader.load(device, queue, &self.program.texture_layout, url, on_done);
    }

    /// Apply the outcome of a texture fetch. Failures leave the texture blank.
    pub fn set_texture(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, result: TextureResult) {
        match result {
            Ok(img) => self.texture.populate(
                device,
                queue,
                &self.program.texture_layout,
                &img,
                "obamoid texture",
            ),
            Err(e) => log::error!("{e}"),
        }
    }

    pub fn write_transforms(&self, queue: &wgpu::Queue, transforms: &Transforms) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[transforms.to_uniform()]),
        );
    }

    /// Record the pass drawing the mesh into `color_view`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        clear_colour: wgpu::Color,
        (width, height): (u32, u32),
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        render_pass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
        render_pass.set_pipeline(&self.program.pipeline);
        render_pass.set_bind_group(TRANSFORM_GROUP, &self.transform_bind_group, &[]);
        render_pass.set_bind_group(TEXTURE_GROUP, &self.texture.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.geometry.positions.slice(..));
        render_pass.set_vertex_buffer(1, self.geometry.tex_coords.slice(..));
        render_pass.set_index_buffer(self.geometry.indices.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.geometry.num_indices, 0, 0..1);
    }

    /// Draw one frame of `scene` to the window surface and present it.
    pub fn render(&self, ctx: &Context, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_transforms(&ctx.queue, &scene.transforms);

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.encode(
            &mut encoder,
            &view,
            &ctx.depth_texture.view,
            ctx.clear_colour,
            ctx.size(),
        );
        ctx.queue.submit(iter::once(encoder.finish()));

        ctx.window.pre_present_notify();
        output.present();
        Ok(())
    }
}
