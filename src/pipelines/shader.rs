//! The fixed shader pair and the pipeline built from it.
//!
//! WGSL handed to wgpu directly only reports mistakes through the device's
//! uncaptured-error handler, long after setup returned. Running the sources
//! through naga first turns syntax errors, validation failures and a broken
//! attribute contract into a [`ShaderError`] the caller receives right away.
//!
//! Binding contract:
//!
//! | what        | where                        |
//! |-------------|------------------------------|
//! | `position`  | vertex attribute location 0  |
//! | `tex_coord` | vertex attribute location 1  |
//! | transforms  | group 0, binding 0 (uniform) |
//! | texture     | group 1, binding 0           |
//! | sampler     | group 1, binding 1           |

use naga::{Binding, ShaderStage, TypeInner};

use crate::{error::ShaderError, pipelines::basic::mk_basic_pipeline};

pub const VERTEX_SOURCE: &str = include_str!("vertex.wgsl");
pub const FRAGMENT_SOURCE: &str = include_str!("fragment.wgsl");

pub const POSITION_LOCATION: u32 = 0;
pub const TEX_COORD_LOCATION: u32 = 1;
pub const TRANSFORM_GROUP: u32 = 0;
pub const TEXTURE_GROUP: u32 = 1;

const VERTEX_ENTRY: &str = "vs_main";
const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug)]
pub struct ShaderProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub transform_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    pub fn build(
        device: &wgpu::Device,
        vertex_source: &str,
        fragment_source: &str,
        color_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        validate(vertex_source, fragment_source)?;

        let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Obamoid Vertex Shader"),
            source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
        });
        let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Obamoid Fragment Shader"),
            source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
        });

        let transform_layout = transform_layout(device);
        let texture_layout = texture_layout(device);
        let pipeline = mk_basic_pipeline(
            device,
            color_format,
            &transform_layout,
            &texture_layout,
            &vertex,
            &fragment,
        );
        log::info!("Shader program ready");

        Ok(Self {
            pipeline,
            transform_layout,
            texture_layout,
        })
    }

    pub fn obamoid(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        Self::build(device, VERTEX_SOURCE, FRAGMENT_SOURCE, color_format)
    }
}

/// Check both sources without touching the GPU.
pub fn validate(vertex_source: &str, fragment_source: &str) -> Result<(), ShaderError> {
    let vertex = parse(ShaderStage::Vertex, vertex_source)?;
    let fragment = parse(ShaderStage::Fragment, fragment_source)?;

    let vs = find_entry_point(&vertex, ShaderStage::Vertex, VERTEX_ENTRY)?;
    find_entry_point(&fragment, ShaderStage::Fragment, FRAGMENT_ENTRY)?;

    let locations = input_locations(&vertex, vs);
    for (name, location) in [
        ("position", POSITION_LOCATION),
        ("tex_coord", TEX_COORD_LOCATION),
    ] {
        if !locations.contains(&location) {
            return Err(ShaderError::MissingAttribute { name, location });
        }
    }
    Ok(())
}

fn parse(stage: ShaderStage, source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        stage,
        message: e.emit_to_string(source),
    })?;
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            stage,
            message: e.as_inner().to_string(),
        })?;
    Ok(module)
}

fn find_entry_point<'m>(
    module: &'m naga::Module,
    stage: ShaderStage,
    name: &'static str,
) -> Result<&'m naga::EntryPoint, ShaderError> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage && ep.name == name)
        .ok_or(ShaderError::MissingEntryPoint { stage, name })
}

/// Locations read by an entry point, whether passed as loose arguments or
/// as members of an input struct.
fn input_locations(module: &naga::Module, entry_point: &naga::EntryPoint) -> Vec<u32> {
    let mut locations = Vec::new();
    for argument in &entry_point.function.arguments {
        match &argument.binding {
            Some(Binding::Location { location, .. }) => locations.push(*location),
            Some(_) => (),
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[argument.ty].inner {
                    locations.extend(members.iter().filter_map(|member| match member.binding {
                        Some(Binding::Location { location, .. }) => Some(location),
                        _ => None,
                    }));
                }
            }
        }
    }
    locations
}

pub fn transform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("transform_bind_group_layout"),
    })
}

pub fn texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}
