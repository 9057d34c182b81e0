//! Errors surfaced by resource setup.

use naga::ShaderStage;

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage:?} shader failed to parse:\n{message}")]
    Parse { stage: ShaderStage, message: String },
    #[error("{stage:?} shader failed validation: {message}")]
    Validation { stage: ShaderStage, message: String },
    #[error("{stage:?} shader has no entry point `{name}`")]
    MissingEntryPoint { stage: ShaderStage, name: &'static str },
    #[error("vertex shader does not read attribute `{name}` at location {location}")]
    MissingAttribute { name: &'static str, location: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("could not fetch texture `{url}`: {message}")]
    Fetch { url: String, message: String },
    #[error("could not decode texture `{url}`: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}
