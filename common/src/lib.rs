use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod file_format;
pub mod float_ext;
pub mod log_setup;

pub use file_format::{FileExtensionError, FileFormat};

pub const EPSILON: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn is_debug() -> bool {
    cfg!(debug_assertions)
}

pub fn serialize<T: Serialize>(value: &T, format: FileFormat) -> SerdeFormatResult<String> {
    let text = match format {
        FileFormat::Yaml => serde_yml::to_string(value)?,
        FileFormat::Json => serde_json::to_string_pretty(value)?,
    };

    Ok(normalize_line_endings(&text))
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: FileFormat,
) -> SerdeFormatResult<T> {
    match format {
        FileFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        FileFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Unix line endings and exactly one trailing newline.
fn normalize_line_endings(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");
    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}
