use std::path::Path;

use crate::loader::LoaderError;

/// Checkpoint companion-metadata extension.
const META_EXTENSION: &str = "meta";
/// Flat-binary parameter file extension.
const WEIGHTS_EXTENSION: &str = "weights";

/// Derives the canonical model name from a parameter file path.
///
/// A `.weights` name is used as-is. A checkpoint-style name (no
/// extension, or the `.meta` companion) must end in `-<step>` with an
/// integer training step, which is stripped.
pub fn model_name(file_path: &str) -> Result<String, LoaderError> {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (base, extension) = match file_name.rfind('.') {
        Some(position) => {
            (file_name[..position].to_string(), file_name[position + 1..].to_string())
        },
        None => (file_name, String::new()),
    };

    if extension.is_empty() || extension == META_EXTENSION {
        let (stem, step) = base.rsplit_once('-').unwrap_or(("", base.as_str()));
        if step.parse::<i64>().is_err() {
            return Err(LoaderError::BadStepSuffix(base.clone()));
        }
        return Ok(stem.to_string());
    }
    if extension == WEIGHTS_EXTENSION {
        return Ok(base);
    }
    Err(LoaderError::UnrecognizedExtension(extension))
}
