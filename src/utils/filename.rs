use crate::error::{ProcessingError, Result};
use std::path::Path;

/// Station id of a weather file is its file name without the extension
/// (e.g. `USC00110072.txt` -> `USC00110072`)
pub fn station_id_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ProcessingError::InvalidFormat(format!(
                "Could not derive station id from file name: {}",
                path.display()
            ))
        })
}
