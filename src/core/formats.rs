use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::ImageFormat;

pub fn detect_format(path: &Path) -> ImageFormat {
    let Some(ext) = path.extension().and_then(|value| value.to_str()) else {
        return ImageFormat::Unknown;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "png" => ImageFormat::Png,
        "gif" => ImageFormat::Gif,
        "bmp" => ImageFormat::Bmp,
        "tif" | "tiff" => ImageFormat::Tiff,
        "webp" => ImageFormat::WebP,
        _ => ImageFormat::Unknown,
    }
}

pub fn is_supported(path: &Path) -> bool {
    !detect_format(path).is_unknown()
}

/// Supported image files inside `dir`, sorted by path.
pub fn images_in_dir(dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir, recursive, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                walk(&path, recursive, found)?;
            }
        } else if is_supported(&path) {
            found.push(path);
        }
    }
    Ok(())
}

/// Expands directory arguments into the images they hold; files are kept
/// as given whatever their extension.
pub fn expand_paths<I, P>(inputs: I, recursive: bool) -> io::Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut paths = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            paths.extend(images_in_dir(input, recursive)?);
        } else {
            paths.push(input.to_path_buf());
        }
    }
    Ok(paths)
}
