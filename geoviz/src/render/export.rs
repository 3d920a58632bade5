use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};

/// Writes `image` as PNG, creating missing parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Export {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!(
        "Saved {}x{} image to '{}'",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;
    use crate::test_utils::test_output_path;

    #[test]
    fn writes_png_into_new_directory() {
        let path = test_output_path("export/nested/swatch.png");
        let _ = fs::remove_file(&path);

        let img = RgbaImage::from_pixel(4, 3, Rgba([200, 100, 50, 255]));
        save_png(&img, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(*loaded.get_pixel(2, 1), Rgba([200, 100, 50, 255]));
    }
}
