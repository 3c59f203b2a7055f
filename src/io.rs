//! PNG export and raster image import.
//!
//! Pictures are written one image pixel per cell. Imports accept anything
//! the `image` crate decodes and keep only the top-left corner when the
//! image is larger than the import limit.

use egui::Color32;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

use crate::picture::Picture;

/// Errors that can occur while loading an image into a picture
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    Empty,
}

/// Errors that can occur while saving a picture
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export an empty picture")]
    EmptyPicture,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write file: {0}")]
    Write(#[from] std::io::Error),
    #[error("browser refused the download: {0}")]
    Browser(String),
}

/// Encode a picture as an RGBA PNG
pub fn encode_png(picture: &Picture) -> Result<Vec<u8>, ExportError> {
    if picture.width() == 0 || picture.height() == 0 {
        return Err(ExportError::EmptyPicture);
    }

    let raw: Vec<u8> = picture
        .cells()
        .iter()
        .flat_map(|color| color.to_srgba_unmultiplied())
        .collect();
    let image = RgbaImage::from_raw(picture.width() as u32, picture.height() as u32, raw)
        .ok_or(ExportError::EmptyPicture)?;

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Decode image bytes into a picture of at most `max_size`×`max_size` cells.
///
/// Cells take the pixel's RGB value; alpha is dropped.
pub fn decode_picture(bytes: &[u8], max_size: u32) -> Result<Picture, ImportError> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("decoded image: {}x{}", image.width(), image.height());

    let width = image.width().min(max_size);
    let height = image.height().min(max_size);
    if width == 0 || height == 0 {
        return Err(ImportError::Empty);
    }

    let cropped = image.view(0, 0, width, height).to_image();
    let cells = cropped
        .pixels()
        .map(|pixel| Color32::from_rgb(pixel[0], pixel[1], pixel[2]))
        .collect();

    Picture::from_cells(width as usize, height as usize, cells).map_err(|_| ImportError::Empty)
}

/// Load a picture from an image file on disk
#[cfg(not(target_arch = "wasm32"))]
pub fn load_picture(path: &std::path::Path, max_size: u32) -> Result<Picture, ImportError> {
    let bytes = std::fs::read(path).map_err(|source| ImportError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode_picture(&bytes, max_size)
}

/// Save a picture as a PNG named `file_name` in the working directory
#[cfg(not(target_arch = "wasm32"))]
pub fn save_picture(picture: &Picture, file_name: &str) -> Result<(), ExportError> {
    let bytes = encode_png(picture)?;
    std::fs::write(file_name, &bytes)?;
    log::info!("saved {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

/// How long a download's object URL stays valid after the click
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 60_000;

/// Offer a picture to the user as a PNG download named `file_name`
#[cfg(target_arch = "wasm32")]
pub fn save_picture(picture: &Picture, file_name: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;

    let browser_err = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

    let bytes = encode_png(picture)?;
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(browser_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser_err)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;
    let link = document
        .create_element("a")
        .map_err(browser_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("could not create a link".to_owned()))?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();

    // The download reads the URL asynchronously, so it has to outlive this tick
    let revoke = wasm_bindgen::closure::Closure::once_into_js(move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("could not release download URL: {err:?}");
        }
    });
    web_sys::window()
        .ok_or_else(|| ExportError::Browser("no window".to_owned()))?
        .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
        .map_err(browser_err)?;

    log::info!("offered {} for download ({} bytes)", file_name, bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::PixelEdit;

    fn sample_picture() -> Picture {
        Picture::empty(3, 2, Color32::WHITE).with_edits(&[
            PixelEdit::new(0, 0, Color32::from_rgb(255, 0, 0)),
            PixelEdit::new(2, 1, Color32::from_rgb(0, 0, 255)),
        ])
    }

    #[test]
    fn test_png_has_picture_dimensions_and_colors() {
        let bytes = encode_png(&sample_picture()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(decoded.get_pixel(2, 1).0, [0, 0, 255, 255]);
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_exported_png_imports_back() {
        let picture = sample_picture();
        let bytes = encode_png(&picture).unwrap();
        assert_eq!(decode_picture(&bytes, 100).unwrap(), picture);
    }

    #[test]
    fn test_import_crops_large_images() {
        let big = RgbaImage::from_pixel(150, 120, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(big)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let picture = decode_picture(&bytes, 100).unwrap();
        assert_eq!((picture.width(), picture.height()), (100, 100));
        assert_eq!(picture.pixel_at(99, 99).unwrap(), Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_import_rejects_garbage() {
        let result = decode_picture(b"definitely not a png", 100);
        assert!(matches!(result, Err(ImportError::Decode(_))));
    }

    #[test]
    fn test_export_rejects_empty_picture() {
        let result = encode_png(&Picture::empty(0, 4, Color32::WHITE));
        assert!(matches!(result, Err(ExportError::EmptyPicture)));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_download_is_offered_without_error() {
        let picture = Picture::empty(2, 2, Color32::WHITE);
        assert!(save_picture(&picture, "pixelart.png").is_ok());
    }

    #[wasm_bindgen_test]
    fn test_empty_picture_is_not_offered() {
        let picture = Picture::empty(0, 0, Color32::WHITE);
        assert!(matches!(save_picture(&picture, "pixelart.png"), Err(ExportError::EmptyPicture)));
    }
}
