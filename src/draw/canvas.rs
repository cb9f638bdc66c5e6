//! Background raster and the composite surface painted on every state change.

use super::annotation::Annotation;
use super::render::{render_annotation, render_annotations};
use super::style::RenderStyle;
use crate::record::{DataUri, RecordError};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Errors raised while decoding the background or encoding the composite.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Surface data is still borrowed")]
    Borrowed,

    #[error("Nothing has been painted yet")]
    Empty,
}

/// Decoded background image, kept for the whole editor session.
pub struct Background {
    surface: cairo::ImageSurface,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Background")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Background {
    /// Decodes a `data:` URI into a Cairo surface.
    pub fn decode(data_uri: &str) -> Result<Self, CanvasError> {
        let uri = DataUri::parse(data_uri)?;
        Self::from_bytes(&uri.bytes)
    }

    /// Decodes encoded image bytes (PNG, JPEG, WebP, ...).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CanvasError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        let surface = rgba_to_surface(&image)?;
        log::debug!("Decoded background {}x{}", width, height);
        Ok(Self {
            surface,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }
}

/// Converts straight-alpha RGBA into a premultiplied ARGB32 surface.
fn rgba_to_surface(image: &RgbaImage) -> Result<cairo::ImageSurface, CanvasError> {
    let (width, height) = image.dimensions();
    let stride = cairo::Format::ARgb32.stride_for_width(width)?;
    let mut data = vec![0u8; stride as usize * height as usize];

    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiply = |c: u8| (c as u32 * a as u32 + 127) / 255;
        let argb = ((a as u32) << 24) | (premultiply(r) << 16) | (premultiply(g) << 8) | premultiply(b);
        let offset = y as usize * stride as usize + x as usize * 4;
        data[offset..offset + 4].copy_from_slice(&argb.to_ne_bytes());
    }

    Ok(cairo::ImageSurface::create_for_data(
        data,
        cairo::Format::ARgb32,
        width as i32,
        height as i32,
        stride,
    )?)
}

/// Reads a premultiplied ARGB32 surface back into straight-alpha RGBA.
fn surface_to_rgba(surface: &mut cairo::ImageSurface) -> Result<RgbaImage, CanvasError> {
    surface.flush();
    let width = surface.width() as u32;
    let height = surface.height() as u32;
    let stride = surface.stride() as usize;
    let data = surface.data().map_err(|_| CanvasError::Borrowed)?;

    let mut image = RgbaImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let offset = y as usize * stride + x as usize * 4;
        let argb = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        let a = (argb >> 24) as u8;
        let unpremultiply = |c: u32| {
            if a == 0 {
                0
            } else {
                ((c & 0xff) * 255 / a as u32).min(255) as u8
            }
        };
        *pixel = image::Rgba([
            unpremultiply(argb >> 16),
            unpremultiply(argb >> 8),
            unpremultiply(argb),
            a,
        ]);
    }
    Ok(image)
}

/// The composite bitmap: background, annotations, then the live preview.
pub struct PlanCanvas {
    surface: Option<cairo::ImageSurface>,
    style: RenderStyle,
}

impl PlanCanvas {
    pub fn new(style: RenderStyle) -> Self {
        Self {
            surface: None,
            style,
        }
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// The painted surface, once a background has been available.
    pub fn surface(&self) -> Option<&cairo::ImageSurface> {
        self.surface.as_ref()
    }

    /// Fully repaints the surface.
    ///
    /// Without a decoded background the surface stays unpopulated and this
    /// returns `Ok(false)`.
    pub fn repaint(
        &mut self,
        background: Option<&Background>,
        annotations: &[Annotation],
        preview: Option<&Annotation>,
    ) -> Result<bool, CanvasError> {
        let Some(background) = background else {
            log::trace!("Skipping repaint: no background");
            return Ok(false);
        };

        let resize = match &self.surface {
            Some(surface) => {
                surface.width() as u32 != background.width()
                    || surface.height() as u32 != background.height()
            }
            None => true,
        };
        if resize {
            self.surface = Some(cairo::ImageSurface::create(
                cairo::Format::ARgb32,
                background.width() as i32,
                background.height() as i32,
            )?);
        }
        let Some(surface) = self.surface.as_ref() else {
            return Ok(false);
        };

        let ctx = cairo::Context::new(surface)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(background.surface(), 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_operator(cairo::Operator::Over);

        render_annotations(&ctx, annotations, &self.style);
        if let Some(preview) = preview {
            render_annotation(&ctx, preview, &self.style);
        }
        Ok(true)
    }

    /// Encodes the composite in `mime_type`.
    ///
    /// Returns the mime type actually produced; formats the `image` crate cannot
    /// write fall back to PNG.
    pub fn encode(&mut self, mime_type: &str) -> Result<(String, Vec<u8>), CanvasError> {
        let surface = self.surface.as_mut().ok_or(CanvasError::Empty)?;

        let format = ImageFormat::from_mime_type(mime_type)
            .filter(|format| format.writing_enabled() && *format != ImageFormat::Png);
        let Some(format) = format else {
            if !mime_type.eq_ignore_ascii_case("image/png") {
                log::info!("Encoding {} as PNG", mime_type);
            }
            let mut bytes = Vec::new();
            surface.write_to_png(&mut bytes)?;
            return Ok(("image/png".to_string(), bytes));
        };

        let rgba = surface_to_rgba(surface)?;
        let image = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
        } else {
            DynamicImage::ImageRgba8(rgba)
        };

        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format)?;
        Ok((format.to_mime_type().to_string(), bytes))
    }

    /// Encodes the composite as a data URI.
    pub fn to_data_uri(&mut self, mime_type: &str) -> Result<String, CanvasError> {
        let (mime_type, bytes) = self.encode(mime_type)?;
        Ok(DataUri::encode(&mime_type, &bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba(color));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn background_keeps_native_size() {
        let uri = DataUri::encode("image/png", &png_bytes(40, 30, [10, 20, 30, 255]));
        let background = Background::decode(&uri).unwrap();
        assert_eq!((background.width(), background.height()), (40, 30));
    }

    #[test]
    fn undecodable_background_is_an_error() {
        let uri = DataUri::encode("image/png", b"not an image");
        assert!(matches!(Background::decode(&uri), Err(CanvasError::Image(_))));
    }

    #[test]
    fn repaint_without_background_leaves_surface_empty() {
        let mut canvas = PlanCanvas::new(RenderStyle::default());
        let painted = canvas
            .repaint(None, &[Annotation::Socket { x: 1.0, y: 1.0 }], None)
            .unwrap();
        assert!(!painted);
        assert!(canvas.surface().is_none());
        assert!(matches!(canvas.encode("image/png"), Err(CanvasError::Empty)));
    }

    #[test]
    fn background_pixels_survive_round_trip() {
        let background = Background::from_bytes(&png_bytes(8, 8, [200, 100, 50, 255])).unwrap();
        let mut canvas = PlanCanvas::new(RenderStyle::default());
        assert!(canvas.repaint(Some(&background), &[], None).unwrap());

        let (mime, bytes) = canvas.encode("image/png").unwrap();
        assert_eq!(mime, "image/png");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.get_pixel(3, 3).0, [200, 100, 50, 255]);
    }

    #[test]
    fn jpeg_and_unknown_mimes() {
        let background = Background::from_bytes(&png_bytes(16, 16, [255, 255, 255, 255])).unwrap();
        let mut canvas = PlanCanvas::new(RenderStyle::default());
        canvas.repaint(Some(&background), &[], None).unwrap();

        let (mime, bytes) = canvas.encode("image/jpeg").unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);

        let (mime, _) = canvas.encode("application/pdf").unwrap();
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn preview_is_painted_last() {
        let background = Background::from_bytes(&png_bytes(100, 100, [255, 255, 255, 255])).unwrap();
        let mut canvas = PlanCanvas::new(RenderStyle::default());
        let under = Annotation::Socket { x: 50.0, y: 50.0 };
        let preview = Annotation::Tv { x: 50.0, y: 50.0 };
        canvas
            .repaint(Some(&background), &[under], Some(&preview))
            .unwrap();

        let (_, bytes) = canvas.encode("image/png").unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        // Inside the disc but clear of the TV glyph: the TV blue, not socket red
        let [r, _, b, _] = decoded.get_pixel(50, 37).0;
        assert!(b > r);
    }
}
