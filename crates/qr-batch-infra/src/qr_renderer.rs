//! QR encoding and PNG rasterization

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use qrcode::types::{Color, QrError};
use qrcode::{EcLevel, QrCode, Version};
use qr_batch_types::{EncodingOptions, Error, ErrorCorrection, Result};

const MAX_VERSION: u8 = 40;

/// Modules per side of a version 40 symbol
pub const MAX_SYMBOL_MODULES: u32 = 177;

/// Largest image side, in pixels, the renderer will allocate
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Pixel side of the image for a symbol `modules` wide under `options`.
///
/// Fails on a zero module scale, on overflow, and above [`MAX_IMAGE_SIDE`].
pub fn image_side(modules: u32, options: &EncodingOptions) -> Result<u32> {
    if options.module_scale == 0 {
        return Err(Error::ImageSize("module scale must be at least 1".to_string()));
    }

    options
        .border
        .checked_mul(2)
        .and_then(|b| b.checked_add(modules))
        .and_then(|m| m.checked_mul(options.module_scale))
        .filter(|side| *side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            Error::ImageSize(format!(
                "{} modules with border {} at scale {} exceeds {} px",
                modules, options.border, options.module_scale, MAX_IMAGE_SIDE
            ))
        })
}

/// Renders payloads to two-colour QR images with fixed options
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    options: EncodingOptions,
}

impl QrRenderer {
    pub fn new(options: EncodingOptions) -> Self {
        Self { options }
    }

    /// Encode `payload` into a QR symbol.
    ///
    /// With `auto_fit` the smallest version at or above `min_version` that
    /// holds the payload is used; otherwise exactly `min_version`.
    pub fn encode(&self, payload: &str) -> Result<QrCode> {
        let min_version = self.options.min_version;
        if !(1..=MAX_VERSION).contains(&min_version) {
            return Err(QrError::InvalidVersion.into());
        }

        let ec_level = ec_level(self.options.error_correction);
        let data = payload.as_bytes();

        if !self.options.auto_fit {
            let version = Version::Normal(i16::from(min_version));
            return Ok(QrCode::with_version(data, version, ec_level)?);
        }

        for v in min_version..=MAX_VERSION {
            match QrCode::with_version(data, Version::Normal(i16::from(v)), ec_level) {
                Ok(code) => return Ok(code),
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(QrError::DataTooLong.into())
    }

    /// Rasterize a symbol: `module_scale` pixels per module with a quiet zone
    /// of `border` modules on each side.
    pub fn rasterize(&self, code: &QrCode) -> Result<RgbImage> {
        let scale = self.options.module_scale;
        let border = self.options.border;
        let width = code.width() as u32;
        let size = image_side(width, &self.options)?;
        let colors = code.to_colors();

        let fg = Rgb(self.options.foreground);
        let bg = Rgb(self.options.background);

        Ok(ImageBuffer::from_fn(size, size, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            if mx < border || my < border || mx >= border + width || my >= border + width {
                return bg;
            }
            let index = ((my - border) * width + (mx - border)) as usize;
            match colors[index] {
                Color::Dark => fg,
                Color::Light => bg,
            }
        }))
    }

    /// Encode, rasterize and write `payload` as a PNG at `path`, replacing
    /// any existing file.
    pub fn render_to_file(&self, payload: &str, path: &Path) -> Result<()> {
        let code = self.encode(payload)?;
        let image = self.rasterize(&code)?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}
