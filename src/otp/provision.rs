//! `otpauth://` provisioning URIs and their QR rendering.
//!
//! Uses the `qrcode` crate to produce the QR matrix and the `image` crate
//! to rasterize it into a square PNG.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};

use crate::errors::{TotpVaultError, Result};

/// Issuer label written into every URI unless configured otherwise.
pub const DEFAULT_ISSUER: &str = "TOTP-CLI";

/// Default side length of an exported QR image in pixels.
pub const DEFAULT_QR_SIZE: u32 = 384;

/// Quiet-zone border around the symbol, in modules.
const QUIET_ZONE: u32 = 4;

/// Build `otpauth://totp/<title>?secret=<secret>&issuer=<issuer>`.
///
/// Values are inserted verbatim; callers must not pass characters that
/// break URI syntax.
pub fn build_uri(title: &str, secret: &str, issuer: &str) -> String {
    format!("otpauth://totp/{title}?secret={secret}&issuer={issuer}")
}

/// Encode `text` as a medium error-correction QR symbol and rasterize it
/// into a `pixel_size` x `pixel_size` PNG.
///
/// If `pixel_size` is smaller than the symbol plus its quiet zone, the
/// image is grown to one pixel per module.
pub fn render_qr(text: &str, pixel_size: u32) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M).map_err(|e| {
        match e {
            QrError::DataTooLong => TotpVaultError::EncodingFailure(format!(
                "{} bytes exceed the QR symbol capacity",
                text.len()
            )),
            other => TotpVaultError::EncodingFailure(format!("QR encode error: {other}")),
        }
    })?;

    let width = u32::try_from(code.width())
        .map_err(|_| TotpVaultError::EncodingFailure("QR symbol too wide".into()))?;
    let modules = code.to_colors();
    let total = width + QUIET_ZONE * 2;
    let side = pixel_size.max(total);

    // Map every output pixel back onto the module grid so the image is
    // exactly `side` pixels wide whatever the module count.
    let img = GrayImage::from_fn(side, side, |x, y| {
        let mx = x * total / side;
        let my = y * total / side;
        let dark = mx >= QUIET_ZONE
            && my >= QUIET_ZONE
            && mx < QUIET_ZONE + width
            && my < QUIET_ZONE + width
            && modules[((my - QUIET_ZONE) * width + (mx - QUIET_ZONE)) as usize] == Color::Dark;
        if dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        side,
        side,
        image::ExtendedColorType::L8,
    )
    .map_err(|e| TotpVaultError::EncodingFailure(format!("PNG encode error: {e}")))?;

    Ok(buf)
}

/// Render `text` as a QR PNG wrapped in a `data:image/png;base64,` URI.
pub fn qr_data_uri(text: &str, pixel_size: u32) -> Result<String> {
    let png = render_qr(text, pixel_size)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}
