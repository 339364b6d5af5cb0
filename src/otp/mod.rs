//! One-time code generation and seed re-provisioning.
//!
//! - RFC 6238 TOTP codes (`totp`)
//! - Hex / base32 seed handling (`secret`)
//! - `otpauth://` URIs and QR export (`provision`)
//! - Refresh timing for code views (`clock`)

pub mod clock;
pub mod provision;
pub mod secret;
pub mod totp;

pub use clock::RefreshClock;
pub use provision::{build_uri, qr_data_uri, render_qr, DEFAULT_ISSUER, DEFAULT_QR_SIZE};
pub use secret::{decode_base32, hex_to_base32, is_hex};
pub use totp::{generate, generate_at};
