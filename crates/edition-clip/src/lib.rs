//! Turning a page crop into a branded, shareable clip.
//!
//! - [`Compositor`] wraps a crop in the masthead header and footer bands.
//! - [`ShareExporter`] hands the result to a [`ShareSurface`] or produces a
//!   timestamped download.
//! - [`preview`] renders the link-preview cover for an edition.

pub mod branding;
pub mod compositor;
pub mod error;
pub mod layout;
pub mod preview;
pub mod share;
pub mod text;

pub use branding::{Branding, parse_hex_color};
pub use compositor::{BrandedImage, Compositor};
pub use error::{ClipError, Result};
pub use layout::BrandLayout;
pub use preview::{CoverPreview, render_cover};
pub use share::{
    ClipFile, ClipNamer, Delivery, NoShareSurface, ShareExporter, ShareOutcome, SharePayload,
    ShareResponse, ShareSurface,
};
pub use text::{SwashPainter, TextPainter, TextStyle};
