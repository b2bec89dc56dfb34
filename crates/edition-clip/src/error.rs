use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    /// Compose was requested without a crop, or with an empty one.
    #[error("no crop region selected")]
    NoCropSelected,

    #[error("font data is not a readable font")]
    InvalidFont,

    #[error("invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("logo image has no pixels")]
    EmptyLogo,

    #[error("page image has no pixels")]
    EmptyPage,

    #[error("failed to encode image")]
    Encode(#[from] image::ImageError),

    #[error("share surface failed")]
    Share(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClipError>;
