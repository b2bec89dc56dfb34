//! Viewer core: edition/page navigation, page loading and the clipper.

pub mod clipper;
pub mod controls;
pub mod error;
pub mod loading;
pub mod session;
pub mod state;

pub use clipper::{ClipperSlot, CropCapability, CropHandle, RegionCrop, RegionCropHandle};
pub use controls::{COMING_SOON_MESSAGE, Controls, DateOption};
pub use error::{Result, ViewerError};
pub use loading::{
    LOADING_OPACITY, LoadTicket, LoadedPage, PageDisplay, PageLoadFailure, PageLoader,
    PageRequest, Settled,
};
pub use session::{Effect, Message, Session};
pub use state::{Advance, Direction, PageTarget, ViewerState, Viewing};
