pub mod constants;
pub mod media;
pub mod navigation;
pub mod playback;
pub mod preload;
pub mod roles;
pub mod scroll;
pub mod validate;

pub use playback::*;
