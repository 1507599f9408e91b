//! instafilter-io: picking, saving, and the session controller.
//!
//! The pipeline itself is pure; this crate supplies the asynchronous
//! collaborators around it (an [`ImagePicker`] that yields decoded images
//! and an [`ImageSaver`] that writes finished ones to an album) and the
//! [`Session`] that wires user intents to both.

pub mod picker;
pub mod saver;
pub mod session;

pub use picker::{FilePicker, ImagePicker};
pub use saver::{AlbumSaver, ImageSaver, SaveError, SavedImage};
pub use session::{Notification, Session};
