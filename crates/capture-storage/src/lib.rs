//! # capture-storage
//!
//! Media object storage for Capture Now. Uploaded highlight media and
//! avatars are written to a local directory and addressed by a public
//! URL path; the HTTP layer serves the directory under that path.

pub mod media;

pub use media::MediaStore;
