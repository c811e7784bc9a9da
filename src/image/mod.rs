//! # Images
//!
//! Reference counted image records handed to plugins. An image snapshots the
//! format of the clip that produced it (bit depth, components,
//! premultiplication, pixel aspect ratio) and carries its own geometry.
//!
//! The host holds the first reference. Every extra holder calls
//! [`ImageBase::add_reference`] and later [`ImageBase::release_reference`];
//! the release that takes the count to zero destroys the record.
//!
//! ## Usage
//!
//! ```rust
//! use ofx_clip_host::image::{Image, Released};
//!
//! let image = Image::new();
//! image.add_reference().unwrap();
//! assert_eq!(image.release_reference(), Ok(Released::Alive(1)));
//! assert_eq!(image.release_reference(), Ok(Released::Destroyed));
//! assert!(image.is_destroyed());
//! ```

pub mod base;
pub mod refcount;
pub mod schema;
pub mod types;

pub use base::{ImageBase, ImageGeometry, ImageHandle, Rect};
pub use refcount::{ReferenceCount, Released};
#[cfg(feature = "opengl")]
pub use types::Texture;
pub use types::Image;
