//! Asset collaborators
//!
//! - `loader`: texture / model loading traits and the stock loaders
//! - `resolver`: id → shared texture handle, created once per id
//! - `library`: scene-owned pool of model templates
//!
//! First-time imports are serialized per key, never across the whole cache.

mod gates;
pub mod library;
pub mod loader;
pub mod resolver;

pub use library::{AssetLibrary, ModelKey, ModelTemplate};
pub use loader::{ImageFileLoader, ModelLoader, PlaceholderLoader, TextureLoader, decode_image_file};
pub use resolver::ResourceResolver;
