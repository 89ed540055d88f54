//! pbr-scene
//!
//! A declarative scene-markup adapter for physically-based rendering
//! engines. A host document describes a scene with `pbr-scene`, `pbr-asset`,
//! `pbr-sun`, `pbr-environment`, `pbr-camera` and `pbr-model` elements; this
//! crate marshals their string attributes into typed engine calls against a
//! supplied [`backend::Backend`] and drives a per-frame render loop. The
//! engine itself, the markup parser and the animation-frame primitive all
//! live on the host's side of the trait boundaries.
//!
//! High-level modules
//! - `markup`: the element tree consumed from the host document
//! - `attr`: pure attribute parsers (color, vector, boolean, float, asset)
//! - `backend`: the rendering-engine call surface and its descriptors
//! - `scene`: the scene root owning assets, contributors and the frame loop
//! - `contributors`: the per-element builders (sun, environment, camera, model)
//! - `frame`: frame pacing for the render loop
//!
//! Setup is two-phase: [`scene::SceneRoot::mount`] collects assets and
//! contributor elements from the tree, [`scene::SceneRoot::initialize`]
//! brings the engine up and builds every contributor. Attribute changes
//! after that swap the affected contributor's entity in place.

pub mod attr;
pub mod backend;
pub mod contributors;
pub mod error;
pub mod frame;
pub mod markup;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::{Result, SceneError};
pub use markup::{Element, Tag};
pub use scene::{AssetDeclaration, ContributorId, SceneRoot};
