//! Contributor lifecycle shared by every element nested under a scene root.
//!
//! A contributor turns one markup element into at most one engine-side
//! entity. The scene root owns the contributors, builds them once it has
//! live engine handles, and swaps their entity when an observed attribute
//! changes. Rebuilds run against a deliberately reduced context: the view
//! and sampler handed to the initial build are not available again, so a
//! rebuilt model keeps its mesh and material but not its texture bindings.
//! Every variant implements the same [`Contributor::rebuild`] signature;
//! there is no subtype-specific dispatch.

use std::collections::HashMap;

use crate::{
    backend::{Backend, Entity, SamplerHandle, SceneHandle, ViewHandle},
    error::Result,
    markup::Element,
};

pub mod camera;
pub mod environment;
pub mod model;
pub mod sun;

pub use camera::CameraContributor;
pub use environment::EnvironmentContributor;
pub use model::ModelContributor;
pub use sun::SunContributor;

/// Everything available to an initial build: live engine handles, the shared
/// sampler, the asset map and the current surface dimensions.
pub struct BuildContext<'a, B: Backend> {
    pub backend: &'a mut B,
    pub scene: SceneHandle,
    pub view: ViewHandle,
    pub sampler: SamplerHandle,
    pub assets: &'a HashMap<String, String>,
    pub width: u32,
    pub height: u32,
}

/// The reduced context an attribute-driven rebuild runs against.
pub struct RebuildContext<'a, B: Backend> {
    pub backend: &'a mut B,
    pub scene: SceneHandle,
    pub assets: &'a HashMap<String, String>,
}

pub trait Contributor<B: Backend> {
    /// Attributes whose changes trigger a rebuild. Changes to anything else
    /// are stored but cause no engine traffic.
    fn observed_attributes(&self) -> &'static [&'static str];

    /// First construction, invoked once the scene root has live engine
    /// handles. Returns the entity to register, if this contributor
    /// produces one.
    fn build(&mut self, element: &Element, cx: BuildContext<'_, B>) -> Result<Option<Entity>>;

    /// Reconstruction after an observed attribute changed. The scene root
    /// has already unregistered the previous entity; the returned one is
    /// registered in its place.
    fn rebuild(&mut self, element: &Element, cx: RebuildContext<'_, B>) -> Result<Option<Entity>>;

    /// Invoked when the scene root's surface dimensions change.
    fn on_resized(&mut self, backend: &mut B, width: u32, height: u32) -> Result<()> {
        let _ = (backend, width, height);
        Ok(())
    }
}
