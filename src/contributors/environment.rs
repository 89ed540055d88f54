//! The `pbr-environment` contributor: indirect lighting and sky box.
//!
//! Both maps come from `.ktx` bundles; anything else is rejected before the
//! engine sees it, since a half-attached environment is much harder to
//! debug than an upfront error.

use std::collections::HashMap;

use crate::{
    attr,
    backend::{Backend, Entity, SceneHandle},
    error::{Result, SceneError},
    markup::Element,
};

use super::{BuildContext, Contributor, RebuildContext};

pub struct EnvironmentContributor;

fn require_ktx(id: &str, url: &str) -> Result<()> {
    if url.ends_with(".ktx") {
        Ok(())
    } else {
        Err(SceneError::WrongAssetFormat {
            id: id.to_owned(),
            url: url.to_owned(),
        })
    }
}

impl EnvironmentContributor {
    /// Attaches whichever of the two maps the element declares. The two are
    /// independent: a scene may have indirect lighting without a visible
    /// sky, or the other way around.
    fn attach<B: Backend>(
        &self,
        element: &Element,
        backend: &mut B,
        scene: SceneHandle,
        assets: &HashMap<String, String>,
    ) -> Result<()> {
        if element.has_attribute("indirect-map") {
            let url = attr::asset_url(element, "indirect-map", assets)?;
            require_ktx(element.attribute("indirect-map").unwrap_or_default(), url)?;
            let indirect = backend.load_indirect_light(url)?;
            backend.set_indirect_light(scene, indirect)?;
            backend.set_indirect_intensity(indirect, attr::float(element, "intensity", 100_000.0))?;
        }
        if element.has_attribute("sky-map") {
            let url = attr::asset_url(element, "sky-map", assets)?;
            require_ktx(element.attribute("sky-map").unwrap_or_default(), url)?;
            let skybox = backend.load_skybox(url)?;
            backend.set_skybox(scene, skybox)?;
        }
        Ok(())
    }
}

impl<B: Backend> Contributor<B> for EnvironmentContributor {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &["intensity", "indirect-map", "sky-map"]
    }

    fn build(&mut self, element: &Element, cx: BuildContext<'_, B>) -> Result<Option<Entity>> {
        self.attach(element, cx.backend, cx.scene, cx.assets)?;
        Ok(None)
    }

    fn rebuild(&mut self, element: &Element, cx: RebuildContext<'_, B>) -> Result<Option<Entity>> {
        self.attach(element, cx.backend, cx.scene, cx.assets)?;
        Ok(None)
    }
}
