//! The `pbr-model` contributor: material instance, textures, mesh and an
//! optional rotation.

use std::collections::HashMap;

use cgmath::{Deg, Matrix4, Rad, Vector3};

use crate::{
    attr,
    backend::{Backend, Entity, SamplerHandle, TextureFormat},
    error::Result,
    markup::Element,
};

use super::{BuildContext, Contributor, RebuildContext};

/// Texture slots a material instance can bind; the attribute name doubles as
/// the engine-side parameter name.
const TEXTURE_PARAMETERS: [&str; 5] = ["albedo", "roughness", "metallic", "normal", "ao"];

pub struct ModelContributor;

impl ModelContributor {
    /// Builds the drawable. Texture binding needs the shared sampler, which
    /// only the initial build receives; rebuilds recreate material and mesh
    /// without texture bindings.
    fn build_drawable<B: Backend>(
        &self,
        element: &Element,
        backend: &mut B,
        assets: &HashMap<String, String>,
        sampler: Option<SamplerHandle>,
    ) -> Result<Entity> {
        let instance = if element.has_attribute("material") {
            let url = attr::asset_url(element, "material", assets)?;
            let material = backend.create_material(url)?;
            let instance = backend.create_material_instance(material)?;
            if let Some(sampler) = sampler {
                for parameter in TEXTURE_PARAMETERS {
                    if !element.has_attribute(parameter) {
                        continue;
                    }
                    let url = attr::asset_url(element, parameter, assets)?;
                    let texture =
                        backend.load_texture(url, TextureFormat::from_url(url), true)?;
                    backend.set_texture_parameter(instance, parameter, texture, sampler)?;
                }
            }
            Some(instance)
        } else {
            None
        };

        let mesh_url = attr::asset_url(element, "mesh", assets)?;
        let drawable = backend.load_mesh(mesh_url, instance)?;

        if element.has_attribute("rotation") {
            let degrees = attr::vec3(element, "rotation", Vector3::new(0.0, 0.0, 0.0));
            let rotation = Matrix4::from_angle_z(Rad::from(Deg(degrees.z)))
                * Matrix4::from_angle_y(Rad::from(Deg(degrees.y)))
                * Matrix4::from_angle_x(Rad::from(Deg(degrees.x)));
            backend.set_transform(drawable, rotation)?;
        }

        Ok(drawable)
    }
}

impl<B: Backend> Contributor<B> for ModelContributor {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[
            "material",
            "albedo",
            "mesh",
            "roughness",
            "metallic",
            "normal",
            "ao",
        ]
    }

    fn build(&mut self, element: &Element, cx: BuildContext<'_, B>) -> Result<Option<Entity>> {
        let drawable =
            self.build_drawable(element, cx.backend, cx.assets, Some(cx.sampler))?;
        Ok(Some(drawable))
    }

    fn rebuild(&mut self, element: &Element, cx: RebuildContext<'_, B>) -> Result<Option<Entity>> {
        let drawable = self.build_drawable(element, cx.backend, cx.assets, None)?;
        Ok(Some(drawable))
    }
}
