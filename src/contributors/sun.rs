//! The `pbr-sun` contributor: one directional light.

use crate::{
    attr,
    backend::{Backend, Entity, SunLight},
    error::Result,
    markup::Element,
};

use super::{BuildContext, Contributor, RebuildContext};

pub struct SunContributor;

impl SunContributor {
    fn build_light<B: Backend>(&self, element: &Element, backend: &mut B) -> Result<Entity> {
        let defaults = SunLight::default();
        let light = SunLight {
            color: attr::color(element, "color", defaults.color),
            intensity: attr::float(element, "intensity", defaults.intensity),
            direction: attr::vec3(element, "direction", defaults.direction),
            cast_shadows: attr::boolean(element, "shadows", defaults.cast_shadows),
            angular_radius: attr::float(element, "radius", defaults.angular_radius),
            halo_size: attr::float(element, "halo-size", defaults.halo_size),
            halo_falloff: attr::float(element, "halo-falloff", defaults.halo_falloff),
        };
        let entity = backend.create_entity()?;
        backend.build_sun_light(entity, &light)?;
        Ok(entity)
    }
}

impl<B: Backend> Contributor<B> for SunContributor {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[
            "color",
            "intensity",
            "direction",
            "shadows",
            "radius",
            "halo-size",
            "halo-falloff",
        ]
    }

    fn build(&mut self, element: &Element, cx: BuildContext<'_, B>) -> Result<Option<Entity>> {
        Ok(Some(self.build_light(element, cx.backend)?))
    }

    fn rebuild(&mut self, element: &Element, cx: RebuildContext<'_, B>) -> Result<Option<Entity>> {
        Ok(Some(self.build_light(element, cx.backend)?))
    }
}
