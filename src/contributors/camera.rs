//! The `pbr-camera` contributor.
//!
//! The camera observes no attributes; after creation it only reacts to the
//! scene root's resize notification, recomputing viewport and projection.

use cgmath::{Point3, Vector3};

use crate::{
    backend::{Backend, CameraHandle, Entity, FovAxis, Projection, ViewHandle, Viewport},
    error::Result,
    markup::Element,
};

use super::{BuildContext, Contributor, RebuildContext};

pub struct CameraContributor {
    camera: Option<CameraHandle>,
    view: Option<ViewHandle>,
}

impl CameraContributor {
    pub fn new() -> Self {
        Self {
            camera: None,
            view: None,
        }
    }

    /// Fixed look-at from (0,0,4) toward the origin. The field-of-view axis
    /// follows the narrower screen dimension so the 45 degree angle never
    /// clips the subject on portrait surfaces.
    fn update_projection<B: Backend>(
        &self,
        backend: &mut B,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let (Some(camera), Some(view)) = (self.camera, self.view) else {
            return Ok(());
        };
        backend.set_viewport(
            view,
            Viewport {
                x: 0,
                y: 0,
                width,
                height,
            },
        )?;
        backend.look_at(
            camera,
            Point3::new(0.0, 0.0, 4.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        )?;
        let aspect = width as f32 / height as f32;
        let axis = if aspect < 1.0 {
            FovAxis::Horizontal
        } else {
            FovAxis::Vertical
        };
        backend.set_projection(
            camera,
            Projection {
                fov_degrees: 45.0,
                aspect,
                near: 1.0,
                far: 10.0,
                axis,
            },
        )
    }
}

impl Default for CameraContributor {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Contributor<B> for CameraContributor {
    fn observed_attributes(&self) -> &'static [&'static str] {
        &[]
    }

    fn build(&mut self, _element: &Element, cx: BuildContext<'_, B>) -> Result<Option<Entity>> {
        let camera = cx.backend.create_camera()?;
        cx.backend.set_view_camera(cx.view, camera)?;
        self.camera = Some(camera);
        self.view = Some(cx.view);
        self.update_projection(cx.backend, cx.width, cx.height)?;
        Ok(None)
    }

    fn rebuild(&mut self, _element: &Element, _cx: RebuildContext<'_, B>) -> Result<Option<Entity>> {
        // No observed attributes, so the root never dispatches here.
        Ok(None)
    }

    fn on_resized(&mut self, backend: &mut B, width: u32, height: u32) -> Result<()> {
        self.update_projection(backend, width, height)
    }
}
