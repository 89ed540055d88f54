//! The rendering-engine boundary.
//!
//! This crate never touches the GPU itself; everything engine-side is
//! consumed through [`Backend`]. Handles returned by a backend are opaque
//! newtypes around a `u64` the engine assigns. A backend is expected to be
//! single-threaded and synchronous, mirroring the cooperative execution
//! model of the adapter.
//!
//! Descriptor structs ([`SunLight`], [`SamplerConfig`], [`Viewport`],
//! [`Projection`]) carry the typed values the contributors marshal out of
//! markup attributes.

use cgmath::{Matrix4, Point3, Vector3};

use crate::error::Result;

macro_rules! handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub u64);
    };
}

handle!(
    /// An engine-side entity: a light or a drawable registered in the scene.
    Entity
);
handle!(SurfaceHandle);
handle!(SceneHandle);
handle!(SwapChainHandle);
handle!(RendererHandle);
handle!(ViewHandle);
handle!(SamplerHandle);
handle!(CameraHandle);
handle!(MaterialHandle);
handle!(MaterialInstanceHandle);
handle!(TextureHandle);
handle!(IndirectLightHandle);
handle!(SkyboxHandle);

/// Directional ("sun") light descriptor. `Default` carries the values used
/// when the corresponding markup attribute is absent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub direction: Vector3<f32>,
    pub cast_shadows: bool,
    /// Angular radius of the sun disk, in degrees.
    pub angular_radius: f32,
    pub halo_size: f32,
    pub halo_falloff: f32,
}

impl Default for SunLight {
    fn default() -> Self {
        Self {
            color: [0.98, 0.92, 0.89],
            intensity: 100_000.0,
            direction: Vector3::new(0.6, -1.0, -0.8),
            cast_shadows: true,
            angular_radius: 1.9,
            halo_size: 10.0,
            halo_falloff: 80.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Texture sampler configuration shared by every contributor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerConfig {
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap_mode: WrapMode,
}

impl SamplerConfig {
    /// The scene root's sampler: trilinear minification, linear
    /// magnification, clamped at the edges.
    pub fn trilinear_clamped() -> Self {
        Self {
            min_filter: MinFilter::LinearMipmapLinear,
            mag_filter: MagFilter::Linear,
            wrap_mode: WrapMode::ClampToEdge,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Which axis the field of view angle applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FovAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub axis: FovAxis,
}

/// Texture decoder, selected by the asset URL's file extension. PNG is the
/// fallback for anything unrecognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Ktx,
    Jpeg,
    Png,
}

impl TextureFormat {
    pub fn from_url(url: &str) -> TextureFormat {
        match url.rsplit('.').next() {
            Some(extension) if extension.eq_ignore_ascii_case("ktx") => TextureFormat::Ktx,
            Some(extension)
                if extension.eq_ignore_ascii_case("jpg")
                    || extension.eq_ignore_ascii_case("jpeg") =>
            {
                TextureFormat::Jpeg
            }
            _ => TextureFormat::Png,
        }
    }
}

/// The call surface a rendering engine supplies.
///
/// The adapter calls these in a fixed order during setup: `init` with the
/// collected asset URLs first, then surface/scene/sampler/swap-chain/
/// renderer/view creation, then contributor builds, then per-frame `render`
/// submissions. `destroy` is the explicit end of the engine's lifetime.
pub trait Backend {
    /// Prepare the engine and make the listed asset URLs loadable.
    fn init(&mut self, asset_urls: &[&str]) -> Result<()>;

    fn create_surface(&mut self, width: u32, height: u32) -> Result<SurfaceHandle>;
    fn create_scene(&mut self) -> Result<SceneHandle>;
    fn create_swap_chain(&mut self, surface: SurfaceHandle) -> Result<SwapChainHandle>;
    fn create_renderer(&mut self) -> Result<RendererHandle>;
    fn create_view(&mut self) -> Result<ViewHandle>;
    fn create_sampler(&mut self, config: SamplerConfig) -> Result<SamplerHandle>;
    fn set_view_scene(&mut self, view: ViewHandle, scene: SceneHandle) -> Result<()>;

    /// One frame submission: draw the view into the swap chain.
    fn render(
        &mut self,
        renderer: RendererHandle,
        swap_chain: SwapChainHandle,
        view: ViewHandle,
    ) -> Result<()>;

    fn create_entity(&mut self) -> Result<Entity>;
    /// Commit a directional-light descriptor against a previously allocated
    /// entity.
    fn build_sun_light(&mut self, entity: Entity, light: &SunLight) -> Result<()>;
    fn add_entity(&mut self, scene: SceneHandle, entity: Entity) -> Result<()>;
    fn remove_entity(&mut self, scene: SceneHandle, entity: Entity) -> Result<()>;

    fn create_camera(&mut self) -> Result<CameraHandle>;
    fn set_view_camera(&mut self, view: ViewHandle, camera: CameraHandle) -> Result<()>;
    fn set_viewport(&mut self, view: ViewHandle, viewport: Viewport) -> Result<()>;
    fn look_at(
        &mut self,
        camera: CameraHandle,
        eye: Point3<f32>,
        center: Point3<f32>,
        up: Vector3<f32>,
    ) -> Result<()>;
    fn set_projection(&mut self, camera: CameraHandle, projection: Projection) -> Result<()>;

    fn load_indirect_light(&mut self, url: &str) -> Result<IndirectLightHandle>;
    fn set_indirect_light(&mut self, scene: SceneHandle, light: IndirectLightHandle) -> Result<()>;
    fn set_indirect_intensity(&mut self, light: IndirectLightHandle, intensity: f32) -> Result<()>;
    fn load_skybox(&mut self, url: &str) -> Result<SkyboxHandle>;
    fn set_skybox(&mut self, scene: SceneHandle, skybox: SkyboxHandle) -> Result<()>;

    fn create_material(&mut self, url: &str) -> Result<MaterialHandle>;
    fn create_material_instance(
        &mut self,
        material: MaterialHandle,
    ) -> Result<MaterialInstanceHandle>;
    fn load_texture(&mut self, url: &str, format: TextureFormat, srgb: bool)
    -> Result<TextureHandle>;
    fn set_texture_parameter(
        &mut self,
        instance: MaterialInstanceHandle,
        parameter: &str,
        texture: TextureHandle,
        sampler: SamplerHandle,
    ) -> Result<()>;
    /// Load a mesh bound to a material instance (or to none) and return its
    /// drawable entity.
    fn load_mesh(
        &mut self,
        url: &str,
        instance: Option<MaterialInstanceHandle>,
    ) -> Result<Entity>;

    fn set_transform(&mut self, entity: Entity, transform: Matrix4<f32>) -> Result<()>;

    /// Release every engine resource. No handle is valid afterwards.
    fn destroy(&mut self) -> Result<()>;
}
