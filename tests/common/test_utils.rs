//! A recording engine backend for the integration tests: every call is
//! logged, handles are allocated from a counter, nothing touches a GPU.

use anyhow::anyhow;
use pbr_scene::backend::{
    Backend, CameraHandle, Entity, IndirectLightHandle, MaterialHandle, MaterialInstanceHandle,
    Projection, RendererHandle, SamplerConfig, SamplerHandle, SceneHandle, SkyboxHandle, SunLight,
    SurfaceHandle, SwapChainHandle, TextureFormat, TextureHandle, ViewHandle, Viewport,
};
use pbr_scene::error::Result;
use pbr_scene::{Matrix4, Point3, Vector3};

/// Captures `log` output in test runs; safe to call more than once.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Init(Vec<String>),
    CreateSurface(u32, u32),
    CreateScene,
    CreateSwapChain(u64),
    CreateRenderer,
    CreateView,
    CreateSampler(SamplerConfig),
    SetViewScene(u64, u64),
    Render,
    CreateEntity(u64),
    BuildSunLight(u64, SunLight),
    AddEntity(u64),
    RemoveEntity(u64),
    CreateCamera(u64),
    SetViewCamera(u64, u64),
    SetViewport(Viewport),
    LookAt(Point3<f32>, Point3<f32>, Vector3<f32>),
    SetProjection(Projection),
    LoadIndirectLight(String),
    SetIndirectLight(u64),
    SetIndirectIntensity(u64, f32),
    LoadSkybox(String),
    SetSkybox(u64),
    CreateMaterial(String),
    CreateMaterialInstance(u64),
    LoadTexture(String, TextureFormat, bool),
    SetTextureParameter(u64, String, u64, u64),
    LoadMesh(String, Option<u64>),
    SetTransform(u64, Matrix4<f32>),
    Destroy,
}

pub struct RecordingBackend {
    next_handle: u64,
    pub calls: Vec<Call>,
    /// Makes `init` report an engine failure, for error-propagation tests.
    pub fail_init: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            calls: Vec::new(),
            fail_init: false,
        }
    }

    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    pub fn count(&self, matcher: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| matcher(call)).count()
    }
}

impl Backend for RecordingBackend {
    fn init(&mut self, asset_urls: &[&str]) -> Result<()> {
        if self.fail_init {
            return Err(anyhow!("engine refused to initialize").into());
        }
        self.calls
            .push(Call::Init(asset_urls.iter().map(|u| u.to_string()).collect()));
        Ok(())
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<SurfaceHandle> {
        self.calls.push(Call::CreateSurface(width, height));
        Ok(SurfaceHandle(self.handle()))
    }

    fn create_scene(&mut self) -> Result<SceneHandle> {
        self.calls.push(Call::CreateScene);
        Ok(SceneHandle(self.handle()))
    }

    fn create_swap_chain(&mut self, surface: SurfaceHandle) -> Result<SwapChainHandle> {
        self.calls.push(Call::CreateSwapChain(surface.0));
        Ok(SwapChainHandle(self.handle()))
    }

    fn create_renderer(&mut self) -> Result<RendererHandle> {
        self.calls.push(Call::CreateRenderer);
        Ok(RendererHandle(self.handle()))
    }

    fn create_view(&mut self) -> Result<ViewHandle> {
        self.calls.push(Call::CreateView);
        Ok(ViewHandle(self.handle()))
    }

    fn create_sampler(&mut self, config: SamplerConfig) -> Result<SamplerHandle> {
        self.calls.push(Call::CreateSampler(config));
        Ok(SamplerHandle(self.handle()))
    }

    fn set_view_scene(&mut self, view: ViewHandle, scene: SceneHandle) -> Result<()> {
        self.calls.push(Call::SetViewScene(view.0, scene.0));
        Ok(())
    }

    fn render(
        &mut self,
        _renderer: RendererHandle,
        _swap_chain: SwapChainHandle,
        _view: ViewHandle,
    ) -> Result<()> {
        self.calls.push(Call::Render);
        Ok(())
    }

    fn create_entity(&mut self) -> Result<Entity> {
        let entity = Entity(self.handle());
        self.calls.push(Call::CreateEntity(entity.0));
        Ok(entity)
    }

    fn build_sun_light(&mut self, entity: Entity, light: &SunLight) -> Result<()> {
        self.calls.push(Call::BuildSunLight(entity.0, *light));
        Ok(())
    }

    fn add_entity(&mut self, _scene: SceneHandle, entity: Entity) -> Result<()> {
        self.calls.push(Call::AddEntity(entity.0));
        Ok(())
    }

    fn remove_entity(&mut self, _scene: SceneHandle, entity: Entity) -> Result<()> {
        self.calls.push(Call::RemoveEntity(entity.0));
        Ok(())
    }

    fn create_camera(&mut self) -> Result<CameraHandle> {
        let camera = CameraHandle(self.handle());
        self.calls.push(Call::CreateCamera(camera.0));
        Ok(camera)
    }

    fn set_view_camera(&mut self, view: ViewHandle, camera: CameraHandle) -> Result<()> {
        self.calls.push(Call::SetViewCamera(view.0, camera.0));
        Ok(())
    }

    fn set_viewport(&mut self, _view: ViewHandle, viewport: Viewport) -> Result<()> {
        self.calls.push(Call::SetViewport(viewport));
        Ok(())
    }

    fn look_at(
        &mut self,
        _camera: CameraHandle,
        eye: Point3<f32>,
        center: Point3<f32>,
        up: Vector3<f32>,
    ) -> Result<()> {
        self.calls.push(Call::LookAt(eye, center, up));
        Ok(())
    }

    fn set_projection(&mut self, _camera: CameraHandle, projection: Projection) -> Result<()> {
        self.calls.push(Call::SetProjection(projection));
        Ok(())
    }

    fn load_indirect_light(&mut self, url: &str) -> Result<IndirectLightHandle> {
        self.calls.push(Call::LoadIndirectLight(url.to_owned()));
        Ok(IndirectLightHandle(self.handle()))
    }

    fn set_indirect_light(&mut self, _scene: SceneHandle, light: IndirectLightHandle) -> Result<()> {
        self.calls.push(Call::SetIndirectLight(light.0));
        Ok(())
    }

    fn set_indirect_intensity(&mut self, light: IndirectLightHandle, intensity: f32) -> Result<()> {
        self.calls.push(Call::SetIndirectIntensity(light.0, intensity));
        Ok(())
    }

    fn load_skybox(&mut self, url: &str) -> Result<SkyboxHandle> {
        self.calls.push(Call::LoadSkybox(url.to_owned()));
        Ok(SkyboxHandle(self.handle()))
    }

    fn set_skybox(&mut self, _scene: SceneHandle, skybox: SkyboxHandle) -> Result<()> {
        self.calls.push(Call::SetSkybox(skybox.0));
        Ok(())
    }

    fn create_material(&mut self, url: &str) -> Result<MaterialHandle> {
        self.calls.push(Call::CreateMaterial(url.to_owned()));
        Ok(MaterialHandle(self.handle()))
    }

    fn create_material_instance(
        &mut self,
        material: MaterialHandle,
    ) -> Result<MaterialInstanceHandle> {
        self.calls.push(Call::CreateMaterialInstance(material.0));
        Ok(MaterialInstanceHandle(self.handle()))
    }

    fn load_texture(
        &mut self,
        url: &str,
        format: TextureFormat,
        srgb: bool,
    ) -> Result<TextureHandle> {
        self.calls
            .push(Call::LoadTexture(url.to_owned(), format, srgb));
        Ok(TextureHandle(self.handle()))
    }

    fn set_texture_parameter(
        &mut self,
        instance: MaterialInstanceHandle,
        parameter: &str,
        texture: TextureHandle,
        sampler: SamplerHandle,
    ) -> Result<()> {
        self.calls.push(Call::SetTextureParameter(
            instance.0,
            parameter.to_owned(),
            texture.0,
            sampler.0,
        ));
        Ok(())
    }

    fn load_mesh(
        &mut self,
        url: &str,
        instance: Option<MaterialInstanceHandle>,
    ) -> Result<Entity> {
        self.calls
            .push(Call::LoadMesh(url.to_owned(), instance.map(|i| i.0)));
        Ok(Entity(self.handle()))
    }

    fn set_transform(&mut self, entity: Entity, transform: Matrix4<f32>) -> Result<()> {
        self.calls.push(Call::SetTransform(entity.0, transform));
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.calls.push(Call::Destroy);
        Ok(())
    }
}
