//! The scene root: owns the backend, the asset map and the contributors.
//!
//! Setup is two-phase. [`SceneRoot::mount`] walks the element tree
//! synchronously, collecting `pbr-asset` declarations and contributor
//! elements, so asset discovery can never race child materialization.
//! [`SceneRoot::initialize`] then brings the engine up: asset init, surface
//! and sub-object creation, view/scene binding, and finally one `build` per
//! contributor in document order. Contributors therefore never see dead
//! engine handles.
//!
//! The root owns both notifications contributors react to: "loaded" is the
//! contributor build pass at the end of `initialize`, "resized" is
//! [`SceneRoot::resize`] fanning out to every contributor. Teardown is
//! explicit via [`SceneRoot::shutdown`].

use std::collections::HashMap;

use crate::{
    backend::{
        Backend, Entity, RendererHandle, SamplerConfig, SamplerHandle, SceneHandle,
        SwapChainHandle, ViewHandle,
    },
    contributors::{
        BuildContext, CameraContributor, Contributor, EnvironmentContributor, ModelContributor,
        RebuildContext, SunContributor,
    },
    error::{Result, SceneError},
    frame::FrameScheduler,
    markup::{Element, Tag},
};

/// Fallback surface dimension when the root element declares none.
const DEFAULT_DIMENSION: u32 = 500;

/// One `pbr-asset` declaration, immutable after mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDeclaration {
    pub name: String,
    pub src: String,
}

/// Identifies a contributor within its scene root. Ids are assigned in
/// document order at mount time and stay stable for the root's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContributorId(usize);

struct EngineObjects {
    scene: SceneHandle,
    swap_chain: SwapChainHandle,
    renderer: RendererHandle,
    view: ViewHandle,
    sampler: SamplerHandle,
}

struct Slot<B: Backend + 'static> {
    element: Element,
    contributor: Box<dyn Contributor<B>>,
    entity: Option<Entity>,
}

pub struct SceneRoot<B: Backend + 'static> {
    backend: B,
    declarations: Vec<AssetDeclaration>,
    assets: HashMap<String, String>,
    width: u32,
    height: u32,
    loaded: bool,
    frames_rendered: u64,
    objects: Option<EngineObjects>,
    slots: Vec<Slot<B>>,
}

impl<B: Backend + 'static> std::fmt::Debug for SceneRoot<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRoot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("loaded", &self.loaded)
            .field("frames_rendered", &self.frames_rendered)
            .finish_non_exhaustive()
    }
}

impl<B: Backend + 'static> SceneRoot<B> {
    /// Phase one: bind a backend to a `pbr-scene` element and collect what
    /// its subtree declares. No engine call happens yet.
    pub fn mount(backend: B, element: &Element) -> Result<Self> {
        if element.tag() != Tag::Scene {
            log::error!(
                "<{}> must be nested inside a pbr-scene element",
                element.tag().name()
            );
            return Err(SceneError::MissingSceneRoot {
                tag: element.tag().name().to_owned(),
            });
        }

        let width = dimension(element, "width");
        let height = dimension(element, "height");

        let mut declarations = Vec::new();
        let mut assets = HashMap::new();
        let mut slots = Vec::new();
        for descendant in element.descendants() {
            match descendant.tag() {
                Tag::Asset => {
                    let declaration = asset_declaration(descendant)?;
                    assets.insert(declaration.name.clone(), declaration.src.clone());
                    declarations.push(declaration);
                }
                tag => {
                    if let Some(contributor) = contributor_for(tag) {
                        slots.push(Slot {
                            element: descendant.clone(),
                            contributor,
                            entity: None,
                        });
                    }
                }
            }
        }

        log::info!(
            "mounted pbr-scene: {}x{}, {} asset(s), {} contributor(s)",
            width,
            height,
            declarations.len(),
            slots.len()
        );

        Ok(Self {
            backend,
            declarations,
            assets,
            width,
            height,
            loaded: false,
            frames_rendered: 0,
            objects: None,
            slots,
        })
    }

    /// Phase two: engine init with the collected asset URLs, surface and
    /// sub-object creation, then the contributor build pass.
    pub fn initialize(&mut self) -> Result<()> {
        let urls: Vec<&str> = self.declarations.iter().map(|a| a.src.as_str()).collect();
        self.backend.init(&urls)?;

        let surface = self.backend.create_surface(self.width, self.height)?;
        let scene = self.backend.create_scene()?;
        let sampler = self.backend.create_sampler(SamplerConfig::trilinear_clamped())?;
        let swap_chain = self.backend.create_swap_chain(surface)?;
        let renderer = self.backend.create_renderer()?;
        let view = self.backend.create_view()?;
        self.backend.set_view_scene(view, scene)?;

        self.objects = Some(EngineObjects {
            scene,
            swap_chain,
            renderer,
            view,
            sampler,
        });
        self.loaded = true;

        for index in 0..self.slots.len() {
            self.load_contributor(index)?;
        }
        log::info!("pbr-scene initialized, {} contributor(s) built", self.slots.len());
        Ok(())
    }

    fn load_contributor(&mut self, index: usize) -> Result<()> {
        let objects = self.objects.as_ref().ok_or(SceneError::NotInitialized)?;
        let (scene, view, sampler) = (objects.scene, objects.view, objects.sampler);
        let (width, height) = (self.width, self.height);
        let slot = &mut self.slots[index];
        let cx = BuildContext {
            backend: &mut self.backend,
            scene,
            view,
            sampler,
            assets: &self.assets,
            width,
            height,
        };
        if let Some(entity) = slot.contributor.build(&slot.element, cx)? {
            self.backend.add_entity(scene, entity)?;
            slot.entity = Some(entity);
        }
        Ok(())
    }

    /// Stores the new attribute value and, when the attribute is observed by
    /// an already-loaded contributor, swaps its entity: remove the old one,
    /// rebuild, register the replacement. Unobserved attributes cause no
    /// engine traffic.
    pub fn set_attribute(&mut self, id: ContributorId, name: &str, value: &str) -> Result<()> {
        let slot = &mut self.slots[id.0];
        slot.element.set_attribute(name, value);
        let observed = slot
            .contributor
            .observed_attributes()
            .iter()
            .any(|attribute| *attribute == name);
        if !self.loaded || !observed {
            return Ok(());
        }
        let scene = self.objects.as_ref().ok_or(SceneError::NotInitialized)?.scene;
        if let Some(old) = slot.entity.take() {
            self.backend.remove_entity(scene, old)?;
        }
        let cx = RebuildContext {
            backend: &mut self.backend,
            scene,
            assets: &self.assets,
        };
        if let Some(entity) = slot.contributor.rebuild(&slot.element, cx)? {
            self.backend.add_entity(scene, entity)?;
            slot.entity = Some(entity);
        }
        Ok(())
    }

    /// The host calls this on layout change with the new surface dimensions;
    /// the root stores them and notifies every contributor.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        if !self.loaded {
            return Ok(());
        }
        for slot in &mut self.slots {
            slot.contributor.on_resized(&mut self.backend, width, height)?;
        }
        Ok(())
    }

    /// One render submission of the swap chain and view.
    pub fn render_frame(&mut self) -> Result<()> {
        let objects = self.objects.as_ref().ok_or(SceneError::NotInitialized)?;
        let (renderer, swap_chain, view) = (objects.renderer, objects.swap_chain, objects.view);
        self.backend.render(renderer, swap_chain, view)?;
        self.frames_rendered += 1;
        Ok(())
    }

    /// Drives the render loop until the scheduler declines the next frame or
    /// the root is shut down.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<()> {
        while self.loaded && scheduler.next_frame() {
            self.render_frame()?;
        }
        Ok(())
    }

    /// Explicit end of life: unregister every live entity, release the
    /// engine, stop rendering. The root can not be re-initialized.
    pub fn shutdown(&mut self) -> Result<()> {
        if let Some(objects) = self.objects.take() {
            for slot in &mut self.slots {
                if let Some(entity) = slot.entity.take() {
                    self.backend.remove_entity(objects.scene, entity)?;
                }
            }
            self.backend.destroy()?;
        }
        self.loaded = false;
        log::info!("pbr-scene shut down after {} frame(s)", self.frames_rendered);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn asset_declarations(&self) -> &[AssetDeclaration] {
        &self.declarations
    }

    pub fn assets(&self) -> &HashMap<String, String> {
        &self.assets
    }

    /// Contributors in document order, paired with their stable ids.
    pub fn contributors(&self) -> impl Iterator<Item = (ContributorId, &Element)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (ContributorId(index), &slot.element))
    }

    /// The entity currently registered for a contributor, if any.
    pub fn entity(&self, id: ContributorId) -> Option<Entity> {
        self.slots.get(id.0).and_then(|slot| slot.entity)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn dimension(element: &Element, name: &str) -> u32 {
    element
        .attribute(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(DEFAULT_DIMENSION)
}

fn asset_declaration(element: &Element) -> Result<AssetDeclaration> {
    let required = |attribute: &str| {
        element
            .attribute(attribute)
            .map(str::to_owned)
            .ok_or_else(|| SceneError::MissingAttribute {
                attribute: attribute.to_owned(),
                tag: element.tag().name().to_owned(),
            })
    };
    Ok(AssetDeclaration {
        name: required("name")?,
        src: required("src")?,
    })
}

fn contributor_for<B: Backend + 'static>(tag: Tag) -> Option<Box<dyn Contributor<B>>> {
    match tag {
        Tag::Sun => Some(Box::new(SunContributor)),
        Tag::Environment => Some(Box::new(EnvironmentContributor)),
        Tag::Camera => Some(Box::new(CameraContributor::new())),
        Tag::Model => Some(Box::new(ModelContributor)),
        _ => None,
    }
}
