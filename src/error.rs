//! Error types for the scene adapter.
//!
//! Every failure a build step can surface is covered by [`SceneError`].
//! Backend implementations report their own failures through the
//! [`SceneError::Backend`] variant, which wraps an [`anyhow::Error`] so
//! engines are free to use whatever error types they like internally.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    /// The element handed to [`SceneRoot::mount`](crate::scene::SceneRoot::mount)
    /// is not a `pbr-scene` element. Contributor elements only function when
    /// nested under a scene root.
    #[error("<{tag}> must be nested inside a <pbr-scene> element")]
    MissingSceneRoot { tag: String },

    /// A required asset-reference attribute is absent.
    #[error("could not find attribute `{attribute}` on <{tag}>")]
    MissingAttribute { attribute: String, tag: String },

    /// An asset reference names an id with no matching `pbr-asset` declaration.
    #[error("could not find asset with id `{id}`")]
    UnresolvedAsset { id: String },

    /// An environment map resolved to a URL the engine cannot ingest.
    #[error(
        "asset `{id}` resolves to `{url}` which is not a .ktx bundle; \
         use the default environment or regenerate the map as a .ktx file"
    )]
    WrongAssetFormat { id: String, url: String },

    /// An operation that needs live engine handles ran before
    /// [`SceneRoot::initialize`](crate::scene::SceneRoot::initialize).
    #[error("the scene root has not been initialized")]
    NotInitialized,

    /// Failure reported by the rendering backend.
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}
