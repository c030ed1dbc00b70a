use std::path::Path;

use ndarray::ArrayD;

mod error;
pub use error::LoaderError;
mod store;
pub use store::{KeySegment, ParameterKey, ParameterStore};
mod walker;
pub use walker::Float32Walker;
mod layer;
pub use layer::{
    BlockFactory, LayerDescriptor, ParameterBlock, VAR_LAYERS, field_order,
};
mod weights;
pub use weights::{WEIGHTS_HEADER_SIZE, WeightsLoader};
mod checkpoint;
pub use checkpoint::{
    CheckpointBackend, CheckpointLoader, CheckpointSession, RestoredVariable,
};

/// File-name substring marking the flat-binary parameter format.
pub const WEIGHTS_MARKER: &str = "weights";

/// Result of one resolution pass, tagged by the source format.
#[derive(Debug)]
pub enum LoadedParameters<B> {
    Weights {
        store: ParameterStore<Option<B>>,
        bytes_consumed: u64,
    },
    Checkpoint {
        store: ParameterStore<ArrayD<f32>>,
    },
}

/// Parameter resolver for one source format, chosen once at construction.
pub enum Loader<F: BlockFactory, C: CheckpointBackend> {
    Weights(WeightsLoader<F>),
    Checkpoint(CheckpointLoader<C>),
}

impl<F: BlockFactory, C: CheckpointBackend> Loader<F, C> {
    pub fn load(
        &self,
        path: Option<&Path>,
        layers: &[LayerDescriptor],
    ) -> Result<LoadedParameters<F::Block>, LoaderError> {
        match self {
            Loader::Weights(loader) => {
                let (store, bytes_consumed) = loader.load(path, layers)?;
                Ok(LoadedParameters::Weights {
                    store,
                    bytes_consumed,
                })
            },
            Loader::Checkpoint(loader) => {
                let path = path.ok_or(LoaderError::MissingCheckpointPath)?;
                let store = loader.load(path)?;
                Ok(LoadedParameters::Checkpoint {
                    store,
                })
            },
        }
    }
}

/// Picks the resolver for `path`: an absent path or a file name carrying
/// the flat-binary marker means .weights, anything else is treated as a
/// framework checkpoint. The layer list is opaque here and only consumed
/// by the weights path.
pub fn create_loader<F: BlockFactory, C: CheckpointBackend>(
    path: Option<&Path>,
    factory: F,
    backend: C,
) -> Loader<F, C> {
    let flat_binary = match path {
        None => true,
        Some(path) => path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains(WEIGHTS_MARKER)),
    };
    if flat_binary {
        Loader::Weights(WeightsLoader::new(factory))
    } else {
        Loader::Checkpoint(CheckpointLoader::new(backend))
    }
}

/// Creates the right resolver for `path` and runs the full resolution
/// pass in one call.
pub fn load_parameters<F: BlockFactory, C: CheckpointBackend>(
    path: Option<&Path>,
    layers: &[LayerDescriptor],
    factory: F,
    backend: C,
) -> Result<LoadedParameters<F::Block>, LoaderError> {
    create_loader(path, factory, backend).load(path, layers)
}
