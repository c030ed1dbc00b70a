pub mod loader;
pub use loader::{
    BlockFactory, CheckpointBackend, CheckpointLoader, CheckpointSession,
    Float32Walker, KeySegment, LayerDescriptor, LoadedParameters, Loader,
    LoaderError, ParameterBlock, ParameterKey, ParameterStore,
    RestoredVariable, WEIGHTS_HEADER_SIZE, WeightsLoader, create_loader,
    load_parameters,
};

pub mod names;
pub use names::model_name;
