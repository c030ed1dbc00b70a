use std::path::Path;

use super::{
    error::LoaderError,
    layer::{BlockFactory, LayerDescriptor, ParameterBlock, field_order},
    store::{ParameterKey, ParameterStore},
    walker::Float32Walker,
};

/// Bytes of format/version fields at the head of a .weights file. Opaque
/// to the loader; parameter data starts right after.
pub const WEIGHTS_HEADER_SIZE: u64 = 16;

/// Resolves layer parameters from a flat .weights file in a single
/// sequential pass over the file.
pub struct WeightsLoader<F: BlockFactory> {
    factory: F,
}

impl<F: BlockFactory> WeightsLoader<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
        }
    }

    /// Walks `layers` in graph order, staging one parameter block per
    /// variable-carrying layer, keyed by the layer's index. Once the file
    /// is exhausted, remaining variable-carrying layers are registered
    /// with the no-value sentinel so positions stay aligned with the
    /// layer list.
    ///
    /// Returns the populated store and the total bytes consumed. Any
    /// unconsumed trailing bytes are a format error.
    pub fn load(
        &self,
        path: Option<&Path>,
        layers: &[LayerDescriptor],
    ) -> Result<(ParameterStore<Option<F::Block>>, u64), LoaderError> {
        let mut walker = Float32Walker::open(path, WEIGHTS_HEADER_SIZE)?;
        let mut store = ParameterStore::new();

        for (index, layer) in layers.iter().enumerate() {
            if !layer.carries_variables() {
                continue;
            }

            let mut block = if walker.eof() {
                None
            } else {
                self.factory.create(index, &layer.signature)
            };

            if let Some(block) = block.as_mut() {
                for field in field_order(block.kind()) {
                    if !block.declares(field) {
                        continue;
                    }
                    if let Some(values) = walker.walk(block.field_size(field))? {
                        block.assign(field, values);
                    }
                }
                block.finalize();
            }

            store.insert(ParameterKey::layer(index), block);
        }

        let bytes_consumed = walker.finish()?;
        Ok((store, bytes_consumed))
    }
}
