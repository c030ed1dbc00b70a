use std::path::{Path, PathBuf};

use ndarray::ArrayD;

use super::{
    error::LoaderError,
    store::{ParameterKey, ParameterStore},
};

/// One variable recovered from a checkpoint, named as the framework
/// stored it (possibly with a trailing `:index` suffix).
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredVariable {
    pub name: String,
    pub value: ArrayD<f32>,
}

/// Live restore scope of an external checkpoint framework. All framework
/// resources behind it (graph, session) must be released when the value
/// is dropped, on every exit path.
pub trait CheckpointSession {
    /// Every restored variable, in the order the framework enumerates
    /// them.
    fn variables(&mut self) -> Result<Vec<RestoredVariable>, LoaderError>;
}

/// External checkpoint framework, opaque to the loader: it owns both the
/// on-disk format and the variable values.
pub trait CheckpointBackend {
    type Session: CheckpointSession;

    /// Restores `checkpoint` using its companion metadata file into a
    /// fresh session scope.
    fn restore(
        &self,
        checkpoint: &Path,
        meta: &Path,
    ) -> Result<Self::Session, LoaderError>;
}

/// Resolves parameters from a framework checkpoint. No byte-level parsing
/// happens here; the backend session is the authority for both structure
/// and values.
pub struct CheckpointLoader<C: CheckpointBackend> {
    backend: C,
}

impl<C: CheckpointBackend> CheckpointLoader<C> {
    pub fn new(backend: C) -> Self {
        Self {
            backend,
        }
    }

    /// Restores every variable of the checkpoint at `path` into a store
    /// keyed by `(bare name, shape)`, in enumeration order. The restore
    /// scope is torn down before the store is handed back.
    pub fn load(
        &self,
        path: &Path,
    ) -> Result<ParameterStore<ArrayD<f32>>, LoaderError> {
        let meta = meta_path(path);
        let mut session = self.backend.restore(path, &meta)?;

        let mut store = ParameterStore::new();
        for variable in session.variables()? {
            let bare_name = variable
                .name
                .split(':')
                .next()
                .unwrap_or_default()
                .to_string();
            let shape = variable.value.shape().to_vec();
            store.insert(ParameterKey::variable(bare_name, shape), variable.value);
        }

        drop(session);
        Ok(store)
    }
}

/// Companion metadata file of a checkpoint: the checkpoint path with
/// `.meta` appended (not substituted).
fn meta_path(checkpoint: &Path) -> PathBuf {
    let mut raw = checkpoint.as_os_str().to_owned();
    raw.push(".meta");
    PathBuf::from(raw)
}
