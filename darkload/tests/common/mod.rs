#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use darkload::{
    BlockFactory, CheckpointBackend, CheckpointSession, LayerDescriptor,
    LoaderError, ParameterBlock, RestoredVariable,
};
use tempfile::{Builder, NamedTempFile};

/// Parameter block double that records every assignment in call order.
#[derive(Debug)]
pub struct TestBlock {
    pub kind: String,
    pub layer_index: usize,
    pub signature: Vec<i64>,
    pub declared: Vec<(String, usize)>,
    pub assigned: Vec<(String, Vec<f32>)>,
    pub finalized: bool,
}

impl ParameterBlock for TestBlock {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn declares(
        &self,
        field: &str,
    ) -> bool {
        self.declared.iter().any(|(name, _)| name == field)
    }

    fn field_size(
        &self,
        field: &str,
    ) -> usize {
        self.declared
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, size)| *size)
            .unwrap_or(0)
    }

    fn assign(
        &mut self,
        field: &str,
        values: Vec<f32>,
    ) {
        self.assigned.push((field.to_string(), values));
    }

    fn finalize(&mut self) {
        assert!(!self.finalized, "finalize called twice");
        self.finalized = true;
    }
}

/// Factory double: knows the layer list and, per layer index, which
/// fields the produced block declares. Declaration order is deliberately
/// under the test's control.
pub struct TestFactory {
    layers: Vec<LayerDescriptor>,
    declarations: HashMap<usize, Vec<(String, usize)>>,
}

impl TestFactory {
    pub fn new(
        layers: &[LayerDescriptor],
        declarations: &[(usize, &[(&str, usize)])],
    ) -> Self {
        Self {
            layers: layers.to_vec(),
            declarations: declarations
                .iter()
                .map(|(index, fields)| {
                    let fields = fields
                        .iter()
                        .map(|(name, size)| (name.to_string(), *size))
                        .collect();
                    (*index, fields)
                })
                .collect(),
        }
    }
}

impl BlockFactory for TestFactory {
    type Block = TestBlock;

    fn create(
        &self,
        layer_index: usize,
        signature: &[i64],
    ) -> Option<TestBlock> {
        let declared = self.declarations.get(&layer_index)?.clone();
        Some(TestBlock {
            kind: self.layers[layer_index].kind.clone(),
            layer_index,
            signature: signature.to_vec(),
            declared,
            assigned: Vec::new(),
            finalized: false,
        })
    }
}

/// Checkpoint session double; flips `released` when the loader drops it.
pub struct TestSession {
    variables: Vec<RestoredVariable>,
    released: Rc<Cell<bool>>,
}

impl CheckpointSession for TestSession {
    fn variables(&mut self) -> Result<Vec<RestoredVariable>, LoaderError> {
        Ok(self.variables.clone())
    }
}

impl Drop for TestSession {
    fn drop(&mut self) {
        self.released.set(true);
    }
}

/// Checkpoint backend double serving a fixed variable list and recording
/// the paths it was asked to restore from.
pub struct TestBackend {
    pub variables: Vec<RestoredVariable>,
    pub fail: bool,
    pub released: Rc<Cell<bool>>,
    pub restored_from: Rc<RefCell<Option<(PathBuf, PathBuf)>>>,
}

impl TestBackend {
    pub fn new(variables: Vec<RestoredVariable>) -> Self {
        Self {
            variables,
            fail: false,
            released: Rc::new(Cell::new(false)),
            restored_from: Rc::new(RefCell::new(None)),
        }
    }
}

impl CheckpointBackend for TestBackend {
    type Session = TestSession;

    fn restore(
        &self,
        checkpoint: &Path,
        meta: &Path,
    ) -> Result<TestSession, LoaderError> {
        if self.fail {
            return Err(LoaderError::CheckpointRestore {
                path: checkpoint.to_path_buf(),
                reason: "missing metadata".to_string(),
            });
        }
        *self.restored_from.borrow_mut() =
            Some((checkpoint.to_path_buf(), meta.to_path_buf()));
        Ok(TestSession {
            variables: self.variables.clone(),
            released: Rc::clone(&self.released),
        })
    }
}

/// Backend for tests that never touch the checkpoint path.
pub fn unused_backend() -> TestBackend {
    TestBackend::new(Vec::new())
}

/// Writes a 16-byte header followed by `floats`, into a file whose name
/// carries the flat-binary marker.
pub fn write_weights_file(floats: &[f32]) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("model-")
        .suffix(".weights")
        .tempfile()
        .unwrap();
    file.write_all(&[0u8; 16]).unwrap();
    for value in floats {
        file.write_all(&value.to_le_bytes()).unwrap();
    }
    file.flush().unwrap();
    file
}

/// A small graph: convolutional, maxpool, connected.
pub fn sample_layers() -> Vec<LayerDescriptor> {
    vec![
        LayerDescriptor::new("convolutional", vec![3, 3, 16]),
        LayerDescriptor::new("maxpool", vec![2]),
        LayerDescriptor::new("connected", vec![6, 3]),
    ]
}
