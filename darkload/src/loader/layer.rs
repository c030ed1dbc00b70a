use serde::{Deserialize, Serialize};

/// Layer kinds that carry trained variables; every other kind contributes
/// nothing to a parameter file.
pub const VAR_LAYERS: [&str; 2] = ["convolutional", "connected"];

/// Order in which each field of a layer is flattened into a .weights file.
/// The file layout is authoritative: declared shapes only filter which
/// fields are present, never their order.
pub fn field_order(kind: &str) -> &'static [&'static str] {
    match kind {
        "convolutional" => &["biases", "scale", "mean", "var", "kernel"],
        "connected" => &["biases", "weights"],
        _ => &[],
    }
}

/// Graph-construction-time record describing one network layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub kind: String,
    pub signature: Vec<i64>,
}

impl LayerDescriptor {
    pub fn new(
        kind: impl Into<String>,
        signature: Vec<i64>,
    ) -> Self {
        Self {
            kind: kind.into(),
            signature,
        }
    }

    pub fn carries_variables(&self) -> bool {
        VAR_LAYERS.contains(&self.kind.as_str())
    }
}

/// Staged per-layer parameter set, produced by an external factory and
/// filled field by field from the parameter file.
pub trait ParameterBlock {
    fn kind(&self) -> &str;

    /// Whether `field` appears in the block's declared shape mapping.
    fn declares(
        &self,
        field: &str,
    ) -> bool;

    /// Number of float32 elements `field` occupies in the file.
    fn field_size(
        &self,
        field: &str,
    ) -> usize;

    fn assign(
        &mut self,
        field: &str,
        values: Vec<f32>,
    );

    /// Called exactly once, after every declared field has been assigned.
    fn finalize(&mut self);
}

/// External constructor of runtime parameter blocks.
///
/// `None` is the refusal sentinel: the layer still occupies a slot in the
/// store, but no bytes are consumed for it.
pub trait BlockFactory {
    type Block: ParameterBlock;

    fn create(
        &self,
        layer_index: usize,
        signature: &[i64],
    ) -> Option<Self::Block>;
}
