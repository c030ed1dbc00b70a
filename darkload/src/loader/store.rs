/// One element of a composite parameter key.
///
/// Weights-sourced entries are keyed by the stable index of their layer in
/// the descriptor list. Checkpoint-sourced entries are keyed by the bare
/// variable name followed by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySegment {
    Layer(usize),
    Name(String),
    Shape(Vec<usize>),
}

/// Composite lookup identifier: an ordered segment sequence supporting
/// suffix-based fallback matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterKey(Vec<KeySegment>);

impl ParameterKey {
    pub fn layer(index: usize) -> Self {
        Self(vec![KeySegment::Layer(index)])
    }

    pub fn variable(
        name: impl Into<String>,
        shape: Vec<usize>,
    ) -> Self {
        Self(vec![KeySegment::Name(name.into()), KeySegment::Shape(shape)])
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }
}

impl From<Vec<KeySegment>> for ParameterKey {
    fn from(segments: Vec<KeySegment>) -> Self {
        Self(segments)
    }
}

/// Ordered key/value store with consume-on-match lookup.
///
/// Keys and values are held in two parallel sequences in discovery order.
/// A successful lookup removes the matched entry, so every stored
/// parameter set is handed out at most once.
#[derive(Debug)]
pub struct ParameterStore<V> {
    keys: Vec<ParameterKey>,
    values: Vec<V>,
}

impl<V> Default for ParameterStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ParameterStore<V> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn insert(
        &mut self,
        key: ParameterKey,
        value: V,
    ) {
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn keys(&self) -> impl Iterator<Item = &ParameterKey> {
        self.keys.iter()
    }

    /// Finds and consumes the entry matching `key`, retrying with suffixes
    /// of the query key obtained by dropping leading segments one at a
    /// time. A query suffix matches a stored key by whole-key equality.
    ///
    /// `None` means no stored entry matched; the caller decides the
    /// fallback policy for such layers.
    pub fn lookup(
        &mut self,
        key: &ParameterKey,
    ) -> Option<V> {
        for idx in 0..key.segments().len() {
            let candidate = &key.segments()[idx..];
            if let Some(position) =
                self.keys.iter().position(|stored| stored.segments() == candidate)
            {
                return Some(self.consume(position));
            }
        }
        None
    }

    fn consume(
        &mut self,
        position: usize,
    ) -> V {
        self.keys.remove(position);
        self.values.remove(position)
    }
}
