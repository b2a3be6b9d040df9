use crate::constants::INITIAL_CAPACITY;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum array/object nesting. `None` leaves recursion unbounded, so
    /// pathologically deep input can exhaust the stack.
    pub max_depth: Option<usize>,
    /// Starting bucket count for every object table built by the parser.
    pub object_capacity: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_object_capacity(mut self, object_capacity: usize) -> Self {
        self.object_capacity = object_capacity.max(1);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            object_capacity: INITIAL_CAPACITY,
        }
    }
}
