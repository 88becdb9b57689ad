//! Logical tensor shapes.

/// Ordered dimension sizes of a dense row-major tensor, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Builds a shape from the given dimensions.
    ///
    /// Panics if `dims` is empty; every tensor has at least one axis.
    pub fn new<D: Into<Vec<usize>>>(dims: D) -> Self {
        let dims = dims.into();
        assert!(!dims.is_empty(), "shape must have at least one dimension");
        Shape { dims }
    }

    /// The raw dimension slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total element count implied by the dimensions.
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }
}
