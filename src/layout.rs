//! Layout: name-addressed sub-ranges of a flat buffer

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// Stack allocation threshold for dimensions
/// Most components have 4 or fewer dimensions, so we stack-allocate up to 4
const STACK_DIMS: usize = 4;

/// Shape type: dimensions of a named component
///
/// An empty shape denotes a scalar (rank 0, one element).
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// One named sub-range of the flat buffer
///
/// Records the component's original shape and its half-open offset range
/// `[start, end)` into the buffer, with `end - start` equal to the element
/// count the shape implies (the empty product for scalars is 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    name: String,
    shape: Shape,
    start: usize,
    end: usize,
}

impl LayoutEntry {
    /// Get the component name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the original shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Start offset into the flat buffer (inclusive)
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset into the flat buffer (exclusive)
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of flat elements covered by this entry
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the entry covers zero elements (a zero-sized array shape)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of dimensions (rank) of the original component
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Check if the component was registered as a scalar (rank 0)
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Human-readable category derived from the rank
    ///
    /// `Number` for rank 0, `<n>-elements Vector` for rank 1,
    /// `Matrix [r, c]` for rank 2, `Array [..]` for rank 3 and above.
    pub fn kind(&self) -> String {
        match self.shape.len() {
            0 => "Number".to_string(),
            1 => format!("{}-elements Vector", self.shape[0]),
            2 => format!("Matrix [{}, {}]", self.shape[0], self.shape[1]),
            _ => format!("Array {:?}", self.shape.as_slice()),
        }
    }
}

impl fmt::Display for LayoutEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}-{})", self.name, self.kind(), self.start, self.end)
    }
}

/// Mapping from component name to shape and offset range
///
/// Entries are kept in insertion order and tile the flat buffer exactly:
/// the first entry starts at 0, each entry starts where the previous one
/// ends, and the last entry ends at `total_len()`. A layout is fixed at
/// construction time; only buffer values mutate afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    entries: Vec<LayoutEntry>,
    total: usize,
}

impl Layout {
    /// Build a layout from named shapes, assigning contiguous offset ranges
    /// in the order supplied
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a name repeats and
    /// [`Error::EmptyLayout`] if the iterator is empty.
    ///
    /// # Example
    /// ```
    /// use named_vec::layout::{Layout, Shape};
    ///
    /// let layout = Layout::from_shapes([
    ///     ("weight".to_string(), Shape::from_slice(&[2, 2])),
    ///     ("bias".to_string(), Shape::new()),
    /// ])?;
    /// assert_eq!(layout.total_len(), 5);
    /// assert_eq!(layout.get("bias").unwrap().start(), 4);
    /// # Ok::<(), named_vec::Error>(())
    /// ```
    pub fn from_shapes<I>(shapes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Shape)>,
    {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut offset = 0usize;

        for (name, shape) in shapes {
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateName { name });
            }
            let len: usize = shape.iter().product();
            entries.push(LayoutEntry {
                name,
                shape,
                start: offset,
                end: offset + len,
            });
            offset += len;
        }

        if entries.is_empty() {
            return Err(Error::EmptyLayout);
        }

        Ok(Self {
            entries,
            total: offset,
        })
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Check whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter()
    }

    /// Iterate over registered names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of named entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the layout has no entries
    ///
    /// Always false for a constructed layout; kept for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of flat buffer elements covered by all entries
    #[inline]
    pub fn total_len(&self) -> usize {
        self.total
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
