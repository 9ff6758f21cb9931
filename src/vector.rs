//! Core NamedVector type

use crate::component::Component;
use crate::error::{Error, Result};
use crate::layout::{Layout, Shape};
use ndarray::{s, Array1, ArrayView1, ArrayViewD, ArrayViewMutD, IxDyn};
use std::fmt;
use std::ops::{Index, IndexMut, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};
use std::sync::Arc;

/// A flat numeric buffer whose sub-ranges are addressable by name
///
/// `NamedVector` concatenates heterogeneous named components (scalars,
/// vectors, matrices, higher-rank arrays) into one contiguous buffer and
/// keeps a [`Layout`] mapping each name back to its original shape and
/// offset range. Named reads return views that share storage with the
/// buffer; positional indexing bypasses the layout entirely.
///
/// The layout is fixed at construction; only buffer values mutate. An
/// elementwise operation between two vectors with identical layouts yields
/// a new `NamedVector` sharing the layout (see [`crate::ops::Dispatch`]);
/// mismatched layouts fall back to a plain [`Array1`].
///
/// # Example
///
/// ```
/// use named_vec::{Component, NamedVector};
/// use ndarray::array;
///
/// let nv = NamedVector::from_components([
///     ("weight", Component::from(array![[1.0, 2.0], [3.0, 4.0]])),
///     ("bias", Component::from(5.0)),
/// ])?;
///
/// assert_eq!(nv.len(), 5);
/// assert_eq!(nv.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(nv.view("weight")?.shape(), &[2, 2]);
/// assert_eq!(nv.scalar("bias")?, 5.0);
/// # Ok::<(), named_vec::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct NamedVector<A> {
    /// Name to (shape, start, end) mapping, shared by dispatch results
    layout: Arc<Layout>,
    /// Flat contiguous buffer holding all components' data
    data: Array1<A>,
}

impl<A> NamedVector<A> {
    /// Build a named vector from `(name, component)` pairs
    ///
    /// Components are laid out contiguously in the order supplied; each is
    /// flattened in row-major order and registered under its original shape
    /// (the empty shape for scalars).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a name repeats and
    /// [`Error::EmptyLayout`] for an empty iterator. No partial instance is
    /// produced on failure.
    pub fn from_components<N, C, I>(components: I) -> Result<Self>
    where
        N: Into<String>,
        C: Into<Component<A>>,
        I: IntoIterator<Item = (N, C)>,
    {
        let mut shapes: Vec<(String, Shape)> = Vec::new();
        let mut buffer: Vec<A> = Vec::new();

        for (name, component) in components {
            let component = component.into();
            shapes.push((name.into(), component.shape()));
            component.extend_into(&mut buffer);
        }

        let layout = Layout::from_shapes(shapes)?;
        debug_assert_eq!(layout.total_len(), buffer.len());

        Ok(Self {
            layout: Arc::new(layout),
            data: Array1::from(buffer),
        })
    }

    /// Create a named vector from a pre-validated layout and buffer
    ///
    /// Internal constructor used by dispatch results so a shared layout is
    /// reused without re-validation. Callers must supply a buffer whose
    /// length equals `layout.total_len()`.
    pub(crate) fn from_parts(layout: Arc<Layout>, data: Array1<A>) -> Self {
        debug_assert_eq!(layout.total_len(), data.len());
        Self { layout, data }
    }

    /// Named read: a view of the component's data, reshaped to its
    /// registered shape
    ///
    /// The view borrows the flat buffer, so no copy is taken; a rank-0
    /// component comes back as a 0-dimensional view holding one value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the name is not registered.
    pub fn view(&self, name: &str) -> Result<ArrayViewD<'_, A>> {
        let entry = self
            .layout
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        let flat = self.data.slice(s![entry.start()..entry.end()]);
        Ok(flat
            .into_shape_with_order(IxDyn(entry.shape()))
            .expect("entry range length equals the product of its shape"))
    }

    /// Named read, mutable: an aliasing view over the component's range
    ///
    /// Writes through the view land directly in the flat buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] if the name is not registered.
    pub fn view_mut(&mut self, name: &str) -> Result<ArrayViewMutD<'_, A>> {
        let entry = self
            .layout
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        let flat = self.data.slice_mut(s![entry.start()..entry.end()]);
        Ok(flat
            .into_shape_with_order(IxDyn(entry.shape()))
            .expect("entry range length equals the product of its shape"))
    }

    /// Read a rank-0 component as a plain value
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] for an unregistered name and
    /// [`Error::ShapeMismatch`] if the component is not rank 0.
    pub fn scalar(&self, name: &str) -> Result<A>
    where
        A: Clone,
    {
        let entry = self
            .layout
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;
        if !entry.is_scalar() {
            return Err(Error::shape_mismatch(&[], entry.shape()));
        }
        Ok(self.data[entry.start()].clone())
    }

    /// Named write
    ///
    /// An array value must match the registered shape exactly, not merely
    /// its element count; on match it is flattened into the component's
    /// range. A scalar value fills every position in the range. On error
    /// the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownName`] for an unregistered name and
    /// [`Error::ShapeMismatch`] for an array of a different shape.
    pub fn set<C>(&mut self, name: &str, value: C) -> Result<()>
    where
        A: Clone,
        C: Into<Component<A>>,
    {
        let entry = self
            .layout
            .get(name)
            .ok_or_else(|| Error::unknown_name(name))?;

        match value.into() {
            Component::Array(a) => {
                if a.shape() != entry.shape() {
                    return Err(Error::shape_mismatch(entry.shape(), a.shape()));
                }
                let mut dst = self.data.slice_mut(s![entry.start()..entry.end()]);
                for (d, v) in dst.iter_mut().zip(a.iter()) {
                    *d = v.clone();
                }
            }
            Component::Scalar(v) => {
                self.data.slice_mut(s![entry.start()..entry.end()]).fill(v);
            }
        }
        Ok(())
    }

    /// The flat buffer as a plain 1-d view, with no layout metadata
    #[inline]
    pub fn as_array(&self) -> ArrayView1<'_, A> {
        self.data.view()
    }

    /// The flat buffer as a slice
    #[inline]
    pub fn as_slice(&self) -> &[A] {
        self.data
            .as_slice()
            .expect("flat buffer is contiguous standard layout")
    }

    /// The flat buffer as a mutable slice
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [A] {
        self.data
            .as_slice_mut()
            .expect("flat buffer is contiguous standard layout")
    }

    /// Copy the flat buffer into an owned plain array
    pub fn to_array(&self) -> Array1<A>
    where
        A: Clone,
    {
        self.data.clone()
    }

    /// Consume the vector, returning the flat buffer
    pub fn into_array(self) -> Array1<A> {
        self.data
    }

    /// Copy the flat buffer into an owned array of another element type
    ///
    /// Returns `None` if any element does not fit the target type (for
    /// example a NaN or out-of-range float cast to an integer).
    pub fn to_array_as<B>(&self) -> Option<Array1<B>>
    where
        A: num_traits::NumCast + Copy,
        B: num_traits::NumCast,
    {
        let mut out = Vec::with_capacity(self.len());
        for &x in self.data.iter() {
            out.push(num_traits::cast(x)?);
        }
        Some(Array1::from(out))
    }

    /// Total number of elements in the flat buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds zero elements
    ///
    /// Only possible when every component is a zero-sized array.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape of the flat buffer: a one-element slice holding the total count
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions of the flat buffer, always 1
    #[inline]
    pub fn ndim(&self) -> usize {
        1
    }

    /// The name-to-range mapping, read-only
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Registered names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layout.names()
    }

    /// Shared handle on the layout, for dispatch results
    #[inline]
    pub(crate) fn layout_arc(&self) -> Arc<Layout> {
        Arc::clone(&self.layout)
    }

    /// Borrow the flat buffer
    #[inline]
    pub(crate) fn data(&self) -> &Array1<A> {
        &self.data
    }

    /// Mutably borrow the flat buffer
    ///
    /// Length must not change; layout offsets depend on it.
    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut Array1<A> {
        &mut self.data
    }
}

impl<A: PartialEq> PartialEq for NamedVector<A> {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.data == other.data
    }
}

/// Positional read: delegates to the flat buffer, bypassing the layout
impl<A> Index<usize> for NamedVector<A> {
    type Output = A;

    #[inline]
    fn index(&self, index: usize) -> &A {
        &self.data[index]
    }
}

/// Positional write: delegates to the flat buffer, bypassing the layout
impl<A> IndexMut<usize> for NamedVector<A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut A {
        &mut self.data[index]
    }
}

macro_rules! impl_range_index {
    ($($range:ty),* $(,)?) => {
        $(
            impl<A> Index<$range> for NamedVector<A> {
                type Output = [A];

                #[inline]
                fn index(&self, index: $range) -> &[A] {
                    &self.as_slice()[index]
                }
            }

            impl<A> IndexMut<$range> for NamedVector<A> {
                #[inline]
                fn index_mut(&mut self, index: $range) -> &mut [A] {
                    &mut self.as_slice_mut()[index]
                }
            }
        )*
    };
}

impl_range_index!(
    Range<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeFull,
    RangeInclusive<usize>,
);

impl<A: fmt::Display> fmt::Display for NamedVector<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}-element NamedVector with layout:", self.len())?;
        writeln!(f, "{}", self.layout)?;
        write!(f, "{}", self.data)
    }
}
