//! Named component values accepted at construction and assignment time

use crate::layout::Shape;
use ndarray::{Array1, Array2, Array3, ArrayD, ArrayView1, ArrayView2, ArrayViewD};

/// A value registered under a name: a single number or an n-dimensional array
///
/// This is the closed set of value kinds a named vector accepts. Anything
/// that cannot convert into a `Component` is rejected at compile time, so
/// there is no runtime "unsupported component type" path.
#[derive(Debug, Clone, PartialEq)]
pub enum Component<A> {
    /// A single number, registered with the empty (rank-0) shape
    Scalar(A),
    /// An array of any rank, registered with its original shape
    Array(ArrayD<A>),
}

impl<A> Component<A> {
    /// The shape this component registers in the layout
    pub fn shape(&self) -> Shape {
        match self {
            Component::Scalar(_) => Shape::new(),
            Component::Array(a) => Shape::from_slice(a.shape()),
        }
    }

    /// Number of flat elements the component contributes to the buffer
    pub fn len(&self) -> usize {
        match self {
            Component::Scalar(_) => 1,
            Component::Array(a) => a.len(),
        }
    }

    /// Check if the component contributes zero elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the component's data to a flat buffer in row-major order
    pub(crate) fn extend_into(self, buffer: &mut Vec<A>) {
        match self {
            Component::Scalar(v) => buffer.push(v),
            Component::Array(a) => buffer.extend(a),
        }
    }
}

impl<A> From<ArrayD<A>> for Component<A> {
    fn from(a: ArrayD<A>) -> Self {
        Component::Array(a)
    }
}

impl<A> From<Array1<A>> for Component<A> {
    fn from(a: Array1<A>) -> Self {
        Component::Array(a.into_dyn())
    }
}

impl<A> From<Array2<A>> for Component<A> {
    fn from(a: Array2<A>) -> Self {
        Component::Array(a.into_dyn())
    }
}

impl<A> From<Array3<A>> for Component<A> {
    fn from(a: Array3<A>) -> Self {
        Component::Array(a.into_dyn())
    }
}

impl<A: Clone> From<ArrayViewD<'_, A>> for Component<A> {
    fn from(a: ArrayViewD<'_, A>) -> Self {
        Component::Array(a.to_owned())
    }
}

impl<A: Clone> From<ArrayView1<'_, A>> for Component<A> {
    fn from(a: ArrayView1<'_, A>) -> Self {
        Component::Array(a.to_owned().into_dyn())
    }
}

impl<A: Clone> From<ArrayView2<'_, A>> for Component<A> {
    fn from(a: ArrayView2<'_, A>) -> Self {
        Component::Array(a.to_owned().into_dyn())
    }
}

impl<A> From<Vec<A>> for Component<A> {
    fn from(v: Vec<A>) -> Self {
        Component::Array(Array1::from(v).into_dyn())
    }
}

impl<A: Clone> From<&[A]> for Component<A> {
    fn from(v: &[A]) -> Self {
        Component::Array(Array1::from(v.to_vec()).into_dyn())
    }
}

/// Scalar conversions for the primitive numeric types
///
/// A blanket `From<A> for Component<A>` would be ambiguous with the array
/// conversions above, so scalars are enumerated per primitive instead.
macro_rules! impl_scalar_component {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Component<$t> {
                fn from(v: $t) -> Self {
                    Component::Scalar(v)
                }
            }
        )*
    };
}

impl_scalar_component!(f32, f64, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, isize, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_scalar_shape_is_rank_zero() {
        let c = Component::from(5.0f64);
        assert_eq!(c.shape().as_slice(), &[] as &[usize]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_matrix_keeps_shape() {
        let c = Component::from(array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(c.shape().as_slice(), &[2, 2]);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_vec_converts_to_rank_one() {
        let c = Component::from(vec![1, 2, 3]);
        assert_eq!(c.shape().as_slice(), &[3]);
    }

    #[test]
    fn test_extend_flattens_row_major() {
        let mut buffer = Vec::new();
        Component::from(array![[1, 2], [3, 4]]).extend_into(&mut buffer);
        Component::from(5).extend_into(&mut buffer);
        assert_eq!(buffer, [1, 2, 3, 4, 5]);
    }
}
