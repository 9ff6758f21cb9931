//! Elementwise operations and dispatch over named vectors
//!
//! A binary operation between two [`NamedVector`]s substitutes their flat
//! buffers, applies the operation as the host array library would, and
//! rewraps the result only when layout semantics survive: every
//! participating vector must carry a layout identical to the first
//! operand's, and the raw result must keep the whole-buffer shape. A
//! reduction or a mismatched-layout combination therefore comes back as a
//! plain [`Array1`]. [`Dispatch`] is the two-sided result of that policy.
//!
//! Unary elementwise operations cannot change the overall shape, so they
//! always rewrap and share the operand's layout.

use crate::vector::NamedVector;
use ndarray::{Array1, ScalarOperand, Zip};
use num_traits::{Float, FromPrimitive, One, Zero};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Result of an elementwise operation between named vectors
///
/// `Named` carries a [`NamedVector`] sharing the reference operand's
/// layout; `Flat` is the raw buffer result once layout semantics are no
/// longer meaningful.
///
/// # Example
///
/// ```
/// use named_vec::named_vec;
/// use ndarray::array;
///
/// let x = named_vec! { a: 2.0, b: array![1.0, 2.0, 3.0] }?;
/// let y = named_vec! { a: 2.0, b: array![1.0, 2.0, 3.0] }?;
/// let sum = (&x + &y).into_named().unwrap();
/// assert_eq!(sum.scalar("a")?, 4.0);
///
/// let z = named_vec! { a: 2.0, c: array![1.0, 2.0, 3.0] }?;
/// assert!((&x + &z).is_flat());
/// # Ok::<(), named_vec::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<A> {
    /// Layouts matched; the result is a named vector sharing that layout
    Named(NamedVector<A>),
    /// Layouts diverged; the result is the plain flat buffer
    Flat(Array1<A>),
}

impl<A> Dispatch<A> {
    /// Check if the result kept its layout
    #[inline]
    pub fn is_named(&self) -> bool {
        matches!(self, Dispatch::Named(_))
    }

    /// Check if the result fell back to a plain array
    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self, Dispatch::Flat(_))
    }

    /// Borrow the named result, if the layout was kept
    pub fn named(&self) -> Option<&NamedVector<A>> {
        match self {
            Dispatch::Named(nv) => Some(nv),
            Dispatch::Flat(_) => None,
        }
    }

    /// Consume into the named result, if the layout was kept
    pub fn into_named(self) -> Option<NamedVector<A>> {
        match self {
            Dispatch::Named(nv) => Some(nv),
            Dispatch::Flat(_) => None,
        }
    }

    /// Consume into the raw flat buffer, wrapped or not
    pub fn into_flat(self) -> Array1<A> {
        match self {
            Dispatch::Named(nv) => nv.into_array(),
            Dispatch::Flat(a) => a,
        }
    }

    /// Borrow the raw flat data, wrapped or not
    pub fn as_slice(&self) -> &[A] {
        match self {
            Dispatch::Named(nv) => nv.as_slice(),
            Dispatch::Flat(a) => a
                .as_slice()
                .expect("elementwise results are contiguous standard layout"),
        }
    }
}

/// Apply the wrapping policy to a computed raw result
fn wrap<A, B>(lhs: &NamedVector<A>, rhs: &NamedVector<A>, data: Array1<B>) -> Dispatch<B> {
    if lhs.layout() == rhs.layout() && data.len() == lhs.len() {
        Dispatch::Named(NamedVector::from_parts(lhs.layout_arc(), data))
    } else {
        Dispatch::Flat(data)
    }
}

impl<A> NamedVector<A> {
    /// Unary elementwise map, rewrapped with the same layout
    ///
    /// # Example
    ///
    /// ```
    /// use named_vec::named_vec;
    ///
    /// let x = named_vec! { a: 3.0 }?;
    /// let doubled = x.map(|v: &f64| v * 2.0);
    /// assert_eq!(doubled.scalar("a")?, 6.0);
    /// # Ok::<(), named_vec::Error>(())
    /// ```
    pub fn map<B, F>(&self, f: F) -> NamedVector<B>
    where
        F: FnMut(&A) -> B,
    {
        NamedVector::from_parts(self.layout_arc(), self.data().map(f))
    }

    /// Unary elementwise map in place
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: FnMut(&mut A),
    {
        self.data_mut().map_inplace(f);
    }

    /// Binary elementwise combination with another named vector
    ///
    /// Both flat buffers are combined element by element; the result is
    /// rewrapped only if the two layouts are identical. Buffers of
    /// different lengths panic, exactly as the host array library does for
    /// shape-incompatible operands.
    pub fn zip_with<B, F>(&self, rhs: &NamedVector<A>, f: F) -> Dispatch<B>
    where
        F: FnMut(&A, &A) -> B,
    {
        let data = Zip::from(self.data()).and(rhs.data()).map_collect(f);
        wrap(self, rhs, data)
    }

    /// Elementwise equality mask
    pub fn eq_elementwise(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialEq,
    {
        self.zip_with(rhs, |a, b| a == b)
    }

    /// Elementwise inequality mask
    pub fn ne_elementwise(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialEq,
    {
        self.zip_with(rhs, |a, b| a != b)
    }

    /// Elementwise less-than mask
    pub fn lt(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialOrd,
    {
        self.zip_with(rhs, |a, b| a < b)
    }

    /// Elementwise less-or-equal mask
    pub fn le(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialOrd,
    {
        self.zip_with(rhs, |a, b| a <= b)
    }

    /// Elementwise greater-than mask
    pub fn gt(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialOrd,
    {
        self.zip_with(rhs, |a, b| a > b)
    }

    /// Elementwise greater-or-equal mask
    pub fn ge(&self, rhs: &NamedVector<A>) -> Dispatch<bool>
    where
        A: PartialOrd,
    {
        self.zip_with(rhs, |a, b| a >= b)
    }

    /// Sum of all buffer elements
    ///
    /// A full reduction; the result is a plain value, never rewrapped.
    pub fn sum(&self) -> A
    where
        A: Clone + Add<Output = A> + Zero,
    {
        self.data().sum()
    }

    /// Product of all buffer elements, a plain value
    pub fn product(&self) -> A
    where
        A: Clone + Mul<Output = A> + One,
    {
        self.data().product()
    }

    /// Arithmetic mean of the buffer, `None` for an empty buffer
    pub fn mean(&self) -> Option<A>
    where
        A: Clone + FromPrimitive + Add<Output = A> + Div<Output = A> + Zero,
    {
        self.data().mean()
    }

    /// Fold over the flat buffer in positional order
    pub fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &A) -> B,
    {
        self.data().fold(init, f)
    }
}

/// Elementwise math for float elements
impl<A: Float> NamedVector<A> {
    /// Elementwise absolute value
    pub fn abs(&self) -> Self {
        self.map(|&x| x.abs())
    }

    /// Elementwise exponential
    pub fn exp(&self) -> Self {
        self.map(|&x| x.exp())
    }

    /// Elementwise natural logarithm
    pub fn ln(&self) -> Self {
        self.map(|&x| x.ln())
    }

    /// Elementwise square root
    pub fn sqrt(&self) -> Self {
        self.map(|&x| x.sqrt())
    }

    /// Elementwise sine
    pub fn sin(&self) -> Self {
        self.map(|&x| x.sin())
    }

    /// Elementwise cosine
    pub fn cos(&self) -> Self {
        self.map(|&x| x.cos())
    }

    /// Elementwise hyperbolic tangent
    pub fn tanh(&self) -> Self {
        self.map(|&x| x.tanh())
    }

    /// Elementwise integer power
    pub fn powi(&self, n: i32) -> Self {
        self.map(|&x| x.powi(n))
    }

    /// Elementwise float power
    pub fn powf(&self, p: A) -> Self {
        self.map(|&x| x.powf(p))
    }

    /// Elementwise clamp into `[lo, hi]`
    pub fn clamp(&self, lo: A, hi: A) -> Self {
        self.map(|&x| x.max(lo).min(hi))
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident) => {
        impl<'a, 'b, A> $trait<&'b NamedVector<A>> for &'a NamedVector<A>
        where
            A: Clone + $trait<A, Output = A>,
        {
            type Output = Dispatch<A>;

            fn $method(self, rhs: &'b NamedVector<A>) -> Dispatch<A> {
                let data = $trait::$method(self.data(), rhs.data());
                wrap(self, rhs, data)
            }
        }

        /// A plain-array operand passes through; the layout is kept
        impl<'a, 'b, A> $trait<&'b Array1<A>> for &'a NamedVector<A>
        where
            A: Clone + $trait<A, Output = A>,
        {
            type Output = NamedVector<A>;

            fn $method(self, rhs: &'b Array1<A>) -> NamedVector<A> {
                NamedVector::from_parts(self.layout_arc(), $trait::$method(self.data(), rhs))
            }
        }

        /// A scalar operand passes through; the layout is kept
        impl<'a, A> $trait<A> for &'a NamedVector<A>
        where
            A: Clone + $trait<A, Output = A> + ScalarOperand,
        {
            type Output = NamedVector<A>;

            fn $method(self, rhs: A) -> NamedVector<A> {
                NamedVector::from_parts(self.layout_arc(), $trait::$method(self.data(), rhs))
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);
impl_binary_op!(Div, div);

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident) => {
        /// In-place update from a same-layout vector
        ///
        /// # Panics
        ///
        /// Panics if the right-hand layout differs: an in-place update
        /// cannot fall back to a plain array, so a mismatch is an explicit
        /// failure rather than a silent one.
        impl<'a, A> $trait<&'a NamedVector<A>> for NamedVector<A>
        where
            A: Clone + $trait<A>,
        {
            fn $method(&mut self, rhs: &'a NamedVector<A>) {
                assert!(
                    self.layout() == rhs.layout(),
                    "in-place operation requires identical layouts"
                );
                $trait::$method(self.data_mut(), rhs.data());
            }
        }

        /// In-place update from a scalar, applied to every element
        impl<A> $trait<A> for NamedVector<A>
        where
            A: Clone + $trait<A> + ScalarOperand,
        {
            fn $method(&mut self, rhs: A) {
                $trait::$method(self.data_mut(), rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign);
impl_assign_op!(SubAssign, sub_assign);
impl_assign_op!(MulAssign, mul_assign);
impl_assign_op!(DivAssign, div_assign);

impl<'a, A> Neg for &'a NamedVector<A>
where
    A: Clone + Neg<Output = A>,
{
    type Output = NamedVector<A>;

    fn neg(self) -> NamedVector<A> {
        self.map(|x| x.clone().neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use ndarray::array;

    fn pair() -> (NamedVector<f64>, NamedVector<f64>) {
        let build = || {
            NamedVector::from_components([
                ("a", Component::from(2.0)),
                ("b", Component::from(array![1.0, 2.0, 3.0])),
            ])
            .unwrap()
        };
        (build(), build())
    }

    #[test]
    fn test_add_same_layout_rewraps() {
        let (x, y) = pair();
        let sum = (&x + &y).into_named().expect("layouts are identical");
        assert_eq!(sum.scalar("a").unwrap(), 4.0);
        assert_eq!(
            sum.view("b").unwrap(),
            array![2.0, 4.0, 6.0].into_dyn()
        );
        // The layout is shared, not rebuilt
        assert_eq!(sum.layout(), x.layout());
    }

    #[test]
    fn test_mismatched_layout_falls_back_to_flat() {
        let x = NamedVector::from_components([
            ("a", Component::from(1.0)),
            ("b", Component::from(array![1.0, 2.0])),
        ])
        .unwrap();
        let y = NamedVector::from_components([
            ("a", Component::from(1.0)),
            ("c", Component::from(array![1.0, 2.0])),
        ])
        .unwrap();

        let out = &x + &y;
        assert!(out.is_flat());
        assert_eq!(out.into_flat(), array![2.0, 2.0, 4.0]);
    }

    #[test]
    fn test_same_names_different_shapes_fall_back() {
        let x = NamedVector::from_components([(
            "m",
            Component::from(array![[1.0, 2.0], [3.0, 4.0]]),
        )])
        .unwrap();
        let y = NamedVector::from_components([("m", Component::from(array![1.0, 2.0, 3.0, 4.0]))])
            .unwrap();

        // Equal buffer lengths, different registered shapes
        assert!((&x * &y).is_flat());
    }

    #[test]
    fn test_scalar_operand_keeps_layout() {
        let (x, _) = pair();
        let shifted = &x + 1.0;
        assert_eq!(shifted.scalar("a").unwrap(), 3.0);
        assert_eq!(shifted.as_slice(), &[3.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_plain_array_operand_keeps_layout() {
        let (x, _) = pair();
        let rhs = array![1.0, 0.0, 0.0, 1.0];
        let out = &x * &rhs;
        assert_eq!(out.as_slice(), &[2.0, 0.0, 0.0, 3.0]);
        assert_eq!(out.layout(), x.layout());
    }

    #[test]
    fn test_full_reduction_is_plain() {
        let (x, _) = pair();
        let total: f64 = x.sum();
        assert_eq!(total, 8.0);
        assert_eq!(x.mean(), Some(2.0));
        assert_eq!(x.fold(0usize, |n, _| n + 1), 4);
    }

    #[test]
    fn test_map_rewraps() {
        let (x, _) = pair();
        let doubled = x.map(|&v| v * 2.0);
        assert_eq!(doubled.scalar("a").unwrap(), 4.0);
        assert_eq!(doubled.layout(), x.layout());
    }

    #[test]
    fn test_comparison_masks() {
        let (x, mut y) = pair();
        y.set("b", array![0.0, 2.0, 9.0]).unwrap();

        let lt = x.lt(&y).into_named().unwrap();
        assert_eq!(lt.as_slice(), &[false, false, false, true]);

        let eq = x.eq_elementwise(&y).into_named().unwrap();
        assert_eq!(eq.as_slice(), &[true, false, true, false]);
    }

    #[test]
    fn test_assign_ops() {
        let (mut x, y) = pair();
        x += &y;
        assert_eq!(x.as_slice(), &[4.0, 2.0, 4.0, 6.0]);
        x *= 0.5;
        assert_eq!(x.as_slice(), &[2.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "identical layouts")]
    fn test_assign_mismatched_layout_panics() {
        let mut x = NamedVector::from_components([("a", Component::from(1.0))]).unwrap();
        let y = NamedVector::from_components([("b", Component::from(1.0))]).unwrap();
        x += &y;
    }

    #[test]
    fn test_neg_and_float_maps() {
        let (x, _) = pair();
        assert_eq!((-&x).as_slice(), &[-2.0, -1.0, -2.0, -3.0]);
        assert_eq!(x.powi(2).as_slice(), &[4.0, 1.0, 4.0, 9.0]);
        assert_eq!(x.clamp(0.0, 2.0).as_slice(), &[2.0, 1.0, 2.0, 2.0]);
        let s = x.sqrt();
        assert!((s.scalar("a").unwrap() - 2.0f64.sqrt()).abs() < 1e-12);
    }
}
