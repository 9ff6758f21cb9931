//! # named-vec
//!
//! **Flat numeric buffers with named, shaped sub-ranges.**
//!
//! named-vec concatenates heterogeneous named components - scalars,
//! vectors, matrices, higher-rank arrays - into one contiguous
//! [`ndarray`] buffer, and maps each name back to its original shape and
//! offset range. Callers operate on the whole buffer with ordinary
//! elementwise arithmetic and read back named sub-arrays reshaped to
//! their original form.
//!
//! - **Named views**: `view(name)` returns a reshaped view sharing
//!   storage with the buffer, never a copy
//! - **Positional passthrough**: integer and range indexing go straight
//!   to the flat buffer, ignoring names
//! - **Dispatch policy**: combining two vectors with identical layouts
//!   yields a vector sharing that layout; mismatched layouts or
//!   reductions fall back to a plain array
//!
//! ## Quick Start
//!
//! ```
//! use named_vec::named_vec;
//! use ndarray::array;
//!
//! let mut nv = named_vec! {
//!     weight: array![[1.0, 2.0], [3.0, 4.0]],
//!     bias: 5.0,
//! }?;
//!
//! assert_eq!(nv.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(nv.view("weight")?.shape(), &[2, 2]);
//!
//! nv.set("weight", array![[0.0, 0.0], [0.0, 0.0]])?;
//! let doubled = (&nv + &nv).into_named().unwrap();
//! assert_eq!(doubled.scalar("bias")?, 10.0);
//! # Ok::<(), named_vec::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod component;
pub mod error;
pub mod layout;
pub mod ops;
pub mod vector;

pub use component::Component;
pub use error::{Error, Result};
pub use layout::{Layout, LayoutEntry, Shape};
pub use ops::Dispatch;
pub use vector::NamedVector;

/// Build a [`NamedVector`] from keyword-style `name: value` pairs
///
/// Values may be anything convertible into a [`Component`]: `ndarray`
/// arrays of any rank, `Vec`s and slices (rank 1), or plain numbers
/// (rank 0). Components are laid out in the order written.
///
/// # Example
///
/// ```
/// use named_vec::named_vec;
/// use ndarray::array;
///
/// let nv = named_vec! {
///     weight: array![[1.0, 2.0], [3.0, 4.0]],
///     bias: 5.0,
/// }?;
/// assert_eq!(nv.len(), 5);
/// # Ok::<(), named_vec::Error>(())
/// ```
#[macro_export]
macro_rules! named_vec {
    { $($name:ident : $value:expr),+ $(,)? } => {
        $crate::NamedVector::from_components([
            $((stringify!($name), $crate::Component::from($value))),+
        ])
    };
    {} => {
        $crate::NamedVector::<f64>::from_components(
            ::core::iter::empty::<(&str, $crate::Component<f64>)>(),
        )
    };
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::component::Component;
    pub use crate::error::{Error, Result};
    pub use crate::layout::{Layout, LayoutEntry, Shape};
    pub use crate::named_vec;
    pub use crate::ops::Dispatch;
    pub use crate::vector::NamedVector;
}
