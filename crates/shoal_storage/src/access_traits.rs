//! Traits defining different ways to access data from 2D arrays.
//!
//! # Strided Iteration
//!
//! The fastest way to iterate over data in an `Array2` is with a simple for loop over array indices, we call them "stride"s:
//! ```
//! use shoal_core::prelude::*;
//! use shoal_storage::prelude::*;
//!
//! let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(100));
//! let mut map = Array2::fill(extent, 0);
//!
//! for i in 0..extent.num_points() {
//!     // Use the `GetMut<Stride>` trait impl of the map.
//!     *map.get_mut(Stride(i)) = 1;
//! }
//! ```
//!
//! # `ForEach` over Extent
//!
//! Often, you only want to iterate over a sub-extent of the map. This can be done with the `ForEach` and `ForEachMut` traits:
//! ```
//! # use shoal_core::prelude::*;
//! # use shoal_storage::prelude::*;
//! # let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(100));
//! # let mut map = Array2::fill(extent, 0);
//! let subextent = Extent2i::from_min_and_shape(Point2i::fill(1), Point2i::fill(98));
//! map.for_each_mut(&subextent, |_p: Point2i, value| *value = 2);
//! ```

use shoal_core::ExtentN;

//  ██████╗ ███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝ ██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ██║  ███╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ██║   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ╚██████╔╝███████╗   ██║      ██║   ███████╗██║  ██║███████║
//  ╚═════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

pub trait Get<L> {
    type Data;

    /// Get an owned value at `location`.
    fn get(&self, location: L) -> Self::Data;
}

pub trait GetRef<L> {
    type Data;

    /// Get an immutable reference to the value at `location`.
    fn get_ref(&self, location: L) -> &Self::Data;
}

pub trait GetMut<L> {
    type Data;

    /// Get a mutable reference to the value at `location`.
    fn get_mut(&mut self, location: L) -> &mut Self::Data;
}

// We need this macro because doing a blanket impl causes conflicts due to Rust's orphan rules.
macro_rules! impl_get_via_get_ref_and_clone {
    ($map:ty, $($type_params:ident),*) => {
        impl<L, $($type_params),*> Get<L> for $map
        where
            Self: GetRef<L>,
            <Self as GetRef<L>>::Data: Clone,
        {
            type Data = <Self as GetRef<L>>::Data;
            #[inline]
            fn get(&self, location: L) -> Self::Data {
                self.get_ref(location).clone()
            }
        }
    };
}

// ███████╗ ██████╗ ██████╗     ███████╗ █████╗  ██████╗██╗  ██╗
// ██╔════╝██╔═══██╗██╔══██╗    ██╔════╝██╔══██╗██╔════╝██║  ██║
// █████╗  ██║   ██║██████╔╝    █████╗  ███████║██║     ███████║
// ██╔══╝  ██║   ██║██╔══██╗    ██╔══╝  ██╔══██║██║     ██╔══██║
// ██║     ╚██████╔╝██║  ██║    ███████╗██║  ██║╚██████╗██║  ██║
// ╚═╝      ╚═════╝ ╚═╝  ╚═╝    ╚══════╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝

pub trait ForEach<N, Coord> {
    type Item;

    fn for_each(&self, extent: &ExtentN<N>, f: impl FnMut(Coord, Self::Item));
}

pub trait ForEachMut<N, Coord> {
    type Item;

    fn for_each_mut(&mut self, extent: &ExtentN<N>, f: impl FnMut(Coord, &mut Self::Item));
}
