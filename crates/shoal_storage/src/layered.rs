use crate::{Array2, Result, StorageError};

use shoal_core::prelude::*;

use serde::{Deserialize, Serialize};

/// An array of same-shaped 2D layers, addressed by layer index. This is the CPU equivalent of a 2D texture array.
///
/// Every layer's extent starts at the origin, so texel `p` of layer `i` is `layer(i).get(p)`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LayeredArray2<T> {
    layer_shape: Point2i,
    layers: Vec<Array2<T>>,
}

impl<T> LayeredArray2<T> {
    /// Wraps `layers`, which must all have the same shape and an origin minimum.
    pub fn from_layers(layer_shape: Point2i, layers: Vec<Array2<T>>) -> Result<Self> {
        let expected = Extent2i::from_min_and_shape(Point2i::ZERO, layer_shape);
        for layer in layers.iter() {
            if *layer.extent() != expected {
                return Err(StorageError::LayerShapeMismatch {
                    expected: layer_shape,
                    actual: layer.shape(),
                });
            }
        }

        Ok(Self {
            layer_shape,
            layers,
        })
    }

    #[inline]
    pub fn layer_shape(&self) -> Point2i {
        self.layer_shape
    }

    #[inline]
    pub fn layer_extent(&self) -> Extent2i {
        Extent2i::from_min_and_shape(Point2i::ZERO, self.layer_shape)
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layer(&self, index: usize) -> &Array2<T> {
        self.check_index(index);

        &self.layers[index]
    }

    #[inline]
    pub fn layer_mut(&mut self, index: usize) -> &mut Array2<T> {
        self.check_index(index);

        &mut self.layers[index]
    }

    pub fn layers(&self) -> impl Iterator<Item = &Array2<T>> {
        self.layers.iter()
    }

    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut Array2<T>> {
        self.layers.iter_mut()
    }

    /// Borrow layer `index` mutably along with every layer after it immutably. This is how a coarse-to-fine pass writes one
    /// layer while reading its already-finished parent.
    pub fn split_at_layer_mut(&mut self, index: usize) -> (&mut Array2<T>, &[Array2<T>]) {
        self.check_index(index);

        let (_, tail) = self.layers.split_at_mut(index);
        let (layer, coarser) = tail.split_at_mut(1);

        (&mut layer[0], coarser)
    }

    #[inline]
    fn check_index(&self, index: usize) {
        assert!(
            index < self.layers.len(),
            "layer index {} out of range for an array of {} layers",
            index,
            self.layers.len()
        );
    }
}

impl<T> LayeredArray2<T>
where
    T: Clone,
{
    /// Creates `num_layers` layers of `layer_shape`, all filled with `value`.
    pub fn fill(num_layers: usize, layer_shape: Point2i, value: T) -> Self {
        let extent = Extent2i::from_min_and_shape(Point2i::ZERO, layer_shape);

        Self {
            layer_shape,
            layers: (0..num_layers)
                .map(|_| Array2::fill(extent, value.clone()))
                .collect(),
        }
    }

    /// Set every texel of every layer to `value`.
    pub fn reset_values(&mut self, value: T) {
        for layer in self.layers.iter_mut() {
            layer.reset_values(value.clone());
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Get;

    #[test]
    fn split_sees_coarser_layers() {
        let mut layers = LayeredArray2::fill(3, PointN([2, 2]), 0);
        layers.layer_mut(2).reset_values(7);

        let (layer, coarser) = layers.split_at_layer_mut(1);
        layer.reset_values(coarser[0].get(Point2i::ZERO) + 1);

        assert_eq!(coarser_len(&mut layers, 1), 1);
        assert_eq!(layers.layer(1).get(PointN([1, 1])), 8);
    }

    fn coarser_len(layers: &mut LayeredArray2<i32>, index: usize) -> usize {
        layers.split_at_layer_mut(index).1.len()
    }

    #[test]
    fn mismatched_layer_is_rejected() {
        let good = Array2::fill(Extent2i::from_min_and_shape(Point2i::ZERO, PointN([2, 2])), 0);
        let bad = Array2::fill(Extent2i::from_min_and_shape(Point2i::ZERO, PointN([3, 2])), 0);

        assert!(LayeredArray2::from_layers(PointN([2, 2]), vec![good.clone(), good.clone()]).is_ok());
        assert!(LayeredArray2::from_layers(PointN([2, 2]), vec![good, bad]).is_err());
    }

    #[test]
    #[should_panic(expected = "layer index 3 out of range")]
    fn out_of_range_layer_panics() {
        let layers = LayeredArray2::fill(3, PointN([2, 2]), 0);
        layers.layer(3);
    }
}
