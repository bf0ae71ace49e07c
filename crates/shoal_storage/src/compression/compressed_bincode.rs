use super::{BytesCompression, Compressed, Compression};
use crate::Result;

use serde::{de::DeserializeOwned, Serialize};

/// Run some compression algorithm `A` after bincode serializing a type `T`. This provides a decent
/// default compression for any serializable type.
pub struct BincodeCompression<T, A> {
    pub compression: A,
    marker: std::marker::PhantomData<T>,
}

impl<T, A> Clone for BincodeCompression<T, A>
where
    A: Clone,
{
    fn clone(&self) -> Self {
        Self {
            compression: self.compression.clone(),
            marker: Default::default(),
        }
    }
}

impl<T, A> Copy for BincodeCompression<T, A> where A: Copy {}

impl<T, A> BincodeCompression<T, A> {
    pub fn new(compression: A) -> Self {
        Self {
            compression,
            marker: Default::default(),
        }
    }
}

impl<T, A> Compression for BincodeCompression<T, A>
where
    T: DeserializeOwned + Serialize,
    A: BytesCompression,
{
    type Data = T;
    type CompressedData = Vec<u8>;

    fn compress(&self, data: &Self::Data) -> Result<Compressed<Self>> {
        let mut compressed_bytes = Vec::new();
        self.compression
            .compress_bytes(&bincode::serialize(data)?, &mut compressed_bytes)?;

        Ok(Compressed::new(compressed_bytes))
    }

    fn decompress(compressed: &Self::CompressedData) -> Result<Self::Data> {
        let mut decompressed_bytes = Vec::new();
        A::decompress_bytes(compressed, &mut decompressed_bytes)?;

        Ok(bincode::deserialize(&decompressed_bytes)?)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(all(test, feature = "snap"))]
mod tests {
    use super::*;
    use crate::{Array2, Snappy};

    use shoal_core::prelude::*;

    #[test]
    fn compress_and_decompress_array() {
        let extent = Extent2i::from_min_and_shape(Point2i::ZERO, PointN([16, 8]));
        let array = Array2::fill_with(extent, |p| (p.x() * p.y()) as f32 * 0.25);

        let compression = BincodeCompression::new(Snappy);
        let compressed = compression.compress(&array).unwrap();
        let decompressed = compressed.decompress().unwrap();

        assert_eq!(array, decompressed);
    }

    #[test]
    fn garbage_fails_to_decompress() {
        let garbage = Compressed::<BincodeCompression<Array2<f32>, Snappy>>::new(vec![1, 2, 3]);

        assert!(garbage.decompress().is_err());
    }
}
