use crate::{CaptureRegion, Result};

use shoal_storage::{
    Array2, BincodeCompression, BytesCompression, Compressed, Compression, DepthDistance,
    IntoRawBytes, StorageError,
};

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// A finished distance field and the region it covers. Stored as an opaque blob of full-precision floats.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BakedDistanceField {
    pub region: CaptureRegion,
    pub texels: Array2<DepthDistance>,
}

impl BakedDistanceField {
    pub fn new(region: CaptureRegion, texels: Array2<DepthDistance>) -> Self {
        Self { region, texels }
    }

    /// Texels per side.
    #[inline]
    pub fn resolution(&self) -> i32 {
        self.texels.shape().x()
    }

    pub fn compress<B: BytesCompression>(
        &self,
        backend: B,
    ) -> Result<Compressed<BincodeCompression<Self, B>>> {
        Ok(BincodeCompression::new(backend).compress(self)?)
    }

    pub fn write_compressed<B: BytesCompression>(
        &self,
        backend: B,
        mut writer: impl Write,
    ) -> Result<()> {
        let compressed = self.compress(backend)?;
        writer
            .write_all(&compressed.compressed_data)
            .map_err(StorageError::from)?;

        Ok(())
    }

    /// Reads a field written by `write_compressed` with the same backend.
    pub fn read_compressed<B: BytesCompression>(mut reader: impl Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(StorageError::from)?;

        Ok(BincodeCompression::<Self, B>::decompress(&bytes)?)
    }

    /// Little-endian `(depth, distance)` pairs in row-major order, ready for upload.
    pub fn raw_bytes(&self) -> &[u8] {
        self.texels.into_raw_bytes()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
