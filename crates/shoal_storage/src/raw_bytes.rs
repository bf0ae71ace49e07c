use std::ops::Deref;

/// Views a value as the little-endian bytes that would be uploaded to a GPU texture.
pub trait IntoRawBytes<'a> {
    type Output: Deref<Target = [u8]>;

    fn into_raw_bytes(&'a self) -> Self::Output;
}

impl<'a, T> IntoRawBytes<'a> for [T]
where
    T: bytemuck::Pod,
{
    type Output = &'a [u8];

    fn into_raw_bytes(&'a self) -> Self::Output {
        bytemuck::cast_slice(self)
    }
}
