use crate::{Cascade, CascadeDescriptorSet, DrawFilter, Registry, RegistryId, Result};

use shoal_core::prelude::*;
use shoal_storage::{Array2, LayeredArray2, SampleValue};

use tracing::debug;

/// A source of wave data, drawn into cascade buffers once per frame.
pub trait WaveInput<T>: Send + Sync {
    /// The dominant wavelength of this input in world units. 0 means the input is not tied to any level of detail and will be
    /// drawn into every cascade's combined result instead.
    fn wavelength(&self) -> f32;

    /// Adds this input's contribution, scaled by `weight`, to every texel of `target`, which covers `cascade`.
    fn draw(&self, cascade: &Cascade, target: &mut Array2<T>, weight: f32);

    fn filter(&self) -> DrawFilter {
        DrawFilter::from_wavelength(self.wavelength())
    }
}

/// Adapts a function of world position into a `WaveInput`.
pub struct FnWaveInput<F> {
    pub wavelength: f32,
    pub f: F,
}

impl<F> FnWaveInput<F> {
    pub fn new(wavelength: f32, f: F) -> Self {
        Self { wavelength, f }
    }
}

impl<T, F> WaveInput<T> for FnWaveInput<F>
where
    T: SampleValue,
    F: Fn(Point2f) -> T + Send + Sync,
{
    fn wavelength(&self) -> f32 {
        self.wavelength
    }

    fn draw(&self, cascade: &Cascade, target: &mut Array2<T>, weight: f32) {
        let min_x = target.extent().minimum.x();
        target.par_for_each_row_mut(|y, row| {
            for (i, value) in row.iter_mut().enumerate() {
                let world = cascade.texel_center_world(PointN([min_x + i as i32, y]));
                *value = *value + (self.f)(world) * weight;
            }
        });
    }
}

/// Holds the raw, per-cascade wave contributions before they are combined. One layer per cascade.
pub struct WaveBufferStore<T> {
    buffers: LayeredArray2<T>,
    inputs: Registry<Box<dyn WaveInput<T>>>,
}

impl<T> WaveBufferStore<T>
where
    T: SampleValue,
{
    pub fn new(cascade_count: usize, resolution: u32) -> Self {
        Self {
            buffers: LayeredArray2::fill(
                cascade_count,
                Point2i::fill(resolution as i32),
                T::IDENTITY,
            ),
            inputs: Registry::default(),
        }
    }

    #[inline]
    pub fn buffers(&self) -> &LayeredArray2<T> {
        &self.buffers
    }

    /// Direct access for simulations that write their layers without going through a `WaveInput`.
    #[inline]
    pub fn buffers_mut(&mut self) -> &mut LayeredArray2<T> {
        &mut self.buffers
    }

    pub fn register_input(&mut self, input: impl WaveInput<T> + 'static) -> Result<RegistryId> {
        self.inputs.add(Box::new(input))
    }

    pub fn unregister_input(&mut self, id: RegistryId) -> bool {
        self.inputs.remove(id).is_some()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Drops every input and refuses new ones.
    pub fn tear_down(&mut self) {
        self.inputs.tear_down();
    }

    /// Clears every layer and draws each wavelength-filtered input into the one cascade that accepts it.
    pub fn rasterize(&mut self, descriptors: &CascadeDescriptorSet) {
        self.buffers.reset_values(T::IDENTITY);

        let cascade_count = self.buffers.num_layers().min(descriptors.len());
        for input in self.inputs.iter() {
            let index = match input.filter().assign(descriptors) {
                Some(index) if index < cascade_count => index,
                _ => continue,
            };
            debug!(
                "Drawing input with wavelength {} into cascade {}",
                input.wavelength(),
                index
            );
            input.draw(descriptors.cascade(index), self.buffers.layer_mut(index), 1.0);
        }
    }

    /// Draws every input with no wavelength preference into every layer of `results`.
    pub fn draw_unfiltered(&self, descriptors: &CascadeDescriptorSet, results: &mut LayeredArray2<T>) {
        for input in self.inputs.iter() {
            if input.filter() != DrawFilter::NoPreference {
                continue;
            }
            for (index, layer) in results.layers_mut().enumerate().take(descriptors.len()) {
                input.draw(descriptors.cascade(index), layer, 1.0);
            }
        }
    }
}
