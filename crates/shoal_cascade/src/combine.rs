use crate::{
    sample_combined, AuxiliaryContributor, Cascade, CascadeDescriptorSet, CascadeError,
    CombineBindings, NullResources, Registry, RegistryId, Result, ViewerScale, WaveBufferStore,
};

use shoal_core::prelude::*;
use shoal_storage::{sample_bilinear, sample_uv, Array2, LayeredArray2, SampleValue};

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

/// Per-invocation settings for a combine pass.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CombineConfig {
    /// When `false`, every cascade shows only its own raw contribution. This is a debugging aid.
    pub combine_enabled: bool,
    /// Multiplies the finest cascade's raw contribution when `scale_could_increase`.
    pub finest_weight: f32,
    pub scale_could_increase: bool,
    /// Simulation time, used to phase flow advection.
    pub time: f32,
    /// How far (in texels of each cascade) the raw layer is advected before a flow phase restarts.
    pub flow_period_texels: f32,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            combine_enabled: true,
            finest_weight: 1.0,
            scale_could_increase: false,
            time: 0.0,
            flow_period_texels: 3.0,
        }
    }
}

impl CombineConfig {
    pub fn with_viewer_scale(self, scale: &ViewerScale) -> Self {
        Self {
            finest_weight: scale.finest_weight,
            scale_could_increase: scale.scale_could_increase,
            ..self
        }
    }

    fn finest_weight_for(&self, index: usize) -> f32 {
        if index == 0 && self.scale_could_increase {
            self.finest_weight.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// How a single cascade is processed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CombineVariant {
    /// Own raw contribution plus the combined parent.
    Combine,
    /// Own raw contribution only. Always used for the coarsest cascade.
    Bypass,
}

impl CombineVariant {
    pub fn select(config: &CombineConfig, index: usize, cascade_count: usize) -> Self {
        if config.combine_enabled && index + 1 < cascade_count {
            CombineVariant::Combine
        } else {
            CombineVariant::Bypass
        }
    }
}

/// Owns the combined result of every cascade and the auxiliary contributors folded into it.
///
/// Each pass walks the cascades from coarsest to finest, so cascade `i` holds its own raw contribution plus everything
/// coarser than it.
pub struct CascadeCombiner<T> {
    results: LayeredArray2<T>,
    previous_results: Option<LayeredArray2<T>>,
    contributors: Registry<Box<dyn AuxiliaryContributor<T>>>,
    null: NullResources<T>,
}

impl<T> CascadeCombiner<T>
where
    T: SampleValue + 'static,
{
    pub fn new(cascade_count: usize, resolution: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(CascadeError::NonPositiveResolution);
        }
        if cascade_count == 0 {
            return Err(CascadeError::NoCascades);
        }

        Ok(Self {
            results: LayeredArray2::fill(
                cascade_count,
                Point2i::fill(resolution as i32),
                T::IDENTITY,
            ),
            previous_results: None,
            contributors: Registry::default(),
            null: NullResources::new(),
        })
    }

    /// Also keep the result of the previous pass, for temporal effects.
    pub fn with_previous_frame(mut self) -> Self {
        self.previous_results = Some(self.results.clone());

        self
    }

    #[inline]
    pub fn cascade_count(&self) -> usize {
        self.results.num_layers()
    }

    #[inline]
    pub fn results(&self) -> &LayeredArray2<T> {
        &self.results
    }

    #[inline]
    pub fn previous_results(&self) -> Option<&LayeredArray2<T>> {
        self.previous_results.as_ref()
    }

    pub fn register_contributor(
        &mut self,
        contributor: impl AuxiliaryContributor<T> + 'static,
    ) -> Result<RegistryId> {
        if self.contributors.is_torn_down() {
            return Err(CascadeError::TornDown);
        }
        let slot = contributor.slot();
        if self.contributors.iter().any(|c| c.slot() == slot) {
            return Err(CascadeError::SlotOccupied(slot));
        }

        self.contributors.add(Box::new(contributor))
    }

    pub fn unregister_contributor(&mut self, id: RegistryId) -> bool {
        self.contributors.remove(id).is_some()
    }

    /// Drops every contributor and refuses new ones.
    pub fn tear_down(&mut self) {
        self.contributors.tear_down();
    }

    /// Checks everything a pass needs before anything is written.
    pub fn validate(
        &self,
        descriptors: &CascadeDescriptorSet,
        raw: &LayeredArray2<T>,
        config: &CombineConfig,
    ) -> Result<()> {
        let cascade_count = self.cascade_count();
        let layer_shape = self.results.layer_shape();

        for index in 0..cascade_count {
            let cascade = descriptors
                .get(index)
                .ok_or(CascadeError::MissingDescriptor {
                    index,
                    cascade_count,
                })?;
            if cascade.layer_shape() != layer_shape {
                return Err(CascadeError::LayerShapeMismatch {
                    expected: layer_shape,
                    actual: cascade.layer_shape(),
                });
            }
        }
        if raw.num_layers() < cascade_count {
            return Err(CascadeError::LayerCountMismatch {
                expected: cascade_count,
                actual: raw.num_layers(),
            });
        }
        if raw.layer_shape() != layer_shape {
            return Err(CascadeError::LayerShapeMismatch {
                expected: layer_shape,
                actual: raw.layer_shape(),
            });
        }
        // Also rejects NaN.
        if !(config.flow_period_texels > 0.0) {
            return Err(CascadeError::NonPositiveFlowPeriod(config.flow_period_texels));
        }

        Ok(())
    }

    /// Combines already-rasterized `raw` layers into the results. On error, nothing is written.
    pub fn combine(
        &mut self,
        descriptors: &CascadeDescriptorSet,
        raw: &LayeredArray2<T>,
        config: &CombineConfig,
    ) -> Result<()> {
        self.validate(descriptors, raw, config)?;
        self.combine_validated(descriptors, raw, config);

        Ok(())
    }

    /// Runs a whole frame: rasterizes the store's inputs, combines them, then draws inputs with no wavelength preference
    /// directly into every result layer. On error, neither the store nor the results are touched.
    pub fn run_frame(
        &mut self,
        store: &mut WaveBufferStore<T>,
        descriptors: &CascadeDescriptorSet,
        config: &CombineConfig,
    ) -> Result<()> {
        self.validate(descriptors, store.buffers(), config)?;

        store.rasterize(descriptors);
        self.combine_validated(descriptors, store.buffers(), config);
        store.draw_unfiltered(descriptors, &mut self.results);

        Ok(())
    }

    /// Samples the combined result at `world` from the finest cascade that covers it and resolves `min_spatial_length`.
    pub fn sample(
        &self,
        descriptors: &CascadeDescriptorSet,
        world: Point2f,
        min_spatial_length: f32,
    ) -> Option<T> {
        sample_combined(descriptors, &self.results, world, min_spatial_length)
    }

    fn combine_validated(
        &mut self,
        descriptors: &CascadeDescriptorSet,
        raw: &LayeredArray2<T>,
        config: &CombineConfig,
    ) {
        let cascade_count = self.cascade_count();
        let _span = info_span!("combine_cascades", cascade_count).entered();

        if !config.combine_enabled && !cfg!(debug_assertions) {
            warn!("Cascade combine is disabled in a release build; each cascade only shows its own waves");
        }

        if let Some(previous) = self.previous_results.as_mut() {
            std::mem::swap(previous, &mut self.results);
        }

        let Self {
            results,
            contributors,
            null,
            ..
        } = self;
        let null = &*null;

        for index in (0..cascade_count).rev() {
            let cascade = descriptors.cascade(index);

            let mut bindings = null.bindings();
            for contributor in contributors.iter() {
                if contributor.is_active(cascade) {
                    contributor.bind(cascade, &mut bindings);
                } else {
                    contributor.bind_null(null, &mut bindings);
                }
            }

            let variant = CombineVariant::select(config, index, cascade_count);
            debug!("Combining cascade {} with {:?}", index, variant);

            let (out, coarser) = results.split_at_layer_mut(index);
            let parent = match variant {
                CombineVariant::Combine => Some((descriptors.cascade(index + 1), &coarser[0])),
                CombineVariant::Bypass => None,
            };
            let kernel = CombineKernel {
                cascade,
                raw: raw.layer(index),
                parent,
                bindings,
                weight: config.finest_weight_for(index),
                flow_phases: FlowPhases::new(
                    config.time,
                    config.flow_period_texels * cascade.texel_width,
                ),
            };
            kernel.run(out);
        }
    }
}

/// Two overlapping advection phases, offset by half a period, cross-faded so neither phase's restart is visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowPhases {
    /// How far, in world units per unit of flow velocity, each phase has advected.
    pub offsets: [f32; 2],
    pub weights: [f32; 2],
}

impl FlowPhases {
    pub fn new(time: f32, period: f32) -> Self {
        let half_period = period / 2.0;
        let offset0 = time.rem_euclid(period);
        let mut weight0 = offset0 / half_period;
        if weight0 > 1.0 {
            weight0 = 2.0 - weight0;
        }
        let offset1 = (time + half_period).rem_euclid(period);

        Self {
            offsets: [offset0, offset1],
            weights: [weight0, 1.0 - weight0],
        }
    }
}

struct CombineKernel<'a, T> {
    cascade: &'a Cascade,
    raw: &'a Array2<T>,
    parent: Option<(&'a Cascade, &'a Array2<T>)>,
    bindings: CombineBindings<'a, T>,
    weight: f32,
    flow_phases: FlowPhases,
}

impl<'a, T> CombineKernel<'a, T>
where
    T: SampleValue,
{
    fn run(&self, out: &mut Array2<T>) {
        let resolution = self.cascade.resolution as f32;

        out.par_for_each_row_mut(|y, row| {
            for (x, value) in row.iter_mut().enumerate() {
                let p = PointN([x as i32, y]);
                let texel_center = Point2f::from(p) + Point2f::fill(0.5);
                let uv = texel_center / resolution;

                *value = self.texel(p, texel_center, uv);
            }
        });
    }

    #[inline]
    fn texel(&self, p: Point2i, texel_center: Point2f, uv: Point2f) -> T {
        // Flow velocity in texels of this cascade.
        let flow = sample_uv(self.bindings.flow, uv) / self.cascade.texel_width;
        let [offset0, offset1] = self.flow_phases.offsets;
        let [weight0, weight1] = self.flow_phases.weights;
        let raw0 = sample_bilinear(self.raw, texel_center - flow * offset0);
        let raw1 = sample_bilinear(self.raw, texel_center - flow * offset1);

        let mut value = (raw0 * weight0 + raw1 * weight1) * self.weight;

        if let Some((parent_cascade, parent)) = self.parent {
            let world = self.cascade.texel_center_world(p);
            value = value + sample_bilinear(parent, parent_cascade.world_to_texel_coords(world));
        }

        value + sample_uv(self.bindings.dynamic_waves, uv) * self.bindings.dynamic_waves_weight
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
