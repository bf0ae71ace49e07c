//! Auxiliary simulations that fold their results into the combine pass.
//!
//! The combine kernel always reads every slot in `CombineBindings`. A slot that no contributor fills reads from a 1×1 null
//! layer holding the identity value, so an absent simulation contributes nothing without the kernel checking for it. Each slot
//! is held by at most one contributor.

use crate::Cascade;

use shoal_core::prelude::*;
use shoal_storage::{Array2, LayeredArray2, SampleValue};

/// 1×1 layers holding the identity value for each slot.
pub struct NullResources<T> {
    dynamic_waves: Array2<T>,
    flow: Array2<Point2f>,
}

impl<T> NullResources<T>
where
    T: SampleValue,
{
    pub fn new() -> Self {
        let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::ONES);

        Self {
            dynamic_waves: Array2::fill(extent, T::IDENTITY),
            flow: Array2::fill(extent, Point2f::IDENTITY),
        }
    }
}

impl<T> Default for NullResources<T>
where
    T: SampleValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NullResources<T> {
    /// Bindings where every slot is null.
    pub fn bindings(&self) -> CombineBindings<'_, T> {
        CombineBindings {
            dynamic_waves: &self.dynamic_waves,
            dynamic_waves_weight: 0.0,
            flow: &self.flow,
        }
    }
}

/// Everything the combine kernel reads besides the raw and parent layers, for one cascade.
pub struct CombineBindings<'a, T> {
    /// Added to the result, sampled at the texel's normalized coordinates.
    pub dynamic_waves: &'a Array2<T>,
    pub dynamic_waves_weight: f32,
    /// World-space velocity of the water surface, used to advect the raw layer.
    pub flow: &'a Array2<Point2f>,
}

impl<'a, T> Clone for CombineBindings<'a, T> {
    fn clone(&self) -> Self {
        Self {
            dynamic_waves: self.dynamic_waves,
            dynamic_waves_weight: self.dynamic_waves_weight,
            flow: self.flow,
        }
    }
}

/// The binding a contributor writes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContributorSlot {
    DynamicWaves,
    Flow,
}

/// A secondary simulation whose per-cascade results are folded into the combine pass.
pub trait AuxiliaryContributor<T>: Send + Sync {
    /// The slot written by `bind` and `bind_null`.
    fn slot(&self) -> ContributorSlot;

    /// Returns `true` iff this contributor has results for `cascade`.
    fn is_active(&self, cascade: &Cascade) -> bool;

    /// Writes this contributor's layer for `cascade` and its parameters into `bindings`.
    fn bind<'a>(&'a self, cascade: &Cascade, bindings: &mut CombineBindings<'a, T>);

    /// Writes the identity resources into this contributor's slot.
    fn bind_null<'a>(&self, null: &'a NullResources<T>, bindings: &mut CombineBindings<'a, T>);
}

/// Ripples and wakes from a dynamic wave simulation, one layer per cascade it covers.
pub struct DynamicWaveContributor<T> {
    pub layers: LayeredArray2<T>,
    /// Scales the simulation's contribution to every cascade.
    pub weight: f32,
}

impl<T> DynamicWaveContributor<T> {
    pub fn new(layers: LayeredArray2<T>, weight: f32) -> Self {
        Self { layers, weight }
    }
}

impl<T> AuxiliaryContributor<T> for DynamicWaveContributor<T>
where
    T: SampleValue,
{
    fn slot(&self) -> ContributorSlot {
        ContributorSlot::DynamicWaves
    }

    fn is_active(&self, cascade: &Cascade) -> bool {
        cascade.index < self.layers.num_layers()
    }

    fn bind<'a>(&'a self, cascade: &Cascade, bindings: &mut CombineBindings<'a, T>) {
        bindings.dynamic_waves = self.layers.layer(cascade.index);
        bindings.dynamic_waves_weight = self.weight;
    }

    fn bind_null<'a>(&self, null: &'a NullResources<T>, bindings: &mut CombineBindings<'a, T>) {
        bindings.dynamic_waves = &null.dynamic_waves;
        bindings.dynamic_waves_weight = 0.0;
    }
}

/// Surface currents from a flow simulation, one layer per cascade it covers. Layers are sampled by normalized coordinates, so
/// they may be coarser than the cascades.
pub struct FlowContributor {
    pub layers: LayeredArray2<Point2f>,
}

impl FlowContributor {
    pub fn new(layers: LayeredArray2<Point2f>) -> Self {
        Self { layers }
    }
}

impl<T> AuxiliaryContributor<T> for FlowContributor {
    fn slot(&self) -> ContributorSlot {
        ContributorSlot::Flow
    }

    fn is_active(&self, cascade: &Cascade) -> bool {
        cascade.index < self.layers.num_layers()
    }

    fn bind<'a>(&'a self, cascade: &Cascade, bindings: &mut CombineBindings<'a, T>) {
        bindings.flow = self.layers.layer(cascade.index);
    }

    fn bind_null<'a>(&self, null: &'a NullResources<T>, bindings: &mut CombineBindings<'a, T>) {
        bindings.flow = &null.flow;
    }
}
