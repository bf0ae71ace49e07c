use crate::{BakedDistanceField, CaptureRegion, CaptureSource, DistanceFieldCache, Result, SdfError};

use shoal_core::prelude::*;
use shoal_storage::{sample_bilinear, Array2, DepthDistance, BACKGROUND_DEPTH};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info_span, warn};

/// The largest supported number of texels per side.
pub const MAX_RESOLUTION: u32 = 16384;

/// Settings for one cached distance field.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DistanceFieldConfig {
    /// Texels per side.
    pub resolution: u32,
    /// The water level. Geometry above it is land.
    pub reference_level: f32,
    pub region: CaptureRegion,
    /// Names of the geometry layers to capture.
    pub layers: Vec<String>,
    /// When `false`, only the depth channel is computed and the distance channel holds the seed values.
    pub generate_distance_field: bool,
}

impl Default for DistanceFieldConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            reference_level: 0.0,
            region: CaptureRegion::default(),
            layers: vec!["terrain".to_owned()],
            generate_distance_field: true,
        }
    }
}

impl DistanceFieldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(SdfError::NonPositiveResolution);
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(SdfError::ResolutionUnsupported {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        if !self.resolution.is_power_of_two() {
            debug!(
                "Distance field resolution {} is not a power of 2",
                self.resolution
            );
        }

        self.region.validate()
    }

    #[inline]
    pub fn texel_width(&self) -> f32 {
        self.region.texel_width(self.resolution)
    }

    fn extent(&self) -> Extent2i {
        Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(self.resolution as i32))
    }
}

enum Contents {
    Realtime {
        depths: Option<Array2<f32>>,
        cache: Option<DistanceFieldCache>,
        result: Option<Array2<DepthDistance>>,
        refresh_requested: bool,
    },
    Baked(BakedDistanceField),
}

/// One distance field bound to a capture region.
///
/// A realtime instance captures and floods whenever it is populated, allocating its buffers on first use. A baked instance
/// serves a field that was computed ahead of time and never touches a `CaptureSource`.
pub struct CacheInstance {
    config: DistanceFieldConfig,
    contents: Contents,
}

impl CacheInstance {
    pub fn realtime(config: DistanceFieldConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            contents: Contents::Realtime {
                depths: None,
                cache: None,
                result: None,
                refresh_requested: false,
            },
        })
    }

    /// The field must have `config.resolution` texels per side. The field's own region replaces `config.region`.
    pub fn baked(mut config: DistanceFieldConfig, field: BakedDistanceField) -> Result<Self> {
        config.region = field.region;
        config.validate()?;
        if field.texels.shape() != config.extent().shape {
            return Err(SdfError::BakedResolutionMismatch {
                expected: config.resolution,
                actual: field.resolution(),
            });
        }

        Ok(Self {
            config,
            contents: Contents::Baked(field),
        })
    }

    #[inline]
    pub fn config(&self) -> &DistanceFieldConfig {
        &self.config
    }

    #[inline]
    pub fn is_baked(&self) -> bool {
        matches!(self.contents, Contents::Baked(_))
    }

    /// The latest depth capture, if a realtime instance has populated at least once.
    pub fn depths(&self) -> Option<&Array2<f32>> {
        match &self.contents {
            Contents::Realtime { depths, .. } => depths.as_ref(),
            Contents::Baked(_) => None,
        }
    }

    /// The current field, if there is one.
    pub fn result(&self) -> Option<&Array2<DepthDistance>> {
        match &self.contents {
            Contents::Realtime { result, .. } => result.as_ref(),
            Contents::Baked(field) => Some(&field.texels),
        }
    }

    /// Captures `source`, seeds, floods and resolves a new field. Does nothing for a baked instance.
    ///
    /// On error, the previous field is kept.
    pub fn populate(&mut self, source: &(impl CaptureSource + ?Sized)) -> Result<()> {
        let config = &self.config;
        let (depths, cache, result, refresh_requested) = match &mut self.contents {
            Contents::Baked(_) => {
                debug!("Skipping population of a baked distance field");
                return Ok(());
            }
            Contents::Realtime {
                depths,
                cache,
                result,
                refresh_requested,
            } => (depths, cache, result, refresh_requested),
        };

        let _span = info_span!("populate_distance_field", resolution = config.resolution).entered();

        match Self::run_population(config, source, depths, cache) {
            Ok(field) => {
                *result = Some(field);
                *refresh_requested = false;

                Ok(())
            }
            Err(e) => {
                error!("Failed to populate distance field: {}", e);

                Err(e)
            }
        }
    }

    /// Marks a realtime instance to be populated by the next `refresh_if_requested`.
    pub fn request_refresh(&mut self) {
        match &mut self.contents {
            Contents::Realtime {
                refresh_requested, ..
            } => *refresh_requested = true,
            Contents::Baked(_) => warn!("Refresh requested for a baked distance field"),
        }
    }

    /// Populates iff a refresh was requested. Returns whether it populated.
    pub fn refresh_if_requested(&mut self, source: &(impl CaptureSource + ?Sized)) -> Result<bool> {
        let requested = matches!(
            self.contents,
            Contents::Realtime {
                refresh_requested: true,
                ..
            }
        );
        if !requested {
            return Ok(false);
        }
        self.populate(source)?;

        Ok(true)
    }

    /// Snapshots the current field so it can be persisted and served by a baked instance.
    pub fn bake(&self) -> Option<BakedDistanceField> {
        self.result()
            .map(|texels| BakedDistanceField::new(self.config.region, texels.clone()))
    }

    /// Bilinearly samples the field at a world position. Positions outside of the region read the nearest edge texel.
    pub fn sample(&self, world: Point2f) -> Option<DepthDistance> {
        let field = self.result()?;
        let texel_coords = self
            .config
            .region
            .world_to_texel_coords(self.config.resolution, world);

        Some(sample_bilinear(field, texel_coords))
    }

    /// Positive over water, non-positive over land.
    pub fn sample_signed_distance(&self, world: Point2f) -> Option<f32> {
        self.sample(world).map(|s| s.signed_distance())
    }

    fn run_population(
        config: &DistanceFieldConfig,
        source: &(impl CaptureSource + ?Sized),
        depths_slot: &mut Option<Array2<f32>>,
        cache_slot: &mut Option<DistanceFieldCache>,
    ) -> Result<Array2<DepthDistance>> {
        source.validate_selectors(&config.layers)?;

        let mut depths = match depths_slot.take() {
            Some(mut depths) => {
                depths.reset_values(BACKGROUND_DEPTH);
                depths
            }
            None => Array2::try_fill(config.extent(), BACKGROUND_DEPTH)?,
        };
        let mut cache = match cache_slot.take() {
            Some(cache) => cache,
            None => DistanceFieldCache::new(config.resolution, config.texel_width())?,
        };

        let captured = source.capture_depths(
            &config.region,
            &config.layers,
            config.reference_level,
            &mut depths,
        );
        let field = captured.and_then(|()| {
            cache.seed(&depths)?;
            if config.generate_distance_field {
                cache.run_to_convergence();
            }

            Ok(cache.resolve())
        });

        *depths_slot = Some(depths);
        *cache_slot = Some(cache);

        field
    }
}
