use std::collections::TryReserveError;

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

use crate::math::{Rgb, AABB};
use crate::types::{PrimitiveKind, PrimitiveRecord};

/// Generated positions fall in `[-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT)` per axis
pub const SPAWN_HALF_EXTENT: f32 = 2.5;

/// Largest batch accepted in one add; matches the longest array a browser allows
pub const MAX_BATCH_LEN: usize = u32::MAX as usize;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch of {count} records exceeds the limit of {}", MAX_BATCH_LEN)]
    TooLarge { count: usize },
    #[error("cannot allocate {count} records: {source}")]
    Alloc {
        count: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Volume that generated positions are drawn from
pub fn spawn_volume() -> AABB {
    AABB::new(Vec3::splat(-SPAWN_HALF_EXTENT), Vec3::splat(SPAWN_HALF_EXTENT))
}

/// Shape parameters shared by every record of a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub kind: PrimitiveKind,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            kind: PrimitiveKind::Box,
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

/// Each channel uniform in `[0, 1)`
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>())
}

/// Each coordinate uniform in `[-2.5, 2.5)`
pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let range = -SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT;
    Vec3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

/// Creates one record at `id` with fresh color and position
pub fn primitive<R: Rng + ?Sized>(id: usize, shape: &ShapeParams, rng: &mut R) -> PrimitiveRecord {
    // Color first, then position, matching the draw order of a single record
    let color = random_color(rng);
    let position = random_position(rng);
    PrimitiveRecord {
        id,
        kind: shape.kind,
        width: shape.width,
        height: shape.height,
        depth: shape.depth,
        color,
        position,
    }
}

/// Creates `count` records sharing `shape`, ids starting at `start_id`
///
/// Oversized batches and failed allocations are reported instead of
/// aborting; no random numbers are drawn in that case.
pub fn generate_batch<R: Rng + ?Sized>(
    shape: &ShapeParams,
    count: usize,
    start_id: usize,
    rng: &mut R,
) -> Result<Vec<PrimitiveRecord>, BatchError> {
    if count > MAX_BATCH_LEN {
        return Err(BatchError::TooLarge { count });
    }

    let mut batch = Vec::new();
    batch
        .try_reserve_exact(count)
        .map_err(|source| BatchError::Alloc { count, source })?;
    batch.extend((0..count).map(|i| primitive(start_id + i, shape, rng)));
    Ok(batch)
}
