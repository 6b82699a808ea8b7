use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use rayon::prelude::*;

use super::{key, AvailabilityThreshold, PixelAvailability, ThresholdDirection};
use crate::error::XstegError;
use crate::media::CHANNELS;
use crate::progress::{Progress, Stage};
use crate::result::Result;
use crate::visual_data::{visual_data_values, VisualDataType};

/// The per pixel bit budget of an image, resolved from an ordered list of thresholds.
///
/// Adding thresholds only marks the map as modified, the budgets are
/// recomputed from scratch by [`AvailabilityMap::apply`].
#[derive(Debug, Clone)]
pub struct AvailabilityMap {
    pixel_count: usize,
    thresholds: Vec<AvailabilityThreshold>,
    max_bits: PixelAvailability,
    budgets: Vec<PixelAvailability>,
    modified: bool,
}

impl AvailabilityMap {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            pixel_count,
            thresholds: Vec::new(),
            max_bits: PixelAvailability::UNSET,
            budgets: vec![PixelAvailability::UNSET; pixel_count],
            modified: false,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Appends a threshold, thresholds without any decided channel are dropped.
    pub fn add_threshold(&mut self, threshold: AvailabilityThreshold) {
        if threshold.bits().is_useless() {
            debug!("Ignoring useless threshold {threshold:?}");
            return;
        }
        self.max_bits = self.max_bits.max(&threshold.bits());
        self.thresholds.push(threshold);
        self.modified = true;
    }

    pub fn add_thresholds(&mut self, thresholds: impl IntoIterator<Item = AvailabilityThreshold>) {
        for t in thresholds {
            self.add_threshold(t);
        }
    }

    /// validates and appends a threshold
    pub fn push(
        &mut self,
        data_type: VisualDataType,
        direction: ThresholdDirection,
        value: f32,
        bits: PixelAvailability,
    ) -> Result<()> {
        let threshold = AvailabilityThreshold::new(data_type, direction, value, bits)?;
        self.add_threshold(threshold);
        Ok(())
    }

    pub fn thresholds(&self) -> &[AvailabilityThreshold] {
        &self.thresholds
    }

    /// Per channel maximum of the bits any threshold requested, `Unset` where none did.
    pub fn max_threshold_bits(&self) -> PixelAvailability {
        self.max_bits
    }

    /// thresholds were added since the last [`AvailabilityMap::apply`]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Resolves the budget of every pixel of `rgba`, a raw RGBA8 buffer.
    ///
    /// Does nothing unless thresholds were added since the last call. The
    /// visual data of each metric is computed once for the whole image,
    /// then the pixels are split into `workers` contiguous segments that are
    /// resolved in parallel. Within a pixel the thresholds are evaluated in
    /// insertion order, a later match overwrites the channels it decides.
    ///
    /// Metrics are evaluated with every channel truncated by
    /// [`AvailabilityMap::max_threshold_bits`], so overwriting the budgeted
    /// bits never changes the outcome.
    pub fn apply(&mut self, rgba: &[u8], workers: usize, progress: &dyn Progress) -> Result<()> {
        if !self.modified {
            return Ok(());
        }
        let given = rgba.len() / CHANNELS;
        if given != self.pixel_count || rgba.len() % CHANNELS != 0 {
            return Err(XstegError::DimensionMismatch {
                expected: self.pixel_count,
                given,
            });
        }

        self.budgets.clear();
        self.budgets
            .resize(self.pixel_count, PixelAvailability::UNSET);
        if self.pixel_count == 0 {
            self.modified = false;
            return Ok(());
        }

        let truncate = self.max_bits;
        let mut cache: HashMap<VisualDataType, Vec<f32>> = HashMap::new();
        for t in &self.thresholds {
            cache
                .entry(t.data_type())
                .or_insert_with(|| visual_data_values(rgba, t.data_type(), truncate));
        }
        let rules = self
            .thresholds
            .iter()
            .filter_map(|t| cache.get(&t.data_type()).map(|v| (*t, v.as_slice())))
            .collect::<Vec<_>>();

        let segments = workers.max(1).min(self.pixel_count);
        let total = self.pixel_count;
        debug!(
            "Applying {} thresholds to {total} pixels in {segments} segments",
            rules.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(segments)
            .build()?;
        let done = AtomicUsize::new(0);
        let parts = split_segments(&mut self.budgets, segments);
        pool.install(|| {
            parts.into_par_iter().for_each(|(offset, chunk)| {
                for (i, budget) in chunk.iter_mut().enumerate() {
                    for (threshold, values) in &rules {
                        if threshold.matches(values[offset + i]) {
                            budget.overwrite_with(&threshold.bits());
                        }
                    }
                }
                let done = done.fetch_add(chunk.len(), Ordering::Relaxed) + chunk.len();
                progress.update(Stage::ApplyThresholds, done, total);
            });
        });

        self.modified = false;
        Ok(())
    }

    /// The resolved budget of every pixel, in pixel order.
    pub fn available_map(&self) -> &[PixelAvailability] {
        &self.budgets
    }

    pub fn pixel(&self, idx: usize) -> Option<PixelAvailability> {
        self.budgets.get(idx).copied()
    }

    /// Number of bits the resolved map can carry, unset channels count as zero.
    pub fn available_capacity_bits(&self) -> usize {
        self.budgets.iter().map(PixelAvailability::bit_count).sum()
    }

    pub fn generate_key(&self) -> String {
        key::generate_key(&self.thresholds)
    }

    /// appends the thresholds of `key`, in key order
    pub fn restore_from_key(&mut self, key: &str) -> Result<()> {
        let thresholds = Self::parse_key(key)?;
        self.add_thresholds(thresholds);
        Ok(())
    }

    pub fn parse_key(key: &str) -> Result<Vec<AvailabilityThreshold>> {
        key::parse_key(key)
    }
}

/// Splits `budgets` into `segments` contiguous parts with their pixel offset.
/// Part lengths differ by at most one, the longer parts come first.
fn split_segments(
    budgets: &mut [PixelAvailability],
    segments: usize,
) -> Vec<(usize, &mut [PixelAvailability])> {
    let (len, longer) = (budgets.len() / segments, budgets.len() % segments);
    let mut parts = Vec::with_capacity(segments);
    let mut rest = budgets;
    let mut offset = 0;
    for segment in 0..segments {
        let part_len = len + usize::from(segment < longer);
        let (part, tail) = std::mem::take(&mut rest).split_at_mut(part_len);
        parts.push((offset, part));
        offset += part_len;
        rest = tail;
    }
    parts
}
