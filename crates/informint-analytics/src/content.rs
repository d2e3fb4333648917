//! Content-type breakdown of a batch.

use informint_core::PostType;
use serde::Serialize;

use crate::analysis::PostAnalysis;
use crate::metrics::round1;

/// Count and percentage share (one decimal) of each post type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMix {
    pub images: usize,
    pub videos: usize,
    pub carousels: usize,
    pub untyped: usize,
    pub image_share: f64,
    pub video_share: f64,
    pub carousel_share: f64,
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn content_mix(analyses: &[PostAnalysis]) -> ContentMix {
    let mut mix = ContentMix::default();
    for a in analyses {
        match a.post_type {
            Some(PostType::Image) => mix.images += 1,
            Some(PostType::Video) => mix.videos += 1,
            Some(PostType::Carousel) => mix.carousels += 1,
            None => mix.untyped += 1,
        }
    }

    let total = analyses.len();
    if total > 0 {
        let share = |n: usize| round1(n as f64 / total as f64 * 100.0);
        mix.image_share = share(mix.images);
        mix.video_share = share(mix.videos);
        mix.carousel_share = share(mix.carousels);
    }
    mix
}
