//! Spatial correlation between neighbouring pixels.
//!
//! Natural images are smooth: a pixel and its right or lower neighbour are
//! usually strongly correlated (often above 0.8). Randomising the LSBs of a
//! flat or low-texture region weakens that relationship.

use serde::Serialize;

use crate::processing::channel::PixelChannel;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpatialCorrelation {
    pub horizontal: f64,
    pub vertical: f64,
}

impl SpatialCorrelation {
    /// Mean of the absolute horizontal and vertical correlations.
    pub fn average_magnitude(&self) -> f64 {
        (self.horizontal.abs() + self.vertical.abs()) / 2.0
    }
}

/// Pearson correlation of each pixel with its right and lower neighbours.
///
/// An axis with fewer than two samples, or with no variation, yields 0.
pub fn spatial_correlation(channel: &PixelChannel) -> SpatialCorrelation {
    let width = channel.width() as usize;
    let height = channel.height() as usize;
    let samples = channel.samples();

    let horizontal = if width < 2 {
        0.0
    } else {
        pearson(
            samples
                .chunks_exact(width)
                .flat_map(move |row| row[..width - 1].iter().zip(&row[1..])),
        )
    };

    let vertical = if height < 2 {
        0.0
    } else {
        let (upper, lower) = (&samples[..width * (height - 1)], &samples[width..]);
        pearson(upper.iter().zip(lower))
    };

    SpatialCorrelation {
        horizontal,
        vertical,
    }
}

/// Pearson correlation over sample pairs.
///
/// Sums are accumulated first and divided last. Returns 0 for fewer than
/// two pairs or a constant side.
fn pearson<'a, I>(pairs: I) -> f64
where
    I: Iterator<Item = (&'a u8, &'a u8)> + Clone,
{
    let (mut n, mut sum_x, mut sum_y) = (0u64, 0u64, 0u64);
    for (&x, &y) in pairs.clone() {
        n += 1;
        sum_x += x as u64;
        sum_y += y as u64;
    }
    if n < 2 {
        return 0.0;
    }

    let mean_x = sum_x as f64 / n as f64;
    let mean_y = sum_y as f64 / n as f64;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&x, &y) in pairs {
        let dx = x as f64 - mean_x;
        let dy = y as f64 - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}
