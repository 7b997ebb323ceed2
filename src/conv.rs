//! Trainable 3x3 convolution layer
//!
//! This module provides a ConvLayer that slides a bank of learned 3x3 filters
//! over a 2-D input grid (valid padding, stride 1) and learns those filters
//! with plain stochastic gradient descent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConvError;
use crate::grid::{Grid, Volume};
use crate::rng::SimpleRng;

/// Filters are 3x3.
pub const FILTER_SIZE: usize = 3;

/// Weights per filter (3x3 = 9).
pub const FILTER_AREA: usize = FILTER_SIZE * FILTER_SIZE;

/// Serialized form of a filter bank (JSON on disk).
#[derive(Serialize, Deserialize)]
struct FilterBank {
    num_filters: usize,
    weights: Vec<f32>,
}

/// A single trainable convolution layer with a bank of 3x3 filters.
///
/// `forward` computes a 2-D cross-correlation of the input grid against each
/// filter (no kernel flip) under valid padding: an `(H, W)` input produces an
/// `(H-2, W-2, F)` output volume. `backward` accumulates the gradient of the
/// loss with respect to each filter weight from an upstream gradient volume
/// and applies the SGD update `w -= learning_rate * grad`.
///
/// The layer caches its most recent forward input; the next backward call
/// consumes that cache. Calling `backward` twice without an intervening
/// `forward` is reported as [`ConvError::StaleState`].
///
/// This layer is treated as the first stage of a network: `backward` does not
/// compute a gradient with respect to the input grid, so it cannot feed an
/// earlier layer. Extending it to do so would mean returning an `(H, W)` grid
/// of input gradients from `backward`.
///
/// # Example
///
/// ```
/// use conv3x3::{ConvLayer, Grid, SimpleRng};
///
/// let mut rng = SimpleRng::new(42);
/// let mut layer = ConvLayer::new(8, &mut rng);
///
/// let input = Grid::zeros(28, 28);
/// let output = layer.forward(&input);
/// assert_eq!(output.shape(), (26, 26, 8));
/// ```
pub struct ConvLayer {
    num_filters: usize,
    // [num_filters * FILTER_AREA], filter-major, each filter row-major
    filters: Vec<f32>,
    // Set by forward, consumed by the next backward
    last_input: Option<Grid>,
}

impl ConvLayer {
    /// Create a new ConvLayer with small-magnitude random filters.
    ///
    /// Weights are sampled i.i.d. from a standard normal distribution and
    /// divided by 9 so initial activations stay well-scaled.
    ///
    /// # Arguments
    ///
    /// * `num_filters` - Number of 3x3 filters (must be at least 1)
    /// * `rng` - Random number generator for weight initialization
    ///
    /// # Panics
    ///
    /// Panics if `num_filters` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use conv3x3::{ConvLayer, SimpleRng};
    ///
    /// let mut rng = SimpleRng::new(42);
    /// let layer = ConvLayer::new(8, &mut rng);
    /// assert_eq!(layer.num_filters(), 8);
    /// ```
    pub fn new(num_filters: usize, rng: &mut SimpleRng) -> Self {
        assert!(num_filters > 0, "ConvLayer requires at least one filter");

        let mut filters = vec![0.0f32; num_filters * FILTER_AREA];
        for value in &mut filters {
            *value = rng.next_gaussian() / FILTER_AREA as f32;
        }

        Self {
            num_filters,
            filters,
            last_input: None,
        }
    }

    /// Create a ConvLayer from explicit filter weights.
    ///
    /// `weights` is filter-major with each 3x3 filter stored row-major, so its
    /// length must be `num_filters * 9`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::InvalidFilterBank`] if `num_filters` is zero, the
    /// weight count is wrong, or any weight is non-finite.
    pub fn from_weights(num_filters: usize, weights: Vec<f32>) -> Result<Self, ConvError> {
        if num_filters == 0 {
            return Err(ConvError::InvalidFilterBank(
                "filter count must be at least 1".to_string(),
            ));
        }
        if weights.len() != num_filters * FILTER_AREA {
            return Err(ConvError::InvalidFilterBank(format!(
                "expected {} weights for {} filters, got {}",
                num_filters * FILTER_AREA,
                num_filters,
                weights.len()
            )));
        }
        if !weights.iter().all(|w| w.is_finite()) {
            return Err(ConvError::InvalidFilterBank(
                "all weights must be finite".to_string(),
            ));
        }

        Ok(Self {
            num_filters,
            filters: weights,
            last_input: None,
        })
    }

    /// Get the number of filters.
    pub fn num_filters(&self) -> usize {
        self.num_filters
    }

    /// Get all filter weights as one flat slice (filter-major, row-major).
    pub fn filters(&self) -> &[f32] {
        &self.filters
    }

    /// Get the 9 weights of filter `f`, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `f >= num_filters`.
    pub fn filter(&self, f: usize) -> &[f32] {
        assert!(f < self.num_filters, "filter index out of bounds");
        &self.filters[f * FILTER_AREA..(f + 1) * FILTER_AREA]
    }

    /// Get the total number of trainable parameters (9 per filter, no biases).
    pub fn parameter_count(&self) -> usize {
        self.filters.len()
    }

    /// Forward pass: cross-correlate the input against every filter.
    ///
    /// Returns an `(H-2, W-2, F)` volume where element `(row, col, f)` is the
    /// 9-term dot product of filter `f` with the 3x3 window whose top-left
    /// corner is at `(row, col)`. Inputs smaller than 3x3 in either dimension
    /// produce a volume that is empty along the affected dimension(s); this is
    /// not an error.
    ///
    /// The input is cached for the next `backward` call, replacing any
    /// previously cached input.
    pub fn forward(&mut self, input: &Grid) -> Volume {
        let out_rows = input.rows().saturating_sub(FILTER_SIZE - 1);
        let out_cols = input.cols().saturating_sub(FILTER_SIZE - 1);
        let mut output = Volume::zeros(out_rows, out_cols, self.num_filters);

        for region in input.regions() {
            for f in 0..self.num_filters {
                let filter = &self.filters[f * FILTER_AREA..(f + 1) * FILTER_AREA];
                let mut sum = 0.0f32;
                for i in 0..FILTER_SIZE {
                    for j in 0..FILTER_SIZE {
                        sum += region.get(i, j) * filter[i * FILTER_SIZE + j];
                    }
                }
                output.set(region.row(), region.col(), f, sum);
            }
        }

        self.last_input = Some(input.clone());
        output
    }

    /// Backward pass: accumulate filter gradients and apply the SGD update.
    ///
    /// `upstream` is the gradient of the loss with respect to this layer's
    /// last forward output and must match that output's `(H-2, W-2, F)` shape.
    /// After accumulation, every filter weight is updated in place:
    /// `w -= learning_rate * grad`. Gradient accumulation is independent of
    /// the update, so a learning rate of zero computes the full gradient but
    /// leaves the filters unchanged.
    ///
    /// The cached input is consumed: a second `backward` without a fresh
    /// `forward` fails with [`ConvError::StaleState`]. On error the filters
    /// are untouched.
    ///
    /// No input-gradient is returned; see the type-level docs.
    ///
    /// # Errors
    ///
    /// * [`ConvError::StaleState`] - no cached input (the shape check is
    ///   skipped in this case, and a mismatched `upstream` is left for the
    ///   caller to discover on the next valid call)
    /// * [`ConvError::ShapeMismatch`] - `upstream` shape is wrong; the cached
    ///   input is retained so the caller may retry with a corrected gradient
    pub fn backward(&mut self, upstream: &Volume, learning_rate: f32) -> Result<(), ConvError> {
        let input = match self.last_input.as_ref() {
            Some(grid) => grid,
            None => return Err(ConvError::StaleState),
        };

        let expected = (
            input.rows().saturating_sub(FILTER_SIZE - 1),
            input.cols().saturating_sub(FILTER_SIZE - 1),
            self.num_filters,
        );
        if upstream.shape() != expected {
            return Err(ConvError::ShapeMismatch {
                expected,
                actual: upstream.shape(),
            });
        }

        let grads = self.filter_gradients(input, upstream);
        self.last_input = None;

        for (weight, grad) in self.filters.iter_mut().zip(grads.iter()) {
            *weight -= learning_rate * grad;
        }

        Ok(())
    }

    /// Accumulate the loss gradient for every filter weight.
    ///
    /// For each window and filter f, the window scaled by `upstream[row, col, f]`
    /// is added into filter f's gradient.
    fn filter_gradients(&self, input: &Grid, upstream: &Volume) -> Vec<f32> {
        let mut grads = vec![0.0f32; self.filters.len()];

        for region in input.regions() {
            for f in 0..self.num_filters {
                let scale = upstream.get(region.row(), region.col(), f);
                for i in 0..FILTER_SIZE {
                    for j in 0..FILTER_SIZE {
                        grads[f * FILTER_AREA + i * FILTER_SIZE + j] += scale * region.get(i, j);
                    }
                }
            }
        }

        grads
    }

    /// Save the filter bank as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::Io`] if the file cannot be written or
    /// [`ConvError::Serde`] if serialization fails.
    pub fn save_filters<P: AsRef<Path>>(&self, path: P) -> Result<(), ConvError> {
        let bank = FilterBank {
            num_filters: self.num_filters,
            weights: self.filters.clone(),
        };
        let contents = serde_json::to_string_pretty(&bank)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load a filter bank previously written by [`save_filters`](Self::save_filters).
    ///
    /// The loaded layer starts with no cached input.
    ///
    /// # Errors
    ///
    /// Returns [`ConvError::Io`] if the file cannot be read,
    /// [`ConvError::Serde`] if the JSON is invalid, or
    /// [`ConvError::InvalidFilterBank`] if the stored bank fails validation.
    pub fn load_filters<P: AsRef<Path>>(path: P) -> Result<Self, ConvError> {
        let contents = fs::read_to_string(path)?;
        let bank: FilterBank = serde_json::from_str(&contents)?;
        Self::from_weights(bank.num_filters, bank.weights)
    }
}
