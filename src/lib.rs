//! 3x3 Convolution Layer Library
//!
//! This library provides a single trainable convolutional layer: it transforms
//! a 2-D input grid into a 3-D stack of feature maps using learned 3x3 filters
//! (valid padding, stride 1) and supports gradient-based weight updates from an
//! upstream loss signal.
//!
//! # Modules
//!
//! - `conv`: The `ConvLayer` itself (forward pass, backward pass, persistence)
//! - `grid`: 2-D `Grid` and 3-D `Volume` containers
//! - `regions`: Sliding-window enumeration of 3x3 regions over a grid
//! - `rng`: Seeded RNG for reproducible filter initialization
//! - `error`: The `ConvError` taxonomy

pub mod conv;
pub mod error;
pub mod grid;
pub mod regions;
pub mod rng;

// Re-export the main types for convenience
pub use conv::ConvLayer;
pub use error::ConvError;
pub use grid::{Grid, Volume};
pub use regions::{Region, Regions};
pub use rng::SimpleRng;
