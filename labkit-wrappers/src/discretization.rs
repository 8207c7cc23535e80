//! Discretization of continuous observations.
//!
//! A [`Discretizer`] maps every observation dimension to a bin given by a
//! sorted list of separators and combines the bins into a single state
//! index. With tile coding, several shifted copies of the grid (tilings) are
//! used and every tiling maps to its own range of state indices.
mod discretizer;
mod presets;
mod wrapper;
pub use discretizer::{digitize, inner_separators, Discretizer};
pub use presets::{
    cart_pole_separators, discrete_cart_pole, discrete_lunar_lander, discrete_mountain_car,
    lunar_lander_separators, mountain_car_bins, mountain_car_separators, tiled_mountain_car,
};
pub use wrapper::{DiscretizationWrapper, TileCodingWrapper};
