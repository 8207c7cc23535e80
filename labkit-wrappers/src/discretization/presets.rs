//! Discretizations of classic control environments.
use super::{inner_separators, DiscretizationWrapper, TileCodingWrapper};
use anyhow::Result;
use labkit_core::Env;

/// Separators of CartPole observations: cart position, cart velocity, pole
/// angle and pole angular velocity, each split into `bins` bins.
pub fn cart_pole_separators(bins: usize) -> Vec<Vec<f64>> {
    vec![
        inner_separators(-2.4, 2.4, bins),
        inner_separators(-3.0, 3.0, bins),
        inner_separators(-0.2, 0.2, bins),
        inner_separators(-2.0, 2.0, bins),
    ]
}

/// Discretized CartPole, 8 bins per dimension by default.
pub fn discrete_cart_pole<E>(env: E, bins: Option<usize>) -> Result<DiscretizationWrapper<E>>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    DiscretizationWrapper::new(env, cart_pole_separators(bins.unwrap_or(8)))
}

/// Default number of MountainCar bins; finer grids without tile coding.
pub fn mountain_car_bins(tiles: Option<usize>) -> usize {
    match tiles {
        None | Some(0..=1) => 24,
        Some(2..=3) => 12,
        Some(_) => 8,
    }
}

/// Separators of MountainCar observations: car position and velocity.
pub fn mountain_car_separators(bins: usize) -> Vec<Vec<f64>> {
    vec![
        inner_separators(-1.2, 0.6, bins),
        inner_separators(-0.07, 0.07, bins),
    ]
}

/// Discretized MountainCar without tile coding, 24 bins per dimension by default.
pub fn discrete_mountain_car<E>(env: E, bins: Option<usize>) -> Result<DiscretizationWrapper<E>>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    let bins = bins.unwrap_or_else(|| mountain_car_bins(None));
    DiscretizationWrapper::new(env, mountain_car_separators(bins))
}

/// Tile-coded MountainCar; see [`mountain_car_bins`] for the default bins.
pub fn tiled_mountain_car<E>(
    env: E,
    bins: Option<usize>,
    tiles: usize,
) -> Result<TileCodingWrapper<E>>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    let bins = bins.unwrap_or_else(|| mountain_car_bins(Some(tiles)));
    TileCodingWrapper::new(env, mountain_car_separators(bins), tiles)
}

/// Separators of LunarLander observations.
pub fn lunar_lander_separators() -> Vec<Vec<f64>> {
    vec![
        inner_separators(-0.4, 0.4, 5),    // position x
        inner_separators(-0.075, 1.35, 6), // position y
        inner_separators(-0.5, 0.5, 5),    // velocity x
        inner_separators(-0.8, 0.8, 7),    // velocity y
        inner_separators(-0.2, 0.2, 3),    // rotation
        inner_separators(-0.2, 0.2, 5),    // angular velocity
        vec![0.5],                         // left contact
        vec![0.5],                         // right contact
    ]
}

/// Discretized LunarLander.
pub fn discrete_lunar_lander<E>(env: E) -> Result<DiscretizationWrapper<E>>
where
    E: Env,
    E::Obs: AsRef<[f64]>,
{
    DiscretizationWrapper::new(env, lunar_lander_separators())
}
