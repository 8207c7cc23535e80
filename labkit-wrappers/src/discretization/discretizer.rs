//! Grid discretization and tile coding.
use labkit_core::{LabkitError, Space};

/// Returns the index of the bin `value` falls into, i.e. the number of
/// separators less than or equal to `value`.
///
/// `separators` must be sorted in increasing order. NaN sorts after every
/// separator and falls into the last bin.
#[inline]
pub fn digitize(value: f64, separators: &[f64]) -> usize {
    if value.is_nan() {
        return separators.len();
    }
    separators.partition_point(|&s| s <= value)
}

/// Separators splitting `[low, high]` into `bins` equally wide bins.
///
/// The end points are not included, so `bins - 1` separators are returned.
pub fn inner_separators(low: f64, high: f64, bins: usize) -> Vec<f64> {
    let step = (high - low) / bins as f64;
    (1..bins).map(|k| low + k as f64 * step).collect()
}

/// Maps continuous observations to discrete states.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretizer {
    separators: Vec<Vec<f64>>,
    tiles: Option<usize>,

    /// Number of states of the first (unshifted) tiling.
    first_tile_states: usize,

    /// Number of states of each shifted tiling.
    rest_tiles_states: usize,

    /// Shift of a tiling per unit of its shift multiplier, per dimension.
    offsets: Vec<f64>,

    /// Values above these fall into the extra bin of a shifted tiling.
    tops: Vec<f64>,
}

impl Discretizer {
    /// Creates a discretizer with one separator list per observation dimension.
    ///
    /// With `tiles == Some(t)`, `t` tilings are used: the plain grid and
    /// `t - 1` grids shifted by multiples of `1/t` of the first bin width.
    /// Each shifted grid has one more bin per dimension.
    pub fn new(separators: Vec<Vec<f64>>, tiles: Option<usize>) -> Result<Self, LabkitError> {
        if tiles == Some(0) {
            return Err(LabkitError::InvalidArgument(
                "the number of tiles must be positive".to_string(),
            ));
        }
        if let Some(i) = separators
            .iter()
            .position(|s| s.windows(2).any(|w| !(w[0] <= w[1])))
        {
            return Err(LabkitError::InvalidArgument(format!(
                "separators of dimension {} are not sorted",
                i
            )));
        }

        let first_tile_states = separators.iter().map(|s| 1 + s.len()).product();
        let rest_tiles_states = separators.iter().map(|s| 2 + s.len()).product();
        let n_tiles = tiles.unwrap_or(1) as f64;
        let offsets = separators
            .iter()
            .map(|s| if s.len() <= 1 { 0.0 } else { (s[1] - s[0]) / n_tiles })
            .collect();
        let tops = separators
            .iter()
            .map(|s| {
                if s.len() <= 1 {
                    f64::INFINITY
                } else {
                    s[s.len() - 1] + (s[1] - s[0])
                }
            })
            .collect();

        Ok(Self {
            separators,
            tiles,
            first_tile_states,
            rest_tiles_states,
            offsets,
            tops,
        })
    }

    /// Number of observation dimensions.
    pub fn dims(&self) -> usize {
        self.separators.len()
    }

    /// Number of tilings, `None` without tile coding.
    pub fn tiles(&self) -> Option<usize> {
        self.tiles
    }

    /// Number of states of the plain grid.
    pub fn states(&self) -> usize {
        self.first_tile_states
    }

    /// Space of the produced states.
    ///
    /// A [`Space::Discrete`] without tile coding. With tile coding, a
    /// [`Space::MultiDiscrete`] whose `t`-th bound is the end of the index
    /// range of tiling `t`.
    pub fn observation_space(&self) -> Space {
        match self.tiles {
            None => Space::Discrete(self.first_tile_states),
            Some(tiles) => Space::MultiDiscrete(
                (0..tiles)
                    .map(|i| self.first_tile_states + i * self.rest_tiles_states)
                    .collect(),
            ),
        }
    }

    fn check_dims(&self, obs: &[f64]) -> Result<(), LabkitError> {
        if obs.len() != self.separators.len() {
            return Err(LabkitError::InvalidArgument(format!(
                "expected an observation of {} dimensions, got {}",
                self.separators.len(),
                obs.len()
            )));
        }
        Ok(())
    }

    /// State of `obs` in the plain grid.
    pub fn state(&self, obs: &[f64]) -> Result<usize, LabkitError> {
        self.check_dims(obs)?;
        Ok(obs
            .iter()
            .zip(self.separators.iter())
            .fold(0, |state, (&x, s)| state * (1 + s.len()) + digitize(x, s)))
    }

    /// States of `obs` in all tilings, the plain grid first.
    ///
    /// Without tile coding, the result has the single plain-grid state.
    pub fn tile_states(&self, obs: &[f64]) -> Result<Vec<usize>, LabkitError> {
        let tiles = self.tiles.unwrap_or(1);
        let mut states = Vec::with_capacity(tiles);
        states.push(self.state(obs)?);

        for t in 1..tiles {
            let mut state = 0;
            for (i, s) in self.separators.iter().enumerate() {
                state *= 2 + s.len();
                let value = obs[i] + ((t * (2 * i + 1)) % tiles) as f64 * self.offsets[i];
                state += if value > self.tops[i] {
                    1 + s.len()
                } else {
                    digitize(value, s)
                };
            }
            states.push(self.first_tile_states + (t - 1) * self.rest_tiles_states + state);
        }

        Ok(states)
    }
}
