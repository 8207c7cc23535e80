//! Simple replay buffer with possibly limited capacity.
use super::ReplayBufferConfig;
use crate::{error::LabkitError, ExperienceBufferBase, ReplayBufferBase};
use anyhow::Result;
use log::debug;
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};

/// A replay buffer with circular overwrite and uniform random sampling.
///
/// Items are opaque to the buffer. With a capacity `C`, the buffer keeps the
/// `C` most recently appended items; the next append after that replaces the
/// oldest one in place. Items are addressed by logical index, where `0` is
/// the oldest retained item and `-1` the newest.
///
/// # Examples
///
/// ```rust
/// use labkit_core::ReplayBuffer;
///
/// let mut buffer = ReplayBuffer::new(Some(3)).unwrap();
/// buffer.extend(vec!['A', 'B', 'C', 'D', 'E']);
///
/// assert_eq!(buffer.len(), 3);
/// assert_eq!(*buffer.get(0).unwrap(), 'C');
/// assert_eq!(*buffer.get(-1).unwrap(), 'E');
/// assert!(buffer.get(3).is_err());
/// ```
pub struct ReplayBuffer<T> {
    /// Maximum number of retained items, `None` for unbounded growth.
    capacity: Option<usize>,

    /// Physical storage. Its length never exceeds `capacity`.
    data: Vec<T>,

    /// Physical slot of the oldest item once the buffer is full.
    i: usize,

    /// Generator used by [`ReplayBuffer::sample`].
    rng: StdRng,
}

impl<T> ReplayBuffer<T> {
    /// Creates an empty buffer whose sampling generator is seeded from OS entropy.
    ///
    /// Fails with [`LabkitError::InvalidCapacity`] for `Some(0)`.
    pub fn new(capacity: Option<usize>) -> Result<Self, LabkitError> {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Creates an empty buffer from a configuration; sampling is reproducible
    /// through [`ReplayBufferConfig::seed`].
    pub fn from_config(config: &ReplayBufferConfig) -> Result<Self, LabkitError> {
        Self::with_rng(config.capacity, StdRng::seed_from_u64(config.seed))
    }

    fn with_rng(capacity: Option<usize>, rng: StdRng) -> Result<Self, LabkitError> {
        if capacity == Some(0) {
            return Err(LabkitError::InvalidCapacity(0));
        }
        debug!("Creates a replay buffer with capacity {:?}", capacity);

        Ok(Self {
            capacity,
            data: Vec::new(),
            i: 0,
            rng,
        })
    }

    /// Maximum number of retained items, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no item.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the next append evicts the oldest item.
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.data.len() >= capacity,
            None => false,
        }
    }

    /// Overwrites the oldest item. The buffer must be full.
    #[inline]
    fn overwrite(&mut self, capacity: usize, item: T) {
        self.data[self.i] = item;
        self.i += 1;
        if self.i == capacity {
            self.i = 0;
        }
    }

    /// Appends an item, evicting the oldest one if the buffer is full.
    pub fn append(&mut self, item: T) {
        match self.capacity {
            Some(capacity) if self.data.len() >= capacity => self.overwrite(capacity, item),
            Some(capacity) => {
                self.data.push(item);
                if self.data.len() == capacity {
                    debug!("Replay buffer reached its capacity {}", capacity);
                }
            }
            None => self.data.push(item),
        }
    }

    /// Appends items in order, as repeated [`ReplayBuffer::append`] would.
    ///
    /// When more items than the capacity are given, only the last `capacity`
    /// of them are retained.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        match self.capacity {
            None => self.data.extend(items),
            Some(_) => {
                for item in items {
                    self.append(item);
                }
            }
        }
    }

    /// Maps a logical index in `[-len, len)` to a physical slot.
    fn physical_index(&self, index: isize) -> Result<usize, LabkitError> {
        let len = self.data.len();
        let out_of_range = LabkitError::IndexOutOfRange { index, len };

        let logical = if index < 0 {
            let back = index.unsigned_abs();
            if back > len {
                return Err(out_of_range);
            }
            len - back
        } else {
            let ix = index as usize;
            if ix >= len {
                return Err(out_of_range);
            }
            ix
        };

        // Before the first overwrite `i` is 0, so logical and physical indices coincide.
        Ok((self.i + logical) % len)
    }

    /// Returns the item at the given logical index.
    ///
    /// Non-negative indices count from the oldest retained item (`0` is the
    /// oldest), negative ones from the newest (`-1` is the newest), i.e. a
    /// negative `index` refers to `len + index`. Fails with
    /// [`LabkitError::IndexOutOfRange`] outside `[-len, len)`.
    pub fn get(&self, index: isize) -> Result<&T, LabkitError> {
        let ix = self.physical_index(index)?;
        Ok(&self.data[ix])
    }

    /// Iterates over the retained items from the oldest to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.data.split_at(self.i);
        older.iter().chain(newer.iter())
    }

    /// Samples `count` items uniformly at random with the buffer's own generator.
    ///
    /// See [`ReplayBuffer::sample_with`].
    pub fn sample(&mut self, count: usize, replace: bool) -> Result<Vec<&T>, LabkitError> {
        let ixs = sample_indices(self.data.len(), count, replace, &mut self.rng)?;
        Ok(gather(&self.data, ixs))
    }

    /// Samples `count` items uniformly at random using `rng`.
    ///
    /// With `replace == true` the same item may be drawn several times, which
    /// is the cheap and usual choice for minibatches. With `replace == false`
    /// the drawn positions are pairwise distinct and `count` must not exceed
    /// the number of items. Items are returned in draw order.
    ///
    /// A `count` of zero yields an empty vector, even for an empty buffer.
    /// Drawing a positive number of items from an empty buffer fails with
    /// [`LabkitError::InvalidArgument`].
    pub fn sample_with<R>(
        &self,
        count: usize,
        replace: bool,
        rng: &mut R,
    ) -> Result<Vec<&T>, LabkitError>
    where
        R: Rng + ?Sized,
    {
        let ixs = sample_indices(self.data.len(), count, replace, rng)?;
        Ok(gather(&self.data, ixs))
    }
}

fn gather<T>(data: &[T], ixs: Vec<usize>) -> Vec<&T> {
    ixs.into_iter().map(|ix| &data[ix]).collect()
}

/// Draws `count` physical indices out of `len` slots.
fn sample_indices<R>(
    len: usize,
    count: usize,
    replace: bool,
    rng: &mut R,
) -> Result<Vec<usize>, LabkitError>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    if len == 0 {
        return Err(LabkitError::InvalidArgument(format!(
            "cannot sample {} items from an empty buffer",
            count
        )));
    }

    if replace {
        Ok((0..count).map(|_| rng.gen_range(0..len)).collect())
    } else if count > len {
        Err(LabkitError::InvalidArgument(format!(
            "cannot sample {} distinct items from a buffer of length {}",
            count, len
        )))
    } else {
        Ok(index::sample(rng, len, count).into_vec())
    }
}

impl<T> Extend<T> for ReplayBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        ReplayBuffer::extend(self, iter)
    }
}

impl<T> ExperienceBufferBase for ReplayBuffer<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        self.append(tr);
        Ok(())
    }
}

impl<T: Clone> ReplayBufferBase for ReplayBuffer<T> {
    type Config = ReplayBufferConfig;
    type Batch = Vec<T>;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self::from_config(config)?)
    }

    /// Samples `size` items with replacement and clones them into a batch.
    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        let batch = self.sample(size, true)?.into_iter().cloned().collect();
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_log::test;

    fn contents<T: Clone>(buffer: &ReplayBuffer<T>) -> Vec<T> {
        buffer.iter().cloned().collect()
    }

    fn seeded(capacity: Option<usize>) -> ReplayBuffer<usize> {
        ReplayBuffer::from_config(&ReplayBufferConfig::default().capacity(capacity).seed(0))
            .unwrap()
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            ReplayBuffer::<u8>::new(Some(0)).err(),
            Some(LabkitError::InvalidCapacity(0))
        );
        assert!(ReplayBuffer::<u8>::new(None).is_ok());
    }

    #[test]
    fn test_capacity_bound() {
        for n in 0..10 {
            let mut buffer = seeded(Some(4));
            let mut unbounded = seeded(None);
            for x in 0..n {
                buffer.append(x);
                unbounded.append(x);
            }
            assert_eq!(buffer.len(), n.min(4));
            assert_eq!(unbounded.len(), n);
            assert_eq!(buffer.is_full(), n >= 4);
            assert!(!unbounded.is_full());
        }
    }

    #[test]
    fn test_wraparound_scenario() {
        let mut buffer = ReplayBuffer::new(Some(3)).unwrap();
        for item in ['A', 'B', 'C', 'D', 'E'] {
            buffer.append(item);
        }

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.get(0), Ok(&'C'));
        assert_eq!(buffer.get(1), Ok(&'D'));
        assert_eq!(buffer.get(2), Ok(&'E'));
        assert_eq!(buffer.get(-1), Ok(&'E'));
        assert_eq!(buffer.get(-3), Ok(&'C'));
        assert_eq!(
            buffer.get(3),
            Err(LabkitError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            buffer.get(-4),
            Err(LabkitError::IndexOutOfRange { index: -4, len: 3 })
        );
    }

    #[test]
    fn test_order_preserved_under_wraparound() {
        let capacity = 5;
        let mut buffer = seeded(Some(capacity));
        buffer.extend(0..=capacity);
        assert_eq!(contents(&buffer), (1..=capacity).collect::<Vec<_>>());

        // Several full cycles.
        buffer.extend(100..113);
        assert_eq!(contents(&buffer), (108..113).collect::<Vec<_>>());
        for (ix, item) in (108..113).enumerate() {
            assert_eq!(buffer.get(ix as isize), Ok(&item));
        }
    }

    #[test]
    fn test_fifo_eviction() {
        let mut buffer = seeded(Some(3));
        buffer.extend(vec![10, 11, 12]);
        let oldest = *buffer.get(0).unwrap();

        buffer.append(13);
        assert!(buffer.iter().all(|&x| x != oldest));
        assert_eq!(buffer.get(buffer.len() as isize - 1), Ok(&13));
        assert_eq!(buffer.get(0), Ok(&11));
    }

    #[test]
    fn test_indexing_symmetry() {
        let mut buffer = seeded(Some(4));
        for x in 0..11 {
            buffer.append(x);
            let len = buffer.len() as isize;
            assert_eq!(buffer.get(-1), buffer.get(len - 1));
            assert_eq!(buffer.get(-len), buffer.get(0));
            assert_eq!(buffer.get(0), Ok(&contents(&buffer)[0]));
        }
    }

    #[test]
    fn test_get_on_empty_buffer() {
        let buffer = seeded(Some(2));
        assert!(buffer.get(0).is_err());
        assert!(buffer.get(-1).is_err());
    }

    #[test]
    fn test_extend_unbounded() {
        let mut buffer = seeded(None);
        buffer.extend(vec![1, 2, 3]);
        buffer.extend(vec![4, 5]);
        buffer.extend(Vec::new());
        assert_eq!(buffer.len(), 5);
        assert_eq!(contents(&buffer), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_extend_matches_repeated_append() {
        let mut a = seeded(Some(7));
        let mut b = seeded(Some(7));
        a.extend(0..23);
        for x in 0..23 {
            b.append(x);
        }
        assert_eq!(contents(&a), contents(&b));
        assert_eq!(a.i, b.i);
    }

    #[test]
    fn test_std_extend_trait() {
        let mut buffer = seeded(Some(2));
        Extend::extend(&mut buffer, vec![1, 2, 3]);
        assert_eq!(contents(&buffer), vec![2, 3]);
    }

    #[test]
    fn test_sample_without_replacement_two_items() {
        let mut buffer = seeded(Some(2));
        buffer.extend(vec![7, 8, 9]);
        for _ in 0..50 {
            let mut sample = buffer.sample(2, false).unwrap();
            sample.sort();
            assert_eq!(sample, vec![&8, &9]);
        }
    }

    #[test]
    fn test_sample_without_replacement_is_distinct() {
        let mut buffer = seeded(Some(10));
        buffer.extend(0..25);
        let mut rng = StdRng::seed_from_u64(11);
        for k in 0..=10 {
            let sample = buffer.sample_with(k, false, &mut rng).unwrap();
            assert_eq!(sample.len(), k);
            let unique = sample.iter().collect::<HashSet<_>>();
            assert_eq!(unique.len(), k);
        }
        assert!(matches!(
            buffer.sample_with(11, false, &mut rng),
            Err(LabkitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sample_stays_in_window() {
        let mut buffer = seeded(Some(6));
        buffer.extend(0..20);
        let window = contents(&buffer);
        for &replace in &[true, false] {
            let sample = buffer.sample(6, replace).unwrap();
            assert!(sample.iter().all(|x| window.contains(*x)));
        }
        let sample = buffer.sample(1000, true).unwrap();
        assert_eq!(sample.len(), 1000);
        assert!(sample.iter().all(|&&x| (14..20).contains(&x)));
    }

    #[test]
    fn test_sample_count_zero_and_empty_buffer() {
        let mut buffer = seeded(None);
        assert!(buffer.sample(0, true).unwrap().is_empty());
        assert!(buffer.sample(0, false).unwrap().is_empty());
        assert!(matches!(
            buffer.sample(1, true),
            Err(LabkitError::InvalidArgument(_))
        ));
        assert!(matches!(
            buffer.sample(1, false),
            Err(LabkitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sample_is_reproducible_with_injected_rng() {
        let mut buffer = seeded(Some(50));
        buffer.extend(0..80);
        let a = buffer
            .sample_with(16, true, &mut StdRng::seed_from_u64(5))
            .unwrap();
        let b = buffer
            .sample_with(16, true, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_with_replacement_covers_all_items() {
        let mut buffer = seeded(Some(4));
        buffer.extend(0..4);
        let drawn = buffer
            .sample(400, true)
            .unwrap()
            .into_iter()
            .copied()
            .collect::<HashSet<_>>();
        assert_eq!(drawn, (0..4).collect::<HashSet<_>>());
    }

    #[test]
    fn test_capacity_one() {
        let mut buffer = seeded(Some(1));
        for x in 0..4 {
            buffer.append(x);
            assert_eq!(buffer.len(), 1);
            assert_eq!(buffer.get(0), Ok(&x));
            assert_eq!(buffer.get(-1), Ok(&x));
            assert_eq!(buffer.sample(3, true).unwrap(), vec![&x, &x, &x]);
            assert_eq!(buffer.sample(1, false).unwrap(), vec![&x]);
        }
        assert!(buffer.get(1).is_err());
        assert!(buffer.get(isize::MIN).is_err());
    }

    #[test]
    fn test_extend_empty_on_bounded_buffer() {
        let mut buffer = seeded(Some(3));
        buffer.extend(Vec::new());
        assert!(buffer.is_empty());

        buffer.extend(vec![1, 2, 3, 4]);
        buffer.extend(Vec::new());
        assert_eq!(contents(&buffer), vec![2, 3, 4]);
        assert_eq!(buffer.get(0), Ok(&2));
    }

    #[test]
    fn test_sample_after_wraparound_with_own_rng() {
        let mut buffer = seeded(Some(3));
        buffer.extend(0..7);
        let sample = buffer.sample(3, false).unwrap();
        let mut drawn = sample.into_iter().copied().collect::<Vec<_>>();
        drawn.sort_unstable();
        assert_eq!(drawn, vec![4, 5, 6]);
    }

    #[test]
    fn test_traits() -> Result<()> {
        let config = ReplayBufferConfig::default().capacity(Some(3)).seed(1);
        let mut buffer = <ReplayBuffer<String> as ReplayBufferBase>::build(&config)?;
        for s in ["a", "b", "c", "d"] {
            ExperienceBufferBase::push(&mut buffer, s.to_string())?;
        }
        assert_eq!(ExperienceBufferBase::len(&buffer), 3);

        let batch = buffer.batch(8)?;
        assert_eq!(batch.len(), 8);
        assert!(batch.iter().all(|s| s != "a"));

        let config = config.capacity(Some(0));
        assert!(<ReplayBuffer<String> as ReplayBufferBase>::build(&config).is_err());
        Ok(())
    }
}
