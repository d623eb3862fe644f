use serde::{Deserialize, Serialize};

/// Fixed-slot time series with missing samples.
///
/// Slots are in chronological order. Gaps are `None`, including the slots of today
/// that have not occurred yet.
#[must_use]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    derive_more::Deref,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TimeSeries<T>(pub Vec<Option<T>>);

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> FromIterator<Option<T>> for TimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Copy> TimeSeries<T> {
    /// Get the latest known sample: the last present one, scanning back from the end.
    ///
    /// Empty and all-missing series have no latest sample.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.latest_indexed().map(|(_, sample)| sample)
    }

    /// Same as [`Self::latest`], but also returns the slot index of the sample.
    #[must_use]
    pub fn latest_indexed(&self) -> Option<(usize, T)> {
        self.0
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, sample)| sample.map(|sample| (index, sample)))
    }
}
