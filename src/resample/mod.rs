/// A scheme producing a stream of resamples (or reductions of them) from `T`.
pub trait Re<T: ?Sized> {
    /// What each step of the stream yields.
    type Item;
    /// Start a fresh stream over `t`.
    fn re(&self, t: &T) -> impl Iterator<Item = Self::Item>;
}

mod combinations;

pub use combinations::{Combinations, SubsetSums, Subsets};
