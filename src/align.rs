use std::hash::Hash;

use similar::{capture_diff_slices, Algorithm};

pub use similar::{DiffOp, DiffTag};

/// Align two ordered token sequences into equal/replace/delete/insert
/// opcode runs.
///
/// LCS-based, junk-free and deterministic: equal inputs always produce the
/// same opcodes. The returned runs partition both sequences contiguously and
/// in order. The same primitive serves paragraph-level alignment (over text
/// keys) and word-level alignment inside changed pairs.
pub fn align<T>(old: &[T], new: &[T]) -> Vec<DiffOp>
where
    T: Eq + Hash + Ord,
{
    capture_diff_slices(Algorithm::Lcs, old, new)
}
