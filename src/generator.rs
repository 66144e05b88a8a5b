//! Seeded preference generation for demos, tests and benchmarks.
//!
//! The engine never generates preferences itself. This module is one
//! external source of tables: every row is a uniformly random permutation
//! drawn from a `ChaCha8Rng`, so the same seed always yields the same table.
//!
//! ```
//! use stable_match::generator::random_table;
//!
//! let a = random_table(50, 7).unwrap();
//! let b = random_table(50, 7).unwrap();
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::Result;
use crate::types::PreferenceTable;

/// `n` random permutations of `0..n`
pub fn random_rows<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vec<usize>> {
    (0..n)
        .map(|_| {
            let mut row: Vec<usize> = (0..n).collect();
            row.shuffle(rng);
            row
        })
        .collect()
}

/// Random table for `n` agents per side, reproducible from `seed`.
///
/// Proposer rows are drawn first, then receiver rows, from one stream.
pub fn random_table(n: usize, seed: u64) -> Result<PreferenceTable> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_table_with(n, &mut rng)
}

/// Random table drawn from a caller-supplied generator
pub fn random_table_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<PreferenceTable> {
    let proposers = random_rows(n, rng);
    let receivers = random_rows(n, rng);
    PreferenceTable::new(&proposers, &receivers)
}

/// Every agent on both sides ranks the other side in identity order.
///
/// All proposers compete for receiver 0 first, so this is the table with
/// the most rejections for a given `n`.
pub fn uniform_table(n: usize) -> Result<PreferenceTable> {
    let row: Vec<usize> = (0..n).collect();
    let rows = vec![row; n];
    PreferenceTable::new(&rows, &rows)
}
