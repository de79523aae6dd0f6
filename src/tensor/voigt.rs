//! Voigt index bookkeeping shared by every stage
//!
//! Two maps live here and nowhere else:
//!
//! 1. The Voigt pair map, from a composite index (0-based) to the tensor
//!    index pair it stands for:
//!
//! ```text
//!     0 → (1,1)   1 → (2,2)   2 → (3,3)
//!     3 → (2,3)   4 → (1,3)   5 → (1,2)      (1-based tensor indices)
//! ```
//!
//! 2. The constant layout, from a slot in the 21-value input sequence to the
//!    (row, col) of the upper triangle of the 6×6 matrix it fills:
//!
//! ```text
//!     [c11,c22,c33,c44,c55,c66, c12,c13,c23, c15,c25,c35,c46,
//!      c14,c16,c24,c26,c34,c36,c45,c56]
//! ```

/// Number of independent elastic constants of a triclinic crystal
pub const NUM_CONSTANTS: usize = 21;

/// Composite Voigt index → (i, j) tensor index pair, 0-based
pub const VOIGT_PAIRS: [(usize, usize); 6] = [
    (0, 0),
    (1, 1),
    (2, 2),
    (1, 2),
    (0, 2),
    (0, 1),
];

/// Input slot → (row, col) in the upper triangle of the Voigt matrix, 0-based
pub const CONSTANT_LAYOUT: [(usize, usize); NUM_CONSTANTS] = [
    (0, 0), // c11
    (1, 1), // c22
    (2, 2), // c33
    (3, 3), // c44
    (4, 4), // c55
    (5, 5), // c66
    (0, 1), // c12
    (0, 2), // c13
    (1, 2), // c23
    (0, 4), // c15
    (1, 4), // c25
    (2, 4), // c35
    (3, 5), // c46
    (0, 3), // c14
    (0, 5), // c16
    (1, 3), // c24
    (1, 5), // c26
    (2, 3), // c34
    (2, 5), // c36
    (3, 4), // c45
    (4, 5), // c56
];

/// Conventional labels for the input slots, in layout order
pub const CONSTANT_LABELS: [&str; NUM_CONSTANTS] = [
    "c11", "c22", "c33", "c44", "c55", "c66", "c12", "c13", "c23", "c15", "c25", "c35", "c46",
    "c14", "c16", "c24", "c26", "c34", "c36", "c45", "c56",
];

/// Inverse of [`VOIGT_PAIRS`]: tensor index pair → composite Voigt index
#[inline]
pub fn voigt_index(i: usize, j: usize) -> usize {
    if i == j {
        i
    } else {
        6 - i - j
    }
}

/// How many of the two tensor indices behind a Voigt index equal `axis` (0-based)
///
/// A constant C_rs changes sign under a reflection of `axis` exactly when the
/// total count over both of its pairs is odd.
#[inline]
pub(crate) fn axis_count(voigt: usize, axis: usize) -> usize {
    let (i, j) = VOIGT_PAIRS[voigt];
    (i == axis) as usize + (j == axis) as usize
}

/// True when the constant in `slot` changes sign under a reflection of `axis`
#[inline]
pub(crate) fn is_odd_under(slot: usize, axis: usize) -> bool {
    let (r, c) = CONSTANT_LAYOUT[slot];
    (axis_count(r, axis) + axis_count(c, axis)) % 2 == 1
}
