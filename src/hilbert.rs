//! N-dimensional Hilbert-curve index calculation.
//!
//! [`hilbert_index`] maps a tuple of non-negative coordinates to a single
//! integer along a Hilbert space-filling curve: coordinates that are close in
//! space usually map to close indices, which is what makes the index a good
//! sort key for perceptually smooth color ordering.
//!
//! The algorithm works on the bit planes of the coordinates: the coordinate
//! bits are transposed into one N-bit chunk per plane (most significant
//! first), each chunk is Gray-decoded relative to the entry corner of the
//! current hypercube quadrant, and the decoded digits are packed in base
//! `2^N`.

use smallvec::SmallVec;

/// Bit planes for 255-scaled RGB coordinates fit inline (16 planes).
type Chunks = SmallVec<[u32; 16]>;

/// Calculate the Hilbert-curve index of a coordinate tuple.
///
/// Deterministic and injective over coordinate tuples of a fixed length:
/// distinct tuples map to distinct indices. The all-zero tuple maps to 0.
///
/// The result is packed in base `2^N` over `bits` digits, so a `u128`
/// accommodates three 32-bit coordinates.
///
/// # Panics
///
/// Panics when `coordinates` is empty.
#[must_use]
pub fn hilbert_index(coordinates: &[u32]) -> u128 {
    assert!(!coordinates.is_empty(), "coordinates must not be empty");

    let n = u32::try_from(coordinates.len()).expect("coordinate count fits in u32");
    let chunks = transpose_bits(coordinates);
    let mask = (1u32 << n) - 1;

    let (mut start, mut end) = start_and_end(chunks.len(), coordinates.len());
    let mut digits: Chunks = SmallVec::with_capacity(chunks.len());

    for &chunk in &chunks {
        let digit = gray_decode_relative(start, mask, chunk, n);
        digits.push(digit);
        (start, end) = child_start_and_end(start, end, mask, digit, n);
    }

    pack_index(&digits, n)
}

/// Number of bit planes needed for the largest coordinate:
/// `max(1, ceil(log2(max + 1)))`, computed without floating point.
fn bit_planes(coordinates: &[u32]) -> usize {
    let biggest = coordinates.iter().copied().max().unwrap_or(0);
    ((u32::BITS - biggest.leading_zeros()) as usize).max(1)
}

/// Transpose the coordinate bits into one N-bit chunk per bit plane,
/// most-significant plane first. Coordinate 0 contributes the most
/// significant bit of each chunk.
fn transpose_bits(coordinates: &[u32]) -> Chunks {
    let planes = bit_planes(coordinates);
    let mut remaining: SmallVec<[u32; 3]> = SmallVec::from_slice(coordinates);
    let mut chunks: Chunks = smallvec::smallvec![0; planes];

    for chunk_index in (0..planes).rev() {
        let mut chunk = 0;
        for coordinate in &mut remaining {
            chunk = chunk * 2 + (*coordinate & 1);
            *coordinate >>= 1;
        }
        chunks[chunk_index] = chunk;
    }

    chunks
}

/// Entry and exit corner of the top-level hypercube:
/// `start = 0`, `end = 2^((-planes - 1) mod N)`.
fn start_and_end(planes: usize, dimensions: usize) -> (u32, u32) {
    let planes = i64::try_from(planes).expect("plane count fits in i64");
    let dimensions = i64::try_from(dimensions).expect("dimension count fits in i64");
    let shift = (-planes - 1).rem_euclid(dimensions);
    (0, 1u32 << shift)
}

/// Decode one chunk into its output digit, relative to the entry corner of
/// the current quadrant.
fn gray_decode_relative(start: u32, mask: u32, chunk: u32, n: u32) -> u32 {
    // XOR with the entry corner, scale by half the modulus and fold the
    // overflow back in before the plain Gray decode.
    let scaled = (chunk ^ start) << (n - 1);
    gray_decode((scaled | (scaled >> n)) & mask)
}

/// Standard binary-from-Gray decode with a doubling shift.
///
/// The shift doubles each round and the value is bounded by the coordinate
/// mask, so the loop is bounded by the bit width of `u32`.
fn gray_decode(gray: u32) -> u32 {
    let mut value = gray;
    let mut shift = 1;
    while shift < u32::BITS {
        let div = value >> shift;
        value ^= div;
        if div <= 1 {
            return value;
        }
        shift <<= 1;
    }
    value
}

/// Gray encode: `index ^ (index >> 1)`.
const fn gray_encode(index: u32) -> u32 {
    index ^ (index >> 1)
}

/// Entry and exit corners of the sub-quadrant selected by `digit`, derived
/// through a paired Gray encode over the travel bit `start ^ end`.
fn child_start_and_end(start: u32, end: u32, mask: u32, digit: u32, n: u32) -> (u32, u32) {
    let start_index = u32::try_from(((i64::from(digit) - 1) & !1).max(0)).expect("non-negative");
    let end_index =
        u32::try_from(((i64::from(digit) + 1) | 1).min(i64::from(mask))).expect("non-negative");
    (
        gray_encode_travel(start, end, mask, start_index, n),
        gray_encode_travel(start, end, mask, end_index, n),
    )
}

/// Gray encode `index` oriented along the travel bit between `start` and
/// `end`, folded back under `mask` and rebased on `start`.
fn gray_encode_travel(start: u32, end: u32, mask: u32, index: u32, n: u32) -> u32 {
    let travel_bit = start ^ end;
    let encoded = gray_encode(index) * (travel_bit << 1);
    ((encoded | (encoded >> n)) & mask) ^ start
}

/// Pack the per-plane digits into one integer, most significant digit
/// first, in base `2^N`.
fn pack_index(digits: &[u32], n: u32) -> u128 {
    digits
        .iter()
        .fold(0u128, |acc, &digit| (acc << n) | u128::from(digit))
}
