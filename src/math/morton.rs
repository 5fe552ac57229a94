//! Morton encoding (Z-order curve)
//!
//! The octant bits of a location code, read below the sentinel bit, form the
//! Morton code of the node's integer cell coordinates at its depth.

use crate::core::types::UVec3;

/// Bits per axis that fit in a 64-bit Morton code.
pub const AXIS_BITS: u32 = 21;

const AXIS_MASK: u64 = (1 << AXIS_BITS) - 1;

/// Spread the low 21 bits of `x` so that bit i lands on bit 3i
fn spread_bits(x: u32) -> u64 {
    let mut x = x as u64 & AXIS_MASK;
    x = (x | (x << 32)) & 0x1f00000000ffff;
    x = (x | (x << 16)) & 0x1f0000ff0000ff;
    x = (x | (x << 8)) & 0x100f00f00f00f00f;
    x = (x | (x << 4)) & 0x10c30c30c30c30c3;
    x = (x | (x << 2)) & 0x1249249249249249;
    x
}

/// Inverse of [`spread_bits`]
fn compact_bits(x: u64) -> u32 {
    let mut x = x & 0x1249249249249249;
    x = (x | (x >> 2)) & 0x10c30c30c30c30c3;
    x = (x | (x >> 4)) & 0x100f00f00f00f00f;
    x = (x | (x >> 8)) & 0x1f0000ff0000ff;
    x = (x | (x >> 16)) & 0x1f00000000ffff;
    x = (x | (x >> 32)) & AXIS_MASK;
    x as u32
}

/// Interleave cell coordinates, x in bit 0 of every triple, y in bit 1, z in bit 2
pub fn encode(cell: UVec3) -> u64 {
    spread_bits(cell.x) | (spread_bits(cell.y) << 1) | (spread_bits(cell.z) << 2)
}

/// Split a Morton code back into cell coordinates
pub fn decode(code: u64) -> UVec3 {
    UVec3::new(compact_bits(code), compact_bits(code >> 1), compact_bits(code >> 2))
}
