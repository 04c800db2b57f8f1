//! Phase alignment of source bytes.
//!
//! Source and destination spans rarely start on the same bit within a byte.
//! `PhaseAlign` reads source bytes and shifts them so that source bit
//! `x_store & 7` lands on destination bit `x & 7`. Each `fetch` yields the
//! next destination-aligned byte. Reads past the end of the slice see zero
//! bits.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Source starts later in its byte than the destination
    Left,
    Aligned,
    /// Source starts earlier in its byte than the destination
    Right,
}

/// Byte stream over a source row, re-phased to a destination bit position.
#[derive(Debug, Clone)]
pub struct PhaseAlign<'a> {
    store: &'a [u8],
    pos: usize,
    phase: Phase,
    shift: u32,
    carry: u8,
}

impl<'a> PhaseAlign<'a> {
    /// Start a stream for destination bit `x` reading from source bit
    /// `x_store` of `store`. Only `x & 7` matters for the destination; the
    /// source position selects both the starting byte and the phase.
    pub fn start(x: i32, x_store: usize, store: &'a [u8]) -> Self {
        let pos = x_store >> 3;
        let delta = (x & 7) - (x_store & 7) as i32;
        let mut align = Self {
            store,
            pos,
            phase: Phase::Aligned,
            shift: delta.unsigned_abs(),
            carry: 0x00,
        };
        if delta < 0 {
            align.phase = Phase::Left;
            align.carry = align.byte(pos);
        } else if delta > 0 {
            align.phase = Phase::Right;
        }
        align
    }

    fn byte(&self, i: usize) -> u8 {
        self.store.get(i).copied().unwrap_or(0x00)
    }

    /// Next destination-aligned byte.
    pub fn fetch(&mut self) -> u8 {
        match self.phase {
            Phase::Aligned => {
                let b = self.byte(self.pos);
                self.pos += 1;
                b
            }
            Phase::Left => {
                self.pos += 1;
                let lo = self.byte(self.pos);
                let hi = self.carry;
                self.carry = lo;
                (hi << self.shift) | (lo >> (8 - self.shift))
            }
            Phase::Right => {
                let lo = self.byte(self.pos);
                self.pos += 1;
                let hi = self.carry;
                self.carry = lo;
                (hi << (8 - self.shift)) | (lo >> self.shift)
            }
        }
    }
}

/// Byte starting at any bit of `store` (bit 0 is the MSB of the first byte).
pub fn byte_at(x_store: usize, store: &[u8]) -> u8 {
    PhaseAlign::start(0, x_store, store).fetch()
}

/// Big-endian 16-bit value starting at any bit.
pub fn be16_at(x_store: usize, store: &[u8]) -> u16 {
    let mut align = PhaseAlign::start(0, x_store, store);
    let hi = align.fetch();
    let lo = align.fetch();
    u16::from_be_bytes([hi, lo])
}

/// Little-endian 16-bit value starting at any bit.
pub fn le16_at(x_store: usize, store: &[u8]) -> u16 {
    let mut align = PhaseAlign::start(0, x_store, store);
    let lo = align.fetch();
    let hi = align.fetch();
    u16::from_le_bytes([lo, hi])
}

/// Big-endian 32-bit value starting at any bit.
pub fn be32_at(x_store: usize, store: &[u8]) -> u32 {
    let mut align = PhaseAlign::start(0, x_store, store);
    let bytes = [align.fetch(), align.fetch(), align.fetch(), align.fetch()];
    u32::from_be_bytes(bytes)
}

/// Little-endian 32-bit value starting at any bit.
pub fn le32_at(x_store: usize, store: &[u8]) -> u32 {
    let mut align = PhaseAlign::start(0, x_store, store);
    let bytes = [align.fetch(), align.fetch(), align.fetch(), align.fetch()];
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: [u8; 5] = [0x12, 0x34, 0x56, 0x78, 0x9a];

    #[test]
    fn test_aligned_fetch_is_plain_copy() {
        let mut align = PhaseAlign::start(3, 11, &STORE);
        assert_eq!(align.fetch(), 0x34);
        assert_eq!(align.fetch(), 0x56);
    }

    #[test]
    fn test_byte_at_every_phase() {
        // 0x1234 = 0001 0010 0011 0100
        assert_eq!(byte_at(0, &STORE), 0x12);
        assert_eq!(byte_at(4, &STORE), 0x23);
        assert_eq!(byte_at(1, &STORE), 0x24);
        assert_eq!(byte_at(7, &STORE), 0x1a);
    }

    #[test]
    fn test_right_shift_fills_from_zero_carry() {
        // Destination bit 4 reading source bit 0: the first byte carries the
        // high nibble of the source in its low nibble.
        let mut align = PhaseAlign::start(4, 0, &STORE);
        assert_eq!(align.fetch(), 0x01);
        assert_eq!(align.fetch(), 0x23);
        assert_eq!(align.fetch(), 0x45);
    }

    #[test]
    fn test_reads_past_end_are_zero() {
        assert_eq!(byte_at(36, &STORE), 0xa0);
        assert_eq!(byte_at(64, &STORE), 0x00);
    }

    #[test]
    fn test_multi_byte_helpers() {
        assert_eq!(be16_at(0, &STORE), 0x1234);
        assert_eq!(le16_at(0, &STORE), 0x3412);
        assert_eq!(be16_at(4, &STORE), 0x2345);
        assert_eq!(be32_at(8, &STORE), 0x3456_789a);
        assert_eq!(le32_at(8, &STORE), 0x9a78_5634);
        assert_eq!(be32_at(4, &STORE), 0x2345_6789);
    }
}
