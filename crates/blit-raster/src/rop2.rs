//! Binary raster operations.
//!
//! A ROP2 combines a source byte S with a destination byte D bit by bit.
//! There are exactly sixteen such functions. Each is named by its reverse
//! polish program over the operands `D` and `S`, with `a` and, `o` or,
//! `x` xor, `n` not. `DSon` is `~(D | S)`.
//!
//! The discriminant doubles as a truth table: bit `2s + d` of the index is
//! the result for source bit `s` and destination bit `d`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::RasterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rop2 {
    Zero = 0,
    DSon,
    DSna,
    Sn,
    SDna,
    Dn,
    DSx,
    DSan,
    DSa,
    DSxn,
    D,
    DSno,
    S,
    SDno,
    DSo,
    One,
}

/// Source operand of the truth-table evaluation: bits with s = 1.
const TRUTH_S: u8 = 0b1100;
/// Destination operand of the truth-table evaluation: bits with d = 1.
const TRUTH_D: u8 = 0b1010;

static ALIASES: [(&str, Rop2); 11] = [
    ("not_erase", Rop2::NOT_ERASE),
    ("not_copy", Rop2::NOT_COPY),
    ("erase", Rop2::ERASE),
    ("xor", Rop2::XOR),
    ("and", Rop2::AND),
    ("merge_paint", Rop2::MERGE_PAINT),
    ("copy", Rop2::COPY),
    ("paint", Rop2::PAINT),
    ("blackness", Rop2::BLACKNESS),
    ("invert", Rop2::INVERT),
    ("whiteness", Rop2::WHITENESS),
];

impl Rop2 {
    pub const ALL: [Rop2; 16] = [
        Rop2::Zero,
        Rop2::DSon,
        Rop2::DSna,
        Rop2::Sn,
        Rop2::SDna,
        Rop2::Dn,
        Rop2::DSx,
        Rop2::DSan,
        Rop2::DSa,
        Rop2::DSxn,
        Rop2::D,
        Rop2::DSno,
        Rop2::S,
        Rop2::SDno,
        Rop2::DSo,
        Rop2::One,
    ];

    pub const NOT_ERASE: Rop2 = Rop2::DSon;
    pub const NOT_COPY: Rop2 = Rop2::Sn;
    pub const ERASE: Rop2 = Rop2::SDna;
    pub const XOR: Rop2 = Rop2::DSx;
    pub const AND: Rop2 = Rop2::DSa;
    pub const MERGE_PAINT: Rop2 = Rop2::DSno;
    pub const COPY: Rop2 = Rop2::S;
    pub const PAINT: Rop2 = Rop2::DSo;
    pub const BLACKNESS: Rop2 = Rop2::Zero;
    pub const INVERT: Rop2 = Rop2::Sn;
    pub const WHITENESS: Rop2 = Rop2::One;

    /// Combine source and destination bytes.
    pub fn apply(self, s: u8, d: u8) -> u8 {
        match self {
            Rop2::Zero => 0x00,
            Rop2::DSon => !(d | s),
            Rop2::DSna => d & !s,
            Rop2::Sn => !s,
            Rop2::SDna => s & !d,
            Rop2::Dn => !d,
            Rop2::DSx => d ^ s,
            Rop2::DSan => !(d & s),
            Rop2::DSa => d & s,
            Rop2::DSxn => !(d ^ s),
            Rop2::D => d,
            Rop2::DSno => d | !s,
            Rop2::S => s,
            Rop2::SDno => s | !d,
            Rop2::DSo => d | s,
            Rop2::One => 0xff,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Rop2> {
        Rop2::ALL.get(usize::from(index)).copied()
    }

    /// Four-bit truth table computed through `apply`.
    pub fn truth_table(self) -> u8 {
        self.apply(TRUTH_S, TRUTH_D) & 0x0f
    }

    /// Reverse polish name.
    pub fn polish(self) -> &'static str {
        match self {
            Rop2::Zero => "0",
            Rop2::DSon => "DSon",
            Rop2::DSna => "DSna",
            Rop2::Sn => "Sn",
            Rop2::SDna => "SDna",
            Rop2::Dn => "Dn",
            Rop2::DSx => "DSx",
            Rop2::DSan => "DSan",
            Rop2::DSa => "DSa",
            Rop2::DSxn => "DSxn",
            Rop2::D => "D",
            Rop2::DSno => "DSno",
            Rop2::S => "S",
            Rop2::SDno => "SDno",
            Rop2::DSo => "DSo",
            Rop2::One => "1",
        }
    }

    /// Aliases naming this operation, if any.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, rop)| *rop == self)
            .map(|(name, _)| *name)
    }

    /// Evaluate a reverse polish program on the truth-table operands.
    ///
    /// Any well-formed program names one of the sixteen operations, so
    /// `SDo` and `DSo` give the same result.
    pub fn from_polish(program: &str) -> Result<Rop2, RasterError> {
        let fail = |reason: &str| RasterError::Polish {
            program: program.to_string(),
            reason: reason.to_string(),
        };
        let mut stack: Vec<u8> = Vec::with_capacity(4);
        for token in program.chars() {
            match token {
                'D' => stack.push(TRUTH_D),
                'S' => stack.push(TRUTH_S),
                '0' => stack.push(0x0),
                '1' => stack.push(0xf),
                'n' => {
                    let a = stack.pop().ok_or_else(|| fail("'n' needs one operand"))?;
                    stack.push(!a & 0x0f);
                }
                'a' | 'o' | 'x' => {
                    let b = stack.pop().ok_or_else(|| fail("operator needs two operands"))?;
                    let a = stack.pop().ok_or_else(|| fail("operator needs two operands"))?;
                    stack.push(match token {
                        'a' => a & b,
                        'o' => a | b,
                        _ => a ^ b,
                    });
                }
                other => return Err(fail(&format!("unexpected '{other}'"))),
            }
        }
        match stack.as_slice() {
            [value] => Rop2::from_index(*value).ok_or_else(|| fail("result out of range")),
            [] => Err(fail("empty program")),
            _ => Err(fail("operands left on the stack")),
        }
    }

    /// True when the result depends on the source.
    pub fn uses_source(self) -> bool {
        let t = self.index();
        ((t >> 2) ^ t) & 0b0011 != 0
    }

    /// True when the result depends on the destination.
    pub fn uses_destination(self) -> bool {
        let t = self.index();
        ((t >> 1) ^ t) & 0b0101 != 0
    }
}

impl fmt::Display for Rop2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.polish())
    }
}

impl FromStr for Rop2 {
    type Err = RasterError;

    /// Accepts an alias (`copy`, `xor`, any case) or a reverse polish program.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some((_, rop)) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        {
            return Ok(*rop);
        }
        Rop2::from_polish(name).map_err(|_| RasterError::UnknownRop(s.to_string()))
    }
}

impl Serialize for Rop2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.polish())
    }
}
