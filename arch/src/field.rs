/// A bit field of a 16-bit machine word.
///
/// Nibbles are numbered from the most significant end: a word is `n0 n1 n2 n3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Field { shift, width }
    }

    /// Largest value the field can hold.
    pub const fn max(&self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    /// Bits occupied by the field inside a word.
    pub const fn mask(&self) -> u16 {
        self.max() << self.shift
    }

    pub fn fits(&self, value: i64) -> bool {
        (0..=self.max() as i64).contains(&value)
    }

    pub fn pack(&self, value: u16) -> u16 {
        (value & self.max()) << self.shift
    }

    pub fn extract(&self, word: u16) -> u16 {
        (word >> self.shift) & self.max()
    }
}

pub const N1: Field = Field::new(8, 4);
pub const N2: Field = Field::new(4, 4);
pub const N3: Field = Field::new(0, 4);

/// `n2 n3`: immediates and short call targets.
pub const IMM8: Field = Field::new(0, 8);
/// `n1 n2`: conditional branch targets.
pub const MID8: Field = Field::new(4, 8);
/// `n1 n2 n3`: long jump targets and data addresses.
pub const ADDR12: Field = Field::new(0, 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles() {
        assert_eq!(N1.mask(), 0x0F00);
        assert_eq!(N2.mask(), 0x00F0);
        assert_eq!(N3.mask(), 0x000F);
        assert_eq!(MID8.mask(), 0x0FF0);
        assert_eq!(ADDR12.max(), 0x0FFF);
    }

    #[test]
    fn pack_extract() {
        let word = N1.pack(0x3) | IMM8.pack(0xA5);
        assert_eq!(word, 0x03A5);
        assert_eq!(N1.extract(word), 0x3);
        assert_eq!(IMM8.extract(word), 0xA5);
        assert_eq!(MID8.pack(0x12), 0x0120);
    }

    #[test]
    fn fits() {
        assert!(IMM8.fits(0));
        assert!(IMM8.fits(255));
        assert!(!IMM8.fits(256));
        assert!(!IMM8.fits(-1));
        assert!(ADDR12.fits(4095));
        assert!(!ADDR12.fits(4096));
    }
}
