use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Reg {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Reg {
    pub const COUNT: usize = 8;

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Unknown reg name: {s}")),
        }
    }

    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

impl From<Reg> for u16 {
    fn from(reg: Reg) -> u16 {
        u8::from(reg) as u16
    }
}

#[test]
fn test() {
    assert_eq!(Reg::R5.to_string(), "r5");
    assert_eq!(Reg::parse("r2"), Ok(Reg::R2));
    assert_eq!(Reg::parse("R7"), Ok(Reg::R7));
    assert!(Reg::parse("r8").is_err());
    assert!(Reg::parse("hoge").is_err());
    assert_eq!(Reg::try_from(3u8).ok(), Some(Reg::R3));
    assert!(Reg::try_from(8u8).is_err());
}
