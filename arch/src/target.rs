use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Instruction set family a run compiles, assembles or executes for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Register machine with a memory-backed operand stack.
    #[default]
    Reg,
    /// Pure stack machine.
    Stack,
}

impl Target {
    /// Hex digits of one machine word.
    pub fn word_digits(&self) -> usize {
        match self {
            Target::Reg => 4,
            Target::Stack => 3,
        }
    }

    /// The all-ones word, which both families decode as `halt`.
    pub fn halt(&self) -> u16 {
        match self {
            Target::Reg => 0xFFFF,
            Target::Stack => 0x0FFF,
        }
    }

    /// Render a word zero-padded to the family's width.
    pub fn hex(&self, word: u16) -> String {
        format!("{:0width$X}", word, width = self.word_digits())
    }
}

#[test]
fn test() {
    assert_eq!("reg".parse::<Target>(), Ok(Target::Reg));
    assert_eq!("Stack".parse::<Target>(), Ok(Target::Stack));
    assert!("risc".parse::<Target>().is_err());
    assert_eq!(Target::Stack.to_string(), "stack");
    assert_eq!(Target::Reg.hex(0x100), "0100");
    assert_eq!(Target::Stack.hex(0x100), "100");
    assert_eq!(Target::Stack.hex(Target::Stack.halt()), "FFF");
}
