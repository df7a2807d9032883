use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("line {0}: not a hex machine word: `{1}`")]
    InvalidHex(usize, String),

    #[error("undecodable word 0x{1:04X} at 0x{0:04X}")]
    InvalidWord(u16, u16),

    #[error("program counter out of range: 0x{0:04X}")]
    PcOutOfRange(u16),

    #[error("stack underflow at 0x{0:04X}")]
    StackUnderflow(u16),

    #[error("stack overflow at 0x{0:04X}")]
    StackOverflow(u16),

    #[error("cycle limit exceeded: {0}")]
    Timeout(u64),
}
