use crate::error::EncodeError;
use crate::field::Field;
use crate::op::{ArgKind, Op};
use crate::reg::Reg;
use crate::target::Target;

use color_print::cformat;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
    Label(String),
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl From<u16> for Operand {
    fn from(imm: u16) -> Self {
        Operand::Imm(imm as i64)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{reg}"),
            Operand::Imm(imm) => write!(f, "{imm}"),
            Operand::Label(name) => write!(f, "{name}"),
        }
    }
}

/// One mnemonic instruction: the text handed from the compiler to the assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(op: Op, operands: Vec<Operand>) -> Self {
        Instruction { op, operands }
    }

    /// Encode into a machine word.
    ///
    /// Label operands are looked up through `resolve`, which receives the label
    /// name and the field its address goes into. A resolver that does not know
    /// the label yet returns a placeholder and arranges to patch the field later.
    pub fn encode<F>(&self, mut resolve: F) -> Result<u16, EncodeError>
    where
        F: FnMut(&str, Field) -> u16,
    {
        let format = self.op.format();
        if self.operands.len() != format.args.len() {
            return Err(EncodeError::OperandCount(
                self.op.to_string(),
                format.args.len(),
                self.operands.len(),
            ));
        }

        let mut word = format.base;
        for (arg, operand) in format.args.iter().zip(&self.operands) {
            let max = arg.field.max();
            let value = match (arg.kind, operand) {
                (ArgKind::Reg, Operand::Reg(reg)) => u16::from(*reg),
                (ArgKind::Imm, Operand::Imm(imm)) => {
                    if !arg.field.fits(*imm) {
                        return Err(EncodeError::ImmediateOutOfRange(*imm, max));
                    }
                    *imm as u16
                }
                (ArgKind::Addr, Operand::Imm(addr)) => {
                    if !arg.field.fits(*addr) {
                        return Err(EncodeError::AddressOutOfRange(*addr, max));
                    }
                    *addr as u16
                }
                (ArgKind::Addr, Operand::Label(name)) => {
                    let addr = resolve(name, arg.field);
                    if !arg.field.fits(addr as i64) {
                        return Err(EncodeError::AddressOutOfRange(addr as i64, max));
                    }
                    addr
                }
                (kind, operand) => {
                    return Err(EncodeError::InvalidOperand(
                        self.op.to_string(),
                        operand.to_string(),
                        kind,
                    ))
                }
            };
            word |= arg.field.pack(value);
        }
        Ok(word)
    }

    /// Decode a machine word of the `target` family. Addresses come back as
    /// numeric operands.
    pub fn decode(word: u16, target: Target) -> Option<Self> {
        Op::all(target).find_map(|op| {
            let format = op.format();
            if word & format.opcode_mask() != format.base {
                return None;
            }
            let operands = format
                .args
                .iter()
                .map(|arg| {
                    let value = arg.field.extract(word);
                    match arg.kind {
                        ArgKind::Reg => Reg::try_from(value as u8).ok().map(Operand::Reg),
                        ArgKind::Imm | ArgKind::Addr => Some(Operand::Imm(value as i64)),
                    }
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Instruction { op, operands })
        })
    }

    pub fn cformat(&self) -> String {
        let operands = self
            .operands
            .iter()
            .map(|operand| match operand {
                Operand::Reg(reg) => cformat!("<b>{}</>", reg),
                Operand::Imm(imm) => cformat!("<y>{}</>", imm),
                Operand::Label(name) => cformat!("<g>{}</>", name),
            })
            .collect::<Vec<_>>()
            .join(",");
        cformat!("<r>{:<6}</>{}", self.op.to_string(), operands)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        for (i, operand) in self.operands.iter().enumerate() {
            let sep = if i == 0 { " " } else { "," };
            write!(f, "{sep}{operand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::MID8;
    use crate::op::{RegOp, StackOp};
    use Reg::*;

    fn reg(op: RegOp, operands: Vec<Operand>) -> Instruction {
        Instruction::new(Op::Reg(op), operands)
    }

    fn stack(op: StackOp, operands: Vec<Operand>) -> Instruction {
        Instruction::new(Op::Stack(op), operands)
    }

    macro_rules! test_enc {
        ($($name:ident: $inst:expr => $word:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    let word = inst.encode(|_, _| 0).unwrap();
                    println!("{} -> {}", inst, inst.op.target().hex(word));
                    assert_eq!(word, $word, "{}", inst);
                    assert_eq!(Instruction::decode(word, inst.op.target()), Some(inst));
                }
            )*
        }
    }

    test_enc! {
        reg_mov: reg(RegOp::Mov, vec![R1.into(), R2.into()]) => 0x0012,
        reg_add: reg(RegOp::Add, vec![R3.into(), R4.into()]) => 0x0134,
        reg_sub: reg(RegOp::Sub, vec![R0.into(), R1.into()]) => 0x0201,
        reg_lt: reg(RegOp::Lt, vec![R2.into(), R1.into()]) => 0x0321,
        reg_mul: reg(RegOp::Mul, vec![R0.into(), R1.into()]) => 0x0401,
        reg_call: reg(RegOp::Call, vec![0x42u16.into()]) => 0x0542,
        reg_push: reg(RegOp::Push, vec![R5.into()]) => 0x0805,
        reg_lds: reg(RegOp::Lds, vec![R0.into(), R1.into()]) => 0x0901,
        reg_pop: reg(RegOp::Pop, vec![R6.into()]) => 0x0A60,
        reg_sts: reg(RegOp::Sts, vec![R1.into(), R0.into()]) => 0x0B10,
        reg_ret: reg(RegOp::Ret, vec![]) => 0x0C00,
        reg_mvi: reg(RegOp::Mvi, vec![R3.into(), 200u16.into()]) => 0x13C8,
        reg_jmp: reg(RegOp::Jmp, vec![0x123u16.into()]) => 0x2123,
        reg_jz: reg(RegOp::Jz, vec![0x45u16.into(), R2.into()]) => 0x4452,
        reg_jnz: reg(RegOp::Jnz, vec![0xABu16.into(), R7.into()]) => 0x6AB7,
        reg_halt: reg(RegOp::Halt, vec![]) => 0xFFFF,

        stack_ld: stack(StackOp::Ld, vec![7u16.into()]) => 0x007,
        stack_add: stack(StackOp::Add, vec![]) => 0x100,
        stack_sub: stack(StackOp::Sub, vec![]) => 0x200,
        stack_mul: stack(StackOp::Mul, vec![]) => 0x300,
        stack_lt: stack(StackOp::Lt, vec![]) => 0x400,
        stack_gt: stack(StackOp::Gt, vec![]) => 0x500,
        stack_eq: stack(StackOp::Eq, vec![]) => 0x600,
        stack_load: stack(StackOp::Load, vec![0x10u16.into()]) => 0x710,
        stack_store: stack(StackOp::Store, vec![0xFFu16.into()]) => 0x8FF,
        stack_drop: stack(StackOp::Drop, vec![]) => 0x900,
        stack_jmp: stack(StackOp::Jmp, vec![3u16.into()]) => 0xA03,
        stack_jz: stack(StackOp::Jz, vec![0x20u16.into()]) => 0xB20,
        stack_call: stack(StackOp::Call, vec![5u16.into()]) => 0xC05,
        stack_ret: stack(StackOp::Ret, vec![]) => 0xD00,
        stack_halt: stack(StackOp::Halt, vec![]) => 0xFFF,
    }

    #[test]
    fn immediate_range() {
        let ok = reg(RegOp::Mvi, vec![R0.into(), 255u16.into()]);
        assert_eq!(ok.encode(|_, _| 0), Ok(0x10FF));
        let over = stack(StackOp::Ld, vec![256u16.into()]);
        assert_eq!(
            over.encode(|_, _| 0),
            Err(EncodeError::ImmediateOutOfRange(256, 255))
        );
        let neg = stack(StackOp::Ld, vec![Operand::Imm(-1)]);
        assert!(neg.encode(|_, _| 0).is_err());
    }

    #[test]
    fn operand_count() {
        let inst = reg(RegOp::Add, vec![R0.into()]);
        assert_eq!(
            inst.encode(|_, _| 0),
            Err(EncodeError::OperandCount("add".into(), 2, 1))
        );
    }

    #[test]
    fn operand_kind() {
        let inst = reg(RegOp::Mvi, vec![R0.into(), R1.into()]);
        assert!(matches!(
            inst.encode(|_, _| 0),
            Err(EncodeError::InvalidOperand(_, _, ArgKind::Imm))
        ));
        let inst = stack(StackOp::Ld, vec![Operand::Label("x".into())]);
        assert!(inst.encode(|_, _| 0).is_err());
    }

    #[test]
    fn label_resolution() {
        let inst = reg(RegOp::Jz, vec![Operand::Label("end".into()), R1.into()]);
        let mut seen = vec![];
        let word = inst.encode(|name, field| {
            seen.push((name.to_string(), field));
            0x12
        });
        assert_eq!(word, Ok(0x4121));
        assert_eq!(seen, vec![("end".to_string(), MID8)]);

        let far = inst.encode(|_, _| 300);
        assert_eq!(far, Err(EncodeError::AddressOutOfRange(300, 255)));

        let jump = stack(StackOp::Jmp, vec![Operand::Label("end".into())]);
        assert_eq!(jump.encode(|_, _| 0xFF), Ok(0xAFF));
        assert_eq!(
            jump.encode(|_, _| 0x100),
            Err(EncodeError::AddressOutOfRange(0x100, 255))
        );
    }

    #[test]
    fn display() {
        let inst = reg(RegOp::Mvi, vec![R0.into(), 5u16.into()]);
        assert_eq!(inst.to_string(), "mvi r0,5");
        let inst = reg(RegOp::Jnz, vec![Operand::Label("loop".into()), R2.into()]);
        assert_eq!(inst.to_string(), "jnz loop,r2");
        assert_eq!(stack(StackOp::Add, vec![]).to_string(), "add");
    }

    #[test]
    fn decode_rejects() {
        // push with a register in n2 instead of n3
        assert_eq!(Instruction::decode(0x0850, Target::Reg), None);
        // mvi into r8
        assert_eq!(Instruction::decode(0x18FF, Target::Reg), None);
        assert_eq!(Instruction::decode(0xE00, Target::Stack), None);
        // stack words never use the top nibble
        assert_eq!(Instruction::decode(0x1100, Target::Stack), None);
        assert_eq!(Instruction::decode(0xFFFF, Target::Stack), None);
    }
}
