use arch::{Instruction, Op, Reg, RegOp, StackOp, Target};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;
use crate::hooks::Hook;

const RAM_WORDS: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct State {
    target: Target,
    rom: Vec<u16>,
    ram: Vec<u16>,
    regs: [u16; Reg::COUNT],
    pc: u16,
    sp: u16,
    depth: usize,
    halted: bool,
}

impl State {
    pub fn new(target: Target, program: &[u16]) -> Self {
        // running off the end of the program stops on the halt sentinel
        let mut rom = program.to_vec();
        rom.push(target.halt());
        State {
            target,
            rom,
            ram: vec![0; RAM_WORDS],
            regs: [0; Reg::COUNT],
            pc: 0,
            sp: 0,
            depth: 0,
            halted: false,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u16 {
        self.sp
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn reg(&self, reg: Reg) -> u16 {
        self.regs[reg.index()]
    }

    pub fn get(&self, addr: u16) -> u16 {
        self.ram[addr as usize]
    }

    pub fn top(&self) -> Option<u16> {
        (self.depth > 0).then(|| self.get(self.sp))
    }

    /// Stack contents, top first.
    pub fn stack(&self) -> Vec<u16> {
        (0..self.depth)
            .map(|i| self.get(self.sp.wrapping_add(i as u16)))
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            target: self.target,
            pc: self.pc,
            sp: self.sp,
            top: self.top().unwrap_or(0) as i16,
            depth: self.depth,
            regs: (0..Reg::COUNT as u8)
                .filter_map(|i| Reg::try_from(i).ok())
                .map(|reg| (reg, self.reg(reg)))
                .collect(),
        }
    }

    fn push(&mut self, value: u16) -> Result<(), Error> {
        if self.depth == RAM_WORDS {
            return Err(Error::StackOverflow(self.pc));
        }
        self.sp = self.sp.wrapping_sub(1);
        self.ram[self.sp as usize] = value;
        self.depth += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<u16, Error> {
        if self.depth == 0 {
            return Err(Error::StackUnderflow(self.pc));
        }
        let value = self.get(self.sp);
        self.sp = self.sp.wrapping_add(1);
        self.depth -= 1;
        Ok(value)
    }

    fn binary(&mut self, f: impl Fn(u16, u16) -> u16) -> Result<(), Error> {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        self.push(f(lhs, rhs))
    }

    /// Execute the instruction at `pc` and return it decoded.
    pub fn step(&mut self) -> Result<Instruction, Error> {
        let pc = self.pc;
        let word = *self.rom.get(pc as usize).ok_or(Error::PcOutOfRange(pc))?;
        let inst = Instruction::decode(word, self.target).ok_or(Error::InvalidWord(pc, word))?;

        let mut fields = [0u16; 2];
        for (value, arg) in fields.iter_mut().zip(inst.op.format().args) {
            *value = arg.field.extract(word);
        }
        trace!("{:04X}: {} {}", pc, self.target.hex(word), inst);

        self.pc = match inst.op {
            Op::Reg(op) => self.exec_reg(op, fields)?,
            Op::Stack(op) => self.exec_stack(op, fields[0])?,
        };
        Ok(inst)
    }

    // Register fields were range checked by `Instruction::decode`.
    fn exec_reg(&mut self, op: RegOp, [a, b]: [u16; 2]) -> Result<u16, Error> {
        use RegOp::*;
        let next = self.pc.wrapping_add(1);
        let (d, s) = (a as usize, b as usize);
        match op {
            Mov => self.regs[d] = self.regs[s],
            Add => self.regs[d] = self.regs[d].wrapping_add(self.regs[s]),
            Sub => self.regs[d] = self.regs[d].wrapping_sub(self.regs[s]),
            Mul => self.regs[d] = self.regs[d].wrapping_mul(self.regs[s]),
            Lt => self.regs[d] = ((self.regs[d] as i16) < (self.regs[s] as i16)) as u16,
            Push => self.push(self.regs[d])?,
            Pop => self.regs[d] = self.pop()?,
            Lds => self.regs[d] = self.get(self.regs[s]),
            Sts => self.ram[self.regs[d] as usize] = self.regs[s],
            Mvi => self.regs[d] = b,
            Call => {
                self.push(next)?;
                return Ok(a);
            }
            Ret => return self.pop(),
            Jmp => return Ok(a),
            Jz if self.regs[b as usize] == 0 => return Ok(a),
            Jnz if self.regs[b as usize] != 0 => return Ok(a),
            Jz | Jnz => {}
            Halt => {
                self.halted = true;
                return Ok(self.pc);
            }
        }
        Ok(next)
    }

    fn exec_stack(&mut self, op: StackOp, a: u16) -> Result<u16, Error> {
        use StackOp::*;
        let next = self.pc.wrapping_add(1);
        match op {
            Ld => self.push(a)?,
            Add => self.binary(u16::wrapping_add)?,
            Sub => self.binary(u16::wrapping_sub)?,
            Mul => self.binary(u16::wrapping_mul)?,
            Lt => self.binary(|x, y| ((x as i16) < (y as i16)) as u16)?,
            Gt => self.binary(|x, y| ((x as i16) > (y as i16)) as u16)?,
            Eq => self.binary(|x, y| (x == y) as u16)?,
            Load => self.push(self.get(a))?,
            Store => {
                let value = self.top().ok_or(Error::StackUnderflow(self.pc))?;
                self.ram[a as usize] = value;
            }
            Drop => {
                self.pop()?;
            }
            Jmp => return Ok(a),
            Jz => {
                if self.pop()? == 0 {
                    return Ok(a);
                }
            }
            Call => {
                self.push(next)?;
                return Ok(a);
            }
            Ret => return self.pop(),
            Halt => {
                self.halted = true;
                return Ok(self.pc);
            }
        }
        Ok(next)
    }

    /// Run until `halt` or `tmax` steps, returning the number of steps taken.
    pub fn run(&mut self, tmax: u64, hooks: &mut [Box<dyn Hook>]) -> Result<u64, Error> {
        for hook in hooks.iter_mut() {
            hook.init(self);
        }
        for time in 0..tmax {
            let addr = self.pc;
            let inst = self.step()?;
            for hook in hooks.iter_mut() {
                hook.exec(time, addr, &inst, self);
            }
            if self.halted {
                debug!("halted at 0x{:04X} after {} steps", addr, time + 1);
                return Ok(time + 1);
            }
        }
        Err(Error::Timeout(tmax))
    }
}

/// Observable machine state after a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub target: Target,
    pub pc: u16,
    pub sp: u16,
    /// Top of stack as a signed word, 0 when the stack is empty.
    pub top: i16,
    pub depth: usize,
    pub regs: BTreeMap<Reg, u16>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC: 0x{:04X}, TOP: {}, SP: 0x{:04X}", self.pc, self.top, self.sp)
    }
}

/// Parse one hex word per line. Blank lines are skipped.
pub fn parse_words(text: &str) -> Result<Vec<u16>, Error> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| {
            u16::from_str_radix(line, 16).map_err(|_| Error::InvalidHex(n, line.to_string()))
        })
        .collect()
}
