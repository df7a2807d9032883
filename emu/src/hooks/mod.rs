pub mod dump;
pub mod trace;

use arch::Instruction;

use crate::model::State;

/// Side effects observed around the main loop.
pub trait Hook {
    fn init(&mut self, state: &State);
    fn exec(&mut self, time: u64, addr: u16, inst: &Instruction, state: &State);
}
