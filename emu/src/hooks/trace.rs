use arch::Instruction;
use color_print::ceprintln;

use super::Hook;
use crate::model::State;

/// Prints every executed instruction with the stack pointer and top.
pub struct Trace;

impl Hook for Trace {
    fn init(&mut self, state: &State) {
        ceprintln!("<s>[TRACE]</> target={}", state.target());
    }

    fn exec(&mut self, time: u64, addr: u16, inst: &Instruction, state: &State) {
        let top = match state.top() {
            Some(top) => format!("{}", top as i16),
            None => "-".to_string(),
        };
        ceprintln!(
            "<k>{:>8}</> <u>{:04X}</> {:<24} SP=<c>{:04X}</> TOP=<c>{}</>",
            time,
            addr,
            inst.cformat(),
            state.sp(),
            top
        );
    }
}
