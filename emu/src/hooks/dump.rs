use arch::{Instruction, Reg, Target};
use color_print::ceprintln;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use super::Hook;
use crate::error::Error;
use crate::model::State;

/// Prints machine state after instructions at configured addresses.
///
/// The config file is YAML mapping an address to what to show:
///
/// ```yaml
/// 3: { stack: true, ram: [0, 1] }
/// ```
#[derive(Debug, Default)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<u16, Config>);

#[derive(Debug, Default, Serialize, Deserialize)]
struct Config {
    #[serde(default)]
    stack: bool,
    #[serde(default)]
    ram: Vec<u16>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        let list = match &file {
            Some(fname) => serde_yaml::from_reader(BufReader::new(File::open(fname)?))?,
            None => List::default(),
        };
        Ok(Dump { file, all, list })
    }

    fn print_regs(&self, state: &State) {
        if state.target() != Target::Reg {
            return;
        }
        let regs = (0..Reg::COUNT as u8)
            .filter_map(|i| Reg::try_from(i).ok())
            .map(|reg| format!("{}: {:04X}", reg, state.reg(reg)))
            .collect::<Vec<_>>()
            .join(" | ");
        ceprintln!(" | {} |", regs);
    }

    fn print_stack(&self, state: &State) {
        for (i, value) in state.stack().iter().enumerate() {
            let addr = state.sp().wrapping_add(i as u16);
            ceprintln!(" | <c>{:04X}</> : {:04X}", addr, value);
        }
        ceprintln!(" +----------------");
    }

    fn print_ram(&self, state: &State, addrs: &[u16]) {
        for &addr in addrs {
            ceprintln!(" | <y>{:04X}</> : {:04X}", addr, state.get(addr));
        }
    }
}

impl Hook for Dump {
    fn init(&mut self, _state: &State) {
        if self.all {
            ceprintln!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            ceprintln!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, _time: u64, addr: u16, _inst: &Instruction, state: &State) {
        if let Some(cfg) = self.list.0.get(&addr) {
            ceprintln!("<s>@{:04X}</> PC={:04X} SP={:04X}", addr, state.pc(), state.sp());
            self.print_regs(state);
            if cfg.stack {
                self.print_stack(state);
            }
            self.print_ram(state, &cfg.ram);
        } else if self.all {
            self.print_regs(state);
        }
    }
}
