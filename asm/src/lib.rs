pub mod error;
pub mod label;
pub mod parser;
pub mod util;

pub use error::{Diag, Error};
pub use label::{Fixup, Labels};
pub use parser::Line;

use arch::{EncodeError, Target};
use log::{debug, trace};

/// One source line after assembly.
#[derive(Debug, Clone)]
pub struct Row {
    /// 0-based line index
    pub line: usize,
    pub text: String,
    pub parsed: Option<Line>,
    /// Address of the next emitted word when this line was read
    pub addr: u16,
}

#[derive(Debug)]
pub struct Output {
    pub target: Target,
    pub words: Vec<u16>,
    pub rows: Vec<Row>,
    pub labels: Labels,
}

/// One-pass assembler. Feed it lines in order, then `finish`.
pub struct Assembler {
    target: Target,
    labels: Labels,
    words: Vec<u16>,
    rows: Vec<Row>,
    diags: Vec<Diag>,
}

impl Assembler {
    pub fn new(target: Target) -> Self {
        Assembler {
            target,
            labels: Labels::new(),
            words: Vec::new(),
            rows: Vec::new(),
            diags: Vec::new(),
        }
    }

    pub fn feed(&mut self, raw: &str) {
        let idx = self.rows.len();
        let addr = u16::try_from(self.words.len()).unwrap_or(u16::MAX);

        let line = match Line::parse(raw, self.target) {
            Ok(line) => line,
            Err(e) => {
                self.report(e, idx, raw);
                self.push_row(idx, raw, None, addr);
                return;
            }
        };

        // Addresses are 16-bit, so a word can only be placed below 0x10000.
        if line.code.is_some() && self.words.len() > u16::MAX as usize {
            self.report(Error::ProgramTooLarge(1 << 16), idx, raw);
            self.push_row(idx, raw, Some(line), addr);
            return;
        }

        for name in &line.labels {
            match self.labels.define(name, idx, addr) {
                Ok(resolved) => {
                    for fixup in resolved {
                        self.patch(fixup, addr);
                    }
                }
                Err(e) => self.report(e, idx, raw),
            }
        }

        if let Some(inst) = &line.code {
            let labels = &mut self.labels;
            let word = inst.encode(|name, field| labels.reference(name, addr, field, idx));
            match word {
                Ok(word) => {
                    trace!("[{:04X}] {} {}", addr, self.target.hex(word), inst);
                    self.words.push(word);
                }
                Err(e) => {
                    self.report(e.into(), idx, raw);
                    self.words.push(0);
                }
            }
        }

        self.push_row(idx, raw, Some(line), addr);
    }

    pub fn finish(mut self) -> Result<Output, Vec<Diag>> {
        for fixup in self.labels.pending().to_vec() {
            let text = self.text_of(fixup.line);
            self.report(Error::UndefinedLabel(fixup.label), fixup.line, &text);
        }
        if !self.diags.is_empty() {
            self.diags.sort_by_key(|diag| diag.line);
            return Err(self.diags);
        }
        debug!(
            "{} words, {} labels",
            self.words.len(),
            self.labels.iter().count()
        );
        Ok(Output {
            target: self.target,
            words: self.words,
            rows: self.rows,
            labels: self.labels,
        })
    }

    fn patch(&mut self, fixup: Fixup, addr: u16) {
        if !fixup.field.fits(addr as i64) {
            let error = EncodeError::AddressOutOfRange(addr as i64, fixup.field.max());
            let text = self.text_of(fixup.line);
            self.report(error.into(), fixup.line, &text);
            return;
        }
        if let Some(word) = self.words.get_mut(fixup.at as usize) {
            *word |= fixup.field.pack(addr);
            debug!("patch [{:04X}] `{}` = {:04X}", fixup.at, fixup.label, addr);
        }
    }

    fn report(&mut self, error: Error, line: usize, text: &str) {
        self.diags.push(Diag {
            error,
            line,
            text: text.to_string(),
        });
    }

    fn push_row(&mut self, line: usize, text: &str, parsed: Option<Line>, addr: u16) {
        self.rows.push(Row {
            line,
            text: text.to_string(),
            parsed,
            addr,
        });
    }

    fn text_of(&self, line: usize) -> String {
        self.rows
            .get(line)
            .map(|row| row.text.clone())
            .unwrap_or_default()
    }
}

/// Assemble a whole source text. Any error means no words at all.
pub fn assemble(code: &str, target: Target) -> Result<Vec<u16>, Vec<Diag>> {
    let mut assembler = Assembler::new(target);
    for line in code.lines() {
        assembler.feed(line);
    }
    assembler.finish().map(|output| output.words)
}
