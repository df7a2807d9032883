use crate::error::Error;
use arch::Field;
use indexmap::IndexMap;

/// A word whose address field waits for a label to be defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixup {
    pub at: u16,
    pub label: String,
    pub field: Field,
    pub line: usize,
}

/// Label table of one assembly run, plus the references still waiting on it.
#[derive(Debug, Default)]
pub struct Labels {
    // name -> (line_idx, address)
    labels: IndexMap<String, (usize, u16)>,
    fixups: Vec<Fixup>,
}

impl Labels {
    pub fn new() -> Self {
        Labels::default()
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).map(|(_, addr)| *addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.labels
            .iter()
            .map(|(name, (_, addr))| (name.as_str(), *addr))
    }

    /// Bind `name` to `addr` and hand back the fixups it resolves.
    pub fn define(&mut self, name: &str, line: usize, addr: u16) -> Result<Vec<Fixup>, Error> {
        if let Some((first, _)) = self.labels.get(name) {
            return Err(Error::DuplicateLabel(name.to_string(), first + 1));
        }
        self.labels.insert(name.to_string(), (line, addr));

        let (resolved, pending) = std::mem::take(&mut self.fixups)
            .into_iter()
            .partition(|fixup| fixup.label == name);
        self.fixups = pending;
        Ok(resolved)
    }

    /// Address of `name` if known. Otherwise record a fixup for the word at
    /// `at` and return the placeholder 0.
    pub fn reference(&mut self, name: &str, at: u16, field: Field, line: usize) -> u16 {
        if let Some(addr) = self.get(name) {
            return addr;
        }
        self.fixups.push(Fixup {
            at,
            label: name.to_string(),
            field,
            line,
        });
        0
    }

    /// References to labels that were never defined.
    pub fn pending(&self) -> &[Fixup] {
        &self.fixups
    }
}
