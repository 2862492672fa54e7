use std::{collections::HashMap, fmt};

use crate::{dashed, value::Value, Error, Result};

/// Everything about a registered flag except its value.
#[derive(Debug, Clone)]
pub(crate) struct FlagSpec {
    /// Primary name first, then aliases.
    pub(crate) names: Vec<String>,
    pub(crate) usage: String,
    pub(crate) env_vars: Vec<String>,
    pub(crate) from_env: Option<String>,
    pub(crate) required: bool,
    pub(crate) hidden: bool,
    pub(crate) default_text: String,
}

impl FlagSpec {
    pub(crate) fn name(&self) -> &str {
        &self.names[0]
    }
}

#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) spec: FlagSpec,
    pub(crate) value: Box<dyn Value>,
}

/// The flags declared on one command, keyed by name and alias.
pub struct FlagSet {
    name: String,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> FlagSet {
        FlagSet { name: name.into(), entries: Vec::new(), index: HashMap::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn register(&mut self, spec: FlagSpec, value: Box<dyn Value>) -> Result<()> {
        if let Some(name) = spec.names.iter().find(|it| self.index.contains_key(it.as_str())) {
            return Err(Error::Redefined { flag: dashed(name) });
        }
        let idx = self.entries.len();
        for name in &spec.names {
            self.index.insert(name.clone(), idx);
        }
        self.entries.push(Entry { spec, value });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the value object registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&dyn Value> {
        self.entry(name).map(|it| &*it.value)
    }

    /// Returns the value object registered under `name` if it is a `V`.
    pub fn lookup_as<V: Value>(&self, name: &str) -> Option<&V> {
        self.lookup(name)?.as_any().downcast_ref::<V>()
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.lookup(name).map_or(false, |it| it.is_set())
    }

    /// Feeds one occurrence of the flag to its value object.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        let flag = dashed(name);
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => return Err(Error::UnknownFlag { flag }),
        };
        self.entries[idx].value.set(raw).map_err(|source| Error::InvalidValue { flag, source })
    }

    pub(crate) fn check_required(&self) -> Result<()> {
        match self.entries.iter().find(|it| it.spec.required && !it.value.is_set()) {
            Some(it) => Err(Error::Required { flag: dashed(it.spec.name()) }),
            None => Ok(()),
        }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            map.entry(&entry.spec.name(), &entry.value);
        }
        map.finish()
    }
}
