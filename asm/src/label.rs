use arch::Addr;
use indexmap::IndexMap;
use serde::Serialize;

/// Where a label points, and the line that defined it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub addr: Addr,
    pub line: usize,
}

/// Label table in definition order. A label is bound at most once.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, Binding>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Bind `name`. A second binding is refused and the first one is
    /// returned unchanged.
    pub fn insert(&mut self, name: &str, binding: Binding) -> Result<(), Binding> {
        match self.0.get(name) {
            Some(prev) => Err(*prev),
            None => {
                self.0.insert(name.to_string(), binding);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.0.get(name)
    }

    pub fn addr(&self, name: &str) -> Option<Addr> {
        self.0.get(name).map(|binding| binding.addr)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.0.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
