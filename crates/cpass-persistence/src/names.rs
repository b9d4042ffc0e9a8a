//! Display names handed out at signup.
//!
//! The pool itself is immutable. Which names are taken lives in a
//! [`UsedNames`] value owned by the caller, who decides where to keep it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_NAMES: [&str; 11] = [
    "Peter Mwangi",
    "Sarah Wanjiru",
    "John Kamau",
    "Mary Njeri",
    "David Omondi",
    "Grace Akinyi",
    "James Kipchoge",
    "Lucy Wambui",
    "Michael Otieno",
    "Faith Chebet",
    "Daniel Mutua",
];

/// Names already handed out, in allocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsedNames(Vec<String>);

impl UsedNames {
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|used| used == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePool {
    names: Vec<String>,
}

impl Default for NamePool {
    fn default() -> Self {
        Self::new(DEFAULT_NAMES)
    }
}

impl NamePool {
    /// Pool of distinct `names`; duplicates and blanks are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn available<'a>(&'a self, used: &'a UsedNames) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !used.contains(name))
    }

    /// Pick an unused name uniformly at random and record it in `used`.
    ///
    /// When every name is taken, `used` is cleared first. Returns `None`
    /// only for an empty pool.
    pub fn allocate<R: Rng + ?Sized>(&self, used: &mut UsedNames, rng: &mut R) -> Option<String> {
        if self.names.is_empty() {
            return None;
        }
        let mut available: Vec<&str> = self.available(used).collect();
        if available.is_empty() {
            debug!(pool = self.names.len(), "name pool exhausted, starting over");
            used.clear();
            available = self.names.iter().map(String::as_str).collect();
        }
        let name = available[rng.gen_range(0..available.len())].to_string();
        used.0.push(name.clone());
        Some(name)
    }
}
