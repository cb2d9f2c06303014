//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`Id`] type used for node ids, reference ids, and
//! the document's project id. Ids loaded from a document intern the stored
//! string; freshly created objects mint a UUIDv4 through [`Id::generate`].

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};
use uuid::Uuid;

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning
///
/// Identifiers are stable for the lifetime of a document: a node keeps the id
/// it was created or loaded with, and equality is symbol equality.
///
/// # Examples
///
/// ```
/// use logicmap_core::identifier::Id;
///
/// // Intern an id read from a document
/// let loaded = Id::new("4f2c9a0e-416b-4e11-a0d4-8f6f6f2a81aa");
///
/// // Mint a fresh id for a new node
/// let minted = Id::generate();
/// assert_ne!(loaded, minted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use logicmap_core::identifier::Id;
    ///
    /// let node_id = Id::new("root-question");
    /// ```
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Mints a fresh unique identifier (UUIDv4).
    ///
    /// # Examples
    ///
    /// ```
    /// use logicmap_core::identifier::Id;
    ///
    /// let a = Id::generate();
    /// let b = Id::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        Self::new(&Uuid::new_v4().to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{}", str_value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for Id {
    /// Allows direct comparison with string references: `id == &string`
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
