//! Identifier management using string interning.
//!
//! Component ids, component type keys and pin names appear many times in a
//! description and are compared and hashed constantly while compiling. The
//! [`Id`] type stores them once in a process-wide interner and hands out
//! copyable symbols.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// The interner only ever grows; symbols stay valid for the lifetime of the
/// process. Access is serialized through a `Mutex`.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        // The interner holds no invariants a panicking writer could break.
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use wiresketch_core::identifier::Id;
///
/// let led = Id::new("l1");
/// let pin = Id::new("ANODE");
///
/// assert_eq!(led, "l1");
/// assert_eq!(pin.to_string(), "ANODE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice, interning it if needed.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the identifier text.
    pub fn as_string(&self) -> String {
        self.with_str(str::to_owned)
    }

    /// Runs `f` with the identifier text borrowed from the interner.
    ///
    /// The interner lock is held while `f` runs, so `f` must not create or
    /// resolve other identifiers.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let text = interner.resolve(self.0).unwrap_or_default();
        f(text)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.as_string();
        f.write_str(&text)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "l1"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|text| text == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("r1"), Id::new("r1"));
        assert_ne!(Id::new("r1"), Id::new("r2"));
    }

    #[test]
    fn test_display_round_trips_text() {
        let id = Id::new("L+1");
        assert_eq!(id.to_string(), "L+1");
        assert_eq!(id.as_string(), "L+1");
    }

    #[test]
    fn test_compare_with_str() {
        let id: Id = "GPIO17".into();
        assert!(id == "GPIO17");
        assert!(id != "GPIO18");
    }

    #[test]
    fn test_case_is_significant() {
        assert_ne!(Id::new("gnd"), Id::new("GND"));
    }
}
