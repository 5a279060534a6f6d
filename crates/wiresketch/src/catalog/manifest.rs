//! The list of component types a catalogue registers.

use serde::Deserialize;

/// Registers the definition found at `file` under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    key: String,
    file: String,
}

impl ManifestEntry {
    pub fn new(key: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            file: file.into(),
        }
    }

    /// The type key used in descriptions.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The definition locator, relative to the catalogue source.
    pub fn file(&self) -> &str {
        &self.file
    }
}

/// An ordered list of manifest entries.
///
/// Several keys may point at the same definition file; the definition is
/// decoded once and shared between them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// The built-in component list.
    pub fn builtin() -> Self {
        const BUILTIN: &[(&str, &str)] = &[
            ("raspberrypi", "raspberry-pi-3.json"),
            ("raspberry-pi-3", "raspberry-pi-3.json"),
            ("rpi", "raspberry-pi-3.json"),
            ("breadboard", "breadboard.json"),
            ("bb", "breadboard.json"),
            ("dht11", "dht11.json"),
            ("led", "led.json"),
            ("resistor", "resistor.json"),
        ];

        Self::new(
            BUILTIN
                .iter()
                .map(|(key, file)| ManifestEntry::new(*key, *file))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::builtin()
    }
}
