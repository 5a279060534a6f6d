//! Where catalogue definitions and assets are read from.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::trace;

use super::CatalogError;

/// A synchronous store of definition files and artwork assets, addressed by
/// relative locators such as `led.json` or `assets/raspberry-pi-3.svg`.
pub trait CatalogSource: fmt::Debug + Send + Sync {
    /// Reads the text stored at `locator`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when nothing is stored there, or
    /// [`CatalogError::Io`] when reading fails.
    fn read(&self, locator: &str) -> Result<String, CatalogError>;

    /// Artwork compiled in for the definition `id`, used instead of fetching
    /// the definition's image.
    fn inline_artwork(&self, _id: &str) -> Option<&'static str> {
        None
    }
}

/// The definitions and assets compiled into the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

impl BundledSource {
    const FILES: &'static [(&'static str, &'static str)] = &[
        ("raspberry-pi-3.json", include_str!("../../components/raspberry-pi-3.json")),
        ("breadboard.json", include_str!("../../components/breadboard.json")),
        ("dht11.json", include_str!("../../components/dht11.json")),
        ("led.json", include_str!("../../components/led.json")),
        ("resistor.json", include_str!("../../components/resistor.json")),
        (
            "assets/raspberry-pi-3.svg",
            include_str!("../../components/assets/raspberry-pi-3.svg"),
        ),
    ];
}

impl CatalogSource for BundledSource {
    fn read(&self, locator: &str) -> Result<String, CatalogError> {
        Self::FILES
            .iter()
            .find(|(name, _)| *name == locator)
            .map(|(_, contents)| contents.to_string())
            .ok_or_else(|| CatalogError::NotFound(locator.to_string()))
    }

    fn inline_artwork(&self, id: &str) -> Option<&'static str> {
        super::artwork::inline_artwork(id)
    }
}

/// Reads `<root>/<locator>` from the file system.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CatalogSource for DirectorySource {
    fn read(&self, locator: &str) -> Result<String, CatalogError> {
        let path = self.root.join(locator);
        trace!(path:? = path; "Reading catalogue file");

        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound(locator.to_string())
            } else {
                CatalogError::Io {
                    locator: locator.to_string(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_source() {
        let source = BundledSource;
        assert!(source.read("led.json").unwrap().contains("\"ANODE\""));
        assert!(source.read("assets/raspberry-pi-3.svg").unwrap().contains("<svg"));
        assert!(matches!(source.read("relay.json"), Err(CatalogError::NotFound(_))));
        assert!(source.inline_artwork("led").is_some());
        assert!(source.inline_artwork("raspberry-pi-3").is_none());
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("relay.json"), "{}").unwrap();

        let source = DirectorySource::new(dir.path());
        assert_eq!(source.read("relay.json").unwrap(), "{}");
        assert!(matches!(source.read("missing.json"), Err(CatalogError::NotFound(_))));
        assert!(source.inline_artwork("led").is_none());
    }
}
