//! Known product icons.
//!
//! Icons are PNG files shipped with the frontend. Their file names, with
//! extension, are the values products and categories store in `icon`.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::{info, warn};

/// Sorted set of icon file names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconCatalogue {
    names: BTreeSet<String>,
}

impl IconCatalogue {
    /// Catalogue from explicit names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the PNG file names in `dir`; the extension match ignores case.
    pub fn load(dir: &Path) -> io::Result<Self> {
        let directory = Dir::open_ambient_dir(dir, ambient_authority())?;
        let mut names = BTreeSet::new();
        for entry in directory.entries()? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_png(&name) {
                names.insert(name);
            }
        }
        Ok(Self { names })
    }

    /// Like [`IconCatalogue::load`], but an unreadable directory yields an
    /// empty catalogue.
    pub fn load_or_empty(dir: &Path) -> Self {
        match Self::load(dir) {
            Ok(catalogue) => {
                info!(path = %dir.display(), icons = catalogue.len(), "icon catalogue loaded");
                catalogue
            }
            Err(error) => {
                warn!(
                    path = %dir.display(),
                    %error,
                    "icon directory unreadable; every product icon will be rejected"
                );
                Self::default()
            }
        }
    }

    /// Whether `name` is a known icon.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Icon names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no icon is known.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_png(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
