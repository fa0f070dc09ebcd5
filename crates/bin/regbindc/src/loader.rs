//! Library description loading — one YAML file in, one resolved [`Library`] out.

use std::path::Path;

use regbind_domain::error::RegbindError;
use regbind_domain::library::Library;
use regbind_domain::schema::LibraryDoc;

/// Errors raised while loading a library description.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The description file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML or does not match the library grammar.
    #[error("{0}")]
    Parse(#[from] serde_yaml::Error),

    /// The description parsed but failed validation or resolution.
    #[error(transparent)]
    Resolve(#[from] RegbindError),
}

/// Read and resolve the library description at `path`.
///
/// # Errors
///
/// Returns a [`LoadError`] for unreadable files, malformed YAML, or any
/// validation/resolution failure.
pub fn load_library(path: &Path) -> Result<Library, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_library(&content)
}

/// Parse and resolve a library description from YAML text.
///
/// # Errors
///
/// See [`load_library`].
pub fn parse_library(content: &str) -> Result<Library, LoadError> {
    let doc: LibraryDoc = serde_yaml::from_str(content)?;
    Ok(Library::from_doc(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_and_resolve_a_valid_description() {
        let yaml = "
library:
  name: Test
  description: test
  slug: test
  generators: []
  devices:
    - slug: dev1
      definition:
        name: Dev
        description: d
        registers:
          - name: R0
            address: 0
            size: 1
            description: r
            fields:
              - name: F0
                bit_offset: 0
                bit_length: 1
                access: r
                binding:
                  domain: root
                  dimension: temp
                  entity: _
";
        let library = parse_library(yaml).unwrap();
        assert!(library.device("dev1").is_some());
        assert!(library.domain("root").is_some());
    }

    #[test]
    fn should_fail_when_library_key_is_missing() {
        let err = parse_library("device:\n  name: X\n  description: y\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn should_propagate_resolution_errors() {
        let yaml = "
library:
  name: Test
  description: test
  slug: test
  generators: []
  devices:
    - slug: dev1
      definition:
        name: Dev
        description: d
    - slug: dev1
      definition:
        name: Dev
        description: d
";
        let err = parse_library(yaml).unwrap_err();
        assert!(matches!(err, LoadError::Resolve(_)));
    }

    #[test]
    fn should_report_missing_file() {
        let err = load_library(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
