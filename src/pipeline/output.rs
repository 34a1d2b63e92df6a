//! Encoding and writing upgraded documents.

use crate::codec::{EncodeError, Encoding, FormatCodec, JsonCodec, XmlCodec};
use crate::error::{MigrateError, OptionContext};
use crate::model::{v1_2, SchemaModel};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Encode a newest-revision document.
///
/// The tree is written as given; documents built by hand should be passed
/// through [`normalize`](crate::normalize::normalize) first so that empty
/// collections are omitted.
pub fn save<C>(bom: &v1_2::Bom, codec: &C) -> Result<String, EncodeError>
where
    C: FormatCodec<v1_2::Bom> + ?Sized,
{
    codec.encode(bom)
}

/// Encode with the standard codec for `encoding`.
pub fn save_as(bom: &v1_2::Bom, encoding: Encoding, pretty: bool) -> Result<String, EncodeError> {
    match encoding {
        Encoding::Json => save(bom, &JsonCodec::<v1_2::Bom>::new().with_pretty(pretty)),
        Encoding::Xml => save(bom, &XmlCodec::<v1_2::Bom>::new().with_pretty(pretty)),
    }
}

/// Encode and write to `path`.
pub fn save_file(
    bom: &v1_2::Bom,
    path: &Path,
    encoding: Encoding,
    pretty: bool,
) -> crate::error::Result<()> {
    let content = save_as(bom, encoding, pretty)?;
    std::fs::write(path, content).map_err(|e| MigrateError::io(path, e))?;
    tracing::info!("Wrote CycloneDX {} {encoding} to {}", v1_2::Bom::VERSION, path.display());
    Ok(())
}

/// Encoding implied by a file extension.
pub fn encoding_for_path(path: &Path) -> crate::error::Result<Encoding> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .context_none(format!("{} has no file extension", path.display()))?;
    match extension.to_ascii_lowercase().as_str() {
        "json" => Ok(Encoding::Json),
        "xml" => Ok(Encoding::Xml),
        other => Err(MigrateError::validation(format!(
            "cannot infer an encoding from .{other}"
        ))),
    }
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;
    use tempfile::TempDir;

    fn sample() -> v1_2::Bom {
        v1_2::Bom {
            version: Some(1),
            components: Some(vec![v1_2::Component::new(ComponentType::Library, "acme")]),
            ..v1_2::Bom::default()
        }
    }

    #[test]
    fn test_save_omits_absent_collections() {
        let json = save_as(&sample(), Encoding::Json, true).unwrap();
        assert!(json.contains("\"specVersion\": \"1.2\""));
        assert!(!json.contains("dependencies"));
        assert!(!json.contains("services"));

        let xml = save_as(&sample(), Encoding::Xml, true).unwrap();
        assert!(xml.contains(v1_2::Bom::VERSION.xml_namespace()));
        assert!(!xml.contains("<dependencies"));
    }

    #[test]
    fn test_save_file_writes_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.xml");
        save_file(&sample(), &path, Encoding::Xml, false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<?xml"));
        assert!(written.contains("<name>acme</name>"));
    }

    #[test]
    fn test_encoding_for_path() {
        assert_eq!(
            encoding_for_path(Path::new("bom.JSON")).unwrap(),
            Encoding::Json
        );
        assert_eq!(encoding_for_path(Path::new("a/b.xml")).unwrap(), Encoding::Xml);
        assert!(encoding_for_path(Path::new("bom")).is_err());
        assert!(encoding_for_path(Path::new("bom.yaml")).is_err());
    }

    #[test]
    fn test_output_target_from_option() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
        let path = PathBuf::from("/tmp/test.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }
}
