//! Binary reference inputs used by the conformance scenarios
//!
//! Two payloads are required: an SVG image (a file whose type is
//! determinable) and a blob of unrecognizable binary content (a file whose
//! type is not). The crate ships both under `fixtures/` and embeds them at
//! compile time; [`Fixtures::from_dir`] loads replacements from disk when a
//! backend needs its own reference material.

use crate::error::Result;
use bytes::Bytes;
use std::fs;
use std::path::Path;

/// File name of the SVG fixture
pub const SVG_FILE_NAME: &str = "sample.svg";

/// File name of the unrecognizable-content fixture
pub const UNKNOWN_CONTENT_FILE_NAME: &str = "unknown-content.bin";

/// The binary reference inputs for a suite run
#[derive(Debug, Clone)]
pub struct Fixtures {
    svg: Bytes,
    unknown_content: Bytes,
}

impl Fixtures {
    /// The fixtures embedded in the crate
    pub fn builtin() -> Self {
        Self {
            svg: Bytes::from_static(include_bytes!("../../fixtures/sample.svg")),
            unknown_content: Bytes::from_static(include_bytes!(
                "../../fixtures/unknown-content.bin"
            )),
        }
    }

    /// Load fixtures from a directory containing [`SVG_FILE_NAME`] and
    /// [`UNKNOWN_CONTENT_FILE_NAME`]
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let svg = fs::read(dir.join(SVG_FILE_NAME))?;
        let unknown_content = fs::read(dir.join(UNKNOWN_CONTENT_FILE_NAME))?;
        Ok(Self {
            svg: Bytes::from(svg),
            unknown_content: Bytes::from(unknown_content),
        })
    }

    /// Create fixtures from in-memory payloads
    pub fn from_parts(svg: Bytes, unknown_content: Bytes) -> Self {
        Self {
            svg,
            unknown_content,
        }
    }

    /// The SVG image payload
    pub fn svg(&self) -> &Bytes {
        &self.svg
    }

    /// The unrecognizable binary payload
    pub fn unknown_content(&self) -> &Bytes {
        &self.unknown_content
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::builtin()
    }
}
