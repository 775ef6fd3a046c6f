//! Extension-based MIME type detection
//!
//! Detection never guesses: a path with no extension, or an extension outside
//! the table, yields `None`. The contract treats an undetermined type as a
//! non-fatal sentinel, not an error.

use crate::adapter::path;

/// Detect the MIME type of a path from its file extension
pub fn detect(path: &str) -> Option<String> {
    let name = path::file_name(path);
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() {
        // Dotfiles like ".gitignore" have no extension
        return None;
    }

    let mimetype = match extension.to_lowercase().as_str() {
        "txt" => "text/plain",
        "json" => "application/json",
        "xml" => "application/xml",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => return None,
    };

    Some(mimetype.to_string())
}
