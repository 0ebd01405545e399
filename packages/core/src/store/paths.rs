//! Vault-relative path helpers
//!
//! Document ids are `/`-separated paths relative to the vault root, e.g. `notes/Idea.md`.

/// Extension of markdown notes
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Name used in wiki links for a document: the last path segment without a `.md` extension.
///
/// Non-markdown files keep their extension, matching how wiki links address attachments.
///
/// # Examples
///
/// ```
/// use canvas_atomizer_core::store::document_basename;
///
/// assert_eq!(document_basename("notes/My Note.md"), "My Note");
/// assert_eq!(document_basename("assets/diagram.png"), "diagram.png");
/// ```
pub fn document_basename(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    if is_markdown(file_name) {
        // The extension is ASCII, so its byte length is a valid split point
        &file_name[..file_name.len() - MARKDOWN_EXTENSION.len()]
    } else {
        file_name
    }
}

/// Folder part of a path, `""` for documents at the vault root
pub fn parent_folder(path: &str) -> &str {
    path.rfind('/').map_or("", |index| &path[..index])
}

/// Join a folder and a file name, treating `""` and `"/"` as the vault root
pub fn join_path(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}

/// Whether a document is a markdown note that can carry backlinks
pub fn is_markdown(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(MARKDOWN_EXTENSION)
}
