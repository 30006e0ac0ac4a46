//! ast-grep wrapper, module path resolution and the per-invocation parse cache.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

use crate::error::ParserError;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// A node of an [`AstTree`].
pub type SourceNode<'r> = Node<'r, StrDoc<SupportLang>>;

/// Detect the source language from a file path extension.
///
/// Only TypeScript flavours are extracted; returns `None` for anything else.
#[must_use]
pub fn detect_language(file_path: &Path) -> Option<SupportLang> {
    match file_path.extension()?.to_str()? {
        "ts" | "mts" | "cts" => Some(SupportLang::TypeScript),
        "tsx" => Some(SupportLang::Tsx),
        _ => None,
    }
}

/// Parse source code into an ast-grep tree for the given language.
#[must_use]
pub fn parse_source(source: &str, lang: SupportLang) -> AstTree {
    use ast_grep_language::LanguageExt;
    lang.ast_grep(source)
}

/// A parsed file together with the path it was loaded from.
pub struct ParsedSource {
    path: PathBuf,
    tree: AstTree,
}

impl ParsedSource {
    /// Parse `source` as if it had been read from `path`.
    #[must_use]
    pub fn new(path: PathBuf, source: &str, lang: SupportLang) -> Self {
        Self {
            path,
            tree: parse_source(source, lang),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without its extension, used for `./<stem>` import paths.
    #[must_use]
    pub fn stem(&self) -> String {
        file_stem(&self.path)
    }

    #[must_use]
    pub fn root(&self) -> SourceNode<'_> {
        self.tree.root()
    }
}

/// File name without its final extension (`src/Button.tsx` -> `Button`).
#[must_use]
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

// ── File system seam ───────────────────────────────────────────────

/// Read access to source files.
pub trait SourceProvider {
    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    /// Returns the underlying IO error when the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads sources from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProvider;

impl SourceProvider for FsProvider {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory sources keyed by normalized path.
impl SourceProvider for HashMap<PathBuf, String> {
    fn exists(&self, path: &Path) -> bool {
        self.contains_key(&normalize_path(path))
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.get(&normalize_path(path)).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

// ── Path resolution ────────────────────────────────────────────────

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding normal segment. Does not touch the file system.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve an import specifier relative to the importing file.
///
/// Bare package specifiers (`react`, `@ladle/react`) are never resolved.
#[must_use]
pub fn resolve_module_path(importer: &Path, specifier: &str) -> Option<PathBuf> {
    let is_relative = specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../");
    if !is_relative {
        return None;
    }
    let base_dir = importer.parent().unwrap_or_else(|| Path::new(""));
    Some(normalize_path(&base_dir.join(specifier)))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Probe for the file a module path refers to: the path as given when it
/// already carries a TypeScript extension, then `<path>.tsx`, then `<path>.ts`.
pub fn probe_source_path<P: SourceProvider>(provider: &P, path: &Path) -> Option<PathBuf> {
    if detect_language(path).is_some() && provider.exists(path) {
        return Some(path.to_path_buf());
    }
    [".tsx", ".ts"]
        .iter()
        .map(|suffix| with_suffix(path, suffix))
        .find(|candidate| provider.exists(candidate))
}

// ── Parse cache ────────────────────────────────────────────────────

/// Memoizes parsed files for the lifetime of one invocation.
///
/// Keyed by the resolved, normalized path. Entries are never invalidated:
/// the file system is treated as an immutable snapshot.
pub struct SourceCache<P = FsProvider> {
    provider: P,
    parsed: HashMap<PathBuf, Rc<ParsedSource>>,
    missing: HashSet<PathBuf>,
}

impl Default for SourceCache<FsProvider> {
    fn default() -> Self {
        Self::new(FsProvider)
    }
}

impl<P: SourceProvider> SourceCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parsed: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Number of files parsed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }

    /// Load a module path with extension probing. Returns `None` when no
    /// matching file exists or it cannot be read.
    pub fn load(&mut self, path: &Path) -> Option<Rc<ParsedSource>> {
        let requested = normalize_path(path);
        if self.missing.contains(&requested) {
            return None;
        }
        let Some(resolved) = probe_source_path(&self.provider, &requested) else {
            tracing::debug!(path = %requested.display(), "module not found");
            self.missing.insert(requested);
            return None;
        };
        match self.load_resolved(&resolved) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::debug!(path = %resolved.display(), %error, "module unreadable");
                self.missing.insert(requested);
                None
            }
        }
    }

    /// Load the file under extraction. Unlike [`load`](Self::load) this
    /// reports why the file could not be loaded.
    ///
    /// # Errors
    /// Returns `ParserError` when the extension is not TypeScript, the file
    /// does not exist, or it cannot be read.
    pub fn load_required(&mut self, path: &Path) -> Result<Rc<ParsedSource>, ParserError> {
        let path = normalize_path(path);
        if detect_language(&path).is_none() {
            return Err(ParserError::UnsupportedLanguage(path.display().to_string()));
        }
        if !self.provider.exists(&path) {
            return Err(ParserError::SourceNotFound(path));
        }
        self.load_resolved(&path)
    }

    fn load_resolved(&mut self, resolved: &Path) -> Result<Rc<ParsedSource>, ParserError> {
        if let Some(parsed) = self.parsed.get(resolved) {
            return Ok(Rc::clone(parsed));
        }
        let lang = detect_language(resolved)
            .ok_or_else(|| ParserError::UnsupportedLanguage(resolved.display().to_string()))?;
        let source = self.provider.read_to_string(resolved)?;
        tracing::debug!(path = %resolved.display(), "parsed source file");
        let parsed = Rc::new(ParsedSource::new(resolved.to_path_buf(), &source, lang));
        self.parsed
            .insert(resolved.to_path_buf(), Rc::clone(&parsed));
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn memory(files: &[(&str, &str)]) -> HashMap<PathBuf, String> {
        files
            .iter()
            .map(|(path, source)| (PathBuf::from(path), (*source).to_string()))
            .collect()
    }

    #[rstest]
    #[case("src/Button.tsx", Some(SupportLang::Tsx))]
    #[case("src/types.ts", Some(SupportLang::TypeScript))]
    #[case("lib/esm.mts", Some(SupportLang::TypeScript))]
    #[case("index.js", None)]
    #[case("README", None)]
    fn detect_typescript_variants(#[case] path: &str, #[case] expected: Option<SupportLang>) {
        assert_eq!(detect_language(Path::new(path)), expected);
    }

    #[test]
    fn parse_source_produces_program() {
        let tree = parse_source("export enum A { B }", SupportLang::TypeScript);
        assert_eq!(tree.root().kind().as_ref(), "program");
    }

    #[rstest]
    #[case("src/./components/../types", "src/types")]
    #[case("./a/b", "a/b")]
    #[case("../shared/x", "../shared/x")]
    #[case("a/..", ".")]
    fn normalize_folds_dots(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn resolve_relative_specifiers_only() {
        let importer = Path::new("src/components/ExampleInput.tsx");
        assert_eq!(
            resolve_module_path(importer, "../types"),
            Some(PathBuf::from("src/types"))
        );
        assert_eq!(
            resolve_module_path(importer, "./Choices"),
            Some(PathBuf::from("src/components/Choices"))
        );
        assert_eq!(resolve_module_path(importer, "react"), None);
        assert_eq!(resolve_module_path(importer, "@ladle/react"), None);
    }

    #[test]
    fn probing_prefers_tsx_over_ts() {
        let files = memory(&[("src/types.ts", ""), ("src/types.tsx", "")]);
        assert_eq!(
            probe_source_path(&files, Path::new("src/types")),
            Some(PathBuf::from("src/types.tsx"))
        );
    }

    #[test]
    fn probing_uses_explicit_extension_first() {
        let files = memory(&[("src/types.ts", "")]);
        assert_eq!(
            probe_source_path(&files, Path::new("src/types.ts")),
            Some(PathBuf::from("src/types.ts"))
        );
        assert_eq!(probe_source_path(&files, Path::new("src/other")), None);
    }

    #[test]
    fn cache_parses_each_file_once() {
        let mut cache = SourceCache::new(memory(&[("src/types.ts", "export enum A { B }")]));
        let first = cache.load(Path::new("src/types")).expect("module exists");
        let second = cache.load(Path::new("src/./types.ts")).expect("module exists");
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(first.stem(), "types");
    }

    #[test]
    fn cache_reports_missing_modules_as_none() {
        let mut cache = SourceCache::new(memory(&[]));
        assert!(cache.load(Path::new("src/nowhere")).is_none());
        assert!(cache.load(Path::new("src/nowhere")).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn load_required_rejects_other_languages() {
        let mut cache = SourceCache::new(memory(&[("main.js", "")]));
        let err = cache.load_required(Path::new("main.js")).err();
        assert!(matches!(err, Some(ParserError::UnsupportedLanguage(_))));
    }

    #[test]
    fn load_required_reports_missing_file() {
        let mut cache = SourceCache::new(memory(&[]));
        let err = cache.load_required(Path::new("src/Missing.tsx")).err();
        assert!(matches!(err, Some(ParserError::SourceNotFound(_))));
    }

    #[test]
    fn fs_provider_reads_real_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Taco.tsx");
        std::fs::write(&path, "export type TacoProps = {}").expect("write fixture");

        let mut cache = SourceCache::default();
        let parsed = cache.load_required(&path).expect("fixture loads");
        assert_eq!(parsed.stem(), "Taco");
        assert_eq!(parsed.root().kind().as_ref(), "program");
    }
}
