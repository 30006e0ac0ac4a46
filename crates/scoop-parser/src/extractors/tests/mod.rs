use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::*;
pub(super) use crate::parser::SourceCache;
pub(super) use crate::types::{ComponentSchema, ControlKind, PropertyRecord, TypeKind};

mod fixture;
mod registries;

const INPUT: &str = "src/components/Taco.tsx";

fn parse_and_extract(source: &str) -> FileExtraction {
    extract_source(Path::new(INPUT), source, &ExtractOptions::default())
        .expect("extraction should succeed")
}

fn extract_with_files(files: &[(&str, &str)]) -> FileExtraction {
    let files: HashMap<PathBuf, String> = files
        .iter()
        .map(|(path, source)| (PathBuf::from(path), (*source).to_string()))
        .collect();
    let mut cache = SourceCache::new(files);
    extract_file(Path::new(INPUT), &ExtractOptions::default(), &mut cache)
        .expect("extraction should succeed")
}

fn find_by_name<'a>(extraction: &'a FileExtraction, name: &str) -> &'a ComponentSchema {
    extraction
        .component(name)
        .unwrap_or_else(|| panic!("should find component named '{name}'"))
}

fn prop<'a>(schema: &'a ComponentSchema, name: &str) -> &'a PropertyRecord {
    schema
        .properties
        .get(name)
        .unwrap_or_else(|| panic!("{} should have prop '{name}'", schema.name))
}

fn options(record: &PropertyRecord) -> Vec<&str> {
    record
        .control
        .as_ref()
        .map(|c| c.options.iter().map(String::as_str).collect())
        .unwrap_or_default()
}
