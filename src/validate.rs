//! Schema checks run before any code is emitted.
//!
//! Single-file checks cover names inside one [`FileSpec`]; [`validate_files`] adds the
//! cross-file checks (struct names are global because generated tests call fixtures of
//! structs declared in other files).

use std::collections::BTreeSet;

use crate::error::SchemaError;
use crate::schema::{FieldKind, FileSpec, StructSpec};

/// Methods every generated wrapper already defines.
const RESERVED_METHODS: &[&str] = &["new", "from_orig", "orig", "move_to", "copy_to", "default", "eq"];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while", "yield",
];

/// Validates one file on its own. Struct references are only checked against the
/// file's own structs plus `known` (names declared elsewhere in the schema set).
pub fn validate_file(file: &FileSpec, known: &BTreeSet<String>) -> Result<(), SchemaError> {
    if file.module.is_empty() {
        return Err(SchemaError::MissingModule(file.name.clone()));
    }
    let mut struct_names = BTreeSet::new();
    for s in &file.structs {
        if !struct_names.insert(s.name.as_str()) {
            return Err(SchemaError::Duplicate {
                location: file.name.clone(),
                name: s.name.clone(),
            });
        }
    }
    let mut types = BTreeSet::new();
    for s in &file.structs {
        check_emitted_types(s, &mut types)?;
    }
    for s in &file.structs {
        validate_struct(s)?;
        for field in &s.fields {
            for target in field.kind.referenced_structs() {
                if !struct_names.contains(target) && !known.contains(target) {
                    return Err(SchemaError::UnknownStruct {
                        location: format!("{}.{}", s.name, field.name),
                        name: target.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn validate_struct(s: &StructSpec) -> Result<(), SchemaError> {
    let mut fields = BTreeSet::new();
    let mut methods = BTreeSet::new();

    for field in &s.fields {
        let location = format!("{}.{}", s.name, field.name);
        if RUST_KEYWORDS.contains(&field.name.as_str()) {
            return Err(SchemaError::Reserved {
                location,
                name: field.name.clone(),
            });
        }
        if !fields.insert(field.name.as_str()) {
            return Err(SchemaError::Duplicate {
                location: s.name.clone(),
                name: field.name.clone(),
            });
        }
        for method in field.strategy().accessor_names(&field.name) {
            if RESERVED_METHODS.contains(&method.as_str()) || RUST_KEYWORDS.contains(&method.as_str()) {
                return Err(SchemaError::Reserved {
                    location: location.clone(),
                    name: method,
                });
            }
            if !methods.insert(method.clone()) {
                return Err(SchemaError::Duplicate {
                    location: location.clone(),
                    name: method,
                });
            }
        }
        if let FieldKind::OneOf(oneof) = &field.kind {
            if oneof.variants.is_empty() {
                return Err(SchemaError::EmptyOneOf { location });
            }
            let mut variants = BTreeSet::new();
            for v in &oneof.variants {
                if !variants.insert(v.name.as_str()) {
                    return Err(SchemaError::Duplicate {
                        location: location.clone(),
                        name: v.name.clone(),
                    });
                }
            }
        }
        if let FieldKind::Primitive(p) = &field.kind {
            for lit in [&p.default, &p.test] {
                if !p.ty.accepts(lit) {
                    return Err(SchemaError::InvalidLiteral {
                        location: location.clone(),
                        ty: p.ty.to_string(),
                        literal: lit.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Records the type items `s` emits (the wrapper, its slice alias and one enum per
/// oneof field) in `seen`, failing on the first name already taken.
fn check_emitted_types(s: &StructSpec, seen: &mut BTreeSet<String>) -> Result<(), SchemaError> {
    let mut emitted = vec![(s.name.clone(), s.name.clone()), (s.name.clone(), s.slice_name())];
    for field in &s.fields {
        if let FieldKind::OneOf(oneof) = &field.kind {
            emitted.push((format!("{}.{}", s.name, field.name), oneof.type_name.clone()));
        }
    }
    for (location, name) in emitted {
        if !seen.insert(name.clone()) {
            return Err(SchemaError::Duplicate { location, name });
        }
    }
    Ok(())
}

/// Validates a whole schema set: every file individually, unique file names, unique
/// type names across files, and every struct reference resolvable somewhere in the set.
pub fn validate_files(files: &[FileSpec]) -> Result<(), SchemaError> {
    let mut file_names = BTreeSet::new();
    let mut known = BTreeSet::new();
    let mut types = BTreeSet::new();
    for file in files {
        if !file_names.insert(file.name.as_str()) {
            return Err(SchemaError::Duplicate {
                location: "schema set".to_string(),
                name: file.name.clone(),
            });
        }
        for s in &file.structs {
            if !known.insert(s.name.clone()) {
                return Err(SchemaError::Duplicate {
                    location: file.name.clone(),
                    name: s.name.clone(),
                });
            }
            check_emitted_types(s, &mut types)?;
        }
    }
    for file in files {
        validate_file(file, &known)?;
    }
    Ok(())
}
