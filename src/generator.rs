//! Binding generator: turns validated [`FileSpec`]s into wrapper and test source.
//!
//! Output depends only on the input specs and [`GenerateOptions`]: everything is
//! emitted by walking `Vec`s in declaration order, so two runs over the same schema
//! produce byte-identical files.

use std::collections::BTreeSet;

use crate::error::SchemaError;
use crate::schema::{FileSpec, StructSpec};
use crate::validate::{validate_file, validate_files};
use crate::writer::CodeWriter;

/// Number of elements the slice fixtures hold.
const SLICE_FIXTURE_LEN: usize = 7;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Command named in the header of every generated file.
    pub regenerate_command: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            regenerate_command: "cargo build -p pdata".to_string(),
        }
    }
}

/// Source produced for one [`FileSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub module: String,
    pub wrapper_file_name: String,
    pub test_file_name: String,
    pub wrapper: String,
    pub tests: String,
}

#[derive(Debug, Default)]
pub struct Generator {
    options: GenerateOptions,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Generator { options }
    }

    /// Generates one self-contained file. Every struct it references must be declared
    /// in the same file; use [`Generator::generate_all`] for schema sets that
    /// reference each other.
    pub fn generate(&self, file: &FileSpec) -> Result<GeneratedFile, SchemaError> {
        validate_file(file, &BTreeSet::new())?;
        Ok(self.emit(file))
    }

    /// Validates the whole set first, then generates every file in order. Nothing is
    /// returned if any file is invalid.
    pub fn generate_all(&self, files: &[FileSpec]) -> Result<Vec<GeneratedFile>, SchemaError> {
        validate_files(files)?;
        Ok(files.iter().map(|f| self.emit(f)).collect())
    }

    fn emit(&self, file: &FileSpec) -> GeneratedFile {
        let mut wrapper = CodeWriter::new();
        let mut tests = CodeWriter::new();
        self.emit_header(&mut wrapper);
        self.emit_header(&mut tests);

        for import in &file.imports {
            wrapper.line(format!("use {import};"));
        }
        tests.line("use super::*;");
        for import in &file.test_imports {
            tests.line(format!("use {import};"));
        }

        for s in &file.structs {
            tracing::debug!(file = %file.name, name = %s.name, fields = s.fields.len(), "emitting struct");
            wrapper.blank();
            emit_struct(&mut wrapper, s);
            tests.blank();
            emit_struct_tests(&mut tests, s);
        }

        tracing::info!(
            file = %file.name,
            module = %file.module,
            structs = file.structs.len(),
            "generated bindings"
        );
        GeneratedFile {
            name: file.name.clone(),
            module: file.module.clone(),
            wrapper_file_name: file.wrapper_file_name(),
            test_file_name: file.test_file_name(),
            wrapper: wrapper.finish(),
            tests: tests.finish(),
        }
    }

    fn emit_header(&self, w: &mut CodeWriter) {
        w.line("// Code generated by pdatagen. DO NOT EDIT.");
        w.line(format!(
            "// To regenerate this file run \"{}\".",
            self.options.regenerate_command
        ));
        w.blank();
    }
}

fn emit_struct(w: &mut CodeWriter, s: &StructSpec) {
    let name = &s.name;
    let orig = &s.orig_full_name;

    for field in &s.fields {
        field.strategy().emit_types(w, s, &field.name);
    }

    if s.description.is_empty() {
        w.doc(format!("{name} is a view over a {orig}."));
    } else {
        for line in &s.description {
            w.doc(line);
        }
    }
    w.line("#[derive(Debug)]");
    w.open(format!("pub struct {name}<'a> {{"));
    w.line(format!("orig: Orig<'a, {orig}>,"));
    w.close("}");
    w.blank();

    w.doc(format!("{} is a view over a sequence of {name}.", s.slice_name()));
    w.line(format!("pub type {}<'a> = Slice<'a, {orig}>;", s.slice_name()));
    w.blank();

    w.open(format!("impl {name}<'static> {{"));
    w.doc(format!("Creates a new empty {name} that owns its storage."));
    w.open("pub fn new() -> Self {");
    w.line(format!("{name} {{ orig: Orig::default() }}"));
    w.close("}");
    w.close("}");
    w.blank();

    w.open(format!("impl Default for {name}<'static> {{"));
    w.open("fn default() -> Self {");
    w.line("Self::new()");
    w.close("}");
    w.close("}");
    w.blank();

    w.open(format!("impl<'a> {name}<'a> {{"));
    w.doc(format!("Wraps an existing {orig} without copying it."));
    w.open(format!("pub fn from_orig(orig: &'a mut {orig}) -> Self {{"));
    w.line(format!("{name} {{ orig: Orig::Borrowed(orig) }}"));
    w.close("}");
    w.blank();

    w.doc("Returns the underlying message.");
    w.open(format!("pub fn orig(&self) -> &{orig} {{"));
    w.line("&self.orig");
    w.close("}");
    w.blank();

    w.doc("Moves all properties into `dest` and resets this instance to empty.");
    w.open(format!("pub fn move_to(&mut self, dest: &mut {name}<'_>) {{"));
    w.line("*dest.orig = std::mem::take(&mut *self.orig);");
    w.close("}");
    w.blank();

    w.doc("Overwrites `dest` with a deep copy of this instance.");
    w.open(format!("pub fn copy_to(&self, dest: &mut {name}<'_>) {{"));
    w.line("Wrap::copy_orig(&mut *dest.orig, &*self.orig);");
    w.close("}");

    for field in &s.fields {
        w.blank();
        field.strategy().emit_accessors(w, s, &field.name);
        w.trim_blank_lines();
    }
    w.close("}");
    w.blank();

    w.open(format!("impl PartialEq<{name}<'_>> for {name}<'_> {{"));
    w.open(format!("fn eq(&self, other: &{name}<'_>) -> bool {{"));
    w.line("*self.orig == *other.orig");
    w.close("}");
    w.close("}");
    w.blank();

    w.open(format!("impl Wrap for {orig} {{"));
    w.line(format!("type View<'a> = {name}<'a>;"));
    w.blank();
    w.open("fn wrap(orig: &mut Self) -> Self::View<'_> {");
    w.line(format!("{name}::from_orig(orig)"));
    w.close("}");
    w.blank();
    if s.fields.is_empty() {
        w.line("fn copy_orig(_dest: &mut Self, _src: &Self) {}");
    } else {
        w.open("fn copy_orig(dest: &mut Self, src: &Self) {");
        for field in &s.fields {
            field.strategy().emit_copy(w, &field.name);
        }
        w.close("}");
    }
    w.close("}");
}

fn emit_struct_tests(w: &mut CodeWriter, s: &StructSpec) {
    let name = &s.name;
    let snake = s.snake_name();
    let slice = s.slice_name();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_move_to() {{"));
    w.line(format!("let mut ms = generate_test_{snake}();"));
    w.line(format!("let mut dest = {name}::new();"));
    w.line("ms.move_to(&mut dest);");
    w.line(format!("assert_eq!({name}::new(), ms);"));
    w.line(format!("assert_eq!(generate_test_{snake}(), dest);"));
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_move_to_empty() {{"));
    w.line(format!("let mut ms = {name}::new();"));
    w.line(format!("let mut dest = {name}::new();"));
    w.line("ms.move_to(&mut dest);");
    w.line(format!("assert_eq!({name}::new(), ms);"));
    w.line(format!("assert_eq!({name}::new(), dest);"));
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_copy_to() {{"));
    w.line(format!("let mut ms = {name}::new();"));
    w.line(format!("let orig = {name}::new();"));
    w.line("orig.copy_to(&mut ms);");
    w.line("assert_eq!(orig, ms);");
    w.line(format!("let orig = generate_test_{snake}();"));
    w.line("orig.copy_to(&mut ms);");
    w.line("assert_eq!(orig, ms);");
    w.line("orig.copy_to(&mut ms);");
    w.line("assert_eq!(orig, ms);");
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_copy_to_overwrites() {{"));
    w.line(format!("let mut dest = generate_test_{snake}();"));
    w.line(format!("{name}::new().copy_to(&mut dest);"));
    w.line(format!("assert_eq!({name}::new(), dest);"));
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_copy_to_is_deep() {{"));
    w.line(format!("let src = generate_test_{snake}();"));
    w.line(format!("let mut dest = {name}::new();"));
    w.line("src.copy_to(&mut dest);");
    w.line(format!("{name}::new().move_to(&mut dest);"));
    w.line(format!("assert_eq!(generate_test_{snake}(), src);"));
    w.line(format!("assert_eq!({name}::new(), dest);"));
    w.close("}");
    w.blank();

    for field in &s.fields {
        field.strategy().emit_tests(w, s, &field.name);
    }

    w.line("#[test]");
    w.open(format!("fn test_{snake}_slice() {{"));
    w.line(format!("let es = {slice}::new();"));
    w.line("assert_eq!(0, es.len());");
    w.line("assert!(es.is_empty());");
    w.line(format!("let mut es = generate_test_{snake}_slice();"));
    w.line(format!("assert_eq!({SLICE_FIXTURE_LEN}, es.len());"));
    w.open("for i in 0..es.len() {");
    w.line(format!("assert_eq!(generate_test_{snake}(), es.at(i));"));
    w.close("}");
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_slice_append_empty() {{"));
    w.line(format!("let mut es = {slice}::new();"));
    w.line("es.append_empty();");
    w.line("assert_eq!(1, es.len());");
    w.line(format!("assert_eq!({name}::new(), es.at(0));"));
    w.line(format!("fill_test_{snake}(&mut es.append_empty());"));
    w.line("assert_eq!(2, es.len());");
    w.line(format!("assert_eq!(generate_test_{snake}(), es.at(1));"));
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_slice_copy_to() {{"));
    w.line(format!("let src = generate_test_{snake}_slice();"));
    w.line(format!("let mut dest = {slice}::new();"));
    w.line("src.copy_to(&mut dest);");
    w.line("assert_eq!(src, dest);");
    w.line("dest.append_empty();");
    w.line("src.copy_to(&mut dest);");
    w.line("assert_eq!(src, dest);");
    w.close("}");
    w.blank();

    w.line("#[test]");
    w.open(format!("fn test_{snake}_slice_move_and_append_to() {{"));
    w.line(format!("let mut src = generate_test_{snake}_slice();"));
    w.line(format!("let mut dest = generate_test_{snake}_slice();"));
    w.line("src.move_and_append_to(&mut dest);");
    w.line("assert_eq!(0, src.len());");
    w.line(format!("assert_eq!({}, dest.len());", SLICE_FIXTURE_LEN * 2));
    w.close("}");
    w.blank();

    w.open(format!("pub(crate) fn generate_test_{snake}() -> {name}<'static> {{"));
    w.line(format!("let mut orig = {name}::new();"));
    w.line(format!("fill_test_{snake}(&mut orig);"));
    w.line("orig");
    w.close("}");
    w.blank();

    if s.fields.is_empty() {
        w.line(format!("pub(crate) fn fill_test_{snake}(_tv: &mut {name}<'_>) {{}}"));
    } else {
        w.open(format!("pub(crate) fn fill_test_{snake}(tv: &mut {name}<'_>) {{"));
        for field in &s.fields {
            w.line(field.strategy().fill_statement("tv", &field.name));
        }
        w.close("}");
    }
    w.blank();

    w.open(format!("pub(crate) fn generate_test_{snake}_slice() -> {slice}<'static> {{"));
    w.line(format!("let mut orig = {slice}::new();"));
    w.line(format!("fill_test_{snake}_slice(&mut orig);"));
    w.line("orig");
    w.close("}");
    w.blank();

    w.open(format!("pub(crate) fn fill_test_{snake}_slice(es: &mut {slice}<'_>) {{"));
    w.line("es.clear();");
    w.line(format!("es.ensure_capacity({SLICE_FIXTURE_LEN});"));
    w.open(format!("for _ in 0..{SLICE_FIXTURE_LEN} {{"));
    w.line(format!("fill_test_{snake}(&mut es.append_empty());"));
    w.close("}");
    w.close("}");
}
