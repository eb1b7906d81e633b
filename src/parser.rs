//! Parse schema source into the [`FileSpec`] model using PEST.
//!
//! Field kinds are resolved here, once: the parser turns the kind keyword into the
//! matching strategy, so an unknown kind fails the parse instead of surfacing later
//! during emission.

use crate::error::SchemaError;
use crate::schema::*;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct SchemaParser;

/// Parse one schema source (exactly one `file` block).
pub fn parse(source: &str) -> Result<FileSpec, SchemaError> {
    let pairs = SchemaParser::parse(Rule::schema, source)
        .map_err(|e| SchemaError::Parse(e.to_string()))?;
    let schema = pairs
        .into_iter()
        .next()
        .ok_or_else(|| SchemaError::Parse("empty parse".to_string()))?;
    let file = schema
        .into_inner()
        .find(|p| p.as_rule() == Rule::file_decl)
        .ok_or_else(|| SchemaError::Parse("missing file block".to_string()))?;
    build_file(file)
}

fn build_file(pair: Pair<Rule>) -> Result<FileSpec, SchemaError> {
    let mut name = String::new();
    let mut module = String::new();
    let mut imports = Vec::new();
    let mut test_imports = Vec::new();
    let mut structs = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            Rule::module_decl => {
                if let Some(lit) = inner.into_inner().next() {
                    module = string_value(lit);
                }
            }
            Rule::imports_decl => imports.extend(inner.into_inner().map(string_value)),
            Rule::test_imports_decl => test_imports.extend(inner.into_inner().map(string_value)),
            Rule::struct_decl => structs.push(build_struct(inner)?),
            _ => {}
        }
    }
    if module.is_empty() {
        return Err(SchemaError::MissingModule(name));
    }

    Ok(FileSpec {
        name,
        module,
        imports,
        test_imports,
        structs,
    })
}

fn build_struct(pair: Pair<Rule>) -> Result<StructSpec, SchemaError> {
    let mut name = String::new();
    let mut description = Vec::new();
    let mut orig_full_name = String::new();
    let mut fields = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::doc_comment => {
                let text = inner
                    .into_inner()
                    .next()
                    .map(|p| p.as_str())
                    .unwrap_or_default();
                let text = text.strip_prefix(' ').unwrap_or(text).trim_end();
                description.push(text.to_string());
            }
            Rule::ident => name = inner.as_str().to_string(),
            Rule::path => orig_full_name = inner.as_str().to_string(),
            Rule::field_decl => fields.push(build_field(inner, &name)?),
            _ => {}
        }
    }

    Ok(StructSpec {
        name,
        description,
        orig_full_name,
        fields,
    })
}

fn build_field(pair: Pair<Rule>, struct_name: &str) -> Result<FieldSpec, SchemaError> {
    let mut idents = Vec::new();
    let mut args = Vec::new();
    let mut default = None;
    let mut test = None;
    let mut body = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => idents.push(inner.as_str().to_string()),
            Rule::field_arg => args.push(inner.as_str().to_string()),
            Rule::default_clause => default = Some(build_clause_literal(inner)?),
            Rule::test_clause => test = Some(build_clause_literal(inner)?),
            Rule::oneof_body => body = Some(inner),
            _ => {}
        }
    }
    let [name, kind] = <[String; 2]>::try_from(idents)
        .map_err(|_| SchemaError::Parse(format!("{struct_name}: malformed field")))?;
    let location = format!("{struct_name}.{name}");

    let variants = match body {
        Some(body) => Some(build_variants(body, &location)?),
        None => None,
    };
    let kind = resolve_kind(&location, &kind, args, default, test, variants)?;
    Ok(FieldSpec::new(name, kind))
}

/// Map a kind keyword and its arguments onto the strategy for that kind.
fn resolve_kind(
    location: &str,
    kind: &str,
    args: Vec<String>,
    default: Option<Literal>,
    test: Option<Literal>,
    variants: Option<Vec<OneOfVariant>>,
) -> Result<FieldKind, SchemaError> {
    if let Some(ty) = PrimitiveType::from_keyword(kind) {
        expect_args(location, kind, &args, 0)?;
        if variants.is_some() {
            return Err(SchemaError::UnexpectedBody {
                location: location.to_string(),
            });
        }
        let default = default.unwrap_or_else(|| ty.zero());
        let test = test.ok_or_else(|| SchemaError::MissingTestValue {
            location: location.to_string(),
        })?;
        check_literal(location, ty, &default)?;
        check_literal(location, ty, &test)?;
        return Ok(FieldKind::Primitive(PrimitiveField::new(ty, default, test)));
    }

    if kind == "enum" {
        expect_args(location, kind, &args, 1)?;
        if variants.is_some() {
            return Err(SchemaError::UnexpectedBody {
                location: location.to_string(),
            });
        }
        let test = test.ok_or_else(|| SchemaError::MissingTestValue {
            location: location.to_string(),
        })?;
        let default = enum_value(location, default.unwrap_or(Literal::Int(0)))?;
        let test = enum_value(location, test)?;
        let type_name = args.into_iter().next().unwrap_or_default();
        return Ok(FieldKind::Enum(EnumField::new(type_name, default, test)));
    }

    let known = matches!(kind, "message" | "repeated" | "map" | "oneof");
    if !known {
        return Err(SchemaError::UnknownKind {
            location: location.to_string(),
            kind: kind.to_string(),
        });
    }
    if default.is_some() || test.is_some() {
        return Err(SchemaError::UnexpectedLiteral {
            location: location.to_string(),
        });
    }
    if kind != "oneof" && variants.is_some() {
        return Err(SchemaError::UnexpectedBody {
            location: location.to_string(),
        });
    }

    let mut args = args.into_iter();
    Ok(match kind {
        "message" => {
            expect_args(location, kind, args.as_slice(), 1)?;
            FieldKind::MessageValue(MessageField::new(args.next().unwrap_or_default()))
        }
        "repeated" => {
            expect_args(location, kind, args.as_slice(), 1)?;
            FieldKind::RepeatedMessage(RepeatedField::new(args.next().unwrap_or_default()))
        }
        "map" => {
            expect_args(location, kind, args.as_slice(), 0)?;
            FieldKind::KVMapping(MapField)
        }
        _ => {
            expect_args(location, kind, args.as_slice(), 2)?;
            let variants = variants.unwrap_or_default();
            if variants.is_empty() {
                return Err(SchemaError::EmptyOneOf {
                    location: location.to_string(),
                });
            }
            FieldKind::OneOf(OneOfField {
                type_name: args.next().unwrap_or_default(),
                orig_enum: args.next().unwrap_or_default(),
                variants,
            })
        }
    })
}

fn build_variants(pair: Pair<Rule>, location: &str) -> Result<Vec<OneOfVariant>, SchemaError> {
    let mut variants = Vec::new();
    for decl in pair.into_inner() {
        if decl.as_rule() != Rule::variant_decl {
            continue;
        }
        let mut idents = Vec::new();
        let mut args = Vec::new();
        let mut test = None;
        for inner in decl.into_inner() {
            match inner.as_rule() {
                Rule::ident => idents.push(inner.as_str().to_string()),
                Rule::field_arg => args.push(inner.as_str().to_string()),
                Rule::test_clause => test = Some(build_clause_literal(inner)?),
                _ => {}
            }
        }
        let [name, orig_variant, kind] = <[String; 3]>::try_from(idents)
            .map_err(|_| SchemaError::Parse(format!("{location}: malformed variant")))?;
        let variant_location = format!("{location}.{name}");

        let kind = if let Some(ty) = PrimitiveType::from_keyword(&kind) {
            expect_args(&variant_location, &kind, &args, 0)?;
            let test = test.ok_or_else(|| SchemaError::MissingTestValue {
                location: variant_location.clone(),
            })?;
            check_literal(&variant_location, ty, &test)?;
            VariantKind::Primitive { ty, test }
        } else if kind == "message" {
            expect_args(&variant_location, &kind, &args, 1)?;
            if test.is_some() {
                return Err(SchemaError::UnexpectedLiteral {
                    location: variant_location,
                });
            }
            VariantKind::Message(args.remove(0))
        } else {
            return Err(SchemaError::UnknownKind {
                location: variant_location,
                kind,
            });
        };
        variants.push(OneOfVariant {
            name,
            orig_variant,
            kind,
        });
    }
    Ok(variants)
}

fn expect_args(location: &str, kind: &str, args: &[String], expected: usize) -> Result<(), SchemaError> {
    if args.len() != expected {
        return Err(SchemaError::Arity {
            location: location.to_string(),
            kind: kind.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn check_literal(location: &str, ty: PrimitiveType, lit: &Literal) -> Result<(), SchemaError> {
    if !ty.accepts(lit) {
        return Err(SchemaError::InvalidLiteral {
            location: location.to_string(),
            ty: ty.to_string(),
            literal: lit.to_string(),
        });
    }
    Ok(())
}

/// Enum values are proto enum numbers, so they must fit `i32`.
fn enum_value(location: &str, lit: Literal) -> Result<i32, SchemaError> {
    let value = match lit {
        Literal::Int(v) => i32::try_from(v).ok(),
        _ => None,
    };
    value.ok_or_else(|| SchemaError::InvalidLiteral {
        location: location.to_string(),
        ty: "enum".to_string(),
        literal: lit.to_string(),
    })
}

/// `default_clause` / `test_clause` → their single literal.
fn build_clause_literal(pair: Pair<Rule>) -> Result<Literal, SchemaError> {
    let lit = pair
        .into_inner()
        .next()
        .ok_or_else(|| SchemaError::Parse("missing literal".to_string()))?;
    build_literal(lit)
}

fn build_literal(pair: Pair<Rule>) -> Result<Literal, SchemaError> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| SchemaError::Parse("empty literal".to_string()))?;
    let text = inner.as_str();
    Ok(match inner.as_rule() {
        Rule::string_lit => Literal::String(string_value(inner)),
        Rule::float_lit => Literal::Float(text.to_string()),
        Rule::int_lit => Literal::Int(parse_int(text)?),
        Rule::bool_lit => Literal::Bool(text == "true"),
        Rule::bytes_lit => {
            let mut bytes = Vec::new();
            for b in inner.into_inner() {
                let v = parse_int(b.as_str())?;
                let byte = u8::try_from(v)
                    .map_err(|_| SchemaError::Parse(format!("byte out of range: {v}")))?;
                bytes.push(byte);
            }
            Literal::Bytes(bytes)
        }
        other => return Err(SchemaError::Parse(format!("unexpected literal: {other:?}"))),
    })
}

fn parse_int(s: &str) -> Result<i64, SchemaError> {
    s.parse::<i64>()
        .map_err(|e| SchemaError::Parse(format!("integer `{s}`: {e}")))
}

fn string_value(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}
