//! Generates the wrapper bindings from `schema/*.pdata` into `OUT_DIR`.

use std::path::PathBuf;

use anyhow::Context;
use pdatagen::{parse, GenerateOptions, Generator};

const SCHEMAS: &[&str] = &[
    "schema/common.pdata",
    "schema/logs.pdata",
    "schema/logs_otlp.pdata",
];

fn main() -> anyhow::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR is not set")?);

    let mut files = Vec::with_capacity(SCHEMAS.len());
    for schema in SCHEMAS {
        println!("cargo:rerun-if-changed={schema}");
        let src = std::fs::read_to_string(schema).with_context(|| format!("reading {schema}"))?;
        files.push(parse(&src).with_context(|| format!("parsing {schema}"))?);
    }

    let generated = Generator::new(GenerateOptions::default())
        .generate_all(&files)
        .context("invalid pdata schema")?;
    for g in &generated {
        for (name, content) in [(&g.wrapper_file_name, &g.wrapper), (&g.test_file_name, &g.tests)] {
            let path = out_dir.join(name);
            std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        }
    }
    Ok(())
}
