use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use json_arena::{BuildOptions, EmitOptions, SizeMode};

struct Artifact {
    input: &'static str,
    name: &'static str,
    mode: SizeMode,
}

const ARTIFACTS: &[Artifact] = &[
    Artifact {
        input: "data/glossary.json",
        name: "glossary",
        mode: SizeMode::Standard,
    },
    Artifact {
        input: "data/glossary.json",
        name: "glossary_large",
        mode: SizeMode::Large,
    },
    Artifact {
        input: "data/mixed.json",
        name: "mixed",
        mode: SizeMode::Standard,
    },
];

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    println!("cargo:rerun-if-changed=build.rs");

    for artifact in ARTIFACTS {
        println!("cargo:rerun-if-changed={}", artifact.input);
        compile(artifact, &out_dir)?;
    }
    Ok(())
}

fn compile(artifact: &Artifact, out_dir: &Path) -> Result<(), Box<dyn Error>> {
    let input = fs::read_to_string(artifact.input)
        .map_err(|err| format!("failed to read {}: {err}", artifact.input))?;
    let options = EmitOptions::new(artifact.name).with_mode(artifact.mode);
    let source = json_arena::compile_str_with_options(&input, &BuildOptions::default(), &options)
        .map_err(|err| format!("{}: {err}", artifact.input))?;
    fs::write(out_dir.join(format!("{}.rs", artifact.name)), source)?;
    Ok(())
}
