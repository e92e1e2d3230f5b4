use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use factorygen::{Config, GenerateError, SyntaxNodeKind, utils::Locatable};

use crate::{
    Context,
    args::{FactorygenArgs, FactorygenCommand},
};

mod check;
mod dump;
mod generate;

const DEFAULT_INPUT: &str = "src/compiler/types.ts";
const DEFAULT_OUTPUT: &str = "src/compiler/factory.generated.ts";

impl Context {
    pub fn execute(&mut self, args: FactorygenArgs) -> Result<(), anyhow::Error> {
        match args.cmd {
            None => self.execute_generate(Default::default()),
            Some(FactorygenCommand::Generate(cmd)) => self.execute_generate(cmd),
            Some(FactorygenCommand::Check(cmd)) => self.execute_check(cmd),
            Some(FactorygenCommand::Dump(cmd)) => self.execute_dump(cmd),
        }
    }
}

/// The workspace root, two levels above this crate.
fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

fn input_path(input: Option<PathBuf>) -> PathBuf {
    input.unwrap_or_else(|| project_root().join(DEFAULT_INPUT))
}

fn output_path(output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| project_root().join(DEFAULT_OUTPUT))
}

fn load_config(path: Option<&Path>) -> Result<Config, anyhow::Error> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config `{}`", path.display()))?;
    Config::from_json(&text).with_context(|| format!("invalid config `{}`", path.display()))
}

fn read_schema(path: &Path) -> Result<String, anyhow::Error> {
    fs::read_to_string(path).with_context(|| format!("failed to read schema `{}`", path.display()))
}

/// Attaches the schema path to an error, listing parse errors with their
/// locations.
fn report(err: GenerateError, path: &Path, input: &str) -> anyhow::Error {
    match err {
        GenerateError::Parse(errors) => {
            for err in &errors {
                eprintln!("{}:{}: {err}", path.display(), err.location(input));
            }
            anyhow::anyhow!("failed to parse schema `{}`", path.display())
        }
        err => anyhow::Error::new(err).context(format!("failed to process `{}`", path.display())),
    }
}

fn analyze(path: &Path, config: &Config) -> Result<Vec<SyntaxNodeKind>, anyhow::Error> {
    let input = read_schema(path)?;
    factorygen::analyze(&input, config).map_err(|err| report(err, path, &input))
}

fn generate(path: &Path, config: &Config) -> Result<String, anyhow::Error> {
    let input = read_schema(path)?;
    factorygen::generate(&input, config).map_err(|err| report(err, path, &input))
}
