use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "factorygen")]
#[command(bin_name = "factorygen")]
#[command(version, about, long_about = None)]
pub struct FactorygenArgs {
    /// Defaults to `generate`.
    #[command(subcommand)]
    pub cmd: Option<FactorygenCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FactorygenCommand {
    /// Generate the factory file.
    Generate(GenerateCommand),
    /// Fail if the factory file is not up to date.
    Check(GenerateCommand),
    /// Print the classified node kinds.
    Dump(DumpCommand),
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateCommand {
    /// The schema file. Defaults to `src/compiler/types.ts`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// The factory file. Defaults to `src/compiler/factory.generated.ts`.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// A JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DumpCommand {
    /// The schema file. Defaults to `src/compiler/types.ts`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// A JSON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
