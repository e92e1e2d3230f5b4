use std::fs;

use anyhow::Context as _;
use log::info;

use super::{generate, input_path, load_config, output_path};
use crate::{Context, args::GenerateCommand};

impl Context {
    pub fn execute_generate(&mut self, cmd: GenerateCommand) -> Result<(), anyhow::Error> {
        let input = input_path(cmd.input);
        let output = output_path(cmd.output);
        let config = load_config(cmd.config.as_deref())?;

        let text = generate(&input, &config)?;
        if let Some(dir) = output.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create `{}`", dir.display()))?;
        }
        fs::write(&output, text)
            .with_context(|| format!("failed to write `{}`", output.display()))?;
        info!("wrote {}", output.display());
        Ok(())
    }
}
