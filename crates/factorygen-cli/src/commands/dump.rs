use super::{analyze, input_path, load_config};
use crate::{Context, args::DumpCommand};

impl Context {
    pub fn execute_dump(&mut self, cmd: DumpCommand) -> Result<(), anyhow::Error> {
        let input = input_path(cmd.input);
        let config = load_config(cmd.config.as_deref())?;

        for kind in analyze(&input, &config)? {
            print!("{kind}");
        }
        Ok(())
    }
}
