use std::{fs, io, path::Path};

use anyhow::{Context as _, bail};

use super::{generate, input_path, load_config, output_path};
use crate::{Context, args::GenerateCommand};

impl Context {
    pub fn execute_check(&mut self, cmd: GenerateCommand) -> Result<(), anyhow::Error> {
        let input = input_path(cmd.input);
        let output = output_path(cmd.output);
        let config = load_config(cmd.config.as_deref())?;

        let expected = generate(&input, &config)?;
        let actual = read_existing(&output)?;
        if actual.as_deref() != Some(expected.as_str()) {
            bail!(
                "`{}` is out of date, run `factorygen generate` to update it",
                output.display()
            );
        }
        Ok(())
    }
}

/// Reads the generated file, `None` if it does not exist yet.
fn read_existing(path: &Path) -> Result<Option<String>, anyhow::Error> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read output `{}`", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_existing() {
        let dir = std::env::temp_dir().join(format!("factorygen-check-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert_eq!(read_existing(&dir.join("missing.ts")).unwrap(), None);

        let file = dir.join("factory.generated.ts");
        fs::write(&file, "text").unwrap();
        assert_eq!(read_existing(&file).unwrap().as_deref(), Some("text"));

        let err = read_existing(&dir).unwrap_err();
        assert!(err.to_string().starts_with("failed to read output"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
