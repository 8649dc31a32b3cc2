use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use protonull::DynamicHandle;

/// Load `message` from a serialized `FileDescriptorSet` file.
pub fn load_handle(descriptor_set: &Path, message: &str) -> Result<DynamicHandle> {
    let bytes = fs::read(descriptor_set)
        .with_context(|| format!("failed to read {}", descriptor_set.display()))?;
    Ok(DynamicHandle::from_descriptor_set(&bytes, message)?)
}

/// Read the whole input file, or stdin if `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write to the output file, or stdout if `path` is `None`.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
