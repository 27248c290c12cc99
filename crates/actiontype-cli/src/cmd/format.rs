use actiontype_core::structured::{FieldError, StructuredTextField};
use anyhow::Context;
use std::io::Read;
use std::path::Path;

pub fn run(file: Option<&Path>) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let mut field = StructuredTextField::with_text(text);
    if !field.format() {
        anyhow::bail!("{}", FieldError::CannotFormat);
    }
    if !field.is_blank() {
        println!("{}", field.text());
    }
    Ok(())
}
