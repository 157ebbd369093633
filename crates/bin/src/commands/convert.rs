//! Convert command - rewrites a document in another format.

use dataview::{
    config::ConfigNode,
    translator::{ConfigTranslator, DataTranslator, JsonTranslator},
};

use super::{CommandResult, load_document};
use crate::cli::{ConvertArgs, FileFormat};

/// Run the convert command
pub fn run(args: &ConvertArgs) -> CommandResult {
    let doc = load_document(&args.input)?;

    let text = match args.to {
        FileFormat::Toml => {
            let node: ConfigNode = ConfigTranslator.to_external(&doc);
            node.to_toml_string()?
        }
        FileFormat::Json => {
            let mut text = serde_json::to_string_pretty(&JsonTranslator.to_external(&doc))?;
            text.push('\n');
            text
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!(file = %path.display(), to = ?args.to, "Converted document");
        }
        None => print!("{text}"),
    }

    Ok(())
}
