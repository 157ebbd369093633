//! Subcommand implementations.

use dataview::{
    Container,
    config::ConfigNode,
    data::Query,
    translator::{ConfigTranslator, DataTranslator, JsonTranslator},
};

use crate::cli::{FileFormat, InputArgs};

pub mod convert;
pub mod get;
pub mod keys;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Read the input file into a document
pub fn load_document(input: &InputArgs) -> Result<Container, Box<dyn std::error::Error>> {
    let format = input.format();
    tracing::debug!(file = %input.file.display(), ?format, "Loading document");
    let doc = match format {
        FileFormat::Toml => ConfigTranslator.from_external(&ConfigNode::load(&input.file)?)?,
        FileFormat::Json => {
            let text = std::fs::read_to_string(&input.file)?;
            let json: serde_json::Value = serde_json::from_str(&text)?;
            JsonTranslator.from_external(&json)?
        }
    };
    Ok(doc)
}

/// Split a command-line path with the configured separator
pub fn parse_path(separator: &str, path: &str) -> Query {
    Query::split(separator, path)
}
