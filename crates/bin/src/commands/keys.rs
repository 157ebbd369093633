//! Keys command - lists the keys of a document or one of its views.

use dataview::data::{DataView, View};

use super::{CommandResult, load_document, parse_path};
use crate::cli::KeysArgs;
use crate::output::{OutputFormat, print_pairs};

/// Run the keys command
pub fn run(args: &KeysArgs, separator: &str, format: OutputFormat) -> CommandResult {
    let doc = load_document(&args.input)?;
    let view: View<'_> = match &args.path {
        Some(path) => doc
            .get_view(parse_path(separator, path))
            .ok_or_else(|| format!("No view at path '{path}'"))?,
        None => doc.as_view(),
    };

    let keys = view.get_keys(args.deep);
    match format {
        OutputFormat::Human => {
            let rows: Vec<(String, String)> = keys
                .iter()
                .map(|key| {
                    let kind = view.get(key).map(|value| value.type_name()).unwrap_or("-");
                    (key.as_string(separator), kind.to_string())
                })
                .collect();
            print_pairs(("KEY", "TYPE"), &rows);
        }
        OutputFormat::Json => {
            let keys: Vec<String> = keys.iter().map(|key| key.as_string(separator)).collect();
            println!("{}", serde_json::to_string(&keys)?);
        }
    }

    Ok(())
}
