//! Get command - prints the value stored at a path.

use dataview::{
    data::DataView,
    translator::{DataTranslator, JsonTranslator},
};

use super::{CommandResult, load_document, parse_path};
use crate::cli::GetArgs;
use crate::output::{OutputFormat, print_pairs};

/// Run the get command
pub fn run(args: &GetArgs, separator: &str, format: OutputFormat) -> CommandResult {
    let doc = load_document(&args.input)?;
    let path = parse_path(separator, &args.path);
    let Some(value) = doc.get(&path) else {
        return Err(format!("Nothing stored at path '{}'", args.path).into());
    };

    match format {
        OutputFormat::Human => match doc.get_view(&path) {
            Some(view) => {
                // Deep listings carry every leaf under its full path
                let rows: Vec<(String, String)> = view
                    .get_values(true)
                    .iter()
                    .filter_map(|(key, resolved)| {
                        let value = resolved.as_value()?;
                        Some((key.as_string(separator), value.to_string()))
                    })
                    .collect();
                print_pairs(("PATH", "VALUE"), &rows);
            }
            None => println!("{value}"),
        },
        OutputFormat::Json => {
            // Walk the translated tree so nested views and view lists render as JSON
            let mut json = &JsonTranslator.to_external(&doc);
            for part in path.parts() {
                json = match json {
                    serde_json::Value::Array(items) => part
                        .parse::<usize>()
                        .ok()
                        .and_then(|index| items.get(index))
                        .unwrap_or(&serde_json::Value::Null),
                    other => other.get(part).unwrap_or(&serde_json::Value::Null),
                };
            }
            println!("{}", serde_json::to_string(json)?);
        }
    }

    Ok(())
}
