use clap::Parser;
use log::{debug, error, info, warn};
use std::io::Read;
use std::path::PathBuf;
use tally::config::Settings;
use tally::elements::Element;
use tally::ElementAggregator;

/// Command-line arguments for the tally CLI
#[derive(Parser)]
#[command(
    name = "tally",
    about = "tally - sum the numbers in a nested, heterogeneous element sequence",
    long_about = "Reads a JSON array of elements (numbers, nested lists, person records and \
                  explicit empty markers), dispatches each element through the selected rule \
                  set and prints the resulting sum."
)]
struct Cli {
    /// Path to a JSON input file; reads stdin when omitted or set to "-"
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON file containing the element sequence (stdin if omitted)"
    )]
    input: Option<PathBuf>,

    /// Rule set to aggregate under
    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Rule set: basic, strict, guarded or catch-all (overrides the config file)"
    )]
    rules: Option<String>,

    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

impl Cli {
    /// Validate the CLI arguments
    ///
    /// # Returns
    ///
    /// `Ok(())` if all arguments are valid, `Err(String)` with error message otherwise
    fn validate(&self) -> Result<(), String> {
        if let Some(ref config_path) = self.config {
            // Missing files are handled gracefully by Settings::load_or_default,
            // which warns and falls back to defaults
            if config_path.exists() {
                if !config_path.is_file() {
                    return Err(format!(
                        "Configuration path is not a file: {}",
                        config_path.display()
                    ));
                }

                // Check if file has .toml extension (optional but recommended)
                if let Some(extension) = config_path.extension() {
                    if extension != "toml" {
                        warn!(
                            "Configuration file does not have .toml extension: {}",
                            config_path.display()
                        );
                    }
                }
            }
        }

        if let Some(ref input_path) = self.input {
            if input_path.as_os_str() != "-" && input_path.exists() && !input_path.is_file() {
                return Err(format!(
                    "Input path is not a file: {}",
                    input_path.display()
                ));
            }
        }

        Ok(())
    }
}

/// Read the element sequence from the input file or stdin
fn read_elements(input: Option<&PathBuf>) -> Result<Vec<Element>, String> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read input file {}: {}", path.display(), e))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            buffer
        }
    };

    serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse input as a JSON element sequence: {}", e))
}

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    info!("Starting tally");

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    // Load configuration, falling back to defaults for a missing file
    let settings = match Settings::load_or_default(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Resolve the rule set (CLI flag wins over the config file)
    let rules = match settings.resolve_rules(cli.rules.as_deref()) {
        Ok(rules) => rules,
        Err(e) => {
            error!("Failed to resolve rule set: {}", e);
            std::process::exit(1);
        }
    };
    debug!("Using rule set '{}'", rules.name());

    // Contradictory configurations are rejected here, before any input is read
    let aggregator = match ElementAggregator::new(rules) {
        Ok(aggregator) => aggregator,
        Err(e) => {
            error!("Invalid rule set configuration: {}", e);
            std::process::exit(1);
        }
    };

    let items = match read_elements(cli.input.as_ref()) {
        Ok(items) => items,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    debug!("Read {} top-level elements", items.len());

    match aggregator.sum(&items) {
        Ok(total) => println!("{}", total),
        Err(e) => {
            error!("Aggregation failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_validation_with_existing_file() {
        let temp_file = std::env::temp_dir().join("test_tally_config.toml");
        std::fs::write(&temp_file, "rule-set = \"basic\"").unwrap();

        let cli = Cli {
            input: None,
            rules: None,
            config: Some(temp_file.clone()),
            verbose: false,
        };

        assert!(cli.validate().is_ok());

        std::fs::remove_file(&temp_file).unwrap();
    }

    #[test]
    fn test_cli_validation_with_missing_config() {
        let cli = Cli {
            input: None,
            rules: None,
            config: Some(PathBuf::from("/nonexistent/config.toml")),
            verbose: false,
        };

        // Should not fail - missing files are handled gracefully
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_with_config_directory() {
        let cli = Cli {
            input: None,
            rules: None,
            config: Some(PathBuf::from("/tmp")),
            verbose: false,
        };

        // Should fail - directories are not valid config files
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_validation_with_input_directory() {
        let cli = Cli {
            input: Some(PathBuf::from("/tmp")),
            rules: None,
            config: None,
            verbose: false,
        };

        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_validation_stdin_marker() {
        let cli = Cli {
            input: Some(PathBuf::from("-")),
            rules: None,
            config: None,
            verbose: false,
        };

        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_read_elements_from_file() {
        let temp_file = std::env::temp_dir().join("test_tally_input.json");
        std::fs::write(
            &temp_file,
            "[{\"number\":1},\"absent\",{\"list\":[{\"number\":2}]}]",
        )
        .unwrap();

        let items = read_elements(Some(&temp_file)).unwrap();
        assert_eq!(
            items,
            vec![
                Element::Number(1),
                Element::Absent,
                Element::List(vec![Element::Number(2)]),
            ]
        );

        std::fs::remove_file(&temp_file).unwrap();
    }

    #[test]
    fn test_read_elements_rejects_malformed_json() {
        let temp_file = std::env::temp_dir().join("test_tally_bad_input.json");
        std::fs::write(&temp_file, "[{\"number\":}]").unwrap();

        assert!(read_elements(Some(&temp_file)).is_err());

        std::fs::remove_file(&temp_file).unwrap();
    }

    #[test]
    fn test_read_elements_missing_file() {
        let missing = PathBuf::from("/nonexistent/input.json");
        assert!(read_elements(Some(&missing)).is_err());
    }
}
