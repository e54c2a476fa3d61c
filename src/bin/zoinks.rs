//! CLI binary for zoinks.
//!
//! Usage: zoinks -f citekey zotero://select/library/items/32TR4H94

#[cfg(feature = "cli")]
mod cli {
    use clap::Parser;
    use std::io::{IsTerminal, Read};
    use std::path::Path;
    use zoinks::error::{Result, ZoinksError};
    use zoinks::logging::{init_debug_logger, DebugTarget};
    use zoinks::{output, Config, FieldRequest, Identifier, Record, Resolution, ZoteroClient};

    #[derive(Parser)]
    #[command(
        name = "zoinks",
        about = "Print field values from Zotero records",
        long_about = "Print field values from Zotero records.\n\n\
            Identifiers may be Zotero selection links (zotero://select/library/items/KEY), \
            bare item keys, or paths to attachment files in a Zotero storage directory.",
        version
    )]
    struct Cli {
        /// Fields to print, comma-separated (default: all fields)
        #[arg(short, long = "field", value_name = "FIELD[,FIELD...]")]
        fields: Vec<String>,

        /// List the names of all fields present on the record(s)
        #[arg(short, long)]
        list: bool,

        /// Where to read identifiers when none are given: "stdin"/"-" or a file
        #[arg(short, long, default_value = "stdin")]
        source: String,

        /// Zotero API key (overrides ZOTERO_API_KEY)
        #[arg(short, long)]
        api_key: Option<String>,

        /// Zotero user ID (overrides ZOTERO_USER_ID)
        #[arg(short = 'i', long)]
        user_id: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Write a detailed trace to OUT ("-" means the console)
        #[arg(short = '@', long, value_name = "OUT")]
        debug: Option<String>,

        /// Selection links, item keys, or attachment file paths
        identifiers: Vec<String>,
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum OutputFormat {
        Text,
        Json,
        Table,
    }

    /// Collect raw identifier strings from arguments, stdin, or a file.
    fn read_identifiers(args: Vec<String>, source: &str) -> Result<Vec<String>> {
        if !args.is_empty() {
            return Ok(args);
        }

        let text = match source.to_lowercase().as_str() {
            "stdin" | "-" => {
                let mut stdin = std::io::stdin();
                if stdin.is_terminal() {
                    return Err(ZoinksError::BadArgument("No input given.".to_string()));
                }
                let mut buf = String::new();
                stdin.read_to_string(&mut buf)?;
                buf
            }
            _ => {
                if !Path::new(source).exists() {
                    return Err(ZoinksError::BadArgument(format!(
                        "File does not exist: {}",
                        source
                    )));
                }
                std::fs::read_to_string(source)?
            }
        };

        let ids: Vec<String> = text.split_whitespace().map(String::from).collect();
        if ids.is_empty() {
            return Err(ZoinksError::BadArgument("No input given.".to_string()));
        }
        Ok(ids)
    }

    /// Read identifiers off the async runtime so Ctrl-C stays responsive
    /// while stdin blocks.
    async fn read_identifiers_blocking(args: Vec<String>, source: String) -> Result<Vec<String>> {
        tokio::task::spawn_blocking(move || read_identifiers(args, &source))
            .await
            .map_err(|e| ZoinksError::Io(std::io::Error::other(e)))?
    }

    fn print_table(fields: &FieldRequest, resolutions: &[Resolution]) {
        use comfy_table::{ContentArrangement, Table};

        let columns = output::column_names(fields, resolutions);

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        let mut header = vec!["Key".to_string()];
        header.extend(columns.iter().cloned());
        table.set_header(header);

        for resolution in resolutions {
            let mut row = vec![resolution.key.clone()];
            row.extend(columns.iter().map(|column| {
                resolution
                    .fields
                    .iter()
                    .find(|(name, _)| name == column)
                    .and_then(|(_, v)| v.clone())
                    .unwrap_or_default()
            }));
            table.add_row(row);
        }

        println!("{table}");
    }

    fn print_field_names_table(records: &[Record]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Key", "Fields"]);
        for record in records {
            table.add_row(vec![record.key.clone(), record.field_names().join(", ")]);
        }

        println!("{table}");
    }

    pub async fn run() -> Result<()> {
        let cli = Cli::parse();

        if let Some(out) = &cli.debug {
            init_debug_logger(&DebugTarget::parse(out))?;
        }

        let fields = if cli.fields.is_empty() {
            FieldRequest::all()
        } else {
            FieldRequest::parse_lists(&cli.fields)?
        };

        // Parse everything up front so a bad identifier aborts before any
        // request is made.
        let identifiers = read_identifiers_blocking(cli.identifiers, cli.source)
            .await?
            .iter()
            .map(|s| Identifier::parse(s))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = identifiers.len(), fields = ?fields.names(), "parsed input");

        let config = Config::from_env()
            .with_api_key(cli.api_key)
            .with_user_id(cli.user_id);
        let client = ZoteroClient::new(config)?;

        if cli.list {
            let mut records = Vec::with_capacity(identifiers.len());
            for id in &identifiers {
                records.push(client.fetch_record(id).await?);
            }
            match cli.output {
                OutputFormat::Text => println!("{}", output::render_field_names(&records)),
                OutputFormat::Json => println!("{}", output::render_field_names_json(&records)?),
                OutputFormat::Table => print_field_names_table(&records),
            }
            return Ok(());
        }

        let mut resolutions = Vec::with_capacity(identifiers.len());
        for id in &identifiers {
            resolutions.push(client.resolve(id, &fields).await?);
        }

        match cli.output {
            OutputFormat::Text => println!("{}", output::render_text(&fields, &resolutions)),
            OutputFormat::Json => println!("{}", output::render_json(&resolutions)?),
            OutputFormat::Table => print_table(&fields, &resolutions),
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main(flavor = "current_thread")]
async fn main() {
    use zoinks::exit_code::ExitCode;

    let code = tokio::select! {
        result = cli::run() => match result {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                tracing::error!(error = %e, "exiting");
                eprintln!("Error: {}", e);
                ExitCode::from(&e)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted.");
            ExitCode::UserInterrupt
        }
    };
    std::process::exit(code.code());
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
