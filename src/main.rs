use anyhow::Result;
use clap::Parser;
use llm_relay::catalog::{self, UseCase};
use llm_relay::logging::init_cli_logging;
use llm_relay::RelayClient;
use serde_json::json;

const USAGE: &str = "Usage: llm-relay <model_identifier> <prompt...>";

#[derive(Parser)]
#[command(name = "llm-relay")]
#[command(version)]
#[command(about = "Send a prompt to an LLM chosen by model identifier")]
struct Cli {
    /// Model identifier (e.g. `claude`, `gpt-4-turbo`) followed by the prompt.
    /// Options are only recognized before the model identifier.
    #[arg(
        value_name = "MODEL PROMPT",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    args: Vec<String>,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// List the model catalog and exit
    #[arg(long)]
    list_models: bool,

    /// Print the recommended model for a use case and exit
    #[arg(long, value_name = "NAME")]
    use_case: Option<UseCase>,

    /// With --use-case, recommend a paid model when its key is configured
    #[arg(long)]
    paid: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logging(cli.verbose);

    if cli.list_models {
        print_catalog(cli.json)?;
        return Ok(());
    }

    let client = match RelayClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(use_case) = cli.use_case {
        let model = client.model_for_use_case(Some(use_case), !cli.paid);
        if cli.json {
            println!("{}", json!({ "use_case": use_case, "model": model }));
        } else {
            println!("{model}");
        }
        return Ok(());
    }

    let (model, prompt) = match cli.args.split_first() {
        Some((model, words)) if !words.is_empty() => (model.clone(), words.join(" ")),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    // Errors are part of the answer; the exit code stays 0.
    let result = client.query(&model, &prompt).await;
    if cli.json {
        let output = match &result {
            Ok(text) => json!({ "model": model, "ok": true, "text": text }),
            Err(e) => json!({
                "model": model,
                "ok": false,
                "kind": e.kind(),
                "message": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match result {
            Ok(text) => println!("{text}"),
            Err(e) => println!("Error: {e}"),
        }
    }

    Ok(())
}

fn print_catalog(as_json: bool) -> Result<()> {
    let models = catalog::models();
    if as_json {
        println!("{}", serde_json::to_string_pretty(models)?);
        return Ok(());
    }

    for model in models {
        let tier = if model.is_paid { "paid" } else { "free" };
        println!(
            "{:<18} {:<18} {:<10} {:<5} {}",
            model.id, model.name, model.vendor, tier, model.description
        );
    }
    Ok(())
}
