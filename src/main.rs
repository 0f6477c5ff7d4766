use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use weather_lookup::core::presentation::SEARCHING_MESSAGE;
use weather_lookup::domain::ports::QueryStore;
use weather_lookup::utils::{logger, validation::Validate};
use weather_lookup::{
    CliConfig, DisplayUnit, FileQueryStore, OpenMeteoClient, SearchSession, SearchWorkflow,
    WorkflowResult,
};

type Session = SearchSession<OpenMeteoClient, OpenMeteoClient, FileQueryStore>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };

    logger::init_logger(config.logging.format, cli.verbose);
    tracing::info!("Starting weather-lookup");
    match &cli.config {
        Some(path) => tracing::debug!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No configuration file given; using defaults"),
    }
    tracing::debug!("Resolved config: {:?}", config);

    let client = OpenMeteoClient::new(&config).context("failed to build HTTP client")?;
    let store = FileQueryStore::new(config.state_file_path());
    let workflow = SearchWorkflow::with_settings(
        client.clone(),
        client,
        store.clone(),
        config.workflow_settings(),
    );
    let mut session = SearchSession::new(workflow, config.display.unit);

    if cli.interactive {
        return run_interactive(&mut session, cli.query()).await;
    }

    let query = match cli.query() {
        Some(query) => Some(query),
        None => store.last_query().await.unwrap_or_else(|e| {
            tracing::warn!("Could not read last query: {}", e);
            None
        }),
    };

    let Some(query) = query else {
        eprintln!("No city given and no previous search to restore.");
        eprintln!("💡 Try: weather-lookup <city>");
        std::process::exit(2);
    };

    println!("{}", SEARCHING_MESSAGE);
    let Some(result) = session.search(&query).await else {
        return Ok(());
    };
    println!("{}", session.render(&result));

    let exit_code = match result {
        WorkflowResult::Success { .. } | WorkflowResult::Ignored => 0,
        WorkflowResult::NotFound | WorkflowResult::NoCurrentData => 1,
        WorkflowResult::TransportError(_) => 3,
    };
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

async fn run_interactive(session: &mut Session, initial: Option<String>) -> anyhow::Result<()> {
    let first = match initial {
        Some(query) => {
            println!("{}", SEARCHING_MESSAGE);
            session.search(&query).await
        }
        None => session.restore().await,
    };
    if let Some(result) = first {
        println!("{}", session.render(&result));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let result = match line.trim() {
            "" => None,
            ":q" | ":quit" => break,
            ":f" => session.set_unit(DisplayUnit::Fahrenheit).await,
            ":c" => session.set_unit(DisplayUnit::Celsius).await,
            query => {
                println!("{}", SEARCHING_MESSAGE);
                session.search(query).await
            }
        };

        if let Some(result) = result {
            println!("{}", session.render(&result));
        }
        prompt()?;
    }

    Ok(())
}
