use crate::config::Command;

mod config;
mod error;
mod offline;
mod online;
mod render;

#[tokio::main]
async fn main() {
    let cli = match config::load() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fintrack={level},client={level},engine={level}",
            level = cli.settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let result = match run(&cli.settings, cli.command).await {
        Ok(rendered) if cli.json => {
            serde_json::to_string_pretty(&rendered.json).map_err(Into::into)
        }
        Ok(rendered) => Ok(rendered.text),
        Err(err) => Err(err),
    };
    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

async fn run(settings: &config::AppConfig, command: Command) -> error::Result<render::Rendered> {
    match command {
        Command::Budgets(args) => offline::budgets(settings, &args).await,
        Command::Report(args) => offline::report(settings, &args).await,
        Command::Installments { month } => offline::installments(month),
        Command::Online(command) => online::run(settings, command).await,
    }
}
