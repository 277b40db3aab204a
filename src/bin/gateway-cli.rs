use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Query a running idp-gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status and mode
    Health,
    /// List Jira projects
    Projects {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Run a JQL search
    Search {
        #[arg(short, long)]
        jql: String,
        #[arg(long, default_value_t = 25)]
        max_results: u32,
    },
    /// Issues assigned to me
    Mine,
    /// My issues grouped by workflow bucket
    Grouped,
    /// One project's issues grouped by workflow bucket
    ProjectGrouped {
        /// Project key, e.g. IDP
        key: String,
    },
    /// Planning board tasks
    Plan,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Health => client.get(format!("{}/api/health", base)),
        Commands::Projects { query } => {
            let mut req = client.get(format!("{}/api/jira/projects", base));
            if let Some(q) = query {
                req = req.query(&[("query", q)]);
            }
            req
        }
        Commands::Search { jql, max_results } => client
            .get(format!("{}/api/jira/issues/search", base))
            .query(&[("jql", jql), ("maxResults", max_results.to_string())]),
        Commands::Mine => client.get(format!("{}/api/jira/issues/mine", base)),
        Commands::Grouped => client.get(format!("{}/api/jira/issues/mine/grouped", base)),
        Commands::ProjectGrouped { key } => {
            client.get(format!("{}/api/jira/projects/{}/issues/grouped", base, key))
        }
        Commands::Plan => client.get(format!("{}/api/plan/tasks", base)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
