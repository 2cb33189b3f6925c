use clap::{Parser, Subcommand};
use serde_json::Value;

use course_app::CoursePayload;

#[derive(Parser)]
#[command(name = "course-cli")]
#[command(about = "Command line client for the Course App API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the home banner
    Home,
    /// List all courses
    List,
    /// Show a single course
    Get { id: u64 },
    /// Create a course, or replace one when --id is given
    Save {
        coursename: String,
        #[arg(long)]
        id: Option<u64>,
    },
    /// Delete a course
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Home => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_text(res).await?;
        }
        Commands::List => {
            let res = client.get(format!("{}/courses", base)).send().await?;
            print_json(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/{}", base, id)).send().await?;
            print_json(res).await?;
        }
        Commands::Save { coursename, id } => {
            let payload = match id {
                Some(id) => CoursePayload::with_id(id, coursename),
                None => CoursePayload::named(coursename),
            };
            let res = client
                .post(format!("{}/courses", base))
                .json(&payload)
                .send()
                .await?;
            print_text(res).await?;
        }
        Commands::Delete { id } => {
            let res = client.delete(format!("{}/{}", base, id)).send().await?;
            print_text(res).await?;
        }
    }

    Ok(())
}

async fn check(res: reqwest::Response) -> Result<Option<reqwest::Response>, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(None);
    }
    Ok(Some(res))
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(res) = check(res).await? {
        let json: Value = res.json().await?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(res) = check(res).await? {
        let text = res.text().await?;
        if text.is_empty() {
            println!("OK");
        } else {
            println!("{}", text);
        }
    }
    Ok(())
}
