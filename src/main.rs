use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use gitrate::models::FinalRating;
use gitrate::{Config, RatingPipeline};

#[derive(Parser, Debug)]
#[command(name = "gitrate")]
#[command(version = "0.1.0")]
#[command(about = "Rate a GitHub developer from their public activity")]
struct Args {
    /// GitHub username to rate
    username: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the aggregated snapshot as JSON instead of a rating
    #[arg(long)]
    raw: bool,

    /// Skip the model and use the deterministic mock analysis
    #[arg(long)]
    mock: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitrate=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if args.mock {
        config.mock_mode = true;
    }

    let pipeline = RatingPipeline::new(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!("Analyzing {}...", args.username));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let rendered = if args.raw {
        match pipeline.raw_snapshot(&args.username).await {
            Ok(snapshot) => Ok(serde_json::to_string_pretty(&snapshot)?),
            Err(e) => Err(e),
        }
    } else {
        match pipeline.rate_developer(&args.username).await {
            Ok(rating) => Ok(render(&rating, args.format)?),
            Err(e) => Err(e),
        }
    };
    spinner.finish_and_clear();

    match rendered {
        Ok(output) => {
            write_output(&output, &args)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("{}", e);
            Ok(ExitCode::from(2))
        }
        Err(e) => {
            eprintln!("Failed to analyze user: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_output(output: &str, args: &Args) -> anyhow::Result<()> {
    if let Some(ref path) = args.output {
        std::fs::write(path, output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn render(rating: &FinalRating, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(rating)?,
        Format::Markdown => format_markdown(rating),
        Format::Text => format_text(rating),
    })
}

fn format_text(rating: &FinalRating) -> String {
    let mut output = String::new();

    let username = rating
        .profile
        .as_ref()
        .map(|p| p.username.as_str())
        .unwrap_or("developer");
    output.push_str(&format!("\n=== Developer Rating: {} ===\n\n", username));

    if let Some(profile) = &rating.profile {
        if let Some(ref name) = profile.name {
            output.push_str(&format!("Name: {}\n", name));
        }
        if let Some(ref bio) = profile.bio {
            output.push_str(&format!("Bio: {}\n", bio));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Final Score: {}/100 ({})\n",
        rating.final_score, rating.tier
    ));
    output.push_str(&format!(
        "Base Score: {}/100 ({}) x {} context multiplier\n\n",
        rating.base_score,
        rating.base_tier,
        rating.context_multiplier.value()
    ));

    output.push_str("Scores:\n");
    output.push_str(&format!("  Contribution: {}\n", rating.contribution_score));
    output.push_str(&format!("  PR Quality:   {}\n", rating.pr_quality_score));
    output.push_str(&format!("  Impact:       {}\n", rating.impact_score));
    output.push_str(&format!("  Code Quality: {}\n", rating.code_quality_score));

    if let Some(stack) = rating.tech_stack.as_ref().filter(|s| !s.is_empty()) {
        let languages: Vec<String> = stack
            .iter()
            .map(|(lang, count)| format!("{} ({})", lang, count))
            .collect();
        output.push_str(&format!("\nTech Stack: {}\n", languages.join(", ")));
    }

    if let Some(stats) = &rating.stats {
        output.push_str(&format!(
            "Stars: {}  Forks: {}  Repos: {}  Commits (12mo): {}  PRs: {} ({}% merged)  Reviews: {}\n",
            stats.total_stars,
            stats.total_forks,
            stats.total_repos,
            stats.total_commits,
            stats.total_prs,
            stats.merge_rate,
            stats.reviews_given
        ));
    }

    if !rating.strengths.is_empty() {
        output.push_str("\nStrengths:\n");
        for strength in &rating.strengths {
            output.push_str(&format!("  + {}\n", strength));
        }
    }

    if !rating.weaknesses.is_empty() {
        output.push_str("\nAreas for Improvement:\n");
        for weakness in &rating.weaknesses {
            output.push_str(&format!("  - {}\n", weakness));
        }
    }

    let analysis = &rating.detailed_analysis;
    let notes = [
        ("Contribution", &analysis.contribution_analysis),
        ("Pull Requests", &analysis.pr_analysis),
        ("Impact", &analysis.impact_analysis),
        ("Code Quality", &analysis.code_quality_analysis),
    ];
    if notes.iter().any(|(_, note)| !note.is_empty()) {
        output.push_str("\nNotes:\n");
        for (area, note) in notes.iter().filter(|(_, note)| !note.is_empty()) {
            output.push_str(&format!("  {}: {}\n", area, note));
        }
    }

    if !rating.summary.is_empty() {
        output.push_str(&format!("\nSummary: {}\n", rating.summary));
    }

    output
}

fn format_markdown(rating: &FinalRating) -> String {
    let mut output = String::new();

    let username = rating
        .profile
        .as_ref()
        .map(|p| p.username.as_str())
        .unwrap_or("developer");
    output.push_str(&format!("# Developer Rating: {}\n\n", username));

    if let Some(profile) = &rating.profile {
        if let Some(ref name) = profile.name {
            output.push_str(&format!("**Name:** {}\n\n", name));
        }
        if let Some(ref bio) = profile.bio {
            output.push_str(&format!("> {}\n\n", bio));
        }
    }

    output.push_str(&format!(
        "**Final Score:** {}/100 ({})\n\n",
        rating.final_score, rating.tier
    ));

    output.push_str("## Scores\n\n");
    output.push_str("| Metric | Score |\n|--------|-------|\n");
    output.push_str(&format!("| Contribution | {} |\n", rating.contribution_score));
    output.push_str(&format!("| PR Quality | {} |\n", rating.pr_quality_score));
    output.push_str(&format!("| Impact | {} |\n", rating.impact_score));
    output.push_str(&format!("| Code Quality | {} |\n", rating.code_quality_score));
    output.push_str(&format!(
        "| Base Score | {} ({}) |\n",
        rating.base_score, rating.base_tier
    ));
    output.push_str(&format!(
        "| Context Multiplier | {} |\n",
        rating.context_multiplier.value()
    ));

    if let Some(stats) = &rating.stats {
        output.push_str("\n## Activity\n\n");
        output.push_str("| Metric | Value |\n|--------|-------|\n");
        output.push_str(&format!("| Stars | {} |\n", stats.total_stars));
        output.push_str(&format!("| Forks | {} |\n", stats.total_forks));
        output.push_str(&format!(
            "| Repositories | {} ({} original) |\n",
            stats.total_repos, stats.original_repos
        ));
        output.push_str(&format!("| Commits (12 months) | {} |\n", stats.total_commits));
        output.push_str(&format!(
            "| Pull Requests | {} ({}% merged) |\n",
            stats.total_prs, stats.merge_rate
        ));
        output.push_str(&format!("| Reviews Given | {} |\n", stats.reviews_given));
    }

    if let Some(stack) = rating.tech_stack.as_ref().filter(|s| !s.is_empty()) {
        output.push_str("\n## Tech Stack\n\n");
        for (lang, count) in stack {
            output.push_str(&format!("- {} ({} repos)\n", lang, count));
        }
    }

    if !rating.strengths.is_empty() {
        output.push_str("\n## Strengths\n\n");
        for strength in &rating.strengths {
            output.push_str(&format!("- {}\n", strength));
        }
    }

    if !rating.weaknesses.is_empty() {
        output.push_str("\n## Areas for Improvement\n\n");
        for weakness in &rating.weaknesses {
            output.push_str(&format!("- {}\n", weakness));
        }
    }

    let analysis = &rating.detailed_analysis;
    output.push_str("\n## Analysis\n\n");
    output.push_str(&format!("- **Contribution:** {}\n", analysis.contribution_analysis));
    output.push_str(&format!("- **Pull Requests:** {}\n", analysis.pr_analysis));
    output.push_str(&format!("- **Impact:** {}\n", analysis.impact_analysis));
    output.push_str(&format!("- **Code Quality:** {}\n", analysis.code_quality_analysis));

    if !rating.summary.is_empty() {
        output.push_str(&format!("\n---\n*{}*\n", rating.summary));
    }

    output
}
