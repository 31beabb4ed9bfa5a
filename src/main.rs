use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};
use nemesia::config::AppConfig;
use nemesia::forecast::{ForecastConfig, forecast};
use nemesia::forms::{PlanEntryForm, ReplyForm, ThreadForm};
use nemesia::model::plan::total_spend;
use nemesia::query::{CatalogueFilter, search_threads};
use nemesia::{ForumThread, MockApi};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nemesia")]
#[command(about = "Treatment planner: catalogue, plan, forecast and forum over a local store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalogue procedures
    Catalogue {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one procedure
    Show {
        id: String,
        /// Pre-select this procedure for the next `plan add`
        #[arg(long)]
        plan: bool,
    },
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Projected repeat spend over the next 24 months
    Forecast,
    Forum {
        #[command(subcommand)]
        action: ForumAction,
    },
    /// Restore the seed data
    Reset,
}

#[derive(Subcommand)]
enum PlanAction {
    List,
    Add {
        /// Defaults to the procedure chosen with `show --plan`
        #[arg(long)]
        procedure: Option<String>,
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long, default_value = "")]
        cost: String,
        #[arg(long, default_value = "")]
        clinic: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
enum ForumAction {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "General")]
        tag: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value = "")]
        author: String,
    },
    Reply {
        thread: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value = "")]
        author: String,
    },
    Like {
        thread: String,
        #[arg(long)]
        post: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let api = nemesia::open_dir(&config.data_dir, config.api.clone())
        .await
        .with_context(|| format!("failed to open store in '{}'", config.data_dir.display()))?;

    info!(data_dir = %config.data_dir.display(), "store opened");

    match cli.command {
        Command::Catalogue { category, search } => list_catalogue(&api, category, search).await,
        Command::Show { id, plan } => show_procedure(&api, &id, plan).await,
        Command::Plan { action } => match action {
            PlanAction::List => list_plan(&api).await,
            PlanAction::Add {
                procedure,
                date,
                cost,
                clinic,
                notes,
            } => {
                let procedure_id = match procedure {
                    Some(id) => id,
                    None => api
                        .prefill()
                        .take()
                        .await?
                        .ok_or_else(|| anyhow!("--procedure is required (or run `show <id> --plan`)"))?,
                };
                let entry = PlanEntryForm {
                    procedure_id,
                    date,
                    clinic,
                    cost,
                    notes,
                }
                .into_new_entry()?;
                let created = api.add_plan_entry(entry).await?;
                println!("Added {}", created.id);
                Ok(())
            }
            PlanAction::Remove { id } => {
                api.delete_plan_entry(&id).await?;
                println!("Removed {}", id);
                Ok(())
            }
        },
        Command::Forecast => print_forecast(&api).await,
        Command::Forum { action } => match action {
            ForumAction::List { search } => list_threads(&api, search.as_deref()).await,
            ForumAction::New {
                title,
                tag,
                body,
                author,
            } => {
                let thread = ThreadForm {
                    title,
                    tag,
                    body,
                    author,
                }
                .into_new_thread()?;
                let created = api.create_thread(thread).await?;
                println!("Created {}", created.id);
                Ok(())
            }
            ForumAction::Reply {
                thread,
                body,
                author,
            } => {
                let post = ReplyForm { body, author }.into_new_post()?;
                let created = api.add_post(&thread, post).await?;
                println!("Replied {}", created.id);
                Ok(())
            }
            ForumAction::Like { thread, post } => {
                let likes = match post {
                    Some(post) => api.like_post(&thread, &post).await?,
                    None => api.like_thread(&thread).await?,
                };
                println!("♥ {}", likes);
                Ok(())
            }
        },
        Command::Reset => {
            api.reset().await?;
            println!("Demo data restored");
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nemesia=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn list_catalogue(
    api: &MockApi,
    category: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let catalogue = api.get_catalogue().await?;
    let filter = CatalogueFilter { category, query: search };
    for procedure in filter.apply(&catalogue) {
        println!(
            "{:<14} {:<44} {:>6.0}–{:<6.0} {}",
            procedure.id,
            procedure.name,
            procedure.price_range.low(),
            procedure.price_range.high(),
            procedure.category
        );
    }
    Ok(())
}

async fn show_procedure(api: &MockApi, id: &str, plan: bool) -> Result<()> {
    let procedure = api
        .get_procedure(id)
        .await?
        .ok_or_else(|| anyhow!("no procedure with id '{}'", id))?;

    println!("{}", procedure.name);
    println!("{}", procedure.meta_line());
    println!();
    println!("{}", procedure.overview);
    println!();
    println!("Aftercare:");
    for item in &procedure.aftercare {
        println!("  - {}", item);
    }
    println!("Misconceptions:");
    for item in &procedure.misconceptions {
        println!("  - {}", item);
    }

    if plan {
        api.prefill().set(&procedure.id).await?;
        println!();
        println!("Selected for the planner; run `nemesia plan add --date .. --cost ..`");
    }
    Ok(())
}

async fn list_plan(api: &MockApi) -> Result<()> {
    let catalogue = api.get_catalogue().await?;
    let profile = api.get_profile().await?;
    let entries = api.get_plan().await?;

    for entry in &entries {
        println!(
            "{}  {:<44} {:<18} {:>8.0} {}  [{}]",
            entry.date.format("%Y-%m-%d"),
            entry.procedure_label(&catalogue),
            entry.clinic.as_deref().unwrap_or("-"),
            entry.cost,
            profile.currency,
            entry.id
        );
    }
    println!("Total: {:.0} {}", total_spend(&entries), profile.currency);
    Ok(())
}

async fn print_forecast(api: &MockApi) -> Result<()> {
    let catalogue = api.get_catalogue().await?;
    let profile = api.get_profile().await?;
    let entries = api.get_plan().await?;

    let result = forecast(&entries, &catalogue, Utc::now(), &ForecastConfig::default());
    for line in &result.lines {
        println!("{} · every {} mo", line.short_name(), line.cadence_months);
    }
    println!(
        "Projected repeat-procedure cost (next {} months): {:.0} {}",
        result.horizon_months, result.projected_total, profile.currency
    );
    println!("This is a simplified estimate using your last recorded cost as the repeat cost.");
    Ok(())
}

async fn list_threads(api: &MockApi, search: Option<&str>) -> Result<()> {
    let threads = api.get_forum_threads().await?;
    let shown: Vec<&ForumThread> = search_threads(&threads, search.unwrap_or(""));
    for thread in shown {
        println!(
            "[{}] {} · by {} · {} replies · ♥ {}  ({})",
            thread.tag,
            thread.title,
            thread.author,
            thread.reply_count(),
            thread.likes,
            thread.id
        );
    }
    Ok(())
}
