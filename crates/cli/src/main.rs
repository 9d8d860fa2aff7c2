use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::UserStore;
use engine::{Recommendation, Recommender, RecommenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// cinematch - content-based movie recommendations
#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Movie recommendations from synopsis, director and genre similarity", long_about = None)]
struct Cli {
    /// JSON array of movie records
    #[arg(long, default_value = "data/movies.json")]
    catalog: PathBuf,

    /// JSON array of user records; created on the first write
    #[arg(long, default_value = "data/users.json")]
    users: PathBuf,

    /// Optional JSON recommender configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movies similar to a given title
    Similar {
        /// Exact movie title
        #[arg(long)]
        title: String,
    },

    /// Recommendations from a user's ratings
    Recommend {
        #[arg(long)]
        user: String,

        /// Maximum number of recommendations
        #[arg(long)]
        limit: Option<usize>,

        /// Show why each movie was recommended
        #[arg(long)]
        explain: bool,
    },

    /// Rate a movie from 1 to 5 stars
    Rate {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,

        /// Exact movie title
        #[arg(long)]
        title: String,

        #[arg(long)]
        stars: u8,
    },

    /// List a user's ratings
    Ratings {
        #[arg(long)]
        user: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,
    },

    /// Check credentials
    Login {
        #[arg(long)]
        user: String,

        #[arg(long)]
        password: String,
    },

    /// Search movies by title (case-insensitive substring match)
    Search {
        #[arg(long)]
        title: String,
    },

    /// Show every field of one movie
    Show {
        /// Exact movie title
        #[arg(long)]
        title: String,
    },

    /// Browse a random selection of movies
    Random {
        #[arg(long, default_value = "12")]
        count: usize,

        /// Seed for a repeatable selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecommenderConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };

    let start = Instant::now();
    let (catalog, users) =
        engine::load_stores(&cli.catalog, &cli.users).context("Failed to load data files")?;
    let movie_count = catalog.len();
    let recommender = Recommender::new(catalog, users.clone(), config)
        .context("Failed to build recommender")?;
    println!(
        "{} Loaded {} movies and {} users in {:?}",
        "✓".green(),
        movie_count,
        users.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Similar { title } => handle_similar(&recommender, &title)?,
        Commands::Recommend {
            user,
            limit,
            explain,
        } => handle_recommend(&recommender, &user, limit, explain)?,
        Commands::Rate {
            user,
            password,
            title,
            stars,
        } => {
            recommender
                .authenticate(&user, &password)
                .context("Login failed")?;
            recommender
                .record_rating(&user, &title, stars)
                .context("Failed to record rating")?;
            save_users(&users, &cli.users)?;
            println!("{} {} rated {} with {} stars", "✓".green(), user, title.bold(), stars);
        }
        Commands::Ratings { user } => handle_ratings(&recommender, &user),
        Commands::Register { user, password } => {
            let id = recommender
                .register(&user, &password)
                .context("Registration failed")?;
            save_users(&users, &cli.users)?;
            println!("{} Registered {} with id {}", "✓".green(), user.bold(), id);
        }
        Commands::Login { user, password } => {
            recommender
                .authenticate(&user, &password)
                .context("Login failed")?;
            println!("{} Welcome back, {}", "✓".green(), user.bold());
        }
        Commands::Search { title } => handle_search(&recommender, &title)?,
        Commands::Show { title } => handle_show(&recommender, &title)?,
        Commands::Random { count, seed } => handle_random(&recommender, count, seed),
    }

    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(recommender: &Recommender, title: &str) -> Result<()> {
    let recommendations = recommender
        .recommend_by_seed(title)
        .with_context(|| format!("No recommendations for '{}'", title))?;

    println!("{}", format!("Because you liked {}:", title).bold().blue());
    print_recommendations(&recommendations, false);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    recommender: &Recommender,
    user: &str,
    limit: Option<usize>,
    explain: bool,
) -> Result<()> {
    let start = Instant::now();
    let recommendations = recommender
        .recommend_by_user(user, limit)
        .with_context(|| format!("No recommendations for user {}", user))?;
    info!("Recommendations computed in {:?}", start.elapsed());

    if recommendations.is_empty() {
        println!(
            "{} Nothing to recommend yet: rate a few movies highly first.",
            "!".yellow()
        );
        return Ok(());
    }

    println!("{}", format!("Recommended for {}:", user).bold().blue());
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'ratings' command
fn handle_ratings(recommender: &Recommender, user: &str) {
    let ratings = recommender.get_ratings(user);
    println!("{}", format!("Ratings by {}:", user).bold().blue());
    if ratings.is_empty() {
        println!("  (none)");
        return;
    }

    for rating in &ratings {
        let stars = "★".repeat(rating.rating.value() as usize);
        println!("  {} {}", stars.yellow(), rating.title);
    }
    let total: u32 = ratings.iter().map(|r| u32::from(r.rating.value())).sum();
    println!(
        "{}Average rating: {:.2} over {} movies",
        "• ".cyan(),
        total as f64 / ratings.len() as f64,
        ratings.len()
    );
}

/// Handle the 'search' command
fn handle_search(recommender: &Recommender, title: &str) -> Result<()> {
    let matches = recommender.search(title).context("Search failed")?;

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for movie in matches.iter().take(20) {
        println!(
            "  {} ({}) {}",
            movie.title,
            format_year(movie.year),
            movie.genre.dimmed()
        );
    }
    if matches.len() > 20 {
        println!("  ... and {} more", matches.len() - 20);
    }
    Ok(())
}

/// Handle the 'show' command
fn handle_show(recommender: &Recommender, title: &str) -> Result<()> {
    let movie = recommender.movie_details(title).context("Lookup failed")?;

    println!("{}", format!("{} ({})", movie.title, format_year(movie.year)).bold().blue());
    println!("{}Director: {}", "• ".green(), movie.director);
    println!("{}Genre: {}", "• ".green(), movie.genre);
    if !movie.poster_url.is_empty() {
        println!("{}Poster: {}", "• ".green(), movie.poster_url);
    }
    println!("\n{}", movie.synopsis);
    Ok(())
}

/// Handle the 'random' command
fn handle_random(recommender: &Recommender, count: usize, seed: Option<u64>) {
    let picked = match seed {
        Some(seed) => recommender.random_movies(count, &mut StdRng::seed_from_u64(seed)),
        None => recommender.random_movies(count, &mut rand::rng()),
    };

    println!("{}", "Browse:".bold().blue());
    for movie in picked {
        println!("  {} ({})", movie.title, format_year(movie.year));
    }
}

fn save_users(users: &UserStore, path: &Path) -> Result<()> {
    users
        .save_to_file(path)
        .with_context(|| format!("Failed to save users to {}", path.display()))
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], explain: bool) {
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            format_year(rec.year),
            rec.score
        );
        if explain {
            println!("   {}", rec.explanation.dimmed());
        }
    }
}
