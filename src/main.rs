use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moviecli::{cli, config, tmdb::MovieList, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show top rated movies
    TopRated(ListOptions),

    /// Show popular movies
    Popular(ListOptions),

    /// Show the detail of a movie, cached locally after the first fetch
    Detail(DetailOptions),

    /// Toggle a movie as favorite
    Favorite(FavoriteOptions),

    /// List favorite movies
    Favorites(FavoritesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Page to show (1-based)
    #[clap(long)]
    pub page: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct DetailOptions {
    /// TMDB movie id
    pub id: u32,

    /// Open the movie page in the browser afterwards
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoriteOptions {
    /// TMDB movie id
    pub id: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesOptions {
    /// Only list favorites whose title contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file, using the process environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::TopRated(opt) => cli::movies(MovieList::TopRated, opt.page).await,
        Command::Popular(opt) => cli::movies(MovieList::Popular, opt.page).await,
        Command::Detail(opt) => cli::detail(opt.id, opt.open).await,
        Command::Favorite(opt) => cli::favorite(opt.id).await,
        Command::Favorites(opt) => cli::favorites(opt.search).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
