use clap::{ArgAction, Args, Parser, Subcommand};
use pokedex_client::display::{
    display_create_flow, display_detail, display_list, display_quiz_status, display_record,
    display_suggestions, display_team, format_quiz_event, format_record_line,
    format_rejected_type,
};
use pokedex_client::logging::init_tracing;
use pokedex_client::pokedex::{FavoritesStore, SearchRequest, ToggleOutcome};
use pokedex_client::quiz::QuizEvent;
use pokedex_client::records::{Locale, Navigation};
use pokedex_client::team::{self, AddOutcome};
use pokedex_client::{
    load_all_pages, ClientConfig, CreateFlow, DetailScreen, DetailView, Favorites, FormError,
    HttpPokedexClient, JsonFileStore, ListView, PokedexApi, PokedexResult,
    PokemonForm, PokemonType, QuizEngine, Roster, SearchDebouncer, SortKey, SortOrder, StatKind,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info, warn};

const QUIZ_TICK: Duration = Duration::from_millis(100);
const BROWSE_TICK: Duration = Duration::from_millis(50);

type Input = Lines<BufReader<Stdin>>;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse, edit, quiz and build teams over a Pokedex API")]
struct Cli {
    /// RON configuration file (falls back to POKEDEX_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the Pokedex
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Filter by type (up to two, combined with AND)
        #[arg(long = "type")]
        types: Vec<PokemonType>,
        #[arg(long, default_value_t = SortKey::Id)]
        sort: SortKey,
        #[arg(long)]
        desc: bool,
        /// Only favorites found on the page
        #[arg(long)]
        favorites: bool,
    },
    /// Search by name in any language
    Search {
        query: String,
        #[arg(long, default_value_t = SortKey::Id)]
        sort: SortKey,
        #[arg(long)]
        desc: bool,
    },
    Show {
        id: u32,
    },
    Create {
        #[command(flatten)]
        fields: FormArgs,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    Edit {
        id: u32,
        #[command(flatten)]
        fields: FormArgs,
    },
    Delete {
        id: u32,
        #[arg(long)]
        yes: bool,
    },
    /// Add or remove a favorite
    Favorite {
        id: u32,
    },
    /// Play "Who's that Pokemon?"
    Quiz {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Build a team of six with coverage suggestions
    Team {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Interactive list with live search
    Browse,
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    english: Option<String>,
    #[arg(long)]
    french: Option<String>,
    #[arg(long)]
    japanese: Option<String>,
    #[arg(long)]
    chinese: Option<String>,
    /// Replaces the record's types when given
    #[arg(long = "type")]
    types: Vec<PokemonType>,
    #[arg(long, allow_hyphen_values = true)]
    hp: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    attack: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    defense: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    sp_attack: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    sp_defense: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    speed: Option<String>,
    #[arg(long)]
    image: Option<String>,
}

impl FormArgs {
    fn apply(&self, form: &mut PokemonForm) -> Result<(), FormError> {
        let names = [
            (Locale::English, &self.english),
            (Locale::French, &self.french),
            (Locale::Japanese, &self.japanese),
            (Locale::Chinese, &self.chinese),
        ];
        for (locale, value) in names {
            if let Some(value) = value {
                form.set_name(locale, value);
            }
        }

        if !self.types.is_empty() {
            form.clear_types();
            for t in &self.types {
                form.toggle_type(*t)?;
            }
        }

        let stats = [
            (StatKind::Hp, &self.hp),
            (StatKind::Attack, &self.attack),
            (StatKind::Defense, &self.defense),
            (StatKind::SpecialAttack, &self.sp_attack),
            (StatKind::SpecialDefense, &self.sp_defense),
            (StatKind::Speed, &self.speed),
        ];
        for (kind, raw) in stats {
            if let Some(raw) = raw {
                form.set_stat(kind, raw);
            }
        }

        if let Some(image) = &self.image {
            form.set_image(image);
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> PokedexResult<()> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
        config.validate()?;
    }
    info!(api = %config.base_url(), data_dir = %config.data_dir.display(), "configuration loaded");

    let api = HttpPokedexClient::new(&config)?;
    let mut favorites = Favorites::open(JsonFileStore::in_dir(&config.data_dir));

    match cli.command {
        Commands::List {
            page,
            types,
            sort,
            desc,
            favorites: favorites_only,
        } => {
            let mut view = ListView::new();
            view.apply_page(page, api.list_page(page).await?);
            for t in types {
                if view.type_filter().is_selected(t) {
                    println!("Type {} given twice, ignored.", t);
                    continue;
                }
                if view.toggle_type(t) == ToggleOutcome::Rejected {
                    println!("{}", format_rejected_type(&view, t));
                }
                if view.needs_full_dataset() {
                    view.set_full_dataset(load_all_pages(&api).await?);
                }
            }
            view.set_sort_key(sort);
            if desc {
                view.set_sort_order(SortOrder::Desc);
            }
            if favorites_only {
                view.toggle_favorites_only();
            }
            print!("{}", display_list(&view, favorites.ids()));
        }
        Commands::Search { query, sort, desc } => {
            let mut view = ListView::new();
            view.set_query(&query);
            view.show_search_results(api.search(&query).await?);
            view.set_sort_key(sort);
            if desc {
                view.set_sort_order(SortOrder::Desc);
            }
            print!("{}", display_list(&view, favorites.ids()));
        }
        Commands::Show { id } => match DetailScreen::open(&api, id).await {
            DetailScreen::Loaded(view) => print!("{}", display_detail(&view)),
            DetailScreen::Failed { id, message } => {
                println!("Pokemon #{} could not be loaded: {}", id, message);
            }
        },
        Commands::Create { fields, yes } => run_create(&api, &fields, yes).await?,
        Commands::Edit { id, fields } => run_edit(&api, id, &fields).await?,
        Commands::Delete { id, yes } => run_delete(&api, id, yes).await?,
        Commands::Favorite { id } => {
            if favorites.toggle(id)? {
                println!("❤️ #{} added to favorites ({} total)", id, favorites.len());
            } else {
                println!("#{} removed from favorites ({} total)", id, favorites.len());
            }
        }
        Commands::Quiz { seed } => run_quiz(&api, seed).await?,
        Commands::Team { seed } => run_team(&api, seed).await?,
        Commands::Browse => run_browse(&api, &mut favorites, config.search_debounce()).await?,
    }
    Ok(())
}

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

async fn confirm(input: &mut Input, question: &str) -> PokedexResult<bool> {
    println!("{} [y/N]", question);
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

async fn run_create<A: PokedexApi>(api: &A, fields: &FormArgs, yes: bool) -> PokedexResult<()> {
    let mut flow = CreateFlow::new();
    fields.apply(flow.form_mut())?;
    flow.request_submit()?;
    print!("{}", display_create_flow(&flow));

    if !yes && !confirm(&mut stdin_lines(), "Create it?").await? {
        flow.cancel();
        println!("Cancelled.");
        return Ok(());
    }
    flow.confirm(api).await?;
    print!("{}", display_create_flow(&flow));
    Ok(())
}

async fn run_edit<A: PokedexApi>(api: &A, id: u32, fields: &FormArgs) -> PokedexResult<()> {
    let mut view = DetailView::new(api.get(id).await?);
    view.begin_edit();
    if let Some(draft) = view.draft_mut() {
        fields.apply(draft)?;
    }
    view.save(api).await?;
    print!("{}", display_detail(&view));
    Ok(())
}

async fn run_delete<A: PokedexApi>(api: &A, id: u32, yes: bool) -> PokedexResult<()> {
    let mut view = DetailView::new(api.get(id).await?);
    view.request_delete();
    print!("{}", display_detail(&view));

    if !yes && !confirm(&mut stdin_lines(), "Delete it?").await? {
        view.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }
    if view.confirm_delete(api).await? == Navigation::ToList {
        println!("{}", view.message().unwrap_or("Deleted."));
    }
    Ok(())
}

fn print_quiz_events(events: &[QuizEvent]) {
    for event in events {
        if let Some(text) = format_quiz_event(event) {
            println!("{}", text);
        }
    }
}

async fn run_quiz<A: PokedexApi>(api: &A, seed: Option<u64>) -> PokedexResult<()> {
    let records = load_all_pages(api).await?;
    let mut rng = rng_from(seed);
    let mut engine = QuizEngine::new(records);

    println!("Type a name in any language, 'reset' to start over, 'quit' to stop.");
    print_quiz_events(&engine.start(&mut rng));
    print!("{}", display_quiz_status(&engine));

    let mut input = stdin_lines();
    let mut ticker = tokio::time::interval(QUIZ_TICK);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                let events = match line.trim() {
                    "quit" | "q" => break,
                    "reset" => engine.reset(&mut rng),
                    "" => {
                        print!("{}", display_quiz_status(&engine));
                        continue;
                    }
                    guess => engine.submit_guess(guess),
                };
                print_quiz_events(&events);
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let events = engine.advance(now - last_tick, &mut rng);
                last_tick = now;
                print_quiz_events(&events);
                if events.iter().any(|e| matches!(e, QuizEvent::QuestionPresented { .. })) {
                    print!("{}", display_quiz_status(&engine));
                }
            }
        }
    }

    println!(
        "Final score: {} over {} questions",
        engine.score(),
        engine.questions_answered()
    );
    Ok(())
}

async fn run_team<A: PokedexApi>(api: &A, seed: Option<u64>) -> PokedexResult<()> {
    let pool = load_all_pages(api).await?;
    let mut rng = rng_from(seed);
    let mut roster = Roster::new();

    println!("Commands: add <id>, rm <id>, clear, find <name>, suggest, show, quit");
    print!("{}", display_team(&roster));

    let mut input = stdin_lines();
    while let Some(line) = input.next_line().await? {
        let (command, arg) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        match command {
            "quit" | "q" => break,
            "add" => match arg.trim().parse::<u32>().ok().and_then(|id| pool.iter().find(|r| r.id == id)) {
                Some(record) => match roster.add(record.clone()) {
                    AddOutcome::Added => print!("{}", display_team(&roster)),
                    AddOutcome::TeamFull => println!("The team already has {} members.", team::MAX_TEAM_SIZE),
                    AddOutcome::AlreadyInTeam => println!("{} is already in the team.", record.name.english),
                },
                None => println!("No Pokemon with id '{}'.", arg.trim()),
            },
            "rm" => match arg.trim().parse::<u32>().ok().and_then(|id| roster.remove(id)) {
                Some(removed) => {
                    println!("{} left the team.", removed.name.english);
                    print!("{}", display_team(&roster));
                }
                None => println!("Not in the team: '{}'.", arg.trim()),
            },
            "clear" => {
                roster.clear();
                print!("{}", display_team(&roster));
            }
            "find" => {
                for record in team::search(&roster, &pool, arg) {
                    println!("{}", format_record_line(record, false));
                }
            }
            "suggest" => print!("{}", display_suggestions(&team::suggest(&roster, &pool, &mut rng))),
            "show" | "" => print!("{}", display_team(&roster)),
            other => println!("Unknown command '{}'.", other),
        }
    }
    Ok(())
}

/// Re-fetch the current page. Failures keep what is on screen.
async fn reload_page<A: PokedexApi>(api: &A, view: &mut ListView) {
    let page = view.current_page();
    match api.list_page(page).await {
        Ok(envelope) => view.apply_page(page, envelope),
        Err(err) => warn!(page, error = %err, "could not load page"),
    }
}

async fn ensure_full_dataset<A: PokedexApi>(api: &A, view: &mut ListView) {
    if view.needs_full_dataset() {
        match load_all_pages(api).await {
            Ok(records) => view.set_full_dataset(records),
            Err(err) => warn!(error = %err, "could not load the full dataset"),
        }
    }
}

async fn run_browse<A: PokedexApi, S: FavoritesStore>(
    api: &A,
    favorites: &mut Favorites<S>,
    debounce: Duration,
) -> PokedexResult<()> {
    let mut view = ListView::new();
    let mut debouncer = SearchDebouncer::new(debounce);
    reload_page(api, &mut view).await;

    println!("Commands: /<text> search, type <name>, sort <key>, order, next, prev, fav <id>, favs, open <id>, clear, quit");
    print!("{}", display_list(&view, favorites.ids()));

    let mut input = stdin_lines();
    let mut ticker = tokio::time::interval(BROWSE_TICK);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if let Some(text) = line.strip_prefix('/') {
                    view.set_query(text);
                    debouncer.on_input(text);
                    continue;
                }
                let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
                match command {
                    "quit" | "q" => break,
                    "type" => match arg.trim().parse::<PokemonType>() {
                        Ok(t) => {
                            if view.toggle_type(t) == ToggleOutcome::Rejected {
                                println!("{}", format_rejected_type(&view, t));
                                continue;
                            }
                            ensure_full_dataset(api, &mut view).await;
                            if !view.type_filter().is_active() {
                                reload_page(api, &mut view).await;
                            }
                        }
                        Err(_) => println!("Unknown type '{}'.", arg.trim()),
                    },
                    "sort" => match arg.trim().parse::<SortKey>() {
                        Ok(key) => view.set_sort_key(key),
                        Err(message) => println!("{}", message),
                    },
                    "order" => view.flip_sort_order(),
                    "next" | "n" => {
                        if view.pagination_visible() && view.next_page() {
                            reload_page(api, &mut view).await;
                        }
                    }
                    "prev" | "p" => {
                        if view.pagination_visible() && view.previous_page() {
                            reload_page(api, &mut view).await;
                        }
                    }
                    "fav" => match arg.trim().parse::<u32>() {
                        Ok(id) => {
                            if let Err(err) = favorites.toggle(id) {
                                warn!(id, error = %err, "could not save favorites");
                            }
                        }
                        Err(_) => println!("Usage: fav <id>"),
                    },
                    "favs" => view.toggle_favorites_only(),
                    "open" => {
                        if let Ok(id) = arg.trim().parse::<u32>() {
                            match DetailScreen::open(api, id).await {
                                DetailScreen::Loaded(detail) => print!("{}", display_record(detail.record())),
                                DetailScreen::Failed { message, .. } => println!("{}", message),
                            }
                        }
                        continue;
                    }
                    "clear" => {
                        view.clear_filters();
                        debouncer.cancel();
                        reload_page(api, &mut view).await;
                    }
                    _ => {}
                }
                print!("{}", display_list(&view, favorites.ids()));
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let request = debouncer.advance(now - last_tick);
                last_tick = now;
                match request {
                    Some(SearchRequest::Query(query)) => {
                        let results = api.search(&query).await.unwrap_or_else(|err| {
                            warn!(%query, error = %err, "search failed");
                            Vec::new()
                        });
                        view.show_search_results(results);
                    }
                    Some(SearchRequest::Clear) => {
                        view.clear_search();
                        reload_page(api, &mut view).await;
                    }
                    None => continue,
                }
                print!("{}", display_list(&view, favorites.ids()));
            }
        }
    }
    Ok(())
}
