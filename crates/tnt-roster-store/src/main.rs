/*
[INPUT]:  CLI arguments, YAML configuration file, saved session
[OUTPUT]: Roster data printed to stdout, session file updates
[POS]:    Binary entry point
[UPDATE]: When changing CLI subcommands, flags, or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use tnt_roster_store::{RosterConfig, Store, StoreState};

#[derive(Parser, Debug)]
#[command(name = "tnt-roster", version, about = "TNT roster client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List your teams
    Teams,
    /// List the factions a team can be founded with
    Factions,
    /// Show one team and its units
    Team { id: i32 },
    /// Show one unit with its derived skill, injury and trait lists
    Unit { id: i32 },
    /// Remember a bearer token for later commands
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the saved session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = load_config(args.config_path.as_deref())?;
    let log_file = args.log_file.clone().or_else(|| config.log_file.clone());
    let _guard = init_tracing(&args.log_level, log_file.as_deref())?;

    info!(base_url = %config.api.base_url, command = ?args.command, "starting tnt-roster");

    let client = config.build_client()?;
    let mut store = Store::new(client);
    if let Some(session) = config.session_store() {
        store = store.with_session(session);
    }

    match &args.command {
        Command::Login { token } => {
            store.login(token.clone(), None).await.context("save session")?;
            println!("token saved");
            return Ok(());
        }
        Command::Logout => {
            store.logout().await.context("clear session")?;
            println!("logged out");
            return Ok(());
        }
        _ => {}
    }

    let logged_in = store
        .restore_session(config.token.clone())
        .await
        .context("restore session")?;
    if !logged_in {
        info!("no token configured; requests are sent unauthenticated");
    }

    match args.command {
        Command::Teams => {
            store.load_teams().await.map_err(|_| error_panel(store.state()))?;
            for team in &store.state().team_list {
                println!(
                    "{:>5}  {:<24} {:<16} money {:>5}  bs {:>5}  units {}",
                    team.id,
                    team.name,
                    team.faction,
                    team.money,
                    team.bs_cost,
                    team.unit_list.len()
                );
            }
        }
        Command::Factions => {
            let factions = store
                .load_factions()
                .await
                .map_err(|_| error_panel(store.state()))?;
            for faction in factions {
                println!("{:>5}  {}", faction.id, faction.name);
            }
        }
        Command::Team { id } => {
            store.select_team(id).await.map_err(|_| error_panel(store.state()))?;
            print_team(store.state());
        }
        Command::Unit { id } => {
            store.select_unit(id).await.map_err(|_| error_panel(store.state()))?;
            print_unit(store.state());
        }
        Command::Login { .. } | Command::Logout => {}
    }

    Ok(())
}

fn init_tracing(log_level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .context("log file path must name a file")?;
            std::fs::create_dir_all(dir).context("create log directory")?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}

fn load_config(path: Option<&Path>) -> Result<RosterConfig> {
    match path {
        Some(path) => RosterConfig::from_file(path).context("load config"),
        None => Ok(RosterConfig::default()),
    }
}

fn error_panel(state: &StoreState) -> anyhow::Error {
    anyhow!(state.error_message.clone())
}

fn print_team(state: &StoreState) {
    let Some(team) = &state.current_team else {
        return;
    };
    println!("{} ({}), money {}, bs cost {}", team.name, team.faction, team.money, team.bs_cost);
    for unit in &team.unit_list {
        println!(
            "{:>5}  {:<20} {:<14} {:<18} xp {}",
            unit.id, unit.name, unit.rank, unit.unit_class, unit.unspent_experience
        );
    }
    if !state.team_inventory_traits.is_empty() {
        println!("traits:");
        for item_trait in &state.team_inventory_traits {
            println!("  {}: {}", item_trait.name, item_trait.effect);
        }
    }
}

fn print_unit(state: &StoreState) {
    let Some(unit) = &state.current_unit else {
        return;
    };
    println!("{} - {} {} ({})", unit.name, unit.rank, unit.unit_class, unit.species);
    println!(
        "W {}  D {}  MET {}  MV {}  RA {}  MA {}  STR {}",
        unit.wounds,
        unit.defense,
        unit.mettle,
        unit.movement,
        unit.ranged,
        unit.melee,
        unit.strength
    );

    println!("skills:");
    for skill in &state.unit_skills_sorted {
        match &skill.added_string {
            Some(source) => println!("  {} [{}]", skill.name, source),
            None => println!("  {}", skill.name),
        }
    }
    println!("injuries:");
    for injury in &state.unit_injuries_sorted {
        let kind = if injury.removable { "removable" } else { "permanent" };
        println!("  {} ({})", injury.name, kind);
    }
    println!("inventory:");
    for item in &unit.inventory {
        let mark = if item.equipped { "*" } else { " " };
        println!("  {} {} ({})", mark, item.name, item.category);
    }
    println!("traits:");
    for item_trait in &state.unit_inventory_traits {
        println!("  {}: {}", item_trait.name, item_trait.effect);
    }
}
