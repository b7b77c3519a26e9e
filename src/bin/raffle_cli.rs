// src/bin/raffle_cli.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use raffle_engine::config::RaffleConfig;
use raffle_engine::domain::participant::Participant;
use raffle_engine::engine::{approx_group_count, generate_groups, DrawController, DrawEngine};
use raffle_engine::infra::{export_groups_to_file, groups_to_csv_string, IdGenerator, RngStream, SessionRng};
use raffle_engine::ingest::{find_duplicates, load_roster_file, parse_roster, remove_duplicates, sample_roster};
use raffle_engine::naming::{enrich_groups, StaticNameEnricher};

#[derive(Parser, Debug)]
#[command(name = "raffle_cli", version, about = "Розыгрыш призов и распределение по командам")]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// JSON-конфиг сессии (поля, которых нет, берутся по умолчанию).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed для воспроизводимой сессии.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Файл со списком (.csv — первая колонка, иначе одно имя на строку).
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Имена прямо в аргументе, через перевод строки или `;`.
    #[arg(long, global = true)]
    names: Option<String>,

    /// Взять демонстрационный список.
    #[arg(long, global = true)]
    sample: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Разыграть N призов.
    Draw {
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Разрешить повторные победы.
        #[arg(long)]
        allow_repeats: bool,
        /// Сколько крутить барабан перед остановкой, мс.
        #[arg(long, default_value_t = 500)]
        spin_ms: u64,
    },
    /// Разбить участников на команды.
    Groups {
        /// Размер команды (по умолчанию из конфига).
        #[arg(long)]
        size: Option<usize>,
        /// Куда сохранить CSV (иначе печать в stdout).
        #[arg(long)]
        csv: Option<PathBuf>,
        /// JSON с именами команд: {"group-0": "..."}.
        #[arg(long)]
        team_names: Option<PathBuf>,
    },
    /// Показать дубли по имени.
    Dupes {
        /// Вывести список без дублей.
        #[arg(long)]
        fix: bool,
    },
}

fn load_config(cli: &Cli) -> Result<RaffleConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RaffleConfig::load(path)
            .with_context(|| format!("не удалось загрузить конфиг {}", path.display()))?,
        None => RaffleConfig::standard(),
    };
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    Ok(cfg)
}

fn load_roster(source: &SourceArgs, ids: &IdGenerator) -> Result<Vec<Participant>> {
    let mut roster = Vec::new();
    if let Some(path) = &source.input {
        let loaded = load_roster_file(path, ids)
            .with_context(|| format!("не удалось прочитать {}", path.display()))?;
        roster.extend(loaded);
    }
    if let Some(names) = &source.names {
        roster.extend(parse_roster(&names.replace(';', "\n"), ids));
    }
    if source.sample {
        roster.extend(sample_roster(ids));
    }
    if roster.is_empty() {
        bail!("список участников пуст: укажите --input, --names или --sample");
    }
    Ok(roster)
}

async fn run_draw(
    cfg: &RaffleConfig,
    roster: Vec<Participant>,
    count: usize,
    allow_repeats: bool,
    spin_ms: u64,
) -> Result<()> {
    let engine = DrawEngine::new(cfg.placeholder.clone(), cfg.allow_repeats || allow_repeats);
    let mut controller = DrawController::new(
        engine,
        roster,
        SessionRng::for_stream(cfg.seed, RngStream::Draw),
        cfg.tick_interval(),
    );

    for n in 1..=count {
        if let Err(err) = controller.start_draw() {
            warn!(error = %err, "draw not started");
            println!("Розыгрыш #{}: {}", n, err);
            break;
        }

        tokio::time::sleep(Duration::from_millis(spin_ms)).await;
        println!("  барабан: {}", controller.display());

        if let Some(winner) = controller.stop_draw()? {
            println!(
                "Розыгрыш #{}: {} ({})",
                n,
                winner.participant.name,
                winner.timestamp.format("%H:%M:%S")
            );
        }
    }

    let snapshot = controller.snapshot();
    println!();
    println!("История (от новых к старым):");
    for (i, record) in snapshot.history.iter().enumerate() {
        println!("  #{} {}", snapshot.history.len() - i, record.participant.name);
    }
    println!("Осталось в пуле: {}", snapshot.pool_size);
    Ok(())
}

async fn run_groups(
    cfg: &RaffleConfig,
    roster: Vec<Participant>,
    size: Option<usize>,
    csv: Option<PathBuf>,
    team_names: Option<PathBuf>,
) -> Result<()> {
    let group_size = size.unwrap_or(cfg.default_group_size);
    let mut rng = SessionRng::for_stream(cfg.seed, RngStream::Partition);

    println!(
        "Всего: {} участников, примерно {} групп по {}",
        roster.len(),
        approx_group_count(roster.len(), group_size),
        group_size
    );

    let mut groups = generate_groups(&roster, group_size, &mut rng)?;

    if let Some(path) = team_names {
        match StaticNameEnricher::from_file(&path) {
            Ok(enricher) => {
                // Ошибка имён не фатальна: группы остаются с именами по умолчанию.
                let _ = enrich_groups(&mut groups, &enricher).await;
            }
            Err(err) => warn!(error = %err, "team names file ignored"),
        }
    }

    for group in &groups {
        println!("{} ({})", group.name, group.len());
        for member in &group.members {
            println!("  - {}", member.name);
        }
    }

    match csv {
        Some(path) => {
            export_groups_to_file(&groups, &path)?;
            info!(path = %path.display(), "groups exported");
        }
        None => {
            println!();
            print!("{}", groups_to_csv_string(&groups)?);
        }
    }
    Ok(())
}

fn run_dupes(roster: Vec<Participant>, fix: bool) {
    let duplicates = find_duplicates(&roster);
    if duplicates.is_empty() {
        println!("Дублей нет ({} участников).", roster.len());
        return;
    }

    println!("Найдены дубли:");
    for p in roster.iter().filter(|p| duplicates.contains(&p.id)) {
        println!("  {} [{}]", p.name, p.id);
    }

    if fix {
        let unique = remove_duplicates(roster);
        println!();
        println!("Список без дублей ({}):", unique.len());
        for p in &unique {
            println!("  {}", p.name);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let ids = IdGenerator::new();
    let roster = load_roster(&cli.source, &ids)?;

    match cli.command {
        Commands::Draw {
            count,
            allow_repeats,
            spin_ms,
        } => run_draw(&cfg, roster, count, allow_repeats, spin_ms).await?,
        Commands::Groups {
            size,
            csv,
            team_names,
        } => run_groups(&cfg, roster, size, csv, team_names).await?,
        Commands::Dupes { fix } => run_dupes(roster, fix),
    }
    Ok(())
}
