//! Battle Sim - Headless encounter runner for rpg_core
//!
//! Creates a character, rolls a full set of gear for it, then drives one
//! survival or dungeon encounter at a fixed timestep and prints the combat
//! log, the run totals and the character's progress.

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rpg_core::{
    BattleMode, CharacterClass, EncounterConfig, EncounterState, Engine, ItemRequest, SlotKey,
    StatName,
};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Simulate an encounter against generated enemies
#[derive(Parser, Debug)]
#[command(name = "battle_sim")]
#[command(about = "Run a headless rpg_core encounter", long_about = None)]
#[command(version)]
struct Args {
    /// Character name
    #[arg(long, default_value = "Hero")]
    name: String,

    /// Character class (warrior, mage, rogue)
    #[arg(long, default_value = "warrior")]
    class: CharacterClass,

    /// Challenge level of the enemies and item level of the gear
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Number of waves; in dungeon mode the last one is the boss
    #[arg(long, default_value_t = 5)]
    waves: u32,

    /// Run a dungeon (defeat ends the run) instead of survival
    #[arg(long)]
    dungeon: bool,

    /// RNG seed for gear and combat
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Game constants TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum simulated seconds
    #[arg(long, default_value_t = 300.0)]
    duration: f64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Print the run totals as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let engine = match &args.config {
        Some(path) => Engine::from_config_file(path)?,
        None => Engine::default(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let now = Utc::now();

    engine.create_character(&args.name, args.class, now)?;
    outfit(&engine, &args, &mut rng)?;

    let config = if args.dungeon {
        EncounterConfig::dungeon(args.level, args.waves)
    } else {
        EncounterConfig::survival(args.level, args.waves)
    };
    let handle = engine.start_encounter_with_rng(&args.name, config, &mut rng)?;

    let dt = if args.dt > 0.0 { args.dt } else { 0.1 };
    let mut elapsed = 0.0;
    while elapsed < args.duration {
        let events = engine.tick_with_rng(&args.name, handle, dt, &mut rng)?;
        elapsed += dt;
        if !args.json {
            for line in &events.log_lines {
                println!("[{:>7.1}s] {}", elapsed, line);
            }
        }
        let lost = events.state == EncounterState::Defeat && config.mode == BattleMode::Dungeon;
        if events.state == EncounterState::Complete || lost {
            break;
        }
    }

    let totals = engine.end_encounter(&args.name, handle)?;
    let hero = engine.character(&args.name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }

    println!();
    println!("=== Run Summary ({:.1}s) ===", elapsed);
    println!("Kills: {}  Defeats: {}", totals.kills, totals.defeats);
    println!(
        "Damage dealt: {}  Damage taken: {}",
        totals.damage_dealt, totals.damage_taken
    );
    println!("Earned: {} XP, {} copper", totals.xp_earned, totals.copper_earned);
    println!();
    println!("=== {} the {} ===", hero.name, hero.class);
    println!(
        "Level {} ({} XP into the level)  Purse: {}",
        hero.level(),
        hero.progression.experience,
        hero.progression.coins
    );
    println!(
        "Dungeon: next level {}, deepest cleared {}",
        hero.progression.dungeon.current_level, hero.progression.dungeon.highest_level
    );
    let stats = hero.total_stats();
    for stat in [
        StatName::Health,
        StatName::Armor,
        StatName::BonusDamage,
        StatName::AttackSpeed,
        StatName::CriticalChance,
        StatName::Block,
        StatName::Dodge,
    ] {
        println!("  {:<16} {}", stat.label(), stats.get(stat));
    }

    engine.logout(&args.name, Utc::now())?;
    Ok(())
}

/// Roll and equip one item per slot. Rejected equips are logged and skipped.
fn outfit(engine: &Engine, args: &Args, rng: &mut ChaCha8Rng) -> Result<(), Box<dyn Error>> {
    for &slot in SlotKey::all() {
        let mut request = ItemRequest::new(slot, args.class).level(args.level);
        if matches!(slot, SlotKey::Primary | SlotKey::Secondary) {
            match args.class.allowed_weapons(slot).first() {
                Some(&weapon) => request = request.weapon(weapon),
                None => continue,
            }
        }

        let item = engine.generate_item_with_rng(&request, rng);
        let name = format!("{} ({})", item.name, item.rarity);
        let index = engine.give_item(&args.name, item)?;
        match engine.equip(&args.name, index) {
            Ok(()) => tracing::info!(slot = %slot, item = %name, "Equipped"),
            Err(e) => tracing::warn!(slot = %slot, item = %name, error = %e, "Could not equip"),
        }
    }
    Ok(())
}
