//! combat_sim - Headless, seeded battle runner for combat_core
//!
//! Descends a dungeon one floor at a time: every floor spawns a pack of
//! enemies (a boss on every fifth floor), the hero fights until one side
//! falls, and victories roll equipment and a run item.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use combat_core::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Floors between boss encounters
const BOSS_EVERY: u32 = 5;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClassArg {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl From<ClassArg> for CharacterClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Warrior => CharacterClass::Warrior,
            ClassArg::Mage => CharacterClass::Mage,
            ClassArg::Rogue => CharacterClass::Rogue,
            ClassArg::Cleric => CharacterClass::Cleric,
        }
    }
}

/// Simulate a dungeon run from the command line
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(author, version, about = "Seeded turn-based dungeon simulator", long_about = None)]
struct Args {
    /// RNG seed; the same seed replays the same run
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of floors to attempt
    #[arg(short, long, default_value_t = 5)]
    floors: u32,

    /// Hero class
    #[arg(short, long, value_enum, default_value_t = ClassArg::Warrior)]
    class: ClassArg,

    /// Hero level
    #[arg(short = 'l', long, default_value_t = 1)]
    level: u32,

    /// Enemies per regular floor
    #[arg(short, long, default_value_t = 2)]
    enemies: usize,

    /// Revival charges the hero starts with
    #[arg(long, default_value_t = 1)]
    revivals: u32,

    /// Give up on a battle after this many turns
    #[arg(long, default_value_t = 100)]
    max_turns: u32,

    /// Game constants TOML (defaults are built in)
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Ability definitions TOML (defaults are built in)
    #[arg(long)]
    abilities: Option<PathBuf>,

    /// Print every combat event as JSON
    #[arg(long)]
    events: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("combat_sim=info".parse()?))
        .init();

    let args = Args::parse();
    info!(seed = args.seed, floors = args.floors, "combat_sim starting");

    let rules = match &args.constants {
        Some(path) => CombatRules::load(path)
            .with_context(|| format!("loading constants from {}", path.display()))?,
        None => CombatRules::default(),
    };
    let definitions = match &args.abilities {
        Some(path) => load_ability_configs(path)
            .with_context(|| format!("loading abilities from {}", path.display()))?,
        None => default_abilities(),
    };

    let class = CharacterClass::from(args.class);
    let mut hero = CombatantState::hero(class, args.level).with_revivals(args.revivals);
    match definitions.get(class.starting_ability()) {
        Some(definition) => hero = hero.with_ability(AbilityConfiguration::new(definition.clone())?),
        None => warn!(ability = class.starting_ability(), "starting ability not defined"),
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let loot = LootGenerator::with_defaults(rules.constants.loot.clone());
    let run_items = RunItemFactory::with_defaults(rules.constants.loot.clone());
    let mut run = DungeonRun::new();
    let mut total = Reward::default();

    for _ in 0..args.floors {
        let depth = run.descend();
        let is_boss = depth % BOSS_EVERY == 0;
        let count = if is_boss { 1 } else { args.enemies.max(1) };

        let enemies: Vec<CombatantState> = (0..count)
            .map(|i| {
                let definition = EnemyDefinition::generate(depth, hero.level, is_boss, &mut rng);
                let id = format!("{}_{}", definition.name.to_lowercase().replace(' ', "_"), i);
                CombatantState::enemy(definition).with_id(id)
            })
            .collect();
        for enemy in &enemies {
            info!(depth, enemy = %enemy.name, level = enemy.level, hp = enemy.max_hp(), "enemy appears");
        }

        let mut battle = Battle::new(hero, enemies, rules.clone());
        let outcome = fight(&mut battle, args.max_turns, &mut rng)?;

        if args.events {
            println!("{}", battle.events_json()?);
        }

        let reward = battle.rewards();
        total = total + reward;
        info!(depth, ?outcome, turns = battle.turn(), xp = reward.xp, gold = reward.gold, "battle finished");

        hero = battle.hero().clone();

        if outcome != BattleOutcome::Victory {
            break;
        }

        for item in loot.generate_loot(depth, is_boss, &mut rng) {
            info!(item = %item.name, rarity = ?item.rarity, slot = ?item.slot, "loot dropped");
            let slot = item.slot;
            let replace = hero
                .equipped(slot)
                .map_or(true, |current| item.rarity > current.rarity);
            if replace {
                hero.equip(item);
            }
        }
        let found = run_items.generate_run_item(depth, &mut rng);
        info!(item = %found.name, rarity = ?found.rarity, "run item found");
        run.add_item(found, &mut hero);
    }

    let survived = hero.is_alive();
    run.end_run(&mut hero);
    println!(
        "{} reached depth {} ({}) with {} xp and {} gold",
        hero.name,
        run.depth,
        if survived { "alive" } else { "fallen" },
        total.xp,
        total.gold
    );
    Ok(())
}

/// Play turns until the battle ends or the turn limit runs out
fn fight(battle: &mut Battle, max_turns: u32, rng: &mut impl Rng) -> Result<BattleOutcome> {
    while battle.outcome() == BattleOutcome::Ongoing && battle.turn() < max_turns {
        let Some(target) = battle.first_living_enemy() else {
            break;
        };
        let action = pick_action(battle, target);
        debug!(turn = battle.turn(), ?action, "hero action");

        match battle.take_turn(action, rng) {
            Ok(_) => {}
            // Refused abilities still leave the turn to play
            Err(CombatError::CannotAfford { .. }) | Err(CombatError::OnCooldown { .. }) => {
                battle.take_turn(HeroAction::Attack { target }, rng)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(battle.outcome())
}

/// Use the first ready ability, otherwise swing
fn pick_action(battle: &Battle, target: usize) -> HeroAction {
    let hero = battle.hero();
    hero.abilities
        .iter()
        .find(|ability| {
            hero.cooldown(ability.id()) == 0
                && hero.current_resource() >= ability.final_resource_cost()
        })
        .map(|ability| HeroAction::Ability {
            id: ability.id().to_string(),
            target,
        })
        .unwrap_or(HeroAction::Attack { target })
}
