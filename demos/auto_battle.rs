use clap::Parser;
use log::{error, info};
use warrior_quest::{
    campaign::{Campaign, CampaignState, autopilot},
    combat::{AnimationRegistry, CombatConfig, FrameInput},
};

/// Plays a whole campaign without a window, letting the autopilot click
#[derive(Debug, Parser)]
struct Args {
    /// The index of the character on the selection screen
    #[arg(short, long, default_value_t = 0, env = "WQ_CHARACTER")]
    character: usize,
    /// Seed for every random roll of the campaign
    #[arg(short, long, default_value_t = 42, env = "WQ_SEED")]
    seed: u64,
    /// Gives up on a round, that takes longer than this many frames
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,
    /// A json file overriding the combat timings
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

pub fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).unwrap();
            CombatConfig::from_json(&json).unwrap()
        }
        None => CombatConfig::default(),
    };
    let registry = AnimationRegistry::with_defaults();
    let mut campaign =
        Campaign::with_config(args.character, config, args.seed).unwrap();

    while campaign.state() == CampaignState::InProgress {
        campaign.start_round().unwrap();
        let mut frames = 0;
        loop {
            let input = match campaign.battle() {
                Some(battle) if battle.outcome().is_none() => {
                    if campaign.is_walking_in() {
                        FrameInput::idle()
                    } else {
                        autopilot(battle)
                    }
                }
                _ => break,
            };
            for event in campaign.tick(&input, &registry).unwrap() {
                info!(
                    "[frame {frames:>5}] {} at ({}, {}) after {} frames",
                    event.text, event.x, event.y, event.delay
                );
            }
            frames += 1;
            if frames >= args.max_frames {
                error!("Round did not finish after {frames} frames");
                return;
            }
        }
        let state = campaign.finish_round().unwrap();
        if let Some(player) = campaign.player() {
            info!(
                "Round took {frames} frames. {} has {}/{} hp and {} potions",
                player.name,
                player.hp(),
                player.max_hp(),
                player.potions()
            );
        }
        if state != CampaignState::InProgress {
            info!("Campaign ended: {state:?} in level {}", campaign.level());
        }
    }
}
