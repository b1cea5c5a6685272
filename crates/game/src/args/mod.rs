use bevy::prelude::*;

use utils::rng::GameRng;

mod cli;

/// Launch-time options shared with the rest of the game.
#[derive(Resource, Debug, Clone)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub skip_cutscene: bool,
    pub start_wave: u32,
}

pub struct BaseArgsPlugin;

impl Plugin for BaseArgsPlugin {
    fn build(&self, app: &mut App) {
        use clap::Parser;
        let args = cli::Opt::parse();

        app.add_plugins(utils::logs::NativeLogPlugin(args.log_suffix.clone()));

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        app.insert_resource(GameRng::from_seed(seed));
        app.insert_resource(LaunchOptions {
            seed: args.seed,
            skip_cutscene: args.skip_cutscene,
            start_wave: args.start_wave.unwrap_or(1),
        });
    }
}
