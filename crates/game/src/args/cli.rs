use clap::Parser;

#[derive(Parser)]
pub struct Opt {
    /// Seed for the game RNG; random runs pass nothing.
    #[clap(short, long)]
    pub seed: Option<u64>,
    /// Jump straight into gameplay.
    #[clap(long)]
    pub skip_cutscene: bool,
    /// First wave to play, for testing later waves directly.
    #[clap(long)]
    pub start_wave: Option<u32>,
    /// Suffix for the log file name instead of a timestamp.
    #[clap(long)]
    pub log_suffix: Option<String>,
}
