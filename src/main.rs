use std::path::PathBuf;

use spherebox::{SimulationConfig, SphereboxApp};

/// Usage: `spherebox [SNAPSHOT_PATH]`
///
/// When a path is given the parameter table is also written there every frame.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = SimulationConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_snapshot_path(PathBuf::from(path));
    }

    let app = SphereboxApp::new(config)?;
    app.run()
}
