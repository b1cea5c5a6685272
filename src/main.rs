use bevy::prelude::*;

use game::{
    args::BaseArgsPlugin,
    core::{CoreSetupConfig, CoreSetupPlugin},
};

fn main() {
    let core = CoreSetupPlugin(CoreSetupConfig {
        app_name: "Permafrost".into(),
    });

    App::new()
        .add_plugins(BaseArgsPlugin)
        .add_plugins(core.get_default_plugin())
        .add_plugins(core)
        .run();
}
