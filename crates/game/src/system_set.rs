use bevy::prelude::SystemSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum GameSystemSet {
    Input,
    Movement,
    Weapon,
    Damage,
    DeathManagement,
    EnemyAi,
    Spawning,
    Pickups,
    FrameCounter,
}
