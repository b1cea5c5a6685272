use bevy::prelude::*;

use game::character::enemy::{Boss, Enemy};
use game::character::health::{
    apply_accumulated_damage, apply_death, collect_damage, BossDefeatedEvent, DamageEvent,
    EnemyDiedEvent, Health, KnockbackImpulseConfig, PlayerDiedEvent,
};
use game::character::movement::Velocity;
use game::character::player::Player;

fn combat_app() -> App {
    let mut app = App::new();
    app.init_resource::<KnockbackImpulseConfig>();
    app.add_event::<DamageEvent>();
    app.add_event::<EnemyDiedEvent>();
    app.add_event::<PlayerDiedEvent>();
    app.add_event::<BossDefeatedEvent>();
    app.add_systems(
        Update,
        (collect_damage, apply_accumulated_damage, apply_death).chain(),
    );
    app
}

fn send_damage(app: &mut App, target: Entity, amount: i32) {
    app.world_mut()
        .resource_mut::<Events<DamageEvent>>()
        .send(DamageEvent {
            target,
            amount,
            from: Vec2::new(-10.0, 0.0),
        });
}

#[test]
fn damage_reduces_health() {
    let mut app = combat_app();
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            Health::new(10),
            Velocity::default(),
            Transform::default(),
        ))
        .id();

    send_damage(&mut app, enemy, 3);
    app.update();

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 7);
}

#[test]
fn same_frame_hits_accumulate() {
    let mut app = combat_app();
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            Health::new(10),
            Velocity::default(),
            Transform::default(),
        ))
        .id();

    send_damage(&mut app, enemy, 3);
    send_damage(&mut app, enemy, 4);
    app.update();

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 3);
}

#[test]
fn lethal_damage_despawns_and_reports() {
    let mut app = combat_app();
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            Health::new(5),
            Velocity::default(),
            Transform::from_xyz(30.0, 0.0, 0.0),
        ))
        .id();

    send_damage(&mut app, enemy, 5);
    app.update();
    // Death marker lands via commands, the despawn happens next frame.
    app.update();

    assert!(app.world().get_entity(enemy).is_err());
    let events: Vec<EnemyDiedEvent> = app
        .world_mut()
        .resource_mut::<Events<EnemyDiedEvent>>()
        .drain()
        .collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].position, Vec2::new(30.0, 0.0));
}

#[test]
fn player_death_raises_its_own_event() {
    let mut app = combat_app();
    let player = app
        .world_mut()
        .spawn((
            Player,
            Health::new(5),
            Velocity::default(),
            Transform::default(),
        ))
        .id();

    send_damage(&mut app, player, 99);
    app.update();
    app.update();

    assert!(app.world().get_entity(player).is_err());
    let events: Vec<PlayerDiedEvent> = app
        .world_mut()
        .resource_mut::<Events<PlayerDiedEvent>>()
        .drain()
        .collect();
    assert_eq!(events.len(), 1);
}

#[test]
fn boss_death_reports_defeat_on_top_of_the_kill() {
    let mut app = combat_app();
    let boss = app
        .world_mut()
        .spawn((
            Enemy,
            Boss,
            Health::new(20),
            Velocity::default(),
            Transform::default(),
        ))
        .id();

    // Whittling it down does not end anything early.
    send_damage(&mut app, boss, 19);
    app.update();
    assert!(app
        .world_mut()
        .resource_mut::<Events<BossDefeatedEvent>>()
        .drain()
        .next()
        .is_none());

    send_damage(&mut app, boss, 1);
    app.update();
    app.update();

    assert!(app.world().get_entity(boss).is_err());
    let defeats: Vec<BossDefeatedEvent> = app
        .world_mut()
        .resource_mut::<Events<BossDefeatedEvent>>()
        .drain()
        .collect();
    assert_eq!(defeats.len(), 1);
    // The regular enemy kill report still fires alongside it.
    let kills: Vec<EnemyDiedEvent> = app
        .world_mut()
        .resource_mut::<Events<EnemyDiedEvent>>()
        .drain()
        .collect();
    assert_eq!(kills.len(), 1);
}

#[test]
fn standing_target_is_knocked_away_from_the_hit() {
    let mut app = combat_app();
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            Health::new(50),
            Velocity::default(),
            Transform::from_xyz(10.0, 0.0, 0.0),
        ))
        .id();

    send_damage(&mut app, enemy, 1);
    app.update();

    let velocity = app.world().get::<Velocity>(enemy).unwrap();
    // The hit came from the left, so the push points right and up.
    assert!(velocity.knockback.x > 0.0);
    assert!(velocity.knockback.y > 0.0);
}
