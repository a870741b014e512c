#![cfg(feature = "host")]
//! Behavioural tests for `PilotPlugin` inside a headless Bevy app.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

use bevy::prelude::*;
use cursor_pilot::entity::Collider;
use cursor_pilot::plugin::{HostileProjectile, PilotAgent, PilotCommand, PilotInput};
use cursor_pilot::world::TickInput;
use cursor_pilot::Behaviour;
use rspec_runner::run_serial;
use test_utils::app::pilot_app;
use test_utils::rooms::{fighting, open_room};
use test_utils::snapshots::{AGENT_HALF_EXTENT, BULLET_HALF_EXTENT};
use thread_safe_app::SharedApp;

#[derive(Debug, Clone)]
struct HostFixture {
    app: SharedApp,
    agent: Entity,
}

impl HostFixture {
    fn bootstrap(room: bool) -> Self {
        let mut app = pilot_app(open_room(20, 12), room.then(fighting));
        let mut pilot = PilotAgent::new(6.0);
        pilot.in_combat = true;
        pilot.hitbox = Some(Collider::new(Vec2::splat(AGENT_HALF_EXTENT)));
        let agent = app
            .world_mut()
            .spawn((Transform::from_xyz(10.5, 6.5, 0.0), pilot))
            .id();
        app.insert_resource(PilotInput(TickInput::cursor(Vec2::new(10.5, 6.5))));
        Self {
            app: SharedApp::new(app),
            agent,
        }
    }

    fn spawn_bullet(&self, position: Vec2, direction: Vec2) {
        let mut app = self.app.lock();
        app.0.world_mut().spawn((
            Transform::from_translation(position.extend(0.0)),
            HostileProjectile {
                direction,
                speed: 10.0,
                collider: Some(Collider::new(Vec2::splat(BULLET_HALF_EXTENT))),
                active: true,
            },
        ));
    }

    fn command(&self) -> PilotCommand {
        let app = self.app.lock();
        *app.0
            .world()
            .get::<PilotCommand>(self.agent)
            .expect("PilotAgent requires PilotCommand")
    }
}

#[test]
fn incoming_bullet_produces_roll_command() {
    let fixture = HostFixture::bootstrap(true);
    fixture.spawn_bullet(Vec2::new(11.5, 6.5), Vec2::NEG_X);

    run_serial(&rspec::given("an agent facing an incoming bullet", fixture, |ctx| {
        ctx.when("the app updates", |ctx| {
            ctx.before_each(|env| env.app.update());
            ctx.then("the agent's command carries a roll", |env| {
                let command = env.command();
                assert_eq!(command.behaviour, Some(Behaviour::Dodge));
                assert!(command.roll.is_some());
                assert!(command.velocity.is_none());
            });
        });
    }));
}

#[test]
fn toggle_input_disables_every_agent() {
    let fixture = HostFixture::bootstrap(true);
    {
        let mut app = fixture.app.lock();
        app.0.world_mut().resource_mut::<PilotInput>().0.toggle_pressed = true;
    }

    run_serial(&rspec::given("a toggle key press", fixture, |ctx| {
        ctx.when("the app updates", |ctx| {
            ctx.before_each(|env| env.app.update());
            ctx.then("the pilot is disabled and the press consumed", |env| {
                assert_eq!(env.command().behaviour, Some(Behaviour::Disabled));
                let app = env.app.lock();
                assert!(!app.0.world().resource::<PilotInput>().0.toggle_pressed);
            });
        });
    }));
}

#[test]
fn agent_outside_any_room_is_left_alone() {
    let fixture = HostFixture::bootstrap(false);

    run_serial(&rspec::given("no current room", fixture, |ctx| {
        ctx.when("the app updates", |ctx| {
            ctx.before_each(|env| env.app.update());
            ctx.then("no velocity or roll is requested", |env| {
                let command = env.command();
                assert_eq!(command.behaviour, Some(Behaviour::NoRoom));
                assert!(command.velocity.is_none());
                assert!(command.roll.is_none());
            });
        });
    }));
}
