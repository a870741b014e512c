//! Headless Bevy app with the pilot plugin installed.

use bevy::prelude::*;
use cursor_pilot::grid::CellGrid;
use cursor_pilot::plugin::{PilotPlugin, RoomCells};
use cursor_pilot::world::RoomSnapshot;

/// Create an app with `MinimalPlugins`, [`PilotPlugin`] and the given room.
///
/// # Examples
/// ```
/// use cursor_pilot::plugin::RoomCells;
/// use test_utils::app::pilot_app;
/// use test_utils::rooms::{cleared, open_room};
/// let app = pilot_app(open_room(3, 3), Some(cleared()));
/// assert!(app.world().resource::<RoomCells>().current.is_some());
/// ```
pub fn pilot_app(grid: CellGrid, room: Option<RoomSnapshot>) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(PilotPlugin);
    app.insert_resource(RoomCells {
        grid,
        current: room,
    });
    app
}
