use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scroller_core::canvas::{Canvas, Color};
use scroller_engine::{Footprint, Session, TileId, TileType};

/// Columns per generated section.
const CHUNK_WIDTH: usize = 8;
/// Columns at the left edge kept flat so the player lands safely.
const SPAWN_COLUMNS: usize = 6;

const DIRT: Color = Color::rgb(120, 72, 24);
const GRASS: Color = Color::rgb(40, 160, 40);
const STONE: Color = Color::rgb(128, 128, 128);

/// Tile types registered for the demo level.
#[derive(Debug, Clone, Copy)]
pub struct DemoTiles {
    pub ground: TileId,
    pub ledge: TileId,
    pub grass: TileId,
}

/// Counts how often the player was pushed out of a ledge.
pub type ContactCounter = Rc<Cell<u64>>;

/// Register the demo tile types on `session`.
pub fn register_tiles(session: &mut Session, ledge_contacts: &ContactCounter) -> DemoTiles {
    let size = session.environment().tile_size_f32();
    let ground = session.register_tile_type(TileType::solid(move |c: &mut dyn Canvas| {
        c.no_stroke();
        c.fill(DIRT);
        c.rect(0.0, 0.0, size, size);
        c.fill(GRASS);
        c.rect(0.0, 0.0, size, size / 8.0);
    }));

    let counter = Rc::clone(ledge_contacts);
    let ledge = session.register_tile_type(
        TileType::solid(move |c: &mut dyn Canvas| {
            c.stroke(Color::BLACK);
            c.fill(STONE);
            c.rect(0.0, 0.0, size, size / 2.0);
        })
        .with_footprint(Footprint::new(size, size / 2.0))
        .with_collision_callback(move |_, _| counter.set(counter.get() + 1)),
    );

    let grass = session.register_tile_type(TileType::decoration(move |c: &mut dyn Canvas| {
        c.no_stroke();
        c.fill(GRASS);
        c.rect(size / 4.0, size / 2.0, size / 8.0, size / 2.0);
        c.rect(size * 5.0 / 8.0, size * 5.0 / 8.0, size / 8.0, size * 3.0 / 8.0);
    }));

    DemoTiles {
        ground,
        ledge,
        grass,
    }
}

/// Fill the session's grid with a deterministic level for `seed`.
///
/// The bottom row is ground with the occasional pit, raised ledges sit a
/// few rows up and grass tufts decorate the ground above. A one-row world
/// only gets ground and pits.
pub fn generate_level(session: &mut Session, tiles: DemoTiles, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = session.grid().rows();
    let columns = session.grid().columns();
    let floor = rows - 1;

    session.grid_mut().fill_row(floor, 0..columns, Some(tiles.ground));

    let mut base = SPAWN_COLUMNS;
    while base + CHUNK_WIDTH <= columns {
        match rng.random_range(0u8..4) {
            0 => {
                // Pit
                let start = base + rng.random_range(1..4);
                let width = rng.random_range(2..4);
                session.grid_mut().fill_row(floor, start..start + width, None);
            },
            1 if floor >= 1 => {
                // Ledge
                let row = floor.saturating_sub(rng.random_range(3usize..6));
                let start = base + rng.random_range(0..3);
                let len = rng.random_range(3..6);
                session
                    .grid_mut()
                    .fill_row(row, start..start + len, Some(tiles.ledge));
            },
            2 if floor >= 1 => {
                // Step
                let col = base + rng.random_range(2..6);
                session.set_tile(floor - 1, col, Some(tiles.ground));
                session.set_tile(floor - 1, col + 1, Some(tiles.ground));
            },
            _ => {},
        }

        for col in base..base + CHUNK_WIDTH {
            let grounded = session.grid().get(floor, col) == Some(tiles.ground);
            let open = floor >= 1 && session.grid().get(floor - 1, col).is_none();
            if grounded && open && rng.random_bool(0.25) {
                session.set_tile(floor - 1, col, Some(tiles.grass));
            }
        }
        base += CHUNK_WIDTH;
    }

    tracing::debug!(
        seed,
        occupied = session.grid().occupied().count(),
        "Generated demo level"
    );
}
