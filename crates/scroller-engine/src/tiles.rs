use scroller_core::canvas::Canvas;

use crate::physics::{Aabb, Player};

/// Draws one tile with its top-left corner at the canvas origin.
pub type DrawFn = Box<dyn Fn(&mut dyn Canvas)>;

/// Invoked each time the player is pushed out of a tile, after the snap.
/// Changes made to the player carry into the rest of the frame.
pub type CollideFn = Box<dyn FnMut(&TileContact, &mut Player)>;

/// How the player interacts with a tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Drawn only; the player passes through.
    None,
    /// Blocks movement on both axes.
    Solid,
}

/// Handle to a registered tile type. Stored in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub(crate) usize);

impl TileId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Collision axis being resolved when a contact fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Details passed to a tile's collision callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileContact {
    pub tile: TileId,
    pub row: usize,
    pub col: usize,
    pub axis: Axis,
}

/// Collision/visual box size of a tile type, in pixels.
///
/// Anchored at the cell's top-left corner; may be smaller or larger than a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub w: f32,
    pub h: f32,
}

impl Footprint {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }

    pub fn square(size: f32) -> Self {
        Self { w: size, h: size }
    }

    /// World-space box for this footprint anchored at `(x, y)`.
    pub fn at(self, x: f32, y: f32) -> Aabb {
        Aabb::new(x, y, self.w, self.h)
    }
}

/// A tile type ready to register. Built with [`TileType::new`] and the
/// `with_*` modifiers.
pub struct TileType {
    pub(crate) collision: CollisionKind,
    pub(crate) draw: DrawFn,
    pub(crate) on_collide: Option<CollideFn>,
    pub(crate) footprint: Option<Footprint>,
}

impl TileType {
    pub fn new(collision: CollisionKind, draw: impl Fn(&mut dyn Canvas) + 'static) -> Self {
        Self {
            collision,
            draw: Box::new(draw),
            on_collide: None,
            footprint: None,
        }
    }

    pub fn solid(draw: impl Fn(&mut dyn Canvas) + 'static) -> Self {
        Self::new(CollisionKind::Solid, draw)
    }

    pub fn decoration(draw: impl Fn(&mut dyn Canvas) + 'static) -> Self {
        Self::new(CollisionKind::None, draw)
    }

    pub fn with_collision_callback(
        mut self,
        f: impl FnMut(&TileContact, &mut Player) + 'static,
    ) -> Self {
        self.on_collide = Some(Box::new(f));
        self
    }

    /// Override the default one-cell footprint.
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = Some(footprint);
        self
    }
}

/// Registered properties of a tile type.
pub struct TileProperties {
    pub collision: CollisionKind,
    pub footprint: Footprint,
    draw: DrawFn,
    on_collide: Option<CollideFn>,
}

impl TileProperties {
    pub fn is_solid(&self) -> bool {
        self.collision == CollisionKind::Solid
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        (self.draw)(canvas);
    }

    pub(crate) fn fire_collision(&mut self, contact: &TileContact, player: &mut Player) {
        if let Some(f) = self.on_collide.as_mut() {
            f(contact, player);
        }
    }
}

impl std::fmt::Debug for TileProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileProperties")
            .field("collision", &self.collision)
            .field("footprint", &self.footprint)
            .field("has_callback", &self.on_collide.is_some())
            .finish()
    }
}

/// Append-only list of tile types. Indices never change once handed out.
#[derive(Debug, Default)]
pub struct TileCatalog {
    entries: Vec<TileProperties>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tile type, resolving an unset footprint to one
    /// `tile_size` square.
    pub fn register(&mut self, tile: TileType, tile_size: f32) -> TileId {
        let id = TileId(self.entries.len());
        self.entries.push(TileProperties {
            collision: tile.collision,
            footprint: tile.footprint.unwrap_or(Footprint::square(tile_size)),
            draw: tile.draw,
            on_collide: tile.on_collide,
        });
        id
    }

    pub fn get(&self, id: TileId) -> Option<&TileProperties> {
        self.entries.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut TileProperties> {
        self.entries.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::config::PlayerTuning;

    #[test]
    fn register_returns_sequential_ids() {
        let mut catalog = TileCatalog::new();
        let a = catalog.register(TileType::solid(|_| {}), 40.0);
        let b = catalog.register(TileType::decoration(|_| {}), 40.0);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(a).unwrap().is_solid());
        assert!(!catalog.get(b).unwrap().is_solid());
    }

    #[test]
    fn footprint_defaults_to_one_tile() {
        let mut catalog = TileCatalog::new();
        let id = catalog.register(TileType::solid(|_| {}), 32.0);
        assert_eq!(catalog.get(id).unwrap().footprint, Footprint::square(32.0));
    }

    #[test]
    fn footprint_override_is_kept() {
        let mut catalog = TileCatalog::new();
        let id = catalog.register(
            TileType::solid(|_| {}).with_footprint(Footprint::new(40.0, 10.0)),
            40.0,
        );
        assert_eq!(catalog.get(id).unwrap().footprint, Footprint::new(40.0, 10.0));
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = TileCatalog::new();
        assert!(catalog.get(TileId(3)).is_none());
    }

    #[test]
    fn callback_receives_contact() {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let mut catalog = TileCatalog::new();
        let id = catalog.register(
            TileType::solid(|_| {}).with_collision_callback(move |contact, player| {
                assert_eq!(contact.axis, Axis::Vertical);
                seen.set(seen.get() + 1);
                player.yv = -900.0;
            }),
            40.0,
        );
        let contact = TileContact {
            tile: id,
            row: 1,
            col: 2,
            axis: Axis::Vertical,
        };
        let mut player = Player::new(40.0, &PlayerTuning::default());
        let props = catalog.get_mut(id).unwrap();
        props.fire_collision(&contact, &mut player);
        props.fire_collision(&contact, &mut player);
        assert_eq!(hits.get(), 2);
        assert_eq!(player.yv, -900.0);
    }

    #[test]
    fn missing_callback_is_a_no_op() {
        let mut catalog = TileCatalog::new();
        let id = catalog.register(TileType::solid(|_| {}), 40.0);
        let mut player = Player::new(40.0, &PlayerTuning::default());
        let before = player.clone();
        catalog.get_mut(id).unwrap().fire_collision(
            &TileContact {
                tile: id,
                row: 0,
                col: 0,
                axis: Axis::Horizontal,
            },
            &mut player,
        );
        assert_eq!(player, before);
    }
}
