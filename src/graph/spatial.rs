use crate::geometry::{Point, Rect};

/// The minimal capability a graph payload must expose: a top-left position
/// and a size. `bounds` and `center` are derived from those two.
///
/// Position is mutated directly through [`Spatial::set_pos`]; the graph's
/// `move_node` goes through it.
pub trait Spatial {
    fn pos(&self) -> Point;
    fn size(&self) -> Point;
    fn set_pos(&mut self, pos: Point);

    /// The bounding rectangle (`pos` inclusive, `pos + size` exclusive).
    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos(), self.size())
    }

    fn center(&self) -> Point {
        let p = self.pos();
        let s = self.size();
        Point::new(p.x + s.x / 2, p.y + s.y / 2)
    }
}
