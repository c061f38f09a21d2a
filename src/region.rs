use crate::Pos2;

/// Rectangular span of cells, inclusive of the top-left corner and
/// exclusive of the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    tl: Pos2,
    br: Pos2,
}
impl Region {
    pub fn new(top_left: Pos2, bottom_right: Pos2) -> Self {
        Self {
            tl: top_left,
            br: bottom_right,
        }
    }

    /// Region spanning `0..width` by `0..height`.
    pub fn of_size(width: i32, height: i32) -> Self {
        Self::new(
            Pos2::zero(),
            Pos2 {
                x: width,
                y: height,
            },
        )
    }

    #[inline]
    pub fn top_left(&self) -> Pos2 {
        self.tl
    }
    #[inline]
    pub fn width(&self) -> i32 {
        (self.br.x - self.tl.x).max(0)
    }
    #[inline]
    pub fn height(&self) -> i32 {
        (self.br.y - self.tl.y).max(0)
    }

    #[inline]
    pub fn contains(&self, pos: Pos2) -> bool {
        (self.tl.x..self.br.x).contains(&pos.x) && (self.tl.y..self.br.y).contains(&pos.y)
    }

    /// Row-major scan over every cell in the region.
    pub fn cells(&self) -> impl Iterator<Item = Pos2> {
        let Self { tl, br } = *self;
        (tl.y..br.y).flat_map(move |y| (tl.x..br.x).map(move |x| Pos2 { x, y }))
    }
}
