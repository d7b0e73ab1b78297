//! Cube coordinates and facings for the hexagonal battlefield.
//!
//! Coordinates are stored in cube form `(q, r, s)` with the invariant
//! `q + r + s == 0` enforced at construction. Violating the invariant is a
//! programming error and panics rather than producing a garbage coordinate.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell address on the hex battlefield, in cube coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0, s: 0 };

    /// Builds a coordinate from all three cube components.
    ///
    /// # Panics
    ///
    /// Panics when `q + r + s != 0`.
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        assert!(q + r + s == 0, "cube coordinate components must sum to zero");
        Self { q, r, s }
    }

    /// Builds a coordinate from axial components, deriving `s`.
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    #[inline]
    pub const fn q(self) -> i32 {
        self.q
    }

    #[inline]
    pub const fn r(self) -> i32 {
        self.r
    }

    #[inline]
    pub const fn s(self) -> i32 {
        self.s
    }

    /// Cube distance: the number of steps needed to walk between two cells.
    pub fn distance(self, other: Self) -> u32 {
        let d = self - other;
        d.q.abs().max(d.r.abs()).max(d.s.abs()) as u32
    }

    /// The six cells sharing an edge with this one, in [`Facing`] order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        let mut out = [Self::ORIGIN; 6];
        for (slot, facing) in out.iter_mut().zip(Facing::ALL) {
            *slot = self + facing.vector();
        }
        out
    }

    /// The adjacent cell in the given facing.
    pub fn neighbor(self, facing: Facing) -> HexCoord {
        self + facing.vector()
    }

    /// Every cell within `radius` steps of this one, including itself.
    ///
    /// Enumeration order is fixed (outer `q`, inner `r`), which downstream
    /// search code relies on for reproducible results.
    pub fn ball(self, radius: u32) -> Vec<HexCoord> {
        let r = radius as i32;
        let mut cells = Vec::with_capacity((3 * r * (r + 1) + 1) as usize);
        for dq in -r..=r {
            let lo = (-r).max(-dq - r);
            let hi = r.min(-dq + r);
            for dr in lo..=hi {
                cells.push(self + HexCoord::axial(dq, dr));
            }
        }
        cells
    }

    /// Cells crossed by a straight line from `self` to `other`, inclusive of
    /// both endpoints.
    ///
    /// Uses integer-exact interpolation: each sample point is a rational cube
    /// coordinate rounded to the nearest cell, with the component carrying the
    /// largest rounding error recomputed so the cube invariant holds. Rounding
    /// ties go toward positive infinity, so the traced line is the same on
    /// every platform and every run.
    pub fn line_to(self, other: Self) -> Vec<HexCoord> {
        let steps = self.distance(other);
        if steps == 0 {
            return vec![self];
        }
        let den = steps as i64;
        let (aq, ar) = (self.q as i64, self.r as i64);
        let (bq, br) = (other.q as i64, other.r as i64);
        let mut cells = Vec::with_capacity(steps as usize + 1);
        for i in 0..=den {
            let qn = aq * (den - i) + bq * i;
            let rn = ar * (den - i) + br * i;
            cells.push(round_cube(qn, rn, -(qn + rn), den));
        }
        cells
    }

    /// The facing that best points from `self` toward `target`.
    ///
    /// When two facings are equally good (the target sits on a sector
    /// boundary), the one closer to `bias` wins, so threat classification
    /// resolves boundary cases toward the more frontal sector.
    pub fn facing_toward(self, target: Self, bias: Facing) -> Facing {
        if self == target {
            return bias;
        }
        let mut best = bias;
        let mut best_key = (u32::MAX, u32::MAX);
        for facing in Facing::ALL {
            let key = (
                self.neighbor(facing).distance(target),
                facing.arc_to(bias),
            );
            if key < best_key {
                best_key = key;
                best = facing;
            }
        }
        best
    }
}

impl Add for HexCoord {
    type Output = HexCoord;
    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q + rhs.q,
            r: self.r + rhs.r,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;
    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord {
            q: self.q - rhs.q,
            r: self.r - rhs.r,
            s: self.s - rhs.s,
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// Round `num / den` to the nearest integer, ties toward positive infinity.
fn div_round(num: i64, den: i64) -> i64 {
    (2 * num + den).div_euclid(2 * den)
}

fn round_cube(qn: i64, rn: i64, sn: i64, den: i64) -> HexCoord {
    let q = div_round(qn, den);
    let r = div_round(rn, den);
    let s = div_round(sn, den);
    let dq = (q * den - qn).abs();
    let dr = (r * den - rn).abs();
    let ds = (s * den - sn).abs();
    // Recompute the component with the largest rounding error so q+r+s == 0.
    if dq >= dr && dq >= ds {
        HexCoord::new((-(r + s)) as i32, r as i32, s as i32)
    } else if dr >= ds {
        HexCoord::new(q as i32, (-(q + s)) as i32, s as i32)
    } else {
        HexCoord::new(q as i32, r as i32, (-(q + r)) as i32)
    }
}

/// One of the six edge directions a combatant can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Facing {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl Facing {
    /// All facings in counter-clockwise order starting at east.
    pub const ALL: [Facing; 6] = [
        Facing::East,
        Facing::NorthEast,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::SouthEast,
    ];

    /// Unit direction vector for this facing.
    pub const fn vector(self) -> HexCoord {
        match self {
            Facing::East => HexCoord::new(1, 0, -1),
            Facing::NorthEast => HexCoord::new(1, -1, 0),
            Facing::NorthWest => HexCoord::new(0, -1, 1),
            Facing::West => HexCoord::new(-1, 0, 1),
            Facing::SouthWest => HexCoord::new(-1, 1, 0),
            Facing::SouthEast => HexCoord::new(0, 1, -1),
        }
    }

    #[inline]
    const fn index(self) -> i32 {
        self as i32
    }

    fn from_index(index: i32) -> Facing {
        Facing::ALL[index.rem_euclid(6) as usize]
    }

    /// Rotates counter-clockwise by `steps` (negative rotates clockwise).
    pub fn rotated(self, steps: i32) -> Facing {
        Facing::from_index(self.index() + steps)
    }

    /// The facing pointing the opposite way.
    pub fn opposite(self) -> Facing {
        self.rotated(3)
    }

    /// Smallest number of 60-degree turns between two facings (0..=3).
    pub fn arc_to(self, other: Facing) -> u32 {
        let d = (self.index() - other.index()).rem_euclid(6);
        d.min(6 - d) as u32
    }
}

impl Default for Facing {
    fn default() -> Self {
        Facing::East
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Facing::East => "east",
            Facing::NorthEast => "northeast",
            Facing::NorthWest => "northwest",
            Facing::West => "west",
            Facing::SouthWest => "southwest",
            Facing::SouthEast => "southeast",
        };
        write!(f, "{}", label)
    }
}
