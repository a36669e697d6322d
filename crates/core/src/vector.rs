//! Integer block coordinates.
//!
//! Every position in the block grid (absolute world coordinates, chunk
//! origins, chunk-local offsets, update extents) is a [`Vector3i`]. The
//! one operation that needs care is [`Vector3i::floor_mod`]: chunk alignment
//! has to floor towards negative infinity, otherwise `-1` would land in the
//! chunk at `0` instead of the chunk at `-16`.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Signed integer 3D coordinate.
///
/// Implements `Ord` (x, then y, then z) so it can key a `BTreeMap` with a
/// deterministic iteration order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vector3i {
    /// X component.
    pub x: i32,
    /// Y component (up).
    pub y: i32,
    /// Z component.
    pub z: i32,
}

impl Vector3i {
    /// `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0, 0, 0);
    /// `(1, 1, 1)`.
    pub const ONE: Self = Self::new(1, 1, 1);
    /// `(1, 0, 0)`.
    pub const UNIT_X: Self = Self::new(1, 0, 0);
    /// `(0, 1, 0)`.
    pub const UNIT_Y: Self = Self::new(0, 1, 0);
    /// `(0, 0, 1)`.
    pub const UNIT_Z: Self = Self::new(0, 0, 1);

    /// Construct from components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same value on every axis.
    pub const fn splat(v: i32) -> Self {
        Self::new(v, v, v)
    }

    /// Component-wise remainder that is always in `[0, size.axis)`.
    ///
    /// `self - self.floor_mod(size)` is the origin of the `size`-aligned box
    /// containing `self`, including for negative components.
    pub fn floor_mod(self, size: Vector3i) -> Self {
        debug_assert!(
            size.x > 0 && size.y > 0 && size.z > 0,
            "floor_mod requires a positive size, got {size}"
        );
        Self::new(
            self.x.rem_euclid(size.x),
            self.y.rem_euclid(size.y),
            self.z.rem_euclid(size.z),
        )
    }

    /// Origin of the `size`-aligned box containing `self`.
    pub fn align_down(self, size: Vector3i) -> Self {
        self - self.floor_mod(size)
    }

    /// True if `self` sits exactly on a `size` boundary on every axis.
    pub fn is_aligned_to(self, size: Vector3i) -> bool {
        self.floor_mod(size) == Self::ZERO
    }

    /// True if every component lies in `[0, size.axis)`.
    pub fn within(self, size: Vector3i) -> bool {
        (0..size.x).contains(&self.x)
            && (0..size.y).contains(&self.y)
            && (0..size.z).contains(&self.z)
    }

    /// Number of cells in a box of this extent; zero if any axis is not positive.
    ///
    /// Saturates at `usize::MAX`. Use [`Self::checked_volume`] for untrusted extents.
    pub fn volume(self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// Like [`Self::volume`], but `None` if the cell count does not fit in `usize`.
    pub fn checked_volume(self) -> Option<usize> {
        if self.x <= 0 || self.y <= 0 || self.z <= 0 {
            return Some(0);
        }
        (self.x as usize)
            .checked_mul(self.y as usize)?
            .checked_mul(self.z as usize)
    }

    /// Component-wise addition, `None` on overflow of any axis.
    pub fn checked_add(self, rhs: Vector3i) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(rhs.x)?,
            self.y.checked_add(rhs.y)?,
            self.z.checked_add(rhs.z)?,
        ))
    }

    /// True if any component is negative.
    pub fn any_negative(self) -> bool {
        self.x < 0 || self.y < 0 || self.z < 0
    }

    /// Iterate every offset in `[0, self)`, x outermost and z innermost.
    pub fn iter_box(self) -> impl Iterator<Item = Vector3i> {
        let size = self;
        (0..size.x.max(0)).flat_map(move |x| {
            (0..size.y.max(0))
                .flat_map(move |y| (0..size.z.max(0)).map(move |z| Vector3i::new(x, y, z)))
        })
    }

    /// Components as an array.
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Vector3i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Vector3i {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Vector3i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl AddAssign for Vector3i {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3i {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector3i {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
