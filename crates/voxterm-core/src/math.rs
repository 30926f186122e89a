//! Math utilities and helpers.

use glam::{IVec3, Vec3};

/// Ray for raycasting operations.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized, or zero for a degenerate ray)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. A zero direction stays zero instead of becoming NaN.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point along the ray at distance t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns true if the direction has no length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO
    }
}

/// Grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis in a vector.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// One of the six axis-aligned faces of a cell, named by its outward normal.
///
/// The discriminants are the face indices: even indices are the positive
/// normals, odd indices the negative ones.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Face {
    #[default]
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    /// All faces in index order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Directional light multiplier per face, in index order.
    const BRIGHTNESS: [f32; 6] = [0.8, 0.6, 1.0, 0.2, 0.9, 0.7];

    /// Face index in `0..6`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Face for an index, if it is in range.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::PosX),
            1 => Some(Self::NegX),
            2 => Some(Self::PosY),
            3 => Some(Self::NegY),
            4 => Some(Self::PosZ),
            5 => Some(Self::NegZ),
            _ => None,
        }
    }

    /// Face crossed when a ray steps along `axis` in direction `step`.
    ///
    /// Stepping in the negative direction enters the next cell through its
    /// positive face, and vice versa.
    #[inline]
    pub const fn entered_by(axis: Axis, step: i32) -> Self {
        match (axis, step < 0) {
            (Axis::X, true) => Self::PosX,
            (Axis::X, false) => Self::NegX,
            (Axis::Y, true) => Self::PosY,
            (Axis::Y, false) => Self::NegY,
            (Axis::Z, true) => Self::PosZ,
            (Axis::Z, false) => Self::NegZ,
        }
    }

    /// Axis this face is perpendicular to.
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// The two axes spanning the face plane.
    #[inline]
    pub const fn plane_axes(self) -> (Axis, Axis) {
        match self.axis() {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Returns true for the positive-normal faces.
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    /// Outward unit normal.
    #[inline]
    pub fn normal(self) -> Vec3 {
        self.normal_ivec().as_vec3()
    }

    /// Outward unit normal as integer offset.
    #[inline]
    pub const fn normal_ivec(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Directional shading multiplier for this face.
    #[inline]
    pub const fn brightness(self) -> f32 {
        Self::BRIGHTNESS[self.index()]
    }
}

/// Integer cell containing a point (component-wise floor).
#[inline]
pub fn cell_of(point: Vec3) -> IVec3 {
    point.floor().as_ivec3()
}

/// Hermite smoothstep between two edges.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
