//! Face identities and per-face tables.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// One of the six external faces of the cube.
///
/// Axes follow the dusk-dawn attitude of the reference mission: `+Y` points
/// at the Sun, `+Z` at the Earth (nadir), `+X` along the velocity vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceId {
    PlusY,
    PlusZ,
    MinusY,
    PlusX,
    MinusX,
    MinusZ,
}

impl FaceId {
    /// All faces, in reporting order.
    pub const ALL: [FaceId; 6] = [
        FaceId::PlusY,
        FaceId::PlusZ,
        FaceId::MinusY,
        FaceId::PlusX,
        FaceId::MinusX,
        FaceId::MinusZ,
    ];

    /// Human-readable label, e.g. `+Y (Sun)`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FaceId::PlusY => "+Y (Sun)",
            FaceId::PlusZ => "+Z (Nadir)",
            FaceId::MinusY => "-Y (Anti-Sun)",
            FaceId::PlusX => "+X (Vel)",
            FaceId::MinusX => "-X (Anti-Vel)",
            FaceId::MinusZ => "-Z (Zenith)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What covers a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    /// Body-mounted solar cells.
    SolarArray,
    /// Multilayer insulation blanket.
    Mli,
    /// Radiator coating; the face is partly covered, the rest is MLI.
    Radiator,
}

/// A value for each of the six faces, indexed by [`FaceId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerFace<T>([T; 6]);

impl<T> PerFace<T> {
    /// Builds a table by evaluating `f` for every face.
    pub fn from_fn(mut f: impl FnMut(FaceId) -> T) -> Self {
        Self(FaceId::ALL.map(&mut f))
    }

    /// Iterates over `(face, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &T)> {
        FaceId::ALL.into_iter().map(move |face| (face, &self[face]))
    }

    /// Applies `f` to every value, keeping the face association.
    pub fn map<U>(&self, mut f: impl FnMut(FaceId, &T) -> U) -> PerFace<U> {
        PerFace::from_fn(|face| f(face, &self[face]))
    }
}

impl<T> Index<FaceId> for PerFace<T> {
    type Output = T;

    fn index(&self, face: FaceId) -> &T {
        &self.0[face.index()]
    }
}

impl<T> IndexMut<FaceId> for PerFace<T> {
    fn index_mut(&mut self, face: FaceId) -> &mut T {
        &mut self.0[face.index()]
    }
}
