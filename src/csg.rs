//! Construction contract of the geometry backend.
//!
//! The evaluator never looks inside geometry; it only builds these nodes. Each
//! variant is either a leaf shape, a binary combinator, or a unary wrapper
//! (transform, extrusion, color) around exactly one child.

use std::fmt;

/// A point or direction in 3-D space.
pub type Vec3 = [f64; 3];
/// A point in the plane.
pub type Vec2 = [f64; 2];

/// Binary CSG operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Set union of both operands.
    Union,
    /// Set intersection of both operands.
    Intersection,
    /// Left operand minus right operand.
    Difference,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
        };
        write!(f, "{name}")
    }
}

/// How a `rotate` was specified.
#[derive(Debug, Clone, PartialEq)]
pub enum Rotation {
    /// Rotation about x, then y, then z, in degrees.
    Euler(Vec3),
    /// Rotation by `angle` degrees about `axis`.
    Axis {
        /// Angle in degrees.
        angle: f64,
        /// Rotation axis.
        axis:  Vec3,
    },
}

/// How a `color` was specified.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A named color such as `"red"`, with alpha.
    Named {
        /// Color name as written.
        name:  String,
        /// Opacity in `0..=1`.
        alpha: f64,
    },
    /// Red, green, blue and alpha components in `0..=1`.
    Rgba([f64; 4]),
}

/// One node of the CSG tree handed to the geometry backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Csg {
    /// Binary combination of two subtrees.
    Combine {
        /// The operation.
        op:    Combinator,
        /// Left (for difference: positive) operand.
        left:  Box<Self>,
        /// Right (for difference: subtracted) operand.
        right: Box<Self>,
    },
    /// Sphere centered on the origin.
    Sphere {
        /// Radius.
        r: f64,
    },
    /// Axis-aligned box.
    Cube {
        /// Edge lengths.
        size:   Vec3,
        /// Whether the box is centered on the origin.
        center: bool,
    },
    /// Cone frustum along the z axis.
    Cylinder {
        /// Height.
        h:      f64,
        /// Bottom radius.
        r1:     f64,
        /// Top radius.
        r2:     f64,
        /// Whether the cylinder is centered on z = 0.
        center: bool,
    },
    /// Planar rectangle.
    Square {
        /// Edge lengths.
        size:   Vec2,
        /// Whether the rectangle is centered on the origin.
        center: bool,
    },
    /// Planar disc.
    Circle {
        /// Radius.
        r: f64,
    },
    /// Planar polygon.
    Polygon {
        /// Vertices.
        points: Vec<Vec2>,
        /// Optional vertex index loops; `None` means one loop over all points.
        paths:  Option<Vec<Vec<usize>>>,
    },
    /// Translation of a subtree.
    Translate {
        /// Offset.
        v:     Vec3,
        /// Transformed subtree.
        child: Box<Self>,
    },
    /// Non-uniform scaling of a subtree.
    Scale {
        /// Scale factors.
        v:     Vec3,
        /// Transformed subtree.
        child: Box<Self>,
    },
    /// Rotation of a subtree.
    Rotate {
        /// Rotation specification.
        rotation: Rotation,
        /// Transformed subtree.
        child:    Box<Self>,
    },
    /// Reflection of a subtree through the plane with the given normal.
    Mirror {
        /// Plane normal.
        normal: Vec3,
        /// Transformed subtree.
        child:  Box<Self>,
    },
    /// Arbitrary affine transform of a subtree.
    Multmatrix {
        /// Row-major 4x4 matrix.
        m:     [[f64; 4]; 4],
        /// Transformed subtree.
        child: Box<Self>,
    },
    /// Coloring of a subtree.
    Color {
        /// Color specification.
        paint: Paint,
        /// Colored subtree.
        child: Box<Self>,
    },
    /// Linear extrusion of a planar subtree along z.
    LinearExtrude {
        /// Extrusion height.
        height: f64,
        /// Whether the extrusion is centered on z = 0.
        center: bool,
        /// Twist over the full height, in degrees.
        twist:  f64,
        /// Extruded subtree.
        child:  Box<Self>,
    },
    /// Revolution of a planar subtree about the z axis.
    RotateExtrude {
        /// Revolved subtree.
        child: Box<Self>,
    },
}

impl Csg {
    /// Builds a combinator node over two operands.
    #[must_use]
    pub fn combine(op: Combinator, left: Self, right: Self) -> Self {
        Self::Combine { op,
                        left: Box::new(left),
                        right: Box::new(right) }
    }

    /// Short description of this node without its children.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Combine { op, .. } => op.to_string(),
            Self::Sphere { r } => format!("sphere(r = {r})"),
            Self::Cube { size, center } => {
                format!("cube(size = {}, center = {center})", fmt_vec(size))
            },
            Self::Cylinder { h, r1, r2, center } => {
                format!("cylinder(h = {h}, r1 = {r1}, r2 = {r2}, center = {center})")
            },
            Self::Square { size, center } => {
                format!("square(size = {}, center = {center})", fmt_vec(size))
            },
            Self::Circle { r } => format!("circle(r = {r})"),
            Self::Polygon { points, paths } => match paths {
                Some(paths) => format!("polygon({} points, {} paths)", points.len(), paths.len()),
                None => format!("polygon({} points)", points.len()),
            },
            Self::Translate { v, .. } => format!("translate({})", fmt_vec(v)),
            Self::Scale { v, .. } => format!("scale({})", fmt_vec(v)),
            Self::Rotate { rotation, .. } => match rotation {
                Rotation::Euler(a) => format!("rotate({})", fmt_vec(a)),
                Rotation::Axis { angle, axis } => {
                    format!("rotate(a = {angle}, v = {})", fmt_vec(axis))
                },
            },
            Self::Mirror { normal, .. } => format!("mirror({})", fmt_vec(normal)),
            Self::Multmatrix { m, .. } => {
                let rows = m.iter().map(|row| fmt_vec(row)).collect::<Vec<_>>();
                format!("multmatrix([{}])", rows.join(", "))
            },
            Self::Color { paint, .. } => match paint {
                Paint::Named { name, alpha } => format!("color(\"{name}\", alpha = {alpha})"),
                Paint::Rgba(c) => format!("color({})", fmt_vec(c)),
            },
            Self::LinearExtrude { height,
                                  center,
                                  twist,
                                  .. } => {
                format!("linear_extrude(height = {height}, center = {center}, twist = {twist})")
            },
            Self::RotateExtrude { .. } => "rotate_extrude()".to_string(),
        }
    }

    /// Direct children of this node, left to right.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Combine { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Self::Translate { child, .. }
            | Self::Scale { child, .. }
            | Self::Rotate { child, .. }
            | Self::Mirror { child, .. }
            | Self::Multmatrix { child, .. }
            | Self::Color { child, .. }
            | Self::LinearExtrude { child, .. }
            | Self::RotateExtrude { child } => vec![child.as_ref()],
            Self::Sphere { .. }
            | Self::Cube { .. }
            | Self::Cylinder { .. }
            | Self::Square { .. }
            | Self::Circle { .. }
            | Self::Polygon { .. } => Vec::new(),
        }
    }

    fn stringify(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("    ");
        }
        out.push_str(&self.label());
        out.push('\n');
        for child in self.children() {
            child.stringify(depth + 1, out);
        }
    }
}

fn fmt_vec(v: &[f64]) -> String {
    let parts = v.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", parts.join(", "))
}

/// Prints the tree one node per line, indented four spaces per level.
impl fmt::Display for Csg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.stringify(0, &mut out);
        write!(f, "{}", out.trim_end())
    }
}
