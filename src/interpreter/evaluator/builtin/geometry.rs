use crate::{
    csg::{Combinator, Csg, Paint, Rotation, Vec2, Vec3},
    interpreter::{
        evaluator::{assembly, frame::CallStack},
        value::core::Value,
    },
    util::num::f64_to_index,
};

const IDENTITY: [[f64; 4]; 4] = [[1.0, 0.0, 0.0, 0.0],
                                 [0.0, 1.0, 0.0, 0.0],
                                 [0.0, 0.0, 1.0, 0.0],
                                 [0.0, 0.0, 0.0, 1.0]];

fn arg(stack: &CallStack, name: &str) -> Value {
    stack.lookup(name)
}

fn rejected(module: &str, param: &str, value: &Value) -> Option<Csg> {
    tracing::warn!("{module}: invalid value {value} for '{param}'; no geometry produced.");
    None
}

/// Radius from `r`, or from the diameter `d`.
fn radius(stack: &CallStack, r: &str) -> Value {
    match (arg(stack, r), arg(stack, "d")) {
        (Value::Undefined, Value::Number(d)) => Value::Number(d / 2.0),
        (r, _) => r,
    }
}

/// Unions the children of a unary wrapper.
fn child_of(module: &str, children: Vec<Csg>) -> Option<Box<Csg>> {
    if children.is_empty() {
        tracing::trace!("{module}: no children; no geometry produced.");
    }
    assembly::assemble(children, Combinator::Union).map(Box::new)
}

pub fn union(_: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    assembly::assemble(children, Combinator::Union)
}

pub fn intersection(_: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    assembly::assemble(children, Combinator::Intersection)
}

pub fn difference(_: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    assembly::difference(children)
}

/// `square(size = 1, center = false)`; `size` may be a number or `[x, y]`.
pub fn square(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    let size = match arg(stack, "size") {
        Value::Undefined => [1.0; 2],
        value => match value.as_vec2() {
            Some(size) => size,
            None => return rejected("square", "size", &value),
        },
    };
    Some(Csg::Square { size,
                       center: arg(stack, "center").as_flag(false) })
}

/// `circle(r = 1)` or `circle(d = ...)`.
pub fn circle(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    match radius(stack, "r") {
        Value::Undefined => Some(Csg::Circle { r: 1.0 }),
        Value::Number(r) => Some(Csg::Circle { r }),
        value => rejected("circle", "r", &value),
    }
}

/// `polygon(points, paths)`.
///
/// `points` is a list of `[x, y]` pairs and is required. `paths`, when
/// given, is a list of index lists into `points`.
pub fn polygon(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    let points_value = arg(stack, "points");
    let Some(points) = points_value.as_list()
                                   .and_then(|items| {
                                       items.iter()
                                            .map(|p| p.as_list().and(p.as_vec2()))
                                            .collect::<Option<Vec<Vec2>>>()
                                   })
    else {
        return rejected("polygon", "points", &points_value);
    };

    let paths = match arg(stack, "paths") {
        Value::Undefined => None,
        value => {
            let parsed = value.as_list().and_then(|loops| {
                                            loops.iter()
                                                 .map(|l| {
                                                     l.as_numbers()?
                                                      .into_iter()
                                                      .map(f64_to_index)
                                                      .collect::<Option<Vec<_>>>()
                                                 })
                                                 .collect::<Option<Vec<_>>>()
                                        });
            match parsed {
                Some(paths) => Some(paths),
                None => return rejected("polygon", "paths", &value),
            }
        },
    };

    Some(Csg::Polygon { points, paths })
}

/// `cube(size = 1, center = false)`; `size` may be a number or `[x, y, z]`.
pub fn cube(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    let size = match arg(stack, "size") {
        Value::Undefined => [1.0; 3],
        value => match value.as_vec3(true) {
            Some(size) => size,
            None => return rejected("cube", "size", &value),
        },
    };
    Some(Csg::Cube { size,
                     center: arg(stack, "center").as_flag(false) })
}

/// `cylinder(h = 1, r1, r2, center = false, r, d)`.
///
/// `r1` and `r2` default to `r` (or `d / 2`), which defaults to 1.
pub fn cylinder(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    let number = |name: &str, value: Value, default: f64| match value {
        Value::Undefined => Ok(default),
        Value::Number(n) => Ok(n),
        other => Err(rejected("cylinder", name, &other)),
    };

    let dimensions = number("h", arg(stack, "h"), 1.0).and_then(|h| {
                         let r = number("r", radius(stack, "r"), 1.0)?;
                         let r1 = number("r1", arg(stack, "r1"), r)?;
                         let r2 = number("r2", arg(stack, "r2"), r)?;
                         Ok((h, r1, r2))
                     });
    let (h, r1, r2) = match dimensions {
        Ok(dimensions) => dimensions,
        Err(none) => return none,
    };

    Some(Csg::Cylinder { h,
                         r1,
                         r2,
                         center: arg(stack, "center").as_flag(false) })
}

/// `sphere(r)` or `sphere(d = ...)`. The radius is required.
pub fn sphere(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    match radius(stack, "r") {
        Value::Number(r) => Some(Csg::Sphere { r }),
        value => rejected("sphere", "r", &value),
    }
}

/// Reads a vector parameter of a transform, with a default when unbound.
fn vec3_or(stack: &CallStack, module: &str, name: &str, default: Vec3, broadcast: bool) -> Option<Vec3> {
    match arg(stack, name) {
        Value::Undefined => Some(default),
        value => match value.as_vec3(broadcast) {
            Some(v) => Some(v),
            None => {
                rejected(module, name, &value);
                None
            },
        },
    }
}

pub fn translate(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("translate", children)?;
    let v = vec3_or(stack, "translate", "v", [0.0; 3], false)?;
    Some(Csg::Translate { v, child })
}

/// `scale(v)`; a single number scales uniformly.
pub fn scale(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("scale", children)?;
    let v = vec3_or(stack, "scale", "v", [1.0; 3], true)?;
    Some(Csg::Scale { v, child })
}

/// `rotate(a)` or `rotate(a, v)`.
///
/// A vector `a` gives Euler angles. A number `a` rotates about `v`, or about
/// the z axis when `v` is not given.
pub fn rotate(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("rotate", children)?;
    let rotation = match (arg(stack, "a"), arg(stack, "v")) {
        (Value::Undefined, _) => Rotation::Euler([0.0; 3]),
        (Value::Number(angle), Value::Undefined) => Rotation::Euler([0.0, 0.0, angle]),
        (Value::Number(angle), v) => match v.as_vec3(false) {
            Some(axis) => Rotation::Axis { angle, axis },
            None => return rejected("rotate", "v", &v),
        },
        (a, _) => match a.as_vec3(false) {
            Some(angles) => Rotation::Euler(angles),
            None => return rejected("rotate", "a", &a),
        },
    };
    Some(Csg::Rotate { rotation, child })
}

pub fn mirror(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("mirror", children)?;
    let normal = vec3_or(stack, "mirror", "v", [1.0, 0.0, 0.0], false)?;
    Some(Csg::Mirror { normal, child })
}

/// `multmatrix(m)`.
///
/// `m` is a list of up to four rows of up to four numbers. Missing entries
/// are taken from the identity matrix.
pub fn multmatrix(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("multmatrix", children)?;
    let value = arg(stack, "m");
    let mut m = IDENTITY;
    if !value.is_undefined() {
        let Some(rows) = value.as_list()
                              .and_then(|rows| rows.iter().map(Value::as_numbers).collect::<Option<Vec<_>>>())
                              .filter(|rows| rows.len() <= 4 && rows.iter().all(|r| r.len() <= 4))
        else {
            return rejected("multmatrix", "m", &value);
        };
        for (target, row) in m.iter_mut().zip(rows) {
            target[..row.len()].copy_from_slice(&row);
        }
    }
    Some(Csg::Multmatrix { m, child })
}

/// `color(c, alpha = 1)`.
///
/// `c` is a color name or a list of three or four components. Without `c`
/// the children pass through unchanged.
pub fn color(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("color", children)?;
    let alpha = match arg(stack, "alpha") {
        Value::Undefined => 1.0,
        Value::Number(alpha) => alpha,
        value => return rejected("color", "alpha", &value),
    };

    let paint = match arg(stack, "c") {
        Value::Undefined => return Some(*child),
        Value::Text(name) => Paint::Named { name: name.to_string(),
                                            alpha },
        value => match value.as_numbers().as_deref() {
            Some(&[r, g, b]) => Paint::Rgba([r, g, b, alpha]),
            Some(&[r, g, b, a]) => Paint::Rgba([r, g, b, a]),
            _ => return rejected("color", "c", &value),
        },
    };
    Some(Csg::Color { paint, child })
}

/// `linear_extrude(height, center = false, convexity, twist = 0)`. The
/// height is required.
pub fn linear_extrude(stack: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("linear_extrude", children)?;
    let height = match arg(stack, "height") {
        Value::Number(height) => height,
        value => return rejected("linear_extrude", "height", &value),
    };
    let twist = match arg(stack, "twist") {
        Value::Undefined => 0.0,
        Value::Number(twist) => twist,
        value => return rejected("linear_extrude", "twist", &value),
    };
    Some(Csg::LinearExtrude { height,
                              center: arg(stack, "center").as_flag(false),
                              twist,
                              child })
}

pub fn rotate_extrude(_: &CallStack, children: Vec<Csg>) -> Option<Csg> {
    let child = child_of("rotate_extrude", children)?;
    Some(Csg::RotateExtrude { child })
}

/// `children()` or `children(index)`.
///
/// Re-emits the geometry passed to the user module being instantiated. With
/// no index all of it is unioned; a number selects one child and a list of
/// numbers selects several. Out-of-range indices select nothing.
pub fn children(stack: &CallStack, _: Vec<Csg>) -> Option<Csg> {
    let passed = stack.caller_children();
    let pick = |i: f64| f64_to_index(i).and_then(|i| passed.get(i)).cloned();

    match arg(stack, "index") {
        Value::Undefined => assembly::assemble(passed.to_vec(), Combinator::Union),
        Value::Number(i) => pick(i),
        value => match value.as_numbers() {
            Some(indices) => {
                assembly::assemble(indices.into_iter().filter_map(pick).collect(), Combinator::Union)
            },
            None => rejected("children", "index", &value),
        },
    }
}
