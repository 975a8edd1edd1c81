use crate::csg::{Combinator, Csg};

/// Combines sibling geometry into a single node.
///
/// No nodes give `None`, one node is returned unchanged, and more nodes are
/// chained right-nested: `[a, b, c]` becomes `op(a, op(b, c))`.
///
/// # Example
/// ```
/// use solidscript::{
///     csg::{Combinator, Csg},
///     interpreter::evaluator::assembly::assemble,
/// };
///
/// let a = Csg::Sphere { r: 1.0 };
/// let b = Csg::Sphere { r: 2.0 };
///
/// assert_eq!(assemble(Vec::new(), Combinator::Union), None);
/// assert_eq!(assemble(vec![a.clone()], Combinator::Union), Some(a.clone()));
/// assert_eq!(assemble(vec![a.clone(), b.clone()], Combinator::Union),
///            Some(Csg::combine(Combinator::Union, a, b)));
/// ```
#[must_use]
pub fn assemble(nodes: Vec<Csg>, op: Combinator) -> Option<Csg> {
    nodes.into_iter()
         .rev()
         .reduce(|right, left| Csg::combine(op, left, right))
}

/// Subtracts every later node from the first.
///
/// The later nodes are unioned first, so `[a, b, c]` becomes
/// `difference(a, union(b, c))`. A single node is returned unchanged.
#[must_use]
pub fn difference(nodes: Vec<Csg>) -> Option<Csg> {
    let mut nodes = nodes.into_iter();
    let first = nodes.next()?;
    match assemble(nodes.collect(), Combinator::Union) {
        Some(rest) => Some(Csg::combine(Combinator::Difference, first, rest)),
        None => Some(first),
    }
}
