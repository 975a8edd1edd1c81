use crate::{
    csg::Csg,
    error::RuntimeError,
    interpreter::evaluator::{builtin::geometry, core::EvalResult, frame::CallStack},
};

/// Type alias for builtin module handlers.
///
/// A handler reads its parameters from the top call frame of the stack and
/// receives the geometry of its child body. It returns the geometry it
/// builds, or `None` when it builds nothing.
type BuiltinModuleFn = fn(&CallStack, Vec<Csg>) -> Option<Csg>;

/// Defines builtin modules by generating a lookup table and the catalog of
/// names with their parameter profiles.
///
/// The macro produces:
/// - `ModuleDef` (internal metadata),
/// - `MODULE_TABLE` (static table for lookup),
/// - `BUILTIN_MODULES` (public list of names and parameter names).
macro_rules! builtin_modules {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct ModuleDef {
            name:   &'static str,
            params: &'static [&'static str],
            func:   BuiltinModuleFn,
        }
        static MODULE_TABLE: &[ModuleDef] = &[
            $(
                ModuleDef { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
        /// Built-in modules with their positional parameter names, entered
        /// into the prelude scope.
        pub const BUILTIN_MODULES: &[(&str, &[&str])] = &[
            $(($name, &[$($param),*]),)*
        ];
    };
}

builtin_modules! {
    "union"          => { params: [], func: geometry::union },
    "intersection"   => { params: [], func: geometry::intersection },
    "difference"     => { params: [], func: geometry::difference },
    "square"         => { params: ["size", "center"], func: geometry::square },
    "circle"         => { params: ["r", "d"], func: geometry::circle },
    "polygon"        => { params: ["points", "paths", "convexity"], func: geometry::polygon },
    "cube"           => { params: ["size", "center"], func: geometry::cube },
    "cylinder"       => { params: ["h", "r1", "r2", "center", "r", "d"], func: geometry::cylinder },
    "sphere"         => { params: ["r", "d"], func: geometry::sphere },
    "translate"      => { params: ["v"], func: geometry::translate },
    "scale"          => { params: ["v"], func: geometry::scale },
    "rotate"         => { params: ["a", "v"], func: geometry::rotate },
    "mirror"         => { params: ["v"], func: geometry::mirror },
    "multmatrix"     => { params: ["m"], func: geometry::multmatrix },
    "color"          => { params: ["c", "alpha"], func: geometry::color },
    "linear_extrude" => { params: ["height", "center", "convexity", "twist"], func: geometry::linear_extrude },
    "rotate_extrude" => { params: ["convexity"], func: geometry::rotate_extrude },
    "children"       => { params: ["index"], func: geometry::children },
}

fn find(name: &str) -> EvalResult<&'static ModuleDef> {
    MODULE_TABLE.iter()
                .find(|m| m.name == name)
                .ok_or_else(|| RuntimeError::UnsupportedBuiltin { name: name.to_string() })
}

/// Positional parameter names of a built-in module.
///
/// # Errors
/// `RuntimeError::UnsupportedBuiltin` if no builtin has this name.
pub fn builtin_module_params(name: &str) -> EvalResult<&'static [&'static str]> {
    find(name).map(|m| m.params)
}

/// Instantiates a built-in module whose parameters are bound in the top call
/// frame of `stack`.
///
/// # Errors
/// `RuntimeError::UnsupportedBuiltin` if no builtin has this name.
///
/// # Example
/// ```
/// use solidscript::{
///     csg::Csg,
///     interpreter::{
///         evaluator::{
///             builtin::module::run_builtin_module,
///             frame::{Bindings, CallFrame, CallStack},
///         },
///         value::core::Value,
///     },
/// };
///
/// let mut base = Bindings::new();
/// base.insert("r".to_string(), Value::Number(2.0));
/// let mut stack = CallStack::default();
/// stack.push_call(CallFrame::new("sphere", base));
///
/// let csg = run_builtin_module("sphere", &stack, Vec::new()).unwrap();
/// assert_eq!(csg, Some(Csg::Sphere { r: 2.0 }));
/// ```
pub fn run_builtin_module(name: &str, stack: &CallStack, children: Vec<Csg>) -> EvalResult<Option<Csg>> {
    let module = find(name)?;
    Ok((module.func)(stack, children))
}
