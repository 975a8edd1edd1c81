use std::path::Path;

use pretty_assertions::assert_eq;
use solidscript::{
    ast::{Node, Position},
    error::ScopeError,
    interpreter::{
        parser::{ParseSession, parse_source},
        scope::{ScopeKind, Symbol, build_scopes},
    },
};

fn parse(src: &str) -> Node {
    let mut session = ParseSession::new();
    parse_source(src, Path::new("."), &mut session).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"))
}

fn assert_scoped(src: &str) {
    let root = parse(src);
    if let Err(e) = build_scopes(&root) {
        panic!("Scope construction failed: {e}\n{src}");
    }
}

fn scope_err(src: &str) -> ScopeError {
    let root = parse(src);
    match build_scopes(&root) {
        Ok(_) => panic!("Scope construction succeeded but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

fn missing(src: &str) -> String {
    match scope_err(src) {
        ScopeError::ForwardReference { missing, .. } => missing,
        other => panic!("expected a forward reference, found {other:?}"),
    }
}

#[test]
fn backward_references_resolve() {
    assert_scoped("declare a = 1; declare b = a + 1; c = [a, b];");
    assert_scoped("a = 1; module m() { b = a; } m();");
    assert_scoped("a = 2; for (i = [0:a]) { b = i * a; cube(b); }");
}

#[test]
fn self_reference_is_rejected() {
    assert_eq!(missing("declare a = a;"), "a");
    assert_eq!(missing("a = a + 1;"), "a");
}

#[test]
fn forward_reference_is_rejected() {
    let err = scope_err("a = b;\nb = 1;");
    assert_eq!(err,
               ScopeError::ForwardReference { declared: "a".into(),
                                              missing:  "b".into(),
                                              position: Position::new(1, 5), });
    assert_eq!(err.to_string(),
               "Error at 1:5: Declaration of 'a' refers to 'b' before it is declared.");
}

#[test]
fn forward_reference_inside_nested_expressions() {
    assert_eq!(missing("a = f(b); b = 1; function f(x) = x;"), "b");
    assert_eq!(missing("a = [1, [2, c]]; c = 3;"), "c");
    assert_eq!(missing("a = true ? 1 : later; later = 0;"), "later");
    assert_eq!(missing("a = v[i]; v = [1]; i = 0;"), "v");
}

#[test]
fn sibling_block_names_are_not_visible() {
    assert_eq!(missing("if (true) { b = 1; } a = b;"), "b");
    assert_eq!(missing("if (true) { a = c; } else { c = 1; }"), "c");
    assert_eq!(missing("cube(1) { x = 1; } y = x;"), "x");
}

#[test]
fn enclosing_block_names_are_visible() {
    assert_scoped("a = 1; if (true) { b = a; }");
    assert_scoped("a = 1; union() { b = a; translate([b, 0, 0]) { c = a + b; cube(c); } }");
}

#[test]
fn bound_sigil_names_skip_the_order_check() {
    assert_scoped("a = $fn + $children;");
    assert_scoped("a = $b; $b = 2;");
    assert_scoped("module m() { a = $depth; cube(a); } m($depth = 2);");
    assert_scoped("module m($w = 1) { cube($w); } a = $w;");
    assert_scoped("for ($i = [0:2]) cube(1); a = $i;");
}

#[test]
fn unbound_sigil_names_are_rejected() {
    assert_eq!(missing("a = $undeclared_anywhere;"), "$undeclared_anywhere");
    assert_eq!(missing("module m() { a = $nowhere; cube(a); } m();"), "$nowhere");
}

#[test]
fn prelude_constants_are_visible() {
    assert_scoped("a = PI / 2;");
}

#[test]
fn definitions_may_be_used_before_they_appear() {
    assert_scoped("m(); module m() { cube(1); }");
    assert_scoped("a = f(1); function f(x) = x * 2;");
}

#[test]
fn functions_may_refer_to_each_other() {
    assert_scoped("function even(n) = n == 0 ? true : odd(n - 1);\n\
                   function odd(n) = n == 0 ? false : even(n - 1);\n\
                   x = even(4);");
}

#[test]
fn definition_bodies_see_the_whole_enclosing_block() {
    assert_scoped("module m() { cube(late); } late = 3; m();");
    assert_scoped("function f() = later; later = 1; x = f();");
}

#[test]
fn parameters_are_visible_in_module_bodies() {
    assert_scoped("module m(size, h = 2) { s = size * h; cube(s); } m(1);");
    assert_scoped("module m(n) { for (i = [0:n]) { x = i + n; cube(x); } } m(3);");
}

#[test]
fn loop_variable_is_visible_in_its_body() {
    assert_scoped("for (i = [0:3]) { x = i; cube(x); }");
    assert_eq!(missing("for (i = [0:3]) cube(i); x = i;"), "i");
}

#[test]
fn unknown_module_is_rejected() {
    let err = scope_err("cube(1);\nnonexistent(2);");
    assert_eq!(err,
               ScopeError::UnknownModule { name:     "nonexistent".into(),
                                           position: Position::new(2, 1), });
}

#[test]
fn unknown_function_is_rejected() {
    let err = scope_err("x = nope(1);");
    assert!(matches!(err, ScopeError::UnknownFunction { ref name, .. } if name == "nope"), "{err:?}");
}

#[test]
fn nested_definitions_are_local() {
    assert_scoped("module outer() { module inner() { cube(1); } inner(); } outer();");
    assert!(matches!(scope_err("module outer() { module inner() {} } inner();"),
                     ScopeError::UnknownModule { .. }));
}

#[test]
fn calls_resolve_to_definitions() {
    let root = parse("module m() { cube(1); } m(); x = sin(30);");
    let scopes = build_scopes(&root).expect("scopes");

    let def = &root.children[0];
    let call = &root.children[1];
    assert_eq!(scopes.callee(call), Some(Symbol::Module(def)));

    let cube = &def.body()[0];
    assert_eq!(scopes.callee(cube), Some(Symbol::BuiltinModule("cube")));

    let sin = root.children[2].first().expect("value");
    assert_eq!(scopes.callee(sin), Some(Symbol::BuiltinFunction("sin")));
}

#[test]
fn scopes_attach_to_their_openers() {
    let root = parse("a = 1; module m(p) { b = p; } for (i = [0:1]) cube(i);");
    let scopes = build_scopes(&root).expect("scopes");

    assert_eq!(scopes.opened_by(&root), Some(scopes.root()));

    let module_scope = scopes.opened_by(&root.children[1]).expect("module scope");
    assert_eq!(scopes.scope(module_scope).kind, ScopeKind::Module);
    assert_eq!(scopes.lookup_variable(module_scope, "p"), Some(Symbol::Parameter));
    assert!(matches!(scopes.lookup_variable(module_scope, "b"), Some(Symbol::Declared(_))));
    assert!(matches!(scopes.lookup_variable(module_scope, "a"), Some(Symbol::Declared(_))));

    let loop_scope = scopes.opened_by(&root.children[2]).expect("loop scope");
    assert_eq!(scopes.scope(loop_scope).kind, ScopeKind::Block);
    assert_eq!(scopes.lookup_variable(loop_scope, "i"), Some(Symbol::LoopVariable));
    assert_eq!(scopes.lookup_variable(scopes.root(), "i"), None);
    assert_eq!(scopes.lookup_variable(scopes.root(), "PI"), Some(Symbol::Constant(std::f64::consts::PI)));
}

#[test]
fn declarations_keep_their_order() {
    let root = parse("c = 1; a = 2; b = c + a;");
    let scopes = build_scopes(&root).expect("scopes");
    let names = scopes.scope(scopes.root())
                      .declarations()
                      .map(|(name, _)| name)
                      .collect::<Vec<_>>();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn redeclaration_moves_to_the_end() {
    let root = parse("a = 1; b = 2; a = 3;");
    let scopes = build_scopes(&root).expect("scopes");
    let names = scopes.scope(scopes.root())
                      .declarations()
                      .map(|(name, _)| name)
                      .collect::<Vec<_>>();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn enclosing_blocks_stop_at_the_module() {
    let root = parse("module outer() { x = 1; if (true) { y = 2; module inner() { cube(x + y); } inner(); } } outer();");
    let scopes = build_scopes(&root).expect("scopes");

    let outer = &root.children[0];
    let branch = &outer.body()[1].children[0];
    let inner = branch.body()
                      .iter()
                      .find(|n| n.is_definition())
                      .expect("inner definition");

    let captured = scopes.enclosing_blocks(inner)
                         .flat_map(|scope| scope.variables.keys().cloned())
                         .collect::<Vec<_>>();
    assert_eq!(captured, vec!["y".to_string()]);
}
