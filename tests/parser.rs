use std::{collections::HashSet, path::Path};

use pretty_assertions::assert_eq;
use solidscript::{
    ast::{LoopKind, Modifier, Node, NodeKind, Operator, Position},
    error::ParseError,
    interpreter::parser::{ParseSession, parse_source},
};

fn parse(src: &str) -> Node {
    let mut session = ParseSession::new();
    parse_source(src, Path::new("."), &mut session).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"))
}

fn parse_err(src: &str) -> ParseError {
    let mut session = ParseSession::new();
    match parse_source(src, Path::new("."), &mut session) {
        Ok(root) => panic!("Parse succeeded but was expected to fail:\n{src}\n{root:#?}"),
        Err(e) => e,
    }
}

/// Parses `src` and returns the messages of every diagnostic raised.
fn diagnostics(src: &str) -> Vec<String> {
    let mut session = ParseSession::new();
    parse_source(src, Path::new("."), &mut session).unwrap_or_else(|e| panic!("Parse failed: {e}\n{src}"));
    session.diagnostics()
           .iter()
           .map(|d| d.message.clone())
           .collect()
}

/// The value expression of the single declaration in `src`.
fn declared(src: &str) -> Node {
    let mut root = parse(src);
    assert_eq!(root.children.len(), 1, "source:\n{src}");
    let decl = root.children.remove(0);
    assert!(matches!(decl.kind, NodeKind::Declare { .. }), "not a declaration: {decl:?}");
    decl.children.into_iter().next().expect("declaration without a value")
}

fn kinds(nodes: &[Node]) -> Vec<NodeKind> {
    nodes.iter().map(|n| n.kind.clone()).collect()
}

fn number(node: &Node) -> f64 {
    match node.kind {
        NodeKind::Number(n) => n,
        ref other => panic!("expected a number literal, found {other:?}"),
    }
}

#[test]
fn top_level_statements_in_order() {
    let root = parse("declare a = 1; b = 2; cube(1); module m() {} function f() = 1;");
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(kinds(&root.children),
               vec![NodeKind::Declare { name: "a".into() },
                    NodeKind::Declare { name: "b".into() },
                    NodeKind::ModuleCall { name:     "cube".into(),
                                           modifier: None, },
                    NodeKind::ModuleDef { name: "m".into() },
                    NodeKind::FunctionDef { name: "f".into() },]);
}

#[test]
fn stray_semicolons_are_skipped() {
    let root = parse(";; cube(1);; module m() { ; sphere(1); ; }");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[1].body().len(), 1);
}

#[test]
fn range_children_are_start_end_increment() {
    let range = declared("x = [1:2:9];");
    assert_eq!(range.kind, NodeKind::Range);
    assert_eq!(range.children.iter().map(number).collect::<Vec<_>>(), vec![1.0, 9.0, 2.0]);

    let range = declared("x = [0:5];");
    assert_eq!(range.kind, NodeKind::Range);
    assert_eq!(range.children.iter().map(number).collect::<Vec<_>>(), vec![0.0, 5.0, 1.0]);
}

#[test]
fn vectors_allow_trailing_comma() {
    let vector = declared("x = [1, 2, 3,];");
    assert_eq!(vector.kind, NodeKind::Vector);
    assert_eq!(vector.children.len(), 3);

    let empty = declared("x = [];");
    assert_eq!(empty.kind, NodeKind::Vector);
    assert!(empty.children.is_empty());
}

#[test]
fn multi_variable_loop_becomes_a_chain() {
    let root = parse("for (i = [0:1], j = [2:3]) sphere(1);");
    let outer = &root.children[0];
    assert_eq!(outer.kind, NodeKind::Loop(LoopKind::For));
    assert_eq!(outer.first().and_then(Node::name), Some("i"));
    assert_eq!(outer.body().len(), 1);

    let inner = &outer.body()[0];
    assert_eq!(inner.kind, NodeKind::Loop(LoopKind::For));
    assert_eq!(inner.first().and_then(Node::name), Some("j"));
    assert_eq!(kinds(inner.body()),
               vec![NodeKind::ModuleCall { name:     "sphere".into(),
                                           modifier: None, }]);
}

#[test]
fn intersection_for_keeps_its_kind_when_chained() {
    let root = parse("intersection_for (a = [1, 2], b = [3]) cube(a);");
    let outer = &root.children[0];
    assert_eq!(outer.kind, NodeKind::Loop(LoopKind::IntersectionFor));
    assert_eq!(outer.body()[0].kind, NodeKind::Loop(LoopKind::IntersectionFor));
}

#[test]
fn assign_becomes_union_with_declarations() {
    let root = parse("assign (a = 1, b = a + 1) sphere(b);");
    let call = &root.children[0];
    assert_eq!(call.kind,
               NodeKind::ModuleCall { name:     "union".into(),
                                      modifier: None, });
    assert_eq!(kinds(&call.children),
               vec![NodeKind::ArgList,
                    NodeKind::Declare { name: "a".into() },
                    NodeKind::Declare { name: "b".into() },
                    NodeKind::ModuleCall { name:     "sphere".into(),
                                           modifier: None, },]);
    assert!(call.children[0].children.is_empty());
}

#[test]
fn assign_rejects_positional_arguments() {
    let err = parse_err("assign (1) sphere(1);");
    assert!(matches!(err, ParseError::PositionalAssign { .. }), "{err:?}");
}

#[test]
fn modifiers_attach_to_module_calls() {
    let root = parse("*cube(1); %cube(2); #cube(3); !cube(4); cube(5);");
    let modifiers = root.children
                        .iter()
                        .map(|n| match n.kind {
                            NodeKind::ModuleCall { modifier, .. } => modifier,
                            _ => panic!("not a module call: {n:?}"),
                        })
                        .collect::<Vec<_>>();
    assert_eq!(modifiers,
               vec![Some(Modifier::Disable),
                    Some(Modifier::Background),
                    Some(Modifier::Highlight),
                    Some(Modifier::Root),
                    None]);
}

#[test]
fn module_call_bodies() {
    let root = parse("translate([1, 0, 0]) { cube(1); sphere(1); } rotate(90) cube(1); union();");
    assert_eq!(root.children[0].body().len(), 2);
    assert_eq!(root.children[1].body().len(), 1);
    assert!(root.children[2].body().is_empty());
}

#[test]
fn named_and_positional_arguments() {
    let root = parse("cylinder(10, r = 2, center = true);");
    let args = root.children[0].first().expect("argument list");
    assert_eq!(args.kind, NodeKind::ArgList);
    assert_eq!(kinds(&args.children),
               vec![NodeKind::Number(10.0),
                    NodeKind::NamedArg { name: "r".into() },
                    NodeKind::NamedArg { name: "center".into() },]);
    assert_eq!(args.children[2].first().map(|n| n.kind.clone()), Some(NodeKind::Number(1.0)));
}

#[test]
fn parameter_defaults() {
    let root = parse("module m(a, b = 2, $fn = 8) {}");
    let params = root.children[0].first().expect("parameter list");
    assert_eq!(params.kind, NodeKind::ParamList);
    let names = params.children.iter().filter_map(Node::name).collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "b", "$fn"]);
    assert!(params.children[0].children.is_empty());
    assert_eq!(params.children[1].first().map(number), Some(2.0));
}

#[test]
fn index_suffixes_nest_left() {
    let expr = declared("x = v[1][2];");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Index));
    assert_eq!(number(&expr.children[1]), 2.0);

    let inner = &expr.children[0];
    assert_eq!(inner.kind, NodeKind::Op(Operator::Index));
    assert_eq!(inner.children[0].kind, NodeKind::Ident { name: "v".into() });
    assert_eq!(number(&inner.children[1]), 1.0);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = declared("x = 1 + 2 * 3;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Add));
    assert_eq!(expr.children[1].kind, NodeKind::Op(Operator::Mul));

    let expr = declared("x = (1 + 2) * 3;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Mul));
    assert_eq!(expr.children[0].kind, NodeKind::Op(Operator::Add));
}

#[test]
fn binary_operators_associate_left() {
    let expr = declared("x = 8 - 4 - 2;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Sub));
    assert_eq!(expr.children[0].kind, NodeKind::Op(Operator::Sub));
    assert_eq!(number(&expr.children[1]), 2.0);
}

#[test]
fn logical_precedence() {
    let expr = declared("x = a || b && c;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Or));
    assert_eq!(expr.children[1].kind, NodeKind::Op(Operator::And));

    let expr = declared("x = a < 1 && b >= 2;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::And));
    assert_eq!(expr.children[0].kind, NodeKind::Op(Operator::Less));
    assert_eq!(expr.children[1].kind, NodeKind::Op(Operator::GreaterEqual));
}

#[test]
fn unary_prefixes_stack() {
    let expr = declared("x = - -1;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Negate));
    assert_eq!(expr.children[0].kind, NodeKind::Op(Operator::Negate));

    let expr = declared("x = !+a;");
    assert_eq!(expr.kind, NodeKind::Op(Operator::Not));
    assert_eq!(expr.children[0].kind, NodeKind::Op(Operator::Plus));
}

#[test]
fn relational_operators_do_not_chain() {
    let err = parse_err("x = 1 < 2 < 3;");
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err:?}");
}

#[test]
fn ternary_nests_right() {
    let expr = declared("x = a ? 1 : b ? 2 : 3;");
    assert_eq!(expr.kind, NodeKind::Ternary);
    assert_eq!(expr.children.len(), 3);
    assert_eq!(expr.children[2].kind, NodeKind::Ternary);
}

#[test]
fn function_calls_and_identifiers() {
    let expr = declared("x = f(1, 2) + g;");
    let call = &expr.children[0];
    assert_eq!(call.kind, NodeKind::FunctionCall { name: "f".into() });
    assert_eq!(call.first().map(|args| args.children.len()), Some(2));
    assert_eq!(expr.children[1].kind, NodeKind::Ident { name: "g".into() });
}

#[test]
fn literals() {
    assert_eq!(declared("x = true;").kind, NodeKind::Number(1.0));
    assert_eq!(declared("x = false;").kind, NodeKind::Number(0.0));
    assert_eq!(declared("x = undef;").kind, NodeKind::Undef);
    assert_eq!(declared("x = .5;").kind, NodeKind::Number(0.5));
    assert_eq!(declared("x = 2e3;").kind, NodeKind::Number(2000.0));
    assert_eq!(declared(r#"x = "a\"b\n";"#).kind, NodeKind::Text("a\"b\n".into()));
}

#[test]
fn comments_are_skipped() {
    let root = parse("// line\ncube(1); /* block\n comment */ sphere(1);");
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[1].position, Position::new(3, 13));
}

#[test]
fn if_chains_end_in_always() {
    let root = parse("if (a) cube(1); else if (b) cube(2); else { cube(3); cube(4); }");
    let chain = &root.children[0];
    assert_eq!(chain.kind, NodeKind::If);
    assert_eq!(kinds(&chain.children), vec![NodeKind::Condition; 3]);
    assert_eq!(chain.children[2].first().map(|g| g.kind.clone()), Some(NodeKind::Always));
    assert_eq!(chain.children[2].body().len(), 2);
}

#[test]
fn positions_are_one_based() {
    let root = parse("\n\n  sphere(1);");
    assert_eq!(root.children[0].position, Position::new(3, 3));
}

#[test]
fn node_ids_are_unique() {
    fn collect(node: &Node, ids: &mut HashSet<u32>) {
        assert!(ids.insert(node.id.0), "duplicate id {:?}", node.id);
        node.children.iter().for_each(|c| collect(c, ids));
    }
    let root = parse("module m(a = 1) { for (i = [0:a]) translate([i, 0, 0]) cube(1); } m();");
    collect(&root, &mut HashSet::new());
}

#[test]
fn missing_semicolon_after_declaration_is_a_diagnostic() {
    let messages = diagnostics("x = 1\ncube(x);");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("after declaration"), "{messages:?}");
}

#[test]
fn unmatched_closing_brace_is_a_diagnostic() {
    let mut session = ParseSession::new();
    let root = parse_source("} cube(1);", Path::new("."), &mut session).expect("parse failed");
    assert_eq!(root.children.len(), 1);
    assert_eq!(session.diagnostics().len(), 1);
    assert_eq!(session.diagnostics()[0].message, "Unmatched '}' ignored.");
    assert_eq!(session.diagnostics()[0].position, Position::new(1, 1));
}

#[test]
fn missing_closing_parenthesis_is_a_diagnostic() {
    let messages = diagnostics("x = (1 + 2;");
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("parenthesized expression"), "{messages:?}");
}

#[test]
fn clean_sources_raise_no_diagnostics() {
    assert!(diagnostics("module m() { cube(1); } m(); x = [1:3];").is_empty());
}

#[test]
fn unexpected_character_reports_position() {
    let err = parse_err("cube(1);\n  @");
    assert_eq!(err,
               ParseError::UnexpectedCharacter { text:     "@".into(),
                                                 position: Position::new(2, 3), });
    assert_eq!(err.to_string(), "Error at 2:3: Unexpected character '@'.");
}

#[test]
fn unterminated_block_is_end_of_input() {
    let err = parse_err("module m() { cube(1);");
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { .. }), "{err:?}");
}

#[test]
fn malformed_statements_fail() {
    for src in ["cube(1", "x = ;", "module () {}", "function f() = 1", "for (= 1) cube(1);", "1 + 2;"] {
        parse_err(src);
    }
}

#[test]
fn session_ids_continue_across_parses() {
    let mut session = ParseSession::new();
    let first = parse_source("cube(1);", Path::new("."), &mut session).expect("parse failed");
    let second = parse_source("cube(1);", Path::new("."), &mut session).expect("parse failed");
    assert!(second.id.0 > first.id.0);

    session.reset();
    let again = parse_source("cube(1);", Path::new("."), &mut session).expect("parse failed");
    assert_eq!(again.id, first.id);
}
