use std::path::Path;

use pretty_assertions::assert_eq;
use solidscript::{
    config::{BindingMode, EvalConfig, UndefinedArgPolicy},
    csg::Csg,
    render_source,
};

fn render_with(src: &str, config: EvalConfig) -> Option<Csg> {
    render_source(src, Path::new("."), &config).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn assert_tree_with(src: &str, config: EvalConfig, expected: &str) {
    let tree = render_with(src, config).map(|csg| csg.to_string());
    assert_eq!(tree.as_deref(), Some(expected), "source:\n{src}");
}

fn assert_tree(src: &str, expected: &str) {
    assert_tree_with(src, EvalConfig::default(), expected);
}

fn assert_empty_with(src: &str, config: EvalConfig) {
    let tree = render_with(src, config).map(|csg| csg.to_string());
    assert_eq!(tree, None, "source:\n{src}");
}

fn assert_empty(src: &str) {
    assert_empty_with(src, EvalConfig::default());
}

fn assert_failure(src: &str) {
    if render_source(src, Path::new("."), &EvalConfig::default()).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

fn dynamic() -> EvalConfig {
    EvalConfig { binding: BindingMode::Dynamic,
                 ..EvalConfig::default() }
}

fn policy(undefined_args: UndefinedArgPolicy) -> EvalConfig {
    EvalConfig { undefined_args,
                 ..EvalConfig::default() }
}

#[test]
fn empty_program_produces_nothing() {
    assert_empty("");
    assert_empty("x = 1;");
    assert_empty("module m() { sphere(1); }");
}

#[test]
fn siblings_are_unioned_right_nested() {
    assert_tree("sphere(1);", "sphere(r = 1)");
    assert_tree("sphere(1); sphere(2);",
                "union\n    sphere(r = 1)\n    sphere(r = 2)");
    assert_tree("sphere(1); sphere(2); sphere(3); sphere(4);",
                "union
    sphere(r = 1)
    union
        sphere(r = 2)
        union
            sphere(r = 3)
            sphere(r = 4)");
}

#[test]
fn difference_subtracts_union_of_rest() {
    assert_tree("difference() { sphere(1); sphere(2); sphere(3); }",
                "difference
    sphere(r = 1)
    union
        sphere(r = 2)
        sphere(r = 3)");
    assert_tree("difference() sphere(1);", "sphere(r = 1)");
    assert_empty("difference();");
}

#[test]
fn intersection_combines_children() {
    assert_tree("intersection() { cube(2); sphere(1); }",
                "intersection
    cube(size = [2, 2, 2], center = false)
    sphere(r = 1)");
}

#[test]
fn ranges_include_end_and_support_negative_steps() {
    assert_tree("for (i = [0:2:5]) sphere(i);",
                "union
    sphere(r = 0)
    union
        sphere(r = 2)
        sphere(r = 4)");
    assert_tree("for (i = [3:-1:2]) sphere(i);",
                "union\n    sphere(r = 3)\n    sphere(r = 2)");
    assert_tree("for (i = [1:2]) sphere(i);",
                "union\n    sphere(r = 1)\n    sphere(r = 2)");
}

#[test]
fn fractional_ranges_reach_their_end() {
    let tree = render_with("for (i = [0:0.1:0.3]) cube(1);", EvalConfig::default()).unwrap();
    assert_eq!(tree.to_string().matches("cube").count(), 4);
}

#[test]
fn empty_and_degenerate_ranges() {
    assert_empty("for (i = [0:0:3]) sphere(1);");
    assert_empty("for (i = [3:1]) sphere(1);");
    assert_empty("for (i = [0:-1:3]) sphere(1);");
}

#[test]
fn oversized_ranges_enumerate_nothing() {
    assert_empty("for (i = [0:1e10]) cube(1);");
    assert_empty("intersection_for (i = [0:0.5:1e12]) cube(i);");
    assert_tree("sphere(len([0:999999]));", "sphere(r = 1000000)");
    assert_tree("sphere(len([0:1000000]));", "sphere(r = 0)");
}

#[test]
fn loops_iterate_lists_and_scalars() {
    assert_tree("for (r = [5, 6]) sphere(r);",
                "union\n    sphere(r = 5)\n    sphere(r = 6)");
    assert_tree("for (r = 7) sphere(r);", "sphere(r = 7)");
    assert_empty("for (r = undef) sphere(1);");
}

#[test]
fn multi_variable_loops_are_flat_and_outer_major() {
    assert_tree("for (i = [1:2], j = [3:4]) translate([i, j, 0]) sphere(1);",
                "union
    translate([1, 3, 0])
        sphere(r = 1)
    union
        translate([1, 4, 0])
            sphere(r = 1)
        union
            translate([2, 3, 0])
                sphere(r = 1)
            translate([2, 4, 0])
                sphere(r = 1)");
}

#[test]
fn intersection_for_intersects_iterations() {
    assert_tree("intersection_for (i = [1:2]) sphere(i);",
                "intersection\n    sphere(r = 1)\n    sphere(r = 2)");
    assert_tree("intersection_for (i = [1:2]) { sphere(i); cube(i); }",
                "intersection
    union
        sphere(r = 1)
        cube(size = [1, 1, 1], center = false)
    union
        sphere(r = 2)
        cube(size = [2, 2, 2], center = false)");
}

#[test]
fn loop_variable_shadows_outer_declaration() {
    assert_tree("i = 10; for (i = [1:2]) sphere(i); sphere(i);",
                "union
    union
        sphere(r = 1)
        sphere(r = 2)
    sphere(r = 10)");
}

#[test]
fn block_declarations_shadow_root_declarations() {
    assert_tree("r = 1; translate([0, 0, 0]) { r = 2; sphere(r); } sphere(r);",
                "union
    translate([0, 0, 0])
        sphere(r = 2)
    sphere(r = 1)");
}

#[test]
fn callers_locals_are_invisible_to_callees() {
    assert_empty("module m() { sphere(x); } for (x = [3]) m();");
}

#[test]
fn sigil_variables_are_visible_to_callees() {
    assert_tree("module m() { sphere($x); } for ($x = [3]) m();", "sphere(r = 3)");
    assert_tree("module m() { sphere($fn + 1); } m();", "sphere(r = 1)");
}

#[test]
fn root_declarations_are_visible_everywhere() {
    assert_tree("r = 5; module m() { sphere(r); } m();", "sphere(r = 5)");
    assert_tree("module m() { sphere(r); } r = 5; m();", "sphere(r = 5)");
}

#[test]
fn definitions_capture_enclosing_block_locals() {
    assert_tree("for (k = [2]) { module m() { sphere(k); } m(); }", "sphere(r = 2)");
    assert_tree("translate([0, 0, 0]) { k = 4; function f() = k + 1; sphere(f()); }",
                "translate([0, 0, 0])\n    sphere(r = 5)");
}

#[test]
fn parameters_shadow_captured_locals() {
    assert_tree("for (k = [2]) { module m(k = 9) { sphere(k); } m(); }", "sphere(r = 9)");
}

#[test]
fn unbound_parameters_shadow_outer_variables() {
    for config in [EvalConfig::default(), dynamic()] {
        assert_empty_with("x = 5; module m(x) { sphere(x); } m();", config);
        assert_empty_with("x = 5; function f(x) = x; sphere(f());", config);
        assert_empty_with("for (x = [5]) { module m(x) { sphere(x); } m(); }", config);
    }
}

#[test]
fn static_binding_uses_last_declaration() {
    assert_tree("a = 1; sphere(a); a = 2;", "sphere(r = 2)");
}

#[test]
fn dynamic_binding_follows_statement_order() {
    assert_tree_with("a = 1; sphere(a); a = 2;", dynamic(), "sphere(r = 1)");
    assert_tree_with("a = 1; sphere(a); a = 2; cube(a);",
                     dynamic(),
                     "union\n    sphere(r = 1)\n    cube(size = [2, 2, 2], center = false)");
}

#[test]
fn dynamic_binding_inside_modules() {
    assert_tree_with("module m(s) { t = s + 1; sphere(t); } m(2);", dynamic(), "sphere(r = 3)");
}

#[test]
fn undefined_argument_to_user_module_is_bound_by_default() {
    let src = "module m(r = 4) { sphere(r); } m(undef);";
    assert_empty(src);
    assert_empty_with(src, policy(UndefinedArgPolicy::Bind));
    assert_tree_with(src, policy(UndefinedArgPolicy::ProtectAll), "sphere(r = 4)");
}

#[test]
fn dropped_undefined_argument_keeps_its_position() {
    let src = "module m(a = 1, b = 2) { cube([a, b, 3]); } m(undef, 5);";
    assert_tree_with(src,
                     policy(UndefinedArgPolicy::ProtectAll),
                     "cube(size = [1, 5, 3], center = false)");
    assert_empty_with(src, policy(UndefinedArgPolicy::Bind));
}

#[test]
fn named_arguments_override_defaults() {
    assert_tree("module m(a = 1, b = 2) { cube([a, b, 3]); } m(b = 7);",
                "cube(size = [1, 7, 3], center = false)");
    assert_tree("cylinder(h = 2, r = 3);",
                "cylinder(h = 2, r1 = 3, r2 = 3, center = false)");
}

#[test]
fn extra_positional_arguments_are_ignored() {
    assert_tree("module m(a) { sphere(a); } m(1, 2, 3);", "sphere(r = 1)");
}

#[test]
fn defaults_are_evaluated_in_the_caller() {
    assert_tree("function g(x = 2) = x + 1; sphere(g());", "sphere(r = 3)");
    assert_tree("module m(s = $size) { sphere(s); } for ($size = [6]) m();", "sphere(r = 6)");
}

#[test]
fn children_reemits_passed_geometry() {
    assert_tree("module wrap() { translate([1, 0, 0]) children(); } wrap() { sphere(1); cube(2); }",
                "translate([1, 0, 0])
    union
        sphere(r = 1)
        cube(size = [2, 2, 2], center = false)");
    assert_tree("module second() { children(1); } second() { sphere(1); cube(2); }",
                "cube(size = [2, 2, 2], center = false)");
    assert_empty("module none() { children(5); } none() sphere(1);");
}

#[test]
fn children_count_is_bound() {
    assert_tree("module count() { cube($children); } count() { sphere(1); sphere(2); }",
                "cube(size = [2, 2, 2], center = false)");
}

#[test]
fn modifiers_filter_subtrees() {
    assert_tree("*sphere(1); sphere(2);", "sphere(r = 2)");
    assert_empty("%cube(1);");
    assert_tree("#sphere(1);", "sphere(r = 1)");
    assert_tree("!sphere(1);", "sphere(r = 1)");
}

#[test]
fn user_functions_and_recursion() {
    assert_tree("function f(x) = x * 2; sphere(f(3));", "sphere(r = 6)");
    assert_tree("function fact(n) = n <= 1 ? 1 : n * fact(n - 1); sphere(fact(4));",
                "sphere(r = 24)");
    assert_tree("function a(n) = n > 0 ? b(n - 1) : 0; function b(n) = a(n) + 1; sphere(a(3));",
                "sphere(r = 3)");
}

#[test]
fn vector_arithmetic() {
    assert_tree("cube([1, 2, 3] + [1, 1, 1]);", "cube(size = [2, 3, 4], center = false)");
    assert_tree("cube([1, 2, 3] * 2);", "cube(size = [2, 4, 6], center = false)");
    assert_tree("cube([2, 4, 6] / 2);", "cube(size = [1, 2, 3], center = false)");
    assert_tree("sphere([1, 2, 3] * [4, 5, 6]);", "sphere(r = 32)");
    assert_tree("cube(-[1, 2, 3] + [2, 4, 6]);", "cube(size = [1, 2, 3], center = false)");
    assert_empty("sphere([1, 2] + [1, 2, 3]);");
}

#[test]
fn indexing() {
    assert_tree("sphere([5, 6, 7][1]);", "sphere(r = 6)");
    assert_tree("v = [[1, 2], [3, 4]]; sphere(v[1][0]);", "sphere(r = 3)");
    assert_empty("sphere([5, 6, 7][3]);");
    assert_tree("sphere([5, 6, 7][1.5]);", "sphere(r = 6)");
    assert_tree("sphere([5, 6, 7][0.9]);", "sphere(r = 5)");
    assert_tree("sphere(len(\"abc\"[1]));", "sphere(r = 1)");
}

#[test]
fn comparisons_and_logic() {
    assert_tree("sphere(1 < 2 ? 3 : 4);", "sphere(r = 3)");
    assert_tree("sphere(\"a\" < \"b\" ? 1 : 2);", "sphere(r = 1)");
    assert_tree("sphere([1, 2] == [1, 2] ? 1 : 2);", "sphere(r = 1)");
    assert_tree("sphere(1 == \"1\" ? 1 : 2);", "sphere(r = 2)");
    assert_tree("sphere(true && !false ? 1 : 2);", "sphere(r = 1)");
    assert_tree("sphere(0 || undef ? 1 : 2);", "sphere(r = 2)");
    assert_tree("sphere(7 % 3);", "sphere(r = 1)");
}

#[test]
fn conditionals_pick_first_true_branch() {
    let src = "if (x > 5) sphere(1); else if (x > 2) sphere(2); else sphere(3);";
    assert_tree(&format!("x = 3; {src}"), "sphere(r = 2)");
    assert_tree(&format!("x = 9; {src}"), "sphere(r = 1)");
    assert_tree(&format!("x = 0; {src}"), "sphere(r = 3)");
    assert_empty("if (false) sphere(1);");
}

#[test]
fn assign_introduces_block_variables() {
    assert_tree("assign (r = 2) sphere(r);", "sphere(r = 2)");
    assert_tree("assign (a = 1, b = 2) { cube([a, b, 1]); }",
                "cube(size = [1, 2, 1], center = false)");
}

#[test]
fn builtin_functions() {
    assert_tree("sphere(max(1, 5, 3));", "sphere(r = 5)");
    assert_tree("sphere(min([4, 2, 8]));", "sphere(r = 2)");
    assert_tree("sphere(abs(-3) + sign(-2));", "sphere(r = 2)");
    assert_tree("sphere(round(sin(90) * 10));", "sphere(r = 10)");
    assert_tree("sphere(pow(2, 3) + floor(1.7) + ceil(0.2));", "sphere(r = 10)");
    assert_tree("sphere(norm([3, 4]));", "sphere(r = 5)");
    assert_tree("sphere(len(concat([1, 2], [3], 4)));", "sphere(r = 4)");
    assert_tree("sphere(len(str(\"ab\", 12)));", "sphere(r = 4)");
    assert_empty("sphere(sqrt(\"x\"));");
}

#[test]
fn builtin_shapes_and_transforms() {
    assert_tree("square([2, 3], center = true);", "square(size = [2, 3], center = true)");
    assert_tree("circle(d = 4);", "circle(r = 2)");
    assert_tree("polygon([[0, 0], [1, 0], [0, 1]]);", "polygon(3 points)");
    assert_tree("polygon(points = [[0, 0], [1, 0], [0, 1]], paths = [[0, 1, 2]]);",
                "polygon(3 points, 1 paths)");
    assert_tree("scale(2) sphere(1);", "scale([2, 2, 2])\n    sphere(r = 1)");
    assert_tree("rotate(90) sphere(1);", "rotate([0, 0, 90])\n    sphere(r = 1)");
    assert_tree("rotate(a = 45, v = [1, 0, 0]) sphere(1);",
                "rotate(a = 45, v = [1, 0, 0])\n    sphere(r = 1)");
    assert_tree("mirror([0, 1, 0]) sphere(1);", "mirror([0, 1, 0])\n    sphere(r = 1)");
    assert_tree("color(\"red\") sphere(1);", "color(\"red\", alpha = 1)\n    sphere(r = 1)");
    assert_tree("color([1, 0, 0]) sphere(1);", "color([1, 0, 0, 1])\n    sphere(r = 1)");
    assert_tree("linear_extrude(height = 5) square(1);",
                "linear_extrude(height = 5, center = false, twist = 0)
    square(size = [1, 1], center = false)");
    assert_tree("rotate_extrude() circle(1);", "rotate_extrude()\n    circle(r = 1)");
    assert_tree("multmatrix([[1, 0, 0, 2]]) sphere(1);",
                "multmatrix([[1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]])
    sphere(r = 1)");
}

#[test]
fn invalid_shapes_produce_nothing() {
    assert_empty("sphere();");
    assert_empty("sphere(\"big\");");
    assert_empty("cube(\"big\");");
    assert_empty("linear_extrude() square(1);");
    assert_empty("translate([1, 0, 0]);");
    assert_empty("translate(\"x\") sphere(1);");
}

#[test]
fn scope_errors_are_fatal() {
    assert_failure("a = b; b = 1;");
    assert_failure("a = a + 1;");
    assert_failure("undefined_module();");
    assert_failure("sphere(undefined_function(1));");
}

#[test]
fn parse_errors_are_fatal() {
    assert_failure("sphere(1");
    assert_failure("module m() { sphere(1);");
    assert_failure("sphere(1) @;");
    assert_failure("assign (1) sphere(1);");
}
