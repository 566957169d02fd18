use itertools::Itertools;
use speculoos::prelude::*;

use super::{only_binding, scope_kind_of};
use crate::{
    scope::{analyze, BindingKind, DiagnosticKind, ReadWriteFlags, ScopeKind},
    tests::helpers::{parse, tracing_subscribe},
};

#[test]
fn test_object_and_array_patterns() {
    tracing_subscribe();

    let code = "
        const { a, b: { c }, ...rest } = obj;
        const [d, , e = a] = list;
        use(c, d);
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    for name in ["a", "c", "rest", "d", "e"] {
        assert_that!(&only_binding(&scope_manager, name).kind)
            .is_equal_to(BindingKind::Destructured);
    }
    assert_that!(&only_binding(&scope_manager, "a").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "c").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "d").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "rest").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "e").uses).is_empty();
    assert_that!(&scope_manager.diagnostics).is_empty();

    let rest = only_binding(&scope_manager, "rest");
    assert_that!(&scope_manager.definition(rest.defs[0]).has_rest_sibling).is_false();
    let a = only_binding(&scope_manager, "a");
    assert_that!(&scope_manager.definition(a.defs[0]).has_rest_sibling).is_true();
    let d = only_binding(&scope_manager, "d");
    assert_that!(&scope_manager.definition(d.defs[0]).array_element).is_true();
}

#[test]
fn test_parameter_patterns() {
    let code = "function f({ x }, [y], z = x, ...others) { return y; } f();";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let indices = ["x", "y", "z", "others"]
        .into_iter()
        .map(|name| {
            let binding = only_binding(&scope_manager, name);
            assert_that!(&binding.kind).is_equal_to(BindingKind::Parameter);
            assert_that!(&scope_kind_of(&scope_manager, binding)).is_equal_to(ScopeKind::Function);
            scope_manager.definition(binding.defs[0]).index
        })
        .collect_vec();
    assert_that!(&indices).is_equal_to(vec![Some(0), Some(1), Some(2), Some(3)]);

    assert_that!(&only_binding(&scope_manager, "x").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "y").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "z").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "others").uses).is_empty();
}

#[test]
fn test_destructuring_assignment_writes() {
    let code = "let p, q; [p, { q }] = pair;";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    for name in ["p", "q"] {
        let binding = only_binding(&scope_manager, name);
        assert_that!(&binding.kind).is_equal_to(BindingKind::Let);
        assert_that!(&binding.uses).has_length(1);
        assert_that!(&scope_manager.reference(binding.uses[0]).flag)
            .is_equal_to(ReadWriteFlags::WRITE);
    }
}

#[test]
fn test_for_in_and_of_heads() {
    let code = "
        for (const item of items) {
            console.log(item);
        }
        for (var key in object) {}
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let item = only_binding(&scope_manager, "item");
    assert_that!(&item.kind).is_equal_to(BindingKind::Const);
    assert_that!(&scope_kind_of(&scope_manager, item)).is_equal_to(ScopeKind::For);
    assert_that!(&item.uses).has_length(1);

    let key = only_binding(&scope_manager, "key");
    assert_that!(&key.kind).is_equal_to(BindingKind::Var);
    assert_that!(&scope_kind_of(&scope_manager, key)).is_equal_to(ScopeKind::Module);
    assert_that!(&key.uses).is_empty();
}

#[test]
fn test_catch_parameter_pattern() {
    let code = "try {} catch ({ message }) { console.log(message); }";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let message = only_binding(&scope_manager, "message");
    assert_that!(&message.kind).is_equal_to(BindingKind::CatchClause);
    assert_that!(&scope_kind_of(&scope_manager, message)).is_equal_to(ScopeKind::Catch);
    assert_that!(&message.uses).has_length(1);
}

#[test]
fn test_member_targets_in_declarations_are_unclassified() {
    let code = "
        function f({ a: b.c }) {}
        f();
        for (let [x.y, z] of list) {}
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let kinds = scope_manager
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.kind)
        .collect_vec();
    assert_that!(&kinds).is_equal_to(vec![
        DiagnosticKind::UnclassifiedDeclaration,
        DiagnosticKind::UnclassifiedDeclaration,
    ]);

    let b = only_binding(&scope_manager, "b");
    assert_that!(&b.ambiguous).is_true();
    assert_that!(&scope_kind_of(&scope_manager, b)).is_equal_to(ScopeKind::Function);

    let x = only_binding(&scope_manager, "x");
    assert_that!(&x.ambiguous).is_true();
    assert_that!(&scope_kind_of(&scope_manager, x)).is_equal_to(ScopeKind::For);

    let z = only_binding(&scope_manager, "z");
    assert_that!(&z.ambiguous).is_false();
    assert_that!(&z.kind).is_equal_to(BindingKind::Destructured);
}
