use itertools::Itertools;
use speculoos::prelude::*;

use super::only_binding;
use crate::{
    analyze_file,
    parser::{ParsedFile, SourceFile},
    scope::{analyze, ReadWriteFlags},
    tests::helpers::{parse, tracing_subscribe},
};

#[test]
fn test_declaration_name_is_not_a_use() {
    tracing_subscribe();

    let code = "let lonely; var self = self;";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "lonely").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "self").uses).has_length(1);
}

#[test]
fn test_member_expressions() {
    let code = "
        const prop = 1;
        const key = 'k';
        const obj = {};
        obj.prop;
        obj[key];
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "prop").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "key").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "obj").uses).has_length(2);
}

#[test]
fn test_object_literal_keys_and_shorthand() {
    let code = "
        const a = 1, b = 2, c = 3, d = 4;
        use({ a: b, [c]: 0, d });
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "a").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "b").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "c").uses).has_length(1);
    let d = only_binding(&scope_manager, "d");
    assert_that!(&d.uses).has_length(1);
    assert_that!(&scope_manager.reference(d.uses[0]).is_read()).is_true();
}

#[test]
fn test_labels_are_not_references() {
    let code = "const loop = 1; loop: for (;;) { break loop; }";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "loop").uses).is_empty();
}

#[test]
fn test_read_write_flags() {
    let code = "let n = 0; n += 1; n++; n = 5; read(n);";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let flags = only_binding(&scope_manager, "n")
        .uses
        .iter()
        .map(|&reference| scope_manager.reference(reference).flag)
        .collect_vec();
    assert_that!(&flags).is_equal_to(vec![
        ReadWriteFlags::RW,
        ReadWriteFlags::RW,
        ReadWriteFlags::WRITE,
        ReadWriteFlags::READ,
    ]);
}

#[test]
fn test_unresolved_references_stay_unresolved() {
    let code = "console.log(undeclared);";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    let root = scope_manager.scope(scope_manager.root_scope().unwrap());
    assert_that!(&root.references).has_length(2);
    for &reference in &root.references {
        assert_that!(&scope_manager.reference(reference).resolved).is_none();
    }
}

#[test]
fn test_jsx_element_names_are_references() {
    let code = "import Button from './button'; const view = <Button label={text} />; view;";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "Button").uses).has_length(1);
}

#[test]
fn test_lowercase_jsx_tags_are_host_elements() {
    let code = "
        const div = 1;
        const Panel = () => null;
        const view = <div><Panel></Panel><svg:rect /></div>;
        view;
    ";
    let ast = parse(code);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "div").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "Panel").uses).has_length(1);
}

#[test]
fn test_analysis_is_idempotent() {
    let file = ParsedFile::parse(SourceFile::new(
        "idempotent.js",
        "function f(a, b) { const c = a; { let c = b; } } f();",
    ))
    .unwrap();

    let first = analyze_file(&file);
    let second = analyze_file(&file);

    assert_that!(&first.bindings).is_equal_to(second.bindings);
    assert_that!(&first.diagnostics).is_equal_to(second.diagnostics);
}
