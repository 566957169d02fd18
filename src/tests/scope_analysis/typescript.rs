use speculoos::prelude::*;

use super::{bindings_named, only_binding, scope_kind_of};
use crate::{
    parser::SourceLanguage,
    scope::{analyze, Binding, BindingKind, ScopeKind, ScopeManager},
    tests::helpers::{parse_as, tracing_subscribe},
};

#[test]
fn test_type_positions_are_references() {
    tracing_subscribe();

    let code = "
        import { Shape } from './shape';
        class Base {}
        type Alias = Base;
        interface Local {
            size: number;
        }
        const area = (shape: Shape): number => 1;
        area;
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "Shape").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "Base").uses).has_length(1);
    assert_that!(&bindings_named(&scope_manager, "Alias")).is_empty();
    assert_that!(&bindings_named(&scope_manager, "Local")).is_empty();
    assert_that!(&only_binding(&scope_manager, "shape").uses).is_empty();
}

#[test]
fn test_parameter_properties_are_exported() {
    let code = "
        class Point {
            constructor(private x: number, y: number) {}
        }
        new Point(1, 2);
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    let x = only_binding(&scope_manager, "x");
    assert_that!(&x.kind).is_equal_to(BindingKind::Parameter);
    assert_that!(&x.exported).is_true();

    let y = only_binding(&scope_manager, "y");
    assert_that!(&y.exported).is_false();
    assert_that!(&y.uses).is_empty();

    assert_that!(&only_binding(&scope_manager, "Point").uses).has_length(1);
}

#[test]
fn test_overload_signatures_are_skipped() {
    let code = "
        function f(a: string): void;
        function f(a: any) {
            return a;
        }
        f('');
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    let f = only_binding(&scope_manager, "f");
    assert_that!(&f.kind).is_equal_to(BindingKind::Function);
    assert_that!(&f.uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "a").uses).has_length(1);
    assert_that!(&scope_manager.diagnostics).is_empty();
}

#[test]
fn test_typescript_parameter_defaults() {
    let code = "
        const fallback = 1;
        function g(value: number = fallback) {
            return value;
        }
        g();
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "fallback").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "value").uses).has_length(1);
}

fn binding_of_kind<'m, 'a>(
    scope_manager: &'m ScopeManager<'a>,
    name: &str,
    kind: BindingKind,
) -> &'m Binding<'a> {
    let bindings = bindings_named(scope_manager, name)
        .into_iter()
        .filter(|binding| binding.kind == kind)
        .collect::<Vec<_>>();
    assert_eq!(bindings.len(), 1, "expected exactly one {kind:?} binding named {name:?}");
    bindings[0]
}

#[test]
fn test_class_type_parameter_shadows_value() {
    let code = "
        const T = 1;
        class C<T> {
            x: T;
        }
        new C();
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&binding_of_kind(&scope_manager, "T", BindingKind::Const).uses).is_empty();
    let parameter = binding_of_kind(&scope_manager, "T", BindingKind::TypeParameter);
    assert_that!(&parameter.uses).has_length(1);
    assert_that!(&scope_kind_of(&scope_manager, parameter)).is_equal_to(ScopeKind::TypeParameters);
}

#[test]
fn test_function_type_parameter_shadows_import() {
    let code = "
        import T from 'x';
        function f<T>(a: T) {}
        f(1);
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&binding_of_kind(&scope_manager, "T", BindingKind::Import).uses).is_empty();
    assert_that!(&binding_of_kind(&scope_manager, "T", BindingKind::TypeParameter).uses)
        .has_length(1);
    assert_that!(&only_binding(&scope_manager, "a").uses).is_empty();
}

#[test]
fn test_index_signature_key_is_not_a_reference() {
    let code = "
        function f(o: { [key: string]: number }) {}
        const key = 1;
        f({});
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&only_binding(&scope_manager, "key").uses).is_empty();
}

#[test]
fn test_mapped_type_key_is_scoped_to_its_signature() {
    let code = "
        const K = 1;
        type M<T> = { [K in keyof T]: T[K] };
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&binding_of_kind(&scope_manager, "K", BindingKind::Const).uses).is_empty();
    assert_that!(&binding_of_kind(&scope_manager, "K", BindingKind::TypeParameter).uses)
        .has_length(1);
    assert_that!(&only_binding(&scope_manager, "T").uses).has_length(2);
    assert_that!(&bindings_named(&scope_manager, "M")).is_empty();
}

#[test]
fn test_signature_type_parameters() {
    let code = "
        const U = 1;
        interface Mapper {
            map<U>(value: U): U;
        }
        type Factory = new <U>(value: U) => U;
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    assert_that!(&binding_of_kind(&scope_manager, "U", BindingKind::Const).uses).is_empty();
    let parameters = bindings_named(&scope_manager, "U")
        .into_iter()
        .filter(|binding| binding.kind == BindingKind::TypeParameter)
        .map(|binding| binding.uses.len())
        .collect::<Vec<_>>();
    assert_that!(&parameters).is_equal_to(vec![2, 2]);
}

#[test]
fn test_import_require_and_alias_bindings() {
    let code = "
        import fs = require('fs');
        import path = require('path');
        import Inner = Outer.Inner;
        export import Shown = Outer.Shown;
        path.join();
    ";
    let ast = parse_as(code, SourceLanguage::Typescript);

    let scope_manager = analyze(&ast, code);

    for name in ["fs", "path", "Inner", "Shown"] {
        assert_that!(&only_binding(&scope_manager, name).kind).is_equal_to(BindingKind::Import);
    }
    assert_that!(&only_binding(&scope_manager, "fs").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "path").uses).has_length(1);
    assert_that!(&only_binding(&scope_manager, "Inner").uses).is_empty();
    assert_that!(&only_binding(&scope_manager, "Inner").exported).is_false();
    assert_that!(&only_binding(&scope_manager, "Shown").exported).is_true();
    assert_that!(&bindings_named(&scope_manager, "Outer")).is_empty();
    assert_that!(&scope_manager.diagnostics).is_empty();
}
