//! Integration tests for construction expressions.
//!
//! Scripts are built with the AST builder, compiled through the public
//! [`Compiler`] entry point and executed by the reference interpreter in
//! `test_harness.rs`, so each test checks the runtime effect of the emitted
//! code rather than its exact shape.


use kestrel::ast::ParamDecl;
use kestrel::prelude::*;
use test_harness::*;

const WIDTHS: [PointerWidth; 2] = [PointerWidth::W32, PointerWidth::W64];

/// `uintptr make(params) { return value; }`
fn make<'ast>(b: &AstBuilder<'ast>, params: &[ParamDecl<'ast>], value: Expr<'ast>) -> Script<'ast> {
    b.script(&[b.function("make", params, Some(b.ty("uintptr")), &[b.ret(Some(value))])])
}

fn compile_errors(script: &Script<'_>, pointer: PointerWidth) -> Vec<CompilationError> {
    let mut registry = fixture_registry(pointer);
    Compiler::compile(script, &mut registry, CompilerOptions::default()).errors
}

// =============================================================================
// Buffers
// =============================================================================

#[test]
fn test_array_header_records_element_count() {
    for pointer in WIDTHS {
        for (element, size) in [
            ("int8", 1),
            ("int16", 2),
            ("int", 4),
            ("double", 8),
            ("Point", u64::from(pointer.bytes())),
        ] {
            let arena = Bump::new();
            let b = AstBuilder::new(&arena);
            let script = make(
                &b,
                &[b.param("n", b.ty("int"))],
                b.new_generic("Array", &[b.ty(element)], &[b.var("n")]),
            );
            let mut registry = fixture_registry(pointer);
            let module = compile_ok(&script, &mut registry, CompilerOptions::default());

            let mut machine = Machine::new(&module, pointer);
            let handle = machine.run("make", &[Value::I32(5)]).unwrap().unwrap();

            assert_eq!(handle.as_address(), HEAP_BASE, "{element} on {pointer:?}");
            assert_eq!(machine.allocations, vec![(HEAP_BASE, 4 + 5 * size)]);
            assert_eq!(machine.read_u32(HEAP_BASE), Ok(5));
        }
    }
}

#[test]
fn test_string_uses_two_byte_code_units() {
    for pointer in WIDTHS {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let script = make(
            &b,
            &[b.param("n", b.ty("int"))],
            b.new_class("String", &[b.var("n")]),
        );
        let mut registry = fixture_registry(pointer);
        let module = compile_ok(&script, &mut registry, CompilerOptions::default());

        let mut machine = Machine::new(&module, pointer);
        machine.run("make", &[Value::I32(7)]).unwrap();

        assert_eq!(machine.allocations, vec![(HEAP_BASE, 18)]);
        assert_eq!(machine.read_u32(HEAP_BASE), Ok(7));
    }
}

#[test]
fn test_string_with_type_arguments_is_unsupported() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(
        &b,
        &[],
        b.new_generic("String", &[b.ty("int")], &[b.int(3)]),
    );
    let mut registry = fixture_registry(PointerWidth::W32);
    let result = Compiler::compile(&script, &mut registry, CompilerOptions::default());

    assert!(matches!(
        result.errors.as_slice(),
        [CompilationError::UnsupportedConstruction { .. }]
    ));
    let mut machine = Machine::new(&result.module, PointerWidth::W32);
    assert_eq!(machine.run("make", &[]), Err(Fault::Trap));
    assert!(machine.allocations.is_empty());
}

#[test]
fn test_array_of_unsized_element_is_reported() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(
        &b,
        &[],
        b.new_generic("Array", &[b.ty("void")], &[b.int(2)]),
    );

    let errors = compile_errors(&script, PointerWidth::W64);
    assert!(matches!(
        errors.as_slice(),
        [CompilationError::UnsizedType { name, .. }] if name == "void"
    ));
}

#[test]
fn test_buffer_temporaries_are_shared_per_function() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = b.script(&[b.function(
        "make",
        &[],
        Some(b.ty("uintptr")),
        &[
            b.var_decl("a", None, b.new_generic("Array", &[b.ty("int16")], &[b.int(3)])),
            b.var_decl("s", None, b.new_class("String", &[b.int(4)])),
            b.ret(Some(b.var("a"))),
        ],
    )]);
    let mut registry = fixture_registry(PointerWidth::W32);
    let module = compile_ok(&script, &mut registry, CompilerOptions::default());
    assert_eq!(module.function("make").unwrap().local_count(), 4);

    let mut machine = Machine::new(&module, PointerWidth::W32);
    let handle = machine.run("make", &[]).unwrap().unwrap();

    let &[(first, first_size), (second, second_size)] = machine.allocations.as_slice() else {
        panic!("expected two allocations, got {:?}", machine.allocations);
    };
    assert_eq!(handle.as_address(), first);
    assert_eq!((first_size, second_size), (10, 12));
    assert_eq!(machine.read_u32(first), Ok(3));
    assert_eq!(machine.read_u32(second), Ok(4));
}

#[test]
fn test_custom_allocator() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(&b, &[], b.new_class("String", &[b.int(1)]));
    let options = CompilerOptions::default().with_allocator("gc_alloc");
    let mut registry = fixture_registry(PointerWidth::W64);
    let module = compile_ok(&script, &mut registry, options);

    let mut machine = Machine::new(&module, PointerWidth::W64).with_allocator("gc_alloc");
    machine.run("make", &[]).unwrap();

    assert_eq!(machine.call_names(), vec!["gc_alloc"]);
}

// =============================================================================
// Classes
// =============================================================================

#[test]
fn test_class_constructor_receives_new_object_and_arguments() {
    for pointer in WIDTHS {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let script = make(
            &b,
            &[],
            b.new_class("Point", &[b.call("f", &[]), b.call("g", &[])]),
        );
        let mut registry = fixture_registry(pointer);
        let module = compile_ok(&script, &mut registry, CompilerOptions::default());

        let mut machine = Machine::new(&module, pointer)
            .with_host("f", host_f)
            .with_host("g", host_g);
        let handle = machine.run("make", &[]).unwrap().unwrap();

        assert_eq!(machine.call_names(), vec!["malloc", "f", "g", "Point#ctor"]);
        assert_eq!(machine.allocations, vec![(HEAP_BASE, 8)]);
        assert_eq!(
            machine.call_args("Point#ctor", 0),
            Some(&[handle, Value::I32(1), Value::I32(2)][..])
        );
    }
}

#[test]
fn test_constructor_defaults() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(&b, &[], b.new_class("Widget", &[b.int(7)]));
    let mut registry = fixture_registry(PointerWidth::W32);
    let module = compile_ok(&script, &mut registry, CompilerOptions::default());

    let mut machine = Machine::new(&module, PointerWidth::W32);
    let handle = machine.run("make", &[]).unwrap().unwrap();

    assert_eq!(machine.allocations, vec![(HEAP_BASE, 16)]);
    assert_eq!(
        machine.call_args("Widget#ctor", 0),
        Some(&[handle, Value::I32(7), Value::F64(1.0)][..])
    );
}

#[test]
fn test_class_without_constructor_ignores_arguments() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(&b, &[], b.new_class("Empty", &[b.call("f", &[])]));
    let mut registry = fixture_registry(PointerWidth::W64);
    let module = compile_ok(&script, &mut registry, CompilerOptions::default());

    let mut machine = Machine::new(&module, PointerWidth::W64).with_host("f", host_f);
    machine.run("make", &[]).unwrap();

    assert_eq!(machine.call_names(), vec!["malloc"]);
    assert_eq!(machine.allocations, vec![(HEAP_BASE, 0)]);
}

#[test]
fn test_constructor_arity_diagnostics() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);

    let exact = make(&b, &[], b.new_class("Point", &[b.int(1), b.int(2)]));
    assert!(compile_errors(&exact, PointerWidth::W32).is_empty());

    let too_few = make(&b, &[], b.new_class("Point", &[b.int(1)]));
    assert!(matches!(
        compile_errors(&too_few, PointerWidth::W32).as_slice(),
        [CompilationError::TooFewArguments {
            expected: 2,
            got: 1,
            ..
        }]
    ));

    let too_many = make(&b, &[], b.new_class("Point", &[b.int(1), b.int(2), b.int(3)]));
    assert!(matches!(
        compile_errors(&too_many, PointerWidth::W32).as_slice(),
        [CompilationError::TooManyArguments {
            expected: 2,
            got: 3,
            ..
        }]
    ));
}

#[test]
fn test_missing_argument_traps_at_runtime() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(&b, &[], b.new_class("Point", &[b.call("f", &[])]));
    let mut registry = fixture_registry(PointerWidth::W32);
    let result = Compiler::compile(&script, &mut registry, CompilerOptions::default());
    assert_eq!(result.errors.len(), 1);

    let mut machine = Machine::new(&result.module, PointerWidth::W32).with_host("f", host_f);
    assert_eq!(machine.run("make", &[]), Err(Fault::Trap));
    assert_eq!(machine.call_names(), vec!["malloc", "f"]);
}

#[test]
fn test_excess_arguments_are_not_evaluated() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(
        &b,
        &[],
        b.new_class("Point", &[b.int(1), b.int(2), b.call("g", &[])]),
    );
    let mut registry = fixture_registry(PointerWidth::W32);
    let result = Compiler::compile(&script, &mut registry, CompilerOptions::default());
    assert_eq!(result.errors.len(), 1);

    let mut machine = Machine::new(&result.module, PointerWidth::W32).with_host("g", host_g);
    machine.run("make", &[]).unwrap();
    assert_eq!(machine.call_names(), vec!["malloc", "Point#ctor"]);
}

#[test]
fn test_unsupported_callees_trap() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    for callee in ["nothing", "f", "int"] {
        let script = make(&b, &[], b.new_class(callee, &[]));
        let mut registry = fixture_registry(PointerWidth::W32);
        let result = Compiler::compile(&script, &mut registry, CompilerOptions::default());

        assert!(
            matches!(
                result.errors.as_slice(),
                [CompilationError::UnsupportedConstruction { .. }]
            ),
            "{callee}: {:?}",
            result.errors
        );
        let mut machine = Machine::new(&result.module, PointerWidth::W32);
        assert_eq!(machine.run("make", &[]), Err(Fault::Trap));
    }
}

// =============================================================================
// Templates
// =============================================================================

#[test]
fn test_template_instances_are_memoized() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let boxed = |name: &str| {
        b.function(
            name,
            &[],
            Some(b.ty("uintptr")),
            &[b.ret(Some(b.new_generic("Box", &[b.ty("int")], &[b.int(1)])))],
        )
    };
    let first = b.script(&[boxed("a"), boxed("b")]);
    let mut registry = fixture_registry(PointerWidth::W32);

    let module = compile_ok(&first, &mut registry, CompilerOptions::default());
    let instance = registry.lookup_type("Box<int>").map(|t| t.type_hash());
    assert!(instance.is_some());
    let types = registry.type_count();

    let second = b.script(&[boxed("c")]);
    compile_ok(&second, &mut registry, CompilerOptions::default());
    assert_eq!(registry.type_count(), types);
    assert_eq!(registry.lookup_type("Box<int>").map(|t| t.type_hash()), instance);

    let mut machine = Machine::new(&module, PointerWidth::W32);
    machine.run("a", &[]).unwrap();
    machine.run("b", &[]).unwrap();
    assert_eq!(
        machine.call_names(),
        vec!["malloc", "Box<int>#ctor", "malloc", "Box<int>#ctor"]
    );
    assert_eq!(machine.allocations[0].1, 4);
}

#[test]
fn test_allocation_precedes_argument_evaluation() {
    for pointer in WIDTHS {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let inner = b.new_class("Point", &[b.call("f", &[]), b.call("g", &[])]);
        let script = make(&b, &[], b.new_generic("Box", &[b.ty("uintptr")], &[inner]));
        let mut registry = fixture_registry(pointer);
        let module = compile_ok(&script, &mut registry, CompilerOptions::default());

        let mut machine = Machine::new(&module, pointer)
            .with_host("f", host_f)
            .with_host("g", host_g);
        let outer = machine.run("make", &[]).unwrap().unwrap();

        assert_eq!(
            machine.call_names(),
            vec!["malloc", "malloc", "f", "g", "Point#ctor", "Box<uintptr>#ctor"]
        );
        let (outer_address, outer_size) = machine.allocations[0];
        let (inner_address, _) = machine.allocations[1];
        assert_eq!(outer.as_address(), outer_address);
        assert_eq!(outer_size, u64::from(pointer.bytes()));
        let box_args = machine.call_args("Box<uintptr>#ctor", 0).unwrap();
        assert_eq!(box_args[1].as_address(), inner_address);
    }
}

#[test]
fn test_template_argument_count_is_checked() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let script = make(
        &b,
        &[],
        b.new_generic("Box", &[b.ty("int"), b.ty("int")], &[b.int(1)]),
    );

    let errors = compile_errors(&script, PointerWidth::W32);
    assert!(matches!(
        errors.as_slice(),
        [CompilationError::TemplateArgumentCount {
            expected: 1,
            got: 2,
            ..
        }]
    ));
}
