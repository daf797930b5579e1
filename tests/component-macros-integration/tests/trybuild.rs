//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/provider_ok.rs");
    t.pass("tests/trybuild/injectable_ok.rs");
}
