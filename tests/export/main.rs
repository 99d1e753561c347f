use ocellus::{
    base::VoidHandler,
    export::{render_module, render_token_dump},
};

#[test]
fn export_token_dump() {
    let tokens = ocellus::tokenize_str("let x = 1; # one", &VoidHandler).expect("Failed to tokenize");

    assert_eq!(
        render_token_dump("demo.noct", &tokens),
        "DEMO.NOCT\n\
         @BEGIN TOKEN CONSTRUCT\n\
         Keyword let\n\
         Identifier x\n\
         Symbol =\n\
         IntConst 1\n\
         Symbol ;\n\
         Comment # one\n\
         @END TOKEN CONSTRUCT\n"
    );
}

#[test]
fn export_module_tree() {
    let module =
        ocellus::parse_str(include_str!("./demo.ocls"), &VoidHandler).expect("Failed to parse");

    assert_eq!(render_module(&module), include_str!("./demo.xml"));
}

#[test]
fn export_escapes_text() {
    let module = ocellus::parse_str(
        "module Escaped where; let cmp = a < b; let text = \"x & y\";",
        &VoidHandler,
    )
    .expect("Failed to parse");
    let xml = render_module(&module);

    assert!(xml.contains("<root>&lt;</root>"));
    assert!(xml.contains("<root>x &amp; y</root>"));
}

#[test]
fn export_functions_and_classes() {
    let module = ocellus::parse_str(
        "```Greets.``` func greet takes name: String = join(\"hi \", name); class Empty { }",
        &VoidHandler,
    )
    .expect("Failed to parse");
    let xml = render_module(&module);

    assert!(xml.contains("<docstring>Greets.</docstring>"));
    assert!(xml.contains("<root>join</root>"));
    assert!(xml.contains("<argument>"));
    assert!(xml.contains("<name>Empty</name>"));
}
