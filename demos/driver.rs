use std::process::ExitCode;

use jsontree::{parse, serialize, Node, NodeType};

const SAMPLE: &str = r#"{"int" : 1, "float" : 1.4, "bool" : true, "str" : "sad", "array" : [1, "asdas", 4.5e-2, 3], "nested" : {"key" : "value"}}"#;

fn run() -> jsontree::Result<()> {
    let mut tree = parse(SAMPLE)?;
    println!("{}", serialize(&tree)?);

    if let Some(value) = tree.get("float").and_then(Node::as_f64) {
        println!("{value:.6}");
    }

    let mut extra = Node::new(NodeType::Int);
    if let Node::Int(value) = &mut extra {
        *value = 14;
    }
    if let Some(array) = tree.get_mut("array") {
        array.push(extra)?;
    }

    if tree.remove_key("str") {
        println!("removed str");
    }

    tree.add_pair("newfloat", Node::Float(7.3))?;
    println!("{}", serialize(&tree)?);

    jsontree::delete_tree(tree);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Invalid JSON: {err}");
            ExitCode::FAILURE
        }
    }
}
