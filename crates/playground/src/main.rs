use std::collections::BTreeMap;

use docpatch_core::{elem, text};
use docpatch_vm::{Instruction, PatchVm};

fn main() -> anyhow::Result<()> {
    // <root><p>Hello, |World</p></root>
    let root = elem()
        .child(elem().child(text("Hello, ")).child(text("World")))
        .build();
    println!("before: {}", root.dump());

    // A driver would decode this from wherever its diff producer put it.
    let program: Vec<Instruction> = serde_json::from_str(
        r#"[
            "Enter",
            {"DeleteElements": 1},
            {"InsertDocString": "Goodbye, "},
            "UnwrapSelf"
        ]"#,
    )?;

    let mut vm = PatchVm::new(root.clone())?;
    for instruction in program {
        vm.apply(&instruction)?;
        println!("  {instruction:?} -> {}", root.dump());
    }
    println!("after:  {} (done: {})", root.dump(), vm.is_done());

    // Wrap the spliced text back up into a styled container.
    let mut attributes = BTreeMap::new();
    attributes.insert("class".to_string(), "cool".to_string());
    vm.wrap_previous(2, &attributes)?;
    println!("wrapped: {}", root.dump());

    Ok(())
}
