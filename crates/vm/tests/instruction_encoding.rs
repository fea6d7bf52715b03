//! Programs travel as serde tagged tuples; the core does not define a wire
//! format, but a decoded program must drive the VM unchanged.

use docpatch_core::{SimpleNode, elem, text};
use docpatch_vm::{Instruction, PatchVm};

#[test]
fn a_json_program_replays_against_a_tree() {
    let encoded = r#"[
        "Enter",
        {"DeleteElements": 1},
        {"InsertDocString": "Goodbye, "},
        "UnwrapSelf",
        {"WrapPrevious": [2, {"class": "cool"}]}
    ]"#;
    let program: Vec<Instruction> = serde_json::from_str(encoded).unwrap();

    let root: SimpleNode = elem()
        .child(elem().child(text("Hello, ")).child(text("World")))
        .build();
    let mut vm = PatchVm::new(root.clone()).unwrap();
    vm.run_program(program).unwrap();

    assert_eq!(root.dump(), "<[<{class=\"cool\"}[Goodbye, |World]>]>");
}

#[test]
fn instructions_round_trip_through_serde() {
    let program = vec![
        Instruction::Enter,
        Instruction::AdvanceElements(3),
        Instruction::WrapPrevious(
            1,
            [("class".to_string(), "aside".to_string())].into_iter().collect(),
        ),
        Instruction::Unenter,
    ];
    let encoded = serde_json::to_string(&program).unwrap();
    let decoded: Vec<Instruction> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, program);
}
