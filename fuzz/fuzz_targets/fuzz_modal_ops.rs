#![no_main]

//! Random register/show/hide/input sequences must keep the stack, overlay
//! and listener state consistent.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use modalkit::HidePolicy;
use modalkit_harness::{Fixture, Op};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Register(u8),
    Show(u8),
    Hide(u8),
    HideAll,
    Escape,
    Tab,
    ShiftTab,
    PointerInside(u8),
    PointerOutside,
}

impl From<FuzzOp> for Op {
    fn from(op: FuzzOp) -> Self {
        match op {
            FuzzOp::Register(slot) => Op::Register(slot),
            FuzzOp::Show(slot) => Op::Show(slot),
            FuzzOp::Hide(slot) => Op::Hide(slot),
            FuzzOp::HideAll => Op::HideAll,
            FuzzOp::Escape => Op::Escape,
            FuzzOp::Tab => Op::Tab,
            FuzzOp::ShiftTab => Op::ShiftTab,
            FuzzOp::PointerInside(slot) => Op::PointerInside(slot),
            FuzzOp::PointerOutside => Op::PointerOutside,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    dialogs: u8,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: Input| {
    let mut fixture = Fixture::new(usize::from(input.dialogs % 8) + 1, HidePolicy::RemoveById);
    let ops: Vec<Op> = input.ops.into_iter().take(256).map(Op::from).collect();
    if let Err(err) = fixture.run(&ops) {
        panic!("{err}");
    }
});
