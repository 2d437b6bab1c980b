#![no_main]

//! Attribute parsing never panics, and accepted values survive a
//! display/parse pass.

use libfuzzer_sys::fuzz_target;
use modalkit::{Dimension, DialogSpec};

const NAMES: [&str; 6] = [
    "dialog-title",
    "dialog-width",
    "dialog-max-height",
    "dialog-close-on-backdrop",
    "dialog-z-index",
    "dialog-overlay",
];

fuzz_target!(|data: (u8, &str)| {
    let (which, value) = data;
    let name = NAMES[usize::from(which) % NAMES.len()];
    let _ = DialogSpec::from_attributes([(name, value)]);

    if let Some(dim) = Dimension::parse(value) {
        assert_eq!(Dimension::parse(&dim.to_string()), Some(dim));
    }
});
