// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod scratch;
mod sketch;
mod ttf;

pub(crate) use scratch::ScratchDir;
pub(crate) use sketch::{SketchFont, EDGE_COVERAGE};
pub(crate) use ttf::{stem_font, STEM_CHAR};

/// Returns the current function name (for use in test naming).
#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        name
    }};
}
