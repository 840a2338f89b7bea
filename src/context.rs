// src/context.rs
// Tiny and Copy: every stage receives one per call.

use crate::inventory::SyllableInventory;

/// Runtime context passed to every stage.
///
/// Syllable-level stages segment their input against `inventory`; character
/// stages ignore it.
#[derive(Debug, Clone, Copy)]
pub struct Context<'i> {
    pub inventory: &'i SyllableInventory,
}

impl<'i> Context<'i> {
    #[inline(always)]
    pub fn new(inventory: &'i SyllableInventory) -> Self {
        Self { inventory }
    }
}
