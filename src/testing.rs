pub mod stage_contract;

use crate::inventory::SyllableInventory;
use lazy_static::lazy_static;

lazy_static! {
    /// One standard inventory shared by every test in the crate.
    pub static ref STANDARD: SyllableInventory = SyllableInventory::standard();
}
