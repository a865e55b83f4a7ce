pub mod json;
pub mod terminal;

use crate::model::Scan;

pub trait Reporter {
    fn report(&self, scan: &Scan) -> String;
}
