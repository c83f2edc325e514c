//! Individual structural checks. Each returns the issues it found, with a
//! dotted path into the serialized bundle (`entry.2.resource.id`).

pub mod codings;
pub mod dates;
pub mod ids;
pub mod references;
pub mod structure;

pub(crate) fn resource_path(index: usize, element: &str) -> String {
    format!("entry.{index}.resource.{element}")
}
