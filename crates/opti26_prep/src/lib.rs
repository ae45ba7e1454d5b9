pub mod cell;
pub mod domain_document;
pub mod employee;
pub mod error;
pub mod normalize;
pub mod ordered_map;
pub mod workbook;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_utils;
