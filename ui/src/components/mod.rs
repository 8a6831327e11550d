//! The converter widgets. Each one reads the [`ConverterHandle`] from the
//! context provided by `App`.
//!
//! [`ConverterHandle`]: crate::hooks::use_converter::ConverterHandle
pub mod amount_input;
pub mod asset_select;
pub mod conversion_result;
pub mod pico;
pub mod price_table;
