pub mod cleaned_table;
pub mod region;
pub mod resort;
