mod support;

mod definition_store_tests;
mod end_to_end_tests;
