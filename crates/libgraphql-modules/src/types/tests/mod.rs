mod enum_type_tests;
mod object_type_tests;
mod scalar_type_tests;
mod type_hint_tests;
mod union_type_tests;
mod utils;
