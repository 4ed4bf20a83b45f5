pub mod prop_find_result;
pub mod xml_node;
