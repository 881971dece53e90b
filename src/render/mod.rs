pub mod display_list;
pub mod pipeline;
