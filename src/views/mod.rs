pub mod dashboard;
pub mod hero_list;
