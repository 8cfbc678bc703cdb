pub mod section_planner;
