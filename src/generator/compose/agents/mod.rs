pub mod section_writer;
