pub mod upload_form;
pub mod upload_handler;
pub mod working_files;
