pub mod generate;
pub mod init;
pub mod labels;
pub mod views;
