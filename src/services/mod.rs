pub mod admin;
pub mod assignment;
pub mod attendance;
pub mod complaint;
pub mod fee;
pub mod mail;
pub mod notice;
pub mod payment;
pub mod sclass;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod upload;
